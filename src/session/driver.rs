// src/session/driver.rs
// =============================================================================
// The interactive session, written as an explicit state machine.
//
//   AwaitingPageCount -> FetchingPages -> AwaitingRepoSelection
//                                           |            ^
//                                           v            |
//                                         Spellchecking -+
//
//   (learn mode)       FetchingPages -> Learning(0) -> Learning(1) -> ... -> Done
//
// Every transition is driven by a line from a CommandSource, so the whole
// session can be replayed in a test with a scripted list of answers.
//
// Errors from GitHub never end the session: a failed page stops paging (we
// keep what we have), a failed README is reported and we go back to asking
// for a repository.
//
// Reports and the summary go to `out`. Prompts and progress lines go to
// `out` as well, except with --json, where they go to `notes` so that `out`
// stays a clean stream of JSON documents.
// =============================================================================

use std::fmt;
use std::io::{self, Write};

use anyhow::Result;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::report::{write_report, write_summary, RepoReport, SessionSummary};
use super::CommandSource;
use crate::github::{self, GithubClient, Readme, Repository};
use crate::spelling::{Checker, CustomDictionary, FilterRules, ReportPolicy, SpellingOracle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Spellcheck,
    Learn,
}

/// What to do with a repository number that is out of range (or not a number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionFallback {
    /// Ignore it and ask again
    #[default]
    Reprompt,
    /// Inspect the repository after the last one inspected
    Advance,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub mode: Mode,
    pub max_pages: usize,
    pub policy: ReportPolicy,
    pub fallback: SelectionFallback,
    /// Stop after inspecting this many repositories
    pub max_repos: Option<usize>,
    pub keep_apostrophes: bool,
    pub json: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Spellcheck,
            max_pages: 10,
            policy: ReportPolicy::default(),
            fallback: SelectionFallback::default(),
            max_repos: None,
            keep_apostrophes: false,
            json: false,
        }
    }
}

// Outcome of looking up one repository's README
enum Lookup {
    Found(Readme),
    Missing,
    // Already reported to the operator
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingPageCount,
    FetchingPages(usize),
    AwaitingRepoSelection,
    Spellchecking(usize),
    Learning(usize),
    Done,
}

pub struct Session<'a, W: Write, N: Write> {
    client: &'a GithubClient,
    rules: &'a FilterRules,
    primary: &'a dyn SpellingOracle,
    developer: &'a mut CustomDictionary,
    options: SessionOptions,
    out: W,
    notes: N,
    repos: Vec<Repository>,
    last_inspected: Option<usize>,
    summary: SessionSummary,
}

impl<'a, W: Write, N: Write> Session<'a, W, N> {
    pub fn new(
        client: &'a GithubClient,
        rules: &'a FilterRules,
        primary: &'a dyn SpellingOracle,
        developer: &'a mut CustomDictionary,
        options: SessionOptions,
        out: W,
        notes: N,
    ) -> Self {
        Self {
            client,
            rules,
            primary,
            developer,
            options,
            out,
            notes,
            repos: Vec::new(),
            last_inspected: None,
            summary: SessionSummary::default(),
        }
    }

    /// Runs until the input ends or the repository limit is hit
    pub async fn run<C: CommandSource>(&mut self, commands: &mut C) -> Result<SessionSummary> {
        let mut state = State::AwaitingPageCount;

        while state != State::Done {
            debug!(?state, "session step");
            state = match state {
                State::AwaitingPageCount => self.ask_page_count(commands)?,
                State::FetchingPages(count) => self.fetch_pages(count).await?,
                State::AwaitingRepoSelection => self.ask_repo(commands)?,
                State::Spellchecking(index) => self.spellcheck(index).await?,
                State::Learning(index) => self.learn(index, commands).await?,
                State::Done => State::Done,
            };
        }

        write_summary(&mut self.out, &self.summary, self.options.json)?;
        Ok(self.summary.clone())
    }

    fn ask_page_count<C: CommandSource>(&mut self, commands: &mut C) -> Result<State> {
        let max_pages = self.options.max_pages;
        self.note(format_args!("How many pages would you like? (1-{})", max_pages))?;

        let Some(line) = commands.next_line() else {
            return Ok(State::Done);
        };

        match line.trim().parse::<usize>() {
            Ok(count) if (1..=self.options.max_pages).contains(&count) => {
                Ok(State::FetchingPages(count))
            }
            _ => {
                debug!(input = %line, "invalid page count");
                Ok(State::AwaitingPageCount)
            }
        }
    }

    async fn fetch_pages(&mut self, count: usize) -> Result<State> {
        let stream = github::pages(self.client, count);
        futures::pin_mut!(stream);

        while let Some(page) = stream.next().await {
            match page {
                Ok(page) => {
                    self.summary.pages_fetched += 1;
                    self.repos.extend(page.repositories);
                }
                Err(e) => {
                    // Keep the pages we already have
                    warn!(error = %e, "stopped fetching pages");
                    self.note(format_args!("⚠️  Failed to fetch page: {}", e))?;
                    self.summary.failures += 1;
                    break;
                }
            }
        }

        self.summary.repositories_fetched = self.repos.len();
        info!(
            pages = self.summary.pages_fetched,
            repositories = self.repos.len(),
            "repository listing fetched"
        );

        if self.repos.is_empty() {
            self.note(format_args!("No repositories fetched"))?;
            return Ok(State::Done);
        }

        Ok(match self.options.mode {
            Mode::Spellcheck => State::AwaitingRepoSelection,
            Mode::Learn => State::Learning(0),
        })
    }

    fn ask_repo<C: CommandSource>(&mut self, commands: &mut C) -> Result<State> {
        let last = self.repos.len() - 1;
        self.note(format_args!("Repo number? (0-{})", last))?;

        let Some(line) = commands.next_line() else {
            return Ok(State::Done);
        };

        match line.trim().parse::<usize>() {
            Ok(index) if index < self.repos.len() => Ok(State::Spellchecking(index)),
            _ => {
                debug!(input = %line, fallback = ?self.options.fallback, "invalid repo number");
                Ok(match self.options.fallback {
                    SelectionFallback::Reprompt => State::AwaitingRepoSelection,
                    SelectionFallback::Advance => State::Spellchecking(self.next_index()),
                })
            }
        }
    }

    async fn spellcheck(&mut self, index: usize) -> Result<State> {
        let repo = self.repos[index].clone();

        let readme = match self.open_repo(index, &repo).await? {
            Lookup::Found(readme) => Some(readme),
            Lookup::Missing => None,
            Lookup::Failed => return self.after_inspection(State::AwaitingRepoSelection),
        };

        let misspelled = match &readme {
            Some(readme) => self.checker().misspelled(
                &readme.text,
                &repo.name,
                self.primary,
                &*self.developer,
            ),
            None => Vec::new(),
        };
        self.summary.misspelled_words += misspelled.len();

        let report = RepoReport {
            name: repo.name,
            html_url: repo.html_url,
            readme_url: readme.map(|r| r.url),
            misspelled,
        };
        write_report(&mut self.out, &report, self.options.json)?;

        self.after_inspection(State::AwaitingRepoSelection)
    }

    async fn learn<C: CommandSource>(&mut self, index: usize, commands: &mut C) -> Result<State> {
        let repo = self.repos[index].clone();
        let next = if index + 1 < self.repos.len() {
            State::Learning(index + 1)
        } else {
            State::Done
        };

        let readme = match self.open_repo(index, &repo).await? {
            Lookup::Found(readme) => readme,
            Lookup::Missing | Lookup::Failed => return self.after_inspection(next),
        };

        let candidates = self.checker().learn_candidates(
            &readme.text,
            &repo.name,
            self.primary,
            &*self.developer,
        );

        for word in candidates {
            self.note(format_args!("Add this word to dictionary? {} (y/n)", word))?;

            let Some(answer) = commands.next_line() else {
                return Ok(State::Done);
            };
            if answer.trim() != "y" {
                continue;
            }

            match self.developer.append(&word) {
                Ok(true) => self.summary.words_learned += 1,
                Ok(false) => debug!(word = %word, "word already in custom dictionary"),
                Err(e) => {
                    warn!(error = %e, "could not update custom dictionary");
                    self.note(format_args!("⚠️  {}", e))?;
                }
            }
        }

        self.after_inspection(next)
    }

    // Prints the repository header and downloads its README
    async fn open_repo(&mut self, index: usize, repo: &Repository) -> Result<Lookup> {
        self.last_inspected = Some(index);
        self.summary.inspected += 1;

        self.note(format_args!("Repo Name: {}", repo.name))?;
        self.note(format_args!("Repo URL: {}", repo.html_url))?;

        match github::fetch_readme(self.client, &repo.html_url).await {
            Ok(Some(readme)) => {
                self.summary.readmes_found += 1;
                self.note(format_args!("Found Readme file: {}", readme.url))?;
                Ok(Lookup::Found(readme))
            }
            Ok(None) => {
                self.note(format_args!("Could not find readme"))?;
                Ok(Lookup::Missing)
            }
            Err(e) => {
                warn!(repo = %repo.name, error = %e, "README fetch failed");
                self.note(format_args!("⚠️  Failed to fetch README: {}", e))?;
                self.summary.failures += 1;
                Ok(Lookup::Failed)
            }
        }
    }

    // One line of prompt or progress text for the operator
    fn note(&mut self, line: fmt::Arguments<'_>) -> io::Result<()> {
        if self.options.json {
            writeln!(self.notes, "{}", line)
        } else {
            writeln!(self.out, "{}", line)
        }
    }

    fn after_inspection(&mut self, next: State) -> Result<State> {
        if let Some(limit) = self.options.max_repos {
            if self.summary.inspected >= limit {
                self.note(format_args!("Reached the limit of {} repositories", limit))?;
                return Ok(State::Done);
            }
        }
        Ok(next)
    }

    fn next_index(&self) -> usize {
        match self.last_inspected {
            Some(index) => (index + 1) % self.repos.len(),
            None => 0,
        }
    }

    fn checker(&self) -> Checker<'a> {
        Checker {
            rules: self.rules,
            keep_apostrophes: self.options.keep_apostrophes,
            policy: self.options.policy,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why an explicit State enum instead of nested loops?
//    - Each step returns the next state, so run() is one flat loop
//    - The compiler makes sure every state is handled in the match
//
// 2. What is let-else?
//    - let Some(line) = commands.next_line() else { return ... };
//    - Binds `line` if the pattern matches, otherwise runs the else block
//      (which must leave the function, loop, etc.)
//
// 3. What does futures::pin_mut! do?
//    - Streams built from async blocks must not move in memory while polled
//    - pin_mut! pins the stream to the stack so we can call .next() on it
// -----------------------------------------------------------------------------
