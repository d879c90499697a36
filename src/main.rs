// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load settings (config file + flag overrides) and set up logging
// 3. Open the dictionaries and the GitHub client
// 4. Hand everything to the interactive session
// 5. Exit with proper code (0 = session finished, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - settings file
mod github;   // src/github/ - repository listing and README lookup
mod session;  // src/session/ - the interactive state machine
mod spelling; // src/spelling/ - tokenizer, filter and dictionaries

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use config::Settings;
use github::GithubClient;
use session::{stdin_commands, Mode, Session, SessionOptions};
use spelling::{CustomDictionary, PrimaryDictionary};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings =
        Settings::load(cli.config.as_deref()).context("could not load configuration")?;
    apply_overrides(&mut settings, &cli);
    settings.validate()?;

    let primary = PrimaryDictionary::load(&settings.dictionary).with_context(|| {
        format!(
            "could not open dictionary {} (use --dictionary to pick another)",
            settings.dictionary.display()
        )
    })?;

    let dev_path = settings.dev_dictionary_path()?;
    let mut developer = CustomDictionary::load(&dev_path)
        .with_context(|| format!("could not open developer dictionary {}", dev_path.display()))?;

    if primary.is_empty() {
        warn!(path = %settings.dictionary.display(), "primary dictionary has no words");
    }
    if developer.is_empty() {
        info!(path = %dev_path.display(), "developer dictionary is empty");
    }
    info!(
        primary_words = primary.len(),
        developer_words = developer.len(),
        "dictionaries ready"
    );

    let client = GithubClient::new(settings.github_config(cli.token.clone()))?;
    let rules = settings.filter_rules();

    let options = SessionOptions {
        mode: if cli.learn { Mode::Learn } else { Mode::Spellcheck },
        max_pages: settings.max_pages,
        policy: settings.report_policy,
        fallback: settings.selection_fallback,
        max_repos: settings.max_repos,
        keep_apostrophes: settings.keep_apostrophes,
        json: cli.json,
    };

    let stdout = io::stdout();
    let mut session = Session::new(
        &client,
        &rules,
        &primary,
        &mut developer,
        options,
        stdout.lock(),
        io::stderr(),
    );
    let mut commands = stdin_commands();
    session.run(&mut commands).await?;

    Ok(())
}

// Flags given on the command line win over the config file
fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(path) = &cli.dictionary {
        settings.dictionary = path.clone();
    }
    if let Some(path) = &cli.dev_dictionary {
        settings.dev_dictionary = Some(path.clone());
    }
    if let Some(policy) = cli.policy {
        settings.report_policy = policy.into();
    }
    if let Some(fallback) = cli.on_invalid {
        settings.selection_fallback = fallback.into();
    }
    if let Some(max) = cli.max_repos {
        settings.max_repos = usize::try_from(max).ok();
    }
}

// Logs go to stderr so they never interleave with prompts on stdout.
// RUST_LOG wins; otherwise warnings only, or debug with --verbose.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}
