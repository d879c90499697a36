// src/session/report.rs
// =============================================================================
// What the session prints about each repository, and at the end.
//
// Reports are plain text by default and JSON with --json, the same way the
// link checker's results could be printed either way.
// =============================================================================

use std::io::{self, Write};

use serde::Serialize;

/// The spellcheck result for one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoReport {
    pub name: String,
    pub html_url: String,
    /// None when no README candidate existed
    pub readme_url: Option<String>,
    pub misspelled: Vec<String>,
}

/// Counters for the whole session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub pages_fetched: usize,
    pub repositories_fetched: usize,
    pub inspected: usize,
    pub readmes_found: usize,
    pub misspelled_words: usize,
    pub words_learned: usize,
    pub failures: usize,
}

pub fn write_report<W: Write>(out: &mut W, report: &RepoReport, json: bool) -> io::Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        return writeln!(out, "{}", json_output);
    }

    writeln!(out, "Misspelled words {}", report.misspelled.len())?;
    for word in &report.misspelled {
        writeln!(out, "   {}", word)?;
    }
    writeln!(out)
}

pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &SessionSummary,
    json: bool,
) -> io::Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(summary)?;
        return writeln!(out, "{}", json_output);
    }

    writeln!(out)?;
    writeln!(out, "📊 Summary:")?;
    writeln!(out, "   📄 Pages fetched: {}", summary.pages_fetched)?;
    writeln!(out, "   📦 Repositories fetched: {}", summary.repositories_fetched)?;
    writeln!(out, "   🔍 Repositories inspected: {}", summary.inspected)?;
    writeln!(out, "   📘 READMEs found: {}", summary.readmes_found)?;
    writeln!(out, "   ❌ Misspelled words: {}", summary.misspelled_words)?;
    if summary.words_learned > 0 {
        writeln!(out, "   ✅ Words learned: {}", summary.words_learned)?;
    }
    if summary.failures > 0 {
        writeln!(out, "   ⚠️  Failed requests: {}", summary.failures)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report() -> RepoReport {
        RepoReport {
            name: "spoon".to_string(),
            html_url: "https://github.com/octo/spoon".to_string(),
            readme_url: None,
            misspelled: vec!["teh".to_string(), "browm".to_string()],
        }
    }

    #[test]
    fn test_text_report() {
        let mut out = Vec::new();
        write_report(&mut out, &report(), false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Misspelled words 2\n   teh\n   browm\n\n"
        );
    }

    #[test]
    fn test_json_report() {
        let mut out = Vec::new();
        write_report(&mut out, &report(), true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["name"], "spoon");
        assert_eq!(value["readme_url"], serde_json::Value::Null);
        assert_eq!(value["misspelled"][1], "browm");
    }

    #[test]
    fn test_json_summary() {
        let summary = SessionSummary {
            pages_fetched: 2,
            inspected: 1,
            ..SessionSummary::default()
        };
        let mut out = Vec::new();
        write_summary(&mut out, &summary, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["pages_fetched"], 2);
        assert_eq!(value["inspected"], 1);
        assert_eq!(value["words_learned"], 0);
    }

    #[test]
    fn test_text_summary_hides_zero_failures() {
        let mut out = Vec::new();
        write_summary(&mut out, &SessionSummary::default(), false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Summary:"));
        assert!(!text.contains("Failed requests"));
    }
}
