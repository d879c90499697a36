// src/session/input.rs
// =============================================================================
// Where the session's operator input comes from.
//
// The real binary reads lines from stdin; tests feed a fixed script.
// Both are just iterators of lines, so any Iterator<Item = String> is a
// CommandSource.
//
// Example:
//   let mut script = vec!["1".to_string(), "0".to_string()].into_iter();
//   script.next_line() // Some("1")
// =============================================================================

use std::io::{self, BufRead};

pub trait CommandSource {
    /// The next line of input without its line ending, or None at end of input
    fn next_line(&mut self) -> Option<String>;
}

impl<I> CommandSource for I
where
    I: Iterator<Item = String>,
{
    fn next_line(&mut self) -> Option<String> {
        self.next()
            .map(|line| line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

// Lines typed into the terminal
//
// A read error is treated like end of input: the session just ends.
pub fn stdin_commands() -> impl CommandSource {
    io::stdin().lock().lines().map_while(|line| match line {
        Ok(line) => Some(line),
        Err(e) => {
            tracing::warn!(error = %e, "could not read from stdin");
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterator_is_a_command_source() {
        let mut script = vec!["3\r\n".to_string(), "y".to_string()].into_iter();
        assert_eq!(script.next_line(), Some("3".to_string()));
        assert_eq!(script.next_line(), Some("y".to_string()));
        assert_eq!(script.next_line(), None);
    }
}
