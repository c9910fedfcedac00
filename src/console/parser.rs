//! Command line parser
//!
//! Simple split on whitespace, bounded argument list.

use heapless::Vec;

use crate::config::MAX_ARGS;

/// Tokenized command line.
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// First whitespace-separated token, empty for a blank line.
    pub command: &'a str,
    args: Vec<&'a str, MAX_ARGS>,
}

impl<'a> ParsedCommand<'a> {
    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied()
    }

    /// Number of parsed arguments
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

/// Split a line into a command word plus up to [`MAX_ARGS`] arguments.
///
/// Tokens beyond the argument limit are dropped.
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");

    let mut args: Vec<&str, MAX_ARGS> = Vec::new();
    for part in parts.take(MAX_ARGS) {
        let _ = args.push(part);
    }

    ParsedCommand { command, args }
}
