//! Prefix-based command-name completion.

use heapless::Vec;

use super::commands::CommandDescriptor;

/// Most candidates listed for an ambiguous prefix; the command table is
/// well under this.
pub const CANDIDATE_LIMIT: usize = 8;

/// Outcome of completing a prefix against the command table.
#[derive(Debug)]
pub enum Completion<'a> {
    /// No command starts with the prefix.
    NoMatch,
    /// Exactly one command starts with the prefix; extend to its name.
    Extended(&'a str),
    /// The prefix is itself a complete command name; show its help.
    Help(&'a CommandDescriptor),
    /// Several commands share the prefix.
    Candidates(Vec<&'a str, CANDIDATE_LIMIT>),
}

/// Classify `prefix` against the command table.
///
/// An exact name match is checked before prefix counting, so a command
/// name that is also the prefix of a longer name resolves to help
/// display rather than an ambiguity list.
pub fn complete<'a>(prefix: &str, commands: &'a [CommandDescriptor]) -> Completion<'a> {
    if let Some(exact) = commands.iter().find(|c| c.name == prefix) {
        return Completion::Help(exact);
    }

    let mut matches: Vec<&'a str, CANDIDATE_LIMIT> = Vec::new();
    for c in commands {
        if c.name.starts_with(prefix) {
            let _ = matches.push(c.name);
        }
    }

    match matches.len() {
        0 => Completion::NoMatch,
        1 => Completion::Extended(matches[0]),
        _ => Completion::Candidates(matches),
    }
}
