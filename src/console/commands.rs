//! Command handlers
//!
//! Trivial name-to-handler dispatch. The engineering lives in the
//! editor; handlers just format responses into the output sink.

use core::fmt::Write;

use super::error::ConsoleError;
use super::history::History;
use super::parser::ParsedCommand;
use super::VERSION;

/// State a handler may consult while producing its response.
pub struct CommandContext<'a> {
    /// Read-only view of the submission history.
    pub history: &'a History,
    /// Terminal output sink.
    pub out: &'a mut dyn Write,
}

/// Command descriptor
#[derive(Debug)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub handler: fn(&ParsedCommand<'_>, &mut CommandContext<'_>) -> Result<(), ConsoleError>,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", brief: "List commands or describe one", handler: cmd_help },
    CommandDescriptor { name: "clear", brief: "Clear the screen", handler: cmd_clear },
    CommandDescriptor { name: "history", brief: "Show command history", handler: cmd_history },
    CommandDescriptor { name: "version", brief: "Show version info", handler: cmd_version },
    CommandDescriptor { name: "echo", brief: "Write arguments back", handler: cmd_echo },
];

/// Look up a command by exact name.
pub fn find(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Execute a parsed command
pub fn execute(cmd: &ParsedCommand<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    if cmd.command.is_empty() {
        return Ok(()); // Blank line, nothing to do
    }

    let descriptor = find(cmd.command).ok_or(ConsoleError::UnknownCommand)?;
    (descriptor.handler)(cmd, ctx)
}

// --- Command Implementations ---

fn cmd_help(cmd: &ParsedCommand<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        // Help for one command
        let c = find(name).ok_or(ConsoleError::UnknownCommand)?;
        let _ = writeln!(ctx.out, "{} - {}", c.name, c.brief);
    } else {
        let _ = writeln!(ctx.out, "Available commands:");
        for c in COMMANDS {
            let _ = writeln!(ctx.out, "  {:<10} {}", c.name, c.brief);
        }
    }
    Ok(())
}

fn cmd_clear(_cmd: &ParsedCommand<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    let _ = write!(ctx.out, "\x1b[2J\x1b[H");
    Ok(())
}

fn cmd_history(_cmd: &ParsedCommand<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    let _ = writeln!(ctx.out, "Command history:");
    for (i, entry) in ctx.history.iter().enumerate() {
        let _ = writeln!(ctx.out, "  {}: {}", i + 1, entry);
    }
    Ok(())
}

fn cmd_version(_cmd: &ParsedCommand<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    let _ = writeln!(ctx.out, "{}", VERSION);
    Ok(())
}

fn cmd_echo(cmd: &ParsedCommand<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    for i in 0..cmd.arg_count() {
        if i > 0 {
            let _ = write!(ctx.out, " ");
        }
        if let Some(arg) = cmd.arg(i) {
            let _ = write!(ctx.out, "{}", arg);
        }
    }
    let _ = writeln!(ctx.out);
    Ok(())
}
