//! Interactive serial console
//!
//! Byte-at-a-time line editor with cursor editing, history recall and
//! tab completion. Polled from the main loop; zero heap allocation.

pub mod commands;
pub mod completion;
mod console;
pub mod error;
pub mod history;
pub mod line_buffer;
pub mod parser;

pub use commands::{execute, CommandContext, CommandDescriptor, COMMANDS};
pub use completion::{complete, Completion};
pub use console::Console;
pub use error::ConsoleError;
pub use history::History;
pub use line_buffer::LineBuffer;
pub use parser::{parse_line, ParsedCommand};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");
