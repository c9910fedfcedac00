//! Line editor state machine.
//!
//! Consumes one byte at a time from the transport and maintains the
//! editable line, the escape-sequence parser and the history recall
//! position. All terminal updates are minimal backspace/space redraws;
//! no cursor-positioning escapes are emitted.

use core::fmt::Write;

use super::commands::{self, CommandContext};
use super::completion::{complete, Completion};
use super::error::ConsoleError;
use super::history::History;
use super::line_buffer::LineBuffer;
use super::parser::parse_line;
use crate::config::{MAX_LINE_LEN, PROMPT};

const BS: &str = "\x08";

/// Escape-sequence parsing progress.
#[derive(Clone, Copy, PartialEq)]
enum EscapeState {
    Normal,
    /// Got ESC
    SawEscape,
    /// Got ESC [
    SawBracket,
}

/// Console state machine
pub struct Console {
    line: LineBuffer,
    history: History,
    escape_state: EscapeState,
}

impl Console {
    /// Create a console with an empty line, cursor at 0.
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            history: History::new(),
            escape_state: EscapeState::Normal,
        }
    }

    /// Process a single input byte.
    ///
    /// Returns `Some(result)` when the byte completed a command line (or
    /// aborted one on overflow), `None` while more input is needed.
    pub fn process_byte(
        &mut self,
        byte: u8,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        match self.escape_state {
            EscapeState::Normal => self.process_normal(byte, out),
            EscapeState::SawEscape => {
                // Only CSI sequences are understood; anything else
                // abandons the sequence.
                self.escape_state = if byte == b'[' {
                    EscapeState::SawBracket
                } else {
                    EscapeState::Normal
                };
                None
            }
            EscapeState::SawBracket => {
                self.escape_state = EscapeState::Normal;
                match byte {
                    b'A' => self.recall_prev(out),
                    b'B' => self.recall_next(out),
                    b'C' => self.cursor_right(out),
                    b'D' => self.cursor_left(out),
                    _ => {}
                }
                None
            }
        }
    }

    fn process_normal(
        &mut self,
        byte: u8,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        match byte {
            // Escape
            0x1B => {
                self.escape_state = EscapeState::SawEscape;
                None
            }

            // Enter
            b'\r' => self.submit(out),

            // Backspace
            0x7F | 0x08 => {
                self.backspace(out);
                None
            }

            // Tab
            b'\t' => {
                self.complete_line(out);
                None
            }

            // Printable character
            0x20..=0x7E => self.insert(byte, out),

            _ => None,
        }
    }

    /// Insert a printable byte at the cursor.
    ///
    /// A line at its limit is aborted outright: notice, reset, fresh
    /// prompt. Truncating silently would desynchronize the terminal
    /// from the buffer.
    fn insert(&mut self, byte: u8, out: &mut dyn Write) -> Option<Result<(), ConsoleError>> {
        if self.line.at_limit() {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", ConsoleError::LineOverflow);
            self.line.clear();
            self.history.reset_browse();
            self.print_prompt(out);
            return Some(Err(ConsoleError::LineOverflow));
        }

        let at_end = self.line.cursor() == self.line.len();
        if !self.line.insert(byte) {
            return None;
        }
        self.history.reset_browse();

        if at_end {
            let _ = out.write_char(byte as char);
        } else {
            // Re-emit the inserted byte plus the shifted tail, then walk
            // the terminal cursor back to just after the insertion.
            let start = self.line.cursor() - 1;
            let emitted = self.line.len() - start;
            let _ = out.write_str(bytes_as_str(&self.line.as_bytes()[start..]));
            for _ in 0..emitted - 1 {
                let _ = out.write_str(BS);
            }
        }
        None
    }

    /// Delete the byte before the cursor and redraw the tail.
    fn backspace(&mut self, out: &mut dyn Write) {
        if !self.line.delete_before_cursor() {
            return;
        }
        self.history.reset_browse();

        // One backspace, the shifted tail, a blank over the stale last
        // column, then walk back to the cursor.
        let tail_len = self.line.len() - self.line.cursor();
        let _ = out.write_str(BS);
        let _ = out.write_str(bytes_as_str(self.line.tail()));
        let _ = out.write_char(' ');
        for _ in 0..tail_len + 1 {
            let _ = out.write_str(BS);
        }
    }

    fn cursor_left(&mut self, out: &mut dyn Write) {
        if self.line.move_left() {
            let _ = out.write_str(BS);
        }
    }

    fn cursor_right(&mut self, out: &mut dyn Write) {
        // Echo the byte passed over; the terminal has no other way to
        // advance without a positioning escape.
        if let Some(byte) = self.line.move_right() {
            let _ = out.write_char(byte as char);
        }
    }

    fn recall_prev(&mut self, out: &mut dyn Write) {
        if let Some(entry) = self.history.recall_prev() {
            redraw_replace(&mut self.line, entry, out);
        }
    }

    fn recall_next(&mut self, out: &mut dyn Write) {
        if !self.history.is_browsing() {
            return;
        }
        match self.history.recall_next() {
            Some(entry) => redraw_replace(&mut self.line, entry, out),
            // Past the newest entry: back to the empty live line.
            None => redraw_replace(&mut self.line, "", out),
        }
    }

    /// Complete the current line against the command table.
    fn complete_line(&mut self, out: &mut dyn Write) {
        match complete(self.line.as_str(), commands::COMMANDS) {
            Completion::NoMatch => {}
            Completion::Extended(full) => {
                // Echo anything between the cursor and the end, then the
                // appended suffix; the cursor lands at the end.
                let _ = out.write_str(bytes_as_str(self.line.tail()));
                let _ = out.write_str(&full[self.line.len()..]);
                self.line.set(full);
            }
            Completion::Help(desc) => {
                let _ = writeln!(out);
                let _ = writeln!(out, "{} - {}", desc.name, desc.brief);
                self.redraw_prompt_line(out);
            }
            Completion::Candidates(names) => {
                let _ = writeln!(out);
                for name in &names {
                    let _ = writeln!(out, "  {}", name);
                }
                self.redraw_prompt_line(out);
            }
        }
    }

    /// Submit the current line to the command interpreter.
    fn submit(&mut self, out: &mut dyn Write) -> Option<Result<(), ConsoleError>> {
        let _ = writeln!(out);

        // Copy out trimmed so the line state can be reset before dispatch.
        let mut submitted: heapless::String<MAX_LINE_LEN> = heapless::String::new();
        let trimmed = self
            .line
            .as_str()
            .trim_end_matches(|c: char| c == ' ' || c == '\r' || c == '\n');
        let _ = submitted.push_str(trimmed);

        self.line.clear();
        self.history.reset_browse();

        if submitted.is_empty() {
            self.print_prompt(out);
            return None;
        }

        self.history.push(&submitted);

        let parsed = parse_line(&submitted);
        let result = {
            let mut ctx = CommandContext {
                history: &self.history,
                out: &mut *out,
            };
            commands::execute(&parsed, &mut ctx)
        };

        if let Err(err) = result {
            let _ = writeln!(out, "{}", err);
            if err == ConsoleError::UnknownCommand {
                let _ = writeln!(out, "Type 'help' for available commands.");
            }
        }

        self.print_prompt(out);
        Some(result)
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn Write) {
        let _ = write!(out, "{}", PROMPT);
    }

    /// Print welcome banner
    pub fn print_banner(&self, out: &mut dyn Write) {
        let _ = writeln!(out, "\n{}", super::VERSION);
        let _ = writeln!(out, "Type 'help' for commands.");
        self.print_prompt(out);
    }

    /// Current line content, for inspection.
    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    /// Cursor offset within the current line, for inspection.
    pub fn cursor(&self) -> usize {
        self.line.cursor()
    }

    /// Submission history, for inspection.
    pub fn history(&self) -> &History {
        &self.history
    }

    fn redraw_prompt_line(&mut self, out: &mut dyn Write) {
        self.print_prompt(out);
        self.line.move_to_end();
        let _ = out.write_str(self.line.as_str());
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Blank the displayed line and draw `text` in its place, cursor at the
/// end: backspaces to column 0, spaces over the old text, backspaces
/// again, then the replacement.
fn redraw_replace(line: &mut LineBuffer, text: &str, out: &mut dyn Write) {
    for _ in 0..line.cursor() {
        let _ = out.write_str(BS);
    }
    for _ in 0..line.len() {
        let _ = out.write_char(' ');
    }
    for _ in 0..line.len() {
        let _ = out.write_str(BS);
    }

    line.set(text);
    let _ = out.write_str(line.as_str());
}

fn bytes_as_str(bytes: &[u8]) -> &str {
    core::str::from_utf8(bytes).unwrap_or("")
}
