//! Cursor-aware line input buffer.

use heapless::Vec;

use crate::config::MAX_LINE_LEN;

/// Editable input line with a cursor.
///
/// Invariants: `cursor <= len` and `len <= MAX_LINE_LEN - 1`. The
/// content between 0 and `len` always matches what has been rendered to
/// the terminal, modulo redraw bytes still in flight.
pub struct LineBuffer {
    buf: Vec<u8, MAX_LINE_LEN>,
    cursor: usize,
}

impl LineBuffer {
    /// Interactive input stops one byte short of the raw capacity.
    const LIMIT: usize = MAX_LINE_LEN - 1;

    /// Create an empty line, cursor at 0.
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            cursor: 0,
        }
    }

    /// Insert a byte at the cursor, shifting the tail right.
    ///
    /// Returns `false` when the line is at its limit.
    pub fn insert(&mut self, byte: u8) -> bool {
        if self.buf.len() >= Self::LIMIT || self.buf.insert(self.cursor, byte).is_err() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Remove the byte before the cursor, shifting the tail left.
    ///
    /// Returns `false` when the cursor is at the start of the line.
    pub fn delete_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.buf.remove(self.cursor - 1);
        self.cursor -= 1;
        true
    }

    /// Step the cursor left. Returns `false` at the start of the line.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step the cursor right, returning the byte passed over.
    pub fn move_right(&mut self) -> Option<u8> {
        if self.cursor >= self.buf.len() {
            return None;
        }
        let byte = self.buf[self.cursor];
        self.cursor += 1;
        Some(byte)
    }

    /// Put the cursor after the last byte.
    pub fn move_to_end(&mut self) {
        self.cursor = self.buf.len();
    }

    /// Empty the line and return the cursor to 0.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
    }

    /// Replace the content, truncating to the limit. The cursor lands at
    /// the end.
    pub fn set(&mut self, s: &str) {
        self.buf.clear();
        let take = s.len().min(Self::LIMIT);
        let _ = self.buf.extend_from_slice(&s.as_bytes()[..take]);
        self.cursor = self.buf.len();
    }

    /// True when one more insertion would overflow.
    pub fn at_limit(&self) -> bool {
        self.buf.len() >= Self::LIMIT
    }

    /// Cursor offset, `0..=len`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf).unwrap_or("")
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Bytes from the cursor to the end of the line.
    pub fn tail(&self) -> &[u8] {
        &self.buf[self.cursor..]
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
