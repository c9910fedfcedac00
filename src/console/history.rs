//! Command history ring.

use heapless::String;

use crate::config::{HISTORY_DEPTH, MAX_LINE_LEN};

/// Fixed-depth, insertion-ordered log of submitted lines.
///
/// The write index names the next slot to overwrite, the count saturates
/// at the depth, and the browse position tracks recall navigation. A
/// browse position of `None` means the live (not yet submitted) line is
/// displayed.
pub struct History {
    entries: [String<MAX_LINE_LEN>; HISTORY_DEPTH],
    write_idx: usize,
    count: usize,
    /// Recall offset from the newest entry (0 = newest), `None` = live.
    browse: Option<usize>,
}

impl History {
    /// Create an empty history.
    pub const fn new() -> Self {
        const EMPTY: String<MAX_LINE_LEN> = String::new();
        Self {
            entries: [EMPTY; HISTORY_DEPTH],
            write_idx: 0,
            count: 0,
            browse: None,
        }
    }

    /// Append a submitted line, overwriting the oldest entry when full.
    ///
    /// Blank lines and a repeat of the newest stored entry are not
    /// stored. Always returns browsing to the live position.
    pub fn push(&mut self, line: &str) {
        self.browse = None;

        if line.is_empty() || self.latest() == Some(line) {
            return;
        }

        let mut entry = String::new();
        let take = line.len().min(MAX_LINE_LEN);
        let _ = entry.push_str(&line[..take]);

        self.entries[self.write_idx] = entry;
        self.write_idx = (self.write_idx + 1) % HISTORY_DEPTH;
        self.count = (self.count + 1).min(HISTORY_DEPTH);
    }

    /// Step to the next-older entry.
    ///
    /// At the oldest stored entry the position stays put and that entry
    /// is returned again.
    pub fn recall_prev(&mut self) -> Option<&str> {
        if self.count == 0 {
            return None;
        }

        let pos = match self.browse {
            None => 0,
            Some(p) if p + 1 < self.count => p + 1,
            Some(p) => p,
        };
        self.browse = Some(pos);
        self.entry_at(pos)
    }

    /// Step to the next-newer entry.
    ///
    /// Returns `None` when the step moves past the newest entry back to
    /// the live line (or when no recall is active).
    pub fn recall_next(&mut self) -> Option<&str> {
        match self.browse {
            None => None,
            Some(0) => {
                self.browse = None;
                None
            }
            Some(p) => {
                self.browse = Some(p - 1);
                self.entry_at(p - 1)
            }
        }
    }

    /// True while a recall position is active.
    pub fn is_browsing(&self) -> bool {
        self.browse.is_some()
    }

    /// Return to the live position without touching entries.
    pub fn reset_browse(&mut self) {
        self.browse = None;
    }

    /// Newest stored entry.
    pub fn latest(&self) -> Option<&str> {
        self.entry_at(0)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Stored entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.count).map(move |i| {
            let idx = (self.write_idx + HISTORY_DEPTH - self.count + i) % HISTORY_DEPTH;
            self.entries[idx].as_str()
        })
    }

    /// Entry at a recall offset (0 = newest).
    fn entry_at(&self, offset: usize) -> Option<&str> {
        if offset >= self.count {
            return None;
        }
        let idx = (self.write_idx + HISTORY_DEPTH - 1 - offset) % HISTORY_DEPTH;
        Some(self.entries[idx].as_str())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
