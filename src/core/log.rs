//! Bounded, day-stamped game log.
//!
//! The log is part of the session's observable state (the sidebar in a UI),
//! not diagnostics. Once full, each new entry evicts the oldest one.

use im::Vector;
use serde::{Deserialize, Serialize};

/// One log line, stamped with the day it was written on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub day: u32,
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Day{}: {}", self.day, self.message)
    }
}

/// FIFO log with a fixed capacity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vector<LogEntry>,
    capacity: usize,
}

impl GameLog {
    /// Create an empty log holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest ones past capacity.
    pub fn push(&mut self, day: u32, message: impl Into<String>) {
        self.entries.push_back(LogEntry {
            day,
            message: message.into(),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The `n` most recent entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }

    /// All entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}
