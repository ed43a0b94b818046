// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque,
          sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError}};

/// Submitted lines, most recent first. One list lives for the whole process and is
/// shared by every read through [`SafeHistory`]. Navigation state is per read, see
/// [`HistoryNav`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryList {
    pub entries: VecDeque<String>,
    /// [None] means unbounded.
    pub max_size: Option<usize>,
}

/// Shared handle to the process wide history. Reads never overlap, so the lock is
/// uncontended; it just makes the sharing explicit.
pub type SafeHistory = Arc<StdMutex<HistoryList>>;

/// Lock the history, recovering the data if a previous holder panicked.
pub fn lock_history(safe_history: &SafeHistory) -> MutexGuard<'_, HistoryList> {
    safe_history.lock().unwrap_or_else(PoisonError::into_inner)
}

impl HistoryList {
    #[must_use]
    pub fn new(max_size: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
        }
    }

    #[must_use]
    pub fn into_safe(self) -> SafeHistory { Arc::new(StdMutex::new(self)) }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Add `line` as the most recent entry. Empty lines are ignored. When bounded and
    /// full, the oldest entry is dropped.
    pub fn push_front(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        self.entries.push_front(line.to_string());
        if let Some(max_size) = self.max_size {
            self.entries.truncate(max_size);
        }
    }

    /// Entries in the order they were submitted.
    pub fn entries_oldest_first(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().map(String::as_str)
    }
}

/// Result of [`HistoryNav::newer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavNewer<'a> {
    /// Moved to a newer entry.
    Entry(&'a str),
    /// Stepped past the most recent entry, back to the present.
    Present,
    /// Already at the present, nothing to do.
    Unchanged,
}

/// Per read navigation cursor into a [`HistoryList`]: [None] is "at present", `Some(i)`
/// selects `entries[i]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryNav {
    pub position: Option<usize>,
}

impl HistoryNav {
    /// Step toward older entries. From the present this selects the most recent entry.
    /// Returns [None] when there is nowhere to go (empty history, or already at the
    /// oldest entry), in which case the line must be left alone.
    pub fn older<'a>(&mut self, history: &'a HistoryList) -> Option<&'a str> {
        let next = self.position.map_or(0, |index| index + 1);
        let entry = history.get(next)?;
        self.position = Some(next);
        Some(entry)
    }

    /// Step toward the present.
    pub fn newer<'a>(&mut self, history: &'a HistoryList) -> NavNewer<'a> {
        match self.position {
            None => NavNewer::Unchanged,
            Some(0) => {
                self.position = None;
                NavNewer::Present
            }
            Some(index) => {
                let index = (index - 1).min(history.len().saturating_sub(1));
                self.position = Some(index);
                history.get(index).map_or(NavNewer::Present, NavNewer::Entry)
            }
        }
    }

    pub fn reset(&mut self) { self.position = None; }
}
