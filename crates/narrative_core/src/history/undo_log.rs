//! Bounded, debounced snapshot log with an undo/redo cursor.
//!
//! # Responsibility
//! - Record full-copy snapshots of the record set after settled edits.
//! - Navigate backward/forward and hand the stored records back to callers.
//!
//! # Invariants
//! - The log is never empty; `cursor < entries.len()` always holds.
//! - `entries.len() <= capacity`; the oldest entries are evicted first.
//! - An accepted push discards every entry after the cursor.
//! - A push within the debounce window of the last accepted push is dropped.
//! - The log never mutates caller-owned records.

use crate::clock::{Clock, SystemClock};
use crate::config::HistoryConfig;
use crate::model::record::DialogueEvent;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use std::collections::VecDeque;

/// Label of the seed snapshot created on construction.
pub const INITIAL_ACTION: &str = "initial";

/// Full, timestamped, labeled copy of the record sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub records: Vec<DialogueEvent>,
    pub captured_at: DateTime<Utc>,
    pub action: String,
}

/// Outcome of `HistoryManager::push_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Accepted,
    /// Dropped because it arrived inside the debounce window.
    Debounced,
}

/// Linear undo/redo log over full record snapshots.
pub struct HistoryManager<C: Clock = SystemClock> {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    capacity: usize,
    debounce: Duration,
    last_accepted: Option<DateTime<Utc>>,
    clock: C,
}

impl HistoryManager<SystemClock> {
    /// Creates a log seeded with `initial` using default tunables.
    pub fn new(initial: &[DialogueEvent]) -> Self {
        Self::with_clock(initial, HistoryConfig::default(), SystemClock)
    }
}

impl<C: Clock> HistoryManager<C> {
    /// Creates a log seeded with one `initial` snapshot at cursor 0.
    ///
    /// The seed does not start a debounce window.
    pub fn with_clock(initial: &[DialogueEvent], config: HistoryConfig, clock: C) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(Snapshot {
            records: initial.to_vec(),
            captured_at: clock.now(),
            action: INITIAL_ACTION.to_string(),
        });
        let debounce = Duration::from_std(config.debounce()).unwrap_or(Duration::MAX);
        Self {
            entries,
            cursor: 0,
            capacity: config.capacity.max(1),
            debounce,
            last_accepted: None,
            clock,
        }
    }

    /// Captures `records` as the newest state.
    ///
    /// Truncates any redo branch, appends, evicts from the front past
    /// capacity and moves the cursor to the new last entry.
    pub fn push_state(&mut self, records: &[DialogueEvent], action: &str) -> PushOutcome {
        let now = self.clock.now();
        if let Some(last) = self.last_accepted {
            if now - last < self.debounce {
                debug!("event=history_push module=history status=skipped action={action}");
                return PushOutcome::Debounced;
            }
        }
        self.last_accepted = Some(now);

        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(Snapshot {
            records: records.to_vec(),
            captured_at: now,
            action: action.to_string(),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;

        debug!(
            "event=history_push module=history status=ok action={} len={} cursor={}",
            action,
            self.entries.len(),
            self.cursor
        );
        PushOutcome::Accepted
    }

    /// Steps back one entry and returns its records, or `None` at the oldest.
    pub fn undo(&mut self) -> Option<Vec<DialogueEvent>> {
        if self.cursor == 0 {
            debug!("event=history_undo module=history status=noop");
            return None;
        }
        self.cursor -= 1;
        debug!(
            "event=history_undo module=history status=ok cursor={}",
            self.cursor
        );
        Some(self.entries[self.cursor].records.clone())
    }

    /// Steps forward one entry and returns its records, or `None` at the newest.
    pub fn redo(&mut self) -> Option<Vec<DialogueEvent>> {
        if self.cursor + 1 >= self.entries.len() {
            debug!("event=history_redo module=history status=noop");
            return None;
        }
        self.cursor += 1;
        debug!(
            "event=history_redo module=history status=ok cursor={}",
            self.cursor
        );
        Some(self.entries[self.cursor].records.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Action label at the cursor, or empty.
    pub fn current_action_label(&self) -> &str {
        self.entries
            .get(self.cursor)
            .map_or("", |entry| entry.action.as_str())
    }

    /// Action label one step ahead of the cursor, or empty.
    pub fn next_action_label(&self) -> &str {
        self.entries
            .get(self.cursor + 1)
            .map_or("", |entry| entry.action.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; the seed snapshot is never evicted below one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}
