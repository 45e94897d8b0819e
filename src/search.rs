//! Search filtering and input debouncing.
//!
//! Filtering is exact case-insensitive substring matching over title and
//! description, with no tokenization or fuzzy matching. The debounce decouples
//! the raw input from the committed query: the committed value updates only
//! once the raw value has been stable for the quiescence window.

use std::time::{Duration, Instant};

use crate::task::Task;

/// Quiescence window before a raw query commits.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Case-insensitive substring match against title or description.
/// An empty query matches everything.
pub fn matches(task: &Task, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(&query)
        || task.description.to_lowercase().contains(&query)
}

/// Indices of tasks matching `query`, preserving collection order.
pub fn filter_indices(tasks: &[Task], query: &str) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| matches(task, query))
        .map(|(idx, _)| idx)
        .collect()
}

/// Debounced value with an explicit, cancellable deadline.
///
/// Time enters through `Instant` parameters so callers (and tests) control
/// the clock; the UI loop passes `Instant::now()` on every poll.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    raw: String,
    committed: String,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            raw: String::new(),
            committed: String::new(),
            deadline: None,
        }
    }

    /// Latest raw input, possibly not yet committed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Last committed query.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Record a new raw value and re-arm the quiescence window.
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        let value = value.into();
        if value == self.raw {
            return;
        }
        self.raw = value;
        self.deadline = Some(now + self.window);
    }

    /// Commit the raw value if the window has elapsed. Returns true when the
    /// committed query changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.committed != self.raw {
                    self.committed = self.raw.clone();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Drop a pending commit without applying it. Used on teardown so a stale
    /// update cannot fire later.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Commit immediately, bypassing the window. Used when the user finishes
    /// input explicitly (enter) rather than by pausing.
    pub fn flush(&mut self) -> bool {
        self.deadline = None;
        if self.committed != self.raw {
            self.committed = self.raw.clone();
            true
        } else {
            false
        }
    }

    /// Reset raw and committed values and drop any pending deadline.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.committed.clear();
        self.deadline = None;
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
