use std::collections::VecDeque;

pub const DEFAULT_TRAIL_CAPACITY: usize = 50;
pub const TRAIL_SEPARATOR: &str = " \u{2192} ";

/// Bounded history of focused-element descriptors, oldest first.
///
/// Only immediate repeats are dropped; once full the oldest entry goes.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTrail {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for FocusTrail {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TRAIL_CAPACITY)
    }
}

impl FocusTrail {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns false when `descriptor` repeats the newest entry.
    pub fn push(&mut self, descriptor: String) -> bool {
        if self.entries.back() == Some(&descriptor) {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(descriptor);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Entries joined with an arrow, or an en dash when empty.
    pub fn joined(&self) -> String {
        if self.entries.is_empty() {
            return "\u{2013}".to_string();
        }
        self.iter().collect::<Vec<_>>().join(TRAIL_SEPARATOR)
    }
}
