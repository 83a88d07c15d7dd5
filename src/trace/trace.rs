use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::overlay::controller::SyncState;

/// One line of the JSONL overlay trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub sync_state: String,

    /// What happened: "enable", "disable", "recompute", "focus", ...
    pub event: String,

    pub element_count: Option<usize>,
    pub issue_count: Option<usize>,

    pub focus: Option<String>,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(step: u64, state: SyncState, event: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            sync_state: state.as_str().to_string(),
            event: event.to_string(),
            element_count: None,
            issue_count: None,
            focus: None,
            detail: None,
        }
    }

    pub fn with_counts(mut self, elements: usize, issues: usize) -> Self {
        self.element_count = Some(elements);
        self.issue_count = Some(issues);
        self
    }

    pub fn with_focus(mut self, descriptor: impl ToString) -> Self {
        self.focus = Some(descriptor.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
