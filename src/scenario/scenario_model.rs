use serde::{Deserialize, Serialize};

use crate::document::snapshot::RawDocument;
use crate::overlay::frame::OverlayFrame;

/// A scripted session: a page plus the host events delivered to the overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,

    /// Snapshot JSON path, relative to the scenario file
    #[serde(default)]
    pub snapshot: Option<String>,

    /// Inline page, used when `snapshot` is absent
    #[serde(default)]
    pub page: Option<RawDocument>,

    /// Overrides the configured initial state
    #[serde(default)]
    pub enabled_by_default: Option<bool>,

    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

/// One scripted host event. Page-changing events are applied to the document
/// first and then delivered as a mutation notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScenarioEvent {
    /// Key press with modifiers
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        meta: bool,
    },

    /// Shorthand for Ctrl+Alt+K
    Toggle,

    /// Focus moves to the element with this id
    Focus { target: String },

    Scroll { x: f64, y: f64 },

    Resize { width: f64, height: f64 },

    SetAttribute {
        target: String,
        name: String,
        value: String,
    },

    RemoveAttribute { target: String, name: String },

    Remove { target: String },

    SetText { target: String, text: String },

    /// Bare mutation notification with no page change
    Mutate,

    /// Check the overlay state at this point
    Expect { checks: Vec<ScenarioCheck> },
}

impl ScenarioEvent {
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioEvent::Key { .. } => "key",
            ScenarioEvent::Toggle => "toggle",
            ScenarioEvent::Focus { .. } => "focus",
            ScenarioEvent::Scroll { .. } => "scroll",
            ScenarioEvent::Resize { .. } => "resize",
            ScenarioEvent::SetAttribute { .. } => "set_attribute",
            ScenarioEvent::RemoveAttribute { .. } => "remove_attribute",
            ScenarioEvent::Remove { .. } => "remove",
            ScenarioEvent::SetText { .. } => "set_text",
            ScenarioEvent::Mutate => "mutate",
            ScenarioEvent::Expect { .. } => "expect",
        }
    }
}

/// A single check against the controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioCheck {
    Enabled { expected: bool },

    ElementCount { expected: usize },

    /// Accessible names in tab order
    Names { expected: Vec<String> },

    /// The element at `order` carries `issue`
    HasIssue { order: usize, issue: String },

    TrailLength { expected: usize },

    TrailLast { expected: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckResult {
    /// Index of the event that held the check
    pub event_index: usize,
    pub check: ScenarioCheck,
    pub passed: bool,
    pub actual: Option<String>,
}

/// Outcome of replaying a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub events_run: usize,
    pub checks: Vec<CheckResult>,
    pub focus_trail: Vec<String>,
    /// Final overlay, `None` when disabled at the end
    pub frame: Option<OverlayFrame>,
    pub error: Option<String>,
}
