use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::dom_model::{NodeId, Rect};

pub const NO_NAME: &str = "(no name)";
pub const DEFAULT_IGNORE_ATTRIBUTE: &str = "data-kbdcheck-ignore";
pub const DEFAULT_TINY_TARGET_PX: f64 = 24.0;

/// Badges sit slightly up and left of the element's corner.
pub const BADGE_OFFSET_PX: f64 = 8.0;

/// Heuristic problems flagged per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Issue {
    NoName,
    PositiveTabindex,
    TinyTarget,
    Offscreen,
    /// Reserved. Contrast against arbitrary backgrounds is not measured, so
    /// the classifier never emits this.
    LowContrast,
}

impl Issue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Issue::NoName => "no-name",
            Issue::PositiveTabindex => "positive-tabindex",
            Issue::TinyTarget => "tiny-target",
            Issue::Offscreen => "offscreen",
            Issue::LowContrast => "low-contrast",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounding box captured at inspection time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Relative to the viewport
    pub viewport: Rect,

    /// Relative to the document (viewport + scroll offset)
    pub page: Rect,
}

impl Geometry {
    /// Top/left position of the order badge, clamped to the page.
    pub fn badge_anchor(&self) -> (f64, f64) {
        (
            (self.page.top() - BADGE_OFFSET_PX).max(0.0),
            (self.page.left() - BADGE_OFFSET_PX).max(0.0),
        )
    }
}

/// One element in the resolved tab sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectedElement {
    /// Handle to the live node; read from, never owned
    pub handle: NodeId,

    /// Render key derived from position and markup
    pub stable_id: String,

    /// 1-based position in the tab sequence
    pub order: usize,

    /// `tabindex` attribute text, verbatim
    pub authored_tab_index: Option<String>,

    /// Authored `tabindex` when it parses as an integer
    pub explicit_tab_index: Option<i32>,

    /// Value the browser would report as `tabIndex`
    pub tab_index: i32,

    pub tag: String,
    pub role: String,
    pub name: String,
    pub issues: Vec<Issue>,
    pub geometry: Geometry,

    /// Whitespace-collapsed outer markup, bounded to the full preview length
    pub markup: String,
}

impl InspectedElement {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_issue(&self, issue: Issue) -> bool {
        self.issues.contains(&issue)
    }

    pub fn explicit_tab_index_label(&self) -> String {
        self.authored_tab_index
            .clone()
            .unwrap_or_else(|| "none".to_string())
    }
}

/// Every inspected element at one point in time, in tab order.
///
/// `elements[i].order == i + 1` always holds; a recompute replaces the whole
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectionSnapshot {
    pub elements: Vec<InspectedElement>,
}

impl InspectionSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.elements.iter().map(|e| e.issues.len()).sum()
    }

    pub fn find(&self, handle: NodeId) -> Option<&InspectedElement> {
        self.elements.iter().find(|e| e.handle == handle)
    }
}

/// Tunables for one inspection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectOptions {
    #[serde(default = "default_tiny_target")]
    pub tiny_target_px: f64,

    #[serde(default = "default_ignore_attribute")]
    pub ignore_attribute: String,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            tiny_target_px: DEFAULT_TINY_TARGET_PX,
            ignore_attribute: DEFAULT_IGNORE_ATTRIBUTE.to_string(),
        }
    }
}

fn default_tiny_target() -> f64 { DEFAULT_TINY_TARGET_PX }
fn default_ignore_attribute() -> String { DEFAULT_IGNORE_ATTRIBUTE.to_string() }
