use crate::document::dom_model::{Rect, Viewport};
use crate::inspect::inspect_model::{InspectOptions, Issue, NO_NAME};

/// Evaluate every heuristic independently, in detection order.
///
/// `low-contrast` is never emitted: measuring contrast against arbitrary
/// backgrounds is out of reach for this heuristic.
pub fn classify_issues(
    name: &str,
    explicit_tab_index: Option<i32>,
    rect: &Rect,
    viewport: &Viewport,
    options: &InspectOptions,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    if is_unnamed(name) {
        issues.push(Issue::NoName);
    }

    if explicit_tab_index.is_some_and(|t| t > 0) {
        issues.push(Issue::PositiveTabindex);
    }

    if is_tiny_target(rect, options.tiny_target_px) {
        issues.push(Issue::TinyTarget);
    }

    if is_offscreen(rect, viewport) {
        issues.push(Issue::Offscreen);
    }

    issues
}

pub fn is_unnamed(name: &str) -> bool {
    name.is_empty() || name == NO_NAME
}

pub fn is_tiny_target(rect: &Rect, min_px: f64) -> bool {
    rect.width < min_px || rect.height < min_px
}

/// Entirely outside the viewport on any one side. `rect` is viewport-relative.
pub fn is_offscreen(rect: &Rect, viewport: &Viewport) -> bool {
    rect.bottom() < 0.0
        || rect.right() < 0.0
        || rect.top() > viewport.height
        || rect.left() > viewport.width
}
