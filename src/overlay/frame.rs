use serde::Serialize;

use crate::inspect::inspect_model::InspectionSnapshot;
use crate::inspect::inspector::markup_preview;
use crate::overlay::focus_trail::FocusTrail;
use crate::overlay::layer::Theme;

// ============================================================================
// Render model
// ============================================================================

/// Order badge near an element's top-left corner (page coordinates).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub key: String,
    pub order: usize,
    pub top: f64,
    pub left: f64,
}

/// Dashed outline matching an element's box (page coordinates).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineBox {
    pub key: String,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// One line of the diagnostic table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRow {
    pub key: String,
    pub order: usize,
    pub role: String,
    pub name: String,
    pub tab_index: String,
    /// Issue tags; empty means "ok"
    pub issues: Vec<String>,
    /// Compact markup preview
    pub snippet: String,
    /// Longer markup for hover
    pub markup: String,
}

/// Everything the overlay draws for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayFrame {
    #[serde(skip)]
    pub theme: Theme,
    pub dark: bool,
    pub hotkey_label: String,
    pub element_count: usize,
    pub badges: Vec<Badge>,
    pub boxes: Vec<OutlineBox>,
    pub rows: Vec<PanelRow>,
    pub focus_trail: Vec<String>,
    /// Trail joined with arrows, or a dash when empty
    pub footer: String,
}

pub fn build_frame(
    snapshot: &InspectionSnapshot,
    trail: &FocusTrail,
    theme: Theme,
    hotkey_label: &str,
) -> OverlayFrame {
    let badges = snapshot
        .elements
        .iter()
        .map(|el| {
            let (top, left) = el.geometry.badge_anchor();
            Badge {
                key: el.stable_id.clone(),
                order: el.order,
                top,
                left,
            }
        })
        .collect();

    let boxes = snapshot
        .elements
        .iter()
        .map(|el| OutlineBox {
            key: format!("{}-box", el.stable_id),
            top: el.geometry.page.top(),
            left: el.geometry.page.left(),
            width: el.geometry.page.width,
            height: el.geometry.page.height,
        })
        .collect();

    let rows = snapshot
        .elements
        .iter()
        .map(|el| PanelRow {
            key: el.stable_id.clone(),
            order: el.order,
            role: el.role.clone(),
            name: el.name.clone(),
            tab_index: el.explicit_tab_index_label(),
            issues: el.issues.iter().map(|i| i.as_str().to_string()).collect(),
            snippet: markup_preview(&el.markup),
            markup: el.markup.clone(),
        })
        .collect();

    OverlayFrame {
        theme,
        dark: theme.is_dark(),
        hotkey_label: hotkey_label.to_string(),
        element_count: snapshot.len(),
        badges,
        boxes,
        rows,
        focus_trail: trail.to_vec(),
        footer: trail.joined(),
    }
}
