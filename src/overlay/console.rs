use crate::overlay::frame::OverlayFrame;

// ============================================================================
// Console panel: the diagnostic table for terminal output
// ============================================================================

/// Format the panel for a terminal.
///
/// Produces output like:
/// ```text
/// === Keyboard navigation: 2 elements (toggle: Ctrl+Alt+K) ===
///
///   #1  textbox  "Email"  tabindex=5  [positive-tabindex]
///       <input tabindex="5" type="email">…
///   #2  button  "(no name)"  tabindex=none  [no-name]
///       <button></button>…
///
/// Focus path: input#email [email] "Email" → button [button] "(no name)"
/// ```
pub fn format_console_panel(frame: &OverlayFrame) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Keyboard navigation: {} elements (toggle: {}) ===\n\n",
        frame.element_count, frame.hotkey_label
    ));

    for row in &frame.rows {
        let issues = if row.issues.is_empty() {
            "ok".to_string()
        } else {
            row.issues.join(", ")
        };

        out.push_str(&format!(
            "  #{}  {}  \"{}\"  tabindex={}  [{}]\n",
            row.order, row.role, row.name, row.tab_index, issues
        ));
        out.push_str(&format!("      {}\n", row.snippet));
    }

    if frame.rows.is_empty() {
        out.push_str("  (no tabbable elements)\n");
    }

    out.push_str(&format!("\nFocus path: {}\n", frame.footer));
    out
}
