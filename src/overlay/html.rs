use crate::overlay::frame::OverlayFrame;

// ============================================================================
// HTML overlay: markup drawn into the overlay container
// ============================================================================

/// Render the overlay layer: badges, outlines and the diagnostic panel.
///
/// Badges and outlines are `aria-hidden` and ignore pointer events; nothing
/// here is focusable, so the page's own tab order is untouched.
pub fn render_overlay_html(frame: &OverlayFrame) -> String {
    let theme = frame.theme;
    let accent = theme.pick("#0d9488", "#fde047");
    let badge_fg = theme.pick("#ffffff", "#000000");

    let mut out = String::new();

    for badge in &frame.badges {
        out.push_str(&format!(
            "<div class=\"kbd-badge\" data-key=\"{key}\" aria-hidden=\"true\" style=\"position:absolute;top:{top}px;left:{left}px;z-index:9998;pointer-events:none;user-select:none;border-radius:9999px;padding:2px 8px;font:bold 12px sans-serif;background:{bg};color:{fg}\">{order}</div>\n",
            key = escape_html(&badge.key),
            top = px(badge.top),
            left = px(badge.left),
            bg = accent,
            fg = badge_fg,
            order = badge.order,
        ));
    }

    for outline in &frame.boxes {
        out.push_str(&format!(
            "<div class=\"kbd-box\" data-key=\"{key}\" aria-hidden=\"true\" style=\"position:absolute;top:{top}px;left:{left}px;width:{width}px;height:{height}px;border:2px dashed {accent};border-radius:6px;z-index:9997;pointer-events:none\"></div>\n",
            key = escape_html(&outline.key),
            top = px(outline.top),
            left = px(outline.left),
            width = px(outline.width),
            height = px(outline.height),
            accent = accent,
        ));
    }

    out.push_str(&render_panel(frame));
    out
}

/// Self-contained page showing the panel, for offline reports.
pub fn render_html_report(frame: &OverlayFrame, page_title: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} — Keyboard Navigation Check</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 20px; background: {page_bg}; }}
.kbd-panel {{ position: static !important; width: auto !important; max-height: none !important; }}
</style>
</head>
<body>
{panel}
</body>
</html>"##,
        title = escape_html(page_title),
        page_bg = frame.theme.pick("#f5f5f5", "#030712"),
        panel = render_panel(frame),
    )
}

fn render_panel(frame: &OverlayFrame) -> String {
    let theme = frame.theme;
    let panel_bg = theme.pick("rgba(255,255,255,0.95)", "rgba(17,24,39,0.95)");
    let panel_fg = theme.pick("#111827", "#f3f4f6");
    let border = theme.pick("#e5e7eb", "#374151");
    let head_bg = theme.pick("#f9fafb", "#1f2937");
    let ok_style = theme.pick("background:#d1fae5;color:#047857", "background:#065f46;color:#d1fae5");
    let issue_style = theme.pick("background:#fef3c7;color:#92400e", "background:#78350f;color:#fef3c7");

    let mut rows = String::new();
    for row in &frame.rows {
        let issues = if row.issues.is_empty() {
            format!("<span class=\"kbd-ok\" style=\"{};border-radius:4px;padding:1px 8px\">ok</span>", ok_style)
        } else {
            row.issues
                .iter()
                .map(|i| {
                    format!(
                        "<span class=\"kbd-issue\" style=\"{};border-radius:4px;padding:1px 8px;margin-right:4px\">{}</span>",
                        issue_style,
                        escape_html(i)
                    )
                })
                .collect::<Vec<_>>()
                .join("")
        };

        rows.push_str(&format!(
            "<tr data-key=\"{key}\"><td style=\"font-family:monospace\">{order}</td><td>{role}</td><td>{name}</td><td>{tab}</td><td>{issues}</td><td title=\"{markup}\" style=\"max-width:22ch;overflow:hidden;white-space:nowrap;text-overflow:ellipsis\">{snippet}</td></tr>\n",
            key = escape_html(&row.key),
            order = row.order,
            role = escape_html(&row.role),
            name = escape_html(&row.name),
            tab = escape_html(&row.tab_index),
            issues = issues,
            markup = escape_html(&row.markup),
            snippet = escape_html(&row.snippet),
        ));
    }

    format!(
        r#"<div class="kbd-panel" role="region" aria-label="Keyboard navigation check panel" style="position:fixed;bottom:16px;right:16px;z-index:9999;width:min(95vw,720px);max-height:70vh;overflow:hidden;border-radius:16px;border:1px solid {border};background:{panel_bg};color:{panel_fg};font:14px sans-serif">
<header style="display:flex;justify-content:space-between;gap:12px;padding:12px 16px;border-bottom:1px solid {border}">
<div style="font-weight:600">Keyboard navigation – {count} elements</div>
<div style="opacity:0.7">Toggle: {hotkey}</div>
</header>
<div style="max-height:55vh;overflow:auto">
<table style="min-width:100%;border-collapse:collapse">
<thead><tr style="background:{head_bg}"><th>#</th><th>Role</th><th>Name</th><th>tabindex</th><th>Issues</th><th>Snippet</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
</div>
<footer style="padding:8px 16px;border-top:1px solid {border};font-size:12px">
<span style="opacity:0.7">Focus path (live):</span> <span style="font-family:monospace">{trail}</span>
</footer>
</div>
"#,
        border = border,
        panel_bg = panel_bg,
        panel_fg = panel_fg,
        head_bg = head_bg,
        count = frame.element_count,
        hotkey = escape_html(&frame.hotkey_label),
        rows = rows,
        trail = escape_html(&frame.footer),
    )
}

fn px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
