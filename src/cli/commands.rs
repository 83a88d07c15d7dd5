use crate::document::source::load_snapshot;
use crate::error::KbdCheckError;
use crate::overlay::console::format_console_panel;
use crate::overlay::controller::{OverlayConfig, OverlayController};
use crate::overlay::host::RecordingHost;
use crate::overlay::html::render_html_report;
use crate::scenario::runner::{ScenarioRunner, load_scenario};
use crate::scenario::scenario_model::ScenarioResult;
use crate::trace::logger::TraceLogger;

// ============================================================================
// inspect subcommand
// ============================================================================

/// One-shot inspection: mount, enable, render, unmount.
pub fn cmd_inspect(
    snapshot: &str,
    format: &str,
    output: Option<&str>,
    verbose: u8,
    config: OverlayConfig,
    tracer: TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose > 0 {
        eprintln!("Loading snapshot from {}...", snapshot);
    }
    let mut doc = load_snapshot(snapshot)?;

    let mut host = RecordingHost::new();
    let mut controller = OverlayController::new(config, tracer);
    controller.mount(&mut doc, &mut host);
    controller.enable(&doc, &mut host);

    if verbose > 0 {
        eprintln!(
            "Found {} tabbable elements, {} issues",
            controller.snapshot().len(),
            controller.snapshot().issue_count()
        );
    }

    let content = match format {
        "json" => serde_json::to_string_pretty(controller.snapshot()).map_err(|e| {
            KbdCheckError::JsonSerialize {
                context: "inspection snapshot".into(),
                source: e,
            }
        })?,
        _ => match controller.render(&doc) {
            Some(frame) if format == "html" => render_html_report(&frame, doc.title()),
            Some(frame) => format_console_panel(&frame),
            None => {
                eprintln!("Overlay container unavailable; nothing rendered");
                String::new()
            }
        },
    };

    controller.unmount(&mut host);
    write_output(output, &content)?;
    Ok(())
}

// ============================================================================
// replay subcommand
// ============================================================================

/// Replay a scenario and return whether every check passed.
pub fn cmd_replay(
    scenario_path: &str,
    format: &str,
    output: Option<&str>,
    verbose: u8,
    config: OverlayConfig,
    tracer: TraceLogger,
) -> Result<bool, Box<dyn std::error::Error>> {
    let (scenario, doc) = load_scenario(scenario_path)?;

    if verbose > 0 {
        eprintln!(
            "Replaying {} events from {}...",
            scenario.events.len(),
            scenario_path
        );
    }

    let result = ScenarioRunner::run(&scenario, doc, config, tracer);

    let content = match format {
        "json" => serde_json::to_string_pretty(&result).map_err(|e| {
            KbdCheckError::JsonSerialize {
                context: "scenario result".into(),
                source: e,
            }
        })?,
        "html" => match &result.frame {
            Some(frame) => render_html_report(frame, &result.name),
            None => String::new(),
        },
        _ => format_scenario_result(&result),
    };

    write_output(output, &content)?;
    Ok(result.passed)
}

/// Terminal summary of a replay: checks, then the final panel.
pub fn format_scenario_result(result: &ScenarioResult) -> String {
    let mut out = String::new();
    let marker = if result.passed {
        "\u{2713} PASS"
    } else {
        "\u{2717} FAIL"
    };

    let name = if result.name.is_empty() {
        "(unnamed scenario)"
    } else {
        result.name.as_str()
    };
    out.push_str(&format!(
        "{}  {} ({} events, {} checks)\n",
        marker,
        name,
        result.events_run,
        result.checks.len()
    ));

    if let Some(ref error) = result.error {
        out.push_str(&format!("    [ERROR] {}\n", error));
    }

    for check in result.checks.iter().filter(|c| !c.passed) {
        out.push_str(&format!(
            "    [FAIL] Event {}: {:?} — actual {}\n",
            check.event_index,
            check.check,
            check.actual.as_deref().unwrap_or("?")
        ));
    }

    out.push('\n');
    match &result.frame {
        Some(frame) => out.push_str(&format_console_panel(frame)),
        None => out.push_str(&format!(
            "Overlay disabled. Focus path: {}\n",
            if result.focus_trail.is_empty() {
                "\u{2013}".to_string()
            } else {
                result.focus_trail.join(crate::overlay::focus_trail::TRAIL_SEPARATOR)
            }
        )),
    }

    out
}

// ============================================================================
// Helpers
// ============================================================================

fn write_output(output: Option<&str>, content: &str) -> std::io::Result<()> {
    match output {
        Some(path) => std::fs::write(path, content),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
