use clap::Parser;
use kbd_check::cli::commands::{cmd_inspect, cmd_replay};
use kbd_check::cli::config::{Cli, Commands, build_overlay_config, load_config};
use kbd_check::trace::logger::TraceLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Trace path: CLI > config > disabled
    let tracer = match cli.trace.as_deref().or(config.trace.path.as_deref()) {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    match cli.command {
        Commands::Inspect {
            snapshot,
            format,
            output,
            tiny_target_px,
        } => {
            let overlay = build_overlay_config(&config, cli.hotkey_label.as_deref(), tiny_target_px);
            cmd_inspect(&snapshot, &format, output.as_deref(), cli.verbose, overlay, tracer)?;
        }
        Commands::Replay {
            scenario,
            format,
            output,
        } => {
            let overlay = build_overlay_config(&config, cli.hotkey_label.as_deref(), None);
            let all_passed =
                cmd_replay(&scenario, &format, output.as_deref(), cli.verbose, overlay, tracer)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
