use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::inspect::inspect_model::InspectOptions;
use crate::overlay::controller::OverlayConfig;
use crate::overlay::focus_trail::DEFAULT_TRAIL_CAPACITY;
use crate::overlay::hotkey::DEFAULT_HOTKEY_LABEL;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "kbd-check",
    version,
    about = "Keyboard navigation inspector: tab order, accessible names and focus path"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Hotkey label shown in the panel header (display only)
    #[arg(long, global = true)]
    pub hotkey_label: Option<String>,

    /// Append overlay events as JSON lines to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: kbd-check.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect a page snapshot once and print the diagnostic panel
    Inspect {
        /// Snapshot JSON file, or http(s) URL of an extraction endpoint
        #[arg(long)]
        snapshot: String,

        /// Output format: console, html, json
        #[arg(long, default_value = "console")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Minimum target size in CSS pixels before flagging tiny-target
        #[arg(long)]
        tiny_target_px: Option<f64>,
    },

    /// Replay a scripted event sequence against the live overlay
    Replay {
        /// Path to scenario YAML file
        #[arg(long)]
        scenario: String,

        /// Output format: console, html, json
        #[arg(long, default_value = "console")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `kbd-check.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub overlay: OverlaySection,
    #[serde(default)]
    pub inspect: InspectOptions,
    #[serde(default)]
    pub trace: TraceSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlaySection {
    #[serde(default)]
    pub enabled_by_default: bool,

    #[serde(default = "default_hotkey_label")]
    pub hotkey_label: String,

    #[serde(default = "default_trail_capacity")]
    pub trail_capacity: usize,
}

impl Default for OverlaySection {
    fn default() -> Self {
        Self {
            enabled_by_default: false,
            hotkey_label: default_hotkey_label(),
            trail_capacity: default_trail_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceSection {
    pub path: Option<String>,
}

// Serde default helpers
fn default_hotkey_label() -> String { DEFAULT_HOTKEY_LABEL.to_string() }
fn default_trail_capacity() -> usize { DEFAULT_TRAIL_CAPACITY }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("kbd-check.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Resolve overlay settings: CLI > config file > defaults.
pub fn build_overlay_config(
    config: &AppConfig,
    hotkey_label: Option<&str>,
    tiny_target_px: Option<f64>,
) -> OverlayConfig {
    let mut inspect = config.inspect.clone();
    if let Some(px) = tiny_target_px {
        inspect.tiny_target_px = px;
    }

    OverlayConfig {
        enabled_by_default: config.overlay.enabled_by_default,
        hotkey_label: hotkey_label
            .unwrap_or(&config.overlay.hotkey_label)
            .to_string(),
        trail_capacity: config.overlay.trail_capacity,
        inspect,
    }
}
