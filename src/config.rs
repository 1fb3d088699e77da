use std::path::PathBuf;

use clap::Parser;

/// Interactive dashboard over contact engagement analytics.
#[derive(Debug, Clone, Parser)]
#[command(name = "contact-dashboard", version, about)]
pub struct Cli {
    /// JSON file with an array of contact-analytics envelopes.
    #[arg(env = "CONTACT_DASHBOARD_DATA", default_value = "attached_assets/data.json")]
    pub data: PathBuf,

    /// Print aggregate metrics and top keywords as JSON instead of opening a window.
    #[arg(long)]
    pub summary: bool,

    /// Initial window width in points.
    #[arg(long, default_value_t = 1280.0)]
    pub width: f32,

    /// Initial window height in points.
    #[arg(long, default_value_t = 860.0)]
    pub height: f32,
}
