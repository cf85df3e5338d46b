use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Batch ingestion, aggregation and reporting for campus energy meters
#[derive(Parser, Debug, Clone)]
#[command(
    name = "campus-energy",
    about = "Batch ingestion, aggregation and reporting for campus energy meters",
    version
)]
pub struct Settings {
    /// Directory containing one meter CSV per building
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory that receives the exported tables and the dashboard
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,

    /// Skip rendering the SVG dashboard
    #[arg(long)]
    pub no_dashboard: bool,

    /// Skip writing the CSV and text exports
    #[arg(long)]
    pub no_export: bool,
}
