mod bootstrap;

use anyhow::Result;
use clap::Parser;
use energy_core::error::EnergyError;
use energy_core::settings::Settings;
use energy_data::analysis::run_pipeline;
use energy_report::dashboard::render_dashboard;
use energy_report::export::export_all;
use energy_report::report::building_report_lines;

/// Dashboard file name inside the output directory.
const DASHBOARD_FILE: &str = "dashboard.svg";

fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Campus Energy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, Output: {}",
        settings.data_dir.display(),
        settings.output_dir.display(),
    );

    let result = match run_pipeline(&settings.data_dir) {
        Ok(result) => result,
        Err(EnergyError::NoDataAvailable(path)) => {
            // Graceful termination, not a crash: nothing usable to report on.
            tracing::error!("No data available under {}. Ending run.", path.display());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        "Loaded {} records spanning {} to {} in {:.2}s",
        result.metadata.records_loaded,
        result.metadata.first_timestamp,
        result.metadata.last_timestamp,
        result.metadata.load_seconds,
    );

    for line in building_report_lines(&result.summary) {
        tracing::info!("{line}");
    }

    if !settings.no_export || !settings.no_dashboard {
        bootstrap::ensure_output_dir(&settings.output_dir)?;
    }

    if !settings.no_export {
        export_all(&settings.output_dir, &result)?;
    }

    if !settings.no_dashboard {
        let dashboard_path = settings.output_dir.join(DASHBOARD_FILE);
        render_dashboard(&dashboard_path, &result.dataset, &result.daily)?;
        tracing::info!("Dashboard saved to {}", dashboard_path.display());
    }

    tracing::info!("Run completed successfully");
    Ok(())
}
