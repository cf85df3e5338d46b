//! Flat-file export of the cleaned dataset and aggregate tables.
//!
//! Everything here consumes the pipeline's outputs as-is; no export
//! recomputes an aggregate.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use energy_core::error::Result;
use energy_core::formatting::format_kwh;
use energy_core::models::{BuildingStats, DayTotal, MergedDataset, WeekTotal};
use energy_data::analysis::PipelineResult;
use tracing::info;

/// File names written into the output directory.
pub const CLEANED_DATA_FILE: &str = "cleaned_energy_data.csv";
pub const BUILDING_SUMMARY_FILE: &str = "building_summary.csv";
pub const DAILY_TOTALS_FILE: &str = "daily_totals.csv";
pub const WEEKLY_TOTALS_FILE: &str = "weekly_totals.csv";
pub const SUMMARY_FILE: &str = "summary.txt";

// ── Aggregate exports ─────────────────────────────────────────────────────────

/// Write the full merged dataset as `building,timestamp,kwh` rows.
pub fn write_cleaned_dataset(path: &Path, dataset: &MergedDataset) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in dataset.records() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the per-building summary table.
pub fn write_building_summary(path: &Path, summary: &[BuildingStats]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for stats in summary {
        writer.serialize(stats)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the gap-filled daily series.
pub fn write_daily_totals(path: &Path, daily: &[DayTotal]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for day in daily {
        writer.serialize(day)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the gap-filled weekly series.
pub fn write_weekly_totals(path: &Path, weekly: &[WeekTotal]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for week in weekly {
        writer.serialize(week)?;
    }
    writer.flush()?;
    Ok(())
}

// ── Executive summary ─────────────────────────────────────────────────────────

/// Write the operator-facing executive summary.
pub fn write_executive_summary(
    path: &Path,
    dataset: &MergedDataset,
    summary: &[BuildingStats],
    daily: &[DayTotal],
    weekly: &[WeekTotal],
) -> Result<()> {
    let total: f64 = summary.iter().map(|b| b.total_kwh).sum();
    let highest = summary
        .iter()
        .max_by(|a, b| a.total_kwh.total_cmp(&b.total_kwh));
    let peak = dataset
        .records()
        .iter()
        .max_by(|a, b| a.kwh.total_cmp(&b.kwh));

    let mut file = File::create(path)?;
    writeln!(file, "Campus Energy Dashboard Summary")?;
    writeln!(file, "---------------------------------")?;
    writeln!(file, "Total Campus Consumption: {} kWh", format_kwh(total))?;
    if let Some(building) = highest {
        writeln!(file, "Highest Consuming Building: {}", building.building)?;
    }
    if let Some(record) = peak {
        writeln!(file, "Peak Load Time: {}", record.timestamp)?;
    }

    writeln!(file)?;
    writeln!(file, "Daily Trend Sample:")?;
    for day in daily.iter().take(5) {
        writeln!(file, "  {}  {} kWh", day.date, format_kwh(day.total_kwh))?;
    }

    writeln!(file)?;
    writeln!(file, "Weekly Trend Sample:")?;
    for week in weekly.iter().take(5) {
        writeln!(
            file,
            "  week of {}  {} kWh",
            week.week_start,
            format_kwh(week.total_kwh)
        )?;
    }

    Ok(())
}

// ── Convenience driver ────────────────────────────────────────────────────────

/// Write every export artifact into `output_dir`, creating it if absent.
pub fn export_all(output_dir: &Path, result: &PipelineResult) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;

    write_cleaned_dataset(&output_dir.join(CLEANED_DATA_FILE), &result.dataset)?;
    write_building_summary(&output_dir.join(BUILDING_SUMMARY_FILE), &result.summary)?;
    write_daily_totals(&output_dir.join(DAILY_TOTALS_FILE), &result.daily)?;
    write_weekly_totals(&output_dir.join(WEEKLY_TOTALS_FILE), &result.weekly)?;
    write_executive_summary(
        &output_dir.join(SUMMARY_FILE),
        &result.dataset,
        &result.summary,
        &result.daily,
        &result.weekly,
    )?;

    info!("Exports written to {}", output_dir.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
