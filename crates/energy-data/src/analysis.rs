//! Top-level pipeline: ingestion, aggregation and run metadata.
//!
//! The single entry point other crates call; returns the merged dataset
//! plus the three derived tables, ready for the report layer.

use std::path::Path;
use std::time::Instant;

use chrono::NaiveDateTime;
use energy_core::error::{EnergyError, Result};
use energy_core::models::{BuildingStats, DayTotal, MergedDataset, WeekTotal};
use tracing::info;

use crate::aggregator::{building_summary, daily_totals, weekly_totals};
use crate::reader::load_merged_dataset;

// ── Public types ──────────────────────────────────────────────────────────────

/// Facts about one pipeline run, for logging and the executive summary.
#[derive(Debug, Clone)]
pub struct PipelineMetadata {
    /// Number of records in the merged dataset.
    pub records_loaded: usize,
    /// Earliest observed timestamp.
    pub first_timestamp: NaiveDateTime,
    /// Latest observed timestamp.
    pub last_timestamp: NaiveDateTime,
    /// Wall-clock seconds spent on discovery, validation and the merge.
    pub load_seconds: f64,
}

/// The complete output of [`run_pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The unified time-sorted dataset.
    pub dataset: MergedDataset,
    /// Gap-filled daily totals across all buildings.
    pub daily: Vec<DayTotal>,
    /// Gap-filled weekly totals across all buildings.
    pub weekly: Vec<WeekTotal>,
    /// Per-building summary statistics.
    pub summary: Vec<BuildingStats>,
    /// Metadata about this run.
    pub metadata: PipelineMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full batch pipeline against one data directory.
///
/// 1. Discover and validate every source, merge the survivors.
/// 2. Derive the daily, weekly and per-building tables.
///
/// Fails with `NoDataAvailable` when nothing usable was ingested; the
/// aggregates are never computed from an empty dataset.
pub fn run_pipeline(data_dir: &Path) -> Result<PipelineResult> {
    let started = Instant::now();
    let dataset = load_merged_dataset(data_dir)?;
    let load_seconds = started.elapsed().as_secs_f64();

    let (first_timestamp, last_timestamp) =
        match (dataset.records().first(), dataset.records().last()) {
            (Some(first), Some(last)) => (first.timestamp, last.timestamp),
            // load_merged_dataset never returns an empty dataset.
            _ => return Err(EnergyError::NoDataAvailable(data_dir.to_path_buf())),
        };

    let daily = daily_totals(&dataset);
    let weekly = weekly_totals(&dataset);
    let summary = building_summary(&dataset);

    info!(
        "Aggregated {} records into {} daily buckets, {} weekly buckets, {} buildings",
        dataset.len(),
        daily.len(),
        weekly.len(),
        summary.len(),
    );

    let metadata = PipelineMetadata {
        records_loaded: dataset.len(),
        first_timestamp,
        last_timestamp,
        load_seconds,
    };

    Ok(PipelineResult {
        dataset,
        daily,
        weekly,
        summary,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
