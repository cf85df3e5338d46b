//! CSV source discovery and the ingestion merger.
//!
//! Finds every per-building CSV directly inside the data root, runs each
//! through the validator and merges the survivors into one
//! [`MergedDataset`].

use std::path::{Path, PathBuf};

use energy_core::error::{EnergyError, Result};
use energy_core::models::{MergedDataset, MeterRecord};
use tracing::{debug, info, warn};

use crate::validator::validate_source;

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files directly inside `data_dir`, sorted by path.
///
/// The scan is non-recursive: one flat directory of sources, one file per
/// building.
pub fn find_csv_sources(data_dir: &Path) -> Vec<PathBuf> {
    if !data_dir.exists() {
        warn!("Data folder does not exist: {}", data_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Read every discovered source and merge the survivors into one dataset.
///
/// Rejected and unreadable sources are logged and skipped; the run carries
/// on with whatever remains. Only the terminal condition, no usable row
/// anywhere, is an error. No deduplication is performed: duplicate
/// `(building, timestamp)` rows all survive the merge.
pub fn load_merged_dataset(data_dir: &Path) -> Result<MergedDataset> {
    let sources = find_csv_sources(data_dir);
    if sources.is_empty() {
        return Err(EnergyError::NoDataAvailable(data_dir.to_path_buf()));
    }

    info!("Starting data ingestion from {}", data_dir.display());

    let mut all_records: Vec<MeterRecord> = Vec::new();
    let mut sources_loaded = 0usize;

    for path in &sources {
        match validate_source(path) {
            Ok(records) => {
                debug!(
                    "Source {} contributed {} records",
                    path.display(),
                    records.len()
                );
                sources_loaded += 1;
                all_records.extend(records);
            }
            Err(err) => {
                warn!("Skipping source {}: {}", path.display(), err);
            }
        }
    }

    if all_records.is_empty() {
        return Err(EnergyError::NoDataAvailable(data_dir.to_path_buf()));
    }

    let dataset = MergedDataset::from_records(all_records);
    info!(
        "Data ingestion completed: {} records from {} of {} sources",
        dataset.len(),
        sources_loaded,
        sources.len(),
    );

    Ok(dataset)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
