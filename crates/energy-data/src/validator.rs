//! Per-source validation and row cleaning.
//!
//! A source is admitted only when it carries both required columns; an
//! admitted source then goes through row-level cleaning where an unparsable
//! timestamp or energy value drops the owning row and nothing else.

use std::fs::File;
use std::path::Path;

use energy_core::error::{EnergyError, Result};
use energy_core::models::MeterRecord;
use energy_core::time_utils::parse_timestamp;
use tracing::debug;

/// Required timestamp column name. Extra columns in a source are ignored.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Required energy column name.
pub const ENERGY_COLUMN: &str = "kwh";

// ── Public API ────────────────────────────────────────────────────────────────

/// Validate one source file and produce its cleaned records.
///
/// The building id comes from the file stem; any identifier embedded in the
/// file content is ignored and every record is relabelled with the source's
/// own name. Returns `SchemaMissingColumn` when a required column is absent
/// (the whole source is rejected, not individual rows), `SourceNotFound` /
/// `SourceUnreadable` when the file cannot be opened or its header cannot
/// be read.
pub fn validate_source(path: &Path) -> Result<Vec<MeterRecord>> {
    let building = building_name(path);

    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => EnergyError::SourceNotFound(path.to_path_buf()),
        _ => EnergyError::SourceUnreadable {
            path: path.to_path_buf(),
            source: e.into(),
        },
    })?;

    // Flexible mode: rows with a deviant field count are yielded anyway and
    // dealt with below instead of failing the whole source.
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = rdr
        .headers()
        .map_err(|e| EnergyError::SourceUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();

    let ts_idx = column_index(&headers, TIMESTAMP_COLUMN).ok_or_else(|| {
        EnergyError::SchemaMissingColumn {
            path: path.to_path_buf(),
            column: TIMESTAMP_COLUMN,
        }
    })?;
    let kwh_idx = column_index(&headers, ENERGY_COLUMN).ok_or_else(|| {
        EnergyError::SchemaMissingColumn {
            path: path.to_path_buf(),
            column: ENERGY_COLUMN,
        }
    })?;

    let mut records: Vec<MeterRecord> = Vec::new();
    let mut rows_read = 0u64;
    let mut bad_timestamps = 0u64;
    let mut bad_values = 0u64;
    let mut negative_values = 0u64;

    for row in rdr.records() {
        // A line that cannot be decoded as a tabular row at all is
        // quietly recoverable: skip it and keep reading.
        let row = match row {
            Ok(r) => r,
            Err(_) => continue,
        };
        rows_read += 1;

        // Short rows in flexible mode may lack the required fields.
        let Some(ts_raw) = row.get(ts_idx) else { continue };
        let Some(kwh_raw) = row.get(kwh_idx) else { continue };

        let Some(timestamp) = parse_timestamp(ts_raw) else {
            bad_timestamps += 1;
            continue;
        };
        let Ok(kwh) = kwh_raw.parse::<f64>() else {
            bad_values += 1;
            continue;
        };
        if kwh < 0.0 {
            negative_values += 1;
        }

        records.push(MeterRecord {
            building: building.clone(),
            timestamp,
            kwh,
        });
    }

    debug!(
        "Source {}: {} rows read, {} kept, {} invalid timestamps, {} invalid values",
        path.display(),
        rows_read,
        records.len(),
        bad_timestamps,
        bad_values,
    );
    if negative_values > 0 {
        debug!(
            "Source {}: {} negative kWh readings passed through unchanged",
            path.display(),
            negative_values,
        );
    }

    Ok(records)
}

/// Entity id for a source: its file stem, falling back to the full file
/// name when there is no stem.
pub fn building_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
