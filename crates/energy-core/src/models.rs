use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single cleaned meter reading attributed to one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterRecord {
    /// Building the reading belongs to, derived from the source file name.
    pub building: String,
    /// Reading time in the campus's canonical zone.
    pub timestamp: NaiveDateTime,
    /// Energy in kilowatt-hours. May be negative (net-metering export).
    pub kwh: f64,
}

/// The unified time-ordered dataset produced by one ingestion run.
///
/// Construction applies the single global sort; the collection is immutable
/// afterwards. Duplicate `(building, timestamp)` pairs are kept and all
/// count toward the aggregates.
#[derive(Debug, Clone, Default)]
pub struct MergedDataset {
    records: Vec<MeterRecord>,
}

impl MergedDataset {
    /// Build the dataset from freshly ingested records.
    ///
    /// One stable sort by timestamp ascending, so records with equal
    /// timestamps keep their ingestion order.
    pub fn from_records(mut records: Vec<MeterRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    /// All records, time-sorted ascending.
    pub fn records(&self) -> &[MeterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Campus-wide energy total for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total_kwh: f64,
}

/// Campus-wide energy total for one calendar week, keyed by its Monday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekTotal {
    pub week_start: NaiveDate,
    pub total_kwh: f64,
}

/// Summary statistics for one building over all of its records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingStats {
    pub building: String,
    pub mean_kwh: f64,
    pub min_kwh: f64,
    pub max_kwh: f64,
    pub total_kwh: f64,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
