//! Aggregate tables derived from the merged dataset.
//!
//! Every operation is a pure function of the dataset. Daily and weekly
//! series are gap-filled across the full observed range via explicit range
//! generation with a zero default, so bucketed series are contiguous.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use energy_core::models::{BuildingStats, DayTotal, MergedDataset, WeekTotal};
use energy_core::time_utils::week_start;

// ── Campus-wide series ────────────────────────────────────────────────────────

/// Sum of energy per calendar day across all buildings.
///
/// Days with no records inside the observed span appear with a zero total.
pub fn daily_totals(dataset: &MergedDataset) -> Vec<DayTotal> {
    debug_assert!(!dataset.is_empty(), "daily_totals on an empty dataset");

    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in dataset.records() {
        *buckets.entry(record.timestamp.date()).or_insert(0.0) += record.kwh;
    }

    fill_range(&buckets, 1)
        .into_iter()
        .map(|(date, total_kwh)| DayTotal { date, total_kwh })
        .collect()
}

/// Sum of energy per calendar week across all buildings.
///
/// Weeks start on Monday and are keyed by that Monday; weeks with no
/// records inside the observed span appear with a zero total.
pub fn weekly_totals(dataset: &MergedDataset) -> Vec<WeekTotal> {
    debug_assert!(!dataset.is_empty(), "weekly_totals on an empty dataset");

    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in dataset.records() {
        *buckets
            .entry(week_start(record.timestamp.date()))
            .or_insert(0.0) += record.kwh;
    }

    fill_range(&buckets, 7)
        .into_iter()
        .map(|(week_start, total_kwh)| WeekTotal {
            week_start,
            total_kwh,
        })
        .collect()
}

// ── Per-building statistics ───────────────────────────────────────────────────

/// Mean, min, max and total energy per building.
///
/// Groups are exactly the distinct buildings present in the dataset, sorted
/// by name; a building with zero records never appears.
pub fn building_summary(dataset: &MergedDataset) -> Vec<BuildingStats> {
    debug_assert!(!dataset.is_empty(), "building_summary on an empty dataset");

    struct Acc {
        total: f64,
        min: f64,
        max: f64,
        count: u64,
    }

    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
    for record in dataset.records() {
        groups
            .entry(record.building.as_str())
            .and_modify(|acc| {
                acc.total += record.kwh;
                acc.min = acc.min.min(record.kwh);
                acc.max = acc.max.max(record.kwh);
                acc.count += 1;
            })
            .or_insert(Acc {
                total: record.kwh,
                min: record.kwh,
                max: record.kwh,
                count: 1,
            });
    }

    groups
        .into_iter()
        .map(|(building, acc)| BuildingStats {
            building: building.to_string(),
            mean_kwh: acc.total / acc.count as f64,
            min_kwh: acc.min,
            max_kwh: acc.max,
            total_kwh: acc.total,
        })
        .collect()
}

/// Mean of each building's weekly totals, sorted by building name.
///
/// Each building's weekly series is gap-filled across that building's own
/// observed span before averaging, so idle weeks pull the mean down.
/// Feeds the dashboard's bar chart.
pub fn building_weekly_averages(dataset: &MergedDataset) -> Vec<(String, f64)> {
    let mut per_building: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    for record in dataset.records() {
        *per_building
            .entry(record.building.as_str())
            .or_default()
            .entry(week_start(record.timestamp.date()))
            .or_insert(0.0) += record.kwh;
    }

    per_building
        .into_iter()
        .filter_map(|(building, weeks)| {
            let filled = fill_range(&weeks, 7);
            if filled.is_empty() {
                return None;
            }
            let mean = filled.iter().map(|(_, v)| v).sum::<f64>() / filled.len() as f64;
            Some((building.to_string(), mean))
        })
        .collect()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Expand sparse buckets into a contiguous series from the earliest to the
/// latest key, stepping `step_days`, with a zero default for missing keys.
fn fill_range(buckets: &BTreeMap<NaiveDate, f64>, step_days: i64) -> Vec<(NaiveDate, f64)> {
    let Some((&first, _)) = buckets.first_key_value() else {
        return Vec::new();
    };
    let Some((&last, _)) = buckets.last_key_value() else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        series.push((cursor, buckets.get(&cursor).copied().unwrap_or(0.0)));
        cursor = cursor + Duration::days(step_days);
    }
    series
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use energy_core::models::MeterRecord;

    fn record(building: &str, ts: &str, kwh: f64) -> MeterRecord {
        MeterRecord {
            building: building.to_string(),
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            kwh,
        }
    }

    fn dataset(records: Vec<MeterRecord>) -> MergedDataset {
        MergedDataset::from_records(records)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── daily_totals ──────────────────────────────────────────────────────────

    #[test]
    fn test_daily_sums_across_buildings() {
        let ds = dataset(vec![
            record("A", "2024-01-15 08:00:00", 10.0),
            record("B", "2024-01-15 20:00:00", 5.0),
        ]);
        let daily = daily_totals(&ds);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, date(2024, 1, 15));
        assert!((daily[0].total_kwh - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_gap_filled_with_zero() {
        // Records on day 1 and day 3 only; day 2 must appear with 0.
        let ds = dataset(vec![
            record("A", "2024-03-01 08:00:00", 4.0),
            record("A", "2024-03-03 08:00:00", 6.0),
        ]);
        let daily = daily_totals(&ds);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[1].date, date(2024, 3, 2));
        assert_eq!(daily[1].total_kwh, 0.0);
    }

    #[test]
    fn test_daily_single_record_single_bucket() {
        let ds = dataset(vec![record("A", "2024-01-15 08:00:00", 7.5)]);
        let daily = daily_totals(&ds);
        assert_eq!(daily.len(), 1);
        assert!((daily[0].total_kwh - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_daily_duplicates_both_count() {
        let ds = dataset(vec![
            record("A", "2024-01-15 08:00:00", 5.0),
            record("A", "2024-01-15 08:00:00", 5.0),
        ]);
        let daily = daily_totals(&ds);
        assert!((daily[0].total_kwh - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_negative_values_pass_through() {
        let ds = dataset(vec![
            record("A", "2024-01-15 08:00:00", 5.0),
            record("solar", "2024-01-15 12:00:00", -8.0),
        ]);
        let daily = daily_totals(&ds);
        assert!((daily[0].total_kwh + 3.0).abs() < 1e-9);
    }

    // ── weekly_totals ─────────────────────────────────────────────────────────

    #[test]
    fn test_weekly_buckets_keyed_by_monday() {
        // Wed 2024-01-17 and Thu 2024-01-18 share the week of Mon the 15th.
        let ds = dataset(vec![
            record("A", "2024-01-17 08:00:00", 1.0),
            record("A", "2024-01-18 08:00:00", 2.0),
        ]);
        let weekly = weekly_totals(&ds);
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].week_start, date(2024, 1, 15));
        assert!((weekly[0].total_kwh - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_boundary_sunday_vs_monday() {
        // Sun 2024-01-14 closes one week, Mon 2024-01-15 opens the next.
        let ds = dataset(vec![
            record("A", "2024-01-14 23:00:00", 1.0),
            record("A", "2024-01-15 01:00:00", 2.0),
        ]);
        let weekly = weekly_totals(&ds);
        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0].week_start, date(2024, 1, 8));
        assert_eq!(weekly[1].week_start, date(2024, 1, 15));
    }

    #[test]
    fn test_weekly_gap_filled_with_zero() {
        // Records three weeks apart leave an empty middle week.
        let ds = dataset(vec![
            record("A", "2024-01-01 08:00:00", 4.0),
            record("A", "2024-01-15 08:00:00", 6.0),
        ]);
        let weekly = weekly_totals(&ds);
        assert_eq!(weekly.len(), 3);
        assert_eq!(weekly[1].week_start, date(2024, 1, 8));
        assert_eq!(weekly[1].total_kwh, 0.0);
    }

    // ── building_summary ──────────────────────────────────────────────────────

    #[test]
    fn test_summary_two_buildings() {
        let ds = dataset(vec![
            record("A", "2024-01-15 08:00:00", 10.0),
            record("A", "2024-01-16 08:00:00", 20.0),
            record("B", "2024-01-15 09:00:00", 5.0),
        ]);
        let summary = building_summary(&ds);
        assert_eq!(summary.len(), 2);

        let a = &summary[0];
        assert_eq!(a.building, "A");
        assert!((a.mean_kwh - 15.0).abs() < 1e-9);
        assert!((a.min_kwh - 10.0).abs() < 1e-9);
        assert!((a.max_kwh - 20.0).abs() < 1e-9);
        assert!((a.total_kwh - 30.0).abs() < 1e-9);

        let b = &summary[1];
        assert_eq!(b.building, "B");
        assert!((b.mean_kwh - 5.0).abs() < 1e-9);
        assert!((b.min_kwh - 5.0).abs() < 1e-9);
        assert!((b.max_kwh - 5.0).abs() < 1e-9);
        assert!((b.total_kwh - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_single_record_collapses() {
        let ds = dataset(vec![record("A", "2024-01-15 08:00:00", 7.0)]);
        let summary = building_summary(&ds);
        assert_eq!(summary.len(), 1);
        let a = &summary[0];
        assert_eq!(a.mean_kwh, 7.0);
        assert_eq!(a.min_kwh, 7.0);
        assert_eq!(a.max_kwh, 7.0);
        assert_eq!(a.total_kwh, 7.0);
    }

    #[test]
    fn test_summary_negative_minimum() {
        let ds = dataset(vec![
            record("solar", "2024-06-01 10:00:00", -3.0),
            record("solar", "2024-06-01 22:00:00", 2.0),
        ]);
        let summary = building_summary(&ds);
        assert!((summary[0].min_kwh + 3.0).abs() < 1e-9);
        assert!((summary[0].total_kwh + 1.0).abs() < 1e-9);
    }

    // ── building_weekly_averages ──────────────────────────────────────────────

    #[test]
    fn test_weekly_averages_per_building() {
        // A: 3.0 in week of Jan 15, 5.0 in week of Jan 22 → mean 4.0.
        let ds = dataset(vec![
            record("A", "2024-01-15 08:00:00", 3.0),
            record("A", "2024-01-22 08:00:00", 5.0),
            record("B", "2024-01-15 08:00:00", 9.0),
        ]);
        let averages = building_weekly_averages(&ds);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].0, "A");
        assert!((averages[0].1 - 4.0).abs() < 1e-9);
        assert!((averages[1].1 - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_averages_count_idle_weeks() {
        // Two active weeks with an idle one between: mean over three weeks.
        let ds = dataset(vec![
            record("A", "2024-01-01 08:00:00", 6.0),
            record("A", "2024-01-15 08:00:00", 6.0),
        ]);
        let averages = building_weekly_averages(&ds);
        assert!((averages[0].1 - 4.0).abs() < 1e-9);
    }
}
