//! Per-building report lines.

use energy_core::formatting::format_kwh;
use energy_core::models::BuildingStats;

/// One formatted report line per building, in summary order.
pub fn building_report_lines(summary: &[BuildingStats]) -> Vec<String> {
    summary
        .iter()
        .map(|stats| {
            format!(
                "Building: {} | Total Consumption: {} kWh",
                stats.building,
                format_kwh(stats.total_kwh)
            )
        })
        .collect()
}
