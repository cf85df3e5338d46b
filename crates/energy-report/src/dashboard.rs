//! SVG dashboard: daily trend, weekly averages per building, peak scatter.
//!
//! One file, three stacked charts, all drawn from the pipeline's outputs.
//! The SVG backend keeps the chart layer free of native font and system
//! dependencies.

use std::path::Path;

use chrono::Duration;
use energy_core::error::{EnergyError, Result};
use energy_core::models::{DayTotal, MergedDataset, MeterRecord};
use energy_data::aggregator::building_weekly_averages;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Number of top readings shown in the peak scatter chart.
const PEAK_POINTS: usize = 200;

// ── Public API ────────────────────────────────────────────────────────────────

/// Render the three-chart dashboard to a single SVG file.
pub fn render_dashboard(path: &Path, dataset: &MergedDataset, daily: &[DayTotal]) -> Result<()> {
    let root = SVGBackend::new(path, (900, 1260)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let areas = root.split_evenly((3, 1));

    draw_daily_trend(&areas[0], daily)?;
    draw_weekly_averages(&areas[1], dataset)?;
    draw_peak_scatter(&areas[2], dataset)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

// ── Individual charts ─────────────────────────────────────────────────────────

fn draw_daily_trend(area: &DrawingArea<SVGBackend<'_>, Shift>, daily: &[DayTotal]) -> Result<()> {
    let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
        return Ok(());
    };
    let y_max = daily
        .iter()
        .map(|d| d.total_kwh)
        .fold(f64::MIN, f64::max)
        .max(1.0);
    let y_min = daily.iter().map(|d| d.total_kwh).fold(0.0_f64, f64::min);

    let mut chart = ChartBuilder::on(area)
        .caption("Daily Energy Consumption (All Buildings)", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(32)
        .y_label_area_size(56)
        .build_cartesian_2d(first.date..last.date + Duration::days(1), y_min..y_max * 1.05)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .y_desc("kWh")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            daily.iter().map(|d| (d.date, d.total_kwh)),
            &BLUE,
        ))
        .map_err(chart_err)?;

    Ok(())
}

fn draw_weekly_averages(area: &DrawingArea<SVGBackend<'_>, Shift>, dataset: &MergedDataset) -> Result<()> {
    let averages = building_weekly_averages(dataset);
    if averages.is_empty() {
        return Ok(());
    }
    let names: Vec<String> = averages.iter().map(|(name, _)| name.clone()).collect();
    let y_max = averages
        .iter()
        .map(|(_, avg)| *avg)
        .fold(f64::MIN, f64::max)
        .max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption("Average Weekly Usage per Building", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(32)
        .y_label_area_size(56)
        .build_cartesian_2d(0i32..averages.len() as i32, 0f64..y_max * 1.05)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(averages.len())
        .x_label_formatter(&|idx: &i32| {
            names
                .get(*idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_desc("Average Weekly kWh")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(averages.iter().enumerate().map(|(i, (_, avg))| {
            Rectangle::new([(i as i32, 0.0), (i as i32 + 1, *avg)], GREEN.filled())
        }))
        .map_err(chart_err)?;

    Ok(())
}

fn draw_peak_scatter(area: &DrawingArea<SVGBackend<'_>, Shift>, dataset: &MergedDataset) -> Result<()> {
    let mut readings: Vec<&MeterRecord> = dataset.records().iter().collect();
    readings.sort_by(|a, b| b.kwh.total_cmp(&a.kwh));
    readings.truncate(PEAK_POINTS);

    let dates = readings.iter().map(|r| r.timestamp.date());
    let (Some(min_date), Some(max_date)) = (dates.clone().min(), dates.max()) else {
        return Ok(());
    };
    let y_max = readings
        .iter()
        .map(|r| r.kwh)
        .fold(f64::MIN, f64::max)
        .max(1.0);
    let y_min = readings.iter().map(|r| r.kwh).fold(0.0_f64, f64::min);

    let mut chart = ChartBuilder::on(area)
        .caption("Peak Consumption Readings", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(32)
        .y_label_area_size(56)
        .build_cartesian_2d(min_date..max_date + Duration::days(1), y_min..y_max * 1.05)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .y_desc("kWh")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            readings
                .iter()
                .map(|r| Circle::new((r.timestamp.date(), r.kwh), 3, BLUE.mix(0.6).filled())),
        )
        .map_err(chart_err)?;

    Ok(())
}

fn chart_err<E: std::fmt::Display>(err: E) -> EnergyError {
    EnergyError::Chart(err.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
