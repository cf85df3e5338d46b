//! Report layer for the campus energy pipeline.
//!
//! Pure consumers of the core's outputs: flat-file export of the cleaned
//! dataset and aggregate tables, per-building report lines, and the SVG
//! dashboard charts.

pub mod dashboard;
pub mod export;
pub mod report;
