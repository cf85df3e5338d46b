//! Shared domain layer for the campus energy pipeline.
//!
//! Holds the meter-record and aggregate models, the error taxonomy,
//! timestamp and calendar-bucket helpers, number formatting and the CLI
//! settings used by every other crate in the workspace.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{EnergyError, Result};
