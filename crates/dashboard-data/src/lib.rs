//! Data layer for the consumption dashboard.
//!
//! Loads or generates workspaces, validates them, filters records to a
//! resolved date range, aggregates them into totals and series, and projects
//! them into CSV exports.

pub mod aggregator;
pub mod export;
pub mod filter;
pub mod reader;
pub mod sample;
pub mod validation;

pub use dashboard_core as core;
