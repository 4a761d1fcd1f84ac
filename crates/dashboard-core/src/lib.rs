//! Core domain types for the consumption dashboard.
//!
//! Holds the usage record and plan models, reporting periods and their
//! resolution into day ranges, timezone handling, number formatting, CLI
//! settings and the shared error type.

pub mod error;
pub mod formatting;
pub mod models;
pub mod period;
pub mod plans;
pub mod settings;
pub mod time_utils;

pub use error::{DashboardError, Result};
