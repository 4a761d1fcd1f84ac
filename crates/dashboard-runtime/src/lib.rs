//! Runtime layer for the consumption dashboard.
//!
//! Owns the period-selection state machine and the dashboard session that
//! ties a data source, the active period and the derived snapshot together.

pub mod period_state;
pub mod session;

pub use dashboard_core as core;
pub use dashboard_data as data;
