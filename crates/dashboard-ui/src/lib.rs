//! Terminal UI layer for the consumption dashboard.
//!
//! Provides themes, the header, metric cards, sparkline charts, the period
//! picker and model selector, the dashboard view, and the main application
//! event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod themes;

pub use dashboard_core as core;
