pub mod chart;
pub mod header;
pub mod metric_card;
pub mod model_selector;
pub mod period_picker;
