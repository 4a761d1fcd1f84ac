//! Reduction of a filtered record set into totals, series and the weighted
//! consumption score.
//!
//! Every figure the dashboard displays is computed here once per
//! recomputation; the presentation layer only formats.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use dashboard_core::models::{DailyRecord, UsageCategory};
use dashboard_core::plans::PlanMultipliers;

// ── Output types ──────────────────────────────────────────────────────────────

/// One chart point: a day and that day's count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: u64,
}

/// Period total of one category together with its pricing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategorySummary {
    /// Raw count over the period.
    pub total: u64,
    /// Plan multiplier for the category, `0.0` when unpriced.
    pub unit_cost: f64,
    /// `total × unit_cost`.
    pub totalizer: f64,
}

impl CategorySummary {
    fn new(total: u64, unit_cost: f64) -> Self {
        Self {
            total,
            unit_cost,
            totalizer: total as f64 * unit_cost,
        }
    }
}

/// Summary and daily series of one fixed category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAggregate {
    pub category: UsageCategory,
    pub summary: CategorySummary,
    pub series: Vec<SeriesPoint>,
}

/// Summary and daily series of one AI model's token usage.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAggregate {
    pub model: String,
    pub summary: CategorySummary,
    /// One point per filtered record; `0` on days the model was not used.
    pub series: Vec<SeriesPoint>,
}

/// Everything derived from one filtered record set.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Number of records that went into the aggregation.
    pub record_count: usize,
    pub ocr_pages: CategoryAggregate,
    pub automation_executions: CategoryAggregate,
    pub secondary_automation_executions: CategoryAggregate,
    /// Per-model aggregates, sorted by model name.
    pub models: Vec<ModelAggregate>,
    /// Unitless weighted consumption score; never a currency amount.
    pub weighted_total: f64,
}

impl Aggregation {
    /// Aggregate of one fixed category.
    pub fn category(&self, category: UsageCategory) -> &CategoryAggregate {
        match category {
            UsageCategory::OcrPages => &self.ocr_pages,
            UsageCategory::AutomationExecutions => &self.automation_executions,
            UsageCategory::SecondaryAutomationExecutions => &self.secondary_automation_executions,
        }
    }

    /// Aggregate of `model`, `None` if it was not used in the period.
    pub fn model(&self, model: &str) -> Option<&ModelAggregate> {
        self.models.iter().find(|m| m.model == model)
    }

    /// Sorted model names seen in the period.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.model.as_str()).collect()
    }

    /// Period token total of `model`; `0` when the model is unknown.
    pub fn token_total(&self, model: &str) -> u64 {
        self.model(model).map(|m| m.summary.total).unwrap_or(0)
    }

    /// Tokens consumed across all models.
    pub fn total_tokens(&self) -> u64 {
        self.models
            .iter()
            .map(|m| m.summary.total)
            .fold(0, u64::saturating_add)
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Reduce `records` with `multipliers` into an [`Aggregation`].
///
/// Series follow input order. An empty slice yields zero totals, empty
/// series and a weighted total of `0.0`.
pub fn aggregate(records: &[DailyRecord], multipliers: &PlanMultipliers) -> Aggregation {
    let ocr_pages = aggregate_category(records, UsageCategory::OcrPages, multipliers);
    let automation_executions =
        aggregate_category(records, UsageCategory::AutomationExecutions, multipliers);
    let secondary_automation_executions = aggregate_category(
        records,
        UsageCategory::SecondaryAutomationExecutions,
        multipliers,
    );

    let models: Vec<ModelAggregate> = known_models(records)
        .into_iter()
        .map(|model| aggregate_model(records, model, multipliers))
        .collect();

    let weighted_total = models.iter().map(|m| m.summary.totalizer).sum::<f64>()
        + ocr_pages.summary.totalizer
        + automation_executions.summary.totalizer
        + secondary_automation_executions.summary.totalizer;

    debug!(
        "Aggregated {} records: {} models, weighted total {:.4}",
        records.len(),
        models.len(),
        weighted_total
    );

    Aggregation {
        record_count: records.len(),
        ocr_pages,
        automation_executions,
        secondary_automation_executions,
        models,
        weighted_total,
    }
}

/// Sorted union of the model names used in `records`.
pub fn known_models(records: &[DailyRecord]) -> BTreeSet<&str> {
    records
        .iter()
        .flat_map(|record| record.token_usages.iter())
        .map(|usage| usage.model.as_str())
        .collect()
}

/// Sum of a series, pinned at `u64::MAX` instead of wrapping.
fn saturating_total(series: &[SeriesPoint]) -> u64 {
    series
        .iter()
        .map(|point| point.value)
        .fold(0, u64::saturating_add)
}

fn aggregate_category(
    records: &[DailyRecord],
    category: UsageCategory,
    multipliers: &PlanMultipliers,
) -> CategoryAggregate {
    let series: Vec<SeriesPoint> = records
        .iter()
        .map(|record| SeriesPoint {
            date: record.date,
            value: record.count(category),
        })
        .collect();
    let total = saturating_total(&series);

    CategoryAggregate {
        category,
        summary: CategorySummary::new(total, multipliers.for_category(category)),
        series,
    }
}

fn aggregate_model(
    records: &[DailyRecord],
    model: &str,
    multipliers: &PlanMultipliers,
) -> ModelAggregate {
    let series: Vec<SeriesPoint> = records
        .iter()
        .map(|record| SeriesPoint {
            date: record.date,
            value: record.tokens_for(model),
        })
        .collect();
    let total = saturating_total(&series);

    ModelAggregate {
        model: model.to_string(),
        summary: CategorySummary::new(total, multipliers.get(model)),
        series,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
