use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::plans::Plan;

/// Marker written in place of a model name for days without token usage.
pub const NO_MODEL: &str = "N/A";

/// Tokens consumed by one AI model on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Model identifier, also the multiplier key for its tokens.
    pub model: String,
    /// Tokens consumed that day.
    pub tokens: u64,
}

impl TokenUsage {
    pub fn new(model: impl Into<String>, tokens: u64) -> Self {
        Self {
            model: model.into(),
            tokens,
        }
    }
}

/// One calendar day of usage.
///
/// Counters are unsigned, so negative values are rejected while the JSON
/// document is being parsed. The original counter names of the upstream
/// export (`tokens`, `n8nExecutions`, `woopiAiExecutions`) are accepted as
/// aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Calendar day, `YYYY-MM-DD` on the wire.
    pub date: NaiveDate,
    /// Per-model token usage in insertion order; a model appears at most once.
    #[serde(default, alias = "tokens")]
    pub token_usages: Vec<TokenUsage>,
    /// Document pages processed by OCR.
    #[serde(default)]
    pub ocr_pages: u64,
    /// Workflow executions.
    #[serde(default, alias = "n8nExecutions")]
    pub automation_executions: u64,
    /// AI agent executions.
    #[serde(default, alias = "woopiAiExecutions")]
    pub secondary_automation_executions: u64,
}

impl DailyRecord {
    /// A record for `date` with no usage at all.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            token_usages: Vec::new(),
            ocr_pages: 0,
            automation_executions: 0,
            secondary_automation_executions: 0,
        }
    }

    /// Tokens consumed by `model` on this day; `0` when the model is absent.
    pub fn tokens_for(&self, model: &str) -> u64 {
        self.token_usages
            .iter()
            .find(|usage| usage.model == model)
            .map(|usage| usage.tokens)
            .unwrap_or(0)
    }

    /// The counter for one of the fixed non-token categories.
    pub fn count(&self, category: UsageCategory) -> u64 {
        match category {
            UsageCategory::OcrPages => self.ocr_pages,
            UsageCategory::AutomationExecutions => self.automation_executions,
            UsageCategory::SecondaryAutomationExecutions => self.secondary_automation_executions,
        }
    }
}

/// The fixed, non-token usage categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UsageCategory {
    OcrPages,
    AutomationExecutions,
    SecondaryAutomationExecutions,
}

impl UsageCategory {
    /// Every category, in display and export-column order.
    pub const ALL: [UsageCategory; 3] = [
        UsageCategory::OcrPages,
        UsageCategory::AutomationExecutions,
        UsageCategory::SecondaryAutomationExecutions,
    ];

    /// Multiplier key of this category in a plan.
    pub fn key(&self) -> &'static str {
        match self {
            UsageCategory::OcrPages => "ocrPages",
            UsageCategory::AutomationExecutions => "automationExecutions",
            UsageCategory::SecondaryAutomationExecutions => "secondaryAutomationExecutions",
        }
    }

    /// Key the upstream export used for this category's multiplier, when it
    /// differs from [`key`](Self::key).
    pub fn legacy_key(&self) -> Option<&'static str> {
        match self {
            UsageCategory::OcrPages => None,
            UsageCategory::AutomationExecutions => Some("n8nExecutions"),
            UsageCategory::SecondaryAutomationExecutions => Some("woopiAiExecutions"),
        }
    }

    /// Human-readable name, also used as the CSV column header.
    pub fn label(&self) -> &'static str {
        match self {
            UsageCategory::OcrPages => "OCR Pages",
            UsageCategory::AutomationExecutions => "Workflow Executions",
            UsageCategory::SecondaryAutomationExecutions => "AI Agent Executions",
        }
    }
}

/// The account whose consumption is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
}

/// Everything a data source supplies at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub client: Client,
    pub plan: Plan,
    #[serde(default)]
    pub records: Vec<DailyRecord>,
}

// ── Tests ──────────────────────────────────────────────────────────────────────
