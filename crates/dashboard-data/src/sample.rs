//! Sample workspace generator used when no data file is configured.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use dashboard_core::models::{Client, DailyRecord, TokenUsage, UsageCategory, Workspace};
use dashboard_core::plans::{Plan, PlanMultipliers};
use dashboard_core::time_utils::days_before;

/// Models present on every generated day, in insertion order.
pub const SAMPLE_MODELS: [&str; 4] = [
    "gpt-4o",
    "embeddings-text-large-3",
    "gpt-4o-mini",
    "gemini-1.5-pro",
];

pub const SAMPLE_CLIENT: &str = "Acme Analytics";

/// The "Enterprise" plan the sample workspace is billed on.
pub fn enterprise_plan() -> Plan {
    let multipliers = PlanMultipliers::new()
        .with("gpt-4o", 0.000015)
        .with("embeddings-text-large-3", 0.0000001)
        .with("gpt-4o-mini", 0.000005)
        .with("gemini-1.5-pro", 0.000012)
        .with(UsageCategory::OcrPages.key(), 0.08)
        .with(UsageCategory::AutomationExecutions.key(), 0.04)
        .with(UsageCategory::SecondaryAutomationExecutions.key(), 0.06);
    Plan::new("Enterprise", multipliers)
}

/// Generate `days` consecutive daily records ending on `today`, ascending.
///
/// The same `seed` always yields the same records; `None` draws a fresh seed
/// from the OS.
pub fn generate_records(today: NaiveDate, days: u32, seed: Option<u64>) -> Vec<DailyRecord> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    (0..u64::from(days))
        .rev()
        .map(|offset| generate_day(&mut rng, days_before(today, offset)))
        .collect()
}

/// A complete sample workspace: client, Enterprise plan and records.
pub fn sample_workspace(today: NaiveDate, days: u32, seed: Option<u64>) -> Workspace {
    let records = generate_records(today, days, seed);
    info!(
        "Generated {} sample records ending {} (seed: {:?})",
        records.len(),
        today,
        seed
    );

    Workspace {
        client: Client {
            name: SAMPLE_CLIENT.to_string(),
        },
        plan: enterprise_plan(),
        records,
    }
}

fn generate_day(rng: &mut StdRng, date: NaiveDate) -> DailyRecord {
    DailyRecord {
        date,
        token_usages: SAMPLE_MODELS
            .iter()
            .map(|model| TokenUsage::new(*model, rng.gen_range(1_000..51_000)))
            .collect(),
        ocr_pages: rng.gen_range(10..210),
        automation_executions: rng.gen_range(50..550),
        secondary_automation_executions: rng.gen_range(30..330),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
