use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::models::UsageCategory;

/// Per-unit multipliers keyed by category: a model name for tokens, or one
/// of the fixed [`UsageCategory`] keys.
///
/// Keys are open-ended. A key that is not present prices its category at
/// zero, so unpriced usage still shows up as a raw count but adds nothing to
/// the weighted total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanMultipliers(BTreeMap<String, f64>);

impl PlanMultipliers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, multiplier: f64) -> Self {
        self.0.insert(key.into(), multiplier);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, multiplier: f64) {
        self.0.insert(key.into(), multiplier);
    }

    /// Multiplier for `key`, or `0.0` when the plan does not price it.
    pub fn get(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    /// Multiplier for one of the fixed categories. The canonical key wins;
    /// plans written with the upstream key names are still priced.
    pub fn for_category(&self, category: UsageCategory) -> f64 {
        if self.contains(category.key()) {
            return self.get(category.key());
        }
        category
            .legacy_key()
            .map(|key| self.get(key))
            .unwrap_or(0.0)
    }

    /// Whether the plan carries an explicit multiplier for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// A copy with every multiplier multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value * factor))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Pricing plan attached to a client for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Display name, e.g. `"Enterprise"`.
    pub name: String,
    #[serde(default)]
    pub multipliers: PlanMultipliers,
}

impl Plan {
    pub fn new(name: impl Into<String>, multipliers: PlanMultipliers) -> Self {
        Self {
            name: name.into(),
            multipliers,
        }
    }

    /// Reject multipliers that are negative or not finite.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in self.multipliers.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(DashboardError::InvalidMultiplier {
                    key: key.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}
