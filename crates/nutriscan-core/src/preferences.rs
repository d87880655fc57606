//! Dietary preference configuration consumed by the AI assessment step.

use serde::{Deserialize, Serialize};

/// How a nutrient limit is meant to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NutrientEffect {
    Ignore,
    Above,
    Below,
}

/// One per-nutrient limit, e.g. "keep sodium below 2 g".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientLimit {
    pub name: String,
    pub effect: NutrientEffect,
    pub limit: f64,
    pub unit: String,
}

/// A named diet option with its descriptive details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietOption {
    pub name: String,
    pub details: Vec<String>,
}

/// The full preference configuration for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub limits: Vec<NutrientLimit>,
    #[serde(default)]
    pub diets: Vec<DietOption>,
}

impl Preferences {
    /// True when nothing has been configured; the AI step is skipped then.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty() && self.diets.is_empty()
    }
}
