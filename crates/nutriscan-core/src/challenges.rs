//! Weekly challenge definitions and per-scan evaluation.

use serde::{Deserialize, Serialize};

use crate::nutrients::{to_comparable, NutrientFacts, NutrientUnits};

/// A server-defined weekly challenge, read-only to the scan flow.
///
/// `name` encodes `"<target_count>#<label>"` and `value` encodes
/// `"<threshold>#<unit>"`; `criteria` names the nutrient field the challenge
/// tracks. Definitions are loaded once at startup and held immutable for the
/// process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDefinition {
    /// Slot index, 0–4.
    pub id: u8,
    pub name: String,
    pub criteria: String,
    pub value: String,
}

impl ChallengeDefinition {
    /// The number of qualifying scans needed to complete the challenge,
    /// parsed from the `name` prefix. Defaults to 1 when the prefix is
    /// missing or malformed.
    #[must_use]
    pub fn target_count(&self) -> i32 {
        self.name
            .split_once('#')
            .and_then(|(count, _)| count.trim().parse().ok())
            .unwrap_or(1)
    }

    /// The display label, i.e. everything after the `#` in `name`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name
            .split_once('#')
            .map_or(self.name.as_str(), |(_, label)| label)
    }

    /// The nutrient threshold and its unit, parsed from `value`.
    ///
    /// A bare numeric `value` gets the `"g"` default unit. A non-numeric
    /// threshold yields `f64::INFINITY` so a malformed definition can never
    /// contribute progress.
    #[must_use]
    pub fn threshold(&self) -> (f64, String) {
        let (raw, unit) = self
            .value
            .split_once('#')
            .map_or((self.value.as_str(), "g"), |(v, u)| (v, u));
        let threshold = raw.trim().parse().unwrap_or(f64::INFINITY);
        (threshold, unit.trim().to_string())
    }
}

/// What one scan contributed to one challenge slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotEvaluation {
    /// Progress added by this scan (0 or 1 for the shipped evaluator).
    pub contribution: i32,
    /// Whether this scan pushed the slot counter across its target.
    pub completed_now: bool,
}

/// Seam for the per-slot evaluation policy.
///
/// The reconciliation flow treats the evaluator as an opaque collaborator:
/// it hands over the definition, the prior slot count, and the normalized
/// reading, and gets back the contribution plus a completion flag.
pub trait ChallengeEvaluator {
    fn evaluate(
        &self,
        def: &ChallengeDefinition,
        prior_count: i32,
        nutrients: &NutrientFacts,
        units: &NutrientUnits,
    ) -> SlotEvaluation;
}

/// Default policy: a scan contributes 1 when the tracked nutrient reading
/// meets or exceeds the challenge threshold, with mass units normalized to
/// grams before comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct NutrientThresholdEvaluator;

impl ChallengeEvaluator for NutrientThresholdEvaluator {
    fn evaluate(
        &self,
        def: &ChallengeDefinition,
        prior_count: i32,
        nutrients: &NutrientFacts,
        units: &NutrientUnits,
    ) -> SlotEvaluation {
        let Some((reading, unit)) = nutrient_reading(&def.criteria, nutrients, units) else {
            return SlotEvaluation::default();
        };
        let (threshold, threshold_unit) = def.threshold();
        let (Some(reading), Some(threshold)) = (
            to_comparable(reading, unit),
            to_comparable(threshold, &threshold_unit),
        ) else {
            return SlotEvaluation::default();
        };

        let contribution = i32::from(reading >= threshold);
        let target = def.target_count();
        let completed_now =
            contribution > 0 && prior_count < target && prior_count + contribution >= target;
        SlotEvaluation {
            contribution,
            completed_now,
        }
    }
}

/// Resolve a criteria key to the matching normalized reading and unit.
/// Unknown keys yield `None`, which the evaluator treats as no progress.
fn nutrient_reading<'a>(
    criteria: &str,
    nutrients: &NutrientFacts,
    units: &'a NutrientUnits,
) -> Option<(f64, &'a str)> {
    let pair = match criteria {
        "energy_kcal" | "energy-kcal" => (nutrients.energy_kcal, &units.energy_kcal),
        "fat" => (nutrients.fat, &units.fat),
        "saturated_fat" | "saturated-fat" => (nutrients.saturated_fat, &units.saturated_fat),
        "trans_fat" | "trans-fat" => (nutrients.trans_fat, &units.trans_fat),
        "cholesterol" => (nutrients.cholesterol, &units.cholesterol),
        "carbohydrates" => (nutrients.carbohydrates, &units.carbohydrates),
        "sugars" => (nutrients.sugars, &units.sugars),
        "fiber" => (nutrients.fiber, &units.fiber),
        "proteins" => (nutrients.proteins, &units.proteins),
        "potassium" => (nutrients.potassium, &units.potassium),
        "salt" => (nutrients.salt, &units.salt),
        "sodium" => (nutrients.sodium, &units.sodium),
        "iron" => (nutrients.iron, &units.iron),
        "calcium" => (nutrients.calcium, &units.calcium),
        _ => return None,
    };
    Some((pair.0, pair.1.as_str()))
}
