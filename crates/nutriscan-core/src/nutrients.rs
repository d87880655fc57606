//! Normalization of upstream nutrient payloads into a fixed 14-field schema.
//!
//! Upstream `nutriments` objects vary in key naming (hyphenated vs.
//! underscored) and granularity (per-100g, per-serving, bare). Normalization
//! is total: any input, including non-objects, yields a fully-populated
//! record with documented defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The fixed nutrient readings derived from one product payload.
///
/// Every field is always present; absent upstream data yields `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientFacts {
    pub energy_kcal: f64,
    pub fat: f64,
    pub saturated_fat: f64,
    pub trans_fat: f64,
    pub cholesterol: f64,
    pub carbohydrates: f64,
    pub sugars: f64,
    pub fiber: f64,
    pub proteins: f64,
    pub potassium: f64,
    pub salt: f64,
    pub sodium: f64,
    pub iron: f64,
    pub calcium: f64,
}

/// Unit strings parallel to [`NutrientFacts`].
///
/// Defaults to `"g"` for every field except energy, which is fixed to
/// `"kcal"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientUnits {
    pub energy_kcal: String,
    pub fat: String,
    pub saturated_fat: String,
    pub trans_fat: String,
    pub cholesterol: String,
    pub carbohydrates: String,
    pub sugars: String,
    pub fiber: String,
    pub proteins: String,
    pub potassium: String,
    pub salt: String,
    pub sodium: String,
    pub iron: String,
    pub calcium: String,
}

impl Default for NutrientUnits {
    fn default() -> Self {
        let g = || "g".to_string();
        Self {
            energy_kcal: "kcal".to_string(),
            fat: g(),
            saturated_fat: g(),
            trans_fat: g(),
            cholesterol: g(),
            carbohydrates: g(),
            sugars: g(),
            fiber: g(),
            proteins: g(),
            potassium: g(),
            salt: g(),
            sodium: g(),
            iron: g(),
            calcium: g(),
        }
    }
}

// Upstream key spellings per field, hyphenated (the payload's native form)
// before underscored.
const ENERGY_KEYS: &[&str] = &["energy-kcal", "energy_kcal"];
const SATURATED_FAT_KEYS: &[&str] = &["saturated-fat", "saturated_fat"];
const TRANS_FAT_KEYS: &[&str] = &["trans-fat", "trans_fat"];

/// Normalize a raw `nutriments` payload into readings plus units.
///
/// Candidate source keys per field are tried in fixed priority: the per-100g
/// key, then the per-serving key, then the bare key. The first present
/// non-falsy value wins; a falsy value (zero, `NaN`, empty or non-numeric
/// string) falls through to the next candidate. All-absent yields `0.0`.
#[must_use]
pub fn normalize_nutrients(nutriments: &Value) -> (NutrientFacts, NutrientUnits) {
    let facts = NutrientFacts {
        energy_kcal: reading(nutriments, ENERGY_KEYS),
        fat: reading(nutriments, &["fat"]),
        saturated_fat: reading(nutriments, SATURATED_FAT_KEYS),
        trans_fat: reading(nutriments, TRANS_FAT_KEYS),
        cholesterol: reading(nutriments, &["cholesterol"]),
        carbohydrates: reading(nutriments, &["carbohydrates"]),
        sugars: reading(nutriments, &["sugars"]),
        fiber: reading(nutriments, &["fiber"]),
        proteins: reading(nutriments, &["proteins"]),
        potassium: reading(nutriments, &["potassium"]),
        salt: reading(nutriments, &["salt"]),
        sodium: reading(nutriments, &["sodium"]),
        iron: reading(nutriments, &["iron"]),
        calcium: reading(nutriments, &["calcium"]),
    };

    let units = NutrientUnits {
        // Energy is always reported in kcal; upstream unit keys do not apply.
        energy_kcal: "kcal".to_string(),
        fat: unit(nutriments, &["fat"]),
        saturated_fat: unit(nutriments, SATURATED_FAT_KEYS),
        trans_fat: unit(nutriments, TRANS_FAT_KEYS),
        cholesterol: unit(nutriments, &["cholesterol"]),
        carbohydrates: unit(nutriments, &["carbohydrates"]),
        sugars: unit(nutriments, &["sugars"]),
        fiber: unit(nutriments, &["fiber"]),
        proteins: unit(nutriments, &["proteins"]),
        potassium: unit(nutriments, &["potassium"]),
        salt: unit(nutriments, &["salt"]),
        sodium: unit(nutriments, &["sodium"]),
        iron: unit(nutriments, &["iron"]),
        calcium: unit(nutriments, &["calcium"]),
    };

    (facts, units)
}

/// Convert a reading to a canonical comparison base: grams for mass units,
/// kcal for energy. Returns `None` for units it does not understand, so
/// callers can treat the reading as incomparable rather than wrong.
#[must_use]
pub fn to_comparable(value: f64, unit: &str) -> Option<f64> {
    match unit.trim().to_ascii_lowercase().as_str() {
        "g" | "kcal" => Some(value),
        "mg" => Some(value / 1_000.0),
        "kg" => Some(value * 1_000.0),
        "\u{b5}g" | "ug" | "mcg" => Some(value / 1_000_000.0),
        _ => None,
    }
}

fn reading(nutriments: &Value, bases: &[&str]) -> f64 {
    const SUFFIXES: [&str; 3] = ["_100g", "_serving", ""];
    for suffix in SUFFIXES {
        for base in bases {
            if let Some(v) = nutriments.get(format!("{base}{suffix}")).and_then(non_falsy) {
                return v;
            }
        }
    }
    0.0
}

fn unit(nutriments: &Value, bases: &[&str]) -> String {
    for base in bases {
        let found = nutriments
            .get(format!("{base}_unit"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(u) = found {
            return u.to_string();
        }
    }
    "g".to_string()
}

/// A value counts only when it is a finite, non-zero number — either a JSON
/// number or a string that parses to one. Everything else falls through to
/// the next candidate key.
fn non_falsy(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (parsed.is_finite() && parsed != 0.0).then_some(parsed)
}
