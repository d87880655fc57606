use serde::{Deserialize, Serialize};

use crate::nutrients::{NutrientFacts, NutrientUnits};

/// Facts about one scanned product, derived from the remote lookup.
///
/// Owned transiently by a single scan flow and never persisted verbatim.
/// String fields are always present; lookups that omit them upstream get the
/// documented fallbacks at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFacts {
    pub barcode: String,
    pub name: String,
    pub ingredients_text: String,
    pub serving_size: String,
    pub ecoscore_grade: String,
    pub food_groups: String,
    pub nutrients: NutrientFacts,
    pub units: NutrientUnits,
}

impl ProductFacts {
    /// Returns `true` when the upstream record carried an ingredient list.
    #[must_use]
    pub fn has_ingredients(&self) -> bool {
        !self.ingredients_text.is_empty() && self.ingredients_text != Self::NO_INGREDIENTS
    }

    /// Fallback for products without an ingredient list.
    pub const NO_INGREDIENTS: &'static str = "No ingredients available";

    /// Fallback for products without a usable name.
    pub const UNNAMED: &'static str = "Unknown product";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_facts(ingredients: &str) -> ProductFacts {
        ProductFacts {
            barcode: "3017620422003".to_string(),
            name: "Hazelnut spread".to_string(),
            ingredients_text: ingredients.to_string(),
            serving_size: "15 g".to_string(),
            ecoscore_grade: "d".to_string(),
            food_groups: "en:sweets".to_string(),
            nutrients: NutrientFacts::default(),
            units: NutrientUnits::default(),
        }
    }

    #[test]
    fn has_ingredients_false_for_fallback_text() {
        assert!(!make_facts(ProductFacts::NO_INGREDIENTS).has_ingredients());
        assert!(!make_facts("").has_ingredients());
    }

    #[test]
    fn has_ingredients_true_for_real_list() {
        assert!(make_facts("sugar, palm oil, hazelnuts").has_ingredients());
    }

    #[test]
    fn serde_roundtrip() {
        let facts = make_facts("sugar, palm oil, hazelnuts");
        let json = serde_json::to_string(&facts).expect("serialization failed");
        let decoded: ProductFacts = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded, facts);
    }
}
