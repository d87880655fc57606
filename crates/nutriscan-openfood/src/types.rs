//! Typed response shapes for the Open Food Facts product endpoint.

use serde::Deserialize;

use nutriscan_core::{normalize_nutrients, ProductFacts};

/// Top-level envelope of `GET /api/v2/product/{barcode}.json`.
///
/// `status` is 1 when a product was found and 0 otherwise;
/// `status_verbose` carries the human-readable reason.
#[derive(Debug, Deserialize)]
pub struct ProductEnvelope {
    pub status: i64,
    #[serde(default)]
    pub status_verbose: Option<String>,
    #[serde(default)]
    pub product: Option<ProductPayload>,
}

/// The subset of the product record the scan flow consumes.
///
/// Every field is optional upstream; [`ProductPayload::into_facts`] applies
/// the documented fallbacks so downstream code never sees a hole.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_name_en: Option<String>,
    #[serde(default)]
    pub ingredients_text: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub ecoscore_grade: Option<String>,
    #[serde(default)]
    pub food_groups: Option<String>,
    /// Kept loose: key naming and presence vary by product and data source.
    #[serde(default)]
    pub nutriments: serde_json::Value,
}

impl ProductPayload {
    /// Collapse the loosely-populated payload into the always-populated
    /// facts record, normalizing the nutrient map along the way.
    ///
    /// The English product name wins over the generic one when both exist.
    #[must_use]
    pub fn into_facts(self, barcode: &str) -> ProductFacts {
        let (nutrients, units) = normalize_nutrients(&self.nutriments);
        ProductFacts {
            barcode: barcode.to_owned(),
            name: first_non_blank([self.product_name_en, self.product_name])
                .unwrap_or_else(|| ProductFacts::UNNAMED.to_string()),
            ingredients_text: first_non_blank([self.ingredients_text])
                .unwrap_or_else(|| ProductFacts::NO_INGREDIENTS.to_string()),
            serving_size: first_non_blank([self.serving_size]).unwrap_or_default(),
            ecoscore_grade: first_non_blank([self.ecoscore_grade])
                .unwrap_or_else(|| "unknown".to_string()),
            food_groups: first_non_blank([self.food_groups]).unwrap_or_default(),
            nutrients,
            units,
        }
    }
}

fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}
