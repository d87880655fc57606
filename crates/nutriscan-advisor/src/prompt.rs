//! Prompt assembly for the product assessment request.

use std::fmt::Write as _;

use nutriscan_core::{NutrientEffect, Preferences, ProductFacts};

use crate::client::ChatMessage;

const SYSTEM_PROMPT: &str = "You are a nutrition assistant inside a barcode-scanning app. \
Given the facts of a scanned product and the user's dietary preferences, say in plain text, \
in at most three short sentences, how well the product fits those preferences and what to \
watch out for. Do not repeat the raw numbers back unless one of them is the reason.";

/// Build the chat messages for one assessment request.
#[must_use]
pub fn build_messages(facts: &ProductFacts, preferences: &Preferences) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: user_content(facts, preferences),
        },
    ]
}

fn user_content(facts: &ProductFacts, preferences: &Preferences) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Product: {}", facts.name);
    let _ = writeln!(out, "Ingredients: {}", facts.ingredients_text);
    let _ = writeln!(out, "Eco-score: {}", facts.ecoscore_grade);
    let _ = writeln!(out, "Food groups: {}", facts.food_groups);

    out.push_str("Nutrients:\n");
    for (label, value, unit) in nutrient_lines(facts) {
        let _ = writeln!(out, "- {label}: {value} {unit}");
    }

    if !preferences.limits.is_empty() {
        out.push_str("Nutrient preferences:\n");
        for limit in &preferences.limits {
            let direction = match limit.effect {
                NutrientEffect::Ignore => "ignore",
                NutrientEffect::Above => "at least",
                NutrientEffect::Below => "at most",
            };
            let _ = writeln!(
                out,
                "- {}: {direction} {} {}",
                limit.name, limit.limit, limit.unit
            );
        }
    }
    if !preferences.diets.is_empty() {
        out.push_str("Diets:\n");
        for diet in &preferences.diets {
            let _ = writeln!(out, "- {} ({})", diet.name, diet.details.join(", "));
        }
    }
    out
}

fn nutrient_lines(facts: &ProductFacts) -> [(&'static str, f64, &str); 14] {
    let n = &facts.nutrients;
    let u = &facts.units;
    [
        ("energy", n.energy_kcal, &u.energy_kcal),
        ("fat", n.fat, &u.fat),
        ("saturated fat", n.saturated_fat, &u.saturated_fat),
        ("trans fat", n.trans_fat, &u.trans_fat),
        ("cholesterol", n.cholesterol, &u.cholesterol),
        ("carbohydrates", n.carbohydrates, &u.carbohydrates),
        ("sugars", n.sugars, &u.sugars),
        ("fiber", n.fiber, &u.fiber),
        ("proteins", n.proteins, &u.proteins),
        ("potassium", n.potassium, &u.potassium),
        ("salt", n.salt, &u.salt),
        ("sodium", n.sodium, &u.sodium),
        ("iron", n.iron, &u.iron),
        ("calcium", n.calcium, &u.calcium),
    ]
}
