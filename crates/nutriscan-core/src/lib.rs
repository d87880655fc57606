use thiserror::Error;

mod app_config;
mod badges;
mod challenges;
mod config;
mod notifications;
mod nutrients;
mod preferences;
mod product;
mod progress;

pub use app_config::{AppConfig, Environment};
pub use badges::{
    badge_label, evaluate_badges, unlock_badge, BadgeRule, BadgeSlots, BadgeTrigger, BADGE_RULES,
    BADGE_SLOTS,
};
pub use challenges::{
    ChallengeDefinition, ChallengeEvaluator, NutrientThresholdEvaluator, SlotEvaluation,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use notifications::{
    Notification, NotificationKind, NotificationSequence, DISPLAY_WINDOW_MS,
};
pub use nutrients::{normalize_nutrients, to_comparable, NutrientFacts, NutrientUnits};
pub use preferences::{DietOption, NutrientEffect, NutrientLimit, Preferences};
pub use product::ProductFacts;
pub use progress::{reconcile_scan, ChallengeProgress, ScanOutcome, CHALLENGE_SLOTS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
