//! Pure reconciliation of one scan event against weekly-challenge state.
//!
//! The function here is deliberately side-effect free: it maps the prior
//! persisted state plus one product reading to the next state and the popup
//! to show. Persistence and remote calls stay with the caller.

use serde::{Deserialize, Serialize};

use crate::challenges::{ChallengeDefinition, ChallengeEvaluator};
use crate::notifications::{Notification, NotificationKind, NotificationSequence};
use crate::product::ProductFacts;

/// Number of weekly challenge slots.
pub const CHALLENGE_SLOTS: usize = 5;

/// Per-user weekly challenge counters plus the aggregate completed counter.
///
/// `completed` accumulates completion events over all time; it is never
/// recomputed from the five slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeProgress {
    pub counts: [i32; CHALLENGE_SLOTS],
    pub completed: i32,
}

/// Result of reconciling one scan: the next state to persist and the
/// challenge popup to show, if any.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub progress: ChallengeProgress,
    pub notification: Option<Notification>,
}

/// Reconcile one scan event.
///
/// Each active definition is evaluated against the product's normalized
/// nutrients; contributions accumulate into the matching slot and the
/// aggregate `completed` advances by the number of slots that crossed their
/// target this scan.
///
/// At most one notification is emitted: a single ordered pass picks the
/// first slot (index order) whose counter advanced by exactly 1.
#[must_use]
pub fn reconcile_scan(
    prior: &ChallengeProgress,
    defs: &[ChallengeDefinition],
    evaluator: &dyn ChallengeEvaluator,
    facts: &ProductFacts,
    seq: &NotificationSequence,
) -> ScanOutcome {
    let mut by_slot: [Option<&ChallengeDefinition>; CHALLENGE_SLOTS] = [None; CHALLENGE_SLOTS];
    for def in defs {
        if let Some(entry) = by_slot.get_mut(usize::from(def.id)) {
            *entry = Some(def);
        }
    }

    let mut next = prior.clone();
    let mut contributions = [0i32; CHALLENGE_SLOTS];
    for (slot, def) in by_slot.iter().enumerate() {
        let Some(def) = def else { continue };
        let eval = evaluator.evaluate(def, prior.counts[slot], &facts.nutrients, &facts.units);
        contributions[slot] = eval.contribution;
        next.counts[slot] += eval.contribution;
        next.completed += i32::from(eval.completed_now);
    }

    let notification = by_slot
        .iter()
        .enumerate()
        .filter_map(|(slot, def)| def.map(|def| (slot, def)))
        .find(|(slot, _)| contributions[*slot] == 1)
        .map(|(slot, def)| {
            Notification::new(
                seq,
                NotificationKind::ChallengeProgressed {
                    label: def.label().to_string(),
                    count_pre: prior.counts[slot],
                    count_post: next.counts[slot],
                    count_total: def.target_count(),
                },
            )
        });

    ScanOutcome {
        progress: next,
        notification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenges::NutrientThresholdEvaluator;
    use crate::nutrients::{NutrientFacts, NutrientUnits};

    fn def(id: u8, name: &str, criteria: &str, value: &str) -> ChallengeDefinition {
        ChallengeDefinition {
            id,
            name: name.to_string(),
            criteria: criteria.to_string(),
            value: value.to_string(),
        }
    }

    fn facts(nutrients: NutrientFacts) -> ProductFacts {
        ProductFacts {
            barcode: "0000000000000".to_string(),
            name: "Test product".to_string(),
            ingredients_text: "test".to_string(),
            serving_size: "100 g".to_string(),
            ecoscore_grade: "b".to_string(),
            food_groups: "en:cereals".to_string(),
            nutrients,
            units: NutrientUnits::default(),
        }
    }

    fn fiber_and_protein_defs() -> Vec<ChallengeDefinition> {
        vec![
            def(0, "10#Eat Fiber", "fiber", "6#g"),
            def(1, "7#Protein Push", "proteins", "10#g"),
        ]
    }

    #[test]
    fn qualifying_scan_advances_the_slot_by_one() {
        let prior = ChallengeProgress::default();
        let outcome = reconcile_scan(
            &prior,
            &fiber_and_protein_defs(),
            &NutrientThresholdEvaluator,
            &facts(NutrientFacts {
                fiber: 8.0,
                ..NutrientFacts::default()
            }),
            &NotificationSequence::new(),
        );
        assert_eq!(outcome.progress.counts, [1, 0, 0, 0, 0]);
        assert_eq!(outcome.progress.completed, 0);
    }

    #[test]
    fn crossing_nine_to_ten_emits_exactly_one_notification() {
        let prior = ChallengeProgress {
            counts: [9, 0, 0, 0, 0],
            completed: 0,
        };
        let outcome = reconcile_scan(
            &prior,
            &fiber_and_protein_defs(),
            &NutrientThresholdEvaluator,
            &facts(NutrientFacts {
                fiber: 8.0,
                ..NutrientFacts::default()
            }),
            &NotificationSequence::new(),
        );
        assert_eq!(outcome.progress.counts[0], 10);
        assert_eq!(outcome.progress.completed, 1);

        let notification = outcome.notification.expect("one notification expected");
        assert_eq!(
            notification.kind,
            NotificationKind::ChallengeProgressed {
                label: "Eat Fiber".to_string(),
                count_pre: 9,
                count_post: 10,
                count_total: 10,
            }
        );
    }

    #[test]
    fn only_the_first_advancing_slot_notifies() {
        let prior = ChallengeProgress::default();
        let outcome = reconcile_scan(
            &prior,
            &fiber_and_protein_defs(),
            &NutrientThresholdEvaluator,
            &facts(NutrientFacts {
                fiber: 8.0,
                proteins: 12.0,
                ..NutrientFacts::default()
            }),
            &NotificationSequence::new(),
        );
        // Both slots advanced, but the ordered pass stops at slot 0.
        assert_eq!(outcome.progress.counts, [1, 1, 0, 0, 0]);
        let notification = outcome.notification.expect("one notification expected");
        assert!(matches!(
            notification.kind,
            NotificationKind::ChallengeProgressed { ref label, .. } if label == "Eat Fiber"
        ));
    }

    #[test]
    fn slot_order_wins_even_when_defs_arrive_unsorted() {
        let mut defs = fiber_and_protein_defs();
        defs.reverse();
        let outcome = reconcile_scan(
            &ChallengeProgress::default(),
            &defs,
            &NutrientThresholdEvaluator,
            &facts(NutrientFacts {
                fiber: 8.0,
                proteins: 12.0,
                ..NutrientFacts::default()
            }),
            &NotificationSequence::new(),
        );
        let notification = outcome.notification.expect("one notification expected");
        assert!(matches!(
            notification.kind,
            NotificationKind::ChallengeProgressed { ref label, .. } if label == "Eat Fiber"
        ));
    }

    #[test]
    fn non_qualifying_scan_changes_nothing() {
        let prior = ChallengeProgress {
            counts: [3, 2, 0, 0, 0],
            completed: 1,
        };
        let outcome = reconcile_scan(
            &prior,
            &fiber_and_protein_defs(),
            &NutrientThresholdEvaluator,
            &facts(NutrientFacts::default()),
            &NotificationSequence::new(),
        );
        assert_eq!(outcome.progress, prior);
        assert!(outcome.notification.is_none());
    }

    #[test]
    fn completed_is_cumulative_across_scans() {
        let prior = ChallengeProgress {
            counts: [9, 6, 0, 0, 0],
            completed: 4,
        };
        let outcome = reconcile_scan(
            &prior,
            &fiber_and_protein_defs(),
            &NutrientThresholdEvaluator,
            &facts(NutrientFacts {
                fiber: 8.0,
                proteins: 12.0,
                ..NutrientFacts::default()
            }),
            &NotificationSequence::new(),
        );
        // Both slots crossed their targets this scan: 10/10 and 7/7.
        assert_eq!(outcome.progress.counts, [10, 7, 0, 0, 0]);
        assert_eq!(outcome.progress.completed, 6);
    }

    #[test]
    fn out_of_range_definition_ids_are_ignored() {
        let defs = vec![def(7, "5#Ghost", "fiber", "1#g")];
        let outcome = reconcile_scan(
            &ChallengeProgress::default(),
            &defs,
            &NutrientThresholdEvaluator,
            &facts(NutrientFacts {
                fiber: 8.0,
                ..NutrientFacts::default()
            }),
            &NotificationSequence::new(),
        );
        assert_eq!(outcome.progress, ChallengeProgress::default());
        assert!(outcome.notification.is_none());
    }
}
