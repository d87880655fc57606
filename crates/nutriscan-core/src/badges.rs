//! Badge threshold engine.
//!
//! A strictly ordered rule table reacting to the incremented scan count and
//! the aggregate completed-challenge counter. One pass, first qualifying rule
//! wins: at most one badge unlocks per scan event, and unlocked badges are
//! never re-locked.

/// Number of badge slots in a profile. Slot index equals badge id.
pub const BADGE_SLOTS: usize = 20;

/// A profile's badge array: slot `i` holds `i` once badge `i` is unlocked.
pub type BadgeSlots = [Option<i16>; BADGE_SLOTS];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTrigger {
    ScanCount(i32),
    ChallengesCompleted(i32),
}

#[derive(Debug, Clone, Copy)]
pub struct BadgeRule {
    pub trigger: BadgeTrigger,
    pub badge_id: i16,
}

/// Unlock rules in evaluation priority order: scan-count tiers first, then
/// completed-challenge tiers.
pub const BADGE_RULES: [BadgeRule; 19] = [
    BadgeRule { trigger: BadgeTrigger::ScanCount(1), badge_id: 1 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(5), badge_id: 2 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(10), badge_id: 3 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(25), badge_id: 4 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(50), badge_id: 5 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(75), badge_id: 6 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(100), badge_id: 7 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(150), badge_id: 8 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(200), badge_id: 9 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(250), badge_id: 10 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(500), badge_id: 11 },
    BadgeRule { trigger: BadgeTrigger::ScanCount(1000), badge_id: 12 },
    BadgeRule { trigger: BadgeTrigger::ChallengesCompleted(1), badge_id: 13 },
    BadgeRule { trigger: BadgeTrigger::ChallengesCompleted(3), badge_id: 14 },
    BadgeRule { trigger: BadgeTrigger::ChallengesCompleted(5), badge_id: 15 },
    BadgeRule { trigger: BadgeTrigger::ChallengesCompleted(10), badge_id: 16 },
    BadgeRule { trigger: BadgeTrigger::ChallengesCompleted(15), badge_id: 17 },
    BadgeRule { trigger: BadgeTrigger::ChallengesCompleted(25), badge_id: 18 },
    BadgeRule { trigger: BadgeTrigger::ChallengesCompleted(50), badge_id: 19 },
];

/// Evaluate the rule table against the post-increment `scan_count` and the
/// post-reconciliation `completed` counter. Returns the id of the first rule
/// whose badge is still locked and whose threshold is met, or `None`.
#[must_use]
pub fn evaluate_badges(scan_count: i32, completed: i32, slots: &BadgeSlots) -> Option<i16> {
    BADGE_RULES
        .iter()
        .find(|rule| {
            let met = match rule.trigger {
                BadgeTrigger::ScanCount(threshold) => scan_count >= threshold,
                BadgeTrigger::ChallengesCompleted(threshold) => completed >= threshold,
            };
            met && !is_unlocked(slots, rule.badge_id)
        })
        .map(|rule| rule.badge_id)
}

/// Mark `badge_id` unlocked in its slot. Out-of-range ids are ignored.
pub fn unlock_badge(slots: &mut BadgeSlots, badge_id: i16) {
    if let Ok(index) = usize::try_from(badge_id) {
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(badge_id);
        }
    }
}

fn is_unlocked(slots: &BadgeSlots, badge_id: i16) -> bool {
    usize::try_from(badge_id)
        .ok()
        .and_then(|index| slots.get(index))
        .is_some_and(Option::is_some)
}

/// Display label for a badge id.
#[must_use]
pub fn badge_label(badge_id: i16) -> &'static str {
    match badge_id {
        1 => "First Scan",
        2 => "Warming Up",
        3 => "Label Reader",
        4 => "Shelf Browser",
        5 => "Aisle Regular",
        6 => "Barcode Hound",
        7 => "Century Scanner",
        8 => "Label Sleuth",
        9 => "Shelf Veteran",
        10 => "Aisle Master",
        11 => "Barcode Legend",
        12 => "Scanner Immortal",
        13 => "First Challenge",
        14 => "Challenge Trio",
        15 => "High Five",
        16 => "Ten Strong",
        17 => "Weekly Warrior",
        18 => "Challenge Devotee",
        19 => "Challenge Legend",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_slots() -> BadgeSlots {
        [None; BADGE_SLOTS]
    }

    #[test]
    fn first_scan_unlocks_badge_one() {
        assert_eq!(evaluate_badges(1, 0, &empty_slots()), Some(1));
    }

    #[test]
    fn scan_count_five_with_slot_two_empty_unlocks_badge_two() {
        let mut slots = empty_slots();
        unlock_badge(&mut slots, 1);
        assert_eq!(evaluate_badges(5, 0, &slots), Some(2));
    }

    #[test]
    fn at_most_one_badge_per_scan_even_when_many_qualify() {
        // A fresh profile jumping straight to a large count still unlocks
        // only the first rule in priority order.
        assert_eq!(evaluate_badges(100, 10, &empty_slots()), Some(1));
    }

    #[test]
    fn already_unlocked_badges_are_skipped() {
        let mut slots = empty_slots();
        for id in 1..=3 {
            unlock_badge(&mut slots, id);
        }
        assert_eq!(evaluate_badges(100, 0, &slots), Some(4));
    }

    #[test]
    fn completed_tiers_fire_after_scan_tiers_are_exhausted() {
        let mut slots = empty_slots();
        unlock_badge(&mut slots, 1);
        unlock_badge(&mut slots, 2);
        // scan_count 7 satisfies no locked scan tier; completed 1 reaches
        // the first challenge tier.
        assert_eq!(evaluate_badges(7, 1, &slots), Some(13));
    }

    #[test]
    fn no_rule_qualifying_yields_none() {
        let mut slots = empty_slots();
        unlock_badge(&mut slots, 1);
        assert_eq!(evaluate_badges(2, 0, &slots), None);
    }

    #[test]
    fn unlock_is_monotonic_and_idempotent() {
        let mut slots = empty_slots();
        unlock_badge(&mut slots, 5);
        unlock_badge(&mut slots, 5);
        assert_eq!(slots[5], Some(5));
        assert_eq!(slots.iter().flatten().count(), 1);
    }

    #[test]
    fn out_of_range_ids_are_ignored() {
        let mut slots = empty_slots();
        unlock_badge(&mut slots, -1);
        unlock_badge(&mut slots, 20);
        assert_eq!(slots, empty_slots());
    }

    #[test]
    fn every_rule_badge_fits_in_the_slot_array() {
        for rule in &BADGE_RULES {
            let index = usize::try_from(rule.badge_id).expect("badge id is non-negative");
            assert!(index < BADGE_SLOTS, "badge {} out of range", rule.badge_id);
        }
    }

    #[test]
    fn rule_badges_have_labels() {
        for rule in &BADGE_RULES {
            assert_ne!(badge_label(rule.badge_id), "Unknown");
        }
    }
}
