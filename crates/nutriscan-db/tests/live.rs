//! Live integration tests for nutriscan-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/nutriscan-db/`), so `"../../migrations"` resolves to the
//! workspace migration directory.

use uuid::Uuid;

use nutriscan_core::{ChallengeProgress, Preferences, NutrientEffect, NutrientLimit, BADGE_SLOTS};
use nutriscan_db::{
    get_challenge_progress, get_or_create_challenge_progress, get_or_create_profile,
    get_preferences, get_profile, list_challenge_definitions, upsert_challenge_progress,
    upsert_preferences, upsert_profile,
};

#[sqlx::test(migrations = "../../migrations")]
async fn seeded_challenge_definitions_are_listed_in_slot_order(pool: sqlx::PgPool) {
    let defs = list_challenge_definitions(&pool)
        .await
        .expect("list definitions");
    assert_eq!(defs.len(), 5);
    for (slot, def) in defs.iter().enumerate() {
        assert_eq!(usize::from(def.id), slot);
    }
    assert_eq!(defs[0].label(), "Eat Fiber");
}

#[sqlx::test(migrations = "../../migrations")]
async fn first_observation_zero_creates_challenge_row(pool: sqlx::PgPool) {
    let user_id = Uuid::new_v4();
    assert!(get_challenge_progress(&pool, user_id)
        .await
        .expect("read")
        .is_none());

    let row = get_or_create_challenge_progress(&pool, user_id)
        .await
        .expect("create");
    assert_eq!(row.progress(), ChallengeProgress::default());

    // Second call returns the same row instead of resetting it.
    upsert_challenge_progress(
        &pool,
        user_id,
        &ChallengeProgress {
            counts: [1, 0, 0, 0, 0],
            completed: 0,
        },
    )
    .await
    .expect("upsert");
    let row = get_or_create_challenge_progress(&pool, user_id)
        .await
        .expect("re-read");
    assert_eq!(row.progress().counts, [1, 0, 0, 0, 0]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn challenge_progress_upsert_round_trips(pool: sqlx::PgPool) {
    let user_id = Uuid::new_v4();
    let progress = ChallengeProgress {
        counts: [3, 1, 4, 1, 5],
        completed: 2,
    };
    upsert_challenge_progress(&pool, user_id, &progress)
        .await
        .expect("upsert");

    let row = get_challenge_progress(&pool, user_id)
        .await
        .expect("read")
        .expect("row exists");
    assert_eq!(row.progress(), progress);
}

#[sqlx::test(migrations = "../../migrations")]
async fn profile_upsert_round_trips_badges(pool: sqlx::PgPool) {
    let user_id = Uuid::new_v4();
    let created = get_or_create_profile(&pool, user_id).await.expect("create");
    assert_eq!(created.scan_count, 0);
    assert!(created.badge_slots().iter().all(Option::is_none));

    let mut slots = created.badge_slots();
    slots[1] = Some(1);
    slots[2] = Some(2);
    upsert_profile(&pool, user_id, 5, &slots)
        .await
        .expect("upsert");

    let row = get_profile(&pool, user_id)
        .await
        .expect("read")
        .expect("row exists");
    assert_eq!(row.scan_count, 5);
    let read_back = row.badge_slots();
    assert_eq!(read_back[1], Some(1));
    assert_eq!(read_back[2], Some(2));
    assert_eq!(read_back.iter().flatten().count(), 2);
    assert_eq!(read_back.len(), BADGE_SLOTS);
}

#[sqlx::test(migrations = "../../migrations")]
async fn preferences_absent_until_saved_then_round_trip(pool: sqlx::PgPool) {
    let user_id = Uuid::new_v4();
    assert!(get_preferences(&pool, user_id)
        .await
        .expect("read")
        .is_none());

    let preferences = Preferences {
        limits: vec![NutrientLimit {
            name: "sodium".to_string(),
            effect: NutrientEffect::Below,
            limit: 2.0,
            unit: "g".to_string(),
        }],
        diets: vec![],
    };
    upsert_preferences(&pool, user_id, &preferences)
        .await
        .expect("upsert");

    let read_back = get_preferences(&pool, user_id)
        .await
        .expect("read")
        .expect("preferences exist");
    assert_eq!(read_back, preferences);
}
