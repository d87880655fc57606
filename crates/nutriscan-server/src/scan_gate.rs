//! Per-user serialization of scan flows.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Single-flight gate keyed by user id.
///
/// Two overlapping scans for the same user would race on the
/// read-modify-upsert of the same counter rows; the gate serializes them
/// while letting different users proceed concurrently. Entries are never
/// evicted — the footprint is one mutex per user seen since startup.
#[derive(Clone, Default)]
pub struct ScanGate {
    locks: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl ScanGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the user's lock, creating it on first use. The guard is held
    /// for the read-modify-upsert span of one scan flow.
    pub async fn acquire(&self, user_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(user_id).or_default())
        };
        lock.lock_owned().await
    }
}
