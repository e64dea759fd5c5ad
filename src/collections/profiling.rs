//! Simple profiling counters for understanding skip list hot paths.
//!
//! Counters are process-wide and updated with relaxed ordering, so
//! concurrent readers only ever see approximate totals.

use std::sync::atomic::{AtomicU64, Ordering};

pub static DESCENT_STEPS: AtomicU64 = AtomicU64::new(0);
pub static NODES_INSERTED: AtomicU64 = AtomicU64::new(0);
pub static NODES_REMOVED: AtomicU64 = AtomicU64::new(0);
pub static LEVEL_PROMOTIONS: AtomicU64 = AtomicU64::new(0);

/// One forward hop during a descent.
#[inline]
pub fn descent_step() {
    DESCENT_STEPS.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn node_inserted() {
    NODES_INSERTED.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn node_removed() {
    NODES_REMOVED.fetch_add(1, Ordering::Relaxed);
}

/// An insert raised the list's level.
#[inline]
pub fn level_promoted() {
    LEVEL_PROMOTIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn reset() {
    DESCENT_STEPS.store(0, Ordering::Relaxed);
    NODES_INSERTED.store(0, Ordering::Relaxed);
    NODES_REMOVED.store(0, Ordering::Relaxed);
    LEVEL_PROMOTIONS.store(0, Ordering::Relaxed);
}

pub fn report() -> String {
    let steps = DESCENT_STEPS.load(Ordering::Relaxed);
    let inserted = NODES_INSERTED.load(Ordering::Relaxed);
    let removed = NODES_REMOVED.load(Ordering::Relaxed);
    let promotions = LEVEL_PROMOTIONS.load(Ordering::Relaxed);
    let ops = inserted + removed;
    let per_op = if ops > 0 { steps as f64 / ops as f64 } else { 0.0 };

    format!(
        "Descent: {} steps ({:.1}/mutation), Inserted: {}, Removed: {}, Promotions: {}",
        steps, per_op, inserted, removed, promotions
    )
}
