//! Property-based tests for the ranked skip list.
//!
//! Every mutation also runs the list's internal invariant checker in debug
//! builds, so span bookkeeping is verified after each step as well as by
//! the rank properties below.

use proptest::prelude::*;
use kaleido::collections::SkipList;

// =============================================================================
// Test helpers
// =============================================================================

/// A random mutation. Small key spaces make hits and duplicates common.
#[derive(Clone, Debug)]
enum Op {
    Insert { score: i8, value: u8 },
    Delete { score: i8, value: u8 },
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-8i8..8, 0u8..4).prop_map(|(score, value)| Op::Insert { score, value }),
        2 => (-8i8..8, 0u8..4).prop_map(|(score, value)| Op::Delete { score, value }),
    ]
}

/// Sorted multiset model of what the list should hold.
fn apply(list: &mut SkipList<u8>, model: &mut Vec<(i8, u8)>, op: &Op) -> bool {
    match *op {
        Op::Insert { score, value } => {
            list.insert(score as f64, value);
            let at = model.partition_point(|e| *e < (score, value));
            model.insert(at, (score, value));
            true
        }
        Op::Delete { score, value } => {
            let removed = list.delete(score as f64, &value);
            if let Some(at) = model.iter().position(|e| *e == (score, value)) {
                model.remove(at);
            }
            removed
        }
    }
}

fn entries(list: &SkipList<u8>) -> Vec<(i8, u8)> {
    list.iter().map(|n| (n.score() as i8, *n.value())).collect()
}

// =============================================================================
// Ordering and length
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Traversal always matches a sorted model and len() tracks it.
    #[test]
    fn matches_sorted_model(seed in any::<u64>(), ops in prop::collection::vec(arbitrary_op(), 1..120)) {
        let mut list = SkipList::seeded(seed);
        let mut model = Vec::new();

        for op in &ops {
            let before = model.len();
            let present = match op {
                Op::Delete { score, value } => model.contains(&(*score, *value)),
                Op::Insert { .. } => true,
            };
            let changed = apply(&mut list, &mut model, op);
            prop_assert_eq!(changed, present);
            match op {
                Op::Insert { .. } => prop_assert_eq!(model.len(), before + 1),
                Op::Delete { .. } if present => prop_assert_eq!(model.len(), before - 1),
                Op::Delete { .. } => prop_assert_eq!(model.len(), before),
            }
            prop_assert_eq!(list.len(), model.len());
        }

        prop_assert_eq!(entries(&list), model.clone());
        let mut backward: Vec<_> = list.iter().rev().map(|n| (n.score() as i8, *n.value())).collect();
        backward.reverse();
        prop_assert_eq!(backward, model);
    }

    /// A failed delete leaves the list exactly as it was.
    #[test]
    fn failed_delete_changes_nothing(seed in any::<u64>(), ops in prop::collection::vec(arbitrary_op(), 0..60)) {
        let mut list = SkipList::seeded(seed);
        let mut model = Vec::new();
        for op in &ops {
            apply(&mut list, &mut model, op);
        }

        let before = entries(&list);
        let level = list.level();
        // Scores never exceed 7, so this key is always absent.
        prop_assert!(!list.delete(100.0, &0));
        prop_assert_eq!(entries(&list), before);
        prop_assert_eq!(list.level(), level);
    }
}

// =============================================================================
// Rank properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// rank and element_at_rank are inverse over distinct keys.
    #[test]
    fn rank_bijection(seed in any::<u64>(), keys in prop::collection::btree_set((-1000i32..1000, 0u8..8), 0..200)) {
        let mut list = SkipList::seeded(seed);
        for &(score, value) in &keys {
            list.insert(score as f64, value);
        }

        for (pos, &(score, value)) in keys.iter().enumerate() {
            let rank = pos as u64 + 1;
            prop_assert_eq!(list.rank(score as f64, &value), rank);
            let node = list.element_at_rank(rank).unwrap();
            prop_assert_eq!((node.score(), *node.value()), (score as f64, value));
        }
        prop_assert!(list.element_at_rank(keys.len() as u64 + 1).is_none());
    }

    /// Search finds a key until its last copy is deleted.
    #[test]
    fn search_round_trip(seed in any::<u64>(), keys in prop::collection::vec((-50i32..50, 0u8..3), 1..100)) {
        let mut list = SkipList::seeded(seed);
        for &(score, value) in &keys {
            list.insert(score as f64, value);
        }
        for &(score, value) in &keys {
            prop_assert!(list.search(score as f64, &value).is_some());
        }

        let mut remaining = keys.clone();
        for &(score, value) in &keys {
            prop_assert!(list.delete(score as f64, &value));
            let at = remaining.iter().position(|k| *k == (score, value)).unwrap();
            remaining.remove(at);
            let still_there = remaining.contains(&(score, value));
            prop_assert_eq!(list.search(score as f64, &value).is_some(), still_there);
            prop_assert_eq!(list.rank(score as f64, &value) != 0, still_there);
        }
        prop_assert!(list.is_empty());
        prop_assert_eq!(list.level(), 1);
    }

    /// With duplicates, rank points at the forward-most copy: one past the
    /// number of strictly smaller keys.
    #[test]
    fn rank_counts_smaller_keys(seed in any::<u64>(), keys in prop::collection::vec((0i32..10, 0u8..2), 1..80)) {
        let mut list = SkipList::seeded(seed);
        for &(score, value) in &keys {
            list.insert(score as f64, value);
        }
        for &(score, value) in &keys {
            let smaller = keys.iter().filter(|k| **k < (score, value)).count() as u64;
            prop_assert_eq!(list.rank(score as f64, &value), smaller + 1);
        }
    }
}
