//! Property-based tests for allocation tree invariants.
//!
//! These tests verify properties that should hold for every valid tree:
//! - Flattened weights sum to exactly 1
//! - Exposures sum to exactly 1 and cover every leaf
//! - Encoding then decoding yields an equal tree
//! - Leaf collection matches the tickers reachable by flattening

use folio_core::config::DEFAULT_MAX_DEPTH;
use folio_core::prelude::*;
use folio_core::types::total;
use std::collections::HashSet;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Generates a valid tree of the given depth from a seed.
///
/// Each allocation gets 1-5 children whose weights are whole hundredths
/// summing to 100; roughly a third of the children are sub-allocations
/// while depth remains. Tickers are drawn from a small pool so the same
/// instrument often appears on several paths.
fn generate_tree(seed: u64, depth: usize) -> Allocation {
    generate_allocation(seed, depth, &format!("P{}", seed % 97))
}

fn generate_allocation(seed: u64, depth: usize, name: &str) -> Allocation {
    let count = 1 + (simple_hash(seed, 0) % 5) as usize;
    let weights = split_hundred(seed, count);

    let mut builder = Allocation::builder(name);
    for (i, hundredths) in weights.into_iter().enumerate() {
        let hash = simple_hash(seed, i as u64 + 1);
        let weight = Weight::new(Decimal::new(hundredths as i64, 2)).unwrap();

        let child: Node = if depth > 0 && hash % 3 == 0 {
            generate_allocation(hash, depth - 1, &format!("S{}", i)).into()
        } else {
            Instrument::new(format!("T{}_{}", hash % 12, i)).unwrap().into()
        };
        builder = builder.child(child, weight);
    }
    builder.build().unwrap()
}

/// Generates a tree exactly `depth` levels deep along a single spine.
///
/// Most levels hold only the next level at weight 1; a few split half of
/// their value off to a side instrument, capped so the flattened weights
/// stay well inside decimal precision.
fn generate_spine(seed: u64, depth: usize) -> Node {
    let mut node = Node::from(Instrument::new(format!("END{}", seed)).unwrap());
    let mut splits = 0;
    for level in (1..depth).rev() {
        let mut builder = Allocation::builder(format!("L{}", level));
        if splits < 20 && simple_hash(seed, level as u64) % 8 == 0 {
            splits += 1;
            let side = Instrument::new(format!("X{}", level)).unwrap();
            builder = builder.child_str(node, "0.5").child_str(side, "0.5");
        } else {
            builder = builder.child_str(node, "1");
        }
        node = builder.build().unwrap().into();
    }
    node
}

/// Splits 100 into `count` positive parts.
fn split_hundred(seed: u64, count: usize) -> Vec<u64> {
    let mut parts = Vec::with_capacity(count);
    let mut remaining = 100u64;
    for i in 0..count - 1 {
        let left_for_others = (count - 1 - i) as u64;
        let max = remaining - left_for_others;
        let part = 1 + simple_hash(seed, 100 + i as u64) % max;
        parts.push(part);
        remaining -= part;
    }
    parts.push(remaining);
    parts
}

/// Simple deterministic hash for test data generation.
fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

// =============================================================================
// PROPERTY: FLATTENED WEIGHTS SUM TO 1
// =============================================================================

#[test]
fn property_flatten_sums_to_one() {
    for seed in 0..50 {
        for depth in [0, 1, 3, 5] {
            let tree = generate_tree(seed, depth);
            let flat = tree.flatten();
            assert_eq!(
                total(flat.values()),
                Decimal::ONE,
                "flatten should sum to 1 for seed={}, depth={}",
                seed,
                depth
            );
            assert_eq!(flat.len(), tree.leaf_count());
        }
    }
}

#[test]
fn property_flatten_paths_start_with_root_name() {
    for seed in 0..20 {
        let tree = generate_tree(seed, 3);
        let prefix = format!("{}{}", tree.name(), PATH_SEPARATOR);
        assert!(tree.flatten().keys().all(|path| path.starts_with(&prefix)));
    }
}

// =============================================================================
// PROPERTY: EXPOSURES
// =============================================================================

#[test]
fn property_exposures_sum_to_one() {
    for seed in 0..50 {
        let tree = generate_tree(seed, 4);
        let exposures = tree.exposures();

        assert_eq!(exposures.values().copied().sum::<Decimal>(), Decimal::ONE);
        assert_eq!(exposures.len(), tree.all_leaf_instruments().len());
    }
}

// =============================================================================
// PROPERTY: LEAVES MATCH FLATTEN
// =============================================================================

#[test]
fn property_leaves_match_flattened_tickers() {
    for seed in 0..50 {
        let tree = generate_tree(seed, 4);

        let from_paths: HashSet<String> = tree
            .flatten()
            .keys()
            .filter_map(|path| path.rsplit(PATH_SEPARATOR).next())
            .map(str::to_string)
            .collect();
        let leaves: HashSet<String> = tree
            .all_leaf_instruments()
            .into_iter()
            .map(|instrument| instrument.ticker().to_string())
            .collect();

        assert_eq!(from_paths, leaves, "seed={}", seed);
    }
}

// =============================================================================
// PROPERTY: ROUND TRIP
// =============================================================================

#[test]
fn property_round_trip() {
    let pretty = CodecConfig::default().with_pretty_json(true);

    for seed in 0..50 {
        for depth in [0, 2, 5] {
            let node = Node::from(generate_tree(seed, depth));

            let compact = Node::from_text(&node.to_text()).unwrap();
            assert_eq!(compact, node, "compact round trip, seed={}", seed);

            let indented = Node::from_text(&node.to_text_with(&pretty)).unwrap();
            assert_eq!(indented, node, "pretty round trip, seed={}", seed);

            let structured = Node::from_structured(&node.to_structured()).unwrap();
            assert_eq!(structured, node);
        }
    }
}

#[test]
fn property_deep_round_trip_up_to_max_depth() {
    let compact = CodecConfig::default();
    let pretty = compact.with_pretty_json(true);

    for seed in 0..5 {
        for depth in [43, 64, 100, DEFAULT_MAX_DEPTH] {
            let node = generate_spine(seed, depth);
            assert_eq!(node.depth(), depth);

            let decoded = Node::from_text_with(&node.to_text_with(&compact), &compact).unwrap();
            assert_eq!(decoded, node, "compact, seed={}, depth={}", seed, depth);

            let decoded = Node::from_text_with(&node.to_text_with(&pretty), &pretty).unwrap();
            assert_eq!(decoded, node, "pretty, seed={}, depth={}", seed, depth);

            let flat = node.as_allocation().unwrap().flatten();
            assert_eq!(total(flat.values()), Decimal::ONE);
        }
    }
}

#[test]
fn property_depth_bounds() {
    for seed in 0..30 {
        for depth in [0, 2, 4] {
            let tree = generate_tree(seed, depth);
            assert!(tree.depth() >= 2);
            assert!(tree.depth() <= depth + 2);
        }
    }
}
