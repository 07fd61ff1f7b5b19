//! Shrinking correctness properties
//!
//! These properties ensure that shrink sequences only offer simpler values,
//! never offer the input back, and that following them terminates.

use crate::{arbitrary_seed, fast_config, meta_seed};
use ferret::*;
use std::collections::BTreeSet;

/// Enough candidates to exercise structural shrinks without enumerating
/// their full cross products.
const CANDIDATE_PREFIX: usize = 2_000;

/// Known halving chains
pub fn test_natural_shrink_examples() {
    assert_eq!(0u64.shrink().count(), 0);
    assert_eq!(10u64.shrink().collect::<Vec<_>>(), vec![0, 1, 2, 5]);
    assert_eq!(1u64.shrink().collect::<Vec<_>>(), vec![0]);
    println!("✓ Natural shrink examples passed");
}

/// Property: every natural shrink candidate is strictly smaller
pub fn test_natural_shrinks_are_smaller() {
    let prop = for_all(|&n: &u64| n.shrink().all(|candidate| candidate < n));

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Natural shrinks smaller property passed"),
        result => panic!("Natural shrinks smaller property failed: {result}"),
    }
}

/// Property: integer shrink magnitudes are the natural shrinks of `|i|`,
/// each offered with both signs
pub fn test_integer_shrink_magnitudes() {
    let prop = for_all(|&i: &i64| {
        let candidates: Vec<i64> = i.shrink().collect();
        let magnitudes: BTreeSet<u64> = candidates.iter().map(|c| c.unsigned_abs()).collect();
        let expected: BTreeSet<u64> = i.unsigned_abs().shrink().collect();
        let both_signs = magnitudes
            .iter()
            .all(|&m| candidates.contains(&(m as i64)) && candidates.contains(&-(m as i64)));
        magnitudes == expected && both_signs && !candidates.contains(&i)
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Integer shrink magnitudes property passed"),
        result => panic!("Integer shrink magnitudes property failed: {result}"),
    }
}

/// Property: a non-empty list never shrinks to itself
pub fn test_list_shrink_excludes_input() {
    let prop = for_all(|xs: &Vec<u8>| {
        xs.shrink()
            .take(CANDIDATE_PREFIX)
            .all(|candidate| &candidate != xs && candidate.len() <= xs.len())
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ List shrink excludes input property passed"),
        result => panic!("List shrink excludes input property failed: {result}"),
    }

    // Small lists are enumerated completely.
    for xs in [vec![3u8], vec![1, 0], vec![2, 2, 1], vec![0, 5, 0, 1]] {
        assert!(xs.shrink().all(|candidate| candidate != xs));
    }
}

/// Property: a tree never shrinks to itself and never grows
pub fn test_tree_shrink_excludes_input() {
    let prop = for_all(|tree: &BinaryTree<u8>| {
        tree.shrink()
            .take(CANDIDATE_PREFIX)
            .all(|candidate| &candidate != tree && candidate.count_nodes() <= tree.count_nodes())
    });

    let config = fast_config().with_size_limit(6);
    match prop.run_with_seed(&config, meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Tree shrink excludes input property passed"),
        result => panic!("Tree shrink excludes input property failed: {result}"),
    }
}

/// Property: repeatedly taking the first candidate reaches a value with no shrinks
pub fn test_shrinking_convergence() {
    let prop = for_all_gen(arbitrary_seed(), |&seed| {
        let mut current = Vec::<u16>::arbitrary().sample(Size::new(10), seed);
        let max_shrink_steps = 1_000;
        let mut steps = 0;

        while steps < max_shrink_steps {
            match current.shrink().next() {
                Some(candidate) => current = candidate,
                None => break,
            }
            steps += 1;
        }

        steps < max_shrink_steps
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Shrinking convergence property passed"),
        result => panic!("Shrinking convergence property failed: {result}"),
    }
}
