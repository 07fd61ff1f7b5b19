//! End-to-end properties of the runner
//!
//! A failing property must report a counterexample that still fails and
//! that none of its own shrink candidates improve on.

use crate::{fast_config, meta_seed};
use ferret::*;

/// Property: for any threshold, `n < threshold` fails with a local minimum
pub fn test_failing_property_is_minimized() {
    let prop = for_all_gen(Gen::choose_nat(1, 500), |&threshold| {
        let inner = for_all(move |n: &u64| *n < threshold);
        let config = Config::default().with_tests(100).with_size_limit(30);
        match inner.run_with_seed(&config, Seed::from_u64(threshold)) {
            TestResult::Fail {
                counterexample,
                shrinks_performed,
                shrink_steps,
                ..
            } => {
                let minimal: u64 = match counterexample.parse() {
                    Ok(minimal) => minimal,
                    Err(_) => return false,
                };
                minimal >= threshold
                    && minimal.shrink().all(|candidate| candidate < threshold)
                    && shrink_steps.len() == shrinks_performed + 1
            }
            // 30^3 exceeds every threshold, so the last trials must find a failure
            TestResult::Pass { .. } => false,
        }
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Failure minimization property passed"),
        result => panic!("Failure minimization property failed: {result}"),
    }
}

/// Property: a tautology passes and reports exactly `test_limit` trials
pub fn test_passing_property_reports_all_tests() {
    let prop = for_all_gen(Gen::choose(1usize, 60), |&tests| {
        let inner = for_all(|&(n, _): &(i32, bool)| n.wrapping_add(1).wrapping_sub(1) == n);
        let config = Config::default().with_tests(tests);
        let result = inner.run_with_seed(&config, Seed::from_u64(tests as u64));
        result == TestResult::Pass { tests_run: tests }
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Passing property report passed"),
        result => panic!("Passing property report failed: {result}"),
    }
}
