//! Edge case properties
//!
//! Degenerate ranges, the zero size and the documented contract violations.

use crate::{arbitrary_seed, fast_config, meta_seed};
use ferret::*;
use std::panic;

/// Property: a range with `lo == hi` always yields `lo`
pub fn test_single_element_ranges() {
    let input = Gen::<i32>::choose_any().bind(|x| arbitrary_seed().map(move |seed| (x, seed)));
    let prop = for_all_gen(input, |&(x, seed)| {
        let (value, _) = seed.next_in_range(x, x);
        Gen::choose(x, x).sample(Size::new(50), seed) == x && value == x
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Single element range property passed"),
        result => panic!("Single element range property failed: {result}"),
    }

    assert_eq!(Gen::choose(u64::MAX, u64::MAX).sample(Size::new(0), meta_seed()), u64::MAX);
    assert_eq!(Gen::choose(i8::MIN, i8::MIN).sample(Size::new(0), meta_seed()), i8::MIN);
}

/// Property: size 0 gives the simplest value of every sized instance
pub fn test_zero_size() {
    let prop = for_all_gen(arbitrary_seed(), |&seed| {
        let zero = Size::new(0);
        let list = Vec::<u8>::arbitrary().sample(zero, seed);
        u64::arbitrary().sample(zero, seed) == 0
            && i64::arbitrary().sample(zero, seed) == 0
            && BinaryTree::<u8>::arbitrary().sample(zero, seed).is_leaf()
            && list.len() <= 1
            && list.iter().all(|&x| x == 0)
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Zero size property passed"),
        result => panic!("Zero size property failed: {result}"),
    }
}

/// Inverted ranges and empty choices are rejected
pub fn test_contract_violations() {
    assert_eq!(
        Range::try_new(5i32, 1).err(),
        Some(FerretError::InvalidRange {
            lo: "5".to_string(),
            hi: "1".to_string(),
        })
    );
    assert!(Gen::try_choose(10u8, 9).is_err());
    assert!(meta_seed().try_next_in_range(1u16, 0).is_err());
    assert_eq!(
        Gen::<u8>::try_one_of(Vec::new()).err().map(|e| e.to_string()),
        Some(FerretError::EmptyChoice.to_string())
    );

    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let inverted = panic::catch_unwind(|| {
        Gen::choose(5u8, 1);
    });
    let empty = panic::catch_unwind(|| {
        Gen::<u8>::one_of(Vec::new());
    });
    panic::set_hook(previous_hook);

    assert!(inverted.is_err());
    assert!(empty.is_err());
    println!("✓ Contract violations rejected");
}
