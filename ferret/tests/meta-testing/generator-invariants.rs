//! Generator invariant properties
//!
//! These properties ensure that generators respect their bounds and sizes
//! and that they are reproducible from a seed.

use crate::{arbitrary_seed, arbitrary_size, fast_config, meta_seed};
use ferret::*;

/// Property: `choose(lo, hi)` never leaves `[lo, hi]`
pub fn test_choose_respects_bounds() {
    let input = Gen::choose(-50i64, 50).bind(|lo| {
        Gen::choose(0i64, 50).bind(move |width| {
            arbitrary_seed().map(move |seed| (lo, lo + width, seed))
        })
    });
    let prop = for_all_gen(input, |&(lo, hi, seed)| {
        let gen = Gen::choose(lo, hi);
        let mut seed = seed;
        (0..50).all(|_| {
            let (value, next) = gen.generate(Size::new(0), seed);
            seed = next;
            lo <= value && value <= hi
        })
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Choose bounds property passed"),
        result => panic!("Choose bounds property failed: {result}"),
    }
}

/// Property: `vector_of(n, gen)` always has exactly `n` elements
pub fn test_vector_of_exact_length() {
    let input = Gen::choose(0usize, 40).bind(|n| arbitrary_seed().map(move |seed| (n, seed)));
    let prop = for_all_gen(input, |&(n, seed)| {
        let gen = Gen::vector_of(n, Gen::<u32>::choose_any());
        gen.sample(Size::new(3), seed).len() == n
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Vector length property passed"),
        result => panic!("Vector length property failed: {result}"),
    }
}

/// Property: `list_of(gen)` under size `sz` has length in `[0, sz + 1]`
pub fn test_list_of_bounded_by_size() {
    let input = arbitrary_size().bind(|size| arbitrary_seed().map(move |seed| (size, seed)));
    let prop = for_all_gen(input, |&(size, seed)| {
        let gen = Gen::list_of(Gen::bool());
        gen.sample(size, seed).len() <= size.get() + 1
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ List length property passed"),
        result => panic!("List length property failed: {result}"),
    }
}

/// Property: Generators should be deterministic for same size/seed
pub fn test_generator_determinism() {
    let input = arbitrary_size().bind(|size| arbitrary_seed().map(move |seed| (size, seed)));
    let prop = for_all_gen(input, |&(size, seed)| {
        let gen = BinaryTree::<i32>::arbitrary();
        gen.generate(size, seed) == gen.generate(size, seed)
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Generator determinism property passed"),
        result => panic!("Generator determinism property failed: {result}"),
    }
}

/// Property: naturals under size 2 stay within `[0, 8]`, under size 0 are 0
pub fn test_natural_generation_bounds() {
    let prop = for_all_gen(arbitrary_seed(), |&seed| {
        let gen = u64::arbitrary();
        gen.sample(Size::new(2), seed) <= 8 && gen.sample(Size::new(0), seed) == 0
    });

    match prop.run_with_seed(&fast_config(), meta_seed()) {
        TestResult::Pass { .. } => println!("✓ Natural generation bounds property passed"),
        result => panic!("Natural generation bounds property failed: {result}"),
    }
}
