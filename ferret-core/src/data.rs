//! Core data types for Ferret: size budgets, the random source and ranges.

use crate::error::{FerretError, Result};
use std::fmt;

/// Size parameter for controlling test data generation.
///
/// Size is a non-negative budget. Generators read it through
/// [`Gen::sized`](crate::Gen::sized) to scale the magnitude of numbers
/// and the length of collections, and recursive generators halve it
/// before descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Size(pub usize);

impl Size {
    /// Create a new size value.
    pub fn new(value: usize) -> Self {
        Size(value)
    }

    /// Get the inner size value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Half of this size, rounded down.
    ///
    /// Strictly smaller than `self` whenever `self > 0`.
    pub fn halve(&self) -> Self {
        Size(self.0 / 2)
    }
}

impl From<usize> for Size {
    fn from(value: usize) -> Self {
        Size(value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// Types that can be drawn uniformly from an inclusive range.
///
/// Every implementor maps onto `u64` ordinals in an order-preserving way,
/// so a single bounded sampler serves booleans and all integer widths.
pub trait Uniform: Copy + PartialOrd + fmt::Debug + 'static {
    /// Smallest value of the type's natural domain.
    const MIN: Self;
    /// Largest value of the type's natural domain.
    const MAX: Self;

    /// Order-preserving embedding into `u64`.
    fn to_ordinal(self) -> u64;

    /// Inverse of [`Uniform::to_ordinal`] for ordinals inside the domain.
    fn from_ordinal(ordinal: u64) -> Self;
}

impl Uniform for bool {
    const MIN: Self = false;
    const MAX: Self = true;

    fn to_ordinal(self) -> u64 {
        self as u64
    }

    fn from_ordinal(ordinal: u64) -> Self {
        ordinal != 0
    }
}

macro_rules! impl_uniform_unsigned {
    ($($t:ty),*) => {
        $(
            impl Uniform for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                fn to_ordinal(self) -> u64 {
                    self as u64
                }

                fn from_ordinal(ordinal: u64) -> Self {
                    ordinal as $t
                }
            }
        )*
    };
}

macro_rules! impl_uniform_signed {
    ($($t:ty),*) => {
        $(
            impl Uniform for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                fn to_ordinal(self) -> u64 {
                    (self as i64 as u64) ^ SIGN_BIT
                }

                fn from_ordinal(ordinal: u64) -> Self {
                    (ordinal ^ SIGN_BIT) as i64 as $t
                }
            }
        )*
    };
}

const SIGN_BIT: u64 = 1 << 63;

impl_uniform_unsigned!(u8, u16, u32, u64, usize);
impl_uniform_signed!(i8, i16, i32, i64, isize);

/// A validated inclusive range `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<T> {
    lo: T,
    hi: T,
}

impl<T: Uniform> Range<T> {
    /// Create a range, panicking if `lo > hi`.
    pub fn new(lo: T, hi: T) -> Self {
        match Self::try_new(lo, hi) {
            Ok(range) => range,
            Err(error) => panic!("{error}"),
        }
    }

    /// Create a range, reporting `lo > hi` as an error.
    pub fn try_new(lo: T, hi: T) -> Result<Self> {
        if lo > hi {
            return Err(FerretError::InvalidRange {
                lo: format!("{lo:?}"),
                hi: format!("{hi:?}"),
            });
        }
        Ok(Range { lo, hi })
    }

    /// The full domain of `T`.
    pub fn full() -> Self {
        Range {
            lo: T::MIN,
            hi: T::MAX,
        }
    }

    pub fn lo(&self) -> T {
        self.lo
    }

    pub fn hi(&self) -> T {
        self.hi
    }

    /// Whether `value` lies within the range.
    pub fn contains(&self, value: T) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl<T: fmt::Debug> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.lo, self.hi)
    }
}

/// Splittable random seed for deterministic test generation.
///
/// A seed is an immutable value: every primitive returns the drawn value
/// together with the successor seed, and the caller threads that successor
/// into the next draw. Two runs from the same seed and size draw the same
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Split a seed into two independent seeds.
    /// Uses SplitMix64 splitting strategy for independence.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Generate the next random value and advance the seed.
    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Generate a bounded random value in `[0, bound)`. `bound` must be non-zero.
    pub fn next_bounded(self, bound: u64) -> (u64, Self) {
        debug_assert!(bound > 0, "next_bounded requires a non-zero bound");
        let (value, new_seed) = self.next_u64();
        (((value as u128 * bound as u128) >> 64) as u64, new_seed)
    }

    /// Generate a random bool.
    pub fn next_bool(self) -> (bool, Self) {
        self.next_in_range(false, true)
    }

    /// Draw a value uniformly from `[lo, hi]`.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`. Use [`Seed::try_next_in_range`] to get an error
    /// instead.
    pub fn next_in_range<T: Uniform>(self, lo: T, hi: T) -> (T, Self) {
        match self.try_next_in_range(lo, hi) {
            Ok(drawn) => drawn,
            Err(error) => panic!("{error}"),
        }
    }

    /// Draw a value uniformly from `[lo, hi]`, reporting `lo > hi` as an error.
    pub fn try_next_in_range<T: Uniform>(self, lo: T, hi: T) -> Result<(T, Self)> {
        let range = Range::try_new(lo, hi)?;
        Ok(self.next_in(&range))
    }

    /// Draw a value uniformly from an already validated range.
    pub fn next_in<T: Uniform>(self, range: &Range<T>) -> (T, Self) {
        let lo = range.lo.to_ordinal();
        let span = range.hi.to_ordinal() - lo;
        let (offset, next) = if span == u64::MAX {
            self.next_u64()
        } else {
            self.next_bounded(span + 1)
        };
        (T::from_ordinal(lo + offset), next)
    }

    /// Generate a random seed.
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        Seed(rng.gen(), rng.gen::<u64>() | 1)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// Configuration for running properties.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of trials to run.
    pub test_limit: usize,

    /// Maximum number of shrink candidates to evaluate.
    pub shrink_limit: usize,

    /// Size used by the last trial; earlier trials escalate towards it.
    pub size_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            shrink_limit: 1000,
            size_limit: 100,
        }
    }
}

impl Config {
    /// Create a new config with the given number of tests.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Create a new config with the given shrink limit.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    /// Create a new config with the given size limit.
    pub fn with_size_limit(mut self, size: usize) -> Self {
        self.size_limit = size;
        self
    }

    /// Reject configurations that cannot run a single trial.
    pub fn validate(&self) -> Result<()> {
        if self.test_limit == 0 {
            return Err(FerretError::InvalidConfig {
                message: "test_limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Size for the given zero-based trial, escalating from 0 up to `size_limit`.
    pub fn size_for(&self, trial: usize) -> Size {
        let tests = self.test_limit.max(1);
        let last = tests.saturating_sub(1).max(1);
        Size((trial.min(last) * self.size_limit) / last)
    }
}

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generate a good gamma value for SplitMix64 splitting.
fn mix_gamma(mut z: u64) -> u64 {
    z = splitmix64_mix(z);
    // Gamma must stay odd for a full period.
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15) | 1
}
