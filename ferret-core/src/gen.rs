//! Generator combinators.

use crate::data::{Range, Seed, Size, Uniform};
use crate::error::{FerretError, Result};
use std::rc::Rc;

/// A generator for test data of type `T`.
///
/// A generator is a pure function from a size budget and a seed to a value
/// and the successor seed. Generators are stateless descriptors: build them
/// once, clone them cheaply, and run them as often as needed.
pub struct Gen<T> {
    generator: Rc<dyn Fn(Size, Seed) -> (T, Seed)>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            generator: Rc::clone(&self.generator),
        }
    }
}

impl<T> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> (T, Seed) + 'static,
    {
        Gen {
            generator: Rc::new(f),
        }
    }

    /// Run the generator, returning the value and the advanced seed.
    pub fn generate(&self, size: Size, seed: Seed) -> (T, Seed) {
        (self.generator)(size, seed)
    }

    /// Run the generator and keep only the value.
    pub fn sample(&self, size: Size, seed: Seed) -> T {
        self.generate(size, seed).0
    }
}

impl<T: 'static> Gen<T> {
    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Gen::new(move |_size, seed| (value.clone(), seed))
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + 'static,
        U: 'static,
    {
        Gen::new(move |size, seed| {
            let (value, seed) = self.generate(size, seed);
            (f(value), seed)
        })
    }

    /// Sequence a dependent generator after this one.
    ///
    /// The seed left by `self` is handed to the generator built by `f`,
    /// so draws happen strictly left to right.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> Gen<U> + 'static,
        U: 'static,
    {
        Gen::new(move |size, seed| {
            let (value, seed) = self.generate(size, seed);
            f(value).generate(size, seed)
        })
    }

    /// Build a generator from the ambient size.
    ///
    /// The generator returned by `f` runs with the same size and seed.
    pub fn sized<F>(f: F) -> Self
    where
        F: Fn(Size) -> Gen<T> + 'static,
    {
        Gen::new(move |size, seed| f(size).generate(size, seed))
    }

    /// Run this generator under a fixed size, ignoring the ambient one.
    pub fn resize(self, size: Size) -> Self {
        Gen::new(move |_size, seed| self.generate(size, seed))
    }

    /// Pick `self` or `other` with a fair coin, running only the chosen one.
    pub fn or_else(self, other: Gen<T>) -> Self {
        Gen::new(move |size, seed| {
            let (left, seed) = seed.next_bool();
            if left {
                self.generate(size, seed)
            } else {
                other.generate(size, seed)
            }
        })
    }

    /// Exactly `n` independent samples from `gen`, drawn in order.
    pub fn vector_of(n: usize, gen: Gen<T>) -> Gen<Vec<T>> {
        Gen::new(move |size, seed| {
            let mut values = Vec::with_capacity(n);
            let mut seed = seed;
            for _ in 0..n {
                let (value, next) = gen.generate(size, seed);
                values.push(value);
                seed = next;
            }
            (values, seed)
        })
    }

    /// A list whose length is uniform in `[0, size + 1]`.
    pub fn list_of(gen: Gen<T>) -> Gen<Vec<T>> {
        Gen::sized(move |size| {
            let gen = gen.clone();
            Gen::choose(0usize, size.get().saturating_add(1))
                .bind(move |n| Gen::vector_of(n, gen.clone()))
        })
    }

    /// Pick one generator uniformly and run only that one.
    ///
    /// # Panics
    ///
    /// Panics if `gens` is empty.
    pub fn one_of(gens: Vec<Gen<T>>) -> Self {
        match Self::try_one_of(gens) {
            Ok(gen) => gen,
            Err(error) => panic!("{error}"),
        }
    }

    /// Like [`Gen::one_of`], reporting an empty list as an error.
    pub fn try_one_of(gens: Vec<Gen<T>>) -> Result<Self> {
        if gens.is_empty() {
            return Err(FerretError::EmptyChoice);
        }
        let index = Range::new(0, gens.len() - 1);
        Ok(Gen::new(move |size, seed| {
            let (chosen, seed) = seed.next_in(&index);
            gens[chosen].generate(size, seed)
        }))
    }
}

impl<T: Uniform> Gen<T> {
    /// A value drawn uniformly from `[lo, hi]`.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    pub fn choose(lo: T, hi: T) -> Self {
        Self::from_range(Range::new(lo, hi))
    }

    /// Like [`Gen::choose`], reporting `lo > hi` as an error.
    pub fn try_choose(lo: T, hi: T) -> Result<Self> {
        Range::try_new(lo, hi).map(Self::from_range)
    }

    /// A value drawn uniformly from a validated range.
    pub fn from_range(range: Range<T>) -> Self {
        Gen::new(move |_size, seed| seed.next_in(&range))
    }

    /// A value drawn uniformly from the type's whole domain.
    pub fn choose_any() -> Self {
        Self::from_range(Range::full())
    }
}

impl Gen<u64> {
    /// A natural number drawn uniformly from `[lo, hi]`.
    pub fn choose_nat(lo: u64, hi: u64) -> Self {
        Self::choose(lo, hi)
    }
}

/// Primitive generators.
impl Gen<bool> {
    /// Generate a random boolean.
    pub fn bool() -> Self {
        Gen::choose_any()
    }
}
