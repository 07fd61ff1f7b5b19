//! Running properties: generate with escalating size, then shrink failures.

use crate::arbitrary::Arbitrary;
use crate::data::{Config, Seed};
use crate::error::{FerretError, Result};
use crate::gen::Gen;
use crate::shrinks::Shrinks;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, trace};

/// A shrinking step in the failure progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkStep {
    /// The counterexample value at this step.
    pub counterexample: String,
    /// The step number (0 = original, 1+ = accepted shrinks).
    pub step: usize,
}

/// Outcome of running a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Every trial passed.
    Pass { tests_run: usize },

    /// A trial failed; `counterexample` is the locally minimal input.
    Fail {
        counterexample: String,
        tests_run: usize,
        shrinks_performed: usize,
        /// The progression from the original failure to the minimal one.
        shrink_steps: Vec<ShrinkStep>,
    },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass { tests_run } => write!(f, "✓ passed {tests_run} tests."),
            TestResult::Fail {
                counterexample,
                tests_run,
                shrinks_performed,
                shrink_steps,
            } => {
                writeln!(
                    f,
                    "✗ failed after {tests_run} tests and {shrinks_performed} shrinks."
                )?;
                if !shrink_steps.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "  Shrinking progression:")?;
                    for step in shrink_steps {
                        if step.step == 0 {
                            writeln!(f, "    │ Original: {}", step.counterexample)?;
                        } else {
                            writeln!(f, "    │ Step {}: {}", step.step, step.counterexample)?;
                        }
                    }
                    writeln!(f)?;
                }
                write!(f, "  Minimal counterexample: {counterexample}")
            }
        }
    }
}

/// The result of a minimization search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minimized<T> {
    /// The locally minimal failing value.
    pub value: T,
    /// Every accepted failing value, starting with the original.
    pub path: Vec<T>,
    /// How many candidates were tested.
    pub attempts: usize,
}

/// Search for a locally minimal failing value.
///
/// Candidates of the current value are tested in order; the first failing
/// one becomes the new current value and its own candidates are searched.
/// Stops when no candidate fails or after `limit` candidates were tested.
pub fn minimize<T, S, F>(value: T, shrink: S, fails: F, limit: usize) -> Minimized<T>
where
    T: Clone + fmt::Debug,
    S: Fn(&T) -> Shrinks<T>,
    F: Fn(&T) -> bool,
{
    let mut current = value;
    let mut path = vec![current.clone()];
    let mut attempts = 0;

    'search: while attempts < limit {
        for candidate in shrink(&current) {
            attempts += 1;
            if fails(&candidate) {
                debug!(step = path.len(), candidate = ?candidate, "shrink accepted");
                path.push(candidate.clone());
                current = candidate;
                continue 'search;
            }
            if attempts >= limit {
                break;
            }
        }
        break;
    }

    Minimized {
        value: current,
        path,
        attempts,
    }
}

/// A property that can be tested with generated inputs.
pub struct Property<T> {
    generator: Gen<T>,
    shrink: Rc<dyn Fn(&T) -> Shrinks<T>>,
    predicate: Rc<dyn Fn(&T) -> bool>,
}

impl<T> Property<T>
where
    T: fmt::Debug + Clone + 'static,
{
    /// Create a property from an explicit generator, shrink function and predicate.
    pub fn new<S, F>(generator: Gen<T>, shrink: S, predicate: F) -> Self
    where
        S: Fn(&T) -> Shrinks<T> + 'static,
        F: Fn(&T) -> bool + 'static,
    {
        Property {
            generator,
            shrink: Rc::new(shrink),
            predicate: Rc::new(predicate),
        }
    }

    /// Run the property from a fresh random seed.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`Config::validate`].
    pub fn run(&self, config: &Config) -> TestResult {
        self.run_with_seed(config, Seed::random())
    }

    /// Run the property from a fixed seed.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`Config::validate`].
    pub fn run_with_seed(&self, config: &Config, seed: Seed) -> TestResult {
        match self.try_run_with_seed(config, seed) {
            Ok(result) => result,
            Err(error) => panic!("{error}"),
        }
    }

    /// Run the property from a fixed seed, reporting an invalid config as an error.
    ///
    /// Trial `i` draws from the left half of the `i`-th split of `seed`, so
    /// its input does not depend on how much randomness earlier trials used.
    pub fn try_run_with_seed(&self, config: &Config, seed: Seed) -> Result<TestResult> {
        config.validate()?;
        let mut seed = seed;

        for trial in 0..config.test_limit {
            let size = config.size_for(trial);
            let (trial_seed, rest) = seed.split();
            seed = rest;
            let (value, _) = self.generator.generate(size, trial_seed);
            trace!(trial, size = size.get(), "generated input");

            if (self.predicate)(&value) {
                continue;
            }

            let tests_run = trial + 1;
            debug!(tests_run, counterexample = ?value, "property falsified");
            let minimized = minimize(
                value,
                |v: &T| (self.shrink)(v),
                |v: &T| !(self.predicate)(v),
                config.shrink_limit,
            );

            let shrink_steps = minimized
                .path
                .iter()
                .enumerate()
                .map(|(step, value)| ShrinkStep {
                    counterexample: format!("{value:?}"),
                    step,
                })
                .collect();
            let result = TestResult::Fail {
                counterexample: format!("{:?}", minimized.value),
                tests_run,
                shrinks_performed: minimized.path.len() - 1,
                shrink_steps,
            };
            info!(tests_run, attempts = minimized.attempts, "property failed");
            return Ok(result);
        }

        info!(tests_run = config.test_limit, "property passed");
        Ok(TestResult::Pass {
            tests_run: config.test_limit,
        })
    }

    /// Run the property and turn a failure into an error.
    pub fn check(&self, config: &Config) -> Result<()> {
        match self.try_run_with_seed(config, Seed::random())? {
            TestResult::Pass { .. } => Ok(()),
            TestResult::Fail {
                counterexample,
                tests_run,
                shrinks_performed,
                ..
            } => Err(FerretError::PropertyFailed {
                counterexample,
                tests_run,
                shrinks_performed,
            }),
        }
    }
}

/// A property over the [`Arbitrary`] generator and shrinker of `T`.
pub fn for_all<T, F>(condition: F) -> Property<T>
where
    T: Arbitrary + fmt::Debug,
    F: Fn(&T) -> bool + 'static,
{
    Property::new(T::arbitrary(), T::shrink, condition)
}

/// A property over an explicit generator, without shrinking.
pub fn for_all_gen<T, F>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: Clone + fmt::Debug + 'static,
    F: Fn(&T) -> bool + 'static,
{
    Property::new(generator, |_| crate::shrinks::empty(), condition)
}
