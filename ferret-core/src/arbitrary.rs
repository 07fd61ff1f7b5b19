//! The `Arbitrary` capability: a generator paired with a shrink function.

use crate::data::Size;
use crate::gen::Gen;
use crate::shrinks::{self, Shrinks};
use crate::tree::BinaryTree;
use std::iter;
use std::rc::Rc;

/// Types that know how to generate and shrink themselves.
///
/// Every candidate in `value.shrink()` differs from `value` and is no more
/// complex than it, and the sequence is finite, so repeatedly following
/// failing candidates always terminates.
pub trait Arbitrary: Clone + 'static {
    /// The default generator for this type.
    fn arbitrary() -> Gen<Self>;

    /// Simpler candidates for `self`, simplest first.
    fn shrink(&self) -> Shrinks<Self> {
        shrinks::empty()
    }
}

/// The generator of any [`Arbitrary`] type.
pub fn arbitrary<T: Arbitrary>() -> Gen<T> {
    T::arbitrary()
}

/// `value.shrink()` followed by `value` itself.
///
/// Crossing these sequences with [`shrinks::cartesian_combine`] yields every
/// mix of shrunk and original components, ending with the unchanged input.
pub fn shrink_and_keep<T: Arbitrary>(value: &T) -> Shrinks<T> {
    shrinks::then(value.shrink(), value.clone())
}

/// The halving chain of `n`, smallest first: `10` gives `[0, 1, 2, 5]`.
pub fn halvings(n: u64) -> Vec<u64> {
    let mut chain = Vec::new();
    let mut current = n;
    while current > 0 {
        current /= 2;
        chain.push(current);
    }
    chain.reverse();
    chain
}

/// Upper bound for naturals under `size`: `size^3`, saturating at `max`.
fn natural_bound(size: Size, max: u64) -> u64 {
    (size.get() as u64).saturating_pow(3).min(max)
}

/// Width of the integer window under `size`: `size^5`, saturating at `max`.
fn integer_span(size: Size, max: u64) -> u64 {
    (size.get() as u64).saturating_pow(5).min(max)
}

impl Arbitrary for bool {
    fn arbitrary() -> Gen<Self> {
        Gen::bool()
    }
}

macro_rules! impl_arbitrary_natural {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                fn arbitrary() -> Gen<Self> {
                    Gen::sized(|size| {
                        let bound = natural_bound(size, <$t>::MAX as u64);
                        Gen::choose(0, bound as $t)
                    })
                }

                fn shrink(&self) -> Shrinks<Self> {
                    let chain = halvings(*self as u64);
                    Box::new(chain.into_iter().map(|m| m as $t))
                }
            }
        )*
    };
}

macro_rules! impl_arbitrary_integer {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                fn arbitrary() -> Gen<Self> {
                    Gen::sized(|size| {
                        let span = integer_span(size, <$t>::MAX as u64);
                        let offset = (span / 2) as i128;
                        Gen::choose_nat(0, span).map(move |v| (v as i128 - offset) as $t)
                    })
                }

                /// Each magnitude in the halving chain of `|self|`, as `m`
                /// then `-m`. Zero has no negative twin and appears once.
                fn shrink(&self) -> Shrinks<Self> {
                    let chain = halvings(self.unsigned_abs() as u64);
                    Box::new(chain.into_iter().flat_map(|m| {
                        let m = m as $t;
                        let negated = if m == 0 { None } else { Some(-m) };
                        iter::once(m).chain(negated)
                    }))
                }
            }
        )*
    };
}

impl_arbitrary_natural!(u8, u16, u32, u64, usize);
impl_arbitrary_integer!(i8, i16, i32, i64, isize);

impl<T: Arbitrary> Arbitrary for Vec<T> {
    fn arbitrary() -> Gen<Self> {
        Gen::list_of(T::arbitrary())
    }

    fn shrink(&self) -> Shrinks<Self> {
        shrink_suffix(Rc::from(self.as_slice()), 0)
    }
}

/// Shrinks of `items[start..]`, sharing `items` with every nested suffix.
///
/// Each suffix wraps the sequence of the next one, so the first pull
/// descends once per element; [`shrinks::stack_guarded`] keeps that
/// descent off the fixed-size thread stack.
fn shrink_suffix<T: Arbitrary>(items: Rc<[T]>, start: usize) -> Shrinks<Vec<T>> {
    let heads = match items.get(start) {
        Some(head) => shrink_and_keep(head),
        None => return shrinks::empty(),
    };
    let rest = Rc::clone(&items);
    let tails = move || -> Shrinks<Vec<T>> {
        let rest = Rc::clone(&rest);
        Box::new(
            iter::once(Vec::new()).chain(shrinks::defer(move || shrink_suffix(rest, start + 1))),
        )
    };
    let conses = shrinks::cartesian_combine(cons, heads, tails);
    let shorter = shrinks::defer(move || shrink_suffix(items, start + 1));
    shrinks::stack_guarded(shrinks::drop_last(shrinks::interleave(shorter, conses)))
}

fn cons<T>(head: T, mut tail: Vec<T>) -> Vec<T> {
    tail.insert(0, head);
    tail
}

impl<T: Arbitrary> Arbitrary for BinaryTree<T> {
    fn arbitrary() -> Gen<Self> {
        Gen::sized(|size| {
            if size.get() == 0 {
                return Gen::constant(BinaryTree::Leaf);
            }
            let half = size.halve();
            T::arbitrary().bind(move |value| {
                Self::arbitrary().resize(half).bind(move |left| {
                    let value = value.clone();
                    Self::arbitrary()
                        .resize(half)
                        .map(move |right| BinaryTree::node(value.clone(), left.clone(), right))
                })
            })
        })
    }

    /// Nothing below the root is visited until the first candidate is
    /// pulled; building the sequence costs one clone of the root value.
    fn shrink(&self) -> Shrinks<Self> {
        let BinaryTree::Node(value, left, right) = self else {
            return shrinks::empty();
        };
        let value = value.clone();
        let (left, right) = (Rc::clone(left), Rc::clone(right));

        let lefts = {
            let left = Rc::clone(&left);
            shrinks::defer(move || shrink_and_keep(&*left))
        };
        let rights = {
            let right = Rc::clone(&right);
            shrinks::defer(move || shrink_and_keep(&*right))
        };
        let rebuilt = shrinks::defer(move || {
            let subtrees = move || {
                let right = Rc::clone(&right);
                shrinks::cartesian_combine(
                    |l, r| (l, r),
                    shrink_and_keep(&*left),
                    move || shrink_and_keep(&*right),
                )
            };
            shrinks::cartesian_combine(
                |value: T, (left, right): (BinaryTree<T>, BinaryTree<T>)| {
                    BinaryTree::node(value, left, right)
                },
                shrink_and_keep(&value),
                subtrees,
            )
        });
        shrinks::interleave_all_drop_last(vec![lefts, rights, rebuilt])
    }
}

impl<A: Arbitrary, B: Arbitrary> Arbitrary for (A, B) {
    fn arbitrary() -> Gen<Self> {
        A::arbitrary().bind(|a| B::arbitrary().map(move |b| (a.clone(), b)))
    }

    fn shrink(&self) -> Shrinks<Self> {
        let second = self.1.clone();
        shrinks::drop_last(shrinks::cartesian_combine(
            |a, b| (a, b),
            shrink_and_keep(&self.0),
            move || shrink_and_keep(&second),
        ))
    }
}

impl<T: Arbitrary> Arbitrary for Option<T> {
    fn arbitrary() -> Gen<Self> {
        Gen::constant(None).or_else(T::arbitrary().map(Some))
    }

    fn shrink(&self) -> Shrinks<Self> {
        match self {
            None => shrinks::empty(),
            Some(value) => Box::new(iter::once(None).chain(value.shrink().map(Some))),
        }
    }
}
