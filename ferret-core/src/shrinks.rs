//! Lazy shrink sequences.
//!
//! A shrink sequence is a finite, pull-driven iterator of candidate values.
//! Nothing is computed until the consumer asks for the next element, so a
//! minimization search can walk a combinatorially large candidate space and
//! stop at any point. A partially consumed sequence cannot be rewound; to
//! start over, call the function that produced it again.

use std::iter::{self, Fuse};
use std::rc::Rc;

/// A lazily evaluated, finite sequence of shrink candidates.
pub type Shrinks<T> = Box<dyn Iterator<Item = T>>;

/// The sequence with no candidates.
pub fn empty<T: 'static>() -> Shrinks<T> {
    Box::new(iter::empty())
}

/// Postpone building a sequence until its first element is requested.
pub fn defer<T, F>(build: F) -> Shrinks<T>
where
    T: 'static,
    F: FnOnce() -> Shrinks<T> + 'static,
{
    Box::new(Defer {
        build: Some(build),
        inner: None,
    })
}

struct Defer<T, F> {
    build: Option<F>,
    inner: Option<Shrinks<T>>,
}

impl<T, F> Iterator for Defer<T, F>
where
    F: FnOnce() -> Shrinks<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(build) = self.build.take() {
            self.inner = Some(build());
        }
        self.inner.as_mut()?.next()
    }
}

/// Merge two sequences, alternating between them and starting with `xs`.
///
/// Each input keeps its internal order. Once either side runs dry the
/// remainder of the other follows unchanged, so the result has exactly
/// `len(xs) + len(ys)` elements.
pub fn interleave<T: 'static>(xs: Shrinks<T>, ys: Shrinks<T>) -> Shrinks<T> {
    Box::new(Interleave {
        xs: xs.fuse(),
        ys: ys.fuse(),
        left_turn: true,
    })
}

struct Interleave<T> {
    xs: Fuse<Shrinks<T>>,
    ys: Fuse<Shrinks<T>>,
    left_turn: bool,
}

impl<T> Iterator for Interleave<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (first, second) = if self.left_turn {
            (&mut self.xs, &mut self.ys)
        } else {
            (&mut self.ys, &mut self.xs)
        };
        self.left_turn = !self.left_turn;
        first.next().or_else(|| second.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (xs_lo, xs_hi) = self.xs.size_hint();
        let (ys_lo, ys_hi) = self.ys.size_hint();
        let hi = match (xs_hi, ys_hi) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };
        (xs_lo.saturating_add(ys_lo), hi)
    }
}

/// Right fold of [`interleave`] over `seqs`.
///
/// `[a, b, c]` becomes `interleave(a, interleave(b, c))`; no sequences
/// gives the empty sequence.
pub fn interleave_all<T: 'static>(seqs: Vec<Shrinks<T>>) -> Shrinks<T> {
    seqs.into_iter()
        .rev()
        .fold(empty(), |merged, seq| interleave(seq, merged))
}

/// [`interleave_all`] followed by [`drop_last`].
///
/// Used when the final merged element is known to rebuild the input.
pub fn interleave_all_drop_last<T: 'static>(seqs: Vec<Shrinks<T>>) -> Shrinks<T> {
    drop_last(interleave_all(seqs))
}

/// Every element except the last, still pulled lazily.
///
/// Holds one element of lookahead; a single-element sequence is consumed
/// and yields nothing.
pub fn drop_last<T: 'static>(seq: Shrinks<T>) -> Shrinks<T> {
    Box::new(DropLast {
        inner: seq.fuse(),
        pending: None,
    })
}

struct DropLast<T> {
    inner: Fuse<Shrinks<T>>,
    pending: Option<T>,
}

impl<T> Iterator for DropLast<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = match self.pending.take() {
            Some(current) => current,
            None => self.inner.next()?,
        };
        let successor = self.inner.next()?;
        self.pending = Some(successor);
        Some(current)
    }
}

/// Lazily expanded cross product of `xs` and `ys` under `f`.
///
/// For the head `x` of `xs`, the row `ys.map(|y| f(x, y))` is interleaved
/// with the combination over the tail of `xs`. Earlier `xs` therefore get
/// exhausted against `ys` first. `ys` is a producer rather than a sequence
/// because every row walks it from the start. When both inputs are
/// non-empty the final element is `f(last x, last y)`.
pub fn cartesian_combine<A, B, C, F, G>(f: F, xs: Shrinks<A>, ys: G) -> Shrinks<C>
where
    A: Clone + 'static,
    B: 'static,
    C: 'static,
    F: Fn(A, B) -> C + 'static,
    G: Fn() -> Shrinks<B> + 'static,
{
    combine_rows(Rc::new(f), xs, Rc::new(ys))
}

fn combine_rows<A, B, C, F, G>(f: Rc<F>, mut xs: Shrinks<A>, ys: Rc<G>) -> Shrinks<C>
where
    A: Clone + 'static,
    B: 'static,
    C: 'static,
    F: Fn(A, B) -> C + 'static,
    G: Fn() -> Shrinks<B> + 'static,
{
    defer(move || match xs.next() {
        None => empty(),
        Some(x) => {
            let row_f = Rc::clone(&f);
            let row: Shrinks<C> = Box::new((*ys)().map(move |y| (*row_f)(x.clone(), y)));
            interleave(row, combine_rows(f, xs, ys))
        }
    })
}

/// Stack left free before pulling through a guarded sequence (32 KB).
const MIN_STACK_RED_ZONE: usize = 32 * 1024;

/// Stack segment allocated when the red zone is reached (1 MB).
const STACK_GROWTH_SIZE: usize = 1024 * 1024;

/// Pull `seq` on a stack that grows on demand.
///
/// Sequences nested once per input element, like list shrinks, recurse
/// that deep on their first pull and again when dropped. Both run through
/// `stacker` so long inputs never exhaust the thread stack.
pub fn stack_guarded<T: 'static>(seq: Shrinks<T>) -> Shrinks<T> {
    Box::new(StackGuarded { inner: Some(seq) })
}

struct StackGuarded<T> {
    inner: Option<Shrinks<T>>,
}

impl<T> Iterator for StackGuarded<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let inner = self.inner.as_mut()?;
        stacker::maybe_grow(MIN_STACK_RED_ZONE, STACK_GROWTH_SIZE, || inner.next())
    }
}

impl<T> Drop for StackGuarded<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            stacker::maybe_grow(MIN_STACK_RED_ZONE, STACK_GROWTH_SIZE, move || drop(inner));
        }
    }
}

/// `seq` followed by `value`.
pub fn then<T: 'static>(seq: Shrinks<T>, value: T) -> Shrinks<T> {
    Box::new(seq.chain(iter::once(value)))
}

/// A sequence over an already computed list of candidates.
pub fn from_vec<T: 'static>(values: Vec<T>) -> Shrinks<T> {
    Box::new(values.into_iter())
}
