//! Lazy concatenation of iterators.
//!
//! [`Concat`] walks a list of sources one after another, maps every element
//! through a transform and keeps the results accepted by a filter.
//! [`UnaryConcat`] is the identity-transform, accept-all flavor; [`BiConcat`]
//! joins exactly two sources of possibly different iterator types.
//!
//! None of these support removal: [`Concat::remove`] and
//! [`BiConcat::remove`] always fail with
//! [`GraphError::UnsupportedOperation`].

use std::iter::FusedIterator;

use crate::error::{GraphError, Result};

/// Walks `sources` lazily: each source is turned into an iterator only when
/// the previous one runs dry.
pub struct Concat<S, F, P>
where
    S: Iterator,
    S::Item: IntoIterator,
{
    sources: S,
    current: Option<<S::Item as IntoIterator>::IntoIter>,
    transform: F,
    filter: P,
}

/// The element type of the sources walked by `S`.
pub type SourceItem<S> = <<S as Iterator>::Item as IntoIterator>::Item;

/// A [`Concat`] that yields the source elements unchanged.
pub type UnaryConcat<S> = Concat<S, fn(SourceItem<S>) -> SourceItem<S>, fn(&SourceItem<S>) -> bool>;

fn identity<T>(item: T) -> T {
    item
}

fn accept_all<T>(_: &T) -> bool {
    true
}

impl<S, F, P> Concat<S, F, P>
where
    S: Iterator,
    S::Item: IntoIterator,
{
    /// Concatenates `sources`, mapping each element through `transform` and
    /// keeping those for which `filter` holds.
    pub fn new<T>(sources: T, transform: F, filter: P) -> Self
    where
        T: IntoIterator<IntoIter = S>,
    {
        Self {
            sources: sources.into_iter(),
            current: None,
            transform,
            filter,
        }
    }

    pub fn remove(&mut self) -> Result<()> {
        Err(GraphError::UnsupportedOperation(
            "remove on a concatenated iterator",
        ))
    }
}

impl<S> UnaryConcat<S>
where
    S: Iterator,
    S::Item: IntoIterator,
{
    /// Concatenates `sources` without transforming or filtering.
    pub fn unary<T>(sources: T) -> Self
    where
        T: IntoIterator<IntoIter = S>,
    {
        Self::new(
            sources,
            identity::<SourceItem<S>> as fn(SourceItem<S>) -> SourceItem<S>,
            accept_all::<SourceItem<S>> as fn(&SourceItem<S>) -> bool,
        )
    }
}

impl<S, O, F, P> Iterator for Concat<S, F, P>
where
    S: Iterator,
    S::Item: IntoIterator,
    F: FnMut(SourceItem<S>) -> O,
    P: FnMut(&O) -> bool,
{
    type Item = O;

    fn next(&mut self) -> Option<O> {
        loop {
            if let Some(current) = self.current.as_mut() {
                for item in current.by_ref() {
                    let item = (self.transform)(item);
                    if (self.filter)(&item) {
                        return Some(item);
                    }
                }
            }
            // Exhausted sources are dropped as soon as they run dry.
            self.current = self.sources.next().map(IntoIterator::into_iter);
            self.current.as_ref()?;
        }
    }
}

impl<S, O, F, P> FusedIterator for Concat<S, F, P>
where
    S: FusedIterator,
    S::Item: IntoIterator,
    F: FnMut(SourceItem<S>) -> O,
    P: FnMut(&O) -> bool,
{
}

/// The concatenation of two iterators with the same item type.
pub struct BiConcat<A, B> {
    first: Option<A>,
    second: B,
}

impl<A, B> BiConcat<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self {
            first: Some(first),
            second,
        }
    }

    pub fn remove(&mut self) -> Result<()> {
        Err(GraphError::UnsupportedOperation(
            "remove on a concatenated iterator",
        ))
    }
}

impl<A, B> Iterator for BiConcat<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
{
    type Item = A::Item;

    fn next(&mut self) -> Option<A::Item> {
        if let Some(first) = self.first.as_mut() {
            match first.next() {
                Some(item) => return Some(item),
                None => self.first = None,
            }
        }
        self.second.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (second_lo, second_hi) = self.second.size_hint();
        match &self.first {
            Some(first) => {
                let (first_lo, first_hi) = first.size_hint();
                (
                    first_lo.saturating_add(second_lo),
                    first_hi.zip(second_hi).and_then(|(a, b)| a.checked_add(b)),
                )
            }
            None => (second_lo, second_hi),
        }
    }
}
