//! Per-vertex adjacency lists.
//!
//! A [`Bag`] is a doubly linked list threaded through an index arena: each
//! slot is either occupied (value plus `prev`/`next` links) or on the free
//! list.  Appending and unlinking a known slot are O(1); removal by value is a
//! linear scan of the bag.

use std::fmt::{Debug, Formatter};

use crate::{
    error::{GraphError, Result},
    tracing_support::debug,
};

#[derive(Clone, Debug)]
enum Link<T> {
    Occupied {
        value: T,
        prev: Option<usize>,
        next: Option<usize>,
    },
    Free {
        next: Option<usize>,
    },
}

/// The adjacency list of one vertex in one graph.
///
/// Entries are bare vertices in vertex-operation graphs and edge objects in
/// edge-operation graphs.  Besides the entries a bag tracks its degree (the
/// number of entries), the number of self-loops of its vertex, and a
/// modification count used by [`BagCursor`] to detect concurrent changes.
///
/// A bag built with [`Bag::unmodifiable`] is a permanently empty sentinel:
/// every mutation on it fails with [`GraphError::UnmodifiableBag`].
#[derive(Clone)]
pub struct Bag<V, T> {
    vertex: Option<V>,
    links: Vec<Link<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_head: Option<usize>,
    degree: usize,
    loop_num: usize,
    mod_count: usize,
    modifiable: bool,
}

impl<V, T> Bag<V, T> {
    /// Creates an empty bag owned by `vertex`.
    pub fn new(vertex: V) -> Self {
        Self {
            vertex: Some(vertex),
            links: Vec::new(),
            head: None,
            tail: None,
            free_head: None,
            degree: 0,
            loop_num: 0,
            mod_count: 0,
            modifiable: true,
        }
    }

    /// Creates an empty bag whose modification count starts at `stamp`.
    pub(crate) fn with_stamp(vertex: V, stamp: usize) -> Self {
        Self {
            mod_count: stamp,
            ..Self::new(vertex)
        }
    }

    /// Creates the empty, unmodifiable sentinel bag.  It owns no vertex and
    /// does not allocate.
    pub fn unmodifiable() -> Self {
        Self {
            vertex: None,
            links: Vec::new(),
            head: None,
            tail: None,
            free_head: None,
            degree: 0,
            loop_num: 0,
            mod_count: 0,
            modifiable: false,
        }
    }

    /// The vertex owning this bag; `None` for the sentinel.
    pub fn vertex(&self) -> Option<&V> {
        self.vertex.as_ref()
    }

    /// Number of entries in the bag.
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn is_empty(&self) -> bool {
        self.degree == 0
    }

    /// Number of self-loops recorded for the owning vertex.
    pub fn loop_num(&self) -> usize {
        self.loop_num
    }

    pub fn mod_count(&self) -> usize {
        self.mod_count
    }

    pub fn is_modifiable(&self) -> bool {
        self.modifiable
    }

    fn check_modifiable(&self) -> Result<()> {
        if self.modifiable {
            Ok(())
        } else {
            Err(GraphError::UnmodifiableBag)
        }
    }

    fn check_stamp(&self, expected: usize) -> Result<()> {
        if self.mod_count == expected {
            Ok(())
        } else {
            debug!(
                expected,
                actual = self.mod_count,
                "bag modified underneath a cursor"
            );
            Err(GraphError::ConcurrentModification {
                expected,
                actual: self.mod_count,
            })
        }
    }

    /// Appends an entry at the tail of the bag.
    pub fn add(&mut self, entry: T) -> Result<()> {
        self.check_modifiable()?;
        self.push(entry);
        Ok(())
    }

    pub(crate) fn push(&mut self, entry: T) {
        let link = Link::Occupied {
            value: entry,
            prev: self.tail,
            next: None,
        };
        let index = match self.free_head {
            Some(index) => {
                self.free_head = match self.links[index] {
                    Link::Free { next } => next,
                    Link::Occupied { .. } => unreachable!("free list points at an occupied slot"),
                };
                self.links[index] = link;
                index
            }
            None => {
                self.links.push(link);
                self.links.len() - 1
            }
        };
        match self.tail {
            Some(tail) => self.set_next(tail, Some(index)),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.degree += 1;
        self.mod_count += 1;
    }

    fn set_next(&mut self, index: usize, value: Option<usize>) {
        if let Link::Occupied { next, .. } = &mut self.links[index] {
            *next = value;
        }
    }

    fn set_prev(&mut self, index: usize, value: Option<usize>) {
        if let Link::Occupied { prev, .. } = &mut self.links[index] {
            *prev = value;
        }
    }

    /// Unlinks an occupied slot and returns its value.
    fn unlink(&mut self, index: usize) -> T {
        let link = std::mem::replace(
            &mut self.links[index],
            Link::Free {
                next: self.free_head,
            },
        );
        let Link::Occupied { value, prev, next } = link else {
            unreachable!("unlinking a free slot");
        };
        match prev {
            Some(prev) => self.set_next(prev, next),
            None => self.head = next,
        }
        match next {
            Some(next) => self.set_prev(next, prev),
            None => self.tail = prev,
        }
        self.free_head = Some(index);
        self.degree -= 1;
        self.mod_count += 1;
        if self.degree == 0 {
            self.links.clear();
            self.free_head = None;
        }
        value
    }

    fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            match &self.links[index] {
                Link::Occupied { value, next, .. } => {
                    if pred(value) {
                        return Some(index);
                    }
                    cursor = *next;
                }
                Link::Free { .. } => unreachable!("live chain reaches a free slot"),
            }
        }
        None
    }

    /// Removes the first entry equal to `entry`.  Returns whether an entry
    /// was removed.
    pub fn remove(&mut self, entry: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        Ok(self.remove_if(|e| e == entry)?.is_some())
    }

    /// Removes the first entry matching `pred` and returns it.
    pub fn remove_if(&mut self, pred: impl FnMut(&T) -> bool) -> Result<Option<T>> {
        self.check_modifiable()?;
        Ok(self.take_first(pred))
    }

    pub(crate) fn take_first(&mut self, pred: impl FnMut(&T) -> bool) -> Option<T> {
        self.position(pred).map(|index| self.unlink(index))
    }

    /// Removes every entry matching `pred`, returning how many were removed.
    pub fn remove_all_if(&mut self, pred: impl FnMut(&T) -> bool) -> Result<usize> {
        self.check_modifiable()?;
        Ok(self.take_all(pred))
    }

    pub(crate) fn take_all(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let (matches, next) = match &self.links[index] {
                Link::Occupied { value, next, .. } => (pred(value), *next),
                Link::Free { .. } => unreachable!("live chain reaches a free slot"),
            };
            if matches {
                self.unlink(index);
                removed += 1;
            }
            cursor = next;
        }
        removed
    }

    /// Removes every entry and resets the loop count.
    pub fn clear(&mut self) -> Result<()> {
        self.check_modifiable()?;
        self.links.clear();
        self.head = None;
        self.tail = None;
        self.free_head = None;
        self.degree = 0;
        self.loop_num = 0;
        self.mod_count += 1;
        Ok(())
    }

    pub fn contains(&self, entry: &T) -> bool
    where
        T: PartialEq,
    {
        self.position(|e| e == entry).is_some()
    }

    /// Consumes the bag, returning its owning vertex.
    pub fn into_vertex(self) -> Option<V> {
        self.vertex
    }

    pub(crate) fn add_loop(&mut self) {
        self.loop_num += 1;
    }

    pub(crate) fn remove_loops(&mut self, count: usize) {
        debug_assert!(count <= self.loop_num);
        self.loop_num -= count;
    }

    /// Iterates the entries from head to tail.
    pub fn iter(&self) -> BagIter<'_, T> {
        BagIter {
            links: &self.links,
            next: self.head,
            remaining: self.degree,
        }
    }

    /// Creates a detached fail-fast cursor positioned before the first
    /// entry.
    pub fn cursor(&self) -> BagCursor {
        BagCursor {
            expected: self.mod_count,
            next: self.head,
            last: None,
        }
    }
}

impl<V: Debug, T: Debug> Debug for Bag<V, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bag")
            .field("vertex", &self.vertex)
            .field("entries", &DebugEntries(self))
            .field("loop_num", &self.loop_num)
            .finish()
    }
}

struct DebugEntries<'a, V, T>(&'a Bag<V, T>);

impl<V, T: Debug> Debug for DebugEntries<'_, V, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'a, V, T> IntoIterator for &'a Bag<V, T> {
    type Item = &'a T;
    type IntoIter = BagIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over the entries of a bag, head to tail.
#[derive(Clone)]
pub struct BagIter<'a, T> {
    links: &'a [Link<T>],
    next: Option<usize>,
    remaining: usize,
}

impl<T> BagIter<'_, T> {
    /// An iterator yielding nothing.
    pub fn empty() -> Self {
        Self {
            links: &[],
            next: None,
            remaining: 0,
        }
    }
}

impl<'a, T> Iterator for BagIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let index = self.next?;
        match &self.links[index] {
            Link::Occupied { value, next, .. } => {
                self.next = *next;
                self.remaining -= 1;
                Some(value)
            }
            Link::Free { .. } => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for BagIter<'_, T> {}

/// A fail-fast cursor over a [`Bag`].
///
/// The cursor does not borrow the bag; it is handed the bag at every step.
/// It remembers the bag's modification count when it was created, and any
/// step taken after the bag changed by other means fails with
/// [`GraphError::ConcurrentModification`].  Removing through the cursor
/// itself keeps it valid.  A cursor must only be used with the bag that
/// created it.
#[derive(Clone, Debug)]
pub struct BagCursor {
    expected: usize,
    next: Option<usize>,
    last: Option<usize>,
}

impl BagCursor {
    /// Advances the cursor and returns the entry it passed over, or `None`
    /// at the end of the bag.
    pub fn next<'b, V, T>(&mut self, bag: &'b Bag<V, T>) -> Result<Option<&'b T>> {
        bag.check_stamp(self.expected)?;
        let Some(index) = self.next else {
            return Ok(None);
        };
        match bag.links.get(index) {
            Some(Link::Occupied { value, next, .. }) => {
                self.next = *next;
                self.last = Some(index);
                Ok(Some(value))
            }
            _ => Err(GraphError::ConcurrentModification {
                expected: self.expected,
                actual: bag.mod_count,
            }),
        }
    }

    /// Checks whether another entry remains, without advancing.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Removes the entry most recently returned by [`BagCursor::next`].
    pub fn remove<V, T>(&mut self, bag: &mut Bag<V, T>) -> Result<T> {
        bag.check_modifiable()?;
        bag.check_stamp(self.expected)?;
        let Some(index) = self.last.take() else {
            debug!("bag cursor remove without a preceding next");
            return Err(GraphError::InvalidIteratorState);
        };
        let value = bag.unlink(index);
        self.expected = bag.mod_count;
        Ok(value)
    }
}
