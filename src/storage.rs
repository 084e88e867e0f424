//! The vertex-indexed bag array shared by every graph implementation.
//!
//! An [`AdjacencyStore`] owns one [`Bag`] per vertex, in insertion order, plus
//! the graph-wide edge and modification counters.  It knows nothing about
//! directedness; the graph types decide which bags an edge is written to.

use std::borrow::Cow;

use crate::{
    bag::Bag,
    error::{GraphError, Result},
    graph_ref::GraphRef,
    tracing_support::trace,
    vertex::Vertex,
};

pub(crate) struct AdjacencyStore<V: Vertex, T> {
    bags: Vec<Bag<V, T>>,
    edge_num: usize,
    mod_count: usize,
    /// Lower bound for the stamp of any new bag.
    retired_stamp: usize,
    graph_ref: GraphRef,
}

impl<V: Vertex, T> AdjacencyStore<V, T> {
    pub fn new() -> Self {
        Self {
            bags: Vec::new(),
            edge_num: 0,
            mod_count: 0,
            retired_stamp: 0,
            graph_ref: GraphRef::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(GraphError::InvalidArgument("capacity must be positive"));
        }
        let mut store = Self::new();
        store.bags.reserve(capacity);
        Ok(store)
    }

    /// Creates a store with the same vertices in the same order but no
    /// entries, under a fresh graph identity.
    pub fn empty_like<U>(&self) -> AdjacencyStore<V, U> {
        let mut store = AdjacencyStore::new();
        store.bags.reserve(self.bags.len());
        for v in self.vertices() {
            store.add_vertex(v.clone());
        }
        store
    }

    pub fn graph_ref(&self) -> GraphRef {
        self.graph_ref
    }

    pub fn vertex_num(&self) -> usize {
        self.bags.len()
    }

    pub fn edge_num(&self) -> usize {
        self.edge_num
    }

    pub fn mod_count(&self) -> usize {
        self.mod_count
    }

    fn set_slot(&self, v: &V, slot: Option<usize>) {
        if let Some(index) = v.vertex_index() {
            index.set_slot(self.graph_ref, slot);
        }
    }

    /// Finds the slot of `v`.  Vertices carrying a slot table are looked up
    /// in O(1) when the table has a matching entry for this graph.  An equal
    /// vertex built separately has its own table, so a miss falls back to the
    /// scan and lookup always agrees with `Eq`.
    pub fn index_of(&self, v: &V) -> Option<usize> {
        let recorded = v
            .vertex_index()
            .and_then(|index| index.get_slot(self.graph_ref))
            .filter(|&slot| self.bags.get(slot).and_then(Bag::vertex) == Some(v));
        recorded.or_else(|| self.bags.iter().position(|bag| bag.vertex() == Some(v)))
    }

    pub fn contains(&self, v: &V) -> bool {
        self.index_of(v).is_some()
    }

    pub fn bag(&self, v: &V) -> Option<&Bag<V, T>> {
        self.index_of(v).map(|index| &self.bags[index])
    }

    pub fn bag_at(&self, index: usize) -> Option<&Bag<V, T>> {
        self.bags.get(index)
    }

    pub fn bag_at_mut(&mut self, index: usize) -> Option<&mut Bag<V, T>> {
        self.bags.get_mut(index)
    }

    pub fn bag_mut(&mut self, v: &V) -> Option<&mut Bag<V, T>> {
        self.index_of(v).map(|index| &mut self.bags[index])
    }

    /// The bag of `v`, or the empty sentinel bag if `v` is absent.
    pub fn adjacency(&self, v: &V) -> Cow<'_, Bag<V, T>>
    where
        T: Clone,
    {
        match self.bag(v) {
            Some(bag) => Cow::Borrowed(bag),
            None => Cow::Owned(Bag::unmodifiable()),
        }
    }

    pub fn bags(&self) -> std::slice::Iter<'_, Bag<V, T>> {
        self.bags.iter()
    }

    pub fn bags_mut(&mut self) -> std::slice::IterMut<'_, Bag<V, T>> {
        self.bags.iter_mut()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.bags.iter().filter_map(Bag::vertex)
    }

    pub fn vertex_at(&self, index: usize) -> Result<&V> {
        self.bags
            .get(index)
            .and_then(Bag::vertex)
            .ok_or(GraphError::IndexOutOfRange {
                index,
                len: self.bags.len(),
            })
    }

    /// Adds `v` with an empty bag.  Returns `false` if it is already present.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.contains(&v) {
            return false;
        }
        trace!(graph = ?self.graph_ref, vertex = ?v, "add vertex");
        self.set_slot(&v, Some(self.bags.len()));
        self.mod_count += 1;
        let stamp = self.mod_count.max(self.retired_stamp);
        self.bags.push(Bag::with_stamp(v, stamp));
        true
    }

    /// Returns the slot of `v`, adding it first if necessary.
    pub fn ensure_vertex(&mut self, v: &V) -> usize {
        match self.index_of(v) {
            Some(index) => index,
            None => {
                self.add_vertex(v.clone());
                self.bags.len() - 1
            }
        }
    }

    /// Removes the bag at `index`, shifting later bags down one slot.  Edge
    /// counts are left to the caller.
    pub fn remove_vertex_at(&mut self, index: usize) -> Result<Bag<V, T>> {
        if index >= self.bags.len() {
            return Err(GraphError::IndexOutOfRange {
                index,
                len: self.bags.len(),
            });
        }
        let bag = self.bags.remove(index);
        self.retire(&bag);
        trace!(graph = ?self.graph_ref, vertex = ?bag.vertex(), index, "remove vertex");
        if let Some(v) = bag.vertex() {
            self.set_slot(v, None);
        }
        for (slot, shifted) in self.bags.iter().enumerate().skip(index) {
            if let Some(v) = shifted.vertex() {
                self.set_slot(v, Some(slot));
            }
        }
        self.mod_count += 1;
        Ok(bag)
    }

    /// Records the final stamp of a bag leaving the store.  New bags start
    /// above it, so a cursor taken on a removed bag never matches the bag
    /// of a re-added vertex.
    fn retire(&mut self, bag: &Bag<V, T>) {
        self.retired_stamp = self.retired_stamp.max(bag.mod_count() + 1);
    }

    pub fn edge_added(&mut self) {
        self.edge_num += 1;
        self.mod_count += 1;
    }

    pub fn edges_removed(&mut self, count: usize) {
        self.edge_num -= count;
        self.mod_count += 1;
    }

    pub fn clear(&mut self) {
        trace!(graph = ?self.graph_ref, vertices = self.bags.len(), "clear");
        for v in self.vertices() {
            self.set_slot(v, None);
        }
        let retired = self.bags.iter().map(|bag| bag.mod_count() + 1).max();
        self.retired_stamp = self.retired_stamp.max(retired.unwrap_or(0));
        self.bags.clear();
        self.edge_num = 0;
        self.mod_count += 1;
    }

    pub fn max_degree(&self) -> usize {
        self.bags.iter().map(Bag::degree).max().unwrap_or(0)
    }

    pub fn number_of_loops(&self) -> usize {
        self.bags.iter().map(Bag::loop_num).sum()
    }

    /// Deep copy under a fresh graph identity.
    pub fn copy(&self) -> Self
    where
        T: Clone,
    {
        let copy = Self {
            bags: self.bags.clone(),
            edge_num: self.edge_num,
            mod_count: 0,
            retired_stamp: self.retired_stamp,
            graph_ref: GraphRef::new(),
        };
        trace!(from = ?self.graph_ref, to = ?copy.graph_ref, "copy graph");
        for (slot, bag) in copy.bags.iter().enumerate() {
            if let Some(v) = bag.vertex() {
                copy.set_slot(v, Some(slot));
            }
        }
        copy
    }
}

impl<V: Vertex, T> Drop for AdjacencyStore<V, T> {
    fn drop(&mut self) {
        for v in self.vertices() {
            self.set_slot(v, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::Indexed;

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(matches!(
            AdjacencyStore::<i32, i32>::with_capacity(0),
            Err(GraphError::InvalidArgument(_))
        ));
        assert!(AdjacencyStore::<i32, i32>::with_capacity(4).is_ok());
    }

    #[test]
    fn test_add_and_lookup() {
        let mut store = AdjacencyStore::<&str, &str>::new();
        assert!(store.add_vertex("a"));
        assert!(store.add_vertex("b"));
        assert!(!store.add_vertex("a"));
        assert_eq!(store.vertex_num(), 2);
        assert_eq!(store.index_of(&"b"), Some(1));
        assert_eq!(store.index_of(&"c"), None);
        assert_eq!(store.vertex_at(0), Ok(&"a"));
        assert_eq!(
            store.vertex_at(2),
            Err(GraphError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_absent_vertex_gets_sentinel() {
        let store = AdjacencyStore::<i32, i32>::new();
        let bag = store.adjacency(&7);
        assert!(!bag.is_modifiable());
        assert!(bag.is_empty());
    }

    #[test]
    fn test_indexed_slots_follow_compaction() {
        let vs: Vec<_> = (0..4).map(Indexed::new).collect();
        let mut store = AdjacencyStore::<Indexed<i32>, ()>::new();
        for v in &vs {
            store.add_vertex(v.clone());
        }
        let removed = store.remove_vertex_at(1).unwrap();
        assert_eq!(removed.vertex(), Some(&vs[1]));
        assert_eq!(vs[1].index().get_slot(store.graph_ref()), None);
        assert_eq!(vs[2].index().get_slot(store.graph_ref()), Some(1));
        assert_eq!(vs[3].index().get_slot(store.graph_ref()), Some(2));
        assert_eq!(store.index_of(&vs[3]), Some(2));
        assert_eq!(store.index_of(&vs[1]), None);
    }

    #[test]
    fn test_copy_registers_new_slots() {
        let v = Indexed::new(1);
        let mut store = AdjacencyStore::<Indexed<i32>, ()>::new();
        store.add_vertex(v.clone());
        let copy = store.copy();
        assert_ne!(copy.graph_ref(), store.graph_ref());
        assert_eq!(v.index().num_graphs(), 2);
        assert_eq!(copy.index_of(&v), Some(0));
        drop(copy);
        assert_eq!(v.index().num_graphs(), 1);
        store.clear();
        assert_eq!(v.index().num_graphs(), 0);
    }

    #[test]
    fn test_empty_like_keeps_order() {
        let mut store = AdjacencyStore::<char, char>::new();
        for v in ['x', 'y', 'z'] {
            store.add_vertex(v);
        }
        let i = store.index_of(&'x').unwrap();
        store.bag_at_mut(i).unwrap().push('y');
        store.edge_added();
        let empty: AdjacencyStore<char, u8> = store.empty_like();
        assert_eq!(empty.vertices().collect::<Vec<_>>(), vec![&'x', &'y', &'z']);
        assert_eq!(empty.edge_num(), 0);
        assert_eq!(empty.max_degree(), 0);
    }

    #[test]
    fn test_equal_indexed_vertices_share_one_slot() {
        let mut store = AdjacencyStore::<Indexed<i32>, ()>::new();
        assert!(store.add_vertex(Indexed::new(1)));
        assert!(store.add_vertex(Indexed::new(2)));
        let twin = Indexed::new(2);
        assert!(!store.add_vertex(twin.clone()));
        assert_eq!(store.vertex_num(), 2);
        assert_eq!(store.index_of(&twin), Some(1));
        assert_eq!(twin.index().num_graphs(), 0);
        assert_eq!(store.ensure_vertex(&twin), 1);
    }

    #[test]
    fn test_readded_vertex_gets_fresh_stamp() {
        let mut store = AdjacencyStore::<char, char>::new();
        store.add_vertex('a');
        store.bag_mut(&'a').unwrap().push('a');
        let old_stamp = store.bag(&'a').unwrap().mod_count();
        let removed = store.remove_vertex_at(0).unwrap();
        assert_eq!(removed.mod_count(), old_stamp);
        store.add_vertex('a');
        assert!(store.bag(&'a').unwrap().mod_count() > old_stamp);

        store.bag_mut(&'a').unwrap().push('b');
        let before_clear = store.bag(&'a').unwrap().mod_count();
        store.clear();
        store.add_vertex('a');
        assert!(store.bag(&'a').unwrap().mod_count() > before_clear);
    }
}
