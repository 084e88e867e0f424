use std::{
    borrow::Cow,
    fmt::{Debug, Formatter},
    marker::PhantomData,
};

use crate::{
    bag::{Bag, BagIter},
    directedness::{Directed, Directedness, Undirected},
    error::{GraphError, Result},
    format_debug::format_debug,
    graph::{Graph, GraphMut, Reversible, VertexOpGraph},
    graph_ref::GraphRef,
    storage::AdjacencyStore,
    tracing_support::trace,
    vertex::Vertex,
};

/// A graph whose edges are named by their endpoints.  Each bag holds the
/// neighbors of its vertex.
///
/// With `D = Undirected` an edge `{v, w}` puts `w` in `v`'s bag and `v` in
/// `w`'s bag; a self-loop puts two copies of `v` in its own bag.  With
/// `D = Directed` an edge `v -> w` only puts `w` in `v`'s bag.
pub struct VertexGraph<V: Vertex, D: Directedness> {
    store: AdjacencyStore<V, V>,
    directedness: PhantomData<D>,
}

pub type DirectedGraph<V> = VertexGraph<V, Directed>;
pub type UndirectedGraph<V> = VertexGraph<V, Undirected>;

impl<V: Vertex, D: Directedness> VertexGraph<V, D> {
    fn from_store(store: AdjacencyStore<V, V>) -> Self {
        Self {
            store,
            directedness: PhantomData,
        }
    }

    /// Gets the identity used to key fast-index slot tables.
    pub fn graph_ref(&self) -> GraphRef {
        self.store.graph_ref()
    }

    /// Gets the bag of `v`, or the unmodifiable empty bag if `v` is absent.
    pub fn adjacency(&self, v: &V) -> Cow<'_, Bag<V, V>> {
        self.store.adjacency(v)
    }
}

impl<V: Vertex, D: Directedness> Graph for VertexGraph<V, D> {
    type Vertex = V;
    type Entry = V;

    fn vertex_num(&self) -> usize {
        self.store.vertex_num()
    }

    fn index_of(&self, v: &V) -> Option<usize> {
        self.store.index_of(v)
    }

    fn vertex_at(&self, index: usize) -> Result<&V> {
        self.store.vertex_at(index)
    }

    fn vertices(&self) -> impl Iterator<Item = &V> {
        self.store.vertices()
    }

    fn edge_num(&self) -> usize {
        self.store.edge_num()
    }

    fn degree(&self, v: &V) -> usize {
        self.store.bag(v).map_or(0, Bag::degree)
    }

    fn self_loops(&self, v: &V) -> usize {
        self.store.bag(v).map_or(0, Bag::loop_num)
    }

    fn number_of_loops(&self) -> usize {
        self.store.number_of_loops()
    }

    fn max_degree(&self) -> usize {
        self.store.max_degree()
    }

    fn average_degree(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (D::entries_per_edge() * self.edge_num()) as f64 / self.vertex_num() as f64
    }

    fn adjacent(&self, v: &V) -> impl Iterator<Item = &V> {
        self.store.bag(v).map_or_else(BagIter::empty, Bag::iter)
    }

    fn mod_count(&self) -> usize {
        self.store.mod_count()
    }
}

impl<V: Vertex, D: Directedness> GraphMut for VertexGraph<V, D> {
    fn new() -> Self {
        Self::from_store(AdjacencyStore::new())
    }

    fn with_capacity(capacity: usize) -> Result<Self> {
        AdjacencyStore::with_capacity(capacity).map(Self::from_store)
    }

    fn add(&mut self, v: V) -> bool {
        self.store.add_vertex(v)
    }

    fn remove_at(&mut self, index: usize) -> Result<V> {
        let bag = self.store.remove_vertex_at(index)?;
        let v = bag
            .vertex()
            .cloned()
            .ok_or(GraphError::InvalidArgument("bag without a vertex"))?;
        let removed = if D::is_directed() {
            let incoming: usize = self
                .store
                .bags_mut()
                .map(|other| other.take_all(|w| *w == v))
                .sum();
            bag.degree() + incoming
        } else {
            for w in bag.iter().filter(|w| **w != v) {
                if let Some(other) = self.store.bag_mut(w) {
                    other.take_first(|x| *x == v);
                }
            }
            bag.degree() - bag.loop_num()
        };
        trace!(vertex = ?v, edges = removed, "removed vertex edges");
        self.store.edges_removed(removed);
        Ok(v)
    }

    fn clear(&mut self) {
        self.store.clear();
    }

    fn copy(&self) -> Self {
        Self::from_store(self.store.copy())
    }
}

impl<V: Vertex, D: Directedness> VertexOpGraph for VertexGraph<V, D> {
    fn add_edge(&mut self, v: V, w: V) {
        let vi = self.store.ensure_vertex(&v);
        let wi = self.store.ensure_vertex(&w);
        trace!(graph = ?self.graph_ref(), from = ?v, to = ?w, "add edge");
        if let Some(bag) = self.store.bag_at_mut(vi) {
            bag.push(w);
        }
        if !D::is_directed() {
            if let Some(bag) = self.store.bag_at_mut(wi) {
                bag.push(v);
            }
        }
        if vi == wi {
            if let Some(bag) = self.store.bag_at_mut(vi) {
                bag.add_loop();
            }
        }
        self.store.edge_added();
    }

    fn remove_edge(&mut self, v: &V, w: &V) -> bool {
        let (Some(vi), Some(wi)) = (self.store.index_of(v), self.store.index_of(w)) else {
            return false;
        };
        let Some(bag) = self.store.bag_at_mut(vi) else {
            return false;
        };
        if bag.take_first(|x| x == w).is_none() {
            return false;
        }
        if !D::is_directed() {
            if let Some(bag) = self.store.bag_at_mut(wi) {
                bag.take_first(|x| x == v);
            }
        }
        if vi == wi {
            if let Some(bag) = self.store.bag_at_mut(vi) {
                bag.remove_loops(1);
            }
        }
        self.store.edges_removed(1);
        true
    }
}

impl<V: Vertex> Reversible for VertexGraph<V, Directed> {
    fn reverse(&self) -> Self {
        trace!(graph = ?self.graph_ref(), edges = self.edge_num(), "reverse");
        let mut store = self.store.empty_like();
        for (tail, bag) in self.store.bags().enumerate() {
            let Some(v) = bag.vertex() else { continue };
            for w in bag {
                let Some(head) = self.store.index_of(w) else {
                    continue;
                };
                if let Some(reversed) = store.bag_at_mut(head) {
                    reversed.push(v.clone());
                    if head == tail {
                        reversed.add_loop();
                    }
                }
                store.edge_added();
            }
        }
        Self::from_store(store)
    }
}

impl<V: Vertex, D: Directedness> Default for VertexGraph<V, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex, D: Directedness> Clone for VertexGraph<V, D> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<V: Vertex, D: Directedness> PartialEq for VertexGraph<V, D> {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl<V: Vertex, D: Directedness> Debug for VertexGraph<V, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = if D::is_directed() {
            "DirectedGraph"
        } else {
            "UndirectedGraph"
        };
        format_debug(self, f, name)
    }
}
