//! A bidirectional view built from two directed graphs.
//!
//! [`Bidirected`] owns a `forward` graph holding every edge as given and a
//! `reverse` graph holding every edge flipped.  Out-adjacency is read from
//! the forward graph and in-adjacency from the reverse graph; the total
//! adjacency of a vertex is the out-entries followed by the in-entries.
//!
//! Both inner graphs always hold the same vertices in the same order.

use std::{
    fmt::{Debug, Formatter},
    hash::Hash,
};

use crate::{
    concat::BiConcat,
    edge::{DirectedEdge, Directional},
    edge_graph::DirectedEdgeGraph,
    error::Result,
    graph::{EdgeOpGraph, Graph, GraphMut, Reversible, VertexCursor, VertexOpGraph},
    tracing_support::trace,
    vertex_graph::DirectedGraph,
};

pub struct Bidirected<G> {
    forward: G,
    reverse: G,
}

/// A bidirectional graph over bare vertices.
pub type BidirectedGraph<V> = Bidirected<DirectedGraph<V>>;

/// A bidirectional graph over edge objects.
pub type BidirectedEdgeGraph<E> = Bidirected<DirectedEdgeGraph<E>>;

/// A bidirectional graph over [`DirectedEdge`]s.
pub type WeightedBidigraph<V> = BidirectedEdgeGraph<DirectedEdge<V>>;

impl<G: Reversible> Bidirected<G> {
    /// The graph holding every edge as it was added.
    pub fn forward_graph(&self) -> &G {
        &self.forward
    }

    /// The graph holding every edge flipped.
    pub fn reverse_graph(&self) -> &G {
        &self.reverse
    }

    pub fn out_degree(&self, v: &G::Vertex) -> usize {
        self.forward.degree(v)
    }

    pub fn in_degree(&self, v: &G::Vertex) -> usize {
        self.reverse.degree(v)
    }

    pub fn out_adjacent(&self, v: &G::Vertex) -> impl Iterator<Item = &G::Entry> {
        self.forward.adjacent(v)
    }

    /// Iterates over the in-adjacency of `v`, as stored by the reverse graph.
    pub fn in_adjacent(&self, v: &G::Vertex) -> impl Iterator<Item = &G::Entry> {
        self.reverse.adjacent(v)
    }

    pub fn for_each_out_adjacent(&self, v: &G::Vertex, action: impl FnMut(&G::Entry)) {
        self.forward.for_each_adjacent(v, action);
    }

    pub fn for_each_in_adjacent(&self, v: &G::Vertex, action: impl FnMut(&G::Entry)) {
        self.reverse.for_each_adjacent(v, action);
    }
}

impl<G: Reversible> Graph for Bidirected<G> {
    type Vertex = G::Vertex;
    type Entry = G::Entry;

    fn vertex_num(&self) -> usize {
        self.forward.vertex_num()
    }

    fn index_of(&self, v: &G::Vertex) -> Option<usize> {
        self.forward.index_of(v)
    }

    fn vertex_at(&self, index: usize) -> Result<&G::Vertex> {
        self.forward.vertex_at(index)
    }

    fn vertices(&self) -> impl Iterator<Item = &G::Vertex> {
        self.forward.vertices()
    }

    fn edge_num(&self) -> usize {
        self.forward.edge_num()
    }

    /// Out-degree plus in-degree.  A self-loop counts twice.
    fn degree(&self, v: &G::Vertex) -> usize {
        self.out_degree(v) + self.in_degree(v)
    }

    fn self_loops(&self, v: &G::Vertex) -> usize {
        self.forward.self_loops(v)
    }

    fn number_of_loops(&self) -> usize {
        self.forward.number_of_loops()
    }

    fn average_degree(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (2 * self.edge_num()) as f64 / self.vertex_num() as f64
    }

    fn adjacent(&self, v: &G::Vertex) -> impl Iterator<Item = &G::Entry> {
        BiConcat::new(self.out_adjacent(v), self.in_adjacent(v))
    }

    fn for_each_adjacent(&self, v: &G::Vertex, mut action: impl FnMut(&G::Entry)) {
        self.forward.for_each_adjacent(v, &mut action);
        self.reverse.for_each_adjacent(v, action);
    }

    fn mod_count(&self) -> usize {
        self.forward.mod_count() + self.reverse.mod_count()
    }

    /// Vertices of a bidirected graph can only be removed through the graph
    /// itself; the cursor's `remove` always fails.
    fn vertex_cursor(&self) -> VertexCursor {
        VertexCursor::read_only(self.mod_count())
    }
}

impl<G: Reversible> GraphMut for Bidirected<G> {
    fn new() -> Self {
        Self {
            forward: G::new(),
            reverse: G::new(),
        }
    }

    fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            forward: G::with_capacity(capacity)?,
            reverse: G::with_capacity(capacity)?,
        })
    }

    fn add(&mut self, v: G::Vertex) -> bool {
        self.reverse.add(v.clone());
        self.forward.add(v)
    }

    fn remove(&mut self, v: &G::Vertex) -> bool {
        self.reverse.remove(v);
        self.forward.remove(v)
    }

    fn remove_at(&mut self, index: usize) -> Result<G::Vertex> {
        let v = self.forward.remove_at(index)?;
        self.reverse.remove(&v);
        Ok(v)
    }

    fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    fn copy(&self) -> Self {
        Self {
            forward: self.forward.copy(),
            reverse: self.reverse.copy(),
        }
    }
}

impl<G: Reversible> Reversible for Bidirected<G> {
    /// Swaps the roles of the two inner graphs.
    fn reverse(&self) -> Self {
        Self {
            forward: self.reverse.copy(),
            reverse: self.forward.copy(),
        }
    }
}

impl<G> VertexOpGraph for Bidirected<G>
where
    G: Reversible + VertexOpGraph,
{
    fn add_edge(&mut self, v: G::Vertex, w: G::Vertex) {
        trace!(from = ?v, to = ?w, "add bidirected edge");
        self.add(v.clone());
        self.add(w.clone());
        self.forward.add_edge(v.clone(), w.clone());
        self.reverse.add_edge(w, v);
    }

    fn remove_edge(&mut self, v: &G::Vertex, w: &G::Vertex) -> bool {
        if !self.forward.remove_edge(v, w) {
            return false;
        }
        self.reverse.remove_edge(w, v);
        true
    }
}

impl<G> EdgeOpGraph for Bidirected<G>
where
    G: Reversible + EdgeOpGraph,
    G::Entry: Directional<Vertex = G::Vertex>,
{
    fn add_edge(&mut self, edge: G::Entry) -> Result<()> {
        trace!(edge = ?edge, "add bidirected edge");
        let reversed = edge.reverse();
        self.add(edge.from().clone());
        self.add(edge.to().clone());
        self.forward.add_edge(edge)?;
        self.reverse.add_edge(reversed)
    }

    fn remove_edge(&mut self, edge: &G::Entry) -> bool {
        if !self.forward.remove_edge(edge) {
            return false;
        }
        self.reverse.remove_edge(&edge.reverse());
        true
    }
}

impl<G: Reversible> Default for Bidirected<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Reversible> Clone for Bidirected<G> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<G> PartialEq for Bidirected<G>
where
    G: Reversible,
    G::Entry: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.forward.structurally_eq(&other.forward) && self.reverse.structurally_eq(&other.reverse)
    }
}

impl<G: Debug> Debug for Bidirected<G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bidirected")
            .field("forward", &self.forward)
            .field("reverse", &self.reverse)
            .finish()
    }
}
