use std::{
    borrow::Cow,
    fmt::{Debug, Formatter},
    hash::Hash,
    marker::PhantomData,
};

use crate::{
    bag::{Bag, BagIter},
    directedness::{Directed, Directedness, Undirected},
    edge::{DirectedEdge, Directional, Edge, UndirectedEdge},
    error::{GraphError, Result},
    format_debug::format_debug,
    graph::{EdgeOpGraph, Graph, GraphMut, Reversible},
    graph_ref::GraphRef,
    storage::AdjacencyStore,
    tracing_support::trace,
};

type EdgeVertex<E> = <E as Edge>::Vertex;

/// A graph whose bags hold caller-supplied edge objects.
///
/// An edge is filed under the vertex returned by [`Edge::either`]; with
/// `D = Undirected` the same edge is also filed under its other endpoint.
/// In the directed flavor `either` must be the tail.
pub struct EdgeGraph<E: Edge, D: Directedness> {
    store: AdjacencyStore<EdgeVertex<E>, E>,
    directedness: PhantomData<D>,
}

pub type DirectedEdgeGraph<E> = EdgeGraph<E, Directed>;
pub type UndirectedEdgeGraph<E> = EdgeGraph<E, Undirected>;

/// A directed edge graph over [`DirectedEdge`]s.
pub type WeightedDigraph<V> = DirectedEdgeGraph<DirectedEdge<V>>;

/// An undirected edge graph over [`UndirectedEdge`]s.
pub type WeightedGraph<V> = UndirectedEdgeGraph<UndirectedEdge<V>>;

/// Resolves the endpoints an edge is filed under.
fn endpoints<E: Edge>(edge: &E) -> Option<(&E::Vertex, &E::Vertex)> {
    let v = edge.either();
    edge.other(v).map(|w| (v, w))
}

impl<E: Edge, D: Directedness> EdgeGraph<E, D> {
    fn from_store(store: AdjacencyStore<E::Vertex, E>) -> Self {
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
    pub fn adjacency(&self, v: &E::Vertex) -> Cow<'_, Bag<E::Vertex, E>> {
        self.store.adjacency(v)
    }

    /// Iterates over every stored edge once.  An undirected edge is reported
    /// from the bag of its `either` endpoint only, and an undirected self-loop
    /// from the first of its two entries.
    pub fn edges(&self) -> impl Iterator<Item = &E> {
        self.store.bags().flat_map(|bag| {
            let owner = bag.vertex();
            let mut first_loop_entry = false;
            bag.iter().filter(move |e| {
                if D::is_directed() {
                    true
                } else if e.is_self_loop() {
                    first_loop_entry = !first_loop_entry;
                    first_loop_entry
                } else {
                    Some(e.either()) == owner
                }
            })
        })
    }
}

impl<E: Edge, D: Directedness> Graph for EdgeGraph<E, D> {
    type Vertex = E::Vertex;
    type Entry = E;

    fn vertex_num(&self) -> usize {
        self.store.vertex_num()
    }

    fn index_of(&self, v: &E::Vertex) -> Option<usize> {
        self.store.index_of(v)
    }

    fn vertex_at(&self, index: usize) -> Result<&E::Vertex> {
        self.store.vertex_at(index)
    }

    fn vertices(&self) -> impl Iterator<Item = &E::Vertex> {
        self.store.vertices()
    }

    fn edge_num(&self) -> usize {
        self.store.edge_num()
    }

    fn degree(&self, v: &E::Vertex) -> usize {
        self.store.bag(v).map_or(0, Bag::degree)
    }

    fn self_loops(&self, v: &E::Vertex) -> usize {
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

    fn adjacent(&self, v: &E::Vertex) -> impl Iterator<Item = &E> {
        self.store.bag(v).map_or_else(BagIter::empty, Bag::iter)
    }

    fn mod_count(&self) -> usize {
        self.store.mod_count()
    }
}

impl<E: Edge, D: Directedness> GraphMut for EdgeGraph<E, D> {
    fn new() -> Self {
        Self::from_store(AdjacencyStore::new())
    }

    fn with_capacity(capacity: usize) -> Result<Self> {
        AdjacencyStore::with_capacity(capacity).map(Self::from_store)
    }

    fn add(&mut self, v: E::Vertex) -> bool {
        self.store.add_vertex(v)
    }

    fn remove_at(&mut self, index: usize) -> Result<E::Vertex> {
        let bag = self.store.remove_vertex_at(index)?;
        let v = bag
            .vertex()
            .cloned()
            .ok_or(GraphError::InvalidArgument("bag without a vertex"))?;
        let removed = if D::is_directed() {
            let incoming: usize = self
                .store
                .bags_mut()
                .map(|other| other.take_all(|e| endpoints(e).is_some_and(|(_, head)| *head == v)))
                .sum();
            bag.degree() + incoming
        } else {
            for e in bag.iter().filter(|e| !e.is_self_loop()) {
                if let Some(other) = e.other(&v).and_then(|w| self.store.bag_mut(w)) {
                    other.take_first(|x| x == e);
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

impl<E: Edge, D: Directedness> EdgeOpGraph for EdgeGraph<E, D> {
    fn add_edge(&mut self, edge: E) -> Result<()> {
        let (v, w) = endpoints(&edge)
            .map(|(v, w)| (v.clone(), w.clone()))
            .ok_or(GraphError::InvalidArgument("edge endpoints do not resolve"))?;
        let vi = self.store.ensure_vertex(&v);
        let wi = self.store.ensure_vertex(&w);
        trace!(graph = ?self.graph_ref(), edge = ?edge, "add edge");
        if !D::is_directed() {
            if let Some(bag) = self.store.bag_at_mut(wi) {
                bag.push(edge.clone());
            }
        }
        if let Some(bag) = self.store.bag_at_mut(vi) {
            bag.push(edge);
            if vi == wi {
                bag.add_loop();
            }
        }
        self.store.edge_added();
        Ok(())
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        let Some((v, w)) = endpoints(edge) else {
            return false;
        };
        let (Some(vi), Some(wi)) = (self.store.index_of(v), self.store.index_of(w)) else {
            return false;
        };
        let Some(bag) = self.store.bag_at_mut(vi) else {
            return false;
        };
        if bag.take_first(|x| x == edge).is_none() {
            return false;
        }
        if !D::is_directed() {
            if let Some(bag) = self.store.bag_at_mut(wi) {
                bag.take_first(|x| x == edge);
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

impl<E: Directional> Reversible for EdgeGraph<E, Directed> {
    fn reverse(&self) -> Self {
        trace!(graph = ?self.graph_ref(), edges = self.edge_num(), "reverse");
        let mut store = self.store.empty_like();
        for e in self.store.bags().flat_map(Bag::iter) {
            let reversed = e.reverse();
            let Some(tail) = self.store.index_of(reversed.either()) else {
                continue;
            };
            if let Some(bag) = store.bag_at_mut(tail) {
                let is_loop = reversed.is_self_loop();
                bag.push(reversed);
                if is_loop {
                    bag.add_loop();
                }
            }
            store.edge_added();
        }
        Self::from_store(store)
    }
}

impl<E: Edge, D: Directedness> Default for EdgeGraph<E, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Edge, D: Directedness> Clone for EdgeGraph<E, D> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<E: Edge + Eq + Hash, D: Directedness> PartialEq for EdgeGraph<E, D> {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl<E: Edge, D: Directedness> Debug for EdgeGraph<E, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = if D::is_directed() {
            "DirectedEdgeGraph"
        } else {
            "UndirectedEdgeGraph"
        };
        format_debug(self, f, name)
    }
}
