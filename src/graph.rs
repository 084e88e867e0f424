//! `Graph` and `GraphMut` are the core traits for working with graphs in this
//! library.  `Graph` provides read-only access to the vertex set and the
//! adjacency bags, while `GraphMut` extends it with vertex insertion and
//! removal, clearing and deep copies.
//!
//! Edges are added and removed through one of two capability traits:
//!
//! - [`VertexOpGraph`]: edges are named by their endpoints, and adjacency
//!   entries are bare vertices.
//! - [`EdgeOpGraph`]: edges are caller-supplied objects carrying their own
//!   endpoints and payload, and adjacency entries are those objects.
//!
//! Iteration over a graph borrows it, so the borrow checker rules out
//! structural changes while an iterator is alive.  When vertices must be
//! removed during a walk, use a [`VertexCursor`]: it holds no borrow between
//! steps and reports [`GraphError::ConcurrentModification`] if the graph was
//! changed by anything other than the cursor itself.

use std::{collections::HashMap, hash::Hash};

use crate::{
    error::{GraphError, Result},
    tracing_support::debug,
    vertex::Vertex,
};

/// A trait representing a graph built from per-vertex adjacency bags.
pub trait Graph {
    type Vertex: Vertex;
    /// The type stored in adjacency bags: a vertex or an edge object.
    type Entry;

    /// # Vertices

    /// Gets the number of vertices in the graph.
    fn vertex_num(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.vertex_num() == 0
    }

    /// Gets the slot of a vertex in insertion order, if present.
    fn index_of(&self, v: &Self::Vertex) -> Option<usize>;

    fn contains(&self, v: &Self::Vertex) -> bool {
        self.index_of(v).is_some()
    }

    /// Gets the vertex in slot `index`.
    fn vertex_at(&self, index: usize) -> Result<&Self::Vertex>;

    /// Iterates over the vertices in insertion order, with removed vertices
    /// compacted out.
    fn vertices(&self) -> impl Iterator<Item = &Self::Vertex>;

    /// Returns all vertices as a vector, or `None` if the graph is empty.
    fn to_array(&self) -> Option<Vec<Self::Vertex>> {
        if self.is_empty() {
            None
        } else {
            Some(self.vertices().cloned().collect())
        }
    }

    /// Gets the first vertex.
    fn start(&self) -> Option<&Self::Vertex> {
        self.vertex_at(0).ok()
    }

    /// Gets the vertex after `v` in insertion order.
    fn next(&self, v: &Self::Vertex) -> Option<&Self::Vertex> {
        let index = self.index_of(v)?;
        self.vertex_at(index + 1).ok()
    }

    /// Gets the vertex before `v` in insertion order.
    fn pre(&self, v: &Self::Vertex) -> Option<&Self::Vertex> {
        let index = self.index_of(v)?;
        self.vertex_at(index.checked_sub(1)?).ok()
    }

    /// # Edges

    /// Gets the number of edges.  A self-loop counts once.
    fn edge_num(&self) -> usize;

    /// Gets the number of adjacency entries of `v`; zero if `v` is absent.
    fn degree(&self, v: &Self::Vertex) -> usize;

    /// Gets the number of self-loops on `v`; zero if `v` is absent.
    fn self_loops(&self, v: &Self::Vertex) -> usize;

    /// Gets the total number of self-loops in the graph.
    fn number_of_loops(&self) -> usize;

    fn max_degree(&self) -> usize {
        self.vertices().map(|v| self.degree(v)).max().unwrap_or(0)
    }

    /// Gets the average vertex degree, or `0.0` for an empty graph.
    fn average_degree(&self) -> f64;

    /// Iterates over the adjacency entries of `v`.  An absent vertex has no
    /// entries.
    fn adjacent(&self, v: &Self::Vertex) -> impl Iterator<Item = &Self::Entry>;

    /// Applies `action` to every adjacency entry of `v`.
    fn for_each_adjacent(&self, v: &Self::Vertex, mut action: impl FnMut(&Self::Entry)) {
        self.adjacent(v).for_each(|entry| action(entry));
    }

    /// # Iteration

    /// Gets the structural modification count.  Every vertex or edge insertion
    /// and removal bumps it.
    fn mod_count(&self) -> usize;

    /// Creates a fail-fast cursor over the vertices.
    fn vertex_cursor(&self) -> VertexCursor {
        VertexCursor::new(self.mod_count())
    }

    /// Checks that both graphs have the same vertices and, for every vertex,
    /// the same multiset of adjacency entries.  Vertex order is ignored.
    fn structurally_eq<G>(&self, other: &G) -> bool
    where
        G: Graph<Vertex = Self::Vertex, Entry = Self::Entry>,
        Self::Entry: Eq + Hash,
    {
        self.vertex_num() == other.vertex_num()
            && self.edge_num() == other.edge_num()
            && self.vertices().all(|v| {
                other.contains(v)
                    && self.self_loops(v) == other.self_loops(v)
                    && multiset(self.adjacent(v)) == multiset(other.adjacent(v))
            })
    }
}

fn multiset<'a, T: Eq + Hash + 'a>(items: impl Iterator<Item = &'a T>) -> HashMap<&'a T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// A trait for graphs that can be modified.
pub trait GraphMut: Graph + Sized {
    fn new() -> Self;

    /// Creates an empty graph with room for `capacity` vertices.  A capacity
    /// of zero is rejected.
    fn with_capacity(capacity: usize) -> Result<Self>;

    /// Adds a vertex with no edges.  Returns `false` if it is already present.
    fn add(&mut self, v: Self::Vertex) -> bool;

    /// Removes a vertex and every edge touching it.  Returns `false` if the
    /// vertex is absent.
    fn remove(&mut self, v: &Self::Vertex) -> bool {
        match self.index_of(v) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Removes the vertex in slot `index` and every edge touching it.
    fn remove_at(&mut self, index: usize) -> Result<Self::Vertex>;

    /// Removes every vertex and edge.
    fn clear(&mut self);

    /// Creates a deep copy that shares no adjacency state with `self`.
    fn copy(&self) -> Self;
}

/// A directed graph that can produce its reverse.
pub trait Reversible: GraphMut {
    /// Returns a new graph with the same vertices, in the same order, and
    /// every edge reversed.
    fn reverse(&self) -> Self;
}

/// Edges named by their endpoints.
pub trait VertexOpGraph: GraphMut {
    /// Adds an edge from `v` to `w`, adding either endpoint if absent.
    /// Parallel edges and self-loops are allowed.
    fn add_edge(&mut self, v: Self::Vertex, w: Self::Vertex);

    /// Removes one edge from `v` to `w`.  Returns `false` if there is none.
    fn remove_edge(&mut self, v: &Self::Vertex, w: &Self::Vertex) -> bool;
}

/// Edges given as objects that carry their own endpoints.
pub trait EdgeOpGraph: GraphMut {
    /// Adds an edge, adding either endpoint if absent.  Fails if the edge's
    /// endpoints cannot be resolved.
    fn add_edge(&mut self, edge: Self::Entry) -> Result<()>;

    /// Removes one stored edge equal to `edge`.  Returns `false` if there is
    /// none.
    fn remove_edge(&mut self, edge: &Self::Entry) -> bool;
}

/// A fail-fast cursor over the vertices of a graph.
///
/// The cursor records the graph's modification count when created and checks
/// it on every step.  [`VertexCursor::remove`] deletes the vertex most
/// recently returned and resynchronizes the cursor, so removal through the
/// cursor never trips the check.
#[derive(Clone, Debug)]
pub struct VertexCursor {
    expected: usize,
    next: usize,
    last: Option<usize>,
    read_only: bool,
}

impl VertexCursor {
    pub fn new(mod_count: usize) -> Self {
        Self {
            expected: mod_count,
            next: 0,
            last: None,
            read_only: false,
        }
    }

    /// A cursor whose `remove` always fails with
    /// [`GraphError::UnsupportedOperation`].
    pub fn read_only(mod_count: usize) -> Self {
        Self {
            read_only: true,
            ..Self::new(mod_count)
        }
    }

    fn check<G: Graph>(&self, graph: &G) -> Result<()> {
        let actual = graph.mod_count();
        if actual == self.expected {
            Ok(())
        } else {
            debug!(
                expected = self.expected,
                actual, "graph modified underneath a vertex cursor"
            );
            Err(GraphError::ConcurrentModification {
                expected: self.expected,
                actual,
            })
        }
    }

    /// Advances the cursor, returning the next vertex or `None` at the end.
    pub fn next<'g, G: Graph>(&mut self, graph: &'g G) -> Result<Option<&'g G::Vertex>> {
        self.check(graph)?;
        if self.next >= graph.vertex_num() {
            return Ok(None);
        }
        let v = graph.vertex_at(self.next)?;
        self.last = Some(self.next);
        self.next += 1;
        Ok(Some(v))
    }

    pub fn has_next<G: Graph>(&self, graph: &G) -> bool {
        self.next < graph.vertex_num()
    }

    /// Removes the vertex most recently returned by [`VertexCursor::next`],
    /// together with its edges.
    pub fn remove<G: GraphMut>(&mut self, graph: &mut G) -> Result<G::Vertex> {
        if self.read_only {
            return Err(GraphError::UnsupportedOperation(
                "remove through a read-only vertex cursor",
            ));
        }
        let index = self.last.ok_or(GraphError::InvalidIteratorState)?;
        self.check(graph)?;
        let v = graph.remove_at(index)?;
        self.last = None;
        self.next = index;
        self.expected = graph.mod_count();
        Ok(v)
    }
}
