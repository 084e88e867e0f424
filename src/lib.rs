//! Mutable graphs stored as per-vertex adjacency bags.
//!
//! Two families of graph are provided.  Vertex-op graphs ([`DirectedGraph`],
//! [`UndirectedGraph`]) store neighbor vertices directly; edge-op graphs
//! ([`DirectedEdgeGraph`], [`UndirectedEdgeGraph`]) store edge objects that
//! can carry a weight.  [`Bidirected`] pairs a directed graph with its
//! reverse to answer in-adjacency queries.
//!
//! Vertices may opt into constant-time lookup by carrying a
//! [`VertexIndex`], as [`Indexed`] does.  Iteration is fail-fast: cursors
//! report [`GraphError::ConcurrentModification`] once the graph they walk
//! has been modified through any other path.

pub mod bag;
pub mod bidirected;
pub mod concat;
pub mod directedness;
pub mod edge;
pub mod edge_graph;
pub mod error;
pub mod generate_large_graph;
pub mod graph;
pub mod graph_ref;
pub mod graph_test_support;
pub mod prelude;
pub mod tracing_support;
pub mod vertex;
pub mod vertex_graph;

mod format_debug;
mod storage;

pub use crate::bag::{Bag, BagCursor, BagIter};
pub use crate::bidirected::{Bidirected, BidirectedEdgeGraph, BidirectedGraph, WeightedBidigraph};
pub use crate::concat::{BiConcat, Concat, UnaryConcat};
pub use crate::directedness::{Directed, Directedness, Undirected};
pub use crate::edge::{DirectedEdge, Directional, Edge, UndirectedEdge};
pub use crate::edge_graph::{
    DirectedEdgeGraph, EdgeGraph, UndirectedEdgeGraph, WeightedDigraph, WeightedGraph,
};
pub use crate::error::{GraphError, Result};
pub use crate::graph::{EdgeOpGraph, Graph, GraphMut, Reversible, VertexCursor, VertexOpGraph};
pub use crate::graph_ref::GraphRef;
pub use crate::vertex::{Indexed, Vertex, VertexIndex};
pub use crate::vertex_graph::{DirectedGraph, UndirectedGraph, VertexGraph};
