pub use crate::{
    Bidirected, BidirectedGraph, DirectedEdge, DirectedGraph, Directional, Edge, EdgeOpGraph,
    Graph, GraphError, GraphMut, Indexed, Reversible, UndirectedEdge, UndirectedGraph, Vertex,
    VertexOpGraph, WeightedBidigraph, WeightedDigraph, WeightedGraph,
};
