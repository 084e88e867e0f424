use std::marker::PhantomData;

use bagraph::{
    BidirectedGraph, DirectedEdge, DirectedGraph, Edge, EdgeOpGraph, Indexed, UndirectedEdge,
    UndirectedGraph, VertexOpGraph, WeightedBidigraph, WeightedDigraph, WeightedGraph,
    graph_tests,
    graph_tests::{TestDataBuilder, TestEntry, TestVertex},
};
use derivative::Derivative;

/// Defines a builder for graphs whose adjacency entries are neighbor
/// vertices.
macro_rules! vertex_op_builder {
    ($builder:ident, $graph:ident, oriented: $oriented:expr, mirrored: $mirrored:expr, read_only: $read_only:expr) => {
        #[derive(Derivative)]
        #[derivative(Default(bound = ""))]
        pub struct $builder<V>(PhantomData<V>);

        impl<V: TestVertex> TestDataBuilder for $builder<V> {
            type Graph = $graph<V>;
            const ORIENTED: bool = $oriented;
            const MIRRORED: bool = $mirrored;
            const READ_ONLY_CURSOR: bool = $read_only;

            fn new_vertex(&self, i: usize) -> V {
                V::from_index(i)
            }

            fn connect(&self, graph: &mut Self::Graph, from: &V, to: &V) {
                VertexOpGraph::add_edge(graph, from.clone(), to.clone());
            }

            fn disconnect(&self, graph: &mut Self::Graph, from: &V, to: &V) -> bool {
                VertexOpGraph::remove_edge(graph, from, to)
            }

            fn neighbor(&self, _owner: &V, entry: &TestEntry<Self>) -> V {
                entry.clone()
            }
        }
    };
}

/// Defines a builder for graphs whose adjacency entries are unweighted
/// edge objects.
macro_rules! edge_op_builder {
    ($builder:ident, $graph:ident, $edge:ident, oriented: $oriented:expr, mirrored: $mirrored:expr, read_only: $read_only:expr) => {
        #[derive(Derivative)]
        #[derivative(Default(bound = ""))]
        pub struct $builder<V>(PhantomData<V>);

        impl<V: TestVertex> TestDataBuilder for $builder<V> {
            type Graph = $graph<V>;
            const ORIENTED: bool = $oriented;
            const MIRRORED: bool = $mirrored;
            const READ_ONLY_CURSOR: bool = $read_only;

            fn new_vertex(&self, i: usize) -> V {
                V::from_index(i)
            }

            fn connect(&self, graph: &mut Self::Graph, from: &V, to: &V) {
                EdgeOpGraph::add_edge(graph, $edge::new(from.clone(), to.clone())).unwrap();
            }

            fn disconnect(&self, graph: &mut Self::Graph, from: &V, to: &V) -> bool {
                EdgeOpGraph::remove_edge(graph, &$edge::new(from.clone(), to.clone()))
            }

            fn neighbor(&self, owner: &V, entry: &TestEntry<Self>) -> V {
                entry.other(owner).unwrap().clone()
            }
        }
    };
}

vertex_op_builder!(DirectedGraphBuilder, DirectedGraph, oriented: true, mirrored: false, read_only: false);
vertex_op_builder!(UndirectedGraphBuilder, UndirectedGraph, oriented: false, mirrored: true, read_only: false);
vertex_op_builder!(BidirectedGraphBuilder, BidirectedGraph, oriented: true, mirrored: true, read_only: true);
edge_op_builder!(WeightedDigraphBuilder, WeightedDigraph, DirectedEdge, oriented: true, mirrored: false, read_only: false);
edge_op_builder!(WeightedGraphBuilder, WeightedGraph, UndirectedEdge, oriented: false, mirrored: true, read_only: false);
edge_op_builder!(WeightedBidigraphBuilder, WeightedBidigraph, DirectedEdge, oriented: true, mirrored: true, read_only: true);

graph_tests!(directed_i32, DirectedGraphBuilder<i32>);
graph_tests!(directed_indexed, DirectedGraphBuilder<Indexed<i32>>);
graph_tests!(undirected_i32, UndirectedGraphBuilder<i32>);
graph_tests!(undirected_indexed, UndirectedGraphBuilder<Indexed<i32>>);
graph_tests!(bidirected_i32, BidirectedGraphBuilder<i32>);
graph_tests!(bidirected_indexed, BidirectedGraphBuilder<Indexed<i32>>);
graph_tests!(weighted_digraph_i32, WeightedDigraphBuilder<i32>);
graph_tests!(weighted_digraph_indexed, WeightedDigraphBuilder<Indexed<i32>>);
graph_tests!(weighted_graph_i32, WeightedGraphBuilder<i32>);
graph_tests!(weighted_graph_indexed, WeightedGraphBuilder<Indexed<i32>>);
graph_tests!(weighted_bidigraph_i32, WeightedBidigraphBuilder<i32>);
graph_tests!(weighted_bidigraph_indexed, WeightedBidigraphBuilder<Indexed<i32>>);
