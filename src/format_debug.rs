use std::fmt::{Debug, Formatter};

use crate::graph::Graph;

/// Formats a graph for debug output as its counters plus a map from each
/// vertex, in insertion order, to its adjacency entries.
pub fn format_debug<G>(graph: &G, fmt: &mut Formatter<'_>, name: &str) -> std::fmt::Result
where
    G: Graph,
    G::Entry: Debug,
{
    fmt.debug_struct(name)
        .field("vertex_num", &graph.vertex_num())
        .field("edge_num", &graph.edge_num())
        .field("adjacency", &AdjacencyDebug(graph))
        .finish()
}

struct AdjacencyDebug<'g, G>(&'g G);

impl<G> Debug for AdjacencyDebug<'_, G>
where
    G: Graph,
    G::Entry: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let graph = self.0;
        f.debug_map()
            .entries(graph.vertices().map(|v| (v, EntriesDebug(graph, v))))
            .finish()
    }
}

struct EntriesDebug<'g, G: Graph>(&'g G, &'g G::Vertex);

impl<G> Debug for EntriesDebug<'_, G>
where
    G: Graph,
    G::Entry: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.adjacent(self.1)).finish()
    }
}
