use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use quickcheck::{Arbitrary, Gen};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::tracing_support::{info_span, init_tracing};

/// Number of distinct vertex ids used by generated scripts.  Kept small so
/// that scripts revisit vertices and build parallel edges and loops.
pub const VERTEX_RANGE: u8 = 8;

/// One step of a generated mutation script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    AddVertex(u8),
    AddEdge(u8, u8),
    RemoveEdge(u8, u8),
    RemoveVertex(u8),
    Clear,
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        let v = u8::arbitrary(g) % VERTEX_RANGE;
        let w = u8::arbitrary(g) % VERTEX_RANGE;
        match u8::arbitrary(g) % 50 {
            0..=9 => Op::AddVertex(v),
            10..=31 => Op::AddEdge(v, w),
            32..=40 => Op::RemoveEdge(v, w),
            41..=48 => Op::RemoveVertex(v),
            _ => Op::Clear,
        }
    }
}

/// A generated mutation script.
#[derive(Clone, Debug)]
pub struct ArbOps {
    pub ops: Vec<Op>,
}

impl Arbitrary for ArbOps {
    fn arbitrary(g: &mut Gen) -> Self {
        ArbOps {
            ops: Vec::arbitrary(g),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.ops.shrink().map(|ops| ArbOps { ops }))
    }
}

/// Reference model of a graph: a vertex list in insertion order plus an
/// edge list.
///
/// `oriented` models edges as ordered pairs, so removal must match the
/// orientation.  `mirrored` models an edge as visible from both endpoints, so
/// it counts toward the degree of its head as well as its tail.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub vertices: Vec<u8>,
    pub edges: Vec<(u8, u8)>,
    pub oriented: bool,
    pub mirrored: bool,
}

impl Model {
    pub fn new(oriented: bool, mirrored: bool) -> Self {
        Self {
            oriented,
            mirrored,
            ..Self::default()
        }
    }

    /// Applies `op` and returns the boolean a graph must report for it.
    /// Operations without a result report `true`.
    pub fn apply(&mut self, op: Op) -> bool {
        match op {
            Op::AddVertex(v) => self.add_vertex(v),
            Op::AddEdge(v, w) => {
                self.add_vertex(v);
                self.add_vertex(w);
                self.edges.push((v, w));
                true
            }
            Op::RemoveEdge(v, w) => {
                let oriented = self.oriented;
                let found = self
                    .edges
                    .iter()
                    .position(|&(a, b)| (a, b) == (v, w) || (!oriented && (a, b) == (w, v)));
                found.map(|i| self.edges.remove(i)).is_some()
            }
            Op::RemoveVertex(v) => {
                let Some(i) = self.vertices.iter().position(|&x| x == v) else {
                    return false;
                };
                self.vertices.remove(i);
                self.edges.retain(|&(a, b)| a != v && b != v);
                true
            }
            Op::Clear => {
                self.vertices.clear();
                self.edges.clear();
                true
            }
        }
    }

    fn add_vertex(&mut self, v: u8) -> bool {
        if self.vertices.contains(&v) {
            false
        } else {
            self.vertices.push(v);
            true
        }
    }

    /// The neighbor ids listed in the adjacency of `v`, sorted.
    pub fn neighbors(&self, v: u8) -> Vec<u8> {
        let mut neighbors = Vec::new();
        for &(a, b) in &self.edges {
            if a == v {
                neighbors.push(b);
            }
            if self.mirrored && b == v {
                neighbors.push(a);
            }
        }
        neighbors.sort_unstable();
        neighbors
    }

    pub fn degree(&self, v: u8) -> usize {
        self.neighbors(v).len()
    }

    pub fn self_loops(&self, v: u8) -> usize {
        self.edges.iter().filter(|&&(a, b)| a == v && b == v).count()
    }

    pub fn number_of_loops(&self) -> usize {
        self.edges.iter().filter(|&&(a, b)| a == b).count()
    }
}

pub fn has_duplicates<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return true;
        }
    }
    false
}

/// Checks the internal consistency of a graph.  `entries_per_edge` is the
/// number of adjacency entries every edge contributes: 1 for directed
/// graphs, 2 for undirected and bidirected ones.
pub fn check_graph_consistency<G>(graph: &G, entries_per_edge: usize)
where
    G: Graph,
    G::Entry: Clone + PartialEq + Debug,
{
    init_tracing();
    let _span = info_span!("check_graph_consistency").entered();

    let vertices: Vec<_> = graph.vertices().collect();
    assert_eq!(vertices.len(), graph.vertex_num());
    assert!(!has_duplicates(vertices.iter()));
    assert_eq!(graph.is_empty(), vertices.is_empty());
    assert_eq!(graph.to_array().is_none(), vertices.is_empty());

    let mut degree_sum = 0;
    let mut loop_sum = 0;
    let mut max_degree = 0;
    for (i, &v) in vertices.iter().enumerate() {
        {
            let _span = info_span!("check_slot").entered();
            assert_eq!(graph.index_of(v), Some(i));
            assert_eq!(graph.vertex_at(i), Ok(v));
            assert!(graph.contains(v));
        }

        let degree = graph.degree(v);
        let loops = graph.self_loops(v);
        assert!(loops <= degree, "{v:?} has {loops} loops but degree {degree}");

        let adjacent: Vec<G::Entry> = {
            let _span = info_span!("adjacent.collect").entered();
            graph.adjacent(v).cloned().collect()
        };
        assert_eq!(adjacent.len(), degree);

        let mut visited = Vec::new();
        {
            let _span = info_span!("for_each_adjacent").entered();
            graph.for_each_adjacent(v, |entry| visited.push(entry.clone()));
        }
        assert_eq!(visited, adjacent);

        degree_sum += degree;
        loop_sum += loops;
        max_degree = max_degree.max(degree);
    }

    assert_eq!(degree_sum, entries_per_edge * graph.edge_num());
    assert_eq!(loop_sum, graph.number_of_loops());
    assert_eq!(max_degree, graph.max_degree());

    let len = vertices.len();
    assert_eq!(
        graph.vertex_at(len),
        Err(GraphError::IndexOutOfRange { index: len, len })
    );

    // Positional navigation must walk the same sequence as `vertices`.
    let mut walked = Vec::new();
    let mut cursor = graph.start();
    while let Some(v) = cursor {
        walked.push(v);
        cursor = graph.next(v);
    }
    assert_eq!(walked, vertices);
    if let Some(first) = graph.start() {
        assert_eq!(graph.pre(first), None);
    }
    for pair in vertices.windows(2) {
        assert_eq!(graph.pre(pair[1]), Some(pair[0]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_undirected_removal_ignores_orientation() {
        let mut model = Model::new(false, true);
        model.apply(Op::AddEdge(1, 2));
        assert!(model.apply(Op::RemoveEdge(2, 1)));
        assert!(!model.apply(Op::RemoveEdge(2, 1)));
    }

    #[test]
    fn test_model_degrees() {
        let mut model = Model::new(true, true);
        model.apply(Op::AddEdge(1, 1));
        model.apply(Op::AddEdge(1, 2));
        assert!(!model.apply(Op::RemoveEdge(2, 1)));
        assert_eq!(model.neighbors(1), vec![1, 1, 2]);
        assert_eq!(model.degree(2), 1);
        assert_eq!(model.self_loops(1), 1);
        assert!(model.apply(Op::RemoveVertex(1)));
        assert_eq!(model.vertices, vec![2]);
        assert_eq!(model.number_of_loops(), 0);
    }

    #[test]
    fn test_has_duplicates() {
        assert!(has_duplicates([1, 2, 1]));
        assert!(!has_duplicates([1, 2, 3]));
    }
}
