use bagraph::{
    Bag, BidirectedGraph, DirectedEdge, DirectedGraph, Directional, Edge, EdgeOpGraph, Graph,
    GraphError, GraphMut, Indexed, Reversible, UnaryConcat, UndirectedEdge, UndirectedGraph,
    VertexOpGraph, WeightedBidigraph, WeightedDigraph, WeightedGraph,
};

fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
    items.sort();
    items
}

#[test]
fn test_duplicate_add_is_rejected() {
    let mut graph = UndirectedGraph::new();
    assert!(graph.add("n1"));
    assert!(graph.add("n2"));
    assert!(!graph.add("n1"));
    assert_eq!(graph.vertex_num(), 2);
}

#[test]
fn test_undirected_square_with_loop() {
    let mut graph = UndirectedGraph::new();
    for (v, w) in [(1, 2), (2, 3), (3, 4), (4, 1), (1, 1)] {
        graph.add_edge(v, w);
    }
    assert_eq!(graph.vertex_num(), 4);
    assert_eq!(graph.edge_num(), 5);
    assert_eq!(graph.max_degree(), 4);
    assert_eq!(graph.number_of_loops(), 1);
    assert_eq!(graph.average_degree(), 2.5);

    assert!(graph.remove(&1));
    assert_eq!(graph.vertex_num(), 3);
    assert_eq!(graph.edge_num(), 2);
    assert_eq!(graph.max_degree(), 2);
    assert_eq!(graph.number_of_loops(), 0);
    assert_eq!(sorted(graph.adjacent(&3).copied().collect()), vec![2, 4]);
}

#[test]
fn test_directed_chain_with_loop() {
    let mut graph = DirectedGraph::new();
    for (v, w) in [(1, 2), (3, 4), (4, 4)] {
        graph.add_edge(v, w);
    }
    assert_eq!(graph.vertex_num(), 4);
    assert_eq!(graph.edge_num(), 3);
    assert_eq!(graph.max_degree(), 1);
    assert_eq!(graph.number_of_loops(), 1);
    assert_eq!(graph.self_loops(&4), 1);
    assert_eq!(graph.degree(&2), 0);
}

#[test]
fn test_nested_unary_concat() {
    let first = UnaryConcat::unary(vec![1..=5, 6..=10]);
    assert_eq!(first.collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());

    let left = UnaryConcat::unary(vec![1..=5, 6..=10]);
    let right = UnaryConcat::unary(vec![11..=15, 16..=20]);
    let all = UnaryConcat::unary(vec![left, right]);
    assert_eq!(all.collect::<Vec<_>>(), (1..=20).collect::<Vec<_>>());
}

#[test]
fn test_reverse_is_an_involution() {
    let mut graph = DirectedGraph::new();
    for (v, w) in [('a', 'b'), ('b', 'c'), ('c', 'c'), ('a', 'b'), ('d', 'a')] {
        graph.add_edge(v, w);
    }
    let reversed = graph.reverse();
    assert_eq!(reversed.edge_num(), graph.edge_num());
    assert_eq!(reversed.number_of_loops(), 1);
    assert_eq!(sorted(reversed.adjacent(&'b').copied().collect()), vec!['a', 'a']);
    assert_eq!(reversed.adjacent(&'d').count(), 0);
    assert_eq!(reversed.reverse(), graph);
    assert!(reversed != graph);
}

#[test]
fn test_weighted_reverse_keeps_weights() {
    let mut graph = WeightedDigraph::new();
    graph
        .add_edge(DirectedEdge::with_weight("x", "y", 1.5))
        .unwrap();
    graph
        .add_edge(DirectedEdge::with_weight("y", "y", 0.25))
        .unwrap();
    let reversed = graph.reverse();
    let out_of_y: Vec<_> = reversed.adjacent(&"y").cloned().collect();
    assert_eq!(
        out_of_y,
        vec![
            DirectedEdge::with_weight("y", "x", 1.5),
            DirectedEdge::with_weight("y", "y", 0.25)
        ]
    );
    assert_eq!(reversed.reverse(), graph);
}

#[test]
fn test_undirected_edges_are_reported_once() {
    let mut graph = WeightedGraph::new();
    for (v, w, weight) in [(1, 2, 1.0), (2, 3, 2.0), (3, 3, 3.0), (3, 1, 4.0)] {
        graph
            .add_edge(UndirectedEdge::with_weight(v, w, weight))
            .unwrap();
    }
    let weights = sorted(graph.edges().map(|e| e.weight() as i32).collect());
    assert_eq!(weights, vec![1, 2, 3, 4]);
    assert_eq!(graph.degree(&3), 4);
    assert!(graph.remove_edge(&UndirectedEdge::with_weight(1, 3, 4.0)));
    assert!(!graph.remove_edge(&UndirectedEdge::new(1, 2)));
    assert_eq!(graph.edge_num(), 3);
}

#[test]
fn test_bag_cursor_fails_after_graph_change() {
    let mut graph = DirectedGraph::new();
    graph.add_edge(1, 2);
    graph.add_edge(1, 3);
    let mut cursor = graph.adjacency(&1).cursor();
    assert_eq!(cursor.next(&graph.adjacency(&1)), Ok(Some(&2)));
    graph.add_edge(1, 4);
    assert!(matches!(
        cursor.next(&graph.adjacency(&1)),
        Err(GraphError::ConcurrentModification { .. })
    ));
}

#[test]
fn test_bag_cursor_fails_after_vertex_is_readded() {
    let mut graph = DirectedGraph::new();
    graph.add_edge(1, 2);
    let mut cursor = graph.adjacency(&1).cursor();
    assert!(graph.remove(&1));
    graph.add_edge(1, 5);
    assert!(matches!(
        cursor.next(&graph.adjacency(&1)),
        Err(GraphError::ConcurrentModification { .. })
    ));

    let mut cursor = graph.adjacency(&5).cursor();
    graph.clear();
    graph.add(5);
    assert!(matches!(
        cursor.next(&graph.adjacency(&5)),
        Err(GraphError::ConcurrentModification { .. })
    ));
}

#[test]
fn test_absent_vertex_adjacency_is_unmodifiable() {
    let graph: DirectedGraph<i32> = DirectedGraph::new();
    let bag = graph.adjacency(&9);
    assert!(bag.is_empty());
    assert!(!bag.is_modifiable());
    let mut bag: Bag<i32, i32> = bag.into_owned();
    assert_eq!(bag.add(1), Err(GraphError::UnmodifiableBag));
}

#[test]
fn test_bidirected_tracks_both_directions() {
    let mut graph: BidirectedGraph<i32> = BidirectedGraph::new();
    for (v, w) in [(1, 2), (3, 2), (2, 2), (2, 4)] {
        graph.add_edge(v, w);
    }
    assert_eq!(graph.out_degree(&2), 2);
    assert_eq!(graph.in_degree(&2), 3);
    assert_eq!(graph.degree(&2), 5);
    assert_eq!(sorted(graph.in_adjacent(&2).copied().collect()), vec![1, 2, 3]);
    assert_eq!(sorted(graph.out_adjacent(&2).copied().collect()), vec![2, 4]);
    assert_eq!(graph.reverse_graph(), &graph.forward_graph().reverse());

    assert!(graph.remove(&2));
    assert_eq!(graph.edge_num(), 0);
    assert_eq!(graph.in_degree(&4), 0);
    assert_eq!(graph.out_degree(&1), 0);
}

#[test]
fn test_bidirected_edges_mirror_into_reverse() {
    let mut graph: WeightedBidigraph<char> = WeightedBidigraph::new();
    graph
        .add_edge(DirectedEdge::with_weight('p', 'q', 3.0))
        .unwrap();
    let incoming: Vec<_> = graph.in_adjacent(&'q').cloned().collect();
    assert_eq!(incoming, vec![DirectedEdge::with_weight('q', 'p', 3.0)]);
    assert_eq!(incoming[0].reverse().from(), &'p');

    let flipped = graph.reverse();
    assert_eq!(flipped.out_degree(&'q'), 1);
    assert_eq!(flipped.in_degree(&'q'), 0);
    assert_eq!(flipped.reverse(), graph);
}

#[test]
fn test_bidirected_cursor_cannot_remove() {
    let mut graph: BidirectedGraph<i32> = BidirectedGraph::new();
    graph.add_edge(1, 2);
    let mut cursor = graph.vertex_cursor();
    assert_eq!(cursor.next(&graph), Ok(Some(&1)));
    assert!(matches!(
        cursor.remove(&mut graph),
        Err(GraphError::UnsupportedOperation(_))
    ));
    assert_eq!(graph.vertex_num(), 2);
}

#[test]
fn test_indexed_vertices_in_several_graphs() {
    let a = Indexed::new("a");
    let b = Indexed::new("b");
    let mut first = UndirectedGraph::new();
    let mut second = UndirectedGraph::new();
    first.add(a.clone());
    first.add(b.clone());
    second.add(b.clone());
    second.add(a.clone());
    assert_eq!(first.index_of(&a), Some(0));
    assert_eq!(second.index_of(&a), Some(1));
    assert_eq!(a.index().num_graphs(), 2);

    assert!(first.remove(&a));
    assert_eq!(first.index_of(&b), Some(0));
    assert_eq!(second.index_of(&a), Some(1));
    drop(second);
    assert_eq!(a.index().num_graphs(), 0);
}

#[test]
fn test_directed_edge_removal_respects_orientation() {
    let mut graph = WeightedDigraph::new();
    let edge = DirectedEdge::new(1, 2);
    graph.add_edge(edge.clone()).unwrap();
    assert_eq!(edge.either(), &1);
    assert_eq!(graph.edges().count(), 1);
    assert!(!graph.remove_edge(&DirectedEdge::new(2, 1)));
}
