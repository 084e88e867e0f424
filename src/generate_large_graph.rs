use crate::graph::GraphMut;

/// Populates `graph` with an irregular structure of roughly 400 vertices
/// and 2500 edges and returns the vertices in creation order.
///
/// The structure has three clusters of decreasing density, a set of hub
/// vertices wired into every cluster, a sparse tail of scattered vertices,
/// parallel edges between cluster neighbors and a self-loop on every tenth
/// vertex.  Connection choices are arithmetic, so every run builds the same
/// graph.
///
/// `new_vertex` is called once per index.  `connect` adds one edge between
/// two vertices already returned by `new_vertex`.
pub fn generate_large_graph<G, FV, FC>(
    graph: &mut G,
    mut new_vertex: FV,
    mut connect: FC,
) -> Vec<G::Vertex>
where
    G: GraphMut,
    FV: FnMut(usize) -> G::Vertex,
    FC: FnMut(&mut G, &G::Vertex, &G::Vertex),
{
    let mut vertices: Vec<G::Vertex> = Vec::new();
    let mut spawn = |graph: &mut G, vertices: &mut Vec<G::Vertex>, n: usize| {
        let start = vertices.len();
        for _ in 0..n {
            let v = new_vertex(vertices.len());
            graph.add(v.clone());
            vertices.push(v);
        }
        start..vertices.len()
    };

    // (size, numerator, denominator) of the connection probability.
    let mut clusters = Vec::new();
    for (size, num, den) in [(40, 5, 10), (70, 2, 10), (120, 1, 20)] {
        let range = spawn(graph, &mut vertices, size);
        for i in range.clone() {
            for j in (i + 1)..range.end {
                if (i * 7 + j * 13) % den < num {
                    connect(graph, &vertices[i], &vertices[j]);
                }
            }
        }
        clusters.push(range);
    }

    let hubs = spawn(graph, &mut vertices, 15);
    for h in hubs.clone() {
        for cluster in &clusters {
            for k in cluster.clone().step_by(3 + h % 4) {
                if (h + k) % 2 == 0 {
                    connect(graph, &vertices[h], &vertices[k]);
                } else {
                    connect(graph, &vertices[k], &vertices[h]);
                }
            }
        }
    }

    let scattered = spawn(graph, &mut vertices, 150);
    for s in scattered.clone() {
        let target = (s * 31) % scattered.start;
        connect(graph, &vertices[s], &vertices[target]);
        if s % 3 == 0 {
            let back = scattered.start + (s * 17) % scattered.len();
            connect(graph, &vertices[back], &vertices[s]);
        }
    }

    for cluster in &clusters {
        for i in cluster.clone().step_by(5) {
            if i + 1 < cluster.end {
                connect(graph, &vertices[i], &vertices[i + 1]);
                connect(graph, &vertices[i], &vertices[i + 1]);
            }
        }
    }

    for i in (0..vertices.len()).step_by(10) {
        connect(graph, &vertices[i], &vertices[i]);
    }

    vertices
}
