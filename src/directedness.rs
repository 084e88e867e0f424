use std::fmt::Debug;

/// Marker type representing directed graph edges.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Directed;

/// Marker type representing undirected graph edges.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Undirected;

/// Trait defining the directedness behavior of graph edges.
///
/// This trait is implemented by [`Directed`] and [`Undirected`] marker types
/// to provide compile-time specialization of graph behavior.  An undirected
/// edge is mirrored into the bags of both endpoints; a directed edge lives in
/// its tail's bag only.
pub trait Directedness: Copy + Debug + Default + 'static {
    fn is_directed() -> bool;

    /// Number of adjacency entries contributed by each edge, summed over all
    /// bags.
    fn entries_per_edge() -> usize {
        if Self::is_directed() { 1 } else { 2 }
    }
}

impl Directedness for Directed {
    fn is_directed() -> bool {
        true
    }
}

impl Directedness for Undirected {
    fn is_directed() -> bool {
        false
    }
}
