use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::{Debug, Formatter},
    hash::Hash,
    ops::Deref,
    rc::Rc,
};

use derivative::Derivative;

use crate::graph_ref::GraphRef;

/// A value that can be stored as a graph vertex.
///
/// Vertices are identified by equality and hash.  A vertex type may opt into
/// O(1) lookup by returning a [`VertexIndex`] from [`Vertex::vertex_index`];
/// graphs then ask the vertex for its slot instead of scanning their bag
/// array.  The observable behavior of a graph is the same either way.
pub trait Vertex: Clone + Eq + Hash + Debug {
    /// Returns the slot table of this vertex, if it carries one.
    fn vertex_index(&self) -> Option<&VertexIndex> {
        None
    }
}

macro_rules! plain_vertex {
    ($($t:ty),* $(,)?) => {
        $(impl Vertex for $t {})*
    };
}

plain_vertex!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, bool, String,
);

impl Vertex for &str {}

impl<T: Vertex> Vertex for Rc<T> {
    fn vertex_index(&self) -> Option<&VertexIndex> {
        (**self).vertex_index()
    }
}

/// Per-vertex table mapping each graph the vertex belongs to onto the slot
/// it occupies in that graph's bag array.
///
/// Clones share one table, so the copies of a vertex held inside bags always
/// agree with the copy held by the caller.
#[derive(Clone, Default)]
pub struct VertexIndex {
    slots: Rc<RefCell<HashMap<GraphRef, usize>>>,
}

impl VertexIndex {
    /// Creates an empty slot table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the slot this vertex occupies in `graph`, if any.
    pub fn get_slot(&self, graph: GraphRef) -> Option<usize> {
        self.slots.borrow().get(&graph).copied()
    }

    /// Records the slot for `graph`; `None` forgets the graph entirely.
    pub fn set_slot(&self, graph: GraphRef, slot: Option<usize>) {
        let mut slots = self.slots.borrow_mut();
        match slot {
            Some(slot) => {
                slots.insert(graph, slot);
            }
            None => {
                slots.remove(&graph);
            }
        }
    }

    /// Number of graphs this vertex currently has a slot in.
    pub fn num_graphs(&self) -> usize {
        self.slots.borrow().len()
    }
}

impl Debug for VertexIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.slots.borrow().iter()).finish()
    }
}

/// A vertex wrapper carrying its own [`VertexIndex`].
///
/// Equality, hashing and debug output only look at the wrapped value.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "T: Clone"),
    Debug(bound = "T: Debug"),
    PartialEq(bound = "T: PartialEq"),
    Eq(bound = "T: Eq"),
    Hash(bound = "T: Hash")
)]
pub struct Indexed<T> {
    value: T,
    #[derivative(Debug = "ignore", PartialEq = "ignore", Hash = "ignore")]
    index: VertexIndex,
}

impl<T> Indexed<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            index: VertexIndex::new(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn index(&self) -> &VertexIndex {
        &self.index
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Indexed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> From<T> for Indexed<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Vertex for Indexed<T>
where
    T: Clone + Eq + Hash + Debug,
{
    fn vertex_index(&self) -> Option<&VertexIndex> {
        Some(&self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_vertices_have_no_index() {
        assert!(1i32.vertex_index().is_none());
        assert!("a".vertex_index().is_none());
        assert!(Rc::new(7u8).vertex_index().is_none());
    }

    #[test]
    fn test_clones_share_slots() {
        let g = GraphRef::new();
        let v = Indexed::new(5);
        let w = v.clone();
        v.index().set_slot(g, Some(3));
        assert_eq!(w.index().get_slot(g), Some(3));
        w.index().set_slot(g, None);
        assert_eq!(v.index().get_slot(g), None);
        assert_eq!(v.index().num_graphs(), 0);
    }

    #[test]
    fn test_slots_are_per_graph() {
        let (g1, g2) = (GraphRef::new(), GraphRef::new());
        let v = Indexed::new("x");
        v.index().set_slot(g1, Some(0));
        v.index().set_slot(g2, Some(4));
        assert_eq!(v.index().get_slot(g1), Some(0));
        assert_eq!(v.index().get_slot(g2), Some(4));
        assert_eq!(v.index().num_graphs(), 2);
    }

    #[test]
    fn test_equality_ignores_index() {
        let g = GraphRef::new();
        let a = Indexed::new(1);
        let b = Indexed::new(1);
        a.index().set_slot(g, Some(9));
        assert_eq!(a, b);
        assert_ne!(a, Indexed::new(2));
        assert_eq!(format!("{:?}", a), "Indexed { value: 1 }");
        assert!(Rc::new(a.clone()).vertex_index().is_some());
    }
}
