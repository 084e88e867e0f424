use std::{
    collections::hash_map::DefaultHasher,
    fmt::Debug,
    hash::{Hash, Hasher},
};

use crate::vertex::Vertex;

/// A two-endpoint edge with a weight, as stored in the bags of an edge
/// graph.  Implement this for application edge types to carry extra payload
/// through traversal.
pub trait Edge: Clone + PartialEq + Debug {
    type Vertex: Vertex;

    /// Returns one endpoint of the edge.  For directed edges this is the
    /// tail.
    fn either(&self) -> &Self::Vertex;

    /// Given one endpoint, returns the other one.  Returns `None` if `v` is
    /// not an endpoint of this edge.
    fn other(&self, v: &Self::Vertex) -> Option<&Self::Vertex>;

    fn weight(&self) -> f64 {
        0.0
    }

    /// Checks whether both endpoints are the same vertex.
    fn is_self_loop(&self) -> bool {
        self.other(self.either()) == Some(self.either())
    }
}

/// An edge with a distinguished tail and head.
pub trait Directional: Edge {
    fn from(&self) -> &Self::Vertex;

    fn to(&self) -> &Self::Vertex;

    /// Returns a new edge with the endpoints swapped and the same payload.
    fn reverse(&self) -> Self;
}

fn hash_one<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// An undirected weighted edge.  Equality and hashing ignore orientation:
/// `(a, b)` and `(b, a)` with the same weight are the same edge.
#[derive(Clone, Debug)]
pub struct UndirectedEdge<V> {
    left: V,
    right: V,
    weight: f64,
}

impl<V> UndirectedEdge<V> {
    pub fn new(left: V, right: V) -> Self {
        Self::with_weight(left, right, 0.0)
    }

    pub fn with_weight(left: V, right: V, weight: f64) -> Self {
        Self {
            left,
            right,
            weight,
        }
    }

    pub fn left(&self) -> &V {
        &self.left
    }

    pub fn right(&self) -> &V {
        &self.right
    }
}

impl<V: PartialEq> PartialEq for UndirectedEdge<V> {
    fn eq(&self, other: &Self) -> bool {
        self.weight.to_bits() == other.weight.to_bits()
            && ((self.left == other.left && self.right == other.right)
                || (self.left == other.right && self.right == other.left))
    }
}

impl<V: Eq> Eq for UndirectedEdge<V> {}

impl<V: Hash> Hash for UndirectedEdge<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Combined commutatively so both orientations hash alike.
        state.write_u64(hash_one(&self.left).wrapping_add(hash_one(&self.right)));
        self.weight.to_bits().hash(state);
    }
}

impl<V: Vertex> Edge for UndirectedEdge<V> {
    type Vertex = V;

    fn either(&self) -> &V {
        &self.left
    }

    fn other(&self, v: &V) -> Option<&V> {
        if *v == self.left {
            Some(&self.right)
        } else if *v == self.right {
            Some(&self.left)
        } else {
            None
        }
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

/// A directed weighted edge from `from` to `to`.
#[derive(Clone, Debug)]
pub struct DirectedEdge<V> {
    from: V,
    to: V,
    weight: f64,
}

impl<V> DirectedEdge<V> {
    pub fn new(from: V, to: V) -> Self {
        Self::with_weight(from, to, 0.0)
    }

    pub fn with_weight(from: V, to: V, weight: f64) -> Self {
        Self { from, to, weight }
    }
}

impl<V: PartialEq> PartialEq for DirectedEdge<V> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.weight.to_bits() == other.weight.to_bits()
    }
}

impl<V: Eq> Eq for DirectedEdge<V> {}

impl<V: Hash> Hash for DirectedEdge<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.weight.to_bits().hash(state);
    }
}

impl<V: Vertex> Edge for DirectedEdge<V> {
    type Vertex = V;

    fn either(&self) -> &V {
        &self.from
    }

    fn other(&self, v: &V) -> Option<&V> {
        if *v == self.from {
            Some(&self.to)
        } else if *v == self.to {
            Some(&self.from)
        } else {
            None
        }
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

impl<V: Vertex> Directional for DirectedEdge<V> {
    fn from(&self) -> &V {
        &self.from
    }

    fn to(&self) -> &V {
        &self.to
    }

    fn reverse(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            weight: self.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undirected_equality_ignores_orientation() {
        let a = UndirectedEdge::with_weight(1, 2, 0.5);
        let b = UndirectedEdge::with_weight(2, 1, 0.5);
        assert_eq!(a, b);
        assert_eq!(hash_one(&a), hash_one(&b));
        assert_ne!(a, UndirectedEdge::with_weight(1, 2, 1.5));
        assert_ne!(a, UndirectedEdge::with_weight(1, 3, 0.5));
    }

    #[test]
    fn test_directed_equality_respects_orientation() {
        let a = DirectedEdge::new(1, 2);
        assert_ne!(a, DirectedEdge::new(2, 1));
        assert_eq!(a, DirectedEdge::new(1, 2));
        assert_eq!(a.weight(), 0.0);
    }

    #[test]
    fn test_reverse() {
        let e = DirectedEdge::with_weight("a", "b", 2.0);
        let r = e.reverse();
        assert_eq!(*r.from(), "b");
        assert_eq!(*r.to(), "a");
        assert_eq!(r.weight(), 2.0);
        assert_eq!(r.reverse(), e);
    }

    #[test]
    fn test_other_end() {
        let e = UndirectedEdge::new(3, 4);
        assert_eq!(e.other(&3), Some(&4));
        assert_eq!(e.other(&4), Some(&3));
        assert_eq!(e.other(&5), None);
        assert!(!e.is_self_loop());
        assert!(UndirectedEdge::new(7, 7).is_self_loop());
        assert!(DirectedEdge::new(7, 7).is_self_loop());
    }
}
