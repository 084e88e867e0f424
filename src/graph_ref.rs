use std::sync::atomic::{AtomicUsize, Ordering};

/// Global counter for graph references.  Wrapping around would require
/// minting `usize::MAX` graphs; two graphs sharing a reference would only
/// confuse fast-index slot tables, never memory safety.
static GRAPH_REF_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A token identifying one graph instance.  Fast-index vertices key their
/// slot tables by this value, so one vertex can sit in several graphs at
/// once.  Copying a graph mints a fresh reference for the copy.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct GraphRef(usize);

impl GraphRef {
    /// Mints a new, unique graph reference.
    pub fn new() -> Self {
        GraphRef(GRAPH_REF_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for GraphRef {
    fn default() -> Self {
        Self::new()
    }
}
