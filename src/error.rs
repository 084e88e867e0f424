/// Errors reported by graphs, bags, cursors and combinators.
///
/// Every variant is an immediate failure at the call site.  Removal of
/// something that is not present is *not* an error; those operations return
/// `false` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A required argument was unusable, e.g. a zero capacity or an edge
    /// whose endpoints cannot be resolved.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// A cursor observed a structural change it did not make itself.
    #[error("Concurrent modification: expected modification count {expected}, found {actual}")]
    ConcurrentModification { expected: usize, actual: usize },
    /// `remove` was called on a cursor before `next`, or twice in a row.
    #[error("Cursor remove called without a preceding next")]
    InvalidIteratorState,
    /// The operation is not available on this iterator or view.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    /// A mutation was attempted on the unmodifiable empty bag.
    #[error("Bag is unmodifiable")]
    UnmodifiableBag,
    /// A positional accessor was given an index past the end.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
