//! Error types for the randomized tree.

use thiserror::Error;

/// Failures that can occur while inserting into a tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The allocator could not provide memory for a node or a rebuild buffer.
    ///
    /// The tree is left exactly as it was before the failed call.
    #[error("out of memory while allocating {requested} tree slot(s)")]
    OutOfMemory {
        /// Number of node-sized slots that were requested
        requested: usize,
    },
}

/// A broken structural invariant found by [`RandomizedTree::validate`].
///
/// [`RandomizedTree::validate`]: crate::core::RandomizedTree::validate
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A node's recorded size disagrees with the size of its subtree.
    #[error("node at in-order position {position} records size {recorded}, subtree holds {actual}")]
    SizeMismatch {
        /// In-order position of the offending node
        position: usize,
        /// Size stored in the node
        recorded: usize,
        /// Size computed from its children
        actual: usize,
    },

    /// A key sits on the wrong side of an ancestor.
    #[error("ordering violated at in-order position {position}")]
    OrderViolation {
        /// In-order position of the first out-of-order key
        position: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_memory_message() {
        let err = TreeError::OutOfMemory { requested: 17 };
        assert_eq!(
            err.to_string(),
            "out of memory while allocating 17 tree slot(s)"
        );
    }

    #[test]
    fn test_size_mismatch_message() {
        let err = InvariantViolation::SizeMismatch {
            position: 2,
            recorded: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "node at in-order position 2 records size 4, subtree holds 3"
        );
    }
}
