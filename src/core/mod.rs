//! Core algorithm implementation for the randomized binary search tree.
//!
//! The tree stays balanced in expectation without rotations or height/color
//! bookkeeping. Each insertion may, with probability `1/(size+1)` at every
//! subtree it passes through, become the root of that subtree; the subtree is
//! then flattened and rebuilt around it with uniformly random pivots. The
//! shape of the whole tree is distributed like a BST built by inserting the
//! same keys in uniformly random order.
//!
//! The implementation is separated from the `PyO3` bindings to allow
//! standalone testing.
//!
//! # Components
//!
//! - [`Node`]: key, subtree size, exclusively owned children
//! - [`linearize`]: destructive in-order flattening plus the incoming node
//! - [`rebuild`]: random-pivot reconstruction with the incoming node pinned
//! - [`RandomizedTree`]: probabilistic insertion, height, teardown
//! - [`scaling`]: the insertion scaling experiment (height and work per run)

// Allow some pedantic lints that are not applicable for this probabilistic implementation
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod linearize;
pub mod node;
pub mod rebuild;
pub mod scaling;
pub mod tree;

pub use error::{InvariantViolation, TreeError};
pub use node::{height, subtree_size, Link, Node};
pub use scaling::{run_scaling, run_trial, KeyOrder, ScalingConfig, ScalingReport, TrialReport};
pub use tree::{RandomizedTree, TreeStats};

/// Probability that a new key becomes the root of a subtree of `size` nodes.
///
/// This is `1/(size+1)`: among the `size+1` keys the subtree will hold, each
/// is equally likely to be its root in a random-order BST.
#[inline]
#[must_use]
pub fn rebuild_probability(size: usize) -> f64 {
    1.0 / (size as f64 + 1.0)
}

/// Generous reference bound on the height of a tree with `n` keys: `3 log₂(n)`.
///
/// A random BST averages about `4.31 ln n ≈ 2.99 log₂ n` levels for huge `n`
/// and noticeably less at practical sizes.
#[inline]
#[must_use]
pub fn reference_height_bound(n: usize) -> f64 {
    if n < 2 {
        return n as f64;
    }
    3.0 * (n as f64).log2()
}
