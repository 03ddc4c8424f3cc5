//! Randomized Binary Search Tree - Rust implementation
//!
//! A binary search tree that stays balanced in expectation by randomly
//! rebuilding subtrees on insertion, rather than through rotations or
//! height/color bookkeeping. Whatever order keys arrive in, the tree has the
//! shape of a BST built from a uniformly random insertion order: expected
//! `O(log n)` height and expected amortized `O(log n)` insertion.
//!
//! ```
//! use randomized_bst::core::RandomizedTree;
//!
//! let mut tree = RandomizedTree::seeded(7);
//! for key in 1..=1000 {
//!     tree.insert(key).unwrap();
//! }
//! assert_eq!(tree.len(), 1000);
//! assert!(tree.height() < 64);
//! assert_eq!(tree.destroy(), 1000);
//! ```

#![allow(clippy::redundant_pub_crate)]

pub mod core;

#[cfg(feature = "python")]
mod python;

pub use crate::core::{InvariantViolation, RandomizedTree, TreeError, TreeStats};
