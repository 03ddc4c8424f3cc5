//! Node data structure for the randomized tree.
//!
//! A Node owns one key, the size of the subtree rooted at it, and its two
//! children. Ownership is strictly hierarchical: every child is held by
//! exactly one parent through a [`Link`].
//!
//! Key properties:
//! - `size == 1 + size(left) + size(right)` after every completed operation
//! - keys in `left` are less than or equal to `key`
//! - keys in `right` are greater than or equal to `key`
//!
//! Descent routes equal keys right, but a rebuild may root a subtree at any
//! member of a run of equal keys, so equal keys can sit on either side.

use crate::core::{InvariantViolation, TreeError};

/// An exclusively owned, possibly empty subtree.
pub type Link<K> = Option<Box<Node<K>>>;

/// A node in the randomized tree.
#[derive(Debug)]
pub struct Node<K> {
    /// The stored key
    pub(crate) key: K,
    /// Number of nodes in the subtree rooted here, including this one
    pub(crate) size: usize,
    /// Keys less than or equal to `key`
    pub(crate) left: Link<K>,
    /// Keys greater than or equal to `key`
    pub(crate) right: Link<K>,
}

impl<K> Node<K> {
    /// Create a leaf node with size 1.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self {
            key,
            size: 1,
            left: None,
            right: None,
        }
    }

    /// Get the key stored in this node.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Get the size of the subtree rooted at this node.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Get the subtree of keys less than or equal to this one.
    #[must_use]
    pub const fn left(&self) -> &Link<K> {
        &self.left
    }

    /// Get the subtree of keys greater than or equal to this one.
    #[must_use]
    pub const fn right(&self) -> &Link<K> {
        &self.right
    }

    /// Recompute `size` from the two children.
    pub(crate) fn resize(&mut self) {
        self.size = 1 + subtree_size(&self.left) + subtree_size(&self.right);
    }
}

/// Size of a possibly empty subtree.
#[inline]
#[must_use]
pub fn subtree_size<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

/// Move `value` into a fresh heap allocation, reporting exhaustion instead of aborting.
///
/// # Errors
///
/// Returns [`TreeError::OutOfMemory`] if the allocator refuses the request.
pub(crate) fn try_box<T>(value: T) -> Result<Box<T>, TreeError> {
    #[cfg(test)]
    if failpoint::should_fail() {
        return Err(TreeError::OutOfMemory { requested: 1 });
    }
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(1)
        .map_err(|_| TreeError::OutOfMemory { requested: 1 })?;
    storage.push(value);
    let slice: Box<[T]> = storage.into_boxed_slice();
    // SAFETY: a one-element boxed slice was allocated by the global allocator
    // with the layout of `[T; 1]`, which is identical to the layout of `T`.
    Ok(unsafe { Box::from_raw(Box::into_raw(slice).cast::<T>()) })
}


/// Number of nodes on the longest root-to-leaf path.
///
/// Returns 0 for an empty subtree.
#[must_use]
pub fn height<K>(link: &Link<K>) -> usize {
    match link {
        None => 0,
        Some(node) => 1 + height(&node.left).max(height(&node.right)),
    }
}

/// Release every node in post-order, returning how many were released.
pub(crate) fn teardown<K>(link: Link<K>) -> usize {
    let Some(mut node) = link else {
        return 0;
    };
    let released = teardown(node.left.take()) + teardown(node.right.take());
    drop(node);
    released + 1
}

/// Append references to every key in in-order order.
pub(crate) fn collect_in_order<'a, K>(link: &'a Link<K>, out: &mut Vec<&'a K>) {
    if let Some(node) = link {
        collect_in_order(&node.left, out);
        out.push(&node.key);
        collect_in_order(&node.right, out);
    }
}

/// Check the size and ordering invariants of a whole subtree.
///
/// # Errors
///
/// Returns the first violation found, scanning in in-order order.
pub(crate) fn validate<K: Ord>(link: &Link<K>) -> Result<(), InvariantViolation> {
    let mut position = 0;
    validate_within(link, None, None, &mut position).map(|_| ())
}

/// Validate `link` against inclusive lower and upper bounds.
///
/// Returns the actual size of the subtree.
fn validate_within<'a, K: Ord>(
    link: &'a Link<K>,
    lower: Option<&'a K>,
    upper: Option<&'a K>,
    position: &mut usize,
) -> Result<usize, InvariantViolation> {
    let Some(node) = link else {
        return Ok(0);
    };

    let left = validate_within(&node.left, lower, Some(&node.key), position)?;

    let here = *position;
    *position += 1;
    let above_lower = lower.map_or(true, |bound| *bound <= node.key);
    let below_upper = upper.map_or(true, |bound| node.key <= *bound);
    if !(above_lower && below_upper) {
        return Err(InvariantViolation::OrderViolation { position: here });
    }

    let right = validate_within(&node.right, Some(&node.key), upper, position)?;

    let actual = 1 + left + right;
    if node.size != actual {
        return Err(InvariantViolation::SizeMismatch {
            position: here,
            recorded: node.size,
            actual,
        });
    }
    Ok(actual)
}
