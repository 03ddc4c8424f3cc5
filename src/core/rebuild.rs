//! Randomized rebuild of a linearized sequence.
//!
//! The incoming node is pinned as the root of the rebuilt subtree. Every other
//! range then picks its root uniformly at random, which makes the shape of the
//! rebuilt subtree a uniformly random BST over its keys:
//! 1. Root the whole sequence at the pinned index
//! 2. Recursively build each side, choosing a random pivot per range
//! 3. Recompute sizes bottom-up as each node is relinked
//!
//! Nodes are moved out of their slots, never allocated, so a rebuild cannot fail.

use rand::Rng;

use crate::core::linearize::{Linearized, Slot};
use crate::core::Link;

/// Rebuild `linearized` with its pinned node at the root.
///
/// `work` is incremented once per node placed.
pub(crate) fn rebuild<K, R: Rng + ?Sized>(
    mut linearized: Linearized<K>,
    rng: &mut R,
    work: &mut usize,
) -> Link<K> {
    let pinned = linearized.pinned;
    root_at(&mut linearized.slots, pinned, rng, work)
}

/// Build a uniformly random subtree over `slots`.
fn build_random<K, R: Rng + ?Sized>(
    slots: &mut [Slot<K>],
    rng: &mut R,
    work: &mut usize,
) -> Link<K> {
    if slots.is_empty() {
        return None;
    }
    let pivot = rng.gen_range(0..slots.len());
    root_at(slots, pivot, rng, work)
}

/// Root `slots` at `index` and build both sides randomly.
fn root_at<K, R: Rng + ?Sized>(
    slots: &mut [Slot<K>],
    index: usize,
    rng: &mut R,
    work: &mut usize,
) -> Link<K> {
    let (left, rest) = slots.split_at_mut(index);
    let (root, right) = rest.split_first_mut()?;
    let mut node = root.take()?;
    *work += 1;

    node.left = build_random(left, rng, work);
    node.right = build_random(right, rng, work);
    node.resize();

    Some(node)
}
