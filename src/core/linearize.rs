//! Destructive in-order flattening of a subtree plus one incoming node.
//!
//! The existing subtree is consumed: each node is detached (children cleared,
//! size reset to 1) and moved into an ordered slot buffer, with the incoming
//! node placed at its in-order rank. Rebuild then relinks the very same
//! allocations, so a rebuild never allocates nodes.
//!
//! The walk is iterative. Whenever the current node has a left child it is
//! rotated right, so the remaining structure becomes a right-leaning vine and
//! nodes leave it in ascending order without any auxiliary stack.

use crate::core::{Node, TreeError};

/// One position in a linearized sequence.
///
/// Slots are emptied as Rebuild moves their nodes back into a tree.
pub(crate) type Slot<K> = Option<Box<Node<K>>>;

/// An ordered run of detached nodes with the incoming node's position recorded.
#[derive(Debug)]
pub(crate) struct Linearized<K> {
    /// Detached nodes in ascending key order
    pub(crate) slots: Vec<Slot<K>>,
    /// Index of the incoming node within `slots`
    pub(crate) pinned: usize,
}

impl<K> Linearized<K> {
    /// Index of the incoming node.
    pub(crate) const fn pinned(&self) -> usize {
        self.pinned
    }
}

/// Reserve a slot buffer for `len` nodes before anything is consumed.
///
/// # Errors
///
/// Returns [`TreeError::OutOfMemory`] if the buffer cannot be allocated.
pub(crate) fn reserve_slots<K>(len: usize) -> Result<Vec<Slot<K>>, TreeError> {
    #[cfg(test)]
    if crate::core::node::failpoint::should_fail() {
        return Err(TreeError::OutOfMemory { requested: len });
    }
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(len)
        .map_err(|_| TreeError::OutOfMemory { requested: len })?;
    Ok(slots)
}

/// Flatten `subtree` and `incoming` into `slots`.
///
/// `incoming` lands immediately after every existing key equal to it: before
/// the first strictly greater key, or at the very end when no key is greater.
/// `work` is incremented once per existing node consumed.
///
/// `slots` should be empty with capacity for `subtree.size + 1` nodes so that
/// no push reallocates.
pub(crate) fn linearize<K: Ord>(
    subtree: Box<Node<K>>,
    incoming: Box<Node<K>>,
    mut slots: Vec<Slot<K>>,
    work: &mut usize,
) -> Linearized<K> {
    debug_assert!(slots.is_empty());
    debug_assert!(slots.capacity() > subtree.size);

    let mut pending = Some(incoming);
    let mut pinned = 0;
    let mut cursor = Some(subtree);

    while let Some(mut node) = cursor {
        if let Some(mut left) = node.left.take() {
            node.left = left.right.take();
            left.right = Some(node);
            cursor = Some(left);
            continue;
        }

        cursor = node.right.take();

        if pending.as_ref().is_some_and(|new| new.key < node.key) {
            if let Some(new) = pending.take() {
                pinned = slots.len();
                slots.push(Some(new));
            }
        }

        node.size = 1;
        *work += 1;
        slots.push(Some(node));
    }

    // Nothing was greater than the incoming key
    if let Some(new) = pending {
        pinned = slots.len();
        slots.push(Some(new));
    }

    Linearized { slots, pinned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Link;

    fn leaf(key: i32) -> Box<Node<i32>> {
        Box::new(Node::new(key))
    }

    fn branch(key: i32, left: Link<i32>, right: Link<i32>) -> Box<Node<i32>> {
        let mut node = Node::new(key);
        node.left = left;
        node.right = right;
        node.resize();
        Box::new(node)
    }

    fn keys(flat: &Linearized<i32>) -> Vec<&i32> {
        flat.slots.iter().flatten().map(|node| &node.key).collect()
    }

    fn flatten(subtree: Box<Node<i32>>, key: i32) -> (Linearized<i32>, usize) {
        let slots = reserve_slots(subtree.size + 1).unwrap();
        let mut work = 0;
        let flat = linearize(subtree, leaf(key), slots, &mut work);
        (flat, work)
    }

    fn sample_tree() -> Box<Node<i32>> {
        // 5 / (3 / 1, 4), (8 / 7, 9)
        branch(
            5,
            Some(branch(3, Some(leaf(1)), Some(leaf(4)))),
            Some(branch(8, Some(leaf(7)), Some(leaf(9)))),
        )
    }

    #[test]
    fn test_linearize_single_node_smaller_key() {
        let (flat, work) = flatten(leaf(10), 5);
        assert_eq!(keys(&flat), vec![&5, &10]);
        assert_eq!(flat.pinned(), 0);
        assert_eq!(work, 1);
    }

    #[test]
    fn test_linearize_single_node_greater_key() {
        let (flat, _) = flatten(leaf(10), 15);
        assert_eq!(keys(&flat), vec![&10, &15]);
        assert_eq!(flat.pinned(), 1);
    }

    #[test]
    fn test_linearize_middle_key() {
        let (flat, work) = flatten(sample_tree(), 6);
        assert_eq!(keys(&flat), vec![&1, &3, &4, &5, &6, &7, &8, &9]);
        assert_eq!(flat.pinned(), 4);
        assert_eq!(work, 7);
    }

    #[test]
    fn test_linearize_key_below_all() {
        let (flat, _) = flatten(sample_tree(), 0);
        assert_eq!(keys(&flat), vec![&0, &1, &3, &4, &5, &7, &8, &9]);
        assert_eq!(flat.pinned(), 0);
    }

    #[test]
    fn test_linearize_key_above_all() {
        let (flat, _) = flatten(sample_tree(), 100);
        assert_eq!(keys(&flat), vec![&1, &3, &4, &5, &7, &8, &9, &100]);
        assert_eq!(flat.pinned(), 7);
    }

    #[test]
    fn test_linearize_equal_key_goes_after_existing() {
        // 4 and 4 already present; the incoming 4 must follow both
        let subtree = branch(4, Some(leaf(2)), Some(branch(4, None, Some(leaf(6)))));
        let (flat, _) = flatten(subtree, 4);
        assert_eq!(keys(&flat), vec![&2, &4, &4, &4, &6]);
        assert_eq!(flat.pinned(), 3);
    }

    #[test]
    fn test_linearize_equal_to_maximum_appends() {
        let subtree = branch(1, None, Some(leaf(1)));
        let (flat, _) = flatten(subtree, 1);
        assert_eq!(flat.slots.len(), 3);
        assert_eq!(flat.pinned(), 2);
    }

    #[test]
    fn test_linearize_left_spine() {
        // A degenerate left-leaning chain exercises the rotations
        let subtree = branch(
            4,
            Some(branch(3, Some(branch(2, Some(leaf(1)), None)), None)),
            None,
        );
        let (flat, work) = flatten(subtree, 0);
        assert_eq!(keys(&flat), vec![&0, &1, &2, &3, &4]);
        assert_eq!(work, 4);
    }

    #[test]
    fn test_linearize_detaches_nodes() {
        let (flat, _) = flatten(sample_tree(), 6);
        for node in flat.slots.iter().flatten() {
            assert_eq!(node.size, 1);
            assert!(node.left.is_none());
            assert!(node.right.is_none());
        }
    }

    #[test]
    fn test_reserve_slots_capacity() {
        let slots = reserve_slots::<i32>(32).unwrap();
        assert!(slots.is_empty());
        assert!(slots.capacity() >= 32);
    }
}
