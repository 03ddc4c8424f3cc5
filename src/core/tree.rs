//! The randomized binary search tree.
//!
//! Insertion walks down from the root. At each non-empty subtree of size `s`
//! the new key becomes the root of that subtree with probability `1/(s+1)`:
//! the subtree is linearized together with the new node and rebuilt with the
//! new node pinned at its root. Otherwise the subtree's size is incremented
//! and the walk continues left (strictly less) or right (greater or equal).
//!
//! The resulting shape is distributed exactly like a plain BST built from the
//! same keys inserted in uniformly random order, whatever the actual order.
//! Expected height is O(log n) and expected amortized insertion cost is
//! O(log n).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::core::linearize::{linearize, reserve_slots};
use crate::core::node::{self, try_box};
use crate::core::rebuild::rebuild;
use crate::core::{rebuild_probability, InvariantViolation, Link, Node, TreeError};

/// Counters accumulated over a tree's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Successful insertions
    pub insertions: usize,
    /// Subtrees linearized and rebuilt
    pub rebuilds: usize,
    /// Total nodes visited by all successful insertions
    pub work: usize,
}

/// A binary search tree balanced by randomized subtree rebuilds.
///
/// Duplicate keys are allowed; a key equal to existing keys is placed after
/// all of them in in-order order.
#[derive(Debug)]
pub struct RandomizedTree<K, R = ChaCha8Rng> {
    root: Link<K>,
    rng: R,
    stats: TreeStats,
}

impl<K: Ord> RandomizedTree<K, ChaCha8Rng> {
    /// Create an empty tree driven by a `ChaCha8` generator seeded with `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create an empty tree seeded from the thread-local generator.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seeded(rand::thread_rng().gen())
    }
}

impl<K: Ord, R: Rng> RandomizedTree<K, R> {
    /// Create an empty tree that draws from `rng`.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self {
            root: None,
            rng,
            stats: TreeStats::default(),
        }
    }

    /// Get the number of keys stored.
    #[must_use]
    pub fn len(&self) -> usize {
        node::subtree_size(&self.root)
    }

    /// Check if the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Get the root node, if any.
    #[must_use]
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Get the lifetime counters.
    #[must_use]
    pub const fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Insert a key.
    ///
    /// Returns the number of nodes touched: the new node, every node descended
    /// through, and every node linearized and placed by a rebuild.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::OutOfMemory`] if the new node or a rebuild buffer
    /// cannot be allocated. The tree is then unchanged.
    pub fn insert(&mut self, key: K) -> Result<usize, TreeError> {
        let incoming = try_box(Node::new(key))?;

        let mut walk = Walk {
            rng: &mut self.rng,
            work: 1,
            rebuilds: 0,
        };
        insert_at(&mut self.root, incoming, &mut walk)?;

        let (work, rebuilds) = (walk.work, walk.rebuilds);
        self.stats.insertions += 1;
        self.stats.rebuilds += rebuilds;
        self.stats.work += work;
        Ok(work)
    }

    /// Insert every key from `keys`, returning the total work.
    ///
    /// # Errors
    ///
    /// Stops at the first key that fails to insert. Keys before it remain.
    pub fn insert_all<I: IntoIterator<Item = K>>(&mut self, keys: I) -> Result<usize, TreeError> {
        keys.into_iter()
            .try_fold(0, |total, key| Ok(total + self.insert(key)?))
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    #[must_use]
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Keys in ascending order; equal keys in insertion order.
    #[must_use]
    pub fn in_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        node::collect_in_order(&self.root, &mut keys);
        keys
    }

    /// Check the size and ordering invariants of every node.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        node::validate(&self.root)
    }

    /// Release every node, leaving an empty tree. Returns the number released.
    pub fn clear(&mut self) -> usize {
        node::teardown(self.root.take())
    }

    /// Release every node and the tree itself. Returns the number released.
    #[must_use]
    pub fn destroy(mut self) -> usize {
        self.clear()
    }
}

impl<K: Ord> Default for RandomizedTree<K, ChaCha8Rng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// State threaded through one insertion.
struct Walk<'a, R: ?Sized> {
    rng: &'a mut R,
    work: usize,
    rebuilds: usize,
}

impl<R: Rng + ?Sized> Walk<'_, R> {
    /// Decide whether the new key becomes the root of a subtree of `size` nodes.
    fn draw_rebuild(&mut self, size: usize) -> bool {
        self.rng.gen::<f64>() < rebuild_probability(size)
    }
}

/// Admit `incoming` into the subtree at `slot`.
///
/// On error every size incremented on the way down is restored, so the
/// subtree is left as it was.
fn insert_at<K: Ord, R: Rng + ?Sized>(
    slot: &mut Link<K>,
    incoming: Box<Node<K>>,
    walk: &mut Walk<'_, R>,
) -> Result<(), TreeError> {
    let Some(node) = slot.as_deref_mut() else {
        *slot = Some(incoming);
        return Ok(());
    };

    walk.work += 1;
    let size = node.size;

    if walk.draw_rebuild(size) {
        let slots = reserve_slots(size + 1)?;
        if let Some(subtree) = slot.take() {
            let flat = linearize(subtree, incoming, slots, &mut walk.work);
            trace!(size = size + 1, pinned = flat.pinned(), "rebuilding subtree");
            *slot = rebuild(flat, &mut *walk.rng, &mut walk.work);
            walk.rebuilds += 1;
        }
        return Ok(());
    }

    node.size += 1;
    let child = if incoming.key < node.key {
        &mut node.left
    } else {
        &mut node.right
    };

    let result = insert_at(child, incoming, walk);
    if result.is_err() {
        node.size -= 1;
    }
    result
}
