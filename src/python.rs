//! Python bindings for the randomized tree.

use pyo3::prelude::*;
use rand::Rng;

use crate::core::{RandomizedTree, TreeError};

impl From<TreeError> for PyErr {
    fn from(err: TreeError) -> Self {
        PyErr::new::<pyo3::exceptions::PyMemoryError, _>(err.to_string())
    }
}

/// A randomized binary search tree of integer keys.
///
/// Balanced in expectation by random subtree rebuilds, so sorted input does
/// not degrade its height.
#[pyclass(name = "RandomizedTree")]
pub struct PyRandomizedTree {
    inner: RandomizedTree<i64>,
}

#[pymethods]
impl PyRandomizedTree {
    /// Create an empty tree.
    ///
    /// With a seed the tree's shape is reproducible; without one it is seeded
    /// from the thread-local generator.
    #[new]
    #[pyo3(signature = (seed=None))]
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        Self {
            inner: RandomizedTree::seeded(seed),
        }
    }

    /// Return the number of keys.
    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Insert a key, returning the number of nodes visited.
    ///
    /// # Errors
    ///
    /// Raises `MemoryError` if allocation fails; the tree is unchanged.
    pub fn insert(&mut self, key: i64) -> PyResult<usize> {
        Ok(self.inner.insert(key)?)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// Release every node, returning how many were released.
    ///
    /// The tree stays usable and empty afterwards.
    pub fn destroy(&mut self) -> usize {
        self.inner.clear()
    }

    /// Keys in ascending order.
    pub fn to_list(&self) -> Vec<i64> {
        self.inner.in_order().into_iter().copied().collect()
    }
}

/// Python module definition
#[pymodule]
fn randomized_bst(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRandomizedTree>()?;
    Ok(())
}
