//! Insertion scaling experiment.
//!
//! Inserts `n` keys into a fresh tree, measures the height, and counts the
//! nodes visited by all insertions plus the teardown. Repeating this over
//! several trials shows the expected `O(log n)` height and `O(n log n)` total
//! work, including for sorted and reverse-sorted input where a plain BST
//! degenerates into a list.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::core::{reference_height_bound, RandomizedTree, TreeError};

/// How the keys of a trial are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyOrder {
    /// Uniform random keys in `[0, i32::MAX]`
    #[default]
    Random,
    /// `0, 1, 2, ...`
    Sorted,
    /// `n-1, n-2, ..., 0`
    Reversed,
}

impl KeyOrder {
    /// Short lowercase name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sorted => "sorted",
            Self::Reversed => "reversed",
        }
    }

    /// Generate `n` keys in this order.
    pub fn generate<R: Rng + ?Sized>(self, n: usize, rng: &mut R) -> Vec<i64> {
        match self {
            Self::Random => (0..n)
                .map(|_| rng.gen_range(0..=i64::from(i32::MAX)))
                .collect(),
            Self::Sorted => (0_i64..).take(n).collect(),
            Self::Reversed => {
                let mut keys: Vec<i64> = (0_i64..).take(n).collect();
                keys.reverse();
                keys
            }
        }
    }
}

/// Parameters of a scaling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalingConfig {
    /// Keys inserted per trial
    pub elements: usize,
    /// Order in which keys are inserted
    pub order: KeyOrder,
    /// Number of independent trials
    pub trials: u32,
    /// Base seed; trial `t` uses stream `t` of this seed
    pub seed: u64,
}

impl ScalingConfig {
    /// Keys per trial in the standard run.
    pub const DEFAULT_ELEMENTS: usize = 1_000_000;

    /// One trial of one million random keys.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            elements: Self::DEFAULT_ELEMENTS,
            order: KeyOrder::Random,
            trials: 1,
            seed: 0,
        }
    }

    /// Ten trials of one thousand random keys.
    #[must_use]
    pub const fn quick() -> Self {
        Self {
            elements: 1000,
            order: KeyOrder::Random,
            trials: 10,
            seed: 0,
        }
    }

    /// Set the number of keys per trial.
    #[must_use]
    pub fn with_elements(mut self, elements: usize) -> Self {
        self.elements = elements;
        self
    }

    /// Set the key order.
    #[must_use]
    pub fn with_order(mut self, order: KeyOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the number of trials.
    #[must_use]
    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Set the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Measurements from one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialReport {
    /// Trial index
    pub trial: u32,
    /// Keys inserted
    pub elements: usize,
    /// Height after all insertions
    pub height: usize,
    /// Subtrees rebuilt during the trial
    pub rebuilds: usize,
    /// Nodes visited by all insertions
    pub insert_work: usize,
    /// Nodes released by teardown
    pub released: usize,
}

impl TrialReport {
    /// Insertion work plus teardown.
    #[must_use]
    pub const fn nodes_visited(&self) -> usize {
        self.insert_work + self.released
    }
}

/// Aggregated results of a scaling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingReport {
    /// The configuration that produced this report
    pub config: ScalingConfig,
    /// One entry per trial
    pub trials: Vec<TrialReport>,
}

impl ScalingReport {
    /// Mean height across trials (0 with no trials).
    #[must_use]
    pub fn mean_height(&self) -> f64 {
        self.mean_of(|t| t.height)
    }

    /// Largest height seen in any trial.
    #[must_use]
    pub fn max_height(&self) -> usize {
        self.trials.iter().map(|t| t.height).max().unwrap_or(0)
    }

    /// Mean nodes visited per trial.
    #[must_use]
    pub fn mean_nodes_visited(&self) -> f64 {
        self.mean_of(TrialReport::nodes_visited)
    }

    /// Mean insertion work per key.
    #[must_use]
    pub fn work_per_key(&self) -> f64 {
        if self.config.elements == 0 {
            return 0.0;
        }
        self.mean_of(|t| t.insert_work) / self.config.elements as f64
    }

    /// The `3 log₂(n)` reference bound for this run's size.
    #[must_use]
    pub fn height_bound(&self) -> f64 {
        reference_height_bound(self.config.elements)
    }

    /// Check if the mean height is within the reference bound.
    #[must_use]
    pub fn within_bound(&self) -> bool {
        self.mean_height() <= self.height_bound()
    }

    fn mean_of<F: Fn(&TrialReport) -> usize>(&self, f: F) -> f64 {
        if self.trials.is_empty() {
            return 0.0;
        }
        let total: usize = self.trials.iter().map(f).sum();
        total as f64 / self.trials.len() as f64
    }
}

/// Run a single trial of `config`.
///
/// Keys and the tree's own generator are both derived from stream `trial` of
/// `config.seed`, so a trial is reproducible on its own.
///
/// # Errors
///
/// Returns [`TreeError::OutOfMemory`] if an insertion fails.
pub fn run_trial(config: &ScalingConfig, trial: u32) -> Result<TrialReport, TreeError> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    rng.set_stream(u64::from(trial));

    let keys = config.order.generate(config.elements, &mut rng);
    let mut tree = RandomizedTree::seeded(rng.gen());
    let insert_work = tree.insert_all(keys)?;

    let height = tree.height();
    let rebuilds = tree.stats().rebuilds;
    let released = tree.destroy();

    debug!(
        trial,
        order = config.order.name(),
        elements = config.elements,
        height,
        rebuilds,
        insert_work,
        released,
        "scaling trial finished"
    );

    Ok(TrialReport {
        trial,
        elements: config.elements,
        height,
        rebuilds,
        insert_work,
        released,
    })
}

/// Run every trial of `config`.
///
/// # Errors
///
/// Returns the first [`TreeError`] raised by any trial.
pub fn run_scaling(config: &ScalingConfig) -> Result<ScalingReport, TreeError> {
    let trials = (0..config.trials)
        .map(|trial| run_trial(config, trial))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScalingReport {
        config: *config,
        trials,
    })
}
