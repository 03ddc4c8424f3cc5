use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use randomized_bst::core::{height, RandomizedTree};

proptest! {
    #[test]
    fn in_order_is_sorted_input(
        keys in proptest::collection::vec(-1000i32..1000, 0..300),
        seed in any::<u64>(),
    ) {
        let mut tree = RandomizedTree::seeded(seed);
        for &key in &keys {
            tree.insert(key).expect("insert succeeds");
        }

        let mut expected = keys.clone();
        expected.sort_unstable();
        let actual: Vec<i32> = tree.in_order().into_iter().copied().collect();
        prop_assert_eq!(actual, expected, "in-order must equal the sorted multiset");
    }

    #[test]
    fn invariants_hold_after_each_insert(
        keys in proptest::collection::vec(0u8..16, 1..200),
        seed in any::<u64>(),
    ) {
        let mut tree = RandomizedTree::seeded(seed);
        for (count, &key) in keys.iter().enumerate() {
            let work = tree.insert(key).expect("insert succeeds");
            prop_assert!(work >= 1, "every insert touches its own node");
            prop_assert_eq!(tree.validate(), Ok(()));
            prop_assert_eq!(tree.len(), count + 1);
        }
    }

    #[test]
    fn destroy_reports_every_node(
        keys in proptest::collection::vec(any::<i64>(), 0..500),
        seed in any::<u64>(),
    ) {
        let mut tree = RandomizedTree::seeded(seed);
        let work = tree.insert_all(keys.iter().copied()).expect("insert succeeds");
        prop_assert_eq!(work, tree.stats().work);
        prop_assert_eq!(tree.destroy(), keys.len());
    }

    #[test]
    fn height_is_bounded_by_size(
        keys in proptest::collection::vec(any::<i16>(), 0..300),
        seed in any::<u64>(),
    ) {
        let mut tree = RandomizedTree::seeded(seed);
        tree.insert_all(keys.iter().copied()).expect("insert succeeds");

        let h = tree.height();
        prop_assert!(h <= keys.len());
        prop_assert_eq!(tree.root().map_or(0, |root| root.size()), keys.len());
        prop_assert_eq!(keys.is_empty(), h == 0);
    }

    #[test]
    fn same_seed_same_shape(
        keys in proptest::collection::vec(any::<i32>(), 0..200),
        seed in any::<u64>(),
    ) {
        let mut first = RandomizedTree::seeded(seed);
        let mut second = RandomizedTree::seeded(seed);
        first.insert_all(keys.iter().copied()).expect("insert succeeds");
        second.insert_all(keys.iter().copied()).expect("insert succeeds");

        prop_assert_eq!(format!("{:?}", first.root()), format!("{:?}", second.root()));
    }
}

#[test]
fn sorted_and_random_heights_match_in_expectation() {
    // Over many trees the mean height for sorted input is the mean height of a
    // random BST; neither should approach the degenerate height of 2000.
    let n = 2000;
    let trials = 20;
    let bound = 3.0 * (n as f64).log2();

    let mean = |sorted: bool| {
        let total: usize = (0..trials)
            .map(|seed| {
                let mut tree = RandomizedTree::seeded(seed);
                if sorted {
                    tree.insert_all(0..n).expect("insert succeeds");
                } else {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    let keys: Vec<i32> = (0..n).map(|_| rng.gen_range(0..1_000_000)).collect();
                    tree.insert_all(keys).expect("insert succeeds");
                }
                tree.height()
            })
            .sum();
        total as f64 / trials as f64
    };

    let sorted = mean(true);
    let random = mean(false);
    assert!(sorted < bound, "sorted mean height {sorted} exceeds {bound}");
    assert!(random < bound, "random mean height {random} exceeds {bound}");
    assert!((sorted - random).abs() < 5.0, "sorted {sorted} vs random {random}");
}

#[test]
fn subtree_height_helper_matches_tree() {
    let mut tree = RandomizedTree::seeded(11);
    tree.insert_all([5, 3, 8, 1, 4, 7, 9]).expect("insert succeeds");
    let root = tree.root().expect("tree is not empty");
    let from_children = 1 + height(root.left()).max(height(root.right()));
    assert_eq!(tree.height(), from_children);
}
