//! Property-based tests of the greedy labeling on random trees.
//!
//! # Invariants Tested
//! - every node gets exactly one label in [0, k-1]
//! - every label is used when n ≥ k
//! - k-nearest-node neighborhoods have exactly min(k, n) nodes
//! - the audit of a greedy labeling gives ratio 1 for n ≥ k ≥ 2
//! - same input, same labeling

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use proximity_labeling::gens::random_tree;
use proximity_labeling::{
    audit_report, bfs_order, count_neighborhood, eccentricity, greedy_labeling, label_neighborhood,
    validate, Labeling, TreeInstance,
};

/// (tree, root, k) with 1 ≤ k ≤ n
fn instance(max_n: usize) -> impl Strategy<Value = (TreeInstance, usize, usize)> {
    (1..=max_n, any::<u64>())
        .prop_flat_map(|(n, seed)| (Just(n), Just(seed), 0..n, 1..=n))
        .prop_map(|(n, seed, root, k)| {
            let inst = random_tree(n, &mut StdRng::seed_from_u64(seed)).unwrap();
            (inst, root, k)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn labeling_covers_every_node((inst, root, k) in instance(40)) {
        let labeling = greedy_labeling(&inst, root, k).unwrap();
        prop_assert!(labeling.is_complete());
        let labels = labeling.to_labels().unwrap();
        prop_assert_eq!(labels.len(), inst.nb_vertices());
        prop_assert!(labels.iter().all(|l| *l < k));
        prop_assert!(validate(&inst, k, &labeling).is_empty());
    }

    #[test]
    fn neighborhoods_have_min_k_n_nodes((inst, root, k) in instance(30)) {
        let labeling = Labeling::unassigned(inst.nb_vertices());
        for v in bfs_order(&inst, root) {
            let (nodes, used) = count_neighborhood(&inst, v, k, &labeling);
            prop_assert_eq!(nodes.len(), k.min(inst.nb_vertices()));
            prop_assert_eq!(nodes[0], v);
            prop_assert!(used.is_empty());
        }
    }

    #[test]
    fn greedy_labeling_is_optimal((inst, root, k) in instance(40)) {
        prop_assume!(k >= 2);
        let labeling = greedy_labeling(&inst, root, k).unwrap();
        let report = audit_report(&inst, root, k, &labeling).unwrap();
        prop_assert!((report.max_ratio - 1.).abs() < f64::EPSILON, "{:?}", report);
    }

    #[test]
    fn label_neighborhood_matches_count_neighborhood((inst, root, k) in instance(30)) {
        let labeling = greedy_labeling(&inst, root, k).unwrap();
        for v in 0..inst.nb_vertices() {
            let diverse = label_neighborhood(&inst, v, k, &labeling).unwrap();
            let (nearest, _) = count_neighborhood(&inst, v, k, &labeling);
            prop_assert_eq!(
                eccentricity(&inst, v, &diverse).unwrap(),
                eccentricity(&inst, v, &nearest).unwrap()
            );
        }
    }

    #[test]
    fn labeling_is_deterministic((inst, root, k) in instance(40)) {
        let a = greedy_labeling(&inst, root, k).unwrap();
        let b = greedy_labeling(&inst, root, k).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn traversal_visits_every_node_once((inst, root, _k) in instance(40)) {
        let mut order = bfs_order(&inst, root);
        prop_assert_eq!(order[0], root);
        order.sort_unstable();
        prop_assert_eq!(order, (0..inst.nb_vertices()).collect::<Vec<_>>());
    }
}
