//! Randomized disk-configuration generators and the invariant-level
//! property tests they drive.
//!
//! Purpose
//! -------
//! The concrete scenarios in `api.rs` pin down specific known-good
//! answers; these tests instead check properties that must hold for
//! *every* instance: agreement with the explicit-graph oracle, agreement
//! between the two proximity-index variants, monotonicity under widening
//! borders, and the left-right reflection symmetry.
//!
//! References
//! ----------
//! `rand`/`proptest` usage style follows the seeded-`StdRng` tests in
//! `geometry.rs`; instance generation is modelled on
//! `examples/original_source`'s random-instance collaborator, reimplemented
//! here as `proptest` strategies since random instance generation itself is
//! an out-of-scope collaborator and only a test-time concern.

use crate::api::{resilience_count, resilience_witness, Config};
use crate::geometry::Disk;
use crate::oracle::oracle_resilience_count;
use nalgebra::vector;
use proptest::prelude::*;

fn arb_disk(radius: impl Strategy<Value = i64>) -> impl Strategy<Value = Disk<i64>> {
    (-20i64..20, -20i64..20, radius).prop_map(|(x, y, r)| Disk::new(vector![x, y], r))
}

fn arb_instance() -> impl Strategy<Value = (Vec<Disk<i64>>, i64, i64)> {
    (
        prop::collection::vec(arb_disk(1i64..4), 0..8),
        -25i64..-5,
        5i64..25,
    )
}

fn arb_uniform_radius_instance() -> impl Strategy<Value = (Vec<Disk<i64>>, i64, i64)> {
    (1i64..4).prop_flat_map(|r| {
        (
            prop::collection::vec(arb_disk(Just(r)), 0..8),
            -25i64..-5,
            5i64..25,
        )
    })
}

proptest! {
    /// Invariant 1: `resilience_count` must equal an independent max-flow
    /// computation over the explicit expanded graph.
    #[test]
    fn count_matches_explicit_graph_oracle((disks, left, right) in arb_instance()) {
        let config = Config::with_trivial_datastructure();
        let expected = oracle_resilience_count(disks.clone(), left, right);
        let actual = resilience_count(disks, left, right, &config).unwrap();
        prop_assert_eq!(actual, expected);
    }

    /// Invariant 3: the proximity-index strategy only changes the witness,
    /// never the count, on instances where both strategies apply.
    #[test]
    fn both_index_variants_agree_on_count((disks, left, right) in arb_uniform_radius_instance()) {
        let trivial = resilience_count(disks.clone(), left, right, &Config::with_trivial_datastructure()).unwrap();
        let kd_tree = resilience_count(disks, left, right, &Config::with_kd_tree()).unwrap();
        prop_assert_eq!(trivial, kd_tree);
    }

    /// Invariant 4: widening the gap between the borders never increases
    /// the count (more room can only help disks bridge the gap).
    #[test]
    fn widening_borders_never_increases_count(
        (disks, left, right) in arb_instance(),
        pad in 0i64..15,
    ) {
        let config = Config::with_trivial_datastructure();
        let narrow = resilience_count(disks.clone(), left, right, &config).unwrap();
        let wide = resilience_count(disks, left - pad, right + pad, &config).unwrap();
        prop_assert!(wide <= narrow);
    }

    /// Invariant 5: reflecting every disk centre across the midpoint of
    /// the two borders yields an instance with the same count.
    #[test]
    fn reflecting_disks_preserves_count((disks, left, right) in arb_instance()) {
        let config = Config::with_trivial_datastructure();
        let original = resilience_count(disks.clone(), left, right, &config).unwrap();

        let reflected: Vec<Disk<i64>> = disks
            .iter()
            .map(|d| Disk::new(vector![left + right - d.centre.x, d.centre.y], d.radius))
            .collect();
        let mirrored = resilience_count(reflected, left, right, &config).unwrap();

        prop_assert_eq!(original, mirrored);
    }

    /// Invariant 2 (approximate): removing the witness disconnects the
    /// borders, and putting back any single witness disk reconnects them.
    #[test]
    fn witness_disconnects_and_each_member_is_necessary((disks, left, right) in arb_instance()) {
        let config = Config::with_trivial_datastructure();
        let witness = resilience_witness(disks.clone(), left, right, &config).unwrap();

        let without_witness: Vec<Disk<i64>> = disks
            .iter()
            .enumerate()
            .filter(|(i, _)| !witness.contains(&(*i as i64)))
            .map(|(_, d)| *d)
            .collect();
        let disconnected_count = resilience_count(without_witness, left, right, &config).unwrap();
        prop_assert_eq!(disconnected_count, 0);

        if let Some(&restore) = witness.first() {
            let with_one_restored: Vec<Disk<i64>> = disks
                .iter()
                .enumerate()
                .filter(|(i, _)| !witness.contains(&(*i as i64)) || *i as i64 == restore)
                .map(|(_, d)| *d)
                .collect();
            let reconnected_count = resilience_count(with_one_restored, left, right, &config).unwrap();
            prop_assert!(reconnected_count > 0);
        }
    }
}
