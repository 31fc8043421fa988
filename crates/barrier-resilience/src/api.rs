//! Public entry points: `resilience_count`, `resilience_witness`, and the
//! `Config` that selects a proximity-index strategy.
//!
//! Purpose
//! - Computing barrier resilience is repeated blocking-family augmentation
//!   (Dinitz's algorithm) until the sink is unreachable: each round finds a
//!   maximal family of vertex-disjoint shortest paths, folds it into the
//!   running used-edge set by symmetric difference, and repeats. The
//!   number of rounds' path counts summed is the max flow, which by
//!   max-flow/min-cut duality equals the minimum vertex cut, the barrier
//!   resilience number.
//! - `resilience_witness` additionally reads off *which* disks form that
//!   cut by re-running the level-finder once more over the final
//!   used-edge set.
//!
//! Why this design
//! - Both entry points share the augmentation loop; only the final step
//!   differs (count vs. classify-and-extract).
//! - Splitting them here rather than computing the witness unconditionally
//!   avoids paying for the extra `find_levels` call and disk
//!   classification pass when the caller only wants the count.
//!
//! References
//! - `examples/original_source/src/barrier_resilience/barrier_resilience.cpp`.

use crate::blocking::find_blocking_family;
use crate::error::ResilienceError;
use crate::geometry::{Coordinate, Disk};
use crate::levels::find_levels;
use crate::proximity::{KdTreeIndex, LinearScanIndex, ProximityIndex};
use crate::vocabulary::{assign_indices, fold_blocking_family, Edge, Vertex};

/// Which proximity-index strategy `resilience_count`/`resilience_witness`
/// should use internally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexKind {
    /// O(n) per query; always applicable.
    #[default]
    Trivial,
    /// O(log n)-ish per query; requires every disk to share a radius.
    KdTree,
}

/// Solve-time configuration. Only the proximity-index strategy is
/// exposed: the algorithm itself is exact and has no tolerances to tune.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    pub index_kind: IndexKind,
}

impl Config {
    pub fn with_trivial_datastructure() -> Self {
        Self { index_kind: IndexKind::Trivial }
    }

    pub fn with_kd_tree() -> Self {
        Self { index_kind: IndexKind::KdTree }
    }

    pub(crate) fn new_index<T: Coordinate + 'static>(&self) -> Box<dyn ProximityIndex<T>> {
        match self.index_kind {
            IndexKind::Trivial => Box::new(LinearScanIndex::new()),
            IndexKind::KdTree => Box::new(KdTreeIndex::new()),
        }
    }
}

/// Repeatedly finds and folds in blocking families until the sink is
/// unreachable. Returns the total path count (the max flow) together with
/// the final used-edge set, which encodes the residual graph the last
/// `find_levels` call needs for cut extraction.
fn accumulate_blocking_paths<T: Coordinate + 'static>(
    disks: &[Disk<T>],
    left_border_x: T,
    right_border_x: T,
    config: &Config,
) -> Result<(i64, Vec<Edge>), ResilienceError> {
    let _span = tracing::info_span!("resilience_driver", disk_count = disks.len()).entered();

    let mut used_edges: Vec<Edge> = Vec::new();
    let mut path_count = 0i64;

    loop {
        let family = find_blocking_family(&used_edges, disks, left_border_x, right_border_x, config)?;
        if family.is_empty() {
            break;
        }
        path_count += family.len() as i64;
        used_edges = fold_blocking_family(used_edges, &family);
        tracing::debug!(round_paths = family.len(), total_paths = path_count, "folded blocking family");
    }

    Ok((path_count, used_edges))
}

/// The barrier resilience number: the minimum number of disks that must be
/// removed to separate the left border from the right one, equivalently
/// the maximum number of vertex-disjoint disk chains connecting them.
///
/// An instance with no disks is not an error: the answer is simply
/// however many direct source-to-sink paths exist (zero, unless the
/// borders themselves already overlap, which is excluded by construction).
pub fn resilience_count<T: Coordinate + 'static>(
    mut disks: Vec<Disk<T>>,
    left_border_x: T,
    right_border_x: T,
    config: &Config,
) -> Result<i64, ResilienceError> {
    assign_indices(&mut disks);
    let (path_count, _) = accumulate_blocking_paths(&disks, left_border_x, right_border_x, config)?;
    Ok(path_count)
}

/// Like [`resilience_count`], but also returns the indices (into `disks`,
/// after index assignment) of a disk set realizing the minimum vertex cut.
pub fn resilience_witness<T: Coordinate + 'static>(
    mut disks: Vec<Disk<T>>,
    left_border_x: T,
    right_border_x: T,
    config: &Config,
) -> Result<Vec<i64>, ResilienceError> {
    assign_indices(&mut disks);
    let (path_count, used_edges) = accumulate_blocking_paths(&disks, left_border_x, right_border_x, config)?;

    let final_levels = find_levels(&used_edges, &disks, left_border_x, right_border_x, config)?;

    let mut blocking_disks = Vec::new();
    for disk in &disks {
        let u_in = Vertex::disk(disk.index, true);
        if final_levels.levels.contains_key(&u_in) {
            let u_out = Vertex::disk(disk.index, false);
            if !final_levels.levels.contains_key(&u_out) {
                blocking_disks.push(disk.index);
            }
        } else if let Some(&p) = final_levels.prev.get(&u_in) {
            if final_levels.levels.contains_key(&p) {
                blocking_disks.push(disk.index);
            }
        }
    }

    assert_eq!(
        blocking_disks.len() as i64,
        path_count,
        "min-cut size must equal the accumulated blocking-path count"
    );

    Ok(blocking_disks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Disk;
    use nalgebra::vector;

    #[test]
    fn empty_instance_has_zero_resilience() {
        let disks: Vec<Disk<i64>> = Vec::new();
        let config = Config::with_trivial_datastructure();
        let count = resilience_count(disks, -1, 1, &config).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn single_blocking_chain_has_resilience_one() {
        let disks = vec![
            Disk::new(vector![0i64, 0], 1),
            Disk::new(vector![2i64, 0], 1),
        ];
        let config = Config::with_trivial_datastructure();
        let count = resilience_count(disks, -1, 3, &config).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn two_disjoint_chains_have_resilience_two() {
        let disks = vec![
            Disk::new(vector![0i64, 0], 1),
            Disk::new(vector![0i64, 20], 1),
        ];
        let config = Config::with_trivial_datastructure();
        let count = resilience_count(disks, -1, 1, &config).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn witness_matches_count() {
        let disks = vec![
            Disk::new(vector![0i64, 0], 1),
            Disk::new(vector![0i64, 20], 1),
        ];
        let config = Config::with_trivial_datastructure();
        let witness = resilience_witness(disks, -1, 1, &config).unwrap();
        assert_eq!(witness.len(), 2);
    }

    #[test]
    fn kd_tree_and_trivial_agree_on_uniform_radius_instance() {
        let disks = || {
            vec![
                Disk::new(vector![0i64, 0], 1),
                Disk::new(vector![2i64, 0], 1),
                Disk::new(vector![4i64, 0], 1),
            ]
        };
        let trivial = resilience_count(disks(), -1, 5, &Config::with_trivial_datastructure()).unwrap();
        let kd_tree = resilience_count(disks(), -1, 5, &Config::with_kd_tree()).unwrap();
        assert_eq!(trivial, kd_tree);
    }

    #[test]
    fn kd_tree_rejects_mixed_radii() {
        let disks = vec![
            Disk::new(vector![0i64, 0], 1),
            Disk::new(vector![2i64, 0], 3),
        ];
        let err = resilience_count(disks, -1, 5, &Config::with_kd_tree());
        assert!(err.is_err());
    }

    #[test]
    fn boundary_zero_disks() {
        let disks: Vec<Disk<i64>> = Vec::new();
        let config = Config::with_trivial_datastructure();
        assert_eq!(resilience_count(disks.clone(), -1, 1, &config).unwrap(), 0);
        assert!(resilience_witness(disks, -1, 1, &config).unwrap().is_empty());
    }

    #[test]
    fn boundary_swapped_borders_with_no_straddling_disk() {
        // With left_x > right_x both border predicates become permissive
        // over a wide range of centres; placing the disk well outside that
        // range keeps it from straddling either one.
        let disks = vec![Disk::new(vector![20i64, 0], 1)];
        let config = Config::with_trivial_datastructure();
        assert_eq!(resilience_count(disks, 5, -5, &config).unwrap(), 0);
    }

    #[test]
    fn boundary_single_straddling_disk_has_count_one() {
        let disks = vec![Disk::new(vector![0i64, 0], 10)];
        let config = Config::with_trivial_datastructure();
        assert_eq!(resilience_count(disks, -5, 5, &config).unwrap(), 1);
    }

    #[test]
    fn boundary_n_disjoint_chains_has_count_n() {
        let disks: Vec<Disk<i64>> = (0..4).map(|i| Disk::new(vector![0i64, i * 10], 1)).collect();
        let config = Config::with_trivial_datastructure();
        assert_eq!(resilience_count(disks, -1, 1, &config).unwrap(), 4);
    }

    fn chain_abcd() -> Vec<Disk<i64>> {
        vec![
            Disk::new(vector![0i64, 0], 1),
            Disk::new(vector![1i64, 1], 1),
            Disk::new(vector![2i64, 2], 1),
            Disk::new(vector![3i64, 3], 1),
        ]
    }

    #[test]
    fn scenario_a_single_chain_bridges_once() {
        let config = Config::with_trivial_datastructure();
        let count = resilience_count(chain_abcd(), 0, 3, &config).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn scenario_b_chain_too_short_to_reach_widened_borders() {
        let config = Config::with_trivial_datastructure();
        let count = resilience_count(chain_abcd(), -2, 5, &config).unwrap();
        assert_eq!(count, 0);
    }

    fn cluster_c() -> Vec<Disk<i64>> {
        vec![
            Disk::new(vector![1i64, -1], 2),
            Disk::new(vector![1i64, 1], 2),
            Disk::new(vector![4i64, 0], 2),
        ]
    }

    #[test]
    fn scenario_c_shared_bottleneck_disk() {
        let config = Config::with_trivial_datastructure();
        let witness = resilience_witness(cluster_c(), 0, 5, &config).unwrap();
        assert_eq!(witness, vec![2]);
    }

    #[test]
    fn scenario_d_two_disks_bridge_directly() {
        let config = Config::with_trivial_datastructure();
        let mut witness = resilience_witness(cluster_c(), 0, 3, &config).unwrap();
        witness.sort();
        assert_eq!(witness, vec![0, 1]);
    }

    #[test]
    fn scenario_e_extra_concentric_disks_add_two_more_bridges() {
        let mut disks = cluster_c();
        disks.push(Disk::new(vector![0i64, 0], 10));
        disks.push(Disk::new(vector![0i64, 0], 20));
        let config = Config::with_trivial_datastructure();
        let mut witness = resilience_witness(disks, 0, 3, &config).unwrap();
        witness.sort();
        assert_eq!(witness, vec![0, 1, 3, 4]);
    }

    #[test]
    fn scenario_f_two_parallel_chains_of_four() {
        let mut disks = Vec::new();
        for &y in &[0i64, 10] {
            for x in [0i64, 3, 6, 9] {
                disks.push(Disk::new(vector![x, y], 3));
            }
        }
        let config = Config::with_trivial_datastructure();
        let count = resilience_count(disks.clone(), 0, 10, &config).unwrap();
        assert_eq!(count, 2);
        let witness = resilience_witness(disks, 0, 10, &config).unwrap();
        assert_eq!(witness.len(), 2);
    }
}
