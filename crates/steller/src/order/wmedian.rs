use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use super::OrderingOptimizer;

/// Sorts a layer by the weighted median position of each node's neighbors in
/// the fixed layer (Eades & Wormald, 1994; the `wmedian` step of
/// Graphviz/dot, TSE93 figure 3-2). Medians keep long-edge chains vertically
/// stable, which matters most for dummy runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WMedianOrderingOptimizer;

impl OrderingOptimizer for WMedianOrderingOptimizer {
    fn optimize(
        &mut self,
        segments: &BTreeSet<(u64, u64)>,
        layers: &mut [Vec<u64>],
        idx: usize,
        down_up: bool,
    ) {
        let mut weight: FxHashMap<u64, f64> = FxHashMap::default();
        for (pos, &node) in layers[idx].iter().enumerate() {
            let neighbors = if down_up {
                lower_neighbor_positions(segments, layers, pos, idx)
            } else {
                upper_neighbor_positions(segments, layers, pos, idx)
            };
            let positions: Vec<f64> = neighbors.into_iter().map(|p| p as f64).collect();
            weight.insert(node, median(&positions));
        }

        // Stable: nodes without neighbors (weight -1) keep their relative
        // position at the left.
        layers[idx].sort_by(|a, b| weight[a].total_cmp(&weight[b]));
    }
}

fn upper_neighbor_positions(
    segments: &BTreeSet<(u64, u64)>,
    layers: &[Vec<u64>],
    pos: usize,
    idx: usize,
) -> Vec<usize> {
    if idx == 0 {
        return Vec::new();
    }
    let node = layers[idx][pos];
    layers[idx - 1]
        .iter()
        .enumerate()
        .filter(|&(_, &up)| segments.contains(&(up, node)))
        .map(|(i, _)| i)
        .collect()
}

fn lower_neighbor_positions(
    segments: &BTreeSet<(u64, u64)>,
    layers: &[Vec<u64>],
    pos: usize,
    idx: usize,
) -> Vec<usize> {
    if idx == layers.len() - 1 {
        return Vec::new();
    }
    let node = layers[idx][pos];
    layers[idx + 1]
        .iter()
        .enumerate()
        .filter(|&(_, &down)| segments.contains(&(node, down)))
        .map(|(i, _)| i)
        .collect()
}

/// Weighted median of a sorted position sequence. Biased toward the side
/// where neighbor positions are packed tighter.
fn median(positions: &[f64]) -> f64 {
    let m = positions.len() / 2;
    match positions.len() {
        0 => -1.0,
        n if n % 2 == 1 => positions[m],
        2 => (positions[0] + positions[1]) / 2.0,
        n => {
            let left = positions[m - 1] - positions[0];
            let right = positions[n - 1] - positions[m];
            (positions[m - 1] * right + positions[m] * left) / (left + right)
        }
    }
}
