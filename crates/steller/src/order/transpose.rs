use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::cross_count::two_layer_cross_count;
use super::OrderingOptimizer;

/// Swaps adjacent nodes whenever that strictly reduces crossings against the
/// fixed neighbor layer (the `transpose` step of Graphviz/dot, TSE93 figure
/// 3-3).
#[derive(Debug, Clone, Copy, Default)]
pub struct TransposeOrderingOptimizer;

impl OrderingOptimizer for TransposeOrderingOptimizer {
    fn optimize(
        &mut self,
        segments: &BTreeSet<(u64, u64)>,
        layers: &mut [Vec<u64>],
        idx: usize,
        down_up: bool,
    ) {
        if layers[idx].len() < 2 {
            return;
        }
        // No layer below / above to count against.
        if down_up && idx == layers.len() - 1 {
            return;
        }
        if !down_up && idx == 0 {
            return;
        }

        for i in 0..layers[idx].len() - 1 {
            let current = pair_crossings(segments, layers, idx, down_up);
            layers[idx].swap(i, i + 1);
            let swapped = pair_crossings(segments, layers, idx, down_up);
            if swapped >= current {
                layers[idx].swap(i, i + 1);
            }
        }
    }
}

/// Picks the best of `epochs` random shuffles of one layer, judged by the
/// crossings against both neighbor layers.
#[derive(Debug, Clone)]
pub struct RandomOrderingOptimizer {
    pub epochs: usize,
    rng: StdRng,
}

impl RandomOrderingOptimizer {
    pub fn from_seed(epochs: usize, seed: u64) -> Self {
        Self {
            epochs,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl OrderingOptimizer for RandomOrderingOptimizer {
    fn optimize(
        &mut self,
        segments: &BTreeSet<(u64, u64)>,
        layers: &mut [Vec<u64>],
        idx: usize,
        _down_up: bool,
    ) {
        let mut best = both_sides_crossings(segments, layers, idx);
        let mut best_layer = layers[idx].clone();

        for _ in 0..self.epochs {
            layers[idx].shuffle(&mut self.rng);
            let n = both_sides_crossings(segments, layers, idx);
            if n < best {
                best = n;
                best_layer = layers[idx].clone();
            }
        }

        layers[idx] = best_layer;
    }
}

fn pair_crossings(
    segments: &BTreeSet<(u64, u64)>,
    layers: &[Vec<u64>],
    idx: usize,
    down_up: bool,
) -> usize {
    if down_up {
        two_layer_cross_count(segments, &layers[idx], &layers[idx + 1])
    } else {
        two_layer_cross_count(segments, &layers[idx - 1], &layers[idx])
    }
}

fn both_sides_crossings(segments: &BTreeSet<(u64, u64)>, layers: &[Vec<u64>], idx: usize) -> usize {
    let mut n = 0;
    if idx > 0 {
        n += two_layer_cross_count(segments, &layers[idx - 1], &layers[idx]);
    }
    if idx + 1 < layers.len() {
        n += two_layer_cross_count(segments, &layers[idx], &layers[idx + 1]);
    }
    n
}
