use std::collections::{BTreeMap, BTreeSet, VecDeque};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use super::OrderingInitializer;

/// Orders every layer by BFS visit time. Roots are the nodes with no
/// segment predecessor; the queue and each successor list are walked in
/// ascending id order, so the result is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsOrderingInitializer;

impl OrderingInitializer for BfsOrderingInitializer {
    fn init(&mut self, segments: &BTreeSet<(u64, u64)>, layers: &mut [Vec<u64>]) {
        let mut successors: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
        let mut has_predecessor: BTreeSet<u64> = BTreeSet::new();
        for &(from, to) in segments {
            successors.entry(from).or_default().push(to);
            has_predecessor.insert(to);
        }

        let roots: BTreeSet<u64> = layers
            .iter()
            .flatten()
            .copied()
            .filter(|n| !has_predecessor.contains(n))
            .collect();

        let mut visit: FxHashMap<u64, usize> = FxHashMap::default();
        let mut queue: VecDeque<u64> = roots.into_iter().collect();
        let mut count = 0;
        while let Some(node) = queue.pop_front() {
            if visit.contains_key(&node) {
                continue;
            }
            visit.insert(node, count);
            count += 1;
            if let Some(targets) = successors.get(&node) {
                queue.extend(targets);
            }
        }

        for layer in layers.iter_mut() {
            layer.sort_by_key(|n| (visit.get(n).copied().unwrap_or(usize::MAX), *n));
        }
    }
}

/// Shuffles every layer with the injected generator.
#[derive(Debug, Clone)]
pub struct RandomOrderingInitializer {
    rng: StdRng,
}

impl RandomOrderingInitializer {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl OrderingInitializer for RandomOrderingInitializer {
    fn init(&mut self, _segments: &BTreeSet<(u64, u64)>, layers: &mut [Vec<u64>]) {
        for layer in layers.iter_mut() {
            layer.shuffle(&mut self.rng);
        }
    }
}
