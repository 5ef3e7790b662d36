//! Within-layer ordering / crossing reduction.
//!
//! The driver ([`WarfieldOrderer`]) sweeps the layers up and down, applying
//! an ordering heuristic to one layer at a time while treating its neighbor
//! layer as fixed, and keeps the best ordering seen. Initializers seed the
//! first permutation; optimizers improve it.

use std::collections::BTreeSet;

mod cross_count;
pub use cross_count::cross_count;

mod init_order;
pub use init_order::{BfsOrderingInitializer, RandomOrderingInitializer};

mod wmedian;
pub use wmedian::WMedianOrderingOptimizer;

mod transpose;
pub use transpose::{RandomOrderingOptimizer, TransposeOrderingOptimizer};

mod ordering;
pub use ordering::WarfieldOrderer;

/// Seeds the initial permutation of every layer.
pub trait OrderingInitializer {
    fn init(&mut self, segments: &BTreeSet<(u64, u64)>, layers: &mut [Vec<u64>]);
}

/// Permutes layer `idx` to reduce crossings, treating the neighbor layer as
/// fixed: the lower one when `down_up` is set, the upper one otherwise.
pub trait OrderingOptimizer {
    fn optimize(
        &mut self,
        segments: &BTreeSet<(u64, u64)>,
        layers: &mut [Vec<u64>],
        idx: usize,
        down_up: bool,
    );
}

/// Applies a sequence of optimizers to the same layer, in order.
#[derive(Default)]
pub struct CompositeOrderingOptimizer {
    pub optimizers: Vec<Box<dyn OrderingOptimizer>>,
}

impl OrderingOptimizer for CompositeOrderingOptimizer {
    fn optimize(
        &mut self,
        segments: &BTreeSet<(u64, u64)>,
        layers: &mut [Vec<u64>],
        idx: usize,
        down_up: bool,
    ) {
        for optimizer in &mut self.optimizers {
            optimizer.optimize(segments, layers, idx, down_up);
        }
    }
}
