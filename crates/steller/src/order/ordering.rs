use tracing::debug;

use super::{cross_count, OrderingInitializer, OrderingOptimizer};
use crate::graph::Graph;
use crate::layered::LayeredGraph;
use crate::pipeline::Orderer;

/// Sweep-based crossing reduction as used by Graphviz/dot (Warfield's
/// scheme): alternate up and down passes over the layers, optimizing one
/// layer at a time against its fixed neighbor, and keep the best complete
/// ordering seen across all epochs.
pub struct WarfieldOrderer {
    pub epochs: usize,
    pub initializer: Box<dyn OrderingInitializer>,
    pub optimizer: Box<dyn OrderingOptimizer>,
}

impl Orderer for WarfieldOrderer {
    fn order(&mut self, _g: &Graph, lg: &mut LayeredGraph) {
        let mut layers = lg.layers();
        self.initializer.init(&lg.segments, &mut layers);

        let mut best_layers = layers.clone();
        let mut best_n = cross_count(&lg.segments, &layers);

        for epoch in 0..self.epochs {
            let down_up = epoch % 2 == 0;
            for i in 0..layers.len() {
                let idx = if down_up { layers.len() - 1 - i } else { i };
                self.optimizer
                    .optimize(&lg.segments, &mut layers, idx, down_up);
            }

            let n = cross_count(&lg.segments, &layers);
            if n < best_n {
                best_n = n;
                best_layers.clone_from(&layers);
            }
            debug!(epoch, best = best_n, current = n, "ordering sweep");
        }

        for (y, layer) in best_layers.iter().enumerate() {
            for (x, &node) in layer.iter().enumerate() {
                lg.node_yx.insert(node, (y, x));
            }
        }
    }
}
