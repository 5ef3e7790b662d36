//! Coordinate assignment.
//!
//! Horizontal coordinates come from the Brandes-Köpf pass in [`bk`];
//! vertical coordinates from [`BasicVerticalAssigner`], which stacks the
//! layers top to bottom.

pub mod bk;

use rustc_hash::FxHashMap;

use crate::graph::Graph;
use crate::layered::LayeredGraph;
use crate::pipeline::VerticalAssigner;

/// Stacks layers by their tallest node, keeping each node vertically
/// centered within its layer band. Dummy nodes (and layers without any real
/// node) count with `fake_node_height`.
#[derive(Debug, Clone, Copy)]
pub struct BasicVerticalAssigner {
    /// Vertical gap between consecutive layer bands.
    pub margin_layers: i64,
    pub fake_node_height: i64,
}

impl Default for BasicVerticalAssigner {
    fn default() -> Self {
        Self {
            margin_layers: 25,
            fake_node_height: 25,
        }
    }
}

impl VerticalAssigner for BasicVerticalAssigner {
    fn vertical(&self, g: &Graph, lg: &LayeredGraph) -> FxHashMap<u64, i64> {
        let layers = lg.layers();
        let mut node_y: FxHashMap<u64, i64> = FxHashMap::default();

        let mut y_offset: i64 = 0;
        for layer in &layers {
            let mut height = 0;
            let mut has_real = false;
            for node in layer {
                if let Some(real) = g.nodes.get(node) {
                    height = height.max(real.h);
                    has_real = true;
                }
            }
            if !has_real || layer.iter().any(|n| lg.is_dummy(*n)) {
                height = height.max(self.fake_node_height);
            }

            for &node in layer {
                let node_h = g.nodes.get(&node).map_or(self.fake_node_height, |n| n.h);
                node_y.insert(node, y_offset + (height - node_h) / 2);
            }

            y_offset += height + self.margin_layers;
        }

        node_y
    }
}
