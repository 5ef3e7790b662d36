//! The layered graph: the pipeline's internal model.
//!
//! A layered graph has no long edges. A short edge connects nodes in
//! adjacent layers; a long edge has been split into unit-length segments by
//! inserting dummy nodes. The top layer has the lowest layer number.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayeredGraph {
    /// Node id (real or dummy) to `(layer, order within layer)`. `order` is
    /// the authoritative within-layer position; [`LayeredGraph::layers`] is a
    /// view derived from it.
    pub node_yx: BTreeMap<u64, (usize, usize)>,
    /// Edges of the layered graph: real short edges and the unit-length
    /// pieces of split long edges.
    pub segments: BTreeSet<(u64, u64)>,
    /// Nodes created to split long edges. Disjoint from the real node ids.
    pub dummy: BTreeSet<u64>,
    /// Each original edge to the chain of nodes realizing it:
    /// `[from, d1, .., dk, to]`, interior nodes dummy, length >= 2.
    pub edges: BTreeMap<(u64, u64), Vec<u64>>,
}

impl LayeredGraph {
    /// Layers as a sequence indexed by layer number, each sorted by `order`
    /// (ties broken by id, so the view is stable even before ordering ran).
    pub fn layers(&self) -> Vec<Vec<u64>> {
        let Some(max_layer) = self.node_yx.values().map(|yx| yx.0).max() else {
            return Vec::new();
        };

        let mut layers: Vec<Vec<(usize, u64)>> = vec![Vec::new(); max_layer + 1];
        for (&node, &(layer, order)) in &self.node_yx {
            layers[layer].push((order, node));
        }

        layers
            .into_iter()
            .map(|mut layer| {
                layer.sort_unstable();
                layer.into_iter().map(|(_, node)| node).collect()
            })
            .collect()
    }

    /// Every segment must go from some layer `k` to layer `k + 1`.
    pub fn validate(&self) -> Result<()> {
        for &(from, to) in &self.segments {
            let from_layer = self.layer_of(from)?;
            let to_layer = self.layer_of(to)?;
            if to_layer != from_layer + 1 {
                return Err(Error::invariant(format!(
                    "segment ({from}, {to}) goes from layer {from_layer} to layer {to_layer}; \
                     segments must span exactly one layer downward"
                )));
            }
        }
        Ok(())
    }

    pub fn is_dummy(&self, node: u64) -> bool {
        self.dummy.contains(&node)
    }

    /// An inner segment connects two dummy nodes: the interior of a long edge.
    pub fn is_inner_segment(&self, from: u64, to: u64) -> bool {
        self.is_dummy(from) && self.is_dummy(to)
    }

    /// Nodes in the layer above connected to `node` by a segment.
    pub fn upper_neighbors(&self, node: u64) -> Vec<u64> {
        self.segments
            .iter()
            .filter(|&&(from, to)| {
                to == node && self.layer(to) == self.layer(from) + 1
            })
            .map(|&(from, _)| from)
            .collect()
    }

    /// Nodes in the layer below connected to `node` by a segment.
    pub fn lower_neighbors(&self, node: u64) -> Vec<u64> {
        self.segments
            .iter()
            .filter(|&&(from, to)| {
                from == node && self.layer(to) == self.layer(from) + 1
            })
            .map(|&(_, to)| to)
            .collect()
    }

    pub(crate) fn layer(&self, node: u64) -> usize {
        self.node_yx.get(&node).map_or(0, |yx| yx.0)
    }

    pub(crate) fn order(&self, node: u64) -> usize {
        self.node_yx.get(&node).map_or(0, |yx| yx.1)
    }

    fn layer_of(&self, node: u64) -> Result<usize> {
        self.node_yx
            .get(&node)
            .map(|yx| yx.0)
            .ok_or_else(|| Error::invariant(format!("segment endpoint {node} has no layer")))
    }
}

impl fmt::Display for LayeredGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dummy nodes:")?;
        for node in &self.dummy {
            write!(f, " {node}")?;
        }
        writeln!(f)?;

        write!(f, "segments:")?;
        for (from, to) in &self.segments {
            write!(f, " {from}->{to}")?;
        }
        writeln!(f)?;

        for (layer, nodes) in self.layers().iter().enumerate() {
            write!(f, "{layer}:")?;
            for node in nodes {
                write!(f, " {node}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
