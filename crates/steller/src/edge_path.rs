//! Edge routing through dummy chains.
//!
//! Once every node (real and dummy) has coordinates, each original edge is
//! drawn as the polyline through the nodes of its chain.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Point};
use crate::layered::LayeredGraph;
use crate::pipeline::EdgeRouter;

/// Routes every edge through the centers of its chain nodes: real nodes at
/// the middle of their rectangle, dummy nodes at their bare coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightEdgeRouter;

impl EdgeRouter for StraightEdgeRouter {
    fn route(
        &self,
        g: &mut Graph,
        lg: &LayeredGraph,
        all_xy: &FxHashMap<u64, Point>,
    ) -> Result<()> {
        let mut assigned = 0;
        for (edge, chain) in &lg.edges {
            let (from, to) = *edge;
            if !g.edges.contains_key(edge) {
                return Err(Error::invariant(format!(
                    "layered edge ({from}, {to}) is not present in the graph"
                )));
            }

            let mut path = Vec::with_capacity(chain.len());
            for &node in chain {
                let Some(&xy) = all_xy.get(&node) else {
                    return Err(Error::invariant(format!(
                        "node {node} on edge ({from}, {to}) has no coordinates"
                    )));
                };
                let point = match g.nodes.get(&node) {
                    Some(real) => Point {
                        x: xy.x + real.w / 2,
                        y: xy.y + real.h / 2,
                    },
                    // Dummy nodes are width- and height-less points.
                    None => xy,
                };
                path.push(point);
            }

            g.edges.insert(*edge, Edge { path });
            assigned += 1;
        }

        if assigned != g.edges.len() {
            return Err(Error::invariant(format!(
                "assigned paths to {assigned} edges, but the graph has {} edges",
                g.edges.len()
            )));
        }
        Ok(())
    }
}
