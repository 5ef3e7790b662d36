//! Layer assignment and long-edge splitting.
//!
//! [`LongestPathLayerer`] places every node on the layer given by the longest
//! path from any root to it, then splits each edge spanning more than one
//! layer into unit-length segments by inserting dummy nodes.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::layered::LayeredGraph;
use crate::pipeline::Layerer;

#[derive(Debug, Clone, Copy, Default)]
pub struct LongestPathLayerer;

impl Layerer for LongestPathLayerer {
    fn layer(&self, g: &Graph) -> Result<LayeredGraph> {
        for &(from, to) in g.edges.keys() {
            if !g.nodes.contains_key(&from) || !g.nodes.contains_key(&to) {
                return Err(Error::invariant(format!(
                    "edge ({from}, {to}) references a node that is not in the graph"
                )));
            }
        }

        let mut node_yx = assign_layers(g);
        let edges = split_long_edges(g, &mut node_yx)?;

        let lg = LayeredGraph {
            segments: make_segments(&edges),
            dummy: make_dummy(&edges),
            node_yx,
            edges,
        };
        lg.validate()?;
        Ok(lg)
    }
}

/// Longest-path layering: BFS from the roots, raising each child to one
/// layer below its deepest parent. Initial `order` is 0 everywhere; the
/// ordering stage assigns real positions later.
fn assign_layers(g: &Graph) -> BTreeMap<u64, (usize, usize)> {
    let mut node_yx: BTreeMap<u64, (usize, usize)> =
        g.nodes.keys().map(|&n| (n, (0, 0))).collect();

    let mut children: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
    for &(from, to) in g.edges.keys() {
        children.entry(from).or_default().push(to);
    }

    let mut queue: VecDeque<u64> = g.roots().into();
    while let Some(parent) = queue.pop_front() {
        let parent_layer = node_yx.get(&parent).map_or(0, |yx| yx.0);
        let Some(targets) = children.get(&parent) else {
            continue;
        };
        for &child in targets {
            let raised = parent_layer + 1;
            if node_yx.get(&child).is_some_and(|yx| raised > yx.0) {
                node_yx.insert(child, (raised, 0));
                queue.push_back(child);
            }
        }
    }

    node_yx
}

/// Chains for every original edge. A short edge keeps `[from, to]`; a long
/// edge gets a fresh dummy node per intermediate layer. Dummy ids start
/// right after the largest real id and are handed out in ascending edge-key
/// order, so the allocation is deterministic.
fn split_long_edges(
    g: &Graph,
    node_yx: &mut BTreeMap<u64, (usize, usize)>,
) -> Result<BTreeMap<(u64, u64), Vec<u64>>> {
    let mut next_dummy = match g.nodes.keys().next_back() {
        Some(&max) => max
            .checked_add(1)
            .ok_or_else(|| Error::invariant("node id space is exhausted"))?,
        None => return Ok(BTreeMap::new()),
    };

    let mut edges: BTreeMap<(u64, u64), Vec<u64>> = BTreeMap::new();
    for &(from, to) in g.edges.keys() {
        let from_layer = node_yx.get(&from).map_or(0, |yx| yx.0);
        let to_layer = node_yx.get(&to).map_or(0, |yx| yx.0);
        if to_layer <= from_layer {
            return Err(Error::invariant(format!(
                "edge ({from}, {to}) goes from layer {from_layer} to layer {to_layer}; \
                 the input graph is not acyclic"
            )));
        }

        let mut chain = Vec::with_capacity(2 + (to_layer - from_layer - 1));
        chain.push(from);
        for layer in from_layer + 1..to_layer {
            node_yx.insert(next_dummy, (layer, 0));
            chain.push(next_dummy);
            next_dummy = next_dummy
                .checked_add(1)
                .ok_or_else(|| Error::invariant("node id space is exhausted"))?;
        }
        chain.push(to);

        edges.insert((from, to), chain);
    }

    Ok(edges)
}

/// Consecutive pairs of every chain.
fn make_segments(edges: &BTreeMap<(u64, u64), Vec<u64>>) -> BTreeSet<(u64, u64)> {
    let mut segments = BTreeSet::new();
    for chain in edges.values() {
        for pair in chain.windows(2) {
            segments.insert((pair[0], pair[1]));
        }
    }
    segments
}

/// Interior nodes of every long chain.
fn make_dummy(edges: &BTreeMap<(u64, u64), Vec<u64>>) -> BTreeSet<u64> {
    let mut dummy = BTreeSet::new();
    for chain in edges.values() {
        for &node in &chain[1..chain.len() - 1] {
            dummy.insert(node);
        }
    }
    dummy
}
