//! Cycle removal by reversing edges.
//!
//! The layering stage requires an acyclic graph. [`SimpleCycleBreaker`] keeps
//! probing for a cycle and reverses one randomly chosen edge of it until none
//! remain; [`restore`](crate::pipeline::CycleBreaker::restore) puts the
//! reversed edges back afterwards. The random choice comes from an injected,
//! seeded generator so runs are reproducible.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Edge, Graph};
use crate::pipeline::CycleBreaker;

#[derive(Debug, Clone)]
pub struct SimpleCycleBreaker {
    reversed: BTreeSet<(u64, u64)>,
    rng: StdRng,
}

impl SimpleCycleBreaker {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            reversed: BTreeSet::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Edges currently reversed, in their original orientation.
    pub fn reversed(&self) -> &BTreeSet<(u64, u64)> {
        &self.reversed
    }
}

impl Default for SimpleCycleBreaker {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

impl CycleBreaker for SimpleCycleBreaker {
    fn remove(&mut self, g: &mut Graph) {
        while let Some(cycle) = find_cycle(g) {
            // Uniform over the cycle's edges, including the closing one.
            let i = self.rng.gen_range(0..cycle.len());
            let edge = (cycle[i], cycle[(i + 1) % cycle.len()]);
            tracing::trace!(from = edge.0, to = edge.1, "reversing cycle edge");

            g.edges.remove(&edge);
            g.edges.insert((edge.1, edge.0), Edge::default());
            self.reversed.insert(edge);
        }
    }

    fn restore(&mut self, g: &mut Graph) {
        let reversed = std::mem::take(&mut self.reversed);
        for (from, to) in reversed {
            if let Some(mut edge) = g.edges.remove(&(to, from)) {
                // The path was drawn for the reversed orientation; flip it so
                // it runs from the restored tail to the restored head.
                edge.path.reverse();
                g.edges.insert((from, to), edge);
            }
        }
    }
}

/// One cycle of `g` as the node sequence along it, or `None` if `g` is
/// acyclic. DFS keeps the current path on a stack; a back-edge into the stack
/// yields the stack suffix from that node onward.
fn find_cycle(g: &Graph) -> Option<Vec<u64>> {
    let roots = g.roots();
    // A graph where every node has a parent (e.g. one big cycle) has no
    // roots; fall back to starting everywhere.
    let starts: Vec<u64> = if roots.is_empty() {
        g.nodes.keys().copied().collect()
    } else {
        roots
    };

    let mut visited: BTreeSet<u64> = BTreeSet::new();
    let mut stack: Vec<u64> = Vec::new();
    for start in starts {
        if visited.contains(&start) {
            continue;
        }
        stack.push(start);
        let found = dfs(g, &mut visited, &mut stack);
        stack.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}

fn dfs(g: &Graph, visited: &mut BTreeSet<u64>, stack: &mut Vec<u64>) -> Option<Vec<u64>> {
    let p = *stack.last()?;
    visited.insert(p);

    let out_edges: Vec<(u64, u64)> = g
        .edges
        .range((p, u64::MIN)..=(p, u64::MAX))
        .map(|(&e, _)| e)
        .collect();
    for (from, to) in out_edges {
        if from == to {
            continue;
        }
        if let Some(at) = stack.iter().position(|&n| n == to) {
            return Some(stack[at..].to_vec());
        }
        if visited.contains(&to) {
            continue;
        }
        stack.push(to);
        let found = dfs(g, visited, stack);
        stack.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}
