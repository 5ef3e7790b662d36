//! Horizontal coordinate assignment after Brandes & Köpf, "Fast and Simple
//! Horizontal Coordinate Assignment" (2002).
//!
//! Given layers and within-layer orders, assigns an x coordinate to every
//! node (real and dummy) so that nodes sharing a layer sit at least `delta`
//! apart, long-edge dummy chains come out as straight as the conflicts
//! allow, and vertically compatible neighbors are aligned. Nodes are
//! treated as width-less points; widths only matter to the vertical pass
//! and edge routing.
//!
//! This is the top-left variant of the paper: alignment runs top-to-bottom
//! preferring leftmost medians. The four-direction balancing pass is not
//! implemented.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::Graph;
use crate::layered::LayeredGraph;
use crate::pipeline::HorizontalAssigner;

#[derive(Debug, Clone, Copy)]
pub struct BrandesKopfHorizontal {
    /// Minimum spacing between in-layer neighbors, dummy nodes included.
    pub delta: i64,
}

impl Default for BrandesKopfHorizontal {
    fn default() -> Self {
        Self { delta: 25 }
    }
}

impl HorizontalAssigner for BrandesKopfHorizontal {
    fn horizontal(&self, _g: &Graph, lg: &LayeredGraph) -> FxHashMap<u64, i64> {
        let layers = lg.layers();
        let neighbors = Neighbors::new(lg);
        let conflicts = mark_type1_conflicts(lg, &layers, &neighbors);
        let alignment = vertical_alignment(lg, &layers, &conflicts, &neighbors);
        horizontal_compaction(lg, &layers, &alignment, self.delta)
    }
}

/// Per-node segment neighbors, each list sorted by within-layer order.
#[derive(Debug, Default)]
pub struct Neighbors {
    up: FxHashMap<u64, Vec<u64>>,
    down: FxHashMap<u64, Vec<u64>>,
}

impl Neighbors {
    pub fn new(lg: &LayeredGraph) -> Self {
        let mut up: FxHashMap<u64, Vec<u64>> = FxHashMap::default();
        let mut down: FxHashMap<u64, Vec<u64>> = FxHashMap::default();
        for &(from, to) in &lg.segments {
            down.entry(from).or_default().push(to);
            up.entry(to).or_default().push(from);
        }
        for list in up.values_mut().chain(down.values_mut()) {
            list.sort_unstable_by_key(|&n| lg.order(n));
        }
        Self { up, down }
    }

    pub fn up(&self, node: u64) -> &[u64] {
        self.up.get(&node).map_or(&[], Vec::as_slice)
    }

    pub fn down(&self, node: u64) -> &[u64] {
        self.down.get(&node).map_or(&[], Vec::as_slice)
    }
}

/// Alg. 1: mark type-1 conflicts, i.e. segments crossing an inner segment.
/// Marked segments are barred from forming alignments, which keeps the
/// interior of long edges straight at the expense of ordinary edges.
///
/// Walks each lower layer left to right, maintaining the window `[k0, k1]`
/// of upper orders between the two nearest inner segments; any neighbor
/// outside the window belongs to a crossing segment.
pub fn mark_type1_conflicts(
    lg: &LayeredGraph,
    layers: &[Vec<u64>],
    neighbors: &Neighbors,
) -> FxHashSet<(u64, u64)> {
    let mut marked: FxHashSet<(u64, u64)> = FxHashSet::default();

    for i in 0..layers.len().saturating_sub(1) {
        let upper = &layers[i];
        let lower = &layers[i + 1];

        let mut k0: usize = 0;
        let mut scan: usize = 0;

        for (l1, &v) in lower.iter().enumerate() {
            let inner_upper = neighbors
                .up(v)
                .iter()
                .copied()
                .find(|&u| lg.is_inner_segment(u, v));

            if inner_upper.is_some() || l1 == lower.len() - 1 {
                let k1 = match inner_upper {
                    Some(u) => lg.order(u),
                    None => upper.len().saturating_sub(1),
                };
                while scan <= l1 {
                    let w = lower[scan];
                    for &u in neighbors.up(w) {
                        let pos = lg.order(u);
                        if pos < k0 || pos > k1 {
                            marked.insert((u, w));
                        }
                    }
                    scan += 1;
                }
                k0 = k1;
            }
        }
    }

    marked
}

/// A block is a maximal set of vertically aligned nodes, stored as a cyclic
/// list through `align` with every member's `root` naming the topmost node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub root: FxHashMap<u64, u64>,
    pub align: FxHashMap<u64, u64>,
}

/// Alg. 2: leftmost alignment with upper medians. Each node tries its one or
/// two median upper neighbors left to right; an alignment is taken when the
/// segment is conflict-free and does not cross an alignment already made in
/// this layer (`r` tracks the rightmost upper order used so far).
pub fn vertical_alignment(
    lg: &LayeredGraph,
    layers: &[Vec<u64>],
    conflicts: &FxHashSet<(u64, u64)>,
    neighbors: &Neighbors,
) -> Alignment {
    let mut root: FxHashMap<u64, u64> = FxHashMap::default();
    let mut align: FxHashMap<u64, u64> = FxHashMap::default();
    for &v in lg.node_yx.keys() {
        root.insert(v, v);
        align.insert(v, v);
    }

    for layer in layers {
        let mut r: i64 = -1;
        for &v in layer {
            let ups = neighbors.up(v);
            if ups.is_empty() {
                continue;
            }

            let d = ups.len();
            for m in (d - 1) / 2..=d / 2 {
                if align[&v] != v {
                    break;
                }
                let u = ups[m];
                let u_order = lg.order(u) as i64;
                if !conflicts.contains(&(u, v)) && u_order > r {
                    align.insert(u, v);
                    let u_root = root[&u];
                    root.insert(v, u_root);
                    align.insert(v, u_root);
                    r = u_order;
                }
            }
        }
    }

    Alignment { root, align }
}

/// Alg. 3: horizontal compaction. Every block takes the coordinate of its
/// root, computed relative to the block's sink (the representative of its
/// connected "class"); class offsets are then resolved top to bottom and
/// folded in. Unset shifts act as zero.
pub fn horizontal_compaction(
    lg: &LayeredGraph,
    layers: &[Vec<u64>],
    alignment: &Alignment,
    delta: i64,
) -> FxHashMap<u64, i64> {
    let mut sink: FxHashMap<u64, u64> = FxHashMap::default();
    let mut shift: FxHashMap<u64, i64> = FxHashMap::default();
    let mut x: FxHashMap<u64, i64> = FxHashMap::default();
    for &v in lg.node_yx.keys() {
        sink.insert(v, v);
        shift.insert(v, i64::MAX);
    }

    // Root coordinates relative to their sink. Layer order makes the
    // traversal (and therefore the output) deterministic.
    for layer in layers {
        for &v in layer {
            if alignment.root[&v] == v {
                place_block(lg, layers, alignment, &mut sink, &mut shift, &mut x, delta, v);
            }
        }
    }

    // Class offsets: walk each class from the topmost layer whose leftmost
    // node owns its sink, tightening the shift of every class reachable
    // through left in-layer neighbors.
    for (i, layer) in layers.iter().enumerate() {
        let Some(&vfirst) = layer.first() else {
            continue;
        };
        if sink[&vfirst] != vfirst {
            continue;
        }
        if shift[&vfirst] == i64::MAX {
            shift.insert(vfirst, 0);
        }

        let mut j = i;
        let mut k: usize = 0;
        loop {
            let mut v = layers[j][k];

            // Descend v's block to its bottom member.
            while alignment.align[&v] != alignment.root[&v] {
                v = alignment.align[&v];
                let (v_layer, v_order) = lg.node_yx[&v];
                j = v_layer;
                if v_order > 0 {
                    let u = layers[v_layer][v_order - 1];
                    let shifted = shift[&sink[&v]] + x[&v] - (x[&u] + delta);
                    if shifted < shift[&sink[&u]] {
                        shift.insert(sink[&u], shifted);
                    }
                }
            }

            let (v_layer, v_order) = lg.node_yx[&v];
            j = v_layer;
            k = v_order + 1;
            if k >= layers[j].len() || sink[&v] != sink[&layers[j][k]] {
                break;
            }
        }
    }

    // Absolute coordinates.
    let mut out: FxHashMap<u64, i64> = FxHashMap::default();
    for &v in lg.node_yx.keys() {
        let offset = shift[&sink[&v]];
        let base = x.get(&v).copied().unwrap_or(0);
        out.insert(v, if offset == i64::MAX { base } else { base + offset });
    }
    out
}

/// Places one block: pulls in every left in-layer neighbor's block first,
/// then either tightens this block against it (same class) or records a
/// candidate shift between the two classes. Memoized through `x`, so the
/// block-dependency DAG is traversed once.
#[allow(clippy::too_many_arguments)]
fn place_block(
    lg: &LayeredGraph,
    layers: &[Vec<u64>],
    alignment: &Alignment,
    sink: &mut FxHashMap<u64, u64>,
    shift: &mut FxHashMap<u64, i64>,
    x: &mut FxHashMap<u64, i64>,
    delta: i64,
    v: u64,
) {
    if x.contains_key(&v) {
        return;
    }
    x.insert(v, 0);

    let mut w = v;
    loop {
        let (w_layer, w_order) = lg.node_yx[&w];
        if w_order > 0 {
            let u = alignment.root[&layers[w_layer][w_order - 1]];
            place_block(lg, layers, alignment, sink, shift, x, delta, u);

            if sink[&v] == v {
                let sink_u = sink[&u];
                sink.insert(v, sink_u);
            }
            if sink[&v] != sink[&u] {
                let sink_u = sink[&u];
                let candidate = x[&v] - x[&u] - delta;
                if candidate < shift[&sink_u] {
                    shift.insert(sink_u, candidate);
                }
            } else {
                let tightened = x[&u] + delta;
                if tightened > x[&v] {
                    x.insert(v, tightened);
                }
            }
        }

        w = alignment.align[&w];
        if w == v {
            break;
        }
    }

    // Propagate the root's coordinate and sink to the whole block.
    let x_v = x[&v];
    let sink_v = sink[&v];
    let mut w = alignment.align[&v];
    while w != v {
        x.insert(w, x_v);
        sink.insert(w, sink_v);
        w = alignment.align[&w];
    }
}
