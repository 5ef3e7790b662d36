//! Layered (Sugiyama-style) graph layout.
//!
//! Computes 2D coordinates for the nodes and polyline paths for the edges of
//! a directed graph, possibly cyclic, as a hierarchical drawing: cycles are
//! broken by reversing edges, nodes are assigned to layers with long edges
//! split at dummy nodes, layers are permuted to reduce crossings, horizontal
//! coordinates come from the Brandes-Köpf alignment, and edges are routed
//! through their dummy chains.
//!
//! The whole pipeline is deterministic for a fixed seed. Every stage sits
//! behind a trait, so single stages can be swapped out; [`layout`] runs the
//! default stack.
//!
//! ```
//! use steller::{layout, Graph, LayoutOptions, Node, Edge};
//!
//! let mut g = Graph::default();
//! g.nodes.insert(1, Node { w: 10, h: 10, ..Default::default() });
//! g.nodes.insert(2, Node { w: 10, h: 10, ..Default::default() });
//! g.edges.insert((1, 2), Edge::default());
//!
//! layout(&mut g, &LayoutOptions::default()).unwrap();
//!
//! let path = &g.edges[&(1, 2)].path;
//! assert_eq!(path.first(), Some(&g.nodes[&1].center_xy()));
//! assert_eq!(path.last(), Some(&g.nodes[&2].center_xy()));
//! ```

pub mod acyclic;
pub mod edge_path;
pub mod error;
pub mod graph;
pub mod layered;
pub mod layering;
pub mod order;
pub mod pipeline;
pub mod position;

pub use error::{Error, Result};
pub use graph::{Edge, Graph, Node, Point};
pub use layered::LayeredGraph;
pub use pipeline::{
    layout, GraphLayout, LayoutOptions, OrderingHeuristic, OrderingInit, SequenceLayout,
    SugiyamaPipeline,
};
