//! Pipeline assembly: the seams between stages, the Sugiyama driver, and
//! the options the default stack understands.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::acyclic::SimpleCycleBreaker;
use crate::edge_path::StraightEdgeRouter;
use crate::error::{Error, Result};
use crate::graph::{Graph, Point};
use crate::layered::LayeredGraph;
use crate::layering::LongestPathLayerer;
use crate::order::{
    BfsOrderingInitializer, CompositeOrderingOptimizer, OrderingInitializer, OrderingOptimizer,
    RandomOrderingInitializer, TransposeOrderingOptimizer, WMedianOrderingOptimizer,
    WarfieldOrderer,
};
use crate::position::bk::BrandesKopfHorizontal;
use crate::position::BasicVerticalAssigner;

/// Makes a graph acyclic by reversing edges, and undoes that afterwards.
pub trait CycleBreaker {
    fn remove(&mut self, g: &mut Graph);
    fn restore(&mut self, g: &mut Graph);
}

/// Builds the layered graph for an acyclic input.
pub trait Layerer {
    fn layer(&self, g: &Graph) -> Result<LayeredGraph>;
}

/// Rewrites the within-layer order of every node.
pub trait Orderer {
    fn order(&mut self, g: &Graph, lg: &mut LayeredGraph);
}

/// Assigns an x coordinate to every node, real and dummy.
pub trait HorizontalAssigner {
    fn horizontal(&self, g: &Graph, lg: &LayeredGraph) -> FxHashMap<u64, i64>;
}

/// Assigns a y coordinate to every node, real and dummy.
pub trait VerticalAssigner {
    fn vertical(&self, g: &Graph, lg: &LayeredGraph) -> FxHashMap<u64, i64>;
}

/// Writes the polyline path of every original edge.
pub trait EdgeRouter {
    fn route(&self, g: &mut Graph, lg: &LayeredGraph, all_xy: &FxHashMap<u64, Point>)
        -> Result<()>;
}

/// Anything that can lay out a graph in place.
pub trait GraphLayout {
    fn update_graph_layout(&mut self, g: &mut Graph) -> Result<()>;
}

/// Applies a sequence of layouts, each seeing the previous one's output.
#[derive(Default)]
pub struct SequenceLayout {
    pub layouts: Vec<Box<dyn GraphLayout>>,
}

impl GraphLayout for SequenceLayout {
    fn update_graph_layout(&mut self, g: &mut Graph) -> Result<()> {
        for layout in &mut self.layouts {
            layout.update_graph_layout(g)?;
        }
        Ok(())
    }
}

/// The layered pipeline (Sugiyama's scheme): break cycles, assign layers
/// and split long edges, order within layers, assign coordinates, route
/// edges, restore reversed edges.
pub struct SugiyamaPipeline {
    pub cycle_breaker: Box<dyn CycleBreaker>,
    pub layerer: Box<dyn Layerer>,
    pub orderer: Box<dyn Orderer>,
    pub horizontal: Box<dyn HorizontalAssigner>,
    pub vertical: Box<dyn VerticalAssigner>,
    pub edge_router: Box<dyn EdgeRouter>,
}

impl SugiyamaPipeline {
    /// The default stack for `options`. Fails with
    /// [`Error::InvalidConfiguration`] before any stage runs.
    pub fn from_options(options: &LayoutOptions) -> Result<Self> {
        options.validate()?;

        let initializer: Box<dyn OrderingInitializer> = match options.initializer {
            OrderingInit::Bfs => Box::new(BfsOrderingInitializer),
            OrderingInit::Random => Box::new(RandomOrderingInitializer::from_seed(options.seed)),
        };
        let optimizers: Vec<Box<dyn OrderingOptimizer>> = options
            .optimizers
            .iter()
            .map(|heuristic| -> Box<dyn OrderingOptimizer> {
                match heuristic {
                    OrderingHeuristic::WMedian => Box::new(WMedianOrderingOptimizer),
                    OrderingHeuristic::Transpose => Box::new(TransposeOrderingOptimizer),
                }
            })
            .collect();

        Ok(Self {
            cycle_breaker: Box::new(SimpleCycleBreaker::from_seed(options.seed)),
            layerer: Box::new(LongestPathLayerer),
            orderer: Box::new(WarfieldOrderer {
                epochs: options.epochs,
                initializer,
                optimizer: Box::new(CompositeOrderingOptimizer { optimizers }),
            }),
            horizontal: Box::new(BrandesKopfHorizontal {
                delta: options.delta,
            }),
            vertical: Box::new(BasicVerticalAssigner {
                margin_layers: options.margin_layers,
                fake_node_height: options.fake_node_height,
            }),
            edge_router: Box::new(StraightEdgeRouter),
        })
    }
}

impl GraphLayout for SugiyamaPipeline {
    fn update_graph_layout(&mut self, g: &mut Graph) -> Result<()> {
        for &(from, to) in g.edges.keys() {
            if !g.nodes.contains_key(&from) || !g.nodes.contains_key(&to) {
                return Err(Error::invariant(format!(
                    "edge ({from}, {to}) references a node that is not in the graph"
                )));
            }
        }

        self.cycle_breaker.remove(g);

        let mut lg = self.layerer.layer(g)?;
        lg.validate()?;
        debug!(
            nodes = g.nodes.len(),
            dummies = lg.dummy.len(),
            layers = lg.layers().len(),
            "layered graph built"
        );

        self.orderer.order(g, &mut lg);

        let node_x = self.horizontal.horizontal(g, &lg);
        let node_y = self.vertical.vertical(g, &lg);

        // Real and dummy node coordinates, for edge routing.
        let mut all_xy: FxHashMap<u64, Point> = FxHashMap::default();
        for &n in lg.node_yx.keys() {
            all_xy.insert(
                n,
                Point {
                    x: node_x.get(&n).copied().unwrap_or(0),
                    y: node_y.get(&n).copied().unwrap_or(0),
                },
            );
        }

        for (id, node) in g.nodes.iter_mut() {
            if let Some(&xy) = all_xy.get(id) {
                node.xy = xy;
            }
        }

        self.edge_router.route(g, &lg, &all_xy)?;
        self.cycle_breaker.restore(g);
        Ok(())
    }
}

/// Which initial within-layer ordering the default stack uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingInit {
    #[default]
    Bfs,
    Random,
}

/// Ordering heuristics recognized by the default stack, applied in sequence
/// to each layer during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingHeuristic {
    WMedian,
    Transpose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Seed for every randomized stage. Runs with the same seed and input
    /// produce identical output.
    pub seed: u64,
    /// Ordering sweep count.
    pub epochs: usize,
    pub initializer: OrderingInit,
    pub optimizers: Vec<OrderingHeuristic>,
    /// Minimum horizontal spacing between in-layer neighbors.
    pub delta: i64,
    /// Vertical gap between layers.
    pub margin_layers: i64,
    /// Height stand-in for dummy nodes.
    pub fake_node_height: i64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            epochs: 100,
            initializer: OrderingInit::Bfs,
            optimizers: vec![OrderingHeuristic::WMedian, OrderingHeuristic::Transpose],
            delta: 25,
            margin_layers: 25,
            fake_node_height: 25,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<()> {
        if self.delta <= 0 {
            return Err(Error::configuration(format!(
                "delta must be positive, got {}",
                self.delta
            )));
        }
        if self.epochs < 1 {
            return Err(Error::configuration("epochs must be at least 1"));
        }
        if self.optimizers.is_empty() {
            return Err(Error::configuration(
                "at least one ordering optimizer is required",
            ));
        }
        if self.margin_layers < 0 {
            return Err(Error::configuration(format!(
                "margin between layers must be non-negative, got {}",
                self.margin_layers
            )));
        }
        if self.fake_node_height < 0 {
            return Err(Error::configuration(format!(
                "fake node height must be non-negative, got {}",
                self.fake_node_height
            )));
        }
        Ok(())
    }
}

/// Lays out `g` in place with the default stack.
pub fn layout(g: &mut Graph, options: &LayoutOptions) -> Result<()> {
    SugiyamaPipeline::from_options(options)?.update_graph_layout(g)
}
