//! Layout engine core implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::graph::{Edge, Node, Position};

use super::force::{self, ForceParams};
use super::hierarchy::hierarchical;
use super::linear::{bus, grid};
use super::options::LayoutOptions;
use super::radial::{TOP, circle, extended_star, star};
use super::strategy::LayoutStrategy;

pub const DEFAULT_GRID_SPACING: f64 = 200.0;
pub const DEFAULT_BUS_SPACING: f64 = 150.0;
pub const DEFAULT_CIRCULAR_RADIUS: f64 = 300.0;
pub const DEFAULT_RING_RADIUS: f64 = 200.0;
pub const DEFAULT_MESH_RADIUS: f64 = 200.0;
pub const DEFAULT_STAR_RADIUS: f64 = 200.0;
pub const DEFAULT_EXTENDED_STAR_RADIUS: f64 = 150.0;
pub const DEFAULT_LEVEL_SPACING_X: f64 = 200.0;
pub const DEFAULT_LEVEL_SPACING_Y: f64 = 120.0;

/// Layout engine configuration and computation.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Reposition `nodes` with the given strategy.
    ///
    /// Output order matches input order and only `position` changes.
    pub fn layout(
        &self,
        strategy: LayoutStrategy,
        mut nodes: Vec<Node>,
        edges: &[Edge],
    ) -> Vec<Node> {
        if nodes.is_empty() {
            return nodes;
        }

        let positions = self.positions(strategy, &nodes, edges);
        debug_assert_eq!(positions.len(), nodes.len());

        for (node, position) in nodes.iter_mut().zip(positions) {
            node.position = position;
        }

        tracing::debug!(
            strategy = strategy.as_str(),
            nodes = nodes.len(),
            edges = edges.len(),
            "layout applied"
        );
        nodes
    }

    fn positions(
        &self,
        strategy: LayoutStrategy,
        nodes: &[Node],
        edges: &[Edge],
    ) -> Vec<Position> {
        let count = nodes.len();
        let opts = &self.options;

        match strategy {
            LayoutStrategy::Grid => grid(count, opts.spacing_or(DEFAULT_GRID_SPACING)),
            LayoutStrategy::Bus => bus(count, opts.spacing_or(DEFAULT_BUS_SPACING)),
            LayoutStrategy::Circular => {
                circle(count, opts.radius_or(DEFAULT_CIRCULAR_RADIUS), 0.0)
            }
            LayoutStrategy::Ring => circle(count, opts.radius_or(DEFAULT_RING_RADIUS), TOP),
            LayoutStrategy::Mesh => circle(count, opts.radius_or(DEFAULT_MESH_RADIUS), TOP),
            LayoutStrategy::Star => {
                let ranked = star(count, opts.radius_or(DEFAULT_STAR_RADIUS));
                scatter(&self.hub_first(nodes), ranked)
            }
            LayoutStrategy::ExtendedStar => {
                let ranked = extended_star(count, opts.radius_or(DEFAULT_EXTENDED_STAR_RADIUS));
                scatter(&self.hub_first(nodes), ranked)
            }
            LayoutStrategy::Hierarchical => hierarchical(
                nodes,
                edges,
                opts.spacing_or(DEFAULT_LEVEL_SPACING_X),
                opts.vertical_spacing_or(DEFAULT_LEVEL_SPACING_Y),
            ),
            LayoutStrategy::ForceDirected => {
                let defaults = ForceParams::default();
                let params = ForceParams {
                    iterations: opts.iterations_or(defaults.iterations),
                    repulsion: opts.repulsion_or(defaults.repulsion),
                    attraction: opts.attraction_or(defaults.attraction),
                    damping: opts.damping_or(defaults.damping),
                };
                let mut rng = match opts.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                force::simulate(nodes, edges, &params, &mut rng)
            }
        }
    }

    /// Node indices with the hub first and the rest in input order.
    ///
    /// The hub is `options.hub` when it names a node, otherwise node 0.
    fn hub_first(&self, nodes: &[Node]) -> Vec<usize> {
        let hub = match &self.options.hub {
            Some(id) => nodes.iter().position(|n| &n.id == id).unwrap_or_else(|| {
                tracing::warn!(hub = %id, "designated hub not in graph, using first node");
                0
            }),
            None => 0,
        };

        std::iter::once(hub)
            .chain((0..nodes.len()).filter(|&i| i != hub))
            .collect()
    }
}

/// Place rank-ordered positions back at their node indices.
fn scatter(order: &[usize], ranked: Vec<Position>) -> Vec<Position> {
    let mut positions = vec![Position::ORIGIN; order.len()];
    for (&index, position) in order.iter().zip(ranked) {
        positions[index] = position;
    }
    positions
}
