//! Topology auto-layout.
//!
//! Every strategy is a pure function from nodes (plus edges, for the
//! strategies that read them) to new node positions. Node order, ids,
//! payloads and edges are never changed.

mod engine;
mod force;
mod hierarchy;
mod linear;
mod options;
mod radial;
mod strategy;

pub use engine::{
    DEFAULT_BUS_SPACING, DEFAULT_CIRCULAR_RADIUS, DEFAULT_EXTENDED_STAR_RADIUS,
    DEFAULT_GRID_SPACING, DEFAULT_LEVEL_SPACING_X, DEFAULT_LEVEL_SPACING_Y, DEFAULT_MESH_RADIUS,
    DEFAULT_RING_RADIUS, DEFAULT_STAR_RADIUS, LayoutEngine,
};
pub use force::ForceParams;
pub use hierarchy::assign_levels;
pub use linear::grid_columns;
pub use options::{LayoutOptions, MAX_ITERATIONS, Spacing};
pub use strategy::LayoutStrategy;

use crate::graph::{Edge, Node};

/// Apply a layout by strategy name.
///
/// An unrecognized name leaves the nodes exactly as given.
pub fn apply_layout(
    nodes: Vec<Node>,
    edges: &[Edge],
    strategy: &str,
    options: LayoutOptions,
) -> Vec<Node> {
    match LayoutStrategy::from_str(strategy) {
        Some(strategy) => LayoutEngine::new(options).layout(strategy, nodes, edges),
        None => {
            tracing::warn!(strategy, "unknown layout strategy, leaving positions unchanged");
            nodes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;

    fn seeded() -> LayoutOptions {
        LayoutOptions {
            seed: Some(5),
            ..Default::default()
        }
    }

    fn sample(count: usize) -> (Vec<Node>, Vec<Edge>) {
        let nodes: Vec<Node> = (0..count).map(|i| Node::new(format!("d{}", i))).collect();
        let edges = (1..count)
            .map(|i| Edge::new(format!("d{}", (i - 1) / 2), format!("d{}", i)))
            .collect();
        (nodes, edges)
    }

    #[test]
    fn test_empty_input_every_strategy() {
        for strategy in LayoutStrategy::ALL {
            let out = apply_layout(vec![], &[], strategy.as_str(), LayoutOptions::default());
            assert!(out.is_empty(), "{}", strategy.as_str());
        }
    }

    #[test]
    fn test_order_and_ids_preserved() {
        for strategy in LayoutStrategy::ALL {
            for count in [1, 2, 3, 7, 16] {
                let (nodes, edges) = sample(count);
                let out = apply_layout(nodes.clone(), &edges, strategy.as_str(), seeded());
                assert_eq!(out.len(), nodes.len());
                for (before, after) in nodes.iter().zip(&out) {
                    assert_eq!(before.id, after.id);
                    assert_eq!(before.data, after.data);
                }
            }
        }
    }

    #[test]
    fn test_positions_finite() {
        for strategy in LayoutStrategy::ALL {
            for count in 1..=12 {
                let (nodes, _) = sample(count);
                // Disconnected input as well as the tree
                let out = apply_layout(nodes, &[], strategy.as_str(), seeded());
                assert!(
                    out.iter().all(|n| n.position.is_finite()),
                    "{} with {} nodes",
                    strategy.as_str(),
                    count
                );
            }
        }
    }

    #[test]
    fn test_single_node_star_variants_centered() {
        for name in ["star", "extended-star"] {
            let out = apply_layout(vec![Node::new("only")], &[], name, LayoutOptions::default());
            assert_eq!(out[0].position, Position::ORIGIN);
        }
    }

    #[test]
    fn test_unknown_strategy_is_identity() {
        let nodes = vec![Node::new("a").at(3.0, 4.0), Node::new("b").at(-1.0, 2.5)];
        let out = apply_layout(nodes.clone(), &[], "spiral", LayoutOptions::default());
        assert_eq!(out, nodes);
    }

    #[test]
    fn test_edges_untouched() {
        let (nodes, edges) = sample(6);
        let before = edges.clone();
        let _ = apply_layout(nodes, &edges, "hierarchical", LayoutOptions::default());
        assert_eq!(edges, before);
    }

    #[test]
    fn test_ring_and_mesh_start_at_top() {
        let (nodes, _) = sample(4);
        for (name, radius) in [("ring", DEFAULT_RING_RADIUS), ("mesh", DEFAULT_MESH_RADIUS)] {
            let out = apply_layout(nodes.clone(), &[], name, LayoutOptions::default());
            assert!(out[0].position.x.abs() < 1e-9);
            assert!((out[0].position.y + radius).abs() < 1e-9);
            for node in &out {
                assert!((node.position.distance(Position::ORIGIN) - radius).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_grid_uses_ceil_sqrt_columns() {
        let (nodes, _) = sample(10);
        let out = apply_layout(nodes, &[], "grid", LayoutOptions::default());
        let columns = grid_columns(10);
        assert_eq!(columns, 4);
        let max_x = out.iter().map(|n| n.position.x).fold(0.0, f64::max);
        assert_eq!(max_x, (columns - 1) as f64 * DEFAULT_GRID_SPACING);
    }

    #[test]
    fn test_hierarchical_levels_through_engine() {
        let nodes = vec![Node::new("A"), Node::new("B"), Node::new("C"), Node::new("D")];
        let edges = vec![Edge::new("A", "B"), Edge::new("B", "C")];
        let out = apply_layout(nodes, &edges, "hierarchical", LayoutOptions::default());
        let ys: Vec<f64> = out.iter().map(|n| n.position.y).collect();
        let expected: Vec<f64> = (0..4).map(|l| l as f64 * DEFAULT_LEVEL_SPACING_Y).collect();
        assert_eq!(ys, expected);
    }
}
