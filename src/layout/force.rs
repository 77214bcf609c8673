//! Spring-electrical simulation for force-directed layout.

use std::collections::HashMap;

use rand::Rng;

use crate::graph::{Edge, Node, Position};

/// Half-width of the square unplaced nodes are seeded into.
pub const SEED_EXTENT: f64 = 200.0;

/// Closest two nodes are considered to be when computing forces.
const MIN_DISTANCE: f64 = 1.0;

const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    pub iterations: usize,
    pub repulsion: f64,
    pub attraction: f64,
    pub damping: f64,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            iterations: 50,
            repulsion: 1000.0,
            attraction: 0.1,
            damping: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Vector {
    x: f64,
    y: f64,
}

/// Run the simulation and return the final positions in node order.
///
/// Nodes sitting exactly on the origin are treated as unplaced and get a
/// random starting point from `rng`; every other node starts where it is.
pub fn simulate<R: Rng>(
    nodes: &[Node],
    edges: &[Edge],
    params: &ForceParams,
    rng: &mut R,
) -> Vec<Position> {
    let mut positions: Vec<Position> = nodes
        .iter()
        .map(|n| {
            if n.position.is_origin() || !n.position.is_finite() {
                Position::new(
                    rng.gen_range(-SEED_EXTENT..SEED_EXTENT),
                    rng.gen_range(-SEED_EXTENT..SEED_EXTENT),
                )
            } else {
                n.position
            }
        })
        .collect();

    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();
    let springs: Vec<(usize, usize)> = edges
        .iter()
        .filter_map(|e| {
            Some((
                *index.get(e.source.as_str())?,
                *index.get(e.target.as_str())?,
            ))
        })
        .collect();

    let mut velocities = vec![Vector::default(); nodes.len()];

    for _ in 0..params.iterations {
        let mut forces = vec![Vector::default(); nodes.len()];

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let dx = positions[j].x - positions[i].x;
                let dy = positions[j].y - positions[i].y;
                let raw = dx.hypot(dy);
                let (ux, uy) = if raw > 0.0 {
                    (dx / raw, dy / raw)
                } else {
                    split_direction(i, j)
                };
                let distance = raw.max(MIN_DISTANCE);
                let force = params.repulsion / (distance * distance);
                let fx = ux * force;
                let fy = uy * force;

                forces[i].x -= fx;
                forces[i].y -= fy;
                forces[j].x += fx;
                forces[j].y += fy;
            }
        }

        for &(source, target) in &springs {
            let dx = positions[target].x - positions[source].x;
            let dy = positions[target].y - positions[source].y;
            let distance = dx.hypot(dy).max(MIN_DISTANCE);
            let force = distance * params.attraction;
            let fx = dx / distance * force;
            let fy = dy / distance * force;

            forces[source].x += fx;
            forces[source].y += fy;
            forces[target].x -= fx;
            forces[target].y -= fy;
        }

        for ((position, velocity), force) in
            positions.iter_mut().zip(&mut velocities).zip(&forces)
        {
            velocity.x = (velocity.x + force.x) * params.damping;
            velocity.y = (velocity.y + force.y) * params.damping;

            let next = Position::new(position.x + velocity.x, position.y + velocity.y);
            if next.is_finite() {
                *position = next;
            } else {
                // Runaway parameters: freeze this node instead of emitting NaN
                *velocity = Vector::default();
            }
        }
    }

    positions
}

/// Unit vector pushing `j` away from `i` when both sit on the same point.
/// Depends only on the pair so the run stays reproducible.
fn split_direction(i: usize, j: usize) -> (f64, f64) {
    let angle = (i * 31 + j) as f64 * GOLDEN_ANGLE;
    (angle.cos(), angle.sin())
}
