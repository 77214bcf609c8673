//! Circle-based layouts: circular, ring, mesh, star and extended star.
//!
//! All functions return positions by rank. For the star variants rank 0 is
//! the hub; the engine decides which node holds that rank.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::graph::Position;

/// Start at 12 o'clock
pub const TOP: f64 = -FRAC_PI_2;

/// Peripheral distance from its intermediate, relative to the star radius.
pub const PERIPHERAL_RATIO: f64 = 0.6;

/// Upper bound on second-tier nodes in an extended star.
pub const MAX_INTERMEDIATES: usize = 4;

/// `count` points evenly spaced on a circle around the origin.
pub fn circle(count: usize, radius: f64, start_angle: f64) -> Vec<Position> {
    around(Position::ORIGIN, count, radius, start_angle)
}

fn around(center: Position, count: usize, radius: f64, start_angle: f64) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }
    let step = TAU / count as f64;
    (0..count)
        .map(|i| center.polar(radius, start_angle + i as f64 * step))
        .collect()
}

/// Hub at the origin, every other node on one ring.
pub fn star(count: usize, radius: f64) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }
    let mut positions = Vec::with_capacity(count);
    positions.push(Position::ORIGIN);
    positions.extend(circle(count - 1, radius, TOP));
    positions
}

/// Number of second-tier nodes for an extended star of `count` nodes.
pub fn intermediate_count(count: usize) -> usize {
    MAX_INTERMEDIATES.min(count.saturating_sub(1) / 2)
}

/// Three tiers: hub, up to four intermediates on the star ring, and
/// peripherals fanned out around their intermediate.
///
/// Peripheral `k` hangs off intermediate `k mod intermediates` at
/// `0.6 * radius`, with its angle spread over the whole peripheral count.
/// A two-node graph has no intermediates; its second node sits on the star
/// ring instead.
pub fn extended_star(count: usize, radius: f64) -> Vec<Position> {
    let intermediates = intermediate_count(count);
    if intermediates == 0 {
        return star(count, radius);
    }

    let mut positions = Vec::with_capacity(count);
    positions.push(Position::ORIGIN);
    positions.extend(circle(intermediates, radius, TOP));

    let peripherals = count - 1 - intermediates;
    let step = if peripherals > 0 {
        TAU / peripherals as f64
    } else {
        0.0
    };
    for k in 0..peripherals {
        let anchor = positions[1 + k % intermediates];
        positions.push(anchor.polar(radius * PERIPHERAL_RATIO, TOP + k as f64 * step));
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_circle_radius_and_steps() {
        let points = circle(6, 200.0, TOP);
        assert_eq!(points.len(), 6);
        for p in &points {
            assert!((p.distance(Position::ORIGIN) - 200.0).abs() < EPS);
        }
        // First point at 12 o'clock
        assert!(points[0].x.abs() < EPS);
        assert!((points[0].y + 200.0).abs() < EPS);

        // Equal chord between consecutive points, including the wrap-around
        let chord = points[0].distance(points[1]);
        for i in 0..points.len() {
            let next = points[(i + 1) % points.len()];
            assert!((points[i].distance(next) - chord).abs() < 1e-6);
        }
    }

    #[test]
    fn test_circle_single() {
        let points = circle(1, 300.0, 0.0);
        assert!((points[0].x - 300.0).abs() < EPS);
        assert!(points[0].y.abs() < EPS);
    }

    #[test]
    fn test_star() {
        let points = star(5, 200.0);
        assert_eq!(points[0], Position::ORIGIN);
        for p in &points[1..] {
            assert!((p.distance(Position::ORIGIN) - 200.0).abs() < EPS);
        }
        assert_eq!(star(1, 200.0), vec![Position::ORIGIN]);
        assert!(star(0, 200.0).is_empty());
    }

    #[test]
    fn test_intermediate_count() {
        assert_eq!(intermediate_count(1), 0);
        assert_eq!(intermediate_count(2), 0);
        assert_eq!(intermediate_count(3), 1);
        assert_eq!(intermediate_count(5), 2);
        assert_eq!(intermediate_count(9), 4);
        assert_eq!(intermediate_count(40), 4);
    }

    #[test]
    fn test_extended_star_tiers() {
        let radius = 150.0;
        let points = extended_star(13, radius);
        assert_eq!(points.len(), 13);
        assert_eq!(points[0], Position::ORIGIN);

        for p in &points[1..5] {
            assert!((p.distance(Position::ORIGIN) - radius).abs() < EPS);
        }
        for (k, p) in points[5..].iter().enumerate() {
            let anchor = points[1 + k % 4];
            assert!((p.distance(anchor) - radius * PERIPHERAL_RATIO).abs() < EPS);
        }
    }

    #[test]
    fn test_extended_star_small() {
        assert_eq!(extended_star(1, 150.0), vec![Position::ORIGIN]);

        let two = extended_star(2, 150.0);
        assert!((two[1].distance(Position::ORIGIN) - 150.0).abs() < EPS);

        // One intermediate, one peripheral directly above it
        let three = extended_star(3, 150.0);
        assert!((three[2].x - three[1].x).abs() < EPS);
        assert!((three[2].y - (three[1].y - 90.0)).abs() < EPS);
    }
}
