//! Row-based layouts: grid and bus.

use crate::graph::Position;

/// Vertical distance of a bus tap from the backbone.
pub const BUS_TAP_OFFSET: f64 = 80.0;

/// Columns used by a grid of `count` nodes.
pub fn grid_columns(count: usize) -> usize {
    (count as f64).sqrt().ceil() as usize
}

/// Row-major square-ish grid anchored at the origin.
pub fn grid(count: usize, spacing: f64) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }
    let columns = grid_columns(count);
    (0..count)
        .map(|i| {
            let row = i / columns;
            let col = i % columns;
            Position::new(col as f64 * spacing, row as f64 * spacing)
        })
        .collect()
}

/// Nodes along a horizontal backbone centered on x = 0, alternating above
/// (even index) and below (odd index) the line.
pub fn bus(count: usize, spacing: f64) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }
    let backbone_length = (count - 1) as f64 * spacing;
    let start_x = -backbone_length / 2.0;
    (0..count)
        .map(|i| {
            let y = if i % 2 == 0 {
                -BUS_TAP_OFFSET
            } else {
                BUS_TAP_OFFSET
            };
            Position::new(start_x + i as f64 * spacing, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(1), 1);
        assert_eq!(grid_columns(4), 2);
        assert_eq!(grid_columns(5), 3);
        assert_eq!(grid_columns(9), 3);
        assert_eq!(grid_columns(10), 4);
    }

    #[test]
    fn test_grid_cells_unique() {
        for count in 1..=30 {
            let spacing = 200.0;
            let points = grid(count, spacing);
            let columns = grid_columns(count);
            let cells: HashSet<(usize, usize)> = points
                .iter()
                .map(|p| ((p.y / spacing) as usize, (p.x / spacing) as usize))
                .collect();
            assert_eq!(cells.len(), count);
            assert!(cells.iter().all(|&(_, col)| col < columns));
        }
    }

    #[test]
    fn test_grid_positions() {
        let points = grid(5, 100.0);
        assert_eq!(points[0], Position::new(0.0, 0.0));
        assert_eq!(points[2], Position::new(200.0, 0.0));
        assert_eq!(points[3], Position::new(0.0, 100.0));
        assert_eq!(points[4], Position::new(100.0, 100.0));
    }

    #[test]
    fn test_bus_centered_and_alternating() {
        let points = bus(4, 150.0);
        assert_eq!(points[0], Position::new(-225.0, -80.0));
        assert_eq!(points[1], Position::new(-75.0, 80.0));
        assert_eq!(points[2], Position::new(75.0, -80.0));
        assert_eq!(points[3], Position::new(225.0, 80.0));
    }

    #[test]
    fn test_bus_single_node() {
        assert_eq!(bus(1, 150.0), vec![Position::new(0.0, -80.0)]);
    }
}
