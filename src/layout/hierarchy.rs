//! Layered layout driven by edge direction.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::graph::{Edge, Node, Position};

/// Assign each node a level (hops from the nearest root).
///
/// Roots are nodes that have outgoing edges but no incoming ones. When no
/// such node exists the first node is the root. Nodes BFS never reaches,
/// including nodes with no edges at all, share one tier below the deepest
/// reached level. Edges naming unknown nodes are ignored.
pub fn assign_levels(nodes: &[Node], edges: &[Edge]) -> Vec<usize> {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut has_incoming = vec![false; nodes.len()];
    let mut has_outgoing = vec![false; nodes.len()];

    for edge in edges {
        let (Some(&from), Some(&to)) = (
            index.get(edge.source.as_str()),
            index.get(edge.target.as_str()),
        ) else {
            tracing::debug!(
                source = %edge.source,
                target = %edge.target,
                "skipping edge with unknown endpoint"
            );
            continue;
        };
        children[from].push(to);
        has_outgoing[from] = true;
        has_incoming[to] = true;
    }

    let mut roots: Vec<usize> = (0..nodes.len())
        .filter(|&i| has_outgoing[i] && !has_incoming[i])
        .collect();
    if roots.is_empty() && !nodes.is_empty() {
        roots.push(0);
    }

    let mut level: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut visited: HashSet<usize> = HashSet::new();
    let mut queue: VecDeque<usize> = VecDeque::new();

    for &root in &roots {
        level[root] = Some(0);
        queue.push_back(root);
    }

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        let next_level = level[current].unwrap_or(0) + 1;
        for &child in &children[current] {
            if visited.contains(&child) {
                continue;
            }
            if level[child].is_none_or(|existing| existing > next_level) {
                level[child] = Some(next_level);
                queue.push_back(child);
            }
        }
    }

    let orphan_level = level.iter().flatten().max().map_or(0, |max| max + 1);
    level
        .into_iter()
        .map(|l| l.unwrap_or(orphan_level))
        .collect()
}

/// Position nodes by level: each level is a row at `level * spacing_y`,
/// centered on x = 0, keeping input order within the row.
pub fn hierarchical(
    nodes: &[Node],
    edges: &[Edge],
    spacing_x: f64,
    spacing_y: f64,
) -> Vec<Position> {
    let levels = assign_levels(nodes, edges);

    let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &l) in levels.iter().enumerate() {
        rows.entry(l).or_default().push(i);
    }

    let mut positions = vec![Position::ORIGIN; nodes.len()];
    for (&l, members) in &rows {
        let total_width = (members.len() - 1) as f64 * spacing_x;
        let start_x = -total_width / 2.0;
        for (slot, &i) in members.iter().enumerate() {
            positions[i] = Position::new(start_x + slot as f64 * spacing_x, l as f64 * spacing_y);
        }
    }

    positions
}
