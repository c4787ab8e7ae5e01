//! Top-to-bottom auto-layout for a flow after structural edits.
//!
//! Each node is placed on the level of the longest path reaching it from a root, so every
//! parent renders strictly above all of its children. Rows are centered on x = 0.

use crate::flow::{FlowGraph, FlowSnapshot, Position};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Block dimensions and spacing used by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 280.0,
            node_height: 100.0,
            horizontal_gap: 60.0,
            vertical_gap: 80.0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Computes a position for every node. Never touches edges or ids, and ignores the
/// positions already in the snapshot, so repeated calls on one topology agree.
pub fn layout(flow: &FlowSnapshot, config: &LayoutConfig) -> AHashMap<String, Position> {
    let graph = FlowGraph::new(flow);
    let forward = acyclic_children(&graph);
    let levels = assign_levels(&forward);
    let rows = order_rows(&forward, &levels);

    let row_step = config.node_height + config.vertical_gap;
    let column_step = config.node_width + config.horizontal_gap;

    let mut positions = AHashMap::with_capacity(graph.len());
    for (level, row) in rows.iter().enumerate() {
        let count = row.len() as f64;
        let row_width = count * config.node_width + (count - 1.0) * config.horizontal_gap;
        let left = -row_width / 2.0;
        for (slot, &idx) in row.iter().enumerate() {
            positions.insert(
                graph.node(idx).id.clone(),
                Position::new(left + slot as f64 * column_step, level as f64 * row_step),
            );
        }
    }

    tracing::debug!(nodes = graph.len(), levels = rows.len(), "laid out flow");
    positions
}

/// Forward adjacency with back edges dropped.
///
/// A depth-first walk starts from the roots, then from any node still unvisited (a
/// rootless cycle), in snapshot order. An edge into a node on the active path closes
/// a cycle and is skipped.
fn acyclic_children(graph: &FlowGraph<'_>) -> Vec<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut kept = vec![Vec::new(); graph.len()];

    let starts = graph.roots().into_iter().chain(0..graph.len());
    for start in starts {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        marks[start] = Mark::Active;
        let mut stack = vec![(start, 0usize)];

        while let Some(&(node, next)) = stack.last() {
            let Some(&child) = graph.children(node).get(next) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            let top = stack.len() - 1;
            stack[top].1 += 1;

            match marks[child] {
                Mark::Active => {}
                Mark::Done => kept[node].push(child),
                Mark::Unvisited => {
                    kept[node].push(child);
                    marks[child] = Mark::Active;
                    stack.push((child, 0));
                }
            }
        }
    }
    kept
}

/// Longest-path levels over an acyclic adjacency.
fn assign_levels(forward: &[Vec<usize>]) -> Vec<usize> {
    let mut in_degree = vec![0usize; forward.len()];
    for children in forward {
        for &child in children {
            in_degree[child] += 1;
        }
    }

    let mut levels = vec![0usize; forward.len()];
    let mut queue: VecDeque<usize> = (0..forward.len()).filter(|&i| in_degree[i] == 0).collect();
    while let Some(idx) = queue.pop_front() {
        for &child in &forward[idx] {
            levels[child] = levels[child].max(levels[idx] + 1);
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push_back(child);
            }
        }
    }
    levels
}

/// Groups nodes into rows. Row 0 keeps snapshot order; deeper rows are sorted by the
/// mean slot of their parents, then by snapshot order.
fn order_rows(forward: &[Vec<usize>], levels: &[usize]) -> Vec<Vec<usize>> {
    let depth = levels.iter().max().map_or(0, |&max| max + 1);
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); depth];
    for (idx, &level) in levels.iter().enumerate() {
        rows[level].push(idx);
    }

    let mut parents = vec![Vec::new(); forward.len()];
    for (idx, children) in forward.iter().enumerate() {
        for &child in children {
            parents[child].push(idx);
        }
    }

    let mut slot = vec![0usize; forward.len()];
    for row in &mut rows {
        let barycenter = |idx: usize| -> f64 {
            let placed = &parents[idx];
            if placed.is_empty() {
                return f64::MAX;
            }
            placed.iter().map(|&p| slot[p] as f64).sum::<f64>() / placed.len() as f64
        };
        let mut keyed: Vec<(f64, usize)> = row.iter().map(|&idx| (barycenter(idx), idx)).collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        *row = keyed.into_iter().map(|(_, idx)| idx).collect();

        for (position, &idx) in row.iter().enumerate() {
            slot[idx] = position;
        }
    }
    rows
}
