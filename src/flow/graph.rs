use super::definition::{FlowNode, FlowSnapshot};
use crate::rules::{ResourceSet, RuleTable};
use ahash::AHashMap;
use std::collections::VecDeque;

/// A read-only adjacency index over a `FlowSnapshot`.
///
/// Nodes are addressed by their position in `snapshot.nodes`. When an id is duplicated,
/// connections resolve to its first occurrence. Connections naming a missing node are
/// left out of the index; the integrity validator reports them.
pub struct FlowGraph<'a> {
    flow: &'a FlowSnapshot,
    index: AHashMap<&'a str, usize>,
    children: Vec<Vec<usize>>,
    parents: Vec<Vec<usize>>,
}

impl<'a> FlowGraph<'a> {
    pub fn new(flow: &'a FlowSnapshot) -> Self {
        let mut index = AHashMap::with_capacity(flow.nodes.len());
        for (idx, node) in flow.nodes.iter().enumerate() {
            index.entry(node.id.as_str()).or_insert(idx);
        }

        let mut children = vec![Vec::new(); flow.nodes.len()];
        let mut parents = vec![Vec::new(); flow.nodes.len()];
        for connection in &flow.connections {
            let source = index.get(connection.source_node_id.as_str());
            let target = index.get(connection.target_node_id.as_str());
            if let (Some(&source), Some(&target)) = (source, target) {
                children[source].push(target);
                parents[target].push(source);
            }
        }

        Self {
            flow,
            index,
            children,
            parents,
        }
    }

    pub fn len(&self) -> usize {
        self.flow.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flow.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &'a FlowNode {
        &self.flow.nodes[idx]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn children(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    pub fn parents(&self, idx: usize) -> &[usize] {
        &self.parents[idx]
    }

    /// Nodes without an incoming connection.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.parents[i].is_empty()).collect()
    }

    /// Nodes without an outgoing connection: the places new work can be appended.
    pub fn tail_nodes(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.children[i].is_empty())
            .collect()
    }

    /// Every node reachable by following connections backward, excluding `idx` itself
    /// unless it sits on a cycle.
    pub fn ancestors(&self, idx: usize) -> Vec<usize> {
        Self::reach(idx, &self.parents)
    }

    /// Every node reachable by following connections forward.
    pub fn descendants(&self, idx: usize) -> Vec<usize> {
        Self::reach(idx, &self.children)
    }

    fn reach(start: usize, edges: &[Vec<usize>]) -> Vec<usize> {
        let mut seen = vec![false; edges.len()];
        let mut order = Vec::new();
        let mut queue: VecDeque<usize> = edges[start].iter().copied().collect();
        while let Some(next) = queue.pop_front() {
            if seen[next] {
                continue;
            }
            seen[next] = true;
            order.push(next);
            queue.extend(edges[next].iter().copied().filter(|&n| !seen[n]));
        }
        order
    }

    /// Kahn's algorithm. On a cycle, returns the nodes that never reached in-degree zero.
    pub fn topological_order(&self) -> Result<Vec<usize>, Vec<usize>> {
        let (order, unordered) = self.partial_order();
        if unordered.is_empty() {
            Ok(order)
        } else {
            Err(unordered)
        }
    }

    /// Kahn's algorithm run to exhaustion: the ordered prefix, then every node left with a
    /// non-zero in-degree (cycle members and whatever hangs below them).
    pub fn partial_order(&self) -> (Vec<usize>, Vec<usize>) {
        let mut in_degree: Vec<usize> = self.parents.iter().map(Vec::len).collect();
        let mut queue: VecDeque<usize> = (0..self.len()).filter(|&i| in_degree[i] == 0).collect();

        let mut order = Vec::with_capacity(self.len());
        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            for &child in &self.children[idx] {
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    queue.push_back(child);
                }
            }
        }

        let unordered = (0..self.len()).filter(|&i| in_degree[i] > 0).collect();
        (order, unordered)
    }

    /// Resources produced by `idx` and everything upstream of it.
    ///
    /// This is the path-sensitive availability set: branches that do not feed into
    /// `idx` contribute nothing.
    pub fn ancestor_resources(&self, rules: &RuleTable, idx: usize) -> ResourceSet {
        self.upstream_resources(rules, idx)
            .union(rules.produces(self.node(idx).operation))
    }

    /// Resources produced strictly upstream of `idx`, i.e. what the node itself can rely on.
    pub fn upstream_resources(&self, rules: &RuleTable, idx: usize) -> ResourceSet {
        self.ancestors(idx)
            .into_iter()
            .fold(ResourceSet::new(), |set, a| {
                set.union(rules.produces(self.node(a).operation))
            })
    }
}
