use crate::attachment::{ScoringConfig, find_best_attachment};
use crate::flow::{FlowConnection, FlowNode, FlowSnapshot};
use crate::rules::{OperationType, RuleTable};
use ahash::AHashSet;
use serde::Serialize;

/// A proposed chain of new blocks for the flow editor to add.
///
/// The planner never edits the canvas; the editor applies the plan through its own
/// `addNode` / `addConnection` operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertionPlan {
    pub target: OperationType,
    pub attach_to_node_id: Option<String>,
    /// Missing prerequisites in recipe order, followed by the target itself.
    pub nodes: Vec<FlowNode>,
    pub connections: Vec<FlowConnection>,
}

/// Hands out ids that do not collide with anything already in the snapshot.
struct IdAllocator {
    taken: AHashSet<String>,
    next_connection: usize,
}

impl IdAllocator {
    fn new(flow: &FlowSnapshot) -> Self {
        let taken = flow
            .nodes
            .iter()
            .map(|n| n.id.clone())
            .chain(flow.connections.iter().map(|c| c.id.clone()))
            .collect();
        Self {
            taken,
            next_connection: 1,
        }
    }

    fn node_id(&mut self, operation: OperationType) -> String {
        let id = (1..)
            .map(|n| format!("{}-{}", operation.as_str(), n))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or_default();
        self.taken.insert(id.clone());
        id
    }

    fn connection_id(&mut self) -> String {
        loop {
            let candidate = format!("connection-{}", self.next_connection);
            self.next_connection += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Plans the blocks needed to add `target` at its best attachment point.
pub fn plan_insertion(
    rules: &RuleTable,
    target: OperationType,
    flow: &FlowSnapshot,
    config: &ScoringConfig,
) -> InsertionPlan {
    let attachment = find_best_attachment(rules, target, flow, config);
    let mut ids = IdAllocator::new(flow);

    let mut nodes = Vec::with_capacity(attachment.remaining_recipe.len() + 1);
    let mut connections = Vec::with_capacity(attachment.remaining_recipe.len() + 1);
    let mut previous = attachment.attach_to_node_id.clone();

    for operation in attachment.remaining_recipe.iter().copied().chain([target]) {
        let id = ids.node_id(operation);
        if let Some(source) = previous {
            connections.push(FlowConnection::new(ids.connection_id(), source, id.clone()));
        }
        nodes.push(FlowNode::new(id.clone(), operation));
        previous = Some(id);
    }

    tracing::debug!(
        %target,
        attach_to = ?attachment.attach_to_node_id,
        new_nodes = nodes.len(),
        "planned insertion"
    );
    InsertionPlan {
        target,
        attach_to_node_id: attachment.attach_to_node_id,
        nodes,
        connections,
    }
}

impl FlowSnapshot {
    /// A copy of this snapshot with the plan's nodes and connections appended.
    pub fn with_insertion(&self, plan: &InsertionPlan) -> FlowSnapshot {
        let mut next = self.clone();
        next.nodes.extend(plan.nodes.iter().cloned());
        next.connections.extend(plan.connections.iter().cloned());
        next
    }
}
