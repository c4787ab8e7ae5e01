//! Common test utilities for building flow snapshots.
use junbi::prelude::*;

/// Builds a snapshot from `(id, operation)` pairs and `(source, target)` edges.
///
/// Connection ids are derived from their endpoints: `c-{source}-{target}`.
#[allow(dead_code)]
pub fn flow_of(nodes: &[(&str, OperationType)], edges: &[(&str, &str)]) -> FlowSnapshot {
    FlowSnapshot::new(
        nodes
            .iter()
            .map(|(id, op)| FlowNode::new(*id, *op))
            .collect(),
        edges
            .iter()
            .map(|(from, to)| FlowConnection::new(format!("c-{}-{}", from, to), *from, *to))
            .collect(),
    )
}

/// A linear chain of operations with ids `{prefix}0`, `{prefix}1`, ...
#[allow(dead_code)]
pub fn chain(prefix: &str, ops: &[OperationType]) -> FlowSnapshot {
    let nodes: Vec<FlowNode> = ops
        .iter()
        .enumerate()
        .map(|(i, op)| FlowNode::new(format!("{}{}", prefix, i), *op))
        .collect();
    let connections = nodes
        .windows(2)
        .map(|pair| {
            FlowConnection::new(
                format!("c-{}-{}", pair[0].id, pair[1].id),
                pair[0].id.clone(),
                pair[1].id.clone(),
            )
        })
        .collect();
    FlowSnapshot::new(nodes, connections)
}

/// Concatenates two snapshots. Ids are expected to be disjoint.
#[allow(dead_code)]
pub fn merge(a: FlowSnapshot, b: FlowSnapshot) -> FlowSnapshot {
    let mut merged = a;
    merged.nodes.extend(b.nodes);
    merged.connections.extend(b.connections);
    merged
}

/// Removes the connection with the given id.
#[allow(dead_code)]
pub fn without_connection(flow: &FlowSnapshot, connection_id: &str) -> FlowSnapshot {
    let mut next = flow.clone();
    next.connections.retain(|c| c.id != connection_id);
    next
}

/// The full funding chain: keys, faucet, settled balance, credits bought and received.
#[allow(dead_code)]
pub const CREDITED: &[OperationType] = &[
    OperationType::GenerateKeys,
    OperationType::Faucet,
    OperationType::WaitForBalance,
    OperationType::AddCredits,
    OperationType::WaitForCredits,
];

/// Keys, faucet and a settled balance, but no credits yet.
#[allow(dead_code)]
pub const FUNDED: &[OperationType] = &[
    OperationType::GenerateKeys,
    OperationType::Faucet,
    OperationType::WaitForBalance,
];

/// A copy of the built-in rules, for tests that need to corrupt one.
#[allow(dead_code)]
pub fn standard_rules() -> Vec<PrerequisiteRule> {
    RuleTable::standard().iter().cloned().collect()
}

/// Applies `edit` to the rule for `operation` in a copy of the built-in rules.
#[allow(dead_code)]
pub fn rules_with(
    operation: OperationType,
    edit: impl FnOnce(&mut PrerequisiteRule),
) -> Vec<PrerequisiteRule> {
    let mut rules = standard_rules();
    if let Some(rule) = rules.iter_mut().find(|r| r.operation == operation) {
        edit(rule);
    }
    rules
}
