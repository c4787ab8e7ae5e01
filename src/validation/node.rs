use crate::error::FlowError;
use crate::flow::{FlowGraph, FlowSnapshot};
use crate::resolver::resolve_with_available;
use crate::rules::{
    OperationType, RequirementSeverity, ResourceKind, ResourceRequirement, ResourceSet, RuleTable,
};
use serde::Serialize;

/// The badge a block gets on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeSeverity {
    Valid,
    Warning,
    Error,
}

/// A requirement not met along a node's ancestor path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeIssue {
    pub resource: ResourceKind,
    pub severity: RequirementSeverity,
    pub label: String,
    pub satisfied_by: Vec<OperationType>,
}

impl From<&ResourceRequirement> for NodeIssue {
    fn from(requirement: &ResourceRequirement) -> Self {
        Self {
            resource: requirement.resource,
            severity: requirement.severity,
            label: requirement.label.clone(),
            satisfied_by: requirement.satisfied_by.clone(),
        }
    }
}

/// Per-node prerequisite status for UI annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeValidation {
    pub node_id: String,
    pub operation: OperationType,
    pub severity: NodeSeverity,
    pub issues: Vec<NodeIssue>,
    pub credit_cost: u32,
    /// Steps that would clear every error along this node's ancestor path.
    pub auto_fix_recipe: Vec<OperationType>,
}

impl NodeValidation {
    pub fn is_valid(&self) -> bool {
        self.severity == NodeSeverity::Valid
    }
}

fn evaluate(
    rules: &RuleTable,
    graph: &FlowGraph<'_>,
    idx: usize,
    upstream: ResourceSet,
) -> NodeValidation {
    let node = graph.node(idx);
    let rule = rules.rule_for(node.operation);
    let issues: Vec<NodeIssue> = rule.unmet(upstream).map(NodeIssue::from).collect();

    let severity = if issues
        .iter()
        .any(|i| i.severity == RequirementSeverity::Error)
    {
        NodeSeverity::Error
    } else if !issues.is_empty() {
        NodeSeverity::Warning
    } else {
        NodeSeverity::Valid
    };

    NodeValidation {
        node_id: node.id.clone(),
        operation: node.operation,
        severity,
        issues,
        credit_cost: rule.credit_cost,
        auto_fix_recipe: resolve_with_available(rules, node.operation, upstream),
    }
}

/// Validates a single node against what its ancestors provide.
pub fn validate_node(
    rules: &RuleTable,
    node_id: &str,
    flow: &FlowSnapshot,
) -> Result<NodeValidation, FlowError> {
    let graph = FlowGraph::new(flow);
    let idx = graph
        .index_of(node_id)
        .ok_or_else(|| FlowError::NodeNotFound(node_id.to_string()))?;
    Ok(evaluate(rules, &graph, idx, graph.upstream_resources(rules, idx)))
}

/// Validates every node in one pass, in snapshot order.
///
/// Upstream resource sets are propagated along the topological order, so an acyclic
/// flow costs O(V+E). Nodes that cannot be ordered (on or behind a cycle) fall back to
/// a bounded backward search each.
pub fn validate_nodes(rules: &RuleTable, flow: &FlowSnapshot) -> Vec<NodeValidation> {
    let graph = FlowGraph::new(flow);
    let mut upstream: Vec<Option<ResourceSet>> = vec![None; graph.len()];

    let (order, _) = graph.partial_order();
    for idx in order {
        // Parents of an ordered node are always ordered before it.
        let set = graph.parents(idx).iter().fold(ResourceSet::new(), |set, &p| {
            set.union(upstream[p].unwrap_or_default())
                .union(rules.produces(graph.node(p).operation))
        });
        upstream[idx] = Some(set);
    }

    (0..graph.len())
        .map(|idx| {
            let set = upstream[idx].unwrap_or_else(|| graph.upstream_resources(rules, idx));
            evaluate(rules, &graph, idx, set)
        })
        .collect()
}

/// Revalidates a node and everything downstream of it after a localized edit.
pub fn validate_subtree(
    rules: &RuleTable,
    node_id: &str,
    flow: &FlowSnapshot,
) -> Result<Vec<NodeValidation>, FlowError> {
    let graph = FlowGraph::new(flow);
    let idx = graph
        .index_of(node_id)
        .ok_or_else(|| FlowError::NodeNotFound(node_id.to_string()))?;

    let mut affected = vec![idx];
    affected.extend(graph.descendants(idx).into_iter().filter(|&d| d != idx));
    Ok(affected
        .into_iter()
        .map(|i| evaluate(rules, &graph, i, graph.upstream_resources(rules, i)))
        .collect())
}
