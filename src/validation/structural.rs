use crate::flow::{FlowGraph, FlowSnapshot, INPUT_PORT, OUTPUT_PORT};
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

/// A defect in the shape of the flow itself. Editing may continue, execution may not.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StructuralError {
    #[error("Duplicate node id '{id}'")]
    DuplicateNodeId { id: String },

    #[error("Duplicate connection id '{id}'")]
    DuplicateConnectionId { id: String },

    #[error("Connection '{connection_id}' references missing node '{node_id}'")]
    MissingNode {
        connection_id: String,
        node_id: String,
    },

    #[error("Connection '{connection_id}' uses unknown port '{port_id}' on node '{node_id}'")]
    UnknownPort {
        connection_id: String,
        node_id: String,
        port_id: String,
    },

    #[error("Flow contains a cycle; nodes that cannot be ordered: {}", .node_ids.join(", "))]
    Cycle { node_ids: Vec<String> },
}

/// The result of a whole-flow integrity check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowValidation {
    pub valid: bool,
    /// Rendered messages, one per issue.
    pub errors: Vec<String>,
    pub issues: Vec<StructuralError>,
}

impl FlowValidation {
    fn from_issues(issues: Vec<StructuralError>) -> Self {
        Self {
            valid: issues.is_empty(),
            errors: issues.iter().map(ToString::to_string).collect(),
            issues,
        }
    }

    pub fn has_cycle(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i, StructuralError::Cycle { .. }))
    }
}

/// Checks id uniqueness, referential integrity of every connection, and acyclicity.
pub fn validate_flow(flow: &FlowSnapshot) -> FlowValidation {
    let mut issues = Vec::new();

    issues.extend(
        flow.nodes
            .iter()
            .map(|n| n.id.as_str())
            .duplicates()
            .map(|id| StructuralError::DuplicateNodeId { id: id.to_string() }),
    );
    issues.extend(
        flow.connections
            .iter()
            .map(|c| c.id.as_str())
            .duplicates()
            .map(|id| StructuralError::DuplicateConnectionId { id: id.to_string() }),
    );

    for connection in &flow.connections {
        let endpoints = [
            (&connection.source_node_id, &connection.source_port_id, OUTPUT_PORT),
            (&connection.target_node_id, &connection.target_port_id, INPUT_PORT),
        ];
        for (node_id, port_id, expected_port) in endpoints {
            if !flow.contains_node(node_id) {
                issues.push(StructuralError::MissingNode {
                    connection_id: connection.id.clone(),
                    node_id: node_id.clone(),
                });
            } else if port_id != expected_port {
                issues.push(StructuralError::UnknownPort {
                    connection_id: connection.id.clone(),
                    node_id: node_id.clone(),
                    port_id: port_id.clone(),
                });
            }
        }
    }

    let graph = FlowGraph::new(flow);
    if let Err(stuck) = graph.topological_order() {
        let node_ids = stuck
            .into_iter()
            .map(|idx| graph.node(idx).id.clone())
            .collect();
        issues.push(StructuralError::Cycle { node_ids });
    }

    for issue in &issues {
        tracing::warn!(%issue, "structural flow error");
    }
    FlowValidation::from_issues(issues)
}
