use crate::rules::OperationType;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The single input port every block exposes.
pub const INPUT_PORT: &str = "input";
/// The single output port every block exposes.
pub const OUTPUT_PORT: &str = "output";

/// A canvas position, top-left corner of the block.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One block on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub operation: OperationType,
    #[serde(default)]
    pub position: Position,
    /// Block-specific form values. Opaque to the planner.
    #[serde(default)]
    pub config: serde_json::Value,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, operation: OperationType) -> Self {
        Self {
            id: id.into(),
            operation,
            position: Position::default(),
            config: serde_json::Value::Null,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }
}

/// A directed connection from one block's output port to another block's input port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowConnection {
    pub id: String,
    pub source_node_id: String,
    pub source_port_id: String,
    pub target_node_id: String,
    pub target_port_id: String,
}

impl FlowConnection {
    /// Connects `source`'s output port to `target`'s input port.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_node_id: source.into(),
            source_port_id: OUTPUT_PORT.to_string(),
            target_node_id: target.into(),
            target_port_id: INPUT_PORT.to_string(),
        }
    }
}

/// An immutable snapshot of the flow editor's canvas.
///
/// The planner only ever reads a snapshot; every operation that "changes" the flow
/// returns a new one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub connections: Vec<FlowConnection>,
}

impl FlowSnapshot {
    pub fn new(nodes: Vec<FlowNode>, connections: Vec<FlowConnection>) -> Self {
        Self { nodes, connections }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// A copy with node positions replaced from `positions`. Unlisted nodes keep theirs.
    pub fn with_positions(&self, positions: &AHashMap<String, Position>) -> FlowSnapshot {
        let mut next = self.clone();
        for node in &mut next.nodes {
            if let Some(position) = positions.get(&node.id) {
                node.position = *position;
            }
        }
        next
    }
}
