use super::definition::FlowSnapshot;
use crate::error::FlowConversionError;

/// A trait for the flow editor's own data model to be converted into a `FlowSnapshot`.
///
/// This is the seam between the planner and whatever owns the canvas. The editor keeps
/// its store; it hands the planner a fresh snapshot per call by implementing this trait
/// on its own node and edge types.
///
/// # Example
///
/// ```rust
/// use junbi::error::FlowConversionError;
/// use junbi::flow::{FlowConnection, FlowNode, FlowSnapshot, IntoFlow};
///
/// struct EditorBlock { id: String, kind: String }
/// struct EditorCanvas { blocks: Vec<EditorBlock>, links: Vec<(String, String)> }
///
/// impl IntoFlow for EditorCanvas {
///     fn into_flow(self) -> Result<FlowSnapshot, FlowConversionError> {
///         let nodes = self
///             .blocks
///             .into_iter()
///             .map(|b| Ok(FlowNode::new(b.id, b.kind.parse()?)))
///             .collect::<Result<Vec<_>, FlowConversionError>>()?;
///         let connections = self
///             .links
///             .into_iter()
///             .enumerate()
///             .map(|(i, (from, to))| FlowConnection::new(format!("e{}", i), from, to))
///             .collect();
///         Ok(FlowSnapshot::new(nodes, connections))
///     }
/// }
///
/// let canvas = EditorCanvas {
///     blocks: vec![EditorBlock { id: "k".into(), kind: "GenerateKeys".into() }],
///     links: vec![],
/// };
/// assert_eq!(canvas.into_flow().unwrap().nodes.len(), 1);
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a planner snapshot.
    fn into_flow(self) -> Result<FlowSnapshot, FlowConversionError>;
}

impl IntoFlow for FlowSnapshot {
    fn into_flow(self) -> Result<FlowSnapshot, FlowConversionError> {
        Ok(self)
    }
}
