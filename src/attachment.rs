//! Choosing where a newly requested operation should join an existing flow.

use crate::error::FlowError;
use crate::flow::{FlowGraph, FlowSnapshot};
use crate::resolver::resolve_with_available;
use crate::rules::{OperationType, ResourceSet, RuleTable};
use serde::{Deserialize, Serialize};

/// Weights for attachment scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Subtracted from a tail's score for each error requirement its ancestors miss.
    pub unmet_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { unmet_penalty: 0.1 }
    }
}

/// The best insertion point for a new operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// The tail node to chain onto, or `None` to start a fresh chain.
    pub attach_to_node_id: Option<String>,
    pub score: f64,
    /// What is still missing along the chosen node's ancestor path.
    pub remaining_recipe: Vec<OperationType>,
}

struct Candidate {
    idx: usize,
    score: f64,
    remaining: Vec<OperationType>,
}

/// Scores a tail whose ancestor path provides `available` for a target requiring `required`.
pub fn score_tail(required: ResourceSet, available: ResourceSet, config: &ScoringConfig) -> f64 {
    let satisfied = required.intersection(available).len();
    let unmet = required.len() - satisfied;
    satisfied as f64 - config.unmet_penalty * unmet as f64
}

/// Finds the tail node whose ancestor path best prepares `target`.
///
/// Ties go to the candidate needing the fewest extra steps, then to the node that appears
/// latest in the snapshot, i.e. the most recently created one.
pub fn find_best_attachment(
    rules: &RuleTable,
    target: OperationType,
    flow: &FlowSnapshot,
    config: &ScoringConfig,
) -> Attachment {
    let graph = FlowGraph::new(flow);
    let required = rules.rule_for(target).required_set();

    let best = graph
        .tail_nodes()
        .into_iter()
        .map(|idx| {
            let available = graph.ancestor_resources(rules, idx);
            let candidate = Candidate {
                idx,
                score: score_tail(required, available, config),
                remaining: resolve_with_available(rules, target, available),
            };
            tracing::trace!(
                %target,
                node = %graph.node(idx).id,
                score = candidate.score,
                remaining = candidate.remaining.len(),
                "scored tail node"
            );
            candidate
        })
        .max_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| b.remaining.len().cmp(&a.remaining.len()))
                .then_with(|| a.idx.cmp(&b.idx))
        });

    match best {
        Some(candidate) => {
            let node_id = graph.node(candidate.idx).id.clone();
            tracing::debug!(
                %target,
                node = %node_id,
                score = candidate.score,
                "selected attachment point"
            );
            Attachment {
                attach_to_node_id: Some(node_id),
                score: candidate.score,
                remaining_recipe: candidate.remaining,
            }
        }
        None => Attachment {
            attach_to_node_id: None,
            score: 0.0,
            remaining_recipe: resolve_with_available(rules, target, ResourceSet::EMPTY),
        },
    }
}

/// The score `target` would get if attached below `node_id`, whether or not it is a tail.
pub fn score_node(
    rules: &RuleTable,
    target: OperationType,
    flow: &FlowSnapshot,
    node_id: &str,
    config: &ScoringConfig,
) -> Result<f64, FlowError> {
    let graph = FlowGraph::new(flow);
    let idx = graph
        .index_of(node_id)
        .ok_or_else(|| FlowError::NodeNotFound(node_id.to_string()))?;
    let required = rules.rule_for(target).required_set();
    Ok(score_tail(
        required,
        graph.ancestor_resources(rules, idx),
        config,
    ))
}
