//! Whole-graph recipe resolution.
//!
//! The resolver answers "what is still missing before `target` can be added?" treating
//! every resource produced anywhere on the canvas as available. It is
//! position-insensitive; the path-sensitive variant lives in [`crate::attachment`] and
//! [`crate::validation`].

use crate::flow::FlowSnapshot;
use crate::rules::{OperationType, ResourceSet, RuleTable};
use itertools::Itertools;

/// The union of everything produced by every node in `flow`.
pub fn available_resources(rules: &RuleTable, flow: &FlowSnapshot) -> ResourceSet {
    flow.nodes
        .iter()
        .fold(ResourceSet::new(), |set, node| {
            set.union(rules.produces(node.operation))
        })
}

/// The minimal ordered list of operations to add before `target`.
///
/// Returns an empty list exactly when every error-severity requirement of `target` is
/// already produced somewhere in `flow`.
pub fn resolve_recipe(
    rules: &RuleTable,
    target: OperationType,
    flow: &FlowSnapshot,
) -> Vec<OperationType> {
    resolve_with_available(rules, target, available_resources(rules, flow))
}

/// Resolves `target` against an explicit availability set.
///
/// A recipe step is kept only if it produces something still needed, either by the
/// target or by a later kept step. One backward pass over the default recipe decides
/// that; the kept steps are returned in recipe order.
pub(crate) fn resolve_with_available(
    rules: &RuleTable,
    target: OperationType,
    available: ResourceSet,
) -> Vec<OperationType> {
    let rule = rules.rule_for(target);
    let mut needed = rule.required_set().difference(available);
    if needed.is_empty() {
        tracing::trace!(%target, "all requirements already available");
        return Vec::new();
    }

    let mut steps = Vec::new();
    for &step in rule.default_recipe.iter().rev() {
        let step_rule = rules.rule_for(step);
        let produced = step_rule.produced();
        if !produced.intersects(needed) {
            continue;
        }
        needed = needed
            .difference(produced)
            .union(step_rule.required_set().difference(available));
        steps.push(step);
    }
    steps.reverse();

    if !needed.is_empty() {
        // A validated table cannot get here.
        tracing::error!(
            %target,
            missing = %needed.iter().join(", "),
            "default recipe does not cover all requirements"
        );
    }

    tracing::debug!(%target, recipe = %steps.iter().join(" -> "), "resolved recipe");
    steps
}
