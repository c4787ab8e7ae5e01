use crate::attachment::Attachment;
use crate::rules::{OperationType, RequirementSeverity, RuleTable};
use crate::validation::{FlowValidation, NodeSeverity, NodeValidation};
use itertools::Itertools;

/// Formats planner results into human-readable text.
pub struct RecipeFormatter;

impl RecipeFormatter {
    /// Renders a recipe as a chain of block titles, e.g. `Faucet -> Wait for Balance`.
    pub fn format_recipe(recipe: &[OperationType]) -> String {
        if recipe.is_empty() {
            return "nothing missing".to_string();
        }
        recipe.iter().map(|op| op.label()).join(" -> ")
    }

    /// Total credits spent by the steps of `recipe`.
    pub fn credit_cost(rules: &RuleTable, recipe: &[OperationType]) -> u32 {
        recipe.iter().map(|op| rules.rule_for(*op).credit_cost).sum()
    }

    /// One-line summary of a recipe with its cost.
    pub fn summarize_recipe(
        rules: &RuleTable,
        target: OperationType,
        recipe: &[OperationType],
    ) -> String {
        if recipe.is_empty() {
            return format!("{} can be added directly", target.label());
        }
        let total = Self::credit_cost(rules, recipe) + rules.rule_for(target).credit_cost;
        format!(
            "{} needs {} step(s) first: {} ({} credits including the block itself)",
            target.label(),
            recipe.len(),
            Self::format_recipe(recipe),
            total
        )
    }

    pub fn format_attachment(attachment: &Attachment) -> String {
        let point = match &attachment.attach_to_node_id {
            Some(id) => format!("attach below '{}'", id),
            None => "start a new chain".to_string(),
        };
        format!(
            "{} (score {:.2}); still missing: {}",
            point,
            attachment.score,
            Self::format_recipe(&attachment.remaining_recipe)
        )
    }

    /// A block's badge followed by one line per unmet requirement.
    pub fn format_node(validation: &NodeValidation) -> String {
        let badge = match validation.severity {
            NodeSeverity::Valid => "ok",
            NodeSeverity::Warning => "warning",
            NodeSeverity::Error => "error",
        };
        let mut out = format!(
            "[{}] {} ({}, {} credits)",
            badge,
            validation.node_id,
            validation.operation.label(),
            validation.credit_cost
        );
        for issue in &validation.issues {
            let marker = match issue.severity {
                RequirementSeverity::Error => "!",
                RequirementSeverity::Warning => "?",
            };
            out.push_str(&format!(
                "\n  {} {} (add {})",
                marker,
                issue.label,
                issue.satisfied_by.iter().map(|op| op.label()).join(" or ")
            ));
        }
        if !validation.auto_fix_recipe.is_empty() {
            out.push_str(&format!(
                "\n  fix: {}",
                Self::format_recipe(&validation.auto_fix_recipe)
            ));
        }
        out
    }

    pub fn format_flow(validation: &FlowValidation) -> String {
        if validation.valid {
            return "flow is structurally valid".to_string();
        }
        let mut out = format!("flow is invalid ({} issue(s))", validation.errors.len());
        for error in &validation.errors {
            out.push_str(&format!("\n  - {}", error));
        }
        out
    }
}
