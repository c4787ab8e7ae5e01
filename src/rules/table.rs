use super::catalog;
use super::{OperationType, PrerequisiteRule, ResourceSet};
use crate::error::RuleTableError;
use itertools::Itertools;
use std::sync::LazyLock;

static STANDARD: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(catalog::standard_rules())
        .unwrap_or_else(|e| panic!("built-in prerequisite rule table is inconsistent: {}", e))
});

/// A closed, self-consistent map from operation type to its prerequisite rule.
///
/// A `RuleTable` can only be obtained through [`RuleTable::new`], which rejects dangling
/// references and incomplete recipes, so [`RuleTable::rule_for`] is total.
#[derive(Debug, Clone)]
pub struct RuleTable {
    // Indexed by `OperationType::index()`.
    rules: Vec<PrerequisiteRule>,
}

impl RuleTable {
    /// Builds and validates a table from one rule per operation type.
    pub fn new(rules: Vec<PrerequisiteRule>) -> Result<Self, RuleTableError> {
        let mut slots: Vec<Option<PrerequisiteRule>> = vec![None; OperationType::ALL.len()];
        for rule in rules {
            let slot = &mut slots[rule.operation.index()];
            if slot.is_some() {
                return Err(RuleTableError::DuplicateRule(rule.operation));
            }
            *slot = Some(rule);
        }

        let rules = slots
            .into_iter()
            .zip(OperationType::ALL)
            .map(|(slot, op)| slot.ok_or(RuleTableError::MissingRule(*op)))
            .collect::<Result<Vec<_>, _>>()?;

        let table = Self { rules };
        table.check_references()?;
        table.check_recipes()?;
        tracing::debug!(rules = table.rules.len(), "prerequisite rule table loaded");
        Ok(table)
    }

    /// The built-in ledger rule table, loaded and validated once per process.
    ///
    /// # Panics
    ///
    /// Panics on first use if the built-in catalog is inconsistent.
    pub fn standard() -> &'static RuleTable {
        &STANDARD
    }

    pub fn rule_for(&self, operation: OperationType) -> &PrerequisiteRule {
        &self.rules[operation.index()]
    }

    pub fn produces(&self, operation: OperationType) -> ResourceSet {
        self.rule_for(operation).produced()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrerequisiteRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every requirement must name at least one operation that actually produces it.
    fn check_references(&self) -> Result<(), RuleTableError> {
        for rule in &self.rules {
            for requirement in &rule.requires {
                if requirement.satisfied_by.is_empty() {
                    return Err(RuleTableError::EmptySatisfiedBy {
                        operation: rule.operation,
                        resource: requirement.resource,
                    });
                }
                let producible = requirement
                    .satisfied_by
                    .iter()
                    .any(|op| self.produces(*op).contains(requirement.resource));
                if !producible {
                    return Err(RuleTableError::UnproducibleResource {
                        operation: rule.operation,
                        resource: requirement.resource,
                    });
                }
            }
        }
        Ok(())
    }

    /// Replays every default recipe on an empty canvas.
    fn check_recipes(&self) -> Result<(), RuleTableError> {
        for rule in &self.rules {
            if rule.default_recipe.contains(&rule.operation) {
                return Err(RuleTableError::SelfReferentialRecipe(rule.operation));
            }
            if let Some(step) = rule.default_recipe.iter().duplicates().next() {
                return Err(RuleTableError::RepeatedRecipeStep {
                    operation: rule.operation,
                    step: *step,
                });
            }

            let mut available = ResourceSet::new();
            for step in &rule.default_recipe {
                let step_rule = self.rule_for(*step);
                if let Some(missing) = step_rule
                    .error_requirements()
                    .find(|r| !available.contains(r.resource))
                {
                    return Err(RuleTableError::UnresolvableStep {
                        operation: rule.operation,
                        step: *step,
                        resource: missing.resource,
                    });
                }
                available = available.union(step_rule.produced());
            }

            if let Some(missing) = rule
                .error_requirements()
                .find(|r| !available.contains(r.resource))
            {
                return Err(RuleTableError::IncompleteRecipe {
                    operation: rule.operation,
                    resource: missing.resource,
                });
            }
        }
        Ok(())
    }
}
