use super::{OperationType, ResourceKind, ResourceSet};
use serde::{Deserialize, Serialize};

/// How strongly a missing requirement affects a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementSeverity {
    /// Gates correctness: the operation will fail without it.
    Error,
    /// Advisory only.
    Warning,
}

/// A single resource an operation depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirement {
    pub resource: ResourceKind,
    pub severity: RequirementSeverity,
    pub label: String,
    /// Operation types that can supply the resource.
    pub satisfied_by: Vec<OperationType>,
}

impl ResourceRequirement {
    pub fn error(resource: ResourceKind, label: &str, satisfied_by: &[OperationType]) -> Self {
        Self {
            resource,
            severity: RequirementSeverity::Error,
            label: label.to_string(),
            satisfied_by: satisfied_by.to_vec(),
        }
    }

    pub fn warning(resource: ResourceKind, label: &str, satisfied_by: &[OperationType]) -> Self {
        Self {
            resource,
            severity: RequirementSeverity::Warning,
            label: label.to_string(),
            satisfied_by: satisfied_by.to_vec(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == RequirementSeverity::Error
    }
}

/// The dependency rule for one operation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteRule {
    pub operation: OperationType,
    pub requires: Vec<ResourceRequirement>,
    pub produces: Vec<ResourceKind>,
    pub credit_cost: u32,
    pub explanation: String,
    /// The canonical chain that makes this operation valid on an empty canvas.
    pub default_recipe: Vec<OperationType>,
}

impl PrerequisiteRule {
    /// Starts an empty rule for `operation`: no requirements, produces nothing, free.
    pub fn new(operation: OperationType) -> Self {
        Self {
            operation,
            requires: Vec::new(),
            produces: Vec::new(),
            credit_cost: 0,
            explanation: String::new(),
            default_recipe: Vec::new(),
        }
    }

    pub fn requires(mut self, requirement: ResourceRequirement) -> Self {
        self.requires.push(requirement);
        self
    }

    pub fn produces(mut self, resources: &[ResourceKind]) -> Self {
        self.produces.extend_from_slice(resources);
        self
    }

    pub fn credit_cost(mut self, credits: u32) -> Self {
        self.credit_cost = credits;
        self
    }

    pub fn explanation(mut self, text: &str) -> Self {
        self.explanation = text.to_string();
        self
    }

    pub fn recipe(mut self, steps: &[OperationType]) -> Self {
        self.default_recipe = steps.to_vec();
        self
    }

    pub fn produced(&self) -> ResourceSet {
        self.produces.iter().copied().collect()
    }

    pub fn error_requirements(&self) -> impl Iterator<Item = &ResourceRequirement> {
        self.requires.iter().filter(|r| r.is_error())
    }

    pub fn warning_requirements(&self) -> impl Iterator<Item = &ResourceRequirement> {
        self.requires.iter().filter(|r| !r.is_error())
    }

    /// The set of resources whose absence is an error for this operation.
    pub fn required_set(&self) -> ResourceSet {
        self.error_requirements().map(|r| r.resource).collect()
    }

    /// Requirements of either severity not covered by `available`.
    pub fn unmet(&self, available: ResourceSet) -> impl Iterator<Item = &ResourceRequirement> {
        self.requires
            .iter()
            .filter(move |r| !available.contains(r.resource))
    }
}
