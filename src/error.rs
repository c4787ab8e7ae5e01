use crate::rules::{OperationType, ResourceKind};
use thiserror::Error;

/// Errors caused by malformed caller input to a planning operation.
///
/// Missing prerequisites are never reported through this type; they are returned as
/// structured validation data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Node '{0}' not found in the provided flow snapshot")]
    NodeNotFound(String),
}

/// Authoring defects in a rule table, detected once when the table is loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleTableError {
    #[error("Operation type '{0}' has no prerequisite rule")]
    MissingRule(OperationType),

    #[error("Operation type '{0}' has more than one prerequisite rule")]
    DuplicateRule(OperationType),

    #[error("Requirement '{resource}' of '{operation}' lists no operation that satisfies it")]
    EmptySatisfiedBy {
        operation: OperationType,
        resource: ResourceKind,
    },

    #[error(
        "Requirement '{resource}' of '{operation}' cannot be produced by any of its satisfying operations"
    )]
    UnproducibleResource {
        operation: OperationType,
        resource: ResourceKind,
    },

    #[error("The default recipe of '{0}' contains the operation itself")]
    SelfReferentialRecipe(OperationType),

    #[error("The default recipe of '{operation}' repeats step '{step}'")]
    RepeatedRecipeStep {
        operation: OperationType,
        step: OperationType,
    },

    #[error(
        "Step '{step}' in the default recipe of '{operation}' needs '{resource}', which no earlier step produces"
    )]
    UnresolvableStep {
        operation: OperationType,
        step: OperationType,
        resource: ResourceKind,
    },

    #[error("The default recipe of '{operation}' never produces required resource '{resource}'")]
    IncompleteRecipe {
        operation: OperationType,
        resource: ResourceKind,
    },
}

/// Errors that can occur when converting a collaborator's format into a `FlowSnapshot`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowConversionError {
    #[error("Unknown operation type: '{0}'")]
    UnknownOperationType(String),

    #[error("Invalid flow data: {0}")]
    ValidationError(String),
}

/// Errors raised while loading planner configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse planner configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid planner configuration: {0}")]
    Invalid(String),
}
