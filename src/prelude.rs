//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the junbi crate.
//!
//! # Example
//!
//! ```rust
//! use junbi::prelude::*;
//!
//! let planner = Planner::new();
//! let recipe = planner.resolve_recipe(OperationType::CreateIdentity, &FlowSnapshot::empty());
//! assert_eq!(recipe.first(), Some(&OperationType::GenerateKeys));
//! ```

// Planning entry points
pub use crate::config::PlannerConfig;
pub use crate::planner::{Planner, PlannerBuilder};

// Results
pub use crate::attachment::{Attachment, ScoringConfig};
pub use crate::insertion::InsertionPlan;
pub use crate::layout::LayoutConfig;
pub use crate::validation::{
    FlowValidation, NodeIssue, NodeSeverity, NodeValidation, StructuralError,
};

// Flow model
pub use crate::flow::{FlowConnection, FlowNode, FlowSnapshot, IntoFlow, Position};

// Rules
pub use crate::rules::{
    OperationType, PrerequisiteRule, RequirementSeverity, ResourceKind, ResourceRequirement,
    ResourceSet, RuleTable,
};

// Error types
pub use crate::error::{ConfigError, FlowConversionError, FlowError, RuleTableError};

// Reporting
pub use crate::report::RecipeFormatter;
