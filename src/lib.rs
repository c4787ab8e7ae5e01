//! # Junbi - Prerequisite Resolution for Ledger Operation Flows
//!
//! **Junbi** works out what has to happen before a ledger operation can run. Users
//! assemble a directed graph of operation blocks (generate keys, add credits, create an
//! identity, send tokens, ...). Most of these operations depend on each other through the
//! ledger protocol: an identity needs credits, credits need a funded balance, a funded
//! balance needs a key. Junbi declares those relationships once and answers questions
//! about any flow snapshot the editor hands it.
//!
//! ## Core Workflow
//!
//! 1.  **Snapshot the canvas**: Convert your editor's nodes and edges into a
//!     `FlowSnapshot`, either directly or by implementing the `IntoFlow` trait.
//! 2.  **Build a planner**: `Planner::new()` uses the built-in rule table; use
//!     `Planner::builder()` to supply your own table or tune layout and scoring.
//! 3.  **Ask**: resolve the missing recipe for a new block, find where it should attach,
//!     validate the flow and each node, or compute a clean layout.
//!
//! Every call is a pure function of the snapshot it receives. Nothing is cached between
//! calls and the snapshot is never modified.
//!
//! ## Quick Start
//!
//! ```rust
//! use junbi::prelude::*;
//!
//! // A canvas holding a single "Generate Keys" block.
//! let flow = FlowSnapshot::new(vec![FlowNode::new("keys", OperationType::GenerateKeys)], vec![]);
//!
//! let planner = Planner::new();
//!
//! // What is missing before credits can be added?
//! let recipe = planner.resolve_recipe(OperationType::AddCredits, &flow);
//! assert_eq!(recipe, vec![OperationType::Faucet, OperationType::WaitForBalance]);
//! println!("{}", RecipeFormatter::format_recipe(&recipe));
//!
//! // Where should an identity go, and what would still be missing there?
//! let attachment = planner.find_best_attachment(OperationType::CreateIdentity, &flow);
//! assert_eq!(attachment.attach_to_node_id.as_deref(), Some("keys"));
//!
//! // Structural checks and per-node badges.
//! assert!(planner.validate_flow(&flow).valid);
//! let node = planner.validate_node("keys", &flow).unwrap();
//! assert_eq!(node.severity, NodeSeverity::Valid);
//!
//! // Fresh positions for every block.
//! let positions = planner.layout(&flow);
//! assert!(positions.contains_key("keys"));
//! ```

pub mod attachment;
pub mod config;
pub mod error;
pub mod flow;
pub mod insertion;
pub mod layout;
pub mod planner;
pub mod prelude;
pub mod report;
pub mod resolver;
pub mod rules;
pub mod validation;
