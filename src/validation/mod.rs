//! Structural integrity and per-node prerequisite checks.

pub mod node;
pub mod structural;

pub use node::*;
pub use structural::*;
