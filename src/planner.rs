use crate::attachment::{self, Attachment, ScoringConfig};
use crate::config::PlannerConfig;
use crate::error::FlowError;
use crate::flow::{FlowSnapshot, Position};
use crate::insertion::{self, InsertionPlan};
use crate::layout::{self, LayoutConfig};
use crate::resolver;
use crate::rules::{OperationType, RuleTable};
use crate::validation::{self, FlowValidation, NodeValidation};
use ahash::AHashMap;

/// The planner's public surface: every operation takes a fresh snapshot and returns a
/// pure result. A `Planner` holds no flow state and can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'r> {
    rules: &'r RuleTable,
    config: PlannerConfig,
}

pub struct PlannerBuilder<'r> {
    rules: &'r RuleTable,
    config: PlannerConfig,
}

impl<'r> PlannerBuilder<'r> {
    pub fn new() -> Self {
        Self {
            rules: RuleTable::standard(),
            config: PlannerConfig::default(),
        }
    }

    /// Uses a custom, already validated rule table instead of the built-in one.
    pub fn with_rules(mut self, rules: &'r RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.config.scoring = scoring;
        self
    }

    pub fn build(self) -> Planner<'r> {
        Planner {
            rules: self.rules,
            config: self.config,
        }
    }
}

impl Default for PlannerBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner<'static> {
    /// A planner over the built-in rule table with default settings.
    pub fn new() -> Self {
        PlannerBuilder::new().build()
    }
}

impl Default for Planner<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Planner<'r> {
    pub fn builder() -> PlannerBuilder<'r> {
        PlannerBuilder::new()
    }

    pub fn rules(&self) -> &'r RuleTable {
        self.rules
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Missing steps before `target`, treating the whole canvas as available.
    pub fn resolve_recipe(&self, target: OperationType, flow: &FlowSnapshot) -> Vec<OperationType> {
        resolver::resolve_recipe(self.rules, target, flow)
    }

    pub fn find_best_attachment(&self, target: OperationType, flow: &FlowSnapshot) -> Attachment {
        attachment::find_best_attachment(self.rules, target, flow, &self.config.scoring)
    }

    pub fn score_node(
        &self,
        target: OperationType,
        flow: &FlowSnapshot,
        node_id: &str,
    ) -> Result<f64, FlowError> {
        attachment::score_node(self.rules, target, flow, node_id, &self.config.scoring)
    }

    pub fn plan_insertion(&self, target: OperationType, flow: &FlowSnapshot) -> InsertionPlan {
        insertion::plan_insertion(self.rules, target, flow, &self.config.scoring)
    }

    pub fn validate_node(
        &self,
        node_id: &str,
        flow: &FlowSnapshot,
    ) -> Result<NodeValidation, FlowError> {
        validation::validate_node(self.rules, node_id, flow)
    }

    pub fn validate_nodes(&self, flow: &FlowSnapshot) -> Vec<NodeValidation> {
        validation::validate_nodes(self.rules, flow)
    }

    pub fn validate_subtree(
        &self,
        node_id: &str,
        flow: &FlowSnapshot,
    ) -> Result<Vec<NodeValidation>, FlowError> {
        validation::validate_subtree(self.rules, node_id, flow)
    }

    pub fn validate_flow(&self, flow: &FlowSnapshot) -> FlowValidation {
        validation::validate_flow(flow)
    }

    pub fn layout(&self, flow: &FlowSnapshot) -> AHashMap<String, Position> {
        layout::layout(flow, &self.config.layout)
    }
}
