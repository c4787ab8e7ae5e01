//! Integration tests for Junbi
//!
//! End-to-end tests that drive the planner the way a flow editor would.
//!
mod common;
use common::*;
use junbi::prelude::*;
use junbi::rules::OperationType::*;

const EDITOR_FLOW_JSON: &str = r#"{
    "nodes": [
        { "id": "keys", "type": "GenerateKeys", "position": { "x": 10, "y": 20 } },
        { "id": "faucet", "type": "Faucet", "config": { "amount": 10 } },
        { "id": "wait", "type": "WaitForBalance" }
    ],
    "connections": [
        { "id": "e1", "sourceNodeId": "keys", "sourcePortId": "output", "targetNodeId": "faucet", "targetPortId": "input" },
        { "id": "e2", "sourceNodeId": "faucet", "sourcePortId": "output", "targetNodeId": "wait", "targetPortId": "input" }
    ]
}"#;

#[cfg(test)]
mod planner_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshot_deserializes_from_editor_json() {
        let flow: FlowSnapshot = serde_json::from_str(EDITOR_FLOW_JSON).unwrap();
        assert_eq!(flow.nodes.len(), 3);
        assert_eq!(flow.nodes[0].position, Position::new(10.0, 20.0));
        assert_eq!(flow.nodes[1].config["amount"], 10);
        assert_eq!(flow.nodes[2].position, Position::default());
        assert_eq!(flow.connections[1].target_node_id, "wait");

        let flow = flow.into_flow().unwrap();
        assert!(Planner::new().validate_flow(&flow).valid);
    }

    #[test]
    fn test_unknown_operation_type_fails_to_deserialize() {
        let json = r#"{ "nodes": [{ "id": "x", "type": "MintNft" }] }"#;
        assert!(serde_json::from_str::<FlowSnapshot>(json).is_err());
    }

    #[test]
    fn test_editor_session_builds_an_identity() {
        let planner = Planner::new();
        let flow: FlowSnapshot = serde_json::from_str(EDITOR_FLOW_JSON).unwrap();

        // The user drops a "Create Identity" block on the canvas.
        assert_eq!(
            planner.resolve_recipe(CreateIdentity, &flow),
            vec![AddCredits, WaitForCredits]
        );
        let plan = planner.plan_insertion(CreateIdentity, &flow);
        assert_eq!(plan.attach_to_node_id.as_deref(), Some("wait"));

        let flow = flow.with_insertion(&plan);
        let flow = flow.with_positions(&planner.layout(&flow));
        assert!(planner.validate_flow(&flow).valid);
        assert!(planner.validate_nodes(&flow).iter().all(NodeValidation::is_valid));

        // Every block is on its own row, top to bottom.
        let ys: Vec<f64> = flow.nodes.iter().map(|n| n.position.y).collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]));

        // Follow up with a token account under the new identity.
        let plan = planner.plan_insertion(CreateTokenAccount, &flow);
        assert_eq!(plan.attach_to_node_id.as_deref(), Some("CreateIdentity-1"));
        assert_eq!(plan.nodes.len(), 1);
    }

    #[test]
    fn test_custom_rule_table_through_builder() {
        let rules = RuleTable::new(rules_with(QueryAccount, |rule| {
            rule.requires.push(ResourceRequirement::error(
                ResourceKind::KeyPair,
                "Queries are signed in this deployment",
                &[GenerateKeys],
            ));
            rule.default_recipe = vec![GenerateKeys];
        }))
        .unwrap();

        let planner = Planner::builder().with_rules(&rules).build();
        assert_eq!(
            planner.resolve_recipe(QueryAccount, &FlowSnapshot::empty()),
            vec![GenerateKeys]
        );
        assert!(
            Planner::new()
                .resolve_recipe(QueryAccount, &FlowSnapshot::empty())
                .is_empty()
        );
    }

    #[test]
    fn test_planner_is_stateless_between_calls() {
        let planner = Planner::new();
        let flow = chain("n", FUNDED);
        let first = planner.validate_nodes(&flow);
        let _ = planner.plan_insertion(SendTokens, &flow);
        let _ = planner.layout(&flow);
        assert_eq!(planner.validate_nodes(&flow), first);
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.layout.node_width, 280.0);
        assert_eq!(config.layout.node_height, 100.0);
        assert_eq!(config.layout.horizontal_gap, 60.0);
        assert_eq!(config.layout.vertical_gap, 80.0);
        assert_eq!(config.scoring.unmet_penalty, 0.1);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config =
            PlannerConfig::from_json(r#"{ "scoring": { "unmetPenalty": 0.25 } }"#).unwrap();
        assert_eq!(config.scoring.unmet_penalty, 0.25);
        assert_eq!(config.layout, LayoutConfig::default());

        let planner = Planner::builder().with_config(config).build();
        assert_eq!(planner.config().scoring.unmet_penalty, 0.25);
    }

    #[test]
    fn test_negative_dimensions_are_rejected() {
        let err = PlannerConfig::from_json(r#"{ "layout": { "verticalGap": -5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("verticalGap"));
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let err = PlannerConfig::from_json(r#"{ "layout": { "nodeWidth": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = PlannerConfig::from_json("{ layout: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

#[cfg(test)]
mod formatter_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_recipe() {
        assert_eq!(
            RecipeFormatter::format_recipe(&[Faucet, WaitForBalance]),
            "Faucet -> Wait for Balance"
        );
        assert_eq!(RecipeFormatter::format_recipe(&[]), "nothing missing");
    }

    #[test]
    fn test_credit_cost_and_summary() {
        let rules = RuleTable::standard();
        assert_eq!(RecipeFormatter::credit_cost(rules, CREDITED), 0);
        assert_eq!(
            RecipeFormatter::credit_cost(rules, &[CreateIdentity, CreateTokenAccount]),
            525
        );
        assert_eq!(
            RecipeFormatter::summarize_recipe(rules, CreateTokenAccount, &[CreateIdentity]),
            "Create Token Account needs 1 step(s) first: Create Identity (525 credits including the block itself)"
        );
        assert_eq!(
            RecipeFormatter::summarize_recipe(rules, GenerateKeys, &[]),
            "Generate Keys can be added directly"
        );
    }

    #[test]
    fn test_format_attachment() {
        let attachment = Attachment {
            attach_to_node_id: Some("keys".to_string()),
            score: 0.9,
            remaining_recipe: vec![Faucet, WaitForBalance],
        };
        assert_eq!(
            RecipeFormatter::format_attachment(&attachment),
            "attach below 'keys' (score 0.90); still missing: Faucet -> Wait for Balance"
        );
    }

    #[test]
    fn test_format_node() {
        let flow = flow_of(&[("wait", WaitForBalance)], &[]);
        let validation = Planner::new().validate_node("wait", &flow).unwrap();
        assert_eq!(
            RecipeFormatter::format_node(&validation),
            "[error] wait (Wait for Balance, 0 credits)\n  \
             ! Nothing has sent ACME to wait for (add Faucet or Send Tokens)\n  \
             fix: Generate Keys -> Faucet"
        );
    }

    #[test]
    fn test_format_flow() {
        let flow = flow_of(&[("a", GenerateKeys)], &[("a", "ghost")]);
        let text = RecipeFormatter::format_flow(&Planner::new().validate_flow(&flow));
        assert_eq!(
            text,
            "flow is invalid (1 issue(s))\n  - Connection 'c-a-ghost' references missing node 'ghost'"
        );
        assert_eq!(
            RecipeFormatter::format_flow(&Planner::new().validate_flow(&FlowSnapshot::empty())),
            "flow is structurally valid"
        );
    }
}
