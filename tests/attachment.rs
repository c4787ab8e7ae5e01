//! Tests for attachment scoring and insertion planning.
mod common;
use common::*;
use junbi::attachment::score_tail;
use junbi::prelude::*;
use junbi::rules::OperationType::*;

#[cfg(test)]
mod attachment_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prefers_the_chain_that_already_has_credits() {
        // A funded chain without credits next to a fully credited one.
        let flow = merge(chain("a", FUNDED), chain("b", CREDITED));
        let planner = Planner::new();

        let attachment = planner.find_best_attachment(SendTokens, &flow);
        assert_eq!(attachment.attach_to_node_id.as_deref(), Some("b4"));
        assert_eq!(attachment.score, 2.0);
        assert!(attachment.remaining_recipe.is_empty());
    }

    #[test]
    fn test_scoring_follows_ancestor_paths() {
        // The credited chain continues into a query block, so its tail produces nothing.
        let mut flow = merge(chain("a", FUNDED), chain("b", CREDITED));
        flow.nodes.push(FlowNode::new("x", QueryAccount));
        flow.nodes.push(FlowNode::new("y", GenerateKeys));
        flow.connections.push(FlowConnection::new("tail", "b4", "x"));

        let planner = Planner::new();
        // Tails are a2 (funded), x (below the credited chain) and y (bare keys).
        let attachment = planner.find_best_attachment(CreateIdentity, &flow);
        assert_eq!(attachment.attach_to_node_id.as_deref(), Some("x"));
        assert!(attachment.remaining_recipe.is_empty());

        // Credits exist on the canvas, but not above a2.
        let funded_score = planner.score_node(CreateIdentity, &flow, "a2").unwrap();
        assert!((funded_score - 0.9).abs() < 1e-9);
        assert_eq!(planner.score_node(CreateIdentity, &flow, "x").unwrap(), 2.0);
    }

    #[test]
    fn test_empty_flow_starts_a_new_chain() {
        let attachment =
            Planner::new().find_best_attachment(CreateIdentity, &FlowSnapshot::empty());
        assert_eq!(attachment.attach_to_node_id, None);
        assert_eq!(attachment.score, 0.0);
        assert_eq!(
            attachment.remaining_recipe,
            vec![GenerateKeys, Faucet, WaitForBalance, AddCredits, WaitForCredits]
        );
    }

    #[test]
    fn test_flow_without_tails_starts_a_new_chain() {
        let flow = flow_of(
            &[("a", GenerateKeys), ("b", Faucet)],
            &[("a", "b"), ("b", "a")],
        );
        let attachment = Planner::new().find_best_attachment(Faucet, &flow);
        assert_eq!(attachment.attach_to_node_id, None);
        assert_eq!(attachment.remaining_recipe, vec![GenerateKeys]);
    }

    #[test]
    fn test_equal_scores_prefer_fewer_remaining_steps() {
        // Both tails carry a keypair but no credits, so both score 0.9 for an identity.
        let flow = merge(chain("a", FUNDED), flow_of(&[("k", GenerateKeys)], &[]));
        let attachment = Planner::new().find_best_attachment(CreateIdentity, &flow);
        assert_eq!(attachment.attach_to_node_id.as_deref(), Some("a2"));
        assert_eq!(attachment.remaining_recipe, vec![AddCredits, WaitForCredits]);
    }

    #[test]
    fn test_full_tie_prefers_most_recent_node() {
        let flow = flow_of(&[("first", GenerateKeys), ("second", GenerateKeys)], &[]);
        let attachment = Planner::new().find_best_attachment(AddCredits, &flow);
        assert_eq!(attachment.attach_to_node_id.as_deref(), Some("second"));
    }

    #[test]
    fn test_score_is_monotone_in_available_resources() {
        let config = ScoringConfig::default();
        let required = RuleTable::standard()
            .rule_for(CreateTokenAccount)
            .required_set();

        let mut available = ResourceSet::new();
        let mut previous = score_tail(required, available, &config);
        for kind in ResourceKind::ALL {
            available.insert(kind);
            let score = score_tail(required, available, &config);
            assert!(score >= previous, "adding {} lowered the score", kind);
            previous = score;
        }
        assert_eq!(previous, required.len() as f64);
    }

    #[test]
    fn test_penalty_is_configurable() {
        let flow = flow_of(&[("k", GenerateKeys)], &[]);
        let planner = Planner::builder()
            .with_scoring(ScoringConfig { unmet_penalty: 0.5 })
            .build();
        let score = planner.score_node(AddCredits, &flow, "k").unwrap();
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_score_node_rejects_unknown_ids() {
        let err = Planner::new()
            .score_node(AddCredits, &FlowSnapshot::empty(), "ghost")
            .unwrap_err();
        assert_eq!(err, FlowError::NodeNotFound("ghost".to_string()));
    }
}

#[cfg(test)]
mod insertion_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plan_on_empty_flow_builds_full_chain() {
        let plan = Planner::new().plan_insertion(CreateIdentity, &FlowSnapshot::empty());
        assert_eq!(plan.attach_to_node_id, None);

        let ids: Vec<&str> = plan.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "GenerateKeys-1",
                "Faucet-1",
                "WaitForBalance-1",
                "AddCredits-1",
                "WaitForCredits-1",
                "CreateIdentity-1",
            ]
        );
        assert_eq!(plan.connections.len(), 5);
        assert_eq!(plan.connections[0].source_node_id, "GenerateKeys-1");
        assert_eq!(plan.connections[0].target_node_id, "Faucet-1");
    }

    #[test]
    fn test_plan_links_to_attachment_point() {
        let flow = flow_of(&[("keys", GenerateKeys)], &[]);
        let plan = Planner::new().plan_insertion(AddCredits, &flow);

        assert_eq!(plan.attach_to_node_id.as_deref(), Some("keys"));
        let ops: Vec<OperationType> = plan.nodes.iter().map(|n| n.operation).collect();
        assert_eq!(ops, vec![Faucet, WaitForBalance, AddCredits]);
        assert_eq!(plan.connections[0].source_node_id, "keys");
        assert_eq!(plan.connections.len(), 3);
    }

    #[test]
    fn test_plan_ids_never_collide_with_existing_ones() {
        let flow = flow_of(
            &[("Faucet-1", GenerateKeys), ("connection-1", QueryAccount)],
            &[],
        );

        let plan = Planner::new().plan_insertion(AddCredits, &flow);
        assert_eq!(plan.attach_to_node_id.as_deref(), Some("Faucet-1"));

        let ids: Vec<&str> = plan.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Faucet-2", "WaitForBalance-1", "AddCredits-1"]);
        let connection_ids: Vec<&str> = plan.connections.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            connection_ids,
            vec!["connection-2", "connection-3", "connection-4"]
        );
    }

    #[test]
    fn test_applied_plan_validates_cleanly() {
        let planner = Planner::new();
        let flow = flow_of(&[("keys", GenerateKeys)], &[]);
        let plan = planner.plan_insertion(CreateIdentity, &flow);
        let next = flow.with_insertion(&plan);

        assert!(planner.validate_flow(&next).valid);
        for validation in planner.validate_nodes(&next) {
            assert_eq!(validation.severity, NodeSeverity::Valid, "{}", validation.node_id);
        }
        // The input snapshot is untouched.
        assert_eq!(flow.nodes.len(), 1);
    }
}
