//! Property tests for the structural invariants of `BayesianModel`.

use bayes_dag_core::{BayesianModel, DagError};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeSet;

fn label() -> impl Strategy<Value = String> {
    "[a-h]"
}

/// Edges that always point from a smaller label to a larger one, so any list
/// of them is acyclic and free of self-loops.
fn forward_edges() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((label(), label()), 0..24).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(a, b)| a != b)
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect()
    })
}

fn pairs(edges: &[(String, String)]) -> impl Iterator<Item = (&String, &String)> {
    edges.iter().map(|(p, c)| (p, c))
}

fn snapshot(model: &BayesianModel) -> (BTreeSet<String>, BTreeSet<(String, String)>) {
    let nodes = model.nodes().into_iter().map(str::to_string).collect();
    let edges = model.edges().into_iter().map(|(p, c)| (p.to_string(), c.to_string())).collect();
    (nodes, edges)
}

proptest! {
    #[test]
    fn add_nodes_from_yields_the_label_set(labels in prop::collection::vec(label(), 0..20)) {
        let mut g = BayesianModel::new();
        g.add_nodes_from(&labels).unwrap();
        let expected: BTreeSet<String> = labels.iter().cloned().collect();
        prop_assert_eq!(snapshot(&g).0, expected);
    }

    #[test]
    fn acyclic_edge_lists_are_stored_exactly(edges in forward_edges()) {
        let g = BayesianModel::from_edges(pairs(&edges)).unwrap();
        let (nodes, stored) = snapshot(&g);
        let expected: BTreeSet<(String, String)> = edges.iter().cloned().collect();
        prop_assert_eq!(&stored, &expected);
        for (p, c) in &expected {
            prop_assert!(nodes.contains(p) && nodes.contains(c));
        }
    }

    #[test]
    fn rule_groups_match_out_degree(edges in forward_edges()) {
        let g = BayesianModel::from_edges(pairs(&edges)).unwrap();
        for node in g.nodes() {
            let degree = g.successors(node).unwrap().len();
            let expected: Vec<usize> = (0..degree).collect();
            prop_assert_eq!(g.rule_groups(node).unwrap(), expected.as_slice());
        }
    }

    #[test]
    fn a_self_loop_anywhere_commits_nothing(edges in forward_edges(), at in 0usize..24, node in label()) {
        let mut g = BayesianModel::from_edges([("seed", "other")]).unwrap();
        let before = snapshot(&g);

        let mut batch = edges;
        let at = at.min(batch.len());
        batch.insert(at, (node.clone(), node));

        let err = g.add_edges_from(pairs(&batch)).unwrap_err();
        prop_assert!(matches!(err, DagError::SelfLoop { .. }), "assertion failed: matches!(err, DagError::SelfLoop {{ .. }})");
        prop_assert_eq!(snapshot(&g), before);
    }

    #[test]
    fn a_closing_edge_commits_nothing(edges in forward_edges()) {
        prop_assume!(!edges.is_empty());
        let mut g = BayesianModel::new();
        let before = snapshot(&g);

        // Reverse the first edge: together with the original it forms a 2-cycle.
        let (p, c) = edges[0].clone();
        let mut batch = edges;
        batch.push((c, p));

        let err = g.add_edges_from(pairs(&batch)).unwrap_err();
        prop_assert!(matches!(err, DagError::Cycle { .. }), "assertion failed: matches!(err, DagError::Cycle {{ .. }})");
        prop_assert_eq!(snapshot(&g), before);
    }

    #[test]
    fn non_string_labels_commit_nothing(n in any::<i64>(), flag in any::<bool>()) {
        let mut g = BayesianModel::new();
        let bad: Vec<Value> = vec![json!("ok"), json!(n)];

        prop_assert!(matches!(g.add_node(&json!(n)), Err(DagError::InvalidLabelType { .. })), "assertion failed: matches!(g.add_node(&json!(n)), Err(DagError::InvalidLabelType {{ .. }}))");
        prop_assert!(matches!(g.add_nodes_from(&bad), Err(DagError::InvalidLabelType { .. })), "assertion failed: matches!(g.add_nodes_from(&bad), Err(DagError::InvalidLabelType {{ .. }}))");
        prop_assert!(matches!(g.add_edge(&json!("ok"), &json!(flag)), Err(DagError::InvalidLabelType { .. })), "assertion failed: matches!(g.add_edge(&json!(\"ok\"), &json!(flag)), Err(DagError::InvalidLabelType {{ .. }}))");
        let batch = vec![(json!("x"), json!("y")), (json!(n), json!("y"))];
        prop_assert!(matches!(g.add_edges_from(batch), Err(DagError::InvalidLabelType { .. })), "assertion failed: matches!(g.add_edges_from(batch), Err(DagError::InvalidLabelType {{ .. }}))");
        prop_assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn re_adding_nodes_is_a_no_op(edges in forward_edges()) {
        let mut g = BayesianModel::from_edges(pairs(&edges)).unwrap();
        let labels: Vec<String> = g.nodes().into_iter().map(str::to_string).collect();
        for l in &labels {
            g.add_states(l, ["s"]).unwrap();
        }
        let before: Vec<(Vec<usize>, usize)> = labels
            .iter()
            .map(|l| (g.rule_groups(l).unwrap().to_vec(), g.number_of_states(l).unwrap()))
            .collect();

        g.add_nodes_from(&labels).unwrap();
        let after: Vec<(Vec<usize>, usize)> = labels
            .iter()
            .map(|l| (g.rule_groups(l).unwrap().to_vec(), g.number_of_states(l).unwrap()))
            .collect();
        prop_assert_eq!(before, after);
    }
}

#[test]
fn rule_group_scenario_across_calls() {
    let mut g = BayesianModel::from_edges([("a", "c"), ("b", "c"), ("a", "d")]).unwrap();
    assert_eq!(g.rule_groups("a").unwrap(), [0, 1]);
    assert_eq!(g.rule_groups("b").unwrap(), [0]);
    assert!(g.rule_groups("c").unwrap().is_empty());
    assert!(g.rule_groups("d").unwrap().is_empty());

    g.add_edge("c", "e").unwrap();
    assert_eq!(g.rule_groups("c").unwrap(), [0]);
    assert!(g.rule_groups("e").unwrap().is_empty());

    g.add_edges_from([("b", "f"), ("c", "f")]).unwrap();
    assert_eq!(g.rule_groups("b").unwrap(), [0, 1]);
    assert_eq!(g.rule_groups("c").unwrap(), [0, 1]);
    assert!(g.rule_groups("f").unwrap().is_empty());
}

#[test]
fn states_accumulate_in_order() {
    let mut g = BayesianModel::new();
    g.add_node("n").unwrap();
    g.add_states("n", ["s1", "s2"]).unwrap();
    g.add_states("n", ["s3"]).unwrap();
    assert_eq!(g.state_names("n").unwrap(), vec!["s1", "s2", "s3"]);
    assert!(g.states("n").unwrap().iter().all(|s| !s.observed_status));
}
