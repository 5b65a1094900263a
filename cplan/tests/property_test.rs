//! Property-based tests for scoring, recommendations and time totals

use codeplanner::advisor::{generate_recommendations, total_estimated_time};
use codeplanner::{Complexity, Priority, Subtask, TaskAnalyzer};
use proptest::prelude::*;

fn complexity_strategy() -> impl Strategy<Value = Complexity> {
    prop_oneof![
        Just(Complexity::Simple),
        Just(Complexity::Moderate),
        Just(Complexity::Complex),
        Just(Complexity::VeryComplex),
    ]
}

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
        Just(Priority::Critical),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = Subtask> {
    (complexity_strategy(), priority_strategy(), 1u32..100).prop_map(|(complexity, priority, hours)| {
        Subtask::new("leaf", "generated")
            .with_complexity(complexity)
            .with_priority(priority)
            .with_estimate(format!("{} hours", hours))
    })
}

fn tree_strategy() -> impl Strategy<Value = Subtask> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        (leaf_strategy(), prop::collection::vec(inner, 0..4))
            .prop_map(|(parent, children)| parent.with_children(children))
    })
}

proptest! {
    /// The score of any tree stays within [0, 1]
    #[test]
    fn test_score_is_bounded(subtasks in prop::collection::vec(tree_strategy(), 0..6)) {
        let score = TaskAnalyzer::complexity_score(&subtasks);
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }

    /// A uniform tree scores exactly its base value
    #[test]
    fn test_uniform_tree_scores_base(complexity in complexity_strategy(), width in 1usize..5) {
        let children: Vec<Subtask> = (0..width)
            .map(|_| Subtask::new("c", "d").with_complexity(complexity))
            .collect();
        let tree = vec![Subtask::new("p", "d").with_complexity(complexity).with_children(children)];
        let score = TaskAnalyzer::complexity_score(&tree);
        prop_assert!((score - complexity.base_score()).abs() < 1e-9);
    }

    /// There is always at least one recommendation and never more than six
    #[test]
    fn test_recommendation_count(subtasks in prop::collection::vec(tree_strategy(), 0..6), score in 0.0f64..=1.0) {
        let recs = generate_recommendations(&subtasks, score);
        prop_assert!(!recs.is_empty());
        prop_assert!(recs.len() <= 6);
    }

    /// Any tree with estimates reports a total, never "Not estimated"
    #[test]
    fn test_estimated_trees_have_totals(subtasks in prop::collection::vec(tree_strategy(), 1..6)) {
        prop_assert_ne!(total_estimated_time(&subtasks), "Not estimated");
    }
}
