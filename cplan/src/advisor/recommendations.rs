//! Fixed-rule recommendations from the score and the top-level subtasks

use tracing::debug;

use crate::domain::Subtask;

const HIGH_TIER: [&str; 3] = [
    "Consider breaking down the most complex subtasks further before implementation",
    "Use a phased approach - implement core functionality first, then add features",
    "Implement comprehensive testing from the beginning",
];

const MEDIUM_TIER: [&str; 2] = [
    "Plan the architecture carefully before starting implementation",
    "Consider using established design patterns for complex components",
];

const LOW_TIER: [&str; 1] = ["This project has moderate complexity - focus on clean, maintainable code"];

const DEPENDENCY_NOTE: &str = "Pay attention to task dependencies - some tasks must be completed before others";
const NESTED_NOTE: &str =
    "Some tasks have been further decomposed - review the sub-subtasks for detailed implementation steps";

/// Maximum number of titles named in the high-priority callout
const CALLOUT_LIMIT: usize = 3;

/// Build the recommendation list for a run
///
/// Only top-level subtasks are inspected. The high-priority callout matches
/// the priority text "high" exactly, so critical subtasks are not named.
pub fn generate_recommendations(subtasks: &[Subtask], complexity_score: f64) -> Vec<String> {
    debug!(count = subtasks.len(), %complexity_score, "generate_recommendations: called");
    let tier: &[&str] = if complexity_score > 0.8 {
        &HIGH_TIER
    } else if complexity_score > 0.6 {
        &MEDIUM_TIER
    } else {
        &LOW_TIER
    };
    let mut recommendations: Vec<String> = tier.iter().map(|s| s.to_string()).collect();

    let high: Vec<&str> = subtasks
        .iter()
        .filter(|s| s.priority.as_str() == "high")
        .take(CALLOUT_LIMIT)
        .map(|s| s.title.as_str())
        .collect();
    if !high.is_empty() {
        recommendations.push(format!("Prioritize these high-priority tasks: {}", high.join(", ")));
    }

    if subtasks.iter().any(|s| !s.dependencies.is_empty()) {
        recommendations.push(DEPENDENCY_NOTE.to_string());
    }

    if subtasks.iter().any(Subtask::has_children) {
        recommendations.push(NESTED_NOTE.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;

    #[test]
    fn test_high_score_tier_with_addons() {
        let subtasks = vec![
            Subtask::new("Auth", "d").with_priority(Priority::High),
            Subtask::new("Billing", "d")
                .with_priority(Priority::High)
                .with_dependencies(vec!["Auth".to_string()]),
            Subtask::new("Docs", "d").with_children(vec![Subtask::new("c", "d")]),
        ];

        let recs = generate_recommendations(&subtasks, 0.9);
        assert_eq!(recs.len(), 6);
        assert_eq!(&recs[..3], &HIGH_TIER.map(String::from));
        assert_eq!(recs[3], "Prioritize these high-priority tasks: Auth, Billing");
        assert_eq!(recs[4], DEPENDENCY_NOTE);
        assert_eq!(recs[5], NESTED_NOTE);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(generate_recommendations(&[], 0.8), MEDIUM_TIER.map(String::from).to_vec());
        assert_eq!(generate_recommendations(&[], 0.6), LOW_TIER.map(String::from).to_vec());
        assert_eq!(generate_recommendations(&[], 0.61).len(), 2);
    }

    #[test]
    fn test_callout_limited_to_three() {
        let subtasks: Vec<Subtask> = ["a", "b", "c", "d"]
            .iter()
            .map(|t| Subtask::new(*t, "x").with_priority(Priority::High))
            .collect();
        let recs = generate_recommendations(&subtasks, 0.1);
        assert_eq!(recs[1], "Prioritize these high-priority tasks: a, b, c");
    }

    #[test]
    fn test_critical_not_in_callout() {
        let subtasks = vec![Subtask::new("Outage", "d").with_priority(Priority::Critical)];
        let recs = generate_recommendations(&subtasks, 0.1);
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_nested_children_not_inspected() {
        let child = Subtask::new("deep", "d")
            .with_priority(Priority::High)
            .with_dependencies(vec!["x".to_string()]);
        let parent = Subtask::new("top", "d").with_children(vec![child]);
        let recs = generate_recommendations(&[parent], 0.1);
        assert_eq!(recs, vec![LOW_TIER[0].to_string(), NESTED_NOTE.to_string()]);
    }
}
