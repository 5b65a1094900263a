//! Aggregation of free-text time estimates

use tracing::debug;

use crate::domain::Subtask;

/// Minutes per unit; the first unit that yields a number wins
const UNITS: [(&str, f64); 7] = [
    ("minutes", 1.0),
    ("hour", 60.0),
    ("hours", 60.0),
    ("day", 480.0),
    ("days", 480.0),
    ("week", 2400.0),
    ("weeks", 2400.0),
];

const MINUTES_PER_HOUR: f64 = 60.0;
const MINUTES_PER_DAY: f64 = 480.0;
const MINUTES_PER_WEEK: f64 = 2400.0;

/// Sum the estimates of a subtask tree into a human-readable total
///
/// Walks every level. Present but unparsable estimates contribute nothing
/// but still count as estimated; with no estimates at all the result is
/// `"Not estimated"`.
pub fn total_estimated_time(subtasks: &[Subtask]) -> String {
    debug!(count = subtasks.len(), "total_estimated_time: called");
    let mut total = 0.0;
    let mut has_estimates = false;
    accumulate(subtasks, &mut total, &mut has_estimates);

    if !has_estimates {
        return "Not estimated".to_string();
    }
    format_minutes(total)
}

fn accumulate(subtasks: &[Subtask], total: &mut f64, has_estimates: &mut bool) {
    for subtask in subtasks {
        if let Some(estimate) = subtask.estimated_time.as_deref().filter(|e| !e.is_empty()) {
            *has_estimates = true;
            match parse_minutes(estimate) {
                Some(minutes) => *total += minutes,
                None => debug!(%estimate, "accumulate: unparsable estimate"),
            }
        }
        accumulate(&subtask.sub_subtasks, total, has_estimates);
    }
}

/// Minutes for one estimate such as "2 hours" or "about 1.5 days"
pub fn parse_minutes(estimate: &str) -> Option<f64> {
    let lower = estimate.to_lowercase();
    UNITS.iter().find_map(|(unit, multiplier)| {
        let (before, _) = lower.split_once(unit)?;
        let number: f64 = before.split_whitespace().last()?.parse().ok()?;
        number.is_finite().then_some(number * multiplier)
    })
}

fn format_minutes(total: f64) -> String {
    if total < MINUTES_PER_HOUR {
        format!("{} minutes", total as i64)
    } else if total < MINUTES_PER_DAY {
        format!("{:.1} hours", total / MINUTES_PER_HOUR)
    } else if total < MINUTES_PER_WEEK {
        format!("{:.1} days", total / MINUTES_PER_DAY)
    } else {
        format!("{:.1} weeks", total / MINUTES_PER_WEEK)
    }
}
