//! Decision evaluator
//!
//! Pure functions over the rule tables: score aggregation and checklist
//! readiness. Nothing here touches a project record.

use std::collections::BTreeMap;

use crate::rules::{criterion, ChecklistItem, CATEGORIES, CRITERIA, PASSING_SCORE};
use crate::schemas::Answer;

/// Outcome of a complete scoresheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    Pass,
    Fail,
}

/// Sum of all entered points. Unknown criteria are ignored; missing ones count 0.
pub fn score_total(scores: &BTreeMap<String, u32>) -> u32 {
    CRITERIA
        .iter()
        .filter_map(|c| scores.get(c.id))
        .sum()
}

/// Points per category letter, computed from the criteria table.
pub fn category_subtotals(scores: &BTreeMap<String, u32>) -> BTreeMap<String, u32> {
    CATEGORIES
        .iter()
        .map(|category| {
            let subtotal: u32 = CRITERIA
                .iter()
                .filter(|c| c.category == *category)
                .filter_map(|c| scores.get(c.id))
                .sum();
            (category.letter().to_string(), subtotal)
        })
        .collect()
}

/// Criteria with no entry, in table order.
pub fn missing_criteria(scores: &BTreeMap<String, u32>) -> Vec<String> {
    CRITERIA
        .iter()
        .filter(|c| !scores.contains_key(c.id))
        .map(|c| c.id.to_string())
        .collect()
}

/// Entries that name an unknown criterion or exceed its maximum.
///
/// Returns `(criterion id, points, max)`; `max` is 0 for unknown ids.
pub fn score_violations(scores: &BTreeMap<String, u32>) -> Vec<(String, u32, u32)> {
    scores
        .iter()
        .filter_map(|(id, points)| match criterion(id) {
            Some(c) if *points <= c.max_points => None,
            Some(c) => Some((id.clone(), *points, c.max_points)),
            None => Some((id.clone(), *points, 0)),
        })
        .collect()
}

/// Classify a total against the passing mark (inclusive).
pub fn classify(total: u32) -> ScoreOutcome {
    if total >= PASSING_SCORE {
        ScoreOutcome::Pass
    } else {
        ScoreOutcome::Fail
    }
}

/// Per-item breakdown of a checklist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistReport {
    /// Known items with no answer
    pub unanswered: Vec<String>,

    /// Standard items answered "No"
    pub failed_standard: Vec<String>,

    /// Red-flag items answered "Yes"
    pub raised_red_flags: Vec<String>,
}

impl ChecklistReport {
    /// True when every item is answered and passes its rule
    pub fn is_ready(&self) -> bool {
        self.unanswered.is_empty()
            && self.failed_standard.is_empty()
            && self.raised_red_flags.is_empty()
    }
}

/// Evaluate answers against a checklist.
///
/// Standard items pass on "Yes", red-flag items pass on "No". Answers for
/// ids not in `items` are ignored.
pub fn checklist_report(items: &[ChecklistItem], answers: &BTreeMap<String, Answer>) -> ChecklistReport {
    let mut report = ChecklistReport::default();
    for item in items {
        match answers.get(item.id) {
            None => report.unanswered.push(item.id.to_string()),
            Some(answer) if item.red_flag && answer.is_yes() => {
                report.raised_red_flags.push(item.id.to_string())
            }
            Some(answer) if !item.red_flag && !answer.is_yes() => {
                report.failed_standard.push(item.id.to_string())
            }
            Some(_) => {}
        }
    }
    report
}

/// True iff every known item is present and satisfies its pass rule.
pub fn checklist_ready(items: &[ChecklistItem], answers: &BTreeMap<String, Answer>) -> bool {
    checklist_report(items, answers).is_ready()
}

/// Convert a tick-box checklist into Yes/No answers.
pub fn answers_from_ticks(ticks: &BTreeMap<String, bool>) -> BTreeMap<String, Answer> {
    ticks
        .iter()
        .map(|(id, ticked)| (id.clone(), Answer::from(*ticked)))
        .collect()
}
