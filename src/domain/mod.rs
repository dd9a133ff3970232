//! Domain logic for pipeline states, rules evaluation and transitions

mod evaluator;
mod ids;
mod states;
mod transitions;
mod validation;


pub use evaluator::{
    answers_from_ticks, category_subtotals, checklist_ready, checklist_report, classify,
    missing_criteria, score_total, score_violations, ChecklistReport, ScoreOutcome,
};
pub use ids::{format_project_id, is_valid_project_id, project_id_year, random_project_id, ID_PREFIX};
pub use states::{
    allowed_actions, is_terminal_status, stage_of, stage_of_label, Action, Role, HAPPY_PATH,
};
pub use transitions::{
    apply_command, award_contract, create_proposal, decide_step1, include_in_budget,
    release_hold, resolve_escalation, resubmit_proposal, resubmit_step3, score_project,
    submit_step3, validate_step3, Command,
};
pub use validation::{
    check_action, check_award, check_patch, check_proposal, check_remarks, check_scoresheet,
    check_step1, check_step3, missing_documents,
};

#[cfg(test)]
pub(crate) use transitions::fixtures;
