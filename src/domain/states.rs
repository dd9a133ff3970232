//! Pipeline state machine definitions
//!
//! The happy path runs:
//! PENDING_REVIEW → CLEARED → SCORED → GAA_INCLUDED → step3_pending → step4_bidding → IMPLEMENTATION
//!
//! Returns move a project back to a resubmission state; stage sub-records
//! written before the return are kept.

use crate::schemas::{ProjectStatus, Stage};

/// The canonical happy-path ordering of statuses.
pub const HAPPY_PATH: &[ProjectStatus] = &[
    ProjectStatus::PendingReview,
    ProjectStatus::Cleared,
    ProjectStatus::Scored,
    ProjectStatus::GaaIncluded,
    ProjectStatus::Step3Pending,
    ProjectStatus::Step4Bidding,
    ProjectStatus::Implementation,
];

/// Roles that trigger workflow actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Regional Office submitter
    RegionalOffice,
    Validator,
    Scorer,
    /// Engineering reviewer
    Bafe,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::RegionalOffice => write!(f, "RO"),
            Role::Validator => write!(f, "Validator"),
            Role::Scorer => write!(f, "Scorer"),
            Role::Bafe => write!(f, "BAFE"),
        }
    }
}

/// A workflow action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    DecideStep1,
    ResubmitProposal,
    ReleaseHold,
    Score,
    IncludeInBudget,
    SubmitStep3,
    ValidateStep3,
    ResolveEscalation,
    ResubmitStep3,
    Award,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::Create,
        Action::DecideStep1,
        Action::ResubmitProposal,
        Action::ReleaseHold,
        Action::Score,
        Action::IncludeInBudget,
        Action::SubmitStep3,
        Action::ValidateStep3,
        Action::ResolveEscalation,
        Action::ResubmitStep3,
        Action::Award,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::DecideStep1 => "decide",
            Action::ResubmitProposal => "resubmit proposal",
            Action::ReleaseHold => "release hold",
            Action::Score => "score",
            Action::IncludeInBudget => "include in budget",
            Action::SubmitStep3 => "submit step 3 documents",
            Action::ValidateStep3 => "validate step 3",
            Action::ResolveEscalation => "resolve escalation",
            Action::ResubmitStep3 => "resubmit step 3",
            Action::Award => "award",
        }
    }

    /// Role presented with this action
    pub fn role(&self) -> Role {
        match self {
            Action::Create
            | Action::ResubmitProposal
            | Action::SubmitStep3
            | Action::ResubmitStep3
            | Action::Award => Role::RegionalOffice,
            Action::DecideStep1 | Action::ReleaseHold => Role::Validator,
            Action::Score | Action::IncludeInBudget => Role::Scorer,
            Action::ValidateStep3 | Action::ResolveEscalation => Role::Bafe,
        }
    }

    /// Statuses from which this action may be taken
    ///
    /// `Create` has none: it starts a new record.
    pub fn legal_sources(&self) -> &'static [ProjectStatus] {
        match self {
            Action::Create => &[],
            Action::DecideStep1 => &[ProjectStatus::PendingReview],
            Action::ResubmitProposal => &[ProjectStatus::ReturnedStep1],
            Action::ReleaseHold => &[ProjectStatus::OnHold],
            Action::Score => &[ProjectStatus::ForScoring, ProjectStatus::Cleared],
            Action::IncludeInBudget => &[ProjectStatus::Scored, ProjectStatus::NepIncluded],
            Action::SubmitStep3 => &[
                ProjectStatus::GaaIncluded,
                ProjectStatus::Scored,
                ProjectStatus::NepIncluded,
            ],
            Action::ValidateStep3 => &[ProjectStatus::Step3Pending],
            Action::ResolveEscalation => &[ProjectStatus::Step3Escalated],
            Action::ResubmitStep3 => &[ProjectStatus::ReturnedStep3],
            Action::Award => &[ProjectStatus::Step4Bidding],
        }
    }

    /// Whether the action may be taken from `status`
    pub fn permits(&self, status: ProjectStatus) -> bool {
        self.legal_sources().contains(&status)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions a caller may present for a project in `status`.
pub fn allowed_actions(status: ProjectStatus) -> Vec<Action> {
    Action::ALL
        .iter()
        .copied()
        .filter(|a| a.permits(status))
        .collect()
}

/// Map a status to the stage shown in progress displays.
pub fn stage_of(status: ProjectStatus) -> Stage {
    match status {
        ProjectStatus::PendingReview
        | ProjectStatus::ReturnedStep1
        | ProjectStatus::Cleared
        | ProjectStatus::OnHold => Stage::Eligibility,
        ProjectStatus::ForScoring
        | ProjectStatus::Scored
        | ProjectStatus::NepIncluded
        | ProjectStatus::Rejected => Stage::Scoring,
        ProjectStatus::GaaIncluded
        | ProjectStatus::Step3Pending
        | ProjectStatus::Step3Escalated
        | ProjectStatus::ReturnedStep3 => Stage::Engineering,
        ProjectStatus::Step4Bidding
        | ProjectStatus::Step4Posted
        | ProjectStatus::Step4Evaluation
        | ProjectStatus::Awarded
        | ProjectStatus::Implementation => Stage::Procurement,
    }
}

/// Stage for a raw stored label.
///
/// Unknown `STEP4_*` labels are procurement; anything else unrecognized is
/// stage 1.
pub fn stage_of_label(label: &str) -> Stage {
    match label.parse::<ProjectStatus>() {
        Ok(status) => stage_of(status),
        Err(_) if label.starts_with("STEP4_") => Stage::Procurement,
        Err(_) => Stage::Eligibility,
    }
}

/// Check if a status admits no further action.
pub fn is_terminal_status(status: ProjectStatus) -> bool {
    allowed_actions(status).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_stage_is_monotonic() {
        let stages: Vec<Stage> = HAPPY_PATH.iter().map(|s| stage_of(*s)).collect();
        for pair in stages.windows(2) {
            assert!(pair[0] <= pair[1], "{:?}", pair);
        }
        assert!(stage_of(ProjectStatus::PendingReview) < stage_of(ProjectStatus::Scored));
        assert!(stage_of(ProjectStatus::Scored) < stage_of(ProjectStatus::GaaIncluded));
        assert!(stage_of(ProjectStatus::GaaIncluded) < stage_of(ProjectStatus::Step4Bidding));
    }

    #[test]
    fn test_stage_of_listed_statuses() {
        for status in [
            ProjectStatus::PendingReview,
            ProjectStatus::ReturnedStep1,
            ProjectStatus::Cleared,
            ProjectStatus::OnHold,
        ] {
            assert_eq!(stage_of(status), Stage::Eligibility);
        }
        assert_eq!(stage_of(ProjectStatus::Scored), Stage::Scoring);
        assert_eq!(stage_of(ProjectStatus::NepIncluded), Stage::Scoring);
        assert_eq!(stage_of(ProjectStatus::GaaIncluded), Stage::Engineering);
        assert_eq!(stage_of(ProjectStatus::Step3Pending), Stage::Engineering);
        assert_eq!(stage_of(ProjectStatus::Step3Escalated), Stage::Engineering);
        assert_eq!(stage_of(ProjectStatus::Step4Bidding), Stage::Procurement);
        assert_eq!(stage_of(ProjectStatus::Awarded), Stage::Procurement);
    }

    #[test]
    fn test_stage_of_label() {
        assert_eq!(stage_of_label("GAA-INCLUDED"), Stage::Engineering);
        assert_eq!(stage_of_label("STEP4_NOTICE"), Stage::Procurement);
        assert_eq!(stage_of_label("SOMETHING_ELSE"), Stage::Eligibility);
        assert_eq!(stage_of_label(""), Stage::Eligibility);
    }

    #[test]
    fn test_allowed_actions() {
        assert_eq!(allowed_actions(ProjectStatus::PendingReview), vec![Action::DecideStep1]);
        assert_eq!(allowed_actions(ProjectStatus::Cleared), vec![Action::Score]);
        assert_eq!(
            allowed_actions(ProjectStatus::Scored),
            vec![Action::IncludeInBudget, Action::SubmitStep3]
        );
        assert_eq!(allowed_actions(ProjectStatus::Step4Bidding), vec![Action::Award]);
        assert!(allowed_actions(ProjectStatus::Implementation).is_empty());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(is_terminal_status(ProjectStatus::Implementation));
        assert!(is_terminal_status(ProjectStatus::Rejected));
        assert!(!is_terminal_status(ProjectStatus::OnHold));
        assert!(!is_terminal_status(ProjectStatus::Step3Escalated));
    }

    #[test]
    fn test_roles() {
        assert_eq!(Action::DecideStep1.role(), Role::Validator);
        assert_eq!(Action::Score.role(), Role::Scorer);
        assert_eq!(Action::ValidateStep3.role(), Role::Bafe);
        assert_eq!(Action::Create.role(), Role::RegionalOffice);
    }
}
