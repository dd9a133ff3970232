//! State transition logic
//!
//! Pure functions for applying workflow actions to projects. Each function:
//! - Never mutates the input project
//! - Checks the current status against the action's legal sources
//! - Validates the payload, reporting every missing field
//! - Returns a new Project with the status, stage sub-record, `last_updated`
//!   and `version` updated and every other field carried over

use std::collections::BTreeMap;

use crate::errors::{FmrError, Result};
use crate::rules::{NOTICE_OF_AWARD, STEP3_DOCUMENTS};
use crate::schemas::{
    Attachment, AwardPayload, BudgetTag, BudgetTarget, Contractor, DetailsPatch, Project,
    ProjectStatus, ProposalInput, ReturnInfo, ScoreData, ScorePayload, Stage, StageRecord,
    Step1Decision, Step1Payload, Step3Data, Step3Decision, Step3Payload, Step4Data,
    ValidatorData,
};

use super::evaluator::{category_subtotals, classify, score_total, ScoreOutcome};
use super::ids::is_valid_project_id;
use super::states::Action;
use super::validation::{
    check_action, check_award, check_patch, check_proposal, check_scoresheet, check_step1,
    check_step3, missing_documents,
};

/// A workflow action together with its payload
///
/// Attachments are already resolved to durable `{name, url}` pairs.
#[derive(Debug, Clone)]
pub enum Command {
    DecideStep1(Step1Payload),
    ResubmitProposal {
        patch: DetailsPatch,
        attachments: BTreeMap<String, Attachment>,
    },
    ReleaseHold,
    Score(ScorePayload),
    IncludeInBudget(BudgetTarget),
    SubmitStep3 {
        documents: BTreeMap<String, Attachment>,
    },
    ValidateStep3(Step3Payload),
    ResolveEscalation,
    ResubmitStep3(DetailsPatch),
    Award {
        payload: AwardPayload,
        notice: Option<Attachment>,
    },
}

impl Command {
    /// The action this command performs
    pub fn action(&self) -> Action {
        match self {
            Command::DecideStep1(_) => Action::DecideStep1,
            Command::ResubmitProposal { .. } => Action::ResubmitProposal,
            Command::ReleaseHold => Action::ReleaseHold,
            Command::Score(_) => Action::Score,
            Command::IncludeInBudget(_) => Action::IncludeInBudget,
            Command::SubmitStep3 { .. } => Action::SubmitStep3,
            Command::ValidateStep3(_) => Action::ValidateStep3,
            Command::ResolveEscalation => Action::ResolveEscalation,
            Command::ResubmitStep3(_) => Action::ResubmitStep3,
            Command::Award { .. } => Action::Award,
        }
    }
}

/// Apply a command to a project.
///
/// # Errors
/// * `IllegalTransition` - the project's status does not permit the action
/// * `Validation` / `ChecklistFailed` / `RedFlag` / `InvalidScore` /
///   `BidExceedsCeiling` - the payload is insufficient
pub fn apply_command(project: &Project, command: &Command) -> Result<Project> {
    match command {
        Command::DecideStep1(payload) => decide_step1(project, payload),
        Command::ResubmitProposal { patch, attachments } => {
            resubmit_proposal(project, patch, attachments)
        }
        Command::ReleaseHold => release_hold(project),
        Command::Score(payload) => score_project(project, payload),
        Command::IncludeInBudget(target) => include_in_budget(project, *target),
        Command::SubmitStep3 { documents } => submit_step3(project, documents),
        Command::ValidateStep3(payload) => validate_step3(project, payload),
        Command::ResolveEscalation => resolve_escalation(project),
        Command::ResubmitStep3(patch) => resubmit_step3(project, patch),
        Command::Award { payload, notice } => award_contract(project, payload, notice.as_ref()),
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn trimmed(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Create a new proposal in `PENDING_REVIEW`.
pub fn create_proposal(
    id: &str,
    input: &ProposalInput,
    attachments: BTreeMap<String, Attachment>,
) -> Result<Project> {
    if !is_valid_project_id(id) {
        return Err(FmrError::missing(["id"]));
    }
    let details = check_proposal(input, &attachments)?;
    Ok(Project::new(id.to_string(), details, attachments))
}

/// Step 1: clear, return or hold a pending proposal.
pub fn decide_step1(project: &Project, payload: &Step1Payload) -> Result<Project> {
    check_action(project.status, Action::DecideStep1)?;
    let decision = check_step1(payload)?;
    let decided_at = now();

    let data = ValidatorData {
        decision,
        checklist: payload.checklist.clone(),
        masterplan_verified: payload.masterplan_verified,
        remarks: trimmed(payload.remarks.as_ref()),
        validator: trimmed(payload.validator.as_ref()),
        decided_at: decided_at.clone(),
    };

    let next = project.clone().with_stage_record(StageRecord::Step1(data));
    let next = match decision {
        Step1Decision::Clear => next.with_status(ProjectStatus::Cleared),
        Step1Decision::Hold => next.with_status(ProjectStatus::OnHold),
        Step1Decision::Return => next
            .with_status(ProjectStatus::ReturnedStep1)
            .with_return_info(Some(ReturnInfo {
                stage: Stage::Eligibility,
                remarks: trimmed(payload.remarks.as_ref()),
                returned_at: decided_at,
            })),
    };
    Ok(next.next_revision())
}

/// RO edit after a Step 1 return; goes back to `PENDING_REVIEW`.
///
/// Replacement attachments are merged over existing ones; keys are never removed.
/// The edited details must pass the intake rules against the merged attachments.
pub fn resubmit_proposal(
    project: &Project,
    patch: &DetailsPatch,
    attachments: &BTreeMap<String, Attachment>,
) -> Result<Project> {
    check_action(project.status, Action::ResubmitProposal)?;
    if patch.is_empty() && attachments.is_empty() {
        return Err(FmrError::missing(["details"]));
    }
    let mut merged = project.attachments.clone();
    merged.extend(attachments.clone());
    let details = check_patch(&project.details, patch, &merged)?;
    Ok(project
        .clone()
        .with_details(details)
        .with_attachments(attachments.clone())
        .with_return_info(None)
        .with_status(ProjectStatus::PendingReview)
        .next_revision())
}

/// Put a held proposal back into the Step 1 queue.
pub fn release_hold(project: &Project) -> Result<Project> {
    check_action(project.status, Action::ReleaseHold)?;
    Ok(project
        .clone()
        .with_status(ProjectStatus::PendingReview)
        .next_revision())
}

/// Step 2: record a complete scoresheet and classify the total.
///
/// Passing totals move to `SCORED` tagged `GAA_INCLUDED`; the rest to
/// `REJECTED` tagged `NOT_INCLUDED`.
pub fn score_project(project: &Project, payload: &ScorePayload) -> Result<Project> {
    check_action(project.status, Action::Score)?;
    check_scoresheet(payload)?;

    let total = score_total(&payload.scores);
    let outcome = classify(total);
    let data = ScoreData {
        scores: payload.scores.clone(),
        subtotals: category_subtotals(&payload.scores),
        total,
        passed: outcome == ScoreOutcome::Pass,
        remarks: trimmed(payload.remarks.as_ref()),
        scorer: trimmed(payload.scorer.as_ref()),
        scored_at: now(),
    };

    let (status, tag) = match outcome {
        ScoreOutcome::Pass => (ProjectStatus::Scored, BudgetTag::GaaIncluded),
        ScoreOutcome::Fail => (ProjectStatus::Rejected, BudgetTag::NotIncluded),
    };
    Ok(project
        .clone()
        .with_stage_record(StageRecord::Step2(data))
        .with_gaa_status(tag)
        .with_status(status)
        .next_revision())
}

/// Move a scored project into the NEP or GAA.
///
/// NEP inclusion is only possible from `SCORED`; GAA from `SCORED` or `NEP_INCLUDED`.
pub fn include_in_budget(project: &Project, target: BudgetTarget) -> Result<Project> {
    check_action(project.status, Action::IncludeInBudget)?;
    let (status, tag) = match (target, project.status) {
        (BudgetTarget::Nep, ProjectStatus::Scored) => {
            (ProjectStatus::NepIncluded, BudgetTag::NepIncluded)
        }
        (BudgetTarget::Gaa, _) => (ProjectStatus::GaaIncluded, BudgetTag::GaaIncluded),
        (BudgetTarget::Nep, from) => {
            return Err(FmrError::illegal(from, "include in NEP"));
        }
    };
    Ok(project
        .clone()
        .with_gaa_status(tag)
        .with_status(status)
        .next_revision())
}

/// Step 3 upload: attach the engineering documents and queue for BAFE review.
///
/// Documents already on the project count toward the required set.
pub fn submit_step3(project: &Project, documents: &BTreeMap<String, Attachment>) -> Result<Project> {
    check_action(project.status, Action::SubmitStep3)?;
    let mut merged = project.attachments.clone();
    merged.extend(documents.clone());
    let missing = missing_documents(&merged, STEP3_DOCUMENTS);
    if !missing.is_empty() {
        return Err(FmrError::Validation {
            missing_fields: missing,
        });
    }
    Ok(project
        .clone()
        .with_attachments(documents.clone())
        .with_status(ProjectStatus::Step3Pending)
        .next_revision())
}

/// Step 3 review: approve, return or escalate.
///
/// Approval sets `validated_abc`, the ceiling for the Step 4 award.
pub fn validate_step3(project: &Project, payload: &Step3Payload) -> Result<Project> {
    check_action(project.status, Action::ValidateStep3)?;
    let decision = check_step3(payload)?;
    let reviewed_at = now();
    let remarks = trimmed(payload.remarks.as_ref());

    let data = Step3Data {
        decision,
        answers: payload.answers.clone(),
        validated_abc: match decision {
            Step3Decision::Approve => payload.validated_abc,
            _ => None,
        },
        remarks: remarks.clone(),
        reviewer: trimmed(payload.reviewer.as_ref()),
        reviewed_at: reviewed_at.clone(),
    };

    let next = project.clone().with_stage_record(StageRecord::Step3(data));
    let next = match (decision, payload.validated_abc) {
        (Step3Decision::Approve, Some(abc)) => next
            .with_validated_abc(abc)
            .with_status(ProjectStatus::Step4Bidding),
        (Step3Decision::Approve, None) => return Err(FmrError::missing(["validated_abc"])),
        (Step3Decision::Return, _) => next
            .with_status(ProjectStatus::ReturnedStep3)
            .with_return_info(Some(ReturnInfo {
                stage: Stage::Engineering,
                remarks,
                returned_at: reviewed_at,
            })),
        (Step3Decision::Escalate, _) => next.with_status(ProjectStatus::Step3Escalated),
    };
    Ok(next.next_revision())
}

/// Send an escalated project back to the Step 3 review queue.
pub fn resolve_escalation(project: &Project) -> Result<Project> {
    check_action(project.status, Action::ResolveEscalation)?;
    Ok(project
        .clone()
        .with_status(ProjectStatus::Step3Pending)
        .next_revision())
}

/// RO edit after a Step 3 return; goes back to `GAA_INCLUDED`.
///
/// Only the patched details, status and return marker change.
pub fn resubmit_step3(project: &Project, patch: &DetailsPatch) -> Result<Project> {
    check_action(project.status, Action::ResubmitStep3)?;
    if patch.is_empty() {
        return Err(FmrError::missing(["details"]));
    }
    let details = check_patch(&project.details, patch, &project.attachments)?;
    Ok(project
        .clone()
        .with_details(details)
        .with_return_info(None)
        .with_status(ProjectStatus::GaaIncluded)
        .next_revision())
}

/// Step 4: award the contract and start implementation.
pub fn award_contract(
    project: &Project,
    payload: &AwardPayload,
    notice: Option<&Attachment>,
) -> Result<Project> {
    check_action(project.status, Action::Award)?;
    let (contractor, bid_amount) = check_award(payload, notice, project.validated_abc)?;
    let notice = match notice {
        Some(notice) => notice.clone(),
        None => return Err(FmrError::missing(["attachments.notice_of_award"])),
    };

    let mut attachments = BTreeMap::new();
    attachments.insert(NOTICE_OF_AWARD.to_string(), notice.clone());

    let data = Step4Data {
        contractor: Contractor { name: contractor },
        bid_amount,
        notice_of_award: notice,
        awarded_at: now(),
    };
    Ok(project
        .clone()
        .with_stage_record(StageRecord::Step4(data))
        .with_attachments(attachments)
        .with_status(ProjectStatus::Implementation)
        .next_revision())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::rules::{step3_items, CRITERIA, ELIGIBILITY_CHECKLIST};
    use crate::schemas::project::fixtures::sample_project;
    use crate::schemas::Answer;

    pub fn project_in(status: ProjectStatus) -> Project {
        sample_project().with_status(status)
    }

    pub fn clear_payload() -> Step1Payload {
        Step1Payload {
            decision: Some(Step1Decision::Clear),
            checklist: ELIGIBILITY_CHECKLIST
                .iter()
                .map(|i| (i.id.to_string(), true))
                .collect(),
            masterplan_verified: true,
            remarks: None,
            validator: Some("R. Santos".to_string()),
        }
    }

    /// A complete scoresheet totalling exactly `total` (0..=100)
    pub fn scores_totalling(total: u32) -> ScorePayload {
        let mut remaining = total;
        let scores = CRITERIA
            .iter()
            .map(|c| {
                let points = remaining.min(c.max_points);
                remaining -= points;
                (c.id.to_string(), points)
            })
            .collect();
        ScorePayload {
            scores,
            remarks: None,
            scorer: None,
        }
    }

    pub fn step3_documents() -> BTreeMap<String, Attachment> {
        STEP3_DOCUMENTS
            .iter()
            .map(|k| {
                (
                    k.to_string(),
                    Attachment::new(format!("{}.pdf", k), format!("file:///{}.pdf", k)),
                )
            })
            .collect()
    }

    pub fn approve_payload(abc: f64) -> Step3Payload {
        Step3Payload {
            decision: Some(Step3Decision::Approve),
            answers: step3_items()
                .iter()
                .map(|i| (i.id.to_string(), Answer::from(!i.red_flag)))
                .collect(),
            validated_abc: Some(abc),
            remarks: None,
            reviewer: Some("Engr. Cruz".to_string()),
        }
    }

    pub fn notice() -> Attachment {
        Attachment::new("notice_of_award.pdf", "file:///notice_of_award.pdf")
    }
}
