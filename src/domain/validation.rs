//! Validation rules for workflow actions
//!
//! Each check collects every missing or invalid field before failing so the
//! caller can highlight all of them at once.

use std::collections::BTreeMap;

use crate::errors::{FmrError, Result};
use crate::rules::{required_intake_documents, step3_items, ELIGIBILITY_CHECKLIST};
use crate::schemas::{
    Attachment, AwardPayload, Beneficiaries, DetailsPatch, GeoPoint, Location, ProjectDetails,
    ProjectStatus, ProposalInput, ScorePayload, Step1Decision, Step1Payload, Step3Decision,
    Step3Payload,
};

use super::evaluator::{answers_from_ticks, checklist_report, missing_criteria, score_violations};
use super::states::Action;

/// Fail with `IllegalTransition` unless `action` may be taken from `status`.
pub fn check_action(status: ProjectStatus, action: Action) -> Result<()> {
    if action.permits(status) {
        Ok(())
    } else {
        Err(FmrError::illegal(status, action.as_str()))
    }
}

/// Attachment keys from `required` that are absent, as `attachments.<key>`.
pub fn missing_documents(attachments: &BTreeMap<String, Attachment>, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|key| !attachments.contains_key(**key))
        .map(|key| format!("attachments.{}", key))
        .collect()
}

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn location_gaps(location: &Location) -> Vec<String> {
    [
        ("region_code", &location.region_code),
        ("province_code", &location.province_code),
        ("municipality_code", &location.municipality_code),
        ("barangay_code", &location.barangay_code),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| format!("location.{}", name))
    .collect()
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn finite_point(point: Option<GeoPoint>) -> Option<GeoPoint> {
    point.filter(|p| p.lat.is_finite() && p.lng.is_finite())
}

/// Validate an intake form and its attachments, producing the project details.
///
/// Numeric measures must be positive; a flagged resilience classification
/// requires the hazard assessment attachment.
pub fn check_proposal(
    input: &ProposalInput,
    attachments: &BTreeMap<String, Attachment>,
) -> Result<ProjectDetails> {
    let mut missing = Vec::new();

    if is_blank(input.name.as_ref()) {
        missing.push("name".to_string());
    }
    match &input.location {
        None => missing.push("location".to_string()),
        Some(location) => missing.extend(location_gaps(location)),
    }
    if finite_point(input.gps_start).is_none() {
        missing.push("gps_start".to_string());
    }
    if finite_point(input.gps_end).is_none() {
        missing.push("gps_end".to_string());
    }
    if positive(input.road_length_km).is_none() {
        missing.push("road_length_km".to_string());
    }
    if positive(input.road_width_m).is_none() {
        missing.push("road_width_m".to_string());
    }
    if input.surface_type.is_none() {
        missing.push("surface_type".to_string());
    }
    if positive(input.indicative_cost).is_none() {
        missing.push("indicative_cost".to_string());
    }
    if input.commodities.iter().all(|c| c.trim().is_empty()) {
        missing.push("commodities".to_string());
    }
    if input.beneficiaries.map_or(true, |b| b == Beneficiaries::default()) {
        missing.push("beneficiaries".to_string());
    }
    if is_blank(input.connectivity.as_ref()) {
        missing.push("connectivity".to_string());
    }
    let required = required_intake_documents(input.resilience.flagged);
    missing.extend(missing_documents(attachments, &required));

    match (
        &input.name,
        &input.location,
        input.gps_start,
        input.gps_end,
        input.road_length_km,
        input.road_width_m,
        input.surface_type,
        input.indicative_cost,
        input.beneficiaries,
        &input.connectivity,
    ) {
        (
            Some(name),
            Some(location),
            Some(gps_start),
            Some(gps_end),
            Some(road_length_km),
            Some(road_width_m),
            Some(surface_type),
            Some(indicative_cost),
            Some(beneficiaries),
            Some(connectivity),
        ) if missing.is_empty() => Ok(ProjectDetails {
            name: name.trim().to_string(),
            location: location.clone(),
            gps_start,
            gps_end,
            road_length_km,
            road_width_m,
            surface_type,
            indicative_cost,
            commodities: input
                .commodities
                .iter()
                .filter(|c| !c.trim().is_empty())
                .cloned()
                .collect(),
            beneficiaries,
            connectivity: connectivity.clone(),
            resilience: input.resilience.clone(),
            gida: input.gida,
        }),
        _ => Err(FmrError::Validation {
            missing_fields: missing,
        }),
    }
}

/// Validate an edit to existing details, producing the merged details.
///
/// The merged record is held to the intake rules, so an edit cannot blank a
/// required field or flag the road for resilience without the hazard
/// assessment among `attachments`.
pub fn check_patch(
    details: &ProjectDetails,
    patch: &DetailsPatch,
    attachments: &BTreeMap<String, Attachment>,
) -> Result<ProjectDetails> {
    let merged = details.clone().patched(patch);
    let input = ProposalInput {
        name: Some(merged.name),
        location: Some(merged.location),
        gps_start: Some(merged.gps_start),
        gps_end: Some(merged.gps_end),
        road_length_km: Some(merged.road_length_km),
        road_width_m: Some(merged.road_width_m),
        surface_type: Some(merged.surface_type),
        indicative_cost: Some(merged.indicative_cost),
        commodities: merged.commodities,
        beneficiaries: Some(merged.beneficiaries),
        connectivity: Some(merged.connectivity),
        resilience: merged.resilience,
        gida: merged.gida,
    };
    check_proposal(&input, attachments)
}

/// Validate a Step 1 decision.
///
/// Clearing requires every eligibility item ticked and the masterplan verified;
/// each unticked item is reported as `checklist.<id>`.
pub fn check_step1(payload: &Step1Payload) -> Result<Step1Decision> {
    let decision = payload
        .decision
        .ok_or_else(|| FmrError::missing(["decision"]))?;

    if decision == Step1Decision::Clear {
        let report = checklist_report(ELIGIBILITY_CHECKLIST, &answers_from_ticks(&payload.checklist));
        let mut missing: Vec<String> = report
            .unanswered
            .into_iter()
            .chain(report.failed_standard)
            .map(|id| format!("checklist.{}", id))
            .collect();
        if !payload.masterplan_verified {
            missing.push("masterplan_verified".to_string());
        }
        if !missing.is_empty() {
            return Err(FmrError::Validation {
                missing_fields: missing,
            });
        }
    }
    Ok(decision)
}

/// Validate a Step 2 scoresheet: every criterion entered, each within its range.
pub fn check_scoresheet(payload: &ScorePayload) -> Result<()> {
    let missing: Vec<String> = missing_criteria(&payload.scores)
        .into_iter()
        .map(|id| format!("scores.{}", id))
        .collect();
    if !missing.is_empty() {
        return Err(FmrError::Validation {
            missing_fields: missing,
        });
    }
    if let Some((criterion, points, max)) = score_violations(&payload.scores).into_iter().next() {
        return Err(FmrError::InvalidScore {
            criterion,
            points,
            max,
        });
    }
    Ok(())
}

/// Require non-empty remarks
pub fn check_remarks(remarks: Option<&String>) -> Result<String> {
    match remarks {
        Some(r) if !r.trim().is_empty() => Ok(r.trim().to_string()),
        _ => Err(FmrError::missing(["remarks"])),
    }
}

/// Validate a Step 3 review.
///
/// Approval requires no red flag raised, then every checklist item answered
/// and a positive validated ABC (reported together), then every standard item
/// answered "Yes". Return and escalate need remarks.
pub fn check_step3(payload: &Step3Payload) -> Result<Step3Decision> {
    let decision = payload
        .decision
        .ok_or_else(|| FmrError::missing(["decision"]))?;

    match decision {
        Step3Decision::Approve => {
            let report = checklist_report(&step3_items(), &payload.answers);
            if !report.raised_red_flags.is_empty() {
                return Err(FmrError::RedFlag {
                    items: report.raised_red_flags,
                });
            }
            let mut missing: Vec<String> = report
                .unanswered
                .iter()
                .map(|id| format!("answers.{}", id))
                .collect();
            if positive(payload.validated_abc).is_none() {
                missing.push("validated_abc".to_string());
            }
            if !missing.is_empty() {
                return Err(FmrError::Validation {
                    missing_fields: missing,
                });
            }
            if !report.failed_standard.is_empty() {
                return Err(FmrError::ChecklistFailed {
                    items: report.failed_standard,
                });
            }
        }
        Step3Decision::Return | Step3Decision::Escalate => {
            check_remarks(payload.remarks.as_ref())?;
        }
    }
    Ok(decision)
}

/// Validate an award against the budget ceiling, returning `(contractor, bid)`.
///
/// A bid equal to the ceiling is accepted; anything above it is rejected.
pub fn check_award(
    payload: &AwardPayload,
    notice: Option<&Attachment>,
    ceiling: Option<f64>,
) -> Result<(String, f64)> {
    let mut missing = Vec::new();
    if is_blank(payload.contractor_name.as_ref()) {
        missing.push("contractor_name".to_string());
    }
    let bid = positive(payload.bid_amount);
    if bid.is_none() {
        missing.push("bid_amount".to_string());
    }
    if notice.is_none() {
        missing.push("attachments.notice_of_award".to_string());
    }
    let ceiling = ceiling.filter(|c| c.is_finite() && *c >= 0.0);
    if ceiling.is_none() {
        missing.push("validated_abc".to_string());
    }

    match (&payload.contractor_name, bid, ceiling) {
        (Some(name), Some(bid), Some(ceiling)) if missing.is_empty() => {
            if bid > ceiling {
                return Err(FmrError::BidExceedsCeiling { bid, ceiling });
            }
            Ok((name.trim().to_string(), bid))
        }
        _ => Err(FmrError::Validation {
            missing_fields: missing,
        }),
    }
}
