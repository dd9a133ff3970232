//! Action payloads - what the caller supplies for each workflow action
//!
//! Required inputs are modelled as `Option` so that validation can report
//! every absent field at once instead of failing on the first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::project::{Beneficiaries, GeoPoint, Location, Resilience, SurfaceType};
use super::stages::{Answer, Step1Decision, Step3Decision};

/// Intake form submitted by the Regional Office
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalInput {
    pub name: Option<String>,
    pub location: Option<Location>,
    pub gps_start: Option<GeoPoint>,
    pub gps_end: Option<GeoPoint>,
    pub road_length_km: Option<f64>,
    pub road_width_m: Option<f64>,
    pub surface_type: Option<SurfaceType>,
    pub indicative_cost: Option<f64>,
    pub commodities: Vec<String>,
    pub beneficiaries: Option<Beneficiaries>,
    pub connectivity: Option<String>,
    pub resilience: Resilience,
    pub gida: bool,
}

/// Step 1 validator decision
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Step1Payload {
    pub decision: Option<Step1Decision>,
    pub checklist: BTreeMap<String, bool>,
    pub masterplan_verified: bool,
    pub remarks: Option<String>,
    pub validator: Option<String>,
}

/// Step 2 scoresheet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorePayload {
    pub scores: BTreeMap<String, u32>,
    pub remarks: Option<String>,
    pub scorer: Option<String>,
}

/// Step 3 BAFE review
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Step3Payload {
    pub decision: Option<Step3Decision>,
    pub answers: BTreeMap<String, Answer>,
    pub validated_abc: Option<f64>,
    pub remarks: Option<String>,
    pub reviewer: Option<String>,
}

/// Step 4 award
///
/// The notice-of-award file travels separately as a pending upload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardPayload {
    pub contractor_name: Option<String>,
    pub bid_amount: Option<f64>,
}

/// Which budget a scored project is moved into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTarget {
    Nep,
    Gaa,
}

impl std::str::FromStr for BudgetTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nep" => Ok(BudgetTarget::Nep),
            "gaa" => Ok(BudgetTarget::Gaa),
            _ => Err(format!("Unknown budget target: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_proposal_json() {
        let json = r#"{"name": "Road", "road_length_km": 2.5}"#;
        let parsed: ProposalInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Road"));
        assert_eq!(parsed.road_length_km, Some(2.5));
        assert!(parsed.location.is_none());
        assert!(!parsed.resilience.flagged);
    }

    #[test]
    fn test_step3_payload_answers() {
        let json = r#"{"decision": "approve", "answers": {"DED-A1": "Yes", "DED-C1": "No"}, "validated_abc": 100.5}"#;
        let parsed: Step3Payload = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.decision, Some(Step3Decision::Approve));
        assert_eq!(parsed.answers["DED-C1"], Answer::No);
        assert_eq!(parsed.validated_abc, Some(100.5));
    }

    #[test]
    fn test_budget_target_parse() {
        assert_eq!("NEP".parse::<BudgetTarget>().unwrap(), BudgetTarget::Nep);
        assert_eq!("gaa".parse::<BudgetTarget>().unwrap(), BudgetTarget::Gaa);
        assert!("x".parse::<BudgetTarget>().is_err());
    }
}
