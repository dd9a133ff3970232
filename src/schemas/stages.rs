//! Stage sub-records - one explicit type per pipeline stage

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::project::Attachment;

/// Pipeline stage used for progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Step 1 - intake and eligibility
    Eligibility = 1,
    /// Step 2 - scoring
    Scoring = 2,
    /// Step 3 - detailed engineering validation
    Engineering = 3,
    /// Step 4 - procurement and bidding
    Procurement = 4,
}

impl Stage {
    /// The 1-based stage number
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {}", self.number())
    }
}

/// Validator decision at Step 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step1Decision {
    Clear,
    Return,
    Hold,
}

/// BAFE decision at Step 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step3Decision {
    Approve,
    Return,
    Escalate,
}

/// A Yes/No checklist answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

impl Answer {
    /// True for `Yes`
    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

/// Step 1 record written by the validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorData {
    pub decision: Step1Decision,

    /// Eligibility checklist, keyed by item id
    pub checklist: BTreeMap<String, bool>,

    pub masterplan_verified: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,

    /// ISO 8601 decision timestamp
    pub decided_at: String,
}

/// Step 2 record written by the scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreData {
    /// Points per criterion id
    pub scores: BTreeMap<String, u32>,

    /// Points per category letter, computed from the criteria table
    pub subtotals: BTreeMap<String, u32>,

    pub total: u32,

    pub passed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scorer: Option<String>,

    /// ISO 8601 scoring timestamp
    pub scored_at: String,
}

/// Step 3 record written by the BAFE reviewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step3Data {
    pub decision: Step3Decision,

    /// Checklist answers keyed by item id
    pub answers: BTreeMap<String, Answer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated_abc: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,

    /// ISO 8601 review timestamp
    pub reviewed_at: String,
}

/// Winning contractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
    pub name: String,
}

/// Step 4 record written on award
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step4Data {
    pub contractor: Contractor,

    pub bid_amount: f64,

    pub notice_of_award: Attachment,

    /// ISO 8601 award timestamp
    pub awarded_at: String,
}

/// Sub-record produced by a stage decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageRecord {
    Step1(ValidatorData),
    Step2(ScoreData),
    Step3(Step3Data),
    Step4(Step4Data),
}

impl StageRecord {
    /// Stage that owns this record
    pub fn stage(&self) -> Stage {
        match self {
            StageRecord::Step1(_) => Stage::Eligibility,
            StageRecord::Step2(_) => Stage::Scoring,
            StageRecord::Step3(_) => Stage::Engineering,
            StageRecord::Step4(_) => Stage::Procurement,
        }
    }
}

/// Marker left on a project returned for edits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnInfo {
    pub stage: Stage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    /// ISO 8601 timestamp of the return
    pub returned_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_numbers_are_ordered() {
        assert_eq!(Stage::Eligibility.number(), 1);
        assert_eq!(Stage::Procurement.number(), 4);
        assert!(Stage::Scoring < Stage::Engineering);
        assert_eq!(Stage::Engineering.to_string(), "Step 3");
    }

    #[test]
    fn test_answer_from_bool() {
        assert_eq!(Answer::from(true), Answer::Yes);
        assert_eq!(Answer::from(false), Answer::No);
        assert_eq!(serde_json::to_string(&Answer::Yes).unwrap(), "\"Yes\"");
    }

    #[test]
    fn test_decision_serialization() {
        assert_eq!(serde_json::to_string(&Step1Decision::Clear).unwrap(), "\"clear\"");
        assert_eq!(
            serde_json::from_str::<Step3Decision>("\"escalate\"").unwrap(),
            Step3Decision::Escalate
        );
    }

    #[test]
    fn test_stage_record_is_tagged() {
        let record = StageRecord::Step4(Step4Data {
            contractor: Contractor {
                name: "Acme Builders".to_string(),
            },
            bid_amount: 100.0,
            notice_of_award: Attachment::new("noa.pdf", "file:///noa.pdf"),
            awarded_at: "2026-01-01T00:00:00+00:00".to_string(),
        });
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["stage"], "step4");
        assert_eq!(value["contractor"]["name"], "Acme Builders");
        assert_eq!(record.stage(), Stage::Procurement);
    }
}
