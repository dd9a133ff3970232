//! Project status - the single field that drives which actions are legal

use serde::{Deserialize, Serialize};

/// Lifecycle status of a project proposal
///
/// Serialized labels keep the casing callers already store. Legacy spellings
/// (`GAA-INCLUDED`, `NEP-INCLUDED`, bare `RETURNED`) are accepted on input and
/// normalized on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Submitted by the RO, awaiting Step 1 review
    #[serde(rename = "PENDING_REVIEW")]
    PendingReview,
    /// Returned to the RO at Step 1 for edits
    #[serde(rename = "RETURNED_STEP1", alias = "RETURNED")]
    ReturnedStep1,
    /// Passed Step 1 eligibility
    #[serde(rename = "CLEARED")]
    Cleared,
    /// Parked by the validator at Step 1
    #[serde(rename = "ON_HOLD")]
    OnHold,
    /// Queued for Step 2 scoring
    #[serde(rename = "FOR_SCORING")]
    ForScoring,
    /// Scored at or above the passing mark
    #[serde(rename = "SCORED")]
    Scored,
    /// Scored below the passing mark
    #[serde(rename = "REJECTED")]
    Rejected,
    /// Included in the National Expenditure Program
    #[serde(rename = "NEP_INCLUDED", alias = "NEP-INCLUDED")]
    NepIncluded,
    /// Included in the General Appropriations Act
    #[serde(rename = "GAA_INCLUDED", alias = "GAA-INCLUDED")]
    GaaIncluded,
    /// Step 3 documents uploaded, awaiting BAFE review
    #[serde(rename = "step3_pending", alias = "STEP3_PENDING")]
    Step3Pending,
    /// Escalated by BAFE during Step 3 review
    #[serde(rename = "step3_escalated", alias = "STEP3_ESCALATED")]
    Step3Escalated,
    /// Returned by BAFE at Step 3 for edits
    #[serde(rename = "RETURNED_STEP3")]
    ReturnedStep3,
    /// Approved engineering, open for procurement
    #[serde(rename = "step4_bidding", alias = "STEP4_BIDDING")]
    Step4Bidding,
    /// Procurement notice posted
    #[serde(rename = "STEP4_POSTED")]
    Step4Posted,
    /// Bids under evaluation
    #[serde(rename = "STEP4_EVALUATION")]
    Step4Evaluation,
    /// Contract awarded
    #[serde(rename = "AWARDED")]
    Awarded,
    /// Contract awarded and under implementation
    #[serde(rename = "IMPLEMENTATION")]
    Implementation,
}

impl ProjectStatus {
    /// Every status, in pipeline order
    pub const ALL: &'static [ProjectStatus] = &[
        ProjectStatus::PendingReview,
        ProjectStatus::ReturnedStep1,
        ProjectStatus::Cleared,
        ProjectStatus::OnHold,
        ProjectStatus::ForScoring,
        ProjectStatus::Scored,
        ProjectStatus::Rejected,
        ProjectStatus::NepIncluded,
        ProjectStatus::GaaIncluded,
        ProjectStatus::Step3Pending,
        ProjectStatus::Step3Escalated,
        ProjectStatus::ReturnedStep3,
        ProjectStatus::Step4Bidding,
        ProjectStatus::Step4Posted,
        ProjectStatus::Step4Evaluation,
        ProjectStatus::Awarded,
        ProjectStatus::Implementation,
    ];

    /// Canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::PendingReview => "PENDING_REVIEW",
            ProjectStatus::ReturnedStep1 => "RETURNED_STEP1",
            ProjectStatus::Cleared => "CLEARED",
            ProjectStatus::OnHold => "ON_HOLD",
            ProjectStatus::ForScoring => "FOR_SCORING",
            ProjectStatus::Scored => "SCORED",
            ProjectStatus::Rejected => "REJECTED",
            ProjectStatus::NepIncluded => "NEP_INCLUDED",
            ProjectStatus::GaaIncluded => "GAA_INCLUDED",
            ProjectStatus::Step3Pending => "step3_pending",
            ProjectStatus::Step3Escalated => "step3_escalated",
            ProjectStatus::ReturnedStep3 => "RETURNED_STEP3",
            ProjectStatus::Step4Bidding => "step4_bidding",
            ProjectStatus::Step4Posted => "STEP4_POSTED",
            ProjectStatus::Step4Evaluation => "STEP4_EVALUATION",
            ProjectStatus::Awarded => "AWARDED",
            ProjectStatus::Implementation => "IMPLEMENTATION",
        }
    }

    /// Whether the status is a return-for-edits state
    pub fn is_returned(&self) -> bool {
        matches!(self, ProjectStatus::ReturnedStep1 | ProjectStatus::ReturnedStep3)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(status) = ProjectStatus::ALL.iter().find(|st| st.as_str() == s) {
            return Ok(*status);
        }
        match s {
            "RETURNED" => Ok(ProjectStatus::ReturnedStep1),
            "NEP-INCLUDED" => Ok(ProjectStatus::NepIncluded),
            "GAA-INCLUDED" => Ok(ProjectStatus::GaaIncluded),
            "STEP3_PENDING" => Ok(ProjectStatus::Step3Pending),
            "STEP3_ESCALATED" => Ok(ProjectStatus::Step3Escalated),
            "STEP4_BIDDING" => Ok(ProjectStatus::Step4Bidding),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

/// Budget-inclusion tag carried in `gaa_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetTag {
    #[serde(rename = "NEP_INCLUDED", alias = "NEP-INCLUDED")]
    NepIncluded,
    #[serde(rename = "GAA_INCLUDED", alias = "GAA-INCLUDED")]
    GaaIncluded,
    #[serde(rename = "NOT_INCLUDED")]
    NotIncluded,
}

impl std::fmt::Display for BudgetTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetTag::NepIncluded => write!(f, "NEP_INCLUDED"),
            BudgetTag::GaaIncluded => write!(f, "GAA_INCLUDED"),
            BudgetTag::NotIncluded => write!(f, "NOT_INCLUDED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization_uses_canonical_labels() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::PendingReview).unwrap(),
            "\"PENDING_REVIEW\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectStatus::GaaIncluded).unwrap(),
            "\"GAA_INCLUDED\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectStatus::Step4Bidding).unwrap(),
            "\"step4_bidding\""
        );
    }

    #[test]
    fn test_status_accepts_legacy_spellings() {
        assert_eq!(
            serde_json::from_str::<ProjectStatus>("\"GAA-INCLUDED\"").unwrap(),
            ProjectStatus::GaaIncluded
        );
        assert_eq!(
            serde_json::from_str::<ProjectStatus>("\"NEP-INCLUDED\"").unwrap(),
            ProjectStatus::NepIncluded
        );
        assert_eq!(
            serde_json::from_str::<ProjectStatus>("\"RETURNED\"").unwrap(),
            ProjectStatus::ReturnedStep1
        );
        assert_eq!(
            "GAA-INCLUDED".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::GaaIncluded
        );
    }

    #[test]
    fn test_from_str_matches_display() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.to_string().parse::<ProjectStatus>().unwrap(), *status);
        }
        assert!("AWARDED_LATER".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn test_returned() {
        assert!(ProjectStatus::ReturnedStep1.is_returned());
        assert!(ProjectStatus::ReturnedStep3.is_returned());
        assert!(!ProjectStatus::OnHold.is_returned());
    }

    #[test]
    fn test_budget_tag_serialization() {
        assert_eq!(
            serde_json::to_string(&BudgetTag::GaaIncluded).unwrap(),
            "\"GAA_INCLUDED\""
        );
        assert_eq!(
            serde_json::from_str::<BudgetTag>("\"GAA-INCLUDED\"").unwrap(),
            BudgetTag::GaaIncluded
        );
    }
}
