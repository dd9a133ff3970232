//! Document keys required by file-bearing transitions

/// Attachments every new proposal must carry
pub const INTAKE_DOCUMENTS: &[&str] = &["locationMap", "sitePhotos", "lguEndorsement", "costEstimate"];

/// Additional intake attachment when the road is flagged for resilience
pub const HAZARD_ASSESSMENT: &str = "hazardAssessment";

/// Documents uploaded for Step 3 review
pub const STEP3_DOCUMENTS: &[&str] = &["detailed_engineering", "qto", "technical_specs", "abc"];

/// Attachment key of the notice of award
pub const NOTICE_OF_AWARD: &str = "notice_of_award";

/// Intake attachment keys for a proposal
pub fn required_intake_documents(resilience_flagged: bool) -> Vec<&'static str> {
    let mut keys = INTAKE_DOCUMENTS.to_vec();
    if resilience_flagged {
        keys.push(HAZARD_ASSESSMENT);
    }
    keys
}
