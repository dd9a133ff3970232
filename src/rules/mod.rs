//! Validation rule sets
//!
//! Immutable configuration tables consulted by the decision evaluator:
//! - Step 1 eligibility checklist
//! - Step 2 scoring criteria and category maxima
//! - Step 3 engineering checklist taxonomy, including red-flag groups
//! - Required document keys for intake and Step 3

mod documents;
mod eligibility;
mod engineering;
mod scoring;

pub use documents::{
    required_intake_documents, HAZARD_ASSESSMENT, INTAKE_DOCUMENTS, NOTICE_OF_AWARD,
    STEP3_DOCUMENTS,
};
pub use eligibility::ELIGIBILITY_CHECKLIST;
pub use engineering::{step3_items, ChecklistGroup, DocumentCategory, ENGINEERING_CHECKLIST};
pub use scoring::{criterion, Category, Criterion, CATEGORIES, CRITERIA, MAX_TOTAL, PASSING_SCORE};

/// A single checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Stable key used in answer maps
    pub id: &'static str,

    /// Question shown to the reviewer
    pub label: &'static str,

    /// Inverted pass rule: the item passes only when answered "No"
    pub red_flag: bool,
}
