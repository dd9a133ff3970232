//! Schema types for the FMR pipeline
//!
//! Field names follow the JSON documents already stored by the intake front-end.

mod config;
mod index;
mod payloads;
pub(crate) mod project;
mod stages;
mod status;

pub use config::Config;
pub use index::{Index, IndexItem};
pub use payloads::{
    AwardPayload, BudgetTarget, ProposalInput, ScorePayload, Step1Payload, Step3Payload,
};
pub use project::{
    Attachment, Beneficiaries, DetailsPatch, GeoPoint, Location, Project, ProjectDetails,
    Resilience, SurfaceType,
};
pub use stages::{
    Answer, Contractor, ReturnInfo, ScoreData, Stage, StageRecord, Step1Decision, Step3Data,
    Step3Decision, Step4Data, ValidatorData,
};
pub use status::{BudgetTag, ProjectStatus};
