//! Project schema - the central workflow record

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::stages::{ReturnInfo, ScoreData, StageRecord, Step3Data, Step4Data, ValidatorData};
use super::status::{BudgetTag, ProjectStatus};

/// A stored file reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Attachment {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Administrative location of the road
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub region_code: String,
    pub region_name: String,
    pub province_code: String,
    pub province_name: String,
    pub municipality_code: String,
    pub municipality_name: String,
    pub barangay_code: String,
    pub barangay_name: String,
}

/// A GPS coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Road surface type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    Earth,
    Gravel,
    Asphalt,
    Concrete,
}

/// Beneficiary counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Beneficiaries {
    pub farmers: u32,
    pub households: u32,
}

/// Climate resilience classification
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resilience {
    /// Whether the road lies in a hazard-prone area
    pub flagged: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
}

/// Descriptive fields captured at intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub name: String,
    pub location: Location,
    pub gps_start: GeoPoint,
    pub gps_end: GeoPoint,
    pub road_length_km: f64,
    pub road_width_m: f64,
    pub surface_type: SurfaceType,
    /// Indicative cost in pesos
    pub indicative_cost: f64,
    pub commodities: Vec<String>,
    pub beneficiaries: Beneficiaries,
    pub connectivity: String,
    pub resilience: Resilience,
    /// Geographically Isolated and Disadvantaged Area
    #[serde(default)]
    pub gida: bool,
}

/// Field-wise edit applied on resubmission; `None` keeps the current value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailsPatch {
    pub name: Option<String>,
    pub location: Option<Location>,
    pub gps_start: Option<GeoPoint>,
    pub gps_end: Option<GeoPoint>,
    pub road_length_km: Option<f64>,
    pub road_width_m: Option<f64>,
    pub surface_type: Option<SurfaceType>,
    pub indicative_cost: Option<f64>,
    pub commodities: Option<Vec<String>>,
    pub beneficiaries: Option<Beneficiaries>,
    pub connectivity: Option<String>,
    pub resilience: Option<Resilience>,
    pub gida: Option<bool>,
}

impl DetailsPatch {
    /// True when no field is edited
    pub fn is_empty(&self) -> bool {
        *self == DetailsPatch::default()
    }
}

impl ProjectDetails {
    /// Return new details with every `Some` field of the patch applied
    pub fn patched(mut self, patch: &DetailsPatch) -> Self {
        if let Some(v) = &patch.name {
            self.name = v.clone();
        }
        if let Some(v) = &patch.location {
            self.location = v.clone();
        }
        if let Some(v) = patch.gps_start {
            self.gps_start = v;
        }
        if let Some(v) = patch.gps_end {
            self.gps_end = v;
        }
        if let Some(v) = patch.road_length_km {
            self.road_length_km = v;
        }
        if let Some(v) = patch.road_width_m {
            self.road_width_m = v;
        }
        if let Some(v) = patch.surface_type {
            self.surface_type = v;
        }
        if let Some(v) = patch.indicative_cost {
            self.indicative_cost = v;
        }
        if let Some(v) = &patch.commodities {
            self.commodities = v.clone();
        }
        if let Some(v) = patch.beneficiaries {
            self.beneficiaries = v;
        }
        if let Some(v) = &patch.connectivity {
            self.connectivity = v.clone();
        }
        if let Some(v) = &patch.resilience {
            self.resilience = v.clone();
        }
        if let Some(v) = patch.gida {
            self.gida = v;
        }
        self
    }
}

/// A farm-to-market road project proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// `FMR-YYYY-NNNN`, immutable after creation
    pub id: String,

    #[serde(flatten)]
    pub details: ProjectDetails,

    pub status: ProjectStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaa_status: Option<BudgetTag>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator_data: Option<ValidatorData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_data: Option<ScoreData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step3_data: Option<Step3Data>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step4_data: Option<Step4Data>,

    /// Budget ceiling for Step 4, set by Step 3 approval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated_abc: Option<f64>,

    /// Uploaded documents keyed by document key
    #[serde(default)]
    pub attachments: BTreeMap<String, Attachment>,

    /// Present while the project sits in a returned state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_info: Option<ReturnInfo>,

    /// Revision counter used for compare-and-swap writes
    #[serde(default)]
    pub version: u64,

    /// ISO 8601 creation timestamp
    pub created_at: String,

    /// ISO 8601 last update timestamp
    pub last_updated: String,
}

impl Project {
    /// Create a freshly submitted project
    pub fn new(
        id: String,
        details: ProjectDetails,
        attachments: BTreeMap<String, Attachment>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Project {
            schema_version: 1,
            id,
            details,
            status: ProjectStatus::PendingReview,
            gaa_status: None,
            validator_data: None,
            score_data: None,
            step3_data: None,
            step4_data: None,
            validated_abc: None,
            attachments,
            return_info: None,
            version: 1,
            created_at: now.clone(),
            last_updated: now,
        }
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new Project with the given status
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Return a new Project with the stage sub-record stored in its slot
    pub fn with_stage_record(mut self, record: StageRecord) -> Self {
        match record {
            StageRecord::Step1(data) => self.validator_data = Some(data),
            StageRecord::Step2(data) => self.score_data = Some(data),
            StageRecord::Step3(data) => self.step3_data = Some(data),
            StageRecord::Step4(data) => self.step4_data = Some(data),
        }
        self
    }

    /// Return a new Project with the given attachments added
    pub fn with_attachments(mut self, attachments: BTreeMap<String, Attachment>) -> Self {
        self.attachments.extend(attachments);
        self
    }

    /// Return a new Project with the given budget tag
    pub fn with_gaa_status(mut self, tag: BudgetTag) -> Self {
        self.gaa_status = Some(tag);
        self
    }

    /// Return a new Project with the Step 4 ceiling
    pub fn with_validated_abc(mut self, abc: f64) -> Self {
        self.validated_abc = Some(abc);
        self
    }

    /// Return a new Project with the return marker set or cleared
    pub fn with_return_info(mut self, info: Option<ReturnInfo>) -> Self {
        self.return_info = info;
        self
    }

    /// Return a new Project with replaced descriptive fields
    pub fn with_details(mut self, details: ProjectDetails) -> Self {
        self.details = details;
        self
    }

    /// Return a new Project stamped as the next revision
    ///
    /// Sets `last_updated` to now and bumps `version`. Call once per transition.
    pub fn next_revision(mut self) -> Self {
        self.last_updated = chrono::Utc::now().to_rfc3339();
        self.version += 1;
        self
    }
}
