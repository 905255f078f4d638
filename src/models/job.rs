//! Job booking, scheduling and completion schemas.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::catalog::{Domain, DomainExports, SchemaDescriptor};
use crate::domain::fields;
use crate::domain::job::{ChecklistItem, JobPriority, JobStatus, JobType, PartUsed};
use crate::domain::types::{AssetId, ClockTime, CustomerId, FreeText, JobId, PersonName, SiteId, UserId};

/// Visit length assumed when a payload does not estimate one, in minutes.
pub const DEFAULT_ESTIMATED_DURATION: u32 = 60;

fn default_estimated_duration() -> u32 {
    DEFAULT_ESTIMATED_DURATION
}

fn time_needs_date(job: &JobCreate) -> Result<(), ValidationError> {
    if job.scheduled_time.is_some() && job.scheduled_date.is_none() {
        return Err(ValidationError::new("scheduled_time_without_date"));
    }
    Ok(())
}

/// Payload booking a new job.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "time_needs_date", skip_on_field_errors = false))]
pub struct JobCreate {
    pub customer_id: CustomerId,
    pub site_id: SiteId,
    /// Assets on site the job concerns. Empty when none are recorded.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub asset_ids: Vec<AssetId>,
    pub job_type: JobType,
    #[serde(default)]
    pub priority: JobPriority,
    pub description: FreeText,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub scheduled_time: Option<ClockTime>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub assigned_engineer_id: Option<UserId>,
    /// Expected time on site, in minutes.
    #[serde(default = "default_estimated_duration")]
    #[validate(range(min = 15, max = 1440))]
    pub estimated_duration: u32,
    /// Contracted response time, in hours.
    #[serde(default)]
    #[validate(range(min = 1, max = 720))]
    pub sla_hours: Option<u32>,
}

/// Partial update of a job. Fields left out are not changed.
///
/// Scheduling fields distinguish a missing key (`None`) from an explicit
/// `null` (`Some(None)`), which clears the stored value. The scheduler relies
/// on this to unassign an engineer.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate, PartialEq)]
pub struct JobUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<SiteId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 50))]
    pub asset_ids: Option<Vec<AssetId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<JobPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(
        default,
        deserialize_with = "fields::blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<FreeText>,
    #[serde(
        default,
        deserialize_with = "fields::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "fields::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_time: Option<Option<ClockTime>>,
    #[serde(
        default,
        deserialize_with = "fields::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_engineer_id: Option<Option<UserId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 15, max = 1440))]
    pub estimated_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 720))]
    pub sla_hours: Option<u32>,
}

impl JobUpdate {
    /// Whether applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &JobUpdate::default()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JobResponse {
    pub id: JobId,
    /// Human-facing reference shown on job sheets.
    pub job_number: String,
    pub customer_id: CustomerId,
    pub site_id: SiteId,
    #[serde(default)]
    pub asset_ids: Vec<AssetId>,
    pub job_type: JobType,
    pub priority: JobPriority,
    pub status: JobStatus,
    pub description: FreeText,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub scheduled_time: Option<ClockTime>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub assigned_engineer_id: Option<UserId>,
    pub estimated_duration: u32,
    #[serde(default)]
    pub sla_hours: Option<u32>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Checklist entry ticked off by the engineer on site.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItemCreate {
    pub description: FreeText,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub notes: Option<FreeText>,
}

fn signature_is_attributed(completion: &JobCompletionCreate) -> Result<(), ValidationError> {
    if completion.customer_signature.is_some() && completion.signed_by_name.is_none() {
        return Err(ValidationError::new("signature_without_name"));
    }
    Ok(())
}

/// Engineer's sign-off of a job on site.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "signature_is_attributed", skip_on_field_errors = false))]
pub struct JobCompletionCreate {
    pub work_performed: FreeText,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub checklist: Vec<ChecklistItemCreate>,
    #[serde(default)]
    #[validate(length(max = 100), nested)]
    pub parts_used: Vec<PartUsed>,
    #[serde(default)]
    #[validate(range(min = 1, max = 1440))]
    pub time_on_site_minutes: Option<u32>,
    /// Signature image as a `data:` URL.
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    #[validate(length(max = 1_000_000))]
    pub customer_signature: Option<String>,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub signed_by_name: Option<PersonName>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub photos: Vec<String>,
    #[serde(default)]
    pub follow_up_required: bool,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub follow_up_notes: Option<FreeText>,
}

schema!(JobCreate, Job, Create, validated);
schema!(JobUpdate, Job, Update, validated);
schema!(JobResponse, Job, Response);
schema!(ChecklistItemCreate, Job, Create);
schema!(JobCompletionCreate, Job, Create, validated);

static SCHEMAS: [SchemaDescriptor; 5] = [
    SchemaDescriptor::of::<JobCreate>(),
    SchemaDescriptor::of::<JobUpdate>(),
    SchemaDescriptor::of::<JobResponse>(),
    SchemaDescriptor::of::<ChecklistItemCreate>(),
    SchemaDescriptor::of::<JobCompletionCreate>(),
];

/// Schemas published by the job module.
pub static EXPORTS: DomainExports = DomainExports::new(Domain::Job, &SCHEMAS);
