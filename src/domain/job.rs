//! Job classification and the records embedded in job schemas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::fields;
use crate::domain::types::{FreeText, PartId};

wire_enum! {
    /// Kind of work a job covers.
    pub enum JobType {
        Breakdown => "breakdown",
        /// Planned preventive maintenance visit.
        PmService => "pm_service",
        Install => "install",
        QuoteVisit => "quote_visit",
    }
}

wire_enum! {
    /// Dispatch priority of a job.
    #[derive(Default)]
    pub enum JobPriority {
        Urgent => "urgent",
        High => "high",
        #[default]
        Medium => "medium",
        Low => "low",
    }
}

wire_enum! {
    /// Progress of a job from booking to close.
    #[derive(Default)]
    pub enum JobStatus {
        #[default]
        Pending => "pending",
        Travelling => "travelling",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

/// Checklist entry as stored against a job.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    pub description: FreeText,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "fields::blank_as_none")]
    pub notes: Option<FreeText>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A stocked part consumed while completing a job.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct PartUsed {
    pub part_id: PartId,
    #[validate(range(min = 1, max = 10_000))]
    pub quantity: u32,
}
