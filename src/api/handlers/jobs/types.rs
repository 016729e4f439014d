//! Request/response types for job listings and alert dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Expert,
}

/// Outcome of the most recent alert dispatch for one candidate. Reset to
/// `PENDING` at the start of every dispatch; this is not a durable
/// delivery ledger.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchStatus {
    Pending,
    Sent,
    Failed,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct Candidate {
    pub email: String,
    pub status: DispatchStatus,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub experience_level: ExperienceLevel,
    /// Candidate email addresses; statuses always start as `PENDING`.
    pub candidates: Vec<String>,
    pub end_date: DateTime<Utc>,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub experience_level: ExperienceLevel,
    pub candidates: Vec<Candidate>,
    pub end_date: DateTime<Utc>,
    pub created_by: Uuid,
}

/// "Operation completed; see per-recipient outcomes."
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct DispatchResponse {
    pub job_id: Uuid,
    pub sent: Vec<String>,
    pub failed: Vec<String>,
}
