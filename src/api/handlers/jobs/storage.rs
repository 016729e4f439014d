//! In-memory store for job listings and per-candidate dispatch statuses.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::types::{Candidate, DispatchStatus, ExperienceLevel, JobResponse};

#[derive(Clone, Debug)]
pub(crate) struct Job {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) experience_level: ExperienceLevel,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) end_date: DateTime<Utc>,
    pub(crate) created_by: Uuid,
}

impl Job {
    pub(crate) fn response(&self) -> JobResponse {
        JobResponse {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            experience_level: self.experience_level,
            candidates: self.candidates.clone(),
            end_date: self.end_date,
            created_by: self.created_by,
        }
    }
}

pub(crate) struct NewJob {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) experience_level: ExperienceLevel,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) end_date: DateTime<Utc>,
    pub(crate) created_by: Uuid,
}

pub struct JobStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl JobStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) async fn insert(&self, new: NewJob) -> Job {
        let job = Job {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            experience_level: new.experience_level,
            candidates: new.candidates,
            end_date: new.end_date,
            created_by: new.created_by,
        };
        let mut jobs = self.jobs.write().await;
        jobs.insert(job.id, job.clone());
        job
    }

    pub(crate) async fn find(&self, id: Uuid) -> Option<Job> {
        let jobs = self.jobs.read().await;
        jobs.get(&id).cloned()
    }

    /// Reset every candidate to `PENDING`. The write completes before the
    /// caller starts sending, so mid-dispatch readers never see statuses
    /// from a previous run.
    pub(crate) async fn reset_statuses(&self, id: Uuid) -> bool {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&id) {
            Some(job) => {
                for candidate in &mut job.candidates {
                    candidate.status = DispatchStatus::Pending;
                }
                true
            }
            None => false,
        }
    }

    /// Apply the terminal outcome of every candidate in one write.
    /// `statuses` is index-aligned with the job's candidate list.
    pub(crate) async fn record_outcomes(&self, id: Uuid, statuses: &[DispatchStatus]) -> bool {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&id) {
            Some(job) if job.candidates.len() == statuses.len() => {
                for (candidate, status) in job.candidates.iter_mut().zip(statuses) {
                    candidate.status = *status;
                }
                true
            }
            _ => false,
        }
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}
