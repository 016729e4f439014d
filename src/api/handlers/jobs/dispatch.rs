//! Concurrent candidate alert fan-out with per-recipient outcomes.

use axum::{
    Json,
    extract::{Extension, Path},
    http::HeaderMap,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::types::{DispatchResponse, DispatchStatus};
use crate::api::error::ApiError;
use crate::api::handlers::auth::session::require_account;
use crate::api::handlers::rate_limit::ThrottleDecision;
use crate::api::sender::Destination;
use crate::api::state::AppState;

#[utoipa::path(
    post,
    path = "/v1/jobs/{id}/dispatch",
    params(
        ("id" = Uuid, Path, description = "Job id"),
        ("Authorization" = String, Header, description = "Bearer access credential")
    ),
    responses(
        (status = 200, description = "Dispatch completed; see per-recipient outcomes", body = DispatchResponse),
        (status = 400, description = "Job has no candidates", body = String),
        (status = 403, description = "Caller does not own the job", body = String),
        (status = 404, description = "Job not found", body = String),
        (status = 429, description = "Owner dispatched too recently", body = String)
    ),
    tag = "jobs"
)]
pub async fn dispatch_alerts(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = require_account(&headers, &state)?;

    let job = state
        .jobs()
        .find(job_id)
        .await
        .ok_or_else(|| ApiError::NotFound("job not found".to_string()))?;
    if job.created_by != caller {
        return Err(ApiError::Forbidden(
            "only the job owner can dispatch alerts".to_string(),
        ));
    }

    // Per-owner cooldown across all of the owner's jobs. In-process and
    // best-effort; see the throttle module.
    if let ThrottleDecision::Limited { retry_after } =
        state.dispatch_throttle().allow(&caller.to_string())
    {
        return Err(ApiError::RateLimited {
            retry_after_seconds: retry_after.as_secs().max(1),
        });
    }

    if job.candidates.is_empty() {
        return Err(ApiError::Validation(
            "job has no candidates to notify".to_string(),
        ));
    }

    // The reset must be visible in the store before the first send so a
    // crash mid-dispatch leaves PENDING rather than stale statuses.
    state.jobs().reset_statuses(job_id).await;

    let subject = format!("New opportunity: {}", job.title);
    let body = format!(
        "{}\n\nExperience level: {:?}. Apply before {}.",
        job.description,
        job.experience_level,
        job.end_date.format("%Y-%m-%d")
    );

    // Detached tasks: one per candidate, no short-circuit, and a client
    // disconnect cannot cancel sends already in flight.
    let mut handles = Vec::with_capacity(job.candidates.len());
    for candidate in &job.candidates {
        let sender = Arc::clone(state.sender());
        let to = Destination::Email(candidate.email.clone());
        let subject = subject.clone();
        let body = body.clone();
        handles.push(tokio::spawn(async move {
            sender.send(&to, &subject, &body).await
        }));
    }

    let mut statuses = Vec::with_capacity(job.candidates.len());
    let mut sent = Vec::new();
    let mut failed = Vec::new();
    for (candidate, handle) in job.candidates.iter().zip(handles) {
        match handle.await {
            Ok(Ok(())) => {
                statuses.push(DispatchStatus::Sent);
                sent.push(candidate.email.clone());
            }
            Ok(Err(failure)) => {
                error!(
                    candidate = %candidate.email,
                    reason = failure.reason(),
                    "alert delivery failed"
                );
                statuses.push(DispatchStatus::Failed);
                failed.push(candidate.email.clone());
            }
            Err(join_error) => {
                error!(
                    candidate = %candidate.email,
                    "alert send task failed: {join_error}"
                );
                statuses.push(DispatchStatus::Failed);
                failed.push(candidate.email.clone());
            }
        }
    }

    // One write with every terminal outcome, after all attempts resolved.
    state.jobs().record_outcomes(job_id, &statuses).await;

    info!(
        %job_id,
        sent = sent.len(),
        failed = failed.len(),
        "alert dispatch completed"
    );

    Ok(Json(DispatchResponse {
        job_id,
        sent,
        failed,
    }))
}
