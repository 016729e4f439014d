//! Minimal job producer so dispatch has something to fan out over.
//! Listing, pagination and updates are deliberately absent.

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;
use std::sync::Arc;

use super::storage::NewJob;
use super::types::{Candidate, CreateJobRequest, DispatchStatus};
use crate::api::error::ApiError;
use crate::api::handlers::auth::session::require_account;
use crate::api::handlers::auth::utils::{normalize_email, valid_email};
use crate::api::state::AppState;

#[utoipa::path(
    post,
    path = "/v1/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = super::types::JobResponse),
        (status = 400, description = "Missing or malformed fields", body = String),
        (status = 401, description = "Missing or invalid access credential", body = String)
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer access credential")
    ),
    tag = "jobs"
)]
pub async fn create_job(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    payload: Option<Json<CreateJobRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = require_account(&headers, &state)?;

    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("missing payload".to_string()));
    };

    let title = request.title.trim().to_string();
    let description = request.description.trim().to_string();
    if title.is_empty() || description.is_empty() {
        return Err(ApiError::Validation(
            "title and description are required".to_string(),
        ));
    }
    if request.end_date <= Utc::now() {
        return Err(ApiError::Validation(
            "end date must be in the future".to_string(),
        ));
    }

    let mut candidates = Vec::with_capacity(request.candidates.len());
    for email in &request.candidates {
        let email = normalize_email(email);
        if !valid_email(&email) {
            return Err(ApiError::Validation(format!(
                "invalid candidate email: {email}"
            )));
        }
        candidates.push(Candidate {
            email,
            status: DispatchStatus::Pending,
        });
    }

    let job = state
        .jobs()
        .insert(NewJob {
            title,
            description,
            experience_level: request.experience_level,
            candidates,
            end_date: request.end_date,
            created_by: caller,
        })
        .await;

    Ok((StatusCode::CREATED, Json(job.response())))
}
