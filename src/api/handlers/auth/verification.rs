//! Code verification and throttled regeneration.

use axum::{Json, extract::Extension, response::IntoResponse};
use chrono::Utc;
use std::sync::Arc;

use super::register::issue_secret;
use super::secrets::SecretLookup;
use super::types::{RegenerateRequest, RegenerateResponse, VerifyRequest, VerifyResponse};
use super::utils::{normalize_identifier, verify_secret};
use crate::api::error::ApiError;
use crate::api::state::AppState;

#[utoipa::path(
    post,
    path = "/v1/auth/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Channel verified", body = VerifyResponse),
        (status = 400, description = "Missing fields or wrong code", body = String),
        (status = 404, description = "No code issued for this identifier", body = String),
        (status = 410, description = "Code expired", body = String)
    ),
    tag = "auth"
)]
pub async fn verify(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<VerifyRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("missing payload".to_string()));
    };

    let identifier = normalize_identifier(&request.identifier);
    let code = request.code.trim();
    if identifier.is_empty() || code.is_empty() {
        return Err(ApiError::Validation(
            "identifier and code are required".to_string(),
        ));
    }
    let channel = request.channel;

    let record = match state.secrets().find_live(&identifier, channel).await {
        SecretLookup::Live(record) => record,
        SecretLookup::Expired => return Err(ApiError::Expired { channel }),
        SecretLookup::Missing => {
            return Err(ApiError::NotFound(format!(
                "no verification code found for this {channel}"
            )));
        }
    };

    if !verify_secret(code, &record.code_hash) {
        return Err(ApiError::InvalidCode);
    }

    // Flag first, then consume; the account exists whenever a code does.
    state
        .identity()
        .mark_channel_verified(&identifier, channel)
        .await
        .ok_or_else(|| ApiError::NotFound("account not found".to_string()))?;
    state.secrets().consume(record.id).await;

    Ok(Json(VerifyResponse {
        channel,
        message: format!("{channel} verified successfully"),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/auth/regenerate",
    request_body = RegenerateRequest,
    responses(
        (status = 200, description = "New code issued and sent", body = RegenerateResponse),
        (status = 404, description = "No code record for this identifier", body = String),
        (status = 429, description = "Regenerated too recently", body = String)
    ),
    tag = "auth"
)]
pub async fn regenerate(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<RegenerateRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("missing payload".to_string()));
    };

    let identifier = normalize_identifier(&request.identifier);
    if identifier.is_empty() {
        return Err(ApiError::Validation("identifier is required".to_string()));
    }
    let channel = request.channel;

    // The cooldown is measured against the existing secret's creation
    // time, expired or not; without any record there is nothing to renew.
    let existing = state
        .secrets()
        .find_latest(&identifier, channel)
        .await
        .ok_or_else(|| {
            ApiError::NotFound(format!("no verification code record for this {channel}"))
        })?;

    let cooldown = state.config().otp_cooldown_seconds();
    let elapsed = (Utc::now() - existing.created_at).num_seconds();
    if elapsed < cooldown {
        return Err(ApiError::RateLimited {
            retry_after_seconds: cooldown.saturating_sub(elapsed).unsigned_abs(),
        });
    }

    issue_secret(&state, &identifier, channel).await?;

    Ok(Json(RegenerateResponse {
        channel,
        message: format!("new {channel} verification code sent"),
    }))
}
