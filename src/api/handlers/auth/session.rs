//! Session endpoints: login, refresh rotation and logout.

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use super::types::{
    LoginRequest, LoginResponse, LogoutRequest, RefreshRequest, RefreshResponse,
};
use super::utils::{normalize_email, valid_email, verify_secret};
use crate::api::error::ApiError;
use crate::api::state::AppState;

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credential pair issued", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = String),
        (status = 403, description = "Account not fully verified; lists pending channels", body = String)
    ),
    tag = "auth"
)]
pub async fn login(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("missing payload".to_string()));
    };

    let email = normalize_email(&request.email);
    if email.is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation(
            "email and password are required".to_string(),
        ));
    }
    if !valid_email(&email) {
        return Err(ApiError::Validation("invalid email format".to_string()));
    }

    // Same answer for unknown email and wrong password: no account probing.
    let account = state
        .identity()
        .find_by_identifier(&email)
        .await
        .ok_or_else(|| ApiError::Unauthorized("invalid email or password".to_string()))?;
    if !verify_secret(&request.password, &account.password_hash) {
        return Err(ApiError::Unauthorized(
            "invalid email or password".to_string(),
        ));
    }

    // Password was correct, so telling this caller which of their own
    // channels is still pending leaks nothing to strangers.
    if !account.verified() {
        return Err(ApiError::UnverifiedAccount {
            channels: account.unverified_channels(),
        });
    }

    let pair = state
        .credentials()
        .issue(state.identity(), account.id)
        .await?;

    Ok(Json(LoginResponse {
        account: account.profile(),
        access_credential: pair.access,
        renewal_credential: pair.renewal,
    }))
}

#[utoipa::path(
    post,
    path = "/v1/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Rotated credential pair", body = RefreshResponse),
        (status = 401, description = "Invalid, expired or rotated-out renewal credential", body = String)
    ),
    tag = "auth"
)]
pub async fn refresh(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<RefreshRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("missing payload".to_string()));
    };
    let presented = request.renewal_credential.trim();
    if presented.is_empty() {
        return Err(ApiError::Unauthorized(
            "missing renewal credential".to_string(),
        ));
    }

    let pair = state
        .credentials()
        .refresh(state.identity(), presented)
        .await?;

    Ok(Json(RefreshResponse {
        access_credential: pair.access,
        renewal_credential: pair.renewal,
    }))
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 204, description = "Session revoked (idempotent)")
    ),
    tag = "auth"
)]
pub async fn logout(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<LogoutRequest>>,
) -> impl IntoResponse {
    // Revocation is unconditional: even an expired or already rotated-out
    // credential identifies the account whose session should be cleared.
    if let Some(Json(request)) = payload {
        if let Some(account_id) = state
            .credentials()
            .renewal_subject_lossy(request.renewal_credential.trim())
        {
            state
                .credentials()
                .revoke(state.identity(), account_id)
                .await;
        }
    }
    StatusCode::NO_CONTENT
}

/// Resolve the bearer access credential on a request to an account id.
pub(crate) fn require_account(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<uuid::Uuid, ApiError> {
    let token = extract_bearer_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("missing access credential".to_string()))?;
    state.credentials().authenticate(&token)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
