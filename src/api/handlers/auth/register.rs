//! Registration: account creation plus dual-channel code issuance.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use tracing::warn;

use super::types::{Channel, RegisterRequest};
use super::utils::{
    generate_code, hash_secret, normalize_email, normalize_handle, valid_email, valid_phone,
};
use crate::api::error::ApiError;
use crate::api::handlers::auth::identity::{CreateOutcome, NewAccount};
use crate::api::sender::Destination;
use crate::api::state::AppState;

/// Generate, store and deliver a fresh one-time code for one channel.
///
/// Deletes any prior secret for the (identifier, channel) pair first, so
/// at most one live code exists per track. Delivery is best-effort: a
/// failed send is logged and the caller is expected to use regeneration.
pub(super) async fn issue_secret(
    state: &AppState,
    identifier: &str,
    channel: Channel,
) -> Result<(), ApiError> {
    let code = generate_code(state.config().otp_length());
    let code_hash = hash_secret(&code)?;

    let secrets = state.secrets();
    secrets.delete_for(identifier, channel).await;
    secrets
        .put(
            identifier,
            channel,
            code_hash,
            state.config().otp_ttl_seconds(),
        )
        .await;

    let destination = match channel {
        Channel::Email => Destination::Email(identifier.to_string()),
        Channel::Phone => Destination::Phone(identifier.to_string()),
    };
    let body = format!(
        "Your {channel} verification code is {code}. It is valid for {} minutes.",
        state.config().otp_ttl_minutes()
    );
    if let Err(failure) = state
        .sender()
        .send(&destination, "Your Hyrio verification code", &body)
        .await
    {
        // The account (and the stored code) stay valid either way.
        warn!(%destination, reason = failure.reason(), "verification code delivery failed");
    }

    Ok(())
}

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, verification codes sent", body = super::types::AccountProfile),
        (status = 400, description = "Missing or malformed fields", body = String),
        (status = 409, description = "Handle, email or phone already claimed", body = String)
    ),
    tag = "auth"
)]
pub async fn register(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<RegisterRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("missing payload".to_string()));
    };

    let handle = normalize_handle(&request.handle);
    let email = normalize_email(&request.email);
    let phone = request.phone.trim().to_string();
    let name = request.name.trim().to_string();
    let password = request.password;

    if handle.is_empty()
        || email.is_empty()
        || phone.is_empty()
        || name.is_empty()
        || password.trim().is_empty()
    {
        return Err(ApiError::Validation("all fields are required".to_string()));
    }
    if !valid_email(&email) {
        return Err(ApiError::Validation("invalid email format".to_string()));
    }
    if !valid_phone(&phone) {
        return Err(ApiError::Validation(
            "invalid phone format, use an international number like +11234567890".to_string(),
        ));
    }

    let password_hash = hash_secret(&password)?;
    let account = match state
        .identity()
        .create(NewAccount {
            handle,
            email: email.clone(),
            phone: phone.clone(),
            name,
            password_hash,
        })
        .await
    {
        CreateOutcome::Created(account) => account,
        CreateOutcome::Conflict => {
            return Err(ApiError::Conflict(
                "an account with this handle, email or phone already exists".to_string(),
            ));
        }
    };

    // Two independent codes, one per channel, delivered concurrently.
    let (email_issued, phone_issued) = tokio::join!(
        issue_secret(&state, &email, Channel::Email),
        issue_secret(&state, &phone, Channel::Phone),
    );
    email_issued?;
    phone_issued?;

    Ok((StatusCode::CREATED, Json(account.profile())))
}
