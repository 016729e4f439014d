//! API error taxonomy shared by all handlers.
//!
//! Every failure that crosses the HTTP boundary is one of these kinds.
//! Internal errors (store or signing failures) are classified into
//! `Internal` and never passed through unwrapped.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use super::handlers::auth::types::Channel;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input; never touches storage.
    #[error("{0}")]
    Validation(String),
    /// Uniqueness violation on handle, email or phone.
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    /// A verification code exists for the channel but its TTL has elapsed.
    #[error("verification code for {channel} has expired")]
    Expired { channel: Channel },
    #[error("invalid verification code")]
    InvalidCode,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    /// Authenticated correctly but the account is not fully verified yet.
    /// Carries the channels still pending so the client can resume the flow.
    #[error("account is not fully verified")]
    UnverifiedAccount { channels: Vec<Channel> },
    #[error("rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::Expired { .. } => "expired",
            Self::InvalidCode => "invalid_code",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) | Self::UnverifiedAccount { .. } => "forbidden",
            Self::RateLimited { .. } => "rate_limited",
            Self::Internal(_) => "internal",
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidCode => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Expired { .. } => StatusCode::GONE,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) | Self::UnverifiedAccount { .. } => StatusCode::FORBIDDEN,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Clients get a stable kind plus enough context to act; internals
        // only ever surface a generic message.
        let mut body = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });

        match &self {
            Self::Expired { channel } => {
                body["channel"] = json!(channel);
            }
            Self::UnverifiedAccount { channels } => {
                body["unverified_channels"] = json!(channels);
            }
            Self::RateLimited {
                retry_after_seconds,
            } => {
                body["retry_after_seconds"] = json!(retry_after_seconds);
            }
            Self::Internal(source) => {
                error!("internal error: {source:#}");
                body["message"] = json!("internal error");
            }
            _ => {}
        }

        (self.status(), Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(ApiError::Validation("x".to_string()).kind(), "validation");
        assert_eq!(ApiError::Conflict("x".to_string()).kind(), "conflict");
        assert_eq!(ApiError::NotFound("x".to_string()).kind(), "not_found");
        assert_eq!(
            ApiError::Expired {
                channel: Channel::Email
            }
            .kind(),
            "expired"
        );
        assert_eq!(ApiError::InvalidCode.kind(), "invalid_code");
        assert_eq!(
            ApiError::Unauthorized("x".to_string()).kind(),
            "unauthorized"
        );
        assert_eq!(ApiError::Forbidden("x".to_string()).kind(), "forbidden");
        assert_eq!(
            ApiError::UnverifiedAccount {
                channels: vec![Channel::Phone]
            }
            .kind(),
            "forbidden"
        );
        assert_eq!(
            ApiError::RateLimited {
                retry_after_seconds: 30
            }
            .kind(),
            "rate_limited"
        );
    }

    #[test]
    fn statuses_match_kinds() {
        assert_eq!(
            ApiError::Validation("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("x".to_string()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::RateLimited {
                retry_after_seconds: 1
            }
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::UnverifiedAccount { channels: vec![] }.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn rate_limited_body_carries_retry_after() {
        let response = ApiError::RateLimited {
            retry_after_seconds: 42,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(value["error"], "rate_limited");
        assert_eq!(value["retry_after_seconds"], 42);
    }
}
