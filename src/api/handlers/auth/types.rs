//! Request/response types for identity and session endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// One of the two independent verification tracks of an account.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Phone,
}

impl Channel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outward projection of an account. Never carries the password hash.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct AccountProfile {
    pub id: Uuid,
    pub handle: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub email_verified: bool,
    pub phone_verified: bool,
    /// Derived: true iff both channels are verified.
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub handle: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyRequest {
    /// Email address or phone number the code was sent to.
    pub identifier: String,
    pub channel: Channel,
    pub code: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyResponse {
    pub channel: Channel,
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegenerateRequest {
    pub identifier: String,
    pub channel: Channel,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegenerateResponse {
    pub channel: Channel,
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub account: AccountProfile,
    pub access_credential: String,
    pub renewal_credential: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RefreshRequest {
    pub renewal_credential: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RefreshResponse {
    pub access_credential: String,
    pub renewal_credential: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LogoutRequest {
    pub renewal_credential: String,
}
