//! API handlers for Hyrio.
//!
//! Routes split into three groups: `auth` (registration, verification,
//! sessions), `jobs` (minimal producer + alert dispatch) and `health`.

pub mod auth;
pub mod health;
pub mod jobs;
pub mod rate_limit;
