//! # Hyrio (Job Board Identity & Alerts Backend)
//!
//! `hyrio` is the backend core of a job board. It owns three subsystems:
//! identity verification, session lifecycle, and candidate alert dispatch.
//!
//! ## Identity Verification (dual channel)
//!
//! Registration claims a handle, an email address and a phone number, and
//! starts two independent verification tracks. Each track is backed by a
//! time-bounded numeric one-time code, stored only as an Argon2id hash.
//! An account becomes fully verified once **both** tracks complete, in
//! either order.
//!
//! - **Normalization:** handles and email addresses are lowercased and
//!   trimmed before storage and lookup.
//! - **One live code per track:** issuing a new code always deletes the
//!   previous one first; regeneration is throttled per track.
//!
//! ## Sessions (access + renewal credentials)
//!
//! Login mints a short-lived access credential and a longer-lived renewal
//! credential, signed with distinct secrets so one can never stand in for
//! the other. Each account holds at most one active renewal credential;
//! every login or refresh rotates the pair and invalidates the previous
//! renewal credential.
//!
//! ## Candidate Alerts
//!
//! A job owner can fan a job alert out to every candidate on a listing.
//! Sends run concurrently, outcomes are tracked per recipient, and a mixed
//! result is reported as a completed operation with per-recipient statuses
//! rather than a hard failure.

pub mod api;
pub mod cli;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
