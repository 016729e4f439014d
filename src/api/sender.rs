//! Outbound message delivery abstraction.
//!
//! Verification codes and job alerts leave the system through a single
//! `Sender` capability. Delivery failure is a *signal*, not a fault: the
//! trait returns a `SendFailure` carrying a reason string and never
//! panics or propagates transport errors past this boundary. Callers
//! decide what a failed send means for their flow.
//!
//! The default sender for local dev is `LogSender`, which logs the
//! message and reports success.

use async_trait::async_trait;
use std::fmt;
use tracing::info;

/// Where a message goes: one email address or one phone number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Email(String),
    Phone(String),
}

impl Destination {
    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            Self::Email(address) | Self::Phone(address) => address,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(address) => write!(f, "email:{address}"),
            Self::Phone(number) => write!(f, "sms:{number}"),
        }
    }
}

/// Why a send did not go through. Carried back to callers as a value.
#[derive(Clone, Debug)]
pub struct SendFailure {
    reason: String,
}

impl SendFailure {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for SendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for SendFailure {}

/// Message delivery capability consumed by verification and dispatch flows.
#[async_trait]
pub trait Sender: Send + Sync {
    /// Deliver a message or report a failure; must not panic on transport
    /// problems.
    async fn send(&self, to: &Destination, subject: &str, body: &str) -> Result<(), SendFailure>;
}

/// Local dev sender that logs the payload instead of sending anything.
#[derive(Clone, Debug)]
pub struct LogSender;

#[async_trait]
impl Sender for LogSender {
    async fn send(&self, to: &Destination, subject: &str, body: &str) -> Result<(), SendFailure> {
        info!(%to, subject, body, "outbound send stub");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_display_and_address() {
        let email = Destination::Email("a@example.com".to_string());
        assert_eq!(email.address(), "a@example.com");
        assert_eq!(email.to_string(), "email:a@example.com");

        let phone = Destination::Phone("+11234567890".to_string());
        assert_eq!(phone.address(), "+11234567890");
        assert_eq!(phone.to_string(), "sms:+11234567890");
    }

    #[tokio::test]
    async fn log_sender_always_delivers() {
        let sender = LogSender;
        let result = sender
            .send(
                &Destination::Email("a@example.com".to_string()),
                "subject",
                "body",
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn recording_sender_reports_configured_failures() {
        let sender = test_support::RecordingSender::failing_for(["b@example.com"]);
        let ok = sender
            .send(
                &Destination::Email("a@example.com".to_string()),
                "subject",
                "body",
            )
            .await;
        let failed = sender
            .send(
                &Destination::Email("b@example.com".to_string()),
                "subject",
                "body",
            )
            .await;
        assert!(ok.is_ok());
        let failure = failed.expect_err("configured failure");
        assert!(failure.reason().contains("b@example.com"));
        assert_eq!(sender.sent().len(), 2);
    }
}
