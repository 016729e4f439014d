//! Application state and runtime configuration.

use std::sync::Arc;
use std::time::Duration;

use super::handlers::auth::identity::IdentityStore;
use super::handlers::auth::secrets::SecretStore;
use super::handlers::auth::tokens::CredentialManager;
use super::handlers::jobs::storage::JobStore;
use super::handlers::rate_limit::Throttle;
use super::sender::Sender;

const DEFAULT_OTP_LENGTH: usize = 6;
const DEFAULT_OTP_TTL_SECONDS: i64 = 10 * 60;
const DEFAULT_OTP_COOLDOWN_SECONDS: i64 = 60;
const DEFAULT_DISPATCH_COOLDOWN_SECONDS: u64 = 60;
const DEFAULT_ACCESS_TTL_SECONDS: i64 = 15 * 60;
const DEFAULT_RENEWAL_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
const DEFAULT_REAP_INTERVAL_SECONDS: u64 = 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    frontend_base_url: String,
    otp_length: usize,
    otp_ttl_seconds: i64,
    otp_cooldown_seconds: i64,
    dispatch_cooldown_seconds: u64,
    access_ttl_seconds: i64,
    renewal_ttl_seconds: i64,
    reap_interval_seconds: u64,
}

impl AppConfig {
    #[must_use]
    pub fn new(frontend_base_url: String) -> Self {
        Self {
            frontend_base_url,
            otp_length: DEFAULT_OTP_LENGTH,
            otp_ttl_seconds: DEFAULT_OTP_TTL_SECONDS,
            otp_cooldown_seconds: DEFAULT_OTP_COOLDOWN_SECONDS,
            dispatch_cooldown_seconds: DEFAULT_DISPATCH_COOLDOWN_SECONDS,
            access_ttl_seconds: DEFAULT_ACCESS_TTL_SECONDS,
            renewal_ttl_seconds: DEFAULT_RENEWAL_TTL_SECONDS,
            reap_interval_seconds: DEFAULT_REAP_INTERVAL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_otp_ttl_seconds(mut self, seconds: i64) -> Self {
        self.otp_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_otp_cooldown_seconds(mut self, seconds: i64) -> Self {
        self.otp_cooldown_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_dispatch_cooldown_seconds(mut self, seconds: u64) -> Self {
        self.dispatch_cooldown_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_access_ttl_seconds(mut self, seconds: i64) -> Self {
        self.access_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_renewal_ttl_seconds(mut self, seconds: i64) -> Self {
        self.renewal_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_reap_interval_seconds(mut self, seconds: u64) -> Self {
        self.reap_interval_seconds = seconds;
        self
    }

    pub(crate) fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    pub(crate) fn otp_length(&self) -> usize {
        self.otp_length
    }

    pub(crate) fn otp_ttl_seconds(&self) -> i64 {
        self.otp_ttl_seconds
    }

    pub(crate) fn otp_ttl_minutes(&self) -> i64 {
        self.otp_ttl_seconds / 60
    }

    pub(crate) fn otp_cooldown_seconds(&self) -> i64 {
        self.otp_cooldown_seconds
    }

    #[must_use]
    pub fn dispatch_cooldown_seconds(&self) -> u64 {
        self.dispatch_cooldown_seconds
    }

    #[must_use]
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }

    #[must_use]
    pub fn renewal_ttl_seconds(&self) -> i64 {
        self.renewal_ttl_seconds
    }

    pub(crate) fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_seconds)
    }
}

/// Everything handlers need, shared behind one `Arc` extension.
pub struct AppState {
    config: AppConfig,
    identity: IdentityStore,
    secrets: Arc<SecretStore>,
    jobs: JobStore,
    credentials: CredentialManager,
    sender: Arc<dyn Sender>,
    dispatch_throttle: Arc<dyn Throttle>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AppConfig,
        credentials: CredentialManager,
        sender: Arc<dyn Sender>,
        dispatch_throttle: Arc<dyn Throttle>,
    ) -> Self {
        Self {
            config,
            identity: IdentityStore::new(),
            secrets: Arc::new(SecretStore::new()),
            jobs: JobStore::new(),
            credentials,
            sender,
            dispatch_throttle,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub(crate) fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    pub(crate) fn secrets(&self) -> &SecretStore {
        &self.secrets
    }

    /// Cloneable handle for the background reaper.
    #[must_use]
    pub fn secrets_handle(&self) -> Arc<SecretStore> {
        Arc::clone(&self.secrets)
    }

    pub(crate) fn jobs(&self) -> &JobStore {
        &self.jobs
    }

    pub(crate) fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    pub(crate) fn sender(&self) -> &Arc<dyn Sender> {
        &self.sender
    }

    pub(crate) fn dispatch_throttle(&self) -> &dyn Throttle {
        self.dispatch_throttle.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_defaults_and_overrides() {
        let config = AppConfig::new("https://hyrio.dev".to_string());

        assert_eq!(config.frontend_base_url(), "https://hyrio.dev");
        assert_eq!(config.otp_length(), DEFAULT_OTP_LENGTH);
        assert_eq!(config.otp_ttl_seconds(), DEFAULT_OTP_TTL_SECONDS);
        assert_eq!(config.otp_ttl_minutes(), 10);
        assert_eq!(config.otp_cooldown_seconds(), DEFAULT_OTP_COOLDOWN_SECONDS);
        assert_eq!(
            config.dispatch_cooldown_seconds(),
            DEFAULT_DISPATCH_COOLDOWN_SECONDS
        );
        assert_eq!(config.access_ttl_seconds(), DEFAULT_ACCESS_TTL_SECONDS);
        assert_eq!(config.renewal_ttl_seconds(), DEFAULT_RENEWAL_TTL_SECONDS);

        let config = config
            .with_otp_ttl_seconds(120)
            .with_otp_cooldown_seconds(0)
            .with_dispatch_cooldown_seconds(30)
            .with_access_ttl_seconds(60)
            .with_renewal_ttl_seconds(3600)
            .with_reap_interval_seconds(5);

        assert_eq!(config.otp_ttl_seconds(), 120);
        assert_eq!(config.otp_ttl_minutes(), 2);
        assert_eq!(config.otp_cooldown_seconds(), 0);
        assert_eq!(config.dispatch_cooldown_seconds(), 30);
        assert_eq!(config.access_ttl_seconds(), 60);
        assert_eq!(config.renewal_ttl_seconds(), 3600);
        assert_eq!(config.reap_interval(), Duration::from_secs(5));
    }
}
