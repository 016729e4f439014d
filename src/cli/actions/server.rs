use crate::api;
use crate::api::handlers::auth::tokens::CredentialManager;
use crate::api::handlers::rate_limit::CooldownThrottle;
use crate::api::sender::LogSender;
use crate::api::state::AppState;
use crate::cli::actions::Action;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            config,
            globals,
        } => {
            let credentials = CredentialManager::new(
                &globals.access_token_secret,
                &globals.renewal_token_secret,
                config.access_ttl_seconds(),
                config.renewal_ttl_seconds(),
            );
            let dispatch_throttle = Arc::new(CooldownThrottle::new(Duration::from_secs(
                config.dispatch_cooldown_seconds(),
            )));
            let state = Arc::new(AppState::new(
                config,
                credentials,
                Arc::new(LogSender),
                dispatch_throttle,
            ));

            api::new(port, state).await?;

            Ok(())
        }
    }
}
