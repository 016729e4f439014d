use crate::api::state::AppConfig;
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{Context, Result};
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let frontend_url = matches
        .get_one::<String>("frontend-url")
        .map(String::to_string)
        .context("missing required argument: --frontend-url")?;

    let otp_ttl_minutes = matches
        .get_one::<u16>("otp-ttl-minutes")
        .copied()
        .unwrap_or(10);

    let access_token_secret = matches
        .get_one::<String>("access-token-secret")
        .map(|secret| SecretString::from(secret.to_string()))
        .context("missing required argument: --access-token-secret")?;

    let renewal_token_secret = matches
        .get_one::<String>("renewal-token-secret")
        .map(|secret| SecretString::from(secret.to_string()))
        .context("missing required argument: --renewal-token-secret")?;

    let config =
        AppConfig::new(frontend_url).with_otp_ttl_seconds(i64::from(otp_ttl_minutes) * 60);

    Ok(Action::Server {
        port,
        config,
        globals: GlobalArgs::new(access_token_secret, renewal_token_secret),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn handler_builds_server_action() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "hyrio",
            "--port",
            "9090",
            "--otp-ttl-minutes",
            "5",
            "--access-token-secret",
            "access-secret",
            "--renewal-token-secret",
            "renewal-secret",
        ]);

        let Action::Server { port, config, .. } = handler(&matches)?;
        assert_eq!(port, 9090);
        assert_eq!(config.access_ttl_seconds(), 15 * 60);
        Ok(())
    }
}
