use clap::{
    Arg, ColorChoice, Command,
    builder::{
        ValueParser,
        styling::{AnsiColor, Effects, Styles},
    },
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("hyrio")
        .about("Job board identity and candidate alerts")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("HYRIO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("frontend-url")
                .long("frontend-url")
                .help("Frontend base URL, used for the CORS allow-origin")
                .default_value("http://localhost:5173")
                .env("HYRIO_FRONTEND_URL"),
        )
        .arg(
            Arg::new("access-token-secret")
                .long("access-token-secret")
                .help("Signing secret for short-lived access credentials")
                .env("HYRIO_ACCESS_TOKEN_SECRET")
                .required(true),
        )
        .arg(
            Arg::new("renewal-token-secret")
                .long("renewal-token-secret")
                .help("Signing secret for long-lived renewal credentials")
                .env("HYRIO_RENEWAL_TOKEN_SECRET")
                .required(true),
        )
        .arg(
            Arg::new("otp-ttl-minutes")
                .long("otp-ttl-minutes")
                .help("Lifetime of one-time verification codes, in minutes")
                .default_value("10")
                .env("HYRIO_OTP_TTL_MINUTES")
                .value_parser(clap::value_parser!(u16).range(1..)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("HYRIO_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "hyrio");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Job board identity and candidate alerts"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_port_and_secrets() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "hyrio",
            "--port",
            "8080",
            "--frontend-url",
            "http://localhost:5173",
            "--otp-ttl-minutes",
            "10",
            "--access-token-secret",
            "access-secret",
            "--renewal-token-secret",
            "renewal-secret",
        ]);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
        assert_eq!(
            matches
                .get_one::<String>("access-token-secret")
                .map(String::as_str),
            Some("access-secret")
        );
        assert_eq!(
            matches
                .get_one::<String>("renewal-token-secret")
                .map(String::as_str),
            Some("renewal-secret")
        );
        assert_eq!(
            matches
                .get_one::<String>("frontend-url")
                .map(String::as_str),
            Some("http://localhost:5173")
        );
        assert_eq!(matches.get_one::<u16>("otp-ttl-minutes").copied(), Some(10));
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("HYRIO_PORT", Some("443")),
                ("HYRIO_ACCESS_TOKEN_SECRET", Some("access-secret")),
                ("HYRIO_RENEWAL_TOKEN_SECRET", Some("renewal-secret")),
                ("HYRIO_FRONTEND_URL", Some("https://app.hyrio.dev")),
                ("HYRIO_OTP_TTL_MINUTES", Some("5")),
                ("HYRIO_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["hyrio"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches
                        .get_one::<String>("frontend-url")
                        .map(String::as_str),
                    Some("https://app.hyrio.dev")
                );
                assert_eq!(matches.get_one::<u16>("otp-ttl-minutes").copied(), Some(5));
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("HYRIO_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "hyrio".to_string(),
                    "--access-token-secret".to_string(),
                    "access-secret".to_string(),
                    "--renewal-token-secret".to_string(),
                    "renewal-secret".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();
                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(index as u8)
                );
            });
        }
    }
}
