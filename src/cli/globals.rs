use secrecy::SecretString;

/// Process-wide secrets used to sign the two credential families.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub access_token_secret: SecretString,
    pub renewal_token_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(access_token_secret: SecretString, renewal_token_secret: SecretString) -> Self {
        Self {
            access_token_secret,
            renewal_token_secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            SecretString::from("access".to_string()),
            SecretString::from("renewal".to_string()),
        );
        assert_eq!(args.access_token_secret.expose_secret(), "access");
        assert_eq!(args.renewal_token_secret.expose_secret(), "renewal");
        // Debug output must not leak the secret values.
        let debug = format!("{args:?}");
        assert!(!debug.contains("\"access\""));
        assert!(!debug.contains("\"renewal\""));
    }
}
