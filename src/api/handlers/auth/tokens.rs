//! Credential minting, validation and rotation.
//!
//! Two HS256 token families signed with distinct secrets: a short-lived
//! access credential (`purpose: access`, carries iat/exp) and a
//! longer-lived renewal credential (`purpose: renewal`, carries a jti so
//! every rotation produces a distinct token). Only the renewal
//! credential's SHA-256 fingerprint is persisted, on the account itself;
//! presenting a renewal credential whose fingerprint no longer matches
//! the stored one means it was rotated out and is rejected.

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::IdentityStore;
use super::utils::fingerprint;
use crate::api::error::ApiError;

const ACCESS_PURPOSE: &str = "access";
const RENEWAL_PURPOSE: &str = "renewal";

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AccessClaims {
    pub(crate) sub: Uuid,
    pub(crate) purpose: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RenewalClaims {
    pub(crate) sub: Uuid,
    pub(crate) purpose: String,
    pub(crate) exp: i64,
    pub(crate) jti: Uuid,
}

/// A freshly minted access/renewal pair. Raw tokens go to the caller only.
#[derive(Clone, Debug)]
pub(crate) struct CredentialPair {
    pub(crate) access: String,
    pub(crate) renewal: String,
}

pub struct CredentialManager {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    renewal_encoding: EncodingKey,
    renewal_decoding: DecodingKey,
    access_ttl_seconds: i64,
    renewal_ttl_seconds: i64,
}

impl CredentialManager {
    #[must_use]
    pub fn new(
        access_secret: &SecretString,
        renewal_secret: &SecretString,
        access_ttl_seconds: i64,
        renewal_ttl_seconds: i64,
    ) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.expose_secret().as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.expose_secret().as_bytes()),
            renewal_encoding: EncodingKey::from_secret(renewal_secret.expose_secret().as_bytes()),
            renewal_decoding: DecodingKey::from_secret(renewal_secret.expose_secret().as_bytes()),
            access_ttl_seconds,
            renewal_ttl_seconds,
        }
    }

    fn mint_pair(&self, account_id: Uuid) -> Result<CredentialPair> {
        let now = Utc::now().timestamp();
        let access = AccessClaims {
            sub: account_id,
            purpose: ACCESS_PURPOSE.to_string(),
            iat: now,
            exp: now + self.access_ttl_seconds,
        };
        let renewal = RenewalClaims {
            sub: account_id,
            purpose: RENEWAL_PURPOSE.to_string(),
            exp: now + self.renewal_ttl_seconds,
            jti: Uuid::new_v4(),
        };
        let header = Header::new(Algorithm::HS256);
        Ok(CredentialPair {
            access: encode(&header, &access, &self.access_encoding)
                .context("failed to sign access credential")?,
            renewal: encode(&header, &renewal, &self.renewal_encoding)
                .context("failed to sign renewal credential")?,
        })
    }

    /// Mint a pair and mirror the renewal fingerprint on the account,
    /// overwriting any prior one (single active session per account).
    pub(crate) async fn issue(
        &self,
        identity: &IdentityStore,
        account_id: Uuid,
    ) -> Result<CredentialPair> {
        let pair = self.mint_pair(account_id)?;
        identity
            .set_renewal_hash(account_id, fingerprint(&pair.renewal))
            .await;
        Ok(pair)
    }

    /// Resolve a bearer access credential to an account id.
    pub(crate) fn authenticate(&self, token: &str) -> Result<Uuid, ApiError> {
        let claims = decode_claims::<AccessClaims>(token, &self.access_decoding, true)?;
        if claims.purpose != ACCESS_PURPOSE {
            return Err(ApiError::Unauthorized(
                "credential cannot be used for access".to_string(),
            ));
        }
        Ok(claims.sub)
    }

    /// Rotate: verify the presented renewal credential against the one
    /// currently stored on the account, then issue a brand-new pair.
    pub(crate) async fn refresh(
        &self,
        identity: &IdentityStore,
        presented: &str,
    ) -> Result<CredentialPair, ApiError> {
        let claims = decode_claims::<RenewalClaims>(presented, &self.renewal_decoding, true)?;
        if claims.purpose != RENEWAL_PURPOSE {
            return Err(ApiError::Unauthorized(
                "credential cannot be used for renewal".to_string(),
            ));
        }
        let account = identity
            .find_by_id(claims.sub)
            .await
            .ok_or_else(|| ApiError::Unauthorized("invalid renewal credential".to_string()))?;

        // Exact-match against the stored fingerprint catches reuse of a
        // credential that a later login or refresh already rotated out.
        let presented_hash = fingerprint(presented);
        if account.renewal_hash.as_deref() != Some(presented_hash.as_slice()) {
            return Err(ApiError::Unauthorized(
                "renewal credential has been rotated or revoked".to_string(),
            ));
        }

        self.issue(identity, account.id)
            .await
            .map_err(ApiError::from)
    }

    /// Drop the stored renewal fingerprint; any outstanding renewal
    /// credential stops working. Idempotent.
    pub(crate) async fn revoke(&self, identity: &IdentityStore, account_id: Uuid) {
        identity.clear_renewal_hash(account_id).await;
    }

    /// Best-effort subject extraction for logout: the signature must
    /// verify but expiry is ignored, so an expired session can still be
    /// logged out.
    pub(crate) fn renewal_subject_lossy(&self, token: &str) -> Option<Uuid> {
        decode_claims::<RenewalClaims>(token, &self.renewal_decoding, false)
            .ok()
            .filter(|claims| claims.purpose == RENEWAL_PURPOSE)
            .map(|claims| claims.sub)
    }
}

fn decode_claims<T: for<'de> Deserialize<'de>>(
    token: &str,
    key: &DecodingKey,
    validate_exp: bool,
) -> Result<T, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = validate_exp;
    decode::<T>(token, key, &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => {
                ApiError::Unauthorized("credential has expired".to_string())
            }
            _ => ApiError::Unauthorized("invalid credential".to_string()),
        })
}
