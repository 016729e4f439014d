//! In-memory store for account records and their verification/session state.
//!
//! The full `Account` (password hash included) never leaves this crate;
//! handlers project it to `AccountProfile` before anything crosses the
//! HTTP boundary. Verification flags mutate only through
//! `mark_channel_verified`; the renewal fingerprint only through
//! `set_renewal_hash` / `clear_renewal_hash`.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::types::{AccountProfile, Channel};

#[derive(Clone, Debug)]
pub(crate) struct Account {
    pub(crate) id: Uuid,
    pub(crate) handle: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) name: String,
    pub(crate) password_hash: String,
    pub(crate) email_verified: bool,
    pub(crate) phone_verified: bool,
    /// SHA-256 fingerprint of the single active renewal credential.
    pub(crate) renewal_hash: Option<Vec<u8>>,
    pub(crate) created_at: DateTime<Utc>,
}

impl Account {
    /// Derived, never stored: both tracks must be complete.
    pub(crate) fn verified(&self) -> bool {
        self.email_verified && self.phone_verified
    }

    pub(crate) fn unverified_channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if !self.email_verified {
            channels.push(Channel::Email);
        }
        if !self.phone_verified {
            channels.push(Channel::Phone);
        }
        channels
    }

    pub(crate) fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            handle: self.handle.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            name: self.name.clone(),
            email_verified: self.email_verified,
            phone_verified: self.phone_verified,
            verified: self.verified(),
            created_at: self.created_at,
        }
    }

    fn matches_identifier(&self, identifier: &str) -> bool {
        self.handle == identifier || self.email == identifier || self.phone == identifier
    }
}

/// Fields required to create an account. Input is expected normalized.
pub(crate) struct NewAccount {
    pub(crate) handle: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) name: String,
    pub(crate) password_hash: String,
}

/// Outcome when attempting to create a new account record.
#[derive(Debug)]
pub(crate) enum CreateOutcome {
    Created(Account),
    Conflict,
}

pub struct IdentityStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl IdentityStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Create an account unless the handle, email or phone is already claimed.
    pub(crate) async fn create(&self, new: NewAccount) -> CreateOutcome {
        let mut accounts = self.accounts.write().await;
        let claimed = accounts.values().any(|account| {
            account.handle == new.handle
                || account.email == new.email
                || account.phone == new.phone
        });
        if claimed {
            return CreateOutcome::Conflict;
        }
        let account = Account {
            id: Uuid::new_v4(),
            handle: new.handle,
            email: new.email,
            phone: new.phone,
            name: new.name,
            password_hash: new.password_hash,
            email_verified: false,
            phone_verified: false,
            renewal_hash: None,
            created_at: Utc::now(),
        };
        accounts.insert(account.id, account.clone());
        CreateOutcome::Created(account)
    }

    /// Look up by handle, email or phone.
    pub(crate) async fn find_by_identifier(&self, identifier: &str) -> Option<Account> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|account| account.matches_identifier(identifier))
            .cloned()
    }

    pub(crate) async fn find_by_id(&self, id: Uuid) -> Option<Account> {
        let accounts = self.accounts.read().await;
        accounts.get(&id).cloned()
    }

    /// Flip one verification flag; returns the updated account.
    pub(crate) async fn mark_channel_verified(
        &self,
        identifier: &str,
        channel: Channel,
    ) -> Option<Account> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|account| account.matches_identifier(identifier))?;
        match channel {
            Channel::Email => account.email_verified = true,
            Channel::Phone => account.phone_verified = true,
        }
        Some(account.clone())
    }

    pub(crate) async fn set_renewal_hash(&self, id: Uuid, hash: Vec<u8>) -> bool {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id) {
            Some(account) => {
                account.renewal_hash = Some(hash);
                true
            }
            None => false,
        }
    }

    pub(crate) async fn clear_renewal_hash(&self, id: Uuid) -> bool {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id) {
            Some(account) => {
                account.renewal_hash = None;
                true
            }
            None => false,
        }
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(handle: &str, email: &str, phone: &str) -> NewAccount {
        NewAccount {
            handle: handle.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            name: "Acme Co".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    async fn created(store: &IdentityStore, new: NewAccount) -> Account {
        match store.create(new).await {
            CreateOutcome::Created(account) => account,
            CreateOutcome::Conflict => panic!("unexpected conflict"),
        }
    }

    #[tokio::test]
    async fn create_rejects_claimed_identifiers() {
        let store = IdentityStore::new();
        created(&store, new_account("acme", "a@co.com", "+11234567890")).await;

        for clash in [
            new_account("acme", "b@co.com", "+19999999999"),
            new_account("other", "a@co.com", "+19999999999"),
            new_account("other", "b@co.com", "+11234567890"),
        ] {
            assert!(matches!(
                store.create(clash).await,
                CreateOutcome::Conflict
            ));
        }
    }

    #[tokio::test]
    async fn find_by_identifier_matches_handle_email_and_phone() {
        let store = IdentityStore::new();
        let account = created(&store, new_account("acme", "a@co.com", "+11234567890")).await;
        for identifier in ["acme", "a@co.com", "+11234567890"] {
            let found = store
                .find_by_identifier(identifier)
                .await
                .expect("account found");
            assert_eq!(found.id, account.id);
        }
        assert!(store.find_by_identifier("missing").await.is_none());
    }

    #[tokio::test]
    async fn verified_requires_both_flags() {
        let store = IdentityStore::new();
        let account = created(&store, new_account("acme", "a@co.com", "+11234567890")).await;
        assert!(!account.verified());
        assert_eq!(
            account.unverified_channels(),
            vec![Channel::Email, Channel::Phone]
        );

        let account = store
            .mark_channel_verified("a@co.com", Channel::Email)
            .await
            .expect("account");
        assert!(account.email_verified);
        assert!(!account.verified());
        assert_eq!(account.unverified_channels(), vec![Channel::Phone]);

        let account = store
            .mark_channel_verified("+11234567890", Channel::Phone)
            .await
            .expect("account");
        assert!(account.verified());
        assert!(account.unverified_channels().is_empty());
    }

    #[tokio::test]
    async fn renewal_hash_set_and_clear() {
        let store = IdentityStore::new();
        let account = created(&store, new_account("acme", "a@co.com", "+11234567890")).await;
        assert!(store.set_renewal_hash(account.id, vec![1, 2, 3]).await);
        let found = store.find_by_id(account.id).await.expect("account");
        assert_eq!(found.renewal_hash.as_deref(), Some([1, 2, 3].as_slice()));

        assert!(store.clear_renewal_hash(account.id).await);
        let found = store.find_by_id(account.id).await.expect("account");
        assert!(found.renewal_hash.is_none());

        assert!(!store.set_renewal_hash(Uuid::new_v4(), vec![9]).await);
    }

    #[tokio::test]
    async fn profile_excludes_password_hash() {
        let store = IdentityStore::new();
        let account = created(&store, new_account("acme", "a@co.com", "+11234567890")).await;
        let profile = account.profile();
        let value = serde_json::to_value(&profile).expect("profile json");
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["handle"], "acme");
        assert_eq!(value["verified"], false);
    }
}
