//! In-memory store for one-time verification secrets.
//!
//! Records expire passively: once `expires_at` elapses a record can no
//! longer match a lookup, whether or not it was consumed. A background
//! reaper physically removes expired rows on an interval, the moral
//! equivalent of a TTL index. The store does not enforce the
//! one-live-secret-per-track invariant; callers delete before inserting.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::debug;
use uuid::Uuid;

use super::types::Channel;

#[derive(Clone, Debug)]
pub(crate) struct SecretRecord {
    pub(crate) id: Uuid,
    pub(crate) identifier: String,
    pub(crate) channel: Channel,
    pub(crate) code_hash: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) expires_at: DateTime<Utc>,
}

impl SecretRecord {
    pub(crate) fn expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Lookup outcome, so callers can tell "expired" apart from "never existed".
#[derive(Debug)]
pub(crate) enum SecretLookup {
    Live(SecretRecord),
    Expired,
    Missing,
}

pub struct SecretStore {
    records: RwLock<HashMap<Uuid, SecretRecord>>,
}

impl SecretStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) async fn put(
        &self,
        identifier: &str,
        channel: Channel,
        code_hash: String,
        ttl_seconds: i64,
    ) -> SecretRecord {
        let now = Utc::now();
        let record = SecretRecord {
            id: Uuid::new_v4(),
            identifier: identifier.to_string(),
            channel,
            code_hash,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        };
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        record
    }

    /// The live secret for (identifier, channel), if any.
    pub(crate) async fn find_live(&self, identifier: &str, channel: Channel) -> SecretLookup {
        let now = Utc::now();
        let records = self.records.read().await;
        let mut saw_expired = false;
        let mut newest: Option<&SecretRecord> = None;
        for record in records.values() {
            if record.identifier != identifier || record.channel != channel {
                continue;
            }
            if record.expired(now) {
                saw_expired = true;
                continue;
            }
            if newest.map_or(true, |current| record.created_at > current.created_at) {
                newest = Some(record);
            }
        }
        match newest {
            Some(record) => SecretLookup::Live(record.clone()),
            None if saw_expired => SecretLookup::Expired,
            None => SecretLookup::Missing,
        }
    }

    /// Most recent record for (identifier, channel) regardless of expiry.
    /// Regeneration cooldowns are measured against its creation time.
    pub(crate) async fn find_latest(
        &self,
        identifier: &str,
        channel: Channel,
    ) -> Option<SecretRecord> {
        let records = self.records.read().await;
        records
            .values()
            .filter(|record| record.identifier == identifier && record.channel == channel)
            .max_by_key(|record| record.created_at)
            .cloned()
    }

    pub(crate) async fn consume(&self, id: Uuid) -> bool {
        let mut records = self.records.write().await;
        records.remove(&id).is_some()
    }

    pub(crate) async fn delete_for(&self, identifier: &str, channel: Channel) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.identifier != identifier || record.channel != channel);
        before - records.len()
    }

    /// Remove expired rows; returns how many were dropped.
    pub(crate) async fn reap_expired(&self) -> usize {
        let now = Utc::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.expired(now));
        before - records.len()
    }

    #[cfg(test)]
    pub(crate) async fn live_count(&self, identifier: &str, channel: Channel) -> usize {
        let now = Utc::now();
        let records = self.records.read().await;
        records
            .values()
            .filter(|record| {
                record.identifier == identifier
                    && record.channel == channel
                    && !record.expired(now)
            })
            .count()
    }
}

impl Default for SecretStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the background reaper that prunes expired secrets on an interval.
pub fn spawn_secret_reaper(
    store: Arc<SecretStore>,
    interval: std::time::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            sleep(interval).await;
            let reaped = store.reap_expired().await;
            if reaped > 0 {
                debug!(reaped, "reaped expired verification secrets");
            }
        }
    })
}
