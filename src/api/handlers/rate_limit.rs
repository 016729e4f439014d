//! Cooldown throttling primitives.
//!
//! Bursty actions (alert dispatch per owner) are throttled behind a small
//! trait so the in-process map can later be swapped for a shared counter
//! store without touching callers. The in-process implementation is
//! best-effort for a single instance: it is neither durable across
//! restarts nor shared between instances.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleDecision {
    Allowed,
    Limited { retry_after: Duration },
}

pub trait Throttle: Send + Sync {
    fn allow(&self, key: &str) -> ThrottleDecision;
}

/// One action per key per window, tracked in process memory.
pub struct CooldownThrottle {
    window: Duration,
    recent: Mutex<HashMap<String, Instant>>,
}

impl CooldownThrottle {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            recent: Mutex::new(HashMap::new()),
        }
    }
}

impl Throttle for CooldownThrottle {
    fn allow(&self, key: &str) -> ThrottleDecision {
        let mut recent = self.recent.lock().expect("throttle lock");
        recent.retain(|_, at| at.elapsed() < self.window);
        if let Some(at) = recent.get(key) {
            let retry_after = self.window.saturating_sub(at.elapsed());
            return ThrottleDecision::Limited { retry_after };
        }
        recent.insert(key.to_string(), Instant::now());
        ThrottleDecision::Allowed
    }
}

#[derive(Clone, Debug)]
pub struct NoopThrottle;

impl Throttle for NoopThrottle {
    fn allow(&self, _key: &str) -> ThrottleDecision {
        ThrottleDecision::Allowed
    }
}
