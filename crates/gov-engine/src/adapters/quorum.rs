//! In-memory quorum oracle.

use crate::ports::outbound::QuorumOracle;
use std::collections::HashMap;
use std::sync::RwLock;

/// Per-domain quorum thresholds with a fallback default.
///
/// Thresholds are mutable after construction: the engine queries the
/// oracle at every derivation, so a raise or lower applies to in-flight
/// proposals as well.
pub struct StaticQuorumOracle {
    default: u64,
    thresholds: RwLock<HashMap<String, u64>>,
}

impl StaticQuorumOracle {
    /// Oracle answering `default` for every domain without an override.
    pub fn new(default: u64) -> Self {
        Self {
            default,
            thresholds: RwLock::new(HashMap::new()),
        }
    }

    /// Sets a domain-specific threshold.
    pub fn set_required(&self, domain: impl Into<String>, required: u64) {
        if let Ok(mut thresholds) = self.thresholds.write() {
            thresholds.insert(domain.into(), required);
        }
    }
}

impl QuorumOracle for StaticQuorumOracle {
    fn required_votes(&self, domain: &str) -> u64 {
        self.thresholds
            .read()
            .ok()
            .and_then(|thresholds| thresholds.get(domain).copied())
            .unwrap_or(self.default)
    }
}
