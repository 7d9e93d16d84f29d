//! Live subscription configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Limits for the duplex subscription endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionConfig {
    /// Events buffered per event kind before slow subscribers skip ahead
    #[serde(default = "default_buffer")]
    pub buffer: usize,

    /// Seconds a client has to send `connection_init`
    #[serde(default = "default_handshake_timeout")]
    pub handshake_timeout_secs: u64,
}

impl SubscriptionConfig {
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.buffer == 0 {
            return Err(ValidationError::InvalidSubscriptionBuffer);
        }
        if self.handshake_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer: default_buffer(),
            handshake_timeout_secs: default_handshake_timeout(),
        }
    }
}

fn default_buffer() -> usize {
    256
}

fn default_handshake_timeout() -> u64 {
    10
}
