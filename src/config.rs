//! Gateway configuration.

use crate::error::{GatewayError, Result};
use std::ops::RangeInclusive;

/// Tunables for id generation and the simulated processor.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Literal prepended to every generated id.
    pub id_prefix: String,

    /// Range the numeric part of an id is drawn from.
    pub id_range: RangeInclusive<u32>,

    /// Probability that processing a payment succeeds.
    pub success_rate: f64,

    /// Seed for reproducible runs; `None` seeds from system entropy.
    pub seed: Option<u64>,

    /// How many id draws `create` makes before giving up on a collision.
    pub max_id_attempts: usize,
}

impl GatewayConfig {
    pub const DEFAULT_SUCCESS_RATE: f64 = 0.7;

    /// Checks that the configuration can drive a gateway.
    pub fn validate(&self) -> Result<()> {
        if self.id_range.is_empty() {
            return Err(GatewayError::InvalidConfig(format!(
                "id range {}..={} is empty",
                self.id_range.start(),
                self.id_range.end()
            )));
        }

        if !self.success_rate.is_finite() || !(0.0..=1.0).contains(&self.success_rate) {
            return Err(GatewayError::InvalidConfig(format!(
                "success rate {} must be between 0 and 1",
                self.success_rate
            )));
        }

        if self.max_id_attempts == 0 {
            return Err(GatewayError::InvalidConfig(
                "max id attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            id_prefix: "pay_".to_string(),
            id_range: 1000..=9999,
            success_rate: Self::DEFAULT_SUCCESS_RATE,
            seed: None,
            max_id_attempts: 32,
        }
    }
}
