//! Clustering configuration

use serde::{Deserialize, Serialize};
use unidip_core::{Error, Result};
use unidip_dip::bootstrap::DEFAULT_TRIAL_COUNT;
use unidip_dip::NullModel;

/// Parameters threaded through every recursion frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnidipConfig {
    /// Significance threshold; a slice splits when `p <= alpha`
    pub alpha: f64,
    /// Bootstrap trials per dip test
    pub trial_count: usize,
    /// Adjacent intervals whose index gap is at most this are merged
    pub merge_distance: usize,
    /// Input is a list of bin heights at positions `0..n`
    pub is_histogram: bool,
    /// Seed for the bootstrap; `None` seeds from the thread-local generator
    pub seed: Option<u64>,
    pub null_model: NullModel,
}

impl Default for UnidipConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            trial_count: DEFAULT_TRIAL_COUNT,
            merge_distance: 1,
            is_histogram: false,
            seed: None,
            null_model: NullModel::UniformSample,
        }
    }
}

impl UnidipConfig {
    /// Reject hand-built configurations the partitioner cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(Error::InvalidParameter(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        if self.trial_count == 0 {
            return Err(Error::InvalidParameter(
                "trial count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
