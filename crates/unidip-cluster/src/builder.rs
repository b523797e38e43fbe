use crate::config::UnidipConfig;
use crate::partition::Unidip;
use crate::visualization::{ClusterVisualizer, NullClusterVisualizer};
use unidip_dip::NullModel;

/// Builder for configuring and creating a [`Unidip`] partitioner.
///
/// Setters clamp out-of-range values instead of failing.
pub struct UnidipBuilder<V> {
    visualizer: V,
    config: UnidipConfig,
}

impl<V> UnidipBuilder<V>
where
    V: ClusterVisualizer,
{
    /// Creates a new builder with default parameters.
    ///
    /// # Arguments
    /// * `visualizer` - Receives every partitioner stage
    pub fn new(visualizer: V) -> Self {
        Self {
            visualizer,
            config: UnidipConfig::default(),
        }
    }

    /// Sets the significance threshold (0.0-1.0).
    ///
    /// Higher values split more readily. A non-finite value keeps the
    /// current threshold.
    pub fn alpha(mut self, alpha: f64) -> Self {
        if alpha.is_finite() {
            self.config.alpha = alpha.clamp(0.0, 1.0);
        }
        self
    }

    /// Sets the number of bootstrap trials per dip test (at least 1).
    pub fn trial_count(mut self, trial_count: usize) -> Self {
        self.config.trial_count = trial_count.max(1);
        self
    }

    /// Sets the index gap up to which neighbouring intervals merge.
    pub fn merge_distance(mut self, merge_distance: usize) -> Self {
        self.config.merge_distance = merge_distance;
        self
    }

    /// Treats input as bin heights at positions `0..n`.
    pub fn histogram(mut self, is_histogram: bool) -> Self {
        self.config.is_histogram = is_histogram;
        self
    }

    /// Fixes the bootstrap seed for reproducible output.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn null_model(mut self, null_model: NullModel) -> Self {
        self.config.null_model = null_model;
        self
    }

    /// Builds the configured partitioner.
    pub fn build(self) -> Unidip<V> {
        Unidip::with_visualizer(self.config, self.visualizer)
    }
}

impl From<UnidipConfig> for UnidipBuilder<NullClusterVisualizer> {
    fn from(config: UnidipConfig) -> Self {
        Self {
            visualizer: NullClusterVisualizer,
            config,
        }
    }
}

/// Convenience function for creating a partitioner with default parameters
pub fn default_unidip() -> Unidip<NullClusterVisualizer> {
    UnidipBuilder::new(NullClusterVisualizer).build()
}

/// Convenience function for creating a reproducible partitioner
pub fn seeded_unidip(alpha: f64, seed: u64) -> Unidip<NullClusterVisualizer> {
    UnidipBuilder::new(NullClusterVisualizer)
        .alpha(alpha)
        .seed(seed)
        .build()
}
