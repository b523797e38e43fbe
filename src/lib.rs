//! # unidip
//!
//! Hartigan's dip test of unimodality and the recursive unimodal clustering
//! built on it.
//!
//! The workspace is split into focused crates:
//!
//! - [`unidip_core`]: error types and numeric helpers
//! - [`unidip_dip`]: ECDF construction, convex/concave envelopes, the dip
//!   statistic and its bootstrap significance test
//! - [`unidip_cluster`]: the recursive partitioner, its configuration and
//!   visualizer interface
//!
//! ## Quick Start
//!
//! ```rust
//! use unidip::prelude::*;
//!
//! let mut data = quantile_grid(200, 0.0, 1.0);
//! data.extend(quantile_grid(200, 20.0, 1.0));
//!
//! // Is the sample unimodal?
//! let ecdf = Ecdf::from_sample(&data)?;
//! let test = dip_test(&ecdf, 100, Some(42));
//! assert!(test.is_significant(0.05));
//!
//! // Where are the modes?
//! let config = UnidipConfig { seed: Some(42), ..Default::default() };
//! let clusters = unidip(&data, &config)?;
//! assert_eq!(clusters.len(), 2);
//! # Ok::<(), unidip::Error>(())
//! ```

pub use unidip_cluster;
pub use unidip_core;
pub use unidip_dip;

pub use unidip_core::{Error, Result};

pub use unidip_dip::{
    compute_dip, critical_values, dip, dip_statistic, dip_test, sample_dip, DipResult,
    DipTestResult, Ecdf, ModalInterval, NullModel, SignificanceTester,
};

pub use unidip_cluster::{
    merge_intervals, unidip, ClusterInterval, ClusterVisualizer, NullClusterVisualizer,
    RecordingVisualizer, Unidip, UnidipBuilder, UnidipConfig,
};

/// Everything needed for typical use
pub mod prelude {
    pub use unidip_core::math::normal::quantile_grid;
    pub use unidip_core::{Error, Result};

    pub use unidip_dip::{compute_dip, dip_test, DipResult, DipTestResult, Ecdf, ModalInterval};

    pub use unidip_cluster::{
        merge_intervals, unidip, ClusterInterval, ClusterVisualizer, NullClusterVisualizer, Unidip,
        UnidipBuilder, UnidipConfig,
    };
}
