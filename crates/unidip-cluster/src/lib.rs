//! Unimodal clustering with the dip test
//!
//! This crate partitions one-dimensional data into unimodal clusters without
//! being told how many clusters exist. It repeatedly applies Hartigan's dip
//! test (from `unidip-dip`) to slices of the data, splitting wherever the
//! test rejects unimodality.
//!
//! # Algorithm Overview
//!
//! 1. Test the whole support; if unimodal, the support is one cluster
//! 2. Otherwise recurse into the modal interval the dip engine reports
//! 3. Explore the data left over beside the outermost modes, but only when
//!    the leftover together with its neighbouring mode is multimodal
//! 4. Modes found in leftover data are widened by mirroring, since their
//!    other flank may lie in a neighbouring slice
//! 5. Merge touching intervals and report them in original units
//!
//! # Examples
//!
//! ```rust
//! use unidip_cluster::{NullClusterVisualizer, UnidipBuilder};
//! use unidip_core::math::normal::quantile_grid;
//!
//! let mut data = quantile_grid(300, 0.0, 1.0);
//! data.extend(quantile_grid(300, 20.0, 1.0));
//! data.extend(quantile_grid(300, 40.0, 1.0));
//!
//! let unidip = UnidipBuilder::new(NullClusterVisualizer)
//!     .alpha(0.05)
//!     .seed(42)
//!     .build();
//!
//! let clusters = unidip.cluster(&data).unwrap();
//! for cluster in &clusters {
//!     println!("cluster {}", cluster);
//! }
//! assert_eq!(clusters.len(), 3);
//! ```

pub mod builder;
pub mod config;
pub mod merge;
pub mod partition;
pub mod types;
pub mod visualization;
pub mod widener;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_data;

// Re-exports
pub use builder::{default_unidip, seeded_unidip, UnidipBuilder};
pub use config::UnidipConfig;
pub use merge::merge_intervals;
pub use partition::{unidip, Unidip};
pub use types::{ClusterInterval, SliceDecision, SliceKind};
pub use visualization::{
    ClusterEvent, ClusterVisualizer, NullClusterVisualizer, RecordingVisualizer,
};
pub use widener::widen;
