//! Hartigan's dip test of unimodality
//!
//! This crate computes the dip statistic of a one-dimensional sample or
//! histogram and its bootstrap significance against a uniform null.
//!
//! # Algorithm Overview
//!
//! 1. Collapse the input into an [`Ecdf`]: strictly increasing support,
//!    per-point mass and cumulative distribution
//! 2. Fit the greatest convex minorant and least concave majorant
//!    ([`envelope`]) over a shrinking window of the support
//! 3. Narrow the window towards the modal interval until the envelopes
//!    stop separating; half the largest fixed deviation is the dip
//! 4. Compare the dip against dips of uniform replicates ([`bootstrap`])
//!
//! # Examples
//!
//! ```rust
//! use unidip_dip::{compute_dip, dip_test, Ecdf};
//!
//! let mut data: Vec<f64> = (0..50).map(|x| x as f64 / 10.0).collect();
//! data.extend((0..50).map(|x| 20.0 + x as f64 / 10.0));
//!
//! let result = compute_dip(&data, None).unwrap();
//! println!("dip = {:.4}, modal interval = {}", result.dip, result.modal_interval);
//!
//! let ecdf = Ecdf::from_sample(&data).unwrap();
//! let test = dip_test(&ecdf, 100, Some(42));
//! assert!(test.is_significant(0.05));
//! ```

pub mod bootstrap;
pub mod dip;
pub mod ecdf;
pub mod envelope;
pub mod types;

// Re-exports
pub use bootstrap::{critical_values, dip_test, p_value, NullModel, SignificanceTester};
pub use dip::{compute_dip, dip, dip_statistic, dip_with_interval, sample_dip};
pub use ecdf::Ecdf;
pub use envelope::{greatest_convex_minorant, least_concave_majorant, Envelope};
pub use types::{DipEnvelopes, DipResult, DipTestResult, ModalInterval};
