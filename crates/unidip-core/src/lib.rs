//! Core types shared by the unidip crates
//!
//! This crate holds the pieces every other crate in the workspace needs:
//!
//! - [`Error`] and [`Result`]: the single error surface for malformed input
//!   and unusable parameters
//! - [`utils`]: sorting and deduplication of raw samples
//! - [`math`]: the standard normal quantile function used by fixtures

pub mod error;
pub mod math;
pub mod utils;

pub use error::{Error, Result};
