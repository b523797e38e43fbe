//! Core types for unimodal clustering

use serde::{Deserialize, Serialize};
use std::fmt;
use unidip_dip::Ecdf;

/// A unimodal cluster in original coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterInterval {
    /// First support index covered (inclusive)
    pub start_index: usize,
    /// Last support index covered (inclusive)
    pub end_index: usize,
    /// Support value at `start_index`
    pub start: f64,
    /// Support value at `end_index`
    pub end: f64,
}

impl ClusterInterval {
    /// Interval over `[start_index, end_index]` of `ecdf`'s support
    pub fn from_indices(ecdf: &Ecdf, start_index: usize, end_index: usize) -> Self {
        let support = ecdf.support();
        Self {
            start_index,
            end_index,
            start: support[start_index],
            end: support[end_index],
        }
    }

    /// Width in original units
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Check if a value falls within this interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }

    /// Number of support points covered
    pub fn support_len(&self) -> usize {
        self.end_index + 1 - self.start_index
    }
}

impl fmt::Display for ClusterInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.4}, {:.4}] (indices {}..={})",
            self.start, self.end, self.start_index, self.end_index
        )
    }
}

/// Role of a slice in the recursion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SliceKind {
    /// The modal interval of a parent slice
    Model,
    /// Leftover data beside a parent's modes
    Boundary,
}

/// What the partitioner decided for one slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SliceDecision {
    /// Too few points or no mass; contributes nothing
    Degenerate,
    /// Consistent with a single mode; contributes one interval
    Unimodal,
    /// Significant dip; split around the modal interval
    Multimodal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_interval_helpers() {
        let ecdf = Ecdf::from_sample(&[0.5, 1.0, 2.0, 4.0]).unwrap();
        let interval = ClusterInterval::from_indices(&ecdf, 1, 3);
        assert_eq!(interval.start, 1.0);
        assert_eq!(interval.end, 4.0);
        assert_eq!(interval.width(), 3.0);
        assert_eq!(interval.support_len(), 3);
        assert!(interval.contains(2.5));
        assert!(!interval.contains(0.5));
        assert_eq!(interval.to_string(), "[1.0000, 4.0000] (indices 1..=3)");
    }
}
