//! Empirical cumulative distribution over a weighted support
//!
//! Every dip computation starts here: a raw sample is collapsed into unique
//! sorted values with multiplicities, a histogram is sorted by position, and
//! both end up as the same [`Ecdf`] shape.

use serde::{Deserialize, Serialize};
use unidip_core::utils::{argsort, ensure_finite, is_strictly_increasing, unique_counts};
use unidip_core::{Error, Result};

/// Weighted step-function CDF over a strictly increasing support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ecdf {
    /// Strictly increasing positions
    support: Vec<f64>,
    /// Nonnegative weight per position
    weights: Vec<f64>,
    /// Weight divided by total weight
    mass: Vec<f64>,
    /// Cumulative mass; last entry is exactly 1
    cdf: Vec<f64>,
}

impl Ecdf {
    /// Build from an unsorted raw sample, collapsing duplicates into weights
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unidip_dip::Ecdf;
    ///
    /// let ecdf = Ecdf::from_sample(&[3.0, 1.0, 3.0, 2.0]).unwrap();
    /// assert_eq!(ecdf.support(), &[1.0, 2.0, 3.0]);
    /// assert_eq!(ecdf.weights(), &[1.0, 1.0, 2.0]);
    /// assert_eq!(ecdf.cdf(), &[0.25, 0.5, 1.0]);
    /// ```
    pub fn from_sample(sample: &[f64]) -> Result<Self> {
        if sample.is_empty() {
            return Err(Error::empty_input("sample"));
        }
        ensure_finite(sample, "sample")?;
        let (support, weights) = unique_counts(sample);
        Self::from_sorted(support, weights)
    }

    /// Build from explicit histogram positions and weights
    ///
    /// Positions need not be sorted; weights are permuted along with them.
    /// Duplicate positions are rejected.
    pub fn from_histogram(support: &[f64], weights: &[f64]) -> Result<Self> {
        if support.len() != weights.len() {
            return Err(Error::size_mismatch(support.len(), weights.len(), "histogram weights"));
        }
        if support.is_empty() {
            return Err(Error::empty_input("histogram"));
        }
        ensure_finite(support, "histogram support")?;

        let (support, weights) = if is_strictly_increasing(support) {
            (support.to_vec(), weights.to_vec())
        } else {
            let order = argsort(support);
            let support: Vec<f64> = order.iter().map(|&i| support[i]).collect();
            let weights: Vec<f64> = order.iter().map(|&i| weights[i]).collect();
            (support, weights)
        };
        if !is_strictly_increasing(&support) {
            return Err(Error::InvalidInput(
                "histogram support must not contain duplicates".to_string(),
            ));
        }
        Self::from_sorted(support, weights)
    }

    /// Build from bare bin counts; bin `i` sits at position `i`
    pub fn from_counts(counts: &[f64]) -> Result<Self> {
        if counts.is_empty() {
            return Err(Error::empty_input("histogram"));
        }
        let support = (0..counts.len()).map(|i| i as f64).collect();
        Self::from_sorted(support, counts.to_vec())
    }

    fn from_sorted(support: Vec<f64>, weights: Vec<f64>) -> Result<Self> {
        ensure_finite(&weights, "weights")?;
        if weights.iter().any(|&w| w < 0.0) {
            return Err(Error::InvalidInput("weights must be nonnegative".to_string()));
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(Error::InvalidInput("total weight must be positive".to_string()));
        }
        if !total.is_finite() {
            return Err(Error::InvalidInput("total weight overflows".to_string()));
        }

        let mass: Vec<f64> = weights.iter().map(|w| w / total).collect();
        let mut running = 0.0;
        let mut cdf: Vec<f64> = weights
            .iter()
            .map(|w| {
                running += w;
                running / total
            })
            .collect();
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Ok(Self {
            support,
            weights,
            mass,
            cdf,
        })
    }

    /// Renormalized ECDF over the inclusive index range `[lo, hi]`
    ///
    /// Returns `None` for an empty or out-of-bounds range, or when the range
    /// carries no weight.
    pub fn subrange(&self, lo: usize, hi: usize) -> Option<Ecdf> {
        if lo > hi || hi >= self.len() {
            return None;
        }
        Self::from_sorted(
            self.support[lo..=hi].to_vec(),
            self.weights[lo..=hi].to_vec(),
        )
        .ok()
    }

    /// Number of distinct support points
    pub fn len(&self) -> usize {
        self.support.len()
    }

    /// Always false for a successfully built ECDF
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    pub fn support(&self) -> &[f64] {
        &self.support
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// CDF just before each support point (`cdf - mass`)
    pub fn left_limits(&self) -> Vec<f64> {
        self.cdf.iter().zip(&self.mass).map(|(c, m)| c - m).collect()
    }

    /// Smallest and largest support value
    pub fn bounds(&self) -> (f64, f64) {
        let first = self.support.first().copied().unwrap_or(0.0);
        let last = self.support.last().copied().unwrap_or(0.0);
        (first, last)
    }

    /// Too few points (or a single repeated value) to say anything about
    /// modality; the dip of such an ECDF is 0 by definition
    pub fn is_degenerate(&self) -> bool {
        let (first, last) = self.bounds();
        self.len() <= 4 || first == last
    }
}
