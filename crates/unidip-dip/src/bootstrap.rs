//! Bootstrap significance of the dip against a uniform null
//!
//! Each trial draws a fresh null replicate of the same size as the tested
//! ECDF and computes its dip in reduced mode. Trial `i` is seeded with
//! `base + i`, where `base` comes from the caller's random source, so the
//! replicates do not depend on evaluation order and the `parallel` feature
//! produces the same p-values as the sequential path.

use crate::dip::{dip_statistic, dip_with_interval};
use crate::ecdf::Ecdf;
use crate::types::DipTestResult;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use unidip_core::{Error, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default number of bootstrap trials
pub const DEFAULT_TRIAL_COUNT: usize = 100;

/// Shape of a null replicate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullModel {
    /// `n` independent U(0,1) draws
    #[default]
    UniformSample,
    /// `n` equally spaced bins with U(0,1) heights
    UniformHistogram,
}

impl NullModel {
    fn replicate_dip(self, n: usize, seed: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let replicate = match self {
            Self::UniformSample => {
                let draws: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
                Ecdf::from_sample(&draws)
            }
            Self::UniformHistogram => {
                let heights: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
                Ecdf::from_counts(&heights)
            }
        };
        // An all-zero histogram draw has no distribution; it counts as flat.
        replicate.map(|ecdf| dip_statistic(&ecdf)).unwrap_or(0.0)
    }
}

/// Bootstrap dip tester
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignificanceTester {
    trial_count: usize,
    null_model: NullModel,
}

impl Default for SignificanceTester {
    fn default() -> Self {
        Self::new(DEFAULT_TRIAL_COUNT)
    }
}

impl SignificanceTester {
    /// Tester with `trial_count` trials (at least one) and the sample null
    pub fn new(trial_count: usize) -> Self {
        Self {
            trial_count: trial_count.max(1),
            null_model: NullModel::default(),
        }
    }

    pub fn with_null_model(mut self, null_model: NullModel) -> Self {
        self.null_model = null_model;
        self
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    pub fn null_model(&self) -> NullModel {
        self.null_model
    }

    /// Dips of `trial_count` null replicates of size `n`
    pub fn null_dips(&self, n: usize, base_seed: u64) -> Vec<f64> {
        let model = self.null_model;
        let trial = move |i: usize| model.replicate_dip(n, base_seed.wrapping_add(i as u64));

        #[cfg(feature = "parallel")]
        {
            (0..self.trial_count).into_par_iter().map(trial).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..self.trial_count).map(trial).collect()
        }
    }

    /// Dip of `ecdf` with its bootstrap p-value
    #[instrument(skip(self, ecdf, rng), fields(n = ecdf.len(), trials = self.trial_count))]
    pub fn test<R: Rng + ?Sized>(&self, ecdf: &Ecdf, rng: &mut R) -> DipTestResult {
        let (dip, modal_interval) = dip_with_interval(ecdf);
        let base_seed: u64 = rng.gen();
        let nulls = self.null_dips(ecdf.len(), base_seed);
        let p_value = p_value(dip, &nulls);

        debug!(dip, ?p_value, %modal_interval, "dip test complete");

        DipTestResult {
            dip,
            p_value,
            modal_interval,
            modal_bounds: modal_interval.bounds_in(ecdf),
        }
    }
}

/// `(#{null >= observed} + 1) / (trials + 1)`, or `None` when every null dip
/// is exactly zero
///
/// # Examples
///
/// ```rust
/// use unidip_dip::bootstrap::p_value;
///
/// assert_eq!(p_value(0.1, &[0.05, 0.2, 0.15, 0.01]), Some(3.0 / 5.0));
/// assert_eq!(p_value(0.1, &[0.0, 0.0]), None);
/// ```
pub fn p_value(observed: f64, null_dips: &[f64]) -> Option<f64> {
    if null_dips.iter().all(|&d| d == 0.0) {
        return None;
    }
    let exceeding = null_dips.iter().filter(|&&d| d >= observed).count();
    Some((exceeding + 1) as f64 / (null_dips.len() + 1) as f64)
}

/// Bootstrap dip test against the uniform sample null
///
/// `seed = None` draws a seed from the thread-local generator.
///
/// # Examples
///
/// ```rust
/// use unidip_dip::{dip_test, Ecdf};
///
/// let ecdf = Ecdf::from_counts(&[1.0, 1.0, 1.0, 50.0, 1.0, 1.0, 1.0]).unwrap();
/// let result = dip_test(&ecdf, 100, Some(7));
/// assert!(result.p_value.unwrap() > 0.05);
/// ```
#[instrument(skip(ecdf), fields(n = ecdf.len()))]
pub fn dip_test(ecdf: &Ecdf, trial_count: usize, seed: Option<u64>) -> DipTestResult {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(thread_rng().gen()),
    };
    SignificanceTester::new(trial_count).test(ecdf, &mut rng)
}

/// Monte-Carlo quantiles of the dip for samples of `sample_size` drawn from
/// `sampler`
///
/// Quantiles are interpolated linearly between order statistics of the
/// `n_samples` simulated dips.
#[instrument(skip(sampler, quantiles, rng), fields(n_quantiles = quantiles.len()))]
pub fn critical_values<D, R>(
    sampler: &D,
    quantiles: &[f64],
    sample_size: usize,
    n_samples: usize,
    rng: &mut R,
) -> Result<Vec<f64>>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    if sample_size == 0 {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }
    if n_samples == 0 {
        return Err(Error::InvalidParameter(
            "number of simulated samples must be positive".to_string(),
        ));
    }
    if let Some(&q) = quantiles
        .iter()
        .find(|q| !q.is_finite() || **q < 0.0 || **q > 1.0)
    {
        return Err(Error::InvalidParameter(format!(
            "quantile {q} is outside [0, 1]"
        )));
    }

    let mut dips = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        let draws: Vec<f64> = (0..sample_size).map(|_| sampler.sample(rng)).collect();
        dips.push(Ecdf::from_sample(&draws).map(|ecdf| dip_statistic(&ecdf))?);
    }
    dips.sort_by(f64::total_cmp);
    debug!(n_samples, sample_size, "simulated dip distribution");

    Ok(quantiles.iter().map(|&q| interpolated_quantile(&dips, q)).collect())
}

fn interpolated_quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let fraction = position - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand_distr::Uniform;

    #[test]
    fn test_p_value_counts_ties_as_exceeding() {
        assert_eq!(p_value(0.2, &[0.2, 0.1, 0.3]), Some(0.75));
        assert_eq!(p_value(1.0, &[0.1, 0.1, 0.1]), Some(0.25));
        assert_eq!(p_value(0.0, &[0.0; 10]), None);
    }

    #[test]
    fn test_degenerate_ecdf_has_undefined_p_value() {
        let ecdf = Ecdf::from_sample(&[1.0, 2.0, 3.0]).unwrap();
        let result = dip_test(&ecdf, 20, Some(1));
        assert_eq!(result.dip, 0.0);
        assert_eq!(result.p_value, None);
        assert!(!result.is_significant(0.05));
    }

    #[test]
    fn test_same_seed_same_p_value() {
        let sample: Vec<f64> = (0..60).map(|i| ((i * 37) % 60) as f64 / 7.0).collect();
        let ecdf = Ecdf::from_sample(&sample).unwrap();
        let a = dip_test(&ecdf, 50, Some(42));
        let b = dip_test(&ecdf, 50, Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_null_dips_are_seed_determined() {
        let tester = SignificanceTester::new(16).with_null_model(NullModel::UniformHistogram);
        assert_eq!(tester.null_dips(30, 9), tester.null_dips(30, 9));
        assert_eq!(tester.null_dips(30, 9).len(), 16);
        assert!(tester.null_dips(30, 9).iter().all(|d| (0.0..=0.5).contains(d)));
    }

    #[test]
    fn test_zero_trials_clamped() {
        assert_eq!(SignificanceTester::new(0).trial_count(), 1);
        assert_eq!(SignificanceTester::default().null_model(), NullModel::UniformSample);
    }

    #[test]
    fn test_critical_values_are_ordered() {
        let mut rng = StdRng::seed_from_u64(3);
        let uniform = Uniform::new(0.0, 1.0);
        let values = critical_values(&uniform, &[0.0, 0.5, 0.95, 1.0], 50, 40, &mut rng).unwrap();
        assert_eq!(values.len(), 4);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values[0] > 0.0);
    }

    #[test]
    fn test_critical_values_validation() {
        let mut rng = StdRng::seed_from_u64(3);
        let uniform = Uniform::new(0.0, 1.0);
        assert!(matches!(
            critical_values(&uniform, &[0.5], 0, 10, &mut rng),
            Err(Error::InsufficientData { .. })
        ));
        assert!(critical_values(&uniform, &[0.5], 10, 0, &mut rng).is_err());
        assert!(critical_values(&uniform, &[1.5], 10, 10, &mut rng).is_err());
        assert!(critical_values(&uniform, &[f64::NAN], 10, 10, &mut rng).is_err());
    }

    #[test]
    fn test_interpolated_quantile() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(interpolated_quantile(&sorted, 0.5), 2.5);
        assert_relative_eq!(interpolated_quantile(&sorted, 1.0), 4.0);
        assert_relative_eq!(interpolated_quantile(&[7.0], 0.3), 7.0);
    }
}
