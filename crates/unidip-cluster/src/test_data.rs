//! Test data generators for clustering tests
//!
//! Grid generators are deterministic normal quantiles: perfectly smooth
//! samples whose cluster count does not depend on a random draw. Random
//! generators use fixed seeds for reproducibility.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use unidip_core::math::normal::quantile_grid;

/// Standard test distributions for unimodal clustering
pub struct TestDistributions;

impl TestDistributions {
    /// 1000 quantiles of N(0, 1)
    pub fn unimodal_grid() -> Vec<f64> {
        quantile_grid(1000, 0.0, 1.0)
    }

    /// 100 quantiles each of N(0, 1) and N(8, 1)
    pub fn bimodal_grid() -> Vec<f64> {
        let mut data = quantile_grid(100, 0.0, 1.0);
        data.extend(quantile_grid(100, 8.0, 1.0));
        data
    }

    /// 300 quantiles each of N(0, 1), N(20, 1) and N(40, 1)
    pub fn trimodal_grid() -> Vec<f64> {
        [0.0, 20.0, 40.0]
            .iter()
            .flat_map(|&mean| quantile_grid(300, mean, 1.0))
            .collect()
    }

    /// 60 bins with three bell-shaped peaks centred on bins 10, 30 and 50
    pub fn three_peak_histogram() -> Vec<f64> {
        const PEAK: [f64; 11] = [1.0, 4.0, 10.0, 18.0, 26.0, 30.0, 26.0, 18.0, 10.0, 4.0, 1.0];
        let mut bins = vec![0.0; 60];
        for centre in [10, 30, 50] {
            for (offset, height) in PEAK.iter().enumerate() {
                bins[centre + offset - 5] = *height;
            }
        }
        bins
    }

    /// 10 bins with three small bumps; too few bins for any split
    pub fn small_bumpy_histogram() -> Vec<f64> {
        vec![1.0, 2.0, 3.0, 2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0]
    }

    /// 1000 samples from N(0, 1)
    pub fn unimodal_normal() -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(42);
        let normal = Normal::new(0.0, 1.0).unwrap();
        (0..1000).map(|_| normal.sample(&mut rng)).collect()
    }

    /// 600 samples: 300 each from N(-5, 1) and N(5, 1)
    pub fn bimodal_normal() -> Vec<f64> {
        Self::mixture(&[-5.0, 5.0], 300, 42)
    }

    /// 900 samples: 300 each from N(0, 1), N(20, 1) and N(40, 1)
    pub fn trimodal_normal() -> Vec<f64> {
        Self::mixture(&[0.0, 20.0, 40.0], 300, 42)
    }

    /// `per_mode` unit-variance normal samples around each mean
    pub fn mixture(means: &[f64], per_mode: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut data = Vec::with_capacity(means.len() * per_mode);
        for &mean in means {
            let normal = Normal::new(mean, 1.0).unwrap();
            data.extend((0..per_mode).map(|_| normal.sample(&mut rng)));
        }
        data
    }
}
