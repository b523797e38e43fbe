//! Dip test behavior on known distributions

use rand::prelude::*;
use rand_distr::Normal;
use unidip_core::math::normal::quantile_grid;
use unidip_dip::*;

fn bimodal_grid() -> Vec<f64> {
    let mut data = quantile_grid(100, 0.0, 1.0);
    data.extend(quantile_grid(100, 8.0, 1.0));
    data
}

#[test]
fn test_single_spike_histogram_is_not_significant() {
    let ecdf = Ecdf::from_counts(&[1.0, 1.0, 1.0, 50.0, 1.0, 1.0, 1.0]).unwrap();

    for seed in 0..5 {
        let sample_null = dip_test(&ecdf, 100, Some(seed));
        assert!(
            sample_null.p_value.unwrap() > 0.05,
            "seed {}: {}",
            seed,
            sample_null
        );

        let mut rng = StdRng::seed_from_u64(seed);
        let histogram_null = SignificanceTester::new(100)
            .with_null_model(NullModel::UniformHistogram)
            .test(&ecdf, &mut rng);
        assert!(histogram_null.p_value.unwrap() > 0.05);
    }
}

#[test]
fn test_separated_grids_are_significant() {
    let ecdf = Ecdf::from_sample(&bimodal_grid()).unwrap();
    let result = dip_test(&ecdf, 100, Some(3));

    println!("bimodal grid: {}", result);
    assert!(result.dip > 0.1);
    assert_eq!(result.p_value, Some(1.0 / 101.0));
    assert!(result.is_significant(0.05));
}

#[test]
fn test_single_normal_grid_is_not_significant() {
    let ecdf = Ecdf::from_sample(&quantile_grid(200, 5.0, 2.0)).unwrap();
    let result = dip_test(&ecdf, 100, Some(3));

    println!("unimodal grid: {}", result);
    assert!(result.dip < 0.01);
    assert!(!result.is_significant(0.05));
}

#[test]
fn test_random_bimodal_sample() {
    let mut rng = StdRng::seed_from_u64(42);
    let left = Normal::new(-5.0, 1.0).unwrap();
    let right = Normal::new(5.0, 1.0).unwrap();
    let mut data: Vec<f64> = (0..150).map(|_| left.sample(&mut rng)).collect();
    data.extend((0..150).map(|_| right.sample(&mut rng)));

    let ecdf = Ecdf::from_sample(&data).unwrap();
    let result = dip_test(&ecdf, 100, Some(42));
    assert!(result.is_significant(0.05), "{}", result);
}

#[test]
fn test_full_result_carries_ecdf_and_bounds() {
    let data = bimodal_grid();
    let result = compute_dip(&data, None).unwrap();

    assert_eq!(result.ecdf.len(), data.len());
    let (start, end) = result.modal_bounds;
    assert!(start <= end);
    assert_eq!(start, result.ecdf.support()[result.modal_interval.lo]);
    assert_eq!(end, result.ecdf.support()[result.modal_interval.hi]);
    assert!(!result.envelopes.gcm.is_empty());
}

#[test]
fn test_unsorted_histogram_matches_sorted() {
    let support = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let sorted = compute_dip(&support, Some(&[5.0, 1.0, 1.0, 1.0, 1.0, 5.0])).unwrap();
    let shuffled_support = [3.0, 0.0, 5.0, 1.0, 4.0, 2.0];
    let shuffled = compute_dip(&shuffled_support, Some(&[1.0, 5.0, 5.0, 1.0, 1.0, 1.0])).unwrap();
    assert_eq!(sorted.dip, shuffled.dip);
    assert_eq!(sorted.modal_interval, shuffled.modal_interval);
}

#[test]
fn test_critical_values_rank_observed_dips() {
    let mut rng = StdRng::seed_from_u64(11);
    let uniform = rand_distr::Uniform::new(0.0, 1.0);
    let critical = critical_values(&uniform, &[0.5, 0.99], 200, 50, &mut rng).unwrap();

    let bimodal = Ecdf::from_sample(&bimodal_grid()).unwrap();
    assert!(dip_statistic(&bimodal) > critical[1]);
}
