//! Utility functions for working with data slices

use crate::{Error, Result};
use ordered_float::OrderedFloat;

/// Check that every value is finite
pub fn ensure_finite(data: &[f64], context: &str) -> Result<()> {
    if data.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite(context));
    }
    Ok(())
}

/// Sort finite data ascending and return a new vector
///
/// # Examples
///
/// ```rust
/// use unidip_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by_key(|&x| OrderedFloat(x));
    sorted
}

/// Collapse a sample into strictly increasing unique values and their
/// multiplicities
///
/// # Examples
///
/// ```rust
/// use unidip_core::utils::unique_counts;
///
/// let (values, counts) = unique_counts(&[2.0, 1.0, 2.0, 3.0, 2.0]);
/// assert_eq!(values, vec![1.0, 2.0, 3.0]);
/// assert_eq!(counts, vec![1.0, 3.0, 1.0]);
/// ```
pub fn unique_counts(data: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut values: Vec<f64> = Vec::new();
    let mut counts: Vec<f64> = Vec::new();
    for x in sorted(data) {
        match values.last() {
            Some(&last) if last == x => {
                if let Some(c) = counts.last_mut() {
                    *c += 1.0;
                }
            }
            _ => {
                values.push(x);
                counts.push(1.0);
            }
        }
    }
    (values, counts)
}

/// Permutation that sorts `keys` ascending
pub fn argsort(keys: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by_key(|&i| OrderedFloat(keys[i]));
    order
}

/// True when the slice is strictly increasing
pub fn is_strictly_increasing(data: &[f64]) -> bool {
    data.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite(&[1.0, 2.0], "sample").is_ok());
        assert!(ensure_finite(&[1.0, f64::NAN], "sample").is_err());
        assert!(ensure_finite(&[f64::NEG_INFINITY], "sample").is_err());
    }

    #[test]
    fn test_argsort() {
        let keys = [3.0, -1.0, 2.0];
        assert_eq!(argsort(&keys), vec![1, 2, 0]);
    }

    #[test]
    fn test_strictly_increasing() {
        assert!(is_strictly_increasing(&[1.0, 2.0, 3.0]));
        assert!(!is_strictly_increasing(&[1.0, 1.0, 3.0]));
        assert!(is_strictly_increasing(&[]));
    }

    proptest! {
        #[test]
        fn prop_unique_counts_preserve_total(data in prop::collection::vec(-50i32..50, 1..200)) {
            let data: Vec<f64> = data.into_iter().map(f64::from).collect();
            let (values, counts) = unique_counts(&data);
            prop_assert!(is_strictly_increasing(&values));
            prop_assert_eq!(values.len(), counts.len());
            prop_assert_eq!(counts.iter().sum::<f64>() as usize, data.len());
        }
    }
}
