//! Hartigan's dip statistic
//!
//! The dip measures how far an empirical CDF is from the closest unimodal
//! CDF. Starting from the whole support, each step fits the convex minorant
//! of the CDF's left limits and the concave majorant of the CDF, finds the
//! largest gap between them at a touchpoint, and narrows the window to the
//! candidate modal interval that gap implies. Segments left outside the
//! window are fixed; their deviation from the CDF accumulates into the dip.
//!
//! Reference: Hartigan, J. A.; Hartigan, P. M. "The Dip Test of Unimodality",
//! Annals of Statistics 13 (1985), 70-84.

use crate::ecdf::Ecdf;
use crate::envelope::{greatest_convex_minorant, least_concave_majorant, Envelope};
use crate::types::{DipEnvelopes, DipResult, ModalInterval};
use tracing::trace;
use unidip_core::{Error, Result};

/// Compute the dip of a raw sample (`weights = None`) or of a histogram
///
/// # Examples
///
/// ```rust
/// use unidip_dip::compute_dip;
///
/// let bimodal = [1.0, 1.1, 1.2, 1.3, 1.4, 8.0, 8.1, 8.2, 8.3, 8.4];
/// let result = compute_dip(&bimodal, None).unwrap();
/// assert!(result.dip > 0.1);
///
/// let flat = compute_dip(&[1.0, 2.0, 3.0], None).unwrap();
/// assert_eq!(flat.dip, 0.0);
/// ```
pub fn compute_dip(support: &[f64], weights: Option<&[f64]>) -> Result<DipResult> {
    let ecdf = match weights {
        Some(weights) => Ecdf::from_histogram(support, weights)?,
        None => Ecdf::from_sample(support)?,
    };
    Ok(dip(&ecdf))
}

/// Full-output dip: statistic, modal interval and every envelope examined
pub fn dip(ecdf: &Ecdf) -> DipResult {
    let mut trace = EnvelopeTrace::default();
    let (dip, modal_interval) = refine(ecdf, Some(&mut trace));

    let envelopes = match trace.last {
        Some((gcm, lcm)) => DipEnvelopes {
            lower: trace.lower,
            upper: trace.upper,
            gcm,
            lcm,
        },
        None => DipEnvelopes {
            gcm: greatest_convex_minorant(&ecdf.left_limits(), ecdf.support()),
            lcm: least_concave_majorant(ecdf.cdf(), ecdf.support()),
            ..DipEnvelopes::default()
        },
    };

    DipResult {
        dip,
        modal_interval,
        modal_bounds: modal_interval.bounds_in(ecdf),
        envelopes,
        ecdf: ecdf.clone(),
    }
}

/// Reduced-output dip: the scalar only, with no envelope bookkeeping
pub fn dip_statistic(ecdf: &Ecdf) -> f64 {
    refine(ecdf, None).0
}

/// Dip and modal interval without envelope bookkeeping
///
/// Same statistic and interval as [`dip`], for callers that discard the
/// envelopes.
pub fn dip_with_interval(ecdf: &Ecdf) -> (f64, ModalInterval) {
    refine(ecdf, None)
}

/// Dip of a raw sample, for callers holding plain values
pub fn sample_dip(sample: &[f64]) -> Result<f64> {
    if sample.is_empty() {
        return Err(Error::empty_input("sample"));
    }
    Ecdf::from_sample(sample).map(|ecdf| dip_statistic(&ecdf))
}

#[derive(Default)]
struct EnvelopeTrace {
    lower: Vec<Envelope>,
    upper: Vec<Envelope>,
    last: Option<(Envelope, Envelope)>,
}

/// Where one refinement step wants to narrow the window to
struct Narrowing {
    gap: f64,
    xl: usize,
    xr: usize,
}

impl Narrowing {
    /// Largest envelope gap at a touchpoint; ties between the two sides go
    /// to the convex (left) envelope.
    fn select(gcm: &Envelope, lcm: &Envelope) -> Self {
        let gap_at = |t: usize| (lcm.values[t] - gcm.values[t]).abs();
        let max_gap = |touchpoints: &[usize]| {
            touchpoints
                .iter()
                .map(|&t| gap_at(t))
                .fold(0.0_f64, f64::max)
        };
        let d_left = max_gap(&gcm.touchpoints);
        let d_right = max_gap(&lcm.touchpoints);
        let last = lcm.len().saturating_sub(1);

        if d_right > d_left {
            let xr = lcm
                .touchpoints
                .iter()
                .rev()
                .copied()
                .find(|&t| gap_at(t) == d_right)
                .unwrap_or(last);
            let xl = gcm
                .touchpoints
                .iter()
                .rev()
                .copied()
                .find(|&t| t <= xr)
                .unwrap_or(0);
            Self { gap: d_right, xl, xr }
        } else {
            let xl = gcm
                .touchpoints
                .iter()
                .copied()
                .find(|&t| gap_at(t) == d_left)
                .unwrap_or(0);
            let xr = lcm
                .touchpoints
                .iter()
                .copied()
                .find(|&t| t >= xl)
                .unwrap_or(last);
            Self { gap: d_left, xl, xr }
        }
    }
}

/// The refinement loop shared by both output modes
fn refine(ecdf: &Ecdf, mut trace: Option<&mut EnvelopeTrace>) -> (f64, ModalInterval) {
    let n = ecdf.len();
    if ecdf.is_degenerate() {
        return (0.0, ModalInterval::new(0, n.saturating_sub(1)));
    }

    let support = ecdf.support();
    let cdf = ecdf.cdf();
    let left_limits = ecdf.left_limits();

    let (mut lo, mut hi) = (0, n - 1);
    let mut max_deviation = 0.0_f64;

    loop {
        let m = hi - lo + 1;
        let window_cdf = &cdf[lo..=hi];
        let window_limits = &left_limits[lo..=hi];

        let gcm = greatest_convex_minorant(window_limits, &support[lo..=hi]).with_offset(lo);
        let lcm = least_concave_majorant(window_cdf, &support[lo..=hi]).with_offset(lo);
        let Narrowing { gap, xl, xr } = Narrowing::select(&gcm, &lcm);

        trace!(lo, hi, gap, xl, xr, max_deviation, "dip refinement step");

        if gap <= max_deviation {
            if let Some(trace) = trace.as_deref_mut() {
                trace.last = Some((gcm, lcm));
            }
            return (max_deviation / 2.0, ModalInterval::new(lo, hi));
        }

        // The new modal edges xl and xr are excluded: the unimodal fit may
        // jump there, so the mode's own mass never counts as deviation.
        let left_diff = (0..xl)
            .map(|i| (gcm.values[i] - window_cdf[i]).abs())
            .fold(0.0_f64, f64::max);
        let right_diff = (xr + 1..m)
            .map(|i| (lcm.values[i] - window_limits[i]).abs())
            .fold(0.0_f64, f64::max);
        max_deviation = max_deviation.max(left_diff).max(right_diff);

        if let Some(trace) = trace.as_deref_mut() {
            trace.lower.push(gcm.segment(0, xl));
            trace.upper.push(lcm.segment(xr, m - 1));
        }

        let stalled = xl == 0 && xr == m - 1;
        if xr == 0 || xl == m || stalled {
            if let Some(trace) = trace.as_deref_mut() {
                trace.last = Some((gcm, lcm));
            }
            return (max_deviation / 2.0, ModalInterval::new(lo + xl, lo + xr));
        }

        hi = lo + xr;
        lo += xl;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degenerate_inputs_have_zero_dip() {
        let tiny = Ecdf::from_sample(&[1.0, 5.0, 2.0, 9.0]).unwrap();
        assert_eq!(dip_statistic(&tiny), 0.0);
        let result = dip(&tiny);
        assert_eq!(result.modal_interval, ModalInterval::new(0, 3));
        assert!(result.envelopes.lower.is_empty());
        assert_eq!(result.envelopes.lcm.len(), 4);

        let constant = Ecdf::from_sample(&[3.0; 50]).unwrap();
        assert_eq!(dip_statistic(&constant), 0.0);
    }

    #[test]
    fn test_single_spike_is_nearly_unimodal() {
        let ecdf = Ecdf::from_counts(&[1.0, 1.0, 1.0, 50.0, 1.0, 1.0, 1.0]).unwrap();
        let result = dip(&ecdf);
        assert_eq!(result.modal_interval, ModalInterval::new(3, 3));
        assert_relative_eq!(result.dip, 0.5 / 56.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_spikes_have_large_dip() {
        let ecdf = Ecdf::from_counts(&[50.0, 1.0, 1.0, 1.0, 1.0, 1.0, 50.0]).unwrap();
        let value = dip_statistic(&ecdf);
        assert_relative_eq!(value, 25.0 / 105.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reduced_mode_matches_full_mode() {
        let sample: Vec<f64> = (0..40)
            .map(|i| if i % 2 == 0 { i as f64 * 0.1 } else { 20.0 + i as f64 * 0.13 })
            .collect();
        let ecdf = Ecdf::from_sample(&sample).unwrap();
        let full = dip(&ecdf);
        assert_eq!(full.dip, dip_statistic(&ecdf));
        assert_eq!((full.dip, full.modal_interval), dip_with_interval(&ecdf));
    }

    #[test]
    fn test_modal_interval_locates_a_mode() {
        let mut sample: Vec<f64> = (0..30).map(|i| i as f64 * 0.01).collect();
        sample.extend((0..30).map(|i| 10.0 + i as f64 * 0.01));
        let result = compute_dip(&sample, None).unwrap();
        let (start, end) = result.modal_bounds;
        // The modal interval must not straddle the gap between the groups
        assert!(end < 1.0 || start >= 10.0, "modal bounds {start}..{end}");
        assert!(result.dip > 0.2);
    }

    #[test]
    fn test_trace_segments_tile_the_outside_of_the_modal_interval() {
        let mut sample: Vec<f64> = (0..25).map(|i| i as f64 * 0.02).collect();
        sample.extend((0..25).map(|i| 5.0 + i as f64 * 0.02));
        let result = compute_dip(&sample, None).unwrap();
        let lower_reach = result
            .envelopes
            .lower
            .iter()
            .map(|e| e.offset + e.len() - 1)
            .max();
        if let Some(reach) = lower_reach {
            assert_eq!(reach, result.modal_interval.lo);
        }
        for segment in &result.envelopes.upper {
            assert!(segment.offset >= result.modal_interval.hi);
        }
    }

    #[test]
    fn test_compute_dip_rejects_bad_histograms() {
        assert!(compute_dip(&[1.0, 2.0], Some(&[1.0])).is_err());
        assert!(compute_dip(&[1.0, 1.0, 2.0], Some(&[1.0, 2.0, 3.0])).is_err());
        assert!(sample_dip(&[]).is_err());
    }
}
