//! Greatest convex minorant and least concave majorant of a step function
//!
//! Both envelopes are piecewise linear over the support positions. The GCM
//! is built by repeatedly walking from the current anchor to the remaining
//! point of smallest slope; the LCM is the GCM of the reflected function,
//! reflected back.

use serde::{Deserialize, Serialize};

/// Piecewise-linear envelope over a window of the support
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Support index of the window's first point
    pub offset: usize,
    /// Envelope value at every window point
    pub values: Vec<f64>,
    /// Window-relative indices where the envelope equals the step function.
    /// Strictly increasing; always contains the first and last index.
    pub touchpoints: Vec<usize>,
}

impl Envelope {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Move the window start by `offset` support points
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Touchpoints translated into support indices
    pub fn absolute_touchpoints(&self) -> impl Iterator<Item = usize> + '_ {
        self.touchpoints.iter().map(move |&t| t + self.offset)
    }

    /// Copy of the window points `[from, to]` (window-relative, inclusive)
    pub(crate) fn segment(&self, from: usize, to: usize) -> Envelope {
        Envelope {
            offset: self.offset + from,
            values: self.values[from..=to].to_vec(),
            touchpoints: self
                .touchpoints
                .iter()
                .filter(|&&t| t >= from && t <= to)
                .map(|&t| t - from)
                .collect(),
        }
    }
}

/// Greatest convex minorant of `cdf` over strictly increasing `support`
///
/// Slope ties resolve to the leftmost candidate, which makes the touchpoint
/// sequence (and everything downstream) deterministic.
///
/// # Examples
///
/// ```rust
/// use unidip_dip::envelope::greatest_convex_minorant;
///
/// let gcm = greatest_convex_minorant(&[0.1, 0.5, 0.6, 1.0], &[0.0, 1.0, 2.0, 3.0]);
/// assert_eq!(gcm.touchpoints, vec![0, 2, 3]);
/// assert!(gcm.values.iter().zip(&[0.1, 0.5, 0.6, 1.0]).all(|(g, c)| g <= c));
/// ```
pub fn greatest_convex_minorant(cdf: &[f64], support: &[f64]) -> Envelope {
    debug_assert_eq!(cdf.len(), support.len());
    let n = cdf.len().min(support.len());
    if n == 0 {
        return Envelope::default();
    }

    let mut values = Vec::with_capacity(n);
    let mut touchpoints = vec![0];
    values.push(cdf[0]);

    let mut anchor = 0;
    while anchor + 1 < n {
        let (x0, y0) = (support[anchor], cdf[anchor]);
        let slope_to = |j: usize| (cdf[j] - y0) / (support[j] - x0);

        let mut next = anchor + 1;
        let mut min_slope = slope_to(next);
        for j in anchor + 2..n {
            let slope = slope_to(j);
            if slope < min_slope {
                min_slope = slope;
                next = j;
            }
        }

        for j in anchor + 1..next {
            values.push(y0 + (support[j] - x0) * min_slope);
        }
        values.push(cdf[next]);
        touchpoints.push(next);
        anchor = next;
    }

    Envelope {
        offset: 0,
        values,
        touchpoints,
    }
}

/// Least concave majorant of `cdf` over strictly increasing `support`
///
/// Computed as the GCM of the function reflected through both axes.
pub fn least_concave_majorant(cdf: &[f64], support: &[f64]) -> Envelope {
    let n = cdf.len().min(support.len());
    if n == 0 {
        return Envelope::default();
    }
    let last = support[n - 1];
    let reflected_cdf: Vec<f64> = cdf[..n].iter().rev().map(|c| 1.0 - c).collect();
    let reflected_support: Vec<f64> = support[..n].iter().rev().map(|x| last - x).collect();

    let reflected = greatest_convex_minorant(&reflected_cdf, &reflected_support);

    let mut values: Vec<f64> = reflected.values.iter().rev().map(|v| 1.0 - v).collect();
    let touchpoints: Vec<usize> = reflected
        .touchpoints
        .iter()
        .rev()
        .map(|&t| n - 1 - t)
        .collect();
    // Reflection round-trips may lose the last bit; touchpoints stay exact.
    for &t in &touchpoints {
        values[t] = cdf[t];
    }

    Envelope {
        offset: 0,
        values,
        touchpoints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trivial_inputs() {
        assert!(greatest_convex_minorant(&[], &[]).is_empty());
        let single = greatest_convex_minorant(&[0.4], &[2.0]);
        assert_eq!(single.values, vec![0.4]);
        assert_eq!(single.touchpoints, vec![0]);
        let single = least_concave_majorant(&[1.0], &[2.0]);
        assert_eq!(single.touchpoints, vec![0]);
    }

    #[test]
    fn test_gcm_of_convex_function_touches_everywhere() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| x * x / 16.0).collect();
        let gcm = greatest_convex_minorant(&ys, &xs);
        assert_eq!(gcm.touchpoints, vec![0, 1, 2, 3, 4]);
        assert_eq!(gcm.values, ys);
    }

    #[test]
    fn test_gcm_interpolates_between_touchpoints() {
        let xs = [0.0, 1.0, 2.0, 4.0];
        let ys = [0.0, 0.5, 0.5, 1.0];
        let gcm = greatest_convex_minorant(&ys, &xs);
        // slope to index 2 is 0.25, to index 3 is 0.25: leftmost wins
        assert_eq!(gcm.touchpoints, vec![0, 2, 3]);
        assert_relative_eq!(gcm.values[1], 0.25);
    }

    #[test]
    fn test_lcm_of_concave_function() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.4, 0.7, 0.9, 1.0];
        let lcm = least_concave_majorant(&ys, &xs);
        assert_eq!(lcm.touchpoints, vec![0, 1, 2, 3]);
        assert_eq!(lcm.values, ys.to_vec());
    }

    #[test]
    fn test_lcm_bridges_a_jump() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.1, 0.2, 0.3, 0.9, 1.0];
        let lcm = least_concave_majorant(&ys, &xs);
        assert_eq!(lcm.touchpoints, vec![0, 3, 4]);
        assert_relative_eq!(lcm.values[1], 0.1 + 0.8 / 3.0, epsilon = 1e-12);
        assert!(lcm.values.iter().zip(&ys).all(|(l, c)| l >= c));
    }

    #[test]
    fn test_segment_and_offsets() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.1, 0.2, 0.3, 0.9, 1.0];
        let lcm = least_concave_majorant(&ys, &xs).with_offset(10);
        let tail = lcm.segment(3, 4);
        assert_eq!(tail.offset, 13);
        assert_eq!(tail.touchpoints, vec![0, 1]);
        assert_eq!(lcm.absolute_touchpoints().collect::<Vec<_>>(), vec![10, 13, 14]);
    }
}
