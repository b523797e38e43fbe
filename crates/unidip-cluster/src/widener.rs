//! Recover the full extent of a mode cut short by an earlier split
//!
//! A boundary slice often holds only one flank of a mode whose other flank
//! went into a sibling slice. Reflecting the slice about its minimum (or its
//! maximum) restores a symmetric mode, and the dip engine's modal interval
//! on the reflection, mapped back, covers the flank that is actually there.

use tracing::trace;
use unidip_core::Result;
use unidip_dip::{dip_with_interval, Ecdf, ModalInterval};

/// A slice joined with its reflection, and where each point came from
#[derive(Debug, Clone)]
struct Mirror {
    ecdf: Ecdf,
    /// Mirrored support index -> index in the original slice
    origin: Vec<usize>,
}

impl Mirror {
    /// Reflect about the minimum: `2·min − v` for every `v` past the first
    /// point, followed by the slice itself
    fn left(ecdf: &Ecdf) -> Result<Self> {
        let (support, weights) = (ecdf.support(), ecdf.weights());
        let n = support.len();
        let pivot = support[0];
        let mut values = Vec::with_capacity(2 * n - 1);
        let mut mass = Vec::with_capacity(2 * n - 1);
        let mut origin = Vec::with_capacity(2 * n - 1);

        for j in (1..n).rev() {
            values.push(2.0 * pivot - support[j]);
            mass.push(weights[j]);
            origin.push(j);
        }
        values.extend_from_slice(support);
        mass.extend_from_slice(weights);
        origin.extend(0..n);

        Self::assemble(values, mass, origin)
    }

    /// Reflect about the maximum: the slice itself followed by `2·max − v`
    /// for every `v` before the last point
    fn right(ecdf: &Ecdf) -> Result<Self> {
        let (support, weights) = (ecdf.support(), ecdf.weights());
        let n = support.len();
        let pivot = support[n - 1];
        let mut values = Vec::with_capacity(2 * n - 1);
        let mut mass = Vec::with_capacity(2 * n - 1);
        let mut origin: Vec<usize> = (0..n).collect();
        values.extend_from_slice(support);
        mass.extend_from_slice(weights);

        for j in (0..n - 1).rev() {
            values.push(2.0 * pivot - support[j]);
            mass.push(weights[j]);
            origin.push(j);
        }

        Self::assemble(values, mass, origin)
    }

    fn assemble(values: Vec<f64>, mass: Vec<f64>, origin: Vec<usize>) -> Result<Self> {
        // Rounding can collapse a reflected point onto its neighbour; the
        // histogram constructor rejects that.
        let ecdf = Ecdf::from_histogram(&values, &mass)?;
        Ok(Self { ecdf, origin })
    }
}

/// Widened modal interval of a slice, local to the slice
///
/// `modal` is the slice's own modal interval. It is returned unchanged when
/// the slice is too small to mirror, when mirroring is numerically
/// impossible, or when the mirrored mode straddles the reflection pivot.
pub fn widen(ecdf: &Ecdf, modal: ModalInterval) -> ModalInterval {
    let n = ecdf.len();
    if n < 2 {
        return modal;
    }
    let (left, right) = match (Mirror::left(ecdf), Mirror::right(ecdf)) {
        (Ok(left), Ok(right)) => (left, right),
        _ => {
            trace!(n, "slice cannot be mirrored, keeping modal interval");
            return modal;
        }
    };

    let (left_dip, left_modal) = dip_with_interval(&left.ecdf);
    let (right_dip, right_modal) = dip_with_interval(&right.ecdf);
    let (mirror, mirrored) = if left_dip > right_dip {
        (&left, left_modal)
    } else {
        (&right, right_modal)
    };

    let pivot = n - 1;
    if mirrored.lo < pivot && pivot < mirrored.hi {
        trace!(%mirrored, pivot, "mirrored mode straddles the pivot");
        return modal;
    }

    let a = mirror.origin[mirrored.lo];
    let b = mirror.origin[mirrored.hi];
    ModalInterval::new(a.min(b), a.max(b))
}
