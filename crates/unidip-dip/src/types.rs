//! Result types for dip computations

use crate::ecdf::Ecdf;
use crate::envelope::Envelope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive index range into a support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModalInterval {
    pub lo: usize,
    pub hi: usize,
}

impl ModalInterval {
    pub fn new(lo: usize, hi: usize) -> Self {
        Self { lo, hi }
    }

    /// Number of support points covered; at least 1 for an inclusive range
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.hi + 1 - self.lo
    }

    pub fn contains(&self, index: usize) -> bool {
        self.lo <= index && index <= self.hi
    }

    /// Translate by `offset` support points
    pub fn shifted(self, offset: usize) -> Self {
        Self::new(self.lo + offset, self.hi + offset)
    }

    /// True when the interval spans every index of a support of length `n`
    pub fn covers_all(&self, n: usize) -> bool {
        self.lo == 0 && self.hi + 1 >= n
    }

    /// Support values at both ends
    pub fn bounds_in(&self, ecdf: &Ecdf) -> (f64, f64) {
        let support = ecdf.support();
        (support[self.lo], support[self.hi])
    }
}

impl fmt::Display for ModalInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Intermediate curves of a full dip computation
///
/// `lower` and `upper` hold the boundary segments fixed by each refinement
/// step, outermost first. `gcm` and `lcm` are the envelopes of the last
/// window examined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DipEnvelopes {
    pub lower: Vec<Envelope>,
    pub upper: Vec<Envelope>,
    pub gcm: Envelope,
    pub lcm: Envelope,
}

/// Output of the dip statistic engine in full mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DipResult {
    pub dip: f64,
    pub modal_interval: ModalInterval,
    /// Support values at the modal interval's ends
    pub modal_bounds: (f64, f64),
    pub envelopes: DipEnvelopes,
    pub ecdf: Ecdf,
}

/// Output of a bootstrap dip test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DipTestResult {
    pub dip: f64,
    /// `None` when the null distribution collapsed to all-zero dips
    pub p_value: Option<f64>,
    pub modal_interval: ModalInterval,
    pub modal_bounds: (f64, f64),
}

impl DipTestResult {
    /// Significant at level `alpha`; an undefined p-value never is
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value.is_some_and(|p| p <= alpha)
    }
}

impl fmt::Display for DipTestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.p_value {
            Some(p) => write!(f, "dip={:.5}, p={:.4}, modal={}", self.dip, p, self.modal_interval),
            None => write!(f, "dip={:.5}, p=undefined, modal={}", self.dip, self.modal_interval),
        }
    }
}
