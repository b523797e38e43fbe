//! Recursive partitioning of a support into unimodal intervals

use crate::config::UnidipConfig;
use crate::merge::merge_intervals;
use crate::types::{ClusterInterval, SliceDecision, SliceKind};
use crate::visualization::{ClusterVisualizer, NullClusterVisualizer};
use crate::widener::widen;
use rand::prelude::*;
use tracing::{debug, instrument};
use unidip_core::Result;
use unidip_dip::{DipTestResult, Ecdf, ModalInterval, SignificanceTester};

/// Recursive unimodal clustering with the dip test.
///
/// The algorithm works by:
/// 1. Testing the whole support for unimodality
/// 2. On a significant dip, recursing into the modal interval, which may
///    itself hold several modes
/// 3. Exploring leftover data on each side of the outermost modes found,
///    when that data together with the adjacent mode is still multimodal
/// 4. Widening modes found in leftover slices, whose other flank may have
///    gone to a sibling slice
/// 5. Merging touching intervals and mapping indices back to values
///
/// Recursion runs on an explicit frame stack, so deeply nested data cannot
/// overflow the call stack.
pub struct Unidip<V = NullClusterVisualizer> {
    config: UnidipConfig,
    visualizer: V,
}

impl Unidip<NullClusterVisualizer> {
    pub fn new(config: UnidipConfig) -> Self {
        Self::with_visualizer(config, NullClusterVisualizer)
    }
}

impl Default for Unidip<NullClusterVisualizer> {
    fn default() -> Self {
        Self::new(UnidipConfig::default())
    }
}

impl<V: ClusterVisualizer> Unidip<V> {
    pub fn with_visualizer(config: UnidipConfig, visualizer: V) -> Self {
        Self { config, visualizer }
    }

    pub fn config(&self) -> &UnidipConfig {
        &self.config
    }

    /// Get a reference to the visualizer
    pub fn visualizer(&self) -> &V {
        &self.visualizer
    }

    /// Cluster a raw sample, or bin heights when `is_histogram` is set
    pub fn cluster(&self, data: &[f64]) -> Result<Vec<ClusterInterval>> {
        let ecdf = if self.config.is_histogram {
            Ecdf::from_counts(data)?
        } else {
            Ecdf::from_sample(data)?
        };
        self.cluster_ecdf(&ecdf)
    }

    /// Cluster an already built ECDF
    ///
    /// Fails only on an invalid configuration; data that cannot be split
    /// yields one interval or none.
    #[instrument(skip(self, ecdf), fields(n = ecdf.len(), alpha = self.config.alpha))]
    pub fn cluster_ecdf(&self, ecdf: &Ecdf) -> Result<Vec<ClusterInterval>> {
        self.config.validate()?;
        let _ = self.visualizer.record_ecdf(ecdf);

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(thread_rng().gen()),
        };
        let mut run = Run {
            ecdf,
            config: &self.config,
            tester: SignificanceTester::new(self.config.trial_count)
                .with_null_model(self.config.null_model),
            visualizer: &self.visualizer,
            rng: &mut rng,
        };

        let raw = run.partition();
        let merged = merge_intervals(raw, self.config.merge_distance);
        let intervals: Vec<ClusterInterval> = merged
            .into_iter()
            .map(|(start, end)| ClusterInterval::from_indices(ecdf, start, end))
            .collect();

        debug!(count = intervals.len(), "clustering complete");
        let _ = self.visualizer.record_final_intervals(&intervals);
        Ok(intervals)
    }
}

/// Cluster `data` with `config` and no visualizer
///
/// # Examples
///
/// ```rust
/// use unidip_cluster::{unidip, UnidipConfig};
/// use unidip_core::math::normal::quantile_grid;
///
/// let mut data = quantile_grid(200, 0.0, 1.0);
/// data.extend(quantile_grid(200, 20.0, 1.0));
///
/// let config = UnidipConfig { seed: Some(1), ..Default::default() };
/// let clusters = unidip(&data, &config).unwrap();
/// assert_eq!(clusters.len(), 2);
/// assert!(clusters[0].end < 10.0 && clusters[1].start > 10.0);
/// ```
pub fn unidip(data: &[f64], config: &UnidipConfig) -> Result<Vec<ClusterInterval>> {
    Unidip::new(*config).cluster(data)
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    /// Not yet tested
    Enter,
    /// Modal child done; explore leftover data on the low side next
    AfterModal { modal: ModalInterval },
    /// Low side done; `high` was fixed before the low side ran
    AfterLow { high: (usize, usize) },
    /// All children done
    AfterHigh,
}

/// One slice on the explicit recursion stack (inclusive root indices)
#[derive(Debug)]
struct Frame {
    lo: usize,
    hi: usize,
    kind: SliceKind,
    stage: Stage,
    intervals: Vec<(usize, usize)>,
}

impl Frame {
    fn new(lo: usize, hi: usize, kind: SliceKind) -> Self {
        Self {
            lo,
            hi,
            kind,
            stage: Stage::Enter,
            intervals: Vec::new(),
        }
    }
}

/// Outcome of testing a freshly entered slice
enum Entry {
    Leaf(Vec<(usize, usize)>),
    Split(ModalInterval),
}

/// State of one clustering call
struct Run<'a, V, R> {
    ecdf: &'a Ecdf,
    config: &'a UnidipConfig,
    tester: SignificanceTester,
    visualizer: &'a V,
    rng: &'a mut R,
}

impl<V: ClusterVisualizer, R: Rng> Run<'_, V, R> {
    fn partition(&mut self) -> Vec<(usize, usize)> {
        let mut stack = vec![Frame::new(0, self.ecdf.len() - 1, SliceKind::Model)];
        let mut finished = Vec::new();

        while let Some(mut frame) = stack.pop() {
            let child = match frame.stage {
                Stage::Enter => match self.enter(&frame) {
                    Entry::Leaf(intervals) => {
                        frame.intervals = intervals;
                        frame.stage = Stage::AfterHigh;
                        None
                    }
                    Entry::Split(modal) => {
                        frame.stage = Stage::AfterModal { modal };
                        Some(Frame::new(modal.lo, modal.hi, SliceKind::Model))
                    }
                },
                Stage::AfterModal { modal } => {
                    let own = (modal.lo, modal.hi);
                    let candidates = || frame.intervals.iter().copied().chain([own]);
                    let low = candidates().min_by_key(|&(_, end)| end).unwrap_or(own);
                    let high = candidates().max().unwrap_or(own);
                    let child = self.low_side(&frame, low);
                    frame.stage = Stage::AfterLow { high };
                    child
                }
                Stage::AfterLow { high } => {
                    let child = self.high_side(&frame, high);
                    frame.stage = Stage::AfterHigh;
                    child
                }
                Stage::AfterHigh => {
                    let target = match stack.last_mut() {
                        Some(parent) => &mut parent.intervals,
                        None => &mut finished,
                    };
                    target.append(&mut frame.intervals);
                    continue;
                }
            };

            stack.push(frame);
            if let Some(child) = child {
                stack.push(child);
            }
        }

        finished
    }

    fn enter(&mut self, frame: &Frame) -> Entry {
        let range = (frame.lo, frame.hi);
        let slice = match self.ecdf.subrange(frame.lo, frame.hi) {
            Some(slice) if !slice.is_degenerate() => slice,
            _ => {
                let _ = self
                    .visualizer
                    .record_slice(range, frame.kind, None, SliceDecision::Degenerate);
                return Entry::Leaf(Vec::new());
            }
        };

        let test = self.tester.test(&slice, &mut *self.rng);
        let unimodal = !test.is_significant(self.config.alpha)
            || test.modal_interval.covers_all(slice.len());

        if unimodal {
            let _ = self
                .visualizer
                .record_slice(range, frame.kind, Some(&test), SliceDecision::Unimodal);
            let interval = match frame.kind {
                SliceKind::Model => (frame.lo, frame.hi),
                SliceKind::Boundary => {
                    let widened = widen(&slice, test.modal_interval);
                    let _ = self
                        .visualizer
                        .record_widening(range, test.modal_interval, widened);
                    let widened = widened.shifted(frame.lo);
                    (widened.lo, widened.hi)
                }
            };
            debug!(lo = frame.lo, hi = frame.hi, ?interval, "unimodal slice");
            return Entry::Leaf(vec![interval]);
        }

        let modal = test.modal_interval.shifted(frame.lo);
        debug!(lo = frame.lo, hi = frame.hi, %modal, p = ?test.p_value, "splitting slice");
        let _ = self
            .visualizer
            .record_slice(range, frame.kind, Some(&test), SliceDecision::Multimodal);
        Entry::Split(modal)
    }

    /// Leftover data below the lowest mode, explored when the leftover plus
    /// that mode is itself multimodal
    fn low_side(&mut self, frame: &Frame, low: (usize, usize)) -> Option<Frame> {
        let (start, end) = low;
        if start <= frame.lo || start >= frame.hi {
            return None;
        }
        self.gate(frame.lo, end)
            .then(|| Frame::new(frame.lo, start, SliceKind::Boundary))
    }

    /// Mirror image of [`Self::low_side`] above the highest mode
    fn high_side(&mut self, frame: &Frame, high: (usize, usize)) -> Option<Frame> {
        let (start, end) = high;
        if end <= frame.lo || end >= frame.hi {
            return None;
        }
        self.gate(start, frame.hi)
            .then(|| Frame::new(end, frame.hi, SliceKind::Boundary))
    }

    fn gate(&mut self, lo: usize, hi: usize) -> bool {
        let Some(slice) = self.ecdf.subrange(lo, hi) else {
            return false;
        };
        let test: DipTestResult = self.tester.test(&slice, &mut *self.rng);
        let passed = test.is_significant(self.config.alpha);
        debug!(lo, hi, p = ?test.p_value, passed, "gate test");
        let _ = self.visualizer.record_gate((lo, hi), &test, passed);
        passed
    }
}
