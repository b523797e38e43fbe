//! Visualization interface for the recursive partitioner
//!
//! The partitioner reports each stage to a [`ClusterVisualizer`]. Renderers
//! live outside this workspace; [`RecordingVisualizer`] keeps the events in
//! memory for inspection and tests.

use crate::types::{ClusterInterval, SliceDecision, SliceKind};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use unidip_core::Result;
use unidip_dip::{DipTestResult, Ecdf, ModalInterval};

/// Trait for observing partitioner stages
///
/// Ranges are inclusive support indices into the root ECDF. Errors returned
/// from these methods never abort clustering.
pub trait ClusterVisualizer {
    /// Record the ECDF clustering starts from
    fn record_ecdf(&self, ecdf: &Ecdf) -> Result<()>;

    /// Record the dip test of one recursion slice and its outcome
    fn record_slice(
        &self,
        range: (usize, usize),
        kind: SliceKind,
        test: Option<&DipTestResult>,
        decision: SliceDecision,
    ) -> Result<()>;

    /// Record a gate test deciding whether leftover data is explored
    fn record_gate(&self, range: (usize, usize), test: &DipTestResult, passed: bool) -> Result<()>;

    /// Record a boundary slice's modal interval before and after widening
    fn record_widening(
        &self,
        range: (usize, usize),
        modal: ModalInterval,
        widened: ModalInterval,
    ) -> Result<()>;

    /// Record the merged output
    fn record_final_intervals(&self, intervals: &[ClusterInterval]) -> Result<()>;

    /// Check if this visualizer actually records anything
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Null visualizer that does nothing (for when visualization is disabled)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullClusterVisualizer;

impl ClusterVisualizer for NullClusterVisualizer {
    fn record_ecdf(&self, _ecdf: &Ecdf) -> Result<()> {
        Ok(())
    }

    fn record_slice(
        &self,
        _range: (usize, usize),
        _kind: SliceKind,
        _test: Option<&DipTestResult>,
        _decision: SliceDecision,
    ) -> Result<()> {
        Ok(())
    }

    fn record_gate(
        &self,
        _range: (usize, usize),
        _test: &DipTestResult,
        _passed: bool,
    ) -> Result<()> {
        Ok(())
    }

    fn record_widening(
        &self,
        _range: (usize, usize),
        _modal: ModalInterval,
        _widened: ModalInterval,
    ) -> Result<()> {
        Ok(())
    }

    fn record_final_intervals(&self, _intervals: &[ClusterInterval]) -> Result<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// One recorded partitioner stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClusterEvent {
    Ecdf {
        support_len: usize,
    },
    Slice {
        range: (usize, usize),
        kind: SliceKind,
        test: Option<DipTestResult>,
        decision: SliceDecision,
    },
    Gate {
        range: (usize, usize),
        test: DipTestResult,
        passed: bool,
    },
    Widening {
        range: (usize, usize),
        modal: ModalInterval,
        widened: ModalInterval,
    },
    Final {
        intervals: Vec<ClusterInterval>,
    },
}

/// In-memory visualizer
#[derive(Debug, Default)]
pub struct RecordingVisualizer {
    events: RefCell<Vec<ClusterEvent>>,
}

impl RecordingVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<ClusterEvent> {
        self.events.borrow().clone()
    }

    /// Recorded slice events in visiting order
    pub fn slices(&self) -> Vec<ClusterEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, ClusterEvent::Slice { .. }))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: ClusterEvent) -> Result<()> {
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

impl ClusterVisualizer for RecordingVisualizer {
    fn record_ecdf(&self, ecdf: &Ecdf) -> Result<()> {
        self.push(ClusterEvent::Ecdf {
            support_len: ecdf.len(),
        })
    }

    fn record_slice(
        &self,
        range: (usize, usize),
        kind: SliceKind,
        test: Option<&DipTestResult>,
        decision: SliceDecision,
    ) -> Result<()> {
        self.push(ClusterEvent::Slice {
            range,
            kind,
            test: test.cloned(),
            decision,
        })
    }

    fn record_gate(&self, range: (usize, usize), test: &DipTestResult, passed: bool) -> Result<()> {
        self.push(ClusterEvent::Gate {
            range,
            test: test.clone(),
            passed,
        })
    }

    fn record_widening(
        &self,
        range: (usize, usize),
        modal: ModalInterval,
        widened: ModalInterval,
    ) -> Result<()> {
        self.push(ClusterEvent::Widening {
            range,
            modal,
            widened,
        })
    }

    fn record_final_intervals(&self, intervals: &[ClusterInterval]) -> Result<()> {
        self.push(ClusterEvent::Final {
            intervals: intervals.to_vec(),
        })
    }
}
