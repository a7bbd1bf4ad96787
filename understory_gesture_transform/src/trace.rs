// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observability hooks for the gesture state machine.
//!
//! The controller does not log on its own. Embedders that want to know why a
//! gesture was (or was not) claimed, or why a pinch produced no scale, pass a
//! [`GestureTrace`] sink to
//! [`GestureTransformController::with_trace`](crate::GestureTransformController::with_trace)
//! and forward the [`TraceRecord`]s to whatever logging facility they use.
//!
//! `()` is the no-op sink. [`TraceRecorder`] keeps every record in memory.

use alloc::vec::Vec;

use crate::state::{BaselineState, TransformPatch};

/// Why a branch of the state machine was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Degenerate {
    /// A two-touch distance was needed but fewer than two touches were active.
    MissingSecondTouch,
    /// The stored reference distance is zero or not finite.
    UnusableReference,
    /// The pinch ratio produced a scale that is zero or not finite.
    CollapsedScale,
    /// The current scale is zero or not finite, so a pan delta cannot be rescaled.
    UnusableScale,
}

/// Which lifecycle query or decision a [`TraceRecord::Engage`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngageQuery {
    /// A touch started.
    Start,
    /// A touch moved while the controller was idle.
    Move,
    /// Another responder asked the controller to let go.
    Termination,
}

/// One observable step of the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceRecord {
    /// The controller was attached by the host.
    Initialized,
    /// The controller was detached by the host.
    TornDown,
    /// An engage query was answered.
    Engage {
        /// The query.
        query: EngageQuery,
        /// Number of active touches.
        touches: usize,
        /// The answer.
        engaged: bool,
    },
    /// A pinch grant captured a new reference distance.
    ReferenceCaptured {
        /// The captured two-touch distance.
        distance: f64,
    },
    /// A move produced a non-empty patch.
    Patched(TransformPatch),
    /// The current transform was committed as the new baseline.
    Committed(BaselineState),
    /// A branch was skipped because of degenerate geometry.
    Degenerate(Degenerate),
    /// An event arrived while the controller was detached and was dropped.
    Ignored,
}

/// A callback sink for controller trace records.
pub trait GestureTrace {
    /// Called once per record, in the order the records occur.
    fn record(&mut self, record: TraceRecord);
}

impl GestureTrace for () {
    fn record(&mut self, _record: TraceRecord) {}
}

impl<T: GestureTrace + ?Sized> GestureTrace for &mut T {
    fn record(&mut self, record: TraceRecord) {
        (**self).record(record);
    }
}

/// Stores every trace record it receives.
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    records: Vec<TraceRecord>,
}

impl TraceRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records received so far.
    #[must_use]
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Records describing degenerate geometry, in order.
    pub fn degenerate(&self) -> impl Iterator<Item = Degenerate> + '_ {
        self.records.iter().filter_map(|record| match record {
            TraceRecord::Degenerate(kind) => Some(*kind),
            _ => None,
        })
    }

    /// Removes all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl GestureTrace for TraceRecorder {
    fn record(&mut self, record: TraceRecord) {
        self.records.push(record);
    }
}
