// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture state machine as a pure transition function.
//!
//! [`reduce`] takes the current [`GestureModel`] and one [`GestureEvent`] and
//! returns the next model together with everything the caller needs to act on
//! it: the answer to an engage query, the patch to publish, and trace records.
//! Nothing here has side effects, so sessions can be replayed and tested
//! without a controller or host.
//!
//! ```
//! use understory_gesture_transform::reducer::{GestureModel, reduce};
//! use understory_gesture_transform::{GestureConfig, GestureEvent, TouchPoint};
//! use kurbo::Vec2;
//!
//! let config = GestureConfig::default();
//! let start = [TouchPoint::new(0, 0.0, 0.0), TouchPoint::new(1, 3.0, 4.0)];
//! let spread = [TouchPoint::new(0, 0.0, 0.0), TouchPoint::new(1, 6.0, 8.0)];
//!
//! let model = GestureModel::default();
//! let model = reduce(&config, model, GestureEvent::Grant { touches: &start }).model;
//! let step = reduce(&config, model, GestureEvent::Move { touches: &spread, delta: Vec2::ZERO });
//!
//! assert_eq!(step.model.transform.scale, 2.0);
//! assert_eq!(step.patch.and_then(|p| p.scale), Some(2.0));
//! ```

use kurbo::Vec2;
use smallvec::SmallVec;

use crate::config::GestureConfig;
use crate::event::GestureEvent;
use crate::state::{BaselineState, TransformPatch, TransformState};
use crate::touch::{TouchPoint, two_touch_distance};
use crate::trace::{Degenerate, EngageQuery, TraceRecord};

/// Whether the controller currently owns a gesture session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No session is in progress.
    #[default]
    Idle,
    /// A session was granted and has not been released.
    Engaged,
}

/// Everything the state machine remembers between events.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureModel {
    /// Session phase.
    pub phase: GesturePhase,
    /// The live transform.
    pub transform: TransformState,
    /// The committed transform and pinch reference.
    pub baseline: BaselineState,
}

/// Result of feeding one event to [`reduce`].
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// The next model.
    pub model: GestureModel,
    /// Answer to the host's question, for events that ask one.
    ///
    /// `Start` and `MoveIntent` ask whether to claim the gesture.
    /// `TerminationRequest` asks whether to let it go.
    pub answer: Option<bool>,
    /// The fields that changed, for a `Move` that changed anything.
    pub patch: Option<TransformPatch>,
    /// What happened, in order.
    pub records: SmallVec<[TraceRecord; 4]>,
}

impl Transition {
    fn unchanged(model: GestureModel) -> Self {
        Self {
            model,
            answer: None,
            patch: None,
            records: SmallVec::new(),
        }
    }
}

/// Advances `model` by one `event`.
#[must_use]
pub fn reduce(config: &GestureConfig, model: GestureModel, event: GestureEvent<'_>) -> Transition {
    let mut next = Transition::unchanged(model);
    match event {
        GestureEvent::Start { touches } => {
            // A lone touch-down never claims the gesture so taps reach nested content.
            next.answer = Some(false);
            next.records.push(TraceRecord::Engage {
                query: EngageQuery::Start,
                touches: touches.len(),
                engaged: false,
            });
        }
        GestureEvent::MoveIntent { touches, delta } => {
            let engaged = config.engages_on_move(touches.len(), delta);
            next.answer = Some(engaged);
            next.records.push(TraceRecord::Engage {
                query: EngageQuery::Move,
                touches: touches.len(),
                engaged,
            });
        }
        GestureEvent::Grant { touches } => grant(config, &mut next, touches),
        GestureEvent::Move { touches, delta } => step(config, &mut next, touches, delta),
        GestureEvent::Release => release(&mut next),
        GestureEvent::TerminationRequest => {
            next.answer = Some(true);
            next.records.push(TraceRecord::Engage {
                query: EngageQuery::Termination,
                touches: 0,
                engaged: false,
            });
            release(&mut next);
        }
    }
    next
}

fn grant(config: &GestureConfig, next: &mut Transition, touches: &[TouchPoint]) {
    next.model.phase = GesturePhase::Engaged;
    if !config.zooms_with(touches.len()) {
        return;
    }
    match two_touch_distance(touches) {
        Some(distance) => {
            next.model.baseline.reference_distance = distance;
            next.records.push(TraceRecord::ReferenceCaptured { distance });
        }
        None => next
            .records
            .push(TraceRecord::Degenerate(Degenerate::MissingSecondTouch)),
    }
}

fn step(config: &GestureConfig, next: &mut Transition, touches: &[TouchPoint], delta: Vec2) {
    let count = touches.len();
    let baseline = next.model.baseline;
    // Pan deltas are rescaled by the scale in effect before this event.
    let current_scale = next.model.transform.scale;
    let mut patch = TransformPatch::default();

    if config.zooms_with(count) {
        match zoom_scale(&baseline, touches) {
            Ok(scale) => patch.scale = Some(scale),
            Err(kind) => next.records.push(TraceRecord::Degenerate(kind)),
        }
    }

    if config.translates_with(count) {
        if usable(current_scale) {
            patch.translation = Some(baseline.last_translation + delta / current_scale);
        } else {
            next.records.push(TraceRecord::Degenerate(Degenerate::UnusableScale));
        }
    }

    if !patch.is_empty() {
        next.model.transform.apply(&patch);
        next.records.push(TraceRecord::Patched(patch));
        next.patch = Some(patch);
    }
}

fn zoom_scale(baseline: &BaselineState, touches: &[TouchPoint]) -> Result<f64, Degenerate> {
    if !baseline.has_usable_reference() {
        return Err(Degenerate::UnusableReference);
    }
    let distance = two_touch_distance(touches).ok_or(Degenerate::MissingSecondTouch)?;
    let scale = distance / baseline.reference_distance * baseline.last_scale;
    if usable(scale) {
        Ok(scale)
    } else {
        Err(Degenerate::CollapsedScale)
    }
}

fn release(next: &mut Transition) {
    let model = &mut next.model;
    model.phase = GesturePhase::Idle;
    model.baseline = model.baseline.committed(&model.transform);
    next.records.push(TraceRecord::Committed(model.baseline));
}

fn usable(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}
