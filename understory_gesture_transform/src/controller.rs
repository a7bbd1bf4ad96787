// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing controller.
//!
//! ## Usage
//!
//! 1) Build a controller with [`GestureTransformController::new`], optionally
//!    attaching a patch callback and a trace sink.
//! 2) Call [`initialize`](GestureTransformController::initialize) when the
//!    container is attached and [`teardown`](GestureTransformController::teardown)
//!    when it goes away.
//! 3) Forward the host's responder callbacks to the matching methods, or wrap
//!    them as [`GestureEvent`]s and call
//!    [`handle`](GestureTransformController::handle).
//! 4) Read [`transform`](GestureTransformController::transform) when rendering.
//!
//! ```
//! use kurbo::Vec2;
//! use understory_gesture_transform::{GestureConfig, GestureTransformController, TouchPoint};
//!
//! let mut scales = Vec::new();
//! {
//!     let mut controller = GestureTransformController::new(GestureConfig::default())
//!         .unwrap()
//!         .with_on_move(|patch| scales.extend(patch.scale));
//!     controller.initialize();
//!
//!     let down = [TouchPoint::new(0, 100.0, 100.0), TouchPoint::new(1, 200.0, 100.0)];
//!     let apart = [TouchPoint::new(0, 50.0, 100.0), TouchPoint::new(1, 250.0, 100.0)];
//!     assert!(controller.should_engage_on_move(&down, Vec2::ZERO));
//!     controller.on_grant(&down);
//!     controller.on_move(&apart, Vec2::ZERO);
//!     controller.on_release();
//!
//!     assert_eq!(controller.transform().scale, 2.0);
//! }
//! assert_eq!(scales, [2.0]);
//! ```

use kurbo::Vec2;

use crate::config::{ConfigError, GestureConfig};
use crate::event::GestureEvent;
use crate::reducer::{GestureModel, GesturePhase, reduce};
use crate::state::{BaselineState, TransformPatch, TransformState};
use crate::touch::TouchPoint;
use crate::trace::{GestureTrace, TraceRecord};

/// Patch callback used until one is supplied.
pub type IgnorePatch = fn(&TransformPatch);

fn ignore_patch(_: &TransformPatch) {}

/// What the host should do after an event was handled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Outcome {
    /// Answer to the host's question, for events that ask one.
    pub answer: Option<bool>,
    /// The patch that was applied and published, if any.
    pub patch: Option<TransformPatch>,
}

/// Maps a touch stream to a scale and translation.
///
/// The controller owns the [`TransformState`] and [`BaselineState`]; the only
/// way to change them is through events. Each transition goes through
/// [`reduce`](crate::reducer::reduce); the controller stores the result,
/// publishes patches to `on_move`, and forwards trace records.
///
/// The callback runs synchronously inside [`on_move`](Self::on_move) and
/// [`handle`](Self::handle).
#[derive(Debug)]
pub struct GestureTransformController<F = IgnorePatch, T = ()> {
    config: GestureConfig,
    model: GestureModel,
    attached: bool,
    on_move: F,
    trace: T,
}

impl GestureTransformController {
    /// Creates a detached controller with an identity transform.
    ///
    /// Fails if `config` does not [validate](GestureConfig::validate).
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            model: GestureModel::default(),
            attached: false,
            on_move: ignore_patch,
            trace: (),
        })
    }
}

impl<F, T> GestureTransformController<F, T>
where
    F: FnMut(&TransformPatch),
    T: GestureTrace,
{
    /// Replaces the patch callback.
    #[must_use]
    pub fn with_on_move<G>(self, on_move: G) -> GestureTransformController<G, T>
    where
        G: FnMut(&TransformPatch),
    {
        GestureTransformController {
            config: self.config,
            model: self.model,
            attached: self.attached,
            on_move,
            trace: self.trace,
        }
    }

    /// Replaces the trace sink.
    #[must_use]
    pub fn with_trace<U>(self, trace: U) -> GestureTransformController<F, U>
    where
        U: GestureTrace,
    {
        GestureTransformController {
            config: self.config,
            model: self.model,
            attached: self.attached,
            on_move: self.on_move,
            trace,
        }
    }

    /// Attaches the controller, starting from an identity transform.
    ///
    /// Calling this on an attached controller does nothing.
    pub fn initialize(&mut self) {
        if self.attached {
            return;
        }
        self.model = GestureModel::default();
        self.attached = true;
        self.trace.record(TraceRecord::Initialized);
    }

    /// Detaches the controller. An engaged session is committed first.
    ///
    /// The last transform stays readable. Events are ignored until the next
    /// [`initialize`](Self::initialize).
    pub fn teardown(&mut self) {
        if !self.attached {
            return;
        }
        if self.model.phase == GesturePhase::Engaged {
            self.handle(GestureEvent::Release);
        }
        self.attached = false;
        self.trace.record(TraceRecord::TornDown);
    }

    /// Returns `true` between [`initialize`](Self::initialize) and
    /// [`teardown`](Self::teardown).
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the configuration between gesture sessions.
    pub fn set_config(&mut self, config: GestureConfig) -> Result<(), ConfigError> {
        if self.model.phase == GesturePhase::Engaged {
            return Err(ConfigError::SessionActive);
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// The live transform.
    #[must_use]
    pub fn transform(&self) -> TransformState {
        self.model.transform
    }

    /// The committed baseline.
    #[must_use]
    pub fn baseline(&self) -> BaselineState {
        self.model.baseline
    }

    /// The current session phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.model.phase
    }

    /// The full state machine model.
    #[must_use]
    pub fn model(&self) -> &GestureModel {
        &self.model
    }

    /// The trace sink.
    #[must_use]
    pub fn trace(&self) -> &T {
        &self.trace
    }

    /// The trace sink, mutably.
    pub fn trace_mut(&mut self) -> &mut T {
        &mut self.trace
    }

    /// Feeds one event through the state machine.
    pub fn handle(&mut self, event: GestureEvent<'_>) -> Outcome {
        if !self.attached {
            self.trace.record(TraceRecord::Ignored);
            return Outcome::default();
        }
        let transition = reduce(&self.config, self.model, event);
        self.model = transition.model;
        for record in transition.records {
            self.trace.record(record);
        }
        if let Some(patch) = &transition.patch {
            (self.on_move)(patch);
        }
        Outcome {
            answer: transition.answer,
            patch: transition.patch,
        }
    }

    /// Whether a fresh touch-down should claim the gesture. Always `false`.
    pub fn should_engage_on_start(&mut self, touches: &[TouchPoint]) -> bool {
        self.handle(GestureEvent::Start { touches })
            .answer
            .unwrap_or(false)
    }

    /// Whether a moving gesture should be claimed.
    ///
    /// See [`GestureConfig::engages_on_move`] for the exact rule.
    pub fn should_engage_on_move(&mut self, touches: &[TouchPoint], delta: Vec2) -> bool {
        self.handle(GestureEvent::MoveIntent { touches, delta })
            .answer
            .unwrap_or(false)
    }

    /// Starts a session; captures the pinch reference when `touches` form a pinch.
    pub fn on_grant(&mut self, touches: &[TouchPoint]) {
        self.handle(GestureEvent::Grant { touches });
    }

    /// Updates the transform from the current touches and the accumulated
    /// `delta`, returning the published patch.
    pub fn on_move(&mut self, touches: &[TouchPoint], delta: Vec2) -> Option<TransformPatch> {
        self.handle(GestureEvent::Move { touches, delta }).patch
    }

    /// Ends the session and commits the transform as the next baseline.
    pub fn on_release(&mut self) {
        self.handle(GestureEvent::Release);
    }

    /// Whether to yield the gesture to another responder. Always `true`; the
    /// session is committed as on release.
    pub fn should_release_on_termination_request(&mut self) -> bool {
        self.handle(GestureEvent::TerminationRequest)
            .answer
            .unwrap_or(true)
    }

    /// Whether native (platform) responders should be blocked. Always `false`.
    #[must_use]
    pub fn should_block_native_responder(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Vec2;

    use super::GestureTransformController;
    use crate::config::{ConfigError, GestureConfig};
    use crate::reducer::GesturePhase;
    use crate::state::{BaselineState, TransformState};
    use crate::touch::TouchPoint;
    use crate::trace::{EngageQuery, TraceRecord, TraceRecorder};

    fn attached() -> GestureTransformController {
        let mut controller = GestureTransformController::new(GestureConfig::default()).unwrap();
        controller.initialize();
        controller
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = GestureConfig::default().with_zoom_touches(3, 1);
        assert_eq!(
            GestureTransformController::new(config).err(),
            Some(ConfigError::InvertedZoomWindow { min: 3, max: 1 })
        );
    }

    #[test]
    fn detached_controller_ignores_events() {
        let mut controller = GestureTransformController::new(GestureConfig::default())
            .unwrap()
            .with_trace(TraceRecorder::new());
        let pair = [TouchPoint::new(0, 0.0, 0.0), TouchPoint::new(1, 3.0, 4.0)];

        assert!(!controller.should_engage_on_move(&pair, Vec2::ZERO));
        controller.on_grant(&pair);
        assert_eq!(controller.on_move(&pair, Vec2::ZERO), None);
        assert_eq!(controller.phase(), GesturePhase::Idle);
        assert_eq!(controller.baseline(), BaselineState::default());
        assert!(
            controller
                .trace()
                .records()
                .iter()
                .all(|r| *r == TraceRecord::Ignored)
        );
    }

    #[test]
    fn callback_receives_exactly_the_changed_fields() {
        let mut patches = Vec::new();
        {
            let mut controller = GestureTransformController::new(GestureConfig::default())
                .unwrap()
                .with_on_move(|patch| patches.push(*patch));
            controller.initialize();

            let touch = [TouchPoint::new(0, 10.0, 10.0)];
            controller.on_grant(&touch);
            controller.on_move(&touch, Vec2::new(6.0, -3.0));
            // Three touches match neither window.
            let three = [touch[0], touch[0], touch[0]];
            controller.on_move(&three, Vec2::new(6.0, -3.0));
            controller.on_release();
        }

        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].scale, None);
        assert_eq!(patches[0].translation, Some(Vec2::new(6.0, -3.0)));
    }

    #[test]
    fn teardown_commits_engaged_session() {
        let mut controller = attached();
        let touch = [TouchPoint::new(0, 0.0, 0.0)];
        controller.on_grant(&touch);
        controller.on_move(&touch, Vec2::new(4.0, 0.0));
        controller.teardown();

        assert!(!controller.is_attached());
        assert_eq!(controller.phase(), GesturePhase::Idle);
        assert_eq!(controller.baseline().last_translation, Vec2::new(4.0, 0.0));
        assert_eq!(controller.transform().translation, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn initialize_resets_after_teardown() {
        let mut controller = attached();
        let touch = [TouchPoint::new(0, 0.0, 0.0)];
        controller.on_grant(&touch);
        controller.on_move(&touch, Vec2::new(4.0, 0.0));
        controller.teardown();
        controller.initialize();

        assert_eq!(controller.transform(), TransformState::IDENTITY);
        assert_eq!(controller.baseline(), BaselineState::default());
    }

    #[test]
    fn initialize_twice_keeps_state() {
        let mut controller = attached();
        let touch = [TouchPoint::new(0, 0.0, 0.0)];
        controller.on_grant(&touch);
        controller.on_move(&touch, Vec2::new(4.0, 0.0));
        controller.initialize();

        assert_eq!(controller.transform().translation, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn config_is_fixed_during_a_session() {
        let mut controller = attached();
        controller.on_grant(&[TouchPoint::new(0, 0.0, 0.0)]);
        let relaxed = GestureConfig::default().with_scalable(false);
        assert_eq!(
            controller.set_config(relaxed),
            Err(ConfigError::SessionActive)
        );

        controller.on_release();
        assert_eq!(controller.set_config(relaxed), Ok(()));
        assert!(!controller.config().scalable);
    }

    #[test]
    fn termination_request_is_granted_and_commits() {
        let mut controller = attached().with_trace(TraceRecorder::new());
        let touch = [TouchPoint::new(0, 0.0, 0.0)];
        controller.on_grant(&touch);
        controller.on_move(&touch, Vec2::new(0.0, 8.0));

        assert!(controller.should_release_on_termination_request());
        assert!(!controller.should_block_native_responder());
        assert_eq!(controller.phase(), GesturePhase::Idle);
        assert_eq!(controller.baseline().last_translation, Vec2::new(0.0, 8.0));
        assert!(controller.trace().records().contains(&TraceRecord::Engage {
            query: EngageQuery::Termination,
            touches: 0,
            engaged: false,
        }));
    }

    #[test]
    fn trace_follows_a_session() {
        let mut controller = GestureTransformController::new(GestureConfig::default())
            .unwrap()
            .with_trace(TraceRecorder::new());
        controller.initialize();
        let pair = [TouchPoint::new(0, 0.0, 0.0), TouchPoint::new(1, 3.0, 4.0)];
        controller.should_engage_on_start(&pair[..1]);
        controller.should_engage_on_move(&pair, Vec2::ZERO);
        controller.on_grant(&pair);
        controller.on_release();
        controller.teardown();

        let records = controller.trace().records();
        assert_eq!(records.first(), Some(&TraceRecord::Initialized));
        assert_eq!(
            records[1],
            TraceRecord::Engage {
                query: EngageQuery::Start,
                touches: 1,
                engaged: false,
            }
        );
        assert_eq!(
            records[2],
            TraceRecord::Engage {
                query: EngageQuery::Move,
                touches: 2,
                engaged: true,
            }
        );
        assert_eq!(records[3], TraceRecord::ReferenceCaptured { distance: 5.0 });
        assert!(matches!(records[4], TraceRecord::Committed(_)));
        assert_eq!(records.last(), Some(&TraceRecord::TornDown));
        assert_eq!(records.len(), 6);
    }
}
