// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture_transform --heading-base-level=0

//! Understory Gesture Transform: map multi-touch gestures to a scale and translation.
//!
//! This crate provides a small, headless controller that interprets a touch
//! session (touch-down, move, release) as a pan or a pinch and maintains a
//! uniform scale plus a 2D translation for a visual container:
//!
//! - Two touches spreading apart or together scale the container by the ratio
//!   of the current to the initial finger distance.
//! - One touch dragging translates the container by the accumulated delta,
//!   divided by the current scale so the content tracks the finger.
//! - Releasing commits the transform as a baseline, so the next gesture
//!   continues from where the last one stopped.
//!
//! It does **not** perform hit testing, event dispatch, or rendering. Callers
//! are expected to:
//! - Decide which container receives a touch stream (for example with
//!   `understory_responder`).
//! - Forward responder-style lifecycle callbacks to
//!   [`GestureTransformController`].
//! - Apply [`TransformState::ops`] or [`TransformState::to_affine`] when
//!   drawing the container.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Vec2;
//! use understory_gesture_transform::{GestureConfig, GestureTransformController, TouchPoint};
//!
//! let mut controller = GestureTransformController::new(GestureConfig::default()).unwrap();
//! controller.initialize();
//!
//! // One finger pans. Taps are never claimed on touch-down.
//! let finger = [TouchPoint::new(0, 40.0, 40.0)];
//! assert!(!controller.should_engage_on_start(&finger));
//! assert!(controller.should_engage_on_move(&finger, Vec2::new(20.0, 0.0)));
//! controller.on_grant(&finger);
//! controller.on_move(&finger, Vec2::new(20.0, 0.0));
//! controller.on_release();
//!
//! assert_eq!(controller.transform().translate_x(), 20.0);
//! ```
//!
//! ## Pure transitions
//!
//! The state machine itself is the pure function [`reducer::reduce`].
//! [`GestureTransformController`] is a thin shell around it that stores the
//! model, publishes patches, and forwards [`trace`] records. Use the reducer
//! directly to replay recorded sessions or to drive the state machine from a
//! host that already owns its state.
//!
//! ## Design notes
//!
//! - Scale is uniform. Rotation is intentionally left out.
//! - There is no inertia and no clamping of scale or translation; hosts that
//!   need them can post-process the transform or a `Viewport2D` from
//!   `understory_view2d`.
//! - Degenerate geometry (coincident fingers, a missing second touch) never
//!   produces a non-finite transform. The affected branch is skipped and a
//!   [`trace::Degenerate`] record is emitted.
//! - [`Gating`] selects between the historical engage/pan-window rules and a
//!   symmetric variant.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod event;
pub mod reducer;
mod state;
mod touch;
pub mod trace;

pub use config::{ConfigError, Gating, GestureConfig};
pub use controller::{GestureTransformController, IgnorePatch, Outcome};
pub use event::GestureEvent;
pub use reducer::GesturePhase;
pub use state::{BaselineState, TransformOp, TransformPatch, TransformState};
pub use touch::{TouchPoint, two_touch_distance};
pub use trace::{GestureTrace, TraceRecorder};
