// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

use crate::touch::TouchPoint;

/// A touch-session lifecycle event delivered by the host's gesture layer.
///
/// `delta` is always the accumulated movement since the gesture started, not
/// the movement since the previous event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent<'a> {
    /// A touch went down while the controller was idle.
    Start {
        /// All active touches.
        touches: &'a [TouchPoint],
    },
    /// Touches moved while the controller was idle; asks whether to claim the gesture.
    MoveIntent {
        /// All active touches.
        touches: &'a [TouchPoint],
        /// Accumulated movement since gesture start.
        delta: Vec2,
    },
    /// The controller was granted the gesture.
    Grant {
        /// All active touches.
        touches: &'a [TouchPoint],
    },
    /// Touches moved while the controller owns the gesture.
    Move {
        /// All active touches.
        touches: &'a [TouchPoint],
        /// Accumulated movement since gesture start.
        delta: Vec2,
    },
    /// All touches lifted.
    Release,
    /// Another responder asked to take over the gesture.
    TerminationRequest,
}

impl GestureEvent<'_> {
    /// Number of active touches carried by the event.
    #[must_use]
    pub fn touch_count(&self) -> usize {
        match self {
            Self::Start { touches }
            | Self::MoveIntent { touches, .. }
            | Self::Grant { touches }
            | Self::Move { touches, .. } => touches.len(),
            Self::Release | Self::TerminationRequest => 0,
        }
    }
}
