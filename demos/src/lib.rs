// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the demos: scripted touch streams and a tiny responder
//! loop that feeds them to a [`GestureTransformController`].

use kurbo::{Point, Vec2};
use understory_gesture_transform::{
    GestureTrace, GestureTransformController, TouchPoint, TransformPatch,
};

/// The active touches at one instant of a scripted session.
pub type Frame = Vec<TouchPoint>;

/// Two fingers centered on `center`, moving from `from` apart to `to` apart
/// horizontally over `steps` frames (plus the initial frame).
pub fn pinch(center: Point, from: f64, to: f64, steps: usize) -> Vec<Frame> {
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps.max(1) as f64;
            let half = (from + (to - from) * t) / 2.0;
            vec![
                TouchPoint::new(1, center.x - half, center.y),
                TouchPoint::new(2, center.x + half, center.y),
            ]
        })
        .collect()
}

/// One finger moving from `start` by `by` over `steps` frames (plus the initial frame).
pub fn pan(start: Point, by: Vec2, steps: usize) -> Vec<Frame> {
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps.max(1) as f64;
            let p = start + by * t;
            vec![TouchPoint::new(1, p.x, p.y)]
        })
        .collect()
}

fn centroid(frame: &[TouchPoint]) -> Point {
    if frame.is_empty() {
        return Point::ORIGIN;
    }
    let sum = frame
        .iter()
        .fold(Vec2::ZERO, |acc, touch| acc + touch.position.to_vec2());
    (sum / frame.len() as f64).to_point()
}

/// Plays one session through `controller` the way a responder system would.
///
/// The first frame is offered as a touch-down, later frames as move intents
/// until the controller claims the gesture, then as moves. The session ends
/// with a release. Deltas are the centroid movement since the first frame.
///
/// Returns `true` if the controller claimed the gesture.
pub fn play<F, T>(controller: &mut GestureTransformController<F, T>, frames: &[Frame]) -> bool
where
    F: FnMut(&TransformPatch),
    T: GestureTrace,
{
    let Some((first, rest)) = frames.split_first() else {
        return false;
    };
    let origin = centroid(first);
    let mut granted = controller.should_engage_on_start(first);
    if granted {
        controller.on_grant(first);
    }
    for frame in rest {
        let delta = centroid(frame) - origin;
        if !granted {
            granted = controller.should_engage_on_move(frame, delta);
            if !granted {
                continue;
            }
            controller.on_grant(frame);
        }
        controller.on_move(frame, delta);
    }
    if granted {
        controller.on_release();
    }
    granted
}
