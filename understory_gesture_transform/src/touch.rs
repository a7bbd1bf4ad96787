// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch samples and the two-finger geometry derived from them.

use kurbo::Point;

/// One active touch as reported by the host for the current event.
///
/// Positions are in page/device space. The controller never stores touches
/// beyond the event that carries them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Host-assigned identifier of the touch.
    pub id: u64,
    /// Page-space position of the touch.
    pub position: Point,
}

impl TouchPoint {
    /// Creates a touch sample at `(x, y)`.
    #[must_use]
    pub const fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// Euclidean distance between the first two active touches.
///
/// Returns `None` when fewer than two touches are active. Any touches past the
/// second are ignored.
#[must_use]
pub fn two_touch_distance(touches: &[TouchPoint]) -> Option<f64> {
    match touches {
        [first, second, ..] => Some((second.position - first.position).hypot()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_of_three_four_five_triangle() {
        let touches = [TouchPoint::new(0, 0.0, 0.0), TouchPoint::new(1, 3.0, 4.0)];
        assert_eq!(two_touch_distance(&touches), Some(5.0));
    }

    #[test]
    fn distance_is_order_independent() {
        let a = TouchPoint::new(0, 10.0, -2.0);
        let b = TouchPoint::new(1, -5.0, 6.0);
        assert_eq!(two_touch_distance(&[a, b]), two_touch_distance(&[b, a]));
    }

    #[test]
    fn distance_ignores_extra_touches() {
        let touches = [
            TouchPoint::new(0, 0.0, 0.0),
            TouchPoint::new(1, 6.0, 8.0),
            TouchPoint::new(2, 500.0, 500.0),
        ];
        assert_eq!(two_touch_distance(&touches), Some(10.0));
    }

    #[test]
    fn distance_needs_two_touches() {
        assert_eq!(two_touch_distance(&[]), None);
        assert_eq!(two_touch_distance(&[TouchPoint::new(0, 1.0, 1.0)]), None);
    }

    #[test]
    fn coincident_touches_have_zero_distance() {
        let touches = [TouchPoint::new(0, 4.0, 4.0), TouchPoint::new(1, 4.0, 4.0)];
        assert_eq!(two_touch_distance(&touches), Some(0.0));
    }
}
