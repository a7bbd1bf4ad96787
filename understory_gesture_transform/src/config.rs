// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Vec2;

/// How the engage and translate-window checks are evaluated.
///
/// The long-standing behavior of this controller has two quirks that hosts
/// may depend on:
///
/// - When deciding whether to take over a moving gesture, `scalable` only
///   gates the horizontal branch: `(scalable && dx > 2) || dy > 2 || count == 2`.
/// - The translate window is checked as
///   `max_active_touches_translate <= count <= max_active_touches_translate`,
///   so `min_active_touches_translate` has no effect.
///
/// [`Gating::Legacy`] keeps both. [`Gating::Symmetric`] evaluates the checks
/// the way the option names read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Gating {
    /// Preserve the historical evaluation of both checks.
    #[default]
    Legacy,
    /// `scalable && (|dx| > 2 || |dy| > 2) || count == 2`, and the translate
    /// window honors its own minimum.
    Symmetric,
}

/// Caller-supplied options for a [`GestureTransformController`](crate::GestureTransformController).
///
/// The configuration is fixed for the duration of a gesture session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureConfig {
    /// Enables the horizontal engage branch (and, with [`Gating::Symmetric`],
    /// every movement-based engage branch).
    pub scalable: bool,
    /// Smallest active-touch count treated as a pinch.
    pub min_active_touches_zoom: usize,
    /// Largest active-touch count treated as a pinch.
    pub max_active_touches_zoom: usize,
    /// Smallest active-touch count treated as a pan.
    pub min_active_touches_translate: usize,
    /// Largest active-touch count treated as a pan.
    pub max_active_touches_translate: usize,
    /// Evaluation mode for the engage and translate-window checks.
    pub gating: Gating,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            scalable: true,
            min_active_touches_zoom: 2,
            max_active_touches_zoom: 2,
            min_active_touches_translate: 1,
            max_active_touches_translate: 1,
            gating: Gating::Legacy,
        }
    }
}

impl GestureConfig {
    /// Movement (in device pixels) a gesture must exceed on an axis before
    /// the controller claims it.
    pub const ENGAGE_SLOP: f64 = 2.0;

    /// Active-touch count that always claims a moving gesture.
    pub const PINCH_TOUCHES: usize = 2;

    /// Returns a copy with `scalable` set.
    #[must_use]
    pub fn with_scalable(mut self, scalable: bool) -> Self {
        self.scalable = scalable;
        self
    }

    /// Returns a copy with the pinch touch-count window set to `min..=max`.
    #[must_use]
    pub fn with_zoom_touches(mut self, min: usize, max: usize) -> Self {
        self.min_active_touches_zoom = min;
        self.max_active_touches_zoom = max;
        self
    }

    /// Returns a copy with the pan touch-count window set to `min..=max`.
    #[must_use]
    pub fn with_translate_touches(mut self, min: usize, max: usize) -> Self {
        self.min_active_touches_translate = min;
        self.max_active_touches_translate = max;
        self
    }

    /// Returns a copy with the given [`Gating`] mode.
    #[must_use]
    pub fn with_gating(mut self, gating: Gating) -> Self {
        self.gating = gating;
        self
    }

    /// Checks that the touch-count windows are well formed.
    ///
    /// Under [`Gating::Legacy`] the translate minimum is never read, so only
    /// [`Gating::Symmetric`] requires an ordered translate window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_active_touches_zoom > self.max_active_touches_zoom {
            return Err(ConfigError::InvertedZoomWindow {
                min: self.min_active_touches_zoom,
                max: self.max_active_touches_zoom,
            });
        }
        if self.gating == Gating::Symmetric
            && self.min_active_touches_translate > self.max_active_touches_translate
        {
            return Err(ConfigError::InvertedTranslateWindow {
                min: self.min_active_touches_translate,
                max: self.max_active_touches_translate,
            });
        }
        Ok(())
    }

    /// Whether `count` active touches form a pinch.
    #[must_use]
    pub fn zooms_with(&self, count: usize) -> bool {
        (self.min_active_touches_zoom..=self.max_active_touches_zoom).contains(&count)
    }

    /// Whether `count` active touches form a pan.
    #[must_use]
    pub fn translates_with(&self, count: usize) -> bool {
        let min = match self.gating {
            Gating::Legacy => self.max_active_touches_translate,
            Gating::Symmetric => self.min_active_touches_translate,
        };
        (min..=self.max_active_touches_translate).contains(&count)
    }

    /// Whether a moving gesture with `count` touches and accumulated `delta`
    /// should be claimed.
    #[must_use]
    pub fn engages_on_move(&self, count: usize, delta: Vec2) -> bool {
        let two_fingers = count == Self::PINCH_TOUCHES;
        match self.gating {
            Gating::Legacy => {
                (self.scalable && delta.x > Self::ENGAGE_SLOP)
                    || delta.y > Self::ENGAGE_SLOP
                    || two_fingers
            }
            Gating::Symmetric => {
                let moved =
                    delta.x.abs() > Self::ENGAGE_SLOP || delta.y.abs() > Self::ENGAGE_SLOP;
                (self.scalable && moved) || two_fingers
            }
        }
    }
}

/// Error returned when a [`GestureConfig`] cannot be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_active_touches_zoom` is greater than `max_active_touches_zoom`.
    InvertedZoomWindow {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },
    /// `min_active_touches_translate` is greater than `max_active_touches_translate`.
    InvertedTranslateWindow {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },
    /// The configuration was changed while a gesture session was engaged.
    SessionActive,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedZoomWindow { min, max } => {
                write!(f, "zoom touch window is inverted: min {min} > max {max}")
            }
            Self::InvertedTranslateWindow { min, max } => {
                write!(f, "translate touch window is inverted: min {min} > max {max}")
            }
            Self::SessionActive => {
                write!(f, "configuration cannot change during a gesture session")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use kurbo::Vec2;

    use super::{ConfigError, Gating, GestureConfig};

    #[test]
    fn defaults_match_pinch_zoom_view() {
        let config = GestureConfig::default();
        assert!(config.scalable);
        assert_eq!(config.min_active_touches_zoom, 2);
        assert_eq!(config.max_active_touches_zoom, 2);
        assert_eq!(config.min_active_touches_translate, 1);
        assert_eq!(config.max_active_touches_translate, 1);
        assert_eq!(config.gating, Gating::Legacy);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn legacy_dy_branch_ignores_scalable() {
        let config = GestureConfig::default().with_scalable(false);
        assert!(config.engages_on_move(1, Vec2::new(0.0, 5.0)));
        assert!(!config.engages_on_move(1, Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn legacy_uses_signed_deltas() {
        let config = GestureConfig::default();
        assert!(!config.engages_on_move(1, Vec2::new(-10.0, -10.0)));
        assert!(config.engages_on_move(1, Vec2::new(2.5, 0.0)));
    }

    #[test]
    fn slop_is_exclusive() {
        let config = GestureConfig::default();
        assert!(!config.engages_on_move(1, Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn two_fingers_always_engage() {
        for gating in [Gating::Legacy, Gating::Symmetric] {
            let config = GestureConfig::default()
                .with_scalable(false)
                .with_gating(gating);
            assert!(config.engages_on_move(2, Vec2::ZERO), "{gating:?}");
        }
    }

    #[test]
    fn symmetric_gates_every_movement_branch() {
        let config = GestureConfig::default()
            .with_gating(Gating::Symmetric)
            .with_scalable(false);
        assert!(!config.engages_on_move(1, Vec2::new(0.0, 5.0)));
        assert!(!config.engages_on_move(1, Vec2::new(5.0, 0.0)));

        let config = config.with_scalable(true);
        assert!(config.engages_on_move(1, Vec2::new(-5.0, 0.0)));
        assert!(config.engages_on_move(1, Vec2::new(0.0, -5.0)));
    }

    #[test]
    fn legacy_translate_window_uses_max_for_both_bounds() {
        let config = GestureConfig::default().with_translate_touches(1, 3);
        assert!(!config.translates_with(1));
        assert!(!config.translates_with(2));
        assert!(config.translates_with(3));
        assert!(!config.translates_with(4));
    }

    #[test]
    fn symmetric_translate_window_honors_min() {
        let config = GestureConfig::default()
            .with_translate_touches(1, 3)
            .with_gating(Gating::Symmetric);
        assert!(!config.translates_with(0));
        assert!(config.translates_with(1));
        assert!(config.translates_with(3));
        assert!(!config.translates_with(4));
    }

    #[test]
    fn zoom_window_is_inclusive() {
        let config = GestureConfig::default().with_zoom_touches(2, 3);
        assert!(!config.zooms_with(1));
        assert!(config.zooms_with(2));
        assert!(config.zooms_with(3));
        assert!(!config.zooms_with(4));
    }

    #[test]
    fn validate_rejects_inverted_windows() {
        let zoom = GestureConfig::default().with_zoom_touches(3, 2);
        assert_eq!(
            zoom.validate(),
            Err(ConfigError::InvertedZoomWindow { min: 3, max: 2 })
        );

        let translate = GestureConfig::default()
            .with_translate_touches(2, 1)
            .with_gating(Gating::Symmetric);
        assert_eq!(
            translate.validate(),
            Err(ConfigError::InvertedTranslateWindow { min: 2, max: 1 })
        );
    }

    #[test]
    fn legacy_accepts_translate_min_above_max() {
        let config = GestureConfig::default().with_translate_touches(3, 1);
        assert_eq!(config.validate(), Ok(()));
        assert!(config.translates_with(1));
        assert!(!config.translates_with(3));
    }

    #[test]
    fn errors_render_readably() {
        let err = ConfigError::InvertedZoomWindow { min: 3, max: 2 };
        assert_eq!(err.to_string(), "zoom touch window is inverted: min 3 > max 2");
    }
}
