// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Vec2};

/// The visual transform the host applies to its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    /// Uniform scale factor. Kept finite and positive.
    pub scale: f64,
    /// Translation in the container's local (pre-scale) units.
    pub translation: Vec2,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformState {
    /// Unit scale, no translation.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translation: Vec2::ZERO,
    };

    /// Horizontal translation.
    #[must_use]
    pub fn translate_x(&self) -> f64 {
        self.translation.x
    }

    /// Vertical translation.
    #[must_use]
    pub fn translate_y(&self) -> f64 {
        self.translation.y
    }

    /// Applies the fields present in `patch`.
    pub fn apply(&mut self, patch: &TransformPatch) {
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
        if let Some(translation) = patch.translation {
            self.translation = translation;
        }
    }

    /// The transform as an ordered operation list, first to last.
    ///
    /// Hosts that compose transforms declaratively apply these in order:
    /// scale on both axes, then translate.
    #[must_use]
    pub fn ops(&self) -> [TransformOp; 4] {
        [
            TransformOp::ScaleX(self.scale),
            TransformOp::ScaleY(self.scale),
            TransformOp::TranslateX(self.translation.x),
            TransformOp::TranslateY(self.translation.y),
        ]
    }

    /// The composed local-to-parent transform, equal to folding [`Self::ops`].
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        self.ops()
            .iter()
            .fold(Affine::IDENTITY, |acc, op| acc * op.to_affine())
    }
}

/// A single step of a composed transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// Scale along the X axis.
    ScaleX(f64),
    /// Scale along the Y axis.
    ScaleY(f64),
    /// Translate along the X axis.
    TranslateX(f64),
    /// Translate along the Y axis.
    TranslateY(f64),
}

impl TransformOp {
    /// The operation as an affine matrix.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        match self {
            Self::ScaleX(s) => Affine::scale_non_uniform(s, 1.0),
            Self::ScaleY(s) => Affine::scale_non_uniform(1.0, s),
            Self::TranslateX(t) => Affine::translate((t, 0.0)),
            Self::TranslateY(t) => Affine::translate((0.0, t)),
        }
    }
}

/// The committed transform that the next gesture session measures from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaselineState {
    /// Scale at the last release.
    pub last_scale: f64,
    /// Translation at the last release.
    pub last_translation: Vec2,
    /// Two-touch distance captured when the current pinch was granted.
    pub reference_distance: f64,
}

impl Default for BaselineState {
    fn default() -> Self {
        Self {
            last_scale: 1.0,
            last_translation: Vec2::ZERO,
            reference_distance: Self::DEFAULT_REFERENCE_DISTANCE,
        }
    }
}

impl BaselineState {
    /// Reference distance used when a pinch moves without a pinch grant.
    pub const DEFAULT_REFERENCE_DISTANCE: f64 = 150.0;

    /// Snapshot `transform` as the new baseline, keeping the reference distance.
    #[must_use]
    pub fn committed(self, transform: &TransformState) -> Self {
        Self {
            last_scale: transform.scale,
            last_translation: transform.translation,
            ..self
        }
    }

    /// Whether the reference distance can be divided by.
    #[must_use]
    pub fn has_usable_reference(&self) -> bool {
        self.reference_distance.is_finite() && self.reference_distance > 0.0
    }
}

/// The fields of a [`TransformState`] that changed on one move.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformPatch {
    /// New scale, if the pinch branch fired.
    pub scale: Option<f64>,
    /// New translation, if the pan branch fired.
    pub translation: Option<Vec2>,
}

impl TransformPatch {
    /// Returns `true` when no field changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scale.is_none() && self.translation.is_none()
    }
}
