// extensions/easing.rs
//
// Easing presets and the `Curve` wrapper a transition uses to shape its
// progress. Pure math, no dependency on Entity/Scene.

use std::f32::consts::PI;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::curve::AnimationCurve;

/// Built-in easing presets, all mapping 0 → 0 and 1 → 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    /// Overshoots past 1 before settling.
    BackOut,
    /// Hermite smooth-step, zero slope at both ends.
    SmoothStep,
}

impl Easing {
    /// Map normalized time `t` (clamped to [0, 1]) to eased progress.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(2) / 2.0
                }
            }
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(3) / 2.0
                }
            }
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => (1.0 - (PI * t).cos()) / 2.0,
            Easing::ExpoIn => {
                if t == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * (t - 1.0)) }
            }
            Easing::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }
            Easing::BackOut => {
                const OVERSHOOT: f32 = 1.70158;
                let u = t - 1.0;
                1.0 + (OVERSHOOT + 1.0) * u.powi(3) + OVERSHOOT * u.powi(2)
            }
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// The progress-shaping function attached to a transition.
///
/// `Custom` closures are expected to map [0, 1] onto [0, 1] monotonically;
/// whatever they return is used as-is for interpolation.
#[derive(Clone)]
pub enum Curve {
    Preset(Easing),
    Keyframes(AnimationCurve),
    Custom(Rc<dyn Fn(f32) -> f32>),
}

impl Curve {
    pub fn custom(f: impl Fn(f32) -> f32 + 'static) -> Self {
        Curve::Custom(Rc::new(f))
    }

    /// Eased progress for normalized time `t`.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Preset(easing) => easing.apply(t),
            Curve::Keyframes(curve) => curve.evaluate(t),
            Curve::Custom(f) => f(t),
        }
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Preset(easing) => f.debug_tuple("Preset").field(easing).finish(),
            Curve::Keyframes(curve) => f.debug_tuple("Keyframes").field(curve).finish(),
            Curve::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<Easing> for Curve {
    fn from(easing: Easing) -> Self {
        Curve::Preset(easing)
    }
}

impl From<AnimationCurve> for Curve {
    fn from(curve: AnimationCurve) -> Self {
        Curve::Keyframes(curve)
    }
}
