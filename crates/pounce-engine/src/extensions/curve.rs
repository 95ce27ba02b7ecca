// extensions/curve.rs
//
// Keyframed easing curves with Hermite tangents, the data-driven counterpart
// to the `Easing` presets. Serializes as a plain list of keyframes.

use serde::{Deserialize, Serialize};

/// One control point of an `AnimationCurve`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    /// Incoming slope (d value / d time).
    #[serde(default)]
    pub in_tangent: f32,
    /// Outgoing slope (d value / d time).
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    pub fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}

/// Piecewise cubic Hermite curve. Keys are kept sorted by time.
/// Evaluation outside the keyed range clamps to the first/last value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct AnimationCurve {
    keys: Vec<Keyframe>,
}

impl From<Vec<Keyframe>> for AnimationCurve {
    fn from(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }
}

impl From<AnimationCurve> for Vec<Keyframe> {
    fn from(curve: AnimationCurve) -> Self {
        curve.keys
    }
}

impl AnimationCurve {
    pub fn new(keys: impl IntoIterator<Item = Keyframe>) -> Self {
        Self::from(keys.into_iter().collect::<Vec<_>>())
    }

    /// Straight line between two keys.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        let span = t1 - t0;
        let slope = if span.abs() > f32::EPSILON { (v1 - v0) / span } else { 0.0 };
        Self::new([
            Keyframe::new(t0, v0).with_tangents(slope, slope),
            Keyframe::new(t1, v1).with_tangents(slope, slope),
        ])
    }

    /// S-curve with flat tangents at both keys.
    pub fn ease_in_out(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self::new([Keyframe::new(t0, v0), Keyframe::new(t1, v1)])
    }

    pub fn constant(t0: f32, t1: f32, value: f32) -> Self {
        Self::new([Keyframe::new(t0, value), Keyframe::new(t1, value)])
    }

    /// Insert a key, keeping time order.
    pub fn add_key(&mut self, key: Keyframe) {
        let idx = self.keys.partition_point(|k| k.time <= key.time);
        self.keys.insert(idx, key);
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Evaluate at `time`. An empty curve is the identity mapping; a NaN
    /// `time` reads as the first key.
    pub fn evaluate(&self, time: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return time,
        };
        if time.is_nan() || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // First key strictly after `time`; guaranteed in 1..len by the clamps above.
        let hi = self.keys.partition_point(|k| k.time <= time);
        let a = &self.keys[hi - 1];
        let b = &self.keys[hi];
        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value;
        }
        let s = (time - a.time) / span;
        hermite(a.value, a.out_tangent * span, b.value, b.in_tangent * span, s)
    }
}

#[inline]
fn hermite(p0: f32, m0: f32, p1: f32, m1: f32, s: f32) -> f32 {
    let s2 = s * s;
    let s3 = s2 * s;
    (2.0 * s3 - 3.0 * s2 + 1.0) * p0
        + (s3 - 2.0 * s2 + s) * m0
        + (-2.0 * s3 + 3.0 * s2) * p1
        + (s3 - s2) * m1
}
