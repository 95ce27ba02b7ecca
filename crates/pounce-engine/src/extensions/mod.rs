// extensions/mod.rs
//
// Opt-in systems that act on the Scene by EntityId without touching
// Entity internals beyond the pose.

pub mod curve;
pub mod easing;
pub mod transition;

pub use curve::{AnimationCurve, Keyframe};
pub use easing::{Curve, Easing};
pub use transition::{
    Callback, TransitionEngine, TransitionEvent, TransitionId, TransitionKind, TransitionRequest,
};
