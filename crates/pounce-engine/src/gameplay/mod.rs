//! Controllers that turn gameplay events and sensor overlaps into forces
//! and transitions.

pub mod body;
pub mod config;
#[cfg(feature = "physics")]
pub mod course;
pub mod jump;
pub mod locomotion;
pub mod trigger;

pub use body::BodyDriver;
pub use config::{ConfigError, CourseConfig};
#[cfg(feature = "physics")]
pub use course::ButtonCourse;
pub use jump::{Jump, JumpConfig};
pub use locomotion::{Locomotion, LocomotionConfig};
pub use trigger::{explosion_impulse, ButtonConfig, ButtonTrigger, Detonation};
