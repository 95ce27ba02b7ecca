pub mod api;
pub mod core;
pub mod components;
pub mod input;
pub mod extensions;
pub mod gameplay;
pub mod runner;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::EntityId;
pub use components::entity::Entity;
pub use components::pose::Pose;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::{
    ActionMapSet, ActionPhase, ActionValue, GameplayEvent, InputEvent, InputQueue, InputRouter,
    InputSettings, UiEvent,
};
pub use gameplay::{
    BodyDriver, ButtonConfig, ButtonTrigger, ConfigError, CourseConfig, Jump, JumpConfig,
    Locomotion, LocomotionConfig,
};
#[cfg(feature = "physics")]
pub use gameplay::ButtonCourse;
pub use runner::GameRunner;

#[cfg(feature = "physics")]
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial, CollisionPair,
};

// Extensions — decoupled optional systems
pub use extensions::{
    AnimationCurve, Curve, Easing, Keyframe,
    TransitionEngine, TransitionEvent, TransitionId, TransitionKind, TransitionRequest,
};
