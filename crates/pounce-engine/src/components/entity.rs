use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::pose::Pose;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// Fat Entity — a single struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Position in world space.
    pub pos: Vec3,
    /// Orientation in world space (unit quaternion).
    pub rotation: Quat,
    /// Physics body (optional — requires "physics" feature).
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            pos: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_pose(self, pose: Pose) -> Self {
        self.with_pos(pose.position).with_rotation(pose.rotation)
    }

    #[cfg(feature = "physics")]
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Current pose snapshot.
    pub fn pose(&self) -> Pose {
        Pose::new(self.pos, self.rotation)
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pos = pose.position;
        self.rotation = pose.rotation;
    }
}
