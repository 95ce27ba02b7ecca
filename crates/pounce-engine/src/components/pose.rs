use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position + orientation of an actor in world space.
/// The only data the transition system reads from or writes to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    /// Unit quaternion.
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation,
        }
    }

    /// Linear position blend + shortest-arc rotation blend.
    pub fn interpolate(self, target: Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(target.position, t),
            rotation: self.rotation.slerp(target.rotation, t),
        }
    }

    /// Transform a direction from this pose's local space into world space.
    pub fn local_to_world_dir(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn interpolate_midpoint() {
        let a = Pose::from_position(Vec3::ZERO);
        let b = Pose::new(Vec3::new(2.0, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2));
        let mid = a.interpolate(b, 0.5);
        assert!((mid.position.x - 1.0).abs() < 1e-6);
        let expected = Quat::from_rotation_y(FRAC_PI_2 / 2.0);
        assert!(mid.rotation.angle_between(expected) < 1e-4);
    }

    #[test]
    fn rotation_takes_shortest_arc() {
        // -q encodes the same orientation as q; slerp must not spin the long way round.
        let a = Pose::from_rotation(Quat::IDENTITY);
        let b = Pose::from_rotation(-Quat::from_rotation_z(0.2));
        let mid = a.interpolate(b, 0.5);
        assert!(mid.rotation.angle_between(Quat::from_rotation_z(0.1)) < 1e-4);
    }

    #[test]
    fn local_direction_follows_rotation() {
        let pose = Pose::from_rotation(Quat::from_rotation_y(FRAC_PI_2));
        let world = pose.local_to_world_dir(Vec3::Z);
        assert!((world - Vec3::X).length() < 1e-5, "got {:?}", world);
    }
}
