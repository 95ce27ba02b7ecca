//! The physics seam the gameplay controllers push against.

use glam::Vec3;

use crate::api::types::EntityId;
use crate::components::pose::Pose;

/// Read/write access to rigid bodies by entity.
///
/// Unknown entities read as zero/`None` and writes to them are dropped.
pub trait BodyDriver {
    fn pose(&self, id: EntityId) -> Option<Pose>;
    fn mass(&self, id: EntityId) -> f32;
    fn velocity(&self, id: EntityId) -> Vec3;
    /// Force acting during the next physics step only.
    fn apply_force(&mut self, id: EntityId, force: Vec3);
    fn apply_impulse(&mut self, id: EntityId, impulse: Vec3);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default, Clone)]
    pub struct RecordedBody {
        pub pose: Pose,
        pub mass: f32,
        pub velocity: Vec3,
        pub forces: Vec<Vec3>,
        pub impulses: Vec<Vec3>,
    }

    /// Records what controllers push instead of simulating it.
    #[derive(Debug, Default)]
    pub struct RecordingBodies {
        pub bodies: HashMap<EntityId, RecordedBody>,
    }

    impl RecordingBodies {
        pub fn with_body(mut self, id: EntityId, pose: Pose, mass: f32) -> Self {
            self.bodies.insert(
                id,
                RecordedBody {
                    pose,
                    mass,
                    ..RecordedBody::default()
                },
            );
            self
        }

        pub fn body(&self, id: EntityId) -> &RecordedBody {
            &self.bodies[&id]
        }

        pub fn body_mut(&mut self, id: EntityId) -> &mut RecordedBody {
            self.bodies.get_mut(&id).unwrap()
        }
    }

    impl BodyDriver for RecordingBodies {
        fn pose(&self, id: EntityId) -> Option<Pose> {
            self.bodies.get(&id).map(|b| b.pose)
        }

        fn mass(&self, id: EntityId) -> f32 {
            self.bodies.get(&id).map_or(0.0, |b| b.mass)
        }

        fn velocity(&self, id: EntityId) -> Vec3 {
            self.bodies.get(&id).map_or(Vec3::ZERO, |b| b.velocity)
        }

        fn apply_force(&mut self, id: EntityId, force: Vec3) {
            if let Some(b) = self.bodies.get_mut(&id) {
                b.forces.push(force);
            }
        }

        fn apply_impulse(&mut self, id: EntityId, impulse: Vec3) {
            if let Some(b) = self.bodies.get_mut(&id) {
                b.impulses.push(impulse);
            }
        }
    }
}
