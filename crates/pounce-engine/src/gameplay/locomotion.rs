use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::input::router::GameplayEvent;
use super::body::BodyDriver;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub walking_speed: f32,
    pub running_speed: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walking_speed: 1.0,
            running_speed: 2.0,
        }
    }
}

/// Planar movement driven by `MoveChanged` / `SprintToggled`.
#[derive(Debug, Clone)]
pub struct Locomotion {
    config: LocomotionConfig,
    /// Stick input mapped onto the body's local XZ plane.
    move_input: Vec3,
    current_speed: f32,
}

impl Locomotion {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            config,
            move_input: Vec3::ZERO,
            current_speed: config.walking_speed,
        }
    }

    pub fn handle_event(&mut self, event: &GameplayEvent) {
        match *event {
            GameplayEvent::MoveChanged(v) => self.move_input = Vec3::new(v.x, 0.0, v.y),
            GameplayEvent::SprintToggled(on) => {
                self.current_speed = if on {
                    self.config.running_speed
                } else {
                    self.config.walking_speed
                };
            }
            _ => {}
        }
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Body-local force for one step: enough to change velocity by
    /// `move * speed` over `fixed_dt`.
    pub fn local_force(&self, mass: f32, fixed_dt: f32) -> Vec3 {
        if fixed_dt <= 0.0 {
            return Vec3::ZERO;
        }
        mass * self.move_input * self.current_speed / fixed_dt
    }

    /// Push `body` for the coming physics step.
    pub fn fixed_update(&self, body: EntityId, bodies: &mut impl BodyDriver, fixed_dt: f32) {
        if self.move_input == Vec3::ZERO {
            return;
        }
        let Some(pose) = bodies.pose(body) else { return };
        let local = self.local_force(bodies.mass(body), fixed_dt);
        bodies.apply_force(body, pose.local_to_world_dir(local));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::pose::Pose;
    use crate::gameplay::body::testing::RecordingBodies;
    use glam::{Quat, Vec2};
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 0.02;

    #[test]
    fn walking_force_scales_with_mass_and_step() {
        let mut loco = Locomotion::new(LocomotionConfig::default());
        loco.handle_event(&GameplayEvent::MoveChanged(Vec2::new(0.0, 1.0)));
        let f = loco.local_force(2.0, DT);
        assert!((f - Vec3::new(0.0, 0.0, 100.0)).length() < 1e-3, "got {:?}", f);
    }

    #[test]
    fn sprint_switches_speed() {
        let mut loco = Locomotion::new(LocomotionConfig::default());
        loco.handle_event(&GameplayEvent::SprintToggled(true));
        assert_eq!(loco.current_speed(), 2.0);
        loco.handle_event(&GameplayEvent::SprintToggled(false));
        assert_eq!(loco.current_speed(), 1.0);
    }

    #[test]
    fn force_is_relative_to_body_facing() {
        let player = EntityId(1);
        let facing_x = Pose::from_rotation(Quat::from_rotation_y(FRAC_PI_2));
        let mut bodies = RecordingBodies::default().with_body(player, facing_x, 1.0);
        let mut loco = Locomotion::new(LocomotionConfig::default());
        loco.handle_event(&GameplayEvent::MoveChanged(Vec2::new(0.0, 1.0)));

        loco.fixed_update(player, &mut bodies, DT);

        let forces = &bodies.body(player).forces;
        assert_eq!(forces.len(), 1);
        assert!((forces[0] - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-3, "got {:?}", forces[0]);
    }

    #[test]
    fn idle_applies_nothing() {
        let player = EntityId(1);
        let mut bodies = RecordingBodies::default().with_body(player, Pose::IDENTITY, 1.0);
        let mut loco = Locomotion::new(LocomotionConfig::default());
        loco.handle_event(&GameplayEvent::MoveChanged(Vec2::X));
        loco.handle_event(&GameplayEvent::MoveChanged(Vec2::ZERO));
        loco.fixed_update(player, &mut bodies, DT);
        assert!(bodies.body(player).forces.is_empty());
    }
}
