use glam::Vec3;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::input::router::GameplayEvent;
use super::body::BodyDriver;

pub const MIN_JUMP_FORCE: f32 = 0.1;
pub const MAX_JUMP_FORCE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Upward velocity change per jump, kept within [0.1, 100].
    pub jump_force: f32,
    /// Vertical speed at or below which the body counts as grounded.
    pub grounded_velocity_threshold: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_force: 5.0,
            grounded_velocity_threshold: 0.1,
        }
    }
}

/// Jumps while the jump action is held and the body is not moving vertically.
#[derive(Debug, Clone)]
pub struct Jump {
    config: JumpConfig,
    triggered: bool,
    in_air: bool,
}

impl Jump {
    pub fn new(mut config: JumpConfig) -> Self {
        if !config.jump_force.is_finite() {
            let fallback = JumpConfig::default().jump_force;
            warn!("jump_force {} is not finite, using {}", config.jump_force, fallback);
            config.jump_force = fallback;
        }
        let clamped = config.jump_force.clamp(MIN_JUMP_FORCE, MAX_JUMP_FORCE);
        if clamped != config.jump_force {
            warn!("jump_force {} clamped to {}", config.jump_force, clamped);
            config.jump_force = clamped;
        }
        Self {
            config,
            triggered: false,
            in_air: false,
        }
    }

    pub fn handle_event(&mut self, event: &GameplayEvent) {
        match event {
            GameplayEvent::JumpStarted => self.triggered = true,
            GameplayEvent::JumpCanceled => self.triggered = false,
            _ => {}
        }
    }

    pub fn jump_force(&self) -> f32 {
        self.config.jump_force
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Result of the grounded check from the last `fixed_update`.
    pub fn in_air(&self) -> bool {
        self.in_air
    }

    /// Refresh the grounded check and jump if allowed. Returns whether a
    /// jump impulse was applied.
    pub fn fixed_update(&mut self, body: EntityId, bodies: &mut impl BodyDriver) -> bool {
        let vertical = bodies.velocity(body).y;
        self.in_air = vertical.abs() > self.config.grounded_velocity_threshold;

        if !self.triggered || self.in_air {
            return false;
        }
        let Some(pose) = bodies.pose(body) else { return false };
        let local = Vec3::Y * self.config.jump_force * bodies.mass(body);
        bodies.apply_impulse(body, pose.local_to_world_dir(local));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::pose::Pose;
    use crate::gameplay::body::testing::RecordingBodies;

    const PLAYER: EntityId = EntityId(1);

    fn grounded() -> RecordingBodies {
        RecordingBodies::default().with_body(PLAYER, Pose::IDENTITY, 2.0)
    }

    #[test]
    fn jumps_when_triggered_and_grounded() {
        let mut bodies = grounded();
        let mut jump = Jump::new(JumpConfig::default());
        jump.handle_event(&GameplayEvent::JumpStarted);

        assert!(jump.fixed_update(PLAYER, &mut bodies));
        assert_eq!(bodies.body(PLAYER).impulses, vec![Vec3::new(0.0, 10.0, 0.0)]);
    }

    #[test]
    fn no_jump_while_moving_vertically() {
        let mut bodies = grounded();
        bodies.body_mut(PLAYER).velocity = Vec3::new(0.0, -0.5, 0.0);
        let mut jump = Jump::new(JumpConfig::default());
        jump.handle_event(&GameplayEvent::JumpStarted);

        assert!(!jump.fixed_update(PLAYER, &mut bodies));
        assert!(jump.in_air());
        assert!(bodies.body(PLAYER).impulses.is_empty());
    }

    #[test]
    fn cancel_stops_jumping() {
        let mut bodies = grounded();
        let mut jump = Jump::new(JumpConfig::default());
        jump.handle_event(&GameplayEvent::JumpStarted);
        jump.handle_event(&GameplayEvent::JumpCanceled);
        assert!(!jump.fixed_update(PLAYER, &mut bodies));
    }

    #[test]
    fn small_vertical_drift_still_counts_as_grounded() {
        let mut bodies = grounded();
        bodies.body_mut(PLAYER).velocity = Vec3::new(3.0, 0.05, 0.0);
        let mut jump = Jump::new(JumpConfig::default());
        jump.handle_event(&GameplayEvent::JumpStarted);
        assert!(jump.fixed_update(PLAYER, &mut bodies));
    }

    #[test]
    fn force_is_clamped_into_range() {
        let jump = Jump::new(JumpConfig {
            jump_force: 500.0,
            ..JumpConfig::default()
        });
        assert_eq!(jump.jump_force(), MAX_JUMP_FORCE);
        let jump = Jump::new(JumpConfig {
            jump_force: 0.0,
            ..JumpConfig::default()
        });
        assert_eq!(jump.jump_force(), MIN_JUMP_FORCE);
    }

    #[test]
    fn non_finite_force_falls_back_to_default() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let mut jump = Jump::new(JumpConfig {
                jump_force: bad,
                ..JumpConfig::default()
            });
            assert_eq!(jump.jump_force(), 5.0);

            let mut bodies = grounded();
            jump.handle_event(&GameplayEvent::JumpStarted);
            assert!(jump.fixed_update(PLAYER, &mut bodies));
            assert!(bodies.body(PLAYER).impulses[0].is_finite());
        }
    }
}
