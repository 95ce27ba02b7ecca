//! A pressure button: sinks while a body stands in its sensor and kicks
//! that body away when it leaves.

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::extensions::transition::{TransitionEngine, TransitionId, TransitionRequest};
use super::body::BodyDriver;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Explosion strength at the centre, falling off linearly to zero at
    /// `explosion_radius`.
    pub power: f32,
    /// How far the top sinks when pressed.
    pub travel_distance: f32,
    /// Seconds the press takes.
    pub travel_duration: f32,
    pub explosion_radius: f32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            power: 2000.0,
            travel_distance: 0.098_026_01,
            travel_duration: 0.1,
            explosion_radius: 10.0,
        }
    }
}

/// Explosion push for a body at `body_pos`, directed away from `center`.
///
/// Zero outside `radius`. A body sitting exactly on the centre is pushed
/// straight up.
pub fn explosion_impulse(center: Vec3, body_pos: Vec3, power: f32, radius: f32) -> Vec3 {
    if radius <= 0.0 {
        return Vec3::ZERO;
    }
    let offset = body_pos - center;
    let distance = offset.length();
    if distance > radius {
        return Vec3::ZERO;
    }
    let direction = offset.try_normalize().unwrap_or(Vec3::Y);
    direction * power * (1.0 - distance / radius)
}

/// Push owed to a body after it left the button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detonation {
    pub body: EntityId,
    pub force: Vec3,
}

impl Detonation {
    /// Applied as a force for the next physics step only, so the body
    /// receives `force * dt` of momentum.
    pub fn apply(&self, bodies: &mut impl BodyDriver) {
        bodies.apply_force(self.body, self.force);
    }
}

#[derive(Debug)]
pub struct ButtonTrigger {
    config: ButtonConfig,
    base: EntityId,
    top: EntityId,
    armed: Option<EntityId>,
    rest_position: Option<Vec3>,
    press: Option<TransitionId>,
}

impl ButtonTrigger {
    /// `base` carries the sensor and is the explosion centre, `top` is the
    /// part that moves.
    pub fn new(config: ButtonConfig, base: EntityId, top: EntityId) -> Self {
        Self {
            config,
            base,
            top,
            armed: None,
            rest_position: None,
            press: None,
        }
    }

    pub fn base(&self) -> EntityId {
        self.base
    }

    pub fn top(&self) -> EntityId {
        self.top
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Body pushed on every exit, the most recent entrant. Stays armed
    /// after an exit.
    pub fn armed(&self) -> Option<EntityId> {
        self.armed
    }

    pub fn is_pressed(&self) -> bool {
        self.rest_position.is_some()
    }

    /// A body entered the sensor: arm it and start sinking the top.
    pub fn on_enter(&mut self, other: EntityId, scene: &Scene, transitions: &mut TransitionEngine) {
        self.armed = Some(other);

        let Some(current) = scene.pose(self.top).map(|p| p.position) else {
            debug!("button top {} missing, press skipped", self.top);
            return;
        };
        // A second entry while still pressed keeps the original rest height.
        let rest = *self.rest_position.get_or_insert(current);
        let target = rest - Vec3::Y * self.config.travel_distance;

        if let Some(previous) = self.press.take() {
            transitions.cancel(previous);
        }
        let request = TransitionRequest::position(target, self.config.travel_duration);
        self.press = Some(transitions.request(scene, self.top, request));
    }

    /// A body left the sensor: snap the top back to rest and return the push
    /// owed to the armed body. Until a body has entered this does nothing.
    pub fn on_exit(
        &mut self,
        scene: &mut Scene,
        transitions: &mut TransitionEngine,
    ) -> Option<Detonation> {
        let Some(body) = self.armed else {
            debug!("button {} exit without a recorded entry", self.base);
            return None;
        };

        if let Some(press) = self.press.take() {
            transitions.cancel(press);
        }
        if let Some(rest) = self.rest_position.take() {
            if let Some(top) = scene.get_mut(self.top) {
                top.pos = rest;
            }
        }

        let center = scene.pose(self.base)?.position;
        let body_pos = scene.pose(body)?.position;
        Some(Detonation {
            body,
            force: explosion_impulse(
                center,
                body_pos,
                self.config.power,
                self.config.explosion_radius,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::components::pose::Pose;
    use crate::gameplay::body::testing::RecordingBodies;

    const BASE: EntityId = EntityId(1);
    const TOP: EntityId = EntityId(2);
    const PLAYER: EntityId = EntityId(3);
    const DT: f32 = 0.02;

    fn setup() -> (Scene, TransitionEngine, ButtonTrigger) {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(BASE));
        scene.spawn(Entity::new(TOP).with_pos(Vec3::new(0.0, 0.2, 0.0)));
        scene.spawn(Entity::new(PLAYER).with_pos(Vec3::new(0.0, 1.0, 0.0)));
        (scene, TransitionEngine::new(), ButtonTrigger::new(ButtonConfig::default(), BASE, TOP))
    }

    fn top_y(scene: &Scene) -> f32 {
        scene.get(TOP).unwrap().pos.y
    }

    #[test]
    fn enter_sinks_top_by_travel_distance() {
        let (mut scene, mut transitions, mut button) = setup();
        button.on_enter(PLAYER, &scene, &mut transitions);
        assert_eq!(button.armed(), Some(PLAYER));

        for _ in 0..5 {
            transitions.tick(DT, &mut scene);
        }
        assert!((top_y(&scene) - (0.2 - 0.098_026_01)).abs() < 1e-6, "y={}", top_y(&scene));
        assert!(transitions.is_empty());
    }

    #[test]
    fn exit_resets_top_and_pushes_body_up() {
        let (mut scene, mut transitions, mut button) = setup();
        button.on_enter(PLAYER, &scene, &mut transitions);
        for _ in 0..5 {
            transitions.tick(DT, &mut scene);
        }

        let detonation = button.on_exit(&mut scene, &mut transitions).unwrap();
        assert_eq!(top_y(&scene), 0.2);
        assert_eq!(detonation.body, PLAYER);
        // 1 unit from the centre with radius 10.
        assert!((detonation.force - Vec3::new(0.0, 1800.0, 0.0)).length() < 1e-2);

        let mut bodies = RecordingBodies::default().with_body(PLAYER, Pose::IDENTITY, 1.0);
        detonation.apply(&mut bodies);
        assert_eq!(bodies.body(PLAYER).forces, vec![detonation.force]);
    }

    #[test]
    fn exit_mid_press_cancels_the_press() {
        let (mut scene, mut transitions, mut button) = setup();
        button.on_enter(PLAYER, &scene, &mut transitions);
        transitions.tick(DT, &mut scene);
        assert!(top_y(&scene) < 0.2);

        button.on_exit(&mut scene, &mut transitions);
        assert!(transitions.is_empty());
        for _ in 0..10 {
            transitions.tick(DT, &mut scene);
        }
        assert_eq!(top_y(&scene), 0.2);
    }

    #[test]
    fn exit_without_entry_is_a_no_op() {
        let (mut scene, mut transitions, mut button) = setup();
        assert!(button.on_exit(&mut scene, &mut transitions).is_none());
        assert_eq!(top_y(&scene), 0.2);

        button.on_enter(PLAYER, &scene, &mut transitions);
        assert!(button.on_exit(&mut scene, &mut transitions).is_some());
    }

    #[test]
    fn every_exit_pushes_the_latest_entrant() {
        let (mut scene, mut transitions, mut button) = setup();
        let second = EntityId(4);
        scene.spawn(Entity::new(second).with_pos(Vec3::new(2.0, 0.0, 0.0)));

        button.on_enter(PLAYER, &scene, &mut transitions);
        button.on_enter(second, &scene, &mut transitions);

        let first_exit = button.on_exit(&mut scene, &mut transitions).unwrap();
        let second_exit = button.on_exit(&mut scene, &mut transitions).unwrap();
        assert_eq!(first_exit.body, second);
        assert_eq!(second_exit.body, second);
        assert_eq!(first_exit.force, second_exit.force);
        assert_eq!(button.armed(), Some(second));
        assert_eq!(top_y(&scene), 0.2);
    }

    #[test]
    fn reentry_while_pressed_keeps_rest_height() {
        let (mut scene, mut transitions, mut button) = setup();
        button.on_enter(PLAYER, &scene, &mut transitions);
        for _ in 0..5 {
            transitions.tick(DT, &mut scene);
        }
        button.on_enter(PLAYER, &scene, &mut transitions);
        for _ in 0..5 {
            transitions.tick(DT, &mut scene);
        }
        assert!((top_y(&scene) - (0.2 - 0.098_026_01)).abs() < 1e-6);

        button.on_exit(&mut scene, &mut transitions);
        assert_eq!(top_y(&scene), 0.2);
    }

    #[test]
    fn explosion_falls_off_to_zero_at_radius() {
        let c = Vec3::ZERO;
        assert_eq!(explosion_impulse(c, Vec3::new(10.0, 0.0, 0.0), 100.0, 10.0), Vec3::ZERO);
        assert_eq!(explosion_impulse(c, Vec3::new(11.0, 0.0, 0.0), 100.0, 10.0), Vec3::ZERO);
        let half = explosion_impulse(c, Vec3::new(5.0, 0.0, 0.0), 100.0, 10.0);
        assert!((half - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-4);
        assert_eq!(explosion_impulse(c, c, 100.0, 10.0), Vec3::new(0.0, 100.0, 0.0));
        assert_eq!(explosion_impulse(c, Vec3::X, 100.0, 0.0), Vec3::ZERO);
    }
}
