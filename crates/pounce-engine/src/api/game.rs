use glam::Vec3;

use crate::core::scene::Scene;
use crate::api::types::EntityId;
use crate::extensions::transition::TransitionEngine;
use crate::input::queue::InputEvent;
#[cfg(feature = "physics")]
use crate::components::entity::Entity;
#[cfg(feature = "physics")]
use crate::components::pose::Pose;
#[cfg(feature = "physics")]
use crate::core::physics::{BodyDesc, ColliderMaterial, CollisionPair, PhysicsWorld};
#[cfg(feature = "physics")]
use crate::gameplay::body::BodyDriver;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Most fixed steps run for a single host frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Gravity for the physics simulation. Y is up.
    pub gravity: Vec3,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}

/// The contract a game fulfils to be driven by `GameRunner`.
pub trait Game {
    /// Engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Spawn entities and wire collaborators.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Raw input collected since the previous frame. Called once per frame,
    /// before that frame's fixed steps.
    fn handle_input(&mut self, _ctx: &mut EngineContext, _events: &[InputEvent]) {}

    /// One fixed simulation step. Apply forces, react to collisions,
    /// request transitions.
    fn update(&mut self, ctx: &mut EngineContext, dt: f32);
}

/// Mutable engine state handed to `Game::init` and `Game::update`.
/// Owns the single `TransitionEngine` instance for the session.
pub struct EngineContext {
    pub scene: Scene,
    pub transitions: TransitionEngine,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
    #[cfg(feature = "physics")]
    collision_events: Vec<CollisionPair>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        #[cfg(not(feature = "physics"))]
        let _ = config;
        Self {
            scene: Scene::new(),
            transitions: TransitionEngine::new(),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics: {
                let mut world = PhysicsWorld::new(config.gravity);
                world.set_dt(config.fixed_dt);
                world
            },
            #[cfg(feature = "physics")]
            collision_events: Vec::new(),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Advance every active transition by one fixed step.
    pub fn tick_transitions(&mut self, dt: f32) -> usize {
        self.transitions.tick(dt, &mut self.scene)
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body placed at the entity's pose.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let desc = BodyDesc { pose: entity.pose(), ..desc };
        let body = self.physics.create_body(id, &desc, material);
        self.scene.spawn(entity.with_body(body));
        id
    }

    /// Despawn an entity and its physics body. Transitions on it retire
    /// silently on their next tick.
    pub fn despawn(&mut self, id: EntityId) {
        let removed = self.scene.despawn(id);
        #[cfg(feature = "physics")]
        if let Some(body) = removed.as_ref().and_then(|e| e.body.as_ref()) {
            self.physics.remove_body(body);
        }
        #[cfg(not(feature = "physics"))]
        let _ = removed;
    }

    /// Collision/overlap events from the most recent physics step.
    #[cfg(feature = "physics")]
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collision_events
    }

    /// Step physics and copy body poses back onto their entities.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.collision_events.clear();
        self.physics.step_into(&mut self.collision_events);

        for entity in self.scene.iter_mut() {
            if let Some(pose) = entity.body.as_ref().and_then(|b| self.physics.body_pose(b)) {
                entity.set_pose(pose);
            }
        }
    }

    #[cfg(feature = "physics")]
    fn body_of(&self, id: EntityId) -> Option<crate::core::physics::PhysicsBody> {
        self.scene.get(id).and_then(|e| e.body)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "physics")]
impl BodyDriver for EngineContext {
    fn pose(&self, id: EntityId) -> Option<Pose> {
        self.scene.pose(id)
    }

    fn mass(&self, id: EntityId) -> f32 {
        self.body_of(id).map(|b| self.physics.mass(&b)).unwrap_or(0.0)
    }

    fn velocity(&self, id: EntityId) -> Vec3 {
        self.body_of(id)
            .map(|b| self.physics.velocity(&b))
            .unwrap_or(Vec3::ZERO)
    }

    fn apply_force(&mut self, id: EntityId, force: Vec3) {
        if let Some(body) = self.body_of(id) {
            self.physics.apply_force(&body, force);
        }
    }

    fn apply_impulse(&mut self, id: EntityId, impulse: Vec3) {
        if let Some(body) = self.body_of(id) {
            self.physics.apply_impulse(&body, impulse);
        }
    }
}
