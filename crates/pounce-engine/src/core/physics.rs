use glam::{Quat, Vec3};
use rapier3d::prelude::*;
use std::sync::Mutex;

use crate::api::types::EntityId;
use crate::components::pose::Pose;

// ---------------------------------------------------------------------------
// Conversion helpers (private) — glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec3_to_na(v: Vec3) -> nalgebra::Vector3<f32> {
    nalgebra::Vector3::new(v.x, v.y, v.z)
}

fn na_to_vec3(v: &nalgebra::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn pose_to_na(pose: Pose) -> nalgebra::Isometry3<f32> {
    let q = pose.rotation;
    nalgebra::Isometry3::from_parts(
        nalgebra::Translation3::new(pose.position.x, pose.position.y, pose.position.z),
        nalgebra::UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(q.w, q.x, q.y, q.z)),
    )
}

fn na_to_pose(iso: &nalgebra::Isometry3<f32>) -> Pose {
    let t = &iso.translation.vector;
    // nalgebra stores quaternion coords as (i, j, k, w).
    let c = &iso.rotation.coords;
    Pose::new(
        Vec3::new(t.x, t.y, t.z),
        Quat::from_xyzw(c.x, c.y, c.z, c.w).normalize(),
    )
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
    KinematicPositionBased,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
            BodyType::KinematicPositionBased => RigidBodyType::KinematicPositionBased,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_extents: Vec3 },
    CapsuleY { half_height: f32, radius: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            ColliderDesc::CapsuleY { half_height, radius } => {
                ColliderBuilder::capsule_y(half_height, radius)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.6,
            density: 1.0,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub pose: Pose,
    pub velocity: Vec3,
    pub gravity_scale: f32,
    /// Lock all rotation axes (upright characters).
    pub fixed_rotation: bool,
    pub collider: ColliderDesc,
    /// Sensor colliders report overlaps but generate no contact forces.
    pub sensor: bool,
    pub linear_damping: f32,
}

impl BodyDesc {
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            pose: Pose::IDENTITY,
            velocity: Vec3::ZERO,
            gravity_scale: 1.0,
            fixed_rotation: false,
            collider,
            sensor: false,
            linear_damping: 0.0,
        }
    }

    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            gravity_scale: 0.0,
            fixed_rotation: true,
            ..Self::dynamic(collider)
        }
    }

    pub fn kinematic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::KinematicPositionBased,
            ..Self::fixed(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.pose.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.pose.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, vel: Vec3) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }

    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// A contact or sensor overlap between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub entity_a: EntityId,
    pub entity_b: EntityId,
    /// `true` when the overlap just started, `false` when it ended.
    pub started: bool,
    /// At least one of the two colliders is a sensor.
    pub sensor: bool,
}

impl CollisionPair {
    /// If `entity` is part of this pair, the other side.
    pub fn other(&self, entity: EntityId) -> Option<EntityId> {
        if self.entity_a == entity {
            Some(self.entity_b)
        } else if self.entity_b == entity {
            Some(self.entity_a)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Event collector
// ---------------------------------------------------------------------------

/// Rapier's `EventHandler` is `Send + Sync`, hence the Mutex even though
/// stepping is single-threaded.
struct CollisionCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl CollisionCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain(&self) -> Vec<CollisionEvent> {
        self.collisions
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl EventHandler for CollisionCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let Ok(mut events) = self.collisions.lock() {
            events.push(event);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps the Rapier3D pipeline into a single struct keyed by entity.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector3<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    collector: CollisionCollector,
}

impl PhysicsWorld {
    /// Y is up: use a negative Y gravity, e.g. `Vec3::new(0.0, -9.81, 0.0)`.
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity: vec3_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            collector: CollisionCollector::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Create a rigid body + collider. The EntityId is stored in the body's
    /// `user_data` so collision events can be mapped back to entities.
    pub fn create_body(
        &mut self,
        entity_id: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .position(pose_to_na(desc.pose))
            .linvel(vec3_to_na(desc.velocity))
            .gravity_scale(desc.gravity_scale)
            .locked_axes(if desc.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .linear_damping(desc.linear_damping)
            .user_data(entity_id.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .sensor(desc.sensor)
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Step the simulation and append resolved collision pairs.
    /// Forces added since the previous step apply for this step only.
    pub fn step_into(&mut self, collision_events: &mut Vec<CollisionPair>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.collector,
        );

        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
        }

        for event in self.collector.drain() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };
            let sensor = event.sensor();

            if let (Some(a), Some(b)) = (self.collider_to_entity(h1), self.collider_to_entity(h2)) {
                collision_events.push(CollisionPair {
                    entity_a: a,
                    entity_b: b,
                    started,
                    sensor,
                });
            }
        }
    }

    /// Add a force for the next step.
    pub fn apply_force(&mut self, body: &PhysicsBody, force: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.add_force(vec3_to_na(force), true);
        }
    }

    /// Apply an instantaneous impulse.
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec3_to_na(impulse), true);
        }
    }

    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec3_to_na(vel), true);
        }
    }

    pub fn velocity(&self, body: &PhysicsBody) -> Vec3 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec3(rb.linvel()))
            .unwrap_or(Vec3::ZERO)
    }

    /// Total mass of a body (zero for fixed bodies or unknown handles).
    pub fn mass(&self, body: &PhysicsBody) -> f32 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| rb.mass())
            .unwrap_or(0.0)
    }

    /// Target pose for a kinematic body on the next step.
    pub fn set_kinematic_pose(&mut self, body: &PhysicsBody, pose: Pose) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_next_kinematic_position(pose_to_na(pose));
        }
    }

    pub fn body_pose(&self, body: &PhysicsBody) -> Option<Pose> {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_pose(rb.position()))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn collider_to_entity(&self, collider_handle: ColliderHandle) -> Option<EntityId> {
        let collider = self.colliders.get(collider_handle)?;
        let body = self.bodies.get(collider.parent()?)?;
        Some(EntityId(body.user_data as u32))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
