// extensions/transition.rs
//
// Transition engine — timed position/rotation interpolation of entities,
// addressed by EntityId. Decoupled from Entity internals beyond the pose.
//
// Usage:
//   let mut transitions = TransitionEngine::new();
//   let id = transitions.request(&scene, actor, TransitionRequest::position(target, 0.1));
//   transitions.tick(dt, &mut scene);  // once per simulation step

use std::fmt;

use glam::{Quat, Vec3};
use log::debug;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::pose::Pose;
use crate::core::scene::Scene;
use super::easing::Curve;

/// Relative slack on the completion check. Absorbs f32 rounding so that
/// `ceil(duration / dt)` fixed ticks always land on the target.
const COMPLETION_TOLERANCE: f64 = 1e-6;

/// Zero-argument notification, fired at most once.
pub type Callback = Box<dyn FnOnce()>;

/// Which pose channels a transition drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Position,
    Rotation,
    PositionAndRotation,
}

impl TransitionKind {
    fn drives_position(self) -> bool {
        matches!(self, TransitionKind::Position | TransitionKind::PositionAndRotation)
    }

    fn drives_rotation(self) -> bool {
        matches!(self, TransitionKind::Rotation | TransitionKind::PositionAndRotation)
    }
}

/// Everything needed to start a transition except the actor.
pub struct TransitionRequest {
    pub kind: TransitionKind,
    /// Destination. Only the channels selected by `kind` are used.
    pub target: Pose,
    /// Seconds. Zero or negative completes on the first tick.
    pub duration: f32,
    pub easing: Option<Curve>,
    on_start: Option<Callback>,
    on_complete: Option<Callback>,
}

impl TransitionRequest {
    pub fn new(kind: TransitionKind, target: Pose, duration: f32) -> Self {
        Self {
            kind,
            target,
            duration,
            easing: None,
            on_start: None,
            on_complete: None,
        }
    }

    pub fn position(target: Vec3, duration: f32) -> Self {
        Self::new(TransitionKind::Position, Pose::from_position(target), duration)
    }

    pub fn rotation(target: Quat, duration: f32) -> Self {
        Self::new(TransitionKind::Rotation, Pose::from_rotation(target), duration)
    }

    pub fn pose(target: Pose, duration: f32) -> Self {
        Self::new(TransitionKind::PositionAndRotation, target, duration)
    }

    /// Target another entity's pose as it is right now. Later movement of
    /// that entity does not affect the transition.
    pub fn toward_entity(
        scene: &Scene,
        target: EntityId,
        kind: TransitionKind,
        duration: f32,
    ) -> Option<Self> {
        scene.pose(target).map(|pose| Self::new(kind, pose, duration))
    }

    pub fn with_easing(mut self, easing: impl Into<Curve>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    pub fn on_start(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for TransitionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRequest")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("on_start", &self.on_start.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Handle to a transition for later cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionId(pub u32);

/// Lifecycle notification, in the order it happened during ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Started(TransitionId),
    Completed(TransitionId),
}

/// Running state of one transition.
struct Transition {
    actor: EntityId,
    kind: TransitionKind,
    start: Pose,
    target: Pose,
    duration: f32,
    /// Accumulated in f64 so long runs of f32 deltas don't drift.
    elapsed: f64,
    easing: Option<Curve>,
    started: bool,
    on_start: Option<Callback>,
    on_complete: Option<Callback>,
}

impl Transition {
    /// Normalized progress in [0, 1]; exactly 1.0 once complete.
    fn progress(&self) -> f32 {
        if self.duration.is_nan() || self.duration <= 0.0 {
            return 1.0;
        }
        let duration = self.duration as f64;
        if self.elapsed >= duration * (1.0 - COMPLETION_TOLERANCE) {
            1.0
        } else {
            (self.elapsed / duration).clamp(0.0, 1.0) as f32
        }
    }

    fn write(&self, entity: &mut Entity, pose: Pose) {
        if self.kind.drives_position() {
            entity.pos = pose.position;
        }
        if self.kind.drives_rotation() {
            entity.rotation = pose.rotation;
        }
    }
}

/// Owns and advances all active transitions.
///
/// Transitions are swept in registration order, so when several drive the
/// same entity the last registered one's write is what remains after a tick.
/// No arbitration is attempted between them.
#[derive(Default)]
pub struct TransitionEngine {
    active: Vec<(TransitionId, Transition)>,
    next_id: u32,
    events: Vec<TransitionEvent>,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transition for `actor`. The start pose is read from the
    /// scene now, not on the first tick.
    ///
    /// If the actor does not exist the request is dropped: the returned
    /// handle is never active and no callback fires.
    pub fn request(
        &mut self,
        scene: &Scene,
        actor: EntityId,
        request: TransitionRequest,
    ) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let Some(start) = scene.pose(actor) else {
            debug!("transition {:?} dropped: {} is not in the scene", id, actor);
            return id;
        };

        // Unused channels hold the start value so the stored target is a full pose.
        let target = Pose {
            position: if request.kind.drives_position() {
                request.target.position
            } else {
                start.position
            },
            rotation: if request.kind.drives_rotation() {
                request.target.rotation
            } else {
                start.rotation
            },
        };

        self.active.push((
            id,
            Transition {
                actor,
                kind: request.kind,
                start,
                target,
                duration: request.duration,
                elapsed: 0.0,
                easing: request.easing,
                started: false,
                on_start: request.on_start,
                on_complete: request.on_complete,
            },
        ));
        id
    }

    /// Retire one transition without firing `on_complete`.
    /// Returns false if it already finished, was cancelled, or never existed.
    pub fn cancel(&mut self, id: TransitionId) -> bool {
        let before = self.active.len();
        self.active.retain(|(tid, _)| *tid != id);
        self.active.len() != before
    }

    /// Retire every transition driving `actor`.
    pub fn cancel_actor(&mut self, actor: EntityId) -> usize {
        let before = self.active.len();
        self.active.retain(|(_, t)| t.actor != actor);
        before - self.active.len()
    }

    /// Retire everything without firing `on_complete`. Idempotent.
    pub fn cancel_all(&mut self) {
        if !self.active.is_empty() {
            debug!("cancelling {} active transitions", self.active.len());
        }
        self.active.clear();
    }

    /// Advance every active transition by `dt` seconds and write poses.
    /// Returns the number of transitions that completed this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let events = &mut self.events;
        let mut completed = 0;

        self.active.retain_mut(|(id, transition)| {
            let Some(entity) = scene.get_mut(transition.actor) else {
                debug!("transition {:?} retired: {} is gone", id, transition.actor);
                return false;
            };

            if !transition.started {
                transition.started = true;
                if let Some(on_start) = transition.on_start.take() {
                    on_start();
                }
                events.push(TransitionEvent::Started(*id));
            }

            transition.elapsed += dt as f64;
            let t = transition.progress();

            if t >= 1.0 {
                transition.write(entity, transition.target);
                if let Some(on_complete) = transition.on_complete.take() {
                    on_complete();
                }
                events.push(TransitionEvent::Completed(*id));
                completed += 1;
                return false;
            }

            let eased = transition
                .easing
                .as_ref()
                .map_or(t, |curve| curve.evaluate(t));
            let pose = transition.start.interpolate(transition.target, eased);
            transition.write(entity, pose);
            true
        });

        completed
    }

    /// Drain lifecycle notifications accumulated since the last drain.
    pub fn drain_events(&mut self) -> impl Iterator<Item = TransitionEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_active(&self, id: TransitionId) -> bool {
        self.active.iter().any(|(tid, _)| *tid == id)
    }

    /// Normalized progress of an active transition.
    pub fn progress(&self, id: TransitionId) -> Option<f32> {
        self.active
            .iter()
            .find(|(tid, _)| *tid == id)
            .map(|(_, t)| t.progress())
    }

    /// Number of active transitions.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl fmt::Debug for TransitionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("active", &self.active.len())
            .field("next_id", &self.next_id)
            .field("pending_events", &self.events.len())
            .finish()
    }
}
