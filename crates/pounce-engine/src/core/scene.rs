use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::pose::Pose;

/// Entity storage using a flat Vec, kept in spawn order.
/// Sized for a gameplay slice (tens of entities, not thousands).
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(32),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    /// Any transition still targeting it retires on its next tick.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Pose snapshot of an entity, if it exists.
    pub fn pose(&self, id: EntityId) -> Option<Pose> {
        self.get(id).map(Entity::pose)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn spawn_and_read_pose() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        let rot = Quat::from_rotation_x(0.3);
        scene.spawn(Entity::new(id).with_pos(Vec3::new(1.0, 2.0, 3.0)).with_rotation(rot));
        let pose = scene.pose(id).unwrap();
        assert_eq!(pose.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.rotation, rot);
    }

    #[test]
    fn despawn_keeps_spawn_order() {
        let mut scene = Scene::new();
        for i in 1..=3 {
            scene.spawn(Entity::new(EntityId(i)));
        }
        assert!(scene.despawn(EntityId(1)).is_some());
        let ids: Vec<_> = scene.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(2), EntityId(3)]);
        assert!(!scene.contains(EntityId(1)));
        assert!(scene.despawn(EntityId(1)).is_none());
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("player"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("button_top"));
        assert_eq!(scene.find_by_tag("button_top").unwrap().id, EntityId(2));
        assert!(scene.find_by_tag("missing").is_none());
    }
}
