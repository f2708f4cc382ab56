use std::collections::HashSet;

use log::info;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::error::RegistryError;

/// Static catalog of selectable entities in declaration order.
/// Validated once at construction and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    /// Build a registry, rejecting empty or duplicate ids, negative orbit
    /// radii and non-finite numeric parameters.
    pub fn new(entities: Vec<Entity>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(entities.len());
        for (index, entity) in entities.iter().enumerate() {
            if entity.id.as_str().is_empty() {
                return Err(RegistryError::EmptyId(index));
            }
            if !seen.insert(entity.id.clone()) {
                return Err(RegistryError::DuplicateId(entity.id.clone()));
            }
            validate_finite(entity)?;
            if entity.orbit_radius < 0.0 {
                return Err(RegistryError::NegativeOrbit {
                    id: entity.id.clone(),
                    radius: entity.orbit_radius,
                });
            }
        }
        info!("entity registry loaded: {} entities", entities.len());
        Ok(Self { entities })
    }

    /// Look up an entity by id.
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    /// Declaration-order index of an id.
    pub fn index_of(&self, id: &EntityId) -> Option<usize> {
        self.entities.iter().position(|e| &e.id == id)
    }

    /// Entity at a declaration-order index.
    pub fn at(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntityId> {
        self.entities.iter().map(|e| &e.id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity after `current` in declaration order, wrapping around.
    /// With no current entity this is the first one.
    pub fn next_after(&self, current: Option<&EntityId>) -> Option<&EntityId> {
        self.step(current, 1)
    }

    /// Entity before `current` in declaration order, wrapping around.
    /// With no current entity this is the last one.
    pub fn previous_before(&self, current: Option<&EntityId>) -> Option<&EntityId> {
        self.step(current, -1)
    }

    fn step(&self, current: Option<&EntityId>, delta: isize) -> Option<&EntityId> {
        let n = self.entities.len() as isize;
        if n == 0 {
            return None;
        }
        // Nothing selected counts as index -1, so +1 lands on 0 and -1 on n-1.
        let index = current.and_then(|id| self.index_of(id)).map_or(-1, |i| i as isize);
        let next = (index + delta).rem_euclid(n) as usize;
        self.entities.get(next).map(|e| &e.id)
    }
}

fn validate_finite(entity: &Entity) -> Result<(), RegistryError> {
    let checks: [(&'static str, bool); 5] = [
        ("position", entity.world_position.is_finite()),
        ("orbit radius", entity.orbit_radius.is_finite()),
        ("orbit speed", entity.orbit_angular_speed.is_finite()),
        ("rotation speed", entity.self_rotation_speed.is_finite()),
        ("size", entity.visual_size.is_finite()),
    ];
    match checks.iter().find(|(_, ok)| !ok) {
        Some(&(field, _)) => Err(RegistryError::NonFinite { id: entity.id.clone(), field }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn registry(ids: &[&str]) -> EntityRegistry {
        EntityRegistry::new(ids.iter().map(|id| Entity::new(*id)).collect()).unwrap()
    }

    #[test]
    fn lookup_by_id_and_index() {
        let reg = registry(&["a", "b", "c"]);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.index_of(&"b".into()), Some(1));
        assert_eq!(reg.at(2).unwrap().id.as_str(), "c");
        assert!(reg.get(&"z".into()).is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = EntityRegistry::new(vec![Entity::new("a"), Entity::new("a")]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(ref id) if id.as_str() == "a"));
    }

    #[test]
    fn rejects_empty_id() {
        let err = EntityRegistry::new(vec![Entity::new("a"), Entity::new("")]).unwrap_err();
        assert!(matches!(err, RegistryError::EmptyId(1)));
    }

    #[test]
    fn rejects_negative_radius_and_nan() {
        let negative = Entity::new("a").with_orbit(-1.0, 0.1);
        assert!(matches!(
            EntityRegistry::new(vec![negative]),
            Err(RegistryError::NegativeOrbit { .. })
        ));
        let nan = Entity::new("a").with_position(Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(matches!(
            EntityRegistry::new(vec![nan]),
            Err(RegistryError::NonFinite { field: "position", .. })
        ));
    }

    #[test]
    fn cycling_wraps_in_declaration_order() {
        let reg = registry(&["a", "b", "c"]);
        let a = EntityId::from("a");
        let c = EntityId::from("c");
        assert_eq!(reg.next_after(None).unwrap().as_str(), "a");
        assert_eq!(reg.previous_before(None).unwrap().as_str(), "c");
        assert_eq!(reg.next_after(Some(&c)).unwrap().as_str(), "a");
        assert_eq!(reg.previous_before(Some(&a)).unwrap().as_str(), "c");
    }

    #[test]
    fn cycling_empty_registry_yields_none() {
        let reg = EntityRegistry::default();
        assert!(reg.next_after(None).is_none());
        assert!(reg.previous_before(None).is_none());
    }
}
