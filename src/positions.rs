//! Non-owning entity lookups.
//!
//! Indicators refer to the entity they follow and to their viewer by
//! [`Entity`] id only. Every tick the id is resolved through an
//! [`EntityPositions`] implementation, so a despawned entity simply stops
//! resolving instead of dangling.

use bevy::prelude::Entity;
use glam::Vec3;
use hashbrown::HashMap;

/// Outcome of resolving an entity id to a world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityLocation {
    /// The entity exists and has a world-space position.
    At(Vec3),
    /// The entity exists but currently has no placement (for example it lacks
    /// a transform). It may become placed again later.
    Unplaced,
    /// The entity no longer exists.
    Despawned,
}

impl EntityLocation {
    /// Returns the position when the entity is placed.
    #[must_use]
    pub const fn position(self) -> Option<Vec3> {
        match self {
            Self::At(position) => Some(position),
            Self::Unplaced | Self::Despawned => None,
        }
    }
}

/// Read-only access to entity world positions.
pub trait EntityPositions {
    /// Resolves `entity` to its current location.
    fn locate(&self, entity: Entity) -> EntityLocation;
}

/// Table-backed [`EntityPositions`] for hosts that do not run an ECS world.
///
/// Entities missing from the table are reported as despawned.
///
/// # Examples
///
/// ```
/// use bevy::prelude::World;
/// use floatbar::positions::{EntityLocation, EntityPositions, PositionTable};
/// use glam::Vec3;
///
/// let mut world = World::new();
/// let entity = world.spawn_empty().id();
/// let mut table = PositionTable::default();
/// table.place(entity, Vec3::X);
/// assert_eq!(table.locate(entity), EntityLocation::At(Vec3::X));
/// table.remove(entity);
/// assert_eq!(table.locate(entity), EntityLocation::Despawned);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    entries: HashMap<Entity, Option<Vec3>>,
}

impl PositionTable {
    /// Records `entity` at `position`, replacing any previous entry.
    pub fn place(&mut self, entity: Entity, position: Vec3) {
        self.entries.insert(entity, Some(position));
    }

    /// Keeps `entity` alive without a position.
    pub fn unplace(&mut self, entity: Entity) {
        self.entries.insert(entity, None);
    }

    /// Forgets `entity`; subsequent lookups report it as despawned.
    pub fn remove(&mut self, entity: Entity) {
        self.entries.remove(&entity);
    }
}

impl EntityPositions for PositionTable {
    fn locate(&self, entity: Entity) -> EntityLocation {
        match self.entries.get(&entity) {
            Some(Some(position)) => EntityLocation::At(*position),
            Some(None) => EntityLocation::Unplaced,
            None => EntityLocation::Despawned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_tracks_unplaced_entities() {
        let mut world = bevy::prelude::World::new();
        let entity = world.spawn_empty().id();
        let mut table = PositionTable::default();
        assert_eq!(table.locate(entity), EntityLocation::Despawned);
        table.unplace(entity);
        assert_eq!(table.locate(entity), EntityLocation::Unplaced);
        table.place(entity, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            table.locate(entity).position(),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
    }
}
