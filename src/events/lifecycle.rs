//! Storage lifecycle events.
//!
//! [`StorageSpawned`] is triggered once a storage entity has been inserted
//! into the live world, either freshly built or rebuilt from a save.
//! Despawn has no event of its own: observers hook the `Remove` lifecycle
//! of the component they care about.
//!
//! # Related
//!
//! - [`crate::systems::emptyindicator::indicator_spawn_observer`] – binds indicators on spawn
//! - [`crate::game::spawn_food_bowl`] – triggers the event for fresh spawns
//! - [`crate::save::savegame::load_game`] – triggers the event for reloads

use bevy_ecs::prelude::*;

/// Event emitted after a storage entity enters the world.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageSpawned {
    /// The storage entity.
    pub entity: Entity,
    /// `true` when the entity was restored from a save rather than built.
    pub respawning_after_load: bool,
}
