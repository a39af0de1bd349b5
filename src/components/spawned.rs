//! Live-world marker component.
//!
//! An entity with [`Spawned`] takes part in the running simulation. Entities
//! that are being set up, or that were pulled out of the world without being
//! despawned, lack the marker and are skipped by periodic checks.

use bevy_ecs::prelude::Component;

/// Tag component for entities that are part of the live world.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Spawned;
