use bevy_ecs::prelude::{Component, Entity};

/// Links an entity to the map entity it lives on.
///
/// The map entity is expected to carry an
/// [`OverlayDrawer`](crate::components::overlay::OverlayDrawer). Entities
/// without `OnMap` have no overlay subsystem to talk to.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OnMap(pub Entity);
