//! Colony setup and simulation driver.
//!
//! Builds a world with one map and a row of food bowls, then simulates
//! colonists eating from the bowls and haulers refilling them. This is the
//! host side of the empty indicator: it owns the schedule, spawns and
//! despawns storages and advances the clock.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::emptyindicator::EmptyIndicator;
use crate::components::onmap::OnMap;
use crate::components::overlay::OverlayDrawer;
use crate::components::spawned::Spawned;
use crate::components::storage::{ItemStack, Storage};
use crate::events::lifecycle::StorageSpawned;
use crate::events::overlay::log_overlay_toggled;
use crate::resources::indicatorconfig::IndicatorConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::emptyindicator::{
    indicator_despawn_observer, indicator_pulse_system, indicator_spawn_observer,
};

/// Item def the bowls are filled with.
pub const FOOD_DEF: &str = "kibble";
/// Stack size a hauler drops into a bowl.
pub const REFILL_AMOUNT: u32 = 10;

/// Colony activity parameters and random source.
#[derive(Resource)]
pub struct Colony {
    pub rng: fastrand::Rng,
    /// Chance per step that a colonist eats one item from a given bowl.
    pub eat_chance: f32,
    /// Chance per step that a hauler refills a given empty bowl.
    pub refill_chance: f32,
}

impl Colony {
    pub fn new(seed: u64) -> Self {
        Colony {
            rng: fastrand::Rng::with_seed(seed),
            eat_chance: 0.002,
            refill_chance: 0.0005,
        }
    }
}

/// Insert resources and observers the indicator needs.
pub fn setup_world(world: &mut World, config: IndicatorConfig) {
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(config);
    world.add_observer(indicator_spawn_observer);
    world.add_observer(indicator_despawn_observer);
    world.add_observer(log_overlay_toggled);
    world.flush();
}

/// Per-step schedule.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(colony_activity_system);
    update.add_systems(indicator_pulse_system.after(colony_activity_system));
    update
}

pub fn spawn_map(world: &mut World) -> Entity {
    world.spawn(OverlayDrawer::new()).id()
}

/// Spawn a food bowl with an empty indicator on `map`.
pub fn spawn_food_bowl(
    world: &mut World,
    map: Entity,
    label: impl Into<String>,
    stacks: Vec<ItemStack>,
) -> Entity {
    let cadence = world.resource::<IndicatorConfig>().cadence;
    let entity = world
        .spawn((
            Storage::with_stacks(label, stacks),
            EmptyIndicator::new(cadence),
            OnMap(map),
            Spawned,
        ))
        .id();
    world.trigger(StorageSpawned {
        entity,
        respawning_after_load: false,
    });
    entity
}

/// Spawn `count` bowls on a fresh map. Every other bowl starts empty.
pub fn setup_colony(world: &mut World, count: usize) -> Vec<Entity> {
    let map = spawn_map(world);
    let bowls = (0..count)
        .map(|i| {
            let stacks = if i % 2 == 0 {
                vec![ItemStack::new(FOOD_DEF, REFILL_AMOUNT)]
            } else {
                Vec::new()
            };
            spawn_food_bowl(world, map, format!("Bowl {}", i + 1), stacks)
        })
        .collect::<Vec<_>>();
    info!("Colony set up with {} food bowls", bowls.len());
    bowls
}

/// Remove a storage from the world. Returns `false` if it was already gone.
pub fn despawn_storage(world: &mut World, entity: Entity) -> bool {
    world.despawn(entity)
}

/// Colonists eat from bowls, haulers refill empty ones.
pub fn colony_activity_system(
    mut colony: ResMut<Colony>,
    mut storages: Query<&mut Storage, (With<EmptyIndicator>, With<Spawned>)>,
) {
    let colony = &mut *colony;
    for mut storage in storages.iter_mut() {
        if storage.is_empty() {
            if colony.rng.f32() < colony.refill_chance {
                storage.add(FOOD_DEF, REFILL_AMOUNT);
                debug!("Hauler refilled '{}'", storage.label);
            }
        } else if colony.rng.f32() < colony.eat_chance {
            storage.remove_any(1);
            debug!(
                "Colonist ate from '{}', {} left",
                storage.label,
                storage.total_count()
            );
        }
    }
}

/// Number of storages currently showing the empty indicator.
pub fn shown_indicator_count(world: &mut World) -> usize {
    let mut query = world.query::<&EmptyIndicator>();
    query.iter(world).filter(|i| i.is_shown()).count()
}
