//! Empty indicator systems.
//!
//! This module drives [`EmptyIndicator`] components through their lifecycle:
//!
//! - [`indicator_spawn_observer`] – binds the owner and primes the cursor on spawn
//! - [`indicator_pulse_system`] – periodic callback, re-evaluates due indicators
//! - [`indicator_despawn_observer`] – releases a held overlay when the indicator goes away
//!
//! # System Flow
//!
//! Each step:
//!
//! 1. `indicator_pulse_system` asks the configured [`Cadence`] whether this
//!    step is a callback step (every step for the real-time cadence, rare
//!    pulses otherwise)
//! 2. For each indicator, [`EmptyIndicator::on_pulse`] decides whether a check
//!    is due and moves the cursor
//! 3. [`check_and_update_overlay`] compares storage emptiness with the overlay
//!    state and enables or disables the question mark
//!
//! Every failure path (no owner, owner not in the live world, no overlay
//! drawer reachable) is a silent skip; the next due pulse tries again.
//!
//! [`Cadence`]: crate::resources::indicatorconfig::Cadence

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::components::emptyindicator::EmptyIndicator;
use crate::components::onmap::OnMap;
use crate::components::overlay::{OverlayDrawer, OverlayKind};
use crate::components::spawned::Spawned;
use crate::components::storage::Storage;
use crate::events::lifecycle::StorageSpawned;
use crate::events::overlay::OverlayToggled;
use crate::resources::indicatorconfig::IndicatorConfig;
use crate::resources::worldtime::WorldTime;

/// Storages that are part of the live world, with the map they sit on.
pub type LiveStorages<'w, 's> =
    Query<'w, 's, (&'static Storage, Option<&'static OnMap>), With<Spawned>>;

/// Observer for [`StorageSpawned`].
///
/// Binds `owner` when the entity is a storage; otherwise the indicator stays
/// inactive. A fresh spawn moves the cursor to now, a reload keeps the cursor
/// restored from the save.
pub fn indicator_spawn_observer(
    trigger: On<StorageSpawned>,
    config: Res<IndicatorConfig>,
    world_time: Res<WorldTime>,
    mut indicators: Query<&mut EmptyIndicator>,
    storages: Query<(), With<Storage>>,
) {
    let event = trigger.event();
    let Ok(mut indicator) = indicators.get_mut(event.entity) else {
        return;
    };

    indicator.owner = storages.contains(event.entity).then_some(event.entity);
    if indicator.owner.is_none() {
        debug!(
            "Entity {:?} has no Storage, empty indicator stays inactive",
            event.entity
        );
    }

    if !event.respawning_after_load {
        indicator.reset_cursor(config.cadence, &world_time);
    }
}

/// Periodic callback for every indicator.
pub fn indicator_pulse_system(
    config: Res<IndicatorConfig>,
    world_time: Res<WorldTime>,
    mut indicators: Query<&mut EmptyIndicator>,
    storages: LiveStorages,
    mut drawers: Query<&mut OverlayDrawer>,
    mut commands: Commands,
) {
    let cadence = config.cadence();
    if !cadence.is_callback_step(world_time.ticks) {
        return;
    }

    for mut indicator in indicators.iter_mut() {
        if !indicator.on_pulse(cadence, &world_time) {
            continue;
        }
        check_and_update_overlay(&mut indicator, &storages, &mut drawers, &mut commands);
    }
}

/// Show the question mark over an empty storage, hide it over a non-empty one.
///
/// Enable is only issued while no overlay is held and disable only while one
/// is held, so repeated calls with unchanged contents do nothing.
pub fn check_and_update_overlay(
    indicator: &mut EmptyIndicator,
    storages: &LiveStorages,
    drawers: &mut Query<&mut OverlayDrawer>,
    commands: &mut Commands,
) {
    let Some(owner) = indicator.owner else {
        return;
    };
    let Ok((storage, on_map)) = storages.get(owner) else {
        trace!("Storage {:?} is not in the live world, skipping", owner);
        return;
    };

    let is_empty = storage.is_empty();
    if is_empty == indicator.is_shown() {
        return;
    }

    let Some(mut drawer) = on_map.and_then(|map| drawers.get_mut(map.0).ok()) else {
        trace!("No overlay drawer reachable for {:?}, skipping", owner);
        return;
    };

    if is_empty {
        indicator.overlay = Some(drawer.enable(owner, OverlayKind::QuestionMark));
        debug!("'{}' is empty, showing indicator", storage.label);
    } else {
        drawer.disable(owner, &mut indicator.overlay);
        debug!("'{}' has items again, hiding indicator", storage.label);
    }
    commands.trigger(OverlayToggled {
        entity: owner,
        kind: OverlayKind::QuestionMark,
        shown: is_empty,
    });
}

/// Observer for the removal of an [`EmptyIndicator`], including despawn.
///
/// Disables a held overlay exactly once; does nothing when none is held.
pub fn indicator_despawn_observer(
    trigger: On<Remove, EmptyIndicator>,
    mut indicators: Query<&mut EmptyIndicator>,
    maps: Query<&OnMap>,
    mut drawers: Query<&mut OverlayDrawer>,
    mut commands: Commands,
) {
    let entity = trigger.event().entity;
    let Ok(mut indicator) = indicators.get_mut(entity) else {
        return;
    };
    let owner = indicator.owner.take().unwrap_or(entity);
    if indicator.overlay.is_none() {
        return;
    }

    let drawer = maps
        .get(owner)
        .ok()
        .and_then(|map| drawers.get_mut(map.0).ok());
    match drawer {
        Some(mut drawer) => {
            drawer.disable(owner, &mut indicator.overlay);
            commands.trigger(OverlayToggled {
                entity: owner,
                kind: OverlayKind::QuestionMark,
                shown: false,
            });
        }
        None => {
            debug!("Overlay drawer for {:?} already gone, dropping handle", owner);
            indicator.overlay = None;
        }
    }
}
