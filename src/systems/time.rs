//! Time update system.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource by one simulation step.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance both clocks and the tick counter by one step.
///
/// `dt` is the unscaled frame delta in seconds. Real time receives `dt`
/// as-is; simulation time receives `dt * time_scale`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.real_elapsed += dt;
    wt.ticks += 1;
}
