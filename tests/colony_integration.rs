//! Colony driver integration tests: full update schedule with colonists,
//! haulers and indicators running together.

use bevy_ecs::prelude::*;

use emptybowl::components::storage::Storage;
use emptybowl::game::{
    Colony, FOOD_DEF, REFILL_AMOUNT, build_update_schedule, despawn_storage, setup_colony,
    setup_world, shown_indicator_count,
};
use emptybowl::resources::indicatorconfig::{CadenceKind, IndicatorConfig};
use emptybowl::systems::time::update_world_time;

fn make_colony(cadence: CadenceKind, eat_chance: f32, refill_chance: f32) -> World {
    let mut world = World::new();
    setup_world(&mut world, IndicatorConfig::with_cadence(cadence));
    let mut colony = Colony::new(7);
    colony.eat_chance = eat_chance;
    colony.refill_chance = refill_chance;
    world.insert_resource(colony);
    world
}

fn run_steps(world: &mut World, schedule: &mut Schedule, steps: u64) {
    for _ in 0..steps {
        update_world_time(world, 1.0 / 60.0);
        schedule.run(world);
        world.clear_trackers();
    }
}

#[test]
fn idle_colony_flags_only_empty_bowls() {
    let mut world = make_colony(CadenceKind::Rare, 0.0, 0.0);
    let bowls = setup_colony(&mut world, 4);
    let mut schedule = build_update_schedule();

    run_steps(&mut world, &mut schedule, 250);

    assert_eq!(shown_indicator_count(&mut world), 2);
    assert_eq!(
        world.get::<Storage>(bowls[0]).unwrap().count(FOOD_DEF),
        REFILL_AMOUNT
    );
}

#[test]
fn hungry_colony_empties_every_bowl() {
    let mut world = make_colony(CadenceKind::Rare, 1.0, 0.0);
    setup_colony(&mut world, 4);
    let mut schedule = build_update_schedule();

    run_steps(&mut world, &mut schedule, 250);

    assert_eq!(shown_indicator_count(&mut world), 4);
}

#[test]
fn haulers_clear_indicators() {
    let mut world = make_colony(CadenceKind::Rare, 0.0, 1.0);
    let bowls = setup_colony(&mut world, 2);
    let mut schedule = build_update_schedule();

    run_steps(&mut world, &mut schedule, 250);

    assert_eq!(shown_indicator_count(&mut world), 0);
    assert!(!world.get::<Storage>(bowls[1]).unwrap().is_empty());
}

#[test]
fn tick_cadence_flags_late() {
    let mut world = make_colony(CadenceKind::Ticks, 1.0, 0.0);
    setup_colony(&mut world, 2);
    let mut schedule = build_update_schedule();

    run_steps(&mut world, &mut schedule, 29_999);
    assert_eq!(shown_indicator_count(&mut world), 0);

    run_steps(&mut world, &mut schedule, 1);
    assert_eq!(shown_indicator_count(&mut world), 2);
}

#[test]
fn despawned_bowls_leave_no_overlays() {
    let mut world = make_colony(CadenceKind::Rare, 1.0, 0.0);
    let bowls = setup_colony(&mut world, 3);
    let mut schedule = build_update_schedule();
    run_steps(&mut world, &mut schedule, 250);
    assert_eq!(shown_indicator_count(&mut world), 3);

    for bowl in bowls {
        assert!(despawn_storage(&mut world, bowl));
    }

    let mut drawers = world.query::<&emptybowl::components::overlay::OverlayDrawer>();
    let total: usize = drawers.iter(&world).map(|d| d.overlay_count()).sum();
    assert_eq!(total, 0);
}
