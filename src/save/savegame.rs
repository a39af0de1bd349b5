//! Save game snapshot.
//!
//! [`save_game`] captures the clock and every storage in the world into a
//! [`SaveGame`]; [`load_game`] rebuilds them into an empty world. Indicator
//! state goes through [`EmptyIndicator::expose_data`] so the blob only holds
//! what the active cadence persists.
//!
//! # File Format
//!
//! JSON, for example:
//!
//! ```json
//! {
//!   "ticks": 60250,
//!   "elapsed": 1004.1,
//!   "real_elapsed": 1004.1,
//!   "storages": [
//!     {
//!       "label": "Bowl 1",
//!       "on_map": true,
//!       "items": [{ "def": "kibble", "count": 3 }],
//!       "indicator": { "lastCheckTick": 60000 }
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use bevy_ecs::prelude::*;
use log::info;
use serde::{Deserialize, Serialize};

use crate::components::emptyindicator::EmptyIndicator;
use crate::components::onmap::OnMap;
use crate::components::overlay::OverlayDrawer;
use crate::components::spawned::Spawned;
use crate::components::storage::{ItemStack, Storage};
use crate::events::lifecycle::StorageSpawned;
use crate::resources::indicatorconfig::IndicatorConfig;
use crate::resources::worldtime::WorldTime;
use crate::save::scribe::{SaveBlob, Scribe};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub ticks: u64,
    pub elapsed: f32,
    pub real_elapsed: f32,
    pub storages: Vec<SavedStorage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedStorage {
    pub label: String,
    /// Whether the storage sat on the map.
    #[serde(default)]
    pub on_map: bool,
    #[serde(default)]
    pub items: Vec<ItemStack>,
    /// Indicator fields; `None` when the storage had no indicator.
    #[serde(default)]
    pub indicator: Option<SaveBlob>,
}

/// Capture the clock and all live storages.
pub fn save_game(world: &mut World) -> SaveGame {
    let time = *world.resource::<WorldTime>();
    let mut storages = Vec::new();

    let mut query = world.query_filtered::<(
        &Storage,
        Option<&OnMap>,
        Option<&mut EmptyIndicator>,
    ), With<Spawned>>();
    for (storage, on_map, indicator) in query.iter_mut(world) {
        let indicator = indicator.map(|mut indicator| {
            let mut blob = SaveBlob::new();
            indicator.expose_data(&mut Scribe::saving(&mut blob));
            blob
        });
        storages.push(SavedStorage {
            label: storage.label.clone(),
            on_map: on_map.is_some(),
            items: storage.held().to_vec(),
            indicator,
        });
    }

    info!(
        "Saved {} storages at tick {}",
        storages.len(),
        time.ticks
    );

    SaveGame {
        ticks: time.ticks,
        elapsed: time.elapsed,
        real_elapsed: time.real_elapsed,
        storages,
    }
}

/// Rebuild a saved game into `world`.
///
/// Restores the clock, spawns a map with an [`OverlayDrawer`] if any storage
/// was on one, and spawns every storage. Indicators are restored from their
/// blob and then see a [`StorageSpawned`] with `respawning_after_load` set.
/// Returns the spawned storage entities in save order.
pub fn load_game(world: &mut World, save: &SaveGame) -> Vec<Entity> {
    {
        let mut time = world.resource_mut::<WorldTime>();
        time.ticks = save.ticks;
        time.elapsed = save.elapsed;
        time.real_elapsed = save.real_elapsed;
        time.delta = 0.0;
    }
    let cadence = world.resource::<IndicatorConfig>().cadence;

    let map = save
        .storages
        .iter()
        .any(|s| s.on_map)
        .then(|| world.spawn(OverlayDrawer::new()).id());

    let mut entities = Vec::with_capacity(save.storages.len());
    for saved in &save.storages {
        let storage = Storage::with_stacks(saved.label.clone(), saved.items.clone());
        let mut entity = world.spawn((storage, Spawned));
        if let (true, Some(map)) = (saved.on_map, map) {
            entity.insert(OnMap(map));
        }
        if let Some(blob) = &saved.indicator {
            let mut blob = blob.clone();
            let mut indicator = EmptyIndicator::new(cadence);
            indicator.expose_data(&mut Scribe::loading(&mut blob));
            entity.insert(indicator);
        }
        entities.push(entity.id());
    }

    for &entity in &entities {
        world.trigger(StorageSpawned {
            entity,
            respawning_after_load: true,
        });
    }
    world.flush();

    info!(
        "Loaded {} storages at tick {}",
        entities.len(),
        save.ticks
    );
    entities
}

/// Write a save game as pretty JSON.
pub fn write_save(path: impl AsRef<Path>, save: &SaveGame) -> Result<(), String> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(save)
        .map_err(|e| format!("Failed to serialize save: {}", e))?;
    fs::write(path, content).map_err(|e| format!("Failed to write save file: {}", e))?;
    info!("Saved game to {:?}", path);
    Ok(())
}

/// Read a save game from JSON.
pub fn read_save(path: impl AsRef<Path>) -> Result<SaveGame, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read save file: {}", e))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse save file: {}", e))
}
