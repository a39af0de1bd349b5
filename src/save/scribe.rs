//! Key/value persistence for component fields.
//!
//! A [`Scribe`] wraps one entity's [`SaveBlob`] in either saving or loading
//! mode. Components describe their persisted fields once, with
//! [`Scribe::look`], and the same code path writes them on save and reads
//! them back on load.
//!
//! # Defaults
//!
//! - Saving skips values equal to their default, keeping blobs small.
//! - Loading falls back to the default when a key is absent or holds a value
//!   of the wrong type.
//!
//! # Example
//!
//! ```ignore
//! fn expose_data(&mut self, scribe: &mut Scribe) {
//!     scribe.look("lastCheckTick", &mut self.last_tick, 0u64);
//! }
//! ```

use std::collections::BTreeMap;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persisted fields of one entity, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaveBlob(BTreeMap<String, Value>);

impl SaveBlob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScribeMode {
    Saving,
    Loading,
}

/// Reads or writes fields of a [`SaveBlob`] depending on its mode.
pub struct Scribe<'a> {
    mode: ScribeMode,
    blob: &'a mut SaveBlob,
}

impl<'a> Scribe<'a> {
    pub fn saving(blob: &'a mut SaveBlob) -> Self {
        Scribe {
            mode: ScribeMode::Saving,
            blob,
        }
    }

    pub fn loading(blob: &'a mut SaveBlob) -> Self {
        Scribe {
            mode: ScribeMode::Loading,
            blob,
        }
    }

    pub fn mode(&self) -> ScribeMode {
        self.mode
    }

    /// Save `value` under `key`, or load it back into `value`.
    pub fn look<T>(&mut self, key: &str, value: &mut T, default: T)
    where
        T: Serialize + DeserializeOwned + PartialEq,
    {
        match self.mode {
            ScribeMode::Saving => {
                if *value == default {
                    return;
                }
                match serde_json::to_value(&*value) {
                    Ok(raw) => self.blob.insert(key, raw),
                    Err(e) => warn!("Failed to save '{}': {}", key, e),
                }
            }
            ScribeMode::Loading => {
                *value = match self.blob.get(key) {
                    Some(raw) => match T::deserialize(raw) {
                        Ok(loaded) => loaded,
                        Err(e) => {
                            warn!("Invalid value for '{}' ({}), using default", key, e);
                            default
                        }
                    },
                    None => default,
                };
            }
        }
    }
}
