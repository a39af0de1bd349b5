//! ECS components for entities.
//!
//! Submodules overview:
//! - [`emptyindicator`] – question-mark overlay that tracks whether a storage is empty
//! - [`onmap`] – link from an entity to the map it lives on
//! - [`overlay`] – per-map overlay drawer, overlay kinds and handles
//! - [`spawned`] – marker for entities that are part of the live world
//! - [`storage`] – item stacks held by a storage building

pub mod emptyindicator;
pub mod onmap;
pub mod overlay;
pub mod spawned;
pub mod storage;
