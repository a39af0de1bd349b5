//! emptybowl library.
//!
//! Empty-storage indicator for a colony simulation: food bowls show a
//! question-mark overlay while they hold nothing. The crate exposes the ECS
//! components, resources, systems and events, plus the persistence layer and
//! a small colony driver used by the binary and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod save;
pub mod systems;
