//! Persistence.
//!
//! - [`scribe`] – per-entity key/value blobs and the [`scribe::Scribe`] read/write primitive
//! - [`savegame`] – whole-world snapshot, JSON file I/O
pub mod savegame;
pub mod scribe;
