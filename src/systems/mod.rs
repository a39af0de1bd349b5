//! Simulation systems.
//!
//! Submodules overview
//! - [`emptyindicator`] – spawn, periodic and despawn handling of empty indicators
//! - [`time`] – advance simulation time, real time and ticks

pub mod emptyindicator;
pub mod time;
