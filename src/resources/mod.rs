//! ECS resources made available to systems.
//!
//! Overview
//! - `indicatorconfig` – cadence selection and intervals, loaded from INI
//! - `worldtime` – simulation time, real time and tick counter
pub mod indicatorconfig;
pub mod worldtime;
