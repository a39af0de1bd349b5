//! Simulation and real-time clock.
//!
//! [`WorldTime`] carries two clocks side by side:
//! - simulation time (`elapsed`, `delta`, `ticks`), which follows `time_scale`
//! - real time (`real_elapsed`), which advances by the unscaled frame delta
//!
//! Cadences measured in real seconds read `real_elapsed` so that changing the
//! game speed does not change how often they fire.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    /// Unscaled seconds since the world started.
    pub real_elapsed: f32,
    /// Simulation steps run so far.
    pub ticks: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            real_elapsed: 0.0,
            ticks: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// True when the current tick lands on a coarse pulse of `interval` ticks.
    pub fn is_pulse(&self, interval: u64) -> bool {
        interval != 0 && self.ticks % interval == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_matches_multiples_of_interval() {
        let mut wt = WorldTime::default();
        wt.ticks = 500;
        assert!(wt.is_pulse(250));
        wt.ticks = 501;
        assert!(!wt.is_pulse(250));
    }

    #[test]
    fn zero_interval_never_pulses() {
        let wt = WorldTime::default();
        assert!(!wt.is_pulse(0));
    }
}
