//! Empty storage indicator component.
//!
//! An [`EmptyIndicator`] sits on a storage entity and keeps a question-mark
//! overlay in sync with the storage contents: shown while the storage is
//! empty, hidden while it holds anything.
//!
//! # How It Works
//!
//! 1. On spawn, `indicator_spawn_observer` binds `owner` to the entity if it
//!    has a [`Storage`](crate::components::storage::Storage); on a fresh spawn
//!    it also moves the cursor to "now" so the first check waits one interval
//! 2. Every callback step, `indicator_pulse_system` calls [`EmptyIndicator::on_pulse`];
//!    when it returns `true` the overlay is re-evaluated
//! 3. On despawn, `indicator_despawn_observer` releases a held overlay
//!
//! The cursor kind follows the cadence: no cursor for the rare cadence, last
//! check in real seconds for the real-time cadence, last check tick for the
//! tick cadence. Only the latter two are persisted.
//!
//! # Related
//!
//! - [`crate::systems::emptyindicator`] – spawn, pulse and despawn handling
//! - [`crate::resources::indicatorconfig::IndicatorConfig`] – cadence selection

use bevy_ecs::prelude::{Component, Entity};

use crate::components::overlay::OverlayHandle;
use crate::resources::indicatorconfig::{Cadence, CadenceKind};
use crate::resources::worldtime::WorldTime;
use crate::save::scribe::Scribe;

/// Save key for the real-time cursor.
pub const LAST_CHECK_TIME_KEY: &str = "lastCheckTime";
/// Save key for the tick cursor.
pub const LAST_CHECK_TICK_KEY: &str = "lastCheckTick";

/// When the last check ran.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckCursor {
    None,
    /// Real seconds, see [`WorldTime::real_elapsed`].
    Time(f32),
    /// Simulation tick, see [`WorldTime::ticks`].
    Tick(u64),
}

impl CheckCursor {
    /// Cursor of the kind `cadence` uses, positioned at zero.
    pub fn zero(cadence: CadenceKind) -> Self {
        match cadence {
            CadenceKind::Rare => CheckCursor::None,
            CadenceKind::Realtime => CheckCursor::Time(0.0),
            CadenceKind::Ticks => CheckCursor::Tick(0),
        }
    }

    /// Cursor of the kind `cadence` uses, positioned at the current time.
    pub fn now(cadence: CadenceKind, time: &WorldTime) -> Self {
        match cadence {
            CadenceKind::Rare => CheckCursor::None,
            CadenceKind::Realtime => CheckCursor::Time(time.real_elapsed),
            CadenceKind::Ticks => CheckCursor::Tick(time.ticks),
        }
    }
}

/// Shows a question-mark overlay over its storage while the storage is empty.
#[derive(Component, Debug)]
pub struct EmptyIndicator {
    /// Storage entity this indicator watches. `None` until spawn setup, and
    /// for good if the entity turned out not to be a storage.
    pub owner: Option<Entity>,
    /// Handle of the overlay currently shown, if any.
    pub overlay: Option<OverlayHandle>,
    pub cursor: CheckCursor,
}

impl EmptyIndicator {
    pub fn new(cadence: CadenceKind) -> Self {
        EmptyIndicator {
            owner: None,
            overlay: None,
            cursor: CheckCursor::zero(cadence),
        }
    }

    pub fn is_shown(&self) -> bool {
        self.overlay.is_some()
    }

    /// Move the cursor to the current time so the next check is a full
    /// interval away.
    pub fn reset_cursor(&mut self, cadence: CadenceKind, time: &WorldTime) {
        self.cursor = CheckCursor::now(cadence, time);
    }

    /// Periodic callback. Returns `true` when a check is due, in which case the
    /// cursor has been moved to now.
    ///
    /// A cursor of the wrong kind for `cadence`, or one ahead of the clock, is
    /// re-seated at now and the check is deferred by one interval.
    pub fn on_pulse(&mut self, cadence: Cadence, time: &WorldTime) -> bool {
        match cadence {
            Cadence::Rare { .. } => true,
            Cadence::RealTime { interval } => {
                let now = time.real_elapsed;
                match self.cursor {
                    CheckCursor::Time(last) if now >= last => {
                        if now - last < interval {
                            return false;
                        }
                        self.cursor = CheckCursor::Time(now);
                        true
                    }
                    _ => {
                        self.cursor = CheckCursor::Time(now);
                        false
                    }
                }
            }
            Cadence::Ticks { interval, .. } => {
                let now = time.ticks;
                match self.cursor {
                    CheckCursor::Tick(last) if now >= last => {
                        if now - last < interval {
                            return false;
                        }
                        self.cursor = CheckCursor::Tick(now);
                        true
                    }
                    _ => {
                        self.cursor = CheckCursor::Tick(now);
                        false
                    }
                }
            }
        }
    }

    /// Save or load the cursor.
    pub fn expose_data(&mut self, scribe: &mut Scribe) {
        match &mut self.cursor {
            CheckCursor::None => {}
            CheckCursor::Time(last) => scribe.look(LAST_CHECK_TIME_KEY, last, 0.0),
            CheckCursor::Tick(last) => scribe.look(LAST_CHECK_TICK_KEY, last, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::scribe::SaveBlob;

    fn time_at(real: f32, ticks: u64) -> WorldTime {
        WorldTime {
            real_elapsed: real,
            ticks,
            ..WorldTime::default()
        }
    }

    #[test]
    fn rare_cadence_is_always_due() {
        let mut indicator = EmptyIndicator::new(CadenceKind::Rare);
        let cadence = Cadence::Rare { pulse: 250 };
        assert!(indicator.on_pulse(cadence, &time_at(0.0, 250)));
        assert!(indicator.on_pulse(cadence, &time_at(0.0, 500)));
        assert_eq!(indicator.cursor, CheckCursor::None);
    }

    #[test]
    fn realtime_cadence_waits_for_interval() {
        let mut indicator = EmptyIndicator::new(CadenceKind::Realtime);
        indicator.reset_cursor(CadenceKind::Realtime, &time_at(1.0, 10));
        let cadence = Cadence::RealTime { interval: 4.0 };

        assert!(!indicator.on_pulse(cadence, &time_at(4.9, 11)));
        assert_eq!(indicator.cursor, CheckCursor::Time(1.0));
        assert!(indicator.on_pulse(cadence, &time_at(5.0, 12)));
        assert_eq!(indicator.cursor, CheckCursor::Time(5.0));
    }

    #[test]
    fn tick_cadence_waits_for_interval() {
        let mut indicator = EmptyIndicator::new(CadenceKind::Ticks);
        let cadence = Cadence::Ticks {
            pulse: 250,
            interval: 30_000,
        };
        assert!(!indicator.on_pulse(cadence, &time_at(0.0, 29_750)));
        assert!(indicator.on_pulse(cadence, &time_at(0.0, 30_000)));
        assert_eq!(indicator.cursor, CheckCursor::Tick(30_000));
        assert!(!indicator.on_pulse(cadence, &time_at(0.0, 30_250)));
    }

    #[test]
    fn cursor_ahead_of_clock_is_reseated() {
        let mut indicator = EmptyIndicator::new(CadenceKind::Ticks);
        indicator.cursor = CheckCursor::Tick(90_000);
        let cadence = Cadence::Ticks {
            pulse: 250,
            interval: 30_000,
        };
        assert!(!indicator.on_pulse(cadence, &time_at(0.0, 500)));
        assert_eq!(indicator.cursor, CheckCursor::Tick(500));
    }

    #[test]
    fn mismatched_cursor_kind_is_reseated() {
        let mut indicator = EmptyIndicator::new(CadenceKind::Rare);
        let cadence = Cadence::RealTime { interval: 4.0 };
        assert!(!indicator.on_pulse(cadence, &time_at(2.0, 3)));
        assert_eq!(indicator.cursor, CheckCursor::Time(2.0));
    }

    #[test]
    fn tick_cursor_persists_under_its_key() {
        let mut indicator = EmptyIndicator::new(CadenceKind::Ticks);
        indicator.cursor = CheckCursor::Tick(61_000);
        let mut blob = SaveBlob::new();
        indicator.expose_data(&mut Scribe::saving(&mut blob));
        assert!(blob.contains_key(LAST_CHECK_TICK_KEY));

        let mut loaded = EmptyIndicator::new(CadenceKind::Ticks);
        loaded.expose_data(&mut Scribe::loading(&mut blob));
        assert_eq!(loaded.cursor, CheckCursor::Tick(61_000));
    }

    #[test]
    fn time_cursor_absent_loads_zero() {
        let mut blob = SaveBlob::new();
        let mut loaded = EmptyIndicator::new(CadenceKind::Realtime);
        loaded.cursor = CheckCursor::Time(3.0);
        loaded.expose_data(&mut Scribe::loading(&mut blob));
        assert_eq!(loaded.cursor, CheckCursor::Time(0.0));
    }

    #[test]
    fn rare_cadence_persists_nothing() {
        let mut indicator = EmptyIndicator::new(CadenceKind::Rare);
        let mut blob = SaveBlob::new();
        indicator.expose_data(&mut Scribe::saving(&mut blob));
        assert!(blob.is_empty());
    }
}
