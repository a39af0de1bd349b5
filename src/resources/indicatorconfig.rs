//! Indicator configuration resource.
//!
//! Selects the cadence used by every [`EmptyIndicator`] in the world and the
//! intervals that go with it. Values come from an INI file; anything missing
//! keeps its default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [indicator]
//! cadence = ticks
//! realtime_interval = 4.0
//! tick_interval = 30000
//! rare_interval = 250
//!
//! [simulation]
//! time_scale = 1.0
//! ```
//!
//! `cadence` is one of `rare`, `realtime` or `ticks`. Only one cadence is
//! active per world.
//!
//! [`EmptyIndicator`]: crate::components::emptyindicator::EmptyIndicator

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Ticks between two rare pulses.
pub const DEFAULT_RARE_INTERVAL: u64 = 250;
/// Real seconds between two checks for the real-time cadence.
pub const DEFAULT_REALTIME_INTERVAL: f32 = 4.0;
/// Ticks between two checks for the tick cadence.
pub const DEFAULT_TICK_INTERVAL: u64 = 30_000;
const DEFAULT_CADENCE: CadenceKind = CadenceKind::Ticks;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./emptybowl.ini";

/// Which cadence drives the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CadenceKind {
    /// Re-evaluate on every rare pulse, no extra gating, nothing persisted.
    Rare,
    /// Re-evaluate every few real seconds, checked on every step.
    Realtime,
    /// Re-evaluate every N simulation ticks, checked on rare pulses.
    Ticks,
}

impl CadenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CadenceKind::Rare => "rare",
            CadenceKind::Realtime => "realtime",
            CadenceKind::Ticks => "ticks",
        }
    }
}

impl fmt::Display for CadenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CadenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rare" => Ok(CadenceKind::Rare),
            "realtime" | "real_time" => Ok(CadenceKind::Realtime),
            "ticks" | "tick" => Ok(CadenceKind::Ticks),
            other => Err(format!(
                "Unknown cadence '{}', expected rare, realtime or ticks",
                other
            )),
        }
    }
}

/// A cadence with its interval resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cadence {
    Rare { pulse: u64 },
    RealTime { interval: f32 },
    Ticks { pulse: u64, interval: u64 },
}

impl Cadence {
    /// Whether the periodic callback should run on the step described by
    /// `ticks`. The real-time cadence runs on every step; the others only on
    /// rare pulses.
    pub fn is_callback_step(&self, ticks: u64) -> bool {
        match *self {
            Cadence::RealTime { .. } => true,
            Cadence::Rare { pulse } | Cadence::Ticks { pulse, .. } => {
                pulse != 0 && ticks % pulse == 0
            }
        }
    }

    pub fn kind(&self) -> CadenceKind {
        match self {
            Cadence::Rare { .. } => CadenceKind::Rare,
            Cadence::RealTime { .. } => CadenceKind::Realtime,
            Cadence::Ticks { .. } => CadenceKind::Ticks,
        }
    }
}

/// Indicator configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct IndicatorConfig {
    pub cadence: CadenceKind,
    /// Seconds between checks for [`CadenceKind::Realtime`].
    pub realtime_interval: f32,
    /// Ticks between checks for [`CadenceKind::Ticks`].
    pub tick_interval: u64,
    /// Ticks between two rare pulses.
    pub rare_interval: u64,
    /// Simulation speed multiplier applied to `WorldTime`.
    pub time_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            cadence: DEFAULT_CADENCE,
            realtime_interval: DEFAULT_REALTIME_INTERVAL,
            tick_interval: DEFAULT_TICK_INTERVAL,
            rare_interval: DEFAULT_RARE_INTERVAL,
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Default configuration running the given cadence.
    pub fn with_cadence(cadence: CadenceKind) -> Self {
        Self {
            cadence,
            ..Self::new()
        }
    }

    /// The active cadence with its intervals filled in.
    pub fn cadence(&self) -> Cadence {
        match self.cadence {
            CadenceKind::Rare => Cadence::Rare {
                pulse: self.rare_interval,
            },
            CadenceKind::Realtime => Cadence::RealTime {
                interval: self.realtime_interval,
            },
            CadenceKind::Ticks => Cadence::Ticks {
                pulse: self.rare_interval,
                interval: self.tick_interval,
            },
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or a value is malformed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config)
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, content: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config)
    }

    fn apply_ini(&mut self, config: &Ini) -> Result<(), String> {
        // [indicator] section
        if let Some(cadence) = config.get("indicator", "cadence") {
            self.cadence = cadence.parse()?;
        }
        if let Some(interval) = config.getfloat("indicator", "realtime_interval")? {
            if interval < 0.0 {
                return Err(format!("realtime_interval must be >= 0, got {}", interval));
            }
            self.realtime_interval = interval as f32;
        }
        if let Some(interval) = config.getuint("indicator", "tick_interval")? {
            self.tick_interval = interval;
        }
        if let Some(interval) = config.getuint("indicator", "rare_interval")? {
            if interval == 0 {
                return Err("rare_interval must be greater than 0".to_string());
            }
            self.rare_interval = interval;
        }

        // [simulation] section
        if let Some(scale) = config.getfloat("simulation", "time_scale")? {
            self.time_scale = scale as f32;
        }

        info!(
            "Loaded config: cadence={}, realtime_interval={}s, tick_interval={}, rare_interval={}, time_scale={}",
            self.cadence,
            self.realtime_interval,
            self.tick_interval,
            self.rare_interval,
            self.time_scale
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [indicator] section
        config.set("indicator", "cadence", Some(self.cadence.to_string()));
        config.set(
            "indicator",
            "realtime_interval",
            Some(self.realtime_interval.to_string()),
        );
        config.set(
            "indicator",
            "tick_interval",
            Some(self.tick_interval.to_string()),
        );
        config.set(
            "indicator",
            "rare_interval",
            Some(self.rare_interval.to_string()),
        );

        // [simulation] section
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_tick_cadence() {
        let config = IndicatorConfig::new();
        assert_eq!(
            config.cadence(),
            Cadence::Ticks {
                pulse: 250,
                interval: 30_000
            }
        );
    }

    #[test]
    fn parses_cadence_names() {
        assert_eq!("rare".parse::<CadenceKind>(), Ok(CadenceKind::Rare));
        assert_eq!("RealTime".parse::<CadenceKind>(), Ok(CadenceKind::Realtime));
        assert_eq!(" ticks ".parse::<CadenceKind>(), Ok(CadenceKind::Ticks));
        assert!("hourly".parse::<CadenceKind>().is_err());
    }

    #[test]
    fn loads_values_from_ini_text() {
        let mut config = IndicatorConfig::new();
        config
            .load_from_str(
                "[indicator]\ncadence = realtime\nrealtime_interval = 2.5\n\n[simulation]\ntime_scale = 3.0\n",
            )
            .unwrap();
        assert_eq!(config.cadence, CadenceKind::Realtime);
        assert_eq!(config.cadence(), Cadence::RealTime { interval: 2.5 });
        assert_eq!(config.time_scale, 3.0);
        // untouched keys keep defaults
        assert_eq!(config.tick_interval, DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn rejects_unknown_cadence() {
        let mut config = IndicatorConfig::new();
        let err = config
            .load_from_str("[indicator]\ncadence = weekly\n")
            .unwrap_err();
        assert!(err.contains("weekly"));
    }

    #[test]
    fn rejects_zero_rare_interval() {
        let mut config = IndicatorConfig::new();
        assert!(config.load_from_str("[indicator]\nrare_interval = 0\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = IndicatorConfig::with_path("/nonexistent/emptybowl.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.cadence, DEFAULT_CADENCE);
    }

    #[test]
    fn callback_steps_follow_granularity() {
        let rare = Cadence::Rare { pulse: 250 };
        assert!(rare.is_callback_step(250));
        assert!(!rare.is_callback_step(251));

        let realtime = Cadence::RealTime { interval: 4.0 };
        assert!(realtime.is_callback_step(1));
        assert!(realtime.is_callback_step(251));
    }
}
