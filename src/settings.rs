//! Game settings and physics tuning
//!
//! Persisted as JSON next to the level files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Ruleset presets
///
/// `Full` is the complete game (modifiable flags, goal, time scaling).
/// `Minimal` keeps the looser limits of the first prototype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Ruleset {
    #[default]
    Full,
    Minimal,
}

impl Ruleset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ruleset::Full => "Full",
            Ruleset::Minimal => "Minimal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "full" => Some(Ruleset::Full),
            "minimal" | "min" => Some(Ruleset::Minimal),
            _ => None,
        }
    }

    /// Physics limits for this preset
    pub fn tuning(&self) -> PhysicsTuning {
        match self {
            Ruleset::Full => PhysicsTuning::default(),
            Ruleset::Minimal => PhysicsTuning {
                max_speed: MAX_SPEED_MINIMAL,
                time_multiplier: TIME_MULTIPLIER_MINIMAL,
                max_particles: MAX_PARTICLES_MINIMAL,
                ..PhysicsTuning::default()
            },
        }
    }
}

/// Numeric knobs of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Per-axis speed clamp (pixels per ms)
    pub max_speed: f64,
    /// Per-axis acceleration clamp (pixels per ms²)
    pub max_acceleration: f64,
    pub particle_mass: f64,
    /// Floor for pair distances in the force sum
    pub min_distance: f64,
    /// Scale applied to the elapsed tick time before integrating
    pub time_multiplier: f64,
    pub particle_radius: f64,
    pub arena_width: i32,
    pub arena_height: i32,
    pub max_particles: usize,
    pub max_walls: usize,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            max_acceleration: MAX_ACCELERATION,
            particle_mass: PARTICLE_MASS,
            min_distance: MIN_DISTANCE,
            time_multiplier: TIME_MULTIPLIER,
            particle_radius: PARTICLE_RADIUS,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            max_particles: MAX_PARTICLES,
            max_walls: MAX_WALLS,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ruleset: Ruleset,
    pub tuning: PhysicsTuning,
    /// Level discovery stops after this many files
    pub max_levels: u32,
    /// Target tick period in milliseconds
    pub tick_budget_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_ruleset(Ruleset::Full)
    }
}

impl Settings {
    /// Create settings from a ruleset (applies the preset tuning)
    pub fn from_ruleset(ruleset: Ruleset) -> Self {
        Self {
            ruleset,
            tuning: ruleset.tuning(),
            max_levels: MAX_LEVELS,
            tick_budget_ms: TICK_BUDGET_MS,
        }
    }

    /// Switch ruleset, replacing the tuning with the preset values
    pub fn apply_ruleset(&mut self, ruleset: Ruleset) {
        self.ruleset = ruleset;
        self.tuning = ruleset.tuning();
    }

    /// File name used next to the level files
    pub const FILE_NAME: &'static str = "settings.json";

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ruleset_from_str() {
        assert_eq!(Ruleset::from_str("FULL"), Some(Ruleset::Full));
        assert_eq!(Ruleset::from_str("min"), Some(Ruleset::Minimal));
        assert_eq!(Ruleset::from_str("medium"), None);
    }

    #[test]
    fn test_minimal_preset_limits() {
        let tuning = Ruleset::Minimal.tuning();
        assert_eq!(tuning.max_speed, 1.0);
        assert_eq!(tuning.time_multiplier, 1.0);
        assert_eq!(tuning.max_particles, 100);
        assert_eq!(tuning.max_acceleration, MAX_ACCELERATION);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "max_levels": 7 }"#).unwrap();
        assert_eq!(settings.max_levels, 7);
        assert_eq!(settings.ruleset, Ruleset::Full);
        assert_eq!(settings.tuning, PhysicsTuning::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("charge-game-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(Settings::FILE_NAME);

        let mut settings = Settings::default();
        settings.apply_ruleset(Ruleset::Minimal);
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.ruleset, Ruleset::Minimal);
        assert_eq!(loaded.tuning, settings.tuning);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("charge-game-no-such-dir/settings.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(&path).ruleset, Ruleset::Full);
    }
}
