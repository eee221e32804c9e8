//! Charge Game - steer charged particles into a goal
//!
//! Core modules:
//! - `sim`: Particle physics, collisions, depth sort and editing (no IO)
//! - `persistence`: Level file format and level discovery
//! - `session`: Level flow (play/restart, win, high scores, resave)
//! - `platform`: Frame pacing
//! - `settings`: Ruleset presets and physics tuning

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{LevelError, SettingsError};
pub use highscores::LevelScores;
pub use session::Session;
pub use settings::{PhysicsTuning, Ruleset, Settings};

/// Game configuration constants (full ruleset defaults)
pub mod consts {
    /// Target tick period in milliseconds (~60 Hz)
    pub const TICK_BUDGET_MS: u64 = 16;

    /// Play area (background) dimensions; the footer below is not playable
    pub const ARENA_WIDTH: i32 = 640;
    pub const ARENA_HEIGHT: i32 = 480;

    /// All particles share one hitbox radius
    pub const PARTICLE_RADIUS: f64 = 10.0;

    /// Store capacities
    pub const MAX_PARTICLES: usize = 500;
    pub const MAX_PARTICLES_MINIMAL: usize = 100;
    pub const MAX_WALLS: usize = 100;

    /// Charge range (zero excluded)
    pub const MAX_CHARGE: i8 = 3;
    pub const MIN_CHARGE: i8 = -3;

    /// Speed clamp per axis (pixels per ms)
    pub const MAX_SPEED: f64 = 0.5;
    pub const MAX_SPEED_MINIMAL: f64 = 1.0;
    /// Acceleration clamp per axis (pixels per ms²)
    pub const MAX_ACCELERATION: f64 = 0.005;
    pub const PARTICLE_MASS: f64 = 10.0;
    /// Pair distances are floored to this before computing forces
    pub const MIN_DISTANCE: f64 = 5.0;
    /// Global time scale applied to the elapsed tick time
    pub const TIME_MULTIPLIER: f64 = 0.7;
    pub const TIME_MULTIPLIER_MINIMAL: f64 = 1.0;

    /// Level discovery stops here
    pub const MAX_LEVELS: u32 = 42;
}

/// Clamp a value to `[-limit, limit]`
#[inline]
pub fn clamp_abs(value: f64, limit: f64) -> f64 {
    if value < -limit {
        -limit
    } else if value > limit {
        limit
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_abs() {
        assert_eq!(clamp_abs(0.7, 0.5), 0.5);
        assert_eq!(clamp_abs(-0.7, 0.5), -0.5);
        assert_eq!(clamp_abs(0.2, 0.5), 0.2);
    }
}
