//! Level session: which level is loaded, its scores, and the play flow
//!
//! A session owns the game state for one level directory. Winning a level
//! records the score and, when it makes the top three, writes it back into
//! the level file.

use std::path::{Path, PathBuf};

use crate::error::LevelError;
use crate::highscores::LevelScores;
use crate::persistence::{self, LevelFile};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameMode, GameState};

pub struct Session {
    pub state: GameState,
    pub settings: Settings,
    dir: PathBuf,
    /// Current level number; 0 when nothing is loaded
    level: u32,
    scores: LevelScores,
}

impl Session {
    pub fn new(dir: impl Into<PathBuf>, settings: Settings, mode: GameMode) -> Self {
        Self {
            state: GameState::new(settings.tuning, mode),
            settings,
            dir: dir.into(),
            level: 0,
            scores: LevelScores::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn scores(&self) -> &LevelScores {
        &self.scores
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    /// Switch between playing and authoring; unloads the current level
    pub fn set_mode(&mut self, mode: GameMode) {
        self.unload();
        self.state.mode = mode;
    }

    /// Number of consecutive level files in the directory
    pub fn scan_levels(&self) -> u32 {
        persistence::scan_levels(&self.dir, self.settings.max_levels)
    }

    /// Load level `n`. On error the current level stays loaded.
    pub fn load_level(&mut self, n: u32) -> Result<(), LevelError> {
        let path = persistence::level_path(&self.dir, n);
        let file = LevelFile::read(&path)?;
        file.apply_to(&mut self.state)?;

        self.level = n;
        self.scores = file.scores;
        log::info!("Level {} loaded from {}", n, path.display());
        Ok(())
    }

    /// Start authoring a fresh level after the last existing one.
    /// Returns its number, or None when the level limit is reached.
    pub fn new_level(&mut self) -> Option<u32> {
        let count = self.scan_levels();
        if count >= self.settings.max_levels {
            log::warn!("Cannot create a level beyond {}", self.settings.max_levels);
            return None;
        }

        self.set_mode(GameMode::Creative);
        self.level = count + 1;
        log::info!("Creating level {}", self.level);
        Some(self.level)
    }

    pub fn play_restart(&mut self) {
        self.state.play_restart();
    }

    /// Advance the simulation and handle the events it raised
    pub fn tick(&mut self, dt: f64) -> Vec<GameEvent> {
        sim::tick(&mut self.state, dt);
        let events = self.state.drain_events();

        for event in &events {
            if let GameEvent::LevelWon { score } = *event {
                self.level_won(score);
            }
        }
        events
    }

    fn level_won(&mut self, score: u32) {
        let Some(rank) = self.scores.record(score) else {
            return;
        };
        log::info!("New high score {} (rank {}) on level {}", score, rank + 1, self.level);
        if let Err(e) = self.save() {
            log::warn!("Failed to save high score: {}", e);
        }
    }

    /// Write the current level back to its file
    pub fn save(&mut self) -> Result<(), LevelError> {
        if self.level == 0 {
            return Err(LevelError::NoLevelLoaded);
        }
        let path = persistence::level_path(&self.dir, self.level);
        LevelFile::from_state(&mut self.state, self.scores).write(&path)?;
        log::info!("Level {} saved", self.level);
        Ok(())
    }

    /// Drop the level and its scores
    pub fn unload(&mut self) {
        self.state.clear();
        self.level = 0;
        self.scores.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Charge, GamePhase};

    const LEVEL: &str = "\
-1 -1 -1
300 200 100 100
1 1 0
330 250
100 100 1
";

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("charge-game-session-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn session(dir: &Path, mode: GameMode) -> Session {
        Session::new(dir, Settings::default(), mode)
    }

    #[test]
    fn test_load_level() {
        let dir = temp_dir("load");
        std::fs::write(persistence::level_path(&dir, 1), LEVEL).unwrap();

        let mut s = session(&dir, GameMode::Play);
        assert_eq!(s.scan_levels(), 1);
        s.load_level(1).unwrap();
        assert_eq!(s.level(), 1);
        assert_eq!(s.state.particles.len(), 2);
        assert_eq!(s.state.particles.moving_count(), 1);
        assert!(s.scores().is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_load_keeps_current_level() {
        let dir = temp_dir("atomic");
        std::fs::write(persistence::level_path(&dir, 1), LEVEL).unwrap();
        std::fs::write(persistence::level_path(&dir, 2), "-1 -1 -1\n0 0 0 0\n0 1 0\n5 5 9\n").unwrap();

        let mut s = session(&dir, GameMode::Play);
        s.load_level(1).unwrap();

        assert!(matches!(s.load_level(2), Err(LevelError::InvalidCharge(9))));
        assert!(matches!(s.load_level(3), Err(LevelError::Io { .. })));
        assert_eq!(s.level(), 1);
        assert_eq!(s.state.particles.len(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_win_records_score_and_resaves() {
        let dir = temp_dir("win");
        std::fs::write(persistence::level_path(&dir, 1), LEVEL).unwrap();

        let mut s = session(&dir, GameMode::Play);
        s.load_level(1).unwrap();
        // One player-added particle, well clear of the goal
        s.state.create_particle(false, true, Charge::new(-1).unwrap(), 600, 30);

        s.play_restart();
        let events = s.tick(16.0);
        assert!(events.contains(&GameEvent::LevelWon { score: 1 }));
        assert_eq!(s.state.phase, GamePhase::Won);
        assert_eq!(s.scores().best(), Some(1));

        // The saved file has the score but not the player's particle
        let saved = LevelFile::read(&persistence::level_path(&dir, 1)).unwrap();
        assert_eq!(saved.scores.0, [Some(1), None, None]);
        assert_eq!(saved.statics.len(), 1);
        assert_eq!(saved.moving, vec![(330, 250)]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_new_level_is_creative_and_saves_next_number() {
        let dir = temp_dir("new");
        std::fs::write(persistence::level_path(&dir, 1), LEVEL).unwrap();

        let mut s = session(&dir, GameMode::Play);
        assert_eq!(s.new_level(), Some(2));
        assert_eq!(s.mode(), GameMode::Creative);

        s.state.create_goal(500, 300, 60, 60);
        s.state.create_particle(true, true, Charge::PLUS_ONE, 50, 50);
        s.save().unwrap();
        assert_eq!(s.scan_levels(), 2);

        let mut reload = session(&dir, GameMode::Play);
        reload.load_level(2).unwrap();
        assert_eq!(reload.state.goal, Some(crate::sim::Rect::new(500, 300, 60, 60)));
        assert_eq!(reload.state.particles.moving_count(), 1);
        assert!(reload.scores().is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_new_level_refused_at_cap() {
        let dir = temp_dir("cap");
        std::fs::write(persistence::level_path(&dir, 1), LEVEL).unwrap();

        let mut settings = Settings::default();
        settings.max_levels = 1;
        let mut s = Session::new(&dir, settings, GameMode::Play);
        assert_eq!(s.new_level(), None);
        assert_eq!(s.mode(), GameMode::Play);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_without_level_fails() {
        let dir = temp_dir("save-none");
        let mut s = session(&dir, GameMode::Creative);
        s.state.create_particle(true, true, Charge::PLUS_ONE, 50, 50);

        assert!(matches!(s.save(), Err(LevelError::NoLevelLoaded)));
        assert!(!persistence::level_path(&dir, 0).exists());
        assert_eq!(s.scan_levels(), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unload() {
        let dir = temp_dir("unload");
        std::fs::write(persistence::level_path(&dir, 1), LEVEL).unwrap();

        let mut s = session(&dir, GameMode::Play);
        s.load_level(1).unwrap();
        s.unload();
        assert_eq!(s.level(), 0);
        assert!(s.state.particles.is_empty());
        assert_eq!(s.state.goal, None);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
