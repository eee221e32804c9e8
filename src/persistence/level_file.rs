//! Plain-text level files
//!
//! ```text
//! <score1> <score2> <score3>
//! <goalX> <goalY> <goalW> <goalH>
//! <numMoving> <numStatic> <numWalls>
//! <x> <y>              (numMoving times)
//! <x> <y> <charge>     (numStatic times)
//! <x> <y> <w> <h>      (numWalls times)
//! ```
//!
//! Every field is a whitespace-separated integer. A goal with zero width or
//! height means the level has no goal.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::LevelError;
use crate::highscores::LevelScores;
use crate::settings::PhysicsTuning;
use crate::sim::{Charge, GameState, Rect};

/// Parsed contents of a level file, independent of any game state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelFile {
    pub scores: LevelScores,
    pub goal: Option<Rect>,
    /// Spawn points of the moving particles (charge is always +1)
    pub moving: Vec<(i32, i32)>,
    pub statics: Vec<(i32, i32, Charge)>,
    pub walls: Vec<Rect>,
}

/// Whitespace token reader that names the field it failed on
struct Fields<'a> {
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(text: &'a str) -> Self {
        Self { tokens: text.split_whitespace() }
    }

    fn next(&mut self, field: &'static str) -> Result<i32, LevelError> {
        let token = self.tokens.next().ok_or(LevelError::Parse { field, token: None })?;
        token.parse().map_err(|_| LevelError::Parse {
            field,
            token: Some(token.to_string()),
        })
    }

    /// Positions fit in 16-bit screen coordinates
    fn coord(&mut self, field: &'static str) -> Result<i32, LevelError> {
        let value = self.next(field)?;
        if i16::try_from(value).is_err() {
            return Err(LevelError::OutOfRange { field, value });
        }
        Ok(value)
    }

    /// Sizes are unsigned 16-bit
    fn extent(&mut self, field: &'static str) -> Result<i32, LevelError> {
        let value = self.next(field)?;
        if u16::try_from(value).is_err() {
            return Err(LevelError::OutOfRange { field, value });
        }
        Ok(value)
    }

    fn count(&mut self, field: &'static str) -> Result<usize, LevelError> {
        let value = self.next(field)?;
        usize::try_from(value).map_err(|_| LevelError::NegativeCount { field, value })
    }
}

impl LevelFile {
    /// Parse a whole level file; nothing is returned unless every field is valid
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut fields = Fields::new(text);

        let scores = LevelScores::from_file_values([
            fields.next("score")?,
            fields.next("score")?,
            fields.next("score")?,
        ]);

        let goal = Rect::new(
            fields.coord("goal x")?,
            fields.coord("goal y")?,
            fields.extent("goal width")?,
            fields.extent("goal height")?,
        );
        let goal = (goal.w != 0 && goal.h != 0).then_some(goal);

        let moving_count = fields.count("moving particle count")?;
        let static_count = fields.count("static particle count")?;
        let wall_count = fields.count("wall count")?;

        // Counts come from the file; don't trust them for allocation
        let mut moving = Vec::new();
        for _ in 0..moving_count {
            moving.push((fields.coord("moving particle x")?, fields.coord("moving particle y")?));
        }

        let mut statics = Vec::new();
        for _ in 0..static_count {
            let x = fields.coord("static particle x")?;
            let y = fields.coord("static particle y")?;
            let value = fields.next("static particle charge")?;
            let charge = Charge::new(value).ok_or(LevelError::InvalidCharge(value))?;
            statics.push((x, y, charge));
        }

        let mut walls = Vec::new();
        for _ in 0..wall_count {
            walls.push(Rect::new(
                fields.coord("wall x")?,
                fields.coord("wall y")?,
                fields.extent("wall width")?,
                fields.extent("wall height")?,
            ));
        }

        Ok(Self {
            scores,
            goal,
            moving,
            statics,
            walls,
        })
    }

    /// Render in the on-disk format
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let [s1, s2, s3] = self.scores.to_file_values();
        let goal = self.goal.unwrap_or_default();

        // Writing into a String cannot fail
        let _ = writeln!(out, "{} {} {}", s1, s2, s3);
        let _ = writeln!(out, "{} {} {} {}", goal.x, goal.y, goal.w, goal.h);
        let _ = writeln!(out, "{} {} {}", self.moving.len(), self.statics.len(), self.walls.len());
        for (x, y) in &self.moving {
            let _ = writeln!(out, "{} {}", x, y);
        }
        for (x, y, charge) in &self.statics {
            let _ = writeln!(out, "{} {} {}", x, y, charge.get());
        }
        for wall in &self.walls {
            let _ = writeln!(out, "{} {} {} {}", wall.x, wall.y, wall.w, wall.h);
        }
        out
    }

    /// Read and parse a level file
    pub fn read(path: &Path) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn write(&self, path: &Path) -> Result<(), LevelError> {
        std::fs::write(path, self.to_text()).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Refuse levels that would not fit in the stores
    pub fn check_capacity(&self, tuning: &PhysicsTuning) -> Result<(), LevelError> {
        let particles = self.moving.len() + self.statics.len();
        if particles > tuning.max_particles {
            return Err(LevelError::TooManyEntities {
                field: "particles",
                count: particles,
                capacity: tuning.max_particles,
            });
        }
        if self.walls.len() > tuning.max_walls {
            return Err(LevelError::TooManyEntities {
                field: "walls",
                count: self.walls.len(),
                capacity: tuning.max_walls,
            });
        }
        Ok(())
    }

    /// Snapshot a state for saving.
    ///
    /// The store is depth-sorted first. Authoring saves keep every particle
    /// and reset the scores; play saves keep `scores` and drop the static
    /// particles the player added.
    pub fn from_state(state: &mut GameState, scores: LevelScores) -> Self {
        state.reorder_for_render();
        let creative = state.is_creative();

        let moving = state
            .particles
            .moving()
            .iter()
            .map(|p| (p.initial_pos.x as i32, p.initial_pos.y as i32))
            .collect();

        let statics = state
            .particles
            .statics()
            .iter()
            .filter(|p| creative || !p.modifiable)
            .map(|p| (p.pos.x as i32, p.pos.y as i32, p.charge))
            .collect();

        Self {
            scores: if creative { LevelScores::new() } else { scores },
            goal: state.goal,
            moving,
            statics,
            walls: state.walls.iter().map(|w| w.rect).collect(),
        }
    }

    /// Replace the contents of `state` with this level.
    ///
    /// Validation happens before anything is cleared, so an error leaves
    /// `state` untouched. Particles are created modifiable in authoring mode.
    pub fn apply_to(&self, state: &mut GameState) -> Result<(), LevelError> {
        self.check_capacity(&state.tuning)?;

        state.clear();
        let modifiable = state.is_creative();

        if let Some(goal) = self.goal {
            state.create_goal(goal.x, goal.y, goal.w, goal.h);
        }
        for &(x, y) in &self.moving {
            state.create_particle(true, modifiable, Charge::PLUS_ONE, x, y);
        }
        for &(x, y, charge) in &self.statics {
            state.create_particle(false, modifiable, charge, x, y);
        }
        for wall in &self.walls {
            state.create_wall(wall.x, wall.y, wall.w, wall.h);
        }

        state.level_particle_count = state.particles.len();
        Ok(())
    }
}
