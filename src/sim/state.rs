//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; there is no
//! global state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::charge::{Charge, CursorMode};
use super::rect::Rect;
use super::store::{ParticleStore, WallStore};
use crate::settings::PhysicsTuning;

/// Stable handle to a particle; survives reordering and compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

/// Stable handle to a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallId(pub u32);

/// A charged particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: ParticleId,
    /// Subject to force integration while playing
    pub moving: bool,
    /// The player may drag, delete or recharge it
    pub modifiable: bool,
    pub pos: DVec2,
    /// Where the particle returns on restart
    pub initial_pos: DVec2,
    pub charge: Charge,
    pub vel: DVec2,
    /// Sticky once the particle has reached the goal
    pub on_goal: bool,
}

impl Particle {
    pub fn new(id: ParticleId, moving: bool, modifiable: bool, charge: Charge, pos: DVec2) -> Self {
        Self {
            id,
            moving,
            modifiable,
            pos,
            initial_pos: pos,
            charge,
            vel: DVec2::ZERO,
            on_goal: false,
        }
    }

    /// Back to the spawn point, at rest and off the goal
    pub fn reset(&mut self) {
        self.pos = self.initial_pos;
        self.vel = DVec2::ZERO;
        self.on_goal = false;
    }
}

/// A static rectangular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub rect: Rect,
}

/// Whether the player is playing a level or authoring one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Play,
    /// Level authoring: everything is editable, the level cannot be won
    Creative,
}

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Editing allowed, no integration
    #[default]
    Paused,
    /// Moving particles integrate each tick
    Playing,
    /// Every moving particle reached the goal
    Won,
}

/// Things that happened during a tick, for the session and UI layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ParticleOnGoal { id: ParticleId },
    /// Raised once when the last moving particle reaches the goal
    LevelWon { score: u32 },
}

/// Rubber-band rectangle being drawn with the wall or goal tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawing {
    pub kind: DrawKind,
    pub start: (i32, i32),
    pub end: (i32, i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Wall,
    Goal,
}

impl Drawing {
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }
}

/// Particle being dragged, with the offset from the cursor to its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub id: ParticleId,
    pub offset: DVec2,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: PhysicsTuning,
    pub mode: GameMode,
    pub phase: GamePhase,
    pub particles: ParticleStore,
    pub walls: WallStore,
    pub goal: Option<Rect>,
    /// Particles that came with the level (the rest were added by the player)
    pub level_particle_count: usize,
    /// Moving particles currently on the goal
    pub particles_on_goal: usize,
    pub cursor: CursorMode,
    /// Weak handle to the dragged particle
    pub drag: Option<Drag>,
    /// Weak handle to the particle under the cursor
    pub pointed: Option<ParticleId>,
    pub drawing: Option<Drawing>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Empty level with the given tuning
    pub fn new(tuning: PhysicsTuning, mode: GameMode) -> Self {
        Self {
            tuning,
            mode,
            phase: GamePhase::Paused,
            particles: ParticleStore::with_capacity(tuning.max_particles),
            walls: WallStore::with_capacity(tuning.max_walls),
            goal: None,
            level_particle_count: 0,
            particles_on_goal: 0,
            cursor: CursorMode::default(),
            drag: None,
            pointed: None,
            drawing: None,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_creative(&self) -> bool {
        self.mode == GameMode::Creative
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// The play area as a rectangle at the origin
    pub fn arena(&self) -> Rect {
        Rect::new(0, 0, self.tuning.arena_width, self.tuning.arena_height)
    }

    /// Player-added particles; lower is better
    pub fn score(&self) -> u32 {
        self.particles.len().saturating_sub(self.level_particle_count) as u32
    }

    /// Take the events raised so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Put moving particles back on their spawn points
    pub fn reset_moving_particles(&mut self) {
        for p in self.particles.moving_mut() {
            p.reset();
        }
        self.particles_on_goal = 0;
    }

    /// Remove every particle, wall and the goal
    pub fn clear(&mut self) {
        self.particles.clear();
        self.walls.clear();
        self.goal = None;
        self.level_particle_count = 0;
        self.particles_on_goal = 0;
        self.drag = None;
        self.pointed = None;
        self.drawing = None;
        self.phase = GamePhase::Paused;
        self.events.clear();
    }
}
