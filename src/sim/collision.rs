//! Collision resolution against walls, the goal and the play area
//!
//! Every obstacle is an axis-aligned rectangle. A particle that overlaps an
//! obstacle on the side it is heading toward is snapped to sit exactly one
//! radius outside that edge, and its velocity along that axis is zeroed.
//! Each axis direction is tested independently, in the order
//! +x, -x, +y, -y.

use glam::DVec2;

use super::rect::{Margins, Rect};
use super::state::{Particle, Wall};
use crate::settings::PhysicsTuning;

/// Everything a particle can bump into
#[derive(Debug, Clone, Copy)]
pub struct Obstacles<'a> {
    pub walls: &'a [Wall],
    pub goal: Option<Rect>,
    /// The goal blocks moving particles too (paused in creative mode)
    pub goal_blocks_moving: bool,
    /// Play area; particles are kept inside it
    pub arena: Rect,
    pub radius: f64,
}

impl<'a> Obstacles<'a> {
    pub fn new(
        walls: &'a [Wall],
        goal: Option<Rect>,
        goal_blocks_moving: bool,
        tuning: &PhysicsTuning,
    ) -> Self {
        Self {
            walls,
            goal,
            goal_blocks_moving,
            arena: Rect::new(0, 0, tuning.arena_width, tuning.arena_height),
            radius: tuning.particle_radius,
        }
    }

    /// Push `particle` out of every obstacle it overlaps
    pub fn resolve(&self, particle: &mut Particle) {
        for wall in self.walls {
            resolve_rect(particle, wall.rect, self.radius);
        }

        if let Some(goal) = self.goal {
            if !particle.moving || self.goal_blocks_moving {
                resolve_rect(particle, goal, self.radius);
            }
        }

        resolve_bounds(particle, self.arena, self.radius);
    }
}

/// Keep a particle out of a solid rectangle
pub fn resolve_rect(particle: &mut Particle, rect: Rect, radius: f64) {
    let r = radius as i32;

    if particle.vel.x >= 0.0 && rect.contains_with(particle.pos, Margins::left(r)) {
        particle.vel.x = 0.0;
        particle.pos.x = rect.x as f64 - radius;
    }

    if particle.vel.x <= 0.0 && rect.contains_with(particle.pos, Margins::right(r)) {
        particle.vel.x = 0.0;
        particle.pos.x = rect.right() as f64 + radius;
    }

    if particle.vel.y >= 0.0 && rect.contains_with(particle.pos, Margins::top(r)) {
        particle.vel.y = 0.0;
        particle.pos.y = rect.y as f64 - radius;
    }

    if particle.vel.y <= 0.0 && rect.contains_with(particle.pos, Margins::bottom(r)) {
        particle.vel.y = 0.0;
        particle.pos.y = rect.bottom() as f64 + radius;
    }
}

/// Keep a particle inside the play area
pub fn resolve_bounds(particle: &mut Particle, arena: Rect, radius: f64) {
    let min = DVec2::new(arena.x as f64 + radius, arena.y as f64 + radius);
    let max = DVec2::new(arena.right() as f64 - radius, arena.bottom() as f64 - radius);

    if particle.vel.x >= 0.0 && particle.pos.x >= max.x {
        particle.vel.x = 0.0;
        particle.pos.x = max.x;
    }

    if particle.vel.x <= 0.0 && particle.pos.x <= min.x {
        particle.vel.x = 0.0;
        particle.pos.x = min.x;
    }

    if particle.vel.y >= 0.0 && particle.pos.y >= max.y {
        particle.vel.y = 0.0;
        particle.pos.y = max.y;
    }

    if particle.vel.y <= 0.0 && particle.pos.y <= min.y {
        particle.vel.y = 0.0;
        particle.pos.y = min.y;
    }
}

/// True when the particle sits fully inside the goal (shrunk by the radius)
pub fn inside_goal(particle: &Particle, goal: Rect, radius: f64) -> bool {
    goal.contains_with(particle.pos, Margins::uniform(-(radius as i32)))
}
