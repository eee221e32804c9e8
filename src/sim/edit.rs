//! Creation, deletion and hit-testing on the game state
//!
//! These are the operations the input layer and the level loader call.
//! Creation never fails loudly: a full store logs a warning and returns
//! `None`.

use glam::DVec2;

use super::charge::{Charge, CursorMode};
use super::collision::Obstacles;
use super::rect::Rect;
use super::state::{DrawKind, Drag, Drawing, GameState, Particle, ParticleId, Wall, WallId};

/// What the cursor should look like at its current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorFeedback {
    /// Over empty field: show the placement tool
    Tool(CursorMode),
    /// Over a modifiable particle
    OpenHand,
    /// Dragging a particle
    ClosedHand,
    /// Over a particle the player may not touch
    Denied,
}

impl GameState {
    /// The goal stops moving particles only while a level is being edited
    pub fn goal_blocks_moving(&self) -> bool {
        self.is_creative() && self.is_paused()
    }

    /// Collision setup for the current mode and phase
    pub fn obstacles(&self) -> Obstacles<'_> {
        Obstacles::new(self.walls.as_slice(), self.goal, self.goal_blocks_moving(), &self.tuning)
    }

    /// Push every particle out of walls and the goal
    fn resolve_all_collisions(&mut self) {
        let obstacles = Obstacles::new(
            self.walls.as_slice(),
            self.goal,
            self.goal_blocks_moving(),
            &self.tuning,
        );
        for p in self.particles.as_mut_slice() {
            obstacles.resolve(p);
        }
    }

    /// Add a particle at (x, y), nudged out of any obstacle it lands on
    pub fn create_particle(
        &mut self,
        moving: bool,
        modifiable: bool,
        charge: Charge,
        x: i32,
        y: i32,
    ) -> Option<ParticleId> {
        if self.particles.is_full() {
            log::warn!("Particle limit reached ({})", self.particles.capacity());
            return None;
        }

        let id = ParticleId(self.next_entity_id());
        let mut particle = Particle::new(id, moving, modifiable, charge, DVec2::new(x as f64, y as f64));
        self.obstacles().resolve(&mut particle);
        // The collision nudge is where it spawns
        particle.initial_pos = particle.pos;

        match self.particles.insert(particle) {
            Ok(()) => Some(id),
            Err(_) => None,
        }
    }

    /// Add a wall and push particles out of it
    pub fn create_wall(&mut self, x: i32, y: i32, w: i32, h: i32) -> Option<WallId> {
        if self.walls.is_full() {
            log::warn!("Wall limit reached ({})", self.walls.capacity());
            return None;
        }

        let id = WallId(self.next_entity_id());
        let wall = Wall { id, rect: Rect::new(x, y, w, h) };
        if self.walls.insert(wall).is_err() {
            return None;
        }
        self.resolve_all_collisions();
        Some(id)
    }

    /// Replace the goal and push particles out of it where it blocks them
    pub fn create_goal(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.goal = Some(Rect::new(x, y, w, h));
        self.resolve_all_collisions();
    }

    /// Delete a modifiable particle; clears any handle that pointed at it
    pub fn destroy_particle(&mut self, id: ParticleId) -> bool {
        match self.particles.get(id) {
            Some(p) if p.modifiable => {}
            _ => return false,
        }

        let Some(removed) = self.particles.remove(id) else {
            return false;
        };
        if removed.moving && removed.on_goal {
            self.particles_on_goal = self.particles_on_goal.saturating_sub(1);
        }
        if self.drag.is_some_and(|d| d.id == id) {
            self.drag = None;
        }
        if self.pointed == Some(id) {
            self.pointed = None;
        }
        true
    }

    pub fn destroy_wall(&mut self, id: WallId) -> bool {
        self.walls.remove(id).is_some()
    }

    pub fn destroy_goal(&mut self) {
        self.goal = None;
    }

    /// Sort particles into draw order; call before rendering or saving
    pub fn reorder_for_render(&mut self) {
        self.particles.reorder();
    }

    /// Top-most particle whose hitbox covers (x, y).
    ///
    /// Searches from the end of the store, so after [`Self::reorder_for_render`]
    /// the particle drawn on top wins.
    pub fn particle_at(&self, x: i32, y: i32) -> Option<ParticleId> {
        let point = DVec2::new(x as f64, y as f64);
        self.particles
            .iter()
            .rev()
            .find(|p| {
                let center = DVec2::new(p.pos.x.trunc(), p.pos.y.trunc());
                center.distance(point) < self.tuning.particle_radius
            })
            .map(|p| p.id)
    }

    /// First wall containing (x, y)
    pub fn wall_at(&self, x: i32, y: i32) -> Option<WallId> {
        let point = DVec2::new(x as f64, y as f64);
        self.walls.iter().find(|w| w.rect.contains(point)).map(|w| w.id)
    }

    fn goal_contains(&self, x: i32, y: i32) -> bool {
        self.goal
            .is_some_and(|g| g.contains(DVec2::new(x as f64, y as f64)))
    }

    /// Inside the play area (not on the footer)
    pub fn in_play_area(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.tuning.arena_width && y >= 0 && y < self.tuning.arena_height
    }

    /// Left click on the play field with the current tool.
    ///
    /// Particles are never placed on the goal, on a wall, on another
    /// particle or off the field. Clicking a particle is a drag, not a
    /// placement.
    pub fn apply_cursor(&mut self, x: i32, y: i32) {
        if !self.is_paused() || !self.in_play_area(x, y) {
            return;
        }

        let blocked = self.goal_contains(x, y)
            || self.wall_at(x, y).is_some()
            || self.particle_at(x, y).is_some();
        match self.cursor {
            CursorMode::DrawGoal if self.is_creative() => self.draw_click(DrawKind::Goal, x, y),
            CursorMode::DrawWall if self.is_creative() => self.draw_click(DrawKind::Wall, x, y),
            CursorMode::PlaceMovingParticle if self.is_creative() => {
                if !blocked {
                    self.create_particle(true, true, Charge::PLUS_ONE, x, y);
                }
            }
            CursorMode::PlaceCharge(charge) => {
                if !blocked {
                    self.create_particle(false, true, charge, x, y);
                }
            }
            _ => {}
        }
    }

    /// First click anchors the rectangle, second click commits it
    fn draw_click(&mut self, kind: DrawKind, x: i32, y: i32) {
        match self.drawing {
            Some(drawing) if drawing.kind == kind => {
                self.drawing = Some(Drawing { end: (x, y), ..drawing });
                self.finish_drawing();
            }
            _ => {
                self.drawing = Some(Drawing {
                    kind,
                    start: (x, y),
                    end: (x, y),
                });
            }
        }
    }

    /// Move the free corner of the rubber band; it never reaches the footer
    pub fn update_drawing(&mut self, x: i32, y: i32) {
        let height = self.tuning.arena_height;
        if let Some(drawing) = self.drawing.as_mut() {
            drawing.end = (x, y.min(height));
        }
    }

    /// Commit the rubber band as a wall or goal
    pub fn finish_drawing(&mut self) {
        let Some(drawing) = self.drawing.take() else {
            return;
        };
        let r = drawing.rect();
        match drawing.kind {
            DrawKind::Wall => {
                self.create_wall(r.x, r.y, r.w, r.h);
            }
            DrawKind::Goal => self.create_goal(r.x, r.y, r.w, r.h),
        }
    }

    /// Pick up the particle under the cursor
    pub fn begin_drag(&mut self, x: i32, y: i32) -> bool {
        if !self.is_paused() {
            return false;
        }
        let Some(id) = self.particle_at(x, y) else {
            return false;
        };
        let Some(p) = self.particles.get(id) else {
            return false;
        };
        let offset = DVec2::new(p.pos.x.trunc() - x as f64, p.pos.y.trunc() - y as f64);
        self.drag = Some(Drag { id, offset });
        true
    }

    /// Move the dragged particle with the cursor.
    ///
    /// Only modifiable particles follow. The spawn point moves too, so a
    /// restart keeps the new placement.
    pub fn drag_to(&mut self, x: i32, y: i32) {
        let Some(drag) = self.drag else {
            return;
        };
        let obstacles = Obstacles::new(
            self.walls.as_slice(),
            self.goal,
            self.goal_blocks_moving(),
            &self.tuning,
        );
        let Some(p) = self.particles.get_mut(drag.id) else {
            self.drag = None;
            return;
        };
        if !p.modifiable {
            return;
        }
        p.pos = DVec2::new(x as f64, y as f64) + drag.offset;
        obstacles.resolve(p);
        p.initial_pos = p.pos;
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Right click: delete what is under the cursor (walls and goal only in
    /// creative mode)
    pub fn remove_at(&mut self, x: i32, y: i32) {
        if !self.is_paused() {
            return;
        }
        if let Some(id) = self.particle_at(x, y) {
            self.destroy_particle(id);
        }
        if self.is_creative() {
            if let Some(id) = self.wall_at(x, y) {
                self.destroy_wall(id);
            }
            if self.goal_contains(x, y) {
                self.destroy_goal();
            }
        }
    }

    /// Mouse wheel: recharge the particle under the cursor, or cycle the tool
    pub fn scroll_at(&mut self, x: i32, y: i32, up: bool) {
        if !self.is_paused() {
            return;
        }
        match self.particle_at(x, y) {
            Some(id) => {
                self.change_particle_charge(id, up);
            }
            None => {
                self.cursor = self.cursor.scrolled(up, self.is_creative());
            }
        }
    }

    /// Step a static, modifiable particle's charge; skips zero
    pub fn change_particle_charge(&mut self, id: ParticleId, up: bool) -> bool {
        match self.particles.get_mut(id) {
            Some(p) if p.modifiable && !p.moving => {
                p.charge = if up { p.charge.increment() } else { p.charge.decrement() };
                true
            }
            _ => false,
        }
    }

    /// Track the particle under the cursor
    pub fn point_at(&mut self, x: i32, y: i32) {
        self.pointed = self.particle_at(x, y);
    }

    pub fn cursor_feedback(&self) -> CursorFeedback {
        let pointed = self.pointed.and_then(|id| self.particles.get(id));
        match pointed {
            None => CursorFeedback::Tool(self.cursor),
            Some(p) if !p.modifiable => CursorFeedback::Denied,
            Some(_) if self.drag.is_some() => CursorFeedback::ClosedHand,
            Some(_) => CursorFeedback::OpenHand,
        }
    }
}
