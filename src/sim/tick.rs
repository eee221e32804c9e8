//! Simulation tick
//!
//! Advances every moving particle that has not reached the goal: accelerate,
//! integrate, collide, then check the goal.

use super::collision::{Obstacles, inside_goal};
use super::forces::{compute_acceleration, integrate};
use super::state::{GameEvent, GamePhase, GameState};

impl GameState {
    /// Start the simulation from a paused level, or stop it and put the
    /// moving particles back where they started.
    pub fn play_restart(&mut self) {
        match self.phase {
            GamePhase::Paused => {
                self.drag = None;
                self.drawing = None;
                self.phase = GamePhase::Playing;
                log::debug!("Playing with {} moving particles", self.particles.moving_count());
            }
            GamePhase::Playing | GamePhase::Won => {
                self.reset_moving_particles();
                self.phase = GamePhase::Paused;
            }
        }
    }
}

/// Advance the game state by `dt` milliseconds of wall-clock time
pub fn tick(state: &mut GameState, dt: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    let obstacles = Obstacles::new(
        state.walls.as_slice(),
        state.goal,
        state.goal_blocks_moving(),
        &state.tuning,
    );
    let radius = state.tuning.particle_radius;

    for i in state.particles.moving_start()..state.particles.len() {
        if state.particles.as_slice()[i].on_goal {
            continue;
        }

        let accel = compute_acceleration(i, state.particles.as_slice(), &state.tuning);
        let particle = &mut state.particles.as_mut_slice()[i];
        integrate(particle, accel, dt, &state.tuning);
        obstacles.resolve(particle);

        let Some(goal) = state.goal else {
            continue;
        };
        if inside_goal(particle, goal, radius) {
            particle.on_goal = true;
            let id = particle.id;
            state.particles_on_goal += 1;
            state.events.push(GameEvent::ParticleOnGoal { id });
            log::debug!("Particle {:?} reached the goal", id);

            // Authoring mode can test a level but never win it
            if !state.is_creative() && state.particles_on_goal == state.particles.moving_count() {
                state.phase = GamePhase::Won;
                let score = state.score();
                state.events.push(GameEvent::LevelWon { score });
                log::info!("Level finished with score {}", score);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PhysicsTuning;
    use crate::sim::charge::Charge;
    use crate::sim::state::GameMode;
    use glam::DVec2;
    use proptest::prelude::*;

    const DT: f64 = 16.0;

    fn playing(mode: GameMode) -> GameState {
        let mut state = GameState::new(PhysicsTuning::default(), mode);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_paused_does_not_move() {
        let mut state = GameState::new(PhysicsTuning::default(), GameMode::Play);
        let id = state.create_particle(true, false, Charge::PLUS_ONE, 100, 100).unwrap();
        state.create_particle(false, false, Charge::PLUS_ONE, 110, 100);
        tick(&mut state, DT);
        assert_eq!(state.particles.get(id).unwrap().pos, DVec2::new(100.0, 100.0));
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_repelled_particle_moves_away() {
        let mut state = playing(GameMode::Play);
        let id = state.create_particle(true, false, Charge::PLUS_ONE, 100, 100).unwrap();
        state.create_particle(false, false, Charge::PLUS_ONE, 110, 100);
        for _ in 0..5 {
            tick(&mut state, DT);
        }
        let p = state.particles.get(id).unwrap();
        assert!(p.pos.x < 100.0);
        assert!(p.vel.x < 0.0);
        assert!((p.pos.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_static_particles_never_move() {
        let mut state = playing(GameMode::Play);
        state.create_particle(true, false, Charge::PLUS_ONE, 100, 100);
        let id = state.create_particle(false, false, Charge::new(3).unwrap(), 130, 100).unwrap();
        for _ in 0..20 {
            tick(&mut state, DT);
        }
        assert_eq!(state.particles.get(id).unwrap().pos, DVec2::new(130.0, 100.0));
    }

    #[test]
    fn test_particle_stops_at_wall() {
        let mut state = playing(GameMode::Play);
        state.create_wall(200, 0, 20, 480);
        let id = state.create_particle(true, false, Charge::PLUS_ONE, 150, 240).unwrap();
        // Push right from behind
        state.create_particle(false, false, Charge::new(3).unwrap(), 140, 240);
        for _ in 0..500 {
            tick(&mut state, DT);
        }
        let p = state.particles.get(id).unwrap();
        assert!(p.pos.x <= 190.0);
        assert!(p.pos.x >= 189.0);
    }

    #[test]
    fn test_goal_reached_once_then_win_once() {
        let mut state = playing(GameMode::Play);
        state.create_goal(300, 200, 100, 100);
        let a = state.create_particle(true, false, Charge::PLUS_ONE, 330, 250).unwrap();
        state.level_particle_count = 1;

        tick(&mut state, DT);
        assert!(state.particles.get(a).unwrap().on_goal);
        assert_eq!(state.phase, GamePhase::Won);
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::ParticleOnGoal { id: a },
                GameEvent::LevelWon { score: 0 }
            ]
        );

        // Frozen and no repeat events
        state.phase = GamePhase::Playing;
        let pos = state.particles.get(a).unwrap().pos;
        tick(&mut state, DT);
        assert_eq!(state.particles.get(a).unwrap().pos, pos);
        assert!(state.drain_events().is_empty());
        assert_eq!(state.particles_on_goal, 1);
    }

    #[test]
    fn test_win_waits_for_every_moving_particle() {
        let mut state = playing(GameMode::Play);
        state.create_goal(300, 200, 100, 100);
        state.create_particle(true, false, Charge::PLUS_ONE, 330, 250);
        state.create_particle(true, false, Charge::PLUS_ONE, 50, 50);
        tick(&mut state, DT);
        assert_eq!(state.particles_on_goal, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.drain_events().iter().any(|e| matches!(e, GameEvent::LevelWon { .. })));
    }

    #[test]
    fn test_creative_never_wins() {
        let mut state = playing(GameMode::Creative);
        state.create_goal(300, 200, 100, 100);
        // Placed while playing, so the goal does not push it out
        state.create_particle(true, true, Charge::PLUS_ONE, 330, 250);
        tick(&mut state, DT);
        assert_eq!(state.particles_on_goal, 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_play_restart_cycle() {
        let mut state = GameState::new(PhysicsTuning::default(), GameMode::Play);
        let id = state.create_particle(true, false, Charge::PLUS_ONE, 100, 100).unwrap();
        state.create_particle(false, false, Charge::PLUS_ONE, 110, 100);

        state.play_restart();
        assert_eq!(state.phase, GamePhase::Playing);
        for _ in 0..10 {
            tick(&mut state, DT);
        }
        assert_ne!(state.particles.get(id).unwrap().pos, DVec2::new(100.0, 100.0));

        state.play_restart();
        assert_eq!(state.phase, GamePhase::Paused);
        let p = state.particles.get(id).unwrap();
        assert_eq!(p.pos, DVec2::new(100.0, 100.0));
        assert_eq!(p.vel, DVec2::ZERO);
        assert_eq!(state.particles_on_goal, 0);
    }

    #[test]
    fn test_restart_after_win_clears_goal_flags() {
        let mut state = playing(GameMode::Play);
        state.create_goal(300, 200, 100, 100);
        let a = state.create_particle(true, false, Charge::PLUS_ONE, 330, 250).unwrap();
        tick(&mut state, DT);
        assert_eq!(state.phase, GamePhase::Won);

        state.play_restart();
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(!state.particles.get(a).unwrap().on_goal);
        assert_eq!(state.particles_on_goal, 0);
    }

    #[test]
    fn test_zero_dt_tick_is_finite() {
        let mut state = playing(GameMode::Play);
        let id = state.create_particle(true, false, Charge::PLUS_ONE, 100, 100).unwrap();
        state.create_particle(false, false, Charge::PLUS_ONE, 100, 100);
        tick(&mut state, 0.0);
        let p = state.particles.get(id).unwrap();
        assert!(p.pos.is_finite());
        assert!(p.vel.is_finite());
    }

    fn charge() -> impl Strategy<Value = Charge> {
        prop_oneof![-3..=-1, 1..=3].prop_map(|c| Charge::new(c).unwrap())
    }

    proptest! {
        #[test]
        fn speed_clamped_after_every_tick(
            statics in prop::collection::vec((charge(), 0i32..640, 0i32..480), 0..10),
            movers in prop::collection::vec((0i32..640, 0i32..480), 1..5),
            dts in prop::collection::vec(0.0f64..60.0, 1..20),
        ) {
            let mut state = playing(GameMode::Play);
            for (c, x, y) in statics {
                state.create_particle(false, false, c, x, y);
            }
            for (x, y) in movers {
                state.create_particle(true, false, Charge::PLUS_ONE, x, y);
            }
            let max_speed = state.tuning.max_speed;
            for dt in dts {
                tick(&mut state, dt);
                for p in state.particles.moving() {
                    prop_assert!(p.vel.x.abs() <= max_speed);
                    prop_assert!(p.vel.y.abs() <= max_speed);
                    prop_assert!(p.pos.is_finite());
                }
            }
        }
    }
}
