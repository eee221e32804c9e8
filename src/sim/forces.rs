//! Pairwise charge forces and integration
//!
//! The force model is inverse-square with a floored distance and per-axis
//! clamps on acceleration and speed. It is tuned for game feel, not accuracy.

use glam::DVec2;

use super::state::Particle;
use crate::clamp_abs;
use crate::settings::PhysicsTuning;

/// Signed inverse-square coefficient `-(q1·q2) / d²` with `d` floored to
/// `min_distance`. Negative means `target` is pushed away from `other`.
#[inline]
pub fn pair_coefficient(target: &Particle, other: &Particle, min_distance: f64) -> f64 {
    let d = target.pos.distance(other.pos).max(min_distance);
    coefficient_at(target, other, d)
}

/// Coefficient for an already floored distance
#[inline]
fn coefficient_at(target: &Particle, other: &Particle, d: f64) -> f64 {
    -((target.charge.get() * other.charge.get()) as f64) / (d * d)
}

/// Force on `target` from `other`, before mass scaling and clamping.
///
/// The floored distance also divides the direction, so coincident particles
/// get a zero vector instead of NaN.
#[inline]
pub fn pair_force(target: &Particle, other: &Particle, min_distance: f64) -> DVec2 {
    let delta = other.pos - target.pos;
    let d = delta.length().max(min_distance);
    (delta / d) * coefficient_at(target, other, d)
}

/// Acceleration of `particles[index]` from every other particle.
///
/// The target is skipped by index, not by distance. Each axis is clamped to
/// `±max_acceleration` independently.
pub fn compute_acceleration(index: usize, particles: &[Particle], tuning: &PhysicsTuning) -> DVec2 {
    let target = &particles[index];
    let mut sum = DVec2::ZERO;
    for (i, other) in particles.iter().enumerate() {
        if i == index {
            continue;
        }
        sum += pair_force(target, other, tuning.min_distance);
    }

    let raw = sum * tuning.particle_mass;
    DVec2::new(
        clamp_abs(raw.x, tuning.max_acceleration),
        clamp_abs(raw.y, tuning.max_acceleration),
    )
}

/// Advance a particle by `dt` milliseconds under constant acceleration.
///
/// The new velocity is the displacement divided by the scaled step rather than
/// `v + a·t`, then clamped per axis. A zero step leaves the velocity alone.
pub fn integrate(particle: &mut Particle, accel: DVec2, dt: f64, tuning: &PhysicsTuning) {
    let t = dt * tuning.time_multiplier;
    let start = particle.pos;
    let end = start + particle.vel * t + 0.5 * accel * t * t;

    if t != 0.0 {
        let vel = (end - start) / t;
        particle.vel = DVec2::new(
            clamp_abs(vel.x, tuning.max_speed),
            clamp_abs(vel.y, tuning.max_speed),
        );
    }

    particle.pos = end;
}
