//! Depth sort for blit order
//!
//! Draw order is static particles top-to-bottom, then moving particles
//! top-to-bottom. Lower particles (larger y) come later and are drawn on top,
//! and moving particles always cover static ones. Saving relies on the same
//! order: the moving particles must be the trailing block.

use super::state::Particle;

/// Reorder `particles` in place into draw order.
///
/// Two bubble passes: first move every moving particle into the trailing
/// block, then sort each block by ascending y. Both passes only swap
/// neighbours that are strictly out of order, so equal keys keep their
/// relative order.
///
/// Returns the number of moving particles (the length of the trailing block).
pub fn depth_sort(particles: &mut [Particle]) -> usize {
    let moving = partition_moving_last(particles);
    let split = particles.len() - moving;
    bubble_sort_by_y(&mut particles[..split]);
    bubble_sort_by_y(&mut particles[split..]);
    moving
}

/// Bubble static particles forward until no moving particle precedes a static one
fn partition_moving_last(particles: &mut [Particle]) -> usize {
    let mut sorted = false;
    let mut end = particles.len();
    while !sorted {
        sorted = true;
        for i in 1..end {
            if particles[i - 1].moving && !particles[i].moving {
                particles.swap(i - 1, i);
                sorted = false;
            }
        }
        end = end.saturating_sub(1);
    }
    particles.iter().filter(|p| p.moving).count()
}

fn bubble_sort_by_y(block: &mut [Particle]) {
    let mut sorted = false;
    let mut end = block.len();
    while !sorted {
        sorted = true;
        for i in 1..end {
            if block[i].pos.y < block[i - 1].pos.y {
                block.swap(i - 1, i);
                sorted = false;
            }
        }
        end = end.saturating_sub(1);
    }
}
