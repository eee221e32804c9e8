//! Bounded, insertion-ordered particle and wall stores
//!
//! The particle store keeps moving particles as its trailing block at all
//! times: static particles are inserted in front of that block, and removal
//! shifts later entries down without reordering them. Loops over "moving
//! particles" are therefore plain slices.

use super::depth::depth_sort;
use super::state::{Particle, ParticleId, Wall, WallId};

#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    items: Vec<Particle>,
    moving_count: usize,
    capacity: usize,
}

impl ParticleStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            moving_count: 0,
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn moving_count(&self) -> usize {
        self.moving_count
    }

    /// Index where the moving block starts
    #[inline]
    pub fn moving_start(&self) -> usize {
        self.items.len() - self.moving_count
    }

    /// Add a particle, keeping the moving block last.
    /// Returns the particle back if the store is full.
    pub fn insert(&mut self, particle: Particle) -> Result<(), Particle> {
        if self.is_full() {
            return Err(particle);
        }
        if particle.moving {
            self.items.push(particle);
            self.moving_count += 1;
        } else {
            let at = self.moving_start();
            self.items.insert(at, particle);
        }
        Ok(())
    }

    /// Remove a particle, shifting later ones down
    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        let index = self.index_of(id)?;
        let removed = self.items.remove(index);
        if removed.moving {
            self.moving_count -= 1;
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.moving_count = 0;
    }

    pub fn index_of(&self, id: ParticleId) -> Option<usize> {
        self.items.iter().position(|p| p.id == id)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.items.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.items.iter_mut().find(|p| p.id == id)
    }

    /// All particles in store order
    #[inline]
    pub fn as_slice(&self) -> &[Particle] {
        &self.items
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.items.iter()
    }

    pub fn statics(&self) -> &[Particle] {
        &self.items[..self.moving_start()]
    }

    pub fn moving(&self) -> &[Particle] {
        &self.items[self.moving_start()..]
    }

    pub fn moving_mut(&mut self) -> &mut [Particle] {
        let start = self.moving_start();
        &mut self.items[start..]
    }

    /// Sort into draw order (see [`depth_sort`])
    pub fn reorder(&mut self) {
        self.moving_count = depth_sort(&mut self.items);
    }
}

#[derive(Debug, Clone, Default)]
pub struct WallStore {
    items: Vec<Wall>,
    capacity: usize,
}

impl WallStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn insert(&mut self, wall: Wall) -> Result<(), Wall> {
        if self.is_full() {
            return Err(wall);
        }
        self.items.push(wall);
        Ok(())
    }

    pub fn remove(&mut self, id: WallId) -> Option<Wall> {
        let index = self.items.iter().position(|w| w.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: WallId) -> Option<&Wall> {
        self.items.iter().find(|w| w.id == id)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Wall] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Wall> {
        self.items.iter()
    }
}
