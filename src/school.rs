/*
 * School Module
 *
 * Fixed-capacity pool of fish for one species. The whole pool is allocated
 * and randomized up front; only the first `active` fish take part in the
 * simulation. Growing or shrinking the active count never reallocates, so
 * fish that drop out of the active prefix come back where they were left.
 */

use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::fish::Fish;

#[derive(Debug, Clone)]
pub struct School {
    pool: Box<[Fish]>,
    active: usize,
}

impl School {
    // Allocate `capacity` random fish, `active` of which are in play
    pub fn new<R: Rng + ?Sized>(capacity: usize, active: usize, half_extent: f32, rng: &mut R) -> Self {
        let pool: Vec<Fish> = (0..capacity).map(|_| Fish::random(half_extent, rng)).collect();
        Self {
            pool: pool.into_boxed_slice(),
            active: active.min(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    // Change the active count, clamped to capacity. Returns the count applied.
    pub fn set_active(&mut self, count: usize) -> usize {
        self.active = count.min(self.capacity());
        self.active
    }

    // Re-randomize the whole pool, active or not
    pub fn randomize<R: Rng + ?Sized>(&mut self, half_extent: f32, rng: &mut R) {
        for fish in self.pool.iter_mut() {
            *fish = Fish::random(half_extent, rng);
        }
    }

    // The active fish
    pub fn fish(&self) -> &[Fish] {
        &self.pool[..self.active]
    }

    pub fn fish_mut(&mut self) -> &mut [Fish] {
        &mut self.pool[..self.active]
    }

    pub fn get(&self, index: usize) -> Option<&Fish> {
        self.fish().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Fish> {
        self.fish_mut().get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fish> {
        self.fish().iter()
    }
}

// Indexing past the active count is a programming error
impl Index<usize> for School {
    type Output = Fish;

    fn index(&self, index: usize) -> &Fish {
        assert!(
            index < self.active,
            "fish index {index} out of range for {} active fish",
            self.active
        );
        &self.pool[index]
    }
}

impl IndexMut<usize> for School {
    fn index_mut(&mut self, index: usize) -> &mut Fish {
        assert!(
            index < self.active,
            "fish index {index} out of range for {} active fish",
            self.active
        );
        &mut self.pool[index]
    }
}

impl<'a> IntoIterator for &'a School {
    type Item = &'a Fish;
    type IntoIter = std::slice::Iter<'a, Fish>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
