//! Deterministic seeding and random geometric sampling.
//!
//! Every random stream in the engine is a `ChaCha8Rng`, so identical seeds
//! give identical planets and placements on every platform.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glam::{DVec2, DVec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Derive a u64 seed for a catalog slot from the world seed.
///
/// Uses SipHash (via std's `DefaultHasher`) so neighbouring slots get
/// unrelated streams.
pub fn derive_slot_seed(world_seed: u64, slot: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    slot.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for one catalog slot.
pub fn slot_rng(world_seed: u64, slot: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_slot_seed(world_seed, slot))
}

/// Uniform point inside the unit ball.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    loop {
        let p = DVec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        // Too close to the origin to normalise reliably.
        if len_sq > 1e-12 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform point inside the unit disc.
pub fn random_in_unit_circle<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    loop {
        let p = DVec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}
