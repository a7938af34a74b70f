//! Seeded random streams and rarity-tiered selection
//!
//! Every area owns its own generation stream, and every look reseeds a fresh
//! stream from `(area seed, cell)`. Nothing here touches a global generator,
//! so sessions visiting different areas never perturb each other.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::core::types::Cell;

/// Deterministic generation stream for an area
pub fn area_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Stream for flavor text at one cell; identical for every look at that cell
pub fn look_rng(seed: u64, cell: Cell) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_mul(10_000).wrapping_add(cell as u64))
}

/// Bernoulli roll; `chance` is clamped to `[0, 1]`
pub fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.gen_bool(chance.clamp(0.0, 1.0))
}

/// Uniform pick from a slice
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

/// Attempts at redrawing a tier that fell past the end of the table
const TIER_REDRAWS: usize = 8;

/// Choose a tier index in `0..tier_count` from a folded normal distribution
///
/// The bell is centred on tier 0 with a standard deviation of a third of the
/// table, so earlier tiers dominate and the last tier is reached roughly
/// 0.3% of the time.
pub fn pick_tier<R: Rng + ?Sized>(tier_count: usize, rng: &mut R) -> Option<usize> {
    if tier_count == 0 {
        return None;
    }
    if tier_count == 1 {
        return Some(0);
    }

    let sigma = tier_count as f64 / 3.0;
    let normal = Normal::new(0.0, sigma).ok()?;

    for _ in 0..TIER_REDRAWS {
        let tier = normal.sample(rng).abs().floor() as usize;
        if tier < tier_count {
            return Some(tier);
        }
    }
    Some(tier_count - 1)
}

/// Weighted random selection over rarity-ordered tiers
///
/// A tier is chosen by [`pick_tier`], then an entry uniformly within it.
/// Returns `None` when the chosen tier (or the whole table) is empty.
pub fn weighted_pick<'a, T, R: Rng + ?Sized>(tiers: &'a [Vec<T>], rng: &mut R) -> Option<&'a T> {
    let tier = pick_tier(tiers.len(), rng)?;
    tiers[tier].choose(rng)
}
