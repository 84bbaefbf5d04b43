//! Seed mixing and uniform draws on top of the ChaCha stream.
//! Every random choice in generation and simulation goes through here so a
//! seed fully determines a run.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn pick_index(rng: &mut ChaCha8Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

pub fn choose<'a, T>(rng: &mut ChaCha8Rng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(pick_index(rng, items.len()))
}

/// Uniform value in `[min, max]`; the bounds are swapped if given in reverse.
pub fn range_inclusive(rng: &mut ChaCha8Rng, min: u32, max: u32) -> u32 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let span = u64::from(high - low) + 1;
    low + (rng.next_u64() % span) as u32
}

/// Uniform value in `[0, 1)`.
pub fn unit_f32(rng: &mut ChaCha8Rng) -> f32 {
    (rng.next_u64() >> 40) as f32 / (1_u64 << 24) as f32
}

pub fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}
