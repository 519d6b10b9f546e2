//! Seed handling
//!
//! A seed string is reduced to a `u64` with 64-bit FNV-1a over its UTF-8 bytes and
//! fed to `ChaCha8Rng::seed_from_u64`. Both steps are fixed so that the same seed
//! string yields the same terrain on every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a hash of the seed's UTF-8 bytes.
#[must_use]
pub fn hash_seed(seed: &str) -> u64 {
    seed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Deterministic RNG for a seed string.
#[must_use]
pub fn rng_from_seed(seed: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_seed(seed))
}

/// Uniform draw in `[0, 100)`.
#[inline]
pub fn roll_percent(rng: &mut ChaCha8Rng) -> u32 {
    rng.gen_range(0..100u32)
}

/// Clock-derived seed: nanoseconds since the Unix epoch, as a decimal string.
#[must_use]
pub fn time_seed() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    nanos.to_string()
}
