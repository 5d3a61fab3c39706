//! Seed management for map generation
//!
//! A run is fully described by one `u64` seed. When a random seed is
//! requested it is derived from the wall clock, and the resolved value is
//! reported back so the map can be reproduced later.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GenerationConfig;

static CLOCK_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The seed a run will actually use.
pub fn resolve_seed(config: &GenerationConfig) -> u64 {
    if config.use_random_seed {
        clock_seed()
    } else {
        config.seed
    }
}

/// Derive a fresh seed from the current time.
///
/// A process-wide counter is mixed in so two calls within the same clock tick
/// still differ.
pub fn clock_seed() -> u64 {
    let now = chrono::Utc::now();
    let nanos = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp());
    let tick = CLOCK_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut hasher = DefaultHasher::new();
    nanos.hash(&mut hasher);
    tick.hash(&mut hasher);
    hasher.finish()
}

/// Random source for a run. Noise offset and item rolls share this stream.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_fixed_seed_passes_through() {
        let config = GenerationConfig { seed: 12345, ..Default::default() };
        assert_eq!(resolve_seed(&config), 12345);
    }

    #[test]
    fn test_clock_seeds_differ() {
        let config = GenerationConfig { seed: 12345, use_random_seed: true, ..Default::default() };
        let a = resolve_seed(&config);
        let b = resolve_seed(&config);
        assert_ne!(a, b);
    }

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = seeded_rng(99);
        let mut b = seeded_rng(99);
        let xs: Vec<u32> = (0..8).map(|_| a.gen()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen()).collect();
        assert_eq!(xs, ys);
    }
}
