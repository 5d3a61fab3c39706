//! Density field generation
//!
//! Samples coherent Perlin noise over the map and rescales it so the lowest
//! cell is exactly 0.0 and the highest exactly 1.0.

use noise::{NoiseFn, Perlin};
use rand::Rng;
use tracing::debug;

use crate::tilemap::Tilemap;

/// The noise lookup is shifted by a random integer in `[-OFFSET_RANGE, OFFSET_RANGE)`.
pub const OFFSET_RANGE: i32 = 10_000;

/// Permutation seed of the Perlin table. Variety comes from the offset, not the table.
const NOISE_SEED: u32 = 0;

/// Generate a normalized density field.
///
/// Draws exactly one value (the lookup offset) from `rng`.
pub fn generate_density_field<R: Rng>(
    width: usize,
    height: usize,
    lacunarity: f64,
    rng: &mut R,
) -> Tilemap<f32> {
    let offset = rng.gen_range(-OFFSET_RANGE..OFFSET_RANGE) as f64;
    let perlin = Perlin::new(NOISE_SEED);
    debug!(offset, lacunarity, "sampling density noise");

    sample_density_field(&perlin, width, height, lacunarity, offset)
}

/// Sample `noise` at `(x * lacunarity + offset, y * lacunarity + offset)` for
/// every cell and normalize the result.
pub fn sample_density_field(
    noise: &impl NoiseFn<f64, 2>,
    width: usize,
    height: usize,
    lacunarity: f64,
    offset: f64,
) -> Tilemap<f32> {
    let mut field = Tilemap::new_with(width, height, 0.0f32);

    for x in 0..width {
        for y in 0..height {
            let nx = x as f64 * lacunarity + offset;
            let ny = y as f64 * lacunarity + offset;
            field.set(x, y, noise.get([nx, ny]) as f32);
        }
    }

    normalize_field(&mut field);
    field
}

/// Rescale values in place so the global min becomes 0.0 and the global max 1.0.
///
/// A constant field has no range to stretch; every cell becomes 0.0.
/// Returns the raw `(min, max)` before rescaling.
pub fn normalize_field(field: &mut Tilemap<f32>) -> (f32, f32) {
    let mut min_val = f32::MAX;
    let mut max_val = f32::MIN;
    for (_, _, &val) in field.iter() {
        if val < min_val {
            min_val = val;
        }
        if val > max_val {
            max_val = val;
        }
    }

    if max_val <= min_val {
        debug!(value = min_val, "density field is constant");
        field.fill(0.0);
        return (min_val, max_val);
    }

    let range = max_val - min_val;
    for (_, _, val) in field.iter_mut() {
        *val = ((*val - min_val) / range).clamp(0.0, 1.0);
    }

    debug!(raw_min = min_val, raw_max = max_val, "normalized density field");
    (min_val, max_val)
}
