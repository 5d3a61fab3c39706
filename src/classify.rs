//! Ground / water classification

use crate::tilemap::Tilemap;

/// A cell is ground when its density is strictly above the water probability.
#[inline]
pub fn is_ground(density: f32, water_probability: f32) -> bool {
    density > water_probability
}

/// Threshold the density field into a ground mask (`true` = ground).
pub fn classify(density: &Tilemap<f32>, water_probability: f32) -> Tilemap<bool> {
    let mut mask = Tilemap::new_with(density.width, density.height, false);
    for (x, y, &value) in density.iter() {
        mask.set(x, y, is_ground(value, water_probability));
    }
    mask
}

/// Number of ground cells in a mask.
pub fn ground_count(mask: &Tilemap<bool>) -> usize {
    mask.iter().filter(|(_, _, &g)| g).count()
}
