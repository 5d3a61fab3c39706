//! Weighted item placement
//!
//! Items only go on ground cells whose full 8-neighbourhood is ground, so
//! nothing is ever placed on a coast or on the map border. Each qualifying
//! cell rolls once against the cumulative weights of the candidate table.

use rand::Rng;
use tracing::debug;

use crate::config::{ItemCandidate, ItemId};
use crate::tilemap::Tilemap;

/// Sum of all candidate weights.
pub fn weight_total(candidates: &[ItemCandidate]) -> u64 {
    candidates.iter().map(|c| c.weight as u64).sum()
}

/// Resolve a roll `v` (in `1..=weight_total`) against the table.
///
/// Walks the table accumulating weight and stops at the first candidate
/// whose running sum is strictly greater than `v` and that has an item.
/// Candidates without an item are stepped over, so their share falls
/// through to the next candidate that has one. A roll equal to the total
/// weight never satisfies the comparison and places nothing.
pub fn pick_candidate(candidates: &[ItemCandidate], v: u64) -> Option<&ItemId> {
    let mut weight_sum = 0u64;
    for candidate in candidates {
        weight_sum += candidate.weight as u64;
        if v >= weight_sum {
            continue; // miss
        }
        match &candidate.item {
            Some(item) => return Some(item),
            None => continue,
        }
    }
    None
}

/// Whether an item may be placed at `(x, y)`.
pub fn is_enclosed_ground(mask: &Tilemap<bool>, x: usize, y: usize) -> bool {
    *mask.get(x, y) && mask.count_neighbors_8(x, y, |&g| g) == 8
}

/// Build the item grid for a final ground mask.
///
/// `candidates` must already be in ascending weight order. With an empty or
/// zero-weight table no rolls are drawn from `rng`.
pub fn place_items<R: Rng>(
    mask: &Tilemap<bool>,
    candidates: &[ItemCandidate],
    rng: &mut R,
) -> Tilemap<Option<ItemId>> {
    let mut items: Tilemap<Option<ItemId>> = Tilemap::new(mask.width, mask.height);

    let total = weight_total(candidates);
    if total == 0 {
        debug!(candidates = candidates.len(), "item table has no weight, skipping placement");
        return items;
    }

    let mut rolls = 0usize;
    let mut placed = 0usize;
    for x in 0..mask.width {
        for y in 0..mask.height {
            if !is_enclosed_ground(mask, x, y) {
                continue;
            }
            let v = rng.gen_range(1..=total);
            rolls += 1;
            if let Some(item) = pick_candidate(candidates, v) {
                items.set(x, y, Some(item.clone()));
                placed += 1;
            }
        }
    }

    debug!(rolls, placed, weight_total = total, "placed items");
    items
}
