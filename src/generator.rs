//! Map generation pipeline
//!
//! `generate_map` runs the full pipeline as a pure function of its config:
//! density noise, then classification, then isolated-tile cleanup, then item
//! placement. `MapGenerator` wraps it for callers that want a "current map"
//! they can query and clear.

use tracing::info;

use crate::classify::{classify, ground_count};
use crate::cleanup::{remove_isolated_tiles, CleanupReport};
use crate::config::{GenerationConfig, ItemId};
use crate::error::GenerationError;
use crate::items::place_items;
use crate::noise_field::generate_density_field;
use crate::seeds::{resolve_seed, seeded_rng};
use crate::tilemap::Tilemap;

/// Summary of a generation run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Ground cells straight after thresholding
    pub initial_ground: usize,
    /// Ground cells after cleanup
    pub final_ground: usize,
    /// Cleanup passes and removals
    pub cleanup: CleanupReport,
    /// Cells holding an item
    pub items_placed: usize,
}

/// The result of one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMap {
    /// Seed that produced this map; feed it back with `use_random_seed = false` to reproduce it
    pub seed: u64,
    /// Normalized density in [0, 1]
    pub density: Tilemap<f32>,
    /// Final ground mask (`true` = ground) after cleanup
    pub ground: Tilemap<bool>,
    /// Item chosen for each cell, if any
    pub items: Tilemap<Option<ItemId>>,
    pub stats: GenerationStats,
}

impl TerrainMap {
    pub fn width(&self) -> usize {
        self.ground.width
    }

    pub fn height(&self) -> usize {
        self.ground.height
    }

    pub fn is_in_map_range(&self, x: i32, y: i32) -> bool {
        self.ground.in_range(x, y)
    }

    /// Ground test for any coordinate; off-map counts as water.
    pub fn is_ground(&self, x: i32, y: i32) -> bool {
        self.ground.get_checked(x, y).copied().unwrap_or(false)
    }

    pub fn item_at(&self, x: i32, y: i32) -> Option<&ItemId> {
        self.items.get_checked(x, y).and_then(|item| item.as_ref())
    }

    pub fn ground_count(&self) -> usize {
        ground_count(&self.ground)
    }

    pub fn item_count(&self) -> usize {
        self.items.iter().filter(|(_, _, item)| item.is_some()).count()
    }
}

/// Generate a map from `config`.
///
/// Deterministic for a fixed seed when `use_random_seed` is off. The config
/// is validated before anything is allocated.
pub fn generate_map(config: &GenerationConfig) -> Result<TerrainMap, GenerationError> {
    config.validate()?;

    let candidates = config.sorted_items();
    let water_probability = config.clamped_water_probability();
    let seed = resolve_seed(config);
    let mut rng = seeded_rng(seed);

    info!(
        seed,
        width = config.width,
        height = config.height,
        water_probability,
        "generating map"
    );

    let density = generate_density_field(config.width, config.height, config.lacunarity, &mut rng);

    let mut ground = classify(&density, water_probability);
    let initial_ground = ground_count(&ground);

    let cleanup = remove_isolated_tiles(&mut ground, config.cleanup_iterations);
    let final_ground = initial_ground - cleanup.removed;

    let items = place_items(&ground, &candidates, &mut rng);
    let items_placed = items.iter().filter(|(_, _, item)| item.is_some()).count();

    let stats = GenerationStats {
        initial_ground,
        final_ground,
        cleanup,
        items_placed,
    };
    info!(?stats, "map generated");

    Ok(TerrainMap {
        seed,
        density,
        ground,
        items,
        stats,
    })
}

/// Holds a configuration and the most recently generated map.
#[derive(Clone, Debug, Default)]
pub struct MapGenerator {
    pub config: GenerationConfig,
    current: Option<TerrainMap>,
}

impl MapGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    /// Generate a new map from the current config and publish it.
    ///
    /// On error the previously published map is kept.
    pub fn generate(&mut self) -> Result<&TerrainMap, GenerationError> {
        let map = generate_map(&self.config)?;
        Ok(self.current.insert(map))
    }

    /// Drop the published map. Calling it again is a no-op.
    pub fn clean(&mut self) {
        if self.current.take().is_some() {
            info!("map cleared");
        }
    }

    /// The published map, if any.
    pub fn map(&self) -> Option<&TerrainMap> {
        self.current.as_ref()
    }

    /// Take ownership of the published map, leaving nothing published.
    pub fn take_map(&mut self) -> Option<TerrainMap> {
        self.current.take()
    }

    /// Seed of the published map.
    pub fn last_seed(&self) -> Option<u64> {
        self.current.as_ref().map(|m| m.seed)
    }

    /// Bounds check against the published map, or the configured size when
    /// nothing is published.
    pub fn is_in_map_range(&self, x: i32, y: i32) -> bool {
        match &self.current {
            Some(map) => map.is_in_map_range(x, y),
            None => {
                x >= 0
                    && (x as usize) < self.config.width
                    && y >= 0
                    && (y as usize) < self.config.height
            }
        }
    }

    /// Ground test on the published map.
    ///
    /// Querying before `generate` (or after `clean`) is an error, as is a
    /// coordinate off the map.
    pub fn is_ground(&self, x: i32, y: i32) -> Result<bool, GenerationError> {
        let map = self.current.as_ref().ok_or(GenerationError::NotGenerated)?;
        map.ground
            .get_checked(x, y)
            .copied()
            .ok_or(GenerationError::OutOfRange { x, y })
    }
}
