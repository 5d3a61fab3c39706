//! Generation parameters and item candidates

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Opaque reference to a decorative item (tile, prop, asset key...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One weighted entry of the item table.
///
/// A candidate without an item still takes part in the weight sum; when it
/// is drawn the cell just stays empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCandidate {
    #[serde(default)]
    pub item: Option<ItemId>,
    pub weight: u32,
}

impl ItemCandidate {
    pub fn new(item: impl Into<String>, weight: u32) -> Self {
        Self {
            item: Some(ItemId::new(item)),
            weight,
        }
    }

    /// A candidate with no usable item reference.
    pub fn empty(weight: u32) -> Self {
        Self { item: None, weight }
    }
}

/// Parameters for one generation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Map width in tiles
    pub width: usize,
    /// Map height in tiles
    pub height: usize,
    /// Seed for the noise offset and item rolls
    pub seed: u64,
    /// Replace `seed` with a clock-derived one on every run
    pub use_random_seed: bool,
    /// Coordinate scale applied before sampling noise (lower = larger landmasses)
    pub lacunarity: f64,
    /// Density threshold; cells strictly above it are ground
    pub water_probability: f32,
    /// Upper bound on isolated-tile removal passes
    pub cleanup_iterations: u32,
    /// Weighted item table
    pub items: Vec<ItemCandidate>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            seed: 0,
            use_random_seed: false,
            lacunarity: 0.08,
            water_probability: 0.5,
            cleanup_iterations: 3,
            items: Vec::new(),
        }
    }
}

impl GenerationConfig {
    /// Check the parameters before any grid work happens.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.width == 0 || self.height == 0 {
            return Err(GenerationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(GenerationError::MapTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !self.lacunarity.is_finite() || self.lacunarity <= 0.0 {
            return Err(GenerationError::InvalidLacunarity(self.lacunarity));
        }
        if self.water_probability.is_nan() {
            return Err(GenerationError::InvalidWaterProbability(self.water_probability));
        }
        Ok(())
    }

    /// Water probability clamped into [0, 1].
    pub fn clamped_water_probability(&self) -> f32 {
        self.water_probability.clamp(0.0, 1.0)
    }

    /// Item candidates in ascending weight order.
    ///
    /// The sort is stable, so equal weights keep their configured order.
    pub fn sorted_items(&self) -> Vec<ItemCandidate> {
        let mut items = self.items.clone();
        items.sort_by_key(|c| c.weight);
        items
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Failure to load a configuration file
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Could not read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Could not parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GenerationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 100);
        assert_eq!(config.cleanup_iterations, 3);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let config = GenerationConfig { width: 0, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(GenerationError::InvalidDimensions { width: 0, height: 100 })
        );
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let config = GenerationConfig { width: usize::MAX, height: 2, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(GenerationError::MapTooLarge { width: usize::MAX, height: 2 })
        );
    }

    #[test]
    fn test_rejects_bad_lacunarity() {
        for lacunarity in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = GenerationConfig { lacunarity, ..Default::default() };
            assert!(matches!(config.validate(), Err(GenerationError::InvalidLacunarity(_))));
        }
    }

    #[test]
    fn test_water_probability_is_clamped_not_rejected() {
        let config = GenerationConfig { water_probability: 1.7, ..Default::default() };
        assert!(config.validate().is_ok());
        assert_eq!(config.clamped_water_probability(), 1.0);

        let config = GenerationConfig { water_probability: -0.2, ..Default::default() };
        assert_eq!(config.clamped_water_probability(), 0.0);

        let config = GenerationConfig { water_probability: f32::NAN, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sorted_items_is_stable() {
        let config = GenerationConfig {
            items: vec![
                ItemCandidate::new("rock", 5),
                ItemCandidate::new("tree", 1),
                ItemCandidate::new("bush", 5),
                ItemCandidate::empty(1),
            ],
            ..Default::default()
        };
        let names: Vec<_> = config
            .sorted_items()
            .iter()
            .map(|c| c.item.as_ref().map(|i| i.as_str().to_string()))
            .collect();
        assert_eq!(
            names,
            vec![
                Some("tree".to_string()),
                None,
                Some("rock".to_string()),
                Some("bush".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_partial_config() {
        let config = GenerationConfig::from_json_str(
            r#"{ "width": 32, "seed": 7, "items": [ { "item": "tree", "weight": 3 }, { "weight": 1 } ] }"#,
        )
        .unwrap();
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 100);
        assert_eq!(config.seed, 7);
        assert_eq!(config.items[0], ItemCandidate::new("tree", 3));
        assert_eq!(config.items[1], ItemCandidate::empty(1));
    }

    #[test]
    fn test_json_negative_weight_is_rejected() {
        let result = GenerationConfig::from_json_str(r#"{ "items": [ { "item": "tree", "weight": -1 } ] }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
