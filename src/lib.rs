//! Tile map generation library
//!
//! Builds a ground/water tile map from normalized Perlin noise, erodes
//! isolated ground tiles, and scatters weighted decorative items on fully
//! enclosed ground. Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod classify;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod items;
pub mod noise_field;
pub mod seeds;
pub mod tilemap;

pub use config::{GenerationConfig, ItemCandidate, ItemId};
pub use error::GenerationError;
pub use generator::{generate_map, MapGenerator, TerrainMap};
