//! Errors reported by map generation and map queries.

/// Everything that can go wrong when generating or querying a map.
///
/// Configuration problems are caught before any grid is allocated, so an
/// error never comes with a partial map.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationError {
    /// Width or height was zero
    InvalidDimensions { width: usize, height: usize },
    /// Width times height does not fit in memory indexing
    MapTooLarge { width: usize, height: usize },
    /// Lacunarity must be finite and positive
    InvalidLacunarity(f64),
    /// Water probability was NaN
    InvalidWaterProbability(f32),
    /// A query was made before any map was generated (or after it was cleaned)
    NotGenerated,
    /// A query fell outside the map
    OutOfRange { x: i32, y: i32 },
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::InvalidDimensions { width, height } => {
                write!(f, "Invalid map size {}x{}: both sides must be at least 1", width, height)
            }
            GenerationError::MapTooLarge { width, height } => {
                write!(f, "Map size {}x{} is too large", width, height)
            }
            GenerationError::InvalidLacunarity(l) => {
                write!(f, "Invalid lacunarity {}: must be a finite positive number", l)
            }
            GenerationError::InvalidWaterProbability(p) => {
                write!(f, "Invalid water probability {}", p)
            }
            GenerationError::NotGenerated => write!(f, "No map has been generated"),
            GenerationError::OutOfRange { x, y } => {
                write!(f, "Tile ({}, {}) is outside the map", x, y)
            }
        }
    }
}

impl std::error::Error for GenerationError {}
