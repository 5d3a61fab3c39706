//! ASCII rendering for generated maps
//!
//! Row 0 is printed first, so the picture matches the PNG preview.

use crate::config::ItemId;
use crate::generator::TerrainMap;
use crate::tilemap::Tilemap;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsciiMode {
    /// Ground, water and items
    Tiles,
    /// Normalized density gradient
    Density,
}

pub const WATER_CHAR: char = '~';
pub const GROUND_CHAR: char = '.';

/// Character for an item: the first alphanumeric character of its id, or `*`.
pub fn item_char(item: &ItemId) -> char {
    item.as_str()
        .chars()
        .find(|c| c.is_alphanumeric())
        .unwrap_or('*')
}

/// Get ASCII character for a normalized density value
pub fn density_char(value: f32) -> char {
    const CHARS: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
    let idx = (value.clamp(0.0, 1.0) * (CHARS.len() - 1) as f32) as usize;
    CHARS[idx.min(CHARS.len() - 1)]
}

/// Character for a single cell: the item if there is one, else ground or water.
pub fn tile_char(ground: bool, item: Option<&ItemId>) -> char {
    match (ground, item) {
        (_, Some(item)) => item_char(item),
        (true, None) => GROUND_CHAR,
        (false, None) => WATER_CHAR,
    }
}

/// Render the map as one line of text per row.
pub fn render_ascii_map(map: &TerrainMap, mode: AsciiMode) -> String {
    match mode {
        AsciiMode::Tiles => render_grid(&map.ground, |x, y| {
            tile_char(*map.ground.get(x, y), map.items.get(x, y).as_ref())
        }),
        AsciiMode::Density => render_grid(&map.density, |x, y| density_char(*map.density.get(x, y))),
    }
}

fn render_grid<T>(grid: &Tilemap<T>, cell: impl Fn(usize, usize) -> char) -> String {
    let mut result = String::with_capacity((grid.width + 1) * grid.height);
    for y in 0..grid.height {
        for x in 0..grid.width {
            result.push(cell(x, y));
        }
        result.push('\n');
    }
    result
}

/// Legend for the tile view, listing each item character once.
pub fn tile_legend(map: &TerrainMap) -> String {
    let mut seen: Vec<(char, &ItemId)> = Vec::new();
    for (_, _, item) in map.items.iter() {
        if let Some(item) = item {
            if !seen.iter().any(|(_, known)| *known == item) {
                seen.push((item_char(item), item));
            }
        }
    }

    let mut legend = format!("{} water   {} ground\n", WATER_CHAR, GROUND_CHAR);
    for (ch, item) in seen {
        legend.push_str(&format!("{} {}\n", ch, item));
    }
    legend
}
