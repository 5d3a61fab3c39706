//! PNG previews of generated maps

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use image::{ImageBuffer, Luma, Rgb, RgbImage};

use crate::config::ItemId;
use crate::generator::TerrainMap;
use crate::tilemap::Tilemap;

pub const WATER_COLOR: [u8; 3] = [38, 92, 166];
pub const GROUND_COLOR: [u8; 3] = [104, 162, 72];

/// Stable colour for an item id, kept away from the ground and water palette.
pub fn item_color(item: &ItemId) -> [u8; 3] {
    let mut hasher = DefaultHasher::new();
    item.hash(&mut hasher);
    let h = hasher.finish();

    // Warm-ish channels so items stand out against green and blue
    [
        160 + (h & 0x5f) as u8,
        40 + ((h >> 8) & 0x7f) as u8,
        ((h >> 16) & 0x3f) as u8,
    ]
}

/// Build the RGB preview: water, ground and one pixel per item.
pub fn render_map_image(map: &TerrainMap) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(map.width() as u32, map.height() as u32);

    for (x, y, &ground) in map.ground.iter() {
        let color = match map.items.get(x, y) {
            Some(item) => item_color(item),
            None if ground => GROUND_COLOR,
            None => WATER_COLOR,
        };
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }

    img
}

/// Export the map preview as a PNG.
pub fn export_map_png(map: &TerrainMap, path: &str) -> Result<(), image::ImageError> {
    render_map_image(map).save(path)
}

/// Export a density field as a greyscale PNG. Values are expected to be normalized (0.0-1.0).
pub fn export_density_png(density: &Tilemap<f32>, path: &str) -> Result<(), image::ImageError> {
    let mut img: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::new(density.width as u32, density.height as u32);

    for (x, y, &val) in density.iter() {
        let level = (val.clamp(0.0, 1.0) * 255.0).round() as u8;
        img.put_pixel(x as u32, y as u32, Luma([level]));
    }

    img.save(path)
}
