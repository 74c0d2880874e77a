//! Dominant color extraction and nearest-anchor color naming

use image::imageops::{self, FilterType};
use palette::Srgb;
use std::collections::HashMap;

use crate::config::{ColorAnchor, ColorNamingConfig, ExtractionConfig};
use crate::image_loader::Raster;

/// Maps arbitrary RGB triples to the nearest named color.
///
/// Distance is plain Euclidean in RGB space against the anchor table. The
/// table is scanned in order and only a strictly smaller distance replaces
/// the current best, so the first anchor at minimal distance wins. Downstream
/// confidence scoring depends on this exact determinism; do not "fix" the
/// tie-break.
pub struct ColorNamer {
    palette: Vec<ColorAnchor>,
}

impl ColorNamer {
    /// Create a namer from the request's anchor table
    pub fn new(config: &ColorNamingConfig) -> Self {
        Self {
            palette: config.palette.clone(),
        }
    }

    /// Name the nearest anchor color, or "unknown" for an empty table
    pub fn name(&self, color: Srgb<u8>) -> &str {
        let mut min_distance = f32::INFINITY;
        let mut closest = "unknown";

        for entry in &self.palette {
            for anchor in &entry.anchors {
                let dr = color.red as f32 - anchor.red as f32;
                let dg = color.green as f32 - anchor.green as f32;
                let db = color.blue as f32 - anchor.blue as f32;
                let distance = (dr * dr + dg * dg + db * db).sqrt();

                if distance < min_distance {
                    min_distance = distance;
                    closest = &entry.name;
                }
            }
        }

        closest
    }
}

/// Extract the most frequent exact colors from a raster.
///
/// The raster is downsampled to a small fixed grid first, which bounds cost
/// and suppresses per-pixel noise; nearest-neighbor resampling keeps the
/// original palette values intact for exact-color counting. Frequency ties
/// keep first-encountered scan order.
pub fn dominant_colors(raster: &Raster, config: &ExtractionConfig) -> Vec<Srgb<u8>> {
    let small = imageops::resize(
        raster.rgb(),
        config.downsample_size,
        config.downsample_size,
        FilterType::Nearest,
    );

    // Count in first-seen order so the later stable sort breaks frequency
    // ties by scan order.
    let mut counts: Vec<(Srgb<u8>, u32)> = Vec::new();
    let mut index: HashMap<[u8; 3], usize> = HashMap::new();

    for pixel in small.pixels() {
        let key = pixel.0;
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((Srgb::new(key[0], key[1], key[2]), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(config.dominant_color_count);
    counts.into_iter().map(|(color, _)| color).collect()
}
