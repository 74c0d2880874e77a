//! Formation, termination, and crystal-system signals
//!
//! Formation detection is the only edge-based signal: a mean gradient
//! magnitude over luminance, thresholded to tag dense multi-crystal
//! surfaces. Termination detection is a constant placeholder until a real
//! shape detector exists, and the crystal system estimate is a substring
//! heuristic over the tag sets.

use image::GrayImage;

use crate::config::ExtractionConfig;
use crate::features::CrystalSystem;

/// Mean 2D gradient magnitude over a luminance image.
///
/// Central differences in the interior, one-sided at the borders; axes
/// shorter than two pixels contribute zero.
pub fn gradient_mean(luma: &GrayImage) -> f32 {
    let width = luma.width() as i64;
    let height = luma.height() as i64;
    if width == 0 || height == 0 {
        return 0.0;
    }

    let value = |x: i64, y: i64| luma.get_pixel(x as u32, y as u32).0[0] as f64;

    let mut sum = 0.0f64;
    for y in 0..height {
        for x in 0..width {
            let gx = if width < 2 {
                0.0
            } else if x == 0 {
                value(1, y) - value(0, y)
            } else if x == width - 1 {
                value(x, y) - value(x - 1, y)
            } else {
                (value(x + 1, y) - value(x - 1, y)) / 2.0
            };

            let gy = if height < 2 {
                0.0
            } else if y == 0 {
                value(x, 1) - value(x, 0)
            } else if y == height - 1 {
                value(x, y) - value(x, y - 1)
            } else {
                (value(x, y + 1) - value(x, y - 1)) / 2.0
            };

            sum += (gx * gx + gy * gy).sqrt();
        }
    }

    (sum / (width * height) as f64) as f32
}

/// Tag formations detectable from edge density.
///
/// "cluster" is the only formation derivable without a trained model: high
/// mean edge strength suggests many small crystal faces.
pub fn formations(luma: &GrayImage, config: &ExtractionConfig) -> Vec<String> {
    if gradient_mean(luma) > config.formation_gradient_mean {
        vec!["cluster".to_string()]
    } else {
        Vec::new()
    }
}

/// Termination tags.
///
/// Always yields "single_terminated". This is a documented placeholder, not
/// a detector; a real implementation would analyze the shape of crystal
/// ends.
pub fn terminations() -> Vec<String> {
    vec!["single_terminated".to_string()]
}

/// Estimate the crystal system from substring presence of specific labels in
/// the tag sets. Returns `None` when no label matches.
pub fn crystal_system(formations: &[String], terminations: &[String]) -> Option<CrystalSystem> {
    let formation_text = formations.join(" ");
    let termination_text = terminations.join(" ");

    if formation_text.contains("hexagonal") || termination_text.contains("six_sided") {
        Some(CrystalSystem::Hexagonal)
    } else if formation_text.contains("cubic") {
        Some(CrystalSystem::Cubic)
    } else if formation_text.contains("prismatic") {
        Some(CrystalSystem::Tetragonal)
    } else {
        None
    }
}
