//! Single-image feature extraction
//!
//! This module derives color, transparency, luster, formation, termination,
//! and inclusion signals from one raster using only pixel statistics. It
//! never consults the reference catalog, and it never fails for a
//! structurally valid raster: numeric edge cases (a uniform zero-variance
//! image, degenerate dimensions) clamp to defaults instead of erroring.

pub mod color;
pub mod shape;
pub mod surface;

pub use color::ColorNamer;

use tracing::debug;

use crate::config::{AnalysisConfig, ExtractionConfig};
use crate::features::FeatureSet;
use crate::image_loader::Raster;

/// Extracts one [`FeatureSet`] per raster using a frozen configuration.
///
/// The extractor holds no mutable state, so one instance can serve
/// concurrent per-image extraction tasks.
pub struct FeatureExtractor {
    config: ExtractionConfig,
}

impl FeatureExtractor {
    /// Create an extractor bound to the request configuration
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            config: config.extraction.clone(),
        }
    }

    /// Derive all visual signals from one raster
    pub fn extract(&self, raster: &Raster) -> FeatureSet {
        let dominant_colors = color::dominant_colors(raster, &self.config);

        // Texture and edge signals all read the single-channel luminance
        // view, converted once per raster.
        let luma = raster.to_luma();
        let stats = surface::luma_stats(&luma);

        let transparency = surface::transparency_score(&stats, &self.config);
        let luster = surface::luster(&stats, &self.config);
        let inclusions = surface::inclusions(&stats, &self.config);

        let formations = shape::formations(&luma, &self.config);
        let terminations = shape::terminations();
        let crystal_system = shape::crystal_system(&formations, &terminations);

        debug!(
            width = raster.width(),
            height = raster.height(),
            transparency = f64::from(transparency),
            luster = %luster,
            formations = formations.len(),
            "extracted single-image features"
        );

        FeatureSet {
            dominant_colors,
            transparency,
            luster,
            formations,
            terminations,
            inclusions,
            crystal_system,
        }
    }
}
