//! Configuration structures for the mineral_scan analysis pipeline.
//!
//! This module defines all tunable parameters for feature extraction and
//! confidence scoring, organized into logical groups. The configuration is
//! immutable once constructed and is passed into the extractor and scorer,
//! so concurrent requests can share one frozen instance.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed
//! programmatically:
//!
//! ```no_run
//! use mineral_scan::AnalysisConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalysisConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalysisConfig::default();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`ColorNamingConfig`]: the named-color anchor table
//! - [`ExtractionConfig`]: per-image signal thresholds
//! - [`ScoringConfig`]: candidate agreement weights

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::constants::{extraction, limits, scoring};

/// Complete configuration for one identification request.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Named-color anchor table for color naming
    pub naming: ColorNamingConfig,

    /// Single-image extraction parameters
    pub extraction: ExtractionConfig,

    /// Confidence scoring parameters
    pub scoring: ScoringConfig,

    /// Maximum number of images accepted per request
    pub max_images: usize,
}

/// A named color with one or more reference RGB anchors.
///
/// An observed color maps to the name of the nearest anchor by Euclidean
/// distance in RGB space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorAnchor {
    /// Human-readable color name
    pub name: String,

    /// Reference RGB values for this name
    pub anchors: Vec<Srgb<u8>>,
}

/// Color naming parameters.
///
/// The anchor table is iterated in order; the first anchor at minimal
/// distance wins. That tie-break is load-bearing for downstream scoring and
/// must not be reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorNamingConfig {
    /// Ordered anchor table
    pub palette: Vec<ColorAnchor>,
}

/// Single-image feature extraction parameters.
///
/// All thresholds are fixed heuristics over luminance statistics; see
/// [`crate::constants::extraction`] for the default values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Edge length of the color analysis downsampling grid
    pub downsample_size: u32,

    /// Number of dominant colors retained per image
    pub dominant_color_count: usize,

    /// Luminance variance denominator for the transparency score
    pub transparency_variance_scale: f32,

    /// Luster bucket: vitreous above this luminance std dev
    pub luster_vitreous_std: f32,

    /// Luster bucket: metallic above this luminance std dev
    pub luster_metallic_std: f32,

    /// Luster bucket: resinous above this luminance std dev (dull below)
    pub luster_resinous_std: f32,

    /// Mean gradient magnitude threshold for the "cluster" formation tag
    pub formation_gradient_mean: f32,

    /// Luminance std dev threshold for the "mineral_inclusions" tag
    pub inclusion_std: f32,
}

/// Confidence scoring parameters.
///
/// Contributions are additive and independent; the total is clamped to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight for a dominant color naming to the reference primary color
    pub color_weight: f32,

    /// Weight for a transparency description match
    pub transparency_weight: f32,

    /// Weight for a luster category match
    pub luster_weight: f32,

    /// Weight for a formation tag match
    pub formation_weight: f32,

    /// Weight for a crystal system match
    pub crystal_system_weight: f32,

    /// Ranked candidate list truncation
    pub max_candidates: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            naming: ColorNamingConfig::default(),
            extraction: ExtractionConfig::default(),
            scoring: ScoringConfig::default(),
            max_images: limits::MAX_IMAGES,
        }
    }
}

impl Default for ColorNamingConfig {
    fn default() -> Self {
        let anchor = |name: &str, values: &[(u8, u8, u8)]| ColorAnchor {
            name: name.to_string(),
            anchors: values.iter().map(|&(r, g, b)| Srgb::new(r, g, b)).collect(),
        };

        Self {
            palette: vec![
                anchor("clear", &[(255, 255, 255), (240, 240, 240)]),
                anchor("purple", &[(128, 0, 128), (147, 112, 219), (138, 43, 226)]),
                anchor("pink", &[(255, 192, 203), (255, 182, 193)]),
                anchor("green", &[(0, 128, 0), (34, 139, 34), (144, 238, 144)]),
                anchor("blue", &[(0, 0, 255), (30, 144, 255), (135, 206, 235)]),
                anchor("black", &[(0, 0, 0), (47, 79, 79)]),
                anchor("yellow", &[(255, 255, 0), (255, 215, 0)]),
                anchor("orange", &[(255, 165, 0), (255, 140, 0)]),
                anchor("red", &[(255, 0, 0), (220, 20, 60)]),
                anchor("brown", &[(139, 69, 19), (160, 82, 45)]),
            ],
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            downsample_size: extraction::DOWNSAMPLE_SIZE,
            dominant_color_count: extraction::DOMINANT_COLOR_COUNT,
            transparency_variance_scale: extraction::TRANSPARENCY_VARIANCE_SCALE,
            luster_vitreous_std: extraction::LUSTER_VITREOUS_STD,
            luster_metallic_std: extraction::LUSTER_METALLIC_STD,
            luster_resinous_std: extraction::LUSTER_RESINOUS_STD,
            formation_gradient_mean: extraction::FORMATION_GRADIENT_MEAN,
            inclusion_std: extraction::INCLUSION_STD,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            color_weight: scoring::COLOR_WEIGHT,
            transparency_weight: scoring::TRANSPARENCY_WEIGHT,
            luster_weight: scoring::LUSTER_WEIGHT,
            formation_weight: scoring::FORMATION_WEIGHT,
            crystal_system_weight: scoring::CRYSTAL_SYSTEM_WEIGHT,
            max_candidates: scoring::MAX_CANDIDATES,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_names() {
        let config = ColorNamingConfig::default();
        let names: Vec<&str> = config.palette.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "clear", "purple", "pink", "green", "blue", "black", "yellow", "orange", "red",
                "brown"
            ]
        );
        assert!(config.palette.iter().all(|a| !a.anchors.is_empty()));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: AnalysisConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.naming.palette.len(), config.naming.palette.len());
        assert_eq!(restored.extraction.downsample_size, config.extraction.downsample_size);
        assert_eq!(restored.scoring.max_candidates, config.scoring.max_candidates);
        assert_eq!(restored.max_images, config.max_images);
    }
}
