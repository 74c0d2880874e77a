//! # Mineral Scan
//!
//! A Rust crate for heuristic visual identification of mineral specimens
//! from photographs.
//!
//! This library turns one or more images of a specimen into a ranked set of
//! candidate identities with per-candidate confidence, plus a compact
//! characteristic summary by:
//! - Extracting color, transparency, luster, formation, and inclusion
//!   signals from each image's pixel statistics
//! - Fusing per-image signals from multiple angles into one feature set
//! - Scoring candidates from an injected reference catalog by weighted
//!   attribute agreement
//!
//! The ranking is stable, explainable, and reproducible; it is not a
//! calibrated mineralogical classifier and makes no claim of scientific
//! accuracy.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mineral_scan::{MineralAnalyzer, StaticCatalog};
//!
//! let analyzer = MineralAnalyzer::new(Box::new(StaticCatalog::new()));
//! let images: Vec<Vec<u8>> = vec![std::fs::read("specimen.jpg")?];
//! let result = analyzer.analyze(&images)?;
//! for candidate in &result.candidates {
//!     println!("{}: {:.2}", candidate.name, candidate.confidence);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod features;
pub mod fuse;
pub mod image_loader;
pub mod narrative;
pub mod scale;
pub mod score;

pub use catalog::{CandidateMatch, CandidateReference, CatalogLookup, Characteristics, StaticCatalog};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use extract::FeatureExtractor;
pub use features::{CrystalSystem, FeatureSet, Luster};
pub use image_loader::{load_raster, Raster};
pub use narrative::{parse_guidance, Guidance, NarrativeGenerator};
pub use scale::{NoReferenceDetector, ReferenceObject, ScaleDetector, ScaleEstimate};
pub use score::ConfidenceScorer;

/// Complete identification result for one request.
///
/// Constructed once per request and immutable thereafter; nothing is
/// persisted inside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Characteristics summary for display and narrative generation
    pub characteristics: Characteristics,

    /// Candidates ranked by descending confidence, truncated
    pub candidates: Vec<CandidateMatch>,

    /// Candidate name → confidence score for every scored candidate
    pub confidence_scores: HashMap<String, f32>,

    /// Best physical size estimate across images, if any reference object
    /// was found
    pub scale: Option<ScaleEstimate>,
}

/// Specimen analysis pipeline with injected collaborators.
///
/// The configuration is frozen at construction; the analyzer holds no
/// mutable state and can serve concurrent requests.
pub struct MineralAnalyzer {
    config: AnalysisConfig,
    catalog: Box<dyn CatalogLookup>,
    scale_detector: Box<dyn ScaleDetector>,
}

impl MineralAnalyzer {
    /// Create an analyzer with default configuration and no scale detection
    pub fn new(catalog: Box<dyn CatalogLookup>) -> Self {
        Self::with_config(AnalysisConfig::default(), catalog)
    }

    /// Create an analyzer with an explicit configuration
    pub fn with_config(config: AnalysisConfig, catalog: Box<dyn CatalogLookup>) -> Self {
        Self {
            config,
            catalog,
            scale_detector: Box::new(NoReferenceDetector),
        }
    }

    /// Replace the scale detector (extension point; the default never finds
    /// a reference)
    pub fn with_scale_detector(mut self, detector: Box<dyn ScaleDetector>) -> Self {
        self.scale_detector = detector;
        self
    }

    /// Analyze an ordered batch of raw image byte buffers.
    ///
    /// Images are decoded and feature-extracted independently (in parallel),
    /// fused in submission order, matched against the reference catalog, and
    /// scored. Catalog failure degrades the result — the characteristics
    /// summary is still returned with an empty candidate list — instead of
    /// failing the request.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::EmptyInput`] for a zero-image batch
    /// - [`AnalysisError::TooManyImages`] above the request bound
    /// - [`AnalysisError::InvalidImage`] if any buffer fails to decode; the
    ///   batch aborts on the first undecodable image
    pub fn analyze<B>(&self, images: &[B]) -> Result<AnalysisResult>
    where
        B: AsRef<[u8]> + Sync,
    {
        if images.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        if images.len() > self.config.max_images {
            return Err(AnalysisError::TooManyImages {
                count: images.len(),
                max: self.config.max_images,
            });
        }

        debug!(images = images.len(), "starting specimen analysis");

        let extractor = FeatureExtractor::new(&self.config);

        // Per-image work is independent and CPU-bound; errors are collected
        // and surfaced in submission order so the first invalid image wins.
        let per_image: Vec<Result<(FeatureSet, Option<ScaleEstimate>)>> = images
            .par_iter()
            .enumerate()
            .map(|(index, bytes)| {
                let raster = load_raster(index, bytes.as_ref())?;
                let features = extractor.extract(&raster);
                let scale = self.scale_detector.detect(&raster);
                Ok((features, scale))
            })
            .collect();

        let mut feature_sets = Vec::with_capacity(per_image.len());
        let mut scale_estimates = Vec::new();
        for outcome in per_image {
            let (features, scale) = outcome?;
            feature_sets.push(features);
            scale_estimates.extend(scale);
        }

        let scale = scale::best_estimate(scale_estimates);
        let fused = fuse::fuse(&feature_sets)?;

        let namer = extract::ColorNamer::new(&self.config.naming);
        let characteristics = Characteristics::from_features(&fused, scale.as_ref(), &namer);

        let references = match self.catalog.find_matches(&characteristics) {
            Ok(references) => references,
            Err(error) => {
                warn!(%error, "catalog lookup failed; returning degraded result");
                Vec::new()
            }
        };

        let scorer = ConfidenceScorer::new(&self.config);
        let confidence_scores = scorer.score(&fused, &references);

        let mut candidates: Vec<CandidateMatch> = references
            .iter()
            .map(|reference| CandidateMatch {
                name: reference.name.clone(),
                confidence: confidence_scores.get(&reference.name).copied().unwrap_or(0.0),
                description: reference.description.clone(),
            })
            .collect();
        // Stable sort keeps catalog order among equal scores
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        candidates.truncate(self.config.scoring.max_candidates);

        info!(
            candidates = candidates.len(),
            top = candidates.first().map(|c| c.name.as_str()).unwrap_or("none"),
            "specimen analysis complete"
        );

        Ok(AnalysisResult {
            characteristics,
            candidates,
            confidence_scores,
            scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(image: RgbImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn analyzer() -> MineralAnalyzer {
        MineralAnalyzer::new(Box::new(StaticCatalog::new()))
    }

    #[test]
    fn test_empty_batch_rejected() {
        let images: Vec<Vec<u8>> = Vec::new();
        match analyzer().analyze(&images).unwrap_err() {
            AnalysisError::EmptyInput => {}
            err => panic!("Expected EmptyInput, got: {:?}", err),
        }
    }

    #[test]
    fn test_oversized_batch_rejected() {
        let image = png_bytes(RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])));
        let images = vec![image; 6];
        match analyzer().analyze(&images).unwrap_err() {
            AnalysisError::TooManyImages { count: 6, max: 5 } => {}
            err => panic!("Expected TooManyImages, got: {:?}", err),
        }
    }

    #[test]
    fn test_undecodable_image_aborts_batch() {
        let valid = png_bytes(RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])));
        let images = vec![valid, b"garbage".to_vec()];
        match analyzer().analyze(&images).unwrap_err() {
            AnalysisError::InvalidImage { index: 1, .. } => {}
            err => panic!("Expected InvalidImage at index 1, got: {:?}", err),
        }
    }

    #[test]
    fn test_single_image_analysis_completes() {
        let images = vec![png_bytes(RgbImage::from_pixel(32, 32, Rgb([255, 255, 255])))];
        let result = analyzer().analyze(&images).unwrap();

        assert_eq!(result.characteristics.colors, vec!["clear".to_string()]);
        assert_eq!(result.characteristics.transparency, "opaque");
        assert_eq!(result.characteristics.luster, "dull");
        assert_eq!(result.characteristics.estimated_size, "Unknown");
        assert!(result.scale.is_none());
        assert!(!result.candidates.is_empty());
        assert!(result.candidates.len() <= 5);
    }

    #[test]
    fn test_candidates_sorted_descending() {
        let images = vec![png_bytes(RgbImage::from_pixel(32, 32, Rgb([130, 5, 130])))];
        let result = analyzer().analyze(&images).unwrap();

        for pair in result.candidates.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }
}
