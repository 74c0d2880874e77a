//! Physical scale estimation from reference objects in frame
//!
//! A scale detector looks for a recognizable reference object (ruler, coin,
//! hand) and estimates the specimen's real-world size from it. The shipped
//! [`NoReferenceDetector`] always reports nothing found; it exists to keep
//! the call site and the max-confidence reduction in place so a real
//! detector can be substituted without touching the fusion or scoring
//! contracts.

use serde::{Deserialize, Serialize};

use crate::image_loader::Raster;

/// Recognizable reference object categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceObject {
    Ruler,
    Coin,
    Hand,
}

/// A physical size estimate derived from a reference object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleEstimate {
    /// What the detector matched against
    pub reference: ReferenceObject,

    /// Estimated specimen size in centimeters
    pub size_cm: f32,

    /// Detector confidence in [0,1]
    pub confidence: f32,
}

/// Capability interface for scale detection
pub trait ScaleDetector: Send + Sync {
    /// Attempt to find a reference object and estimate specimen size;
    /// `None` when no reference is found
    fn detect(&self, raster: &Raster) -> Option<ScaleEstimate>;
}

/// Default detector: never finds a reference.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReferenceDetector;

impl ScaleDetector for NoReferenceDetector {
    fn detect(&self, _raster: &Raster) -> Option<ScaleEstimate> {
        None
    }
}

/// Keep the single highest-confidence estimate across images.
///
/// No averaging; a strict comparison keeps the earlier image's estimate when
/// confidences tie.
pub fn best_estimate(estimates: impl IntoIterator<Item = ScaleEstimate>) -> Option<ScaleEstimate> {
    let mut best: Option<ScaleEstimate> = None;
    for estimate in estimates {
        match &best {
            Some(current) if estimate.confidence <= current.confidence => {}
            _ => best = Some(estimate),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn estimate(reference: ReferenceObject, size_cm: f32, confidence: f32) -> ScaleEstimate {
        ScaleEstimate {
            reference,
            size_cm,
            confidence,
        }
    }

    #[test]
    fn test_noop_detector_finds_nothing() {
        let raster = Raster::from_rgb(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));
        assert_eq!(NoReferenceDetector.detect(&raster), None);
    }

    #[test]
    fn test_best_estimate_of_none() {
        assert_eq!(best_estimate(std::iter::empty()), None);
    }

    #[test]
    fn test_best_estimate_picks_max_confidence() {
        let best = best_estimate(vec![
            estimate(ReferenceObject::Coin, 3.0, 0.4),
            estimate(ReferenceObject::Ruler, 5.5, 0.9),
            estimate(ReferenceObject::Hand, 8.0, 0.6),
        ])
        .unwrap();

        assert_eq!(best.reference, ReferenceObject::Ruler);
        assert!((best.size_cm - 5.5).abs() < 1e-6);
    }

    #[test]
    fn test_best_estimate_tie_keeps_first() {
        let best = best_estimate(vec![
            estimate(ReferenceObject::Coin, 3.0, 0.7),
            estimate(ReferenceObject::Ruler, 5.5, 0.7),
        ])
        .unwrap();
        assert_eq!(best.reference, ReferenceObject::Coin);
    }
}
