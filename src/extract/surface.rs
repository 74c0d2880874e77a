//! Transparency, luster, and inclusion signals from luminance statistics
//!
//! These are intentionally coarse heuristics over the pixel brightness
//! distribution. The transparency score is a texture-variance proxy, not a
//! measurement of optical transmission; the luster buckets are fixed
//! contrast thresholds, not learned boundaries.

use image::GrayImage;

use crate::config::ExtractionConfig;
use crate::features::Luster;

/// First and second moments of the luminance distribution
#[derive(Debug, Clone, Copy)]
pub struct LumaStats {
    /// Population variance of pixel brightness
    pub variance: f32,
    /// Population standard deviation of pixel brightness
    pub std_dev: f32,
}

/// Compute luminance statistics across all pixels.
///
/// An empty image yields zero variance rather than an error.
pub fn luma_stats(luma: &GrayImage) -> LumaStats {
    let count = (luma.width() as u64 * luma.height() as u64) as f64;
    if count == 0.0 {
        return LumaStats {
            variance: 0.0,
            std_dev: 0.0,
        };
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for pixel in luma.pixels() {
        let v = pixel.0[0] as f64;
        sum += v;
        sum_sq += v * v;
    }

    let mean = sum / count;
    // Clamp against negative residue from floating point cancellation
    let variance = (sum_sq / count - mean * mean).max(0.0);

    LumaStats {
        variance: variance as f32,
        std_dev: variance.sqrt() as f32,
    }
}

/// Map luminance variance onto the [0,1] transparency score by fixed linear
/// scaling
pub fn transparency_score(stats: &LumaStats, config: &ExtractionConfig) -> f32 {
    (stats.variance / config.transparency_variance_scale).clamp(0.0, 1.0)
}

/// Bucket luminance contrast into a luster category
pub fn luster(stats: &LumaStats, config: &ExtractionConfig) -> Luster {
    if stats.std_dev > config.luster_vitreous_std {
        Luster::Vitreous
    } else if stats.std_dev > config.luster_metallic_std {
        Luster::Metallic
    } else if stats.std_dev > config.luster_resinous_std {
        Luster::Resinous
    } else {
        Luster::Dull
    }
}

/// Tag inclusion patterns when internal brightness variation is high
pub fn inclusions(stats: &LumaStats, config: &ExtractionConfig) -> Vec<String> {
    if stats.std_dev > config.inclusion_std {
        vec!["mineral_inclusions".to_string()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn uniform(width: u32, height: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([value]))
    }

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    #[test]
    fn test_uniform_image_has_zero_variance() {
        let stats = luma_stats(&uniform(16, 16, 200));
        assert!(stats.variance.abs() < 1e-3);
        assert!(stats.std_dev.abs() < 1e-3);
    }

    #[test]
    fn test_half_black_half_white_stats() {
        let luma = GrayImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                Luma([0])
            } else {
                Luma([255])
            }
        });
        let stats = luma_stats(&luma);

        // Two-point distribution: std dev = 127.5, variance = 16256.25
        assert!((stats.std_dev - 127.5).abs() < 0.1);
        assert!((stats.variance - 16256.25).abs() < 1.0);
    }

    #[test]
    fn test_transparency_scaling_and_clamp() {
        let config = config();
        let low = LumaStats {
            variance: 2500.0,
            std_dev: 50.0,
        };
        assert!((transparency_score(&low, &config) - 0.25).abs() < 1e-6);

        let saturated = LumaStats {
            variance: 16256.25,
            std_dev: 127.5,
        };
        assert_eq!(transparency_score(&saturated, &config), 1.0);

        let zero = LumaStats {
            variance: 0.0,
            std_dev: 0.0,
        };
        assert_eq!(transparency_score(&zero, &config), 0.0);
    }

    #[test]
    fn test_luster_buckets() {
        let config = config();
        let with_std = |std_dev| LumaStats {
            variance: std_dev * std_dev,
            std_dev,
        };

        assert_eq!(luster(&with_std(100.0), &config), Luster::Vitreous);
        assert_eq!(luster(&with_std(70.0), &config), Luster::Metallic);
        assert_eq!(luster(&with_std(50.0), &config), Luster::Resinous);
        assert_eq!(luster(&with_std(20.0), &config), Luster::Dull);
        // Exactly at a threshold falls into the lower bucket
        assert_eq!(luster(&with_std(80.0), &config), Luster::Metallic);
    }

    #[test]
    fn test_inclusions_threshold() {
        let config = config();
        let flat = LumaStats {
            variance: 400.0,
            std_dev: 20.0,
        };
        assert!(inclusions(&flat, &config).is_empty());

        let busy = LumaStats {
            variance: 2500.0,
            std_dev: 50.0,
        };
        assert_eq!(inclusions(&busy, &config), vec!["mineral_inclusions".to_string()]);
    }
}
