//! Fixed thresholds, weights, and limits for specimen analysis
//!
//! All values here are heuristic constants, not learned parameters. They are
//! surfaced through [`crate::config::AnalysisConfig`] so a request can carry
//! one frozen configuration across concurrent extraction tasks.

/// Single-image feature extraction parameters
pub mod extraction {
    /// Edge length of the fixed downsampling grid used for color frequency
    /// analysis (bounds cost and reduces per-pixel noise)
    pub const DOWNSAMPLE_SIZE: u32 = 150;

    /// Number of dominant colors retained per image
    pub const DOMINANT_COLOR_COUNT: usize = 3;

    /// Denominator mapping luminance variance onto the [0,1] transparency
    /// score. Texture-variance proxy, not true optical transparency.
    pub const TRANSPARENCY_VARIANCE_SCALE: f32 = 10_000.0;

    /// Luminance standard deviation above which luster reads as vitreous
    pub const LUSTER_VITREOUS_STD: f32 = 80.0;

    /// Luminance standard deviation above which luster reads as metallic
    pub const LUSTER_METALLIC_STD: f32 = 60.0;

    /// Luminance standard deviation above which luster reads as resinous
    pub const LUSTER_RESINOUS_STD: f32 = 40.0;

    /// Mean gradient magnitude above which the "cluster" formation is tagged
    pub const FORMATION_GRADIENT_MEAN: f32 = 50.0;

    /// Luminance standard deviation above which "mineral_inclusions" is
    /// tagged (distinct from the luster buckets)
    pub const INCLUSION_STD: f32 = 30.0;
}

/// Transparency score buckets for the human-readable description
pub mod transparency {
    /// Scores above this read as "transparent"
    pub const TRANSPARENT_MIN: f32 = 0.8;

    /// Scores above this read as "translucent"
    pub const TRANSLUCENT_MIN: f32 = 0.5;

    /// Scores above this read as "semi-translucent"; below is "opaque"
    pub const SEMI_TRANSLUCENT_MIN: f32 = 0.2;
}

/// Confidence scoring weights
///
/// Contributions are additive and independent; the raw maximum sums to
/// exactly 1.0 and the final score is clamped there.
pub mod scoring {
    /// Weight when any fused dominant color names to the reference primary
    pub const COLOR_WEIGHT: f32 = 0.30;

    /// Weight when the transparency description equals the reference class
    pub const TRANSPARENCY_WEIGHT: f32 = 0.20;

    /// Weight when the luster category equals the reference luster
    pub const LUSTER_WEIGHT: f32 = 0.20;

    /// Weight when any fused formation tag appears in the reference list
    pub const FORMATION_WEIGHT: f32 = 0.15;

    /// Weight when the crystal system equals the reference system
    pub const CRYSTAL_SYSTEM_WEIGHT: f32 = 0.15;

    /// Ranked candidate list truncation
    pub const MAX_CANDIDATES: usize = 5;
}

/// Request-level limits
pub mod limits {
    /// Maximum number of images accepted per identification request
    pub const MAX_IMAGES: usize = 5;
}
