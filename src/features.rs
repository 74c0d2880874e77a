//! Visual feature types shared by extraction, fusion, and scoring

use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::transparency;

/// Surface luster categories derivable from luminance contrast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Luster {
    Vitreous,
    Metallic,
    Resinous,
    Dull,
}

impl Luster {
    /// Lowercase label as used in catalog records and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Luster::Vitreous => "vitreous",
            Luster::Metallic => "metallic",
            Luster::Resinous => "resinous",
            Luster::Dull => "dull",
        }
    }
}

impl fmt::Display for Luster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crystal systems in mineralogy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrystalSystem {
    Cubic,
    Tetragonal,
    Orthorhombic,
    Hexagonal,
    Trigonal,
    Monoclinic,
    Triclinic,
    Amorphous,
}

impl CrystalSystem {
    /// Lowercase label as used in catalog records and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            CrystalSystem::Cubic => "cubic",
            CrystalSystem::Tetragonal => "tetragonal",
            CrystalSystem::Orthorhombic => "orthorhombic",
            CrystalSystem::Hexagonal => "hexagonal",
            CrystalSystem::Trigonal => "trigonal",
            CrystalSystem::Monoclinic => "monoclinic",
            CrystalSystem::Triclinic => "triclinic",
            CrystalSystem::Amorphous => "amorphous",
        }
    }
}

impl fmt::Display for CrystalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual signals extracted from one specimen image.
///
/// The fused multi-image result reuses this type; fusion changes how the
/// fields are populated, not their shape.
///
/// Invariants: `dominant_colors` holds at most three entries in frequency
/// order; `transparency` lies in [0,1]; the tag lists are duplicate-free and
/// keep first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Most frequent exact colors after downsampling, highest first
    pub dominant_colors: Vec<Srgb<u8>>,

    /// Texture-variance transparency proxy, 0 = opaque, 1 = fully transparent
    pub transparency: f32,

    /// Surface luster category
    pub luster: Luster,

    /// Detected formation tags (e.g. "cluster")
    pub formations: Vec<String>,

    /// Detected termination tags
    pub terminations: Vec<String>,

    /// Detected inclusion tags
    pub inclusions: Vec<String>,

    /// Crystal system estimate, if the tag sets support one
    pub crystal_system: Option<CrystalSystem>,
}

/// Map a continuous transparency score onto its human-readable description.
///
/// Buckets are fixed: > 0.8 transparent, > 0.5 translucent, > 0.2
/// semi-translucent, otherwise opaque.
pub fn transparency_description(score: f32) -> &'static str {
    if score > transparency::TRANSPARENT_MIN {
        "transparent"
    } else if score > transparency::TRANSLUCENT_MIN {
        "translucent"
    } else if score > transparency::SEMI_TRANSLUCENT_MIN {
        "semi-translucent"
    } else {
        "opaque"
    }
}
