//! Reference catalog lookup and the characteristics summary
//!
//! The catalog is an injected collaborator: given a characteristics summary
//! it returns candidate mineral records with their reference attributes. Any
//! backend can be plugged in through [`CatalogLookup`]; the crate ships a
//! deterministic [`StaticCatalog`] that also serves as the test double.
//! Candidate order is not assumed meaningful — discrimination happens in
//! the confidence scorer.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::ColorNamer;
use crate::features::{transparency_description, CrystalSystem, FeatureSet, Luster};
use crate::scale::ScaleEstimate;

/// Human/LLM-consumable summary of the fused visual features.
///
/// This is the payload handed to the catalog lookup and the narrative
/// generation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characteristics {
    /// Named dominant colors, frequency order (names may repeat when two
    /// observed colors share a nearest anchor)
    pub colors: Vec<String>,

    /// Transparency description bucket
    pub transparency: String,

    /// Luster category label
    pub luster: String,

    /// Formation tags
    pub formations: Vec<String>,

    /// Termination tags
    pub terminations: Vec<String>,

    /// Inclusion tags
    pub inclusions: Vec<String>,

    /// Formatted size estimate, "Unknown" without a scale reference
    pub estimated_size: String,

    /// Crystal system label, if estimated
    pub crystal_system: Option<String>,
}

impl Characteristics {
    /// Build the summary from fused features and an optional scale estimate
    pub fn from_features(
        features: &FeatureSet,
        scale: Option<&ScaleEstimate>,
        namer: &ColorNamer,
    ) -> Self {
        Self {
            colors: features
                .dominant_colors
                .iter()
                .map(|&c| namer.name(c).to_string())
                .collect(),
            transparency: transparency_description(features.transparency).to_string(),
            luster: features.luster.to_string(),
            formations: features.formations.clone(),
            terminations: features.terminations.clone(),
            inclusions: features.inclusions.clone(),
            estimated_size: match scale {
                Some(estimate) => format!("{:.1} cm", estimate.size_cm),
                None => "Unknown".to_string(),
            },
            crystal_system: features.crystal_system.map(|s| s.to_string()),
        }
    }
}

/// A catalog record: candidate name plus reference attributes.
///
/// Every matchable attribute is optional; an absent attribute simply skips
/// its scoring contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReference {
    /// Catalog key
    pub name: String,

    /// Short description for display
    pub description: String,

    /// Reference primary color name
    pub color_primary: Option<String>,

    /// Reference transparency class (transparent, translucent, opaque)
    pub transparency: Option<String>,

    /// Reference luster category
    pub luster: Option<Luster>,

    /// Known formation labels
    pub common_formations: Option<Vec<String>>,

    /// Reference crystal system
    pub crystal_system: Option<CrystalSystem>,
}

/// A scored candidate in the ranked result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// Catalog key
    pub name: String,

    /// Heuristic agreement score in [0,1]
    pub confidence: f32,

    /// Short description for display
    pub description: String,
}

/// Injected catalog collaborator.
///
/// May return zero or more candidates. Failure surfaces as
/// [`crate::AnalysisError::CatalogUnavailable`], which degrades the analysis
/// instead of aborting it.
pub trait CatalogLookup: Send + Sync {
    /// Return candidate records for a characteristics summary
    fn find_matches(&self, characteristics: &Characteristics) -> Result<Vec<CandidateReference>>;
}

/// In-memory catalog backend with a fixed mineral table.
///
/// Deterministic and dependency-free; usable as a default backend and as a
/// test double.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    entries: Vec<CandidateReference>,
}

impl StaticCatalog {
    /// Catalog seeded with common collector minerals
    pub fn new() -> Self {
        let entry = |name: &str,
                     description: &str,
                     color: &str,
                     transparency: &str,
                     luster: Luster,
                     formations: &[&str],
                     system: CrystalSystem| CandidateReference {
            name: name.to_string(),
            description: description.to_string(),
            color_primary: Some(color.to_string()),
            transparency: Some(transparency.to_string()),
            luster: Some(luster),
            common_formations: Some(formations.iter().map(|f| f.to_string()).collect()),
            crystal_system: Some(system),
        };

        Self {
            entries: vec![
                entry(
                    "Amethyst",
                    "Violet variety of quartz",
                    "purple",
                    "transparent",
                    Luster::Vitreous,
                    &["cluster", "geode", "single_point"],
                    CrystalSystem::Hexagonal,
                ),
                entry(
                    "Clear Quartz",
                    "Colorless macrocrystalline quartz",
                    "clear",
                    "transparent",
                    Luster::Vitreous,
                    &["cluster", "single_point", "wand"],
                    CrystalSystem::Hexagonal,
                ),
                entry(
                    "Rose Quartz",
                    "Pink massive quartz",
                    "pink",
                    "translucent",
                    Luster::Vitreous,
                    &["massive"],
                    CrystalSystem::Hexagonal,
                ),
                entry(
                    "Citrine",
                    "Yellow variety of quartz",
                    "yellow",
                    "transparent",
                    Luster::Vitreous,
                    &["cluster", "single_point"],
                    CrystalSystem::Hexagonal,
                ),
                entry(
                    "Pyrite",
                    "Iron sulfide, fool's gold",
                    "yellow",
                    "opaque",
                    Luster::Metallic,
                    &["cubic", "massive"],
                    CrystalSystem::Cubic,
                ),
                entry(
                    "Fluorite",
                    "Calcium fluoride in cubic habits",
                    "purple",
                    "transparent",
                    Luster::Vitreous,
                    &["cubic", "cluster"],
                    CrystalSystem::Cubic,
                ),
                entry(
                    "Obsidian",
                    "Volcanic glass",
                    "black",
                    "opaque",
                    Luster::Vitreous,
                    &["massive"],
                    CrystalSystem::Amorphous,
                ),
                CandidateReference {
                    name: "Malachite".to_string(),
                    description: "Banded green copper carbonate".to_string(),
                    color_primary: Some("green".to_string()),
                    transparency: Some("opaque".to_string()),
                    // Luster varies too much across habits to pin a class
                    luster: None,
                    common_formations: Some(vec!["massive".to_string(), "botryoidal".to_string()]),
                    crystal_system: Some(CrystalSystem::Monoclinic),
                },
            ],
        }
    }

    /// Catalog over caller-supplied records
    pub fn with_entries(entries: Vec<CandidateReference>) -> Self {
        Self { entries }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogLookup for StaticCatalog {
    fn find_matches(&self, _characteristics: &Characteristics) -> Result<Vec<CandidateReference>> {
        Ok(self.entries.clone())
    }
}
