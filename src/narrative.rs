//! Narrative guidance collaborators and response parsing
//!
//! Narrative generation is a black box outside this crate: some backend
//! turns a characteristics summary plus free-text user description into
//! unstructured guidance text. This module defines the injected interface
//! and the intentionally simplistic parser that lifts that text into
//! structured guidance fields by section-header keyword matching. The parser
//! makes no attempt at robust markup handling; it mirrors the formatting the
//! generation prompt asks for (headed sections with bullet lists).

use serde::{Deserialize, Serialize};

use crate::catalog::Characteristics;
use crate::error::Result;

/// Injected narrative generation collaborator
pub trait NarrativeGenerator: Send + Sync {
    /// Produce guidance text for a characteristics summary and optional
    /// free-text user description.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnalysisError::NarrativeUnavailable`] when the
    /// backend fails; retry policy belongs to the caller.
    fn generate(&self, characteristics: &Characteristics, user_description: &str)
        -> Result<String>;
}

/// Structured guidance lifted from generated narrative text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guidance {
    pub identification: String,
    pub confidence_level: String,
    pub key_features: Vec<String>,
    pub spiritual_properties: Vec<String>,
    pub healing_applications: Vec<String>,
    pub chakra_associations: Vec<String>,
    pub elemental_correspondence: String,
    pub care_instructions: Vec<String>,
    pub energy_work_suggestions: Vec<String>,
    pub complementary_crystals: Vec<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Identification,
    Features,
    Spiritual,
    Healing,
    Chakra,
    Care,
    Energy,
    Complementary,
}

/// Parse guidance text into structured fields.
///
/// Section headers are matched by keyword, bullets ("-" or "•") feed the
/// current section, and each list is truncated to a fixed display limit.
/// Unrecognized content is dropped silently.
pub fn parse_guidance(text: &str) -> Guidance {
    let mut guidance = Guidance::default();
    let mut section = Section::None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        let lower = line.to_lowercase();

        if lower.contains("identification") && line.contains(':') {
            section = Section::Identification;
            continue;
        } else if lower.contains("confidence") && line.contains(':') {
            if let Some(value) = line.rsplit(':').next() {
                guidance.confidence_level = value.trim().to_lowercase();
            }
            continue;
        } else if lower.contains("key") && lower.contains("features") {
            section = Section::Features;
            continue;
        } else if lower.contains("spiritual") && lower.contains("properties") {
            section = Section::Spiritual;
            continue;
        } else if lower.contains("healing") {
            section = Section::Healing;
            continue;
        } else if lower.contains("chakra") {
            section = Section::Chakra;
            continue;
        } else if lower.contains("element") && line.contains(':') {
            if let Some(value) = line.rsplit(':').next() {
                guidance.elemental_correspondence = value.trim().to_string();
            }
            continue;
        } else if lower.contains("care") || lower.contains("maintenance") {
            section = Section::Care;
            continue;
        } else if lower.contains("energy work") || lower.contains("working with") {
            section = Section::Energy;
            continue;
        } else if lower.contains("complementary") {
            section = Section::Complementary;
            continue;
        }

        if let Some(content) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
            let content = content.trim().to_string();
            match section {
                Section::Features => guidance.key_features.push(content),
                Section::Spiritual => guidance.spiritual_properties.push(content),
                Section::Healing => guidance.healing_applications.push(content),
                Section::Chakra => guidance.chakra_associations.push(content),
                Section::Care => guidance.care_instructions.push(content),
                Section::Energy => guidance.energy_work_suggestions.push(content),
                Section::Complementary => guidance.complementary_crystals.push(content),
                _ => {}
            }
        } else if section == Section::Identification && !line.is_empty() && !line.starts_with('#') {
            guidance.identification = line.to_string();
        }
    }

    if guidance.identification.is_empty() {
        guidance.identification = "Unknown Crystal".to_string();
    }
    if guidance.confidence_level.is_empty() {
        guidance.confidence_level = "possible".to_string();
    }

    guidance.key_features.truncate(5);
    guidance.spiritual_properties.truncate(5);
    guidance.healing_applications.truncate(5);
    guidance.chakra_associations.truncate(3);
    guidance.care_instructions.truncate(5);
    guidance.energy_work_suggestions.truncate(3);
    guidance.complementary_crystals.truncate(3);

    guidance
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
**Crystal Identification:**
Amethyst
Confidence level: Likely

**Key Identifying Features**
- Deep violet color zoning
- Vitreous luster on crystal faces
- Six-sided prism terminations

**Spiritual & Metaphysical Properties**
- Calms the mind
• Supports meditation

Element: Air

**Care & Maintenance**
- Avoid prolonged direct sunlight
- Rinse with lukewarm water

**Complementary Crystals**
- Clear Quartz
- Selenite
";

    #[test]
    fn test_parse_sample_guidance() {
        let guidance = parse_guidance(SAMPLE);

        assert_eq!(guidance.identification, "Amethyst");
        assert_eq!(guidance.confidence_level, "likely");
        assert_eq!(guidance.key_features.len(), 3);
        assert_eq!(guidance.key_features[0], "Deep violet color zoning");
        assert_eq!(
            guidance.spiritual_properties,
            vec!["Calms the mind".to_string(), "Supports meditation".to_string()]
        );
        assert_eq!(guidance.elemental_correspondence, "Air");
        assert_eq!(guidance.care_instructions.len(), 2);
        assert_eq!(
            guidance.complementary_crystals,
            vec!["Clear Quartz".to_string(), "Selenite".to_string()]
        );
    }

    #[test]
    fn test_parse_empty_text_uses_defaults() {
        let guidance = parse_guidance("");
        assert_eq!(guidance.identification, "Unknown Crystal");
        assert_eq!(guidance.confidence_level, "possible");
        assert!(guidance.key_features.is_empty());
    }

    #[test]
    fn test_sections_truncate_to_display_limits() {
        let mut text = String::from("Key Identifying Features\n");
        for i in 0..10 {
            text.push_str(&format!("- feature {}\n", i));
        }
        text.push_str("Chakra Associations\n");
        for i in 0..10 {
            text.push_str(&format!("- chakra {}\n", i));
        }

        let guidance = parse_guidance(&text);
        assert_eq!(guidance.key_features.len(), 5);
        assert_eq!(guidance.chakra_associations.len(), 3);
    }

    #[test]
    fn test_bullets_before_any_section_are_dropped() {
        let guidance = parse_guidance("- stray bullet\n- another\n");
        assert!(guidance.key_features.is_empty());
        assert!(guidance.care_instructions.is_empty());
    }
}
