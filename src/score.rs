//! Confidence scoring of catalog candidates against fused features
//!
//! Each candidate scores by additive weighted agreement between the observed
//! fused features and its reference attributes. Contributions are
//! independent, a reference record missing an attribute skips that
//! contribution (no penalty, no default match), and the total clamps to 1.0.
//! Scores are not normalized across candidates — they are independent
//! agreement measures, not a probability distribution.

use std::collections::HashMap;

use crate::catalog::CandidateReference;
use crate::config::{AnalysisConfig, ScoringConfig};
use crate::extract::ColorNamer;
use crate::features::{transparency_description, FeatureSet};

/// Scores candidates with a frozen weight configuration
pub struct ConfidenceScorer {
    weights: ScoringConfig,
    namer: ColorNamer,
}

impl ConfidenceScorer {
    /// Create a scorer bound to the request configuration
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            weights: config.scoring.clone(),
            namer: ColorNamer::new(&config.naming),
        }
    }

    /// Score every candidate; returns a candidate-name → score map
    pub fn score(
        &self,
        features: &FeatureSet,
        candidates: &[CandidateReference],
    ) -> HashMap<String, f32> {
        candidates
            .iter()
            .map(|candidate| (candidate.name.clone(), self.score_candidate(features, candidate)))
            .collect()
    }

    fn score_candidate(&self, features: &FeatureSet, candidate: &CandidateReference) -> f32 {
        let mut score = 0.0f32;

        if let Some(primary) = &candidate.color_primary {
            if features
                .dominant_colors
                .iter()
                .any(|&color| self.namer.name(color) == primary)
            {
                score += self.weights.color_weight;
            }
        }

        if let Some(class) = &candidate.transparency {
            if transparency_description(features.transparency) == class {
                score += self.weights.transparency_weight;
            }
        }

        if let Some(luster) = candidate.luster {
            if features.luster == luster {
                score += self.weights.luster_weight;
            }
        }

        if let Some(known) = &candidate.common_formations {
            if features.formations.iter().any(|f| known.contains(f)) {
                score += self.weights.formation_weight;
            }
        }

        if let (Some(observed), Some(reference)) =
            (features.crystal_system, candidate.crystal_system)
        {
            if observed == reference {
                score += self.weights.crystal_system_weight;
            }
        }

        score.min(1.0)
    }
}
