//! Multi-image feature fusion
//!
//! Reduces an ordered list of per-image feature sets (submission order) into
//! one consolidated set. Aggregation rules:
//!
//! - single-element input returns the element unchanged (identity)
//! - dominant colors: frequency across the union of all per-image dominant
//!   colors, ties broken by first-encountered order
//! - transparency: arithmetic mean
//! - luster: majority vote, ties broken by first-encountered order
//! - tag lists: set union, deduplicated, first-seen order
//! - crystal system: taken from the first image's estimate, never re-derived
//!   from the fused tags (a documented simplification)

use palette::Srgb;
use std::collections::HashSet;

use crate::error::{AnalysisError, Result};
use crate::features::{FeatureSet, Luster};

/// Fuse feature sets from multiple angles of the same specimen.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] for an empty list; the API boundary
/// must guarantee at least one image before reaching this point.
pub fn fuse(features: &[FeatureSet]) -> Result<FeatureSet> {
    let first = features.first().ok_or(AnalysisError::EmptyInput)?;
    if features.len() == 1 {
        return Ok(first.clone());
    }

    let dominant_colors = fuse_colors(features);

    let transparency =
        features.iter().map(|f| f.transparency).sum::<f32>() / features.len() as f32;

    let luster = fuse_luster(features);

    let formations = union_tags(features.iter().map(|f| &f.formations));
    let terminations = union_tags(features.iter().map(|f| &f.terminations));
    let inclusions = union_tags(features.iter().map(|f| &f.inclusions));

    Ok(FeatureSet {
        dominant_colors,
        transparency,
        luster,
        formations,
        terminations,
        inclusions,
        crystal_system: first.crystal_system,
    })
}

/// Rank colors by frequency across all per-image dominant lists.
///
/// Counting preserves first-encountered order and the sort is stable, so
/// frequency ties resolve to the earlier image's color.
fn fuse_colors(features: &[FeatureSet]) -> Vec<Srgb<u8>> {
    let mut counts: Vec<(Srgb<u8>, u32)> = Vec::new();

    for color in features.iter().flat_map(|f| &f.dominant_colors) {
        match counts.iter().position(|(c, _)| c == color) {
            Some(i) => counts[i].1 += 1,
            None => counts.push((*color, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(3);
    counts.into_iter().map(|(color, _)| color).collect()
}

/// Majority luster vote; a strict comparison keeps the first-encountered
/// category on ties.
fn fuse_luster(features: &[FeatureSet]) -> Luster {
    let mut votes: Vec<(Luster, u32)> = Vec::new();
    for feature in features {
        match votes.iter().position(|(l, _)| *l == feature.luster) {
            Some(i) => votes[i].1 += 1,
            None => votes.push((feature.luster, 1)),
        }
    }

    let mut best = votes[0];
    for &vote in &votes[1..] {
        if vote.1 > best.1 {
            best = vote;
        }
    }
    best.0
}

/// Union of tag lists, deduplicated, first-seen order
fn union_tags<'a>(lists: impl Iterator<Item = &'a Vec<String>>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut union = Vec::new();
    for tag in lists.flatten() {
        if seen.insert(tag.as_str()) {
            union.push(tag.clone());
        }
    }
    union
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::CrystalSystem;

    fn sample(luster: Luster, transparency: f32, colors: &[(u8, u8, u8)]) -> FeatureSet {
        FeatureSet {
            dominant_colors: colors.iter().map(|&(r, g, b)| Srgb::new(r, g, b)).collect(),
            transparency,
            luster,
            formations: vec!["cluster".to_string()],
            terminations: vec!["single_terminated".to_string()],
            inclusions: Vec::new(),
            crystal_system: Some(CrystalSystem::Hexagonal),
        }
    }

    #[test]
    fn test_empty_input_is_an_error() {
        match fuse(&[]).unwrap_err() {
            AnalysisError::EmptyInput => {}
            err => panic!("Expected EmptyInput, got: {:?}", err),
        }
    }

    #[test]
    fn test_single_element_identity() {
        let features = sample(Luster::Resinous, 0.42, &[(1, 2, 3), (4, 5, 6)]);
        let fused = fuse(std::slice::from_ref(&features)).unwrap();
        assert_eq!(fused, features);
    }

    #[test]
    fn test_transparency_is_mean() {
        let fused = fuse(&[
            sample(Luster::Dull, 0.2, &[(0, 0, 0)]),
            sample(Luster::Dull, 0.6, &[(0, 0, 0)]),
        ])
        .unwrap();
        assert!((fused.transparency - 0.4).abs() < 1e-6);
        assert!((0.0..=1.0).contains(&fused.transparency));
    }

    #[test]
    fn test_luster_tie_resolves_to_first_image() {
        let fused = fuse(&[
            sample(Luster::Vitreous, 0.5, &[(0, 0, 0)]),
            sample(Luster::Metallic, 0.5, &[(0, 0, 0)]),
        ])
        .unwrap();
        assert_eq!(fused.luster, Luster::Vitreous);
    }

    #[test]
    fn test_luster_majority_wins() {
        let fused = fuse(&[
            sample(Luster::Vitreous, 0.5, &[(0, 0, 0)]),
            sample(Luster::Metallic, 0.5, &[(0, 0, 0)]),
            sample(Luster::Metallic, 0.5, &[(0, 0, 0)]),
        ])
        .unwrap();
        assert_eq!(fused.luster, Luster::Metallic);
    }

    #[test]
    fn test_color_frequency_across_images() {
        // Red appears in both images, blue and green once each
        let fused = fuse(&[
            sample(Luster::Dull, 0.1, &[(200, 0, 0), (0, 0, 200)]),
            sample(Luster::Dull, 0.1, &[(0, 200, 0), (200, 0, 0)]),
        ])
        .unwrap();

        assert_eq!(fused.dominant_colors[0], Srgb::new(200u8, 0, 0));
        // Count tie between blue and green resolves to first-encountered
        assert_eq!(fused.dominant_colors[1], Srgb::new(0u8, 0, 200));
        assert_eq!(fused.dominant_colors[2], Srgb::new(0u8, 200, 0));
    }

    #[test]
    fn test_fused_color_list_capped_at_three() {
        let fused = fuse(&[
            sample(Luster::Dull, 0.1, &[(1, 0, 0), (2, 0, 0), (3, 0, 0)]),
            sample(Luster::Dull, 0.1, &[(4, 0, 0), (5, 0, 0), (6, 0, 0)]),
        ])
        .unwrap();
        assert!(fused.dominant_colors.len() <= 3);
    }

    #[test]
    fn test_tag_union_deduplicates() {
        let mut a = sample(Luster::Dull, 0.1, &[(0, 0, 0)]);
        a.formations = vec!["cluster".to_string()];
        a.inclusions = vec!["mineral_inclusions".to_string()];
        let mut b = sample(Luster::Dull, 0.1, &[(0, 0, 0)]);
        b.formations = vec!["cluster".to_string(), "geode".to_string()];

        let fused = fuse(&[a, b]).unwrap();
        assert_eq!(fused.formations, vec!["cluster".to_string(), "geode".to_string()]);
        assert_eq!(fused.inclusions, vec!["mineral_inclusions".to_string()]);
    }

    #[test]
    fn test_crystal_system_taken_from_first_image() {
        let mut a = sample(Luster::Dull, 0.1, &[(0, 0, 0)]);
        a.crystal_system = None;
        let mut b = sample(Luster::Dull, 0.1, &[(0, 0, 0)]);
        b.crystal_system = Some(CrystalSystem::Cubic);

        let fused = fuse(&[a, b]).unwrap();
        assert_eq!(fused.crystal_system, None);
    }
}
