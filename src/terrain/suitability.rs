//! Suitability scoring
//!
//! Category scores are smoothed and normalized, then penalized for trees and
//! normalized again. Normalizing after the penalty keeps the best remaining
//! cell at exactly 1.0, so scores from different tiers stay comparable.

use super::{Classification, TerrainCategory};
use crate::config::{
    ANALYSIS_MAX_STILT_HEIGHT, DEEP_WATER_SCORE, FLAT_SCORE, HILL_GENTLE_SCORE,
    HILL_IDEAL_SCORE, HILL_SLOPE_THRESHOLD, HILL_STEEP_SCORE, IDEAL_HILL_SLOPE_MAX,
    SHALLOW_WATER_SCORE, SMOOTHING_SIGMA, TREE_PENALTY_TIERS,
};
use crate::tilemap::Tilemap;

/// The three stages of the suitability map.
#[derive(Clone, Debug, PartialEq)]
pub struct SuitabilityMaps {
    /// Smoothed category scores normalized to a maximum of 1.0
    pub base: Tilemap<f32>,
    /// `base` after the tree penalty, before re-normalization
    pub penalized: Tilemap<f32>,
    /// `penalized` re-normalized to a maximum of 1.0
    pub suitability: Tilemap<f32>,
}

/// Score a classified grid.
pub fn score_suitability(classification: &Classification, tree_density: &Tilemap<f32>) -> SuitabilityMaps {
    let width = classification.category.width;
    let height = classification.category.height;

    let raw = Tilemap::par_from_fn(width, height, |x, y| {
        category_score(
            *classification.category.get(x, y),
            *classification.slope.get(x, y),
            *classification.water_depth.get(x, y),
        )
    });

    let base = raw.gaussian_smooth(SMOOTHING_SIGMA).normalized_to_max();

    let penalized = Tilemap::from_fn(width, height, |x, y| {
        *base.get(x, y) * tree_penalty(*tree_density.get(x, y))
    });

    let suitability = penalized.normalized_to_max();

    SuitabilityMaps {
        base,
        penalized,
        suitability,
    }
}

/// Unsmoothed score for one cell.
pub fn category_score(category: TerrainCategory, slope: f32, water_depth: i32) -> f32 {
    match category {
        TerrainCategory::Flat => FLAT_SCORE,
        TerrainCategory::Hill => {
            if slope > HILL_SLOPE_THRESHOLD && slope < IDEAL_HILL_SLOPE_MAX {
                HILL_IDEAL_SCORE
            } else if slope <= HILL_SLOPE_THRESHOLD {
                HILL_GENTLE_SCORE
            } else {
                HILL_STEEP_SCORE
            }
        }
        TerrainCategory::Water => {
            if water_depth <= ANALYSIS_MAX_STILT_HEIGHT {
                SHALLOW_WATER_SCORE
            } else {
                DEEP_WATER_SCORE
            }
        }
    }
}

/// Multiplier for a tree density; denser forest costs more.
pub fn tree_penalty(density: f32) -> f32 {
    TREE_PENALTY_TIERS
        .iter()
        .find(|(above, _)| density > *above)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::classify_terrain;

    #[test]
    fn test_category_scores() {
        assert_eq!(category_score(TerrainCategory::Flat, 0.0, 0), 0.6);
        assert_eq!(category_score(TerrainCategory::Hill, 2.0, 0), 0.9);
        assert_eq!(category_score(TerrainCategory::Hill, 1.5, 0), 0.7);
        assert_eq!(category_score(TerrainCategory::Hill, 3.0, 0), 0.5);
        assert_eq!(category_score(TerrainCategory::Hill, 4.2, 0), 0.5);
        assert_eq!(category_score(TerrainCategory::Water, 0.0, 5), 0.8);
        assert_eq!(category_score(TerrainCategory::Water, 0.0, 6), 0.3);
    }

    #[test]
    fn test_tree_penalty_tiers() {
        assert_eq!(tree_penalty(0.9), 0.1);
        assert_eq!(tree_penalty(0.7), 0.3);
        assert_eq!(tree_penalty(0.5), 0.3);
        assert_eq!(tree_penalty(0.3), 0.6);
        assert_eq!(tree_penalty(0.2), 1.0);
        assert_eq!(tree_penalty(0.0), 1.0);
    }

    fn mixed_grid() -> (Classification, Tilemap<f32>) {
        let heights = Tilemap::from_fn(16, 12, |x, y| 60 + ((x * x + y) % 7) as i32);
        let floor = Tilemap::from_fn(16, 12, |x, y| {
            let h = 60 + ((x * x + y) % 7) as i32;
            if x < 4 { h - 2 } else if x > 13 { h - 8 } else { h }
        });
        let trees = Tilemap::from_fn(16, 12, |x, y| ((x + y) % 10) as f32 / 10.0);
        (classify_terrain(&heights, &floor), trees)
    }

    #[test]
    fn test_scores_stay_in_unit_range() {
        let (classification, trees) = mixed_grid();
        let maps = score_suitability(&classification, &trees);
        for (_, _, &v) in maps.suitability.iter() {
            assert!((0.0..=1.0).contains(&v));
        }
        assert!((maps.suitability.max_value() - 1.0).abs() < 1e-6);
        assert!((maps.base.max_value() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scoring_is_bit_identical_on_rerun() {
        let (classification, trees) = mixed_grid();
        let a = score_suitability(&classification, &trees);
        let b = score_suitability(&classification, &trees);
        assert_eq!(a, b);
    }

    #[test]
    fn test_dense_forest_penalty() {
        let heights = Tilemap::new_with(10, 10, 64);
        let classification = classify_terrain(&heights, &heights);
        let trees = Tilemap::new_with(10, 10, 0.9f32);
        let maps = score_suitability(&classification, &trees);

        for (x, y, &penalized) in maps.penalized.iter() {
            assert!(penalized <= 0.1 * *maps.base.get(x, y) + 1e-6);
        }
    }
}
