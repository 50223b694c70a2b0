//! Shoreline detection for partially submerged houses
//!
//! A good shoreline site puts a meaningful minority of a house's stilts in
//! water and the rest on land. For each cell the stilt layouts of a small,
//! medium and large house are projected onto the water mask and the split is
//! scored; the best layout wins.

use super::Classification;
use crate::config::{
    IDEAL_WATER_RATIO, OPTIMAL_SHORELINE_QUALITY, SHORELINE_MAX_DEPTH, SHORELINE_WATER_FRACTION,
    SHORELINE_WINDOW, SMOOTHING_SIGMA,
};
use crate::tilemap::Tilemap;

/// Stilt layout of a 6x6 house as (row, col) offsets
const SMALL_HOUSE_STILTS: &[(i32, i32)] = &[(0, 0), (0, 5), (5, 0), (5, 5)];

/// Stilt layout of an 8x8 house
const MEDIUM_HOUSE_STILTS: &[(i32, i32)] = &[
    (0, 0), (0, 7), (7, 0), (7, 7),
    (3, 0), (0, 3), (7, 3), (3, 7),
];

/// Stilt layout of a 10x10 house
const LARGE_HOUSE_STILTS: &[(i32, i32)] = &[
    (0, 0), (0, 9), (9, 0), (9, 9),
    (4, 0), (0, 4), (9, 4), (4, 9),
];

const STILT_TEMPLATES: [&[(i32, i32)]; 3] = [SMALL_HOUSE_STILTS, MEDIUM_HOUSE_STILTS, LARGE_HOUSE_STILTS];

/// Templates are anchored this far up and left of the evaluated cell.
const TEMPLATE_ANCHOR_OFFSET: i32 = (SHORELINE_WINDOW / 4) as i32;

/// Compute the smoothed shoreline quality map, values in [0, 1].
pub fn detect_shoreline(classification: &Classification) -> Tilemap<f32> {
    let water = classification.water_mask();
    let width = water.width;
    let height = water.height;

    let raw = Tilemap::par_from_fn(width, height, |x, y| {
        cell_shoreline_quality(&water, &classification.water_depth, x, y).unwrap_or(0.0)
    });

    let smoothed = raw.gaussian_smooth(SMOOTHING_SIGMA);

    let optimal = smoothed.iter().filter(|(_, _, q)| is_optimal_shoreline(**q)).count();
    tracing::debug!(optimal, "shoreline cells suited to partially submerged houses");

    smoothed
}

pub fn is_optimal_shoreline(quality: f32) -> bool {
    quality > OPTIMAL_SHORELINE_QUALITY
}

/// Unsmoothed quality of one cell, `None` when the cell is not a shoreline
/// candidate or no stilt template fits inside the grid.
fn cell_shoreline_quality(
    water: &Tilemap<bool>,
    water_depth: &Tilemap<i32>,
    x: usize,
    y: usize,
) -> Option<f32> {
    let radius = SHORELINE_WINDOW / 2;
    let mut total = 0usize;
    let mut wet = 0usize;
    for &is_water in water.window(x, y, radius) {
        total += 1;
        if is_water {
            wet += 1;
        }
    }

    // Need a mix of water and land
    if wet == 0 || wet == total {
        return None;
    }

    let fraction = wet as f32 / total as f32;
    let (min_fraction, max_fraction) = SHORELINE_WATER_FRACTION;
    if fraction < min_fraction || fraction > max_fraction {
        return None;
    }

    if *water.get(x, y) && *water_depth.get(x, y) > SHORELINE_MAX_DEPTH {
        return None;
    }

    let anchor_x = x as i32 - TEMPLATE_ANCHOR_OFFSET;
    let anchor_y = y as i32 - TEMPLATE_ANCHOR_OFFSET;

    STILT_TEMPLATES
        .iter()
        .filter_map(|stilts| template_water_ratio(water, anchor_x, anchor_y, stilts))
        .map(water_ratio_score)
        .reduce(f32::max)
}

/// Share of a template's stilts standing in water, `None` if any stilt
/// falls outside the grid.
fn template_water_ratio(water: &Tilemap<bool>, anchor_x: i32, anchor_y: i32, stilts: &[(i32, i32)]) -> Option<f32> {
    let mut wet = 0usize;
    for &(dy, dx) in stilts {
        if *water.try_get(anchor_x + dx, anchor_y + dy)? {
            wet += 1;
        }
    }
    Some(wet as f32 / stilts.len() as f32)
}

/// Score a water ratio: best inside the ideal band, falling off in 0.1 steps.
pub fn water_ratio_score(ratio: f32) -> f32 {
    let (low, high) = IDEAL_WATER_RATIO;
    if (low..=high).contains(&ratio) {
        1.0
    } else if (low - 0.1..low).contains(&ratio) || (ratio > high && ratio <= high + 0.1) {
        0.8
    } else if (low - 0.2..low - 0.1).contains(&ratio) || (ratio > high + 0.1 && ratio <= high + 0.2) {
        0.5
    } else {
        0.2
    }
}
