//! Per-cell terrain classification
//!
//! Water wherever the surface sits above the ocean floor; otherwise hill or
//! flat depending on how much the surrounding 3x3 heights spread.

use super::{RawGrid, TerrainCategory};
use crate::config::HILL_SLOPE_THRESHOLD;
use crate::tilemap::Tilemap;

/// Derived per-cell fields, computed once per grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub category: Tilemap<TerrainCategory>,
    /// Standard deviation of the clipped 3x3 height neighborhood
    pub slope: Tilemap<f32>,
    /// Surface height minus ocean floor, never negative
    pub water_depth: Tilemap<i32>,
}

impl Classification {
    pub fn is_water(&self, x: usize, y: usize) -> bool {
        *self.category.get(x, y) == TerrainCategory::Water
    }

    /// Boolean water mask
    pub fn water_mask(&self) -> Tilemap<bool> {
        self.category.map(|c| *c == TerrainCategory::Water)
    }

    pub fn count(&self, category: TerrainCategory) -> usize {
        self.category.iter().filter(|(_, _, c)| **c == category).count()
    }
}

/// One grid cell with its raw and derived fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainCell {
    pub height: i32,
    pub ocean_floor: i32,
    pub tree_density: f32,
    pub category: TerrainCategory,
    pub slope: f32,
    pub water_depth: i32,
}

/// Raw arrays plus their cached classification.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    pub raw: RawGrid,
    pub classification: Classification,
}

impl TerrainGrid {
    /// Classify `raw` and keep both together.
    pub fn new(raw: RawGrid) -> Self {
        let classification = classify_terrain(&raw.heights, &raw.ocean_floor);
        Self { raw, classification }
    }

    pub fn width(&self) -> usize {
        self.raw.width()
    }

    pub fn height(&self) -> usize {
        self.raw.height()
    }

    pub fn cell(&self, x: usize, y: usize) -> TerrainCell {
        TerrainCell {
            height: *self.raw.heights.get(x, y),
            ocean_floor: *self.raw.ocean_floor.get(x, y),
            tree_density: *self.raw.tree_density.get(x, y),
            category: *self.classification.category.get(x, y),
            slope: *self.classification.slope.get(x, y),
            water_depth: *self.classification.water_depth.get(x, y),
        }
    }

    /// World (x, z) of a grid cell.
    pub fn world_xz(&self, x: usize, y: usize) -> (i32, i32) {
        (self.raw.origin_x + x as i32, self.raw.origin_z + y as i32)
    }
}

/// Classify every cell of a height / ocean-floor pair of equal shape.
///
/// Rows are processed in parallel; the result does not depend on order.
pub fn classify_terrain(heights: &Tilemap<i32>, ocean_floor: &Tilemap<i32>) -> Classification {
    debug_assert!(heights.same_shape(ocean_floor));
    let width = heights.width;
    let height = heights.height;

    let water_depth = Tilemap::par_from_fn(width, height, |x, y| {
        (*heights.get(x, y) - *ocean_floor.get(x, y)).max(0)
    });

    let slope = Tilemap::par_from_fn(width, height, |x, y| local_slope(heights, x, y));

    let category = Tilemap::par_from_fn(width, height, |x, y| {
        if *water_depth.get(x, y) > 0 {
            TerrainCategory::Water
        } else if *slope.get(x, y) > HILL_SLOPE_THRESHOLD {
            TerrainCategory::Hill
        } else {
            TerrainCategory::Flat
        }
    });

    Classification {
        category,
        slope,
        water_depth,
    }
}

/// Population standard deviation of the 3x3 neighborhood, clipped at edges.
fn local_slope(heights: &Tilemap<i32>, x: usize, y: usize) -> f32 {
    let mut count = 0usize;
    let mut sum = 0.0f64;
    for &h in heights.window(x, y, 1) {
        sum += h as f64;
        count += 1;
    }
    if count <= 1 {
        return 0.0;
    }

    let mean = sum / count as f64;
    let variance = heights
        .window(x, y, 1)
        .map(|&h| {
            let d = h as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / count as f64;

    variance.sqrt() as f32
}
