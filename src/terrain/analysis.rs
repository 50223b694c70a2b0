//! Full terrain analysis of one grid: classification, suitability and
//! shoreline quality, computed once and kept together.

use serde::Serialize;

use super::{detect_shoreline, score_suitability, RawGrid, SuitabilityMaps, TerrainCategory, TerrainCell, TerrainGrid};
use crate::tilemap::Tilemap;

/// Analysis result for one grid. Immutable once built.
#[derive(Clone, Debug)]
pub struct TerrainAnalysis {
    pub grid: TerrainGrid,
    pub suitability: SuitabilityMaps,
    /// Smoothed shoreline quality in [0, 1]
    pub shoreline: Tilemap<f32>,
}

/// A grid cell together with its scores.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScoredCell {
    pub x: usize,
    pub y: usize,
    pub height: i32,
    pub category: TerrainCategory,
    pub slope: f32,
    pub water_depth: i32,
    pub tree_density: f32,
    /// Post-penalty suitability, re-normalized
    pub suitability: f32,
    pub shoreline_quality: f32,
}

impl TerrainAnalysis {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn cell(&self, x: usize, y: usize) -> TerrainCell {
        self.grid.cell(x, y)
    }

    pub fn scored_cell(&self, x: usize, y: usize) -> ScoredCell {
        let cell = self.grid.cell(x, y);
        ScoredCell {
            x,
            y,
            height: cell.height,
            category: cell.category,
            slope: cell.slope,
            water_depth: cell.water_depth,
            tree_density: cell.tree_density,
            suitability: *self.suitability.suitability.get(x, y),
            shoreline_quality: *self.shoreline.get(x, y),
        }
    }
}

/// Classify, score and shoreline-test a grid.
pub fn analyze_terrain(raw: RawGrid) -> TerrainAnalysis {
    tracing::info!(width = raw.width(), height = raw.height(), "analyzing terrain");

    let grid = TerrainGrid::new(raw);
    let classification = &grid.classification;

    tracing::debug!(
        flat = classification.count(TerrainCategory::Flat),
        hill = classification.count(TerrainCategory::Hill),
        water = classification.count(TerrainCategory::Water),
        "classified cells"
    );

    let suitability = score_suitability(classification, &grid.raw.tree_density);
    let shoreline = detect_shoreline(classification);

    TerrainAnalysis {
        grid,
        suitability,
        shoreline,
    }
}
