//! Planner configuration and the shared analysis constants.
//!
//! The thresholds below are read by the scorer, the shoreline detector and
//! the placement selector alike; they are defined here once.

use serde::{Deserialize, Serialize};

use crate::error::{read_json, Result};

// =============================================================================
// TERRAIN CLASSIFICATION
// =============================================================================

/// Neighborhood standard deviation above which land counts as a hill.
pub const HILL_SLOPE_THRESHOLD: f32 = 1.5;
/// Upper bound (exclusive) of the ideal hillside slope band.
pub const IDEAL_HILL_SLOPE_MAX: f32 = 3.0;

// =============================================================================
// SUITABILITY
// =============================================================================

/// Deepest water still scored as buildable during analysis.
pub const ANALYSIS_MAX_STILT_HEIGHT: i32 = 5;

pub const FLAT_SCORE: f32 = 0.6;
pub const HILL_IDEAL_SCORE: f32 = 0.9;
pub const HILL_GENTLE_SCORE: f32 = 0.7;
pub const HILL_STEEP_SCORE: f32 = 0.5;
pub const SHALLOW_WATER_SCORE: f32 = 0.8;
pub const DEEP_WATER_SCORE: f32 = 0.3;

/// Sigma of the gaussian applied to the suitability and shoreline maps.
pub const SMOOTHING_SIGMA: f32 = 1.0;

/// Tree penalty tiers as (density strictly above, multiplier), densest first.
pub const TREE_PENALTY_TIERS: [(f32, f32); 3] = [(0.7, 0.1), (0.4, 0.3), (0.2, 0.6)];

// =============================================================================
// SHORELINE
// =============================================================================

/// Side of the square water-mask window inspected around each cell.
pub const SHORELINE_WINDOW: usize = 11;
/// Accepted share of water cells in the window (inclusive).
pub const SHORELINE_WATER_FRACTION: (f32, f32) = (0.10, 0.70);
/// Water cells deeper than this are never shoreline sites.
pub const SHORELINE_MAX_DEPTH: i32 = 3;
/// Quality above which a cell is an optimal shoreline site.
pub const OPTIMAL_SHORELINE_QUALITY: f32 = 0.7;
/// Share of supports standing in water that makes an ideal shoreline house.
pub const IDEAL_WATER_RATIO: (f32, f32) = (0.3, 0.5);

// =============================================================================
// PLACEMENT
// =============================================================================

/// Cells below this suitability are never candidates.
pub const MIN_CANDIDATE_SUITABILITY: f32 = 0.3;
/// Tree density below which a cell counts as clear.
pub const CLEAR_TREE_DENSITY: f32 = 0.1;
/// Tree density below which a wooded cell is still tolerable.
pub const TOLERABLE_TREE_DENSITY: f32 = 0.25;
/// Tree density below which a site is reported as MEDIUM rather than HIGH.
pub const MEDIUM_TREE_DENSITY: f32 = 0.3;
/// Multiplier applied to shoreline quality when boosting a shoreline score.
pub const SHORELINE_BOOST: f32 = 2.0;
/// Spacing can never be configured below this.
pub const MIN_DISTANCE_FLOOR: f32 = 20.0;
/// No plan ever holds more sites than this.
pub const MAX_HOUSES_CAP: usize = 25;
/// Spacing factor used by the relaxed second pass.
pub const RELAXED_DISTANCE_FACTOR: f32 = 0.7;

// =============================================================================
// BLUEPRINTS
// =============================================================================

/// Tallest stilt any blueprint may be given.
pub const MAX_STILT_HEIGHT: u32 = 15;

/// Limits for the placement selector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementParams {
    /// Houses the selector tries to reach, relaxing spacing if needed
    pub min_houses: usize,
    /// Houses at which selection stops
    pub max_houses: usize,
    /// Minimum planar distance between sites
    pub min_distance: f32,
    /// Cells closer than this to any grid edge are never candidates
    pub edge_margin: usize,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            min_houses: 10,
            max_houses: 10,
            min_distance: MIN_DISTANCE_FLOOR,
            edge_margin: 2,
        }
    }
}

impl PlacementParams {
    /// Houses at which selection stops, capped.
    pub fn effective_max_houses(&self) -> usize {
        self.max_houses.min(MAX_HOUSES_CAP)
    }

    /// Target for the relaxed pass; never above the cap on houses.
    pub fn effective_min_houses(&self) -> usize {
        self.min_houses.min(self.effective_max_houses())
    }

    /// Spacing for the strict pass, floored.
    pub fn effective_min_distance(&self) -> f32 {
        self.min_distance.max(MIN_DISTANCE_FLOOR)
    }

    pub fn relaxed_min_distance(&self) -> f32 {
        self.effective_min_distance() * RELAXED_DISTANCE_FACTOR
    }
}

/// Top-level planner configuration, loadable from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub placement: PlacementParams,
    /// Master seed; random when absent
    pub seed: Option<u64>,
}

impl PlannerConfig {
    pub fn from_json_file(path: &str) -> Result<Self> {
        read_json(path)
    }
}
