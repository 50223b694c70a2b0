//! Terrain suitability analysis
//!
//! Turns the raw arrays of a grid source into per-cell building scores:
//! - **Classification**: flat / hill / water, local slope, water depth
//! - **Suitability**: category scores, smoothing, tree penalty, normalization
//! - **Shoreline**: how well a stilt footprint straddles the water line
//! - **Trees**: density estimation from sparse tree samples
//!
//! The grid is indexed `(x, y)` = (column, row); world coordinates are
//! `origin_x + x` and `origin_z + y`.

pub mod analysis;
pub mod classify;
pub mod shoreline;
pub mod suitability;
pub mod trees;

pub use analysis::{analyze_terrain, ScoredCell, TerrainAnalysis};
pub use classify::{classify_terrain, Classification, TerrainCell, TerrainGrid};
pub use shoreline::detect_shoreline;
pub use suitability::{score_suitability, SuitabilityMaps};
pub use trees::{estimate_tree_density, TreeSurvey};

use serde::{Deserialize, Serialize};

use crate::error::{read_json, PlannerError, Result};
use crate::tilemap::Tilemap;

/// Terrain category of a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainCategory {
    #[default]
    Flat,
    Hill,
    Water,
}

impl TerrainCategory {
    pub fn all() -> &'static [Self] {
        &[Self::Flat, Self::Hill, Self::Water]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TerrainCategory::Flat => "Flat",
            TerrainCategory::Hill => "Hill",
            TerrainCategory::Water => "Water",
        }
    }
}

impl std::fmt::Display for TerrainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Raw arrays for one rectangular region, as supplied by a grid source.
#[derive(Clone, Debug)]
pub struct RawGrid {
    /// World x of column 0
    pub origin_x: i32,
    /// World z of row 0
    pub origin_z: i32,
    /// Surface height (top of water where there is water)
    pub heights: Tilemap<i32>,
    /// Height of the solid floor under any water
    pub ocean_floor: Tilemap<i32>,
    /// Tree density in [0, 1]
    pub tree_density: Tilemap<f32>,
}

impl RawGrid {
    /// Validate and assemble a grid. A missing tree density map means no trees.
    pub fn new(
        origin_x: i32,
        origin_z: i32,
        heights: Tilemap<i32>,
        ocean_floor: Tilemap<i32>,
        tree_density: Option<Tilemap<f32>>,
    ) -> Result<Self> {
        if heights.is_empty() {
            return Err(PlannerError::EmptyGrid);
        }
        let expected = (heights.width, heights.height);
        check_shape("ocean_floor", expected, &ocean_floor)?;

        let tree_density = match tree_density {
            Some(trees) => {
                check_shape("tree_density", expected, &trees)?;
                trees.map(|d| d.clamp(0.0, 1.0))
            }
            None => Tilemap::new_with(heights.width, heights.height, 0.0),
        };

        Ok(Self {
            origin_x,
            origin_z,
            heights,
            ocean_floor,
            tree_density,
        })
    }

    pub fn width(&self) -> usize {
        self.heights.width
    }

    pub fn height(&self) -> usize {
        self.heights.height
    }
}

fn check_shape<T>(what: &'static str, expected: (usize, usize), map: &Tilemap<T>) -> Result<()> {
    let found = (map.width, map.height);
    if found != expected {
        return Err(PlannerError::ShapeMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

/// Anything that can supply the raw arrays for a region.
pub trait GridSource {
    fn load(&self) -> Result<RawGrid>;
}

/// On-disk layout of a grid: row-major arrays, one inner array per row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridFile {
    #[serde(default)]
    pub origin_x: i32,
    #[serde(default)]
    pub origin_z: i32,
    pub heights: Vec<Vec<i32>>,
    pub ocean_floor: Vec<Vec<i32>>,
    #[serde(default)]
    pub tree_density: Option<Vec<Vec<f32>>>,
}

impl GridFile {
    pub fn into_raw(self) -> Result<RawGrid> {
        let heights = Tilemap::from_rows(&self.heights).ok_or(PlannerError::RaggedRows("heights"))?;
        let ocean_floor =
            Tilemap::from_rows(&self.ocean_floor).ok_or(PlannerError::RaggedRows("ocean_floor"))?;
        let tree_density = match self.tree_density {
            Some(rows) => {
                Some(Tilemap::from_rows(&rows).ok_or(PlannerError::RaggedRows("tree_density"))?)
            }
            None => None,
        };

        RawGrid::new(self.origin_x, self.origin_z, heights, ocean_floor, tree_density)
    }
}

/// Grid source reading a [`GridFile`] from JSON.
pub struct JsonGridSource {
    pub path: String,
}

impl GridSource for JsonGridSource {
    fn load(&self) -> Result<RawGrid> {
        let file: GridFile = read_json(&self.path)?;
        file.into_raw()
    }
}
