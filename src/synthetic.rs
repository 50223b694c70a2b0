//! Synthetic terrain for running the planner without a world
//!
//! Heights come from fractal Perlin noise around a sea level; anything below
//! sea level is flooded. Trees are scattered with a second noise field and
//! measured the same way a world scan would be, through a sparse
//! [`TreeSurvey`]. [`GridWorld`] answers world samples from the same grid.

use noise::{NoiseFn, Perlin, Seedable};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::adaptation::{GroundSample, WorldSampler};
use crate::error::Result;
use crate::terrain::{estimate_tree_density, GridSource, RawGrid, TreeSurvey};
use crate::tilemap::Tilemap;

/// Shape parameters of the synthetic terrain
#[derive(Clone, Debug)]
pub struct SyntheticParams {
    pub sea_level: i32,
    /// Mean land height relative to sea level
    pub land_bias: f64,
    /// Peak deviation from the mean, in blocks
    pub relief: f64,
    /// Noise cycles across the grid
    pub frequency: f64,
    pub octaves: u32,
    /// Tree noise above this grows trees
    pub forest_threshold: f64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            sea_level: 62,
            land_bias: 2.0,
            relief: 10.0,
            frequency: 3.0,
            octaves: 4,
            forest_threshold: 0.15,
        }
    }
}

/// Grid source producing Perlin terrain of a given size.
#[derive(Clone, Debug)]
pub struct SyntheticTerrain {
    pub width: usize,
    pub height: usize,
    pub origin_x: i32,
    pub origin_z: i32,
    pub seed: u64,
    pub params: SyntheticParams,
}

impl SyntheticTerrain {
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            origin_x: 0,
            origin_z: 0,
            seed,
            params: SyntheticParams::default(),
        }
    }

    pub fn with_origin(mut self, origin_x: i32, origin_z: i32) -> Self {
        self.origin_x = origin_x;
        self.origin_z = origin_z;
        self
    }

    /// Ground (solid floor) height of one cell.
    fn ground_height(&self, noise: &Perlin, x: usize, y: usize) -> i32 {
        let p = &self.params;
        let nx = x as f64 / self.width.max(1) as f64 * p.frequency;
        let ny = y as f64 / self.height.max(1) as f64 * p.frequency;
        let n = fbm(noise, nx, ny, p.octaves, 0.5, 2.0);
        p.sea_level + (p.land_bias + n * p.relief).round() as i32
    }

    /// Canopy height above ground, 0 where no tree grows.
    fn canopy(&self, noise: &Perlin, x: usize, y: usize) -> usize {
        let nx = x as f64 / 12.0;
        let ny = y as f64 / 12.0;
        let n = fbm(noise, nx, ny, 2, 0.5, 2.0);
        if n <= self.params.forest_threshold {
            0
        } else {
            // Denser patches grow taller, so more vertical probes hit
            ((n - self.params.forest_threshold) * 60.0) as usize
        }
    }
}

impl GridSource for SyntheticTerrain {
    fn load(&self) -> Result<RawGrid> {
        let terrain_noise = Perlin::new(1).set_seed(self.seed as u32);
        let tree_noise = Perlin::new(1).set_seed((self.seed as u32).wrapping_add(1111));
        let sea_level = self.params.sea_level;

        let ocean_floor = Tilemap::par_from_fn(self.width, self.height, |x, y| {
            self.ground_height(&terrain_noise, x, y)
        });
        let heights = ocean_floor.map(|&ground| ground.max(sea_level));

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(3333));
        let mut survey = TreeSurvey::new(self.width, self.height);
        for (x, y, level) in TreeSurvey::probe_points(self.width, self.height, &mut rng) {
            let dry = *ocean_floor.get(x, y) >= sea_level;
            if dry && self.canopy(&tree_noise, x, y) > level {
                survey.record_hit(x, y);
            }
        }
        let tree_density = estimate_tree_density(&survey);

        tracing::info!(
            width = self.width,
            height = self.height,
            seed = self.seed,
            tree_hits = survey.hits.len(),
            "generated synthetic terrain"
        );

        RawGrid::new(self.origin_x, self.origin_z, heights, ocean_floor, Some(tree_density))
    }
}

fn fbm(noise: &Perlin, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if max_value > 0.0 {
        total / max_value
    } else {
        0.0
    }
}

/// World sampler answering from a grid; positions outside it clamp to the
/// nearest edge cell.
pub struct GridWorld<'a> {
    grid: &'a RawGrid,
}

impl<'a> GridWorld<'a> {
    pub fn new(grid: &'a RawGrid) -> Self {
        Self { grid }
    }
}

impl WorldSampler for GridWorld<'_> {
    fn sample(&self, x: i32, z: i32) -> Result<GroundSample> {
        let gx = (x - self.grid.origin_x).clamp(0, self.grid.width() as i32 - 1) as usize;
        let gy = (z - self.grid.origin_z).clamp(0, self.grid.height() as i32 - 1) as usize;
        let surface = *self.grid.heights.get(gx, gy);
        let floor = *self.grid.ocean_floor.get(gx, gy);
        Ok(GroundSample {
            ground_y: floor,
            water_depth: (surface - floor).max(0) as u32,
        })
    }
}
