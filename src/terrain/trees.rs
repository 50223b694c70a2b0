//! Tree density estimation from sparse samples
//!
//! The world is probed on a coarse lattice (one column per block, a few
//! heights per column). Each tree hit counts toward its block; a block with
//! `SATURATION_HITS` hits is fully forested. The blocky map is then blurred
//! so density fades out around clearings.

use rand::Rng;

use crate::tilemap::Tilemap;

/// Side of the square block one sample column represents
pub const SAMPLE_STEP: usize = 5;
/// Hits per block at which density reaches 1.0
pub const SATURATION_HITS: usize = 5;
/// Heights probed per column, `SAMPLE_STEP` apart, starting at the ground
pub const VERTICAL_SAMPLES: usize = 5;
/// Upper bound on probes for one survey
pub const MAX_PROBES: usize = 500;

const DENSITY_SIGMA: f32 = 2.0;

/// Tree hits recorded over one grid region.
#[derive(Clone, Debug, Default)]
pub struct TreeSurvey {
    pub width: usize,
    pub height: usize,
    /// Grid coordinates of every probe that found a tree block
    pub hits: Vec<(usize, usize)>,
}

impl TreeSurvey {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            hits: Vec::new(),
        }
    }

    pub fn record_hit(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.hits.push((x, y));
        }
    }

    /// Probe points for a survey: one column per block, shifted by a random
    /// offset, `VERTICAL_SAMPLES` heights per column, shuffled and capped at
    /// `MAX_PROBES`. Returned as (x, y, height above ground).
    pub fn probe_points<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Vec<(usize, usize, usize)> {
        use rand::seq::SliceRandom;

        let offset_x = rng.gen_range(0..SAMPLE_STEP);
        let offset_y = rng.gen_range(0..SAMPLE_STEP);

        let mut probes = Vec::new();
        for y in (offset_y..height).step_by(SAMPLE_STEP) {
            for x in (offset_x..width).step_by(SAMPLE_STEP) {
                for level in 0..VERTICAL_SAMPLES {
                    probes.push((x, y, level * SAMPLE_STEP));
                }
            }
        }

        probes.shuffle(rng);
        probes.truncate(MAX_PROBES);
        probes
    }
}

/// Turn a survey into a smooth density map in [0, 1].
pub fn estimate_tree_density(survey: &TreeSurvey) -> Tilemap<f32> {
    let mut density = Tilemap::new_with(survey.width, survey.height, 0.0f32);
    if density.is_empty() {
        return density;
    }

    let blocks_x = survey.width.div_ceil(SAMPLE_STEP);
    let blocks_y = survey.height.div_ceil(SAMPLE_STEP);
    let mut counts = vec![0usize; blocks_x * blocks_y];
    for &(x, y) in &survey.hits {
        counts[(y / SAMPLE_STEP) * blocks_x + x / SAMPLE_STEP] += 1;
    }

    for (x, y, value) in density.iter_mut() {
        let count = counts[(y / SAMPLE_STEP) * blocks_x + x / SAMPLE_STEP];
        *value = (count as f32 / SATURATION_HITS as f32).min(1.0);
    }

    tracing::debug!(hits = survey.hits.len(), "estimated tree density");

    density.gaussian_smooth(DENSITY_SIGMA)
}
