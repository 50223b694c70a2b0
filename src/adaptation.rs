//! Terrain adaptation
//!
//! Fits a generated blueprint to the ground at its site. The footprint is
//! surveyed at its four corners and center through a [`WorldSampler`]; the
//! spread of ground heights (or the water depth) then decides how tall the
//! stilts must be. The adapted house is handed to a [`Renderer`].

use rand::Rng;
use serde::Serialize;

use crate::blueprint::{Blueprint, Style};
use crate::config::MAX_STILT_HEIGHT;
use crate::error::Result;
use crate::terrain::TerrainCategory;

/// Differential assumed for a water site where no water was sampled.
/// Gives a stilt height of 8.
pub const DEFAULT_WATER_DIFFERENTIAL: u32 = 7;

/// What the world looks like at one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GroundSample {
    /// Height of the first solid block, under any water
    pub ground_y: i32,
    /// Water blocks above the ground; 0 on dry land
    pub water_depth: u32,
}

impl GroundSample {
    pub fn is_water(&self) -> bool {
        self.water_depth > 0
    }
}

/// Read access to the world, used only after sites are chosen.
pub trait WorldSampler {
    fn sample(&self, x: i32, z: i32) -> Result<GroundSample>;
}

/// Places the blocks of an adapted house.
pub trait Renderer {
    fn render(&mut self, blueprint: &Blueprint, anchor: &SiteAnchor) -> Result<()>;
}

/// Result of surveying one footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FootprintSurvey {
    /// Lowest ground height found
    pub ground_y: i32,
    /// Height differential for stilt sizing
    pub differential: u32,
    pub water_samples: usize,
}

/// Where and how high a house stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SiteAnchor {
    pub x: i32,
    pub ground_y: i32,
    pub z: i32,
    pub stilt_height: u32,
    pub floor_level: i32,
}

/// The five probe points of a footprint whose north-west corner is (x, z).
pub fn survey_points(x: i32, z: i32, width: i32, length: i32) -> [(i32, i32); 5] {
    [
        (x, z),
        (x + width - 1, z),
        (x, z + length - 1),
        (x + width - 1, z + length - 1),
        (x + width / 2, z + length / 2),
    ]
}

/// Sample the footprint and derive the ground anchor and differential.
///
/// Dry samples decide the anchor and the height spread; when every sample
/// is wet the floors under the water are used instead. On water sites the
/// differential is the mean sampled water depth.
pub fn survey_footprint<S: WorldSampler + ?Sized>(
    sampler: &S,
    category: TerrainCategory,
    x: i32,
    z: i32,
    width: i32,
    length: i32,
) -> Result<FootprintSurvey> {
    let mut samples = Vec::with_capacity(5);
    for (sx, sz) in survey_points(x, z, width, length) {
        samples.push(sampler.sample(sx, sz)?);
    }

    let dry: Vec<i32> = samples.iter().filter(|s| !s.is_water()).map(|s| s.ground_y).collect();
    let ground: Vec<i32> = if dry.is_empty() {
        samples.iter().map(|s| s.ground_y).collect()
    } else {
        dry
    };

    let min_y = ground.iter().copied().min().unwrap_or(0);
    let max_y = ground.iter().copied().max().unwrap_or(0);

    let wet: Vec<u32> = samples.iter().filter(|s| s.is_water()).map(|s| s.water_depth).collect();

    let differential = match category {
        TerrainCategory::Water => {
            if wet.is_empty() {
                DEFAULT_WATER_DIFFERENTIAL
            } else {
                (wet.iter().map(|&d| d as u64).sum::<u64>() / wet.len() as u64) as u32
            }
        }
        _ => (max_y - min_y).max(0) as u32,
    };

    Ok(FootprintSurvey {
        ground_y: min_y,
        differential,
        water_samples: wet.len(),
    })
}

/// Stilt height for a style on a terrain category and height differential.
pub fn stilt_height_for<R: Rng + ?Sized>(style: Style, category: TerrainCategory, differential: u32, rng: &mut R) -> u32 {
    match category {
        TerrainCategory::Water => {
            let mut height = differential.saturating_add(1).max(8).min(MAX_STILT_HEIGHT);
            if style == Style::Tropical {
                height = (height + 1).min(MAX_STILT_HEIGHT);
            }
            height
        }
        TerrainCategory::Hill => {
            let height = if differential > 3 {
                differential.max(6).min(MAX_STILT_HEIGHT)
            } else {
                differential.saturating_add(1).max(4).min(MAX_STILT_HEIGHT)
            };
            if style == Style::Nordic {
                height.saturating_sub(1).max(2)
            } else {
                height
            }
        }
        TerrainCategory::Flat => match style {
            Style::Nordic => rng.gen_range(1..=2),
            Style::Asian => 4,
            _ => rng.gen_range(3..=4),
        },
    }
}

/// Set the blueprint's stilt height for its terrain. Returns the height.
pub fn adapt_to_terrain<R: Rng + ?Sized>(
    blueprint: &mut Blueprint,
    category: TerrainCategory,
    differential: u32,
    rng: &mut R,
) -> u32 {
    let height = stilt_height_for(blueprint.style, category, differential, rng);
    blueprint.stilt_height = height;
    height
}

/// Survey, adapt and anchor one house at (x, z).
pub fn adapt_at_site<S: WorldSampler + ?Sized, R: Rng + ?Sized>(
    blueprint: &mut Blueprint,
    sampler: &S,
    category: TerrainCategory,
    x: i32,
    z: i32,
    rng: &mut R,
) -> Result<SiteAnchor> {
    let survey = survey_footprint(sampler, category, x, z, blueprint.width, blueprint.length)?;
    let stilt_height = adapt_to_terrain(blueprint, category, survey.differential, rng);

    tracing::debug!(
        x,
        z,
        category = category.display_name(),
        differential = survey.differential,
        stilt_height,
        "adapted house to terrain"
    );

    Ok(SiteAnchor {
        x,
        ground_y: survey.ground_y,
        z,
        stilt_height,
        floor_level: survey.ground_y + stilt_height as i32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{generate_blueprint, BlueprintRequest, SizeClass, StyleTable};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Ground sloping along x, water west of `shore_x`.
    struct SlopedShore {
        shore_x: i32,
        depth: u32,
    }

    impl WorldSampler for SlopedShore {
        fn sample(&self, x: i32, _z: i32) -> Result<GroundSample> {
            Ok(GroundSample {
                ground_y: 60 + x / 2,
                water_depth: if x < self.shore_x { self.depth } else { 0 },
            })
        }
    }

    #[test]
    fn test_stilt_height_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for &style in Style::all() {
            for &category in TerrainCategory::all() {
                for diff in [0, 1, 3, 4, 7, 14, 15, 40, u32::MAX / 2, u32::MAX] {
                    let h = stilt_height_for(style, category, diff, &mut rng);
                    assert!(h > 0 && h <= MAX_STILT_HEIGHT, "{:?} {:?} {} -> {}", style, category, diff, h);
                }
            }
        }
    }

    #[test]
    fn test_water_and_hill_rules() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(stilt_height_for(Style::Traditional, TerrainCategory::Water, 7, &mut rng), 8);
        assert_eq!(stilt_height_for(Style::Traditional, TerrainCategory::Water, 10, &mut rng), 11);
        assert_eq!(stilt_height_for(Style::Tropical, TerrainCategory::Water, 2, &mut rng), 9);
        assert_eq!(stilt_height_for(Style::Tropical, TerrainCategory::Water, 20, &mut rng), 15);

        assert_eq!(stilt_height_for(Style::Modern, TerrainCategory::Hill, 2, &mut rng), 4);
        assert_eq!(stilt_height_for(Style::Modern, TerrainCategory::Hill, 5, &mut rng), 6);
        assert_eq!(stilt_height_for(Style::Modern, TerrainCategory::Hill, 9, &mut rng), 9);
        assert_eq!(stilt_height_for(Style::Nordic, TerrainCategory::Hill, 2, &mut rng), 3);
    }

    #[test]
    fn test_flat_rules() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            assert!((1..=2).contains(&stilt_height_for(Style::Nordic, TerrainCategory::Flat, 0, &mut rng)));
            assert_eq!(stilt_height_for(Style::Asian, TerrainCategory::Flat, 0, &mut rng), 4);
            assert!((3..=4).contains(&stilt_height_for(Style::Modern, TerrainCategory::Flat, 0, &mut rng)));
        }
    }

    #[test]
    fn test_survey_on_dry_slope() {
        let sampler = SlopedShore { shore_x: -100, depth: 0 };
        let survey = survey_footprint(&sampler, TerrainCategory::Hill, 10, 0, 9, 8).unwrap();
        assert_eq!(survey.ground_y, 65);
        assert_eq!(survey.differential, 4);
        assert_eq!(survey.water_samples, 0);
    }

    #[test]
    fn test_survey_on_water() {
        let sampler = SlopedShore { shore_x: 4, depth: 3 };
        let survey = survey_footprint(&sampler, TerrainCategory::Water, 0, 0, 8, 8).unwrap();
        // Corners at x = 0 are wet, x = 7 and the center are dry
        assert_eq!(survey.water_samples, 2);
        assert_eq!(survey.differential, 3);
        assert_eq!(survey.ground_y, 62);

        // No water found: historical default
        let dry = SlopedShore { shore_x: -100, depth: 0 };
        let survey = survey_footprint(&dry, TerrainCategory::Water, 0, 0, 8, 8).unwrap();
        assert_eq!(survey.differential, DEFAULT_WATER_DIFFERENTIAL);
    }

    #[test]
    fn test_adapt_at_site_sets_anchor() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let request = BlueprintRequest {
            style: Some(Style::Traditional),
            size: Some(SizeClass::Medium),
            wood: None,
        };
        let mut bp = generate_blueprint(&request, &StyleTable::builtin(), &mut rng).unwrap();
        assert_eq!(bp.stilt_height, 0);

        let sampler = SlopedShore { shore_x: 1000, depth: 2 };
        let anchor = adapt_at_site(&mut bp, &sampler, TerrainCategory::Water, 0, 0, &mut rng).unwrap();
        assert_eq!(anchor.stilt_height, 8);
        assert_eq!(bp.stilt_height, 8);
        assert_eq!(anchor.floor_level, anchor.ground_y + 8);
    }
}
