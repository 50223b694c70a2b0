//! Placement selection
//!
//! Promotes scored cells to candidates, buckets them into priority tiers and
//! greedily accepts well-spaced sites:
//! 1. **Shoreline**: optimal shoreline cells, score boosted by quality
//! 2. **Clear hill**: hillside without trees
//! 3. **Clear flat**: flat ground without trees
//! 4. **Tolerable trees**: anything only lightly wooded
//!
//! If spacing leaves too few houses, a second pass over the remaining
//! candidates accepts sites at a reduced distance.

pub mod report;

pub use report::{PlacementReport, TreeStatus};

use std::cmp::Ordering;

use serde::Serialize;

use crate::config::{
    PlacementParams, CLEAR_TREE_DENSITY, MIN_CANDIDATE_SUITABILITY, SHORELINE_BOOST,
    TOLERABLE_TREE_DENSITY,
};
use crate::terrain::shoreline::is_optimal_shoreline;
use crate::terrain::{TerrainAnalysis, TerrainCategory};

/// Priority bucket of a candidate, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Shoreline,
    ClearHill,
    ClearFlat,
    TolerableTrees,
}

impl Tier {
    pub fn all() -> &'static [Self] {
        &[Self::Shoreline, Self::ClearHill, Self::ClearFlat, Self::TolerableTrees]
    }

    /// 1-based tier number
    pub fn number(&self) -> u8 {
        match self {
            Tier::Shoreline => 1,
            Tier::ClearHill => 2,
            Tier::ClearFlat => 3,
            Tier::TolerableTrees => 4,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Shoreline => "Shoreline",
            Tier::ClearHill => "Clear hill",
            Tier::ClearFlat => "Clear flat",
            Tier::TolerableTrees => "Tolerable trees",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tier {} ({})", self.number(), self.display_name())
    }
}

/// A scored cell promoted to world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlacementCandidate {
    /// World x
    pub x: i32,
    /// Surface height at the cell
    pub y: i32,
    /// World z
    pub z: i32,
    /// Grid column
    pub col: usize,
    /// Grid row
    pub row: usize,
    pub category: TerrainCategory,
    pub tree_density: f32,
    pub is_shoreline: bool,
    pub shoreline_quality: f32,
    /// Post-penalty suitability
    pub score: f32,
    /// `score`, boosted by shoreline quality for shoreline sites
    pub boosted_score: f32,
    pub tier: Tier,
}

impl PlacementCandidate {
    /// Distance in the x/z plane, ignoring height.
    pub fn planar_distance(&self, other: &PlacementCandidate) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dz = (self.z - other.z) as f32;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Which selection pass accepted a site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPass {
    Strict,
    Relaxed,
}

/// A candidate accepted by the selector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SelectedSite {
    #[serde(flatten)]
    pub candidate: PlacementCandidate,
    /// Spacing in force when the site was accepted
    pub min_distance: f32,
    pub pass: SelectionPass,
}

impl std::ops::Deref for SelectedSite {
    type Target = PlacementCandidate;

    fn deref(&self) -> &PlacementCandidate {
        &self.candidate
    }
}

/// Tier for a cell, `None` when it matches no tier.
fn assign_tier(category: TerrainCategory, tree_density: f32, shoreline_quality: f32) -> Option<Tier> {
    if is_optimal_shoreline(shoreline_quality) {
        Some(Tier::Shoreline)
    } else if category == TerrainCategory::Hill && tree_density < CLEAR_TREE_DENSITY {
        Some(Tier::ClearHill)
    } else if category == TerrainCategory::Flat && tree_density < CLEAR_TREE_DENSITY {
        Some(Tier::ClearFlat)
    } else if tree_density < TOLERABLE_TREE_DENSITY {
        Some(Tier::TolerableTrees)
    } else {
        None
    }
}

/// Build the ordered candidate list: tiers 1 to 4, each sorted by its own
/// criteria, ties left in row-major order.
pub fn categorize_candidates(analysis: &TerrainAnalysis, params: &PlacementParams) -> Vec<PlacementCandidate> {
    let width = analysis.width();
    let height = analysis.height();
    let margin = params.edge_margin;

    let mut tiers: Vec<Vec<PlacementCandidate>> = vec![Vec::new(); Tier::all().len()];

    if width > 2 * margin && height > 2 * margin {
        for row in margin..height - margin {
            for col in margin..width - margin {
                let cell = analysis.scored_cell(col, row);
                if cell.suitability < MIN_CANDIDATE_SUITABILITY {
                    continue;
                }

                let Some(tier) = assign_tier(cell.category, cell.tree_density, cell.shoreline_quality) else {
                    continue;
                };

                let is_shoreline = tier == Tier::Shoreline;
                let boosted_score = if is_shoreline {
                    cell.suitability * (1.0 + cell.shoreline_quality * SHORELINE_BOOST)
                } else {
                    cell.suitability
                };

                let (x, z) = analysis.grid.world_xz(col, row);
                tiers[tier.number() as usize - 1].push(PlacementCandidate {
                    x,
                    y: cell.height,
                    z,
                    col,
                    row,
                    category: cell.category,
                    tree_density: cell.tree_density,
                    is_shoreline,
                    shoreline_quality: cell.shoreline_quality,
                    score: cell.suitability,
                    boosted_score,
                    tier,
                });
            }
        }
    }

    // sort_by is stable, so equal keys stay in row-major order
    for (tier, candidates) in Tier::all().iter().zip(tiers.iter_mut()) {
        candidates.sort_by(|a, b| compare_within_tier(*tier, a, b));
        tracing::debug!(tier = tier.number(), count = candidates.len(), "candidates");
    }

    tiers.into_iter().flatten().collect()
}

fn compare_within_tier(tier: Tier, a: &PlacementCandidate, b: &PlacementCandidate) -> Ordering {
    match tier {
        Tier::Shoreline => b
            .shoreline_quality
            .total_cmp(&a.shoreline_quality)
            .then(a.tree_density.total_cmp(&b.tree_density))
            .then(b.boosted_score.total_cmp(&a.boosted_score)),
        _ => a
            .tree_density
            .total_cmp(&b.tree_density)
            .then(b.score.total_cmp(&a.score)),
    }
}

/// Greedy spaced selection over an ordered candidate list.
///
/// Never removes an accepted site. Returns what was accepted, possibly
/// nothing.
pub fn select_from_candidates(candidates: &[PlacementCandidate], params: &PlacementParams) -> Vec<SelectedSite> {
    let max_houses = params.effective_max_houses();
    let min_houses = params.effective_min_houses();
    let strict = params.effective_min_distance();

    let mut sites: Vec<SelectedSite> = Vec::new();
    let mut accepted = vec![false; candidates.len()];

    for (i, candidate) in candidates.iter().enumerate() {
        if sites.len() >= max_houses {
            break;
        }
        if is_spaced(candidate, &sites, strict) {
            accepted[i] = true;
            sites.push(SelectedSite {
                candidate: *candidate,
                min_distance: strict,
                pass: SelectionPass::Strict,
            });
        }
    }

    if sites.len() < min_houses {
        let relaxed = params.relaxed_min_distance();
        tracing::info!(
            found = sites.len(),
            wanted = min_houses,
            min_distance = relaxed,
            "relaxing site spacing"
        );

        for (i, candidate) in candidates.iter().enumerate() {
            if sites.len() >= min_houses {
                break;
            }
            if accepted[i] {
                continue;
            }
            if is_spaced(candidate, &sites, relaxed) {
                accepted[i] = true;
                sites.push(SelectedSite {
                    candidate: *candidate,
                    min_distance: relaxed,
                    pass: SelectionPass::Relaxed,
                });
            }
        }
    }

    sites
}

fn is_spaced(candidate: &PlacementCandidate, sites: &[SelectedSite], min_distance: f32) -> bool {
    sites
        .iter()
        .all(|site| candidate.planar_distance(&site.candidate) >= min_distance)
}

/// Result of running the selector over one analysis.
#[derive(Clone, Debug)]
pub struct Selection {
    /// Every candidate, in selection order
    pub candidates: Vec<PlacementCandidate>,
    pub sites: Vec<SelectedSite>,
}

impl Selection {
    pub fn report(&self) -> PlacementReport {
        PlacementReport::new(&self.candidates, &self.sites)
    }
}

/// Categorize and select in one go.
pub fn select_sites(analysis: &TerrainAnalysis, params: &PlacementParams) -> Selection {
    let candidates = categorize_candidates(analysis, params);
    let sites = select_from_candidates(&candidates, params);

    tracing::info!(
        candidates = candidates.len(),
        selected = sites.len(),
        "placement selection done"
    );

    Selection { candidates, sites }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OPTIMAL_SHORELINE_QUALITY;
    use crate::terrain::{analyze_terrain, RawGrid};
    use crate::tilemap::Tilemap;

    fn flat_grid(width: usize, height: usize, trees: f32) -> TerrainAnalysis {
        let heights = Tilemap::new_with(width, height, 64);
        let floor = heights.clone();
        let trees = Tilemap::new_with(width, height, trees);
        analyze_terrain(RawGrid::new(0, 0, heights, floor, Some(trees)).unwrap())
    }

    fn half_water_grid() -> TerrainAnalysis {
        let heights = Tilemap::new_with(10, 10, 62);
        let floor = Tilemap::from_fn(10, 10, |x, _| if x < 5 { 60 } else { 62 });
        analyze_terrain(RawGrid::new(0, 0, heights, floor, None).unwrap())
    }

    fn assert_spacing(sites: &[SelectedSite]) {
        for (i, later) in sites.iter().enumerate() {
            for earlier in &sites[..i] {
                assert!(
                    later.planar_distance(&earlier.candidate) >= later.min_distance,
                    "sites {:?} and {:?} too close",
                    (later.x, later.z),
                    (earlier.x, earlier.z)
                );
            }
        }
    }

    #[test]
    fn test_tier_assignment_order() {
        assert_eq!(assign_tier(TerrainCategory::Water, 0.5, 0.9), Some(Tier::Shoreline));
        assert_eq!(assign_tier(TerrainCategory::Hill, 0.05, 0.2), Some(Tier::ClearHill));
        assert_eq!(assign_tier(TerrainCategory::Flat, 0.0, 0.7), Some(Tier::ClearFlat));
        assert_eq!(assign_tier(TerrainCategory::Flat, 0.2, 0.0), Some(Tier::TolerableTrees));
        assert_eq!(assign_tier(TerrainCategory::Water, 0.0, 0.0), Some(Tier::TolerableTrees));
        assert_eq!(assign_tier(TerrainCategory::Hill, 0.3, 0.0), None);
    }

    #[test]
    fn test_half_water_grid_selects_shoreline_site() {
        let analysis = half_water_grid();
        let params = PlacementParams {
            min_houses: 1,
            ..Default::default()
        };
        let selection = select_sites(&analysis, &params);

        assert!(!selection.sites.is_empty());
        let first = &selection.sites[0];
        assert_eq!(first.tier, Tier::Shoreline);
        assert!(first.is_shoreline);
        assert!(first.shoreline_quality > OPTIMAL_SHORELINE_QUALITY);
        assert!(first.boosted_score > first.score);
    }

    #[test]
    fn test_dense_forest_has_no_sites() {
        let analysis = flat_grid(10, 10, 0.9);
        let selection = select_sites(&analysis, &PlacementParams::default());
        assert!(selection.candidates.is_empty());
        assert!(selection.sites.is_empty());
    }

    #[test]
    fn test_candidates_respect_edge_margin() {
        let analysis = flat_grid(12, 12, 0.0);
        let params = PlacementParams {
            edge_margin: 3,
            ..Default::default()
        };
        let candidates = categorize_candidates(&analysis, &params);
        assert_eq!(candidates.len(), 6 * 6);
        for c in &candidates {
            assert!((3..9).contains(&c.col) && (3..9).contains(&c.row));
        }

        // Margin swallowing the whole grid leaves nothing
        let params = PlacementParams {
            edge_margin: 6,
            ..Default::default()
        };
        assert!(categorize_candidates(&analysis, &params).is_empty());
    }

    #[test]
    fn test_ties_keep_row_major_order() {
        let analysis = flat_grid(8, 8, 0.0);
        let candidates = categorize_candidates(&analysis, &PlacementParams::default());
        let order: Vec<(usize, usize)> = candidates.iter().map(|c| (c.row, c.col)).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_relaxed_pass_fills_up() {
        let analysis = flat_grid(30, 30, 0.0);
        let params = PlacementParams {
            min_houses: 6,
            max_houses: 6,
            min_distance: 20.0,
            edge_margin: 2,
        };
        let selection = select_sites(&analysis, &params);
        let sites = &selection.sites;

        let strict = sites.iter().filter(|s| s.pass == SelectionPass::Strict).count();
        assert_eq!(strict, 4);
        assert!(sites.len() > strict);
        for site in sites.iter().filter(|s| s.pass == SelectionPass::Relaxed) {
            assert!((site.min_distance - 14.0).abs() < 1e-4);
        }
        // Strict sites come first
        assert!(sites[..strict].iter().all(|s| s.pass == SelectionPass::Strict));
        assert_spacing(sites);
    }

    #[test]
    fn test_house_cap() {
        let analysis = flat_grid(200, 200, 0.0);
        let params = PlacementParams {
            min_houses: 100,
            max_houses: 100,
            min_distance: 20.0,
            edge_margin: 2,
        };
        let selection = select_sites(&analysis, &params);
        assert_eq!(selection.sites.len(), 25);
        assert!(selection.sites.iter().all(|s| s.pass == SelectionPass::Strict));
        assert_spacing(&selection.sites);
    }

    #[test]
    fn test_tiers_precede_in_selection_order() {
        // Shoreline on the left, lightly wooded flat land on the right
        let width = 60;
        let height = 40;
        let heights = Tilemap::new_with(width, height, 62);
        let floor = Tilemap::from_fn(width, height, |x, _| if x < 5 { 60 } else { 62 });
        let trees = Tilemap::from_fn(width, height, |x, _| if x > 30 { 0.15 } else { 0.0 });
        let analysis = analyze_terrain(RawGrid::new(0, 0, heights, floor, Some(trees)).unwrap());

        let params = PlacementParams {
            min_houses: 1,
            max_houses: 25,
            ..Default::default()
        };
        let selection = select_sites(&analysis, &params);

        for pair in selection.candidates.windows(2) {
            assert!(pair[0].tier <= pair[1].tier);
        }
        for pair in selection.sites.windows(2) {
            assert!(pair[0].tier <= pair[1].tier);
        }
        assert_eq!(selection.sites[0].tier, Tier::Shoreline);
        assert_spacing(&selection.sites);
    }
}
