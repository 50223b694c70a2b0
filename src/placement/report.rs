//! Summary of a placement run
//!
//! Counts per tier, shoreline quality and tree cover of the accepted sites.

use serde::Serialize;

use super::{PlacementCandidate, SelectedSite, Tier};
use crate::config::{CLEAR_TREE_DENSITY, MEDIUM_TREE_DENSITY};

/// Coarse tree cover label of a site
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TreeStatus {
    Low,
    Medium,
    High,
}

impl TreeStatus {
    pub fn from_density(density: f32) -> Self {
        if density < CLEAR_TREE_DENSITY {
            TreeStatus::Low
        } else if density < MEDIUM_TREE_DENSITY {
            TreeStatus::Medium
        } else {
            TreeStatus::High
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TreeStatus::Low => "LOW",
            TreeStatus::Medium => "MEDIUM",
            TreeStatus::High => "HIGH",
        }
    }
}

impl std::fmt::Display for TreeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub candidates: usize,
    pub accepted: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacementReport {
    /// Indexed by tier number - 1
    pub tiers: [TierCount; 4],
    pub total_accepted: usize,
    /// Mean quality of accepted shoreline sites, if any
    pub average_shoreline_quality: Option<f32>,
    /// Mean tree density of accepted sites, if any
    pub average_tree_density: Option<f32>,
    /// Tree status of each accepted site, in selection order
    pub tree_status: Vec<TreeStatus>,
}

impl PlacementReport {
    pub fn new(candidates: &[PlacementCandidate], sites: &[SelectedSite]) -> Self {
        let mut tiers = [TierCount::default(); 4];
        for candidate in candidates {
            tiers[tier_index(candidate.tier)].candidates += 1;
        }
        for site in sites {
            tiers[tier_index(site.tier)].accepted += 1;
        }

        let shoreline: Vec<f32> = sites
            .iter()
            .filter(|s| s.is_shoreline)
            .map(|s| s.shoreline_quality)
            .collect();
        let densities: Vec<f32> = sites.iter().map(|s| s.tree_density).collect();

        Self {
            tiers,
            total_accepted: sites.len(),
            average_shoreline_quality: mean(&shoreline),
            average_tree_density: mean(&densities),
            tree_status: densities.iter().map(|&d| TreeStatus::from_density(d)).collect(),
        }
    }

    pub fn tier(&self, tier: Tier) -> TierCount {
        self.tiers[tier_index(tier)]
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("Placement summary:");
        for tier in Tier::all() {
            let count = self.tier(*tier);
            println!(
                "  {:<28} {:>4} accepted / {:>6} candidates",
                tier.to_string(),
                count.accepted,
                count.candidates
            );
        }
        println!("  Total sites: {}", self.total_accepted);
        if let Some(q) = self.average_shoreline_quality {
            println!("  Average shoreline quality: {:.2}", q);
        }
        if let Some(d) = self.average_tree_density {
            println!("  Average tree density: {:.2}", d);
        }
    }
}

fn tier_index(tier: Tier) -> usize {
    tier.number() as usize - 1
}

fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::SelectionPass;
    use crate::terrain::TerrainCategory;

    fn candidate(tier: Tier, tree_density: f32, quality: f32) -> PlacementCandidate {
        PlacementCandidate {
            x: 0,
            y: 64,
            z: 0,
            col: 0,
            row: 0,
            category: TerrainCategory::Flat,
            tree_density,
            is_shoreline: tier == Tier::Shoreline,
            shoreline_quality: quality,
            score: 0.8,
            boosted_score: 0.8,
            tier,
        }
    }

    fn select(candidate: PlacementCandidate) -> SelectedSite {
        SelectedSite {
            candidate,
            min_distance: 20.0,
            pass: SelectionPass::Strict,
        }
    }

    #[test]
    fn test_tree_status_thresholds() {
        assert_eq!(TreeStatus::from_density(0.05), TreeStatus::Low);
        assert_eq!(TreeStatus::from_density(0.1), TreeStatus::Medium);
        assert_eq!(TreeStatus::from_density(0.29), TreeStatus::Medium);
        assert_eq!(TreeStatus::from_density(0.3), TreeStatus::High);
    }

    #[test]
    fn test_report_counts_and_averages() {
        let candidates = vec![
            candidate(Tier::Shoreline, 0.0, 0.9),
            candidate(Tier::Shoreline, 0.0, 0.8),
            candidate(Tier::ClearFlat, 0.0, 0.1),
            candidate(Tier::TolerableTrees, 0.2, 0.0),
        ];
        let sites = vec![select(candidates[0]), select(candidates[1]), select(candidates[3])];
        let report = PlacementReport::new(&candidates, &sites);

        assert_eq!(report.tier(Tier::Shoreline), TierCount { candidates: 2, accepted: 2 });
        assert_eq!(report.tier(Tier::ClearFlat), TierCount { candidates: 1, accepted: 0 });
        assert_eq!(report.tier(Tier::ClearHill), TierCount::default());
        assert_eq!(report.total_accepted, 3);
        assert!((report.average_shoreline_quality.unwrap() - 0.85).abs() < 1e-6);
        assert!((report.average_tree_density.unwrap() - 0.2 / 3.0).abs() < 1e-6);
        assert_eq!(
            report.tree_status,
            vec![TreeStatus::Low, TreeStatus::Low, TreeStatus::Medium]
        );
    }

    #[test]
    fn test_empty_report() {
        let report = PlacementReport::new(&[], &[]);
        assert_eq!(report.total_accepted, 0);
        assert_eq!(report.average_shoreline_quality, None);
        assert_eq!(report.average_tree_density, None);
    }
}
