//! Settlement planning pipeline
//!
//! Runs the whole chain for one grid:
//! 1. Analyze the terrain
//! 2. Select spaced sites (no site at all is an error here)
//! 3. Generate one blueprint per site, in parallel
//! 4. Survey each footprint and adapt the stilts
//! 5. Hand every house to the renderer
//!
//! Each site draws from its own random streams, derived from the master seed
//! and the site index, so a plan does not depend on thread scheduling.

use rayon::prelude::*;
use serde::Serialize;

use crate::adaptation::{adapt_at_site, Renderer, SiteAnchor, WorldSampler};
use crate::blueprint::{generate_blueprint, Blueprint, BlueprintRequest, StyleTable};
use crate::config::PlacementParams;
use crate::error::{PlannerError, Result};
use crate::placement::{select_sites, PlacementReport, SelectedSite, TreeStatus};
use crate::seeds::PlannerSeeds;
use crate::terrain::{analyze_terrain, RawGrid};

/// One house of a plan.
#[derive(Clone, Debug, Serialize)]
pub struct PlannedHouse {
    pub index: usize,
    pub site: SelectedSite,
    pub tree_status: TreeStatus,
    pub blueprint: Blueprint,
    pub anchor: SiteAnchor,
}

/// A complete settlement plan.
#[derive(Clone, Debug, Serialize)]
pub struct SettlementPlan {
    pub seed: u64,
    pub report: PlacementReport,
    pub houses: Vec<PlannedHouse>,
}

/// Everything the pipeline needs besides the grid and the world.
pub struct SettlementPlanner<'a> {
    pub params: PlacementParams,
    pub styles: &'a StyleTable,
    pub seeds: PlannerSeeds,
    /// Applied to every house; unset fields are drawn per house
    pub request: BlueprintRequest,
}

impl<'a> SettlementPlanner<'a> {
    pub fn new(params: PlacementParams, styles: &'a StyleTable, seeds: PlannerSeeds) -> Self {
        Self {
            params,
            styles,
            seeds,
            request: BlueprintRequest::default(),
        }
    }

    pub fn with_request(mut self, request: BlueprintRequest) -> Self {
        self.request = request;
        self
    }

    /// Plan and render a settlement on `raw`.
    pub fn plan<S, R>(&self, raw: RawGrid, world: &S, renderer: &mut R) -> Result<SettlementPlan>
    where
        S: WorldSampler + ?Sized,
        R: Renderer + ?Sized,
    {
        let analysis = analyze_terrain(raw);
        let selection = select_sites(&analysis, &self.params);

        if selection.sites.is_empty() {
            return Err(PlannerError::NoViableSites {
                candidates: selection.candidates.len(),
            });
        }

        if selection.sites.len() < self.params.effective_min_houses() {
            tracing::warn!(
                found = selection.sites.len(),
                wanted = self.params.effective_min_houses(),
                "fewer sites than requested"
            );
        }

        let blueprints = selection
            .sites
            .par_iter()
            .enumerate()
            .map(|(index, _)| {
                let mut rng = self.seeds.blueprint_rng(index);
                generate_blueprint(&self.request, self.styles, &mut rng)
            })
            .collect::<Result<Vec<Blueprint>>>()?;

        let mut houses = Vec::with_capacity(blueprints.len());
        for (index, (site, mut blueprint)) in selection.sites.iter().zip(blueprints).enumerate() {
            let mut rng = self.seeds.adaptation_rng(index);
            let anchor = adapt_at_site(&mut blueprint, world, site.category, site.x, site.z, &mut rng)?;

            renderer.render(&blueprint, &anchor)?;

            tracing::info!(
                house = index + 1,
                style = blueprint.style.name(),
                size = blueprint.size.name(),
                x = anchor.x,
                z = anchor.z,
                stilt_height = anchor.stilt_height,
                "planned house"
            );

            houses.push(PlannedHouse {
                index,
                site: *site,
                tree_status: TreeStatus::from_density(site.tree_density),
                blueprint,
                anchor,
            });
        }

        Ok(SettlementPlan {
            seed: self.seeds.master,
            report: selection.report(),
            houses,
        })
    }
}

/// Renderer that only remembers what it was given.
#[derive(Default)]
pub struct RecordingRenderer {
    pub rendered: Vec<(Blueprint, SiteAnchor)>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, blueprint: &Blueprint, anchor: &SiteAnchor) -> Result<()> {
        self.rendered.push((blueprint.clone(), *anchor));
        Ok(())
    }
}
