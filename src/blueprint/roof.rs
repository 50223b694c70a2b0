//! Roof plans.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::style::WoodType;
use super::Materials;

/// Roof type and its parameters. Serialized with a `type` tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoofPlan {
    AFrame {
        material: String,
        overhang: u32,
    },
    Flat {
        material: String,
        overhang: u32,
        has_railing: bool,
    },
    Pagoda {
        material: String,
        overhang: u32,
        upturned_edges: bool,
    },
    Thatched {
        material: String,
        overhang: u32,
    },
    SteepAFrame {
        material: String,
        overhang: u32,
        snow_covered: bool,
    },
}

impl RoofPlan {
    pub fn type_name(&self) -> &'static str {
        match self {
            RoofPlan::AFrame { .. } => "a_frame",
            RoofPlan::Flat { .. } => "flat",
            RoofPlan::Pagoda { .. } => "pagoda",
            RoofPlan::Thatched { .. } => "thatched",
            RoofPlan::SteepAFrame { .. } => "steep_a_frame",
        }
    }

    pub fn material(&self) -> &str {
        match self {
            RoofPlan::AFrame { material, .. }
            | RoofPlan::Flat { material, .. }
            | RoofPlan::Pagoda { material, .. }
            | RoofPlan::Thatched { material, .. }
            | RoofPlan::SteepAFrame { material, .. } => material,
        }
    }

    pub fn overhang(&self) -> u32 {
        match self {
            RoofPlan::AFrame { overhang, .. }
            | RoofPlan::Flat { overhang, .. }
            | RoofPlan::Pagoda { overhang, .. }
            | RoofPlan::Thatched { overhang, .. }
            | RoofPlan::SteepAFrame { overhang, .. } => *overhang,
        }
    }
}

pub fn a_frame_roof(materials: &Materials, overhang: u32, _rng: &mut dyn RngCore) -> RoofPlan {
    RoofPlan::AFrame {
        material: materials.palette.planks.clone(),
        overhang,
    }
}

pub fn flat_roof(materials: &Materials, overhang: u32, _rng: &mut dyn RngCore) -> RoofPlan {
    RoofPlan::Flat {
        material: materials.secondary.clone(),
        overhang,
        has_railing: true,
    }
}

pub fn pagoda_roof(materials: &Materials, overhang: u32, _rng: &mut dyn RngCore) -> RoofPlan {
    RoofPlan::Pagoda {
        material: materials.palette.stairs.clone(),
        overhang,
        upturned_edges: true,
    }
}

/// Leaf thatch; jungle houses use oak leaves so the roof contrasts.
pub fn thatched_roof(materials: &Materials, overhang: u32, _rng: &mut dyn RngCore) -> RoofPlan {
    let material = if materials.wood == WoodType::Jungle {
        "oak_leaves"
    } else {
        "jungle_leaves"
    };
    RoofPlan::Thatched {
        material: material.to_string(),
        overhang,
    }
}

pub fn steep_a_frame_roof(materials: &Materials, overhang: u32, rng: &mut dyn RngCore) -> RoofPlan {
    RoofPlan::SteepAFrame {
        material: materials.palette.planks.clone(),
        overhang,
        snow_covered: rng.gen_bool(0.5),
    }
}
