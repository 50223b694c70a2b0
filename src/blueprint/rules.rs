//! Per-style rule table.
//!
//! Door, bracing, decoration and roof differ per style; each style has one
//! record of rule functions. Supports, windows and furniture follow the tags
//! in the style's profile instead, so a loaded style table can remix them.

use rand::RngCore;

use super::furnishing::{
    asian_decorations, modern_decorations, nordic_decorations, traditional_decorations,
    tropical_decorations,
};
use super::layout::{
    any_wall_door, centered_door, corner_bracing, cross_bracing, full_bracing, neighbor_bracing,
    offset_door, perimeter_bracing, short_wall_door,
};
use super::roof::{a_frame_roof, flat_roof, pagoda_roof, steep_a_frame_roof, thatched_roof, RoofPlan};
use super::style::Style;
use super::{Blueprint, Brace, Decoration, Door, Materials, Support};

pub type DoorRule = fn(i32, i32, &mut dyn RngCore) -> Door;
pub type BracingRule = fn(&[Support], i32, i32, &mut dyn RngCore) -> Vec<Brace>;
pub type DecorationRule = fn(&Blueprint) -> Vec<Decoration>;
pub type RoofRule = fn(&Materials, u32, &mut dyn RngCore) -> RoofPlan;

pub struct StyleRules {
    pub door: DoorRule,
    pub bracing: BracingRule,
    pub decoration: DecorationRule,
    pub roof: RoofRule,
}

const TRADITIONAL: StyleRules = StyleRules {
    door: centered_door,
    bracing: full_bracing,
    decoration: traditional_decorations,
    roof: a_frame_roof,
};

const MODERN: StyleRules = StyleRules {
    door: offset_door,
    bracing: corner_bracing,
    decoration: modern_decorations,
    roof: flat_roof,
};

const ASIAN: StyleRules = StyleRules {
    door: centered_door,
    bracing: cross_bracing,
    decoration: asian_decorations,
    roof: pagoda_roof,
};

const TROPICAL: StyleRules = StyleRules {
    door: any_wall_door,
    bracing: neighbor_bracing,
    decoration: tropical_decorations,
    roof: thatched_roof,
};

const NORDIC: StyleRules = StyleRules {
    door: short_wall_door,
    bracing: perimeter_bracing,
    decoration: nordic_decorations,
    roof: steep_a_frame_roof,
};

impl Style {
    pub fn rules(&self) -> &'static StyleRules {
        match self {
            Style::Traditional => &TRADITIONAL,
            Style::Modern => &MODERN,
            Style::Asian => &ASIAN,
            Style::Tropical => &TROPICAL,
            Style::Nordic => &NORDIC,
        }
    }
}
