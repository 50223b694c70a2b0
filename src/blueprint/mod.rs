//! Procedural stilt house blueprints
//!
//! A blueprint is a complete description of one house, independent of where
//! it will stand:
//! - **Materials**: wood palette and a secondary material from the style
//! - **Footprint**: width, length, wall height and a shape variant
//! - **Structure**: support pillars and cross braces
//! - **Openings**: door and windows
//! - **Interior**: furniture and decoration
//! - **Roof**: type and parameters
//!
//! Positions are (x, z) offsets from the north-west floor corner, x along the
//! width and z along the length. Everything is drawn from the injected random
//! source; the stilt height stays 0 until the house is adapted to terrain.

pub mod furnishing;
pub mod layout;
pub mod openings;
pub mod roof;
pub mod rules;
pub mod shape;
pub mod style;

pub use roof::RoofPlan;
pub use shape::{Corner, Cutout, ShapeVariant, Wall, WallOffset};
pub use style::{
    FurnitureTheme, SizeClass, Style, StyleProfile, StyleTable, SupportPattern, WindowStyle,
    WoodPalette, WoodType,
};

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Compass direction something faces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    North,
    South,
    East,
    West,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    pub x: i32,
    pub z: i32,
}

impl Support {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BraceOrientation {
    /// Runs along x between supports sharing a z
    HorizontalX,
    /// Runs along z between supports sharing an x
    HorizontalZ,
    Diagonal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brace {
    pub x: i32,
    pub z: i32,
    pub orientation: BraceOrientation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub x: i32,
    pub z: i32,
    pub facing: Facing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub x: i32,
    pub z: i32,
    /// 1 for the ground tier, 2 above it
    pub tier: u8,
}

impl Window {
    pub fn new(x: i32, z: i32, tier: u8) -> Self {
        Self { x, z, tier }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Furniture {
    pub kind: String,
    pub x: i32,
    pub z: i32,
    pub facing: Option<Facing>,
}

impl Furniture {
    pub fn plain(kind: &str, x: i32, z: i32) -> Self {
        Self {
            kind: kind.to_string(),
            x,
            z,
            facing: None,
        }
    }

    pub fn facing(kind: &str, x: i32, z: i32, facing: Facing) -> Self {
        Self {
            kind: kind.to_string(),
            x,
            z,
            facing: Some(facing),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationPlacement {
    Window,
    Hanging,
    Railing,
    Ceiling,
    Wall,
    Floor,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub kind: String,
    pub x: i32,
    pub z: i32,
    pub placement: DecorationPlacement,
}

impl Decoration {
    pub fn new(kind: &str, x: i32, z: i32, placement: DecorationPlacement) -> Self {
        Self {
            kind: kind.to_string(),
            x,
            z,
            placement,
        }
    }
}

/// Block materials of one house
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Materials {
    pub wood: WoodType,
    pub palette: WoodPalette,
    pub secondary: String,
}

/// Complete description of one stilt house.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub style: Style,
    pub size: SizeClass,
    pub materials: Materials,
    pub width: i32,
    pub height: i32,
    pub length: i32,
    pub shape: ShapeVariant,
    pub supports: Vec<Support>,
    pub braces: Vec<Brace>,
    pub door: Door,
    pub windows: Vec<Window>,
    pub furniture: Vec<Furniture>,
    pub decorations: Vec<Decoration>,
    pub roof: RoofPlan,
    /// Set once by terrain adaptation
    pub stilt_height: u32,
}

impl Blueprint {
    /// Whether (x, z) is part of the floor: inside width x length and not in
    /// an L-shape cutout.
    pub fn is_footprint_cell(&self, x: i32, z: i32) -> bool {
        if x < 0 || z < 0 || x >= self.width || z >= self.length {
            return false;
        }
        match self.shape.cutout() {
            Some(cutout) => !cutout.contains(x, z, self.width, self.length),
            None => true,
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!(
            "{} {} stilt house ({} wood, {})",
            self.size,
            self.style,
            self.materials.wood,
            self.materials.secondary
        );
        println!(
            "  Footprint: {}x{} (height {}), shape {}",
            self.width,
            self.length,
            self.height,
            self.shape.name()
        );
        println!(
            "  Supports: {}  Braces: {}  Windows: {}",
            self.supports.len(),
            self.braces.len(),
            self.windows.len()
        );
        println!(
            "  Door: ({}, {}) facing {:?}",
            self.door.x, self.door.z, self.door.facing
        );
        println!(
            "  Furniture: {}  Decorations: {}",
            self.furniture.len(),
            self.decorations.len()
        );
        println!(
            "  Roof: {} ({}, overhang {})",
            self.roof.type_name(),
            self.roof.material(),
            self.roof.overhang()
        );
        if self.stilt_height > 0 {
            println!("  Stilt height: {}", self.stilt_height);
        }
    }
}

/// What the caller wants; anything left unset is drawn at random.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintRequest {
    pub style: Option<Style>,
    pub size: Option<SizeClass>,
    pub wood: Option<WoodType>,
}

impl BlueprintRequest {
    /// Build a request from loose names. Unknown names are treated as unset.
    pub fn from_names(style: Option<&str>, size: Option<&str>, wood: Option<&str>) -> Self {
        let request = Self {
            style: style.and_then(Style::from_name),
            size: size.and_then(SizeClass::from_name),
            wood: wood.and_then(WoodType::from_name),
        };
        if style.is_some() != request.style.is_some()
            || size.is_some() != request.size.is_some()
            || wood.is_some() != request.wood.is_some()
        {
            tracing::warn!(?style, ?size, ?wood, "unknown blueprint parameter, choosing at random");
        }
        request
    }
}

/// Generate a blueprint. Deterministic for a given request, table and
/// random state.
pub fn generate_blueprint<R: Rng>(request: &BlueprintRequest, table: &StyleTable, rng: &mut R) -> Result<Blueprint> {
    let rng: &mut dyn RngCore = rng;

    let style = request.style.unwrap_or_else(|| Style::random(rng));
    let size = request.size.unwrap_or_else(|| SizeClass::random(rng));
    let wood = request.wood.unwrap_or_else(|| WoodType::random(rng));

    let profile = table.profile(style)?;
    let rules = style.rules();

    let palette = wood.palette();
    let secondary = profile.pick_secondary(rng, &palette.planks);
    let materials = Materials {
        wood,
        palette,
        secondary,
    };

    let (min_side, max_side) = size.footprint_range();
    let (min_height, max_height) = size.height_range();
    let width = rng.gen_range(min_side..=max_side);
    let length = rng.gen_range(min_side..=max_side);
    let height = rng.gen_range(min_height..=max_height);
    let shape = shape::draw_shape(size, width, length, rng);

    let supports = layout::support_positions(profile.support_pattern, width, length);
    let braces = (rules.bracing)(&supports, width, length, rng);
    let door = (rules.door)(width, length, rng);
    let windows = openings::generate_windows(profile.window_style, width, length, height, &door, rng);
    let furniture = furnishing::furniture_for(profile.furniture_theme, size, width, length);
    let roof = (rules.roof)(&materials, profile.roof_overhang, rng);

    let mut blueprint = Blueprint {
        style,
        size,
        materials,
        width,
        height,
        length,
        shape,
        supports,
        braces,
        door,
        windows,
        furniture,
        decorations: Vec::new(),
        roof,
        stilt_height: 0,
    };

    let decorations = (rules.decoration)(&blueprint);
    blueprint.decorations = decorations;

    // Drop anything that fell outside the floor or into a cutout
    let inside = |x: i32, z: i32| blueprint.is_footprint_cell(x, z);
    let windows: Vec<Window> = blueprint.windows.iter().copied().filter(|w| inside(w.x, w.z)).collect();
    let furniture: Vec<Furniture> = blueprint.furniture.iter().filter(|f| inside(f.x, f.z)).cloned().collect();
    let decorations: Vec<Decoration> = blueprint.decorations.iter().filter(|d| inside(d.x, d.z)).cloned().collect();
    blueprint.windows = windows;
    blueprint.furniture = furniture;
    blueprint.decorations = decorations;

    tracing::debug!(
        style = style.name(),
        size = size.name(),
        width,
        length,
        supports = blueprint.supports.len(),
        "generated blueprint"
    );

    Ok(blueprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn generate(request: BlueprintRequest, seed: u64) -> Blueprint {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_blueprint(&request, &StyleTable::builtin(), &mut rng).unwrap()
    }

    fn all_requests() -> Vec<BlueprintRequest> {
        let mut requests = Vec::new();
        for &style in Style::all() {
            for &size in SizeClass::all() {
                requests.push(BlueprintRequest {
                    style: Some(style),
                    size: Some(size),
                    wood: None,
                });
            }
        }
        requests
    }

    #[test]
    fn test_dimensions_within_size_class() {
        for request in all_requests() {
            for seed in 0..20 {
                let bp = generate(request, seed);
                let (lo, hi) = bp.size.footprint_range();
                let (hlo, hhi) = bp.size.height_range();
                assert!((lo..=hi).contains(&bp.width));
                assert!((lo..=hi).contains(&bp.length));
                assert!((hlo..=hhi).contains(&bp.height));
            }
        }
    }

    #[test]
    fn test_square_shape_keeps_drawn_dimensions() {
        let request = BlueprintRequest {
            style: Some(Style::Traditional),
            size: Some(SizeClass::Large),
            wood: None,
        };
        let squares: Vec<Blueprint> = (0..200)
            .map(|seed| generate(request, seed))
            .filter(|bp| bp.shape == ShapeVariant::Square)
            .collect();
        assert!(!squares.is_empty());
        assert!(squares.iter().any(|bp| bp.width != bp.length));
    }

    #[test]
    fn test_supports_start_with_corners() {
        for request in all_requests() {
            for seed in 0..10 {
                let bp = generate(request, seed);
                let (w, l) = (bp.width, bp.length);
                for corner in [
                    Support::new(0, 0),
                    Support::new(w - 1, 0),
                    Support::new(0, l - 1),
                    Support::new(w - 1, l - 1),
                ] {
                    assert!(bp.supports.contains(&corner));
                }
            }
        }
    }

    #[test]
    fn test_no_window_at_door() {
        for request in all_requests() {
            for seed in 0..20 {
                let bp = generate(request, seed);
                assert!(!bp.windows.iter().any(|w| w.x == bp.door.x && w.z == bp.door.z));
            }
        }
    }

    #[test]
    fn test_interior_stays_on_floor() {
        let mut saw_cutout = false;
        for request in all_requests() {
            for seed in 0..30 {
                let bp = generate(request, seed);
                if bp.shape.cutout().is_some() {
                    saw_cutout = true;
                }
                for f in &bp.furniture {
                    assert!(bp.is_footprint_cell(f.x, f.z), "{:?} outside {:?}", f, bp.shape);
                }
                for d in &bp.decorations {
                    assert!(bp.is_footprint_cell(d.x, d.z), "{:?} outside {:?}", d, bp.shape);
                }
                for w in &bp.windows {
                    assert!(bp.is_footprint_cell(w.x, w.z));
                }
            }
        }
        assert!(saw_cutout);
    }

    #[test]
    fn test_nordic_large_house() {
        let request = BlueprintRequest {
            style: Some(Style::Nordic),
            size: Some(SizeClass::Large),
            wood: None,
        };
        let profile = StyleTable::builtin().profile(Style::Nordic).unwrap().clone();
        assert_eq!(profile.support_pattern, SupportPattern::Thick);

        let mut complete = 0;
        for seed in 0..40 {
            let bp = generate(request, seed);
            assert_eq!(bp.roof.type_name(), "steep_a_frame");
            assert_eq!(bp.roof.overhang(), 1);
            // Thick pattern: corners plus the center on a large footprint
            assert_eq!(bp.supports.len(), 5);

            let (w, l) = (bp.width, bp.length);
            let expected = [
                ("white_bed", 1, l - 3),
                ("white_bed", 1, l - 2),
                ("cobblestone", w / 2, 1),
                ("cobblestone", w / 2 + 1, 1),
            ];
            let mut present = 0;
            for (kind, x, z) in expected {
                let found = bp.furniture.iter().any(|f| f.kind == kind && f.x == x && f.z == z);
                assert_eq!(found, bp.is_footprint_cell(x, z));
                if found {
                    present += 1;
                }
            }
            if present == expected.len() {
                complete += 1;
            }
        }
        assert!(complete > 0);
    }

    #[test]
    fn test_same_seed_same_blueprint() {
        let request = BlueprintRequest::default();
        assert_eq!(generate(request, 77), generate(request, 77));
    }

    #[test]
    fn test_lenient_request_names() {
        let request = BlueprintRequest::from_names(Some("Asian"), Some("huge"), Some("spruce"));
        assert_eq!(request.style, Some(Style::Asian));
        assert_eq!(request.size, None);
        assert_eq!(request.wood, Some(WoodType::Spruce));

        let bp = generate(request, 5);
        assert_eq!(bp.style, Style::Asian);
        assert_eq!(bp.materials.palette.planks, "spruce_planks");
    }

    #[test]
    fn test_custom_profile_drives_generation() {
        let mut profile = StyleTable::builtin().profile(Style::Modern).unwrap().clone();
        profile.secondary_materials = vec!["mud_bricks".to_string()];
        profile.roof_overhang = 3;
        let table = StyleTable::builtin().with_profile(Style::Modern, profile);

        let request = BlueprintRequest {
            style: Some(Style::Modern),
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let bp = generate_blueprint(&request, &table, &mut rng).unwrap();
        assert_eq!(bp.materials.secondary, "mud_bricks");
        assert_eq!(bp.roof.overhang(), 3);
    }

    #[test]
    fn test_missing_profile_is_an_error() {
        let table = StyleTable::builtin().without_profile(Style::Modern);
        let request = BlueprintRequest {
            style: Some(Style::Modern),
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            generate_blueprint(&request, &table, &mut rng),
            Err(PlannerError::MissingStyleProfile(_))
        ));
    }

    #[test]
    fn test_blueprint_json_shape() {
        let request = BlueprintRequest {
            style: Some(Style::Modern),
            size: Some(SizeClass::Medium),
            wood: Some(WoodType::Birch),
        };
        let json = serde_json::to_value(generate(request, 3)).unwrap();
        assert_eq!(json["style"], "modern");
        assert_eq!(json["roof"]["type"], "flat");
        assert_eq!(json["stilt_height"], 0);
    }
}
