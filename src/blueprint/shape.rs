//! Footprint shape variants.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::style::SizeClass;

/// Corner of the footprint; north is z = 0, west is x = 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "NW")]
    NorthWest,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "SW")]
    SouthWest,
}

impl Corner {
    pub fn all() -> &'static [Self] {
        &[Self::NorthEast, Self::NorthWest, Self::SouthEast, Self::SouthWest]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl Wall {
    pub fn all() -> &'static [Self] {
        &[Self::North, Self::South, Self::East, Self::West]
    }
}

/// Square removed from one corner of an L-shaped house.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cutout {
    pub corner: Corner,
    pub size: i32,
}

impl Cutout {
    pub fn contains(&self, x: i32, z: i32, width: i32, length: i32) -> bool {
        let east = x >= width - self.size;
        let west = x < self.size;
        let north = z < self.size;
        let south = z >= length - self.size;
        match self.corner {
            Corner::NorthEast => east && north,
            Corner::NorthWest => west && north,
            Corner::SouthEast => east && south,
            Corner::SouthWest => west && south,
        }
    }
}

/// One wall built shorter or longer than the rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallOffset {
    pub wall: Wall,
    pub offset: i32,
}

/// Shape of the footprint. Small houses keep the drawn variant but never
/// carry parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum ShapeVariant {
    Rectangle,
    LShape { cutout: Option<Cutout> },
    Square,
    Irregular { offset: Option<WallOffset> },
}

impl ShapeVariant {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeVariant::Rectangle => "rectangle",
            ShapeVariant::LShape { .. } => "l_shape",
            ShapeVariant::Square => "square",
            ShapeVariant::Irregular { .. } => "irregular",
        }
    }

    pub fn cutout(&self) -> Option<&Cutout> {
        match self {
            ShapeVariant::LShape { cutout } => cutout.as_ref(),
            _ => None,
        }
    }
}

/// Draw a shape for a footprint of the given size. Only medium and large
/// houses get shape parameters; the drawn dimensions are never changed.
pub fn draw_shape<R: Rng + ?Sized>(size: SizeClass, width: i32, length: i32, rng: &mut R) -> ShapeVariant {
    let parametrized = size != SizeClass::Small;

    match rng.gen_range(0..4) {
        0 => ShapeVariant::Rectangle,
        1 => {
            let cutout = parametrized.then(|| {
                let corner = Corner::all()[rng.gen_range(0..Corner::all().len())];
                let max_size = (width.min(length) / 2).max(2);
                Cutout {
                    corner,
                    size: rng.gen_range(2..=max_size),
                }
            });
            ShapeVariant::LShape { cutout }
        }
        2 => ShapeVariant::Square,
        _ => {
            let offset = parametrized.then(|| WallOffset {
                wall: Wall::all()[rng.gen_range(0..Wall::all().len())],
                offset: rng.gen_range(1..=2),
            });
            ShapeVariant::Irregular { offset }
        }
    }
}
