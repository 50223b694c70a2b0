//! Furniture themes and per-style decoration templates.
//!
//! Positions are relative to the house's north-west floor corner. Nothing
//! here checks the footprint; the generator drops entries outside it.

use super::style::{FurnitureTheme, SizeClass};
use super::{Blueprint, Decoration, DecorationPlacement, Facing, Furniture};

/// Furniture for a theme and footprint.
pub fn furniture_for(theme: FurnitureTheme, size: SizeClass, width: i32, length: i32) -> Vec<Furniture> {
    match theme {
        FurnitureTheme::Rustic => rustic(size, width, length),
        FurnitureTheme::Minimalist => minimalist(size, width, length),
        FurnitureTheme::TraditionalAsian => traditional_asian(size, width, length),
        FurnitureTheme::Beach => beach(width, length),
        FurnitureTheme::RusticNordic => rustic_nordic(size, width, length),
    }
}

fn rustic(size: SizeClass, width: i32, length: i32) -> Vec<Furniture> {
    let mut items = vec![
        Furniture::facing("bed", width / 4, length / 4, Facing::North),
        Furniture::plain("crafting_table", width - 2, 2),
        Furniture::facing("chest", width - 2, 3, Facing::West),
    ];
    if width >= 7 && length >= 7 {
        items.push(Furniture::facing("furnace", width - 2, 4, Facing::West));
    }
    if size == SizeClass::Large {
        items.push(Furniture::plain("bookshelf", 1, 1));
    }
    items
}

fn minimalist(size: SizeClass, width: i32, length: i32) -> Vec<Furniture> {
    let mut items = vec![
        Furniture::facing("white_bed", width / 4, length / 4, Facing::North),
        Furniture::facing("chest", width - 2, 2, Facing::West),
    ];
    if width >= 7 && length >= 7 {
        items.push(Furniture::plain("smooth_quartz", width / 2, length / 2));
        items.push(Furniture::plain("smooth_quartz", width / 2 + 1, length / 2));
    }
    if size != SizeClass::Small {
        items.push(Furniture::plain("potted_plant", 1, length - 2));
        items.push(Furniture::plain("potted_plant", width - 2, length - 2));
    }
    items
}

fn traditional_asian(size: SizeClass, width: i32, length: i32) -> Vec<Furniture> {
    let (tx, tz) = (width / 2, length / 2);
    let mut items = vec![
        Furniture::plain("smooth_stone_slab", tx, tz),
        Furniture::plain("smooth_stone_slab", tx + 1, tz),
    ];
    if width >= 6 && length >= 6 {
        for (x, z) in [
            (tx - 1, tz),
            (tx + 2, tz),
            (tx, tz - 1),
            (tx + 1, tz - 1),
            (tx, tz + 1),
            (tx + 1, tz + 1),
        ] {
            items.push(Furniture::plain("red_carpet", x, z));
        }
    }
    items.extend([
        Furniture::facing("chest", 1, 1, Facing::South),
        Furniture::facing("chest", 2, 1, Facing::South),
        Furniture::plain("lantern", width - 2, 1),
        Furniture::plain("flower_pot", width - 3, 1),
        Furniture::facing("white_bed", width / 4, length - 2, Facing::North),
    ]);
    if size == SizeClass::Large {
        items.push(Furniture::plain("bookshelf", width - 2, length - 2));
        items.push(Furniture::plain("bookshelf", width - 3, length - 2));
    }
    items
}

fn beach(width: i32, length: i32) -> Vec<Furniture> {
    let mut items = vec![Furniture::facing("light_blue_bed", width / 4, length / 4, Facing::East)];
    if width >= 6 && length >= 6 {
        let (tx, tz) = (width / 2, length / 2);
        items.extend([
            Furniture::plain("jungle_fence", tx, tz),
            Furniture::plain("jungle_pressure_plate", tx, tz + 1),
            Furniture::facing("jungle_stairs", tx - 1, tz, Facing::East),
            Furniture::facing("jungle_stairs", tx + 1, tz, Facing::West),
        ]);
    }
    items.extend([
        Furniture::facing("chest", width - 2, 2, Facing::West),
        Furniture::plain("barrel", width - 2, 3),
        Furniture::plain("potted_fern", 1, length - 2),
        Furniture::plain("potted_bamboo", width - 2, length - 2),
    ]);
    if width >= 7 && length >= 7 {
        items.push(Furniture::plain("crafting_table", width - 3, 2));
    }
    items
}

fn rustic_nordic(size: SizeClass, width: i32, length: i32) -> Vec<Furniture> {
    let hearth_x = width / 2;
    let mut items = vec![
        // Two-cell bed along the west wall
        Furniture::facing("white_bed", 1, length - 3, Facing::East),
        Furniture::facing("white_bed", 1, length - 2, Facing::East),
        // Hearth
        Furniture::plain("cobblestone", hearth_x, 1),
        Furniture::plain("cobblestone", hearth_x + 1, 1),
        Furniture::plain("campfire", hearth_x, 2),
    ];
    if width >= 6 && length >= 6 {
        let (tx, tz) = (width / 2, length / 2);
        items.extend([
            Furniture::plain("spruce_fence", tx, tz),
            Furniture::plain("spruce_pressure_plate", tx + 1, tz),
            Furniture::facing("spruce_stairs", tx, tz - 1, Facing::South),
            Furniture::facing("spruce_stairs", tx + 1, tz - 1, Facing::South),
            Furniture::facing("spruce_stairs", tx, tz + 1, Facing::North),
            Furniture::facing("spruce_stairs", tx + 1, tz + 1, Facing::North),
        ]);
    }
    items.extend([
        Furniture::facing("chest", width - 2, length - 2, Facing::West),
        Furniture::plain("barrel", width - 2, length - 3),
        Furniture::plain("crafting_table", width - 2, 2),
        Furniture::facing("smoker", width - 2, 3, Facing::West),
        Furniture::plain("lantern", 1, 1),
    ]);
    if size == SizeClass::Large {
        items.push(Furniture::facing("loom", width - 3, length - 2, Facing::West));
        items.push(Furniture::plain("bookshelf", 1, length - 2));
    }
    items
}

// =============================================================================
// DECORATION RULES
// =============================================================================

fn corner_lanterns(width: i32, length: i32) -> [Decoration; 4] {
    [
        Decoration::new("lantern", 0, 0, DecorationPlacement::Hanging),
        Decoration::new("lantern", width - 1, 0, DecorationPlacement::Hanging),
        Decoration::new("lantern", 0, length - 1, DecorationPlacement::Hanging),
        Decoration::new("lantern", width - 1, length - 1, DecorationPlacement::Hanging),
    ]
}

/// Flower boxes under north and south windows, lanterns at the corners.
pub fn traditional_decorations(bp: &Blueprint) -> Vec<Decoration> {
    let mut items: Vec<Decoration> = bp
        .windows
        .iter()
        .filter(|w| w.z == 0 || w.z == bp.length - 1)
        .map(|w| Decoration::new("flower_box", w.x, w.z, DecorationPlacement::Window))
        .collect();
    items.extend(corner_lanterns(bp.width, bp.length));
    items
}

/// Glass railing around the rim and four end rods in the ceiling.
pub fn modern_decorations(bp: &Blueprint) -> Vec<Decoration> {
    let (w, l) = (bp.width, bp.length);
    let mut items = Vec::new();
    for x in 0..w {
        items.push(Decoration::new("glass_pane", x, 0, DecorationPlacement::Railing));
        items.push(Decoration::new("glass_pane", x, l - 1, DecorationPlacement::Railing));
    }
    for z in 1..l - 1 {
        items.push(Decoration::new("glass_pane", 0, z, DecorationPlacement::Railing));
        items.push(Decoration::new("glass_pane", w - 1, z, DecorationPlacement::Railing));
    }
    for (x, z) in [
        (w / 3, l / 3),
        (2 * w / 3, l / 3),
        (w / 3, 2 * l / 3),
        (2 * w / 3, 2 * l / 3),
    ] {
        items.push(Decoration::new("end_rod", x, z, DecorationPlacement::Ceiling));
    }
    items
}

fn ceiling_grid(kind: &str, width: i32, length: i32) -> Vec<Decoration> {
    let mut items = Vec::new();
    for x in (2..width - 2).step_by(2) {
        for z in (2..length - 2).step_by(2) {
            items.push(Decoration::new(kind, x, z, DecorationPlacement::Ceiling));
        }
    }
    items
}

pub fn asian_decorations(bp: &Blueprint) -> Vec<Decoration> {
    let (w, l) = (bp.width, bp.length);
    let mut items = corner_lanterns(w, l).to_vec();
    if bp.door.z == l - 1 {
        items.push(Decoration::new("red_banner", bp.door.x - 1, bp.door.z, DecorationPlacement::Wall));
        items.push(Decoration::new("red_banner", bp.door.x + 1, bp.door.z, DecorationPlacement::Wall));
    }
    items.push(Decoration::new("potted_bamboo", 1, 1, DecorationPlacement::Floor));
    items.push(Decoration::new("potted_bamboo", w - 2, 1, DecorationPlacement::Floor));
    items.extend(ceiling_grid("lantern", w, l));
    items
}

pub fn tropical_decorations(bp: &Blueprint) -> Vec<Decoration> {
    let (w, l) = (bp.width, bp.length);
    let mut items = vec![
        Decoration::new("coral_fan", 1, 1, DecorationPlacement::Floor),
        Decoration::new("coral_fan", w - 2, 1, DecorationPlacement::Floor),
    ];
    items.extend(ceiling_grid("hanging_roots", w, l));
    items.push(Decoration::new("turtle_egg", w / 2, 1, DecorationPlacement::Floor));
    if bp.door.z == l - 1 {
        items.push(Decoration::new("bamboo", bp.door.x - 1, bp.door.z, DecorationPlacement::Wall));
        items.push(Decoration::new("bamboo", bp.door.x + 1, bp.door.z, DecorationPlacement::Wall));
    }
    items
}

pub fn nordic_decorations(bp: &Blueprint) -> Vec<Decoration> {
    let (w, l) = (bp.width, bp.length);
    let mut items = vec![
        Decoration::new("item_frame", w / 2, 0, DecorationPlacement::Wall),
        Decoration::new("lantern", w / 3, l / 3, DecorationPlacement::Hanging),
        Decoration::new("lantern", 2 * w / 3, 2 * l / 3, DecorationPlacement::Hanging),
    ];
    for (dx, dz) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        items.push(Decoration::new("white_carpet", w / 2 + dx, l / 2 + dz, DecorationPlacement::Floor));
    }
    items.push(Decoration::new("shield", 1, l / 2, DecorationPlacement::Wall));
    items.push(Decoration::new("shield", w - 2, l / 2, DecorationPlacement::Wall));
    items
}
