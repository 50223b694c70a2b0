//! House styles, size classes, wood types and the per-style profile table.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{read_json, PlannerError, Result};

/// Architectural style of a house
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Traditional,
    Modern,
    Asian,
    Tropical,
    Nordic,
}

impl Style {
    pub fn all() -> &'static [Self] {
        &[Self::Traditional, Self::Modern, Self::Asian, Self::Tropical, Self::Nordic]
    }

    /// Lowercase identifier, as used in style files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Style::Traditional => "traditional",
            Style::Modern => "modern",
            Style::Asian => "asian",
            Style::Tropical => "tropical",
            Style::Nordic => "nordic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Style::Traditional => "Traditional",
            Style::Modern => "Modern",
            Style::Asian => "Asian",
            Style::Tropical => "Tropical",
            Style::Nordic => "Nordic",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all().iter().copied().find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::all()[rng.gen_range(0..Self::all().len())]
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// House size class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub fn all() -> &'static [Self] {
        &[Self::Small, Self::Medium, Self::Large]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all().iter().copied().find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::all()[rng.gen_range(0..Self::all().len())]
    }

    /// Inclusive range for width and length
    pub fn footprint_range(&self) -> (i32, i32) {
        match self {
            SizeClass::Small => (5, 6),
            SizeClass::Medium => (6, 8),
            SizeClass::Large => (8, 10),
        }
    }

    /// Inclusive range for wall height
    pub fn height_range(&self) -> (i32, i32) {
        match self {
            SizeClass::Small | SizeClass::Medium => (3, 4),
            SizeClass::Large => (4, 5),
        }
    }
}

impl std::fmt::Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Wood family used for the structural blocks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WoodType {
    Oak,
    Spruce,
    Birch,
    Jungle,
    Acacia,
    DarkOak,
}

impl WoodType {
    pub fn all() -> &'static [Self] {
        &[
            Self::Oak,
            Self::Spruce,
            Self::Birch,
            Self::Jungle,
            Self::Acacia,
            Self::DarkOak,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            WoodType::Oak => "oak",
            WoodType::Spruce => "spruce",
            WoodType::Birch => "birch",
            WoodType::Jungle => "jungle",
            WoodType::Acacia => "acacia",
            WoodType::DarkOak => "dark_oak",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all().iter().copied().find(|w| w.name().eq_ignore_ascii_case(name))
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::all()[rng.gen_range(0..Self::all().len())]
    }

    pub fn palette(&self) -> WoodPalette {
        let wood = self.name();
        WoodPalette {
            planks: format!("{}_planks", wood),
            log: format!("{}_log", wood),
            fence: format!("{}_fence", wood),
            stairs: format!("{}_stairs", wood),
            door: format!("{}_door", wood),
            trapdoor: format!("{}_trapdoor", wood),
        }
    }
}

impl std::fmt::Display for WoodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The six wooden block names derived from a wood type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WoodPalette {
    pub planks: String,
    pub log: String,
    pub fence: String,
    pub stairs: String,
    pub door: String,
    pub trapdoor: String,
}

/// Arrangement of support pillars under the floor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportPattern {
    Square,
    Minimal,
    Complex,
    Tall,
    Thick,
}

/// How windows are spread over the walls
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStyle {
    Full,
    Large,
    Lattice,
    Open,
    Small,
}

/// Interior furnishing template
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureTheme {
    Rustic,
    Minimalist,
    TraditionalAsian,
    Beach,
    RusticNordic,
}

/// Static configuration of one style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub secondary_materials: Vec<String>,
    pub decorative_blocks: Vec<String>,
    pub window_style: WindowStyle,
    /// Blocks the roof extends past the walls
    pub roof_overhang: u32,
    pub support_pattern: SupportPattern,
    pub furniture_theme: FurnitureTheme,
}

impl StyleProfile {
    /// Uniform pick from the secondary palette; `fallback` when it is empty.
    pub fn pick_secondary<R: Rng + ?Sized>(&self, rng: &mut R, fallback: &str) -> String {
        self.secondary_materials
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Read-only profile for every style, shared by all generators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTable {
    profiles: BTreeMap<Style, StyleProfile>,
}

impl StyleTable {
    /// The built-in profiles.
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            Style::Traditional,
            StyleProfile {
                secondary_materials: strings(&["cobblestone", "stone_bricks", "mossy_cobblestone"]),
                decorative_blocks: strings(&["lantern", "flower_pot", "bookshelf"]),
                window_style: WindowStyle::Full,
                roof_overhang: 1,
                support_pattern: SupportPattern::Square,
                furniture_theme: FurnitureTheme::Rustic,
            },
        );
        profiles.insert(
            Style::Modern,
            StyleProfile {
                secondary_materials: strings(&["smooth_stone", "white_concrete", "glass"]),
                decorative_blocks: strings(&["sea_lantern", "end_rod", "glazed_terracotta"]),
                window_style: WindowStyle::Large,
                roof_overhang: 0,
                support_pattern: SupportPattern::Minimal,
                furniture_theme: FurnitureTheme::Minimalist,
            },
        );
        profiles.insert(
            Style::Asian,
            StyleProfile {
                secondary_materials: strings(&["smooth_stone", "prismarine", "dark_prismarine"]),
                decorative_blocks: strings(&["lantern", "bell", "bamboo"]),
                window_style: WindowStyle::Lattice,
                roof_overhang: 2,
                support_pattern: SupportPattern::Complex,
                furniture_theme: FurnitureTheme::TraditionalAsian,
            },
        );
        profiles.insert(
            Style::Tropical,
            StyleProfile {
                secondary_materials: strings(&["sandstone", "smooth_sandstone", "prismarine"]),
                decorative_blocks: strings(&["coral", "sea_pickle", "tropical_fish_bucket"]),
                window_style: WindowStyle::Open,
                roof_overhang: 1,
                support_pattern: SupportPattern::Tall,
                furniture_theme: FurnitureTheme::Beach,
            },
        );
        profiles.insert(
            Style::Nordic,
            StyleProfile {
                secondary_materials: strings(&["spruce_planks", "cobblestone", "polished_andesite"]),
                decorative_blocks: strings(&["lantern", "campfire", "smoker"]),
                window_style: WindowStyle::Small,
                roof_overhang: 1,
                support_pattern: SupportPattern::Thick,
                furniture_theme: FurnitureTheme::RusticNordic,
            },
        );
        Self { profiles }
    }

    /// Load a table from a JSON object keyed by style name. Every style must
    /// have a profile.
    pub fn from_json_file(path: &str) -> Result<Self> {
        let table: StyleTable = read_json(path)?;
        table.validate()?;
        tracing::info!(path, "loaded style table");
        Ok(table)
    }

    /// Check that every style has a profile.
    pub fn validate(&self) -> Result<()> {
        match Style::all().iter().find(|s| !self.profiles.contains_key(s)) {
            Some(missing) => Err(PlannerError::MissingStyleProfile(missing.name().to_string())),
            None => Ok(()),
        }
    }

    pub fn profile(&self, style: Style) -> Result<&StyleProfile> {
        self.profiles
            .get(&style)
            .ok_or_else(|| PlannerError::MissingStyleProfile(style.name().to_string()))
    }

    /// Replace or add one profile.
    pub fn with_profile(mut self, style: Style, profile: StyleProfile) -> Self {
        self.profiles.insert(style, profile);
        self
    }

    pub fn without_profile(mut self, style: Style) -> Self {
        self.profiles.remove(&style);
        self
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
