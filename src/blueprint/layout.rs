//! Support pillars, cross bracing and door placement.

use rand::{Rng, RngCore};

use super::style::SupportPattern;
use super::{Brace, BraceOrientation, Door, Facing, Support};

/// Longest span a brace may bridge
const MAX_BRACE_SPAN: f32 = 7.0;

fn corners(width: i32, length: i32) -> Vec<Support> {
    vec![
        Support::new(0, 0),
        Support::new(width - 1, 0),
        Support::new(0, length - 1),
        Support::new(width - 1, length - 1),
    ]
}

/// Support positions for a pattern; the four corners always come first.
pub fn support_positions(pattern: SupportPattern, width: i32, length: i32) -> Vec<Support> {
    let mut supports = corners(width, length);

    match pattern {
        SupportPattern::Square => {
            if width > 6 || length > 6 {
                supports.extend([
                    Support::new(width / 2, 0),
                    Support::new(width / 2, length - 1),
                    Support::new(0, length / 2),
                    Support::new(width - 1, length / 2),
                ]);
                if width > 7 && length > 7 {
                    supports.push(Support::new(width / 2, length / 2));
                }
            }
        }
        SupportPattern::Minimal => {
            if width > 7 && length > 7 {
                supports.push(Support::new(width / 2, length / 2));
            }
        }
        SupportPattern::Complex => {
            let (w3, w23) = (width / 3, 2 * width / 3);
            let (l3, l23) = (length / 3, 2 * length / 3);
            supports.extend([
                Support::new(w3, 0),
                Support::new(w23, 0),
                Support::new(w3, length - 1),
                Support::new(w23, length - 1),
                Support::new(0, l3),
                Support::new(0, l23),
                Support::new(width - 1, l3),
                Support::new(width - 1, l23),
            ]);
            if width > 7 && length > 7 {
                supports.extend([
                    Support::new(w3, l3),
                    Support::new(w23, l3),
                    Support::new(w3, l23),
                    Support::new(w23, l23),
                ]);
            }
        }
        SupportPattern::Tall => {
            if width > 6 || length > 6 {
                supports.push(Support::new(width / 2, 0));
                supports.push(Support::new(width / 2, length - 1));
            }
        }
        SupportPattern::Thick => {
            if width > 6 && length > 6 {
                supports.push(Support::new(width / 2, length / 2));
            }
        }
    }

    supports
}

fn span(a: &Support, b: &Support) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dz = (a.z - b.z) as f32;
    (dx * dx + dz * dz).sqrt()
}

/// Brace at the midpoint of two supports, oriented by their alignment.
fn brace_between(a: &Support, b: &Support) -> Brace {
    let orientation = if a.x == b.x {
        BraceOrientation::HorizontalZ
    } else if a.z == b.z {
        BraceOrientation::HorizontalX
    } else {
        BraceOrientation::Diagonal
    };
    Brace {
        x: (a.x + b.x).div_euclid(2),
        z: (a.z + b.z).div_euclid(2),
        orientation,
    }
}

// =============================================================================
// BRACING RULES
// =============================================================================

/// Diagonal braces between corners only.
pub fn corner_bracing(_supports: &[Support], width: i32, length: i32, _rng: &mut dyn RngCore) -> Vec<Brace> {
    let corners = corners(width, length);
    let mut braces = Vec::new();
    for (i, a) in corners.iter().enumerate() {
        for b in &corners[i + 1..] {
            if span(a, b) <= MAX_BRACE_SPAN {
                braces.push(Brace {
                    x: (a.x + b.x).div_euclid(2),
                    z: (a.z + b.z).div_euclid(2),
                    orientation: BraceOrientation::Diagonal,
                });
            }
        }
    }
    braces
}

/// Each support to its two nearest neighbors in range.
fn nearest_neighbor_bracing(supports: &[Support], x_bracing: bool, rng: &mut dyn RngCore) -> Vec<Brace> {
    let mut braces = Vec::new();

    for (i, a) in supports.iter().enumerate() {
        let mut neighbors: Vec<(&Support, f32)> = supports
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, b)| (b, span(a, b)))
            .filter(|(_, d)| *d <= MAX_BRACE_SPAN)
            .collect();
        neighbors.sort_by(|p, q| p.1.total_cmp(&q.1));

        for (b, _) in neighbors.into_iter().take(2) {
            let brace = brace_between(a, b);
            braces.push(brace);

            if x_bracing && brace.orientation == BraceOrientation::Diagonal && rng.gen_bool(0.5) {
                let dx = b.x - a.x;
                let dz = b.z - a.z;
                braces.push(Brace {
                    x: a.x + dx.div_euclid(4),
                    z: a.z + dz.div_euclid(4),
                    orientation: BraceOrientation::Diagonal,
                });
                braces.push(Brace {
                    x: a.x + (3 * dx).div_euclid(4),
                    z: a.z + (3 * dz).div_euclid(4),
                    orientation: BraceOrientation::Diagonal,
                });
            }
        }
    }

    braces
}

/// Nearest-neighbor bracing with extra X members on diagonals.
pub fn cross_bracing(supports: &[Support], _width: i32, _length: i32, rng: &mut dyn RngCore) -> Vec<Brace> {
    nearest_neighbor_bracing(supports, true, rng)
}

pub fn neighbor_bracing(supports: &[Support], _width: i32, _length: i32, rng: &mut dyn RngCore) -> Vec<Brace> {
    nearest_neighbor_bracing(supports, false, rng)
}

/// Every pair of supports in range.
pub fn full_bracing(supports: &[Support], _width: i32, _length: i32, _rng: &mut dyn RngCore) -> Vec<Brace> {
    let mut braces = Vec::new();
    for (i, a) in supports.iter().enumerate() {
        for b in &supports[i + 1..] {
            if span(a, b) <= MAX_BRACE_SPAN {
                braces.push(brace_between(a, b));
            }
        }
    }
    braces
}

/// Full bracing plus horizontal members along the perimeter.
pub fn perimeter_bracing(supports: &[Support], width: i32, length: i32, rng: &mut dyn RngCore) -> Vec<Brace> {
    let mut braces = full_bracing(supports, width, length, rng);

    for s in supports {
        if s.x == 0 || s.x == width - 1 {
            for z in (1..length - 1).step_by(2).filter(|z| *z != s.z) {
                braces.push(Brace {
                    x: s.x,
                    z,
                    orientation: BraceOrientation::HorizontalZ,
                });
            }
        }
        if s.z == 0 || s.z == length - 1 {
            for x in (1..width - 1).step_by(2).filter(|x| *x != s.x) {
                braces.push(Brace {
                    x,
                    z: s.z,
                    orientation: BraceOrientation::HorizontalX,
                });
            }
        }
    }

    braces
}

// =============================================================================
// DOOR RULES
// =============================================================================

fn north_wall_door(width: i32, _length: i32) -> Door {
    Door { x: width / 2, z: 0, facing: Facing::South }
}

fn south_wall_door(width: i32, length: i32) -> Door {
    Door { x: width / 2, z: length - 1, facing: Facing::North }
}

fn east_wall_door(width: i32, length: i32) -> Door {
    Door { x: width - 1, z: length / 2, facing: Facing::West }
}

fn west_wall_door(_width: i32, length: i32) -> Door {
    Door { x: 0, z: length / 2, facing: Facing::East }
}

/// Centered in the south wall.
pub fn centered_door(width: i32, length: i32, _rng: &mut dyn RngCore) -> Door {
    south_wall_door(width, length)
}

/// South wall, one step off center.
pub fn offset_door(width: i32, length: i32, rng: &mut dyn RngCore) -> Door {
    let offset = if rng.gen_bool(0.5) { -1 } else { 1 };
    let x = (width / 2 + offset).clamp(1, (width - 2).max(1));
    Door { x, z: length - 1, facing: Facing::North }
}

/// Any of the four walls.
pub fn any_wall_door(width: i32, length: i32, rng: &mut dyn RngCore) -> Door {
    match rng.gen_range(0..4) {
        0 => north_wall_door(width, length),
        1 => south_wall_door(width, length),
        2 => east_wall_door(width, length),
        _ => west_wall_door(width, length),
    }
}

/// One of the shorter pair of walls.
pub fn short_wall_door(width: i32, length: i32, rng: &mut dyn RngCore) -> Door {
    let first = rng.gen_bool(0.5);
    match (width < length, first) {
        (true, true) => east_wall_door(width, length),
        (true, false) => west_wall_door(width, length),
        (false, true) => north_wall_door(width, length),
        (false, false) => south_wall_door(width, length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn has(supports: &[Support], x: i32, z: i32) -> bool {
        supports.contains(&Support::new(x, z))
    }

    #[test]
    fn test_corners_first_for_every_pattern() {
        for pattern in [
            SupportPattern::Square,
            SupportPattern::Minimal,
            SupportPattern::Complex,
            SupportPattern::Tall,
            SupportPattern::Thick,
        ] {
            let supports = support_positions(pattern, 9, 8);
            assert_eq!(&supports[..4], &corners(9, 8)[..]);
        }
    }

    #[test]
    fn test_pattern_extras() {
        let square = support_positions(SupportPattern::Square, 8, 8);
        assert_eq!(square.len(), 9);
        assert!(has(&square, 4, 4));
        assert_eq!(support_positions(SupportPattern::Square, 6, 6).len(), 4);

        assert_eq!(support_positions(SupportPattern::Minimal, 7, 9).len(), 4);
        assert_eq!(support_positions(SupportPattern::Minimal, 8, 9).len(), 5);

        assert_eq!(support_positions(SupportPattern::Complex, 6, 6).len(), 12);
        assert_eq!(support_positions(SupportPattern::Complex, 9, 9).len(), 16);

        let tall = support_positions(SupportPattern::Tall, 6, 7);
        assert_eq!(tall.len(), 6);
        assert!(has(&tall, 3, 0) && has(&tall, 3, 6));

        assert_eq!(support_positions(SupportPattern::Thick, 7, 6).len(), 4);
        let thick = support_positions(SupportPattern::Thick, 10, 9);
        assert_eq!(thick.len(), 5);
        assert!(has(&thick, 5, 4));
    }

    #[test]
    fn test_brace_orientation_and_midpoint() {
        let a = Support::new(0, 0);
        assert_eq!(
            brace_between(&a, &Support::new(0, 5)),
            Brace { x: 0, z: 2, orientation: BraceOrientation::HorizontalZ }
        );
        assert_eq!(
            brace_between(&a, &Support::new(5, 0)),
            Brace { x: 2, z: 0, orientation: BraceOrientation::HorizontalX }
        );
        assert_eq!(
            brace_between(&a, &Support::new(3, 5)).orientation,
            BraceOrientation::Diagonal
        );
    }

    #[test]
    fn test_corner_bracing_respects_span() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // 6x6: sides 5, diagonals ~7.07, only the four sides are in range
        let braces = corner_bracing(&[], 6, 6, &mut rng);
        assert_eq!(braces.len(), 4);
        assert!(braces.iter().all(|b| b.orientation == BraceOrientation::Diagonal));

        // 10x10: every corner pair is 9 or more apart
        assert!(corner_bracing(&[], 10, 10, &mut rng).is_empty());
    }

    #[test]
    fn test_neighbor_bracing_at_most_two_per_support() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let supports = support_positions(SupportPattern::Tall, 8, 8);
        let braces = neighbor_bracing(&supports, 8, 8, &mut rng);
        assert!(braces.len() <= supports.len() * 2);
        assert!(!braces.is_empty());
    }

    #[test]
    fn test_perimeter_bracing_skips_support_coordinate() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let supports = support_positions(SupportPattern::Thick, 8, 8);
        let full = full_bracing(&supports, 8, 8, &mut rng);
        let perimeter = perimeter_bracing(&supports, 8, 8, &mut rng);
        assert!(perimeter.len() > full.len());

        let extra = &perimeter[full.len()..];
        for brace in extra {
            match brace.orientation {
                BraceOrientation::HorizontalZ => assert!(brace.z % 2 == 1 && (brace.x == 0 || brace.x == 7)),
                BraceOrientation::HorizontalX => assert!(brace.x % 2 == 1 && (brace.z == 0 || brace.z == 7)),
                BraceOrientation::Diagonal => panic!("perimeter members are horizontal"),
            }
        }
    }

    #[test]
    fn test_door_rules() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(centered_door(7, 8, &mut rng), Door { x: 3, z: 7, facing: Facing::North });

        for _ in 0..50 {
            let door = offset_door(6, 6, &mut rng);
            assert!(door.x == 2 || door.x == 4);
            assert_eq!(door.z, 5);

            // Narrow house: doors go on the east or west wall
            let door = short_wall_door(6, 9, &mut rng);
            assert!(door.x == 0 || door.x == 5);
            assert_eq!(door.z, 4);

            let door = short_wall_door(9, 9, &mut rng);
            assert!(door.z == 0 || door.z == 8);
            assert_eq!(door.x, 4);
        }
    }
}
