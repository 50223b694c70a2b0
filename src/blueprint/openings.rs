//! Window placement
//!
//! Each wall is scanned on its own. Walls are named by their z / x:
//! north is z = 0, south is z = length - 1, east is x = width - 1, west x = 0.
//! The door may sit on any wall, so the door cell is removed at the end.

use rand::Rng;

use super::style::WindowStyle;
use super::{Door, Window};

/// Windows for a `width` x `length` house of wall height `height`.
pub fn generate_windows<R: Rng + ?Sized>(
    style: WindowStyle,
    width: i32,
    length: i32,
    height: i32,
    door: &Door,
    rng: &mut R,
) -> Vec<Window> {
    let mut windows = Vec::new();
    let south = length - 1;
    let east = width - 1;
    let door_on_south = door.z == south;

    match style {
        WindowStyle::Large => {
            let run_x = (width - 2).min(3);
            let start_x = (width - run_x) / 2;
            let run_z = (length - 2).min(3);
            let start_z = (length - run_z) / 2;

            if rng.gen_bool(0.8) {
                windows.extend((start_x..start_x + run_x).map(|x| Window::new(x, 0, 1)));
            }
            if !door_on_south && rng.gen_bool(0.8) {
                windows.extend((start_x..start_x + run_x).map(|x| Window::new(x, south, 1)));
            }
            if rng.gen_bool(0.8) {
                windows.extend((start_z..start_z + run_z).map(|z| Window::new(east, z, 1)));
            }
            if rng.gen_bool(0.8) {
                windows.extend((start_z..start_z + run_z).map(|z| Window::new(0, z, 1)));
            }
        }
        WindowStyle::Lattice => {
            for x in (1..width - 1).step_by(2) {
                if rng.gen_bool(0.7) {
                    push_pair_x(&mut windows, x, 0, width);
                }
            }
            for x in (1..width - 1).step_by(2) {
                if x != door.x && x + 1 != door.x && rng.gen_bool(0.7) {
                    push_pair_x(&mut windows, x, south, width);
                }
            }
            for z in (1..length - 1).step_by(2) {
                if rng.gen_bool(0.7) {
                    push_pair_z(&mut windows, east, z, length);
                }
            }
            for z in (1..length - 1).step_by(2) {
                if rng.gen_bool(0.7) {
                    push_pair_z(&mut windows, 0, z, length);
                }
            }
        }
        WindowStyle::Open => {
            let upper = height > 3;
            let open = |windows: &mut Vec<Window>, x: i32, z: i32, rng: &mut R| {
                if rng.gen_bool(0.7) {
                    windows.push(Window::new(x, z, 1));
                    if upper && rng.gen_bool(0.4) {
                        windows.push(Window::new(x, z, 2));
                    }
                }
            };
            for x in 1..width - 1 {
                open(&mut windows, x, 0, rng);
            }
            for x in (1..width - 1).filter(|x| *x != door.x) {
                open(&mut windows, x, south, rng);
            }
            for z in 1..length - 1 {
                open(&mut windows, east, z, rng);
            }
            for z in 1..length - 1 {
                open(&mut windows, 0, z, rng);
            }
        }
        WindowStyle::Small => {
            scan_walls(&mut windows, width, length, 2, 0.4, door, rng);
        }
        WindowStyle::Full => {
            scan_walls(&mut windows, width, length, 1, 0.5, door, rng);
        }
    }

    windows.retain(|w| !(w.x == door.x && w.z == door.z));
    windows
}

fn push_pair_x(windows: &mut Vec<Window>, x: i32, z: i32, width: i32) {
    windows.push(Window::new(x, z, 1));
    if x + 1 < width - 1 {
        windows.push(Window::new(x + 1, z, 1));
    }
}

fn push_pair_z(windows: &mut Vec<Window>, x: i32, z: i32, length: i32) {
    windows.push(Window::new(x, z, 1));
    if z + 1 < length - 1 {
        windows.push(Window::new(x, z + 1, 1));
    }
}

/// Single ground-tier windows at every `step`-th interior cell of each wall.
fn scan_walls<R: Rng + ?Sized>(
    windows: &mut Vec<Window>,
    width: i32,
    length: i32,
    step: usize,
    chance: f64,
    door: &Door,
    rng: &mut R,
) {
    let south = length - 1;
    let east = width - 1;

    for x in (1..width - 1).step_by(step) {
        if rng.gen_bool(chance) {
            windows.push(Window::new(x, 0, 1));
        }
    }
    for x in (1..width - 1).step_by(step).filter(|x| *x != door.x) {
        if rng.gen_bool(chance) {
            windows.push(Window::new(x, south, 1));
        }
    }
    for z in (1..length - 1).step_by(step) {
        if rng.gen_bool(chance) {
            windows.push(Window::new(east, z, 1));
        }
    }
    for z in (1..length - 1).step_by(step) {
        if rng.gen_bool(chance) {
            windows.push(Window::new(0, z, 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::Facing;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const STYLES: [WindowStyle; 5] = [
        WindowStyle::Full,
        WindowStyle::Large,
        WindowStyle::Lattice,
        WindowStyle::Open,
        WindowStyle::Small,
    ];

    #[test]
    fn test_windows_stay_on_walls() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let door = Door { x: 4, z: 7, facing: Facing::North };
        for style in STYLES {
            for _ in 0..20 {
                for w in generate_windows(style, 9, 8, 5, &door, &mut rng) {
                    assert!(w.x == 0 || w.x == 8 || w.z == 0 || w.z == 7, "{:?}", w);
                    assert!((0..9).contains(&w.x) && (0..8).contains(&w.z));
                    assert!(w.tier == 1 || w.tier == 2);
                }
            }
        }
    }

    #[test]
    fn test_no_window_at_door_on_any_wall() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let doors = [
            Door { x: 3, z: 0, facing: Facing::South },
            Door { x: 3, z: 6, facing: Facing::North },
            Door { x: 6, z: 3, facing: Facing::West },
            Door { x: 0, z: 3, facing: Facing::East },
        ];
        for style in STYLES {
            for door in &doors {
                for _ in 0..30 {
                    let windows = generate_windows(style, 7, 7, 4, door, &mut rng);
                    assert!(!windows.iter().any(|w| w.x == door.x && w.z == door.z));
                }
            }
        }
    }

    #[test]
    fn test_upper_tier_only_in_tall_open_houses() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let door = Door { x: 3, z: 6, facing: Facing::North };
        for _ in 0..30 {
            let low = generate_windows(WindowStyle::Open, 7, 7, 3, &door, &mut rng);
            assert!(low.iter().all(|w| w.tier == 1));
        }
        let tall: Vec<Window> = (0..30)
            .flat_map(|_| generate_windows(WindowStyle::Open, 7, 7, 5, &door, &mut rng))
            .collect();
        assert!(tall.iter().any(|w| w.tier == 2));
    }

    #[test]
    fn test_large_windows_skip_south_wall_with_door() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let door = Door { x: 4, z: 7, facing: Facing::North };
        for _ in 0..30 {
            let windows = generate_windows(WindowStyle::Large, 9, 8, 4, &door, &mut rng);
            assert!(windows.iter().all(|w| w.z != 7 || w.x == 0 || w.x == 8));
        }
    }
}
