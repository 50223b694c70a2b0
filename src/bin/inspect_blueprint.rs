//! Print one generated blueprint with an ASCII floor plan

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use stilt_planner::blueprint::{generate_blueprint, Blueprint, BlueprintRequest, StyleTable};

#[derive(Parser, Debug)]
#[command(name = "inspect_blueprint")]
#[command(about = "Generate a single stilt house blueprint and print it")]
struct Args {
    /// traditional, modern, asian, tropical or nordic (random if not specified)
    #[arg(long)]
    style: Option<String>,

    /// small, medium or large (random if not specified)
    #[arg(long)]
    size: Option<String>,

    /// Wood type, e.g. oak or spruce (random if not specified)
    #[arg(long)]
    wood: Option<String>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Style table JSON (built-in styles if not specified)
    #[arg(long)]
    styles: Option<String>,

    /// Print the blueprint as JSON instead
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let styles = match &args.styles {
        Some(path) => match StyleTable::from_json_file(path) {
            Ok(table) => table,
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        },
        None => StyleTable::builtin(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let request = BlueprintRequest::from_names(args.style.as_deref(), args.size.as_deref(), args.wood.as_deref());

    let blueprint = match generate_blueprint(&request, &styles, &mut rng) {
        Ok(bp) => bp,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&blueprint) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Seed: {}", seed);
    blueprint.print_summary();
    println!();
    print_floor_plan(&blueprint);
}

/// One character per footprint cell, north at the top.
fn floor_plan_char(bp: &Blueprint, x: i32, z: i32) -> char {
    if !bp.is_footprint_cell(x, z) {
        return ' ';
    }
    if bp.door.x == x && bp.door.z == z {
        return 'D';
    }
    if bp.furniture.iter().any(|f| f.x == x && f.z == z) {
        return 'f';
    }
    if bp.supports.iter().any(|s| s.x == x && s.z == z) {
        return '#';
    }
    if bp.windows.iter().any(|w| w.x == x && w.z == z) {
        return 'w';
    }
    '.'
}

fn print_floor_plan(bp: &Blueprint) {
    println!("Floor plan (# support, D door, w window, f furniture):");
    for z in 0..bp.length {
        let row: String = (0..bp.width).map(|x| floor_plan_char(bp, x, z)).collect();
        println!("  {}", row);
    }
}
