use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use stilt_planner::adaptation::{Renderer, SiteAnchor};
use stilt_planner::blueprint::{Blueprint, BlueprintRequest, StyleTable};
use stilt_planner::config::PlannerConfig;
use stilt_planner::error::{write_json, Result};
use stilt_planner::pipeline::{SettlementPlan, SettlementPlanner};
use stilt_planner::seeds::PlannerSeeds;
use stilt_planner::synthetic::{GridWorld, SyntheticTerrain};
use stilt_planner::terrain::{GridSource, JsonGridSource};

#[derive(Parser, Debug)]
#[command(name = "stilt_planner")]
#[command(about = "Find building sites on a terrain grid and design a stilt house for each")]
struct Args {
    /// Grid JSON file (synthetic Perlin terrain if not specified)
    #[arg(long)]
    grid: Option<String>,

    /// Width of the synthetic grid in blocks
    #[arg(short = 'W', long, default_value = "100")]
    width: usize,

    /// Height of the synthetic grid in blocks
    #[arg(short = 'H', long, default_value = "100")]
    height: usize,

    /// World x of the synthetic grid's first column
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    origin_x: i32,

    /// World z of the synthetic grid's first row
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    origin_z: i32,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum number of houses (capped at 25)
    #[arg(long)]
    houses: Option<usize>,

    /// Houses to reach before giving up on relaxed spacing
    #[arg(long)]
    min_houses: Option<usize>,

    /// Minimum distance between houses in blocks (at least 20)
    #[arg(long)]
    min_distance: Option<f32>,

    /// Planner configuration JSON
    #[arg(long)]
    config: Option<String>,

    /// Style table JSON (built-in styles if not specified)
    #[arg(long)]
    styles: Option<String>,

    /// Force a style for every house
    #[arg(long)]
    style: Option<String>,

    /// Force a size class for every house
    #[arg(long)]
    size: Option<String>,

    /// Force a wood type for every house
    #[arg(long)]
    wood: Option<String>,

    /// Write the plan as JSON to this file
    #[arg(short, long)]
    output: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Renderer printing one line per house, with a teleport command to visit it.
#[derive(Default)]
struct ConsoleRenderer {
    count: usize,
}

impl Renderer for ConsoleRenderer {
    fn render(&mut self, blueprint: &Blueprint, anchor: &SiteAnchor) -> Result<()> {
        self.count += 1;
        println!(
            "  House {:>2}: {} {} ({} wood) at ({}, {}, {}), stilts {}, floor {}",
            self.count,
            blueprint.size,
            blueprint.style,
            blueprint.materials.wood,
            anchor.x,
            anchor.ground_y,
            anchor.z,
            anchor.stilt_height,
            anchor.floor_level
        );
        println!(
            "           /tp @p {} {} {}",
            anchor.x + blueprint.width / 2,
            anchor.floor_level + 1,
            anchor.z + blueprint.length / 2
        );
        Ok(())
    }
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    FmtSubscriber::builder().with_env_filter(filter).init();

    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PlannerConfig::from_json_file(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(houses) = args.houses {
        config.placement.max_houses = houses;
    }
    if let Some(min_houses) = args.min_houses {
        config.placement.min_houses = min_houses;
    }
    if let Some(min_distance) = args.min_distance {
        config.placement.min_distance = min_distance;
    }

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    let seeds = PlannerSeeds::from_master(seed);
    println!("Planning settlement with seed: {}", seed);

    let styles = match &args.styles {
        Some(path) => StyleTable::from_json_file(path)?,
        None => StyleTable::builtin(),
    };

    let raw = match &args.grid {
        Some(path) => {
            println!("Loading grid from {}...", path);
            JsonGridSource { path: path.clone() }.load()?
        }
        None => {
            println!("Generating {}x{} synthetic terrain...", args.width, args.height);
            SyntheticTerrain::new(args.width, args.height, seeds.terrain)
                .with_origin(args.origin_x, args.origin_z)
                .load()?
        }
    };
    let world_grid = raw.clone();
    let world = GridWorld::new(&world_grid);

    let request = BlueprintRequest::from_names(args.style.as_deref(), args.size.as_deref(), args.wood.as_deref());
    let planner = SettlementPlanner::new(config.placement.clone(), &styles, seeds).with_request(request);

    println!(
        "Selecting up to {} sites (spacing {} blocks)...",
        config.placement.effective_max_houses(),
        config.placement.effective_min_distance()
    );
    let mut renderer = ConsoleRenderer::default();
    let plan = planner.plan(raw, &world, &mut renderer)?;

    print_plan(&plan);

    if let Some(path) = &args.output {
        write_json(path, &plan)?;
        println!("Plan written to {}", path);
    }

    Ok(())
}

fn print_plan(plan: &SettlementPlan) {
    println!();
    plan.report.print_summary();
    println!();
    println!("Sites:");
    for house in &plan.houses {
        println!(
            "  #{:<2} ({}, {}) {} on {}, trees {}, score {:.3}",
            house.index + 1,
            house.site.x,
            house.site.z,
            house.site.tier,
            house.site.category,
            house.tree_status,
            house.site.boosted_score
        );
    }
}
