//! # Spire Main Entry Point
//!
//! Builds a stage map from a description file or a seed, prints it, and can
//! walk it automatically from the start node to the boss.

use clap::Parser;
use log::{info, warn, LevelFilter};
use spire::{GenerationConfig, MapLayout, MapSource, Run, SpireResult};
use std::path::PathBuf;
use std::str::FromStr;

/// Command line arguments for the Spire map tool.
#[derive(Parser, Debug)]
#[command(name = "spire")]
#[command(about = "Generate, inspect and walk card battler stage maps")]
#[command(version)]
struct Args {
    /// Random seed for map generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON map description; takes precedence over generation options
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Number of map rows, including start and boss
    #[arg(long)]
    rows: Option<u32>,

    /// Number of column slots per row
    #[arg(long)]
    columns: Option<u32>,

    /// Height of the map container used for layout
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the map description as JSON
    #[arg(long)]
    json: bool,

    /// Select the first selectable node until the run ends
    #[arg(long)]
    walk: bool,
}

fn main() -> SpireResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Spire v{}", spire::VERSION);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut config = GenerationConfig::new(seed);
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(columns) = args.columns {
        config.columns = columns;
    }

    if args.map.is_some() && (args.rows.is_some() || args.columns.is_some() || args.seed.is_some()) {
        warn!("A map description was given; generation options are ignored");
    }

    let source = MapSource::choose(args.map.as_deref(), config);
    if let MapSource::Generated(config) = &source {
        info!("Generating map with seed {}", config.seed);
    }

    let mut run = Run::new(&source, MapLayout::new(), args.height)?;

    if args.json {
        println!("{}", run.map().to_description().to_json()?);
    } else {
        print_map(&run);
    }

    if args.walk {
        walk(&mut run);
    }

    Ok(())
}

/// Initializes `env_logger` with the requested level.
fn initialize_logging(log_level: &str) {
    let level = LevelFilter::from_str(log_level).unwrap_or_else(|_| {
        eprintln!("Unknown log level '{}', using info", log_level);
        LevelFilter::Info
    });

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}

/// Prints the map row by row, boss first.
fn print_map(run: &Run) {
    let map = run.map();
    println!("Map '{}' ({} rows x {} columns)", map.id, map.rows(), map.columns());

    for row in (0..map.rows()).rev() {
        let cells: Vec<String> = map
            .row_ids(row)
            .iter()
            .filter_map(|id| map.get_node(id))
            .map(|node| {
                let targets: Vec<&str> = node.connections.iter().map(|c| c.as_str()).collect();
                format!(
                    "{}[{}|{}] -> {{{}}}",
                    node.id,
                    node.kind.label(),
                    node.state,
                    targets.join(",")
                )
            })
            .collect();
        println!("{:>3}: {}", row, cells.join("  "));
    }
}

/// Walks the map until nothing is selectable.
fn walk(run: &mut Run) {
    while let Some(id) = run.auto_step() {
        if let Some(request) = run.proceed() {
            println!(
                "Step {}: {} ({}) -> frontier {:?}",
                run.map().current_level,
                id,
                request.kind.label(),
                run.map()
                    .selectable_nodes()
                    .iter()
                    .map(|n| n.as_str())
                    .collect::<Vec<_>>()
            );
        }
    }

    let stats = run.statistics();
    println!(
        "Run ended: {:?} after {} nodes",
        run.completion(),
        stats.nodes_completed
    );
}
