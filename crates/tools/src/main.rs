use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foundation::math::LonLat;
use markers::{MapEngine, marker_scale};
use serde::Serialize;
use tools::{Script, ToolResult, load_config, load_points, load_regions, replay};
use tracing::info;
use tracing_subscriber::EnvFilter;
use visibility::{Viewport, VisibilityDecision};

#[derive(Parser, Debug)]
#[command(author, version, about = "Viewport-adaptive point-of-interest marker engine")]
struct Args {
    /// Point records (JSON array of {name, coordinates, categories, images, ...})
    #[arg(long)]
    points: PathBuf,

    /// Media manifest used to fill in records without images
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Engine config overrides (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Region polygons (JSON array of {name, ring})
    #[arg(long)]
    regions: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the visibility decision for one viewport
    Select {
        #[arg(long)]
        zoom: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
    },

    /// Run a scripted session and print every surface side effect
    Replay {
        /// Script file (JSON {start?, steps: [...]})
        script: PathBuf,
    },
}

#[derive(Serialize)]
struct SelectOutput<'a> {
    viewport: Viewport,
    region: Option<&'a str>,
    marker_scale: f64,
    decision: VisibilityDecision,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> ToolResult<()> {
    let args = Args::parse();
    let points = load_points(&args.points, args.manifest.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let regions = load_regions(args.regions.as_deref())?;

    match args.command {
        Command::Select { zoom, lon, lat } => {
            let viewport = Viewport::new(zoom, LonLat::new(lon, lat));
            let engine = MapEngine::with_point_set(points, config)?;
            let output = SelectOutput {
                viewport,
                region: regions.region_at(viewport.center),
                marker_scale: marker_scale(zoom),
                decision: engine.preview(viewport),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Replay { script } => {
            let raw = std::fs::read_to_string(&script).map_err(|e| format!("read {script:?}: {e}"))?;
            let script: Script = serde_json::from_str(&raw)?;
            let mut engine = MapEngine::with_point_set(points, config)?.with_regions(regions);
            let output = replay(&mut engine, &script);
            info!(
                recomputes = output.stats.recomputes,
                events = output.events.len(),
                "replay finished"
            );
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
