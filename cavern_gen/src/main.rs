// Cavern generator: CLI entry point.
//
// Generates one cave, paints it onto an in-memory `TileGrid<char>`, and
// prints it to stdout, north at the top. Optionally dumps the curve tree and
// every tile set as JSON for inspection in other tools.
//
// Usage:
//   cargo run -p cavern_gen -- [--seed N] [--preset NAME | --config PATH]
//     [--json PATH] [--no-ascii]
//
// Presets: default, warren, grotto. Log verbosity follows RUST_LOG
// (default `cavern_gen=info`); logs go to stderr.

use cavern_gen::bezier_map::CurveTree;
use cavern_gen::cave::CaveMap;
use cavern_gen::config::CaveConfig;
use cavern_gen::contour::{Contour, ShadowPlacement};
use cavern_gen::error::{CaveError, Result};
use cavern_gen::prng::CaveRng;
use cavern_gen::tilemap::{TileGrid, TilePalette, paint};
use cavern_gen::types::TileCoord;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cavern_gen=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("cavegen: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let seed: u64 = parse_flag(&args, "--seed")?.unwrap_or_else(clock_seed);
    let config = load_config(&args)?;
    config.validate()?;

    tracing::info!(
        seed,
        trunk_pivots = config.trunk_pivot_count,
        branches = config.branch_count,
        "generating cave"
    );

    let mut rng = CaveRng::new(seed);
    let map = CaveMap::generate(&config, &mut rng)?;

    if !has_flag(&args, "--no-ascii") {
        let mut grid = TileGrid::new();
        paint(&mut grid, &map, &TilePalette::ascii());
        print!("{}", grid.to_ascii(' '));
    }

    if let Some(path) = parse_flag::<String>(&args, "--json")? {
        write_dump(Path::new(&path), seed, &config, &map)?;
        tracing::info!(path = %path, "wrote map dump");
    }
    Ok(())
}

fn load_config(args: &[String]) -> Result<CaveConfig> {
    if let Some(path) = parse_flag::<String>(args, "--config")? {
        return CaveConfig::from_file(Path::new(&path));
    }
    let name: String = parse_flag(args, "--preset")?.unwrap_or_else(|| "default".to_string());
    CaveConfig::preset(&name).ok_or_else(|| CaveError::InvalidConfiguration {
        field: "preset",
        reason: format!("unknown preset '{name}' (expected default, warren, or grotto)"),
    })
}

/// JSON view of a generated map. Tile sets are emitted sorted so dumps of
/// the same seed diff cleanly.
#[derive(Serialize)]
struct MapDump<'a> {
    seed: u64,
    config: &'a CaveConfig,
    tree: &'a CurveTree,
    walls: Vec<TileCoord>,
    floors: Vec<TileCoord>,
    contours: Vec<(TileCoord, Contour)>,
    shadows: &'a [ShadowPlacement],
}

fn write_dump(path: &Path, seed: u64, config: &CaveConfig, map: &CaveMap) -> Result<()> {
    let mut walls: Vec<TileCoord> = map.walls.iter().copied().collect();
    walls.sort_unstable();
    let mut floors: Vec<TileCoord> = map.floors.iter().copied().collect();
    floors.sort_unstable();
    let mut contours: Vec<(TileCoord, Contour)> =
        map.contours.iter().map(|(&t, &c)| (t, c)).collect();
    contours.sort_unstable();

    let dump = MapDump {
        seed,
        config,
        tree: &map.tree,
        walls,
        floors,
        contours,
        shadows: &map.shadows,
    };
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Value following `flag`, parsed. `Ok(None)` if the flag is absent; an
/// error if it is present with a missing or unparseable value.
fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &'static str) -> Result<Option<T>> {
    let Some(i) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    let value = args
        .get(i + 1)
        .filter(|v| !v.starts_with("--"))
        .ok_or_else(|| CaveError::InvalidConfiguration {
            field: flag,
            reason: "expects a value".to_string(),
        })?;
    value.parse().map(Some).map_err(|_| CaveError::InvalidConfiguration {
        field: flag,
        reason: format!("cannot parse '{value}'"),
    })
}
