#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a headless round of Lawn Defence.

mod config;
mod layout_transfer;

use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use lawn_defence_core::{CellCoord, GameConfig, Outcome, PlantKind, PowerupKind, TICK_QUANTUM};
use lawn_defence_engine::{Engine, GameHost};
use lawn_defence_world::query;
use tracing_subscriber::EnvFilter;

use crate::layout_transfer::GardenLayout;

/// Plays one round of Lawn Defence without a window and reports the result.
#[derive(Debug, Parser)]
#[command(name = "lawn-defence", version, about, long_about = None)]
struct CliArgs {
    /// TOML file overriding parts of the default configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the deterministic random number generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds after which the round is abandoned.
    #[arg(long, default_value_t = 600)]
    max_seconds: u64,

    /// Plant to grow before the first tick, e.g. `peashooter@2:1`.
    #[arg(long = "plant", value_name = "KIND@ROW:COL")]
    plants: Vec<PlantOrder>,

    /// Garden layout string previously produced by `--export-layout`.
    #[arg(long, value_name = "LAYOUT")]
    layout: Option<String>,

    /// Collect every sun as soon as it appears.
    #[arg(long)]
    auto_collect: bool,

    /// Powerup to trigger at a simulated time, e.g. `cherry_bomb@45`.
    #[arg(long = "powerup", value_name = "KIND@SECONDS")]
    powerups: Vec<PowerupOrder>,

    /// Print the final garden as a layout string.
    #[arg(long)]
    export_layout: bool,
}

/// Plant requested on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PlantOrder {
    kind: PlantKind,
    cell: CellCoord,
}

impl FromStr for PlantOrder {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let (kind, position) = value
            .split_once('@')
            .with_context(|| format!("expected KIND@ROW:COL, got `{value}`"))?;
        let (row, column) = position
            .split_once(':')
            .with_context(|| format!("expected ROW:COL after `@`, got `{position}`"))?;
        let row = row
            .trim()
            .parse::<u32>()
            .with_context(|| format!("invalid row `{row}`"))?;
        let column = column
            .trim()
            .parse::<u32>()
            .with_context(|| format!("invalid column `{column}`"))?;

        Ok(Self {
            kind: kind.parse()?,
            cell: CellCoord::new(column, row),
        })
    }
}

/// Powerup scheduled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PowerupOrder {
    kind: PowerupKind,
    at: Duration,
}

impl FromStr for PowerupOrder {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let (kind, seconds) = value
            .split_once('@')
            .with_context(|| format!("expected KIND@SECONDS, got `{value}`"))?;
        let seconds = seconds
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid time `{seconds}`"))?;

        Ok(Self {
            kind: kind.parse()?,
            at: Duration::from_secs(seconds),
        })
    }
}

/// Host that remembers how the round ended.
#[derive(Debug, Default)]
struct ConsoleHost {
    final_score: Option<u64>,
    lost: bool,
}

impl GameHost for ConsoleHost {
    fn on_game_over(&mut self) {
        self.lost = true;
        tracing::info!("the zombies ate your brains");
    }

    fn on_level_complete(&mut self, score: u64) {
        self.final_score = Some(score);
        tracing::info!(score, "the lawn is safe");
    }
}

/// Entry point for the Lawn Defence command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => config::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut engine = Engine::new(config).context("invalid game configuration")?;
    println!("{}", query::welcome_banner(engine.world()));

    if let Some(layout) = &args.layout {
        plant_layout(&mut engine, layout)?;
    }
    for order in &args.plants {
        plant(&mut engine, order.kind, order.cell);
    }

    let mut host = ConsoleHost::default();
    run(&mut engine, &mut host, &args);

    let snapshot = engine.snapshot();
    let verdict = match engine.outcome() {
        Some(Outcome::Won) => "won",
        Some(Outcome::Lost) => "lost",
        None => "unfinished",
    };
    tracing::debug!(status = %snapshot.debug_status, lost = host.lost, final_score = ?host.final_score, "round finished");
    println!(
        "{verdict} after {:.1}s: wave {}/{}, score {}, kills {}, sun {}, plants {}",
        snapshot.clock_ms as f64 / 1_000.0,
        snapshot.wave,
        snapshot
            .final_wave
            .map_or_else(|| "-".to_owned(), |wave| wave.to_string()),
        snapshot.score,
        snapshot.kills,
        snapshot.sun,
        snapshot.plants.len(),
    );

    if args.export_layout {
        let board = engine.config().board;
        let layout = GardenLayout::from_plants(board.columns(), board.rows(), &snapshot.plants);
        println!("{}", layout.encode()?);
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn plant_layout(engine: &mut Engine, encoded: &str) -> Result<()> {
    let layout = GardenLayout::decode(encoded).context("invalid --layout value")?;
    let board = engine.config().board;
    ensure!(
        layout.columns == board.columns() && layout.rows == board.rows(),
        "layout is for a {}x{} lawn but the configured lawn is {}x{}",
        layout.columns,
        layout.rows,
        board.columns(),
        board.rows()
    );

    for entry in &layout.plants {
        plant(engine, entry.kind, entry.cell);
    }
    Ok(())
}

fn plant(engine: &mut Engine, kind: PlantKind, cell: CellCoord) {
    match engine.place_plant(kind, cell) {
        Ok(plant) => tracing::info!(plant = plant.get(), %kind, ?cell, "planted"),
        Err(reason) => tracing::warn!(%kind, ?cell, %reason, "could not plant"),
    }
}

fn run(engine: &mut Engine, host: &mut ConsoleHost, args: &CliArgs) {
    let mut powerups = args.powerups.clone();
    powerups.sort_by_key(|order| order.at);
    let mut next_powerup = 0;

    let deadline = Duration::from_secs(args.max_seconds);
    let mut elapsed = Duration::ZERO;
    while elapsed < deadline && engine.outcome().is_none() {
        while let Some(order) = powerups.get(next_powerup) {
            if order.at > elapsed {
                break;
            }
            next_powerup += 1;
            if let Err(reason) = engine.use_powerup(order.kind) {
                tracing::warn!(kind = %order.kind, %reason, "powerup refused");
            }
        }

        let _ = engine.advance(TICK_QUANTUM, host);
        elapsed += TICK_QUANTUM;

        if args.auto_collect {
            for sun in query::suns(engine.world()) {
                let _ = engine.collect_sun(sun.id);
            }
        }
    }
}
