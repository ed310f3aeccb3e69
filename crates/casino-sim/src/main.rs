use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use casino_core::model::player::Seat;
use casino_sim::simulator::{SimConfig, run};

/// Bot-vs-bot simulation harness for the Casino engine.
#[derive(Debug, Parser)]
#[command(
    name = "casino-sim",
    author,
    version,
    about = "Deterministic Casino bot simulation harness"
)]
struct Cli {
    /// Number of games to play.
    #[arg(long, value_name = "GAMES", default_value_t = 100)]
    games: usize,

    /// RNG seed for the run; omit for a random one.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Cumulative score that ends a match.
    #[arg(long, value_name = "POINTS", default_value_t = 21)]
    target: u32,

    /// Write one JSON row per game to this file.
    #[arg(long, value_name = "FILE")]
    jsonl: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = SimConfig {
        games: cli.games,
        seed: cli.seed.unwrap_or_else(rand::random),
        target: cli.target,
    };

    println!(
        "Running {} game{} (seed {}, target {})",
        config.games,
        if config.games == 1 { "" } else { "s" },
        config.seed,
        config.target
    );

    let summary = run(&config)?;

    if let Some(path) = cli.jsonl.as_ref() {
        let file = File::create(path)
            .with_context(|| format!("creating report file at {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        for row in &summary.rows {
            serde_json::to_writer(&mut writer, row)?;
            writeln!(writer)?;
        }
        writer.flush()?;
        println!("Report: {} rows at {}", summary.rows.len(), path.display());
    }

    let total_rounds: u32 = summary.rows.iter().map(|r| r.rounds).sum();
    for seat in Seat::LOOP {
        println!("  {seat}: {} wins", summary.wins[seat.index()]);
    }
    if !summary.rows.is_empty() {
        println!(
            "Average rounds per game: {:.1}",
            total_rounds as f64 / summary.rows.len() as f64
        );
    }

    Ok(())
}
