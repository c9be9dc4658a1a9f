//! Console Reaction Machine
//!
//! Plays the reaction game in a terminal on the tokio scheduler.
//!
//! Controls (one per line):
//! - `c`: insert a coin
//! - `g` or an empty line: go/stop
//! - `r`: reset the machine
//! - `q`: quit
//!
//! Run with: cargo run --example console [-- path/to/game.toml]
//! Set `RUST_LOG=reflex=debug` to watch the phase transitions.

use anyhow::Context;
use reflex::ports::{DisplaySink, RandomDelay};
use reflex::scheduler::TokioScheduler;
use reflex::{GameConfig, ReactionController};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn set_display(&self, text: &str) {
        println!("[ {text} ]");
    }
}

fn load_config() -> anyhow::Result<GameConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(GameConfig::default());
    };
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    GameConfig::from_toml_str(&raw).with_context(|| format!("parsing {path}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_config()?;
    let controller = ReactionController::builder()
        .display(Arc::new(ConsoleDisplay))
        .scheduler(Arc::new(TokioScheduler::try_current()?))
        .delay_source(Arc::new(RandomDelay::new()))
        .config(config)
        .build()?;

    println!("=== Reaction Machine ===");
    println!("c = coin, g/enter = go/stop, r = reset, q = quit\n");
    controller.initialize();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "c" => controller.coin_inserted(),
            "g" | "" => controller.go_stop_pressed(),
            "r" => controller.initialize(),
            "q" => break,
            other => println!("unknown command {other:?}"),
        }
    }

    let snapshot = controller.snapshot();
    tracing::info!(phase = %snapshot.phase, rounds = snapshot.rounds_played, "machine stopped");
    println!("{}", snapshot.to_json()?);
    Ok(())
}
