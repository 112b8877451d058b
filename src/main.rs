//! Headless self-play runner (default binary).
//!
//! Plays the hinted move repeatedly and prints the board after each one.
//!
//! ```text
//! match3 [CONFIG.toml] [--json]
//! ```
//!
//! `MATCH3_SEED` overrides the configured seed, `MATCH3_MOVES` sets how many
//! moves to play (default 20). `--json` prints one snapshot per line instead
//! of the text board. Logging goes to stderr and is controlled by `RUST_LOG`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use match3::engine::{Engine, EngineConfig};

const DEFAULT_MOVES: u32 = 20;

struct Args {
    config: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        json: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => args.json = true,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => {
                if args.config.is_some() {
                    bail!("only one config path may be given");
                }
                args.config = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

fn env_u32(name: &str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be an unsigned integer, got {value:?}")),
        Err(_) => Ok(None),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = env_u32("MATCH3_SEED")? {
        config.seed = seed;
    }
    let moves = env_u32("MATCH3_MOVES")?.unwrap_or(DEFAULT_MOVES);

    let mut engine = Engine::new(&config).context("generating the initial board")?;
    tracing::info!(seed = config.seed, moves, "starting self-play");
    if !args.json {
        println!("seed {}\n{}", config.seed, engine.board());
    }

    for turn in 1..=moves {
        let Some(mv) = engine.hint() else {
            bail!("no valid move on an idle board");
        };
        engine
            .play(mv)
            .with_context(|| format!("resolving move {turn}"))?;
        engine.drain_events();

        if args.json {
            println!("{}", serde_json::to_string(&engine.snapshot())?);
        } else {
            println!("move {turn}: {mv}\n{}", engine.board());
        }
    }

    let session = engine.session();
    if args.json {
        println!("{}", serde_json::to_string(session)?);
    } else {
        println!(
            "removed {} tiles in {} moves, {} cascades (longest {}), {} reshuffles",
            session.removed_total,
            session.moves_accepted,
            session.cascades,
            session.longest_chain,
            session.reshuffles
        );
    }
    Ok(())
}
