//! Self-play match generation CLI.
//!
//! Plays engine-vs-engine matches and writes one JSON record per match.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N         Number of matches to play (default: 10)
//!   --blue-depth N    Search depth for Blue (default: 2)
//!   --red-depth N     Search depth for Red (default: 2)
//!   --max-turns N     Turn limit per match (default: 200)
//!   --exploration P   Probability of a random move (default: 0.0)
//!   --threads N       Number of parallel threads (default: 4)
//!   --seed N          Random seed, 0 for entropy (default: 0)
//!   --config FILE     Game rules as JSON (default: built-in rules)
//!   --output FILE     Output file path (default: stdout)
//!   --quiet           Suppress progress and summary output

use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use chroma_clash::config::GameConfig;
use chroma_clash::selfplay::{self, SelfPlayConfig};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    match parse_args(&args, &mut config, &mut output_path) {
        Ok(true) => {}
        Ok(false) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = config.game.validate() {
        eprintln!("invalid game rules: {}", e);
        return ExitCode::FAILURE;
    }

    if !config.quiet {
        eprintln!(
            "Self-play: {} games, depth {}/{}, max {} turns, {}x{} grid, {} threads",
            config.num_games,
            config.blue_depth,
            config.red_depth,
            config.max_turns,
            config.game.grid_size,
            config.game.grid_size,
            config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        eprintln!("{}", selfplay::summarize(&games));
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            selfplay::write_jsonl(&games, &mut BufWriter::new(stdout.lock()))
        }
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        return ExitCode::FAILURE;
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        eprintln!("Wrote {} games to {}", games.len(), path);
    }
    ExitCode::SUCCESS
}

/// Applies command-line flags to `config`. Returns `Ok(false)` when help
/// was requested.
fn parse_args(
    args: &[String],
    config: &mut SelfPlayConfig,
    output_path: &mut Option<String>,
) -> Result<bool, String> {
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--games" => config.num_games = value(args, &mut i, flag)?,
            "--blue-depth" => config.blue_depth = value(args, &mut i, flag)?,
            "--red-depth" => config.red_depth = value(args, &mut i, flag)?,
            "--max-turns" => config.max_turns = value(args, &mut i, flag)?,
            "--exploration" => config.exploration = value(args, &mut i, flag)?,
            "--threads" => config.threads = value(args, &mut i, flag)?,
            "--seed" => config.seed = value(args, &mut i, flag)?,
            "--config" => {
                let path: String = value(args, &mut i, flag)?;
                let text = fs::read_to_string(&path)
                    .map_err(|e| format!("failed to read {}: {}", path, e))?;
                config.game = GameConfig::from_json(&text).map_err(|e| e.to_string())?;
            }
            "--output" => *output_path = Some(value(args, &mut i, flag)?),
            "--quiet" => config.quiet = true,
            "--help" | "-h" => return Ok(false),
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(true)
}

/// Consumes and parses the value following `flag`.
fn value<T: FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T, String> {
    *i += 1;
    let raw = args
        .get(*i)
        .ok_or_else(|| format!("missing value for {}", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value: {}", flag, raw))
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of matches to play (default: 10)");
    eprintln!("  --blue-depth N    Search depth for Blue (default: 2)");
    eprintln!("  --red-depth N     Search depth for Red (default: 2)");
    eprintln!("  --max-turns N     Turn limit per match (default: 200)");
    eprintln!("  --exploration P   Probability of a random move (default: 0.0)");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --seed N          Random seed, 0 for entropy (default: 0)");
    eprintln!("  --config FILE     Game rules as JSON (default: built-in rules)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}
