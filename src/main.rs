//! chroma-clash -- a chain-reaction grid game engine speaking a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to see them.

use std::io::{self, BufRead};
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::thread;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use chroma_clash::engine::Engine;
use chroma_clash::protocol::{parse_command, Command};

/// Runs the main protocol loop. A reader thread parses stdin and feeds
/// commands to this thread, which answers them on stdout. `stop` is also
/// raised on the shared flag as soon as it is read, so it reaches a search
/// that is still running.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    let stop = engine.stop_flag();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            let cmd = match parse_command(&line) {
                Some(c) => c,
                None => continue,
            };
            if cmd == Command::Stop {
                stop.store(true, Ordering::Relaxed);
            }
            let quit = cmd == Command::Quit;
            if tx.send(cmd).is_err() || quit {
                break;
            }
        }
    });

    for cmd in rx {
        match cmd {
            Command::Cci => engine.handle_cci(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref()) {
                    report(&mut out, &e)?;
                }
            }
            Command::NewGame => engine.new_game(),
            Command::Position {
                turn,
                player,
                board,
            } => {
                if let Err(e) = engine.set_position(turn, player, &board) {
                    report(&mut out, &e)?;
                }
            }
            Command::Move { row, col } => engine.handle_move(row, col, &mut out)?,
            Command::Go(params) => engine.handle_go(params, &mut out)?,
            Command::Pause => engine.handle_pause(&mut out)?,
            Command::Resume => engine.handle_resume(&mut out)?,
            Command::Show => engine.handle_show(&mut out)?,
            Command::Stop => {
                // Any search this stop was meant for has already returned.
                debug!("stop with no search running");
                engine.clear_stop();
            }
            Command::Quit => break,
        }
    }
    Ok(())
}

fn report<W: io::Write>(out: &mut W, err: &dyn std::error::Error) -> io::Result<()> {
    writeln!(out, "error {}", err)?;
    out.flush()
}
