//! Integration tests for the chroma-clash engine binary.
//!
//! Tests the full protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_chroma-clash");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start chroma-clash");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn bestmove(line: &str) -> (usize, usize) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    assert_eq!(parts[0], "bestmove", "not a bestmove line: {}", line);
    assert_eq!(parts[3], "score", "malformed bestmove line: {}", line);
    (parts[1].parse().unwrap(), parts[2].parse().unwrap())
}

#[test]
fn cci_handshake() {
    let lines = run_engine(&["cci", "quit"]);

    assert_eq!(lines.first().map(String::as_str), Some("id name chroma-clash"));
    assert_eq!(lines.last().map(String::as_str), Some("cciok"));
    let option_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert!(!option_lines.is_empty(), "handshake should include option declarations");
    for opt in &option_lines {
        assert!(opt.contains("type "), "option line missing type: {}", opt);
    }
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn unknown_and_empty_lines_are_ignored() {
    let lines = run_engine(&["foobar", "", "  ", "nonsense", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn setoption_then_show() {
    let lines = run_engine(&[
        "setoption name GridSize value 3",
        "setoption name CriticalMass value 4",
        "show",
        "quit",
    ]);
    assert_eq!(lines[0], "board .,.,./.,.,./.,.,.");
    assert_eq!(lines[1], "status playing turn 0 player blue blue 0 red 0 neutral 9");
}

#[test]
fn invalid_option_reports_error() {
    let lines = run_engine(&[
        "setoption name GridSize value 1",
        "setoption name Colour value 2",
        "isready",
        "quit",
    ]);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("error "), "{}", lines[0]);
    assert_eq!(lines[1], "error unknown option: Colour");
    assert_eq!(lines[2], "readyok");
}

#[test]
fn opening_moves_and_rejections() {
    let lines = run_engine(&[
        "move 2 2",
        "move 2 2",
        "move 6 0",
        "move 3 3",
        "move 3 3",
        "show",
        "quit",
    ]);
    assert_eq!(lines[0], "info move 2 2 explosions 0 steps 0 settled true");
    assert_eq!(lines[1], "error cell cannot be selected in the current phase");
    assert_eq!(lines[2], "error cell position is outside the grid");
    assert_eq!(lines[3], "info move 3 3 explosions 0 steps 0 settled true");
    // Turn 2: Blue may only reinforce its own cell at (2, 2).
    assert_eq!(lines[4], "error cell cannot be selected in the current phase");
    assert!(lines[5].starts_with("board "));
    assert_eq!(lines[6], "status playing turn 2 player blue blue 1 red 1 neutral 34");
}

#[test]
fn position_then_capture_ends_game() {
    let lines = run_engine(&[
        "position 4 blue b2,r1,./.,.,./.,.,.",
        "move 0 0",
        "go",
        "show",
        "quit",
    ]);
    assert_eq!(lines[0], "info move 0 0 explosions 1 steps 1 settled true");
    assert_eq!(lines[1], "gameover winner blue");
    assert_eq!(lines[2], "error game is not in playing state");
    assert_eq!(lines[3], "board .,b2,./b1,.,./.,.,.");
    assert_eq!(
        lines[4],
        "status over turn 5 player blue blue 2 red 0 neutral 7 winner blue"
    );
}

#[test]
fn bad_position_reports_error() {
    let lines = run_engine(&["position 3 blue b1,./.", "position 3 green ./.", "quit"]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("error invalid board:"), "{}", lines[0]);
}

#[test]
fn go_produces_legal_bestmove() {
    let lines = run_engine(&[
        "setoption name Seed value 7",
        "position 2 red .,.,./.,b1,./.,.,r1",
        "go depth 3",
        "quit",
    ]);
    let info = lines.iter().find(|l| l.starts_with("info depth 3 ")).unwrap();
    assert!(info.contains("candidates 1"), "{}", info);
    let line = lines.iter().find(|l| l.starts_with("bestmove ")).unwrap();
    assert_eq!(bestmove(line), (2, 2));
}

#[test]
fn opening_go_picks_central_cell() {
    let lines = run_engine(&["setoption name Seed value 3", "go difficulty easy", "quit"]);
    let line = lines.iter().find(|l| l.starts_with("bestmove ")).unwrap();
    let (row, col) = bestmove(line);
    // Central region of the default 6x6 board.
    assert!((2..4).contains(&row) && (2..4).contains(&col), "{}", line);
    assert!(line.ends_with("score 0"), "{}", line);
}

#[test]
fn seeded_games_are_reproducible() {
    let script = [
        "setoption name Seed value 11",
        "go",
        "show",
        "quit",
    ];
    assert_eq!(run_engine(&script), run_engine(&script));
}

#[test]
fn pause_blocks_moves_until_resume() {
    let lines = run_engine(&["pause", "move 2 2", "resume", "move 2 2", "quit"]);
    assert!(lines[0].starts_with("status paused"));
    assert_eq!(lines[1], "error game is not in playing state");
    assert!(lines[2].starts_with("status playing"));
    assert_eq!(lines[3], "info move 2 2 explosions 0 steps 0 settled true");
}

#[test]
fn stop_cancels_running_search() {
    let lines = run_engine(&[
        "setoption name Seed value 5",
        "position 10 blue b2,b2,r2,r1,.,./b2,b2,b2,r2,r1,./r2,b2,b2,b2,r2,./r1,r2,b2,b2,b2,r1/.,r1,r2,b2,b1,./.,.,r1,r1,.,.",
        "go depth 5",
        "stop",
        "isready",
        "quit",
    ]);
    assert_eq!(lines.len(), 3, "{:?}", lines);
    assert!(lines[0].starts_with("info depth 5 "), "{}", lines[0]);
    assert!(lines[0].ends_with(" cancelled"), "{}", lines[0]);
    bestmove(&lines[1]);
    assert_eq!(lines[2], "readyok");
}

#[test]
fn stray_stop_does_not_cancel_next_search() {
    let lines = run_engine(&[
        "stop",
        "position 2 red .,.,./.,b1,./.,.,r1",
        "go depth 2",
        "quit",
    ]);
    assert_eq!(lines.len(), 2, "{:?}", lines);
    assert!(!lines[0].contains("cancelled"), "{}", lines[0]);
    assert_eq!(bestmove(&lines[1]), (2, 2));
}
