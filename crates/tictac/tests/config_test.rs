//! Tests for config loading and headless simulation.

use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tictac::cli::RoundArgs;
use tictac::config::AppConfig;
use tictac::simulate::{simulate, simulate_json};
use tictac_core::{Position, RoundState, Symbol, TimeoutPolicy};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn args_for(path: PathBuf) -> RoundArgs {
    RoundArgs {
        config: path,
        ..RoundArgs::default()
    }
}

fn positions(indices: &[usize]) -> Vec<Position> {
    indices
        .iter()
        .map(|&i| Position::from_index(i).unwrap())
        .collect()
}

#[test]
fn test_parses_toml_file() {
    let file = write_config(
        r#"
[players]
x = "Ann"
o = "Bo"

[round]
round_secs = 12
chaos = false
timeout_policy = "auto_reset"
"#,
    );

    let config = AppConfig::from_file(file.path()).unwrap();
    assert_eq!(config.players().x(), "Ann");
    assert_eq!(config.players().o(), "Bo");
    assert_eq!(*config.round().round_secs(), 12);
    assert!(!*config.round().chaos());
    assert_eq!(*config.round().timeout_policy(), TimeoutPolicy::AutoReset);
    // Unlisted keys keep their defaults.
    assert_eq!(*config.round().tick_millis(), 250);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(&args_for(dir.path().join("absent.toml"))).unwrap();
    assert_eq!(config, AppConfig::default());

    let players = config.build_players();
    assert!(players.iter().all(|p| p.name() == "Unnamed"));
}

#[test]
fn test_flags_override_file() {
    let file = write_config("[round]\nround_secs = 12\n\n[players]\nx = \"Ann\"\n");
    let args = RoundArgs {
        config: file.path().to_path_buf(),
        duration: Some(5),
        no_chaos: true,
        seed: Some(9),
        player_x: Some("Cy".to_string()),
        player_o: None,
    };

    let config = AppConfig::load(&args).unwrap();
    assert_eq!(*config.round().round_secs(), 5);
    assert!(!*config.round().chaos());
    assert_eq!(*config.round().seed(), Some(9));
    assert_eq!(config.players().x(), "Cy");
    assert_eq!(config.players().o(), "");
}

#[test]
fn test_bad_toml_is_config_error() {
    let file = write_config("[round]\nround_secs = \"soon\"\n");
    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_simulated_win() {
    let config = AppConfig::default();
    let snapshot = simulate(&config, &positions(&[0, 3, 1, 4, 2]));

    assert_eq!(snapshot.state, RoundState::RoundWon);
    assert_eq!(snapshot.winning_line, Some([0, 1, 2]));
    assert_eq!(snapshot.board[0], Some(Symbol::X));
    assert_eq!(snapshot.board[3], Some(Symbol::O));
    assert_eq!(snapshot.remaining_secs, 30);
}

#[test]
fn test_simulated_tie_starts_next_round() {
    let args = RoundArgs {
        no_chaos: true,
        ..RoundArgs::default()
    };
    let config = AppConfig::default().with_overrides(&args);
    let snapshot = simulate(&config, &positions(&[0, 2, 1, 3, 5, 4, 6, 7, 8]));

    assert_eq!(snapshot.state, RoundState::AwaitingMove);
    assert_eq!(snapshot.score, 1);
    assert_eq!(snapshot.round, 2);
    assert!(snapshot.board.iter().all(Option::is_none));
}

#[test]
fn test_moves_after_win_are_skipped() {
    let config = AppConfig::default();
    let snapshot = simulate(&config, &positions(&[0, 3, 1, 4, 2, 8]));
    assert_eq!(snapshot.board[8], None);
}

#[test]
fn test_simulate_json_shape() {
    let json = simulate_json(&AppConfig::default(), &positions(&[4])).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["state"], "AwaitingMove");
    assert_eq!(value["current_symbol"], "O");
    assert_eq!(value["board"][4], "X");
    assert_eq!(value["score"], 0);
}
