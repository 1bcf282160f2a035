//! End-to-end tests running the `splits` binary.
//!
//! Tests the full flow: create → show → add → select → stats → convert

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const ROWS: &str = "Terminé\t2018\tCeleste\tPlatformer\tSwitch\tEU\t10:00\t12:30\n\
                    Remplacé\t2019\tControl\tAction\tPC\tEU\t15:00\t\n\
                    En cours\t2020\tHades\tRogue\tPC\tEU\t20:00\t05:15:30\n\
                    \t2021\tTunic\tAdventure\tPC\tEU\t12:00\t\n";

fn splits_binary() -> String {
    env!("CARGO_BIN_EXE_splits").to_string()
}

/// Runs `splits` with `home` as the home directory and no user overrides.
fn splits(home: &Path, args: &[&str]) -> Output {
    Command::new(splits_binary())
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("SPLITS_RUN_PATH")
        .env_remove("SPLITS_DATE_FORMAT")
        .env_remove("SPLITS_CURRENT_SPLIT")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run splits")
}

/// Runs `splits` and returns stdout, failing the test on a non-zero exit.
fn splits_ok(home: &Path, args: &[&str]) -> String {
    let output = splits(home, args);
    assert!(
        output.status.success(),
        "splits {args:?} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Writes the sample rows and creates `run.json` from them.
fn create_run(temp: &TempDir) -> String {
    let rows = temp.path().join("rows.tsv");
    std::fs::write(&rows, ROWS).unwrap();
    let run = temp.path().join("run.json");

    let output = splits_ok(
        temp.path(),
        &[
            "create",
            "--input",
            rows.to_str().unwrap(),
            "-o",
            run.to_str().unwrap(),
        ],
    );
    assert!(output.contains("with 3 games (2 sessions)"), "{output}");

    run.to_str().unwrap().to_string()
}

#[test]
fn test_full_flow() {
    let temp = TempDir::new().unwrap();
    let run = create_run(&temp);
    let home = temp.path();

    // Show: nothing is current until a game is selected
    let output = splits_ok(home, &["show", "--file", &run]);
    assert!(output.contains("  2020 - Hades"), "{output}");
    assert!(output.contains("Sessions:  2"), "{output}");
    assert!(output.contains("Current:   none"), "{output}");

    let output = splits_ok(home, &["select", "2020 - Hades", "--file", &run]);
    assert_eq!(output, "Current game is now 2020 - Hades\n");

    // Add a session to the current game
    let output = splits_ok(
        home,
        &["add", "2:00", "--date", "2024-01-05", "--file", &run],
    );
    assert_eq!(
        output,
        "Added 02:00:00 to 2020 - Hades (07:15:30 / 20:00:00, Current)\n"
    );

    // Switch to another game and finish it
    let output = splits_ok(home, &["select", "2021 - tunic", "--file", &run]);
    assert_eq!(output, "Current game is now 2021 - Tunic\n");

    let output = splits_ok(
        home,
        &[
            "add",
            "1:00",
            "--date",
            "2024-01-06",
            "--state",
            "Finished",
            "--file",
            &run,
        ],
    );
    assert!(
        output.starts_with("Added 01:00:00 to 2021 - Tunic (01:00:00 / 12:00:00, Finished)"),
        "{output}"
    );

    // Stats cover every played game
    let output = splits_ok(home, &["stats", "--json", "--file", &run]);
    let stats: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(stats["nb_games"], 3);
    assert_eq!(stats["nb_sessions"], 4);
    assert_eq!(stats["day_longest_played"]["date"], "2024-01-05");

    // Convert to LiveSplit and read it back
    let lss = temp.path().join("run.lss");
    let output = splits_ok(home, &["convert", &run, lss.to_str().unwrap()]);
    assert!(output.starts_with("Converted 3 games to lss"), "{output}");

    let json = splits_ok(home, &["show", "--json", "--file", &run]);
    let from_lss = splits_ok(home, &["show", "--json", "--file", lss.to_str().unwrap()]);
    let json: serde_json::Value = serde_json::from_str(&json).unwrap();
    let from_lss: serde_json::Value = serde_json::from_str(&from_lss).unwrap();
    assert_eq!(json["games"], from_lss["games"]);
    assert_eq!(json["totals"], from_lss["totals"]);
}

#[test]
fn test_default_run_path_under_home() {
    let temp = TempDir::new().unwrap();
    let rows = temp.path().join("rows.tsv");
    std::fs::write(&rows, ROWS).unwrap();
    let run = temp.path().join(".local/share/splits/run.json");

    splits_ok(
        temp.path(),
        &[
            "create",
            "--input",
            rows.to_str().unwrap(),
            "-o",
            run.to_str().unwrap(),
        ],
    );

    let output = splits_ok(temp.path(), &["show"]);
    assert!(output.starts_with("1 Year 1 Game\n"), "{output}");
}

#[test]
fn test_config_file_sets_date_format() {
    let temp = TempDir::new().unwrap();
    let run = create_run(&temp);
    let config = temp.path().join("splits.toml");
    std::fs::write(
        &config,
        format!("run_path = {run:?}\ndate_format = \"dmy-name\"\n"),
    )
    .unwrap();

    splits_ok(
        temp.path(),
        &["--config", config.to_str().unwrap(), "add", "0:30", "--date", "2024-02-01", "--game", "2021 - Tunic"],
    );
    let output = splits_ok(temp.path(), &["--config", config.to_str().unwrap(), "show"]);
    assert!(output.contains("01 February 2024"), "{output}");
}

#[test]
fn test_errors_exit_non_zero() {
    let temp = TempDir::new().unwrap();
    let run = create_run(&temp);

    let output = splits(temp.path(), &["show", "--file", "missing.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load"));

    let output = splits(temp.path(), &["add", "soon", "--file", &run]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid time"));

    let output = splits(temp.path(), &["select", "2018 - Celeste", "--file", &run]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("takes no more sessions"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();
    let output = splits_ok(temp.path(), &[]);
    assert!(output.contains("Usage"), "{output}");
}
