//! End-to-end CLI tests for dp-core.
//!
//! Every invocation runs with user configuration masked so results depend on
//! built-in defaults or an explicit `--config` file only.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Get a Command for the dp-core binary with user configuration masked.
fn dp_core() -> Command {
    let mut cmd = cargo_bin_cmd!("dp-core");
    cmd.env_remove("DICE_POSTERIOR_CONFIG")
        .env_remove("DICE_POSTERIOR_CONFIG_DIR")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent/dp-core-xdg")
        .env("DP_LOG", "error");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run dp-core");
    assert!(
        output.status.success(),
        "dp-core failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn approx(value: &Value, expected: f64, tol: f64) -> bool {
    value
        .as_f64()
        .map(|v| (v - expected).abs() < tol)
        .unwrap_or(false)
}

// ============================================================================
// Help and version
// ============================================================================

mod help {
    use super::*;

    #[test]
    fn help_lists_commands() {
        dp_core()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("dice"))
            .stdout(predicate::str::contains("coin"))
            .stdout(predicate::str::contains("events"))
            .stdout(predicate::str::contains("config"))
            .stdout(predicate::str::contains("schema"));
    }

    #[test]
    fn version_json() {
        let value = stdout_json(dp_core().arg("version"));
        assert_eq!(value["schema_version"], "1.0.0");
        assert!(value["dp_core_version"].is_string());
    }

    #[test]
    fn quiet_and_dp_log_outrank_rust_log() {
        dp_core()
            .env("RUST_LOG", "debug")
            .args(["-q", "dice", "all-same", "--seed", "1"])
            .assert()
            .success()
            .stderr(predicate::str::contains("run.started").not())
            .stderr(predicate::str::contains("config.loaded").not());
    }

    #[test]
    fn rust_log_applies_without_dp_log() {
        dp_core()
            .env_remove("DP_LOG")
            .env("RUST_LOG", "debug")
            .args(["dice", "all-same", "--seed", "1"])
            .assert()
            .success()
            .stderr(predicate::str::contains("run.started"));
    }

    #[test]
    fn version_flag_works() {
        dp_core()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("dp-core"));
    }
}

// ============================================================================
// Dice estimates
// ============================================================================

mod dice {
    use super::*;

    #[test]
    fn all_same_reference_scenario() {
        let value = stdout_json(dp_core().args(["dice", "All dice same", "--seed", "7"]));
        assert_eq!(value["scenario"]["kind"], "dice");
        assert_eq!(value["scenario"]["event"], "all-same");
        assert_eq!(value["scenario"]["n_dice"], 3);
        assert!(approx(&value["scenario"]["true_probability"], 6.0 / 216.0, 1e-12));
        assert!(approx(&value["prior"]["alpha"], 0.2778, 1e-3));
        assert!(approx(&value["prior"]["beta"], 9.7222, 1e-3));
        assert_eq!(value["observation"]["n_trials"], 10);
        assert!(value["observation"]["successes"].as_u64().unwrap() <= 10);
        assert_eq!(value["grid_points"], 500);
        assert!(value.get("curves").is_none());
        assert!(value["run_id"].as_str().unwrap().starts_with("run-"));
    }

    #[test]
    fn fixed_seed_reproduces_observation() {
        let first = stdout_json(dp_core().args(["dice", "at-least-one-six", "--seed", "42"]));
        let second = stdout_json(dp_core().args(["dice", "at-least-one-six", "--seed", "42"]));
        assert_eq!(first["observation"], second["observation"]);
        assert_eq!(first["posterior"], second["posterior"]);
    }

    #[test]
    fn dice_count_text_is_forgiving() {
        let garbage = stdout_json(dp_core().args(["dice", "all-same", "--dice", "lots", "--seed", "1"]));
        assert_eq!(garbage["scenario"]["n_dice"], 3);

        let negative = stdout_json(dp_core().args(["dice", "all-same", "--dice", "-4", "--seed", "1"]));
        assert_eq!(negative["scenario"]["n_dice"], 1);
        assert!(approx(&negative["scenario"]["true_probability"], 1.0, 1e-12));

        let huge = stdout_json(dp_core().args(["dice", "all-same", "--dice", "5000", "--seed", "1"]));
        assert_eq!(huge["scenario"]["n_dice"], 1000);
    }

    #[test]
    fn all_different_with_seven_dice_is_impossible() {
        let value = stdout_json(dp_core().args(["dice", "all-different", "-n", "7", "--seed", "3"]));
        assert_eq!(value["scenario"]["true_probability"], 0.0);
        assert_eq!(value["observation"]["successes"], 0);
    }

    #[test]
    fn unknown_event_is_args_error() {
        let output = dp_core()
            .args(["dice", "Full house"])
            .output()
            .expect("run dp-core");
        assert_eq!(output.status.code(), Some(10));
        let value: Value = serde_json::from_slice(&output.stdout).expect("error JSON");
        assert_eq!(value["code"], 40);
        assert_eq!(value["category"], "input");
        assert_eq!(value["suggested_action"], "list_events");
        assert_eq!(value["context"]["input"], "Full house");
    }

    #[test]
    fn unknown_event_human_output_on_stderr() {
        dp_core()
            .args(["dice", "Full house", "--format", "summary"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("Unknown Event"))
            .stderr(predicate::str::contains("dp-core events"));
    }

    #[test]
    fn curves_flag_includes_display_curves() {
        let value = stdout_json(dp_core().args(["dice", "exactly-one-six", "--seed", "5", "--curves"]));
        let curves = &value["curves"];
        for name in ["grid", "prior", "likelihood", "posterior"] {
            assert_eq!(curves[name].as_array().unwrap().len(), 500, "{}", name);
        }
        let peak = curves["posterior"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_f64)
            .fold(f64::MIN, f64::max);
        assert!((peak - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sum_event_accepts_ascii_label() {
        let value = stdout_json(dp_core().args(["dice", "Sum >= 15", "--seed", "9"]));
        assert_eq!(value["scenario"]["event"], "sum-at-least-15");
        // P(3d6 >= 15) = 20/216
        assert!(approx(&value["scenario"]["true_probability"], 20.0 / 216.0, 0.01));
    }
}

// ============================================================================
// Coin scenario
// ============================================================================

mod coin {
    use super::*;

    #[test]
    fn default_coin_posterior_mean() {
        let value = stdout_json(dp_core().arg("coin"));
        assert_eq!(value["scenario"]["kind"], "coin");
        assert_eq!(value["observation"]["successes"], 3);
        assert_eq!(value["observation"]["n_trials"], 50);
        assert!(approx(&value["posterior"]["conjugate"]["mean"], 13.0 / 70.0, 1e-12));
        assert!(approx(&value["posterior"]["grid_mean"], 13.0 / 70.0, 1e-3));
    }

    #[test]
    fn summary_format() {
        dp_core()
            .args(["coin", "--format", "summary"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Coin bias: 3/50 observed"));
    }

    #[test]
    fn markdown_format() {
        dp_core()
            .args(["coin", "-f", "md"])
            .assert()
            .success()
            .stdout(predicate::str::contains("# Posterior: Coin bias"))
            .stdout(predicate::str::contains("| observed | 3 / 50 |"));
    }

    #[test]
    fn plot_is_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("coin.svg");
        let value = stdout_json(dp_core().args(["coin", "--plot"]).arg(&path));
        assert_eq!(value["plot_path"], path.display().to_string());
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Normalized Posterior"));
        assert!(svg.contains("Likelihood (scaled)"));
    }

    #[test]
    fn unwritable_plot_is_io_error() {
        dp_core()
            .args(["coin", "--plot", "/nonexistent/dir/coin.svg"])
            .assert()
            .code(21);
    }

    #[test]
    fn impossible_observation_is_args_error() {
        dp_core()
            .args(["coin", "--trials", "5", "--heads", "6"])
            .assert()
            .code(10)
            .stdout(predicate::str::contains("\"code\": 41"));
    }
}

// ============================================================================
// Events, config and schema
// ============================================================================

mod listing {
    use super::*;

    #[test]
    fn events_lists_all_five() {
        let value = stdout_json(dp_core().args(["events", "--seed", "2"]));
        let events = value["events"].as_array().unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(value["n_dice"], 3);
        let at_least = events.iter().find(|e| e["event"] == "at-least-one-six").unwrap();
        assert!(approx(&at_least["adjusted_probability"], 91.0 / 216.0, 1e-12));
    }

    #[test]
    fn events_for_two_dice() {
        let value = stdout_json(dp_core().args(["events", "--dice", "2", "--seed", "2"]));
        let events = value["events"].as_array().unwrap();
        let all_same = events.iter().find(|e| e["event"] == "all-same").unwrap();
        assert!(approx(&all_same["adjusted_probability"], 1.0 / 6.0, 1e-12));
    }

    #[test]
    fn config_show_defaults() {
        let value = stdout_json(dp_core().args(["config", "show"]));
        assert_eq!(value["source"]["using_defaults"], true);
        assert_eq!(value["settings"]["grid_points"], 500);
        assert_eq!(value["settings"]["coin"]["heads"], 3);
    }

    #[test]
    fn config_file_changes_grid() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, r#"{"schema_version":"1.0.0","grid_points":101}"#).unwrap();
        let value = stdout_json(dp_core().arg("--config").arg(&path).arg("coin"));
        assert_eq!(value["grid_points"], 101);
        assert_eq!(value["config"]["hash"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn config_validate_rejects_bad_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, r#"{"schema_version":"1.0.0","grid_points":1}"#).unwrap();
        dp_core()
            .args(["config", "validate"])
            .arg(&path)
            .assert()
            .code(11);
    }

    #[test]
    fn oversized_grid_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, r#"{"schema_version":"1.0.0","grid_points":100000000000}"#)
            .unwrap();
        dp_core()
            .args(["config", "validate"])
            .arg(&path)
            .assert()
            .code(11);
        dp_core()
            .arg("--config")
            .arg(&path)
            .arg("coin")
            .assert()
            .code(11)
            .stdout(predicate::str::contains("grid_points"));
    }

    #[test]
    fn misspelled_setting_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, r#"{"schema_version":"1.0.0","grid_pionts":10}"#).unwrap();
        dp_core()
            .arg("--config")
            .arg(&path)
            .arg("coin")
            .assert()
            .code(11)
            .stdout(predicate::str::contains("grid_pionts"));
    }

    #[test]
    fn config_validate_accepts_defaults() {
        let value = stdout_json(dp_core().args(["config", "validate"]));
        assert_eq!(value["status"], "valid");
        assert_eq!(value["using_defaults"], true);
    }

    #[test]
    fn schema_for_report() {
        let value = stdout_json(dp_core().args(["schema", "EstimateReport"]));
        assert!(value["properties"]["posterior"].is_object());
    }

    #[test]
    fn unknown_schema_fails() {
        dp_core()
            .args(["schema", "Nope"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("Unknown schema type"));
    }
}
