use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cultevo() -> Command {
    Command::cargo_bin("cultevo").unwrap()
}

#[test]
fn test_run_prints_summary() {
    cultevo()
        .args(["run", "-n", "50", "-m", "0.05", "-T", "60", "-w", "20", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Population Size: 50"))
        .stdout(predicate::str::contains("Simulation complete!"))
        .stdout(predicate::str::contains("Generations recorded: 40"))
        .stdout(predicate::str::contains("Expected neutral diversity: 0.8333"));
}

#[test]
fn test_run_json_output() {
    let output = cultevo()
        .args(["run", "-n", "40", "-m", "0.05", "-T", "30", "-w", "10", "--top", "5", "--raw"])
        .args(["--seed", "11", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["obs_div"].as_array().unwrap().len(), 20);
    assert!(value["exp_div"].as_f64().unwrap() > 0.0);
    assert!(value.get("frequencies").is_some());
    assert!(value.get("turnover").is_some());
}

#[test]
fn test_run_is_reproducible_with_seed() {
    let run = || {
        cultevo()
            .args(["run", "-n", "30", "-m", "0.1", "-T", "25", "-w", "5", "-b", "0.3"])
            .args(["--seed", "99", "--format", "json"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_run_from_config_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"population_size": 25, "innovation_rate": 0.02, "timesteps": 40, "warm_up": 10, "seed": 5}"#,
    )
    .unwrap();

    cultevo()
        .arg("run")
        .arg("--config")
        .arg(&path)
        .arg("--timesteps")
        .arg("30")
        .assert()
        .success()
        .stdout(predicate::str::contains("Population Size: 25"))
        .stdout(predicate::str::contains("Timesteps: 30"))
        .stdout(predicate::str::contains("Generations recorded: 20"));
}

#[test]
fn test_invalid_innovation_rate_fails() {
    cultevo()
        .args(["run", "-n", "10", "-m", "1.5", "-T", "20", "-w", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_empty_window_fails() {
    cultevo()
        .args(["run", "-n", "10", "-m", "0.1", "-T", "20", "-w", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_schedule_run() {
    cultevo()
        .args(["run", "-n", "30", "-m", "0.05", "-T", "20", "-w", "5"])
        .args(["--schedule", "0:10,-0.5:5,0:5", "--seed", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schedule: 20 generations"));
}

#[test]
fn test_hetero_single_run() {
    cultevo()
        .args(["hetero", "-n", "30", "--bias-mean", "-0.1", "--bias-sd", "0.2"])
        .args(["-m", "0.05", "-T", "25", "--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Normal(-0.1, 0.2) per birth"))
        .stdout(predicate::str::contains("Generations recorded: 25"));
}

#[test]
fn test_hetero_negative_spread_fails() {
    cultevo()
        .args(["hetero", "-n", "30", "--bias-sd", "-0.2", "-T", "10"])
        .assert()
        .failure();
}

#[test]
fn test_batch_json_summary() {
    let output = cultevo()
        .args(["batch", "-n", "30", "-m", "0.05", "-T", "40", "-w", "10", "--top", "4"])
        .args(["-r", "6", "--seed", "7", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["base_seed"], 7);
    assert_eq!(value["summary"]["repetitions"], 6);
    assert!(value.get("windows").is_none());
}

#[test]
fn test_batch_with_windows() {
    cultevo()
        .args(["batch", "-n", "30", "-m", "0.05", "-T", "60", "-w", "20", "--top", "4"])
        .args(["-r", "4", "--windows", "10,40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch Summary (4 repetitions)"))
        .stdout(predicate::str::contains("Window 10 generations"))
        .stdout(predicate::str::contains("Window 40 generations"));
}

#[test]
fn test_batch_windows_json() {
    let output = cultevo()
        .args(["batch", "-n", "30", "-m", "0.05", "-T", "60", "-w", "20", "--top", "4"])
        .args(["-r", "4", "--seed", "3", "--windows", "10,40", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let windows = value["windows"].as_array().unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[1]["window"], 40);
    assert_eq!(windows[1]["diversity"]["n"], 4);
    // The full-length window pools the same runs as the batch summary
    assert_eq!(windows[1]["exponent"]["n"], value["summary"]["turnover"]["n"]);
    assert_eq!(
        windows[1]["exponent"]["median"],
        value["summary"]["turnover"]["median"]
    );
}

#[test]
fn test_batch_window_longer_than_run_fails() {
    cultevo()
        .args(["batch", "-n", "30", "-T", "60", "-w", "20", "--top", "4", "--windows", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid window lengths"));
}

#[test]
fn test_batch_windows_require_top() {
    cultevo()
        .args(["batch", "-n", "30", "-T", "60", "-w", "20", "--windows", "10"])
        .assert()
        .failure();
}

#[test]
fn test_pulse_report() {
    cultevo()
        .args(["pulse", "-n", "50", "-m", "0.02", "-T", "80", "-w", "20"])
        .args(["--onset", "40", "--duration", "5", "--recovery-window", "10", "--seed", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pulse Response"))
        .stdout(predicate::str::contains("Compared generations: 41"));
}

#[test]
fn test_pulse_onset_in_warm_up_fails() {
    cultevo()
        .args(["pulse", "-n", "50", "-T", "80", "-w", "20", "--onset", "10"])
        .assert()
        .failure();
}

fn write_posterior(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("posterior.json");
    std::fs::write(
        &path,
        r#"{
            "equilibrium": [0.0, 0.05, -0.05],
            "variable_population": [0.1, 0.2],
            "phases": [[0.0, 0.1], [0.0, 0.1], [0.0, 0.1], [0.0, 0.1], [0.0, 0.1], [0.0, 0.1], [0.0, 0.1]]
        }"#,
    )
    .unwrap();
    path
}

#[test]
fn test_predictive_column() {
    let temp = tempdir().unwrap();
    let path = write_posterior(temp.path());

    cultevo()
        .arg("predictive")
        .arg("--posterior")
        .arg(&path)
        .args(["--column", "equilibrium", "-n", "30", "-m", "0.05", "-T", "30", "-w", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: equilibrium (3 draws)"));
}

#[test]
fn test_predictive_phased() {
    let temp = tempdir().unwrap();
    let path = write_posterior(temp.path());

    cultevo()
        .arg("predictive")
        .arg("--posterior")
        .arg(&path)
        .args(["--phase-lengths", "5,5,5,5,5,5,5", "-n", "30", "-m", "0.05", "-w", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: phases (2 draws)"));
}

#[test]
fn test_predictive_unknown_column_fails() {
    let temp = tempdir().unwrap();
    let path = write_posterior(temp.path());

    cultevo()
        .arg("predictive")
        .arg("--posterior")
        .arg(&path)
        .args(["--column", "phase_9", "-n", "30", "-T", "30", "-w", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown posterior column"));
}
