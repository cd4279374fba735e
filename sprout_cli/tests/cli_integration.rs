use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Sim backend: power pins only switch simulated supplies
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[monitor]
tick_ms = 10

[light]
interval_ms = 20
trend_window = 3
plausible = [0.0, 1023.0]

[temperature]
interval_ms = 50

[soil]
power_pin = 7
sensor_min = 200
sensor_max = 800
interval_ms = 30

[water]
power_pin = 8
scale_factor = -500.0
fill_height_mm = 200.0
container_radius_mm = 50.0
read_count = 2
min_fraction = 0.1
interval_ms = 40
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn sprout() -> Command {
    Command::cargo_bin("sprout").unwrap()
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["trend", "1", "2", "3", "4", "5"], 0, "next=6.000", "stdout")]
#[case(&["trend", "--window", "2", "9", "1", "2"], 0, "slope=1.000", "stdout")]
#[case(&["trend", "--min", "0", "--max", "5", "1", "2", "3", "4", "5"], 0, "plausible=false", "stdout")]
#[case(&["trend", "--min", "-10", "--max", "10", "-1", "-2"], 0, "plausible=true", "stdout")]
#[case(&["trend"], 2, "required", "stderr")]
#[case(&["trend", "--min", "0", "1"], 2, "--max", "stderr")]
#[case(&["trend", "--window", "0", "1"], 3, "window", "stderr")]
#[case(&["self-check"], 0, "self-check ok", "stdout")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = sprout();
    cmd.arg("--config").arg(&cfg);
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[test]
fn self_check_lists_every_configured_sensor() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    sprout()
        .arg("--config")
        .arg(&cfg)
        .arg("self-check")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ok: light")
                .and(predicate::str::contains("ok: temperature"))
                .and(predicate::str::contains("ok: soil"))
                .and(predicate::str::contains("ok: water")),
        );
}

#[test]
fn monitor_emits_json_lines() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let out = sprout()
        .arg("--config")
        .arg(&cfg)
        .arg("--json")
        .args(["monitor", "--ticks", "5"])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("JSON line"))
        .collect();
    // One line per sensor from init at least.
    assert!(lines.len() >= 4, "got {} lines", lines.len());
    for l in &lines {
        assert!(l["sensor"].is_string());
        assert!(l.get("reading").is_some());
    }
    let light = lines.iter().find(|l| l["sensor"] == "light").unwrap();
    assert!(light["slope"].is_number());
    assert!(light.get("next").is_some());
    assert!(light["plausible"].is_boolean());
    let water = lines.iter().find(|l| l["sensor"] == "water").unwrap();
    assert!(water["fill_ml"].is_number());
}

#[test]
fn monitor_without_sensors_is_a_noop() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();
    sprout()
        .arg("--config")
        .arg(&path)
        .args(["monitor", "--ticks", "2"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[rstest]
#[case("[monitor]\ntick_ms = 0\n", "monitor.tick_ms")]
#[case("[light]\ninterval_ms = 10\ntrend_window = 0\n", "trend_window")]
#[case("[light\n", "parse config")]
fn bad_config_exits_3(#[case] toml: &str, #[case] needle: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, toml).unwrap();
    sprout()
        .arg("--config")
        .arg(&path)
        .arg("self-check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains(needle));
}

#[test]
fn missing_config_exits_3() {
    let dir = tempdir().unwrap();
    sprout()
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("self-check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("read config"));
}

#[test]
fn json_errors_are_structured() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[monitor]\ntick_ms = 0\n").unwrap();
    let out = sprout()
        .arg("--config")
        .arg(&path)
        .arg("--json")
        .arg("self-check")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));
    let err = String::from_utf8(out.stderr).unwrap();
    let last = err.lines().last().unwrap();
    let v: serde_json::Value = serde_json::from_str(last).unwrap();
    assert_eq!(v["reason"], "Config");
}

#[test]
fn trend_needs_no_config_file() {
    let dir = tempdir().unwrap();
    sprout()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["--json", "trend", "10", "10", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"slope\":0.0"));
}

#[test]
fn log_level_flag_overrides_config_level() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cfg.toml");
    fs::write(
        &path,
        "[logging]\nlevel = \"info\"\n\n[light]\ninterval_ms = 10\n",
    )
    .unwrap();

    let run = |extra: &[&str]| {
        let out = sprout()
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&path)
            .args(extra)
            .args(["monitor", "--ticks", "2", "--tick-ms", "10"])
            .output()
            .unwrap();
        assert!(out.status.success());
        String::from_utf8(out.stderr).unwrap()
    };

    let quiet = run(&[]);
    assert!(!quiet.contains("DEBUG"), "config level should hide debug:\n{quiet}");
    let verbose = run(&["--log-level", "debug"]);
    assert!(verbose.contains("DEBUG"), "no debug lines on stderr:\n{verbose}");
}
