//! Integration tests for plucked-cli.
//!
//! Every test runs the built `plucked` binary with `XDG_CONFIG_HOME` pointed at a
//! temporary directory, so user settings and presets never leak in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to get the `plucked` binary with an isolated config directory.
fn plucked_bin(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_plucked"));
    cmd.env("XDG_CONFIG_HOME", config).env_remove("RUST_LOG");
    cmd
}

fn run(config: &Path, args: &[&str]) -> Output {
    plucked_bin(config)
        .args(args)
        .output()
        .expect("failed to run plucked")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "plucked failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn raw_samples(output: &Output) -> Vec<f64> {
    stdout(output)
        .lines()
        .map(|line| line.parse().expect("one number per line"))
        .collect()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_str(&stdout(output)).expect("valid JSON summary")
}

// ---------------------------------------------------------------------------
// plucked pluck
// ---------------------------------------------------------------------------

#[test]
fn pluck_raw_starts_with_the_excitation() {
    let config = TempDir::new().unwrap();
    let output = run(
        config.path(),
        &[
            "pluck", "saw", "--freq", "100", "--sample-rate", "8000", "--duration", "0.5",
            "--format", "raw",
        ],
    );
    let samples = raw_samples(&output);
    assert_eq!(samples.len(), 4000);

    // The delay line is silent for the first period, so the output is the saw itself.
    for (i, s) in samples[..80].iter().enumerate() {
        let expected = 2.0 * (i as f64 / 80.0) - 1.0;
        assert!((s - expected).abs() < 1e-9, "sample {i}: {s} vs {expected}");
    }
}

#[test]
fn pluck_json_summary_decays() {
    let config = TempDir::new().unwrap();
    let output = run(
        config.path(),
        &[
            "pluck", "triangle", "--freq", "200", "--sample-rate", "8000", "--duration", "1",
            "--format", "json",
        ],
    );
    let summary = json(&output);
    assert_eq!(summary["period"], 40);
    assert_eq!(summary["samples"], 8000);

    let periods = summary["periods"].as_array().unwrap();
    assert_eq!(periods.len(), 200);
    let peaks: Vec<f64> = periods
        .iter()
        .map(|p| p["peak"].as_f64().unwrap())
        .collect();
    for pair in peaks.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-12, "peak rose: {pair:?}");
    }
    assert!(peaks[199] < peaks[0]);
}

#[test]
fn pluck_noise_is_reproducible() {
    let config = TempDir::new().unwrap();
    let args = [
        "pluck", "noise", "--seed", "3", "--length", "50", "--sample-rate", "8000",
        "--duration", "0.1", "--format", "raw",
    ];
    let a = raw_samples(&run(config.path(), &args));
    let b = raw_samples(&run(config.path(), &args));
    assert_eq!(a.len(), 800);
    assert_eq!(a, b);
}

#[test]
fn pluck_summary_is_readable() {
    let config = TempDir::new().unwrap();
    let text = stdout(&run(
        config.path(),
        &["pluck", "saw", "--freq", "441", "--duration", "0.05"],
    ));
    assert!(text.contains("saw pluck"), "got:\n{text}");
    assert!(text.contains("100 samples"), "got:\n{text}");
    assert!(text.contains("peak"));
}

#[test]
fn pluck_rejects_bad_parameters() {
    let config = TempDir::new().unwrap();

    let output = run(config.path(), &["pluck", "saw", "--decay=-1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("decay"));

    let output = run(config.path(), &["pluck", "saw", "--buffer-size", "0"]);
    assert!(!output.status.success());

    let output = run(config.path(), &["pluck", "saw", "--duration=-2"]);
    assert!(!output.status.success());
}

#[test]
fn pluck_rejects_pitch_below_the_longest_loop() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["pluck", "saw", "--freq", "1e-15"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("period longer than"), "got:\n{stderr}");
    assert!(!stderr.contains("panicked"), "got:\n{stderr}");

    let output = run(config.path(), &["pluck", "noise", "--length", "100000000"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("exceeds the maximum"));
}

#[test]
fn settings_file_sets_the_sample_rate() {
    let config = TempDir::new().unwrap();
    let dir = config.path().join("plucked");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("plucked.toml"), "sample_rate = 8000.0\n").unwrap();

    let summary = json(&run(
        config.path(),
        &["pluck", "saw", "--freq", "100", "--format", "json"],
    ));
    assert_eq!(summary["sample_rate"], 8000.0);
    assert_eq!(summary["period"], 80);

    // Command-line flags win over the file
    let summary = json(&run(
        config.path(),
        &[
            "pluck", "saw", "--freq", "100", "--sample-rate", "16000", "--format", "json",
        ],
    ));
    assert_eq!(summary["period"], 160);
}

// ---------------------------------------------------------------------------
// plucked preset / presets
// ---------------------------------------------------------------------------

#[test]
fn preset_renders_factory_tone() {
    let config = TempDir::new().unwrap();
    let summary = json(&run(
        config.path(),
        &["preset", "demo_saw", "--duration", "0.1", "--format", "json"],
    ));
    assert_eq!(summary["name"], "Demo Saw");
    assert_eq!(summary["samples"], 4410);
    assert_eq!(summary["period"], 441);
    assert!(summary["peak"].as_f64().unwrap() <= 0.1 + 1e-9);
}

#[test]
fn preset_renders_file_by_path() {
    let config = TempDir::new().unwrap();
    let path = config.path().join("mine.toml");
    std::fs::write(
        &path,
        r#"
        name = "Mine"
        duration = 0.25
        [excitation]
        kind = "noise"
        seed = 5
        length = 32
        "#,
    )
    .unwrap();

    let summary = json(&run(
        config.path(),
        &[
            "preset",
            path.to_str().unwrap(),
            "--sample-rate",
            "8000",
            "--format",
            "json",
        ],
    ));
    assert_eq!(summary["name"], "Mine");
    assert_eq!(summary["samples"], 2000);
    assert_eq!(summary["period"], 32);
}

#[test]
fn preset_unknown_name_fails() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["preset", "no_such_tone"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'no_such_tone' not found"), "got:\n{stderr}");
    assert!(stderr.contains("presets"), "got:\n{stderr}");
}

#[test]
fn presets_lists_factory_tones() {
    let config = TempDir::new().unwrap();
    let text = stdout(&run(config.path(), &["presets", "--factory"]));
    for id in ["demo_saw", "nylon", "steel", "bass", "vowel_ah"] {
        assert!(text.contains(id), "missing '{id}' in:\n{text}");
    }
    assert!(!text.contains("User Presets"));
}

#[test]
fn presets_show_prints_toml() {
    let config = TempDir::new().unwrap();
    let text = stdout(&run(config.path(), &["presets", "show", "nylon"]));
    assert!(text.contains("name = \"Nylon\""), "got:\n{text}");
    assert!(text.contains("kind = \"triangle\""), "got:\n{text}");
}

#[test]
fn presets_copy_then_list_user() {
    let config = TempDir::new().unwrap();
    stdout(&run(
        config.path(),
        &["presets", "copy", "bass", "--name", "my_bass"],
    ));
    let saved = config.path().join("plucked/presets/my_bass.toml");
    assert!(saved.is_file());

    let text = stdout(&run(config.path(), &["presets", "--user"]));
    assert!(text.contains("my_bass"), "got:\n{text}");

    // A second copy without --force refuses to overwrite
    let output = run(config.path(), &["presets", "copy", "bass", "--name", "my_bass"]);
    assert!(!output.status.success());

    // The user preset renders by name
    let summary = json(&run(
        config.path(),
        &["preset", "my_bass", "--duration", "0.05", "--format", "json"],
    ));
    assert_eq!(summary["name"], "my_bass");
}
