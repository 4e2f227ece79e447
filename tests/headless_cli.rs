use std::process::Command;

fn scratch_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join("voxelstream_cli_tests")
        .join(format!("{}_{name}", std::process::id()))
}

#[test]
fn headless_run_writes_metrics_and_events() {
    let dir = scratch_dir("run");
    let metrics = dir.join("metrics.json");
    let events = dir.join("events.jsonl");

    let output = Command::new(env!("CARGO_BIN_EXE_voxelstream"))
        .args(["--ticks", "20", "--render-distance", "1", "--workers", "2"])
        .arg("--metrics")
        .arg(&metrics)
        .arg("--events")
        .arg(&events)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run voxelstream");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&metrics).expect("metrics written"))
            .expect("metrics json");
    assert_eq!(report["result"], "pass");
    assert_eq!(report["streaming"]["ticks"], 20);
    assert_eq!(report["execution"]["worker_threads"], 2);
    assert_eq!(report["queries"]["rays_cast"], 20);

    let lines = std::fs::read_to_string(&events).expect("events written");
    for line in lines.lines() {
        let event: serde_json::Value = serde_json::from_str(line).expect("event json");
        assert!(event["tick"].is_u64());
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_config_saves_effective_settings() {
    let dir = scratch_dir("config");
    let saved = dir.join("effective.toml");

    let status = Command::new(env!("CARGO_BIN_EXE_voxelstream"))
        .args(["--ticks", "0", "--world-seed", "99", "--workers", "0"])
        .arg("--write-config")
        .arg(&saved)
        .env("RUST_LOG", "warn")
        .status()
        .expect("run voxelstream");
    assert!(status.success());

    let contents = std::fs::read_to_string(&saved).expect("config written");
    assert!(contents.contains("worker_threads = 0"));
    assert!(contents.contains("seed = 99"));
    let _ = std::fs::remove_dir_all(&dir);
}
