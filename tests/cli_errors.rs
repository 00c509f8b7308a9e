use predicates::str::contains;

#[test]
fn zero_duration_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topo-sim");
    cmd.args(["--component", "a:cache", "--duration", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: duration must be > 0 seconds"));
}

#[test]
fn malformed_component_entry_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topo-sim");
    cmd.args(["--component", "edge"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: invalid component entry 'edge'"));
}

#[test]
fn duplicate_component_ids_fail() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topo-sim");
    cmd.args(["--component", "a:cache", "--component", "a:database"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: duplicate component id 'a'"));
}

#[test]
fn connection_to_unknown_component_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topo-sim");
    cmd.args(["--component", "a:cache", "--connection", "a:ghost"]);
    cmd.assert()
        .failure()
        .stderr(contains("references unknown component 'ghost'"));
}

#[test]
fn missing_scenario_file_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topo-sim");
    cmd.args(["--config", "/nonexistent/scenario.toml"]);
    cmd.assert()
        .failure()
        .stderr(contains("failed to read scenario"));
}

#[test]
fn unsupported_scenario_extension_fails() {
    let path = std::env::temp_dir().join("topo-sim-errors.yaml");
    std::fs::write(&path, "run: {}").unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topo-sim");
    cmd.args(["--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("unsupported config format 'yaml'"));
}
