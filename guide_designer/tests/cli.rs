use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

const TARGET: &str =
    "GACTGACTCACTGACTATCGTGGAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn designer() -> Command {
    let mut cmd = Command::cargo_bin("guide-designer").unwrap();
    // Keep a stray project config out of the tests
    cmd.env("GUIDE_DESIGNER_ROOT", env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn cli_no_args() {
    designer().assert().failure();
}

#[test]
fn cli_design_prints_ranked_guides() {
    designer()
        .args(["design", "--sequence", TARGET, "--strand", "plus"])
        .assert()
        .success()
        .stdout(contains("GACTGACTCACTGACTATCG"))
        .stdout(contains("TGG"));
}

#[test]
fn cli_design_with_preset() {
    // SaCas9 takes 21nt guides and, not being NGG, accepts any PAM window
    designer()
        .args(["design", "--sequence", TARGET, "--strand", "plus", "--system", "sacas9"])
        .assert()
        .success()
        .stdout(contains("GACTGACTCACTGACTATCGT\tGGA\t+\t1\t"));
}

#[test]
fn cli_design_rejects_short_targets() {
    designer()
        .args(["design", "--sequence", "ACGTACGTACGT"])
        .assert()
        .failure()
        .stderr(contains("must be between 50bp and 10000bp"));
}

#[test]
fn cli_region_requires_chromosome() {
    designer()
        .args(["design", "--sequence", TARGET, "--source", "region"])
        .args(["--start", "100", "--end", "175"])
        .assert()
        .failure()
        .stderr(contains("chromosome"));
}

#[test]
fn cli_region_requires_end() {
    designer()
        .args(["design", "--sequence", TARGET, "--source", "region"])
        .args(["--chromosome", "chr1", "--start", "100", "--strand", "plus"])
        .assert()
        .failure()
        .stderr(contains("Region input is missing its end"));
}

#[test]
fn cli_region_with_full_coordinates() {
    designer()
        .args(["design", "--sequence", TARGET, "--source", "region"])
        .args(["--chromosome", "chr1", "--start", "100", "--end", "175", "--strand", "plus"])
        .assert()
        .success()
        .stdout(contains("GACTGACTCACTGACTATCG\tTGG\t+\t1\t100\t"));
}

#[test]
fn cli_evaluate_reads_stdin() {
    assert_cmd::Command::from_std(designer())
        .args(["evaluate"])
        .write_stdin("gactgactcactgactatcg\n\nAAAA\n")
        .assert()
        .success()
        .stdout(contains("GACTGACTCACTGACTATCG"))
        .stdout(contains("AAAA"));
}

#[test]
fn cli_primers_and_json_export() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("session.json");
    designer()
        .args(["primers", "--sequence", TARGET, "--json"])
        .arg(&json)
        .assert()
        .success()
        .stdout(contains("Forward\tGACTGACTCACTGACTATCG"));

    let exported = std::fs::read_to_string(&json).unwrap();
    assert!(exported.contains("\"primerResults\""));
    assert!(exported.contains("\"productSize\": 76"));
}

#[test]
fn cli_init_config_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guide_designer.json");
    designer().arg("init-config").arg(&path).assert().success();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"pamPattern\": \"NGG\""));
}
