//! Integration tests for the CLI binary.

use assert_cmd::Command;
use predicates::str::contains;
use segment_archive_core::archive;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("segarc"))
}

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

#[test]
fn catalog_lists_archives_in_start_time_order() -> TestResult {
    let tmp = TempDir::new()?;
    for t0 in [1_300_000_000.0, 1_100_000_000.0, 1_200_000_000.0] {
        let samples = ramp(64);
        archive::write(tmp.path(), t0, 16.0, "H1", &[("strain", &samples)])?;
    }

    let output = cli()
        .args(["catalog", "--dir", tmp.path().to_string_lossy().as_ref()])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let early = stdout.find("H1-1100000000-4.hdf5").ok_or("earliest missing")?;
    let mid = stdout.find("H1-1200000000-4.hdf5").ok_or("middle missing")?;
    let late = stdout.find("H1-1300000000-4.hdf5").ok_or("latest missing")?;
    assert!(early < mid && mid < late, "catalog out of order:\n{stdout}");
    Ok(())
}

#[test]
fn catalog_parsed_prints_grammar_fields() -> TestResult {
    let tmp = TempDir::new()?;
    let samples = ramp(64);
    archive::write(tmp.path(), 1_100_000_000.0, 16.0, "L1", &[("strain", &samples)])?;

    cli()
        .args([
            "catalog",
            "--dir",
            tmp.path().to_string_lossy().as_ref(),
            "--parsed",
        ])
        .assert()
        .success()
        .stdout(contains("L1\t1100000000\t4\thdf5"));
    Ok(())
}

#[test]
fn catalog_of_missing_directory_fails_with_message() -> TestResult {
    let tmp = TempDir::new()?;
    let missing = tmp.path().join("nope");

    cli()
        .args(["catalog", "--dir", missing.to_string_lossy().as_ref()])
        .assert()
        .failure()
        .stderr(contains("is not a directory"));
    Ok(())
}

#[test]
fn inspect_reports_channels_rates_and_start_time() -> TestResult {
    let tmp = TempDir::new()?;
    let strain = ramp(1000);
    let aux = ramp(400);
    let path = archive::write(
        tmp.path(),
        1_234_567_890.0,
        archive::SampleRates::PerChannel(vec![100.0, 40.0]),
        "H1",
        &[("strain", &strain), ("aux", &aux)],
    )?;

    cli()
        .args(["inspect", path.to_string_lossy().as_ref()])
        .assert()
        .success()
        .stdout(contains("t0=1234567890"))
        .stdout(contains("strain: 1000 samples @ 100 Hz (10 s)"))
        .stdout(contains("aux: 400 samples @ 40 Hz (10 s)"));
    Ok(())
}

#[test]
fn inspect_of_a_missing_channel_fails_with_its_name() -> TestResult {
    let tmp = TempDir::new()?;
    let strain = ramp(64);
    let path = archive::write(tmp.path(), 1_100_000_000.0, 16.0, "H1", &[("strain", &strain)])?;

    cli()
        .args(["inspect", path.to_string_lossy().as_ref(), "witness"])
        .assert()
        .failure()
        .stderr(contains("witness"));
    Ok(())
}
