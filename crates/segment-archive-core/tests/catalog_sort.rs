#![allow(missing_docs)]

//! Integration tests for directory-backed catalog sorting.

use std::fs;
use std::path::PathBuf;

use segment_archive_core::catalog::{self, CatalogError, Identifier, Source};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn touch(dir: &TempDir, name: &str) -> TestResult {
    fs::write(dir.path().join(name), b"")?;
    Ok(())
}

#[test]
fn directory_scan_sorts_by_embedded_start_time() -> TestResult {
    let tmp = TempDir::new()?;
    touch(&tmp, "H1-1300000000-16.hdf5")?;
    touch(&tmp, "H1-1100000000-16.hdf5")?;
    touch(&tmp, "H1-1200000000-16.hdf5")?;

    let sorted = catalog::sort(Source::directory(tmp.path()))?;

    let expected: Vec<Identifier> = [
        "H1-1100000000-16.hdf5",
        "H1-1200000000-16.hdf5",
        "H1-1300000000-16.hdf5",
    ]
    .iter()
    .map(|n| Identifier::Path(tmp.path().join(n)))
    .collect();
    assert_eq!(sorted, expected);
    Ok(())
}

#[test]
fn directory_children_are_returned_as_joined_paths() -> TestResult {
    let tmp = TempDir::new()?;
    touch(&tmp, "V1-1111111111-8.gwf")?;

    let sorted = catalog::sort(Source::directory(tmp.path()))?;
    assert_eq!(sorted.len(), 1);

    let path = sorted[0].as_path().ok_or("directory scans yield paths")?;
    assert_eq!(path, tmp.path().join("V1-1111111111-8.gwf"));
    Ok(())
}

#[test]
fn non_conforming_children_are_filtered_not_errored() -> TestResult {
    let tmp = TempDir::new()?;
    touch(&tmp, "H1-1100000000-16.hdf5")?;
    touch(&tmp, "README.md")?;
    touch(&tmp, "H1-1100000000-16.hdf5.bak")?;
    touch(&tmp, "H1-110000000-16.hdf5")?; // 9-digit t0
    fs::create_dir(tmp.path().join("subdir"))?;

    let sorted = catalog::sort(Source::directory(tmp.path()))?;
    assert_eq!(sorted.len(), 1);
    Ok(())
}

#[test]
fn empty_directory_yields_an_empty_catalog() -> TestResult {
    let tmp = TempDir::new()?;
    touch(&tmp, "nothing-to-see.txt")?;

    let sorted = catalog::sort(Source::directory(tmp.path()))?;
    assert!(sorted.is_empty());

    let parsed = catalog::sort_matches(Source::directory(tmp.path()))?;
    assert!(parsed.is_empty());
    Ok(())
}

#[test]
fn nonexistent_directory_is_an_input_error() -> TestResult {
    let tmp = TempDir::new()?;
    let missing = tmp.path().join("never-created");

    let err = catalog::sort(Source::directory(&missing))
        .expect_err("a missing directory is a usage error");
    assert!(matches!(err, CatalogError::NotADirectory { .. }));
    assert!(err.to_string().contains("never-created"));
    Ok(())
}

#[test]
fn a_file_is_not_a_directory_source() -> TestResult {
    let tmp = TempDir::new()?;
    touch(&tmp, "H1-1100000000-16.hdf5")?;

    let err = catalog::sort(Source::directory(tmp.path().join("H1-1100000000-16.hdf5")))
        .expect_err("a file path is not a directory source");
    assert!(matches!(err, CatalogError::NotADirectory { .. }));
    Ok(())
}

#[test]
fn mixed_identifier_lists_are_rejected() -> TestResult {
    let source = Source::List(vec![
        Identifier::Path(PathBuf::from("/data/H1-1100000000-4.hdf5")),
        Identifier::Name("H1-1200000000-4.hdf5".to_string()),
    ]);

    let err = catalog::sort(source).expect_err("mixed lists are a usage error");
    assert!(matches!(
        err,
        CatalogError::MixedIdentifiers { paths: 1, names: 1 }
    ));
    Ok(())
}

#[test]
fn sort_matches_exposes_parsed_fields_for_directory_scans() -> TestResult {
    let tmp = TempDir::new()?;
    touch(&tmp, "L1-1200000000-32.h5")?;
    touch(&tmp, "L1-1100000000-16.hdf5")?;

    let parsed = catalog::sort_matches(Source::directory(tmp.path()))?;
    assert_eq!(parsed.len(), 2);
    assert_eq!(
        (parsed[0].t0, parsed[0].length),
        (1_100_000_000, 16)
    );
    assert_eq!(
        (parsed[1].t0, parsed[1].length),
        (1_200_000_000, 32)
    );
    assert_eq!(parsed[0].prefix, "L1");
    Ok(())
}
