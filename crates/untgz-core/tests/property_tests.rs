//! Property-based tests for extraction and path resolution.
//!
//! These tests use proptest to generate arbitrary inputs and verify
//! the containment and round-trip properties hold across a wide range of
//! cases.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use proptest::prelude::*;
use tempfile::TempDir;
use untgz_core::ExtractionError;
use untgz_core::extract_package;
use untgz_core::security::resolve;
use untgz_core::test_utils::TarTestBuilder;
use untgz_core::types::DestDir;

fn create_test_dest() -> (TempDir, DestDir) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let dest = DestDir::prepare(temp.path()).expect("failed to create dest");
    (temp, dest)
}

/// A path component that is never `.` or `..`.
fn component() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-][a-zA-Z0-9_.-]{0,15}"
}

/// A name made of normal components, `.` and `..`.
fn messy_name() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => component(),
            1 => Just(".".to_string()),
            2 => Just("..".to_string()),
        ],
        1..8,
    )
    .prop_map(|parts| parts.join("/"))
}

/// Lexical depth below the root after each component, or `None` if the
/// name climbs above it at any point.
fn stays_inside(name: &str) -> bool {
    let mut depth: i32 = 0;
    for part in name.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => depth += 1,
        }
    }
    true
}

proptest! {
    /// Every accepted name lands inside the destination, and a name is
    /// accepted exactly when it never climbs above the root.
    #[test]
    fn prop_resolution_is_contained(name in messy_name()) {
        let (_temp, dest) = create_test_dest();
        match resolve(&dest, Path::new(&name)) {
            Ok(safe) => {
                prop_assert!(stays_inside(&name), "{name} should be rejected");
                prop_assert!(safe.as_path().starts_with(dest.as_path()));
                prop_assert!(safe.relative().components().all(|c| matches!(c, std::path::Component::Normal(_))));
            }
            Err(ExtractionError::PathTraversalRejected { .. }) => {
                prop_assert!(!stays_inside(&name), "{name} should be accepted");
            }
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }

    /// Absolute names are always rejected.
    #[test]
    fn prop_absolute_rejected(parts in prop::collection::vec(component(), 0..5)) {
        let (_temp, dest) = create_test_dest();
        let name = format!("/{}", parts.join("/"));
        let result = resolve(&dest, Path::new(&name));
        prop_assert!(
            matches!(result, Err(ExtractionError::PathTraversalRejected { .. })),
            "absolute name should be rejected"
        );
    }

    /// Resolution never touches the filesystem.
    #[test]
    fn prop_resolution_has_no_side_effects(name in messy_name()) {
        let (_temp, dest) = create_test_dest();
        let _ = resolve(&dest, Path::new(&name));
        prop_assert!(fs::read_dir(dest.as_path()).unwrap().next().is_none());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Extracted file bytes equal the entry payloads exactly.
    #[test]
    fn prop_byte_exact_round_trip(
        files in prop::collection::btree_map(
            prop::collection::vec(component(), 1..4).prop_map(|parts| parts.join("/")),
            prop::collection::vec(any::<u8>(), 0..4096),
            1..8,
        )
    ) {
        // A file name that is also a directory prefix of another cannot exist
        let files: BTreeMap<String, Vec<u8>> = files
            .iter()
            .filter(|(name, _)| {
                !files.keys().any(|other| other.starts_with(&format!("{name}/")))
            })
            .map(|(k, v)| (format!("package/{k}"), v.clone()))
            .collect();

        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("pkg.tgz");
        files
            .iter()
            .fold(TarTestBuilder::new(), |builder, (name, data)| builder.add_file(name, data))
            .write_tgz(&archive);
        let out = temp.path().join("out");

        let report = extract_package(&archive, &out).unwrap();

        prop_assert_eq!(report.files_extracted, files.len());
        for (name, data) in &files {
            let on_disk = fs::read(out.join(PathBuf::from(name))).unwrap();
            prop_assert_eq!(&on_disk, data);
        }
    }
}
