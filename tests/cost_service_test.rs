//! Tests for CostService and HierarchyBuilder using manifest files

use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use rcompose::application::services::{CostService, HierarchyCost};
use rcompose::application::ApplicationError;
use rcompose::domain::{DomainError, HierarchyBuilder, Manifest, ManifestEntry};
use rcompose::infrastructure::traits::RealFileSystem;
use rcompose::util::testing::{init_test_setup, write_file, SHIPMENT_MANIFEST};

fn service() -> CostService {
    init_test_setup();
    CostService::new(Arc::new(RealFileSystem))
}

// ============================================================
// Happy path
// ============================================================

#[test]
fn given_shipment_manifest_when_report_then_total_is_100() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = write_file(temp.path(), "shipment.toml", SHIPMENT_MANIFEST);

    // Act
    let report = service().report(&path).unwrap();

    // Assert
    assert_eq!(report.grand_total(), 100);
    assert_eq!(
        report.totals(),
        vec![HierarchyCost {
            name: "shipment".to_string(),
            total: 100,
            leaves: 4,
            depth: 3,
        }]
    );
}

#[test]
fn given_manifest_with_two_roots_when_report_then_one_hierarchy_per_root() {
    let temp = TempDir::new().unwrap();
    let path = write_file(
        temp.path(),
        "two.toml",
        r#"
[[entry]]
name = "a"

[[entry]]
name = "loose item"
cost = 5

[[entry]]
name = "x"
cost = 7
parent = "a"
"#,
    );

    let report = service().report(&path).unwrap();

    let names: Vec<String> = report.totals().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["a", "loose item"]);
    assert_eq!(report.grand_total(), 12);
}

#[test]
fn given_roots_summing_beyond_i64_when_grand_total_then_wraps() {
    let manifest = Manifest::new(vec![
        ManifestEntry::leaf("big", i64::MAX, None),
        ManifestEntry::leaf("one more", 1, None),
    ]);

    let report = service().report_manifest(&manifest).unwrap();

    assert_eq!(report.grand_total(), i64::MIN);
}

#[test]
fn given_shipment_manifest_when_render_then_tree_shows_costs() {
    let temp = TempDir::new().unwrap();
    let path = write_file(temp.path(), "shipment.toml", SHIPMENT_MANIFEST);

    let trees = service().report(&path).unwrap().render_trees();

    assert_eq!(trees.len(), 1);
    assert!(trees[0].starts_with("shipment [100]"));
    assert!(trees[0].contains("inner box [70]"));
    assert!(trees[0].contains("Item 4: 40"));
}

#[test]
fn given_child_listed_before_parent_when_build_then_still_attached() {
    let manifest = Manifest::new(vec![
        ManifestEntry::leaf("late", 3, Some("box")),
        ManifestEntry::container("box", None),
    ]);

    let trees = HierarchyBuilder::new().build(&manifest).unwrap();

    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].cost(), 3);
}

// ============================================================
// Errors
// ============================================================

#[test]
fn given_missing_file_when_report_then_manifest_not_found() {
    let result = service().report(&PathBuf::from("/nonexistent/manifest.toml"));

    assert!(matches!(result, Err(ApplicationError::ManifestNotFound(_))));
}

#[test]
fn given_directory_when_report_then_manifest_not_found() {
    let temp = TempDir::new().unwrap();

    let result = service().report(temp.path());

    assert!(matches!(result, Err(ApplicationError::ManifestNotFound(_))));
}

#[test]
fn given_invalid_toml_when_report_then_invalid_manifest() {
    let temp = TempDir::new().unwrap();
    let path = write_file(temp.path(), "bad.toml", "[[entry]\nname = ");

    let result = service().report(&path);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidManifest { .. }))
    ));
}

#[rstest]
#[case::empty(vec![], DomainError::EmptyManifest)]
#[case::duplicate(
    vec![
        ManifestEntry::container("box", None),
        ManifestEntry::leaf("box", 1, None),
    ],
    DomainError::DuplicateName("box".into())
)]
#[case::unknown_parent(
    vec![ManifestEntry::leaf("a", 1, Some("ghost"))],
    DomainError::UnknownParent { child: "a".into(), parent: "ghost".into() }
)]
#[case::leaf_as_parent(
    vec![
        ManifestEntry::leaf("a", 1, None),
        ManifestEntry::leaf("b", 2, Some("a")),
    ],
    DomainError::LeafAsParent { child: "b".into(), parent: "a".into() }
)]
#[case::cycle(
    vec![
        ManifestEntry::container("a", Some("b")),
        ManifestEntry::container("b", Some("a")),
    ],
    DomainError::CycleDetected("a".into())
)]
#[case::cycle_beside_valid_root(
    vec![
        ManifestEntry::leaf("ok", 1, None),
        ManifestEntry::container("a", Some("b")),
        ManifestEntry::container("b", Some("a")),
    ],
    DomainError::CycleDetected("a".into())
)]
fn given_malformed_manifest_when_build_then_reports_error(
    #[case] entries: Vec<ManifestEntry>,
    #[case] expected: DomainError,
) {
    let result = HierarchyBuilder::new().build(&Manifest::new(entries));

    assert_eq!(result.unwrap_err(), expected);
}
