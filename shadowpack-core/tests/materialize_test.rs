use std::fs;

use tempfile::TempDir;

use shadowpack_core::error::Error;
use shadowpack_core::ledger::{ChangeLedger, ChangeRecord};
use shadowpack_core::materialize::materialize_dir;

#[test]
fn test_creates_missing_chain() {
    let temp = TempDir::new().unwrap();
    let mut ledger = ChangeLedger::new();

    let deepest = materialize_dir(temp.path(), "a/b/c", false, &mut ledger).unwrap();

    assert_eq!(deepest, temp.path().join("a/b/c"));
    assert!(deepest.is_dir());
    assert_eq!(ledger.len(), 3);
    assert_eq!(
        ledger.records()[0],
        ChangeRecord::Create {
            path: temp.path().join("a")
        }
    );
}

#[test]
fn test_existing_directories_produce_no_records() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("a/b")).unwrap();
    let mut ledger = ChangeLedger::new();

    materialize_dir(temp.path(), "a/b/c", false, &mut ledger).unwrap();

    assert_eq!(ledger.len(), 1);
    assert_eq!(
        ledger.records()[0],
        ChangeRecord::Create {
            path: temp.path().join("a/b/c")
        }
    );
}

#[test]
fn test_rerun_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let mut ledger = ChangeLedger::new();
    materialize_dir(temp.path(), "a/b/c", false, &mut ledger).unwrap();

    let mut second = ChangeLedger::new();
    materialize_dir(temp.path(), "a/b/c", false, &mut second).unwrap();

    assert!(second.is_empty());
}

#[test]
fn test_non_directory_prefix_is_a_conflict() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("a")).unwrap();
    fs::write(temp.path().join("a/b"), "not a directory").unwrap();
    let mut ledger = ChangeLedger::new();

    let err = materialize_dir(temp.path(), "a/b/c", false, &mut ledger).unwrap_err();

    assert!(matches!(err, Error::PathConflict(p) if p == temp.path().join("a/b")));
}

#[test]
fn test_dry_run_records_without_creating() {
    let temp = TempDir::new().unwrap();
    let mut ledger = ChangeLedger::new();

    materialize_dir(temp.path(), "a/b", true, &mut ledger).unwrap();

    assert_eq!(ledger.len(), 2);
    assert!(!temp.path().join("a").exists());
}

#[test]
fn test_dry_run_does_not_record_the_same_prefix_twice() {
    let temp = TempDir::new().unwrap();
    let mut ledger = ChangeLedger::new();

    materialize_dir(temp.path(), "a/b", true, &mut ledger).unwrap();
    materialize_dir(temp.path(), "a/c", true, &mut ledger).unwrap();

    // `a` would already have been created by the first call.
    assert_eq!(ledger.len(), 3);
}
