use std::fs;
use std::path::Path;

use tempfile::TempDir;

use shadowpack_core::scanner::Scanner;

fn create_package(package_root: &Path, relative: &str) {
    let dir = package_root.join(relative);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("package.json"),
        "{\n  \"name\": \"pkg\",\n  \"main\": \"lib/index.js\"\n}\n",
    )
    .unwrap();
}

#[test]
fn test_scan_finds_package_directories() {
    let temp = TempDir::new().unwrap();
    create_package(temp.path(), "math");
    create_package(temp.path(), "math/base/special/sin");
    create_package(temp.path(), "utils/copy");

    let packages = Scanner::new(temp.path()).scan().unwrap();

    assert_eq!(
        packages,
        vec![
            temp.path().join("math"),
            temp.path().join("math/base/special/sin"),
            temp.path().join("utils/copy"),
        ]
    );
}

#[test]
fn test_scan_skips_namespace_directories_without_descriptors() {
    let temp = TempDir::new().unwrap();
    create_package(temp.path(), "math/base/special/sin");

    let packages = Scanner::new(temp.path()).scan().unwrap();

    assert_eq!(packages, vec![temp.path().join("math/base/special/sin")]);
}

#[test]
fn test_scan_reports_private_packages() {
    // Exclusion is the builder's decision; discovery reports everything.
    let temp = TempDir::new().unwrap();
    create_package(temp.path(), "_tools/pkgs/find");

    let packages = Scanner::new(temp.path()).scan().unwrap();

    assert_eq!(packages, vec![temp.path().join("_tools/pkgs/find")]);
}

#[test]
fn test_scan_never_descends_into_node_modules() {
    let temp = TempDir::new().unwrap();
    create_package(temp.path(), "utils/copy");
    create_package(temp.path(), "utils/copy/node_modules/debug");

    let packages = Scanner::new(temp.path()).scan().unwrap();

    assert_eq!(packages, vec![temp.path().join("utils/copy")]);
}

#[test]
fn test_scan_excludes_the_root_itself() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.json"), "{\"name\": \"root\"}\n").unwrap();
    create_package(temp.path(), "utils");

    let packages = Scanner::new(temp.path()).scan().unwrap();

    assert_eq!(packages, vec![temp.path().join("utils")]);
}

#[test]
fn test_scan_missing_root_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = Scanner::new(temp.path().join("missing")).scan();
    assert!(result.is_err());
}
