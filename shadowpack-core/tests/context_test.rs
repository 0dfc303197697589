use std::path::Path;

use shadowpack_core::context::is_installed_location;

#[test]
fn test_installed_dependency_location() {
    assert!(is_installed_location(Path::new(
        "/home/user/project/node_modules/@stdlib/stdlib"
    )));
}

#[test]
fn test_source_checkout_is_not_installed() {
    assert!(!is_installed_location(Path::new("/home/user/stdlib")));
}

#[test]
fn test_marker_must_be_a_whole_component() {
    assert!(!is_installed_location(Path::new(
        "/home/user/node_modules_backup/stdlib"
    )));
}
