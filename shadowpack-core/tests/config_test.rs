use std::path::{Path, PathBuf};

use shadowpack_core::config::{is_private, ShadowConfig};
use shadowpack_core::error::Error;

fn config() -> ShadowConfig {
    ShadowConfig::new("/prefix/node_modules/@stdlib/stdlib", "@stdlib")
}

#[test]
fn test_package_root() {
    assert_eq!(
        config().package_root(),
        PathBuf::from("/prefix/node_modules/@stdlib/stdlib/lib/node_modules/@stdlib")
    );
}

#[test]
fn test_destination_root_is_parent_of_install_root() {
    assert_eq!(
        config().destination_root().unwrap(),
        PathBuf::from("/prefix/node_modules/@stdlib")
    );
}

#[test]
fn test_destination_offset() {
    assert_eq!(
        config().destination_offset().unwrap(),
        "stdlib/lib/node_modules/@stdlib"
    );
}

#[test]
fn test_rootless_install_root_is_invalid() {
    let config = ShadowConfig::new("/", "@stdlib");
    assert!(matches!(
        config.destination_root().unwrap_err(),
        Error::InvalidInstallRoot(_)
    ));
}

#[test]
fn test_artifact_paths_live_in_the_install_root() {
    let config = config();
    let install_root = Path::new("/prefix/node_modules/@stdlib/stdlib");
    assert_eq!(
        config.root_descriptor_path(),
        install_root.join("package.json")
    );
    assert_eq!(
        config.backup_descriptor_path(),
        install_root.join("package.json.orig")
    );
    assert_eq!(config.ledger_path(), install_root.join("shadow_changes.json"));
}

#[test]
fn test_private_marker() {
    assert!(is_private("_tools/pkgs/find"));
    assert!(!is_private("math/base/special/sin"));
}
