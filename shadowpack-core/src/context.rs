//! Execution-context guard.

use std::path::{Component, Path};

/// Path component marking an installed-dependency location.
pub const INSTALL_MARKER: &str = "node_modules";

/// Returns `true` when `path` sits inside an installed-dependency tree.
///
/// A build outside such a tree would scatter proxy directories through a
/// source checkout, so it is treated as a silent no-op. Dry runs bypass the
/// guard so the logic can be exercised anywhere.
pub fn is_installed_location(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == INSTALL_MARKER))
}
