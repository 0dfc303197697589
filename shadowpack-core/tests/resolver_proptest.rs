use proptest::prelude::*;

use shadowpack_core::resolver::Resolver;

const OFFSET: &str = "stdlib/lib/node_modules/@stdlib";

/// Collapses `..` and `.` segments the way filesystem traversal would.
fn normalize(path: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other.to_string()),
        }
    }
    segments
}

fn gen_segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9-]{0,7}", 1..6)
}

proptest! {
    // Joining the resolved path from the shadow entry at depth N must land
    // on the same location as joining the package root with the original
    // relative path.
    #[test]
    fn test_resolved_path_reaches_real_package(segments in gen_segments()) {
        let relative = segments.join("/");
        let resolver = Resolver::new(OFFSET);

        let from_shadow = format!("{}/{}", relative, resolver.package_path(&relative));
        let from_package_root: Vec<String> = OFFSET
            .split('/')
            .map(str::to_string)
            .chain(segments.iter().cloned())
            .collect();

        prop_assert_eq!(normalize(&from_shadow), from_package_root);
    }

    // The number of parent traversals always equals the shadow entry's own
    // nesting depth, so the climb never escapes the destination root.
    #[test]
    fn test_parent_traversals_match_depth(segments in gen_segments()) {
        let relative = segments.join("/");
        let resolver = Resolver::new(OFFSET);

        let resolved = resolver.package_path(&relative);
        let ups = resolved.split('/').filter(|s| *s == "..").count();
        prop_assert_eq!(ups, segments.len());
    }
}
