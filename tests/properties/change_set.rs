//! Property tests for change-set normalization and matching.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use stagehand::domain::value_objects::ChangeSet;

const ROOT: &str = "/repo/portal";

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9._-]{0,11}").unwrap()
}

fn relative_path() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec(segment(), 1..=4)
        .prop_map(|segments| segments.iter().collect::<PathBuf>())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: normalization never panics on arbitrary input.
    #[test]
    fn property_from_paths_never_panics(raw in proptest::collection::vec("(?s).{0,64}", 0..8)) {
        let _ = ChangeSet::from_paths(raw.iter().map(PathBuf::from), Path::new(ROOT));
    }

    /// PROPERTY: an absolute path under the root and its relative form
    /// produce the same change-set.
    #[test]
    fn property_absolute_and_relative_agree(paths in proptest::collection::vec(relative_path(), 0..6)) {
        let root = Path::new(ROOT);
        let relative = ChangeSet::from_paths(&paths, root);
        let absolute = ChangeSet::from_paths(paths.iter().map(|p| root.join(p)), root);
        let dotted = ChangeSet::from_paths(paths.iter().map(|p| Path::new(".").join(p)), root);

        prop_assert_eq!(&relative, &absolute);
        prop_assert_eq!(&relative, &dotted);
    }

    /// PROPERTY: paths are sorted and unique, however often they repeat.
    #[test]
    fn property_paths_are_sorted_and_unique(paths in proptest::collection::vec(relative_path(), 0..6)) {
        let doubled: Vec<_> = paths.iter().chain(paths.iter()).cloned().collect();
        let set = ChangeSet::from_paths(&doubled, Path::new(ROOT));

        let mut expected = paths.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(set.paths(), expected.as_slice());
    }

    /// PROPERTY: a change anywhere below a manifest directory touches it,
    /// and a change to a parent directory touches every manifest entry below.
    #[test]
    fn property_touches_is_component_wise(dir in relative_path(), rest in relative_path()) {
        let inner = dir.join(&rest);

        let set = ChangeSet::from_paths([&inner], Path::new(ROOT));
        prop_assert!(set.touches(&dir));

        let set = ChangeSet::from_paths([&dir], Path::new(ROOT));
        prop_assert!(set.touches(&inner));
    }

    /// PROPERTY: absolute paths outside the root never touch anything.
    #[test]
    fn property_outside_root_is_discarded(path in relative_path()) {
        let outside = Path::new("/elsewhere").join(&path);
        let set = ChangeSet::from_paths([&outside], Path::new(ROOT));

        prop_assert!(set.is_empty());
        prop_assert!(!set.touches(&path));
    }
}

#[test]
fn sibling_prefix_is_not_a_match() {
    let set = ChangeSet::from_paths(["images-old/logo.png"], Path::new(ROOT));
    assert!(!set.touches(Path::new("images")));
}
