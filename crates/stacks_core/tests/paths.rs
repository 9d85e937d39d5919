use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use stacks_core::{output_base, BookmarksPathError, OutputPaths};

#[test]
fn html_extension_is_stripped_for_output_base() {
    assert_eq!(
        output_base(Path::new("exports/delicious.html")).unwrap(),
        PathBuf::from("exports/delicious")
    );
    assert_eq!(
        output_base(Path::new("DELICIOUS.HTML")).unwrap(),
        PathBuf::from("DELICIOUS")
    );
}

#[test]
fn other_extensions_are_rejected() {
    assert_eq!(
        output_base(Path::new("bookmarks.htm")),
        Err(BookmarksPathError::UnexpectedExtension(
            "bookmarks.htm".to_string()
        ))
    );
    assert!(output_base(Path::new(".html")).is_err());
}

#[test]
fn output_paths_sit_next_to_bookmarks_file() {
    let paths = OutputPaths::for_bookmarks(Path::new("out/d.html"), None).unwrap();
    assert_eq!(paths.json, PathBuf::from("out/d.json"));
    assert_eq!(paths.annotated, PathBuf::from("out/d-with-stack-info.html"));
    assert_eq!(paths.stacks_only, PathBuf::from("out/d-only-stacks.html"));
}

#[test]
fn output_dir_overrides_location_but_keeps_name() {
    let paths =
        OutputPaths::for_bookmarks(Path::new("in/d.html"), Some(Path::new("elsewhere"))).unwrap();
    assert_eq!(paths.json, PathBuf::from("elsewhere/d.json"));
    assert_eq!(
        paths.stacks_only,
        PathBuf::from("elsewhere/d-only-stacks.html")
    );
}
