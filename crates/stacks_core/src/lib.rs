//! Stacks core: data model and pure export transforms.
mod bookmarks;
mod escape;
mod model;
mod netscape;
mod paths;

pub use bookmarks::{
    annotate, annotate_with_report, AnnotationReport, Attribute, BookmarkDocument, StartTag,
    STACK_ID_ATTR, STACK_NAME_ATTR,
};
pub use model::{render_json, total_links, Link, Stack};
pub use netscape::render_netscape;
pub use paths::{output_base, BookmarksPathError, OutputPaths};
