use std::fs;
use std::path::{Path, PathBuf};

use stacks_core::{
    annotate_with_report, render_json, render_netscape, AnnotationReport, BookmarkDocument,
    OutputPaths, Stack,
};
use stacks_logging::{stacks_debug, stacks_info};

use crate::decode::{decode_html, DecodeError};
use crate::persist::{write_atomically, PersistError};
use crate::progress::ProgressSink;
use crate::ExportEvent;

/// Which of the three outputs to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSelection {
    pub json: bool,
    pub annotate: bool,
    pub generate: bool,
}

impl Default for ExportSelection {
    fn default() -> Self {
        Self {
            json: true,
            annotate: true,
            generate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    pub annotation: Option<AnnotationReport>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot read bookmarks file {path}: {source}")]
    ReadBookmarks {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode bookmarks file {path}: {source}")]
    DecodeBookmarks {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Writes the selected exports in order: JSON dump, annotated copy of
/// `bookmarks_file`, stacks-only bookmarks file.
pub fn write_exports(
    bookmarks_file: &Path,
    paths: &OutputPaths,
    stacks: &[Stack],
    selection: &ExportSelection,
    sink: &dyn ProgressSink,
) -> Result<ExportSummary, ExportError> {
    let mut summary = ExportSummary::default();
    let mut record = |path: PathBuf| {
        stacks_debug!("Wrote {}", path.display());
        sink.emit(ExportEvent::FileWritten { path: path.clone() });
        summary.written.push(path);
    };

    if selection.json {
        record(write_atomically(&paths.json, &render_json(stacks)?)?);
    }

    let mut annotation = None;
    if selection.annotate {
        let source = read_bookmarks(bookmarks_file)?;
        let (annotated, report) = annotate_with_report(&source.document, stacks);
        stacks_info!(
            "Annotated {} bookmarks from {} stack links; {} links not found in {}",
            report.annotated_anchors,
            report.matched,
            report.unmatched.len(),
            bookmarks_file.display()
        );
        for href in &report.unmatched {
            stacks_debug!("No bookmark for {}", href);
        }
        record(write_atomically(&paths.annotated, &source.render(&annotated))?);
        annotation = Some(report);
    }

    if selection.generate {
        record(write_atomically(&paths.stacks_only, &render_netscape(stacks))?);
    }

    summary.annotation = annotation;
    Ok(summary)
}

/// A bookmarks file as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarksFile {
    pub document: BookmarkDocument,
    /// Label of the encoding the file was decoded from. Output is always UTF-8.
    pub encoding_label: String,
    pub byte_order_mark: bool,
}

impl BookmarksFile {
    /// Serializes `document`, restoring the byte order mark the source file had.
    pub fn render(&self, document: &BookmarkDocument) -> String {
        let html = document.to_html();
        if self.byte_order_mark {
            format!("\u{FEFF}{html}")
        } else {
            html
        }
    }
}

pub fn read_bookmarks(path: &Path) -> Result<BookmarksFile, ExportError> {
    let bytes = fs::read(path).map_err(|source| ExportError::ReadBookmarks {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = decode_html(&bytes, None).map_err(|source| ExportError::DecodeBookmarks {
        path: path.to_path_buf(),
        source,
    })?;
    if !decoded.encoding_label.eq_ignore_ascii_case("UTF-8") {
        stacks_debug!(
            "{} decoded as {}; the annotated copy is written as UTF-8",
            path.display(),
            decoded.encoding_label
        );
    }
    Ok(BookmarksFile {
        document: BookmarkDocument::parse(&decoded.html),
        encoding_label: decoded.encoding_label,
        byte_order_mark: decoded.byte_order_mark,
    })
}
