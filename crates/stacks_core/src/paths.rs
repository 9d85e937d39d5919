use std::path::{Path, PathBuf};

use thiserror::Error;

const BOOKMARKS_EXTENSION: &str = ".html";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookmarksPathError {
    #[error("bookmarks file must end in .html: {0}")]
    UnexpectedExtension(String),
    #[error("bookmarks file path is not valid UTF-8: {0}")]
    NotUtf8(String),
}

/// Output file locations derived from the bookmarks file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub annotated: PathBuf,
    pub stacks_only: PathBuf,
}

impl OutputPaths {
    /// `<base>.json`, `<base>-with-stack-info.html` and `<base>-only-stacks.html`,
    /// placed in `output_dir` when given, else next to the bookmarks file.
    pub fn for_bookmarks(
        bookmarks_file: &Path,
        output_dir: Option<&Path>,
    ) -> Result<Self, BookmarksPathError> {
        let base = output_base(bookmarks_file)?;
        let base = match output_dir {
            Some(dir) => {
                let stem = base
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                dir.join(stem)
            }
            None => base,
        };
        let with_suffix = |suffix: &str| {
            let mut name = base.clone().into_os_string();
            name.push(suffix);
            PathBuf::from(name)
        };
        Ok(Self {
            json: with_suffix(".json"),
            annotated: with_suffix("-with-stack-info.html"),
            stacks_only: with_suffix("-only-stacks.html"),
        })
    }
}

/// Strips the `.html` extension (ASCII case-insensitive) from the bookmarks path.
pub fn output_base(bookmarks_file: &Path) -> Result<PathBuf, BookmarksPathError> {
    let display = bookmarks_file.display().to_string();
    let raw = bookmarks_file
        .to_str()
        .ok_or_else(|| BookmarksPathError::NotUtf8(display.clone()))?;
    let split = raw.len().checked_sub(BOOKMARKS_EXTENSION.len());
    match split {
        Some(split)
            if raw.is_char_boundary(split)
                && raw[split..].eq_ignore_ascii_case(BOOKMARKS_EXTENSION)
                && split > 0 =>
        {
            Ok(PathBuf::from(&raw[..split]))
        }
        _ => Err(BookmarksPathError::UnexpectedExtension(display)),
    }
}
