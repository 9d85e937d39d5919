use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::export::ExportError;

/// A fetched and decoded HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL after redirects.
    pub url: String,
    pub html: String,
    pub encoding_label: String,
}

/// Reference to one stack found on the stacks index, as the raw `href` of its anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackLinkRef {
    pub href: String,
}

impl StackLinkRef {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// Last six characters of the href, used as the stack's short code in progress output.
    pub fn short_code(&self) -> &str {
        let start = self
            .href
            .char_indices()
            .rev()
            .nth(5)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.href[start..]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackProgress {
    pub short_code: String,
    /// One-based position of the stack in crawl order.
    pub position: usize,
    pub total: usize,
    /// Running total of links across all stacks extracted so far.
    pub links_so_far: usize,
}

impl fmt::Display for StackProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "extracting stack {} ({}/{}). {} links in all stacks",
            self.short_code, self.position, self.total, self.links_so_far
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    LoggedIn { username: String },
    IndexPageFetched { page: usize, stacks_so_far: usize },
    StackExtracted(StackProgress),
    FileWritten { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "undecodable response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

impl From<DecodeError> for FetchError {
    fn from(err: DecodeError) -> Self {
        FetchError::new(FailureKind::Decode, err.to_string())
    }
}

/// A page did not contain what the scraper expected, usually because the
/// session is not logged in or the site layout changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("invalid selector {0}")]
    Selector(&'static str),
    #[error("no element matching {selector} on {url}")]
    MissingElement { selector: &'static str, url: String },
    #[error("element {selector} on {url} has no usable {attribute} attribute")]
    MissingAttribute {
        selector: &'static str,
        attribute: &'static str,
        url: String,
    },
}

/// Any failure of the export pipeline. The first one aborts the run.
#[derive(Debug, Error)]
pub enum StacksError {
    #[error("request failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("unexpected page content: {0}")]
    Page(#[from] PageError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}
