//! Stacks engine: authenticated crawling of the bookmarking service and export IO.
mod config;
mod crawl;
mod decode;
mod detail;
mod export;
mod fetch;
mod pages;
mod persist;
mod pipeline;
mod progress;
mod types;

pub use config::{ServiceConfig, DEFAULT_BASE_URL, DEFAULT_THROTTLE};
pub use crawl::{crawl_stack_links, MAX_INDEX_PAGES};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use detail::{fetch_stack, fetch_stacks};
pub use export::{
    read_bookmarks, write_exports, BookmarksFile, ExportError, ExportSelection, ExportSummary,
};
pub use fetch::{FetchSettings, HttpSession, ReqwestSession};
pub use pages::{
    parse_fragment_links, parse_stack_detail, parse_stack_index, PageDirection, PaginationLink,
    StackDetail, StackIndexPage,
};
pub use persist::{ensure_output_dir, write_atomically, AtomicFileWriter, PersistError};
pub use pipeline::{collect_stacks, login, Credentials};
pub use progress::{ChannelProgressSink, NullProgressSink, ProgressSink};
pub use types::{
    ExportEvent, FailureKind, FetchError, FetchedPage, PageError, StackLinkRef, StackProgress,
    StacksError,
};
