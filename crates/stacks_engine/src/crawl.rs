use std::collections::HashSet;

use stacks_logging::{stacks_debug, stacks_warn};

use crate::config::ServiceConfig;
use crate::fetch::HttpSession;
use crate::pages::parse_stack_index;
use crate::progress::ProgressSink;
use crate::{ExportEvent, StackLinkRef, StacksError};

/// Upper bound on index pages followed in one crawl.
pub const MAX_INDEX_PAGES: usize = 1000;

/// Collects the stack links of every index page for `username`, first page first.
///
/// From each page the first pagination candidate not yet visited is followed.
/// Stops when no such candidate remains, or after [`MAX_INDEX_PAGES`] pages.
pub async fn crawl_stack_links(
    session: &dyn HttpSession,
    config: &ServiceConfig,
    username: &str,
    sink: &dyn ProgressSink,
) -> Result<Vec<StackLinkRef>, StacksError> {
    let mut next_url = Some(config.stacks_index_url(username).to_string());
    let mut visited = HashSet::new();
    let mut stack_links = Vec::new();
    let mut page_number = 0;

    while let Some(url) = next_url.take() {
        if page_number >= MAX_INDEX_PAGES {
            stacks_warn!("Stopping stacks index crawl after {} pages", page_number);
            break;
        }
        if !visited.insert(url.clone()) {
            stacks_debug!("Index page {} already crawled", url);
            break;
        }

        let page = session.get_html(&url).await?;
        let index = parse_stack_index(&page.html)?;
        page_number += 1;
        stack_links.extend(index.stack_links.iter().cloned());
        stacks_debug!(
            "Index page {} ({}): {} stacks, {} so far",
            page_number,
            page.url,
            index.stack_links.len(),
            stack_links.len()
        );
        sink.emit(ExportEvent::IndexPageFetched {
            page: page_number,
            stacks_so_far: stack_links.len(),
        });

        for href in index.next_candidates(page_number) {
            let candidate = config.resolve_page_url(&page.url, href)?.to_string();
            if !visited.contains(&candidate) {
                next_url = Some(candidate);
                break;
            }
        }
    }

    Ok(stack_links)
}
