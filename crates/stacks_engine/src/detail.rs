use stacks_core::Stack;
use stacks_logging::stacks_debug;

use crate::config::ServiceConfig;
use crate::fetch::HttpSession;
use crate::pages::{parse_fragment_links, parse_stack_detail};
use crate::progress::ProgressSink;
use crate::{ExportEvent, StackLinkRef, StackProgress, StacksError};

/// Fetches name, id and links of each stack, in order, pausing `config.throttle`
/// after every stack.
pub async fn fetch_stacks(
    session: &dyn HttpSession,
    config: &ServiceConfig,
    username: &str,
    stack_links: &[StackLinkRef],
    sink: &dyn ProgressSink,
) -> Result<Vec<Stack>, StacksError> {
    let total = stack_links.len();
    let mut stacks = Vec::with_capacity(total);
    let mut links_so_far = 0;

    for (index, stack_link) in stack_links.iter().enumerate() {
        let stack = fetch_stack(session, config, username, stack_link).await?;
        links_so_far += stack.links.len();
        stacks.push(stack);

        let progress = StackProgress {
            short_code: stack_link.short_code().to_string(),
            position: index + 1,
            total,
            links_so_far,
        };
        stacks_debug!("{}", progress);
        sink.emit(ExportEvent::StackExtracted(progress));

        if !config.throttle.is_zero() {
            tokio::time::sleep(config.throttle).await;
        }
    }

    Ok(stacks)
}

/// Reads one stack: its list-mode page for name and id, then the links fragment.
pub async fn fetch_stack(
    session: &dyn HttpSession,
    config: &ServiceConfig,
    username: &str,
    stack_link: &StackLinkRef,
) -> Result<Stack, StacksError> {
    let stack_url = config.stack_list_url(&stack_link.href)?.to_string();
    let page = session.get_html(&stack_url).await?;
    let detail = parse_stack_detail(&page.html, &page.url)?;

    let fragment_url = config.fragment_url(&detail.id, username).to_string();
    let fragment = session.get_html(&fragment_url).await?;
    let links = parse_fragment_links(&fragment.html, &fragment.url)?;
    stacks_debug!(
        "Stack {} ({}) has {} links",
        detail.id,
        detail.name,
        links.len()
    );

    Ok(Stack::new(detail.name, detail.id, stack_url, links))
}
