//! Scrapers for the three kinds of pages the exporter reads.

use scraper::{ElementRef, Html, Selector};
use stacks_core::Link;

use crate::{PageError, StackLinkRef};

const STACK_LINK: &str = "a.stackLink";
const PAGINATION_LINK: &str = "div#pagination a[href]";
const STACK_TITLE: &str = "input#stackTitleInlineEdit";
const STACK_ID: &str = "input#stack_view_stack_id";
const SHARE_ACTION: &str = "div.action.share";

/// How a pagination anchor labels itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Previous,
    Unmarked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationLink {
    pub href: String,
    pub direction: PageDirection,
    /// Page number from the anchor text, a `page`/`p` query value or a numeric last path segment.
    pub page_number: Option<usize>,
}

/// One page of a user's stacks index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackIndexPage {
    pub stack_links: Vec<StackLinkRef>,
    /// Every pagination anchor with an href, in document order.
    pub pagination: Vec<PaginationLink>,
}

impl StackIndexPage {
    /// Pagination hrefs that may lead on from page `current_page`, best first.
    ///
    /// Anchors marked next come first, then numbered pages above the current
    /// one in ascending order, then unnumbered anchors. Anchors marked previous
    /// and numbered pages at or below the current one never qualify. The
    /// crawler takes the first candidate it has not visited yet.
    pub fn next_candidates(&self, current_page: usize) -> Vec<&str> {
        let marked = self
            .pagination
            .iter()
            .filter(|link| link.direction == PageDirection::Next);
        let unmarked = || {
            self.pagination
                .iter()
                .filter(|link| link.direction == PageDirection::Unmarked)
        };
        let mut numbered: Vec<&PaginationLink> = unmarked()
            .filter(|link| link.page_number.is_some_and(|n| n > current_page))
            .collect();
        numbered.sort_by_key(|link| link.page_number);
        let unnumbered = unmarked().filter(|link| link.page_number.is_none());

        marked
            .chain(numbered)
            .chain(unnumbered)
            .map(|link| link.href.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackDetail {
    pub name: String,
    pub id: String,
}

fn selector(css: &'static str) -> Result<Selector, PageError> {
    Selector::parse(css).map_err(|_| PageError::Selector(css))
}

pub fn parse_stack_index(html: &str) -> Result<StackIndexPage, PageError> {
    let doc = Html::parse_document(html);

    let stack_links = doc
        .select(&selector(STACK_LINK)?)
        .filter_map(|a| a.value().attr("href"))
        .map(StackLinkRef::new)
        .collect();

    let pagination = doc
        .select(&selector(PAGINATION_LINK)?)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let text = anchor.text().collect::<String>();
            Some(PaginationLink {
                href: href.to_string(),
                direction: direction_of(anchor, &text),
                page_number: page_number_of(&text, href),
            })
        })
        .collect();

    Ok(StackIndexPage {
        stack_links,
        pagination,
    })
}

fn direction_of(anchor: ElementRef, text: &str) -> PageDirection {
    let element = anchor.value();
    let marked = |word: &str| {
        let rel = element
            .attr("rel")
            .is_some_and(|rel| rel.split_ascii_whitespace().any(|r| r.eq_ignore_ascii_case(word)));
        rel || element.classes().any(|c| c.eq_ignore_ascii_case(word))
    };
    let text = text.to_lowercase();
    if marked("next") || text.contains("next") || text.contains('»') || text.contains('›') {
        PageDirection::Next
    } else if marked("prev")
        || marked("previous")
        || text.contains("prev")
        || text.contains('«')
        || text.contains('‹')
    {
        PageDirection::Previous
    } else {
        PageDirection::Unmarked
    }
}

fn page_number_of(text: &str, href: &str) -> Option<usize> {
    if let Ok(number) = text.trim().parse() {
        return Some(number);
    }
    let href = href.split('#').next().unwrap_or(href);
    let (path, query) = href.split_once('?').unwrap_or((href, ""));
    let from_query = query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == "page" || key == "p" {
            value.parse::<usize>().ok()
        } else {
            None
        }
    });
    from_query.or_else(|| {
        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    })
}

/// Reads the stack name and id from the hidden editor inputs of a list-mode stack page.
pub fn parse_stack_detail(html: &str, url: &str) -> Result<StackDetail, PageError> {
    let doc = Html::parse_document(html);
    let name = input_value(&doc, STACK_TITLE, url)?;
    let id = input_value(&doc, STACK_ID, url)?;
    Ok(StackDetail { name, id })
}

fn input_value(doc: &Html, css: &'static str, url: &str) -> Result<String, PageError> {
    let input = doc
        .select(&selector(css)?)
        .next()
        .ok_or_else(|| PageError::MissingElement {
            selector: css,
            url: url.to_string(),
        })?;
    input
        .value()
        .attr("value")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| PageError::MissingAttribute {
            selector: css,
            attribute: "value",
            url: url.to_string(),
        })
}

/// Links of a stack, one per share action in the fragment, in document order.
pub fn parse_fragment_links(html: &str, url: &str) -> Result<Vec<Link>, PageError> {
    let doc = Html::parse_document(html);
    doc.select(&selector(SHARE_ACTION)?)
        .map(|share| {
            let attr = |attribute: &'static str| {
                share
                    .value()
                    .attr(attribute)
                    .ok_or_else(|| PageError::MissingAttribute {
                        selector: SHARE_ACTION,
                        attribute,
                        url: url.to_string(),
                    })
            };
            Ok(Link::new(attr("href")?, attr("title")?))
        })
        .collect()
}
