use pretty_assertions::assert_eq;
use stacks_core::Link;
use stacks_engine::{
    parse_fragment_links, parse_stack_detail, parse_stack_index, PageDirection, PageError,
    PaginationLink, StackLinkRef,
};

const INDEX_PAGE: &str = r#"<html><body>
<ul>
  <li><a class="stackLink" href="/stacks/view/aaaaaa">Reading</a></li>
  <li><a class="title stackLink" href="/stacks/view/bbbbbb">Cooking</a></li>
  <li><a class="other" href="/stacks/view/zzzzzz">not a stack</a></li>
  <li><a class="stackLink">no href</a></li>
</ul>
<div id="pagination"><a href="?page=2">2</a><a href="?page=3">3</a></div>
</body></html>"#;

#[test]
fn index_page_lists_stack_links_in_document_order() {
    let page = parse_stack_index(INDEX_PAGE).unwrap();
    assert_eq!(
        page.stack_links,
        vec![
            StackLinkRef::new("/stacks/view/aaaaaa"),
            StackLinkRef::new("/stacks/view/bbbbbb"),
        ]
    );
    assert_eq!(
        page.pagination,
        vec![
            PaginationLink {
                href: "?page=2".to_string(),
                direction: PageDirection::Unmarked,
                page_number: Some(2),
            },
            PaginationLink {
                href: "?page=3".to_string(),
                direction: PageDirection::Unmarked,
                page_number: Some(3),
            },
        ]
    );
}

#[test]
fn numbered_pages_above_the_current_one_are_candidates_in_order() {
    let page = parse_stack_index(INDEX_PAGE).unwrap();
    assert_eq!(page.next_candidates(1), vec!["?page=2", "?page=3"]);
    assert_eq!(page.next_candidates(2), vec!["?page=3"]);
    assert!(page.next_candidates(3).is_empty());
}

#[test]
fn later_page_with_numbered_pagination_skips_lower_pages() {
    let html = r#"<div id="pagination">
        <a href="?page=1">1</a>
        <a href="?page=4">4</a>
        <a href="?page=3">3</a>
    </div>"#;
    let page = parse_stack_index(html).unwrap();
    assert_eq!(page.next_candidates(2), vec!["?page=3", "?page=4"]);
}

#[test]
fn page_numbers_come_from_query_or_path_when_text_is_not_numeric() {
    let html = r#"<div id="pagination">
        <a href="/stacks/alice/page/3">more</a>
        <a href="/stacks/alice?sort=new&amp;p=2">more</a>
        <a href="/stacks/alice/archive">archive</a>
    </div>"#;
    let page = parse_stack_index(html).unwrap();
    let numbers: Vec<_> = page.pagination.iter().map(|link| link.page_number).collect();
    assert_eq!(numbers, vec![Some(3), Some(2), None]);
    assert_eq!(
        page.next_candidates(1),
        vec!["/stacks/alice?sort=new&p=2", "/stacks/alice/page/3", "/stacks/alice/archive"]
    );
}

#[test]
fn explicitly_marked_next_anchor_wins() {
    let html = r#"<div id="pagination">
        <a href="?page=1">&laquo; Prev</a>
        <a href="?page=2">2</a>
        <a href="?page=5" rel="next">later</a>
    </div>"#;
    let page = parse_stack_index(html).unwrap();
    assert_eq!(page.pagination[0].direction, PageDirection::Previous);
    assert_eq!(page.pagination[2].direction, PageDirection::Next);
    assert_eq!(page.next_candidates(1), vec!["?page=5", "?page=2"]);

    let by_text = parse_stack_index(
        r#"<div id="pagination"><a href="?p=1">Prev</a><a href="?p=3">Next &raquo;</a></div>"#,
    )
    .unwrap();
    assert_eq!(by_text.next_candidates(2), vec!["?p=3"]);
}

#[test]
fn previous_anchors_are_never_candidates() {
    let html = r#"<div id="pagination">
        <a class="prev" href="/stacks/alice">back</a>
        <a rel="previous" href="/stacks/alice/first">first</a>
    </div>"#;
    let page = parse_stack_index(html).unwrap();
    assert!(page.next_candidates(2).is_empty());
}

#[test]
fn index_without_pagination_has_no_next_page() {
    let page = parse_stack_index(r#"<a class="stackLink" href="/stacks/view/cccccc">C</a>"#)
        .unwrap();
    assert_eq!(page.stack_links.len(), 1);
    assert!(page.next_candidates(1).is_empty());
}

#[test]
fn stack_detail_reads_name_and_id_inputs() {
    let html = r#"<form>
        <input type="text" id="stackTitleInlineEdit" value="Reading &amp; Writing">
        <input type="hidden" id="stack_view_stack_id" value="100001">
    </form>"#;
    let detail = parse_stack_detail(html, "https://delicious.com/stacks/view/aaaaaa?m=list")
        .unwrap();
    assert_eq!(detail.name, "Reading & Writing");
    assert_eq!(detail.id, "100001");
}

#[test]
fn stack_detail_without_id_input_is_missing_element() {
    let html = r#"<input id="stackTitleInlineEdit" value="Reading">"#;
    let err = parse_stack_detail(html, "u").unwrap_err();
    assert_eq!(
        err,
        PageError::MissingElement {
            selector: "input#stack_view_stack_id",
            url: "u".to_string(),
        }
    );
}

#[test]
fn stack_detail_with_empty_value_is_missing_attribute() {
    let html = r#"<input id="stackTitleInlineEdit" value="  "><input id="stack_view_stack_id" value="1">"#;
    let err = parse_stack_detail(html, "u").unwrap_err();
    assert!(matches!(
        err,
        PageError::MissingAttribute {
            attribute: "value",
            ..
        }
    ));
}

#[test]
fn fragment_links_come_from_share_actions() {
    let html = r#"<ul>
      <li><div class="action share" href="http://x.com" title="X"></div></li>
      <li><div class="action edit" href="http://ignored.com" title="no"></div></li>
      <li><div class="share action" href="http://y.com/?a=1&amp;b=2" title="Y &amp; Z"></div></li>
    </ul>"#;
    let links = parse_fragment_links(html, "u").unwrap();
    assert_eq!(
        links,
        vec![
            Link::new("http://x.com", "X"),
            Link::new("http://y.com/?a=1&b=2", "Y & Z"),
        ]
    );
}

#[test]
fn fragment_without_share_actions_is_empty() {
    assert!(parse_fragment_links("<p>empty stack</p>", "u")
        .unwrap()
        .is_empty());
}

#[test]
fn share_action_without_title_fails() {
    let err =
        parse_fragment_links(r#"<div class="action share" href="http://x.com"></div>"#, "u")
            .unwrap_err();
    assert_eq!(
        err,
        PageError::MissingAttribute {
            selector: "div.action.share",
            attribute: "title",
            url: "u".to_string(),
        }
    );
}

#[test]
fn short_code_is_last_six_characters_of_href() {
    assert_eq!(StackLinkRef::new("/stacks/view/a1b2c3").short_code(), "a1b2c3");
    assert_eq!(StackLinkRef::new("abc").short_code(), "abc");
}
