use pretty_assertions::assert_eq;
use stacks_core::{render_json, render_netscape, total_links, Link, Stack};

fn two_stacks() -> Vec<Stack> {
    vec![
        Stack::new(
            "Reading",
            "100001",
            "https://delicious.com/stacks/view/aaaaaa?m=list",
            vec![Link::new("http://x.com", "X")],
        ),
        Stack::new(
            "Cooking",
            "100002",
            "https://delicious.com/stacks/view/bbbbbb?m=list",
            vec![Link::new("http://y.com", "Y")],
        ),
    ]
}

#[test]
fn json_export_lists_stacks_in_order_with_field_names() {
    let json = render_json(&two_stacks()).unwrap();
    assert_eq!(
        json,
        concat!(
            r#"[{"name":"Reading","id":"100001","stack_link":"https://delicious.com/stacks/view/aaaaaa?m=list","links":[{"href":"http://x.com","title":"X"}]},"#,
            r#"{"name":"Cooking","id":"100002","stack_link":"https://delicious.com/stacks/view/bbbbbb?m=list","links":[{"href":"http://y.com","title":"Y"}]}]"#
        )
    );
}

#[test]
fn json_export_parses_back_to_same_stack_count() {
    let stacks = two_stacks();
    let json = render_json(&stacks).unwrap();
    let parsed: Vec<Stack> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, stacks);
}

#[test]
fn empty_collection_renders_empty_array() {
    assert_eq!(render_json(&[]).unwrap(), "[]");
}

#[test]
fn netscape_output_has_one_heading_and_list_per_stack() {
    let html = render_netscape(&two_stacks());
    let expected = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks Menu</H1>

<DL><p>
    <DT><H3>Reading</H3>
    <DL><p>
        <DT><a href="http://x.com">X</a>
    </DL><p>
    <DT><H3>Cooking</H3>
    <DL><p>
        <DT><a href="http://y.com">Y</a>
    </DL><p>
</DL><p>
"#;
    assert_eq!(html, expected);
}

#[test]
fn netscape_output_is_deterministic() {
    let stacks = two_stacks();
    assert_eq!(render_netscape(&stacks), render_netscape(&stacks));
}

#[test]
fn netscape_output_escapes_names_titles_and_hrefs() {
    let stacks = vec![Stack::new(
        "R&D <lab>",
        "1",
        "u",
        vec![Link::new("http://q.com/?a=1&b=\"2\"", "Fish & <Chips>")],
    )];
    let html = render_netscape(&stacks);
    assert!(html.contains("<DT><H3>R&amp;D &lt;lab&gt;</H3>"));
    assert!(html.contains(
        r#"<DT><a href="http://q.com/?a=1&amp;b=&quot;2&quot;">Fish &amp; &lt;Chips&gt;</a>"#
    ));
}

#[test]
fn total_links_counts_every_occurrence() {
    let mut stacks = two_stacks();
    stacks[1].links.push(Link::new("http://x.com", "X"));
    assert_eq!(total_links(&stacks), 3);
}
