use crate::escape::{escape_attribute, escape_text};
use crate::model::Stack;

const HEADER: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks Menu</H1>

"#;

const LIST_START: &str = "<DL><p>\n";
const LIST_END: &str = "</DL><p>\n";
const INDENT: &str = "    ";

/// Renders stacks as a standalone Netscape bookmarks file, one folder per stack.
///
/// Folder headings use an upper-case `H3`; some browsers ignore lower-case ones.
pub fn render_netscape(stacks: &[Stack]) -> String {
    let mut out = String::from(HEADER);
    out.push_str(LIST_START);
    for stack in stacks {
        out.push_str(INDENT);
        out.push_str("<DT><H3>");
        out.push_str(&escape_text(&stack.name));
        out.push_str("</H3>\n");
        out.push_str(INDENT);
        out.push_str(LIST_START);
        for link in &stack.links {
            out.push_str(&format!(
                "{INDENT}{INDENT}<DT><a href=\"{}\">{}</a>\n",
                escape_attribute(&link.href),
                escape_text(&link.title)
            ));
        }
        out.push_str(INDENT);
        out.push_str(LIST_END);
    }
    out.push_str(LIST_END);
    out
}
