//! Loss-less document model for Netscape bookmark files.
//!
//! The file is split into start tags and opaque runs of everything else (text,
//! end tags, comments, doctypes). Unchanged segments serialize back to their
//! exact source text, so annotating a few anchors leaves the rest of the file
//! byte-for-byte intact.

use std::collections::HashMap;

use crate::escape::{decode_entities, escape_attribute};
use crate::model::Stack;

pub const STACK_ID_ATTR: &str = "stack_id";
pub const STACK_NAME_ATTR: &str = "stack_name";

/// Elements whose content is never scanned for tags.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "xmp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written in the source.
    pub name: String,
    /// Entity-decoded value; `None` for bare attributes such as `<input checked>`.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    name: String,
    attributes: Vec<Attribute>,
    self_closing: bool,
    /// Exact source text; dropped once the tag is modified.
    raw: Option<String>,
}

impl StartTag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Decoded value of the first attribute called `name` (ASCII case-insensitive).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .and_then(|a| a.value.as_deref())
    }

    /// Returns a copy of this tag with `name` set to `value`, replacing any
    /// existing attribute of that name.
    pub fn with_attr(&self, name: &str, value: &str) -> StartTag {
        let mut attributes: Vec<Attribute> = self
            .attributes
            .iter()
            .filter(|a| !a.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect();
        attributes.push(Attribute {
            name: name.to_string(),
            value: Some(value.to_string()),
        });
        StartTag {
            name: self.name.clone(),
            attributes,
            self_closing: self.self_closing,
            raw: None,
        }
    }

    fn write_html(&self, out: &mut String) {
        if let Some(raw) = &self.raw {
            out.push_str(raw);
            return;
        }
        out.push('<');
        out.push_str(&self.name);
        for attr in &self.attributes {
            out.push(' ');
            out.push_str(&attr.name);
            if let Some(value) = &attr.value {
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
        }
        if self.self_closing {
            out.push_str(" />");
        } else {
            out.push('>');
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(String),
    StartTag(StartTag),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookmarkDocument {
    segments: Vec<Segment>,
}

impl BookmarkDocument {
    pub fn parse(source: &str) -> Self {
        Parser::new(source).run()
    }

    /// Anchor start tags in document order.
    pub fn anchors(&self) -> impl Iterator<Item = &StartTag> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::StartTag(tag) if tag.is_named("a") => Some(tag),
            _ => None,
        })
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::StartTag(tag) => tag.write_html(&mut out),
            }
        }
        out
    }
}

/// Outcome of annotating a bookmarks document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotationReport {
    /// Link occurrences that found an anchor.
    pub matched: usize,
    /// Distinct anchors that received stack attributes.
    pub annotated_anchors: usize,
    /// Hrefs of link occurrences without a matching anchor, in processing order.
    pub unmatched: Vec<String>,
}

/// Annotates the first anchor of each stack link's href with the stack id and name.
pub fn annotate(document: &BookmarkDocument, stacks: &[Stack]) -> BookmarkDocument {
    annotate_with_report(document, stacks).0
}

/// Like [`annotate`], also reporting which links matched.
///
/// Links are processed in stack order, then link order. When several stacks
/// contain the same href, the last one processed wins. Hrefs are compared by
/// exact string equality after entity decoding.
pub fn annotate_with_report(
    document: &BookmarkDocument,
    stacks: &[Stack],
) -> (BookmarkDocument, AnnotationReport) {
    let mut first_anchor_by_href: HashMap<&str, usize> = HashMap::new();
    for (index, segment) in document.segments.iter().enumerate() {
        if let Segment::StartTag(tag) = segment {
            if tag.is_named("a") {
                if let Some(href) = tag.attr("href") {
                    first_anchor_by_href.entry(href).or_insert(index);
                }
            }
        }
    }

    let mut report = AnnotationReport::default();
    let mut assignments: HashMap<usize, &Stack> = HashMap::new();
    for stack in stacks {
        for link in &stack.links {
            match first_anchor_by_href.get(link.href.as_str()) {
                Some(&index) => {
                    assignments.insert(index, stack);
                    report.matched += 1;
                }
                None => report.unmatched.push(link.href.clone()),
            }
        }
    }
    report.annotated_anchors = assignments.len();

    let segments = document
        .segments
        .iter()
        .enumerate()
        .map(|(index, segment)| match (segment, assignments.get(&index)) {
            (Segment::StartTag(tag), Some(stack)) => Segment::StartTag(
                tag.with_attr(STACK_ID_ATTR, &stack.id)
                    .with_attr(STACK_NAME_ATTR, &stack.name),
            ),
            _ => segment.clone(),
        })
        .collect();

    (BookmarkDocument { segments }, report)
}

struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    segments: Vec<Segment>,
    text_start: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            segments: Vec::new(),
            text_start: 0,
        }
    }

    fn run(mut self) -> BookmarkDocument {
        let mut pos = 0;
        while let Some(offset) = self.source[pos..].find('<') {
            let lt = pos + offset;
            let rest = &self.source[lt..];
            pos = if rest.starts_with("<!--") {
                match rest[4..].find("-->") {
                    Some(end) => lt + 4 + end + 3,
                    None => self.source.len(),
                }
            } else if matches!(self.bytes.get(lt + 1), Some(b'!' | b'?' | b'/')) {
                self.skip_past_gt(lt + 1)
            } else if self.bytes.get(lt + 1).is_some_and(u8::is_ascii_alphabetic) {
                match self.start_tag(lt) {
                    Some((tag, end)) => {
                        let raw_text = RAW_TEXT_ELEMENTS.iter().any(|n| tag.is_named(n));
                        let closing = format!("</{}", tag.name.to_ascii_lowercase());
                        self.flush_text(lt);
                        self.segments.push(Segment::StartTag(tag));
                        self.text_start = end;
                        if raw_text {
                            self.find_ascii_ci(end, &closing).unwrap_or(self.source.len())
                        } else {
                            end
                        }
                    }
                    None => lt + 1,
                }
            } else {
                lt + 1
            };
        }
        self.flush_text(self.source.len());
        BookmarkDocument {
            segments: self.segments,
        }
    }

    fn flush_text(&mut self, end: usize) {
        if end > self.text_start {
            self.segments
                .push(Segment::Text(self.source[self.text_start..end].to_string()));
        }
        self.text_start = end;
    }

    fn skip_past_gt(&self, from: usize) -> usize {
        match self.source[from..].find('>') {
            Some(offset) => from + offset + 1,
            None => self.source.len(),
        }
    }

    fn find_ascii_ci(&self, from: usize, needle: &str) -> Option<usize> {
        let needle = needle.as_bytes();
        self.bytes[from..]
            .windows(needle.len())
            .position(|window| window.eq_ignore_ascii_case(needle))
            .map(|offset| from + offset)
    }

    /// Parses a start tag beginning at `lt`; returns the tag and the index just past `>`.
    fn start_tag(&self, lt: usize) -> Option<(StartTag, usize)> {
        let bytes = self.bytes;
        let mut i = lt + 1;
        let name_start = i;
        while i < bytes.len() && !is_tag_delimiter(bytes[i]) {
            i += 1;
        }
        let name = self.source[name_start..i].to_string();

        let mut attributes = Vec::new();
        loop {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i) {
                None => return None,
                Some(b'>') => {
                    i += 1;
                    return Some((self.finish_tag(name, attributes, false, lt, i), i));
                }
                Some(b'/') if bytes.get(i + 1) == Some(&b'>') => {
                    i += 2;
                    return Some((self.finish_tag(name, attributes, true, lt, i), i));
                }
                Some(b'/') => {
                    i += 1;
                    continue;
                }
                Some(_) => {}
            }

            let attr_start = i;
            i += 1;
            while i < bytes.len() && !is_tag_delimiter(bytes[i]) && bytes[i] != b'=' {
                i += 1;
            }
            let attr_name = self.source[attr_start..i].to_string();

            let mut j = i;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            let value = if bytes.get(j) == Some(&b'=') {
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                match bytes.get(j) {
                    Some(&quote @ (b'"' | b'\'')) => {
                        let value_start = j + 1;
                        let close = self.source[value_start..].find(quote as char)?;
                        i = value_start + close + 1;
                        Some(decode_entities(&self.source[value_start..value_start + close]))
                    }
                    _ => {
                        let value_start = j;
                        while j < bytes.len() && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>'
                        {
                            j += 1;
                        }
                        i = j;
                        Some(decode_entities(&self.source[value_start..j]))
                    }
                }
            } else {
                None
            };
            attributes.push(Attribute {
                name: attr_name,
                value,
            });
        }
    }

    fn finish_tag(
        &self,
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
        start: usize,
        end: usize,
    ) -> StartTag {
        StartTag {
            name,
            attributes,
            self_closing,
            raw: Some(self.source[start..end].to_string()),
        }
    }
}

fn is_tag_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'>' || b == b'/'
}
