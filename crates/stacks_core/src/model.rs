use serde::{Deserialize, Serialize};

/// A single bookmarked link inside a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub title: String,
}

impl Link {
    pub fn new(href: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: title.into(),
        }
    }
}

/// A named, ordered collection of links as published by the bookmarking service.
///
/// `id` is kept as an opaque string; it is not assumed to be numeric or fixed width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub name: String,
    pub id: String,
    #[serde(rename = "stack_link")]
    pub source_url: String,
    pub links: Vec<Link>,
}

impl Stack {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        source_url: impl Into<String>,
        links: Vec<Link>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            source_url: source_url.into(),
            links,
        }
    }
}

/// Total number of links across all stacks, counting repeats once per stack.
pub fn total_links(stacks: &[Stack]) -> usize {
    stacks.iter().map(|s| s.links.len()).sum()
}

/// Compact JSON array of stacks: `[{"name","id","stack_link","links":[{"href","title"}]}]`.
pub fn render_json(stacks: &[Stack]) -> Result<String, serde_json::Error> {
    serde_json::to_string(stacks)
}
