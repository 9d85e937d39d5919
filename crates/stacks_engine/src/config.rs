use std::time::Duration;

use url::Url;

use crate::fetch::FetchSettings;
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://delicious.com";
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(500);

/// Where the bookmarking service lives and how politely to talk to it.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    base_url: Url,
    /// Pause after each stack's detail requests.
    pub throttle: Duration,
    pub fetch: FetchSettings,
}

impl ServiceConfig {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{base_url}: not a base url"),
            ));
        }
        Ok(Self {
            base_url,
            throttle: DEFAULT_THROTTLE,
            fetch: FetchSettings::default(),
        })
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_fetch_settings(mut self, fetch: FetchSettings) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn login_url(&self) -> Url {
        self.endpoint(&["login"])
    }

    pub fn stacks_index_url(&self, username: &str) -> Url {
        self.endpoint(&["stacks", username])
    }

    /// Stack page in list mode: the stack href resolved against the service root, plus `m=list`.
    pub fn stack_list_url(&self, href: &str) -> Result<Url, FetchError> {
        let mut url = self.service_root().join(root_relative(href)).map_err(|err| {
            FetchError::new(FailureKind::InvalidUrl, format!("stack link {href}: {err}"))
        })?;
        url.query_pairs_mut().append_pair("m", "list");
        Ok(url)
    }

    /// Resolves a pagination href found on the page at `current`.
    ///
    /// Hrefs starting with a single `/` are taken relative to the service root,
    /// so a base URL path prefix is kept; anything else resolves against `current`.
    pub fn resolve_page_url(&self, current: &str, href: &str) -> Result<Url, FetchError> {
        let joined = if is_root_relative(href) {
            self.service_root().join(root_relative(href))
        } else {
            Url::parse(current).and_then(|base| base.join(href))
        };
        joined.map_err(|err| {
            FetchError::new(FailureKind::InvalidUrl, format!("page link {href}: {err}"))
        })
    }

    /// The partial-page request the stack editor issues to list a stack's links.
    pub fn fragment_url(&self, stack_id: &str, editor: &str) -> Url {
        let mut url = self.endpoint(&["stacks", "fragment", "elements", stack_id]);
        url.query_pairs_mut()
            .append_pair("mode", "list")
            .append_pair("editor", editor)
            .append_pair("search", "")
            .append_pair("editMode", "false");
        url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// The base URL as a directory, ready for relative joins.
    fn service_root(&self) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url
    }
}

fn is_root_relative(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

fn root_relative(href: &str) -> &str {
    if is_root_relative(href) {
        &href[1..]
    } else {
        href
    }
}
