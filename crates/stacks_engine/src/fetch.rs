use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use stacks_logging::stacks_debug;

use crate::decode::decode_html;
use crate::{FailureKind, FetchError, FetchedPage};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Cookie-bearing HTTP session shared by login, crawling and detail fetching.
#[async_trait::async_trait]
pub trait HttpSession: Send + Sync {
    /// POSTs form-encoded fields; the response body is discarded.
    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<(), FetchError>;

    async fn get_html(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// [`HttpSession`] backed by a single reqwest client with an in-memory cookie jar.
#[derive(Debug, Clone)]
pub struct ReqwestSession {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl ReqwestSession {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn parse_url(url: &str) -> Result<reqwest::Url, FetchError> {
        reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{url}: {err}")))
    }
}

#[async_trait::async_trait]
impl HttpSession for ReqwestSession {
    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<(), FetchError> {
        let parsed = Self::parse_url(url)?;
        let response = self
            .client
            .post(parsed)
            .form(fields)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(url, response.status())?;
        stacks_debug!("POST {} -> {}", url, response.status());
        Ok(())
    }

    async fn get_html(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = Self::parse_url(url)?;
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(url, response.status())?;

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_html(&bytes, content_type.as_deref())?;
        stacks_debug!(
            "GET {} -> {} bytes ({})",
            final_url,
            bytes.len(),
            decoded.encoding_label
        );

        Ok(FetchedPage {
            url: final_url,
            html: decoded.html,
            encoding_label: decoded.encoding_label,
        })
    }
}

fn check_status(url: &str, status: reqwest::StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::new(
            FailureKind::HttpStatus(status.as_u16()),
            format!("{status} for {url}"),
        ))
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
