use std::fmt;

use stacks_core::Stack;
use stacks_logging::{stacks_debug, stacks_info};

use crate::config::ServiceConfig;
use crate::crawl::crawl_stack_links;
use crate::detail::fetch_stacks;
use crate::fetch::HttpSession;
use crate::progress::ProgressSink;
use crate::{ExportEvent, StacksError};

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Posts the login form. Success is not verified here; a failed login shows up
/// later as missing elements on the stack pages.
pub async fn login(
    session: &dyn HttpSession,
    config: &ServiceConfig,
    credentials: &Credentials,
) -> Result<(), StacksError> {
    session
        .post_form(
            config.login_url().as_str(),
            &[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ],
        )
        .await?;
    Ok(())
}

/// Logs in, crawls the stacks index and fetches every stack.
pub async fn collect_stacks(
    session: &dyn HttpSession,
    config: &ServiceConfig,
    credentials: &Credentials,
    sink: &dyn ProgressSink,
) -> Result<Vec<Stack>, StacksError> {
    login(session, config, credentials).await?;
    stacks_debug!("Logged in to {} as {}", config.base_url(), credentials.username);
    sink.emit(ExportEvent::LoggedIn {
        username: credentials.username.clone(),
    });

    let stack_links = crawl_stack_links(session, config, &credentials.username, sink).await?;
    stacks_info!("Found {} stacks", stack_links.len());

    fetch_stacks(session, config, &credentials.username, &stack_links, sink).await
}
