//! Command-line front end for the stacks exporter.
pub mod cli;
mod console;

use anyhow::Context;
use stacks_core::{total_links, OutputPaths};
use stacks_engine::{collect_stacks, write_exports, Credentials, ExportSummary, ReqwestSession};
use stacks_logging::stacks_info;

pub use cli::Cli;
pub use console::{console_line, ConsoleProgress};

/// Runs the whole export: validate paths, log in, crawl, fetch stacks, write files.
pub async fn run(cli: Cli) -> anyhow::Result<ExportSummary> {
    let paths = OutputPaths::for_bookmarks(&cli.bookmarks_file, cli.output_dir.as_deref())?;
    let config = cli.service_config()?;
    let session = ReqwestSession::new(config.fetch.clone())?;
    let credentials = Credentials::new(cli.username.clone(), cli.password.clone());
    let sink = ConsoleProgress;

    let stacks = collect_stacks(&session, &config, &credentials, &sink)
        .await
        .with_context(|| format!("exporting stacks of {}", credentials.username))?;
    stacks_info!(
        "Collected {} links in {} stacks",
        total_links(&stacks),
        stacks.len()
    );

    let summary = write_exports(&cli.bookmarks_file, &paths, &stacks, &cli.selection(), &sink)?;
    Ok(summary)
}
