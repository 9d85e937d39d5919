use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use stacks_engine::{ExportSelection, FetchError, FetchSettings, ServiceConfig, DEFAULT_BASE_URL};
use stacks_logging::LogDestination;

/// Export bookmark stacks to JSON and Netscape bookmark files.
///
/// Writes `<base>.json`, `<base>-with-stack-info.html` and
/// `<base>-only-stacks.html`, where `<base>` is BOOKMARKS_FILE without `.html`.
#[derive(Parser)]
#[command(name = "export_stacks", version)]
pub struct Cli {
    /// Account username; also the stack editor name in fragment requests.
    pub username: String,

    /// Account password.
    pub password: String,

    /// Existing bookmarks export (Netscape format, must end in .html).
    pub bookmarks_file: PathBuf,

    /// Root URL of the bookmarking service.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Pause after each stack, in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub throttle_ms: u64,

    /// Per-request timeout, in seconds (at least 1).
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Directory for the output files (default: next to BOOKMARKS_FILE).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Do not write the JSON dump.
    #[arg(long)]
    pub skip_json: bool,

    /// Do not write the annotated copy of BOOKMARKS_FILE.
    #[arg(long)]
    pub skip_annotate: bool,

    /// Do not write the stacks-only bookmarks file.
    #[arg(long)]
    pub skip_generate: bool,

    /// Also write the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn selection(&self) -> ExportSelection {
        ExportSelection {
            json: !self.skip_json,
            annotate: !self.skip_annotate,
            generate: !self.skip_generate,
        }
    }

    pub fn service_config(&self) -> Result<ServiceConfig, FetchError> {
        let fetch = FetchSettings {
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..FetchSettings::default()
        };
        Ok(ServiceConfig::new(&self.base_url)?
            .with_throttle(Duration::from_millis(self.throttle_ms))
            .with_fetch_settings(fetch))
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }
}
