use stacks_engine::{ExportEvent, ProgressSink};

/// Prints one line per export event to stdout.
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn emit(&self, event: ExportEvent) {
        println!("{}", console_line(&event));
    }
}

pub fn console_line(event: &ExportEvent) -> String {
    match event {
        ExportEvent::LoggedIn { username } => format!("logged in as {username}"),
        ExportEvent::IndexPageFetched {
            page,
            stacks_so_far,
        } => format!("stacks index page {page}: {stacks_so_far} stacks found"),
        ExportEvent::StackExtracted(progress) => progress.to_string(),
        ExportEvent::FileWritten { path } => format!("wrote {}", path.display()),
    }
}
