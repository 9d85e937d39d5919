use std::path::PathBuf;

use stacks_app::console_line;
use stacks_engine::{ExportEvent, StackProgress};

#[test]
fn every_event_has_a_console_line() {
    let lines: Vec<String> = [
        ExportEvent::LoggedIn {
            username: "alice".to_string(),
        },
        ExportEvent::IndexPageFetched {
            page: 2,
            stacks_so_far: 14,
        },
        ExportEvent::StackExtracted(StackProgress {
            short_code: "a1b2c3".to_string(),
            position: 3,
            total: 14,
            links_so_far: 41,
        }),
        ExportEvent::FileWritten {
            path: PathBuf::from("out/delicious.json"),
        },
    ]
    .iter()
    .map(console_line)
    .collect();

    assert_eq!(
        lines,
        vec![
            "logged in as alice".to_string(),
            "stacks index page 2: 14 stacks found".to_string(),
            "extracting stack a1b2c3 (3/14). 41 links in all stacks".to_string(),
            format!("wrote {}", PathBuf::from("out/delicious.json").display()),
        ]
    );
}
