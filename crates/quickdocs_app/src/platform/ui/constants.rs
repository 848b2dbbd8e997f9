use std::time::Duration;

pub const APP_TITLE: &str = "QuickDocs";
pub const SETTINGS_FILENAME: &str = ".quickdocs_settings.ron";
pub const LOG_FILENAME: &str = "quickdocs.log";
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(30);
/// How long the main loop waits for a key before draining engine messages.
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Transcript lines moved per PageUp/PageDown.
pub const SCROLL_STEP: usize = 5;

pub const HELP_LINES: &[&str] = &[
    "Type a question and press Enter to ask the documents.",
    "/upload <path>   upload a file",
    "/text <content>  add text content",
    "/server [url]    show or change the backend address",
    "/status          check the backend now",
    "/new             start a new conversation",
    "/quit            exit (also Ctrl+C)",
    "//...            send a message that starts with /",
    "PageUp/PageDown scroll the conversation, Esc clears the input.",
];
