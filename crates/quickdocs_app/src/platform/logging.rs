//! Logging initialization for the terminal app.
//!
//! Log records go to a file only: the terminal is redrawn on every frame and
//! interleaved log lines would be wiped or corrupt the screen.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

/// Environment variable selecting the log level (`error` .. `trace`).
const LEVEL_ENV: &str = "QUICKDOCS_LOG";

/// Starts the file logger at `path`. Failure to create the file leaves
/// logging disabled rather than aborting startup.
pub fn initialize(path: &Path) {
    let level = level_from_env(std::env::var(LEVEL_ENV).ok().as_deref());
    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, build_config(), file);
        }
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
        }
    }
}

fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
