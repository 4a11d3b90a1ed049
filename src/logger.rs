//! File logging for the review binary.
//!
//! Records go to `spell_review.log`; only warnings and errors reach stderr so
//! the interactive prompts on stdout stay readable.

use std::io::stderr;
use std::path::Path;
use std::sync::Once;
use std::time::SystemTime;

use fern::Dispatch;
use humantime::format_rfc3339;
use log::LevelFilter;

/// Log file name.
pub const LOG_FILE_NAME: &str = "spell_review.log";

static INIT_LOGGER_ONCE: Once = Once::new();

/// Initializes logging once; later calls are no-ops that return `Ok`.
pub fn initialize(log_dir: &Path, level: LevelFilter) -> Result<(), fern::InitError> {
    let mut result = Ok(());
    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir, level);
        if result.is_ok() {
            log::info!("Logger initialized with level: {level:?}");
        }
    });
    result
}

fn initialize_internal(log_dir: &Path, level: LevelFilter) -> Result<(), fern::InitError> {
    std::fs::create_dir_all(log_dir)?;
    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let file_dispatch = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                target = record.target(),
            ))
        })
        .chain(fern::log_file(&log_file_path)?);

    let stderr_dispatch = Dispatch::new()
        .level(LevelFilter::Warn)
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .chain(stderr());

    Dispatch::new()
        .level(level)
        .chain(file_dispatch)
        .chain(stderr_dispatch)
        .apply()?;

    Ok(())
}
