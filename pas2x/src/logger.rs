//! Logging for `pascallitec`.
//!
//! The compiler crates only use the `log` macros. The command line decides
//! how much of that output is shown and where it goes.
use env_logger::Builder;
use log::trace;
use log::LevelFilter;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use time::OffsetDateTime;

/// The level shown for a number of `-v` flags. Errors are always shown
/// and four flags show every trace from the scanner and the emitter.
pub fn level_for(verbosity: u8) -> Result<LevelFilter, String> {
    match verbosity {
        0 => Ok(LevelFilter::Error),
        1 => Ok(LevelFilter::Warn),
        2 => Ok(LevelFilter::Info),
        3 => Ok(LevelFilter::Debug),
        4 => Ok(LevelFilter::Trace),
        _ => Err(format!("Verbosity is at most 4 (-vvvv) but was {}", verbosity)),
    }
}

/// Installs the logger for one run of the compiler.
///
/// Messages go to stderr, or to `log_file` when set so that they do not
/// mix with a listing written to stdout. Fails when the verbosity is out
/// of range, the file cannot be created or a logger is already installed.
pub fn configure(verbosity: u8, log_file: Option<PathBuf>) -> Result<(), String> {
    let log_level = level_for(verbosity)?;

    let mut builder = Builder::new();

    if let Some(log_location) = log_file {
        let file = File::create(&log_location).map_err(|e| {
            format!(
                "Unable to create log file {}. {}",
                log_location.display(),
                e
            )
        })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{} {:?}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                OffsetDateTime::now_utc(),
                record.args()
            )
        })
        .filter_level(log_level)
        .try_init()
        .map_err(|e| format!("Unable to configure logger. {}", e))?;

    trace!("Logger verbosity {log_level}");
    Ok(())
}
