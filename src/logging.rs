// src/logging.rs

use crate::config::Config;
use crate::errors::TutorResult;
use crate::models::ApiCallLog;
use flexi_logger::{
    detailed_format, Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
};
use log::info;
use std::path::PathBuf;

/// Directory the rotating log files are written to.
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("booktutor").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Starts file logging. The terminal is owned by the UI, so nothing is
/// duplicated to stdout or stderr. Keep the handle alive for the whole run.
pub fn init_logging(config: &Config) -> TutorResult<LoggerHandle> {
    let handle = Logger::try_with_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(log_directory())
                .basename("booktutor"),
        )
        .append()
        .rotate(
            Criterion::Size(1_000_000),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(3),
        )
        .duplicate_to_stderr(Duplicate::None)
        .format(detailed_format)
        .start()?;

    Ok(handle)
}

/// Logs an API call.
pub fn log_api_call(log: &ApiCallLog) {
    info!(target: "booktutor::api", "{}", log);
}
