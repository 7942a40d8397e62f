// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::Priority;
use crate::global;

/// The default environment variable for filtering records of the log crate.
pub const DEFAULT_FILTER_ENV: &str = "RUST_LOG";

/// Map a [`log::Level`] onto the syslog priority it is logged with.
pub fn priority_from_level(level: log::Level) -> Priority {
    match level {
        log::Level::Error => Priority::ERR,
        log::Level::Warn => Priority::WARNING,
        log::Level::Info => Priority::INFO,
        log::Level::Debug => Priority::DEBUG,
        log::Level::Trace => Priority::DEBUG,
    }
}

struct LogCrateLogger {
    filter: Option<env_filter::Filter>,
}

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        if let Some(filter) = &self.filter {
            if !filter.enabled(metadata) {
                return false;
            }
        }

        let priority = priority_from_level(metadata.level());
        global::with_global(|logger| logger.enabled(priority)).unwrap_or(false)
    }

    fn log(&self, record: &log::Record) {
        if let Some(filter) = &self.filter {
            if !filter.matches(record) {
                return;
            }
        }

        let priority = priority_from_level(record.level());
        global::log_prefixed(priority, record.target(), *record.args());
    }

    fn flush(&self) {}
}

fn install(filter: Option<env_filter::Filter>) -> Result<(), log::SetLoggerError> {
    let max_level = match &filter {
        Some(filter) => filter.filter(),
        None => log::LevelFilter::Trace,
    };
    log::set_boxed_logger(Box::new(LogCrateLogger { filter }))?;
    log::set_max_level(max_level);
    Ok(())
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] so that all records of the log crate are
/// forwarded to the logger in the [global slot](crate::global), tagged with their target. Records
/// are dropped while the slot is empty.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// sinklog::bridge::try_setup_log_crate().unwrap();
/// log::info!("dropped, nothing is installed in the global slot yet");
/// ```
pub fn try_setup_log_crate() -> Result<(), log::SetLoggerError> {
    install(None)
}

/// Set up the log crate global logger, filtering records with the directives read from the
/// environment variable `env`.
///
/// The directive syntax is the one of [`env_filter`], e.g. `info,my_crate::db=debug`. If the
/// variable is unset, every record is forwarded.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
pub fn try_setup_log_crate_with_env(env: &str) -> Result<(), log::SetLoggerError> {
    let filter = std::env::var(env).ok().map(|directives| {
        let mut builder = env_filter::Builder::new();
        builder.parse(&directives);
        builder.build()
    });
    install(filter)
}

/// Set up the log crate global logger.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate() {
    try_setup_log_crate().expect(
        "sinklog::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(priority_from_level(log::Level::Error), Priority::ERR);
        assert_eq!(priority_from_level(log::Level::Warn), Priority::WARNING);
        assert_eq!(priority_from_level(log::Level::Info), Priority::INFO);
        assert_eq!(priority_from_level(log::Level::Trace), Priority::DEBUG);
    }
}
