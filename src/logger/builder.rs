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

use std::fmt;
use std::io;
use std::io::Write;
use std::path::PathBuf;

use jiff::tz::TimeZone;

use super::handle::Logger;
use crate::Error;
use crate::ErrorKind;
#[cfg(all(unix, feature = "syslog"))]
use crate::Facility;
use crate::Flags;
use crate::Priority;
use crate::format::DEFAULT_BUFFER_CAPACITY;
use crate::sink::CallbackSink;
use crate::sink::PathSink;
use crate::sink::Sink;
use crate::sink::StreamSink;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A builder to configure and open a [`Logger`].
///
/// The builder collects the settings shared by every sink. One of the terminal methods,
/// [`syslog`], [`syslog_by_name`], [`stream`], [`path`] or [`callback`], picks the sink and opens
/// the logger.
///
/// [`syslog`]: LoggerBuilder::syslog
/// [`syslog_by_name`]: LoggerBuilder::syslog_by_name
/// [`stream`]: LoggerBuilder::stream
/// [`path`]: LoggerBuilder::path
/// [`callback`]: LoggerBuilder::callback
///
/// # Examples
///
/// ```
/// use sinklog::Flags;
/// use sinklog::LoggerBuilder;
/// use sinklog::Priority;
///
/// let mut logger = LoggerBuilder::new("svc")
///     .threshold(Priority::INFO)
///     .flags(Flags::TIMESTAMP)
///     .stream(std::io::stderr())
///     .unwrap();
///
/// logger.log_str(Priority::INFO, "service started");
/// ```
pub struct LoggerBuilder {
    pub(super) ident: String,
    pub(super) threshold: Priority,
    pub(super) flags: Flags,
    pub(super) syslog_options: i32,
    pub(super) buffer_capacity: usize,
    pub(super) time_zone: Option<TimeZone>,
    pub(super) console: Box<dyn Write + Send>,
    pub(super) trap: Box<dyn Trap>,
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("ident", &self.ident)
            .field("threshold", &self.threshold)
            .field("flags", &self.flags)
            .field("syslog_options", &self.syslog_options)
            .field("buffer_capacity", &self.buffer_capacity)
            .field("time_zone", &self.time_zone)
            .field("trap", &self.trap)
            .finish_non_exhaustive()
    }
}

impl LoggerBuilder {
    /// Create a new logger builder with the identity prepended to each line.
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            threshold: Priority::DEBUG,
            flags: Flags::empty(),
            syslog_options: 0,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            time_zone: None,
            console: Box::new(io::stderr()),
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the highest priority number that gets logged.
    ///
    /// Default to [`Priority::DEBUG`], which logs every standard priority.
    pub fn threshold(mut self, threshold: impl Into<Priority>) -> Self {
        self.threshold = threshold.into();
        self
    }

    /// Set the output flags. Only stream and path sinks honor them.
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the options passed to `openlog(3)`, e.g. `libc::LOG_CONS`.
    ///
    /// `LOG_PID` is always added.
    pub fn syslog_options(mut self, options: i32) -> Self {
        self.syslog_options = options;
        self
    }

    /// Set the capacity of the line buffer. Longer lines are dropped.
    ///
    /// Default to [`DEFAULT_BUFFER_CAPACITY`].
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Set the time zone of the timestamp prefix.
    ///
    /// Default to the system time zone.
    pub fn time_zone(mut self, tz: TimeZone) -> Self {
        self.time_zone = Some(tz);
        self
    }

    /// Set the stream lines are mirrored to by the echo flags.
    ///
    /// Default to stderr.
    pub fn diagnostic(mut self, writer: impl Write + Send + 'static) -> Self {
        self.console = Box::new(writer);
        self
    }

    /// Set the trap for handling errors during logging.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Open a logger writing to the system log with the given facility.
    ///
    /// # Errors
    ///
    /// Return a [`ErrorKind::SinkInit`] error if the identity is empty or contains a NUL byte.
    #[cfg(all(unix, feature = "syslog"))]
    pub fn syslog(self, facility: Facility) -> Result<Logger, Error> {
        let options = self.syslog_options;
        self.open(|ident| {
            crate::sink::SyslogSink::open(ident, facility, options).map(Sink::Syslog)
        })
    }

    /// Open a logger writing to the system log, looking the facility up by name.
    ///
    /// # Errors
    ///
    /// Return a [`ErrorKind::SinkInit`] error if the facility name is unknown, in which case no
    /// system log session is opened.
    #[cfg(all(unix, feature = "syslog"))]
    pub fn syslog_by_name(self, facility: &str) -> Result<Logger, Error> {
        let facility = Facility::from_name(facility)?;
        self.syslog(facility)
    }

    /// Open a logger writing to a stream the caller already opened.
    ///
    /// The logger flushes the stream after each line and does not close it, see
    /// [`Logger::take_stream`].
    pub fn stream(self, writer: impl Write + Send + 'static) -> Result<Logger, Error> {
        self.open(|_| Ok(Sink::Stream(StreamSink::new(Box::new(writer)))))
    }

    /// Open a logger appending to the file at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Return a [`ErrorKind::SinkInit`] error if the file cannot be opened.
    pub fn path(self, path: impl Into<PathBuf>) -> Result<Logger, Error> {
        let path = path.into();
        self.open(|_| PathSink::open(path).map(Sink::Path))
    }

    /// Open a logger handing each line to `function`.
    pub fn callback<F>(self, function: F) -> Result<Logger, Error>
    where
        F: FnMut(Priority, &str) + Send + 'static,
    {
        self.open(|_| Ok(Sink::Callback(CallbackSink::new(Box::new(function)))))
    }

    fn open<F>(self, make_sink: F) -> Result<Logger, Error>
    where
        F: FnOnce(&str) -> Result<Sink, Error>,
    {
        if self.ident.is_empty() {
            return Err(Error::new(ErrorKind::SinkInit, "identity must not be empty"));
        }
        if self.buffer_capacity == 0 {
            return Err(Error::new(
                ErrorKind::SinkInit,
                "buffer capacity must not be zero",
            ));
        }

        // nothing has been acquired if this fails
        let sink = make_sink(&self.ident)?;

        Ok(Logger::new(sink, self))
    }
}
