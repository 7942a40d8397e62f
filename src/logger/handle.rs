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
use std::io::Write;
use std::mem;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use jiff::tz::TimeZone;

use super::builder::LoggerBuilder;
use super::reopen::ReopenTrigger;
use crate::DumpMode;
use crate::Error;
use crate::ErrorKind;
#[cfg(all(unix, feature = "syslog"))]
use crate::Facility;
use crate::Flags;
use crate::Priority;
use crate::dump;
use crate::format;
use crate::format::LineBuffer;
use crate::format::LineLayout;
use crate::global;
use crate::global::SharedLogger;
use crate::sink::Sink;
use crate::sink::SinkKind;
use crate::trap::Trap;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A logger handle: one sink, a priority threshold, an identity and a line buffer.
///
/// A logger is opened by exactly one of the `open_*` functions (or a [`LoggerBuilder`] terminal
/// method) and released by [`close`](Logger::close), which also runs on drop.
///
/// Every logging method takes `&mut self` because the line is assembled in a buffer owned by the
/// handle. Share a logger between threads with [`into_shared`](Logger::into_shared) or give each
/// thread its own.
///
/// Logging never fails the caller. Messages above the threshold, messages sent after `close` or
/// after a failed reopen are dropped; write errors go to the logger's [`Trap`].
pub struct Logger {
    id: u64,
    sink: Sink,
    ready: bool,
    ident: String,
    buffer: LineBuffer,
    threshold: Priority,
    flags: Flags,
    time_zone: Option<TimeZone>,
    console: Box<dyn Write + Send>,
    trap: Box<dyn Trap>,
    reopen: ReopenTrigger,
    // the writer of a closed stream sink, kept open until taken back
    released_stream: Option<Box<dyn Write + Send>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.id)
            .field("sink", &self.sink)
            .field("ready", &self.ready)
            .field("ident", &self.ident)
            .field("threshold", &self.threshold)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub(super) fn new(sink: Sink, builder: LoggerBuilder) -> Self {
        let LoggerBuilder {
            ident,
            threshold,
            flags,
            syslog_options: _,
            buffer_capacity,
            time_zone,
            console,
            trap,
        } = builder;

        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            sink,
            ready: true,
            ident,
            buffer: LineBuffer::new(buffer_capacity),
            threshold,
            flags,
            time_zone,
            console,
            trap,
            reopen: ReopenTrigger::default(),
            released_stream: None,
        }
    }

    /// Create a [`LoggerBuilder`] for the given identity.
    pub fn builder(ident: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(ident)
    }

    /// Open a logger writing to the system log.
    ///
    /// `options` are passed to `openlog(3)` together with `LOG_PID`.
    #[cfg(all(unix, feature = "syslog"))]
    pub fn open_syslog(
        facility: Facility,
        ident: &str,
        threshold: impl Into<Priority>,
        options: i32,
    ) -> Result<Logger, Error> {
        LoggerBuilder::new(ident)
            .threshold(threshold)
            .syslog_options(options)
            .syslog(facility)
    }

    /// Open a logger writing to the system log, looking the facility up by name.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sinklog::Logger;
    /// use sinklog::Priority;
    ///
    /// let mut logger = Logger::open_syslog_by_name("mail", "svc", Priority::INFO, 0).unwrap();
    /// logger.log(Priority::INFO, format_args!("delivered {} messages", 3));
    /// ```
    #[cfg(all(unix, feature = "syslog"))]
    pub fn open_syslog_by_name(
        facility: &str,
        ident: &str,
        threshold: impl Into<Priority>,
        options: i32,
    ) -> Result<Logger, Error> {
        LoggerBuilder::new(ident)
            .threshold(threshold)
            .syslog_options(options)
            .syslog_by_name(facility)
    }

    /// Open a logger writing to a stream the caller already opened.
    ///
    /// The logger flushes the stream but does not close it: after [`close`](Logger::close) the
    /// writer is still open and can be taken back with [`take_stream`](Logger::take_stream).
    /// Dropping the logger drops the writer like any other owned value.
    pub fn open_stream(
        writer: impl Write + Send + 'static,
        ident: &str,
        threshold: impl Into<Priority>,
        flags: Flags,
    ) -> Result<Logger, Error> {
        LoggerBuilder::new(ident)
            .threshold(threshold)
            .flags(flags)
            .stream(writer)
    }

    /// Open a logger appending to the file at `path`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sinklog::Flags;
    /// use sinklog::Logger;
    /// use sinklog::Priority;
    ///
    /// let mut logger = Logger::open_path("/var/log/svc.log", "svc", Priority::INFO, Flags::TIMESTAMP)
    ///     .unwrap();
    /// logger.log(Priority::INFO, format_args!("x={}", 5));
    /// ```
    pub fn open_path(
        path: impl Into<PathBuf>,
        ident: &str,
        threshold: impl Into<Priority>,
        flags: Flags,
    ) -> Result<Logger, Error> {
        LoggerBuilder::new(ident)
            .threshold(threshold)
            .flags(flags)
            .path(path)
    }

    /// Open a logger handing each formatted line to `function`.
    ///
    /// `flags` are kept but have no effect on a callback sink.
    pub fn open_callback<F>(
        function: F,
        ident: &str,
        threshold: impl Into<Priority>,
        flags: Flags,
    ) -> Result<Logger, Error>
    where
        F: FnMut(Priority, &str) + Send + 'static,
    {
        LoggerBuilder::new(ident)
            .threshold(threshold)
            .flags(flags)
            .callback(function)
    }

    /// Wrap the logger so it can be installed with [`global::set_global`] or shared between
    /// threads.
    pub fn into_shared(self) -> SharedLogger {
        Arc::new(Mutex::new(self))
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Return the kind of sink this logger writes to.
    pub fn kind(&self) -> SinkKind {
        self.sink.kind()
    }

    /// Whether the logger currently emits anything.
    ///
    /// False after [`close`](Logger::close) and after a failed [`reopen`](Logger::reopen).
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Return the identity, or an empty string once closed.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Return the path of a path sink.
    pub fn path(&self) -> Option<&Path> {
        match &self.sink {
            Sink::Path(sink) => Some(sink.path()),
            _ => None,
        }
    }

    /// Return the facility of a syslog sink.
    #[cfg(all(unix, feature = "syslog"))]
    pub fn facility(&self) -> Option<Facility> {
        match &self.sink {
            Sink::Syslog(sink) => Some(sink.facility()),
            _ => None,
        }
    }

    pub fn threshold(&self) -> Priority {
        self.threshold
    }

    /// Change the highest priority number that gets logged.
    pub fn set_threshold(&mut self, threshold: impl Into<Priority>) {
        self.threshold = threshold.into();
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Replace the output flags. Syslog and callback sinks ignore them.
    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    /// Whether a message of `priority` would be emitted.
    pub fn enabled(&self, priority: Priority) -> bool {
        self.ready && priority <= self.threshold
    }

    /// Log a formatted message.
    ///
    /// ```
    /// use sinklog::Flags;
    /// use sinklog::Logger;
    /// use sinklog::Priority;
    ///
    /// let mut logger = Logger::open_stream(std::io::sink(), "svc", Priority::INFO, Flags::empty())
    ///     .unwrap();
    /// logger.log(Priority::INFO, format_args!("x={}", 5));
    /// ```
    pub fn log(&mut self, priority: Priority, args: fmt::Arguments) {
        self.dispatch(priority, None, args);
    }

    /// Log `message` as is.
    ///
    /// Nothing in `message` is interpreted, so it is safe to pass text that came from outside the
    /// program.
    pub fn log_str(&mut self, priority: Priority, message: &str) {
        self.dispatch(priority, None, format_args!("{message}"));
    }

    /// Log a formatted message tagged with `prefix`, rendered as `prefix: message`.
    pub fn log_prefixed(&mut self, priority: Priority, prefix: &str, args: fmt::Arguments) {
        self.dispatch(priority, Some(prefix), args);
    }

    /// Log `message` as is, tagged with `prefix`.
    pub fn log_prefixed_str(&mut self, priority: Priority, prefix: &str, message: &str) {
        self.dispatch(priority, Some(prefix), format_args!("{message}"));
    }

    /// Render `bytes` as printable text, reporting failures through this logger.
    pub fn dump(&mut self, bytes: &[u8], mode: DumpMode) -> Option<String> {
        dump::dump(Some(self), bytes, mode)
    }

    fn dispatch(&mut self, priority: Priority, prefix: Option<&str>, body: fmt::Arguments) {
        if let Err(err) = self.reopen_if_requested() {
            self.trap.trap(&err);
        }

        if !self.enabled(priority) {
            return;
        }

        let decorated = self.sink.uses_flags();
        let layout = LineLayout {
            timestamp: (decorated && self.flags.contains(Flags::TIMESTAMP))
                .then(|| format::now(self.time_zone.as_ref())),
            ident: (decorated && !self.flags.contains(Flags::NO_IDENT_PID))
                .then_some(self.ident.as_str()),
            pid: std::process::id(),
            prefix,
            newline: self.sink.wants_newline(),
        };

        if let Err(err) = layout.write(&mut self.buffer, body) {
            let reported =
                err.kind() == ErrorKind::FormatOverflow && self.sink.emit_truncated(priority);
            if !reported {
                self.trap.trap(&err);
            }
            return;
        }

        if let Err(err) = self.sink.emit(
            priority,
            self.buffer.as_str(),
            self.flags,
            &mut *self.console,
        ) {
            self.trap.trap(&err);
        }
    }

    /// Close and reopen the file of a path sink, picking up a rotated log file.
    ///
    /// This is a no-op for other sinks. If the file cannot be reopened the logger stays silent
    /// until a later call succeeds. On unix the success path does not allocate.
    ///
    /// # Errors
    ///
    /// Return a [`ErrorKind::Reopen`] error if the file could not be closed or opened again.
    pub fn reopen(&mut self) -> Result<(), Error> {
        let Sink::Path(sink) = &mut self.sink else {
            return Ok(());
        };

        self.ready = false;
        match sink.reopen() {
            Ok(()) => {
                self.ready = true;
                Ok(())
            }
            Err(err) => Err(Error::new(ErrorKind::Reopen, "failed to reopen log file")
                .with_context("path", sink.path().display())
                .with_source(err)),
        }
    }

    /// Return a trigger that asks this logger to [`reopen`](Logger::reopen) before its next
    /// message.
    ///
    /// The trigger only flips an atomic flag, so it is safe to pull from a signal handler.
    pub fn reopen_trigger(&self) -> ReopenTrigger {
        self.reopen.clone()
    }

    /// Perform a reopen requested through a [`ReopenTrigger`], if any.
    ///
    /// Return whether a reopen was performed. Logging calls do this on their own.
    pub fn reopen_if_requested(&mut self) -> Result<bool, Error> {
        if !self.reopen.take() {
            return Ok(false);
        }
        self.reopen().map(|()| true)
    }

    /// Close a stream sink and hand its writer back, flushed and still open.
    ///
    /// Return `None` for other sinks, which stay open, or if the writer was already taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Write;
    ///
    /// use sinklog::Flags;
    /// use sinklog::Logger;
    /// use sinklog::Priority;
    ///
    /// let mut logger = Logger::open_stream(Vec::new(), "svc", Priority::INFO, Flags::NO_IDENT_PID)
    ///     .unwrap();
    /// logger.log_str(Priority::INFO, "hello");
    ///
    /// let mut writer = logger.take_stream().unwrap();
    /// writer.write_all(b"still writable\n").unwrap();
    /// ```
    pub fn take_stream(&mut self) -> Option<Box<dyn Write + Send>> {
        if matches!(self.sink, Sink::Stream(_)) {
            self.close();
        }
        self.released_stream.take()
    }

    /// Release the sink, the identity and the buffer.
    ///
    /// A path sink closes its file and a syslog sink ends the system log session. A stream sink
    /// is flushed and its writer kept open for [`take_stream`](Logger::take_stream). If this
    /// logger is installed in the global slot, the slot is cleared. Closing twice is a no-op.
    pub fn close(&mut self) {
        if matches!(self.sink, Sink::Closed) {
            return;
        }

        self.ready = false;
        let result = match mem::replace(&mut self.sink, Sink::Closed) {
            #[cfg(all(unix, feature = "syslog"))]
            Sink::Syslog(mut sink) => {
                sink.close();
                Ok(())
            }
            Sink::Stream(mut sink) => {
                let result = sink.close();
                self.released_stream = Some(sink.into_writer());
                result
            }
            Sink::Path(mut sink) => sink.close(),
            Sink::Callback(_) | Sink::Closed => Ok(()),
        };
        if let Err(err) = result {
            self.trap.trap(&Error::from_io_error(err));
        }

        self.ident = String::new();
        self.buffer.release();
        global::release(self.id);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}
