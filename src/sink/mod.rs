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

//! The destinations a logger writes formatted lines to.

use std::fmt;
use std::io::Write;

use crate::Error;
use crate::Flags;
use crate::Priority;

mod callback;
mod path;
mod stream;
#[cfg(all(unix, feature = "syslog"))]
mod syslog;

pub use self::callback::LogFn;
pub(crate) use self::callback::CallbackSink;
pub(crate) use self::path::PathSink;
pub(crate) use self::stream::StreamSink;
#[cfg(all(unix, feature = "syslog"))]
pub(crate) use self::syslog::SyslogSink;

/// The line written in place of one that did not fit the logger's buffer.
pub(crate) const TRUNCATED_LINE: &str = "sinklog: output truncated\n";

/// Which kind of sink a logger writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    /// The system log facility.
    Syslog,
    /// A caller-supplied writer.
    Stream,
    /// A file opened, and reopened, by name.
    Path,
    /// A caller-supplied function.
    Callback,
    /// The logger has been closed.
    Closed,
}

pub(crate) enum Sink {
    #[cfg(all(unix, feature = "syslog"))]
    Syslog(SyslogSink),
    Stream(StreamSink),
    Path(PathSink),
    Callback(CallbackSink),
    Closed,
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(all(unix, feature = "syslog"))]
            Sink::Syslog(sink) => f.debug_tuple("Syslog").field(sink).finish(),
            Sink::Stream(sink) => f.debug_tuple("Stream").field(sink).finish(),
            Sink::Path(sink) => f.debug_tuple("Path").field(sink).finish(),
            Sink::Callback(sink) => f.debug_tuple("Callback").field(sink).finish(),
            Sink::Closed => f.write_str("Closed"),
        }
    }
}

impl Sink {
    pub(crate) fn kind(&self) -> SinkKind {
        match self {
            #[cfg(all(unix, feature = "syslog"))]
            Sink::Syslog(_) => SinkKind::Syslog,
            Sink::Stream(_) => SinkKind::Stream,
            Sink::Path(_) => SinkKind::Path,
            Sink::Callback(_) => SinkKind::Callback,
            Sink::Closed => SinkKind::Closed,
        }
    }

    /// Whether output flags and the `ident[pid]` header apply to this sink.
    pub(crate) fn uses_flags(&self) -> bool {
        matches!(self, Sink::Stream(_) | Sink::Path(_))
    }

    /// Whether lines handed to this sink end with a newline.
    pub(crate) fn wants_newline(&self) -> bool {
        match self {
            #[cfg(all(unix, feature = "syslog"))]
            Sink::Syslog(_) => false,
            _ => true,
        }
    }

    /// Deliver one formatted line.
    pub(crate) fn emit(
        &mut self,
        priority: Priority,
        line: &str,
        flags: Flags,
        console: &mut dyn Write,
    ) -> Result<(), Error> {
        match self {
            #[cfg(all(unix, feature = "syslog"))]
            Sink::Syslog(sink) => sink.emit(priority, line),
            Sink::Stream(sink) => write_line(sink.writer(), line, flags, console),
            Sink::Path(sink) => match sink.file() {
                Some(file) => write_line(file, line, flags, console),
                None => Ok(()),
            },
            Sink::Callback(sink) => {
                sink.emit(priority, line);
                Ok(())
            }
            Sink::Closed => Ok(()),
        }
    }

    /// Report, through the sink itself, that a line was dropped for not fitting the buffer.
    ///
    /// Return `false` if this sink has no way to report it.
    #[cfg_attr(not(all(unix, feature = "syslog")), allow(unused_variables))]
    pub(crate) fn emit_truncated(&mut self, priority: Priority) -> bool {
        match self {
            #[cfg(all(unix, feature = "syslog"))]
            Sink::Syslog(sink) => sink.emit(priority, TRUNCATED_LINE.trim_end()).is_ok(),
            Sink::Stream(sink) => write_best_effort(sink.writer(), TRUNCATED_LINE),
            Sink::Path(sink) => match sink.file() {
                Some(file) => write_best_effort(file, TRUNCATED_LINE),
                None => false,
            },
            Sink::Callback(_) | Sink::Closed => false,
        }
    }
}

/// Write and flush `line`, mirroring it to `console` as `flags` ask.
///
/// A failed write that got mirrored counts as handled.
fn write_line(
    writer: &mut dyn Write,
    line: &str,
    flags: Flags,
    console: &mut dyn Write,
) -> Result<(), Error> {
    let result = writer
        .write_all(line.as_bytes())
        .and_then(|()| writer.flush());

    let echo = flags.contains(Flags::ALWAYS_ECHO_TO_STDERR)
        || (result.is_err() && flags.contains(Flags::ECHO_TO_CONSOLE_ON_ERROR));
    if echo {
        write_best_effort(console, line);
    }

    match result {
        Err(err) if !echo => Err(Error::from_io_error(err)),
        _ => Ok(()),
    }
}

fn write_best_effort(writer: &mut dyn Write, line: &str) -> bool {
    writer
        .write_all(line.as_bytes())
        .and_then(|()| writer.flush())
        .is_ok()
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("broken"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_line_success_does_not_echo() {
        let mut out = Vec::new();
        let mut console = Vec::new();
        write_line(
            &mut out,
            "a\n",
            Flags::ECHO_TO_CONSOLE_ON_ERROR,
            &mut console,
        )
        .unwrap();
        assert_eq!(out, b"a\n");
        assert!(console.is_empty());
    }

    #[test]
    fn test_write_line_always_echo() {
        let mut out = Vec::new();
        let mut console = Vec::new();
        write_line(&mut out, "a\n", Flags::ALWAYS_ECHO_TO_STDERR, &mut console).unwrap();
        assert_eq!(out, b"a\n");
        assert_eq!(console, b"a\n");
    }

    #[test]
    fn test_write_line_failure_echoes_when_asked() {
        let mut console = Vec::new();
        write_line(
            &mut Broken,
            "lost\n",
            Flags::ECHO_TO_CONSOLE_ON_ERROR,
            &mut console,
        )
        .unwrap();
        assert_eq!(console, b"lost\n");
    }

    #[test]
    fn test_write_line_failure_without_echo_is_an_error() {
        let mut console = Vec::new();
        let err = write_line(&mut Broken, "lost\n", Flags::empty(), &mut console).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Unexpected);
        assert!(console.is_empty());
    }
}
