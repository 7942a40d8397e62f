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

//! Assembly of log lines into a fixed-capacity buffer.

use std::fmt;
use std::fmt::Write;

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::Error;
use crate::ErrorKind;

/// The default capacity, in bytes, of a logger's line buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// The `strftime` pattern of the timestamp prefix. Always 15 characters wide.
pub const TIMESTAMP_FORMAT: &str = "%b %d %H:%M:%S";

/// A reusable text buffer that refuses to grow past its capacity.
///
/// A write that does not fit is rejected as a whole, so the content is always valid UTF-8.
#[derive(Debug)]
pub(crate) struct LineBuffer {
    text: String,
    capacity: usize,
    overflowed: bool,
}

impl LineBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
            overflowed: false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.overflowed = false;
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free the storage. The buffer holds nothing afterwards.
    pub(crate) fn release(&mut self) {
        self.text = String::new();
        self.capacity = 0;
        self.overflowed = false;
    }
}

impl Write for LineBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.text.len() + s.len() > self.capacity {
            self.overflowed = true;
            return Err(fmt::Error);
        }
        self.text.push_str(s);
        Ok(())
    }
}

/// The per-call parts of a line, around the message body.
#[derive(Debug, Default)]
pub(crate) struct LineLayout<'a> {
    pub(crate) timestamp: Option<Zoned>,
    pub(crate) ident: Option<&'a str>,
    pub(crate) pid: u32,
    pub(crate) prefix: Option<&'a str>,
    pub(crate) newline: bool,
}

impl LineLayout<'_> {
    /// Assemble `[timestamp] [ident[pid]]: [prefix: ]body\n` into `buf`.
    ///
    /// # Errors
    ///
    /// Return [`ErrorKind::FormatOverflow`] if any part does not fit. The buffer content is
    /// unspecified afterwards.
    pub(crate) fn write(&self, buf: &mut LineBuffer, body: fmt::Arguments) -> Result<(), Error> {
        buf.clear();
        self.write_parts(buf, body).map_err(|err| {
            if buf.overflowed {
                Error::new(ErrorKind::FormatOverflow, "output truncated")
                    .with_context("capacity", buf.capacity())
            } else {
                Error::from_fmt_error(err)
            }
        })
    }

    fn write_parts(&self, buf: &mut LineBuffer, body: fmt::Arguments) -> fmt::Result {
        let mut header = false;

        if let Some(time) = &self.timestamp {
            write!(buf, "{}", time.strftime(TIMESTAMP_FORMAT))?;
            header = true;
        }

        if let Some(ident) = self.ident {
            if header {
                buf.write_char(' ')?;
            }
            write!(buf, "{ident}[{}]", self.pid)?;
            header = true;
        }

        if header {
            buf.write_str(": ")?;
        }

        if let Some(prefix) = self.prefix {
            write!(buf, "{prefix}: ")?;
        }

        buf.write_fmt(body)?;

        if self.newline && !buf.as_str().ends_with('\n') {
            buf.write_char('\n')?;
        }

        Ok(())
    }
}

/// Current local time, or the time in `tz` if given.
pub(crate) fn now(tz: Option<&TimeZone>) -> Zoned {
    match tz {
        Some(tz) => Zoned::now().with_time_zone(tz.clone()),
        None => Zoned::now(),
    }
}
