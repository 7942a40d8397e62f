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

use std::ffi::CString;

use crate::Error;
use crate::ErrorKind;
use crate::Facility;
use crate::Priority;

/// A sink over the process-wide system log session.
///
/// Opening this sink calls `openlog(3)` and closing it calls `closelog(3)`. There is only one
/// such session per process: two syslog sinks open at the same time share it, and closing either
/// ends it for both.
#[derive(Debug)]
pub(crate) struct SyslogSink {
    facility: Facility,
    // openlog(3) keeps this pointer, so it must live as long as the session
    _ident: CString,
    open: bool,
}

impl SyslogSink {
    pub(crate) fn open(ident: &str, facility: Facility, options: i32) -> Result<Self, Error> {
        let ident = CString::new(ident).map_err(|err| {
            Error::new(ErrorKind::SinkInit, "identity contains a NUL byte").with_source(err)
        })?;

        // SAFETY: ident outlives the session, it is only dropped after closelog
        unsafe { libc::openlog(ident.as_ptr(), libc::LOG_PID | options, facility.code()) };

        Ok(Self {
            facility,
            _ident: ident,
            open: true,
        })
    }

    pub(crate) fn facility(&self) -> Facility {
        self.facility
    }

    pub(crate) fn emit(&mut self, priority: Priority, line: &str) -> Result<(), Error> {
        if !self.open {
            return Ok(());
        }

        // syslog(3) takes a C string, so the message ends at the first NUL
        let bytes = line.as_bytes();
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        let message = CString::new(&bytes[..end]).map_err(|err| {
            Error::new(ErrorKind::Unexpected, "failed to build syslog message").with_source(err)
        })?;

        // SAFETY: the format is a literal "%s" and message is a valid C string
        unsafe { libc::syslog(priority.value(), c"%s".as_ptr(), message.as_ptr()) };
        Ok(())
    }

    pub(crate) fn close(&mut self) {
        if self.open {
            self.open = false;
            // SAFETY: closelog takes no arguments and tolerates a closed session
            unsafe { libc::closelog() };
        }
    }
}

impl Drop for SyslogSink {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_with_nul_is_rejected() {
        let err = SyslogSink::open("sv\0c", Facility::USER, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SinkInit);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut sink = SyslogSink::open("sinklog-test", Facility::USER, 0).unwrap();
        assert_eq!(sink.facility(), Facility::USER);
        sink.close();
        sink.close();
        sink.emit(Priority::DEBUG, "dropped after close").unwrap();
    }
}
