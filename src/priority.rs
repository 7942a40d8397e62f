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

//! Syslog priorities and facilities.

use std::fmt;
use std::str::FromStr;

use crate::Error;
use crate::ErrorKind;

/// A message priority, numbered the way syslog(3) numbers them.
///
/// Lower numbers are *more* severe: [`Priority::EMERG`] is `0` and [`Priority::DEBUG`] is `7`. A
/// logger emits a message only if its priority is numerically less than or equal to the logger's
/// threshold, so a threshold of [`Priority::INFO`] lets through everything but debug messages.
///
/// Any integer is accepted. Use [`Severity`] for a named view of the standard eight levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(i32);

impl Priority {
    /// System is unusable.
    pub const EMERG: Priority = Priority(0);
    /// Action must be taken immediately.
    pub const ALERT: Priority = Priority(1);
    /// Critical conditions.
    pub const CRIT: Priority = Priority(2);
    /// Error conditions.
    pub const ERR: Priority = Priority(3);
    /// Warning conditions.
    pub const WARNING: Priority = Priority(4);
    /// Normal, but significant, condition.
    pub const NOTICE: Priority = Priority(5);
    /// Informational message.
    pub const INFO: Priority = Priority(6);
    /// Debug-level message.
    pub const DEBUG: Priority = Priority(7);

    /// Create a priority from its raw syslog number.
    pub const fn new(value: i32) -> Self {
        Priority(value)
    }

    /// Return the raw syslog number.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Return the named severity, if this is one of the eight standard priorities.
    pub fn severity(self) -> Option<Severity> {
        Severity::ALL.into_iter().find(|s| s.priority() == self)
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Priority(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity() {
            Some(severity) => f.pad(severity.as_str()),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for Priority {
    type Err = Error;

    /// Parse a priority from a syslog level name (`"err"`, `"warning"`, ...) or an integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return Ok(Priority(n));
        }

        let priority = match s.to_ascii_lowercase().as_str() {
            "emerg" | "panic" => Priority::EMERG,
            "alert" => Priority::ALERT,
            "crit" => Priority::CRIT,
            "err" | "error" => Priority::ERR,
            "warning" | "warn" => Priority::WARNING,
            "notice" => Priority::NOTICE,
            "info" => Priority::INFO,
            "debug" => Priority::DEBUG,
            _ => {
                return Err(Error::new(ErrorKind::SinkInit, "unknown priority name")
                    .with_context("priority", s));
            }
        };
        Ok(priority)
    }
}

/// Named sugar over the standard syslog priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Severity {
    const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    /// Return the syslog priority of this severity.
    pub fn priority(self) -> Priority {
        Priority(self as i32)
    }

    /// Return the syslog name of this severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Emergency => "emerg",
            Severity::Alert => "alert",
            Severity::Critical => "crit",
            Severity::Error => "err",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        severity.priority()
    }
}

/// A syslog facility code, already shifted the way `openlog(3)` expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Facility(i32);

// name -> facility number, before the shift
const FACILITY_NAMES: &[(&str, i32)] = &[
    ("auth", 4),
    ("authpriv", 10),
    ("cron", 9),
    ("daemon", 3),
    ("ftp", 11),
    ("kern", 0),
    ("local0", 16),
    ("local1", 17),
    ("local2", 18),
    ("local3", 19),
    ("local4", 20),
    ("local5", 21),
    ("local6", 22),
    ("local7", 23),
    ("lpr", 6),
    ("mail", 2),
    ("news", 7),
    ("syslog", 5),
    ("user", 1),
    ("uucp", 8),
];

impl Facility {
    pub const KERN: Facility = Facility(0 << 3);
    pub const USER: Facility = Facility(1 << 3);
    pub const MAIL: Facility = Facility(2 << 3);
    pub const DAEMON: Facility = Facility(3 << 3);
    pub const AUTH: Facility = Facility(4 << 3);
    pub const SYSLOG: Facility = Facility(5 << 3);
    pub const LPR: Facility = Facility(6 << 3);
    pub const NEWS: Facility = Facility(7 << 3);
    pub const UUCP: Facility = Facility(8 << 3);
    pub const CRON: Facility = Facility(9 << 3);
    pub const AUTHPRIV: Facility = Facility(10 << 3);
    pub const FTP: Facility = Facility(11 << 3);
    pub const LOCAL0: Facility = Facility(16 << 3);
    pub const LOCAL1: Facility = Facility(17 << 3);
    pub const LOCAL2: Facility = Facility(18 << 3);
    pub const LOCAL3: Facility = Facility(19 << 3);
    pub const LOCAL4: Facility = Facility(20 << 3);
    pub const LOCAL5: Facility = Facility(21 << 3);
    pub const LOCAL6: Facility = Facility(22 << 3);
    pub const LOCAL7: Facility = Facility(23 << 3);

    /// Create a facility from a raw, already shifted, code.
    pub const fn from_code(code: i32) -> Self {
        Facility(code)
    }

    /// Return the raw code passed to `openlog(3)`.
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Look up a facility by its syslog name, e.g. `"mail"` or `"local3"`.
    ///
    /// # Errors
    ///
    /// Return a [`ErrorKind::SinkInit`] error if the name is not in the facility table.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        FACILITY_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, n)| Facility(n << 3))
            .ok_or_else(|| {
                Error::new(ErrorKind::SinkInit, "unknown syslog facility name")
                    .with_context("facility", name)
            })
    }

    /// Return the syslog name of this facility, if it has one.
    pub fn name(self) -> Option<&'static str> {
        FACILITY_NAMES
            .iter()
            .find(|(_, n)| n << 3 == self.0)
            .map(|(name, _)| *name)
    }
}

impl FromStr for Facility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facility::from_name(s)
    }
}
