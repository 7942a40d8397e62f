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
use std::ops::BitAnd;
use std::ops::BitOr;
use std::ops::BitOrAssign;
use std::ops::Not;

/// Output flags of a logger.
///
/// Flags only affect stream and path sinks. Syslog and callback sinks ignore them.
///
/// # Examples
///
/// ```
/// use sinklog::Flags;
///
/// let flags = Flags::TIMESTAMP | Flags::ECHO_TO_CONSOLE_ON_ERROR;
/// assert!(flags.contains(Flags::TIMESTAMP));
/// assert!(!flags.contains(Flags::NO_IDENT_PID));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u32);

impl Flags {
    /// Do not prefix lines with `ident[pid]`.
    pub const NO_IDENT_PID: Flags = Flags(0x1);
    /// Prefix lines with the local date and time.
    pub const TIMESTAMP: Flags = Flags(0x2);
    /// Mirror a line to the diagnostic stream if writing it to the sink failed.
    pub const ECHO_TO_CONSOLE_ON_ERROR: Flags = Flags(0x4);
    /// Mirror every line to the diagnostic stream.
    pub const ALWAYS_ECHO_TO_STDERR: Flags = Flags(0x8);

    const NAMES: [(Flags, &'static str); 4] = [
        (Flags::NO_IDENT_PID, "NO_IDENT_PID"),
        (Flags::TIMESTAMP, "TIMESTAMP"),
        (Flags::ECHO_TO_CONSOLE_ON_ERROR, "ECHO_TO_CONSOLE_ON_ERROR"),
        (Flags::ALWAYS_ECHO_TO_STDERR, "ALWAYS_ECHO_TO_STDERR"),
    ];

    /// No flags set.
    pub const fn empty() -> Self {
        Flags(0)
    }

    /// Create flags from raw bits. Unknown bits are dropped.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Flags(bits & 0xf)
    }

    /// Return the raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every flag in `other` is also set in `self`.
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Flags {
    type Output = Flags;

    fn bitand(self, rhs: Flags) -> Flags {
        Flags(self.0 & rhs.0)
    }
}

impl Not for Flags {
    type Output = Flags;

    fn not(self) -> Flags {
        Flags::from_bits_truncate(!self.0)
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Flags(empty)");
        }

        f.write_str("Flags(")?;
        let mut first = true;
        for (flag, name) in Flags::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_ops() {
        let mut flags = Flags::empty();
        assert!(flags.is_empty());

        flags |= Flags::TIMESTAMP;
        flags |= Flags::ALWAYS_ECHO_TO_STDERR;
        assert!(flags.contains(Flags::TIMESTAMP));
        assert!(!flags.contains(Flags::TIMESTAMP | Flags::NO_IDENT_PID));

        let cleared = flags & !Flags::TIMESTAMP;
        assert_eq!(cleared, Flags::ALWAYS_ECHO_TO_STDERR);
        assert_eq!(Flags::from_bits_truncate(0xff).bits(), 0xf);
    }

    #[test]
    fn test_flag_debug() {
        let flags = Flags::NO_IDENT_PID | Flags::TIMESTAMP;
        insta::assert_snapshot!(format!("{flags:?}"), @"Flags(NO_IDENT_PID | TIMESTAMP)");
        insta::assert_snapshot!(format!("{:?}", Flags::empty()), @"Flags(empty)");
    }
}
