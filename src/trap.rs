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

//! Traps for errors that happen inside the logging path.

use std::fmt;
use std::io;
use std::io::Write;

use crate::Error;

/// A trap receives errors that a logging call cannot hand back to its caller.
///
/// Logging never fails loudly: a failed write, a failed close or an overflowing line is passed to
/// the logger's trap and the call returns normally.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error raised while logging.
    fn trap(&self, err: &Error);
}

impl<T: Trap> From<T> for Box<dyn Trap> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// A trap that prints errors to stderr.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct DefaultTrap {}

impl Trap for DefaultTrap {
    fn trap(&self, err: &Error) {
        let _ = writeln!(io::stderr(), "sinklog: {err}");
    }
}

/// A trap that drops every error.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct SilentTrap {}

impl Trap for SilentTrap {
    fn trap(&self, _: &Error) {}
}
