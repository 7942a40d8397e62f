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

//! Sinklog is a small logging facade that sends syslog-style prioritized messages to one of
//! several sinks: the system log, a stream, a file reopened by name, or a callback.
//!
//! # Overview
//!
//! A [`Logger`] owns one sink, a priority threshold and an identity. Priorities follow the
//! syslog numbering, so [`Priority::EMERG`] is 0 and [`Priority::DEBUG`] is 7; a message is
//! emitted when its priority is numerically at most the threshold. Stream and path sinks prepend
//! `ident[pid]: ` and, with [`Flags::TIMESTAMP`], a local timestamp.
//!
//! Path sinks can be reopened after log rotation, either directly with [`Logger::reopen`] or from
//! a signal handler through a [`ReopenTrigger`].
//!
//! # Examples
//!
//! Log to a stream:
//!
//! ```
//! use sinklog::Flags;
//! use sinklog::Logger;
//! use sinklog::Priority;
//!
//! let mut logger = Logger::open_stream(std::io::stderr(), "svc", Priority::INFO, Flags::empty())
//!     .unwrap();
//!
//! logger.log(Priority::INFO, format_args!("x={}", 5));
//! logger.log_str(Priority::DEBUG, "filtered out");
//! ```
//!
//! Install a logger in the global slot and use the shorthand macros:
//!
//! ```
//! use sinklog::Logger;
//! use sinklog::Priority;
//! use sinklog::global;
//!
//! let logger = Logger::builder("svc")
//!     .threshold(Priority::DEBUG)
//!     .stream(std::io::stderr())
//!     .unwrap();
//! global::set_global(logger.into_shared());
//!
//! sinklog::debug!("connected to {}", "db");
//! sinklog::err_raw!("giving up");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "bridge-log")]
pub mod bridge;
pub mod global;
pub mod host;
pub mod sink;
pub mod trap;

mod dump;
mod error;
mod flags;
mod format;
mod logger;
mod macros;
mod priority;

pub use self::dump::DumpMode;
pub use self::dump::dump;
pub use self::dump::try_dump;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::flags::Flags;
pub use self::format::DEFAULT_BUFFER_CAPACITY;
pub use self::format::TIMESTAMP_FORMAT;
pub use self::global::SharedLogger;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::logger::ReopenTrigger;
pub use self::priority::Facility;
pub use self::priority::Priority;
pub use self::priority::Severity;
pub use self::sink::LogFn;
pub use self::sink::SinkKind;
