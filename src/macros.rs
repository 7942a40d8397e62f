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

// Shorthands over the global slot. All of them are no-ops while the slot is empty.

/// Log a formatted message at `priority` through the global logger.
///
/// ```
/// sinklog::log!(sinklog::Priority::NOTICE, "reloaded {} rules", 3);
/// ```
#[macro_export]
macro_rules! log {
    ($priority:expr, $($arg:tt)+) => {
        $crate::global::log($priority, format_args!($($arg)+))
    };
}

/// Log a formatted message at `priority` through an explicit [`Logger`](crate::Logger).
///
/// ```
/// use sinklog::Flags;
/// use sinklog::Logger;
/// use sinklog::Priority;
///
/// let mut logger = Logger::open_stream(std::io::sink(), "svc", Priority::DEBUG, Flags::empty()).unwrap();
/// sinklog::log_to!(logger, Priority::INFO, "x={}", 5);
/// ```
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $priority:expr, $($arg:tt)+) => {
        $logger.log($priority, format_args!($($arg)+))
    };
}

/// Log at `DEBUG`, tagged with the calling module.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::global::log_prefixed(
            $crate::Priority::DEBUG,
            module_path!(),
            format_args!($($arg)+),
        )
    };
}

/// Log at `DEBUG` without a tag.
#[macro_export]
macro_rules! debug_raw {
    ($($arg:tt)+) => {
        $crate::global::log($crate::Priority::DEBUG, format_args!($($arg)+))
    };
}

/// Log `message` and the last OS error at `DEBUG`, tagged with the calling module.
///
/// The OS error is captured before anything else runs.
#[macro_export]
macro_rules! debug_errno {
    ($message:expr) => {{
        let errno = ::std::io::Error::last_os_error();
        $crate::global::log_prefixed(
            $crate::Priority::DEBUG,
            module_path!(),
            format_args!("{}: {}", $message, errno),
        )
    }};
}

/// Log at `INFO` without a tag.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::global::log($crate::Priority::INFO, format_args!($($arg)+))
    };
}

/// Log at `ERR`, tagged with the calling module.
#[macro_export]
macro_rules! err {
    ($($arg:tt)+) => {
        $crate::global::log_prefixed(
            $crate::Priority::ERR,
            module_path!(),
            format_args!($($arg)+),
        )
    };
}

/// Log at `ERR` without a tag.
#[macro_export]
macro_rules! err_raw {
    ($($arg:tt)+) => {
        $crate::global::log($crate::Priority::ERR, format_args!($($arg)+))
    };
}

/// Render bytes through [`global::dump`](crate::global::dump), in octal mode unless a
/// [`DumpMode`](crate::DumpMode) is given.
///
/// ```
/// assert_eq!(sinklog::dump!(b"ok\n").as_deref(), Some(r"ok\n"));
/// assert_eq!(sinklog::dump!(b"ok", sinklog::DumpMode::Hex).as_deref(), Some("6f6b"));
/// ```
#[macro_export]
macro_rules! dump {
    ($bytes:expr) => {
        $crate::global::dump($bytes, $crate::DumpMode::Octal)
    };
    ($bytes:expr, $mode:expr) => {
        $crate::global::dump($bytes, $mode)
    };
}
