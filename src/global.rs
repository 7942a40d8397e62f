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

//! The process-wide convenience slot.
//!
//! Everything in this crate takes a [`Logger`] explicitly. This module layers one optional,
//! process-wide logger on top of that for the shorthand macros ([`info!`](crate::info),
//! [`err!`](crate::err), ...) and the `log` crate bridge. Nothing is logged through the slot until
//! [`set_global`] is called.
//!
//! # Examples
//!
//! ```
//! use sinklog::Flags;
//! use sinklog::Logger;
//! use sinklog::Priority;
//! use sinklog::global;
//!
//! let logger = Logger::open_stream(std::io::stderr(), "svc", Priority::INFO, Flags::empty())
//!     .unwrap()
//!     .into_shared();
//! global::set_global(logger);
//!
//! sinklog::info!("listening on port {}", 8080);
//! sinklog::err!("bind failed");
//!
//! global::unset_global();
//! ```

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::DumpMode;
use crate::Logger;
use crate::Priority;

/// A logger that can be shared between threads and installed in the global slot.
pub type SharedLogger = Arc<Mutex<Logger>>;

struct Installed {
    id: u64,
    logger: SharedLogger,
}

static GLOBAL: Mutex<Option<Installed>> = Mutex::new(None);

// Loggers released by the slot are dropped only after this guard is gone, since dropping the
// last reference closes the logger, which takes the slot again.
fn slot() -> MutexGuard<'static, Option<Installed>> {
    GLOBAL.lock().unwrap_or_else(|e| e.into_inner())
}

fn lock(logger: &SharedLogger) -> MutexGuard<'_, Logger> {
    logger.lock().unwrap_or_else(|e| e.into_inner())
}

thread_local! {
    static IN_GLOBAL: Cell<bool> = const { Cell::new(false) };
}

// Marks the current thread as running inside the global logger until dropped.
struct Entered;

impl Entered {
    // None if this thread already holds the global logger, e.g. a `Display` impl in the
    // message logs again while the outer call is formatting.
    fn enter() -> Option<Entered> {
        if IN_GLOBAL.with(|entered| entered.replace(true)) {
            return None;
        }
        Some(Entered)
    }
}

impl Drop for Entered {
    fn drop(&mut self) {
        IN_GLOBAL.with(|entered| entered.set(false));
    }
}

/// Install `logger` in the global slot, replacing any previous one.
pub fn set_global(logger: SharedLogger) {
    let id = lock(&logger).id();
    let previous = slot().replace(Installed { id, logger });
    drop(previous);
}

/// Empty the global slot, returning the logger that was installed.
///
/// Logging through the slot is a no-op afterwards.
pub fn unset_global() -> Option<SharedLogger> {
    let previous = slot().take();
    previous.map(|installed| installed.logger)
}

/// Return the logger installed in the global slot.
pub fn global() -> Option<SharedLogger> {
    slot().as_ref().map(|installed| installed.logger.clone())
}

/// Run `f` with the global logger locked, if one is installed.
///
/// Calls nested on the same thread, such as logging from a `Display` impl of a message
/// argument, return `None` and log nothing.
pub fn with_global<R>(f: impl FnOnce(&mut Logger) -> R) -> Option<R> {
    let _entered = Entered::enter()?;
    let logger = global()?;
    let mut guard = lock(&logger);
    Some(f(&mut guard))
}

/// Clear the slot if it holds the logger with this id. Called when that logger closes.
pub(crate) fn release(id: u64) {
    let released = {
        let mut slot = slot();
        match slot.as_ref() {
            Some(installed) if installed.id == id => slot.take(),
            _ => None,
        }
    };
    drop(released);
}

/// Log a formatted message through the global logger.
pub fn log(priority: Priority, args: fmt::Arguments) {
    with_global(|logger| logger.log(priority, args));
}

/// Log `message` as is through the global logger.
pub fn log_str(priority: Priority, message: &str) {
    with_global(|logger| logger.log_str(priority, message));
}

/// Log a formatted message tagged with `prefix` through the global logger.
pub fn log_prefixed(priority: Priority, prefix: &str, args: fmt::Arguments) {
    with_global(|logger| logger.log_prefixed(priority, prefix, args));
}

/// Log `message` as is, tagged with `prefix`, through the global logger.
pub fn log_prefixed_str(priority: Priority, prefix: &str, message: &str) {
    with_global(|logger| logger.log_prefixed_str(priority, prefix, message));
}

/// Render `bytes` as printable text, reporting failures through the global logger.
pub fn dump(bytes: &[u8], mode: DumpMode) -> Option<String> {
    match with_global(|logger| logger.dump(bytes, mode)) {
        Some(text) => text,
        None => crate::dump(None, bytes, mode),
    }
}
