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

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// A request flag that makes a [`Logger`](crate::Logger) reopen its file before its next
/// message.
///
/// [`request`](ReopenTrigger::request) is a single atomic store, so a `SIGHUP` handler installed
/// by the application may call it. The logger itself is never touched from the handler.
///
/// # Examples
///
/// ```
/// use sinklog::Flags;
/// use sinklog::Logger;
/// use sinklog::Priority;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("svc.log");
/// let mut logger = Logger::open_path(&path, "svc", Priority::INFO, Flags::empty()).unwrap();
///
/// let trigger = logger.reopen_trigger();
/// // e.g. from a signal handler, after the file was rotated away
/// trigger.request();
///
/// // the next message reopens the file first
/// logger.log_str(Priority::INFO, "after rotation");
/// assert!(!trigger.is_requested());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReopenTrigger(Arc<AtomicBool>);

impl ReopenTrigger {
    /// Ask the logger to reopen before its next message.
    #[inline]
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a reopen is pending.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the pending request, returning whether there was one.
    pub(crate) fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}
