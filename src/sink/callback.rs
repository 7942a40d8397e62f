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

use crate::Priority;

/// The function a callback sink hands each line to, along with its priority.
pub type LogFn = Box<dyn FnMut(Priority, &str) + Send>;

pub(crate) struct CallbackSink {
    function: LogFn,
}

impl fmt::Debug for CallbackSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSink").finish_non_exhaustive()
    }
}

impl CallbackSink {
    pub(crate) fn new(function: LogFn) -> Self {
        Self { function }
    }

    pub(crate) fn emit(&mut self, priority: Priority, line: &str) {
        (self.function)(priority, line)
    }
}
