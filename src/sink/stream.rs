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
use std::io;
use std::io::Write;

/// A sink over a writer the caller opened.
///
/// Closing the sink only flushes the writer. The writer itself is handed back through
/// [`StreamSink::into_writer`] rather than dropped.
pub(crate) struct StreamSink {
    writer: Box<dyn Write + Send>,
}

impl fmt::Debug for StreamSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSink").finish_non_exhaustive()
    }
}

impl StreamSink {
    pub(crate) fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }

    pub(crate) fn writer(&mut self) -> &mut dyn Write {
        &mut *self.writer
    }

    pub(crate) fn close(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub(crate) fn into_writer(self) -> Box<dyn Write + Send> {
        self.writer
    }
}
