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

use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::ErrorKind;

/// A sink that owns a file opened for append by name.
///
/// The stored path is authoritative. The open file is only a cache of it and is rebuilt by
/// [`PathSink::reopen`], which is what log rotation relies on.
#[derive(Debug)]
pub(crate) struct PathSink {
    path: PathBuf,
    // kept ready for open(2) so that reopen does not allocate
    #[cfg(unix)]
    c_path: std::ffi::CString,
    file: Option<File>,
}

impl PathSink {
    pub(crate) fn open(path: PathBuf) -> Result<Self, Error> {
        #[cfg(unix)]
        let c_path = {
            use std::os::unix::ffi::OsStrExt;

            std::ffi::CString::new(path.as_os_str().as_bytes()).map_err(|err| {
                Error::new(ErrorKind::SinkInit, "log file path contains a NUL byte")
                    .with_context("path", path.display())
                    .with_source(err)
            })?
        };

        let mut sink = PathSink {
            path,
            #[cfg(unix)]
            c_path,
            file: None,
        };
        let file = sink.open_append().map_err(|err| {
            Error::new(ErrorKind::SinkInit, "failed to open log file")
                .with_context("path", sink.path.display())
                .with_source(err)
        })?;
        sink.file = Some(file);
        Ok(sink)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn file(&mut self) -> Option<&mut File> {
        self.file.as_mut()
    }

    /// Close the current file, if any, and open the stored path again for append.
    ///
    /// On unix the success path performs no heap allocation.
    pub(crate) fn reopen(&mut self) -> io::Result<()> {
        self.close()?;
        self.file = Some(self.open_append()?);
        Ok(())
    }

    /// Close the current file. Closing twice is a no-op.
    pub(crate) fn close(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(file) => close_file(file),
            None => Ok(()),
        }
    }

    #[cfg(unix)]
    fn open_append(&self) -> io::Result<File> {
        use std::os::fd::FromRawFd;

        let flags = libc::O_WRONLY | libc::O_APPEND | libc::O_CREAT | libc::O_CLOEXEC;
        // SAFETY: c_path is a valid NUL-terminated string for the duration of the call
        let fd = unsafe { libc::open(self.c_path.as_ptr(), flags, 0o666 as libc::c_uint) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: fd was just returned by open(2) and is owned by nothing else
        Ok(unsafe { File::from_raw_fd(fd) })
    }

    #[cfg(not(unix))]
    fn open_append(&self) -> io::Result<File> {
        std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
    }
}

#[cfg(unix)]
fn close_file(file: File) -> io::Result<()> {
    use std::os::fd::IntoRawFd;

    let fd = file.into_raw_fd();
    // SAFETY: fd came out of an owned File and is closed exactly once
    if unsafe { libc::close(fd) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
fn close_file(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}
