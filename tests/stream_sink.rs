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

use std::fs;
use std::fs::File;
use std::io::Write;

use sinklog::Flags;
use sinklog::Logger;
use sinklog::Priority;
use tempfile::TempDir;

#[test]
fn test_close_leaves_caller_file_open() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("svc.log");
    let file = File::create(&path).unwrap();
    #[cfg(unix)]
    let fd = std::os::fd::AsRawFd::as_raw_fd(&file);

    let mut logger = Logger::open_stream(file, "svc", Priority::INFO, Flags::NO_IDENT_PID).unwrap();
    logger.log_str(Priority::INFO, "from the logger");
    logger.close();

    #[cfg(unix)]
    {
        // SAFETY: F_GETFD only queries the descriptor flags
        let rc = unsafe { libc::fcntl(fd, libc::F_GETFD) };
        assert_ne!(rc, -1, "{}", std::io::Error::last_os_error());
    }

    let mut file = logger.take_stream().unwrap();
    file.write_all(b"from the caller\n").unwrap();
    file.flush().unwrap();
    drop(file);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "from the logger\nfrom the caller\n"
    );
}
