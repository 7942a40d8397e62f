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

use sinklog::ErrorKind;
use sinklog::Flags;
use sinklog::Logger;
use sinklog::Priority;
use sinklog::SinkKind;
use sinklog::trap::SilentTrap;
use tempfile::TempDir;

#[test]
fn test_path_sink_writes_ident_and_pid() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("svc.log");

    let mut logger = Logger::open_path(&path, "svc", Priority::INFO, Flags::empty()).unwrap();
    assert_eq!(logger.kind(), SinkKind::Path);
    assert_eq!(logger.path(), Some(path.as_path()));

    logger.log(Priority::INFO, format_args!("x={}", 5));
    logger.log(Priority::DEBUG, format_args!("x={}", 6));
    logger.close();

    let expected = format!("svc[{}]: x=5\n", std::process::id());
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_timestamp_prefix() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("svc.log");

    let mut logger = Logger::builder("svc")
        .flags(Flags::TIMESTAMP | Flags::NO_IDENT_PID)
        .time_zone(jiff::tz::TimeZone::UTC)
        .path(&path)
        .unwrap();
    logger.log_str(Priority::NOTICE, "hello");
    logger.close();

    let line = fs::read_to_string(&path).unwrap();
    assert_eq!(line.len(), "Jan 01 00:00:00: hello\n".len(), "{line}");
    assert!(line.ends_with(": hello\n"), "{line}");
    assert_eq!(&line[6..7], " ");
    assert_eq!(&line[9..10], ":");
}

#[test]
fn test_reopen_keeps_appending() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("svc.log");

    let mut logger = Logger::open_path(&path, "svc", Priority::DEBUG, Flags::NO_IDENT_PID).unwrap();
    logger.log_str(Priority::INFO, "first");
    logger.reopen().unwrap();
    assert!(logger.is_ready());
    logger.log_str(Priority::INFO, "second");
    logger.close();

    assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
}

#[test]
fn test_reopen_trigger_follows_rotation() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("svc.log");
    let rotated = dir.path().join("svc.log.1");

    let mut logger = Logger::open_path(&path, "svc", Priority::DEBUG, Flags::NO_IDENT_PID).unwrap();
    let trigger = logger.reopen_trigger();

    logger.log_str(Priority::INFO, "before rotation");
    fs::rename(&path, &rotated).unwrap();

    // a signal handler would do this
    trigger.request();
    assert!(trigger.is_requested());

    logger.log_str(Priority::INFO, "after rotation");
    assert!(!trigger.is_requested());
    logger.close();

    assert_eq!(fs::read_to_string(&rotated).unwrap(), "before rotation\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "after rotation\n");
}

#[test]
fn test_failed_reopen_goes_silent_until_next_success() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    let path = logs.join("svc.log");

    let mut logger = Logger::builder("svc")
        .flags(Flags::NO_IDENT_PID)
        .trap(SilentTrap::default())
        .path(&path)
        .unwrap();
    logger.log_str(Priority::INFO, "one");

    fs::remove_dir_all(&logs).unwrap();
    let err = logger.reopen().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reopen);
    assert!(!logger.is_ready());
    logger.log_str(Priority::EMERG, "lost");

    fs::create_dir(&logs).unwrap();
    logger.reopen().unwrap();
    assert!(logger.is_ready());
    logger.log_str(Priority::INFO, "two");
    logger.close();

    assert_eq!(fs::read_to_string(&path).unwrap(), "two\n");
}

#[test]
fn test_open_failure_reports_sink_init() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("missing").join("svc.log");

    let err = Logger::open_path(&path, "svc", Priority::INFO, Flags::empty()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SinkInit);
    assert!(!path.exists());
}
