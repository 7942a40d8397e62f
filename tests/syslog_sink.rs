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

#![cfg(all(unix, feature = "syslog"))]

use sinklog::ErrorKind;
use sinklog::Facility;
use sinklog::Flags;
use sinklog::Logger;
use sinklog::Priority;
use sinklog::SinkKind;

#[test]
fn test_open_by_name_and_log() {
    let mut logger = Logger::open_syslog_by_name("user", "sinklog-test", Priority::INFO, 0).unwrap();
    assert_eq!(logger.kind(), SinkKind::Syslog);
    assert_eq!(logger.facility(), Some(Facility::USER));

    // flags are ignored by the system log
    logger.set_flags(Flags::TIMESTAMP);
    logger.log(Priority::DEBUG, format_args!("filtered"));
    logger.log_prefixed_str(Priority::INFO, "test", "hello from sinklog");

    logger.close();
    assert_eq!(logger.kind(), SinkKind::Closed);
    assert_eq!(logger.facility(), None);
}

#[test]
fn test_unknown_facility_name_opens_nothing() {
    let err =
        Logger::open_syslog_by_name("no-such-facility", "svc", Priority::INFO, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SinkInit);
    assert!(err.to_string().contains("no-such-facility"));
}
