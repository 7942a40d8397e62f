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

//! Text for host-resolution error codes (`h_errno`).

use crate::Error;
use crate::ErrorKind;

/// The host is unknown.
pub const HOST_NOT_FOUND: i32 = 1;
/// A temporary error occurred on an authoritative name server.
pub const TRY_AGAIN: i32 = 2;
/// A non-recoverable name server error occurred.
pub const NO_RECOVERY: i32 = 3;
/// The name is valid but has no address.
pub const NO_DATA: i32 = 4;
/// Alias of [`NO_DATA`].
pub const NO_ADDRESS: i32 = NO_DATA;

/// Return the text for a host-resolution error code.
///
/// # Errors
///
/// Return a [`ErrorKind::StrHost`] error for any code not listed in this module.
///
/// # Examples
///
/// ```
/// use sinklog::host;
///
/// assert_eq!(host::strherror(host::TRY_AGAIN).unwrap(), "Host name lookup failure");
/// assert!(host::strherror(99).is_err());
/// ```
pub fn strherror(code: i32) -> Result<&'static str, Error> {
    match code {
        HOST_NOT_FOUND => Ok("Unknown host"),
        TRY_AGAIN => Ok("Host name lookup failure"),
        NO_RECOVERY => Ok("Unknown server error"),
        NO_DATA => Ok("No address associated with name"),
        _ => Err(Error::new(ErrorKind::StrHost, "unknown host error code").with_context("code", code)),
    }
}
