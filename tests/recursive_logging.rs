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
use std::sync::Mutex;

use sinklog::Flags;
use sinklog::Logger;
use sinklog::Priority;
use sinklog::global;

struct Thing<'a>(&'a str);

impl std::fmt::Display for Thing<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        sinklog::debug!("formatting wrapping ({})", self.0);
        #[cfg(feature = "bridge-log")]
        log::debug!("formatting wrapping ({})", self.0);
        f.write_str(self.0)
    }
}

// logging from inside a message argument must neither hang nor reach the sink
#[test]
fn test_meta_logging_in_format_works() {
    #[cfg(feature = "bridge-log")]
    sinklog::bridge::setup_log_crate();

    let lines = Arc::new(Mutex::new(Vec::new()));
    let seen = lines.clone();
    let logger = Logger::open_callback(
        move |_, line: &str| seen.lock().unwrap().push(line.to_string()),
        "svc",
        Priority::DEBUG,
        Flags::empty(),
    )
    .unwrap();
    global::set_global(logger.into_shared());

    sinklog::info!("I'm logging {}!", Thing("aha"));
    #[cfg(feature = "bridge-log")]
    log::info!(target: "outer", "I'm logging {}!", Thing("oho"));

    // the slot is usable again once the outer call returned
    sinklog::debug_raw!("after");
    global::unset_global();

    let mut expected = vec!["I'm logging aha!\n".to_string()];
    #[cfg(feature = "bridge-log")]
    expected.push("outer: I'm logging oho!\n".to_string());
    expected.push("after\n".to_string());
    assert_eq!(*lines.lock().unwrap(), expected);
}
