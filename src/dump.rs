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

//! Rendering arbitrary bytes as printable text.

use crate::Error;
use crate::ErrorKind;
use crate::Logger;
use crate::Priority;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// How [`dump`] renders bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DumpMode {
    /// Printable characters verbatim, C escapes for the rest, e.g. `A\n\377`.
    #[default]
    Octal,
    /// Two lowercase hex digits per byte, a space after every fourth byte, e.g. `410aff00 12`.
    Hex,
}

/// Render `bytes` as printable text.
///
/// If the output buffer cannot be allocated, return `None` and, when a logger is given, log the
/// failure through it.
///
/// # Examples
///
/// ```
/// use sinklog::DumpMode;
///
/// let bytes = [0x41, 0x0a, 0xff];
/// assert_eq!(sinklog::dump(None, &bytes, DumpMode::Octal).unwrap(), r"A\n\377");
/// assert_eq!(sinklog::dump(None, &bytes, DumpMode::Hex).unwrap(), "410aff");
/// ```
pub fn dump(logger: Option<&mut Logger>, bytes: &[u8], mode: DumpMode) -> Option<String> {
    match try_dump(bytes, mode) {
        Ok(text) => Some(text),
        Err(err) => {
            if let Some(logger) = logger {
                logger.log_prefixed(Priority::ERR, "dump", format_args!("{err}"));
            }
            None
        }
    }
}

/// Render `bytes` as printable text.
///
/// # Errors
///
/// Return a [`ErrorKind::Dump`] error if the output buffer cannot be allocated.
pub fn try_dump(bytes: &[u8], mode: DumpMode) -> Result<String, Error> {
    let capacity = match mode {
        DumpMode::Octal => bytes.len().checked_mul(4),
        DumpMode::Hex => bytes
            .len()
            .checked_mul(2)
            .and_then(|n| n.checked_add(bytes.len() / 4)),
    }
    .ok_or_else(|| {
        Error::new(ErrorKind::Dump, "dump size overflows").with_context("len", bytes.len())
    })?;

    let mut out = String::new();
    out.try_reserve_exact(capacity).map_err(|err| {
        Error::new(ErrorKind::Dump, "failed to allocate dump buffer")
            .with_context("capacity", capacity)
            .with_source(err)
    })?;

    match mode {
        DumpMode::Octal => dump_octal(bytes, &mut out),
        DumpMode::Hex => dump_hex(bytes, &mut out),
    }
    Ok(out)
}

fn dump_octal(bytes: &[u8], out: &mut String) {
    for &b in bytes {
        let escape = match b {
            0x07 => 'a',
            0x08 => 'b',
            b'\t' => 't',
            b'\n' => 'n',
            0x0b => 'v',
            0x0c => 'f',
            b'\r' => 'r',
            b'\\' | b'"' | b'\'' => b as char,
            b if b.is_ascii_graphic() || b == b' ' => {
                out.push(b as char);
                continue;
            }
            b => {
                out.push('\\');
                out.push(char::from(b'0' + (b >> 6)));
                out.push(char::from(b'0' + ((b >> 3) & 0o7)));
                out.push(char::from(b'0' + (b & 0o7)));
                continue;
            }
        };
        out.push('\\');
        out.push(escape);
    }
}

fn dump_hex(bytes: &[u8], out: &mut String) {
    for (i, &b) in bytes.iter().enumerate() {
        out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
        out.push(char::from(HEX_DIGITS[usize::from(b & 0xf)]));
        if (i + 1) % 4 == 0 && i + 1 != bytes.len() {
            out.push(' ');
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn undump_octal(text: &str) -> Vec<u8> {
        let mut out = Vec::new();
        let mut bytes = text.bytes();
        while let Some(b) = bytes.next() {
            if b != b'\\' {
                out.push(b);
                continue;
            }
            let c = bytes.next().unwrap();
            let decoded = match c {
                b'a' => 0x07,
                b'b' => 0x08,
                b't' => b'\t',
                b'n' => b'\n',
                b'v' => 0x0b,
                b'f' => 0x0c,
                b'r' => b'\r',
                b'\\' | b'"' | b'\'' => c,
                b'0'..=b'3' => {
                    let d1 = bytes.next().unwrap() - b'0';
                    let d2 = bytes.next().unwrap() - b'0';
                    ((c - b'0') << 6) | (d1 << 3) | d2
                }
                other => panic!("unexpected escape {other}"),
            };
            out.push(decoded);
        }
        out
    }

    fn undump_hex(text: &str) -> Vec<u8> {
        let digits: Vec<u8> = text.bytes().filter(|b| *b != b' ').collect();
        digits
            .chunks(2)
            .map(|pair| u8::from_str_radix(std::str::from_utf8(pair).unwrap(), 16).unwrap())
            .collect()
    }

    #[test]
    fn test_octal_examples() {
        let text = try_dump(&[0x41, 0x0a, 0xff], DumpMode::Octal).unwrap();
        assert_eq!(text, "A\\n\\377");

        let text = try_dump(b"a \"q\" 'x' \\ \x07\x08\t\x0b\x0c\r\x00\x7f", DumpMode::Octal).unwrap();
        insta::assert_snapshot!(text, @r#"a \"q\" \'x\' \\ \a\b\t\v\f\r\000\177"#);
    }

    #[test]
    fn test_hex_spacing() {
        assert_eq!(try_dump(&[0x41, 0x0a, 0xff], DumpMode::Hex).unwrap(), "410aff");
        assert_eq!(try_dump(&[1, 2, 3, 4], DumpMode::Hex).unwrap(), "01020304");
        assert_eq!(
            try_dump(&[1, 2, 3, 4, 5], DumpMode::Hex).unwrap(),
            "01020304 05"
        );
        assert_eq!(
            try_dump(&[0xde, 0xad, 0xbe, 0xef, 0xca, 0xfe, 0xba, 0xbe], DumpMode::Hex).unwrap(),
            "deadbeef cafebabe"
        );
        assert_eq!(try_dump(&[], DumpMode::Hex).unwrap(), "");
    }

    #[test]
    fn test_capacity_is_enough() {
        let bytes: Vec<u8> = (0..=255).collect();
        for mode in [DumpMode::Octal, DumpMode::Hex] {
            let text = try_dump(&bytes, mode).unwrap();
            let bound = match mode {
                DumpMode::Octal => bytes.len() * 4,
                DumpMode::Hex => bytes.len() * 2 + bytes.len() / 4,
            };
            assert!(text.len() <= bound);
        }
    }

    #[test]
    fn test_round_trip_all_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let octal = try_dump(&bytes, DumpMode::Octal).unwrap();
        assert_eq!(undump_octal(&octal), bytes);
        let hex = try_dump(&bytes, DumpMode::Hex).unwrap();
        assert_eq!(undump_hex(&hex), bytes);
    }

    #[test]
    fn test_round_trip_random() {
        let mut rng = rand::rng();
        for _ in 0..64 {
            let len = rng.random_range(0..=200);
            let bytes: Vec<u8> = (0..len).map(|_| rng.random()).collect();

            let octal = try_dump(&bytes, DumpMode::Octal).unwrap();
            assert!(octal.bytes().all(|b| b.is_ascii_graphic() || b == b' '));
            assert_eq!(undump_octal(&octal), bytes);

            let hex = try_dump(&bytes, DumpMode::Hex).unwrap();
            assert_eq!(undump_hex(&hex), bytes);
        }
    }

    #[test]
    fn test_dump_without_logger() {
        assert_eq!(dump(None, b"ok", DumpMode::Octal).as_deref(), Some("ok"));
    }
}
