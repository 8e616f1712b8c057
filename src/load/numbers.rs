// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Phone-number lists.
//!
//! One number per line. Only the first comma-separated field is used, so a
//! previous export can be fed straight back in. Blank lines are skipped.
//! Nothing here validates numbers: a malformed one is passed through and the
//! resolver reports it in its own result slot.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::{with_path, BOM};

/// Lazy iterator over the numbers in a phone list.
#[derive(Debug)]
pub struct NumberLines<R> {
    reader: R,
    buf: Vec<u8>,
    first: bool,
}

/// Read numbers from any buffered reader.
pub fn read_numbers<R: BufRead>(reader: R) -> NumberLines<R> {
    NumberLines {
        reader,
        buf: Vec::with_capacity(32),
        first: true,
    }
}

/// Open a phone list file.
pub fn open_numbers(path: &Path) -> io::Result<NumberLines<BufReader<File>>> {
    let file = File::open(path).map_err(|e| with_path(e, path))?;
    Ok(read_numbers(BufReader::new(file)))
}

impl<R: BufRead> Iterator for NumberLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            let first = std::mem::take(&mut self.first);
            let line = String::from_utf8_lossy(&self.buf);
            let line = if first {
                line.trim_start_matches(BOM)
            } else {
                &*line
            };
            let number = line.split(',').next().unwrap_or_default().trim();
            if !number.is_empty() {
                return Some(Ok(number.to_string()));
            }
        }
    }
}
