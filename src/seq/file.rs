// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::errors::AlnError;

// Anything path-like will do (&str, String, Path, PathBuf). The file is closed when the reader
// goes out of scope, whether or not reading succeeded.

pub fn read_text_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, AlnError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let lines: Vec<String> = BufReader::new(file).lines().collect::<Result<_, _>>()?;
    info!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}
