// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{error, fmt, io};

#[derive(Debug)]
pub enum AlnError {
    Io(io::Error),
    Json(serde_json::Error),
    Format(String),
    EmptyAlignment,
    MalformedRecord {
        line: usize,
        id: u64,
        length: usize,
        end_position: usize,
    },
    Overlap {
        line: usize,
        id: u64,
        position: usize,
    },
    AlignmentTooLarge {
        positions: usize,
        sequences: usize,
    },
    UnknownSymbol(char),
    UnknownIdentifier(u64),
}

// These allow conversion to AlnError, so that '?' works on I/O and JSON results.

impl From<io::Error> for AlnError {
    fn from(e: io::Error) -> Self {
        AlnError::Io(e)
    }
}

impl From<serde_json::Error> for AlnError {
    fn from(e: serde_json::Error) -> Self {
        AlnError::Json(e)
    }
}

impl From<String> for AlnError {
    fn from(s: String) -> Self {
        AlnError::Format(s)
    }
}

impl fmt::Display for AlnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlnError::Io(e) => write!(f, "I/O error: {}", e),
            AlnError::Json(e) => write!(f, "JSON error: {}", e),
            AlnError::Format(msg) => write!(f, "Format error: {}", msg),
            AlnError::EmptyAlignment => write!(f, "Empty alignment: no records found"),
            AlnError::MalformedRecord {
                line,
                id,
                length,
                end_position,
            } => write!(
                f,
                "Malformed record on line {}: sequence {} has {} residues but ends at position {}",
                line, id, length, end_position
            ),
            AlnError::Overlap { line, id, position } => write!(
                f,
                "Overlap on line {}: sequence {} already has a residue at position {}",
                line, id, position
            ),
            AlnError::AlignmentTooLarge {
                positions,
                sequences,
            } => write!(
                f,
                "Alignment too large: {} sequences x {} positions",
                sequences, positions
            ),
            AlnError::UnknownSymbol(c) => write!(f, "Unknown symbol: {:?}", c),
            AlnError::UnknownIdentifier(id) => write!(f, "Unknown sequence identifier: {}", id),
        }
    }
}

impl error::Error for AlnError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            AlnError::Io(e) => Some(e),
            AlnError::Json(e) => Some(e),
            _ => None,
        }
    }
}
