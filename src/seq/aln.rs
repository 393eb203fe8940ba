// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use log::{debug, trace};

use crate::seq::record::AlnRecord;

// A data line of an aln file looks like
//
//   <id> <residues> <end position>
//
// e.g. "12  ACDE  4": digits, whitespace, uppercase letters, whitespace, digits, and nothing else
// (a trailing line terminator is allowed). Any other line (header, blank, conservation line...)
// is not a record.

pub fn scan_aln_line(line: &str) -> Option<AlnRecord> {
    let body = strip_terminator(line);
    let mut scanner = Scanner::new(body);

    let id = scanner.take_while(|c| c.is_ascii_digit())?.parse().ok()?;
    scanner.take_while(char::is_whitespace)?;
    let sequence = scanner.take_while(|c| c.is_ascii_uppercase())?;
    scanner.take_while(char::is_whitespace)?;
    let end_position = scanner.take_while(|c| c.is_ascii_digit())?.parse().ok()?;
    if !scanner.at_end() {
        return None;
    }

    Some(AlnRecord {
        id,
        sequence: sequence.to_string(),
        end_position,
    })
}

/// Scans `lines` in order and yields every record found, along with its (1-based) line number.
pub fn scan_aln_lines<I, S>(lines: I) -> impl Iterator<Item = (usize, AlnRecord)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().enumerate().filter_map(|(idx, line)| {
        let linenum = idx + 1;
        match scan_aln_line(line.as_ref()) {
            Some(record) => {
                debug!(
                    "l. {}: seq {}, {} residues ending at {}",
                    linenum,
                    record.id,
                    record.sequence.len(),
                    record.end_position
                );
                Some((linenum, record))
            }
            None => {
                trace!("l. {}: not a record, skipped", linenum);
                None
            }
        }
    })
}

fn strip_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(l) => l.strip_suffix('\r').unwrap_or(l),
        None => line,
    }
}

struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    // Consumes the longest prefix whose chars all satisfy `pred`. None if that prefix is empty.
    fn take_while<F>(&mut self, pred: F) -> Option<&'a str>
    where
        F: Fn(char) -> bool,
    {
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| !pred(*c))
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(run)
    }

    fn at_end(&self) -> bool {
        self.rest.is_empty()
    }
}
