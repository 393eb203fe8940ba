// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// One block of an aln file: a stretch of residues of sequence `id`, whose last residue sits at
// (1-based) position `end_position` of the alignment. The block therefore covers positions
// `end_position - sequence.len() + 1 ..= end_position`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlnRecord {
    pub id: u64,
    pub sequence: String,
    pub end_position: usize,
}

impl AlnRecord {
    /// First position covered by the block, or None if the block would start before position 1.
    pub fn start_position(&self) -> Option<usize> {
        let len = self.sequence.chars().count();
        if len > self.end_position {
            None
        } else {
            Some(self.end_position + 1 - len)
        }
    }
}
