// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{collections::HashMap, fmt, path::Path};

use itertools::{iproduct, Itertools};
use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{AssemblyConfig, OverlapPolicy};
use crate::errors::AlnError;
use crate::seq::aln::scan_aln_lines;
use crate::seq::file::read_text_lines;
use crate::seq::record::AlnRecord;
use crate::substitution::SubstitutionMatrix;

// An alignment assembled from the blocks of an aln file. Rows are alignment positions (1-based),
// columns are sequences, in the order in which their ids first appear in the file. A cell is None
// where no block of that sequence covers that position.

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
    ids: Vec<u64>,
    #[serde(rename = "positions")]
    aln_len: usize,
    // One Vec per sequence (same order as `ids`), of length `aln_len`.
    columns: Vec<Vec<Option<char>>>,
    #[serde(skip)]
    id_index: HashMap<u64, usize>,
}

impl Alignment {
    pub fn from_lines<I, S>(lines: I, config: &AssemblyConfig) -> Result<Self, AlnError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records: Vec<(usize, AlnRecord)> = scan_aln_lines(lines).collect();
        if records.is_empty() {
            return Err(AlnError::EmptyAlignment);
        }

        // Check every block before allocating anything.
        let starts: Vec<usize> = records
            .iter()
            .map(|(linenum, rec)| {
                rec.start_position().ok_or(AlnError::MalformedRecord {
                    line: *linenum,
                    id: rec.id,
                    length: rec.sequence.chars().count(),
                    end_position: rec.end_position,
                })
            })
            .collect::<Result<_, _>>()?;

        let aln_len = records
            .iter()
            .map(|(_, rec)| rec.end_position)
            .max()
            .unwrap_or(0);
        let ids: Vec<u64> = records.iter().map(|(_, rec)| rec.id).unique().collect();
        let id_index: HashMap<u64, usize> = ids
            .iter()
            .enumerate()
            .map(|(col, id)| (*id, col))
            .collect();

        let mut columns = allocate_columns(aln_len, ids.len(), config.max_cells)?;
        let mut total_overwritten = 0;
        for ((linenum, rec), start) in records.iter().zip(starts) {
            let column = &mut columns[id_index[&rec.id]];
            let mut overwritten = 0;
            for (offset, residue) in rec.sequence.chars().enumerate() {
                let position = start + offset;
                let cell = &mut column[position - 1];
                if cell.is_some() {
                    match config.overlap {
                        OverlapPolicy::Reject => {
                            return Err(AlnError::Overlap {
                                line: *linenum,
                                id: rec.id,
                                position,
                            });
                        }
                        OverlapPolicy::LastWriteWins => overwritten += 1,
                    }
                }
                *cell = Some(residue);
            }
            if overwritten > 0 {
                debug!(
                    "l. {}: overwrote {} residue(s) of seq {}",
                    linenum, overwritten, rec.id
                );
            }
            total_overwritten += overwritten;
        }
        if total_overwritten > 0 {
            warn!(
                "Overlapping blocks: {} residue(s) overwritten by later lines",
                total_overwritten
            );
        }

        info!(
            "Assembled {} blocks into {} sequences x {} positions",
            records.len(),
            ids.len(),
            aln_len
        );
        Ok(Alignment {
            ids,
            aln_len,
            columns,
            id_index,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AlnError> {
        Self::from_path_with_config(path, &AssemblyConfig::default())
    }

    pub fn from_path_with_config<P: AsRef<Path>>(
        path: P,
        config: &AssemblyConfig,
    ) -> Result<Self, AlnError> {
        let lines = read_text_lines(path)?;
        Self::from_lines(lines, config)
    }

    pub fn num_seq(&self) -> usize {
        self.ids.len()
    }

    pub fn aln_len(&self) -> usize {
        self.aln_len
    }

    /// Sequence ids, in order of first appearance.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Residue of sequence `id` at (1-based) `position`.
    pub fn get(&self, position: usize, id: u64) -> Option<char> {
        if position == 0 {
            return None;
        }
        self.column(id)?.get(position - 1).copied().flatten()
    }

    pub fn column(&self, id: u64) -> Option<&[Option<char>]> {
        self.id_index
            .get(&id)
            .map(|col| self.columns[*col].as_slice())
    }

    /// All cells at (1-based) `position`, in `ids()` order.
    pub fn row(&self, position: usize) -> Option<Vec<Option<char>>> {
        if position == 0 || position > self.aln_len {
            return None;
        }
        Some(self.columns.iter().map(|col| col[position - 1]).collect())
    }

    /// The residues of sequence `id`, without the absent positions.
    pub fn residues(&self, id: u64) -> Option<String> {
        self.column(id)
            .map(|col| col.iter().flatten().collect())
    }

    /// Sequence `id` over the whole alignment, with `absent` wherever it has no residue.
    pub fn column_string(&self, id: u64, absent: char) -> Option<String> {
        self.column(id)
            .map(|col| col.iter().map(|cell| cell.unwrap_or(absent)).collect())
    }

    /// Substitution counts between two sequences of the alignment. Only positions where both
    /// sequences have a residue are counted.
    pub fn substitution_count(&self, id_1: u64, id_2: u64) -> Result<SubstitutionMatrix, AlnError> {
        let col_1 = self.column(id_1).ok_or(AlnError::UnknownIdentifier(id_1))?;
        let col_2 = self.column(id_2).ok_or(AlnError::UnknownIdentifier(id_2))?;
        let mut matrix = SubstitutionMatrix::new();
        matrix.count_pairs(
            col_1
                .iter()
                .zip(col_2.iter())
                .filter_map(|(a, b)| Some(((*a)?, (*b)?))),
        )?;
        Ok(matrix)
    }

    /// Sum of `substitution_count(id_1, id_2)` over all pairs drawn from `ids_1` and `ids_2`.
    pub fn substitution_matrix(
        &self,
        ids_1: &[u64],
        ids_2: &[u64],
    ) -> Result<SubstitutionMatrix, AlnError> {
        iproduct!(ids_1, ids_2)
            .map(|(id_1, id_2)| self.substitution_count(*id_1, *id_2))
            .sum()
    }
}

// All-absent table of `num_seq` columns of `aln_len` cells. Fails instead of aborting when the
// table would exceed `max_cells` or the allocator cannot provide it.
fn allocate_columns(
    aln_len: usize,
    num_seq: usize,
    max_cells: usize,
) -> Result<Vec<Vec<Option<char>>>, AlnError> {
    let too_large = || AlnError::AlignmentTooLarge {
        positions: aln_len,
        sequences: num_seq,
    };
    let cells = aln_len.checked_mul(num_seq).ok_or_else(too_large)?;
    if cells > max_cells {
        return Err(too_large());
    }
    let mut columns: Vec<Vec<Option<char>>> = Vec::new();
    columns.try_reserve_exact(num_seq).map_err(|_| too_large())?;
    for _ in 0..num_seq {
        let mut column: Vec<Option<char>> = Vec::new();
        column.try_reserve_exact(aln_len).map_err(|_| too_large())?;
        column.resize(aln_len, None);
        columns.push(column);
    }
    Ok(columns)
}

// Tab-separated: a header line ("pos" and the ids), then one line per position. Absent residues
// are shown as '-'.
impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos")?;
        for id in &self.ids {
            write!(f, "\t{}", id)?;
        }
        writeln!(f)?;
        for idx in 0..self.aln_len {
            write!(f, "{}", idx + 1)?;
            for col in &self.columns {
                write!(f, "\t{}", col[idx].unwrap_or('-'))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(lines: &[&str]) -> Result<Alignment, AlnError> {
        Alignment::from_lines(lines, &AssemblyConfig::default())
    }

    #[test]
    fn test_single_record() {
        let aln = assemble(&["12  ACDE  4\n"]).unwrap();
        assert_eq!(aln.ids(), &[12]);
        assert_eq!(aln.aln_len(), 4);
        assert_eq!(aln.column_string(12, '-').unwrap(), "ACDE");
        assert_eq!(aln.get(1, 12), Some('A'));
        assert_eq!(aln.get(4, 12), Some('E'));
    }

    #[test]
    fn test_header_ignored() {
        let with_header = assemble(&["this is a header\n", "12  ACDE  4\n"]).unwrap();
        let without = assemble(&["12  ACDE  4\n"]).unwrap();
        assert_eq!(with_header, without);
    }

    #[test]
    fn test_empty_alignment() {
        let result = assemble(&["this is a header\n", "\n"]);
        assert!(matches!(result, Err(AlnError::EmptyAlignment)));
        let no_lines: [&str; 0] = [];
        let result = assemble(&no_lines);
        assert!(matches!(result, Err(AlnError::EmptyAlignment)));
    }

    #[test]
    fn test_blocks_placed_by_end_position() {
        let aln = assemble(&["1 AC 2", "2 DEF 3", "1 GH 6"]).unwrap();
        assert_eq!(aln.ids(), &[1, 2]);
        assert_eq!(aln.aln_len(), 6);
        assert_eq!(aln.column_string(1, '-').unwrap(), "AC--GH");
        assert_eq!(aln.column_string(2, '-').unwrap(), "DEF---");
        assert_eq!(aln.residues(1).unwrap(), "ACGH");
        assert_eq!(aln.get(3, 1), None);
    }

    #[test]
    fn test_ids_in_first_seen_order() {
        let aln = assemble(&["30 A 1", "4 C 1", "30 D 2", "17 E 1", "4 F 2"]).unwrap();
        assert_eq!(aln.ids(), &[30, 4, 17]);
        assert_eq!(aln.num_seq(), 3);
    }

    #[test]
    fn test_last_write_wins() {
        let aln = assemble(&["1 ACDE 4", "1 WW 3"]).unwrap();
        assert_eq!(aln.column_string(1, '-').unwrap(), "AWWE");
    }

    #[test]
    fn test_reject_overlap() {
        let config = AssemblyConfig {
            overlap: OverlapPolicy::Reject,
            ..AssemblyConfig::default()
        };
        let result = Alignment::from_lines(["1 ACDE 4", "1 WW 3"], &config);
        assert!(matches!(
            result,
            Err(AlnError::Overlap {
                line: 2,
                id: 1,
                position: 2
            })
        ));
    }

    #[test]
    fn test_reject_allows_adjacent_blocks() {
        let config = AssemblyConfig {
            overlap: OverlapPolicy::Reject,
            ..AssemblyConfig::default()
        };
        let aln = Alignment::from_lines(["1 ACDE 4", "1 WW 6", "2 WW 2"], &config).unwrap();
        assert_eq!(aln.column_string(1, '-').unwrap(), "ACDEWW");
    }

    #[test]
    fn test_malformed_record() {
        let result = assemble(&["1 AC 2", "header", "2 ACDEF 4"]);
        assert!(matches!(
            result,
            Err(AlnError::MalformedRecord {
                line: 3,
                id: 2,
                length: 5,
                end_position: 4
            })
        ));
    }

    #[test]
    fn test_zero_end_position_is_malformed() {
        let result = assemble(&["1 A 0"]);
        assert!(matches!(result, Err(AlnError::MalformedRecord { .. })));
    }

    #[test]
    fn test_huge_end_position_is_an_error() {
        let result = assemble(&["1 A 999999999999999999"]);
        assert!(matches!(
            result,
            Err(AlnError::AlignmentTooLarge {
                positions: 999999999999999999,
                sequences: 1
            })
        ));
    }

    #[test]
    fn test_huge_end_position_without_cell_limit() {
        // Left to the allocator, which cannot provide this much either.
        let config = AssemblyConfig {
            max_cells: usize::MAX,
            ..AssemblyConfig::default()
        };
        let result = Alignment::from_lines(["1 A 999999999999999999"], &config);
        assert!(matches!(result, Err(AlnError::AlignmentTooLarge { .. })));
    }

    #[test]
    fn test_cell_limit_counts_all_sequences() {
        let config = AssemblyConfig {
            max_cells: 5,
            ..AssemblyConfig::default()
        };
        let result = Alignment::from_lines(["1 AC 3", "2 DE 3"], &config);
        assert!(matches!(
            result,
            Err(AlnError::AlignmentTooLarge {
                positions: 3,
                sequences: 2
            })
        ));
        let config = AssemblyConfig {
            max_cells: 6,
            ..config
        };
        let aln = Alignment::from_lines(["1 AC 3", "2 DE 2"], &config).unwrap();
        assert_eq!(aln.aln_len(), 3);
    }

    #[test]
    fn test_get_out_of_range() {
        let aln = assemble(&["1 AC 2"]).unwrap();
        assert_eq!(aln.get(0, 1), None);
        assert_eq!(aln.get(3, 1), None);
        assert_eq!(aln.get(1, 99), None);
        assert!(aln.column(99).is_none());
    }

    #[test]
    fn test_row() {
        let aln = assemble(&["1 AC 2", "2 D 2"]).unwrap();
        assert_eq!(aln.row(1), Some(vec![Some('A'), None]));
        assert_eq!(aln.row(2), Some(vec![Some('C'), Some('D')]));
        assert_eq!(aln.row(0), None);
        assert_eq!(aln.row(3), None);
    }

    #[test]
    fn test_substitution_count_skips_absent() {
        let aln = assemble(&["1 ACDE 4", "2 CD 3"]).unwrap();
        let m = aln.substitution_count(1, 2).unwrap();
        assert_eq!(m.total(), 2);
        assert_eq!(m.get('C', 'C').unwrap(), 1);
        assert_eq!(m.get('D', 'D').unwrap(), 1);
    }

    #[test]
    fn test_substitution_count_unknown_id() {
        let aln = assemble(&["1 ACDE 4"]).unwrap();
        let result = aln.substitution_count(1, 5);
        assert!(matches!(result, Err(AlnError::UnknownIdentifier(5))));
    }

    #[test]
    fn test_substitution_count_unknown_symbol() {
        let aln = assemble(&["1 ACXE 4", "2 ACDE 4"]).unwrap();
        let result = aln.substitution_count(1, 2);
        assert!(matches!(result, Err(AlnError::UnknownSymbol('X'))));
    }

    #[test]
    fn test_substitution_matrix_over_ids() {
        let aln = assemble(&["1 AC 2", "2 AD 2", "3 WC 2"]).unwrap();
        let m = aln.substitution_matrix(&[1], &[2, 3]).unwrap();
        let expected = aln.substitution_count(1, 2).unwrap() + aln.substitution_count(1, 3).unwrap();
        assert_eq!(m, expected);
        assert_eq!(m.total(), 4);
    }

    #[test]
    fn test_display() {
        let aln = assemble(&["1 AC 2", "2 D 3"]).unwrap();
        insta::assert_snapshot!(aln.to_string(), @r"
        pos	1	2
        1	A	-
        2	C	-
        3	-	D
        ");
    }

    #[test]
    fn test_serialize() {
        let aln = assemble(&["1 AC 2", "2 D 3"]).unwrap();
        let value = serde_json::to_value(&aln).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "ids": [1, 2],
                "positions": 3,
                "columns": [["A", "C", null], [null, null, "D"]]
            })
        );
    }
}
