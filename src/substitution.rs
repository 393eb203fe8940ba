// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
};

use itertools::iproduct;
use serde::{Serialize, Serializer};

use crate::alphabet::{aa_index, ALPHABET_SIZE, AMINO_ACIDS};
use crate::errors::AlnError;

/// Counts of aligned residue pairs. Cell `(from, to)` is the number of times amino acid `from` in
/// the first sequence was aligned with `to` in the second. Rows and columns are in
/// `AMINO_ACIDS` order, so any two matrices can be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMatrix {
    counts: [[u64; ALPHABET_SIZE]; ALPHABET_SIZE],
}

impl Default for SubstitutionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl SubstitutionMatrix {
    pub fn new() -> Self {
        SubstitutionMatrix {
            counts: [[0; ALPHABET_SIZE]; ALPHABET_SIZE],
        }
    }

    /// Adds one count per `(from, to)` pair. Fails on the first symbol that is not an amino
    /// acid, in which case `self` is left as it was.
    pub fn count_pairs<I>(&mut self, pairs: I) -> Result<(), AlnError>
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let mut delta = SubstitutionMatrix::new();
        for (from, to) in pairs {
            let i = aa_index(from).ok_or(AlnError::UnknownSymbol(from))?;
            let j = aa_index(to).ok_or(AlnError::UnknownSymbol(to))?;
            delta.counts[i][j] += 1;
        }
        *self += &delta;
        Ok(())
    }

    pub fn get(&self, from: char, to: char) -> Result<u64, AlnError> {
        let i = aa_index(from).ok_or(AlnError::UnknownSymbol(from))?;
        let j = aa_index(to).ok_or(AlnError::UnknownSymbol(to))?;
        Ok(self.counts[i][j])
    }

    /// Counts for all substitutions of `from`, in `AMINO_ACIDS` order.
    pub fn row(&self, from: char) -> Result<&[u64; ALPHABET_SIZE], AlnError> {
        let i = aa_index(from).ok_or(AlnError::UnknownSymbol(from))?;
        Ok(&self.counts[i])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// All cells as `(from, to, count)`, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (char, char, u64)> + '_ {
        iproduct!(0..ALPHABET_SIZE, 0..ALPHABET_SIZE)
            .map(move |(i, j)| (AMINO_ACIDS[i], AMINO_ACIDS[j], self.counts[i][j]))
    }
}

/// Substitution counts between two aligned sequences. Residues are paired by position; if one
/// sequence is longer, its extra residues are ignored.
pub fn substitution_count(seq_1: &str, seq_2: &str) -> Result<SubstitutionMatrix, AlnError> {
    let mut matrix = SubstitutionMatrix::new();
    matrix.count_pairs(seq_1.chars().zip(seq_2.chars()))?;
    Ok(matrix)
}

/// Sum of `substitution_count(s1, s2)` over every `s1` in `seqs_1` and every `s2` in `seqs_2`.
pub fn substitution_matrix<A, B>(seqs_1: &[A], seqs_2: &[B]) -> Result<SubstitutionMatrix, AlnError>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    iproduct!(seqs_1, seqs_2)
        .map(|(s1, s2)| substitution_count(s1.as_ref(), s2.as_ref()))
        .sum()
}

impl AddAssign<&SubstitutionMatrix> for SubstitutionMatrix {
    fn add_assign(&mut self, other: &SubstitutionMatrix) {
        for (row, other_row) in self.counts.iter_mut().zip(other.counts.iter()) {
            for (cell, other_cell) in row.iter_mut().zip(other_row.iter()) {
                *cell += other_cell;
            }
        }
    }
}

impl AddAssign for SubstitutionMatrix {
    fn add_assign(&mut self, other: SubstitutionMatrix) {
        *self += &other;
    }
}

impl Add for SubstitutionMatrix {
    type Output = SubstitutionMatrix;

    fn add(mut self, other: SubstitutionMatrix) -> SubstitutionMatrix {
        self += &other;
        self
    }
}

impl Sum for SubstitutionMatrix {
    fn sum<I: Iterator<Item = SubstitutionMatrix>>(iter: I) -> Self {
        iter.fold(SubstitutionMatrix::new(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a SubstitutionMatrix> for SubstitutionMatrix {
    fn sum<I: Iterator<Item = &'a SubstitutionMatrix>>(iter: I) -> Self {
        iter.fold(SubstitutionMatrix::new(), |mut acc, m| {
            acc += m;
            acc
        })
    }
}

// Tab-separated, with a header row and a header column of amino acids.
impl fmt::Display for SubstitutionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for aa in AMINO_ACIDS {
            write!(f, "\t{}", aa)?;
        }
        writeln!(f)?;
        for (aa, row) in AMINO_ACIDS.iter().zip(self.counts.iter()) {
            write!(f, "{}", aa)?;
            for count in row {
                write!(f, "\t{}", count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct MatrixExport<'a> {
    alphabet: &'a [char; ALPHABET_SIZE],
    counts: &'a [[u64; ALPHABET_SIZE]; ALPHABET_SIZE],
}

impl Serialize for SubstitutionMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatrixExport {
            alphabet: &AMINO_ACIDS,
            counts: &self.counts,
        }
        .serialize(serializer)
    }
}
