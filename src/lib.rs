// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

//! Reads aln files (lines of `<id> <residues> <end position>`, mixed with any amount of other
//! text) into a position x sequence [`Alignment`], and counts amino-acid substitutions between
//! aligned sequences into [`SubstitutionMatrix`] tables.

pub mod alignment;
pub mod alphabet;
pub mod config;
pub mod errors;
pub mod seq;
pub mod substitution;

pub use crate::alignment::Alignment;
pub use crate::alphabet::AMINO_ACIDS;
pub use crate::config::{AssemblyConfig, OverlapPolicy};
pub use crate::errors::AlnError;
pub use crate::seq::aln::scan_aln_line;
pub use crate::seq::record::AlnRecord;
pub use crate::substitution::{substitution_count, substitution_matrix, SubstitutionMatrix};
