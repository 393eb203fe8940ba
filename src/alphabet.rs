// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// The 20 standard amino acids, in one-letter-code alphabetical order. Substitution matrices are
// indexed in this order.

pub const AMINO_ACIDS: [char; 20] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
    'Y',
];

pub const ALPHABET_SIZE: usize = AMINO_ACIDS.len();

/// Index of `c` in `AMINO_ACIDS`, or None if `c` is not one of the 20 amino acids.
pub fn aa_index(c: char) -> Option<usize> {
    // B, J, O, U, X and Z are the only uppercase letters not in the alphabet.
    match c {
        'A' => Some(0),
        'C' => Some(1),
        'D' => Some(2),
        'E' => Some(3),
        'F' => Some(4),
        'G' => Some(5),
        'H' => Some(6),
        'I' => Some(7),
        'K' => Some(8),
        'L' => Some(9),
        'M' => Some(10),
        'N' => Some(11),
        'P' => Some(12),
        'Q' => Some(13),
        'R' => Some(14),
        'S' => Some(15),
        'T' => Some(16),
        'V' => Some(17),
        'W' => Some(18),
        'Y' => Some(19),
        _ => None,
    }
}
