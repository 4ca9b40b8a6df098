pub mod anneal;
pub mod mutation;

use crate::model::LanguageModel;
use crate::{CfResult, CipherForgeError};
use std::fmt;

pub const GRID_SIDE: usize = 5;
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

/// Historical merge: J shares a cell with I on the 5x5 grid.
pub const MERGED_LETTER: u8 = b'J';
pub const MERGE_TARGET: u8 = b'I';

/// Default padding symbol inserted between doubled letters at encryption
/// time and stripped back out after decryption.
pub const DEFAULT_FILLER: u8 = b'X';

/// A 5x5 grid key: a permutation of the 25-symbol grid alphabet, row-major.
/// Mutation operators must never duplicate or drop a symbol.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GridKey {
    pub(crate) cells: [u8; GRID_CELLS],
}

impl GridKey {
    /// Key in natural alphabet order; the annealer's starting point.
    pub fn identity(alphabet: &[u8; GRID_CELLS]) -> Self {
        Self { cells: *alphabet }
    }

    pub fn from_symbols(symbols: &[u8]) -> CfResult<Self> {
        if symbols.len() != GRID_CELLS {
            return Err(CipherForgeError::Validation(format!(
                "grid key needs {} symbols, got {}",
                GRID_CELLS,
                symbols.len()
            )));
        }
        let mut cells = [0u8; GRID_CELLS];
        cells.copy_from_slice(symbols);
        for b in cells.iter_mut() {
            *b = b.to_ascii_uppercase();
        }
        let key = Self { cells };
        if !key.is_permutation() {
            return Err(CipherForgeError::InvariantViolation(
                "grid key contains duplicate symbols".into(),
            ));
        }
        Ok(key)
    }

    pub fn as_bytes(&self) -> &[u8; GRID_CELLS] {
        &self.cells
    }

    /// Symbol -> cell index lookup.
    pub fn position_map(&self) -> [u8; 256] {
        let mut map = [255u8; 256];
        for (i, &b) in self.cells.iter().enumerate() {
            map[b as usize] = i as u8;
        }
        map
    }

    /// True when every cell holds a distinct symbol.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; 256];
        for &b in &self.cells {
            if seen[b as usize] {
                return false;
            }
            seen[b as usize] = true;
        }
        true
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.cells))
    }
}

impl fmt::Debug for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GridKey({})", self)
    }
}

/// Derive the 25-symbol grid alphabet from a model alphabet by collapsing
/// the merged letter. A model that cannot collapse to exactly 25 symbols
/// cannot drive this cipher.
pub fn grid_alphabet(model: &LanguageModel) -> CfResult<[u8; GRID_CELLS]> {
    let reduced: Vec<u8> = model
        .alphabet()
        .iter()
        .copied()
        .filter(|&b| b != MERGED_LETTER)
        .collect();
    if reduced.len() != GRID_CELLS {
        return Err(CipherForgeError::Config(format!(
            "digraph cipher needs a {}-symbol grid alphabet, model collapses to {}",
            GRID_CELLS,
            reduced.len()
        )));
    }
    let mut alphabet = [0u8; GRID_CELLS];
    alphabet.copy_from_slice(&reduced);
    Ok(alphabet)
}

/// Uppercase, merge J into I, keep only grid-alphabet symbols. Digraph
/// text must pair up, so an odd survivor count is rejected.
pub fn normalize(alphabet: &[u8; GRID_CELLS], text: &str) -> CfResult<Vec<u8>> {
    let mut member = [false; 256];
    for &b in alphabet {
        member[b as usize] = true;
    }

    let mut out = Vec::with_capacity(text.len());
    for b in text.bytes() {
        let mut upper = b.to_ascii_uppercase();
        if upper == MERGED_LETTER {
            upper = MERGE_TARGET;
        }
        if member[upper as usize] {
            out.push(upper);
        }
    }

    if out.len() % 2 != 0 {
        return Err(CipherForgeError::Validation(format!(
            "digraph ciphertext must pair up, got {} symbols",
            out.len()
        )));
    }
    Ok(out)
}

/// Decode rule per ciphertext pair: same column steps one row up, same row
/// steps one column left, otherwise each symbol keeps its row and takes
/// the other's column.
pub fn decrypt_pairs(key: &GridKey, ciphertext: &[u8]) -> Vec<u8> {
    debug_assert!(ciphertext.len() % 2 == 0);
    let pos = key.position_map();
    let mut out = Vec::with_capacity(ciphertext.len());

    for pair in ciphertext.chunks_exact(2) {
        let a = pos[pair[0] as usize] as usize;
        let b = pos[pair[1] as usize] as usize;
        let (row_a, col_a) = (a / GRID_SIDE, a % GRID_SIDE);
        let (row_b, col_b) = (b / GRID_SIDE, b % GRID_SIDE);

        if col_a == col_b {
            out.push(key.cells[(row_a + GRID_SIDE - 1) % GRID_SIDE * GRID_SIDE + col_a]);
            out.push(key.cells[(row_b + GRID_SIDE - 1) % GRID_SIDE * GRID_SIDE + col_b]);
        } else if row_a == row_b {
            out.push(key.cells[row_a * GRID_SIDE + (col_a + GRID_SIDE - 1) % GRID_SIDE]);
            out.push(key.cells[row_b * GRID_SIDE + (col_b + GRID_SIDE - 1) % GRID_SIDE]);
        } else {
            out.push(key.cells[row_a * GRID_SIDE + col_b]);
            out.push(key.cells[row_b * GRID_SIDE + col_a]);
        }
    }
    out
}

/// Drop the filler wherever it sits strictly between two identical
/// neighbors. First and last positions never qualify.
pub fn strip_filler(text: &[u8], filler: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for (i, &b) in text.iter().enumerate() {
        if b == filler && i > 0 && i + 1 < text.len() && text[i - 1] == text[i + 1] {
            continue;
        }
        out.push(b);
    }
    out
}

/// Full decryption: decode every pair, then remove padding artifacts.
pub fn decrypt(key: &GridKey, ciphertext: &[u8], filler: u8) -> String {
    let decoded = decrypt_pairs(key, ciphertext);
    let stripped = strip_filler(&decoded, filler);
    String::from_utf8_lossy(&stripped).into_owned()
}

/// Encrypt plaintext under a grid key. Digram preparation inserts the
/// filler between digram-aligned doubled letters and pads odd-length text.
pub fn encrypt(key: &GridKey, plaintext: &str, filler: u8) -> CfResult<String> {
    let mut member = [false; 256];
    for &b in &key.cells {
        member[b as usize] = true;
    }

    let mut symbols = Vec::with_capacity(plaintext.len() + 1);
    for b in plaintext.bytes() {
        let mut upper = b.to_ascii_uppercase();
        if upper == MERGED_LETTER {
            upper = MERGE_TARGET;
        }
        if member[upper as usize] {
            symbols.push(upper);
        }
    }

    // Break up doubled digrams, then pad to even length.
    let mut idx = 0;
    while idx < symbols.len() {
        if idx + 1 < symbols.len() && symbols[idx] == symbols[idx + 1] {
            symbols.insert(idx + 1, filler);
        }
        idx += 2;
    }
    if symbols.len() % 2 != 0 {
        symbols.push(filler);
    }
    if symbols.is_empty() {
        return Err(CipherForgeError::Validation(
            "no encryptable symbols in plaintext".into(),
        ));
    }

    let pos = key.position_map();
    let mut out = Vec::with_capacity(symbols.len());
    for pair in symbols.chunks_exact(2) {
        let a = pos[pair[0] as usize] as usize;
        let b = pos[pair[1] as usize] as usize;
        let (row_a, col_a) = (a / GRID_SIDE, a % GRID_SIDE);
        let (row_b, col_b) = (b / GRID_SIDE, b % GRID_SIDE);

        if col_a == col_b {
            out.push(key.cells[(row_a + 1) % GRID_SIDE * GRID_SIDE + col_a]);
            out.push(key.cells[(row_b + 1) % GRID_SIDE * GRID_SIDE + col_b]);
        } else if row_a == row_b {
            out.push(key.cells[row_a * GRID_SIDE + (col_a + 1) % GRID_SIDE]);
            out.push(key.cells[row_b * GRID_SIDE + (col_b + 1) % GRID_SIDE]);
        } else {
            out.push(key.cells[row_a * GRID_SIDE + col_b]);
            out.push(key.cells[row_b * GRID_SIDE + col_a]);
        }
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}
