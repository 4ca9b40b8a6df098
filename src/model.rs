use crate::{CfResult, CipherForgeError};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Symbols are packed into 5 bits each, which caps the alphabet at 32.
pub const MAX_ALPHABET: usize = 32;

/// Longest n-gram whose packed index fits the `u32` window (6 * 5 bits).
pub const MAX_ORDER: usize = 6;

const SYMBOL_BITS: u32 = 5;

/// On-disk shape of a language model (see `LanguageModel::from_reader`).
#[derive(Debug, Deserialize)]
struct ModelFile {
    alphabet: String,
    ngram_length: usize,
    ngrams: Vec<i32>,
}

/// Immutable n-gram statistics for one language. Built once per crack
/// session; read-only afterwards.
///
/// The score table is flat and dense: an n-gram's address is the big-endian
/// concatenation of its symbol ranks at 5 bits each, so the table spans the
/// full `32^order` address space regardless of alphabet size. Entries are
/// log-likelihoods scaled by 10 so they can be stored as integers.
pub struct LanguageModel {
    alphabet: Vec<u8>,
    order: usize,
    table: Vec<i32>,
    /// `(order - 1) * 5` one-bits; masks stale symbols out of the window.
    mask: u32,
    /// Byte -> rank lookup, case-insensitive. 255 = not in alphabet.
    ranks: [u8; 256],
}

impl LanguageModel {
    pub fn from_parts(alphabet: &str, order: usize, table: Vec<i32>) -> CfResult<Self> {
        if alphabet.is_empty() {
            return Err(CipherForgeError::Config(
                "language model alphabet is empty".into(),
            ));
        }
        if !alphabet.is_ascii() {
            return Err(CipherForgeError::Config(
                "language model alphabet must be ASCII".into(),
            ));
        }
        if alphabet.len() > MAX_ALPHABET {
            return Err(CipherForgeError::Config(format!(
                "alphabet has {} symbols, maximum is {}",
                alphabet.len(),
                MAX_ALPHABET
            )));
        }
        if !(2..=MAX_ORDER).contains(&order) {
            return Err(CipherForgeError::Config(format!(
                "n-gram order must be between 2 and {}, got {}",
                MAX_ORDER, order
            )));
        }

        let expected = 1usize << (SYMBOL_BITS as usize * order);
        if table.len() != expected {
            return Err(CipherForgeError::Config(format!(
                "score table has {} entries, expected 32^{} = {}",
                table.len(),
                order,
                expected
            )));
        }

        let mut ranks = [255u8; 256];
        let mut symbols = Vec::with_capacity(alphabet.len());
        for ch in alphabet.bytes() {
            let upper = ch.to_ascii_uppercase();
            if ranks[upper as usize] != 255 {
                return Err(CipherForgeError::Config(format!(
                    "alphabet symbol '{}' appears more than once",
                    upper as char
                )));
            }
            let rank = symbols.len() as u8;
            ranks[upper as usize] = rank;
            ranks[upper.to_ascii_lowercase() as usize] = rank;
            symbols.push(upper);
        }

        let mut mask = 0u32;
        for _ in 0..(order - 1) as u32 * SYMBOL_BITS {
            mask = (mask << 1) | 1;
        }

        debug!(
            alphabet = %String::from_utf8_lossy(&symbols),
            order,
            entries = table.len(),
            "language model validated"
        );

        Ok(Self {
            alphabet: symbols,
            order,
            table,
            mask,
            ranks,
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> CfResult<Self> {
        let raw: ModelFile = serde_json::from_reader(reader)?;
        Self::from_parts(&raw.alphabet, raw.ngram_length, raw.ngrams)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading language model");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Uppercased alphabet, in rank order.
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn alphabet_len(&self) -> usize {
        self.alphabet.len()
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn window_mask(&self) -> u32 {
        self.mask
    }

    /// Rank of a symbol, case-insensitive. `None` when outside the alphabet.
    #[inline(always)]
    pub fn rank_of(&self, byte: u8) -> Option<u8> {
        match self.ranks[byte as usize] {
            255 => None,
            r => Some(r),
        }
    }

    #[inline(always)]
    pub fn symbol_at(&self, rank: u8) -> u8 {
        self.alphabet[rank as usize]
    }

    /// Table lookup by packed window index. Out-of-range indices are a
    /// caller bug, not a model defect.
    #[inline(always)]
    pub fn score_entry(&self, index: u32) -> i32 {
        self.table[index as usize]
    }
}
