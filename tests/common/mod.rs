#![allow(dead_code)]

use cipherforge::model::LanguageModel;

/// Pack symbol ranks into a score-table index (5 bits per symbol,
/// big-endian).
pub fn pack(ranks: &[u8]) -> u32 {
    ranks.iter().fold(0u32, |acc, &r| (acc << 5) | r as u32)
}

/// Model whose score table is zero except for the given entries.
pub fn model_with_entries(alphabet: &str, order: usize, entries: &[(u32, i32)]) -> LanguageModel {
    let mut table = vec![0i32; 1usize << (5 * order)];
    for &(idx, val) in entries {
        table[idx as usize] = val;
    }
    LanguageModel::from_parts(alphabet, order, table).expect("valid model")
}

/// Model that assigns the same score to every n-gram.
pub fn uniform_model(alphabet: &str, order: usize, value: i32) -> LanguageModel {
    LanguageModel::from_parts(alphabet, order, vec![value; 1usize << (5 * order)])
        .expect("valid model")
}

pub const AZ: &str = "abcdefghijklmnopqrstuvwxyz";
