pub mod playfair;
pub mod score;
pub mod substitution;

use cipherforge::{CfResult, CipherForgeError};
use std::path::PathBuf;

/// Every subcommand takes its input either inline or from a file.
pub fn read_input(text: &Option<String>, file: &Option<PathBuf>) -> CfResult<String> {
    match (text, file) {
        (Some(t), _) => Ok(t.clone()),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) => Err(CipherForgeError::Validation(
            "specify either --text or --file".into(),
        )),
    }
}
