use cipherforge::api::Algorithm;
use cipherforge::model::LanguageModel;
use cipherforge::playfair::{GridKey, GRID_SIDE};
use cipherforge::substitution::PermutationKey;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::time::Duration;

/// Render a recovered grid key as the 5x5 square it represents.
pub fn print_key_grid(key: &GridKey) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for row in key.as_bytes().chunks(GRID_SIDE) {
        table.add_row(
            row.iter()
                .map(|&b| Cell::new(b as char).set_alignment(CellAlignment::Center)),
        );
    }
    println!("{table}");
}

/// Render a recovered substitution key as cipher/plain alphabet rows.
pub fn print_permutation_key(key: &PermutationKey, model: &LanguageModel) {
    let cipher: String = model.alphabet().iter().map(|&b| b as char).collect();
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![Cell::new("cipher"), Cell::new(cipher)]);
    table.add_row(vec![
        Cell::new("plain"),
        Cell::new(key.to_alphabet_string(model)),
    ]);
    println!("{table}");
}

pub fn print_summary(algorithm: Algorithm, fitness: f64, elapsed: Duration) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["algorithm", "fitness", "elapsed"]);
    table.add_row(vec![
        Cell::new(algorithm),
        Cell::new(format!("{:.3}", fitness)).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.1?}", elapsed)).set_alignment(CellAlignment::Right),
    ]);
    println!("{table}");
}
