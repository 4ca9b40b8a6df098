use super::{GridKey, GRID_SIDE};
use fastrand::Rng;

/// Swap two randomly chosen cells.
pub fn swap_cells(key: &mut GridKey, rng: &mut Rng) {
    let a = rng.usize(0..key.cells.len());
    let b = rng.usize(0..key.cells.len());
    key.cells.swap(a, b);
}

/// Swap two whole rows.
pub fn swap_rows(key: &mut GridKey, rng: &mut Rng) {
    let a = rng.usize(0..GRID_SIDE);
    let b = rng.usize(0..GRID_SIDE);
    for col in 0..GRID_SIDE {
        key.cells.swap(a * GRID_SIDE + col, b * GRID_SIDE + col);
    }
}

/// Swap two whole columns.
pub fn swap_cols(key: &mut GridKey, rng: &mut Rng) {
    let a = rng.usize(0..GRID_SIDE);
    let b = rng.usize(0..GRID_SIDE);
    for row in 0..GRID_SIDE {
        key.cells.swap(row * GRID_SIDE + a, row * GRID_SIDE + b);
    }
}

/// Reverse the column order (0<->4, 1<->3).
pub fn mirror_cols(key: &mut GridKey) {
    for row in 0..GRID_SIDE {
        key.cells.swap(row * GRID_SIDE, row * GRID_SIDE + 4);
        key.cells.swap(row * GRID_SIDE + 1, row * GRID_SIDE + 3);
    }
}

/// Reverse the row order (0<->4, 1<->3).
pub fn mirror_rows(key: &mut GridKey) {
    for col in 0..GRID_SIDE {
        key.cells.swap(col, 4 * GRID_SIDE + col);
        key.cells.swap(GRID_SIDE + col, 3 * GRID_SIDE + col);
    }
}

/// Apply exactly one mutation operator, in place.
///
/// One uniform draw from 50 outcomes: 5 of them are structural moves, the
/// other 45 a single cell swap. The heavy bias toward small moves keeps
/// the search hill-climb-like, with occasional large jumps to escape local
/// optima.
pub fn mutate(key: &mut GridKey, rng: &mut Rng) {
    match rng.usize(0..50) {
        0 => swap_rows(key, rng),
        1 => swap_cols(key, rng),
        2 => {
            mirror_cols(key);
            mirror_rows(key);
        }
        3 => mirror_cols(key),
        4 => mirror_rows(key),
        _ => swap_cells(key, rng),
    }
}
