//! Text rendering of the board

use rustc_hash::FxHashMap;

use crate::board::{Board, ROW_LENGTHS};
use crate::cell::CellId;

/// Selection labels, in order (no `0`, `I` or `O` to avoid look-alikes)
pub const LABELS: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Map the first `LABELS.len()` cells to labels `1`, `2`, ...
pub fn label_cells(cells: &[CellId]) -> FxHashMap<CellId, char> {
    cells.iter().copied().zip(LABELS.chars()).collect()
}

/// Index of `label` in [`LABELS`], case-insensitive
pub fn label_index(label: char) -> Option<usize> {
    let upper = label.to_ascii_uppercase();
    LABELS.chars().position(|c| c == upper)
}

/// Board diagram, one line per row, rows centred on the widest
///
/// Cells in `overlay` show their label instead of their glyph.
pub fn render_board(board: &Board, overlay: &FxHashMap<CellId, char>) -> String {
    let width = ROW_LENGTHS.iter().copied().max().unwrap_or(0);
    let mut out = String::new();

    for row in board.rows() {
        out.push_str(&" ".repeat(width - row.len()));
        for cell in row {
            let glyph = overlay.get(&cell).copied().unwrap_or_else(|| board.cell(cell).glyph());
            out.push(glyph);
            out.push(' ');
        }
        // Trailing separator is part of the cell, not the layout
        out.truncate(out.trim_end().len());
        out.push('\n');
    }

    out
}
