use std::fmt::Write;

use crate::report::{ReportRow, format_score};

pub const SCORE_COLUMN_WIDTH: usize = 16;
pub const PATH_COLUMN_PADDING: usize = 4;

/// Left-justified fixed-width table: `Structure`, `Lattice`, `Basis`, `Weighted`.
///
/// The first column is `max_path_len + 4` wide; longer cells are never truncated.
pub fn render_table(rows: &[ReportRow], max_path_len: usize) -> String {
    let path_width = max_path_len + PATH_COLUMN_PADDING;
    let mut out = String::new();
    push_line(
        &mut out,
        path_width,
        ["Structure", "Lattice", "Basis", "Weighted"],
    );
    for row in rows {
        push_line(
            &mut out,
            path_width,
            [
                row.structure.as_str(),
                &format_score(row.lattice),
                &format_score(row.basis),
                &format_score(row.weighted),
            ],
        );
    }
    out
}

fn push_line(out: &mut String, path_width: usize, cells: [&str; 4]) {
    let _ = write!(out, "{:<path_width$}", cells[0]);
    for cell in &cells[1..] {
        let _ = write!(out, "{:<width$}", cell, width = SCORE_COLUMN_WIDTH);
    }
    out.push('\n');
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/table.rs"]
mod tests;
