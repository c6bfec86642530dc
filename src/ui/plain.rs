//! Plain-text rendering of a grid, for `--print` and logs.

use crate::grid::{GridBody, HeaderCell, RenderedGrid};

fn header_text(cell: &HeaderCell) -> String {
    match cell.direction {
        Some(direction) => format!("{} {}", cell.label, direction.arrow()),
        None => cell.label.clone(),
    }
}

/// Render a grid as aligned text columns with a row count footer.
pub fn render<Id: Clone>(grid: &RenderedGrid<Id>) -> String {
    let header: Vec<String> = grid.header.iter().map(header_text).collect();

    let rows: Vec<Vec<&str>> = grid
        .rows()
        .iter()
        .map(|row| row.cells.iter().map(|c| c.text()).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, header.iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);

    match &grid.body {
        GridBody::Empty { message } => {
            out.push_str(message);
            out.push('\n');
        }
        GridBody::Rows(_) => {
            for row in &rows {
                push_line(&mut out, row.iter().copied(), &widths);
            }
        }
    }

    let shown = rows.len();
    if shown == grid.total_rows {
        out.push_str(&format!("({} rows)\n", shown));
    } else {
        out.push_str(&format!("({} of {} rows)\n", shown, grid.total_rows));
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
