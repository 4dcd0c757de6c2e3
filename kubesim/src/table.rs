/// Padding added to the widest cell of every column.
pub const COLUMN_PADDING: usize = 2;

/// Render rows as a left-aligned text table with a dashed rule under the header.
///
/// Each column is as wide as its widest cell (header included) plus
/// [`COLUMN_PADDING`], measured in characters. Columns are joined by one space.
pub fn render_table<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.as_ref().chars().count())
                .fold(header.chars().count(), usize::max)
                + COLUMN_PADDING
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&widths, headers));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(width - 1))
            .collect::<Vec<_>>()
            .join(" "),
    );
    lines.extend(rows.iter().map(|row| format_row(&widths, row)));
    lines.join("\n")
}

fn format_row<S: AsRef<str>>(widths: &[usize], cells: &[S]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(column, width)| {
            let cell = cells.get(column).map_or("", |cell| cell.as_ref());
            format!("{:<width$}", cell, width = width)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
