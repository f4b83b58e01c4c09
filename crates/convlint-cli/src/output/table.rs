//! Aligned plain-text tables.

const COLORED_COLUMNS: [&str; 2] = ["severity", "outcome"];

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Column alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Render rows under `headers`, two spaces between columns.
///
/// Cells in `align` order; missing cells render as `-`. When `max_width` is
/// set, the widest columns shrink (never below their header) and overflowing
/// cells are truncated with `…`. With `color`, only the `severity` and
/// `outcome` columns are colored.
#[must_use]
pub fn render_table(
    headers: &[&str],
    align: &[Align],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();
    shrink_to_fit(&mut widths, headers, options.max_width);
    let colored: Vec<bool> = headers
        .iter()
        .map(|header| options.color && COLORED_COLUMNS.contains(header))
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    lines.push(render_row(&header_cells, &widths, align, &[]));
    lines.push("-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2));
    for row in rows {
        lines.push(render_row(row, &widths, align, &colored));
    }
    lines.join("\n")
}

fn render_row(row: &[String], widths: &[usize], align: &[Align], colored: &[bool]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(index, &width)| {
            let text = truncate_text(row.get(index).map_or("-", String::as_str), width);
            let pad = " ".repeat(width.saturating_sub(text.chars().count()));
            let shown = if colored.get(index).copied().unwrap_or(false) {
                colorize_outcome(&text)
            } else {
                text
            };
            match align.get(index).copied().unwrap_or(Align::Left) {
                Align::Left => format!("{shown}{pad}"),
                Align::Right => format!("{pad}{shown}"),
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|&(index, &width)| width > headers[index].len().max(6))
            .max_by_key(|&(_, &width)| width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Color whole cells that are an outcome or severity word.
fn colorize_outcome(value: &str) -> String {
    let code = match value {
        "pass" => "32",
        "warn" | "warning" => "33",
        "fail" | "blocking" => "31",
        _ => return value.to_string(),
    };
    format!("\u{1b}[{code}m{value}\u{1b}[0m")
}
