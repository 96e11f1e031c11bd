//! Human-readable table rendering of a dataset

use crate::dataset::Dataset;

/// Placeholder for a field the run did not log
const MISSING: &str = "-";

/// Render the dataset as a right-aligned table with a row index column
/// and a `N rows x M columns` footer.
pub fn render_table(dataset: &Dataset) -> String {
    let columns = dataset.column_names();
    let footer = format!(
        "[{} rows x {} columns]\n",
        dataset.row_count(),
        columns.len()
    );

    if dataset.is_empty() {
        return format!("No complete benchmark records.\n{}", footer);
    }

    let cells: Vec<Vec<String>> = dataset
        .rows()
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| {
                    record
                        .get(c)
                        .map_or_else(|| MISSING.to_string(), |v| v.to_string())
                })
                .collect()
        })
        .collect();

    let index_width = (dataset.row_count() - 1).to_string().len();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .max()
                .unwrap_or(0)
                .max(name.len())
        })
        .collect();

    let mut out = String::new();

    out.push_str(&" ".repeat(index_width));
    for (name, width) in columns.iter().zip(&widths) {
        out.push_str(&format!("  {:>width$}", name, width = *width));
    }
    out.push('\n');

    for (row, values) in cells.iter().enumerate() {
        out.push_str(&format!("{:<width$}", row, width = index_width));
        for (value, width) in values.iter().zip(&widths) {
            out.push_str(&format!("  {:>width$}", value, width = *width));
        }
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&footer);
    out
}
