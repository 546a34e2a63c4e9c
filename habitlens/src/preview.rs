//! Tabular preview of the first rows of a dataset.

use habitlens_core::{weekday_name, Column, Dataset, DerivedRecord};

/// Text of one cell; empty for absent values.
fn cell(row: &DerivedRecord, column: Column) -> String {
    match column {
        Column::Date => row
            .record
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Column::WakeUpTime => row.record.wake_time.clone().unwrap_or_default(),
        Column::Weekday => row.weekday.map(weekday_name).unwrap_or_default().to_string(),
        numeric => row.numeric(numeric).map(|v| v.to_string()).unwrap_or_default(),
    }
}

/// Render up to `limit` rows as a left-aligned table, one line per row.
pub fn render(dataset: &Dataset, limit: usize) -> Vec<String> {
    let rows: Vec<Vec<String>> = dataset
        .records
        .iter()
        .take(limit)
        .map(|row| dataset.columns.iter().map(|c| cell(row, *c)).collect())
        .collect();

    let widths: Vec<usize> = dataset
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .max()
                .unwrap_or(0)
                .max(c.header().len())
        })
        .collect();

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(text, width)| format!("{:<width$}", text, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(
        dataset.columns.iter().map(|c| c.header().to_string()).collect(),
    )];
    lines.extend(rows.into_iter().map(line));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitlens_core::ingest::load_bytes;

    #[test]
    fn test_preview_columns_and_gaps() {
        let dataset = load_bytes(b"Date,Steps\n2024-01-01,1200\n2024-01-02,\n2024-01-03,900\n").unwrap();
        let lines = render(&dataset, 2);

        assert_eq!(
            lines,
            vec![
                "Date        Steps  Weekday",
                "2024-01-01  1200   Monday",
                "2024-01-02         Tuesday",
            ]
        );
    }
}
