//! Computed category orders.

use super::config::TieBreak;
use crate::parser::LongRecord;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Row keys sorted by the ascending mean of their values
///
/// **Public** - the heatmap's category axis order
///
/// Each row's values are summed in sorted order, so the mean (and with
/// [`TieBreak::LabelAscending`] or [`TieBreak::LabelDescending`], the whole
/// order) does not depend on the order of `records`.
pub fn rows_by_ascending_mean(records: &[LongRecord], tie_break: TieBreak) -> Vec<String> {
    let mut rows: IndexMap<&str, Vec<f64>> = IndexMap::new();
    for record in records {
        rows.entry(record.row_key.as_str()).or_default().push(record.value);
    }

    let mut means: Vec<(usize, &str, f64)> = rows
        .into_iter()
        .enumerate()
        .map(|(position, (row, mut values))| {
            values.sort_by(f64::total_cmp);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            (position, row, mean)
        })
        .collect();

    means.sort_by(|(pos_a, row_a, mean_a), (pos_b, row_b, mean_b)| {
        mean_a
            .total_cmp(mean_b)
            .then_with(|| break_tie(tie_break, (*pos_a, *row_a), (*pos_b, *row_b)))
    });

    means.into_iter().map(|(_, row, _)| row.to_string()).collect()
}

fn break_tie(tie_break: TieBreak, a: (usize, &str), b: (usize, &str)) -> Ordering {
    match tie_break {
        TieBreak::LabelAscending => a.1.cmp(b.1),
        TieBreak::LabelDescending => b.1.cmp(a.1),
        TieBreak::SourceOrder => a.0.cmp(&b.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row: &str, column: &str, value: f64) -> LongRecord {
        LongRecord {
            row_key: row.to_string(),
            column_key: column.to_string(),
            value,
        }
    }

    #[test]
    fn test_sorted_by_mean() {
        let records = vec![
            record("Ethics", "A", 0.09),
            record("Ethics", "B", 0.07),
            record("Logic", "A", 0.01),
            record("Mind", "A", 0.05),
        ];

        assert_eq!(
            rows_by_ascending_mean(&records, TieBreak::LabelAscending),
            vec!["Logic", "Mind", "Ethics"]
        );
    }

    #[test]
    fn test_tie_breaks() {
        let records = vec![record("B", "x", 0.5), record("A", "x", 0.5)];

        assert_eq!(rows_by_ascending_mean(&records, TieBreak::LabelAscending), vec!["A", "B"]);
        assert_eq!(rows_by_ascending_mean(&records, TieBreak::LabelDescending), vec!["B", "A"]);
        assert_eq!(rows_by_ascending_mean(&records, TieBreak::SourceOrder), vec!["B", "A"]);
    }
}
