use crate::data::filter::FilteredDataset;

/// Column-wise arithmetic mean of every numeric column, in sheet order.
///
/// Missing cells are skipped; a column with no values yields NaN.
pub fn mean_by_column(filtered: &FilteredDataset) -> Vec<(String, f64)> {
    filtered
        .schema
        .numeric_columns()
        .into_iter()
        .map(|col| {
            let (sum, n) = filtered
                .records
                .iter()
                .filter_map(|r| r.numeric(&filtered.schema, &col))
                .filter(|v| !v.is_nan())
                .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            let mean = if n == 0 { f64::NAN } else { sum / n as f64 };
            (col, mean)
        })
        .collect()
}
