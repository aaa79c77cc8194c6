use std::cmp::Ordering;
use std::sync::Arc;

use super::error::AnalysisError;
use super::model::{ColumnSchema, WellDataset, WellRecord};

// ---------------------------------------------------------------------------
// FilteredDataset – rows of one lithology, sorted by depth
// ---------------------------------------------------------------------------

/// Rows matching a single lithology, stable-sorted ascending by depth.
///
/// Rows without a depth are kept at the tail so they still count towards
/// column statistics; `depth_rows()` exposes the sorted, depth-bearing prefix.
#[derive(Debug, Clone)]
pub struct FilteredDataset {
    pub area: String,
    pub lithology: String,
    pub schema: Arc<ColumnSchema>,
    pub records: Vec<WellRecord>,
    depth_count: usize,
}

impl FilteredDataset {
    pub fn new(
        area: impl Into<String>,
        lithology: impl Into<String>,
        schema: Arc<ColumnSchema>,
        mut records: Vec<WellRecord>,
    ) -> Self {
        // `sort_by` is stable, so equal depths keep their sheet order.
        records.sort_by(|a, b| match (a.depth, b.depth) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        let depth_count = records.iter().take_while(|r| r.depth.is_some()).count();
        FilteredDataset {
            area: area.into(),
            lithology: lithology.into(),
            schema,
            records,
            depth_count,
        }
    }

    /// Rows that carry a depth, ascending.
    pub fn depth_rows(&self) -> &[WellRecord] {
        &self.records[..self.depth_count]
    }

    /// Depths of `depth_rows()`, ascending.
    pub fn depths(&self) -> Vec<f64> {
        self.depth_rows().iter().filter_map(|r| r.depth).collect()
    }

    /// Non-missing values of a numeric column, in depth order.
    pub fn numeric_series(&self, column: &str) -> Vec<f64> {
        if !self.schema.is_numeric(column) {
            return Vec::new();
        }
        self.records
            .iter()
            .filter_map(|r| r.numeric(&self.schema, column))
            .filter(|v| !v.is_nan())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// Lithology selection
// ---------------------------------------------------------------------------

/// Distinct lithology values in first-seen order.
pub fn lithologies(dataset: &WellDataset) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for lith in dataset.records.iter().filter_map(|r| r.lithology.as_ref()) {
        if !out.contains(lith) {
            out.push(lith.clone());
        }
    }
    out
}

/// Rows whose lithology equals `lithology`, sorted by depth.
pub fn filter_by_lithology(dataset: &WellDataset, lithology: &str) -> FilteredDataset {
    let records = dataset
        .records
        .iter()
        .filter(|r| r.lithology.as_deref() == Some(lithology))
        .cloned()
        .collect();
    FilteredDataset::new(&dataset.name, lithology, Arc::clone(&dataset.schema), records)
}

/// Minimum and maximum depth of the filtered rows.
pub fn depth_range(filtered: &FilteredDataset) -> Result<(f64, f64), AnalysisError> {
    let rows = filtered.depth_rows();
    match (rows.first().and_then(|r| r.depth), rows.last().and_then(|r| r.depth)) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(AnalysisError::EmptyDataset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::data::model::{CellValue, Sheet};

    fn sheet() -> Sheet {
        let row = |d: CellValue, l: &str, gr: f64| {
            vec![d, CellValue::String(l.to_string()), CellValue::Float(gr)]
        };
        Sheet::new(
            "Area 1",
            vec!["PROF (m)".into(), "LITOLOGIA".into(), "GR".into()],
            vec![
                row(CellValue::Float(120.0), "Arenito", 1.0),
                row(CellValue::Float(100.0), "Folhelho", 2.0),
                row(CellValue::Null, "Arenito", 3.0),
                row(CellValue::Float(100.0), "Arenito", 4.0),
                row(CellValue::Float(100.0), "Arenito", 5.0),
                row(CellValue::Float(90.0), "Calcario", 6.0),
            ],
        )
    }

    fn dataset() -> WellDataset {
        WellDataset::from_sheet(&sheet(), &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn lithologies_in_first_seen_order() {
        assert_eq!(lithologies(&dataset()), vec!["Arenito", "Folhelho", "Calcario"]);
    }

    #[test]
    fn filter_sorts_stably_and_keeps_missing_depth_last() {
        let f = filter_by_lithology(&dataset(), "Arenito");
        let gr: Vec<f64> = f.records.iter().map(|r| r.numeric(&f.schema, "GR").unwrap()).collect();
        assert_eq!(gr, vec![4.0, 5.0, 1.0, 3.0]);
        assert_eq!(f.depth_rows().len(), 3);
        assert_eq!(f.area, "Area 1");
    }

    #[test]
    fn depth_range_ignores_missing_depths() {
        let f = filter_by_lithology(&dataset(), "Arenito");
        assert_eq!(depth_range(&f).unwrap(), (100.0, 120.0));
    }

    #[test]
    fn depth_range_of_no_match_is_empty_dataset() {
        let f = filter_by_lithology(&dataset(), "Granito");
        assert!(f.records.is_empty());
        assert_eq!(depth_range(&f).unwrap_err(), AnalysisError::EmptyDataset);
    }

    #[test]
    fn unvalidated_sheet_reports_missing_column() {
        let bad = Sheet::new("B", vec!["PROF (m)".into(), "GR".into()], vec![]);
        let err = WellDataset::from_sheet(&bad, &AnalysisConfig::default()).unwrap_err();
        assert_eq!(err, AnalysisError::MissingColumn("LITOLOGIA".into()));
    }

    #[test]
    fn numeric_series_skips_missing_values() {
        let f = filter_by_lithology(&dataset(), "Arenito");
        assert_eq!(f.numeric_series("PROF (m)"), vec![100.0, 100.0, 120.0]);
        assert_eq!(f.numeric_series("LITOLOGIA"), Vec::<f64>::new());
    }
}
