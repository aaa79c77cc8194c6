use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::error::AnalysisError;
use crate::data::filter::FilteredDataset;
use crate::data::model::{CellValue, ColumnSchema, WellRecord};

// ---------------------------------------------------------------------------
// InterpolatedRow – the values at one requested depth
// ---------------------------------------------------------------------------

/// Values at a requested depth: either a copy of a sampled row or a linear
/// blend of the two rows bracketing the depth.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedRow {
    /// Always the requested depth.
    pub depth: f64,
    /// Only exact rows keep their lithology; categories are never blended.
    pub lithology: Option<String>,
    /// Columns other than depth and lithology. Blended rows hold numeric
    /// columns only.
    pub values: BTreeMap<String, CellValue>,
    pub was_interpolated: bool,
    schema: Arc<ColumnSchema>,
}

impl InterpolatedRow {
    fn exact(record: &WellRecord, depth: f64, schema: &Arc<ColumnSchema>) -> Self {
        InterpolatedRow {
            depth,
            lithology: record.lithology.clone(),
            values: record.values.clone(),
            was_interpolated: false,
            schema: Arc::clone(schema),
        }
    }

    /// Numeric value of `column`; the depth column resolves to `depth`.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        if column == self.schema.depth_column {
            return Some(self.depth);
        }
        self.values.get(column).and_then(CellValue::as_f64)
    }

    /// The row's cells in sheet column order.
    pub fn cells(&self) -> Vec<(String, CellValue)> {
        self.schema
            .columns
            .iter()
            .filter_map(|col| {
                let cell = if *col == self.schema.depth_column {
                    CellValue::Float(self.depth)
                } else if *col == self.schema.lithology_column {
                    CellValue::String(self.lithology.clone()?)
                } else {
                    self.values.get(col)?.clone()
                };
                Some((col.clone(), cell))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Depth interpolation
// ---------------------------------------------------------------------------

/// Values of `filtered` at `target` depth.
///
/// * `Ok(None)` – no data: empty selection, or `target` outside the sampled
///   depth range (there is no extrapolation).
/// * exact depth match – the first row at that depth, `was_interpolated = false`.
/// * otherwise – every numeric column blended linearly between the bracketing
///   rows, `was_interpolated = true`.
pub fn interpolate(
    filtered: &FilteredDataset,
    target: f64,
) -> Result<Option<InterpolatedRow>, AnalysisError> {
    let rows = filtered.depth_rows();
    let depths = filtered.depths();
    let (Some(&min), Some(&max)) = (depths.first(), depths.last()) else {
        return Ok(None);
    };
    if !target.is_finite() || target < min || target > max {
        return Ok(None);
    }

    let first_at_or_above = depths.partition_point(|&d| d < target);
    if depths.get(first_at_or_above) == Some(&target) {
        return Ok(Some(InterpolatedRow::exact(
            &rows[first_at_or_above],
            target,
            &filtered.schema,
        )));
    }

    // Rightmost insertion point: first row strictly deeper than the target.
    let upper = depths.partition_point(|&d| d <= target);
    if upper == 0 || upper >= depths.len() {
        return Ok(None);
    }
    let depth_upper = depths[upper];
    let depth_lower = depths[upper - 1];
    // Ties at the lower depth resolve to the first such row.
    let lower = depths.partition_point(|&d| d < depth_lower);

    let width = depth_upper - depth_lower;
    if !(width > 0.0) {
        return Err(AnalysisError::InvalidBracket { depth: target });
    }
    let weight_lower = (depth_upper - target) / width;
    let weight_upper = 1.0 - weight_lower;

    let schema = &filtered.schema;
    let values = schema
        .numeric_columns()
        .into_iter()
        .filter(|col| *col != schema.depth_column)
        .map(|col| {
            let lo = rows[lower].numeric(schema, &col).unwrap_or(f64::NAN);
            let hi = rows[upper].numeric(schema, &col).unwrap_or(f64::NAN);
            (col, CellValue::Float(lo * weight_lower + hi * weight_upper))
        })
        .collect();

    log::debug!(
        "Interpolated {target} m between {depth_lower} m (w={weight_lower:.4}) and {depth_upper} m"
    );

    Ok(Some(InterpolatedRow {
        depth: target,
        lithology: None,
        values,
        was_interpolated: true,
        schema: Arc::clone(schema),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::data::filter::filter_by_lithology;
    use crate::data::model::{Sheet, WellDataset};
    use proptest::prelude::*;

    const HEADERS: [&str; 5] = ["PROF (m)", "LITOLOGIA", "GR", "Obs", "UCS (psi)"];

    fn filtered(rows: &[(f64, f64, f64)]) -> FilteredDataset {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, &(d, gr, ucs))| {
                vec![
                    CellValue::Float(d),
                    CellValue::String("Arenito".into()),
                    CellValue::Float(gr),
                    CellValue::String(format!("row {i}")),
                    CellValue::Float(ucs),
                ]
            })
            .collect();
        let sheet = Sheet::new("A", HEADERS.iter().map(|h| h.to_string()).collect(), rows);
        let ds = WellDataset::from_sheet(&sheet, &AnalysisConfig::default()).unwrap();
        filter_by_lithology(&ds, "Arenito")
    }

    #[test]
    fn blends_between_brackets() {
        let f = filtered(&[(110.0, 20.0, 2000.0), (100.0, 10.0, 1000.0)]);
        let row = interpolate(&f, 103.0).unwrap().unwrap();
        assert!(row.was_interpolated);
        assert_eq!(row.depth, 103.0);
        assert!((row.numeric("GR").unwrap() - 13.0).abs() < 1e-12);
        assert!((row.numeric("UCS (psi)").unwrap() - 1300.0).abs() < 1e-9);
        assert_eq!(row.lithology, None);
        assert!(!row.values.contains_key("Obs"));
    }

    #[test]
    fn exact_match_returns_first_row_at_depth() {
        let f = filtered(&[(100.0, 10.0, 1.0), (105.0, 15.0, 2.0), (105.0, 99.0, 3.0), (110.0, 20.0, 4.0)]);
        let row = interpolate(&f, 105.0).unwrap().unwrap();
        assert!(!row.was_interpolated);
        assert_eq!(row.numeric("GR"), Some(15.0));
        assert_eq!(row.lithology.as_deref(), Some("Arenito"));
        assert_eq!(row.values.get("Obs"), Some(&CellValue::String("row 1".into())));
    }

    #[test]
    fn bounds_are_exact_matches() {
        let f = filtered(&[(100.0, 10.0, 1.0), (110.0, 20.0, 2.0)]);
        let top = interpolate(&f, 100.0).unwrap().unwrap();
        let bottom = interpolate(&f, 110.0).unwrap().unwrap();
        assert!(!top.was_interpolated && !bottom.was_interpolated);
        assert_eq!(top.numeric("GR"), Some(10.0));
        assert_eq!(bottom.numeric("GR"), Some(20.0));
    }

    #[test]
    fn out_of_range_and_empty_are_no_data() {
        let f = filtered(&[(100.0, 10.0, 1.0), (110.0, 20.0, 2.0)]);
        assert_eq!(interpolate(&f, 99.9).unwrap(), None);
        assert_eq!(interpolate(&f, 110.1).unwrap(), None);
        assert_eq!(interpolate(&f, f64::NAN).unwrap(), None);
        assert_eq!(interpolate(&filtered(&[]), 100.0).unwrap(), None);
    }

    #[test]
    fn lower_bracket_ties_use_first_row() {
        let f = filtered(&[(100.0, 10.0, 1.0), (100.0, 50.0, 1.0), (110.0, 20.0, 1.0)]);
        let row = interpolate(&f, 105.0).unwrap().unwrap();
        assert!((row.numeric("GR").unwrap() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn missing_values_propagate_as_nan() {
        let f = filtered(&[(100.0, f64::NAN, 1.0), (110.0, 20.0, 2.0)]);
        let row = interpolate(&f, 105.0).unwrap().unwrap();
        assert!(row.numeric("GR").unwrap().is_nan());
        assert!((row.numeric("UCS (psi)").unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn cells_follow_sheet_order() {
        let f = filtered(&[(100.0, 10.0, 1.0), (110.0, 20.0, 2.0)]);
        let exact: Vec<String> = interpolate(&f, 100.0).unwrap().unwrap().cells().into_iter().map(|(c, _)| c).collect();
        assert_eq!(exact, HEADERS.to_vec());
        let blended: Vec<String> = interpolate(&f, 101.0).unwrap().unwrap().cells().into_iter().map(|(c, _)| c).collect();
        assert_eq!(blended, vec!["PROF (m)", "GR", "UCS (psi)"]);
    }

    fn samples() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
        prop::collection::vec((0.0f64..5000.0, -1e4f64..1e4, 0.0f64..1e5), 2..40)
    }

    proptest! {
        #[test]
        fn in_range_targets_always_resolve(rows in samples(), t in 0.0f64..1.0) {
            let f = filtered(&rows);
            let depths = f.depths();
            let (min, max) = (depths[0], depths[depths.len() - 1]);
            let target = (min + (max - min) * t).min(max);
            let row = interpolate(&f, target).unwrap().unwrap();
            prop_assert_eq!(row.depth, target);
            prop_assert_eq!(interpolate(&f, target).unwrap().unwrap(), row);
        }

        #[test]
        fn sampled_depths_match_exactly(rows in samples(), pick in any::<prop::sample::Index>()) {
            let f = filtered(&rows);
            let depths = f.depths();
            let target = depths[pick.index(depths.len())];
            let row = interpolate(&f, target).unwrap().unwrap();
            let first = depths.iter().position(|&d| d == target).unwrap();
            prop_assert!(!row.was_interpolated);
            prop_assert_eq!(row.numeric("GR"), f.depth_rows()[first].numeric(&f.schema, "GR"));
        }

        #[test]
        fn blended_values_stay_between_brackets(rows in samples(), t in 0.0f64..1.0) {
            let f = filtered(&rows);
            let depths = f.depths();
            let max = depths[depths.len() - 1];
            let target = (depths[0] + (max - depths[0]) * t).min(max);
            let row = interpolate(&f, target).unwrap().unwrap();
            if row.was_interpolated {
                let upper = depths.partition_point(|&d| d <= target);
                let lower = depths.partition_point(|&d| d < depths[upper - 1]);
                for col in ["GR", "UCS (psi)"] {
                    let a = f.depth_rows()[lower].numeric(&f.schema, col).unwrap();
                    let b = f.depth_rows()[upper].numeric(&f.schema, col).unwrap();
                    let v = row.numeric(col).unwrap();
                    let tol = 1e-9 * (1.0 + a.abs().max(b.abs()));
                    prop_assert!(v >= a.min(b) - tol && v <= a.max(b) + tol);
                }
            }
        }

        #[test]
        fn outside_range_is_no_data(rows in samples(), gap in 0.001f64..100.0) {
            let f = filtered(&rows);
            let depths = f.depths();
            prop_assert_eq!(interpolate(&f, depths[0] - gap).unwrap(), None);
            prop_assert_eq!(interpolate(&f, depths[depths.len() - 1] + gap).unwrap(), None);
        }
    }
}
