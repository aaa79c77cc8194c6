use super::interpolate::InterpolatedRow;
use super::pressure::PressureBand;
use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// ResultTable – display-ready tables for the presentation layer
// ---------------------------------------------------------------------------

/// A small table of pre-formatted cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    fn single_row(cells: Vec<(String, String)>) -> Self {
        let (columns, row): (Vec<String>, Vec<String>) = cells.into_iter().unzip();
        ResultTable {
            columns,
            rows: vec![row],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn format_number(value: f64, decimals: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    format!("{:.*}", decimals as usize, round_to(value, decimals))
}

fn format_cell(cell: &CellValue, decimals: u32) -> String {
    match cell {
        CellValue::Float(v) => format_number(*v, decimals),
        other => other.to_string(),
    }
}

/// One-row table of column means.
pub fn mean_table(means: &[(String, f64)], decimals: u32) -> ResultTable {
    ResultTable::single_row(
        means
            .iter()
            .map(|(col, v)| (col.clone(), format_number(*v, decimals)))
            .collect(),
    )
}

/// Every column of an exact or interpolated row.
pub fn row_table(row: &InterpolatedRow, decimals: u32) -> ResultTable {
    ResultTable::single_row(
        row.cells()
            .into_iter()
            .map(|(col, cell)| {
                let text = format_cell(&cell, decimals);
                (col, text)
            })
            .collect(),
    )
}

/// The row restricted to `whitelist` columns, in whitelist order.
pub fn summary_table(row: &InterpolatedRow, whitelist: &[String], decimals: u32) -> ResultTable {
    let cells = row.cells();
    ResultTable::single_row(
        whitelist
            .iter()
            .filter_map(|wanted| {
                cells
                    .iter()
                    .find(|(col, _)| col == wanted)
                    .map(|(col, cell)| (col.clone(), format_cell(cell, decimals)))
            })
            .collect(),
    )
}

/// Depth plus the six band fields.
pub fn band_table(band: &PressureBand, depth_column: &str, decimals: u32) -> ResultTable {
    let mut cells = vec![(depth_column.to_string(), format_number(band.depth, decimals))];
    cells.extend(
        band.fields()
            .iter()
            .map(|(label, v)| (label.to_string(), format_number(*v, decimals))),
    );
    ResultTable::single_row(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::interpolate::interpolate;
    use crate::config::{AnalysisConfig, PressureConfig};
    use crate::data::filter::filter_by_lithology;
    use crate::data::model::{Sheet, WellDataset};

    fn rows() -> crate::data::filter::FilteredDataset {
        let headers = ["PROF (m)", "LITOLOGIA", "UCS (psi)", "Poço", "Porosidade"];
        let sheet = Sheet::new(
            "A",
            headers.iter().map(|h| h.to_string()).collect(),
            vec![
                vec![
                    CellValue::Float(100.0),
                    CellValue::String("Arenito".into()),
                    CellValue::Float(1000.004),
                    CellValue::String("W-1".into()),
                    CellValue::Float(0.2),
                ],
                vec![
                    CellValue::Float(110.0),
                    CellValue::String("Arenito".into()),
                    CellValue::Float(2000.0),
                    CellValue::String("W-1".into()),
                    CellValue::Null,
                ],
            ],
        );
        let ds = WellDataset::from_sheet(&sheet, &AnalysisConfig::default()).unwrap();
        filter_by_lithology(&ds, "Arenito")
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to(2.3451, 2), 2.35);
        assert_eq!(round_to(-1.005001, 2), -1.01);
        assert_eq!(format_number(13.0, 2), "13.00");
        assert_eq!(format_number(f64::NAN, 2), "NaN");
    }

    #[test]
    fn mean_table_is_one_row() {
        let t = mean_table(&[("GR".into(), 80.456), ("Void".into(), f64::NAN)], 2);
        assert_eq!(t.columns, vec!["GR", "Void"]);
        assert_eq!(t.rows, vec![vec!["80.46".to_string(), "NaN".to_string()]]);
    }

    #[test]
    fn exact_row_table_keeps_text_columns() {
        let row = interpolate(&rows(), 100.0).unwrap().unwrap();
        let t = row_table(&row, 2);
        assert_eq!(t.columns, vec!["PROF (m)", "LITOLOGIA", "UCS (psi)", "Poço", "Porosidade"]);
        assert_eq!(t.rows[0], vec!["100.00", "Arenito", "1000.00", "W-1", "0.20"]);
    }

    #[test]
    fn summary_table_uses_whitelist_order() {
        let row = interpolate(&rows(), 105.0).unwrap().unwrap();
        let whitelist = AnalysisConfig::default().summary_columns;
        let t = summary_table(&row, &whitelist, 2);
        assert_eq!(t.columns, vec!["PROF (m)", "Porosidade", "UCS (psi)"]);
        assert_eq!(t.rows[0], vec!["105.00", "NaN", "1500.00"]);
    }

    #[test]
    fn band_table_layout() {
        let band = PressureBand::from_pressures(103.0, 1000.0, 1200.0, &PressureConfig::default());
        let t = band_table(&band, "PROF (m)", 2);
        assert_eq!(t.columns.len(), 7);
        assert_eq!(t.columns[1], "Safe Min (psi)");
        let r = &t.rows[0];
        assert_eq!(r[..3], ["103.00", "900.00", "1140.00"]);
        assert_eq!(r[4], "78.60");
        assert_eq!(r[6], "7.86");
    }
}
