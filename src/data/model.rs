use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use super::error::AnalysisError;
use crate::config::AnalysisConfig;

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as read from a workbook sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Date/time cells are kept as text; they never take part in arithmetic.
    Date(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Numeric interpretation; booleans count as 0/1, text is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Bool(b) => Some(f64::from(u8::from(*b))),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

/// A column is numeric when its non-null cells are all numbers, or all
/// booleans. Mixing booleans with numbers or text leaves it non-numeric.
fn is_numeric_column<'a>(mut cells: impl Iterator<Item = &'a CellValue>) -> bool {
    let mut kind = None;
    cells.all(|cell| {
        let this = match cell {
            CellValue::Null => return true,
            CellValue::Float(_) | CellValue::Integer(_) => "number",
            CellValue::Bool(_) => "bool",
            _ => return false,
        };
        *kind.get_or_insert(this) == this
    })
}

// ---------------------------------------------------------------------------
// Sheet / Workbook – raw tables as loaded
// ---------------------------------------------------------------------------

/// One worksheet: a header row plus data rows of equal width.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Build a sheet, normalising headers and row widths.
    ///
    /// Headers are trimmed; blanks become `Unnamed: <i>` and repeats get
    /// `.1`, `.2`, ... suffixes. Fully blank rows are dropped, short rows are
    /// padded with nulls and long rows truncated.
    pub fn new(name: impl Into<String>, raw_headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let headers = normalize_headers(raw_headers);
        let width = headers.len();
        let rows = rows
            .into_iter()
            .filter(|row| !row.iter().all(CellValue::is_null))
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Sheet {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    raw.into_iter()
        .enumerate()
        .map(|(i, h)| {
            let trimmed = h.trim();
            let base = if trimmed.is_empty() {
                format!("Unnamed: {i}")
            } else {
                trimmed.to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// All sheets of an uploaded file; one sheet per survey area.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

// ---------------------------------------------------------------------------
// ColumnSchema – column order and dtypes of one validated sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    pub depth_column: String,
    pub lithology_column: String,
    /// All column names in sheet order.
    pub columns: Vec<String>,
    numeric: BTreeSet<String>,
}

impl ColumnSchema {
    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric.contains(column)
    }

    /// Numeric columns in sheet order, depth column included.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| self.numeric.contains(*c))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// WellRecord – one sampled interval
// ---------------------------------------------------------------------------

/// One row of a sheet with the required columns pulled out.
#[derive(Debug, Clone, PartialEq)]
pub struct WellRecord {
    /// `None` when the depth cell is empty or not a number.
    pub depth: Option<f64>,
    pub lithology: Option<String>,
    /// Every other column: column_name → value.
    pub values: BTreeMap<String, CellValue>,
}

impl WellRecord {
    /// Numeric value of `column`, resolving the depth column through `schema`.
    pub fn numeric(&self, schema: &ColumnSchema, column: &str) -> Option<f64> {
        if column == schema.depth_column {
            return self.depth;
        }
        self.values.get(column).and_then(CellValue::as_f64)
    }
}

// ---------------------------------------------------------------------------
// WellDataset – a validated survey area
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct WellDataset {
    /// Area (sheet) name.
    pub name: String,
    pub schema: Arc<ColumnSchema>,
    pub records: Vec<WellRecord>,
}

impl WellDataset {
    /// Validate a sheet against the configured depth/lithology columns.
    pub fn from_sheet(sheet: &Sheet, config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let depth_idx = sheet
            .column_index(&config.depth_column)
            .ok_or_else(|| AnalysisError::MissingColumn(config.depth_column.clone()))?;
        let litho_idx = sheet
            .column_index(&config.lithology_column)
            .ok_or_else(|| AnalysisError::MissingColumn(config.lithology_column.clone()))?;

        let mut numeric: BTreeSet<String> = sheet
            .headers
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                *i != litho_idx && is_numeric_column(sheet.rows.iter().map(|r| &r[*i]))
            })
            .map(|(_, h)| h.clone())
            .collect();
        numeric.insert(config.depth_column.clone());

        let records = sheet
            .rows
            .iter()
            .map(|row| {
                let lithology = match &row[litho_idx] {
                    CellValue::Null => None,
                    other => Some(other.to_string()),
                };
                let values = sheet
                    .headers
                    .iter()
                    .zip(row)
                    .enumerate()
                    .filter(|(i, _)| *i != depth_idx && *i != litho_idx)
                    .map(|(_, (h, v))| (h.clone(), v.clone()))
                    .collect();
                WellRecord {
                    depth: match &row[depth_idx] {
                        CellValue::Bool(_) => None,
                        cell => cell.as_f64().filter(|d| !d.is_nan()),
                    },
                    lithology,
                    values,
                }
            })
            .collect();

        let schema = ColumnSchema {
            depth_column: config.depth_column.clone(),
            lithology_column: config.lithology_column.clone(),
            columns: sheet.headers.clone(),
            numeric,
        };

        Ok(WellDataset {
            name: sheet.name.clone(),
            schema: Arc::new(schema),
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
