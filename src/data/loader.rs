use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type};
use arrow::util::display::array_value_to_string;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Sheet, Workbook};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a well-log workbook from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – one survey area per worksheet
/// * `.json` – `{ "Area": [ {..row..}, ... ], ... }` or a bare array of rows
/// * `.csv`  – a single area named after the file
/// * `.parquet` – a single area named after the file
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let workbook = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => load_spreadsheet(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::info!(
        "Loaded {} with {} sheet(s): {:?}",
        path.display(),
        workbook.sheets.len(),
        workbook.sheet_names()
    );
    Ok(workbook)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1")
        .to_string()
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Every worksheet becomes one sheet; its first row is the header.
fn load_spreadsheet(path: &Path) -> Result<Workbook> {
    let mut book = open_workbook_auto(path).context("opening workbook")?;

    let mut sheets = Vec::new();
    for name in book.sheet_names() {
        let range = book
            .worksheet_range(&name)
            .with_context(|| format!("reading sheet '{name}'"))?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default();
        let data = rows
            .map(|row| row.iter().map(cell_from_data).collect())
            .collect();

        let sheet = Sheet::new(name, headers, data);
        log::debug!("Sheet '{}': {} rows, columns {:?}", sheet.name, sheet.len(), sheet.headers);
        sheets.push(sheet);
    }

    Ok(Workbook { sheets })
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Date(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Date(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema, records-oriented per sheet:
///
/// ```json
/// {
///   "Area 1": [
///     { "PROF (m)": 1500.0, "LITOLOGIA": "Arenito", "GR": 45.2 },
///     ...
///   ]
/// }
/// ```
///
/// A top-level array is read as a single sheet named after the file.
fn load_json(path: &Path) -> Result<Workbook> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let sheets = match &root {
        JsonValue::Array(records) => vec![json_sheet(file_stem(path), records)?],
        JsonValue::Object(areas) => areas
            .iter()
            .map(|(name, records)| {
                let records = records
                    .as_array()
                    .with_context(|| format!("Sheet '{name}' is not an array of rows"))?;
                json_sheet(name.clone(), records)
            })
            .collect::<Result<Vec<_>>>()?,
        _ => bail!("Expected a JSON object of sheets or an array of rows"),
    };

    Ok(Workbook { sheets })
}

fn json_sheet(name: String, records: &[JsonValue]) -> Result<Sheet> {
    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Sheet '{name}', row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Sheet::new(name, headers, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one row per sampled depth.
fn load_csv(path: &Path) -> Result<Workbook> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Workbook {
        sheets: vec![Sheet::new(file_stem(path), headers, rows)],
    })
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding one survey area, one row per sampled depth.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Workbook> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell_value(col, row))
                    .collect(),
            );
        }
    }

    Ok(Workbook {
        sheets: vec![Sheet::new(file_stem(path), headers, rows)],
    })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let as_text = || array_value_to_string(col.as_ref(), row).unwrap_or_default();
    match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| CellValue::String(s.value(row).to_string()))
            .unwrap_or(CellValue::Null),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|s| CellValue::String(s.value(row).to_string()))
            .unwrap_or(CellValue::Null),
        DataType::Int8 => int_cell(col.as_primitive_opt::<Int8Type>().map(|a| a.value(row) as i64)),
        DataType::Int16 => int_cell(col.as_primitive_opt::<Int16Type>().map(|a| a.value(row) as i64)),
        DataType::Int32 => int_cell(col.as_primitive_opt::<Int32Type>().map(|a| a.value(row) as i64)),
        DataType::Int64 => int_cell(col.as_primitive_opt::<Int64Type>().map(|a| a.value(row))),
        DataType::Float32 => float_cell(col.as_primitive_opt::<Float32Type>().map(|a| a.value(row) as f64)),
        DataType::Float64 => float_cell(col.as_primitive_opt::<Float64Type>().map(|a| a.value(row))),
        DataType::Boolean => col
            .as_boolean_opt()
            .map(|a| CellValue::Bool(a.value(row)))
            .unwrap_or(CellValue::Null),
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => CellValue::Date(as_text()),
        _ => CellValue::String(as_text()),
    }
}

fn int_cell(v: Option<i64>) -> CellValue {
    v.map(CellValue::Integer).unwrap_or(CellValue::Null)
}

fn float_cell(v: Option<f64>) -> CellValue {
    v.map(CellValue::Float).unwrap_or(CellValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    #[test]
    fn csv_headers_trimmed_and_cells_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bacia Sul.csv");
        std::fs::write(
            &path,
            " PROF (m) ,LITOLOGIA , GR\n1500.5,Arenito,45\n1501,Folhelho,\n",
        )
        .unwrap();

        let wb = load_workbook(&path).unwrap();
        assert_eq!(wb.sheet_names(), vec!["Bacia Sul"]);
        let sheet = &wb.sheets[0];
        assert_eq!(sheet.headers, vec!["PROF (m)", "LITOLOGIA", "GR"]);
        assert_eq!(
            sheet.rows[0],
            vec![
                CellValue::Float(1500.5),
                CellValue::String("Arenito".into()),
                CellValue::Integer(45)
            ]
        );
        assert_eq!(sheet.rows[1][2], CellValue::Null);
    }

    #[test]
    fn json_object_is_one_sheet_per_area() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bdg.json");
        std::fs::write(
            &path,
            r#"{
                "Norte": [{"PROF (m)": 100.0, "LITOLOGIA": "Arenito"}, {"PROF (m)": 110, "GR": 3.5}],
                "Sul": [{"PROF (m)": 200.0, "LITOLOGIA": "Folhelho"}]
            }"#,
        )
        .unwrap();

        let wb = load_workbook(&path).unwrap();
        assert_eq!(wb.sheet_names(), vec!["Norte", "Sul"]);
        let norte = wb.sheet("Norte").unwrap();
        assert_eq!(norte.headers, vec!["PROF (m)", "LITOLOGIA", "GR"]);
        assert_eq!(norte.rows[0][2], CellValue::Null);
        assert_eq!(norte.rows[1][0], CellValue::Integer(110));
        assert_eq!(norte.rows[1][1], CellValue::Null);
    }

    #[test]
    fn json_array_is_single_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poco.json");
        std::fs::write(&path, r#"[{"PROF (m)": 1.0, "LITOLOGIA": "Arenito"}]"#).unwrap();
        let wb = load_workbook(&path).unwrap();
        assert_eq!(wb.sheet_names(), vec!["poco"]);
        assert_eq!(wb.sheets[0].len(), 1);
    }

    #[test]
    fn json_rejects_scalars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "42").unwrap();
        assert!(load_workbook(&path).is_err());
    }

    #[test]
    fn parquet_columns_become_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Area 3.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("PROF (m)", DataType::Float64, false),
            Field::new("LITOLOGIA", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![100.0, 110.0])),
                Arc::new(StringArray::from(vec![Some("Arenito"), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let wb = load_workbook(&path).unwrap();
        let sheet = wb.sheet("Area 3").unwrap();
        assert_eq!(sheet.headers, vec!["PROF (m)", "LITOLOGIA"]);
        assert_eq!(
            sheet.rows,
            vec![
                vec![CellValue::Float(100.0), CellValue::String("Arenito".into())],
                vec![CellValue::Float(110.0), CellValue::Null],
            ]
        );
    }

    #[test]
    fn spreadsheet_cells_map_to_cell_values() {
        assert_eq!(cell_from_data(&Data::Float(1.5)), CellValue::Float(1.5));
        assert_eq!(cell_from_data(&Data::Int(7)), CellValue::Integer(7));
        assert_eq!(cell_from_data(&Data::String("12.5".into())), CellValue::String("12.5".into()));
        assert_eq!(cell_from_data(&Data::String("  ".into())), CellValue::Null);
        assert_eq!(cell_from_data(&Data::String("Arenito".into())), CellValue::String("Arenito".into()));
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Null);
    }

    #[test]
    fn xlsx_workbook_is_one_sheet_per_area() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bdg.xlsx");

        let mut book = rust_xlsxwriter::Workbook::new();
        let norte = book.add_worksheet();
        norte.set_name("Bacia Norte").unwrap();
        for (col, header) in [" PROF (m) ", "LITOLOGIA ", "GR"].iter().enumerate() {
            norte.write_string(0, col as u16, *header).unwrap();
        }
        norte.write_number(1, 0, 1200.5).unwrap();
        norte.write_string(1, 1, "Arenito").unwrap();
        norte.write_number(1, 2, 45.0).unwrap();
        norte.write_number(2, 0, 1201.0).unwrap();
        norte.write_string(2, 1, "Folhelho").unwrap();
        let sul = book.add_worksheet();
        sul.set_name("Bacia Sul").unwrap();
        sul.write_string(0, 0, "PROF (m)").unwrap();
        sul.write_string(0, 1, "LITOLOGIA").unwrap();
        sul.write_number(1, 0, 2100.0).unwrap();
        sul.write_string(1, 1, "Marga").unwrap();
        book.save(&path).unwrap();

        let wb = load_workbook(&path).unwrap();
        assert_eq!(wb.sheet_names(), vec!["Bacia Norte", "Bacia Sul"]);
        let norte = wb.sheet("Bacia Norte").unwrap();
        assert_eq!(norte.headers, vec!["PROF (m)", "LITOLOGIA", "GR"]);
        assert_eq!(
            norte.rows,
            vec![
                vec![CellValue::Float(1200.5), CellValue::String("Arenito".into()), CellValue::Float(45.0)],
                vec![CellValue::Float(1201.0), CellValue::String("Folhelho".into()), CellValue::Null],
            ]
        );
        assert_eq!(wb.sheet("Bacia Sul").unwrap().len(), 1);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_workbook(Path::new("dados.txt")).unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }
}
