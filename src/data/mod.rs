/// Data layer: core types, loading, and lithology filtering.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Workbook (one Sheet per survey area)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ WellDataset  │  validated sheet: depth + lithology + measurements
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  one lithology, sorted by depth → FilteredDataset
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
