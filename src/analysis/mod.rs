/// Analysis layer: pure computations over a filtered well dataset.
///
/// Pipeline:
/// ```text
///   FilteredDataset ──► summary      mean of every numeric column
///          │
///          ├─────────► histogram    distribution of one parameter
///          │
///          └─────────► interpolate  values at a requested depth
///                           │
///                           ▼
///                        pressure   safe injection band (psi / bar / MPa)
///                           │
///                           ▼
///                        report     rounded tables for display
/// ```

pub mod histogram;
pub mod interpolate;
pub mod pressure;
pub mod report;
pub mod summary;
