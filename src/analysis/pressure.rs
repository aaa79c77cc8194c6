use super::interpolate::InterpolatedRow;
use crate::config::{FracturePlane, PressureConfig};
use crate::data::error::AnalysisError;

/// Safe injection pressure band at one depth, in psi, bar and MPa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureBand {
    pub depth: f64,
    pub min_psi: f64,
    pub max_psi: f64,
    pub min_bar: f64,
    pub max_bar: f64,
    pub min_mpa: f64,
    pub max_mpa: f64,
}

impl PressureBand {
    /// Band from reopening and fracture pressures (psi).
    pub fn from_pressures(depth: f64, reopening: f64, fracture: f64, cfg: &PressureConfig) -> Self {
        let min_psi = reopening * cfg.min_factor;
        let max_psi = fracture * cfg.max_factor;
        PressureBand {
            depth,
            min_psi,
            max_psi,
            min_bar: min_psi * cfg.psi_to_bar,
            max_bar: max_psi * cfg.psi_to_bar,
            min_mpa: min_psi * cfg.psi_to_mpa,
            max_mpa: max_psi * cfg.psi_to_mpa,
        }
    }

    /// False only when the reopening pressure pushes the minimum above the
    /// maximum; a NaN bound is never reported as inverted.
    pub fn is_ordered(&self) -> bool {
        self.min_psi.is_nan() || self.max_psi.is_nan() || self.min_psi <= self.max_psi
    }

    /// (label, value) pairs in display order.
    pub fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("Safe Min (psi)", self.min_psi),
            ("Safe Max (psi)", self.max_psi),
            ("Safe Min (bar)", self.min_bar),
            ("Safe Max (bar)", self.max_bar),
            ("Safe Min (MPa)", self.min_mpa),
            ("Safe Max (MPa)", self.max_mpa),
        ]
    }
}

/// Derive the safe injection band from a row's reopening/fracture pressures.
pub fn derive(
    row: &InterpolatedRow,
    plane: FracturePlane,
    cfg: &PressureConfig,
) -> Result<PressureBand, AnalysisError> {
    let (reopening_col, fracture_col) = cfg.source_columns(plane);
    // A blank cell in either bracketing row blends to NaN; treat it the same
    // as a blank cell on an exact row.
    let field = |col: &str| {
        row.numeric(col)
            .filter(|v| !v.is_nan())
            .ok_or_else(|| AnalysisError::MissingField(col.to_string()))
    };
    let reopening = field(reopening_col)?;
    let fracture = field(fracture_col)?;

    let band = PressureBand::from_pressures(row.depth, reopening, fracture, cfg);
    if !band.is_ordered() {
        log::warn!(
            "Inverted pressure band at {} m: min {:.2} psi > max {:.2} psi",
            band.depth,
            band.min_psi,
            band.max_psi
        );
    }
    Ok(band)
}
