//! Analysis configuration
//!
//! Column names, safety factors and unit conversions used by the analysis
//! layer. Search order: `$WELLLOG_CONFIG` env var → `./welllog.toml` → defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// psi → bar
pub const PSI_TO_BAR: f64 = 0.06895;
/// psi → MPa
pub const PSI_TO_MPA: f64 = 0.006895;

// ---------------------------------------------------------------------------
// Fracture plane – which pair of pressure columns feeds the band
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FracturePlane {
    /// FP columns.
    #[default]
    Parallel,
    /// FNP columns.
    NonParallel,
}

impl FracturePlane {
    pub fn label(self) -> &'static str {
        match self {
            FracturePlane::Parallel => "Parallel plane (FP)",
            FracturePlane::NonParallel => "Non-parallel plane (FNP)",
        }
    }
}

// ---------------------------------------------------------------------------
// Pressure band parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PressureConfig {
    pub reopening_fp: String,
    pub fracture_fp: String,
    pub reopening_fnp: String,
    pub fracture_fnp: String,
    /// Applied to the reopening pressure to get the band minimum.
    pub min_factor: f64,
    /// Applied to the fracture pressure to get the band maximum.
    pub max_factor: f64,
    pub psi_to_bar: f64,
    pub psi_to_mpa: f64,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            reopening_fp: "Pressão Reabertura FP (psi)".to_string(),
            fracture_fp: "Pressão Fratura (psi) FP".to_string(),
            reopening_fnp: "Pressão Reabertura FNP (psi)".to_string(),
            fracture_fnp: "Pressão Fratura (psi) FNP".to_string(),
            min_factor: 0.90,
            max_factor: 0.95,
            psi_to_bar: PSI_TO_BAR,
            psi_to_mpa: PSI_TO_MPA,
        }
    }
}

impl PressureConfig {
    /// (reopening, fracture) column names for the given plane.
    pub fn source_columns(&self, plane: FracturePlane) -> (&str, &str) {
        match plane {
            FracturePlane::Parallel => (&self.reopening_fp, &self.fracture_fp),
            FracturePlane::NonParallel => (&self.reopening_fnp, &self.fracture_fnp),
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub depth_column: String,
    pub lithology_column: String,
    /// Parameter preselected in the distribution view when present.
    pub default_parameter: String,
    pub histogram_bins: usize,
    pub display_decimals: u32,
    /// Columns shown in the reduced summary table, in display order.
    pub summary_columns: Vec<String>,
    pub fracture_plane: FracturePlane,
    pub pressure: PressureConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            depth_column: "PROF (m)".to_string(),
            lithology_column: "LITOLOGIA".to_string(),
            default_parameter: "GR".to_string(),
            histogram_bins: 20,
            display_decimals: 2,
            summary_columns: [
                "PROF (m)",
                "r (g/cm³)",
                "Porosidade",
                "Poisson Perfil",
                "Tensão Sobrecarga (psi)",
                "UCS (psi)",
                "S1  (psi)",
                "S2 (psi)",
                "Pressão Fratura (psi) FNP",
                "Pressão Fratura (psi) FP",
                "Pressão Reabertura FP (psi)",
                "Pressão Reabertura FNP (psi)",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            fracture_plane: FracturePlane::default(),
            pressure: PressureConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration searching:
    /// 1. `$WELLLOG_CONFIG` env var
    /// 2. `./welllog.toml` in CWD
    /// 3. Built-in defaults
    ///
    /// A file that fails to parse is reported and the defaults are used.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("WELLLOG_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                return Self::load_or_default(&p);
            }
            log::warn!("WELLLOG_CONFIG file not found: {}", p.display());
        }

        let local = PathBuf::from("welllog.toml");
        if local.exists() {
            return Self::load_or_default(&local);
        }

        log::info!("No welllog.toml found, using built-in column names");
        Self::default()
    }

    fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded analysis config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing analysis config TOML")
    }
}
