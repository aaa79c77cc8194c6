use crate::analysis::histogram::{histogram, kde_curve, HistogramBin};
use crate::analysis::interpolate::interpolate;
use crate::analysis::pressure::derive;
use crate::analysis::report::{band_table, mean_table, row_table, summary_table, ResultTable};
use crate::analysis::summary::mean_by_column;
use crate::color::LithologyColors;
use crate::config::{AnalysisConfig, FracturePlane};
use crate::data::error::AnalysisError;
use crate::data::filter::{depth_range, filter_by_lithology, lithologies, FilteredDataset};
use crate::data::model::{WellDataset, Workbook};

const KDE_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Derived results for the current selection
// ---------------------------------------------------------------------------

/// Safe injection band for the selected depth, or why it could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum BandView {
    Table { table: ResultTable, ordered: bool },
    Unavailable(AnalysisError),
}

/// Outcome of the depth lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum DepthView {
    /// Target outside the sampled range.
    NoData,
    Row {
        was_interpolated: bool,
        row: ResultTable,
        summary: ResultTable,
        band: BandView,
    },
    Failed(AnalysisError),
}

/// Everything shown for one area + lithology + parameter + depth.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub depth_range: (f64, f64),
    pub means: ResultTable,
    pub parameter: Option<String>,
    pub histogram: Vec<HistogramBin>,
    pub kde: Vec<[f64; 2]>,
    pub depth: DepthView,
}

/// `config.default_parameter` when the sheet has it, else the first column.
pub fn default_parameter(numeric_columns: &[String], config: &AnalysisConfig) -> Option<String> {
    numeric_columns
        .iter()
        .find(|c| **c == config.default_parameter)
        .or_else(|| numeric_columns.first())
        .cloned()
}

/// Run the full pipeline for one selection.
pub fn build_view(
    filtered: &FilteredDataset,
    parameter: Option<&str>,
    target_depth: f64,
    plane: FracturePlane,
    config: &AnalysisConfig,
) -> Result<AnalysisView, AnalysisError> {
    let range = depth_range(filtered)?;
    let decimals = config.display_decimals;

    let means = mean_table(&mean_by_column(filtered), decimals);

    let (bins, kde) = match parameter {
        Some(p) => {
            let series = filtered.numeric_series(p);
            let bins = histogram(&series, config.histogram_bins);
            let bin_width = bins.first().map(HistogramBin::width).unwrap_or(1.0);
            let kde = kde_curve(&series, KDE_POINTS, bin_width);
            (bins, kde)
        }
        None => (Vec::new(), Vec::new()),
    };

    let depth = match interpolate(filtered, target_depth) {
        Ok(Some(row)) => {
            let band = match derive(&row, plane, &config.pressure) {
                Ok(band) => BandView::Table {
                    table: band_table(&band, &filtered.schema.depth_column, decimals),
                    ordered: band.is_ordered(),
                },
                Err(e) => BandView::Unavailable(e),
            };
            DepthView::Row {
                was_interpolated: row.was_interpolated,
                row: row_table(&row, decimals),
                summary: summary_table(&row, &config.summary_columns, decimals),
                band,
            }
        }
        Ok(None) => DepthView::NoData,
        Err(e) => DepthView::Failed(e),
    };

    Ok(AnalysisView {
        depth_range: range,
        means,
        parameter: parameter.map(String::from),
        histogram: bins,
        kde,
        depth,
    })
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AnalysisConfig,

    /// Loaded workbook (None until user loads a file).
    pub workbook: Option<Workbook>,

    /// Selected area (sheet) and its validated dataset.
    pub area: Option<String>,
    pub dataset: Option<WellDataset>,

    /// Distinct lithologies of the area, first-seen order.
    pub lithologies: Vec<String>,
    pub lithology_colors: LithologyColors,
    pub lithology: Option<String>,

    /// Rows of the selected lithology (recomputed on lithology change).
    pub filtered: Option<FilteredDataset>,

    /// Numeric columns offered for the distribution view.
    pub parameters: Vec<String>,
    pub parameter: Option<String>,

    pub target_depth: f64,
    pub fracture_plane: FracturePlane,

    /// Derived results (recomputed on every selection change).
    pub view: Option<Result<AnalysisView, AnalysisError>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        let fracture_plane = config.fracture_plane;
        Self {
            config,
            workbook: None,
            area: None,
            dataset: None,
            lithologies: Vec::new(),
            lithology_colors: LithologyColors::default(),
            lithology: None,
            filtered: None,
            parameters: Vec::new(),
            parameter: None,
            target_depth: 0.0,
            fracture_plane,
            view: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded workbook and select its first area.
    pub fn set_workbook(&mut self, workbook: Workbook) {
        let first = workbook.sheets.first().map(|s| s.name.clone());
        self.workbook = Some(workbook);
        self.status_message = None;
        match first {
            Some(area) => self.select_area(&area),
            None => self.status_message = Some("Workbook has no sheets".to_string()),
        }
    }

    /// Validate the chosen sheet and select its first lithology.
    pub fn select_area(&mut self, area: &str) {
        self.area = Some(area.to_string());
        self.dataset = None;
        self.lithologies.clear();
        self.lithology = None;
        self.filtered = None;
        self.parameters.clear();
        self.parameter = None;
        self.view = None;

        let Some(sheet) = self.workbook.as_ref().and_then(|wb| wb.sheet(area)) else {
            return;
        };
        match WellDataset::from_sheet(sheet, &self.config) {
            Ok(dataset) => {
                self.lithologies = lithologies(&dataset);
                self.lithology_colors = LithologyColors::new(&self.lithologies);
                self.parameters = dataset.schema.numeric_columns();
                self.parameter = default_parameter(&self.parameters, &self.config);
                let first = self.lithologies.first().cloned();
                self.dataset = Some(dataset);
                match first {
                    Some(lith) => self.select_lithology(&lith),
                    None => self.view = Some(Err(AnalysisError::EmptyDataset)),
                }
            }
            Err(e) => {
                log::warn!("Sheet '{area}' is unusable: {e}");
                self.view = Some(Err(e));
            }
        }
    }

    /// Filter the area to one lithology and reset the depth to its top.
    pub fn select_lithology(&mut self, lithology: &str) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let filtered = filter_by_lithology(dataset, lithology);
        if let Ok((min, _)) = depth_range(&filtered) {
            self.target_depth = min;
        }
        self.lithology = Some(lithology.to_string());
        self.filtered = Some(filtered);
        self.recompute();
    }

    pub fn select_parameter(&mut self, parameter: &str) {
        self.parameter = Some(parameter.to_string());
        self.recompute();
    }

    pub fn set_target_depth(&mut self, depth: f64) {
        self.target_depth = depth;
        self.recompute();
    }

    pub fn set_fracture_plane(&mut self, plane: FracturePlane) {
        self.fracture_plane = plane;
        self.recompute();
    }

    /// Rebuild every derived table from the current selections.
    pub fn recompute(&mut self) {
        let Some(filtered) = &self.filtered else {
            return;
        };
        log::debug!(
            "Recomputing {} / {} at {} m ({} rows)",
            filtered.area,
            filtered.lithology,
            self.target_depth,
            filtered.len()
        );
        self.view = Some(build_view(
            filtered,
            self.parameter.as_deref(),
            self.target_depth,
            self.fracture_plane,
            &self.config,
        ));
    }
}
