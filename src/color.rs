use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Lithology colours
// ---------------------------------------------------------------------------

/// Stable colour per lithology of the current area, used for the selector
/// swatches and the histogram bars.
#[derive(Debug, Clone, Default)]
pub struct LithologyColors {
    mapping: BTreeMap<String, Color32>,
}

impl LithologyColors {
    /// Assign colours in the given (first-seen) order.
    pub fn new(lithologies: &[String]) -> Self {
        let mapping = lithologies
            .iter()
            .cloned()
            .zip(generate_palette(lithologies.len()))
            .collect();
        LithologyColors { mapping }
    }

    pub fn color_for(&self, lithology: &str) -> Color32 {
        self.mapping
            .get(lithology)
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}
