use std::f64::consts::PI;

/// One equal-width histogram bin, `[start, end)` (the last bin is closed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min <= max).then_some((min, max))
}

/// Count `values` into `bins` equal-width bins spanning their min..max.
///
/// Non-finite values are ignored. A series with no spread gets a single
/// unit-width bin centred on its value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let values = finite(values);
    let Some((min, max)) = bounds(&values) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    if max - min <= f64::EPSILON * max.abs().max(1.0) {
        return vec![HistogramBin {
            start: min - 0.5,
            end: min + 0.5,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

/// Gaussian KDE over the data range, scaled to histogram counts.
///
/// Bandwidth follows Scott's rule (`n^(-1/5) * sample std`). Returns no
/// points when fewer than two values are given or they have no spread.
pub fn kde_curve(values: &[f64], points: usize, bin_width: f64) -> Vec<[f64; 2]> {
    let values = finite(values);
    let n = values.len();
    if n < 2 || points < 2 {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = var.sqrt();
    let Some((min, max)) = bounds(&values) else {
        return Vec::new();
    };
    if std <= 0.0 || max <= min {
        return Vec::new();
    }

    let bw = std * (n as f64).powf(-0.2);
    let norm = 1.0 / (n as f64 * bw * (2.0 * PI).sqrt());
    let scale = n as f64 * bin_width;
    let step = (max - min) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = min + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|xi| (-0.5 * ((x - xi) / bw).powi(2)).exp())
                .sum::<f64>()
                * norm;
            [x, density * scale]
        })
        .collect()
}
