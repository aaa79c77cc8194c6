use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{Map, Value};

/// Overburden gradient per g/cm³ of bulk density (psi/m).
const PSI_PER_M_PER_GCC: f64 = 1.4223;

/// Numeric columns in sheet order (after depth and lithology).
const COLUMNS: [&str; 13] = [
    "GR",
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
    "DT (us/ft)",
];

/// (lithology, GR mean, density mean, porosity mean, Poisson mean, UCS mean)
const LITHOLOGIES: [(&str, f64, f64, f64, f64, f64); 4] = [
    ("Arenito", 45.0, 2.32, 0.21, 0.22, 9000.0),
    ("Folhelho", 110.0, 2.48, 0.09, 0.30, 6000.0),
    ("Calcário", 25.0, 2.62, 0.07, 0.27, 14000.0),
    ("Marga", 75.0, 2.52, 0.12, 0.28, 8000.0),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One sampled interval: depth, lithology and the `COLUMNS` values.
struct Sample {
    depth: f64,
    lithology: &'static str,
    values: Vec<f64>,
}

fn generate_area(rng: &mut SimpleRng, top: f64, n: usize, pore_gradient: f64) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(n);
    let mut depth = top;
    let mut lith_idx = rng.below(LITHOLOGIES.len());

    for _ in 0..n {
        // Beds of a few metres: switch lithology now and then.
        if rng.next_f64() < 0.15 {
            lith_idx = rng.below(LITHOLOGIES.len());
        }
        let (lithology, gr, rho, phi, nu, ucs) = LITHOLOGIES[lith_idx];

        let rho = rng.gauss(rho, 0.04);
        let nu = rng.gauss(nu, 0.015).clamp(0.1, 0.45);
        let overburden = rho * depth * PSI_PER_M_PER_GCC;
        let pore = pore_gradient * depth;
        // Uniaxial-strain horizontal stress from the Poisson ratio.
        let k = nu / (1.0 - nu);
        let s2 = k * (overburden - pore) + pore;
        let s1 = s2 * rng.gauss(1.12, 0.02);
        let tensile = rng.gauss(ucs / 12.0, 60.0).max(50.0);
        let frac_fp = 3.0 * s2 - s1 - pore + tensile;
        let frac_fnp = frac_fp * rng.gauss(1.06, 0.01);
        let reop_fp = 3.0 * s2 - s1 - pore;
        let reop_fnp = reop_fp * rng.gauss(1.05, 0.01);

        let values = vec![
            rng.gauss(gr, 8.0).max(0.0),
            rho,
            rng.gauss(phi, 0.02).clamp(0.0, 0.4),
            nu,
            overburden,
            rng.gauss(ucs, ucs * 0.1),
            s1,
            s2,
            frac_fnp,
            frac_fp,
            reop_fp,
            reop_fnp,
            rng.gauss(140.0 - 60.0 * (rho - 2.0), 4.0),
        ];

        samples.push(Sample {
            depth: (depth * 100.0).round() / 100.0,
            lithology,
            values,
        });
        depth += rng.gauss(0.5, 0.05).max(0.1);
    }
    samples
}

fn to_json_rows(samples: &[Sample]) -> Value {
    Value::Array(
        samples
            .iter()
            .map(|s| {
                let mut row = Map::new();
                // Leading/trailing blanks mimic hand-edited headers.
                row.insert("PROF (m) ".to_string(), Value::from(s.depth));
                row.insert(" LITOLOGIA".to_string(), Value::from(s.lithology));
                for (col, v) in COLUMNS.iter().zip(&s.values) {
                    let rounded = (v * 1000.0).round() / 1000.0;
                    row.insert(col.to_string(), Value::from(rounded));
                }
                Value::Object(row)
            })
            .collect(),
    )
}

fn write_parquet(samples: &[Sample], output_path: &str) -> Result<()> {
    let mut fields = vec![
        Field::new("PROF (m)", DataType::Float64, false),
        Field::new("LITOLOGIA", DataType::Utf8, false),
    ];
    fields.extend(COLUMNS.iter().map(|c| Field::new(*c, DataType::Float64, false)));
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(samples.iter().map(|s| s.depth).collect::<Vec<_>>())),
        Arc::new(StringArray::from(samples.iter().map(|s| s.lithology).collect::<Vec<_>>())),
    ];
    for i in 0..COLUMNS.len() {
        arrays.push(Arc::new(Float64Array::from(
            samples.iter().map(|s| s.values[i]).collect::<Vec<_>>(),
        )));
    }

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("creating RecordBatch")?;
    let file = std::fs::File::create(output_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let areas = [
        ("Bacia Norte", 1200.0, 600, 1.42),
        ("Bacia Sul", 2100.0, 800, 1.55),
        ("Plataforma", 800.0, 400, 1.45),
    ];

    let mut workbook = Map::new();
    let mut first_area = Vec::new();
    for (i, &(name, top, n, pore_gradient)) in areas.iter().enumerate() {
        let samples = generate_area(&mut rng, top, n, pore_gradient);
        workbook.insert(name.to_string(), to_json_rows(&samples));
        if i == 0 {
            first_area = samples;
        }
    }

    let json_path = "bdg_sample.json";
    let text = serde_json::to_string_pretty(&Value::Object(workbook))?;
    std::fs::write(json_path, text).context("writing JSON workbook")?;
    println!("Wrote {} areas to {json_path}", areas.len());

    let parquet_path = "bacia_norte.parquet";
    write_parquet(&first_area, parquet_path)?;
    println!("Wrote {} rows to {parquet_path}", first_area.len());

    Ok(())
}
