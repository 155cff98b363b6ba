use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

/// Per-species measurement distributions: (mean, std-dev) for bill length,
/// bill depth, flipper length and body mass, plus the islands it nests on.
struct SpeciesProfile {
    name: &'static str,
    islands: &'static [&'static str],
    bill_length: (f64, f64),
    bill_depth: (f64, f64),
    flipper_length: (f64, f64),
    body_mass: (f64, f64),
    count: usize,
}

const PROFILES: [SpeciesProfile; 3] = [
    SpeciesProfile {
        name: "Adelie",
        islands: &["Torgersen", "Biscoe", "Dream"],
        bill_length: (38.8, 2.7),
        bill_depth: (18.3, 1.2),
        flipper_length: (190.0, 6.5),
        body_mass: (3700.0, 460.0),
        count: 152,
    },
    SpeciesProfile {
        name: "Gentoo",
        islands: &["Biscoe"],
        bill_length: (47.5, 3.1),
        bill_depth: (15.0, 1.0),
        flipper_length: (217.0, 6.5),
        body_mass: (5076.0, 504.0),
        count: 124,
    },
    SpeciesProfile {
        name: "Chinstrap",
        islands: &["Dream"],
        bill_length: (48.8, 3.3),
        bill_depth: (18.4, 1.1),
        flipper_length: (196.0, 7.1),
        body_mass: (3733.0, 384.0),
        count: 68,
    },
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, (mean, std_dev): (f64, f64)) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round_to(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_penguins.parquet".to_string());

    let mut species: Vec<&str> = Vec::new();
    let mut island: Vec<&str> = Vec::new();
    let mut bill_length: Vec<Option<f64>> = Vec::new();
    let mut bill_depth: Vec<Option<f64>> = Vec::new();
    let mut flipper_length: Vec<Option<f64>> = Vec::new();
    let mut body_mass: Vec<Option<f64>> = Vec::new();
    let mut sex: Vec<Option<&str>> = Vec::new();
    let mut year: Vec<i64> = Vec::new();

    for profile in &PROFILES {
        for i in 0..profile.count {
            // Roughly one bird in a hundred goes unmeasured, as in the field data.
            let measured = rng.next_f64() > 0.01;
            let measure = |rng: &mut SimpleRng, dist: (f64, f64), step: f64| {
                measured.then(|| round_to(rng.gauss(dist), step))
            };

            species.push(profile.name);
            island.push(rng.pick(profile.islands));
            bill_length.push(measure(&mut rng, profile.bill_length, 0.1));
            bill_depth.push(measure(&mut rng, profile.bill_depth, 0.1));
            flipper_length.push(measure(&mut rng, profile.flipper_length, 1.0));
            body_mass.push(measure(&mut rng, profile.body_mass, 25.0));
            sex.push(match rng.next_f64() {
                r if r < 0.03 => None,
                r if r < 0.515 => Some("female"),
                _ => Some("male"),
            });
            year.push(2007 + (i % 3) as i64);
        }
    }

    let n_rows = species.len();
    let text = |name: &str| Field::new(name, DataType::Utf8, true);
    let number = |name: &str| Field::new(name, DataType::Float64, true);
    let schema = Arc::new(Schema::new(vec![
        text("species"),
        text("island"),
        number("bill_length_mm"),
        number("bill_depth_mm"),
        number("flipper_length_mm"),
        number("body_mass_g"),
        text("sex"),
        Field::new("year", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(species)),
            Arc::new(StringArray::from(island)),
            Arc::new(Float64Array::from(bill_length)),
            Arc::new(Float64Array::from(bill_depth)),
            Arc::new(Float64Array::from(flipper_length)),
            Arc::new(Float64Array::from(body_mass)),
            Arc::new(StringArray::from(sex)),
            Arc::new(Int64Array::from(year)),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let file = std::fs::File::create(&output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n_rows} synthetic penguins to {output_path}");
    let preview = pretty_format_batches(&[batch.slice(0, n_rows.min(5))])
        .expect("Failed to format preview");
    println!("{preview}");
}
