/// Data layer: core types, loading, filtering and summaries.
///
/// Architecture:
/// ```text
///  built-in penguins.csv / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse source → PenguinDataset (once, at start-up)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ PenguinDataset  │  Vec<Penguin>, shared read-only via Arc
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState → memoized row indices (FilteredView)
///   └──────────┘
///        │
///        ├──► stats  count / means for the value boxes
///        └──► grid   column filters + sort for the table
/// ```

pub mod filter;
pub mod grid;
pub mod loader;
pub mod model;
pub mod stats;

use thiserror::Error;

/// Errors that make a data source unusable.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("unknown species '{0}'")]
    UnknownSpecies(String),

    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
pub(crate) mod fixture {
    use super::model::{Penguin, PenguinDataset, Sex, Species};

    pub fn penguin(species: Species, mass: Option<f64>, bill: Option<(f64, f64)>) -> Penguin {
        Penguin {
            species,
            island: match species {
                Species::Adelie => "Torgersen",
                Species::Gentoo => "Biscoe",
                Species::Chinstrap => "Dream",
            }
            .to_string(),
            bill_length_mm: bill.map(|(l, _)| l),
            bill_depth_mm: bill.map(|(_, d)| d),
            flipper_length_mm: Some(200.0),
            body_mass_g: mass,
            sex: Some(Sex::Female),
            year: Some(2008),
        }
    }

    /// `n` penguins cycling through the three species with masses spread
    /// over [2700, 5950), so every row sits below the default ceiling.
    pub fn spread(n: usize) -> PenguinDataset {
        let records = (0..n)
            .map(|i| {
                let species = Species::ALL[i % 3];
                let mass = 2700.0 + (i as f64 * 37.0) % 3250.0;
                let bill = (35.0 + (i % 20) as f64, 14.0 + (i % 7) as f64);
                penguin(species, Some(mass), Some(bill))
            })
            .collect();
        PenguinDataset::new(records)
    }
}
