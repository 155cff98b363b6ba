use std::fmt;
use std::str::FromStr;

use super::DatasetError;

// ---------------------------------------------------------------------------
// Species – the fixed categorical label driving the species filter
// ---------------------------------------------------------------------------

/// The three penguin species present in the Palmer archipelago data.
/// Declaration order is the display order used by filters and legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Adelie,
    Gentoo,
    Chinstrap,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Gentoo, Species::Chinstrap];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Gentoo => "Gentoo",
            Species::Chinstrap => "Chinstrap",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|sp| sp.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DatasetError::UnknownSpecies(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Sex
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Parse a sex label; anything unrecognised is treated as missing.
    pub fn parse(s: &str) -> Option<Sex> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Some(Sex::Female),
            "male" | "m" => Some(Sex::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => f.write_str("female"),
            Sex::Male => f.write_str("male"),
        }
    }
}

// ---------------------------------------------------------------------------
// Penguin – one row of the dataset
// ---------------------------------------------------------------------------

/// A single observed penguin. Measurements the field team could not record
/// are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Penguin {
    pub species: Species,
    pub island: String,
    pub bill_length_mm: Option<f64>,
    pub bill_depth_mm: Option<f64>,
    pub flipper_length_mm: Option<f64>,
    pub body_mass_g: Option<f64>,
    pub sex: Option<Sex>,
    pub year: Option<i32>,
}

// ---------------------------------------------------------------------------
// PenguinDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Column names every data source must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "species",
    "island",
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
    "sex",
    "year",
];

/// The full parsed dataset. Never mutated after loading; sessions share it
/// behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct PenguinDataset {
    records: Vec<Penguin>,
}

impl PenguinDataset {
    pub fn new(records: Vec<Penguin>) -> Self {
        PenguinDataset { records }
    }

    pub fn records(&self) -> &[Penguin] {
        &self.records
    }

    /// Row by index. Indices come from a filtered view over this dataset.
    pub fn get(&self, idx: usize) -> Option<&Penguin> {
        self.records.get(idx)
    }

    /// Number of penguins.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct island names.
    pub fn islands(&self) -> Vec<&str> {
        let mut islands: Vec<&str> = self.records.iter().map(|p| p.island.as_str()).collect();
        islands.sort_unstable();
        islands.dedup();
        islands
    }
}
