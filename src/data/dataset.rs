//! Observation Dataset Module
//! Immutable handle over the loaded penguin measurements.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Column names of the observation dataset, in file order.
pub const COLUMNS: [&str; 8] = [
    "species",
    "island",
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
    "sex",
    "year",
];

pub const SPECIES_COLUMN: &str = "species";

/// Penguin species present in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    Adelie,
    Gentoo,
    Chinstrap,
}

impl Species {
    /// All species in checkbox order.
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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown species: {0}")]
pub struct UnknownSpecies(pub String);

impl FromStr for Species {
    type Err = UnknownSpecies;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|sp| sp.as_str() == s)
            .ok_or_else(|| UnknownSpecies(s.to_string()))
    }
}

/// Numeric measurement columns offered by the attribute dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericAttribute {
    #[default]
    BillLengthMm,
    BillDepthMm,
    FlipperLengthMm,
    BodyMassG,
}

impl NumericAttribute {
    pub const ALL: [NumericAttribute; 4] = [
        NumericAttribute::BillLengthMm,
        NumericAttribute::BillDepthMm,
        NumericAttribute::FlipperLengthMm,
        NumericAttribute::BodyMassG,
    ];

    /// Column name in the dataset.
    pub fn column(&self) -> &'static str {
        match self {
            NumericAttribute::BillLengthMm => "bill_length_mm",
            NumericAttribute::BillDepthMm => "bill_depth_mm",
            NumericAttribute::FlipperLengthMm => "flipper_length_mm",
            NumericAttribute::BodyMassG => "body_mass_g",
        }
    }

    /// Human readable axis label.
    pub fn label(&self) -> &'static str {
        match self {
            NumericAttribute::BillLengthMm => "Bill Length (mm)",
            NumericAttribute::BillDepthMm => "Bill Depth (mm)",
            NumericAttribute::FlipperLengthMm => "Flipper Length (mm)",
            NumericAttribute::BodyMassG => "Body Mass (g)",
        }
    }
}

impl fmt::Display for NumericAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The loaded observation dataset.
///
/// Cloning is cheap: the frame sits behind an `Arc` and is never mutated
/// after loading. Views are produced by [`crate::data::filtered_data`].
#[derive(Clone)]
pub struct Dataset {
    df: Arc<DataFrame>,
}

impl Dataset {
    pub fn new(df: DataFrame) -> Self {
        Self { df: Arc::new(df) }
    }

    /// Borrow the underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        column_names(&self.df)
    }

    /// Row counts per species, in [`Species::ALL`] order.
    pub fn species_counts(&self) -> Vec<(Species, usize)> {
        species_counts(&self.df)
    }
}

/// Column names of any frame as owned strings.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Non-null values of a numeric attribute.
pub fn numeric_values(df: &DataFrame, attribute: NumericAttribute) -> Vec<f64> {
    match float_column(df, attribute.column()) {
        Ok(values) => values.into_iter().flatten().collect(),
        Err(e) => {
            log::error!("Column {} unavailable: {e}", attribute.column());
            Vec::new()
        }
    }
}

/// Nullable values of a numeric column cast to `f64`.
pub fn float_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}

/// Species of every row; rows with an unknown or missing species are `None`.
pub fn species_column(df: &DataFrame) -> Vec<Option<Species>> {
    let species = df.column(SPECIES_COLUMN).and_then(|col| col.str().cloned());
    match species {
        Ok(ca) => ca
            .into_iter()
            .map(|v| v.and_then(|s| s.parse().ok()))
            .collect(),
        Err(e) => {
            log::error!("Column {SPECIES_COLUMN} unavailable: {e}");
            Vec::new()
        }
    }
}

/// Row counts per species, in [`Species::ALL`] order.
pub fn species_counts(df: &DataFrame) -> Vec<(Species, usize)> {
    let species = species_column(df);
    Species::ALL
        .into_iter()
        .map(|sp| (sp, species.iter().filter(|v| **v == Some(sp)).count()))
        .collect()
}

/// Display text for a single cell. Nulls render as `NA`, like the source file.
pub fn cell_text(df: &DataFrame, row: usize, column: &str) -> String {
    let Ok(col) = df.column(column) else {
        return String::new();
    };

    match col.get(row) {
        Ok(AnyValue::Null) | Err(_) => "NA".to_string(),
        Ok(value) => value.to_string().trim_matches('"').to_string(),
    }
}
