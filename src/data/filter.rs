//! Data Filter Module
//! Produces the view of the dataset that every widget displays.

use super::dataset::{Dataset, Species, SPECIES_COLUMN};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// How the species checkbox group affects the displayed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// The selection is tracked but never applied: every widget shows all rows.
    #[default]
    Passthrough,
    /// Keep only rows whose species is selected. Nothing selected shows nothing.
    Species,
}

/// Current state of the species checkbox group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpeciesSelection {
    selected: BTreeSet<Species>,
}

impl SpeciesSelection {
    pub fn new(species: impl IntoIterator<Item = Species>) -> Self {
        Self {
            selected: species.into_iter().collect(),
        }
    }

    #[cfg(test)]
    pub fn all() -> Self {
        Self::new(Species::ALL)
    }

    pub fn contains(&self, species: Species) -> bool {
        self.selected.contains(&species)
    }

    pub fn set(&mut self, species: Species, selected: bool) {
        if selected {
            self.selected.insert(species);
        } else {
            self.selected.remove(&species);
        }
    }

    /// Number of selected species.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Species> + '_ {
        self.selected.iter().copied()
    }
}

/// Return the dataset to be displayed and plotted.
///
/// With [`FilterMode::Passthrough`] this is the whole loaded dataset for any
/// selection. With [`FilterMode::Species`] only rows of selected species are
/// kept. The loaded frame is only read; a new frame is returned either way.
pub fn filtered_data(
    dataset: &Dataset,
    mode: FilterMode,
    selection: &SpeciesSelection,
) -> Result<DataFrame, FilterError> {
    match mode {
        FilterMode::Passthrough => Ok(dataset.frame().clone()),
        FilterMode::Species => {
            let predicate = selection
                .iter()
                .map(|sp| col(SPECIES_COLUMN).eq(lit(sp.as_str())))
                .reduce(|acc, expr| acc.or(expr))
                .unwrap_or_else(|| lit(false));

            let view = dataset.frame().clone().lazy().filter(predicate).collect()?;

            log::debug!(
                "Species filter kept {} of {} rows ({} species selected)",
                view.height(),
                dataset.row_count(),
                selection.count()
            );

            Ok(view)
        }
    }
}
