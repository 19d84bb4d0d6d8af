//! Data Export Module
//! Writes selected rows of the current view to CSV.

use polars::prelude::*;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to create {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("No rows selected")]
    NothingSelected,
}

/// Rows of `view` at the given positions, in ascending order.
/// Positions outside the view are ignored.
pub fn select_rows(view: &DataFrame, rows: &BTreeSet<usize>) -> Result<DataFrame, ExportError> {
    let indices: Vec<IdxSize> = rows
        .iter()
        .filter(|&&row| row < view.height())
        .map(|&row| row as IdxSize)
        .collect();

    if indices.is_empty() {
        return Err(ExportError::NothingSelected);
    }

    let idx = IdxCa::from_vec("row".into(), indices);
    Ok(view.take(&idx)?)
}

/// Write the selected rows of `view` to a CSV file with a header row.
/// Returns the number of rows written.
pub fn export_rows_csv(
    view: &DataFrame,
    rows: &BTreeSet<usize>,
    path: &Path,
) -> Result<usize, ExportError> {
    let mut selected = select_rows(view, rows)?;

    let mut file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_null_value("NA".to_string())
        .finish(&mut selected)?;

    log::info!("Exported {} rows to {}", selected.height(), path.display());
    Ok(selected.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{cell_text, DatasetLoader};
    use pretty_assertions::assert_eq;

    #[test]
    fn select_rows_keeps_order_and_skips_out_of_range() {
        let dataset = DatasetLoader::load_bundled().unwrap();
        let rows = BTreeSet::from([5, 0, 10_000]);

        let selected = select_rows(dataset.frame(), &rows).unwrap();

        assert_eq!(selected.height(), 2);
        assert_eq!(
            cell_text(&selected, 1, "bill_length_mm"),
            cell_text(dataset.frame(), 5, "bill_length_mm")
        );
    }

    #[test]
    fn empty_selection_is_an_error() {
        let dataset = DatasetLoader::load_bundled().unwrap();

        let err = select_rows(dataset.frame(), &BTreeSet::new()).err().unwrap();

        assert!(matches!(err, ExportError::NothingSelected));
    }

    #[test]
    fn exported_csv_round_trips_through_the_loader() {
        let dataset = DatasetLoader::load_bundled().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.csv");
        // Row 3 is the all-NA Adelie row
        let rows = BTreeSet::from([0, 3, 200]);

        let written = export_rows_csv(dataset.frame(), &rows, &path).unwrap();
        let reloaded = DatasetLoader::load_path(&path).unwrap();

        assert_eq!(written, 3);
        assert_eq!(reloaded.row_count(), 3);
        assert_eq!(cell_text(reloaded.frame(), 1, "body_mass_g"), "NA");
        assert_eq!(cell_text(reloaded.frame(), 0, "species"), "Adelie");
    }
}
