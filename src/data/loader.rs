//! Dataset Loader Module
//! Parses the bundled Palmer Penguins CSV (or an equivalent file) with Polars.

use super::dataset::{Dataset, COLUMNS};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// The Palmer Penguins measurements, embedded at compile time.
pub const BUNDLED_CSV: &[u8] = include_bytes!("../../assets/penguins.csv");

/// Measurement columns stored as floats regardless of the inferred dtype.
const FLOAT_COLUMNS: [&str; 4] = [
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to parse CSV: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Dataset has no rows")]
    Empty,
}

/// Loads the observation dataset once at startup.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load the dataset compiled into the binary.
    pub fn load_bundled() -> Result<Dataset, LoaderError> {
        Self::load_bytes(BUNDLED_CSV.to_vec())
    }

    /// Load an equivalent CSV from disk.
    pub fn load_path(path: &Path) -> Result<Dataset, LoaderError> {
        let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_bytes(bytes)
    }

    /// Parse CSV bytes, validate the schema and normalise measurement dtypes.
    pub fn load_bytes(bytes: Vec<u8>) -> Result<Dataset, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .map_parse_options(|opts| {
                opts.with_null_values(Some(NullValues::AllColumnsSingle("NA".into())))
            })
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        Self::validate(&df)?;

        let casts: Vec<Expr> = FLOAT_COLUMNS
            .iter()
            .map(|name| col(*name).cast(DataType::Float64))
            .collect();

        // Keep file column order; extra columns are dropped
        let df = df
            .lazy()
            .with_columns(casts)
            .select(COLUMNS.iter().map(|name| col(*name)).collect::<Vec<_>>())
            .collect()?;

        log::info!(
            "Loaded penguin dataset: {} rows, {} columns",
            df.height(),
            df.width()
        );

        let dataset = Dataset::new(df);
        log::debug!("Columns: {:?}", dataset.column_names());
        for (species, count) in dataset.species_counts() {
            log::debug!("  {species}: {count} rows");
        }

        Ok(dataset)
    }

    fn validate(df: &DataFrame) -> Result<(), LoaderError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        if let Some(missing) = COLUMNS.iter().find(|c| !names.iter().any(|n| n == *c)) {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        if df.height() == 0 {
            return Err(LoaderError::Empty);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::{column_names, numeric_values, NumericAttribute, Species};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn bundled_dataset_has_expected_shape() {
        let dataset = DatasetLoader::load_bundled().unwrap();

        assert_eq!(dataset.row_count(), 344);
        assert_eq!(
            column_names(dataset.frame()),
            COLUMNS.map(String::from).to_vec()
        );
    }

    #[test]
    fn bundled_dataset_species_counts() {
        let dataset = DatasetLoader::load_bundled().unwrap();

        assert_eq!(
            dataset.species_counts(),
            vec![
                (Species::Adelie, 152),
                (Species::Gentoo, 124),
                (Species::Chinstrap, 68),
            ]
        );
    }

    #[test]
    fn na_cells_become_nulls() {
        let dataset = DatasetLoader::load_bundled().unwrap();

        // Two rows have no measurements at all
        let bill = numeric_values(dataset.frame(), NumericAttribute::BillLengthMm);
        assert_eq!(bill.len(), 342);

        let sex = dataset.frame().column("sex").unwrap();
        assert_eq!(sex.null_count(), 11);
    }

    #[test]
    fn measurements_are_floats() {
        let dataset = DatasetLoader::load_bundled().unwrap();

        for name in FLOAT_COLUMNS {
            let dtype = dataset.frame().column(name).unwrap().dtype().clone();
            assert_eq!(dtype, DataType::Float64, "column {name}");
        }
    }

    #[test]
    fn missing_column_is_rejected() {
        let csv = "species,island\nAdelie,Dream\n";
        let err = DatasetLoader::load_bytes(csv.as_bytes().to_vec()).err().unwrap();

        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "bill_length_mm"));
    }

    #[test]
    fn header_only_file_is_empty() {
        let csv = format!("{}\n", COLUMNS.join(","));
        let err = DatasetLoader::load_bytes(csv.into_bytes()).err().unwrap();

        assert!(matches!(err, LoaderError::Empty));
    }

    #[test]
    fn loads_equivalent_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", COLUMNS.join(",")).unwrap();
        writeln!(file, "Gentoo,Biscoe,46.1,13.2,211,4500,female,2007").unwrap();
        writeln!(file, "Adelie,Dream,NA,NA,NA,NA,NA,2008").unwrap();

        let dataset = DatasetLoader::load_path(file.path()).unwrap();

        assert_eq!(dataset.row_count(), 2);
        assert_eq!(
            numeric_values(dataset.frame(), NumericAttribute::BodyMassG),
            vec![4500.0]
        );
    }

    #[test]
    fn unreadable_path_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetLoader::load_path(&dir.path().join("absent.csv"))
            .err()
            .unwrap();

        assert!(matches!(err, LoaderError::Io { .. }));
    }
}
