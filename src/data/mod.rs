//! Data module - dataset loading, filtering and export

mod dataset;
mod export;
mod filter;
mod loader;

pub use dataset::{
    cell_text, column_names, float_column, numeric_values, species_column, Dataset,
    NumericAttribute, Species,
};
pub use export::export_rows_csv;
pub use filter::{filtered_data, FilterMode, SpeciesSelection};
pub use loader::DatasetLoader;
