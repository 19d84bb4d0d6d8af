//! Dashboard Configuration
//! Widget labels, defaults and ranges, optionally overridden from a JSON file.

use crate::data::{FilterMode, NumericAttribute, Species};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "PENGUIN_DASHBOARD_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Everything the page shows that is not data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub sidebar_heading: String,
    pub github_url: String,
    /// CSV to load instead of the bundled dataset.
    pub data_path: Option<PathBuf>,
    pub filter_mode: FilterMode,
    pub default_attribute: NumericAttribute,
    pub plotly_bin_count: u32,
    pub plotly_bin_max: u32,
    pub seaborn_bin_count: u32,
    pub seaborn_bin_min: u32,
    pub seaborn_bin_max: u32,
    pub selected_species: Vec<Species>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Alvaro's King Penguin data".to_string(),
            sidebar_heading: "Sidebar".to_string(),
            github_url: "https://github.com/alvaroquintero28/cintel-02-data/blob/main/app.py"
                .to_string(),
            data_path: None,
            filter_mode: FilterMode::Passthrough,
            default_attribute: NumericAttribute::BillLengthMm,
            plotly_bin_count: 50,
            plotly_bin_max: 500,
            seaborn_bin_count: 100,
            seaborn_bin_min: 1,
            seaborn_bin_max: 200,
            selected_species: vec![Species::Adelie],
        }
    }
}

impl DashboardConfig {
    /// Load from the file named by [`CONFIG_ENV_VAR`], or use the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Loading dashboard config from {}", path.display());
                Self::from_json_file(&path)
            }
            None => {
                log::info!("{CONFIG_ENV_VAR} not set, using built-in dashboard config");
                Ok(Self::default())
            }
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate. Missing keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plotly_bin_max == 0 {
            return Err(ConfigError::Invalid(
                "plotly_bin_max must be at least 1".to_string(),
            ));
        }
        if !(1..=self.plotly_bin_max).contains(&self.plotly_bin_count) {
            return Err(ConfigError::Invalid(format!(
                "plotly_bin_count {} outside 1..={}",
                self.plotly_bin_count, self.plotly_bin_max
            )));
        }
        if self.seaborn_bin_min == 0 || self.seaborn_bin_min > self.seaborn_bin_max {
            return Err(ConfigError::Invalid(format!(
                "seaborn bin range {}..={} is empty or starts at 0",
                self.seaborn_bin_min, self.seaborn_bin_max
            )));
        }
        if !(self.seaborn_bin_min..=self.seaborn_bin_max).contains(&self.seaborn_bin_count) {
            return Err(ConfigError::Invalid(format!(
                "seaborn_bin_count {} outside {}..={}",
                self.seaborn_bin_count, self.seaborn_bin_min, self.seaborn_bin_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_match_the_page_literals() {
        let config = DashboardConfig::default();

        assert_eq!(config.title, "Alvaro's King Penguin data");
        assert_eq!(config.default_attribute, NumericAttribute::BillLengthMm);
        assert_eq!(config.plotly_bin_count, 50);
        assert_eq!(
            (config.seaborn_bin_min, config.seaborn_bin_max, config.seaborn_bin_count),
            (1, 200, 100)
        );
        assert_eq!(config.selected_species, vec![Species::Adelie]);
        assert_eq!(config.filter_mode, FilterMode::Passthrough);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json_str(
            r#"{ "title": "Penguins", "filter_mode": "species", "default_attribute": "body_mass_g" }"#,
        )
        .unwrap();

        assert_eq!(config.title, "Penguins");
        assert_eq!(config.filter_mode, FilterMode::Species);
        assert_eq!(config.default_attribute, NumericAttribute::BodyMassG);
        assert_eq!(config.plotly_bin_count, 50);
        assert_eq!(config.selected_species, vec![Species::Adelie]);
    }

    #[test]
    fn species_list_is_parsed() {
        let config =
            DashboardConfig::from_json_str(r#"{ "selected_species": ["Gentoo", "Chinstrap"] }"#)
                .unwrap();

        assert_eq!(
            config.selected_species,
            vec![Species::Gentoo, Species::Chinstrap]
        );
    }

    #[test]
    fn unknown_species_is_rejected() {
        let err = DashboardConfig::from_json_str(r#"{ "selected_species": ["Emperor"] }"#)
            .err()
            .unwrap();

        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn out_of_range_bins_are_rejected() {
        for json in [
            r#"{ "seaborn_bin_count": 0 }"#,
            r#"{ "seaborn_bin_count": 201 }"#,
            r#"{ "seaborn_bin_min": 50, "seaborn_bin_max": 10 }"#,
            r#"{ "plotly_bin_count": 0 }"#,
            r#"{ "plotly_bin_max": 10 }"#,
        ] {
            let err = DashboardConfig::from_json_str(json).err().unwrap();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}");
        }
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "plotly_bin_count": 20 }}"#).unwrap();

        let config = DashboardConfig::from_json_file(file.path()).unwrap();

        assert_eq!(config.plotly_bin_count, 20);
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DashboardConfig::from_json_file(&dir.path().join("nope.json"))
            .err()
            .unwrap();

        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
