//! Configuration file support for aero-dashboard
//!
//! This module handles parsing `.aero-dashboard.toml` configuration files
//! that locate the datasets and tune the web server and map rendering.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # .aero-dashboard.toml
//!
//! [data]
//! # Directory the dataset file names are resolved against
//! dir = "data"
//! occurrences = "ocorrencia_clean.csv"
//! recommendations = "recomendacao_clean.csv"
//! factors = "fator_contribuinte_clean.csv"
//! # Field delimiter (single ASCII character)
//! delimiter = ";"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8050
//! open_browser = true
//!
//! [map]
//! style = "open-street-map"
//! zoom = 3.0
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid delimiter {0:?}: expected a single ASCII character")]
    InvalidDelimiter(String),
}

/// Dataset location section
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory the file names below are resolved against
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_occurrences")]
    pub occurrences: PathBuf,

    #[serde(default = "default_recommendations")]
    pub recommendations: PathBuf,

    #[serde(default = "default_factors")]
    pub factors: PathBuf,

    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_occurrences() -> PathBuf {
    PathBuf::from("ocorrencia_clean.csv")
}

fn default_recommendations() -> PathBuf {
    PathBuf::from("recomendacao_clean.csv")
}

fn default_factors() -> PathBuf {
    PathBuf::from("fator_contribuinte_clean.csv")
}

fn default_delimiter() -> String {
    ";".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: None,
            occurrences: default_occurrences(),
            recommendations: default_recommendations(),
            factors: default_factors(),
            delimiter: default_delimiter(),
        }
    }
}

impl DataConfig {
    /// Resolve a dataset file name against `dir`; absolute paths are kept as is
    pub fn resolve(&self, file: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) if file.is_relative() => dir.join(file),
            _ => file.to_path_buf(),
        }
    }

    pub fn occurrences_path(&self) -> PathBuf {
        self.resolve(&self.occurrences)
    }

    pub fn recommendations_path(&self) -> PathBuf {
        self.resolve(&self.recommendations)
    }

    pub fn factors_path(&self) -> PathBuf {
        self.resolve(&self.factors)
    }

    /// The delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        parse_delimiter(&self.delimiter)
    }
}

/// Parse a delimiter string into a single ASCII byte
pub fn parse_delimiter(value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ConfigError::InvalidDelimiter(value.to_string())),
    }
}

/// Web server section
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Open the dashboard in the default browser after startup
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_open_browser() -> bool {
    true
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            open_browser: default_open_browser(),
        }
    }
}

/// Map rendering section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapSettings {
    /// Mapbox base style (tile styles that need no token work out of the box)
    #[serde(default = "default_map_style")]
    pub style: String,

    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

fn default_map_style() -> String {
    "open-street-map".to_string()
}

fn default_zoom() -> f64 {
    3.0
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            style: default_map_style(),
            zoom: default_zoom(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub map: MapSettings,
}

impl DashboardConfig {
    /// Reject values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.data.delimiter_byte().map(|_| ())
    }
}

/// Load configuration starting from the given directory
///
/// Searches for `.aero-dashboard.toml` in the given directory and parent directories.
/// Relative `data.dir` values are resolved against the directory holding the file.
pub fn load_config(start_path: &Path) -> Result<DashboardConfig, ConfigError> {
    match find_config_file(start_path) {
        Some(path) => load_config_file(&path),
        None => Ok(DashboardConfig::default()),
    }
}

/// Load an explicit configuration file
pub fn load_config_file(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: DashboardConfig = toml::from_str(&content)?;
    config.validate()?;

    if let (Some(dir), Some(base)) = (&config.data.dir, path.parent()) {
        if dir.is_relative() {
            config.data.dir = Some(base.join(dir));
        }
    }

    Ok(config)
}

/// Find the config file by searching up the directory tree
fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let config_names = [".aero-dashboard.toml", "aero-dashboard.toml"];

    let mut current = if start_path.is_file() {
        start_path.parent()?.to_path_buf()
    } else {
        start_path.to_path_buf()
    };

    loop {
        for name in &config_names {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Move to parent directory
        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            break;
        }
    }

    None
}
