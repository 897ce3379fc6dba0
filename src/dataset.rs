//! Dataset loading for the dashboard
//!
//! Reads the three delimited tables (occurrences, safety recommendations and
//! contributing factors) once at startup. Only the columns the dashboards use
//! are deserialized; unknown columns are ignored and missing columns read as
//! absent values.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DataConfig;

/// Errors that can occur while loading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read dataset {path}{}: {source}", line_suffix(.line))]
    Read {
        path: PathBuf,
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" (line {})", l)).unwrap_or_default()
}

/// A recorded aeronautical safety event
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Occurrence {
    #[serde(rename = "ocorrencia_classificacao", default)]
    pub classification: Option<String>,

    #[serde(
        rename = "ocorrencia_latitude",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub latitude: Option<f64>,

    #[serde(
        rename = "ocorrencia_longitude",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub longitude: Option<f64>,

    #[serde(rename = "ocorrencia_cidade", default)]
    pub city: Option<String>,

    #[serde(rename = "ocorrencia_uf", default)]
    pub state: Option<String>,
}

impl Occurrence {
    /// Coordinates usable on a map: both present, finite and in range
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self
            .latitude
            .filter(|v| v.is_finite() && (-90.0..=90.0).contains(v))?;
        let lon = self
            .longitude
            .filter(|v| v.is_finite() && (-180.0..=180.0).contains(v))?;
        Some((lat, lon))
    }
}

/// A safety action suggested following an investigation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "recomendacao_status", default)]
    pub status: Option<String>,

    /// Acronym of the organisation the recommendation is addressed to
    #[serde(rename = "recomendacao_destinatario_sigla", default)]
    pub recipient: Option<String>,
}

/// A cited cause associated with an occurrence
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContributingFactor {
    #[serde(rename = "fator_nome", default)]
    pub name: Option<String>,

    #[serde(rename = "fator_area", default)]
    pub area: Option<String>,
}

/// The three tables, loaded once and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub occurrences: Vec<Occurrence>,
    pub recommendations: Vec<Recommendation>,
    pub factors: Vec<ContributingFactor>,
}

impl Datasets {
    /// Load all three tables as described by the data configuration
    pub fn load(config: &DataConfig) -> Result<Self, DatasetError> {
        let delimiter = config.delimiter_byte()?;

        let datasets = Self {
            occurrences: load_table(&config.occurrences_path(), delimiter)?,
            recommendations: load_table(&config.recommendations_path(), delimiter)?,
            factors: load_table(&config.factors_path(), delimiter)?,
        };

        info!(
            occurrences = datasets.occurrences.len(),
            recommendations = datasets.recommendations.len(),
            factors = datasets.factors.len(),
            "datasets loaded"
        );

        Ok(datasets)
    }

    /// Number of occurrences that cannot be placed on the map
    pub fn unmapped_occurrences(&self) -> usize {
        self.occurrences
            .iter()
            .filter(|o| o.coordinates().is_none())
            .count()
    }
}

/// Read a whole delimited file into records of type `T`
pub fn load_table<T: DeserializeOwned>(path: &Path, delimiter: u8) -> Result<Vec<T>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_table(file, delimiter).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        line: source.position().map(|p| p.line()),
        source,
    })?;

    debug!(path = %path.display(), rows = records.len(), "table read");
    Ok(records)
}

/// Deserialize records from any reader (header row required)
pub fn read_table<T, R>(reader: R, delimiter: u8) -> Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
    R: std::io::Read,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

/// Normalise a text cell: trimmed, empty means absent
pub(crate) fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
