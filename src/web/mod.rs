//! Web frontend for the dashboards
//!
//! Serves a single page with a dropdown and a chart area. Selecting a
//! dashboard fetches its two Plotly figures from the JSON API:
//! - `ocorrencias`: occurrence map + occurrences per state
//! - `recomendacoes`: recommendation status + recommendations per recipient
//! - `fatores`: most frequent contributing factors + affected areas

pub mod routes;
pub mod server;

pub use server::{AppState, ServerConfig, start_server};
