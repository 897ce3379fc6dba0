//! # aero-dashboard - Aeronautical Safety Dashboards
//!
//! Loads three semicolon-separated tables about aeronautical safety and
//! serves an interactive page where a dropdown selects one of three
//! dashboards, each made of two Plotly charts.
//!
//! ## Usage
//!
//! ```bash
//! # Serve the dashboards for the CSV files in ./data
//! aero-dashboard ./data
//!
//! # Print the category tables instead of serving
//! aero-dashboard --summary ./data
//! ```
//!
//! ## Dashboards
//!
//! | Selector        | Charts                                                        |
//! |-----------------|---------------------------------------------------------------|
//! | `ocorrencias`   | occurrence map (by classification), occurrences per state     |
//! | `recomendacoes` | recommendation status (pie), recommendations per recipient    |
//! | `fatores`       | most frequent contributing factors, affected areas (pie)      |

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod logging;
pub mod report;
pub mod web;

pub use aggregate::{CategoryCount, CategoryCounts, MISSING_LABEL, value_counts};
pub use chart::{ChartKind, Figure, MapPoint, Trace, bar_chart, pie_chart, scatter_map};
pub use config::{
    ConfigError, DashboardConfig, DataConfig, MapSettings, ServerSection, load_config,
    load_config_file, parse_delimiter,
};
pub use dashboard::{
    DashboardContent, DashboardKind, DashboardLayout, PAGE_TITLE, UnknownDashboard,
    update_dashboard,
};
pub use dataset::{ContributingFactor, DatasetError, Datasets, Occurrence, Recommendation};
pub use logging::{Verbosity, init_logging};
pub use report::generate_summary;
