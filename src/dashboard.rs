//! Dashboard selection and content
//!
//! The page shows one dropdown; each option maps to a pair of charts built
//! from one of the three tables.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::aggregate::value_counts;
use crate::chart::{Figure, MapPoint, bar_chart, pie_chart, scatter_map};
use crate::config::MapSettings;
use crate::dataset::{Datasets, text};

/// Page heading
pub const PAGE_TITLE: &str = "Dashboards de Segurança Aeronáutica";

const QUANTITY: &str = "Quantidade";

/// The dashboards offered in the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashboardKind {
    #[default]
    Occurrences,
    Recommendations,
    Factors,
}

impl DashboardKind {
    pub const ALL: [DashboardKind; 3] = [
        DashboardKind::Occurrences,
        DashboardKind::Recommendations,
        DashboardKind::Factors,
    ];

    /// Selector value sent by the dropdown
    pub fn value(&self) -> &'static str {
        match self {
            DashboardKind::Occurrences => "ocorrencias",
            DashboardKind::Recommendations => "recomendacoes",
            DashboardKind::Factors => "fatores",
        }
    }

    /// Human-readable dropdown label
    pub fn label(&self) -> &'static str {
        match self {
            DashboardKind::Occurrences => "Ocorrências Aeronáuticas",
            DashboardKind::Recommendations => "Recomendações de Segurança",
            DashboardKind::Factors => "Fatores Contribuintes",
        }
    }
}

impl fmt::Display for DashboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Returned when a selector value names no dashboard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown dashboard '{0}'")]
pub struct UnknownDashboard(pub String);

impl FromStr for DashboardKind {
    type Err = UnknownDashboard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardKind::ALL
            .into_iter()
            .find(|kind| kind.value() == s.trim())
            .ok_or_else(|| UnknownDashboard(s.to_string()))
    }
}

/// A dropdown entry
#[derive(Debug, Clone, Serialize)]
pub struct DropdownOption {
    pub label: &'static str,
    pub value: &'static str,
}

/// Static page structure served to the frontend
#[derive(Debug, Clone, Serialize)]
pub struct DashboardLayout {
    pub title: &'static str,
    pub options: Vec<DropdownOption>,
    pub value: &'static str,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            title: PAGE_TITLE,
            options: DashboardKind::ALL
                .iter()
                .map(|kind| DropdownOption {
                    label: kind.label(),
                    value: kind.value(),
                })
                .collect(),
            value: DashboardKind::default().value(),
        }
    }
}

/// The charts shown for one dropdown selection
#[derive(Debug, Clone, Serialize)]
pub struct DashboardContent {
    pub value: &'static str,
    pub label: &'static str,
    pub charts: Vec<Figure>,
}

impl DashboardContent {
    pub fn titles(&self) -> Vec<&str> {
        self.charts.iter().map(Figure::title).collect()
    }
}

/// Build the two charts for the selected dashboard
pub fn update_dashboard(
    kind: DashboardKind,
    datasets: &Datasets,
    map: &MapSettings,
) -> DashboardContent {
    let charts = match kind {
        DashboardKind::Occurrences => occurrence_charts(datasets, map),
        DashboardKind::Recommendations => recommendation_charts(datasets),
        DashboardKind::Factors => factor_charts(datasets),
    };

    DashboardContent {
        value: kind.value(),
        label: kind.label(),
        charts,
    }
}

fn occurrence_charts(datasets: &Datasets, map: &MapSettings) -> Vec<Figure> {
    let points: Vec<MapPoint<'_>> = datasets
        .occurrences
        .iter()
        .filter_map(|o| {
            let (lat, lon) = o.coordinates()?;
            Some(MapPoint {
                lat,
                lon,
                category: text(&o.classification),
                hover: text(&o.city),
            })
        })
        .collect();

    let by_state = value_counts(datasets.occurrences.iter().map(|o| text(&o.state)));

    vec![
        scatter_map(&points, "Mapa de Ocorrências", "Classificação", map),
        bar_chart(&by_state, "Ocorrências por Estado", "Estado", QUANTITY),
    ]
}

fn recommendation_charts(datasets: &Datasets) -> Vec<Figure> {
    let by_status = value_counts(datasets.recommendations.iter().map(|r| text(&r.status)));
    let by_recipient = value_counts(datasets.recommendations.iter().map(|r| text(&r.recipient)));

    vec![
        pie_chart(&by_status, "Status das Recomendações"),
        bar_chart(
            &by_recipient,
            "Recomendações por Destinatário",
            "Destinatário",
            QUANTITY,
        ),
    ]
}

fn factor_charts(datasets: &Datasets) -> Vec<Figure> {
    let by_name = value_counts(datasets.factors.iter().map(|f| text(&f.name)));
    let by_area = value_counts(datasets.factors.iter().map(|f| text(&f.area)));

    vec![
        bar_chart(
            &by_name,
            "Fatores Contribuintes Mais Frequentes",
            "Fator",
            QUANTITY,
        ),
        pie_chart(&by_area, "Distribuição por Área Afetada"),
    ]
}
