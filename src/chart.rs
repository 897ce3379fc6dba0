//! Chart descriptions for the web frontend
//!
//! Figures are built server side and serialized in the JSON shape Plotly.js
//! expects (`{"data": [...], "layout": {...}}`), so the browser only has to
//! hand them to `Plotly.react`.

use serde::Serialize;

use crate::aggregate::{CategoryCounts, MISSING_LABEL};
use crate::config::MapSettings;

/// A complete Plotly figure
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    pub fn kind(&self) -> Option<ChartKind> {
        self.data.first().map(Trace::kind)
    }
}

/// Chart families rendered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
    Map,
}

/// A single trace; `type` carries the Plotly trace type
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Pie(PieTrace),
    Scattermapbox(MapTrace),
}

impl Trace {
    pub fn kind(&self) -> ChartKind {
        match self {
            Trace::Bar(_) => ChartKind::Bar,
            Trace::Pie(_) => ChartKind::Pie,
            Trace::Scattermapbox(_) => ChartKind::Map,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<usize>,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

/// One colour group of a scatter map
#[derive(Debug, Clone, Serialize)]
pub struct MapTrace {
    pub name: String,
    pub legendgroup: String,
    pub mode: &'static str,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub hovertext: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<Mapbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    pub margin: Margin,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Mapbox {
    pub style: String,
    pub zoom: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Center>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub t: u32,
    pub b: u32,
    pub l: u32,
    pub r: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            t: 60,
            b: 40,
            l: 40,
            r: 20,
        }
    }
}

fn base_layout(title: &str) -> Layout {
    Layout {
        title: Title::new(title),
        xaxis: None,
        yaxis: None,
        mapbox: None,
        legend: None,
        margin: Margin::default(),
    }
}

/// Bar chart of category counts
pub fn bar_chart(counts: &CategoryCounts, title: &str, x_label: &str, y_label: &str) -> Figure {
    let mut layout = base_layout(title);
    layout.xaxis = Some(Axis {
        title: Title::new(x_label),
    });
    layout.yaxis = Some(Axis {
        title: Title::new(y_label),
    });

    Figure {
        data: vec![Trace::Bar(BarTrace {
            x: counts.labels(),
            y: counts.counts(),
            hovertemplate: format!("{}=%{{x}}<br>{}=%{{y}}<extra></extra>", x_label, y_label),
        })],
        layout,
    }
}

/// Pie chart of category counts
pub fn pie_chart(counts: &CategoryCounts, title: &str) -> Figure {
    Figure {
        data: vec![Trace::Pie(PieTrace {
            labels: counts.labels(),
            values: counts.counts(),
        })],
        layout: base_layout(title),
    }
}

/// A point to place on the map
#[derive(Debug, Clone, Copy)]
pub struct MapPoint<'a> {
    pub lat: f64,
    pub lon: f64,
    /// Category used for colouring (one trace per category)
    pub category: Option<&'a str>,
    pub hover: Option<&'a str>,
}

/// Scatter map with one trace per category.
///
/// Traces follow the order in which categories first appear; the map is
/// centred on the mean position of the points.
pub fn scatter_map(
    points: &[MapPoint<'_>],
    title: &str,
    legend: &str,
    settings: &MapSettings,
) -> Figure {
    // Group order follows first appearance, not frequency
    let mut order: Vec<&str> = Vec::new();
    for point in points {
        let label = group_label(point);
        if !order.contains(&label) {
            order.push(label);
        }
    }

    let data = order
        .iter()
        .map(|&name| {
            let members: Vec<&MapPoint<'_>> =
                points.iter().filter(|p| group_label(p) == name).collect();
            Trace::Scattermapbox(MapTrace {
                name: name.to_string(),
                legendgroup: name.to_string(),
                mode: "markers",
                lat: members.iter().map(|p| p.lat).collect(),
                lon: members.iter().map(|p| p.lon).collect(),
                hovertext: members
                    .iter()
                    .map(|p| p.hover.unwrap_or_default().to_string())
                    .collect(),
            })
        })
        .collect();

    let center = if points.is_empty() {
        None
    } else {
        let n = points.len() as f64;
        Some(Center {
            lat: points.iter().map(|p| p.lat).sum::<f64>() / n,
            lon: points.iter().map(|p| p.lon).sum::<f64>() / n,
        })
    };

    let mut layout = base_layout(title);
    layout.mapbox = Some(Mapbox {
        style: settings.style.clone(),
        zoom: settings.zoom,
        center,
    });
    layout.legend = Some(Legend {
        title: Title::new(legend),
    });
    layout.margin = Margin {
        t: 60,
        b: 0,
        l: 0,
        r: 0,
    };

    Figure { data, layout }
}

fn group_label<'a>(point: &MapPoint<'a>) -> &'a str {
    point.category.unwrap_or(MISSING_LABEL)
}
