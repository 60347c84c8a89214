//! Chart datasets and render results

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::records::TrafficSource;

/// Chart kinds drawn by the engine
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    /// Smoothed filled trend curves
    Area,
    /// Multi-axis spider chart
    Radar,
    /// Ring of percentage slices
    Donut,
}

/// One named sequence of values plotted across every category
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Series {
    /// Series label (legend text)
    pub label: String,
    /// One value per category, in category order
    pub values: Vec<f64>,
    /// CSS color
    pub color: String,
}

impl Series {
    pub fn new(label: impl Into<String>, color: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            color: color.into(),
        }
    }
}

/// Area chart input: x-axis labels and the series plotted over them
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct AreaChartData {
    /// X axis labels, one per point
    pub labels: Vec<String>,
    /// Series drawn back to front
    pub series: Vec<Series>,
}

impl AreaChartData {
    /// Number of plotted points (the longest series wins)
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }

    /// Largest value across every series
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Radar chart input: one axis per category
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct RadarChartData {
    /// Axis labels, clockwise from the top
    pub axes: Vec<String>,
    /// Series drawn in order, later ones on top
    pub series: Vec<Series>,
}

/// One donut slice
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct DonutSlice {
    /// Legend label
    pub label: String,
    /// Share of the full circle, 0-100
    pub percentage: f64,
    /// CSS fill color
    pub color: String,
}

/// Donut chart input, slices in draw order
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct DonutChartData {
    pub slices: Vec<DonutSlice>,
}

impl DonutChartData {
    /// Sum of all slice percentages
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.percentage).sum()
    }
}

impl From<&[TrafficSource]> for DonutChartData {
    fn from(sources: &[TrafficSource]) -> Self {
        Self {
            slices: sources
                .iter()
                .map(|source| DonutSlice {
                    label: source.source_name.clone(),
                    percentage: source.percentage,
                    color: source.color.clone(),
                })
                .collect(),
        }
    }
}

/// Legend row: color swatch, label, optional percentage text
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_text: Option<String>,
}

/// What a render pass put on the surface
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct RenderSummary {
    /// Chart kind
    pub chart_type: ChartType,
    /// Surface width in CSS pixels
    pub width: f64,
    /// Surface height in CSS pixels
    pub height: f64,
    /// Filled shapes drawn (areas, polygons, slices)
    pub shapes: u32,
    /// Legend rows, donut only
    #[serde(default)]
    pub legend: Vec<LegendEntry>,
}
