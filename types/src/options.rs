//! Renderer options with the dashboard's default look

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tsify::Tsify;

/// Invalid renderer option
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("padding must keep left > right >= top (got left {left}, right {right}, top {top})")]
    Padding { left: f64, right: f64, top: f64 },

    #[error("{field} must be within (0, 1), got {value}")]
    Ratio { field: &'static str, value: f64 },

    #[error("{field} must be at least 1")]
    Count { field: &'static str },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

/// Space reserved around the plot area, in CSS pixels
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 30.0,
            right: 30.0,
            bottom: 40.0,
            left: 60.0,
        }
    }
}

impl Padding {
    /// The y-axis labels live in the left gutter, so it has to be the widest.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let ordered = self.left > self.right && self.right >= self.top;
        if ordered && self.top >= 0.0 && self.bottom >= 0.0 {
            Ok(())
        } else {
            Err(OptionsError::Padding {
                left: self.left,
                right: self.right,
                top: self.top,
            })
        }
    }
}

// ============================================================================
// Area chart
// ============================================================================

/// Area/trend chart options
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(default)]
pub struct AreaChartOptions {
    /// Plot area padding
    pub padding: Padding,
    /// Number of intervals between horizontal gridlines (gridlines = intervals + 1)
    pub grid_intervals: u32,
    /// Draw an x label on every n-th point
    pub label_every: u32,
    /// Opacity of the gradient's top stop
    pub fill_opacity: f64,
    /// Gridline stroke color
    pub grid_color: String,
    /// Y-axis label color
    pub axis_label_color: String,
    /// X-axis label color
    pub point_label_color: String,
    /// Y-axis label font
    pub axis_font: String,
    /// X-axis label font
    pub point_font: String,
    /// Radius of the marker drawn for single-point datasets
    pub marker_radius: f64,
}

impl Default for AreaChartOptions {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            grid_intervals: 5,
            label_every: 3,
            fill_opacity: 0.5,
            grid_color: "#e5e7eb".to_string(),
            axis_label_color: "#9ca3af".to_string(),
            point_label_color: "#6b7280".to_string(),
            axis_font: "12px sans-serif".to_string(),
            point_font: "11px sans-serif".to_string(),
            marker_radius: 4.0,
        }
    }
}

impl AreaChartOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        self.padding.validate()?;
        if self.grid_intervals == 0 {
            return Err(OptionsError::Count {
                field: "grid_intervals",
            });
        }
        if self.label_every == 0 {
            return Err(OptionsError::Count {
                field: "label_every",
            });
        }
        if !(self.fill_opacity > 0.0 && self.fill_opacity <= 1.0) {
            return Err(OptionsError::Ratio {
                field: "fill_opacity",
                value: self.fill_opacity,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Radar chart
// ============================================================================

/// Shape of the radar chart's concentric gridlines
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum GridShape {
    /// Rings follow the axes as N-gons
    #[default]
    Polygon,
    /// True circles
    Circle,
}

/// Radar/spider chart options
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(default)]
pub struct RadarChartOptions {
    /// Outer radius as a fraction of the shorter surface side
    pub radius_factor: f64,
    /// Number of concentric rings
    pub levels: u32,
    /// Value mapped to the outer ring
    pub max_value: f64,
    /// Distance of axis labels beyond the outer ring
    pub label_offset: f64,
    /// Ring shape
    pub grid_shape: GridShape,
    /// Outer ring stroke
    pub outer_ring_color: String,
    /// Inner ring stroke
    pub inner_ring_color: String,
    /// Spoke stroke
    pub spoke_color: String,
    /// Axis label color
    pub label_color: String,
    /// Axis label font
    pub label_font: String,
    /// Opacity of the series polygon fill
    pub fill_opacity: f64,
    /// Width of the series outline
    pub line_width: f64,
    /// Radius of the vertex dots
    pub dot_radius: f64,
}

impl Default for RadarChartOptions {
    fn default() -> Self {
        Self {
            radius_factor: 0.35,
            levels: 5,
            max_value: 100.0,
            label_offset: 25.0,
            grid_shape: GridShape::Polygon,
            outer_ring_color: "#e5e7eb".to_string(),
            inner_ring_color: "#f3f4f6".to_string(),
            spoke_color: "#e5e7eb".to_string(),
            label_color: "#6b7280".to_string(),
            label_font: "12px sans-serif".to_string(),
            fill_opacity: 0.1,
            line_width: 2.0,
            dot_radius: 4.0,
        }
    }
}

impl RadarChartOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.radius_factor > 0.0 && self.radius_factor < 1.0) {
            return Err(OptionsError::Ratio {
                field: "radius_factor",
                value: self.radius_factor,
            });
        }
        if self.levels == 0 {
            return Err(OptionsError::Count { field: "levels" });
        }
        if !(self.max_value > 0.0) {
            return Err(OptionsError::NotPositive {
                field: "max_value",
                value: self.max_value,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Donut chart
// ============================================================================

/// Donut/ring chart options
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(default)]
pub struct DonutChartOptions {
    /// Outer radius as a fraction of the shorter surface side
    pub radius_factor: f64,
    /// Inner radius as a fraction of the outer radius
    pub inner_ratio: f64,
    /// Paint over the hole after the slices; `None` leaves it transparent
    pub hole_color: Option<String>,
    /// Include "NN%" in legend rows
    pub show_percentages: bool,
    /// Rescale slices so they always close the ring
    pub normalize: bool,
}

impl Default for DonutChartOptions {
    fn default() -> Self {
        Self {
            radius_factor: 0.35,
            inner_ratio: 0.6,
            hole_color: Some("#ffffff".to_string()),
            show_percentages: false,
            normalize: false,
        }
    }
}

impl DonutChartOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.radius_factor > 0.0 && self.radius_factor < 1.0) {
            return Err(OptionsError::Ratio {
                field: "radius_factor",
                value: self.radius_factor,
            });
        }
        if !(self.inner_ratio > 0.0 && self.inner_ratio < 1.0) {
            return Err(OptionsError::Ratio {
                field: "inner_ratio",
                value: self.inner_ratio,
            });
        }
        Ok(())
    }
}
