//! Radar/spider chart: one spoke per category, one polygon per series

use std::f64::consts::TAU;

use dashboard_types::{ChartType, GridShape, RadarChartData, RadarChartOptions, RenderSummary};

use crate::color::Color;
use crate::geometry::{Point, PolarFrame, Size};
use crate::surface::{DrawSurface, Paint, TextAlign, TextBaseline, TextStyle};

#[derive(Clone, Debug, PartialEq)]
pub struct RadarAxis {
    pub angle: f64,
    /// Spoke end on the outer ring
    pub end: Point,
    pub label: String,
    pub label_at: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub radius: f64,
    pub outer: bool,
    /// Polygon corners, one per axis (unused for circular rings)
    pub vertices: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadarSeriesLayout {
    pub stroke: Color,
    pub fill: Color,
    pub vertices: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadarLayout {
    pub frame: PolarFrame,
    pub axes: Vec<RadarAxis>,
    /// Outermost first
    pub rings: Vec<Ring>,
    pub series: Vec<RadarSeriesLayout>,
}

pub fn layout_radar(data: &RadarChartData, options: &RadarChartOptions, size: Size) -> RadarLayout {
    let frame = PolarFrame::new(size, options.radius_factor);
    let n = data.axes.len();
    if n == 0 {
        return RadarLayout {
            frame,
            axes: Vec::new(),
            rings: Vec::new(),
            series: Vec::new(),
        };
    }

    let angles: Vec<f64> = (0..n).map(|i| PolarFrame::axis_angle(i, n)).collect();

    let axes = data
        .axes
        .iter()
        .zip(&angles)
        .map(|(label, &angle)| RadarAxis {
            angle,
            end: frame.point(angle, frame.radius),
            label: label.clone(),
            label_at: frame.point(angle, frame.radius + options.label_offset),
        })
        .collect();

    let levels = options.levels.max(1);
    let rings = (1..=levels)
        .rev()
        .map(|level| {
            let radius = frame.radius / levels as f64 * level as f64;
            Ring {
                radius,
                outer: level == levels,
                vertices: angles.iter().map(|&a| frame.point(a, radius)).collect(),
            }
        })
        .collect();

    let series = data
        .series
        .iter()
        .map(|s| {
            let stroke = Color::parse_or_fallback(&s.color);
            let vertices = angles
                .iter()
                .enumerate()
                .map(|(i, &angle)| {
                    let value = s.values.get(i).copied().unwrap_or(0.0);
                    let value = if value.is_finite() { value } else { 0.0 };
                    let r = frame.radius * (value / options.max_value).clamp(0.0, 1.0);
                    frame.point(angle, r)
                })
                .collect();
            RadarSeriesLayout {
                stroke,
                fill: stroke.with_alpha(options.fill_opacity),
                vertices,
            }
        })
        .collect();

    RadarLayout {
        frame,
        axes,
        rings,
        series,
    }
}

fn trace_polygon<S: DrawSurface + ?Sized>(surface: &mut S, vertices: &[Point]) {
    surface.begin_path();
    if let Some((first, rest)) = vertices.split_first() {
        surface.move_to(*first);
        for v in rest {
            surface.line_to(*v);
        }
    }
    surface.close_path();
}

/// Paint a computed layout. Returns the number of series polygons filled.
pub fn draw_radar<S: DrawSurface + ?Sized>(
    surface: &mut S,
    layout: &RadarLayout,
    options: &RadarChartOptions,
    size: Size,
) -> u32 {
    surface.clear(size);
    if layout.axes.is_empty() {
        return 0;
    }

    let outer = Color::parse_or_fallback(&options.outer_ring_color);
    let inner = Color::parse_or_fallback(&options.inner_ring_color);
    for ring in &layout.rings {
        match options.grid_shape {
            GridShape::Polygon => trace_polygon(surface, &ring.vertices),
            GridShape::Circle => {
                surface.begin_path();
                surface.arc(layout.frame.center, ring.radius, 0.0, TAU, false);
            }
        }
        surface.stroke(if ring.outer { outer } else { inner }, 1.0);
    }

    let spoke = Color::parse_or_fallback(&options.spoke_color);
    let label_style = TextStyle {
        font: options.label_font.clone(),
        color: Color::parse_or_fallback(&options.label_color),
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
    };
    for axis in &layout.axes {
        surface.begin_path();
        surface.move_to(layout.frame.center);
        surface.line_to(axis.end);
        surface.stroke(spoke, 1.0);
        surface.fill_text(&axis.label, axis.label_at, &label_style);
    }

    let mut shapes = 0;
    for series in &layout.series {
        trace_polygon(surface, &series.vertices);
        surface.fill(&Paint::Solid(series.fill));
        surface.stroke(series.stroke, options.line_width);
        shapes += 1;

        for v in &series.vertices {
            surface.begin_path();
            surface.arc(*v, options.dot_radius, 0.0, TAU, false);
            surface.fill(&Paint::Solid(series.stroke));
        }
    }
    shapes
}

/// Lay out and draw in one pass
pub fn render_radar<S: DrawSurface + ?Sized>(
    surface: &mut S,
    data: &RadarChartData,
    options: &RadarChartOptions,
    size: Size,
) -> RenderSummary {
    let layout = layout_radar(data, options, size);
    let shapes = draw_radar(surface, &layout, options, size);
    log::debug!(
        "radar chart: {} axes, {} series, radius {:.1}",
        layout.axes.len(),
        shapes,
        layout.frame.radius
    );
    RenderSummary {
        chart_type: ChartType::Radar,
        width: size.width,
        height: size.height,
        shapes,
        legend: Vec::new(),
    }
}
