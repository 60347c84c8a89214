//! Area/trend chart: smoothed filled curves over horizontal gridlines

use std::f64::consts::TAU;

use dashboard_types::{AreaChartData, AreaChartOptions, ChartType, RenderSummary};

use crate::color::Color;
use crate::format::format_thousands;
use crate::geometry::{PlotFrame, Point, Size};
use crate::surface::{DrawSurface, LinearGradient, Paint, TextAlign, TextBaseline, TextStyle};

/// Horizontal gridline and its y-axis label
#[derive(Clone, Debug, PartialEq)]
pub struct Gridline {
    pub y: f64,
    pub value: f64,
    pub label: String,
}

/// Cubic Bezier piece between two consecutive vertices
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSegment {
    pub from: Point,
    pub cp1: Point,
    pub cp2: Point,
    pub to: Point,
}

impl CurveSegment {
    /// Both control points sit at the horizontal midpoint, each at the height
    /// of its own end, so the curve is flat where it meets a vertex.
    fn between(from: Point, to: Point) -> Self {
        let mid_x = (from.x + to.x) / 2.0;
        Self {
            from,
            cp1: Point::new(mid_x, from.y),
            cp2: Point::new(mid_x, to.y),
            to,
        }
    }

    /// Point on the curve at `t` in 0..=1
    pub fn at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point::new(
            b0 * self.from.x + b1 * self.cp1.x + b2 * self.cp2.x + b3 * self.to.x,
            b0 * self.from.y + b1 * self.cp1.y + b2 * self.cp2.y + b3 * self.to.y,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AreaSeriesLayout {
    pub color: Color,
    pub vertices: Vec<Point>,
    pub segments: Vec<CurveSegment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub at: Point,
}

/// Everything the area chart draws, in pixel space
#[derive(Clone, Debug, PartialEq)]
pub struct AreaLayout {
    pub frame: PlotFrame,
    pub max_value: f64,
    pub gridlines: Vec<Gridline>,
    pub series: Vec<AreaSeriesLayout>,
    pub labels: Vec<AxisLabel>,
}

pub fn layout_area(data: &AreaChartData, options: &AreaChartOptions, size: Size) -> AreaLayout {
    let frame = PlotFrame::new(size, &options.padding);
    let count = data.point_count();
    let max_value = data.max_value();

    if count == 0 {
        return AreaLayout {
            frame,
            max_value,
            gridlines: Vec::new(),
            series: Vec::new(),
            labels: Vec::new(),
        };
    }

    let intervals = options.grid_intervals.max(1);
    let gridlines = (0..=intervals)
        .map(|i| {
            let value = (max_value - max_value / intervals as f64 * i as f64).round();
            Gridline {
                y: frame.top + frame.height / intervals as f64 * i as f64,
                value,
                label: format_thousands(value),
            }
        })
        .collect();

    let series = data
        .series
        .iter()
        .map(|s| {
            let vertices: Vec<Point> = s
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| Point::new(frame.x_at(i, count), frame.y_at(*v, max_value)))
                .collect();
            let segments = vertices
                .windows(2)
                .map(|pair| CurveSegment::between(pair[0], pair[1]))
                .collect();
            AreaSeriesLayout {
                color: Color::parse_or_fallback(&s.color),
                vertices,
                segments,
            }
        })
        .collect();

    let every = options.label_every.max(1) as usize;
    let labels = data
        .labels
        .iter()
        .take(count)
        .enumerate()
        .step_by(every)
        .map(|(i, text)| AxisLabel {
            text: text.clone(),
            at: Point::new(frame.x_at(i, count), frame.baseline() + 20.0),
        })
        .collect();

    AreaLayout {
        frame,
        max_value,
        gridlines,
        series,
        labels,
    }
}

/// Paint a computed layout. Returns the number of filled shapes.
pub fn draw_area<S: DrawSurface + ?Sized>(
    surface: &mut S,
    layout: &AreaLayout,
    options: &AreaChartOptions,
    size: Size,
) -> u32 {
    surface.clear(size);
    let frame = &layout.frame;

    let grid_color = Color::parse_or_fallback(&options.grid_color);
    let axis_style = TextStyle {
        font: options.axis_font.clone(),
        color: Color::parse_or_fallback(&options.axis_label_color),
        align: TextAlign::Right,
        baseline: TextBaseline::Alphabetic,
    };
    for line in &layout.gridlines {
        surface.begin_path();
        surface.move_to(Point::new(frame.left, line.y));
        surface.line_to(Point::new(frame.right(), line.y));
        surface.stroke(grid_color, 1.0);
        surface.fill_text(
            &line.label,
            Point::new(frame.left - 10.0, line.y + 4.0),
            &axis_style,
        );
    }

    let mut shapes = 0;
    for series in &layout.series {
        match series.vertices.as_slice() {
            [] => {}
            [only] => {
                surface.begin_path();
                surface.arc(*only, options.marker_radius, 0.0, TAU, false);
                surface.fill(&Paint::Solid(series.color));
                shapes += 1;
            }
            [first, .., last] => {
                surface.begin_path();
                surface.move_to(Point::new(first.x, frame.baseline()));
                surface.line_to(*first);
                for segment in &series.segments {
                    surface.bezier_curve_to(segment.cp1, segment.cp2, segment.to);
                }
                surface.line_to(Point::new(last.x, frame.baseline()));
                surface.close_path();

                let top = series.color.with_alpha(series.color.a * options.fill_opacity);
                surface.fill(&Paint::LinearGradient(LinearGradient::vertical_fade(
                    frame.top,
                    frame.baseline(),
                    0.0,
                    top,
                )));
                shapes += 1;
            }
        }
    }

    let label_style = TextStyle {
        font: options.point_font.clone(),
        color: Color::parse_or_fallback(&options.point_label_color),
        align: TextAlign::Center,
        baseline: TextBaseline::Alphabetic,
    };
    for label in &layout.labels {
        surface.fill_text(&label.text, label.at, &label_style);
    }

    shapes
}

/// Lay out and draw in one pass
pub fn render_area<S: DrawSurface + ?Sized>(
    surface: &mut S,
    data: &AreaChartData,
    options: &AreaChartOptions,
    size: Size,
) -> RenderSummary {
    let layout = layout_area(data, options, size);
    let shapes = draw_area(surface, &layout, options, size);
    log::debug!(
        "area chart: {} series x {} points, max {}, {} fills",
        data.series.len(),
        data.point_count(),
        layout.max_value,
        shapes
    );
    RenderSummary {
        chart_type: ChartType::Area,
        width: size.width,
        height: size.height,
        shapes,
        legend: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{PathSegment, RecordingSurface};
    use crate::samples::hourly_trend;
    use dashboard_types::Series;

    fn size() -> Size {
        Size::new(640.0, 300.0)
    }

    fn two_series(a: Vec<f64>, b: Vec<f64>) -> AreaChartData {
        let labels = (0..a.len().max(b.len())).map(|i| format!("{i}:00")).collect();
        AreaChartData {
            labels,
            series: vec![
                Series::new("trend", "#60a5fa", a),
                Series::new("monthly", "#34d399", b),
            ],
        }
    }

    #[test]
    fn six_gridlines_labelled_from_max_down() {
        let data = two_series(vec![0.0, 50_000.0, 20_000.0], vec![10_000.0, 5_000.0, 0.0]);
        let layout = layout_area(&data, &AreaChartOptions::default(), size());
        let labels: Vec<_> = layout.gridlines.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            ["50,000", "40,000", "30,000", "20,000", "10,000", "0"]
        );
        assert_eq!(layout.gridlines[0].y, layout.frame.top);
        assert!((layout.gridlines[5].y - layout.frame.baseline()).abs() < 1e-9);
    }

    #[test]
    fn vertices_stay_inside_the_frame() {
        let data = hourly_trend();
        let layout = layout_area(&data, &AreaChartOptions::default(), size());
        for series in &layout.series {
            assert_eq!(series.vertices.len(), 18);
            for v in &series.vertices {
                assert!(layout.frame.contains(*v), "{v:?} outside {:?}", layout.frame);
            }
        }
    }

    #[test]
    fn curve_passes_through_every_point() {
        let data = two_series(vec![10.0, 80.0, 30.0, 60.0], vec![5.0, 5.0, 5.0, 5.0]);
        let layout = layout_area(&data, &AreaChartOptions::default(), size());
        let series = &layout.series[0];
        assert_eq!(series.segments.len(), 3);
        for (i, segment) in series.segments.iter().enumerate() {
            assert_eq!(segment.at(0.0), series.vertices[i]);
            let end = segment.at(1.0);
            assert!(end.distance(series.vertices[i + 1]) < 1e-9);
            assert_eq!(segment.cp1.x, segment.cp2.x);
            assert_eq!(segment.cp1.x, (segment.from.x + segment.to.x) / 2.0);
        }
        // tangents match at interior vertices: both control points are level with it
        for pair in series.segments.windows(2) {
            assert_eq!(pair[0].cp2.y, pair[0].to.y);
            assert_eq!(pair[1].cp1.y, pair[1].from.y);
        }
    }

    #[test]
    fn areas_close_to_the_baseline_with_a_fading_gradient() {
        let data = two_series(vec![10.0, 20.0], vec![5.0, 15.0]);
        let mut surface = RecordingSurface::new();
        let summary = render_area(&mut surface, &data, &AreaChartOptions::default(), size());
        assert_eq!(summary.shapes, 2);

        let fills: Vec<_> = surface.fills().collect();
        assert_eq!(fills.len(), 2);
        let (path, paint) = fills[0];
        let baseline = 300.0 - 40.0;
        assert_eq!(path.first(), Some(&PathSegment::MoveTo(Point::new(60.0, baseline))));
        assert_eq!(path.last(), Some(&PathSegment::Close));
        assert_eq!(
            path[path.len() - 2],
            PathSegment::LineTo(Point::new(610.0, baseline))
        );
        match paint {
            Paint::LinearGradient(g) => {
                assert_eq!(g.stops[0].1.a, 0.5);
                assert_eq!(g.stops[1].1.a, 0.0);
                assert_eq!(g.start.y, 30.0);
                assert_eq!(g.end.y, baseline);
            }
            other => panic!("expected gradient, got {other:?}"),
        }
    }

    #[test]
    fn x_labels_are_thinned_to_every_third_point() {
        let data = hourly_trend();
        let layout = layout_area(&data, &AreaChartOptions::default(), size());
        let texts: Vec<_> = layout.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["6:00", "9:00", "12:00", "15:00", "18:00", "21:00"]);
    }

    #[test]
    fn single_point_draws_a_marker() {
        let data = AreaChartData {
            labels: vec!["only".into()],
            series: vec![Series::new("s", "#60a5fa", vec![42.0])],
        };
        let mut surface = RecordingSurface::new();
        let summary = render_area(&mut surface, &data, &AreaChartOptions::default(), size());
        assert_eq!(summary.shapes, 1);
        let (path, paint) = surface.fills().next().unwrap();
        assert!(matches!(path[0], PathSegment::Arc { .. }));
        assert!(matches!(paint, Paint::Solid(_)));
    }

    #[test]
    fn empty_dataset_draws_nothing() {
        let mut surface = RecordingSurface::new();
        let summary = render_area(
            &mut surface,
            &AreaChartData::default(),
            &AreaChartOptions::default(),
            size(),
        );
        assert_eq!(summary.shapes, 0);
        assert!(surface.is_blank());
    }

    #[test]
    fn all_zero_values_sit_on_the_baseline() {
        let data = two_series(vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 0.0]);
        let layout = layout_area(&data, &AreaChartOptions::default(), size());
        assert!(layout
            .series
            .iter()
            .flat_map(|s| &s.vertices)
            .all(|v| v.y == layout.frame.baseline()));
    }
}
