//! Donut/ring chart

use std::f64::consts::{FRAC_PI_2, TAU};

use dashboard_types::{
    ChartType, DonutChartData, DonutChartOptions, DonutSlice, LegendEntry, RenderSummary,
};

use crate::color::Color;
use crate::format::format_plain;
use crate::geometry::{Point, Size};
use crate::surface::{DrawSurface, Paint};

/// Angular extent of one slice, radians clockwise from 3 o'clock
#[derive(Clone, Debug, PartialEq)]
pub struct SliceArc {
    pub label: String,
    pub color: Color,
    pub start: f64,
    pub end: f64,
}

impl SliceArc {
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DonutLayout {
    pub center: Point,
    pub radius: f64,
    pub inner_radius: f64,
    pub slices: Vec<SliceArc>,
    pub legend: Vec<LegendEntry>,
}

/// Percentage a slice may occupy: negative or non-finite shares count as 0
fn drawable_share(slice: &DonutSlice) -> f64 {
    if slice.percentage.is_finite() && slice.percentage >= 0.0 {
        slice.percentage
    } else {
        log::warn!(
            "donut slice {:?} has unusable percentage {}; drawing it empty",
            slice.label,
            slice.percentage
        );
        0.0
    }
}

/// Slices start at 12 o'clock and follow each other without gaps. Unless
/// `normalize` is set, percentages are taken as given: a total under 100
/// leaves the ring open and a total over 100 overlaps it.
pub fn layout_donut(data: &DonutChartData, options: &DonutChartOptions, size: Size) -> DonutLayout {
    let radius = size.shorter_side() * options.radius_factor;
    let shares: Vec<f64> = data.slices.iter().map(drawable_share).collect();
    let total: f64 = shares.iter().sum();
    let scale = if options.normalize && total > 0.0 {
        100.0 / total
    } else {
        1.0
    };

    let mut angle = -FRAC_PI_2;
    let mut slices = Vec::with_capacity(data.slices.len());
    let mut legend = Vec::with_capacity(data.slices.len());
    for (slice, &percentage) in data.slices.iter().zip(&shares) {
        let sweep = percentage * scale / 100.0 * TAU;
        slices.push(SliceArc {
            label: slice.label.clone(),
            color: Color::parse_or_fallback(&slice.color),
            start: angle,
            end: angle + sweep,
        });
        angle += sweep;

        legend.push(LegendEntry {
            label: slice.label.clone(),
            color: slice.color.clone(),
            percentage_text: options
                .show_percentages
                .then(|| format!("{}%", format_plain(slice.percentage))),
        });
    }

    DonutLayout {
        center: size.center(),
        radius,
        inner_radius: radius * options.inner_ratio,
        slices,
        legend,
    }
}

/// Paint a computed layout. Returns the number of slices filled.
pub fn draw_donut<S: DrawSurface + ?Sized>(
    surface: &mut S,
    layout: &DonutLayout,
    options: &DonutChartOptions,
    size: Size,
) -> u32 {
    surface.clear(size);
    if layout.slices.is_empty() {
        return 0;
    }

    let mut shapes = 0;
    for slice in &layout.slices {
        if slice.sweep() <= 0.0 {
            continue;
        }
        surface.begin_path();
        surface.arc(layout.center, layout.radius, slice.start, slice.end, false);
        surface.arc(layout.center, layout.inner_radius, slice.end, slice.start, true);
        surface.close_path();
        surface.fill(&Paint::Solid(slice.color));
        shapes += 1;
    }

    if let Some(hole) = options.hole_color.as_deref() {
        surface.begin_path();
        surface.arc(layout.center, layout.inner_radius, 0.0, TAU, false);
        surface.fill(&Paint::Solid(Color::parse_or_fallback(hole)));
    }
    shapes
}

/// Lay out and draw in one pass; the summary carries the legend rows
pub fn render_donut<S: DrawSurface + ?Sized>(
    surface: &mut S,
    data: &DonutChartData,
    options: &DonutChartOptions,
    size: Size,
) -> RenderSummary {
    let layout = layout_donut(data, options, size);
    let shapes = draw_donut(surface, &layout, options, size);
    log::debug!(
        "donut chart: {} slices, {}% total",
        layout.slices.len(),
        format_plain(data.total())
    );
    RenderSummary {
        chart_type: ChartType::Donut,
        width: size.width,
        height: size.height,
        shapes,
        legend: layout.legend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{PathSegment, RecordingSurface};

    fn slice(label: &str, percentage: f64, color: &str) -> DonutSlice {
        DonutSlice {
            label: label.into(),
            percentage,
            color: color.into(),
        }
    }

    fn size() -> Size {
        Size::new(180.0, 180.0)
    }

    fn degrees(rad: f64) -> f64 {
        rad.to_degrees()
    }

    #[test]
    fn sixty_forty_tiles_the_circle() {
        let data = DonutChartData {
            slices: vec![slice("A", 60.0, "#60a5fa"), slice("B", 40.0, "#34d399")],
        };
        let layout = layout_donut(&data, &DonutChartOptions::default(), size());
        let a = &layout.slices[0];
        let b = &layout.slices[1];
        assert!((degrees(a.start) + 90.0).abs() < 1e-9);
        assert!((degrees(a.end) - 126.0).abs() < 1e-9);
        assert_eq!(a.end, b.start);
        assert!((degrees(b.end) - 270.0).abs() < 1e-9);
        assert!((a.sweep() + b.sweep() - TAU).abs() < 1e-12);
    }

    #[test]
    fn total_sweep_follows_the_percentage_sum() {
        let data = DonutChartData {
            slices: vec![
                slice("a", 35.0, "#111"),
                slice("b", 25.0, "#222"),
                slice("c", 20.0, "#333"),
            ],
        };
        let layout = layout_donut(&data, &DonutChartOptions::default(), size());
        let swept: f64 = layout.slices.iter().map(SliceArc::sweep).sum();
        assert!((swept - TAU * 80.0 / 100.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_closes_an_incomplete_ring() {
        let data = DonutChartData {
            slices: vec![slice("a", 30.0, "#111"), slice("b", 20.0, "#222")],
        };
        let options = DonutChartOptions {
            normalize: true,
            ..Default::default()
        };
        let layout = layout_donut(&data, &options, size());
        let swept: f64 = layout.slices.iter().map(SliceArc::sweep).sum();
        assert!((swept - TAU).abs() < 1e-12);
    }

    #[test]
    fn normalize_ignores_unusable_slices() {
        let options = DonutChartOptions {
            normalize: true,
            ..Default::default()
        };
        for bad in [-10.0, f64::NAN, f64::INFINITY] {
            let data = DonutChartData {
                slices: vec![
                    slice("bad", bad, "#111"),
                    slice("a", 30.0, "#222"),
                    slice("b", 20.0, "#333"),
                ],
            };
            let layout = layout_donut(&data, &options, size());
            let swept: f64 = layout.slices.iter().map(SliceArc::sweep).sum();
            assert!((swept - TAU).abs() < 1e-12, "{bad}: swept {swept}");
            assert_eq!(layout.slices[0].sweep(), 0.0);
            assert!((layout.slices[1].sweep() - TAU * 0.6).abs() < 1e-12);
        }
    }

    #[test]
    fn slices_are_annular_sectors() {
        let data = DonutChartData {
            slices: vec![slice("A", 100.0, "#60a5fa")],
        };
        let mut surface = RecordingSurface::new();
        render_donut(&mut surface, &data, &DonutChartOptions::default(), size());
        let (path, paint) = surface.fills().next().unwrap();
        assert_eq!(paint, &Paint::Solid(Color::rgb(0x60, 0xa5, 0xfa)));
        match path {
            [PathSegment::Arc {
                radius: outer,
                anticlockwise: false,
                ..
            }, PathSegment::Arc {
                radius: inner,
                anticlockwise: true,
                ..
            }, PathSegment::Close] => {
                assert_eq!(*outer, 180.0 * 0.35);
                assert!((*inner - outer * 0.6).abs() < 1e-12);
            }
            other => panic!("unexpected path {other:?}"),
        }
    }

    #[test]
    fn hole_is_painted_last() {
        let data = DonutChartData {
            slices: vec![slice("A", 50.0, "#60a5fa"), slice("B", 50.0, "#34d399")],
        };
        let mut surface = RecordingSurface::new();
        let summary = render_donut(&mut surface, &data, &DonutChartOptions::default(), size());
        assert_eq!(summary.shapes, 2);
        let fills: Vec<_> = surface.fills().collect();
        assert_eq!(fills.len(), 3);
        assert_eq!(fills[2].1, &Paint::Solid(Color::WHITE));

        let options = DonutChartOptions {
            hole_color: None,
            ..Default::default()
        };
        let mut surface = RecordingSurface::new();
        render_donut(&mut surface, &data, &options, size());
        assert_eq!(surface.fills().count(), 2);
    }

    #[test]
    fn legend_mirrors_draw_order() {
        let data = DonutChartData {
            slices: vec![slice("Search", 45.5, "#60a5fa"), slice("Direct", 30.0, "#34d399")],
        };
        let mut surface = RecordingSurface::new();
        let hidden = render_donut(&mut surface, &data, &DonutChartOptions::default(), size());
        assert!(hidden.legend.iter().all(|e| e.percentage_text.is_none()));

        let options = DonutChartOptions {
            show_percentages: true,
            ..Default::default()
        };
        let shown = render_donut(&mut surface, &data, &options, size());
        let rows: Vec<_> = shown
            .legend
            .iter()
            .map(|e| (e.label.as_str(), e.percentage_text.as_deref()))
            .collect();
        assert_eq!(rows, [("Search", Some("45.5%")), ("Direct", Some("30%"))]);
    }

    #[test]
    fn empty_dataset_draws_nothing() {
        let mut surface = RecordingSurface::new();
        let summary = render_donut(
            &mut surface,
            &DonutChartData::default(),
            &DonutChartOptions::default(),
            size(),
        );
        assert!(surface.is_blank());
        assert!(summary.legend.is_empty());
        assert_eq!(summary.shapes, 0);
    }

    #[test]
    fn negative_slices_are_drawn_empty() {
        let data = DonutChartData {
            slices: vec![slice("bad", -10.0, "#111"), slice("ok", 50.0, "#222")],
        };
        let layout = layout_donut(&data, &DonutChartOptions::default(), size());
        assert_eq!(layout.slices[0].sweep(), 0.0);
        assert!((layout.slices[1].start + FRAC_PI_2).abs() < 1e-12);
    }
}
