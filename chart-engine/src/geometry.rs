//! Data space to pixel space mappings
//!
//! Frames are derived from the surface size on every draw and never stored
//! between renders.

use std::f64::consts::{FRAC_PI_2, TAU};

use dashboard_types::Padding;

/// Surface size in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Cartesian plot area inside the padding
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotFrame {
    /// Negative extents (surface smaller than the padding) collapse to zero.
    pub fn new(size: Size, padding: &Padding) -> Self {
        Self {
            left: padding.left,
            top: padding.top,
            width: (size.width - padding.left - padding.right).max(0.0),
            height: (size.height - padding.top - padding.bottom).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge of the plot, where areas are closed
    pub fn baseline(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal position of point `index` out of `count`
    pub fn x_at(&self, index: usize, count: usize) -> f64 {
        if count < 2 {
            return self.left;
        }
        self.left + index as f64 * self.width / (count - 1) as f64
    }

    /// Linear `[0, max] -> [baseline, top]`; out-of-domain values are clamped.
    pub fn y_at(&self, value: f64, max: f64) -> f64 {
        if !(max > 0.0) || !value.is_finite() {
            return self.baseline();
        }
        let ratio = (value / max).clamp(0.0, 1.0);
        self.baseline() - ratio * self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        const EPS: f64 = 1e-9;
        p.x >= self.left - EPS
            && p.x <= self.right() + EPS
            && p.y >= self.top - EPS
            && p.y <= self.baseline() + EPS
    }
}

/// Polar frame centered on the surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarFrame {
    pub center: Point,
    pub radius: f64,
}

impl PolarFrame {
    /// Radius is `radius_factor` of the shorter surface side
    pub fn new(size: Size, radius_factor: f64) -> Self {
        Self {
            center: size.center(),
            radius: size.shorter_side() * radius_factor,
        }
    }

    /// Angle of axis `index` out of `count`, clockwise from 12 o'clock
    pub fn axis_angle(index: usize, count: usize) -> f64 {
        if count == 0 {
            return -FRAC_PI_2;
        }
        TAU * index as f64 / count as f64 - FRAC_PI_2
    }

    pub fn point(&self, angle: f64, r: f64) -> Point {
        Point::new(
            self.center.x + r * angle.cos(),
            self.center.y + r * angle.sin(),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.distance(self.center) <= self.radius + 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> PlotFrame {
        PlotFrame::new(Size::new(600.0, 300.0), &Padding::default())
    }

    #[test]
    fn plot_frame_subtracts_padding() {
        let f = frame();
        assert_eq!(f.left, 60.0);
        assert_eq!(f.top, 30.0);
        assert_eq!(f.width, 510.0);
        assert_eq!(f.height, 230.0);
        assert_eq!(f.baseline(), 260.0);
        assert_eq!(f.right(), 570.0);
    }

    #[test]
    fn x_steps_span_the_frame() {
        let f = frame();
        assert_eq!(f.x_at(0, 18), f.left);
        assert!((f.x_at(17, 18) - f.right()).abs() < 1e-9);
        assert_eq!(f.x_at(0, 1), f.left);
    }

    #[test]
    fn y_maps_and_clamps() {
        let f = frame();
        assert_eq!(f.y_at(0.0, 100.0), f.baseline());
        assert_eq!(f.y_at(100.0, 100.0), f.top);
        assert_eq!(f.y_at(50.0, 100.0), f.top + f.height / 2.0);
        assert_eq!(f.y_at(-10.0, 100.0), f.baseline());
        assert_eq!(f.y_at(10.0, 0.0), f.baseline());
    }

    #[test]
    fn tiny_surfaces_collapse() {
        let f = PlotFrame::new(Size::new(20.0, 20.0), &Padding::default());
        assert_eq!(f.width, 0.0);
        assert_eq!(f.height, 0.0);
    }

    #[test]
    fn first_axis_points_up() {
        let polar = PolarFrame::new(Size::new(200.0, 100.0), 0.35);
        assert_eq!(polar.radius, 35.0);
        let top = polar.point(PolarFrame::axis_angle(0, 6), polar.radius);
        assert!((top.x - 100.0).abs() < 1e-9);
        assert!((top.y - 15.0).abs() < 1e-9);
    }
}
