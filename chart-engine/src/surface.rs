//! Immediate-mode 2D drawing abstraction
//!
//! Renderers only talk to [`DrawSurface`]. A browser canvas, a command
//! recorder and the SVG exporter all sit behind it.

use crate::color::Color;
use crate::geometry::{Point, Size};

/// Fill source
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
}

/// Linear gradient between two points in surface coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    /// `(offset in 0..=1, color)`, ascending offsets
    pub stops: Vec<(f64, Color)>,
}

impl LinearGradient {
    /// Top-to-bottom fade from `color` to fully transparent
    pub fn vertical_fade(top: f64, bottom: f64, x: f64, color: Color) -> Self {
        Self {
            start: Point::new(x, top),
            end: Point::new(x, bottom),
            stops: vec![(0.0, color), (1.0, color.with_alpha(0.0))],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

impl TextBaseline {
    pub fn as_css(self) -> &'static str {
        match self {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Middle => "middle",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand, e.g. `12px sans-serif`
    pub font: String,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// Path building plus fill/stroke/text primitives.
///
/// Arc angles are radians measured clockwise from the positive x axis, as on
/// an HTML canvas. `arc` connects the current point to the arc start.
pub trait DrawSurface {
    /// Erase everything inside `size`
    fn clear(&mut self, size: Size);
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn bezier_curve_to(&mut self, cp1: Point, cp2: Point, to: Point);
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64, anticlockwise: bool);
    fn close_path(&mut self);
    fn fill(&mut self, paint: &Paint);
    fn stroke(&mut self, color: Color, width: f64);
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}
