//! Headless surface that records every draw call

use crate::color::Color;
use crate::geometry::{Point, Size};
use crate::surface::{DrawSurface, Paint, TextStyle};

/// One element of a path under construction
#[derive(Clone, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    BezierTo { cp1: Point, cp2: Point, to: Point },
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    },
    Close,
}

/// A finished draw operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Size),
    Fill { path: Vec<PathSegment>, paint: Paint },
    Stroke {
        path: Vec<PathSegment>,
        color: Color,
        width: f64,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// Surface that keeps the command stream instead of painting pixels
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    path: Vec<PathSegment>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn fills(&self) -> impl Iterator<Item = (&[PathSegment], &Paint)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { path, paint } => Some((path.as_slice(), paint)),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&[PathSegment], Color, f64)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { path, color, width } => Some((path.as_slice(), *color, *width)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, &TextStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, at, style } => Some((text.as_str(), *at, style)),
            _ => None,
        })
    }

    /// Everything except the initial clear
    pub fn is_blank(&self) -> bool {
        self.commands
            .iter()
            .all(|c| matches!(c, DrawCommand::Clear(_)))
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, size: Size) {
        self.path.clear();
        self.commands.push(DrawCommand::Clear(size));
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.path.push(PathSegment::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.path.push(PathSegment::LineTo(p));
    }

    fn bezier_curve_to(&mut self, cp1: Point, cp2: Point, to: Point) {
        self.path.push(PathSegment::BezierTo { cp1, cp2, to });
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        self.path.push(PathSegment::Arc {
            center,
            radius,
            start,
            end,
            anticlockwise,
        });
    }

    fn close_path(&mut self) {
        self.path.push(PathSegment::Close);
    }

    fn fill(&mut self, paint: &Paint) {
        self.commands.push(DrawCommand::Fill {
            path: self.path.clone(),
            paint: paint.clone(),
        });
    }

    fn stroke(&mut self, color: Color, width: f64) {
        self.commands.push(DrawCommand::Stroke {
            path: self.path.clone(),
            color,
            width,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_then_stroke_reuse_the_same_path() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.move_to(Point::new(0.0, 0.0));
        surface.line_to(Point::new(10.0, 0.0));
        surface.close_path();
        surface.fill(&Paint::Solid(Color::WHITE));
        surface.stroke(Color::rgb(0, 0, 0), 2.0);

        let fills: Vec<_> = surface.fills().collect();
        let strokes: Vec<_> = surface.strokes().collect();
        assert_eq!(fills.len(), 1);
        assert_eq!(strokes.len(), 1);
        assert_eq!(fills[0].0, strokes[0].0);
        assert_eq!(strokes[0].2, 2.0);
    }

    #[test]
    fn begin_path_discards_previous_segments() {
        let mut surface = RecordingSurface::new();
        surface.move_to(Point::new(1.0, 1.0));
        surface.begin_path();
        surface.move_to(Point::new(2.0, 2.0));
        surface.fill(&Paint::Solid(Color::WHITE));
        let (path, _) = surface.fills().next().unwrap();
        assert_eq!(path, &[PathSegment::MoveTo(Point::new(2.0, 2.0))]);
    }
}
