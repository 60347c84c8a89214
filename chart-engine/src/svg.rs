//! SVG export of a recorded draw

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use crate::color::Color;
use crate::geometry::{Point, Size};
use crate::recorder::{DrawCommand, PathSegment};
use crate::surface::{Paint, TextAlign, TextBaseline, TextStyle};

/// Serialise `commands` as a standalone SVG document of `size`
pub fn to_svg(commands: &[DrawCommand], size: Size) -> String {
    let mut defs = String::new();
    let mut body = String::new();
    let mut gradients = 0usize;

    for command in commands {
        match command {
            DrawCommand::Clear(_) => {}
            DrawCommand::Fill { path, paint } => {
                let fill = match paint {
                    Paint::Solid(color) => fill_attrs(*color),
                    Paint::LinearGradient(gradient) => {
                        let id = format!("g{gradients}");
                        gradients += 1;
                        let _ = write!(
                            defs,
                            r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                            num(gradient.start.x),
                            num(gradient.start.y),
                            num(gradient.end.x),
                            num(gradient.end.y)
                        );
                        for (offset, color) in &gradient.stops {
                            let _ = write!(
                                defs,
                                r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                                num(*offset),
                                hex(*color),
                                num(color.a)
                            );
                        }
                        defs.push_str("</linearGradient>");
                        format!(r#"fill="url(#{id})""#)
                    }
                };
                let _ = writeln!(body, r#"<path d="{}" {fill}/>"#, path_data(path));
            }
            DrawCommand::Stroke { path, color, width } => {
                let _ = writeln!(
                    body,
                    r#"<path d="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
                    path_data(path),
                    hex(*color),
                    num(color.a),
                    num(*width)
                );
            }
            DrawCommand::Text { text, at, style } => {
                let _ = writeln!(
                    body,
                    r#"<text x="{}" y="{}" style="font: {}" {} text-anchor="{}"{}>{}</text>"#,
                    num(at.x),
                    num(at.y),
                    escape(&style.font),
                    fill_attrs(style.color),
                    anchor(style),
                    baseline(style),
                    escape(text)
                );
            }
        }
    }

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(size.width),
        h = num(size.height)
    );
    svg.push('\n');
    if !defs.is_empty() {
        let _ = writeln!(svg, "<defs>{defs}</defs>");
    }
    svg.push_str(&body);
    svg.push_str("</svg>\n");
    svg
}

fn path_data(path: &[PathSegment]) -> String {
    let mut d = String::new();
    let mut current: Option<Point> = None;
    let mut subpath_start: Option<Point> = None;

    for segment in path {
        match *segment {
            PathSegment::MoveTo(p) => {
                let _ = write!(d, "M{} {} ", num(p.x), num(p.y));
                current = Some(p);
                subpath_start = Some(p);
            }
            PathSegment::LineTo(p) => {
                let cmd = if current.is_some() { 'L' } else { 'M' };
                let _ = write!(d, "{cmd}{} {} ", num(p.x), num(p.y));
                if current.is_none() {
                    subpath_start = Some(p);
                }
                current = Some(p);
            }
            PathSegment::BezierTo { cp1, cp2, to } => {
                if current.is_none() {
                    let _ = write!(d, "M{} {} ", num(cp1.x), num(cp1.y));
                    subpath_start = Some(cp1);
                }
                let _ = write!(
                    d,
                    "C{} {} {} {} {} {} ",
                    num(cp1.x),
                    num(cp1.y),
                    num(cp2.x),
                    num(cp2.y),
                    num(to.x),
                    num(to.y)
                );
                current = Some(to);
            }
            PathSegment::Arc {
                center,
                radius,
                start,
                end,
                anticlockwise,
            } => {
                let from = polar(center, radius, start);
                let cmd = if current.is_some() { 'L' } else { 'M' };
                let _ = write!(d, "{cmd}{} {} ", num(from.x), num(from.y));
                if current.is_none() {
                    subpath_start = Some(from);
                }

                let sweep = arc_sweep(start, end, anticlockwise);
                let flag = if anticlockwise { 0 } else { 1 };
                let signed = if anticlockwise { -sweep } else { sweep };
                if sweep >= TAU - 1e-9 {
                    // SVG cannot draw a full circle in one arc command
                    let half = polar(center, radius, start + signed / 2.0);
                    let _ = write!(
                        d,
                        "A{r} {r} 0 0 {flag} {} {} A{r} {r} 0 0 {flag} {} {} ",
                        num(half.x),
                        num(half.y),
                        num(from.x),
                        num(from.y),
                        r = num(radius)
                    );
                    current = Some(from);
                } else if sweep > 0.0 {
                    let to = polar(center, radius, start + signed);
                    let large = if sweep > PI { 1 } else { 0 };
                    let _ = write!(
                        d,
                        "A{r} {r} 0 {large} {flag} {} {} ",
                        num(to.x),
                        num(to.y),
                        r = num(radius)
                    );
                    current = Some(to);
                } else {
                    current = Some(from);
                }
            }
            PathSegment::Close => {
                d.push_str("Z ");
                current = subpath_start;
            }
        }
    }
    d.trim_end().to_string()
}

/// Swept angle following canvas rules: clockwise unless `anticlockwise`,
/// a full turn or more is a full circle.
pub(crate) fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    let raw = if anticlockwise { start - end } else { end - start };
    if raw >= TAU {
        TAU
    } else if raw < 0.0 {
        raw.rem_euclid(TAU)
    } else {
        raw
    }
}

fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

fn fill_attrs(color: Color) -> String {
    if color.a >= 1.0 {
        format!(r#"fill="{}""#, hex(color))
    } else {
        format!(r#"fill="{}" fill-opacity="{}""#, hex(color), num(color.a))
    }
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

fn anchor(style: &TextStyle) -> &'static str {
    match style.align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

fn baseline(style: &TextStyle) -> &'static str {
    match style.baseline {
        TextBaseline::Alphabetic => "",
        TextBaseline::Middle => r#" dominant-baseline="middle""#,
    }
}

/// Two decimals, trailing zeros trimmed
fn num(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
