//! `DrawSurface` over a browser 2D canvas

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Color;
use crate::error::{describe_js, ChartError, Result};
use crate::geometry::{Point, Size};
use crate::surface::{DrawSurface, Paint, TextStyle};

/// Canvas context sized to its element, with device-pixel-ratio scaling
/// applied once at attach time. Drawing uses CSS pixel coordinates.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: Size,
    pixel_ratio: f64,
}

impl CanvasSurface {
    /// Resize the backing store to the element's layout box and take its 2D context
    pub fn attach(canvas: &HtmlCanvasElement) -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChartError::SurfaceUnavailable("no window object available".into()))?;
        let pixel_ratio = match window.device_pixel_ratio() {
            dpr if dpr > 0.0 => dpr,
            _ => 1.0,
        };

        let rect = canvas.get_bounding_client_rect();
        let size = Size::new(rect.width(), rect.height());
        canvas.set_width((size.width * pixel_ratio).round() as u32);
        canvas.set_height((size.height * pixel_ratio).round() as u32);

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| ChartError::SurfaceUnavailable(describe_js(&e)))?
            .ok_or_else(|| ChartError::SurfaceUnavailable("2d context not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ChartError::SurfaceUnavailable("unexpected context type".into()))?;

        // resizing reset the transform, so this is the only scale in effect
        ctx.scale(pixel_ratio, pixel_ratio)
            .map_err(|e| ChartError::SurfaceUnavailable(describe_js(&e)))?;

        log::debug!(
            "canvas attached: {}x{} css px at {}x",
            size.width,
            size.height,
            pixel_ratio
        );
        Ok(Self {
            ctx,
            size,
            pixel_ratio,
        })
    }

    /// Look up a `<canvas>` by element id and attach to it
    pub fn attach_by_id(id: &str) -> Result<Self> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .ok_or_else(|| ChartError::SurfaceUnavailable(format!("no element #{id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ChartError::SurfaceUnavailable(format!("#{id} is not a canvas")))?;
        Self::attach(&canvas)
    }

    /// Layout size in CSS pixels
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
}

/// Draw calls cannot fail the render; a rejected call is logged and skipped.
fn check(op: &str, result: std::result::Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("canvas {op} failed: {}", describe_js(&err));
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, size: Size) {
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn bezier_curve_to(&mut self, cp1: Point, cp2: Point, to: Point) {
        self.ctx
            .bezier_curve_to(cp1.x, cp1.y, cp2.x, cp2.y, to.x, to.y);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        check(
            "arc",
            self.ctx.arc_with_anticlockwise(
                center.x,
                center.y,
                radius.max(0.0),
                start,
                end,
                anticlockwise,
            ),
        );
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::LinearGradient(gradient) => {
                let g = self.ctx.create_linear_gradient(
                    gradient.start.x,
                    gradient.start.y,
                    gradient.end.x,
                    gradient.end.y,
                );
                for (offset, color) in &gradient.stops {
                    check(
                        "gradient stop",
                        g.add_color_stop(offset.clamp(0.0, 1.0) as f32, &color.to_css()),
                    );
                }
                self.ctx.set_fill_style_canvas_gradient(&g);
            }
        }
        self.ctx.fill();
    }

    fn stroke(&mut self, color: Color, width: f64) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ctx.set_font(&style.font);
        self.ctx.set_text_align(style.align.as_css());
        self.ctx.set_text_baseline(style.baseline.as_css());
        self.ctx.set_fill_style_str(&style.color.to_css());
        check("fill_text", self.ctx.fill_text(text, at.x, at.y));
    }
}
