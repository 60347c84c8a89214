//! ChartEngine - canvas charts for the admin dashboard
//!
//! This crate turns dashboard datasets into drawings: an area/trend chart,
//! a radar chart and a donut chart. Geometry is computed by pure layout
//! functions and replayed onto any [`DrawSurface`]: a browser canvas, a
//! command recorder, or an SVG document.

use wasm_bindgen::prelude::*;

pub mod canvas;
pub mod charts;
pub mod color;
pub mod error;
pub mod format;
pub mod geometry;
pub mod mount;
pub mod recorder;
pub mod samples;
pub mod source;
pub mod summary;
pub mod surface;
pub mod svg;
pub mod web;

// Re-export types
pub use dashboard_types::*;

pub use charts::{render_area, render_donut, render_radar};
pub use color::Color;
pub use error::{ChartError, Result};
pub use geometry::{PlotFrame, Point, PolarFrame, Size};
pub use mount::{load_and_render, ChartMount};
pub use recorder::RecordingSurface;
pub use source::{fetch_rows, DataSource, RestSource, StaticSource};
pub use surface::{DrawSurface, Paint};

/// Initialize the chart engine
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(log::Level::Debug).ok();

    log::info!("ChartEngine initialized");
}
