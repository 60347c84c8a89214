//! The three dashboard chart renderers
//!
//! Each renderer is split into a pure `layout_*` step (data space to pixel
//! space) and a `draw_*` step that replays the layout onto a surface.

pub mod area;
pub mod donut;
pub mod radar;

pub use area::{layout_area, render_area, AreaLayout};
pub use donut::{layout_donut, render_donut, DonutLayout};
pub use radar::{layout_radar, render_radar, RadarLayout};
