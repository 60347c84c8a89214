//! Binds a chart to its surface for the lifetime of a view
//!
//! A mount owns exactly one surface. Every dataset change goes through
//! [`ChartMount::apply`], which runs one synchronous render. Once the view is
//! gone ([`ChartMount::dispose`]) late data is dropped instead of painted.

use std::cell::RefCell;
use std::rc::Rc;

use dashboard_types::TableQuery;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::geometry::Size;
use crate::source::{fetch_rows, DataSource};
use crate::surface::DrawSurface;

struct Mounted<S> {
    surface: S,
    size: Size,
    renders: u32,
}

/// Shared, single-threaded handle to a mounted surface
pub struct ChartMount<S> {
    state: Rc<RefCell<Option<Mounted<S>>>>,
}

impl<S> Clone for ChartMount<S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<S: DrawSurface> ChartMount<S> {
    pub fn new(surface: S, size: Size) -> Self {
        Self {
            state: Rc::new(RefCell::new(Some(Mounted {
                surface,
                size,
                renders: 0,
            }))),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().is_none()
    }

    /// Detach the surface; later `apply` calls become no-ops
    pub fn dispose(&self) -> Option<S> {
        self.state.borrow_mut().take().map(|m| m.surface)
    }

    /// Number of completed renders
    pub fn render_count(&self) -> u32 {
        self.state.borrow().as_ref().map_or(0, |m| m.renders)
    }

    /// Render once onto the surface, or return `None` if disposed
    pub fn apply<R>(&self, render: impl FnOnce(&mut S, Size) -> R) -> Option<R> {
        let mut state = self.state.borrow_mut();
        let mounted = state.as_mut()?;
        let out = render(&mut mounted.surface, mounted.size);
        mounted.renders += 1;
        Some(out)
    }
}

/// Fetch rows for `query` and render them exactly once.
///
/// Returns `Ok(None)` when the mount was disposed before the rows arrived.
pub async fn load_and_render<S, D, T, R, F>(
    source: &D,
    query: &TableQuery,
    mount: &ChartMount<S>,
    render: F,
) -> Result<Option<R>>
where
    S: DrawSurface,
    D: DataSource + ?Sized,
    T: DeserializeOwned,
    F: FnOnce(&mut S, Size, Vec<T>) -> R,
{
    if mount.is_disposed() {
        log::debug!("{}: mount already disposed, skipping fetch", query.table.name());
        return Ok(None);
    }

    let rows: Vec<T> = fetch_rows(source, query).await?;

    let rendered = mount.apply(|surface, size| render(surface, size, rows));
    if rendered.is_none() {
        log::debug!(
            "{}: rows arrived after the view was disposed, dropping them",
            query.table.name()
        );
    }
    Ok(rendered)
}
