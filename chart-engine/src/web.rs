//! JavaScript entry points

use std::cell::RefCell;
use std::rc::Rc;

use dashboard_types::{
    AreaChartData, AreaChartOptions, DashboardConfig, DashboardStat, DonutChartData,
    DonutChartOptions, ErrorInfo, NewsArticle, OverviewMetric, Project, ProjectStatus,
    RadarChartData, RadarChartOptions, RenderSummary, Table, Task, TaskStatus, TrafficSource,
};
use js_sys::Array;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tsify::Tsify;
use wasm_bindgen::prelude::*;

use crate::canvas::CanvasSurface;
use crate::charts::{render_area, render_donut, render_radar};
use crate::error::ChartError;
use crate::geometry::Size;
use crate::mount::{load_and_render, ChartMount};
use crate::recorder::RecordingSurface;
use crate::samples;
use crate::source::{fetch_rows, load_config, RestSource};
use crate::summary::{self, NewsStats, OverviewMetricExt, ProjectStats, TaskCounts};
use crate::svg::to_svg;

fn to_js(err: ChartError) -> JsValue {
    log::error!("{err}");
    let info = ErrorInfo::from(&err);
    match info.into_js() {
        Ok(js) => js.into(),
        Err(_) => JsValue::from_str(&info.message),
    }
}

fn rows_to_js<'a, T>(rows: impl IntoIterator<Item = &'a T>) -> Result<JsValue, JsValue>
where
    T: Tsify + Serialize + 'a,
{
    let array = Array::new();
    for row in rows {
        let value: JsValue = row.into_js().map_err(JsValue::from)?.into();
        array.push(&value);
    }
    Ok(array.into())
}

fn rows_from_js<T>(value: JsValue) -> Result<Vec<T>, JsValue>
where
    T: Tsify + DeserializeOwned,
{
    if !Array::is_array(&value) {
        return Err(JsValue::from_str("expected an array of rows"));
    }
    Array::from(&value)
        .iter()
        .map(|row| T::from_js(row).map_err(JsValue::from))
        .collect()
}

/// `null`/`undefined` mean "no filter"
fn optional_from_js<T>(value: JsValue) -> Result<Option<T>, JsValue>
where
    T: Tsify + DeserializeOwned,
{
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    T::from_js(value).map(Some).map_err(JsValue::from)
}

/// Parse and validate a JSON dashboard config
#[wasm_bindgen]
pub fn load_dashboard_config(json: &str) -> Result<DashboardConfig, JsValue> {
    load_config(json).map_err(to_js)
}

/// Draw an area chart on the canvas with element id `canvas_id`
#[wasm_bindgen]
pub fn render_area_chart(
    canvas_id: &str,
    data: AreaChartData,
    options: AreaChartOptions,
) -> Result<RenderSummary, JsValue> {
    options.validate().map_err(|e| to_js(e.into()))?;
    let mut surface = CanvasSurface::attach_by_id(canvas_id).map_err(to_js)?;
    let size = surface.size();
    Ok(render_area(&mut surface, &data, &options, size))
}

/// Draw a radar chart on the canvas with element id `canvas_id`
#[wasm_bindgen]
pub fn render_radar_chart(
    canvas_id: &str,
    data: RadarChartData,
    options: RadarChartOptions,
) -> Result<RenderSummary, JsValue> {
    options.validate().map_err(|e| to_js(e.into()))?;
    let mut surface = CanvasSurface::attach_by_id(canvas_id).map_err(to_js)?;
    let size = surface.size();
    Ok(render_radar(&mut surface, &data, &options, size))
}

/// Draw a donut chart; the returned summary carries the legend rows
#[wasm_bindgen]
pub fn render_donut_chart(
    canvas_id: &str,
    data: DonutChartData,
    options: DonutChartOptions,
) -> Result<RenderSummary, JsValue> {
    options.validate().map_err(|e| to_js(e.into()))?;
    let mut surface = CanvasSurface::attach_by_id(canvas_id).map_err(to_js)?;
    let size = surface.size();
    Ok(render_donut(&mut surface, &data, &options, size))
}

#[wasm_bindgen]
pub fn export_svg_area(
    data: AreaChartData,
    options: AreaChartOptions,
    width: f64,
    height: f64,
) -> Result<String, JsValue> {
    options.validate().map_err(|e| to_js(e.into()))?;
    let size = Size::new(width, height);
    let mut surface = RecordingSurface::new();
    render_area(&mut surface, &data, &options, size);
    Ok(to_svg(surface.commands(), size))
}

#[wasm_bindgen]
pub fn export_svg_radar(
    data: RadarChartData,
    options: RadarChartOptions,
    width: f64,
    height: f64,
) -> Result<String, JsValue> {
    options.validate().map_err(|e| to_js(e.into()))?;
    let size = Size::new(width, height);
    let mut surface = RecordingSurface::new();
    render_radar(&mut surface, &data, &options, size);
    Ok(to_svg(surface.commands(), size))
}

#[wasm_bindgen]
pub fn export_svg_donut(
    data: DonutChartData,
    options: DonutChartOptions,
    width: f64,
    height: f64,
) -> Result<String, JsValue> {
    options.validate().map_err(|e| to_js(e.into()))?;
    let size = Size::new(width, height);
    let mut surface = RecordingSurface::new();
    render_donut(&mut surface, &data, &options, size);
    Ok(to_svg(surface.commands(), size))
}

#[wasm_bindgen]
pub fn sample_hourly_trend() -> AreaChartData {
    samples::hourly_trend()
}

#[wasm_bindgen]
pub fn sample_weekly_visits() -> RadarChartData {
    samples::weekly_visits()
}

/// Live chart bound to a canvas; call `dispose` when the view unmounts
#[wasm_bindgen]
pub struct ChartHandle {
    mount: ChartMount<CanvasSurface>,
    last: Rc<RefCell<Option<RenderSummary>>>,
}

#[wasm_bindgen]
impl ChartHandle {
    /// Drop the canvas; data arriving afterwards is discarded
    pub fn dispose(&self) {
        if self.mount.dispose().is_some() {
            log::debug!("chart disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.mount.is_disposed()
    }

    /// Summary of the latest render, `null` until data has arrived
    pub fn last_summary(&self) -> Result<JsValue, JsValue> {
        match self.last.borrow().as_ref() {
            Some(summary) => Ok(summary.into_js().map_err(JsValue::from)?.into()),
            None => Ok(JsValue::NULL),
        }
    }
}

/// Mount the traffic-source donut: fetch `traffic_sources` by share,
/// descending, and draw once the rows arrive.
#[wasm_bindgen]
pub fn mount_traffic_donut(
    canvas_id: &str,
    config: DashboardConfig,
) -> Result<ChartHandle, JsValue> {
    config.donut.validate().map_err(|e| to_js(e.into()))?;
    let source = RestSource::new(config.source).map_err(to_js)?;
    let surface = CanvasSurface::attach_by_id(canvas_id).map_err(to_js)?;
    let size = surface.size();

    let mount = ChartMount::new(surface, size);
    let last = Rc::new(RefCell::new(None));
    let handle = ChartHandle {
        mount: mount.clone(),
        last: Rc::clone(&last),
    };

    let options = config.donut;
    wasm_bindgen_futures::spawn_local(async move {
        let query = Table::TrafficSources.page_query();
        let rendered = load_and_render(
            &source,
            &query,
            &mount,
            |surface, size, rows: Vec<TrafficSource>| {
                render_donut(surface, &DonutChartData::from(rows.as_slice()), &options, size)
            },
        )
        .await;
        match rendered {
            Ok(Some(summary)) => {
                log::info!("traffic donut drawn with {} slices", summary.shapes);
                *last.borrow_mut() = Some(summary);
            }
            Ok(None) => {}
            Err(err) => log::error!("traffic donut: {err}"),
        }
    });

    Ok(handle)
}

// ============================================================================
// Page data
// ============================================================================

async fn fetch_page<T>(config: DashboardConfig, table: Table) -> Result<JsValue, JsValue>
where
    T: Tsify + Serialize + DeserializeOwned,
{
    let source = RestSource::new(config.source).map_err(to_js)?;
    let rows: Vec<T> = fetch_rows(&source, &table.page_query())
        .await
        .map_err(to_js)?;
    log::debug!("{}: {} rows", table.name(), rows.len());
    rows_to_js(&rows)
}

/// Analytics stat cards
#[wasm_bindgen]
pub async fn fetch_dashboard_stats(config: DashboardConfig) -> Result<JsValue, JsValue> {
    fetch_page::<DashboardStat>(config, Table::DashboardStats).await
}

/// Traffic sources, largest share first
#[wasm_bindgen]
pub async fn fetch_traffic_sources(config: DashboardConfig) -> Result<JsValue, JsValue> {
    fetch_page::<TrafficSource>(config, Table::TrafficSources).await
}

#[wasm_bindgen]
pub async fn fetch_overview_metrics(config: DashboardConfig) -> Result<JsValue, JsValue> {
    fetch_page::<OverviewMetric>(config, Table::OverviewMetrics).await
}

/// Workspace tasks, newest first
#[wasm_bindgen]
pub async fn fetch_tasks(config: DashboardConfig) -> Result<JsValue, JsValue> {
    fetch_page::<Task>(config, Table::Tasks).await
}

/// Projects, newest first
#[wasm_bindgen]
pub async fn fetch_projects(config: DashboardConfig) -> Result<JsValue, JsValue> {
    fetch_page::<Project>(config, Table::Projects).await
}

/// News feed, latest publication first
#[wasm_bindgen]
pub async fn fetch_news_articles(config: DashboardConfig) -> Result<JsValue, JsValue> {
    fetch_page::<NewsArticle>(config, Table::NewsArticles).await
}

// ============================================================================
// Page summaries
// ============================================================================

#[wasm_bindgen]
pub fn stat_progress(stat: DashboardStat) -> f64 {
    summary::stat_progress(&stat)
}

#[wasm_bindgen]
pub fn metric_is_positive(metric: OverviewMetric) -> bool {
    metric.is_positive()
}

#[wasm_bindgen]
pub fn metric_change_text(metric: OverviewMetric) -> String {
    metric.change_text()
}

#[wasm_bindgen]
pub fn metric_value_text(metric: OverviewMetric) -> String {
    metric.value_text()
}

#[wasm_bindgen]
pub fn task_counts(tasks: JsValue) -> Result<TaskCounts, JsValue> {
    let tasks: Vec<Task> = rows_from_js(tasks)?;
    Ok(summary::task_counts(&tasks))
}

/// Tasks with the given status, or all of them when `status` is null
#[wasm_bindgen]
pub fn filter_tasks(tasks: JsValue, status: JsValue) -> Result<JsValue, JsValue> {
    let tasks: Vec<Task> = rows_from_js(tasks)?;
    let status: Option<TaskStatus> = optional_from_js(status)?;
    rows_to_js(summary::filter_tasks(&tasks, status))
}

#[wasm_bindgen]
pub fn project_stats(projects: JsValue) -> Result<ProjectStats, JsValue> {
    let projects: Vec<Project> = rows_from_js(projects)?;
    Ok(summary::project_stats(&projects))
}

#[wasm_bindgen]
pub fn filter_projects(projects: JsValue, status: JsValue) -> Result<JsValue, JsValue> {
    let projects: Vec<Project> = rows_from_js(projects)?;
    let status: Option<ProjectStatus> = optional_from_js(status)?;
    rows_to_js(summary::filter_projects(&projects, status))
}

#[wasm_bindgen]
pub fn news_stats(articles: JsValue) -> Result<NewsStats, JsValue> {
    let articles: Vec<NewsArticle> = rows_from_js(articles)?;
    Ok(summary::news_stats(&articles))
}

#[wasm_bindgen]
pub fn filter_articles(articles: JsValue, category: Option<String>) -> Result<JsValue, JsValue> {
    let articles: Vec<NewsArticle> = rows_from_js(articles)?;
    rows_to_js(summary::filter_articles(&articles, category.as_deref()))
}

#[wasm_bindgen]
pub fn news_categories(articles: JsValue) -> Result<Vec<String>, JsValue> {
    let articles: Vec<NewsArticle> = rows_from_js(articles)?;
    Ok(summary::news_categories(&articles)
        .into_iter()
        .map(str::to_string)
        .collect())
}
