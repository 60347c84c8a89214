//! Read-only data source connector

use std::cmp::Ordering;
use std::collections::HashMap;

use dashboard_types::{DashboardConfig, SourceConfig, Table, TableQuery};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::error::{describe_js, ChartError, Result};

/// Anything that can answer a [`TableQuery`] with JSON rows
pub trait DataSource {
    fn select<'a>(&'a self, query: &'a TableQuery) -> LocalBoxFuture<'a, Result<Vec<Value>>>;
}

/// Run `query` and decode every row as `T`
pub async fn fetch_rows<T, D>(source: &D, query: &TableQuery) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    D: DataSource + ?Sized,
{
    let rows = source.select(query).await?;
    serde_json::from_value(Value::Array(rows)).map_err(|source| ChartError::Decode {
        table: query.table.name(),
        source,
    })
}

/// Parse a dashboard config document and validate its renderer sections
pub fn load_config(json: &str) -> Result<DashboardConfig> {
    let config = DashboardConfig::from_json(json)?;
    config.validate()?;
    log::debug!(
        "config loaded, source {}",
        if config.source.is_configured() { "set" } else { "unset" }
    );
    Ok(config)
}

// ============================================================================
// REST endpoint
// ============================================================================

/// PostgREST-style endpoint reached through the browser fetch API
#[derive(Clone, Debug)]
pub struct RestSource {
    config: SourceConfig,
}

impl RestSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(ChartError::NotConfigured);
        }
        Ok(Self { config })
    }

    /// `{url}/rest/v1/{table}?select=*[&order=col.dir][&limit=n]`
    pub fn query_url(&self, query: &TableQuery) -> String {
        let mut url = format!(
            "{}/rest/v1/{}?select=*",
            self.config.url.trim_end_matches('/'),
            query.table.name()
        );
        if let Some(order) = &query.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            url.push_str(&format!("&order={}.{}", order.column, direction));
        }
        if let Some(limit) = query.limit {
            url.push_str(&format!("&limit={limit}"));
        }
        url
    }

    async fn get(&self, table: &'static str, url: String) -> Result<Vec<Value>> {
        let network = |err: wasm_bindgen::JsValue| ChartError::Network(describe_js(&err));

        let opts = RequestInit::new();
        opts.set_method("GET");

        let headers = Headers::new().map_err(network)?;
        headers.set("Accept", "application/json").map_err(network)?;
        headers.set("apikey", &self.config.anon_key).map_err(network)?;
        headers
            .set("Authorization", &format!("Bearer {}", self.config.anon_key))
            .map_err(network)?;
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(&url, &opts).map_err(network)?;
        let window = web_sys::window()
            .ok_or_else(|| ChartError::Network("no window object available".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?;
        let resp: Response = resp_value.dyn_into().map_err(network)?;

        if !resp.ok() {
            return Err(ChartError::Http {
                status: resp.status(),
                url,
            });
        }

        let body = JsFuture::from(resp.text().map_err(network)?)
            .await
            .map_err(network)?;
        let body = body
            .as_string()
            .ok_or_else(|| ChartError::Network("response body is not text".to_string()))?;

        serde_json::from_str(&body).map_err(|source| ChartError::Decode { table, source })
    }
}

impl DataSource for RestSource {
    fn select<'a>(&'a self, query: &'a TableQuery) -> LocalBoxFuture<'a, Result<Vec<Value>>> {
        let url = self.query_url(query);
        log::debug!("GET {url}");
        self.get(query.table.name(), url).boxed_local()
    }
}

// ============================================================================
// In-memory rows
// ============================================================================

/// Serves fixed rows; ordering and limits are applied like the backend would
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    tables: HashMap<Table, Vec<Value>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, table: Table, rows: Vec<Value>) -> Self {
        self.tables.insert(table, rows);
        self
    }
}

impl DataSource for StaticSource {
    fn select<'a>(&'a self, query: &'a TableQuery) -> LocalBoxFuture<'a, Result<Vec<Value>>> {
        let mut rows = self.tables.get(&query.table).cloned().unwrap_or_default();
        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }
        futures::future::ready(Ok(rows)).boxed_local()
    }
}

/// Numbers before strings, missing/null last
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(_)), Some(Value::String(_))) => Ordering::Less,
        (Some(Value::String(_)), Some(Value::Number(_))) => Ordering::Greater,
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_types::TrafficSource;
    use futures::executor::block_on;
    use serde_json::json;

    fn traffic_rows() -> Vec<Value> {
        vec![
            json!({"id": "1", "source_name": "Email", "percentage": 15, "color": "#fbbf24"}),
            json!({"id": "2", "source_name": "Search", "percentage": 45, "color": "#60a5fa"}),
            json!({"id": "3", "source_name": "Direct", "percentage": 40, "color": "#34d399"}),
        ]
    }

    #[test]
    fn rest_urls_follow_the_query() {
        let source = RestSource::new(SourceConfig {
            url: "https://demo.supabase.co/".into(),
            anon_key: "public".into(),
        })
        .unwrap();
        let query = TableQuery::all(Table::TrafficSources).order_by("percentage", false);
        assert_eq!(
            source.query_url(&query),
            "https://demo.supabase.co/rest/v1/traffic_sources?select=*&order=percentage.desc"
        );
        let query = TableQuery::all(Table::Tasks).limit(20);
        assert_eq!(
            source.query_url(&query),
            "https://demo.supabase.co/rest/v1/tasks?select=*&limit=20"
        );
    }

    #[test]
    fn unconfigured_rest_source_is_rejected() {
        assert!(matches!(
            RestSource::new(SourceConfig::default()),
            Err(ChartError::NotConfigured)
        ));
    }

    #[test]
    fn config_documents_are_parsed_and_validated() {
        let json = r#"{"source": {"url": "https://demo.supabase.co", "anon_key": "k"}}"#;
        let config = load_config(json).unwrap();
        assert!(config.source.is_configured());

        assert!(matches!(load_config("{ not json"), Err(ChartError::Config(_))));

        let err = load_config(r#"{"donut": {"inner_ratio": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ChartError::Options(_)));
        assert_eq!(
            dashboard_types::ErrorInfo::from(&err).code,
            dashboard_types::ErrorCode::InvalidOptions
        );
    }

    #[test]
    fn static_source_orders_and_limits() {
        let source = StaticSource::new().with_rows(Table::TrafficSources, traffic_rows());
        let query = TableQuery::all(Table::TrafficSources)
            .order_by("percentage", false)
            .limit(2);
        let rows: Vec<TrafficSource> = block_on(fetch_rows(&source, &query)).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(names, ["Search", "Direct"]);
    }

    #[test]
    fn unknown_tables_are_empty() {
        let source = StaticSource::new();
        let rows: Vec<TrafficSource> =
            block_on(fetch_rows(&source, &TableQuery::all(Table::TrafficSources))).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn decode_errors_name_the_table() {
        let source = StaticSource::new()
            .with_rows(Table::TrafficSources, vec![json!({"id": "1", "percentage": "lots"})]);
        let result: Result<Vec<TrafficSource>> =
            block_on(fetch_rows(&source, &TableQuery::all(Table::TrafficSources)));
        match result {
            Err(ChartError::Decode { table, .. }) => assert_eq!(table, "traffic_sources"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
