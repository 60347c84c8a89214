//! Backend row types and read-only table queries

use serde::{Deserialize, Serialize};
use tsify::Tsify;

// ============================================================================
// Rows
// ============================================================================

/// Analytics page stat card row (`dashboard_stats`)
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct DashboardStat {
    /// Row ID
    pub id: String,
    /// Display name of the metric
    pub metric_name: String,
    /// Value reached so far
    pub current_value: f64,
    /// Target or overall total
    pub total_value: f64,
    /// Last update (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}

/// Traffic source share (`traffic_sources`), drawn as a donut slice
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct TrafficSource {
    /// Row ID
    pub id: String,
    /// Source label
    pub source_name: String,
    /// Share of traffic, 0-100
    #[serde(deserialize_with = "number_or_string")]
    pub percentage: f64,
    /// CSS color for the slice
    pub color: String,
    /// Last update (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}

/// Overview KPI (`overview_metrics`)
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct OverviewMetric {
    /// Row ID
    pub id: String,
    /// Metric kind: revenue, orders, customers, satisfaction
    pub metric_type: String,
    /// Current value
    pub value: f64,
    /// Change against the previous period, in percent
    pub change_percentage: f64,
}

/// Task status
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

/// Task priority
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Workspace task (`tasks`)
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Due date (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Project status
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
}

/// Tracked project (`projects`)
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    /// Completion, 0-100
    #[serde(deserialize_with = "number_or_string")]
    pub progress: f64,
    pub team_size: u32,
    /// Postgres `numeric` columns arrive as strings
    #[serde(deserialize_with = "number_or_string")]
    pub budget: f64,
    /// Start date (ISO 8601)
    pub start_date: String,
    /// End date, absent while the project is running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// News feed article (`news_articles`)
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub category: String,
    pub author: String,
    pub views: u64,
    /// Publication time (ISO 8601)
    pub published_at: String,
}

// ============================================================================
// Queries
// ============================================================================

/// Backend tables the dashboard reads
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    DashboardStats,
    TrafficSources,
    OverviewMetrics,
    Tasks,
    Projects,
    NewsArticles,
}

impl Table {
    /// Table name as exposed by the REST endpoint
    pub fn name(self) -> &'static str {
        match self {
            Table::DashboardStats => "dashboard_stats",
            Table::TrafficSources => "traffic_sources",
            Table::OverviewMetrics => "overview_metrics",
            Table::Tasks => "tasks",
            Table::Projects => "projects",
            Table::NewsArticles => "news_articles",
        }
    }

    /// The select each dashboard page issues for this table
    pub fn page_query(self) -> TableQuery {
        let query = TableQuery::all(self);
        match self {
            Table::TrafficSources => query.order_by("percentage", false),
            Table::Tasks | Table::Projects => query.order_by("created_at", false),
            Table::NewsArticles => query.order_by("published_at", false),
            Table::DashboardStats | Table::OverviewMetrics => query,
        }
    }
}

/// Sort clause
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct OrderBy {
    /// Column to sort on
    pub column: String,
    /// Ascending when true
    #[serde(default = "default_true")]
    pub ascending: bool,
}

fn default_true() -> bool {
    true
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Number(f64),
        Text(String),
    }

    match Numeric::deserialize(deserializer)? {
        Numeric::Number(value) => Ok(value),
        Numeric::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Read-only select against one table
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct TableQuery {
    /// Table to read
    pub table: Table,
    /// Optional ordering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderBy>,
    /// Maximum rows to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl TableQuery {
    /// Select every row of `table`
    pub fn all(table: Table) -> Self {
        Self {
            table,
            order: None,
            limit: None,
        }
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(OrderBy {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_decode_from_backend_json() {
        let json = r##"{"id":"1","source_name":"Search","percentage":45.5,"color":"#60a5fa","updated_at":"2024-01-01T00:00:00Z"}"##;
        let source: TrafficSource = serde_json::from_str(json).unwrap();
        assert_eq!(source.source_name, "Search");
        assert_eq!(source.percentage, 45.5);

        let json = r#"{"id":"t","title":"Ship","status":"in_progress","priority":"high","due_date":null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn project_budget_accepts_numeric_strings() {
        let json = r#"{"id":"p","name":"Portal","status":"on_hold","progress":40,"team_size":5,"budget":"125000.50","start_date":"2024-03-01"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.status, ProjectStatus::OnHold);
        assert_eq!(project.budget, 125000.5);
        assert!(project.end_date.is_none());
    }

    #[test]
    fn numeric_columns_accept_strings() {
        let json = r##"{"id":"1","source_name":"Direct","percentage":"32.5","color":"#34d399"}"##;
        let source: TrafficSource = serde_json::from_str(json).unwrap();
        assert_eq!(source.percentage, 32.5);

        let json = r#"{"id":"p","name":"Portal","status":"active","progress":" 75 ","team_size":3,"budget":1000,"start_date":"2024-03-01"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.progress, 75.0);
        assert_eq!(project.budget, 1000.0);

        let json = r##"{"id":"1","source_name":"Direct","percentage":"lots","color":"#34d399"}"##;
        assert!(serde_json::from_str::<TrafficSource>(json).is_err());
    }

    #[test]
    fn page_queries_sort_newest_first() {
        let order = |table: Table| {
            table
                .page_query()
                .order
                .map(|o| (o.column, o.ascending))
        };
        assert_eq!(order(Table::TrafficSources), Some(("percentage".into(), false)));
        assert_eq!(order(Table::Tasks), Some(("created_at".into(), false)));
        assert_eq!(order(Table::Projects), Some(("created_at".into(), false)));
        assert_eq!(order(Table::NewsArticles), Some(("published_at".into(), false)));
        assert_eq!(order(Table::DashboardStats), None);
        assert!(Table::OverviewMetrics.page_query().limit.is_none());
    }

    #[test]
    fn query_builder_sets_order_and_limit() {
        let query = TableQuery::all(Table::TrafficSources)
            .order_by("percentage", false)
            .limit(10);
        assert_eq!(query.table.name(), "traffic_sources");
        assert_eq!(query.order.as_ref().map(|o| o.ascending), Some(false));
        assert_eq!(query.limit, Some(10));
    }
}
