//! Page-level aggregates shown around the charts

use dashboard_types::{
    DashboardStat, NewsArticle, OverviewMetric, Project, ProjectStatus, Task, TaskStatus,
};

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::format::{format_plain, format_thousands};

/// Stat card progress bar fill, 0 when the total is unknown
pub fn stat_progress(stat: &DashboardStat) -> f64 {
    if stat.total_value > 0.0 {
        stat.current_value / stat.total_value * 100.0
    } else {
        0.0
    }
}

/// Display decoration for an overview KPI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricFormat {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl MetricFormat {
    /// Currency prefix for revenue, percent suffix for satisfaction
    pub fn for_metric(metric_type: &str) -> Self {
        match metric_type {
            "revenue" => Self {
                prefix: "¥",
                suffix: "",
            },
            "satisfaction" => Self {
                prefix: "",
                suffix: "%",
            },
            _ => Self {
                prefix: "",
                suffix: "",
            },
        }
    }
}

/// Display helpers for overview KPI cards
pub trait OverviewMetricExt {
    /// Trend arrow points up for zero or positive change
    fn is_positive(&self) -> bool;
    /// `+12.5%` / `-3%`
    fn change_text(&self) -> String;
    /// Value with grouping and the metric's prefix/suffix
    fn value_text(&self) -> String;
}

impl OverviewMetricExt for OverviewMetric {
    fn is_positive(&self) -> bool {
        self.change_percentage >= 0.0
    }

    fn change_text(&self) -> String {
        let sign = if self.is_positive() { "+" } else { "" };
        format!("{sign}{}%", format_plain(self.change_percentage))
    }

    fn value_text(&self) -> String {
        let format = MetricFormat::for_metric(&self.metric_type);
        format!("{}{}{}", format.prefix, format_thousands(self.value), format.suffix)
    }
}

/// Task counts per status
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

pub fn task_counts(tasks: &[Task]) -> TaskCounts {
    tasks.iter().fold(
        TaskCounts {
            total: tasks.len(),
            ..Default::default()
        },
        |mut counts, task| {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
            }
            counts
        },
    )
}

/// `None` keeps every task
pub fn filter_tasks(tasks: &[Task], status: Option<TaskStatus>) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .collect()
}

/// Project counts per status and the summed budget
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct ProjectStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub on_hold: usize,
    pub total_budget: f64,
}

pub fn project_stats(projects: &[Project]) -> ProjectStats {
    let mut stats = ProjectStats {
        total: projects.len(),
        ..Default::default()
    };
    for project in projects {
        match project.status {
            ProjectStatus::Active => stats.active += 1,
            ProjectStatus::Completed => stats.completed += 1,
            ProjectStatus::OnHold => stats.on_hold += 1,
        }
        stats.total_budget += project.budget;
    }
    stats
}

/// `None` keeps every project
pub fn filter_projects(projects: &[Project], status: Option<ProjectStatus>) -> Vec<&Project> {
    projects
        .iter()
        .filter(|p| status.map_or(true, |s| p.status == s))
        .collect()
}

/// View totals for the news page header
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct NewsStats {
    pub articles: usize,
    pub total_views: u64,
    /// Rounded mean, 0 without articles
    pub average_views: u64,
}

pub fn news_stats(articles: &[NewsArticle]) -> NewsStats {
    let total_views: u64 = articles.iter().map(|a| a.views).sum();
    let average_views = if articles.is_empty() {
        0
    } else {
        (total_views as f64 / articles.len() as f64).round() as u64
    };
    NewsStats {
        articles: articles.len(),
        total_views,
        average_views,
    }
}

/// `None` keeps every article
pub fn filter_articles<'a>(
    articles: &'a [NewsArticle],
    category: Option<&str>,
) -> Vec<&'a NewsArticle> {
    articles
        .iter()
        .filter(|a| category.map_or(true, |c| a.category == c))
        .collect()
}

/// Distinct categories in first-seen order
pub fn news_categories(articles: &[NewsArticle]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for article in articles {
        if !seen.contains(&article.category.as_str()) {
            seen.push(&article.category);
        }
    }
    seen
}
