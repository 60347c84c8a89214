//! Built-in datasets the dashboard shows before it has live data

use dashboard_types::{AreaChartData, RadarChartData, Series};

/// Visits per hour from 6:00 to 23:00, "trend" and "monthly" series
pub fn hourly_trend() -> AreaChartData {
    let hours: Vec<u32> = (6..=23).collect();
    let mut trend = Vec::with_capacity(hours.len());
    let mut monthly = Vec::with_capacity(hours.len());
    for index in 0..hours.len() {
        let i = index as f64;
        let base = 10_000.0 + (i * 0.5).sin() * 5_000.0;
        trend.push((base + (i * 0.8).sin() * 30_000.0 + 30_000.0).round());
        monthly.push((base + (i * 0.6).sin() * 15_000.0 + 10_000.0).round());
    }

    AreaChartData {
        labels: hours.iter().map(|h| format!("{h}:00")).collect(),
        series: vec![
            Series::new("Page views", "#60a5fa", trend),
            Series::new("Monthly visits", "#34d399", monthly),
        ],
    }
}

/// Visit counts by day and channel, split by audience
pub fn weekly_visits() -> RadarChartData {
    RadarChartData {
        axes: ["Mon", "Tue", "Wed", "Europe", "iPad", "Americas"]
            .into_iter()
            .map(String::from)
            .collect(),
        series: vec![
            Series::new("Male", "#60a5fa", vec![85.0, 75.0, 90.0, 70.0, 80.0, 65.0]),
            Series::new("Female", "#a78bfa", vec![70.0, 65.0, 80.0, 85.0, 75.0, 60.0]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_trend_starts_at_six() {
        let data = hourly_trend();
        assert_eq!(data.labels.len(), 18);
        assert_eq!(data.labels.first().map(String::as_str), Some("6:00"));
        assert_eq!(data.labels.last().map(String::as_str), Some("23:00"));
        // index 0: base 10000, trend 10000 + 30000, monthly 10000 + 10000
        assert_eq!(data.series[0].values[0], 40_000.0);
        assert_eq!(data.series[1].values[0], 20_000.0);
        assert!(data.series.iter().all(|s| s.values.len() == 18));
    }

    #[test]
    fn weekly_visits_has_one_value_per_axis() {
        let data = weekly_visits();
        assert!(data.series.iter().all(|s| s.values.len() == data.axes.len()));
    }
}
