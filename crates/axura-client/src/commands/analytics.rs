use axura_shared::stats::{AnalyticsReport, DashboardStats, Metric, Timeframe};

use crate::error::Result;
use crate::source::HttpUserSource;

pub async fn stats(source: &HttpUserSource) -> Result<String> {
    Ok(render_stats(&source.stats().await?))
}

pub async fn analytics(source: &HttpUserSource, timeframe: Timeframe) -> Result<String> {
    Ok(render_analytics(&source.analytics(timeframe).await?))
}

pub fn render_stats(stats: &DashboardStats) -> String {
    format!(
        "Total users:     {}\n\
         Paid users:      {}\n\
         Unpaid users:    {}\n\
         Revenue:         ${:.2}\n\
         Growth rate:     {:.1}%\n\
         Conversion rate: {:.1}%",
        stats.total_users,
        stats.paid_users,
        stats.unpaid_users,
        stats.revenue,
        stats.growth_rate,
        stats.conversion_rate,
    )
}

pub fn render_analytics(report: &AnalyticsReport) -> String {
    let row = |label: &str, metric: &Metric, money: bool| {
        if money {
            format!(
                "{label:<14} ${:.2} (was ${:.2}, {:+.1}%)",
                metric.current, metric.previous, metric.change
            )
        } else {
            format!(
                "{label:<14} {} (was {}, {:+.1}%)",
                metric.current, metric.previous, metric.change
            )
        }
    };

    [
        format!("Timeframe: {}", report.timeframe),
        row("Revenue", &report.revenue, true),
        row("Users", &report.users, false),
        row("Subscriptions", &report.subscriptions, false),
        row("Retention %", &report.retention, false),
    ]
    .join("\n")
}
