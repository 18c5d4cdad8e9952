//! Dashboard and analytics figures.
//!
//! Everything here is derived from a user list and the flat subscription
//! price. The "previous period" values and percentage changes are fixed
//! offsets, since the mock dataset has no history.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::SUBSCRIPTION_PRICE;
use crate::error::AxuraError;
use crate::types::UserRecord;

/// Growth rate shown on the dashboard (percent).
const DASHBOARD_GROWTH_RATE: f64 = 12.5;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub paid_users: usize,
    pub unpaid_users: usize,
    pub revenue: f64,
    pub growth_rate: f64,
    /// Paid users as a percentage of all users, 0 for an empty list.
    pub conversion_rate: f64,
}

impl DashboardStats {
    pub fn from_users(users: &[UserRecord]) -> Self {
        let total_users = users.len();
        let paid_users = count_paid(users);
        let unpaid_users = total_users - paid_users;

        let conversion_rate = if total_users > 0 {
            paid_users as f64 / total_users as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_users,
            paid_users,
            unpaid_users,
            revenue: paid_users as f64 * SUBSCRIPTION_PRICE,
            growth_rate: DASHBOARD_GROWTH_RATE,
            conversion_rate,
        }
    }
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = AxuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(AxuraError::InvalidValue {
                field: "timeframe",
                value: other.to_string(),
            }),
        }
    }
}

/// One analytics card: this period, last period, and the change in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub current: f64,
    pub previous: f64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub timeframe: Timeframe,
    pub revenue: Metric,
    pub users: Metric,
    pub subscriptions: Metric,
    pub retention: Metric,
}

impl AnalyticsReport {
    pub fn from_users(users: &[UserRecord], timeframe: Timeframe) -> Self {
        let total = users.len();
        let paid = count_paid(users);
        let previous_paid = paid.saturating_sub(2);

        Self {
            timeframe,
            revenue: Metric {
                current: paid as f64 * SUBSCRIPTION_PRICE,
                previous: previous_paid as f64 * SUBSCRIPTION_PRICE,
                change: 12.5,
            },
            users: Metric {
                current: total as f64,
                previous: total.saturating_sub(3) as f64,
                change: 8.3,
            },
            subscriptions: Metric {
                current: paid as f64,
                previous: previous_paid as f64,
                change: 15.0,
            },
            retention: Metric {
                current: 87.5,
                previous: 85.2,
                change: 2.3,
            },
        }
    }
}

fn count_paid(users: &[UserRecord]) -> usize {
    users
        .iter()
        .filter(|u| u.subscription_status.is_paid())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_users;
    use crate::types::SubscriptionStatus;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_dashboard_from_seed() {
        let stats = DashboardStats::from_users(&seed_users());
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.paid_users, 6);
        assert_eq!(stats.unpaid_users, 6);
        assert!(approx(stats.revenue, 6.0 * 29.99));
        assert!(approx(stats.conversion_rate, 50.0));
    }

    #[test]
    fn test_dashboard_empty_list_has_zero_conversion() {
        let stats = DashboardStats::from_users(&[]);
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.conversion_rate, 0.0);
        assert_eq!(stats.revenue, 0.0);
    }

    #[test]
    fn test_analytics_from_seed() {
        let report = AnalyticsReport::from_users(&seed_users(), Timeframe::Quarter);
        assert_eq!(report.timeframe, Timeframe::Quarter);
        assert!(approx(report.revenue.current, 6.0 * 29.99));
        assert!(approx(report.revenue.previous, 4.0 * 29.99));
        assert_eq!(report.users.current, 12.0);
        assert_eq!(report.users.previous, 9.0);
        assert_eq!(report.subscriptions.current, 6.0);
        assert_eq!(report.subscriptions.previous, 4.0);
        assert_eq!(report.retention.current, 87.5);
    }

    #[test]
    fn test_analytics_previous_values_saturate() {
        let users = vec![UserRecord::new("1", "A", "a@example.com", SubscriptionStatus::Paid)];
        let report = AnalyticsReport::from_users(&users, Timeframe::default());
        assert_eq!(report.timeframe, Timeframe::Month);
        assert_eq!(report.subscriptions.previous, 0.0);
        assert_eq!(report.users.previous, 0.0);
        assert_eq!(report.revenue.previous, 0.0);
    }

    #[test]
    fn test_timeframe_parses_case_insensitively() {
        assert_eq!("Week".parse::<Timeframe>().unwrap(), Timeframe::Week);
        assert_eq!("year".parse::<Timeframe>().unwrap(), Timeframe::Year);
        assert!("decade".parse::<Timeframe>().is_err());
    }
}
