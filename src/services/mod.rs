pub mod dashboard_service;
pub mod sales_service;

pub use dashboard_service::{DashboardPayload, DashboardService, DebugFields};
pub use sales_service::{SalesPayload, SalesService};

use chrono::{SecondsFormat, Utc};

/// `lastFetched` stamp, e.g. `2024-03-04T09:15:02.123Z`.
pub fn fetched_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
