use axum::http::HeaderMap;
use chrono::{DateTime, Utc};

use crate::handlers::request_host;

/// RFC 1123 layout, e.g. `Mon, 19 Oct 2026 09:30:00 UTC`
const RFC1123: &str = "%a, %d %b %Y %H:%M:%S %Z";

pub fn format_time_line(now: DateTime<Utc>) -> String {
    format!("The current time is: {}\n", now.format(RFC1123))
}

/// GET /time - Human-readable server time
pub async fn current_time(headers: HeaderMap) -> String {
    tracing::info!("time: serving /time from {}", request_host(&headers));
    format_time_line(Utc::now())
}
