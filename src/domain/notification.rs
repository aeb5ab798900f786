use std::time::{SystemTime, UNIX_EPOCH};

use super::ids::NotificationId;

/// Shown in the notification panel when the list is empty.
pub const EMPTY_NOTIFICATIONS_LABEL: &str = "Không có thông báo nào";

const YEAR_SECONDS: f64 = 31_536_000.0;
const MONTH_SECONDS: f64 = 2_592_000.0;
const DAY_SECONDS: f64 = 86_400.0;
const HOUR_SECONDS: f64 = 3_600.0;
const MINUTE_SECONDS: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub sender_name: String,
    pub content: String,
    pub created_at_unix_ms: i64,
    pub read: bool,
    /// Where activating the notification should take the user.
    pub redirect_url: Option<String>,
}

impl Notification {
    pub fn relative_time(&self, now_unix_ms: i64) -> String {
        let elapsed_seconds = (now_unix_ms - self.created_at_unix_ms) / 1000;
        format_relative_time(elapsed_seconds)
    }
}

/// Formats an age in seconds as a coarse Vietnamese phrase.
///
/// A unit is chosen only when the elapsed time is strictly greater than
/// one of it; an exact multiple of the next-larger unit stays in the
/// smaller one. Anything at or under a minute reads as "a few seconds".
pub fn format_relative_time(elapsed_seconds: i64) -> String {
    let elapsed = elapsed_seconds as f64;

    let interval = elapsed / YEAR_SECONDS;
    if interval > 1.0 {
        return format!("{} năm trước", interval.floor() as i64);
    }
    let interval = elapsed / MONTH_SECONDS;
    if interval > 1.0 {
        return format!("{} tháng trước", interval.floor() as i64);
    }
    let interval = elapsed / DAY_SECONDS;
    if interval > 1.0 {
        return format!("{} ngày trước", interval.floor() as i64);
    }
    let interval = elapsed / HOUR_SECONDS;
    if interval > 1.0 {
        return format!("{} giờ trước", interval.floor() as i64);
    }
    let interval = elapsed / MINUTE_SECONDS;
    if interval > 1.0 {
        return format!("{} phút trước", interval.floor() as i64);
    }
    "vài giây trước".to_owned()
}

/// Current wall-clock time in unix milliseconds.
pub fn now_unix_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or(0)
}
