pub mod payloads;

/// Icon shown with every push notification. Served as a static asset by the
/// application hosting the worker.
pub const NOTIFICATION_ICON: &str = "/static/icon.png";
