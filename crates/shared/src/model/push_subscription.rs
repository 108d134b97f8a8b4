use serde::{Deserialize, Serialize};

/// A browser push subscription as returned by `PushManager.subscribe`,
/// along with what the sender needs to know about the user who owns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushNotificationSubscription {
    pub endpoint: String,
    /// p256dh key
    pub key: String,
    pub auth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default = "enabled")]
    pub notifications_enabled: bool,
}

fn enabled() -> bool {
    true
}

impl PushNotificationSubscription {
    /// Whether a role-targeted send should reach this subscription
    pub fn targets_role(&self, role: &str) -> bool {
        self.notifications_enabled && self.role.as_deref() == Some(role)
    }
}
