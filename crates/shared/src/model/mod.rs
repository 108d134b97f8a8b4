mod push_subscription;
pub use push_subscription::*;
