mod vapid_keys;
pub use vapid_keys::*;
