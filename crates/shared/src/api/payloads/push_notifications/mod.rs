mod notification;
pub use notification::*;

mod report;
pub use report::*;
