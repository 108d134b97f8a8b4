mod presenter;
pub use presenter::*;

mod worker;
pub use worker::*;
