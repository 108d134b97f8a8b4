pub mod cli;

mod errors;
pub use errors::*;

mod state;
pub use state::*;

mod subscriptions;
pub use subscriptions::*;

mod push;
pub use push::*;
