use std::{io, path::PathBuf};

use tracing_subscriber::{
    fmt::format::FmtSpan,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

pub mod api;
pub mod error;
pub mod model;
pub mod utils;

/// Installs the process wide subscriber. `RUST_LOG` takes precedence over
/// `default_directive`.
///
/// Events go to stderr so stdout stays free for command output.
pub fn configure_tracing(default_directive: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_line_number(true)
        .with_file(true)
        .with_span_events(FmtSpan::CLOSE)
        .finish()
        .try_init()
}

/// Loads `.env` from the working directory or its parents, if there is one
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenv::Error> {
    match dotenv::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_configure_tracing_only_once() {
        configure_tracing("debug").unwrap();
        assert!(configure_tracing("debug").is_err());
    }
}
