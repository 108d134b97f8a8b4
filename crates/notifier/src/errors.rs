use std::{io, path::PathBuf};

use thiserror::Error;
use web_push::WebPushError;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("{path} is not a valid subscription list: {source}")]
    Store {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("web push: {0}")]
    Push(#[from] WebPushError),
}
