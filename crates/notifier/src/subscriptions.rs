use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use shared::model::PushNotificationSubscription;
use tracing::debug;

use crate::NotifierError;

/// Browser subscriptions kept in a JSON file, unique by endpoint
#[derive(Debug, Clone)]
pub struct SubscriptionStore {
    path: PathBuf,
    subscriptions: Vec<PushNotificationSubscription>,
}

impl SubscriptionStore {
    /// Reads the store at `path`. A missing file is an empty store
    pub fn load<P: Into<PathBuf>>(path: P) -> Result<Self, NotifierError> {
        let path = path.into();
        let subscriptions = match fs::read(&path) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| NotifierError::Store {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No subscriptions at {}", path.display());
                Vec::new()
            }
            Err(source) => return Err(NotifierError::Read { path, source }),
        };

        Ok(Self {
            path,
            subscriptions,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), NotifierError> {
        let json = serde_json::to_vec_pretty(&self.subscriptions)?;
        fs::write(&self.path, json).map_err(|source| NotifierError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Adds `subscription` unless one with the same endpoint is already stored.
    /// Returns whether it was added
    pub fn insert(&mut self, subscription: PushNotificationSubscription) -> bool {
        if self
            .subscriptions
            .iter()
            .any(|s| s.endpoint == subscription.endpoint)
        {
            return false;
        }
        self.subscriptions.push(subscription);
        true
    }

    pub fn all(&self) -> &[PushNotificationSubscription] {
        &self.subscriptions
    }

    pub fn for_role<'a>(
        &'a self,
        role: &'a str,
    ) -> impl Iterator<Item = &'a PushNotificationSubscription> + 'a {
        self.subscriptions.iter().filter(move |s| s.targets_role(role))
    }
}
