//! Shared application state

use std::sync::Arc;

use super::auth::{CredentialCheck, SharedCredentialCheck};
use crate::config::SiteConfig;
use crate::store::{EventStore, FileStorage, ReleaseStore};

/// Stores and credential check shared by all handlers
pub struct AppState {
    pub events: EventStore,
    pub releases: ReleaseStore,
    pub auth: SharedCredentialCheck,
}

impl AppState {
    pub fn new(events: EventStore, releases: ReleaseStore, auth: SharedCredentialCheck) -> Self {
        Self {
            events,
            releases,
            auth,
        }
    }

    /// File-backed stores at the configured document paths
    pub fn from_config<C: CredentialCheck + 'static>(config: &SiteConfig, auth: C) -> Self {
        Self::new(
            EventStore::new(FileStorage::new(config.events_path())),
            ReleaseStore::new(FileStorage::new(config.music_path())),
            Arc::new(auth),
        )
    }

    pub fn is_authorized(&self, credential: Option<&str>) -> bool {
        self.auth.verify(credential)
    }
}
