//! Release store
//!
//! The document is an object with one array per [`Category`]. Ranks inside a
//! category are owned by the store: appends take `max + 1`, deletes compact
//! to `0..n-1`, reorders swap exactly two ranks.

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::defaults::default_catalog;
use super::ordering::{compact, move_adjacent, next_order, normalize_ranks};
use super::{read_json, write_json, DocumentStorage, Loaded, StoreError, StoreResult};
use crate::types::{Category, Direction, Release, ReleaseCatalog, ReleaseDraft};
use crate::utils::time::IdGenerator;

/// Release as found on disk.
///
/// `order` is read loosely: older documents omit it or hold negative,
/// fractional or non-numeric values.
#[derive(Debug, Deserialize)]
struct StoredRelease {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    order: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct StoredCatalog {
    #[serde(rename = "fullSets", default)]
    full_sets: Vec<StoredRelease>,
    #[serde(rename = "otherReleases", default)]
    other_releases: Vec<StoredRelease>,
}

impl StoredCatalog {
    fn into_catalog(self) -> ReleaseCatalog {
        ReleaseCatalog {
            full_sets: repair(self.full_sets),
            other_releases: repair(self.other_releases),
        }
    }
}

/// Turn stored ranks into usable ones; see [`normalize_ranks`]
fn repair(stored: Vec<StoredRelease>) -> Vec<Release> {
    let ranks: Vec<Option<f64>> = stored
        .iter()
        .map(|r| r.order.as_ref().and_then(Value::as_f64))
        .collect();
    stored
        .into_iter()
        .zip(normalize_ranks(&ranks))
        .map(|(r, order)| Release {
            id: r.id,
            title: r.title,
            url: r.url,
            order,
        })
        .collect()
}

/// Two independently ranked release lists
pub struct ReleaseStore {
    storage: Box<dyn DocumentStorage>,
    /// Held for the whole load-mutate-save cycle
    lock: Mutex<()>,
    ids: IdGenerator,
}

impl ReleaseStore {
    pub fn new<S: DocumentStorage + 'static>(storage: S) -> Self {
        Self {
            storage: Box::new(storage),
            lock: Mutex::new(()),
            ids: IdGenerator::new(),
        }
    }

    /// Both categories, each sorted by ascending rank
    pub fn list(&self) -> ReleaseCatalog {
        let _guard = self.lock.lock();
        self.load().sorted()
    }

    /// Append to `category` with the next free rank
    pub fn add(&self, category: Category, draft: ReleaseDraft) -> StoreResult<Release> {
        let _guard = self.lock.lock();
        let mut catalog = self.load();

        let releases = catalog.category_mut(category);
        let order = next_order(releases)
            .ok_or_else(|| StoreError::RankExhausted(category.to_string()))?;
        let release = Release {
            id: self.ids.next_id(),
            title: draft.title,
            url: draft.url,
            order,
        };
        releases.push(release.clone());
        self.persist(&catalog)?;

        info!(
            id = %release.id,
            category = %category,
            order = release.order,
            "Release added"
        );
        Ok(release)
    }

    /// Remove `id` from `category` and compact the remaining ranks.
    /// Absent ids are not an error.
    pub fn delete(&self, category: Category, id: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock();
        let mut catalog = self.load();

        let releases = catalog.category_mut(category);
        let before = releases.len();
        releases.retain(|r| r.id != id);
        let removed = releases.len() != before;
        // Renumber even when nothing was removed; heals gaps from older writers
        compact(releases);
        self.persist(&catalog)?;

        if removed {
            info!(id, category = %category, "Release deleted");
        } else {
            debug!(id, category = %category, "Delete of unknown release ignored");
        }
        Ok(removed)
    }

    /// Move `id` one step within `category`.
    ///
    /// # Arguments
    ///
    /// * `category` - the list to reorder; the other list is never touched
    /// * `id` - release to move
    /// * `direction` - `Up` toward rank 0, `Down` away from it
    ///
    /// # Returns
    ///
    /// `Ok(false)` when the release is already at that end (nothing moves,
    /// the document is still rewritten). An unknown id is `NotFound`.
    pub fn reorder(&self, category: Category, id: &str, direction: Direction) -> StoreResult<bool> {
        let _guard = self.lock.lock();
        let mut catalog = self.load();

        let moved = move_adjacent(catalog.category_mut(category), id, direction)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.persist(&catalog)?;

        if moved {
            info!(id, category = %category, ?direction, "Release moved");
        } else {
            debug!(id, category = %category, ?direction, "Release already at boundary");
        }
        Ok(moved)
    }

    /// Load the document, seeding it on first access. Caller holds the lock.
    fn load(&self) -> ReleaseCatalog {
        match read_json::<StoredCatalog>(self.storage.as_ref()) {
            Loaded::Found(stored) => stored.into_catalog(),
            Loaded::Unreadable => ReleaseCatalog::default(),
            Loaded::Missing => {
                let seed = default_catalog();
                match self.persist(&seed) {
                    Ok(()) => info!(document = %self.storage.describe(), "Seeded default releases"),
                    Err(e) => warn!(error = %e, "Could not persist default releases"),
                }
                seed
            }
        }
    }

    fn persist(&self, catalog: &ReleaseCatalog) -> StoreResult<()> {
        write_json(self.storage.as_ref(), catalog)
    }
}
