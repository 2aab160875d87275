//! Tour date store
//!
//! The document is a JSON array kept sorted by calendar date on every write.

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::defaults::default_events;
use super::ordering::sort_events_by_date;
use super::{read_json, write_json, DocumentStorage, Loaded, StoreError, StoreResult};
use crate::types::{Event, EventDraft};
use crate::utils::time::IdGenerator;

/// Date-ordered collection of tour events
pub struct EventStore {
    storage: Box<dyn DocumentStorage>,
    /// Held for the whole load-mutate-save cycle
    lock: Mutex<()>,
    ids: IdGenerator,
}

impl EventStore {
    pub fn new<S: DocumentStorage + 'static>(storage: S) -> Self {
        Self {
            storage: Box::new(storage),
            lock: Mutex::new(()),
            ids: IdGenerator::new(),
        }
    }

    /// All events, earliest first
    pub fn list(&self) -> Vec<Event> {
        let _guard = self.lock.lock();
        let mut events = self.load();
        sort_events_by_date(&mut events);
        events
    }

    /// Store a new event under a freshly assigned id
    pub fn add(&self, draft: EventDraft) -> StoreResult<Event> {
        let _guard = self.lock.lock();
        let mut events = self.load();

        let event = Event::from_draft(self.ids.next_id(), draft);
        events.push(event.clone());
        self.persist(&mut events)?;

        info!(id = %event.id, date = %event.date, venue = %event.venue, "Event added");
        Ok(event)
    }

    /// Replace the stored event sharing `event.id`
    pub fn update(&self, event: Event) -> StoreResult<Event> {
        let _guard = self.lock.lock();
        let mut events = self.load();

        let slot = events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or_else(|| StoreError::NotFound(event.id.clone()))?;
        *slot = event.clone();
        self.persist(&mut events)?;

        info!(id = %event.id, "Event updated");
        Ok(event)
    }

    /// Remove the event with `id`. Absent ids are not an error.
    ///
    /// Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock();
        let mut events = self.load();

        let before = events.len();
        events.retain(|e| e.id != id);
        let removed = events.len() != before;
        self.persist(&mut events)?;

        if removed {
            info!(id, "Event deleted");
        } else {
            debug!(id, "Delete of unknown event ignored");
        }
        Ok(removed)
    }

    /// Load the document, seeding it on first access. Caller holds the lock.
    fn load(&self) -> Vec<Event> {
        match read_json::<Vec<Event>>(self.storage.as_ref()) {
            Loaded::Found(events) => events,
            Loaded::Unreadable => Vec::new(),
            Loaded::Missing => {
                let mut seed = default_events();
                match self.persist(&mut seed) {
                    Ok(()) => info!(document = %self.storage.describe(), "Seeded default events"),
                    Err(e) => warn!(error = %e, "Could not persist default events"),
                }
                seed
            }
        }
    }

    fn persist(&self, events: &mut [Event]) -> StoreResult<()> {
        sort_events_by_date(events);
        write_json(self.storage.as_ref(), &*events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use std::sync::Arc;

    fn empty_store() -> (EventStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::with_contents("[]"));
        (EventStore::new(storage.clone()), storage)
    }

    #[test]
    fn test_first_access_seeds_one_event() {
        let storage = Arc::new(MemoryStorage::new());
        let store = EventStore::new(storage.clone());

        let events = store.list();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].venue, "Festivus Music Festival");

        let persisted: Vec<Event> = serde_json::from_str(&storage.contents().unwrap()).unwrap();
        assert_eq!(persisted, events);
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let (store, _) = empty_store();

        let a = store.add(EventDraft::new("May 1, 2025", "A", "Austin")).unwrap();
        let b = store.add(EventDraft::new("May 2, 2025", "B", "Boston")).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_persisted_document_is_date_sorted() {
        let (store, storage) = empty_store();
        store.add(EventDraft::new("not-a-date", "X", "")).unwrap();
        store.add(EventDraft::new("June 1, 2025", "Late", "")).unwrap();
        store.add(EventDraft::new("2025-01-15", "Early", "")).unwrap();

        let persisted: Vec<Event> = serde_json::from_str(&storage.contents().unwrap()).unwrap();
        let venues: Vec<&str> = persisted.iter().map(|e| e.venue.as_str()).collect();
        assert_eq!(venues, vec!["Early", "Late", "X"]);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (store, _) = empty_store();
        let ghost = Event::from_draft("nope".to_string(), EventDraft::new("May 1, 2025", "", ""));

        assert!(matches!(store.update(ghost), Err(StoreError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_update_resorts() {
        let (store, _) = empty_store();
        let first = store.add(EventDraft::new("May 1, 2025", "First", "")).unwrap();
        store.add(EventDraft::new("May 2, 2025", "Second", "")).unwrap();

        let mut moved = first.clone();
        moved.date = "May 3, 2025".to_string();
        store.update(moved).unwrap();

        let venues: Vec<String> = store.list().into_iter().map(|e| e.venue).collect();
        assert_eq!(venues, vec!["Second", "First"]);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (store, _) = empty_store();
        store.add(EventDraft::new("May 1, 2025", "Keep", "")).unwrap();

        assert!(!store.delete("missing").unwrap());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_event_without_date_loads_and_survives_add() {
        let storage = Arc::new(MemoryStorage::with_contents(
            r#"[
                {"id": "1", "date": "May 1, 2025", "venue": "Dated", "location": "", "city": ""},
                {"id": "2", "venue": "NoDate"}
            ]"#,
        ));
        let store = EventStore::new(storage.clone());

        let venues: Vec<String> = store.list().into_iter().map(|e| e.venue).collect();
        assert_eq!(venues, vec!["Dated", "NoDate"]);

        store.add(EventDraft::new("April 1, 2025", "New", "")).unwrap();

        let persisted: Vec<Event> = serde_json::from_str(&storage.contents().unwrap()).unwrap();
        let venues: Vec<&str> = persisted.iter().map(|e| e.venue.as_str()).collect();
        assert_eq!(venues, vec!["New", "Dated", "NoDate"]);
    }

    #[test]
    fn test_malformed_document_lists_empty_without_overwriting() {
        let storage = Arc::new(MemoryStorage::with_contents("{ broken"));
        let store = EventStore::new(storage.clone());

        assert!(store.list().is_empty());
        assert_eq!(storage.contents().as_deref(), Some("{ broken"));
    }

    #[test]
    fn test_write_failure_propagates() {
        let (store, storage) = empty_store();
        storage.set_fail_writes(true);

        let result = store.add(EventDraft::new("May 1, 2025", "A", ""));
        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert!(store.list().is_empty());
    }
}
