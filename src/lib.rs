//! Artist Site backend
//!
//! Data and admin API for a musician's website: tour dates and releases kept
//! in two small JSON documents, readable by anyone and editable through a
//! password-gated admin API.
//!
//! # Features
//!
//! - **Tour dates**: always stored and served in calendar order
//! - **Releases**: two manually ranked categories with dense ranks
//! - **Serialized writes**: each store guards its load-mutate-save cycle
//! - **Crash-safe persistence**: documents are replaced atomically
//!
//! # Modules
//!
//! - `types`: Records (Event, Release, ReleaseCatalog)
//! - `store`: Event and release stores over an injected document storage
//! - `api`: Axum router, handlers and admin credential check
//! - `config`: Environment configuration
//! - `utils`: Date parsing, id generation, atomic writes
//!
//! # Example
//!
//! ```no_run
//! use artist_site::store::{EventStore, FileStorage};
//! use artist_site::types::EventDraft;
//!
//! let store = EventStore::new(FileStorage::new("data/events.json"));
//! store.add(EventDraft::new("June 14, 2025", "The Basement", "Columbus")).unwrap();
//! for event in store.list() {
//!     println!("{} - {}", event.date, event.venue);
//! }
//! ```

pub mod api;
pub mod config;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState, CredentialCheck, SharedSecret};
pub use config::SiteConfig;
pub use store::{EventStore, ReleaseStore, StoreError, StoreResult};
pub use types::{Category, Direction, Event, EventDraft, Release, ReleaseCatalog, ReleaseDraft};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
