//! Data types for the artist site
//!
//! This module contains the records persisted by the stores and exchanged
//! over the admin API.

mod event;
mod release;

pub use event::{Event, EventDraft, RecordRef};
pub use release::{
    Category, Direction, Release, ReleaseCatalog, ReleaseDraft, UnknownCategory,
};
