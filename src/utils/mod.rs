//! Utility functions and helpers
//!
//! Date parsing, id generation and atomic file replacement.

pub mod atomic;
pub mod time;

pub use atomic::{atomic_write, cleanup_temp_files};
pub use time::{event_date_sort_key, parse_event_date, IdGenerator};
