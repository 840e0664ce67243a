//! Event model and JSON-backed storage for the calctl calendar.
//!
//! This crate owns the calendar's data: every event the user has scheduled,
//! the rules that keep a record valid, and the journal file the collection
//! is persisted to between command invocations.
//!
//! # Overview
//!
//! The storage layer serves two purposes:
//!
//! 1. **Single source of truth** — The [`EventStore`] exclusively owns all
//!    [`Event`] records in memory. Callers get read-only views or owned
//!    copies; every mutation goes through a store method that re-validates
//!    invariants.
//!
//! 2. **Durability** — The [`journal`] module loads and saves the whole
//!    collection as one JSON array, rejecting malformed records one at a
//!    time instead of discarding the file.
//!
//! # Core Concepts
//!
//! ## Event
//!
//! An [`Event`] is one calendar entry: a title, a date, a start time, and a
//! positive duration in minutes, plus optional location and description.
//! The date and start time combine into a single instant used for all
//! comparisons; see [`TimeSpan`].
//!
//! ## EventId
//!
//! An [`EventId`] is a short stable identifier like `evt-7d3f`. It is
//! assigned once when the event is added and never changes. Uniqueness is
//! guaranteed within a store by regenerating on collision.
//!
//! ## EventStore
//!
//! The [`EventStore`] is an insertion-ordered in-memory collection. It
//! performs no I/O and no sorting; ordering for display is the query
//! layer's explicit concern.
//!
//! # Example
//!
//! ```
//! use store::{EventDraft, EventStore};
//!
//! let mut store = EventStore::new();
//! let event = store.add(EventDraft {
//!     title: "Standup".into(),
//!     date: store::parse_date("2025-06-02")?,
//!     start_time: store::parse_time("09:30")?,
//!     duration_minutes: 15,
//!     location: None,
//!     description: None,
//! })?;
//!
//! assert!(event.id.as_str().starts_with("evt-"));
//! assert_eq!(store.len(), 1);
//! # Ok::<(), store::Error>(())
//! ```

mod error;
mod event;
pub mod journal;
mod store;

pub use error::{Error, Result};
pub use event::{Event, EventDraft, EventId, EventPatch, TimeSpan, parse_date, parse_time};
pub use journal::{LoadReport, RejectedRecord};
pub use store::EventStore;
