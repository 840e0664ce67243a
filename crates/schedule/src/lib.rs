//! Scheduling logic over event store snapshots.
//!
//! This crate answers the two read-side questions the CLI asks before and
//! after every mutation:
//!
//! - **Is this slot free?** — [`conflict`] detects overlaps between a
//!   candidate time span and the stored events, and turns a busy slot into
//!   a typed [`ConflictError`] unless the caller forces through.
//! - **What is on the calendar?** — [`query`] filters, searches, and sorts
//!   events for the list, search, and agenda views.
//!
//! Everything here is a pure function over `&[Event]`; no state, no I/O.

pub mod conflict;
pub mod query;

pub use conflict::{Clearance, ConflictError, check, find_conflicts};
pub use query::{SearchScope, agenda, by_range, in_week, on_day, search, upcoming};
