//! JSON journal: durable storage for the event collection.
//!
//! The journal is a single file holding one JSON array of event records.
//! Loading decodes and validates each record individually, so one corrupt
//! entry never costs the rest of the calendar; every rejection is reported
//! back to the caller in the [`LoadReport`].

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::{Error, Event, EventStore, Result};

/// Outcome of loading a journal: the populated store plus any records that
/// were rejected individually.
#[derive(Debug)]
pub struct LoadReport {
    pub store: EventStore,
    pub rejected: Vec<RejectedRecord>,
}

/// A journal entry that failed to decode or validate.
#[derive(Debug)]
pub struct RejectedRecord {
    /// Position of the record in the journal array.
    pub index: usize,
    pub reason: String,
}

/// Load a journal file into a fresh store.
///
/// A missing file is an empty calendar. Malformed records (missing fields,
/// zero duration, duplicate ids, unparsable dates) are rejected one at a
/// time and reported; the remaining valid records still load. A file that
/// is not a JSON array at all is an error.
pub fn load(path: impl AsRef<Path>) -> Result<LoadReport> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(LoadReport {
            store: EventStore::new(),
            rejected: Vec::new(),
        });
    }

    let content = fs::read_to_string(path)?;
    let records: Vec<Value> = serde_json::from_str(&content)?;

    let mut store = EventStore::new();
    let mut rejected = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        let outcome = serde_json::from_value::<Event>(record)
            .map_err(Error::from)
            .and_then(|event| store.insert(event));
        if let Err(err) = outcome {
            log::warn!("journal record {index} rejected: {err}");
            rejected.push(RejectedRecord {
                index,
                reason: err.to_string(),
            });
        }
    }

    Ok(LoadReport { store, rejected })
}

/// Persist the full collection, creating parent directories as needed.
///
/// Records are written pretty-printed in insertion order.
pub fn save(path: impl AsRef<Path>, store: &EventStore) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(store.events())?;
    fs::write(path, json)?;
    Ok(())
}
