//! Overlap detection between a candidate time span and stored events.

use store::{Event, EventId, TimeSpan};
use thiserror::Error;

/// Every stored event (other than `exclude`) whose span overlaps the
/// candidate under the half-open rule.
///
/// `exclude` is the id of the event being edited, so a record never
/// conflicts with itself.
pub fn find_conflicts<'a>(
    events: &'a [Event],
    span: &TimeSpan,
    exclude: Option<&EventId>,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| exclude != Some(&event.id))
        .filter(|event| event.span().overlaps(span))
        .collect()
}

/// Result of a clearance check on a candidate slot.
#[derive(Debug, Clone)]
pub enum Clearance {
    /// The slot is free.
    Free,
    /// The slot overlaps existing events.
    Busy { conflicts: Vec<Event> },
}

impl Clearance {
    pub fn is_free(&self) -> bool {
        matches!(self, Clearance::Free)
    }

    /// Treat a busy slot as a blocking error.
    ///
    /// Callers honoring a force override skip this and report the
    /// conflicts instead.
    pub fn into_result(self) -> Result<(), ConflictError> {
        match self {
            Clearance::Free => Ok(()),
            Clearance::Busy { conflicts } => Err(ConflictError { conflicts }),
        }
    }
}

/// Check a candidate span against the store before an add or edit.
pub fn check(events: &[Event], span: &TimeSpan, exclude: Option<&EventId>) -> Clearance {
    let conflicts: Vec<Event> = find_conflicts(events, span, exclude)
        .into_iter()
        .cloned()
        .collect();
    if conflicts.is_empty() {
        Clearance::Free
    } else {
        Clearance::Busy { conflicts }
    }
}

/// An overlap was detected and no override was requested.
#[derive(Debug, Error)]
#[error("event conflicts with {}", describe(.conflicts))]
pub struct ConflictError {
    pub conflicts: Vec<Event>,
}

fn describe(conflicts: &[Event]) -> String {
    let details: Vec<String> = conflicts
        .iter()
        .map(|event| {
            format!(
                "\"{}\" ({} - {})",
                event.title,
                event.start_time.format("%H:%M"),
                event.end().format("%H:%M")
            )
        })
        .collect();
    details.join(", ")
}
