//! Event types and validation.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A short stable identifier for an event, e.g. `evt-7d3f`.
///
/// Assigned when the event is added and immutable afterwards. The format is
/// not a contract beyond uniqueness within a store; see
/// [`EventStore::add`](crate::EventStore::add) for the collision handling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Generate a fresh id from random entropy.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("evt-{}", &hex[..4]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single calendar entry.
///
/// All timestamps are naive local wall-clock values; `date` and
/// `start_time` combine into the instant used for every comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

impl Event {
    /// The instant this event begins.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// The instant this event ends: start + duration.
    pub fn end(&self) -> NaiveDateTime {
        self.start() + TimeDelta::minutes(i64::from(self.duration_minutes))
    }

    /// The interval this event occupies, for overlap checks.
    pub fn span(&self) -> TimeSpan {
        TimeSpan {
            date: self.date,
            start_time: self.start_time,
            duration_minutes: self.duration_minutes,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        if self.duration_minutes == 0 {
            return Err(Error::ZeroDuration);
        }
        Ok(())
    }

    /// Apply a patch to a candidate copy, leaving `self` untouched.
    ///
    /// The candidate is validated as a whole before it is returned, so a
    /// patch either produces a fully valid event or nothing.
    pub(crate) fn apply(&self, patch: EventPatch) -> Result<Event> {
        let mut next = self.clone();
        if let Some(title) = patch.title {
            next.title = title.trim().to_string();
        }
        if let Some(date) = patch.date {
            next.date = date;
        }
        if let Some(start_time) = patch.start_time {
            next.start_time = start_time;
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            next.duration_minutes = duration_minutes;
        }
        if let Some(location) = patch.location {
            next.location = normalize(Some(location));
        }
        if let Some(description) = patch.description {
            next.description = normalize(Some(description));
        }
        next.validate()?;
        next.updated = Local::now().naive_local();
        Ok(next)
    }
}

/// The time interval an event occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
}

impl TimeSpan {
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start() + TimeDelta::minutes(i64::from(self.duration_minutes))
    }

    /// Half-open overlap on `[start, end)`: a span ending exactly when
    /// another begins does not overlap it.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start() < other.end() && self.end() > other.start()
    }
}

/// Input to [`EventStore::add`](crate::EventStore::add): every field of an
/// [`Event`] except the id and bookkeeping timestamps.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl EventDraft {
    /// The interval the drafted event would occupy.
    pub fn span(&self) -> TimeSpan {
        TimeSpan {
            date: self.date,
            start_time: self.start_time,
            duration_minutes: self.duration_minutes,
        }
    }

    /// Check invariants without consuming the draft.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        if self.duration_minutes == 0 {
            return Err(Error::ZeroDuration);
        }
        Ok(())
    }

    pub(crate) fn into_event(self, id: EventId) -> Result<Event> {
        self.validate()?;
        let now = Local::now().naive_local();
        Ok(Event {
            id,
            title: self.title.trim().to_string(),
            date: self.date,
            start_time: self.start_time,
            duration_minutes: self.duration_minutes,
            location: normalize(self.location),
            description: normalize(self.description),
            created: now,
            updated: now,
        })
    }
}

/// A partial update applied atomically by
/// [`EventStore::update`](crate::EventStore::update).
///
/// `None` fields are left unchanged. For `location` and `description`, a
/// present-but-blank value clears the field.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: Option<u32>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(input.to_string()))
}

/// Parse an `HH:MM` time argument.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| Error::InvalidTime(input.to_string()))
}

fn normalize(text: Option<String>) -> Option<String> {
    text.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
