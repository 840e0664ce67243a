//! In-memory event collection.

use chrono::NaiveDate;

use crate::{Error, Event, EventDraft, EventId, EventPatch, Result};

/// Insertion-ordered collection that exclusively owns every [`Event`].
///
/// The store performs no I/O and never reorders records; persistence lives
/// in [`journal`](crate::journal) and sorting in the query layer. Callers
/// receive read-only views or owned copies, so a failed mutation can never
/// leave a half-updated record visible.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Validate a draft and insert it with a fresh unique id.
    ///
    /// Returns a copy of the stored record. Fails only on an invariant
    /// violation in the draft.
    pub fn add(&mut self, draft: EventDraft) -> Result<Event> {
        let event = draft.into_event(self.unique_id())?;
        log::debug!("adding event {}", event.id);
        self.events.push(event.clone());
        Ok(event)
    }

    /// Insert a fully-formed record, keeping its existing id.
    ///
    /// This is the journal-load path: the record is re-validated and
    /// rejected if its id is already taken.
    pub fn insert(&mut self, event: Event) -> Result<()> {
        event.validate()?;
        if self.contains(event.id.as_str()) {
            return Err(Error::DuplicateId(event.id.to_string()));
        }
        self.events.push(event);
        Ok(())
    }

    /// Look up an event by id.
    pub fn get(&self, id: &str) -> Result<&Event> {
        self.events
            .iter()
            .find(|event| event.id.as_str() == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Apply a patch atomically: every field validates and commits, or the
    /// stored record stays exactly as it was.
    pub fn update(&mut self, id: &str, patch: EventPatch) -> Result<Event> {
        let index = self
            .index_of(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let candidate = self.events[index].apply(patch)?;
        log::debug!("updating event {}", candidate.id);
        self.events[index] = candidate.clone();
        Ok(candidate)
    }

    /// Remove an event by id, returning it, or `None` if absent.
    pub fn remove(&mut self, id: &str) -> Option<Event> {
        let index = self.index_of(id)?;
        log::debug!("removing event {id}");
        Some(self.events.remove(index))
    }

    /// Remove every event on `date`, returning them in insertion order.
    pub fn remove_by_date(&mut self, date: NaiveDate) -> Vec<Event> {
        let events = std::mem::take(&mut self.events);
        let (removed, kept) = events.into_iter().partition(|event| event.date == date);
        self.events = kept;
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.events.iter().any(|event| event.id.as_str() == id)
    }

    /// Read-only snapshot of all events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.events.iter().position(|event| event.id.as_str() == id)
    }

    fn unique_id(&self) -> EventId {
        let mut id = EventId::generate();
        while self.contains(id.as_str()) {
            id = EventId::generate();
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_date, parse_time};

    fn draft(title: &str, date: &str, time: &str, minutes: u32) -> EventDraft {
        EventDraft {
            title: title.into(),
            date: parse_date(date).unwrap(),
            start_time: parse_time(time).unwrap(),
            duration_minutes: minutes,
            location: None,
            description: None,
        }
    }

    #[test]
    fn add_assigns_id_and_preserves_insertion_order() {
        let mut store = EventStore::new();
        let first = store.add(draft("First", "2025-01-02", "09:00", 30)).unwrap();
        let second = store.add(draft("Second", "2025-01-01", "08:00", 30)).unwrap();

        assert_ne!(first.id, second.id);
        let titles: Vec<&str> = store.events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = EventStore::new();
        assert!(matches!(store.get("evt-0000"), Err(Error::NotFound(_))));
    }

    #[test]
    fn update_commits_all_fields() {
        let mut store = EventStore::new();
        let event = store.add(draft("Original", "2025-01-01", "09:00", 30)).unwrap();

        let updated = store
            .update(
                event.id.as_str(),
                EventPatch {
                    title: Some("Renamed".into()),
                    duration_minutes: Some(45),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.duration_minutes, 45);
        assert_eq!(updated.date, event.date);
        assert_eq!(updated.id, event.id);
        assert_eq!(store.get(event.id.as_str()).unwrap(), &updated);
    }

    #[test]
    fn failed_update_leaves_record_untouched() {
        let mut store = EventStore::new();
        let event = store.add(draft("Original", "2025-01-01", "09:00", 30)).unwrap();
        let before = store.get(event.id.as_str()).unwrap().clone();

        let result = store.update(
            event.id.as_str(),
            EventPatch {
                title: Some("Renamed".into()),
                duration_minutes: Some(0),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(Error::ZeroDuration)));
        assert_eq!(store.get(event.id.as_str()).unwrap(), &before);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = EventStore::new();
        let result = store.update("evt-0000", EventPatch::default());
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn remove_returns_the_record_or_none() {
        let mut store = EventStore::new();
        let event = store.add(draft("Gone", "2025-01-01", "09:00", 30)).unwrap();

        assert!(store.remove("evt-zzzz").is_none());
        let removed = store.remove(event.id.as_str()).unwrap();
        assert_eq!(removed.id, event.id);
        assert!(store.is_empty());
    }

    #[test]
    fn remove_by_date_only_touches_that_date() {
        let mut store = EventStore::new();
        store.add(draft("A", "2025-01-01", "09:00", 30)).unwrap();
        store.add(draft("B", "2025-01-02", "09:00", 30)).unwrap();
        store.add(draft("C", "2025-01-01", "15:00", 30)).unwrap();

        let removed = store.remove_by_date(parse_date("2025-01-01").unwrap());
        let removed: Vec<&str> = removed.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(removed, ["A", "C"]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.events()[0].title, "B");
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut store = EventStore::new();
        let event = store.add(draft("A", "2025-01-01", "09:00", 30)).unwrap();

        let result = store.insert(event);
        assert!(matches!(result, Err(Error::DuplicateId(_))));
        assert_eq!(store.len(), 1);
    }
}
