use std::collections::HashSet;

use store::{EventDraft, EventStore, journal, parse_date, parse_time};

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
fn save_then_load_is_set_equal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let mut store = EventStore::new();
    let mut added = Vec::new();
    added.push(store.add(draft("Standup", "2025-06-02", "09:30", 15)).unwrap());
    added.push(store.add(draft("Review", "2025-06-02", "14:00", 60)).unwrap());
    added.push(store.add(draft("Dentist", "2025-06-05", "11:00", 45)).unwrap());

    journal::save(&path, &store).unwrap();
    let report = journal::load(&path).unwrap();

    assert!(report.rejected.is_empty());
    assert_eq!(report.store.len(), store.len());

    let saved: HashSet<String> = added.iter().map(|e| e.id.to_string()).collect();
    let loaded: HashSet<String> = report
        .store
        .events()
        .iter()
        .map(|e| e.id.to_string())
        .collect();
    assert_eq!(saved, loaded);

    for event in added {
        assert_eq!(report.store.get(event.id.as_str()).unwrap(), &event);
    }
}

#[test]
fn missing_file_is_an_empty_calendar() {
    let dir = tempfile::tempdir().unwrap();
    let report = journal::load(dir.path().join("absent.json")).unwrap();
    assert!(report.store.is_empty());
    assert!(report.rejected.is_empty());
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("events.json");

    let mut store = EventStore::new();
    store.add(draft("Solo", "2025-06-02", "09:00", 30)).unwrap();

    journal::save(&path, &store).unwrap();
    assert!(path.exists());
}

#[test]
fn malformed_records_are_rejected_individually() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    // One valid record, one missing its title, one with zero duration.
    let content = r#"[
        {
            "id": "evt-1a2b",
            "title": "Valid",
            "date": "2025-06-02",
            "start_time": "09:00:00",
            "duration_minutes": 30,
            "location": null,
            "description": null,
            "created": "2025-06-01T08:00:00",
            "updated": "2025-06-01T08:00:00"
        },
        {
            "id": "evt-3c4d",
            "date": "2025-06-02",
            "start_time": "10:00:00",
            "duration_minutes": 30,
            "created": "2025-06-01T08:00:00",
            "updated": "2025-06-01T08:00:00"
        },
        {
            "id": "evt-5e6f",
            "title": "No time at all",
            "date": "2025-06-02",
            "start_time": "11:00:00",
            "duration_minutes": 0,
            "created": "2025-06-01T08:00:00",
            "updated": "2025-06-01T08:00:00"
        }
    ]"#;
    std::fs::write(&path, content).unwrap();

    let report = journal::load(&path).unwrap();
    assert_eq!(report.store.len(), 1);
    assert!(report.store.get("evt-1a2b").is_ok());

    let indices: Vec<usize> = report.rejected.iter().map(|r| r.index).collect();
    assert_eq!(indices, [1, 2]);
    for rejected in &report.rejected {
        assert!(!rejected.reason.is_empty());
    }
}

#[test]
fn duplicate_ids_keep_the_first_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let content = r#"[
        {
            "id": "evt-1a2b",
            "title": "First",
            "date": "2025-06-02",
            "start_time": "09:00:00",
            "duration_minutes": 30,
            "created": "2025-06-01T08:00:00",
            "updated": "2025-06-01T08:00:00"
        },
        {
            "id": "evt-1a2b",
            "title": "Second",
            "date": "2025-06-03",
            "start_time": "09:00:00",
            "duration_minutes": 30,
            "created": "2025-06-01T08:00:00",
            "updated": "2025-06-01T08:00:00"
        }
    ]"#;
    std::fs::write(&path, content).unwrap();

    let report = journal::load(&path).unwrap();
    assert_eq!(report.store.len(), 1);
    assert_eq!(report.store.get("evt-1a2b").unwrap().title, "First");
    assert_eq!(report.rejected.len(), 1);
    assert!(report.rejected[0].reason.contains("duplicate"));
}

#[test]
fn non_array_journal_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    std::fs::write(&path, r#"{"not": "an array"}"#).unwrap();

    assert!(journal::load(&path).is_err());
}
