//! Plain-text and JSON rendering of events.

use chrono::NaiveDate;
use serde::Serialize;
use store::Event;

/// Print events as an aligned table, or a short notice when empty.
pub fn print_events(events: &[&Event]) {
    if events.is_empty() {
        println!("No events.");
        return;
    }

    println!(
        "{:<8}  {:<10}  {:<5}  {:<5}  {:>4}  TITLE",
        "ID", "DATE", "START", "END", "MIN"
    );
    println!("{}", "-".repeat(72));

    for event in events {
        println!(
            "{:<8}  {:<10}  {:<5}  {:<5}  {:>4}  {}",
            event.id,
            event.date.to_string(),
            event.start_time.format("%H:%M").to_string(),
            event.end().format("%H:%M").to_string(),
            event.duration_minutes,
            event.title
        );
    }
}

/// Print one event in full, including the conflicts it currently
/// participates in.
pub fn print_event_details(event: &Event, conflicts: &[&Event]) {
    println!("Event:       {}", event.title);
    println!("Id:          {}", event.id);
    println!("Date:        {}", event.date);
    println!(
        "Time:        {} - {}",
        event.start_time.format("%H:%M"),
        event.end().format("%H:%M")
    );
    println!("Duration:    {} min", event.duration_minutes);
    if let Some(location) = &event.location {
        println!("Location:    {location}");
    }
    if let Some(description) = &event.description {
        println!("Description: {description}");
    }
    println!("Created:     {}", event.created.format("%Y-%m-%d %H:%M"));
    println!("Updated:     {}", event.updated.format("%Y-%m-%d %H:%M"));

    if conflicts.is_empty() {
        println!("Conflicts:   none");
    } else {
        println!("Conflicts:");
        for conflict in conflicts {
            println!(
                "  {}  \"{}\" ({} - {})",
                conflict.id,
                conflict.title,
                conflict.start_time.format("%H:%M"),
                conflict.end().format("%H:%M")
            );
        }
    }
}

/// Print a week's events grouped under date headings.
///
/// Expects input already sorted by (date, start time).
pub fn print_week_agenda(events: &[&Event]) {
    if events.is_empty() {
        println!("No events.");
        return;
    }

    let mut current: Option<NaiveDate> = None;
    for event in events {
        if current != Some(event.date) {
            println!("{} ({})", event.date, event.date.format("%A"));
            current = Some(event.date);
        }
        println!(
            "  {} - {}  {:<8}  {}",
            event.start_time.format("%H:%M"),
            event.end().format("%H:%M"),
            event.id,
            event.title
        );
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
