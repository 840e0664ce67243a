//! Read-side filtering, search, and agenda building.
//!
//! All functions are pure reads over a store snapshot. Sorts are stable,
//! so events sharing a (date, start time) keep their insertion order.

use chrono::{NaiveDate, Weekday};
use store::Event;

/// Which fields [`search`] matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Match the title only.
    TitleOnly,
    /// Match title, description, and location.
    All,
}

/// Events with `from <= date <= to`, sorted ascending by (date, start time).
pub fn by_range<'a>(events: &'a [Event], from: NaiveDate, to: NaiveDate) -> Vec<&'a Event> {
    let mut hits: Vec<&Event> = events
        .iter()
        .filter(|event| from <= event.date && event.date <= to)
        .collect();
    hits.sort_by_key(|event| (event.date, event.start_time));
    hits
}

/// Events on a single day; equivalent to `by_range(date, date)`.
pub fn on_day<'a>(events: &'a [Event], date: NaiveDate) -> Vec<&'a Event> {
    by_range(events, date, date)
}

/// Events in the 7-day window containing `reference`, starting at
/// `week_start`.
pub fn in_week<'a>(events: &'a [Event], reference: NaiveDate, week_start: Weekday) -> Vec<&'a Event> {
    let week = reference.week(week_start);
    by_range(events, week.first_day(), week.last_day())
}

/// Events on or after `reference`, sorted; the default listing view.
pub fn upcoming<'a>(events: &'a [Event], reference: NaiveDate) -> Vec<&'a Event> {
    let mut hits: Vec<&Event> = events.iter().filter(|event| event.date >= reference).collect();
    hits.sort_by_key(|event| (event.date, event.start_time));
    hits
}

/// Case-insensitive substring search over the requested fields.
///
/// A blank query matches nothing rather than everything.
pub fn search<'a>(events: &'a [Event], query: &str, scope: SearchScope) -> Vec<&'a Event> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    events
        .iter()
        .filter(|event| {
            let mut haystacks = vec![event.title.as_str()];
            if scope == SearchScope::All {
                haystacks.extend(event.description.as_deref());
                haystacks.extend(event.location.as_deref());
            }
            haystacks.iter().any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

/// A single day's events sorted by start time.
///
/// Grouping a week's agenda by date is the rendering layer's concern; it
/// feeds each day through here.
pub fn agenda<'a>(events: &'a [Event], date: NaiveDate) -> Vec<&'a Event> {
    let mut hits: Vec<&Event> = events.iter().filter(|event| event.date == date).collect();
    hits.sort_by_key(|event| event.start_time);
    hits
}
