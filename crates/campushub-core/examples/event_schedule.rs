//! Event Schedule Example - Filtering, sorting, and day grouping
//!
//! Builds a small event list and prints the timeline projection the way the
//! dashboard renders it: filtered, sorted with the direction toggle, and
//! bucketed by calendar day with the "Today" / "Tomorrow" labels.
//!
//! Run with: cargo run -p campushub-core --example event_schedule

use campushub_core::{
    day_label, event_list, event_timeline, weekday_label, Event, EventFilter, SortDirection,
};
use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

fn event(name: &str, day: Option<(u32, u32)>, time: Option<&str>) -> Event {
    Event {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        start_date: day.map(|(month, day)| Utc.with_ymd_and_hms(2026, month, day, 0, 0, 0).unwrap()),
        end_date: None,
        start_time: time.map(str::to_string),
        location: Some("Campus Lab 2".to_string()),
        organisers: Some("CampusHub Crew".to_string()),
        format: None,
        link: None,
        linkedin_posted: false,
        whatsapp_posted: false,
        newsletter_posted: false,
        highlighted: false,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        updated_at: None,
    }
}

fn main() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

    let mut past = event("Winter social", Some((2, 20)), None);
    past.whatsapp_posted = true;
    let events = vec![
        past,
        event("Rust workshop", Some((3, 10)), Some("18:00")),
        event("Career fair", Some((3, 10)), None),
        event("Hack night", Some((3, 11)), Some("19:30")),
        event("Mentor mixer", None, None),
    ];

    println!("=== Event Schedule (campushub-core) ===\n");

    // 1. The grid and table share one filtered, sorted projection
    let filter = EventFilter {
        hide_past: true,
        ..EventFilter::default()
    };
    println!("Upcoming (table order):");
    for event in event_list(events.clone(), &filter, SortDirection::Ascending, today) {
        println!(
            "  {:<14} {}",
            event.name,
            event.start_time.as_deref().unwrap_or("all day")
        );
    }

    // 2. The timeline buckets the same projection by calendar day
    println!("\nTimeline:");
    for group in event_timeline(events.clone(), &filter, SortDirection::Ascending, today) {
        match group.day {
            Some(day) => println!("  {} ({})", day_label(day, today), weekday_label(day)),
            None => println!("  Unscheduled"),
        }
        for event in &group.events {
            println!("    - {}", event.name);
        }
    }

    // 3. Free-text search hits any of the searchable fields
    let search = EventFilter {
        query: Some("crew".to_string()),
        ..EventFilter::default()
    };
    let hits = event_list(events, &search, SortDirection::Ascending, today);
    println!("\nSearch \"crew\" matched {} events via the organisers field", hits.len());
}
