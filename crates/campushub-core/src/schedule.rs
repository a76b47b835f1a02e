// Filtering, sorting, and day-grouping for the event list views
//
// One filtered and sorted projection feeds the grid and table presentations;
// the timeline additionally buckets by calendar day. `today` is always passed
// in explicitly so the projections stay deterministic under test.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::event::Event;

/// Sort toggle for the event list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Ordering for event lists: undated events sort after all dated events;
/// dated events compare by calendar day, then timed-before-untimed within a
/// day, then by the zero-padded `HH:MM` start time, then case-insensitively
/// by name. Undated events order among themselves by name.
pub fn compare_events(a: &Event, b: &Event) -> Ordering {
    match (event_day(a), event_day(b)) {
        (None, None) => compare_names(a, b),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(day_a), Some(day_b)) => day_a
            .cmp(&day_b)
            .then_with(|| compare_times(a.start_time.as_deref(), b.start_time.as_deref()))
            .then_with(|| compare_names(a, b)),
    }
}

/// Sorts ascending with `compare_events`. Descending reverses the sorted
/// list wholesale rather than negating the comparator, so tie-break groups
/// keep their internal structure and the toggle yields the exact reverse.
pub fn sort_events(events: &mut [Event], direction: SortDirection) {
    events.sort_by(compare_events);
    if direction == SortDirection::Descending {
        events.reverse();
    }
}

/// Filters applied in fixed order: free-text query, then hide-past, then the
/// inverse-sense flag filters (each keeps only events where the flag is
/// still false).
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Case-insensitive substring matched against name, description,
    /// location, and organisers; an event matches if any field contains it.
    pub query: Option<String>,
    /// Drop events whose calendar day is strictly before `today`. Undated
    /// events are kept.
    pub hide_past: bool,
    pub only_not_highlighted: bool,
    pub only_not_linkedin_posted: bool,
    pub only_not_whatsapp_posted: bool,
    pub only_not_newsletter_posted: bool,
}

impl EventFilter {
    pub fn matches(&self, event: &Event, today: NaiveDate) -> bool {
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            if !query.is_empty() && !text_matches(event, &query) {
                return false;
            }
        }
        if self.hide_past {
            if let Some(day) = event_day(event) {
                if day < today {
                    return false;
                }
            }
        }
        if self.only_not_highlighted && event.highlighted {
            return false;
        }
        if self.only_not_linkedin_posted && event.linkedin_posted {
            return false;
        }
        if self.only_not_whatsapp_posted && event.whatsapp_posted {
            return false;
        }
        if self.only_not_newsletter_posted && event.newsletter_posted {
            return false;
        }
        true
    }
}

/// Apply the filter pipeline, keeping the input order.
pub fn filter_events(events: Vec<Event>, filter: &EventFilter, today: NaiveDate) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| filter.matches(event, today))
        .collect()
}

/// One-call projection for the grid and table presentations.
pub fn event_list(
    events: Vec<Event>,
    filter: &EventFilter,
    direction: SortDirection,
    today: NaiveDate,
) -> Vec<Event> {
    let mut filtered = filter_events(events, filter, today);
    sort_events(&mut filtered, direction);
    filtered
}

/// Events sharing one calendar day. `day` is the midnight-normalized group
/// key; `None` collects the undated events.
#[derive(Debug, Clone)]
pub struct DayGroup {
    pub day: Option<NaiveDate>,
    pub events: Vec<Event>,
}

/// Timeline projection: filter, sort with the toggle, then bucket by
/// calendar day. The list is fully sorted before bucketing, so bucket order
/// and in-bucket order both follow the toggle.
pub fn event_timeline(
    events: Vec<Event>,
    filter: &EventFilter,
    direction: SortDirection,
    today: NaiveDate,
) -> Vec<DayGroup> {
    let sorted = event_list(events, filter, direction, today);
    let mut groups: Vec<DayGroup> = Vec::new();
    for event in sorted {
        let day = event_day(&event);
        match groups.last_mut() {
            Some(group) if group.day == day => group.events.push(event),
            _ => groups.push(DayGroup {
                day,
                events: vec![event],
            }),
        }
    }
    groups
}

/// "Today", "Tomorrow", or a short month-day label.
pub fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".to_string()
    } else if Some(day) == today.succ_opt() {
        "Tomorrow".to_string()
    } else {
        day.format("%b %-d").to_string()
    }
}

/// Full weekday name, computed independently of `day_label`.
pub fn weekday_label(day: NaiveDate) -> String {
    day.format("%A").to_string()
}

fn event_day(event: &Event) -> Option<NaiveDate> {
    event.start_date.map(|date| date.date_naive())
}

/// True when any searchable field contains the lowercased query.
fn text_matches(event: &Event, query: &str) -> bool {
    [
        Some(event.name.as_str()),
        event.description.as_deref(),
        event.location.as_deref(),
        event.organisers.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(query))
}

fn compare_times(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        // timed events come before untimed ones on the same day
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        // lexical comparison is correct for zero-padded HH:MM
        (Some(time_a), Some(time_b)) => time_a.cmp(time_b),
    }
}

fn compare_names(a: &Event, b: &Event) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn event(name: &str, date: Option<&str>, time: Option<&str>) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            start_date: date.map(|d| {
                DateTime::parse_from_rfc3339(d)
                    .expect("test date")
                    .with_timezone(&Utc)
            }),
            end_date: None,
            start_time: time.map(str::to_string),
            location: None,
            organisers: None,
            format: None,
            link: None,
            linkedin_posted: false,
            whatsapp_posted: false,
            newsletter_posted: false,
            highlighted: false,
            created_at: DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
                .expect("test date")
                .with_timezone(&Utc),
            updated_at: None,
        }
    }

    fn names(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.name.as_str()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn timed_events_sort_before_untimed_on_the_same_day() {
        let timed = event("Workshop", Some("2026-03-10T18:00:00Z"), Some("18:00"));
        let untimed = event("All-day fair", Some("2026-03-10T00:00:00Z"), None);
        assert_eq!(compare_events(&timed, &untimed), Ordering::Less);
        assert_eq!(compare_events(&untimed, &timed), Ordering::Greater);
    }

    #[test]
    fn undated_events_sort_last_and_by_name_among_themselves() {
        let mut events = vec![
            event("Zeta meetup", None, None),
            event("Alpha meetup", None, None),
            event("Dated", Some("2026-12-31T00:00:00Z"), None),
        ];
        sort_events(&mut events, SortDirection::Ascending);
        assert_eq!(names(&events), vec!["Dated", "Alpha meetup", "Zeta meetup"]);
    }

    #[test]
    fn same_day_timed_events_compare_by_time_then_name() {
        let mut events = vec![
            event("b talk", Some("2026-03-10T00:00:00Z"), Some("19:00")),
            event("A talk", Some("2026-03-10T00:00:00Z"), Some("19:00")),
            event("Breakfast", Some("2026-03-10T00:00:00Z"), Some("09:30")),
        ];
        sort_events(&mut events, SortDirection::Ascending);
        assert_eq!(names(&events), vec!["Breakfast", "A talk", "b talk"]);
    }

    #[test]
    fn descending_is_the_exact_reverse_of_ascending() {
        let source = vec![
            event("Late", Some("2026-03-12T00:00:00Z"), None),
            event("Early", Some("2026-03-09T00:00:00Z"), Some("10:00")),
            event("Undated", None, None),
            event("Mid", Some("2026-03-10T00:00:00Z"), Some("12:00")),
        ];
        let mut ascending = source.clone();
        sort_events(&mut ascending, SortDirection::Ascending);
        let mut descending = source;
        sort_events(&mut descending, SortDirection::Descending);
        let mut reversed = names(&ascending);
        reversed.reverse();
        assert_eq!(names(&descending), reversed);
    }

    #[test]
    fn query_matches_organisers_field() {
        let mut target = event("Hack night", Some("2026-03-11T00:00:00Z"), None);
        target.organisers = Some("GDG Campus".into());
        let other = event("Quiz night", Some("2026-03-11T00:00:00Z"), None);

        let filter = EventFilter {
            query: Some("gdg".into()),
            ..EventFilter::default()
        };
        let kept = filter_events(vec![target, other], &filter, today());
        assert_eq!(names(&kept), vec!["Hack night"]);
    }

    #[test]
    fn hide_past_drops_yesterday_but_keeps_today() {
        let yesterday = event("Old", Some("2026-03-09T23:00:00Z"), None);
        let todays = event("Current", Some("2026-03-10T00:00:00Z"), None);
        let undated = event("Dateless", None, None);

        let filter = EventFilter {
            hide_past: true,
            ..EventFilter::default()
        };
        let kept = filter_events(vec![yesterday, todays, undated], &filter, today());
        assert_eq!(names(&kept), vec!["Current", "Dateless"]);
    }

    #[test]
    fn inverse_flag_filters_keep_only_unset_flags() {
        let mut posted = event("Posted", Some("2026-03-11T00:00:00Z"), None);
        posted.linkedin_posted = true;
        let fresh = event("Fresh", Some("2026-03-11T00:00:00Z"), None);

        let filter = EventFilter {
            only_not_linkedin_posted: true,
            ..EventFilter::default()
        };
        let kept = filter_events(vec![posted, fresh], &filter, today());
        assert_eq!(names(&kept), vec!["Fresh"]);
    }

    #[test]
    fn timeline_buckets_by_day_with_undated_last() {
        let groups = event_timeline(
            vec![
                event("Undated", None, None),
                event("Tue evening", Some("2026-03-10T00:00:00Z"), Some("19:00")),
                event("Tue morning", Some("2026-03-10T00:00:00Z"), Some("09:00")),
                event("Wed", Some("2026-03-11T00:00:00Z"), None),
            ],
            &EventFilter::default(),
            SortDirection::Ascending,
            today(),
        );
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].day, NaiveDate::from_ymd_opt(2026, 3, 10));
        assert_eq!(names(&groups[0].events), vec!["Tue morning", "Tue evening"]);
        assert_eq!(groups[1].day, NaiveDate::from_ymd_opt(2026, 3, 11));
        assert_eq!(groups[2].day, None);
    }

    #[test]
    fn descending_timeline_reverses_buckets_and_their_contents() {
        let groups = event_timeline(
            vec![
                event("Tue morning", Some("2026-03-10T00:00:00Z"), Some("09:00")),
                event("Tue evening", Some("2026-03-10T00:00:00Z"), Some("19:00")),
                event("Wed", Some("2026-03-11T00:00:00Z"), None),
            ],
            &EventFilter::default(),
            SortDirection::Descending,
            today(),
        );
        assert_eq!(groups[0].day, NaiveDate::from_ymd_opt(2026, 3, 11));
        assert_eq!(names(&groups[1].events), vec!["Tue evening", "Tue morning"]);
    }

    #[test]
    fn day_labels() {
        let base = today();
        assert_eq!(day_label(base, base), "Today");
        assert_eq!(day_label(base.succ_opt().unwrap(), base), "Tomorrow");
        assert_eq!(
            day_label(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(), base),
            "Mar 7"
        );
        assert_eq!(
            weekday_label(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()),
            "Saturday"
        );
    }
}
