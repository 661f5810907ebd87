//! Derives the calendar view from a flat list of approved events.
//!
//! This is a pure transform: no I/O, no shared state. Identical inputs
//! always produce identical, order-stable output, so it can be re-run on
//! every filter change.

use chrono::NaiveDate;
use std::cmp::Ordering;

use crate::dates::{parse_event_date, parse_start_time};
use shared_types::{Campus, FoodEvent};

/// Upcoming events are capped to the earliest entries after sorting.
/// Events on the reference date itself are never truncated.
pub const UPCOMING_LIMIT: usize = 10;

/// Campus filter state. `All` is a filter-only pseudo-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampusSelection {
    #[default]
    All,
    Only(Campus),
}

impl CampusSelection {
    pub fn matches(&self, campus: Campus) -> bool {
        match self {
            CampusSelection::All => true,
            CampusSelection::Only(selected) => *selected == campus,
        }
    }
}

/// User-controlled filter state the view is derived against.
#[derive(Debug, Clone)]
pub struct EventFilters {
    pub search: String,
    pub campus: CampusSelection,
    pub reference_date: NaiveDate,
}

/// The two display buckets: events on the reference date, ordered by start
/// time, and upcoming events, ordered by (date, start time) and capped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventView {
    pub today: Vec<FoodEvent>,
    pub upcoming: Vec<FoodEvent>,
}

/// Filter, partition, sort, and cap the record list for display.
///
/// Records dated strictly before the reference date are discarded. A record
/// dated exactly on the reference date always lands in `today`, even if its
/// start time has passed.
pub fn derive_view(records: &[FoodEvent], filters: &EventFilters) -> EventView {
    let needle = filters.search.trim().to_lowercase();

    let mut today = Vec::new();
    let mut upcoming = Vec::new();

    for event in records {
        if !needle.is_empty() && !matches_search(event, &needle) {
            continue;
        }
        if !filters.campus.matches(event.campus) {
            continue;
        }

        // Adapter normalization guarantees these parse; anything that
        // slipped through is not worth a panic here.
        let Some(date) = parse_event_date(&event.event_date) else {
            continue;
        };
        let Some(time) = parse_start_time(&event.start_time) else {
            continue;
        };

        match date.cmp(&filters.reference_date) {
            Ordering::Less => {}
            Ordering::Equal => today.push((time, event.clone())),
            Ordering::Greater => upcoming.push((date, time, event.clone())),
        }
    }

    today.sort_by_key(|(time, _)| *time);
    upcoming.sort_by_key(|(date, time, _)| (*date, *time));
    upcoming.truncate(UPCOMING_LIMIT);

    EventView {
        today: today.into_iter().map(|(_, event)| event).collect(),
        upcoming: upcoming.into_iter().map(|(_, _, event)| event).collect(),
    }
}

/// Case-insensitive substring match against name, location, description,
/// host club, and each individual food-type label. Absent optional fields
/// never match. `needle` must already be lowercased.
fn matches_search(event: &FoodEvent, needle: &str) -> bool {
    event.event_name.to_lowercase().contains(needle)
        || event.event_location.to_lowercase().contains(needle)
        || event
            .event_description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
        || event
            .host_club
            .as_deref()
            .is_some_and(|h| h.to_lowercase().contains(needle))
        || event
            .food_types
            .iter()
            .any(|food| food.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ApprovalStatus;

    fn event(name: &str, date: &str, time: &str) -> FoodEvent {
        FoodEvent {
            id: None,
            event_name: name.to_string(),
            event_location: "Bahen Centre".to_string(),
            event_date: date.to_string(),
            start_time: time.to_string(),
            end_time: None,
            event_description: None,
            host_club: None,
            food_types: vec!["Pizza".to_string()],
            registration_link: None,
            campus: Campus::UTSG,
            approval_status: ApprovalStatus::Approved,
        }
    }

    fn filters(reference: &str) -> EventFilters {
        EventFilters {
            search: String::new(),
            campus: CampusSelection::All,
            reference_date: NaiveDate::parse_from_str(reference, "%Y-%m-%d").unwrap(),
        }
    }

    fn names(events: &[FoodEvent]) -> Vec<&str> {
        events.iter().map(|e| e.event_name.as_str()).collect()
    }

    #[test]
    fn test_reference_date_events_sort_by_time() {
        let records = vec![
            event("noon", "15/10/2024", "12:00"),
            event("morning", "15/10/2024", "09:00"),
        ];
        let view = derive_view(&records, &filters("2024-10-15"));
        assert_eq!(names(&view.today), vec!["morning", "noon"]);
        assert!(view.upcoming.is_empty());
    }

    #[test]
    fn test_past_events_are_discarded() {
        let records = vec![
            event("yesterday", "14/10/2024", "09:00"),
            event("last month", "15/09/2024", "09:00"),
            event("today", "15/10/2024", "09:00"),
            event("tomorrow", "16/10/2024", "09:00"),
        ];
        let view = derive_view(&records, &filters("2024-10-15"));
        assert_eq!(names(&view.today), vec!["today"]);
        assert_eq!(names(&view.upcoming), vec!["tomorrow"]);
    }

    #[test]
    fn test_reference_date_event_never_lands_in_upcoming() {
        // Even an early-morning event on the reference date stays in today.
        let records = vec![event("early", "15/10/2024", "00:01")];
        let view = derive_view(&records, &filters("2024-10-15"));
        assert_eq!(names(&view.today), vec!["early"]);
        assert!(view.upcoming.is_empty());
    }

    #[test]
    fn test_upcoming_sorts_by_date_then_time() {
        let records = vec![
            event("c", "20/10/2024", "10:00"),
            event("b", "16/10/2024", "18:00"),
            event("a", "16/10/2024", "09:00"),
            event("d", "01/01/2025", "08:00"),
        ];
        let view = derive_view(&records, &filters("2024-10-15"));
        assert_eq!(names(&view.upcoming), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_upcoming_caps_at_ten_earliest() {
        let records: Vec<FoodEvent> = (1..=12)
            .map(|day| event(&format!("day {day}"), &format!("{day:02}/11/2024"), "12:00"))
            .rev()
            .collect();
        let view = derive_view(&records, &filters("2024-10-15"));
        assert_eq!(view.upcoming.len(), UPCOMING_LIMIT);
        assert_eq!(view.upcoming.first().unwrap().event_name, "day 1");
        assert_eq!(view.upcoming.last().unwrap().event_name, "day 10");
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut by_name = event("Pizza Night", "16/10/2024", "12:00");
        by_name.food_types = vec!["Not specified".to_string()];
        let mut by_location = event("a", "16/10/2024", "12:00");
        by_location.event_location = "Sidney Smith PIZZA room".to_string();
        by_location.food_types = vec!["Not specified".to_string()];
        let mut by_description = event("b", "16/10/2024", "12:00");
        by_description.event_description = Some("fresh pizza slices".to_string());
        by_description.food_types = vec!["Not specified".to_string()];
        let mut by_host = event("c", "16/10/2024", "12:00");
        by_host.host_club = Some("Pizza Appreciation Club".to_string());
        by_host.food_types = vec!["Not specified".to_string()];
        let mut by_food = event("d", "16/10/2024", "12:00");
        by_food.food_types = vec!["Veggie pizza".to_string()];
        let mut no_match = event("e", "16/10/2024", "12:00");
        no_match.food_types = vec!["Samosas".to_string()];

        let records = vec![by_name, by_location, by_description, by_host, by_food, no_match];
        let mut f = filters("2024-10-15");
        f.search = "PiZzA".to_string();
        let view = derive_view(&records, &f);
        assert_eq!(view.upcoming.len(), 5);
        assert!(!names(&view.upcoming).contains(&"e"));
    }

    #[test]
    fn test_blank_search_passes_everything() {
        let records = vec![event("a", "16/10/2024", "12:00")];
        let mut f = filters("2024-10-15");
        f.search = "   ".to_string();
        let view = derive_view(&records, &f);
        assert_eq!(view.upcoming.len(), 1);
    }

    #[test]
    fn test_campus_filter_is_exact_or_all() {
        let mut utm = event("utm event", "16/10/2024", "12:00");
        utm.campus = Campus::UTM;
        let utsg = event("utsg event", "16/10/2024", "13:00");
        let records = vec![utm, utsg];

        let mut f = filters("2024-10-15");
        f.campus = CampusSelection::Only(Campus::UTM);
        let view = derive_view(&records, &f);
        assert_eq!(names(&view.upcoming), vec!["utm event"]);

        f.campus = CampusSelection::All;
        let view = derive_view(&records, &f);
        assert_eq!(view.upcoming.len(), 2);
    }

    #[test]
    fn test_no_record_before_reference_date_survives_any_filter() {
        let records = vec![
            event("past", "01/01/2020", "12:00"),
            event("future", "16/10/2024", "12:00"),
        ];
        for campus in [
            CampusSelection::All,
            CampusSelection::Only(Campus::UTSG),
            CampusSelection::Only(Campus::UTM),
        ] {
            let mut f = filters("2024-10-15");
            f.campus = campus;
            let view = derive_view(&records, &f);
            assert!(!names(&view.today).contains(&"past"));
            assert!(!names(&view.upcoming).contains(&"past"));
        }
    }

    #[test]
    fn test_derivation_is_pure() {
        let records = vec![
            event("b", "16/10/2024", "18:00"),
            event("a", "16/10/2024", "09:00"),
            event("today", "15/10/2024", "12:00"),
        ];
        let f = filters("2024-10-15");
        let first = derive_view(&records, &f);
        let second = derive_view(&records, &f);
        assert_eq!(first, second);
    }
}
