//! Property tests for event grouping.

use std::collections::BTreeSet;

use proptest::prelude::*;

use e2p_core::group;
use e2p_model::{EventRecord, GroupError};

const OPTIONS: [&str; 3] = ["in_person", "hybrid", "online"];

fn labels(count: usize) -> Vec<String> {
    (0..count).map(|index| format!("Day {index}")).collect()
}

fn accepted() -> BTreeSet<String> {
    ["in_person", "hybrid"].into_iter().map(String::from).collect()
}

fn event_strategy(sections: usize) -> impl Strategy<Value = EventRecord> {
    (0..OPTIONS.len(), 0..sections as i64, "[a-z]{1,8}").prop_map(|(option, day, name)| {
        EventRecord {
            name: Some(name),
            attendance_option: Some(OPTIONS[option].to_string()),
            day: Some(day),
            ..Default::default()
        }
    })
}

proptest! {
    #[test]
    fn sections_hold_filtered_events_in_input_order(
        events in prop::collection::vec(event_strategy(7), 0..60)
    ) {
        let accepted = accepted();
        let sections = group(events.clone(), &accepted, &labels(7)).expect("group");
        prop_assert_eq!(sections.len(), 7);
        for (day, section) in sections.iter().enumerate() {
            let expected: Vec<EventRecord> = events
                .iter()
                .filter(|event| {
                    event
                        .attendance_option
                        .as_deref()
                        .is_some_and(|option| accepted.contains(option))
                })
                .filter(|event| event.day == Some(day as i64))
                .cloned()
                .collect();
            prop_assert_eq!(&section.events, &expected);
        }
    }

    #[test]
    fn no_unaccepted_event_survives(
        events in prop::collection::vec(event_strategy(3), 0..40)
    ) {
        let accepted = accepted();
        let sections = group(events, &accepted, &labels(3)).expect("group");
        for section in &sections {
            for event in &section.events {
                let option = event.attendance_option.as_deref().unwrap_or_default();
                prop_assert!(accepted.contains(option));
            }
        }
    }

    #[test]
    fn a_record_without_day_fails_the_call(
        events in prop::collection::vec(event_strategy(4), 1..30),
        pick in any::<prop::sample::Index>()
    ) {
        let mut events = events;
        let index = pick.index(events.len());
        events[index].attendance_option = Some("in_person".to_string());
        events[index].day = None;
        let result = group(events, &accepted(), &labels(4));
        let missing_day = matches!(result, Err(GroupError::MissingField { field: "day", .. }));
        prop_assert!(missing_day);
    }
}
