//! Event filtering and grouping into day sections.

use std::collections::BTreeSet;

use tracing::debug;

use e2p_model::{EventRecord, GroupError, Section};

/// Keep events whose attendance option is accepted and partition them by `day`.
///
/// Sections come back in `labels` order, one per label, each holding its
/// events in input order. Every record must carry `attendance_option`; kept
/// records must carry a `day` naming one of the labels. Any violation fails
/// the whole call.
///
/// # Errors
///
/// Returns [`GroupError::MissingField`] when a record lacks
/// `attendance_option` (or a kept record lacks `day`) and
/// [`GroupError::DayOutOfRange`] when `day` is not a valid label index.
pub fn group(
    events: Vec<EventRecord>,
    accepted: &BTreeSet<String>,
    labels: &[String],
) -> Result<Vec<Section>, GroupError> {
    let total = events.len();
    let mut sections: Vec<Section> = labels
        .iter()
        .map(|label| Section::new(label.as_str()))
        .collect();
    let mut kept = 0usize;

    for (index, event) in events.into_iter().enumerate() {
        let Some(option) = event.attendance_option.as_deref() else {
            return Err(GroupError::MissingField {
                index,
                field: "attendance_option",
            });
        };
        if !accepted.contains(option) {
            continue;
        }
        let day = event.day.ok_or(GroupError::MissingField { index, field: "day" })?;
        let slot = section_index(day, sections.len()).ok_or(GroupError::DayOutOfRange {
            index,
            day,
            sections: sections.len(),
        })?;
        sections[slot].events.push(event);
        kept += 1;
    }

    debug!(total, kept, sections = sections.len(), "grouped events");
    for section in &sections {
        debug!(section = %section.label, events = section.len(), "section");
    }
    Ok(sections)
}

fn section_index(day: i64, count: usize) -> Option<usize> {
    usize::try_from(day).ok().filter(|slot| *slot < count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        ["Sunday", "Monday", "Tuesday"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn accepted() -> BTreeSet<String> {
        ["in_person", "hybrid"].into_iter().map(String::from).collect()
    }

    fn event(name: &str, option: &str, day: i64) -> EventRecord {
        EventRecord {
            name: Some(name.to_string()),
            attendance_option: Some(option.to_string()),
            day: Some(day),
            ..Default::default()
        }
    }

    fn names(section: &Section) -> Vec<&str> {
        section
            .events
            .iter()
            .filter_map(|event| event.name.as_deref())
            .collect()
    }

    #[test]
    fn partitions_by_day_in_label_order() {
        let events = vec![
            event("a", "in_person", 2),
            event("b", "hybrid", 0),
            event("c", "in_person", 2),
            event("d", "in_person", 0),
        ];
        let sections = group(events, &accepted(), &labels()).expect("group");
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].label, "Sunday");
        assert_eq!(names(&sections[0]), vec!["b", "d"]);
        assert!(sections[1].is_empty());
        assert_eq!(names(&sections[2]), vec!["a", "c"]);
    }

    #[test]
    fn drops_unaccepted_attendance_options() {
        let mut online = event("online", "online", 9);
        online.day = None;
        let events = vec![online, event("kept", "in_person", 1)];
        let sections = group(events, &accepted(), &labels()).expect("group");
        let total: usize = sections.iter().map(Section::len).sum();
        assert_eq!(total, 1);
        assert_eq!(names(&sections[1]), vec!["kept"]);
    }

    #[test]
    fn missing_attendance_option_fails_whole_call() {
        let mut bad = event("bad", "in_person", 0);
        bad.attendance_option = None;
        let events = vec![event("ok", "in_person", 0), bad];
        let err = group(events, &accepted(), &labels()).unwrap_err();
        assert_eq!(
            err,
            GroupError::MissingField {
                index: 1,
                field: "attendance_option"
            }
        );
    }

    #[test]
    fn missing_day_on_kept_event_fails() {
        let mut bad = event("bad", "hybrid", 0);
        bad.day = None;
        let err = group(vec![bad], &accepted(), &labels()).unwrap_err();
        assert_eq!(err, GroupError::MissingField { index: 0, field: "day" });
    }

    #[test]
    fn out_of_range_day_fails() {
        let err = group(vec![event("late", "in_person", 3)], &accepted(), &labels()).unwrap_err();
        assert_eq!(
            err,
            GroupError::DayOutOfRange {
                index: 0,
                day: 3,
                sections: 3
            }
        );
        let err = group(vec![event("early", "in_person", -1)], &accepted(), &labels()).unwrap_err();
        assert!(matches!(err, GroupError::DayOutOfRange { day: -1, .. }));
    }
}
