//! Formatting of events into schedule table rows.

use std::collections::BTreeSet;

use e2p_model::{
    DesignationMap, EventRecord, FormatError, FormattedRow, FormattedSection, Fragment, Markup,
    Section,
};

use crate::address::{non_breaking, split_address};

/// Abbreviations for the event's category codes, in map order, joined by `/`.
pub fn designations(types: &BTreeSet<String>, map: &DesignationMap) -> String {
    map.iter()
        .filter(|(code, _)| types.contains(*code))
        .map(|(_, abbrev)| abbrev)
        .collect::<Vec<_>>()
        .join("/")
}

/// Event name followed by its designation suffix, if any.
pub fn display_name(name: &str, types: &BTreeSet<String>, map: &DesignationMap) -> String {
    let suffix = designations(types, map);
    if suffix.is_empty() {
        name.to_string()
    } else {
        format!("{name} {suffix}")
    }
}

/// Format one event into its time, details and region cells.
///
/// # Errors
///
/// Fails when a display field is absent or the region cannot be located in
/// the formatted address.
pub fn format_row(event: &EventRecord, map: &DesignationMap) -> Result<FormattedRow, FormatError> {
    let time = required(event.time_formatted.as_deref(), "time_formatted")?;
    let name = required(event.name.as_deref(), "name")?;
    let location = required(event.location.as_deref(), "location")?;
    let address = required(event.formatted_address.as_deref(), "formatted_address")?;
    let region = required(event.region.as_deref(), "region")?;
    if region.is_empty() {
        return Err(FormatError::MissingField { field: "region" });
    }

    let street = split_address(address, region).ok_or_else(|| FormatError::RegionNotFound {
        region: region.to_string(),
        address: address.to_string(),
    })?;

    let mut details = Markup::bold(&display_name(name, &event.types, map));
    details.push_break();
    details.push_text(location);
    details.push_text(", ");
    details.push_raw(&non_breaking(street));
    if let Some(notes) = event.notes.as_deref().filter(|notes| !notes.is_empty()) {
        details.push_break();
        details.push_text(notes);
    }

    Ok(FormattedRow {
        time: Fragment::body(Markup::text(time)),
        details: Fragment::body(details),
        region: Fragment::bold(Markup::text(region)),
    })
}

/// Format every event of every section.
///
/// The first failing event aborts the batch; the error names its section and
/// row.
pub fn format_sections(
    sections: &[Section],
    map: &DesignationMap,
) -> Result<Vec<FormattedSection>, FormatError> {
    sections
        .iter()
        .map(|section| {
            let rows = section
                .events
                .iter()
                .enumerate()
                .map(|(row, event)| {
                    format_row(event, map).map_err(|source| FormatError::Row {
                        section: section.label.clone(),
                        row,
                        source: Box::new(source),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FormattedSection {
                label: section.label.clone(),
                rows,
            })
        })
        .collect()
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, FormatError> {
    value.ok_or(FormatError::MissingField { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use e2p_model::Emphasis;

    fn types(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|code| (*code).to_string()).collect()
    }

    fn sample() -> EventRecord {
        EventRecord {
            time_formatted: Some("7:00 pm".to_string()),
            name: Some("Sunrise Group".to_string()),
            types: types(&["O", "B"]),
            attendance_option: Some("in_person".to_string()),
            day: Some(0),
            location: Some("Library".to_string()),
            formatted_address: Some("17405 US-441, High Springs, FL 32643, USA".to_string()),
            region: Some("High Springs".to_string()),
            notes: None,
        }
    }

    #[test]
    fn designations_follow_map_order() {
        let map = DesignationMap::reference();
        assert_eq!(designations(&types(&["B", "O"]), &map), "O/BB");
        assert_eq!(designations(&types(&["X", "MED", "ZZ"]), &map), "M/WC");
        assert_eq!(designations(&types(&[]), &map), "");
    }

    #[test]
    fn display_name_omits_empty_suffix() {
        let map = DesignationMap::reference();
        assert_eq!(display_name("Noon", &types(&[]), &map), "Noon");
        assert_eq!(display_name("Noon", &types(&["C"]), &map), "Noon C");
    }

    #[test]
    fn formats_three_cells() {
        let row = format_row(&sample(), &DesignationMap::reference()).expect("format");
        assert_eq!(row.time.markup.as_str(), "7:00 pm");
        assert_eq!(row.time.emphasis, Emphasis::Body);
        assert_eq!(
            row.details.markup.as_str(),
            "<b>Sunrise Group O/BB</b><br/>Library, 17405&nbsp;US&nbsp;441"
        );
        assert_eq!(row.region.markup.as_str(), "High Springs");
        assert_eq!(row.region.emphasis, Emphasis::Bold);
    }

    #[test]
    fn notes_follow_address_on_new_line() {
        let mut event = sample();
        event.notes = Some("Use side door".to_string());
        let row = format_row(&event, &DesignationMap::reference()).expect("format");
        assert!(row.details.markup.as_str().ends_with("441<br/>Use side door"));
    }

    #[test]
    fn empty_location_keeps_separator() {
        let mut event = sample();
        event.location = Some(String::new());
        let row = format_row(&event, &DesignationMap::reference()).expect("format");
        assert_eq!(
            row.details.markup.as_str(),
            "<b>Sunrise Group O/BB</b><br/>, 17405&nbsp;US&nbsp;441"
        );
    }

    #[test]
    fn missing_region_in_address_fails() {
        let mut event = sample();
        event.region = Some("Alachua".to_string());
        let err = format_row(&event, &DesignationMap::reference()).unwrap_err();
        assert!(matches!(err, FormatError::RegionNotFound { .. }));
    }

    #[test]
    fn missing_display_field_fails() {
        let mut event = sample();
        event.location = None;
        let err = format_row(&event, &DesignationMap::reference()).unwrap_err();
        assert_eq!(err, FormatError::MissingField { field: "location" });

        let mut event = sample();
        event.region = Some(String::new());
        let err = format_row(&event, &DesignationMap::reference()).unwrap_err();
        assert_eq!(err, FormatError::MissingField { field: "region" });
    }

    #[test]
    fn batch_error_names_section_and_row() {
        let mut bad = sample();
        bad.formatted_address = None;
        let sections = vec![Section {
            label: "Monday".to_string(),
            events: vec![sample(), bad],
        }];
        let err = format_sections(&sections, &DesignationMap::reference()).unwrap_err();
        match err {
            FormatError::Row { section, row, source } => {
                assert_eq!(section, "Monday");
                assert_eq!(row, 1);
                assert_eq!(
                    *source,
                    FormatError::MissingField {
                        field: "formatted_address"
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
