//! Street-address extraction from a full postal address.

use e2p_model::{NBSP, escape};

/// Return the part of `address` that precedes the locality `region`.
///
/// The split point is the *last* whitespace character in `address` that is
/// immediately followed by `region`. Trailing commas and spaces are trimmed
/// from the result. When the region text also appears earlier (say inside a
/// business name), the rightmost occurrence still wins.
///
/// Returns `None` if no whitespace is followed by `region`.
///
/// ```
/// use e2p_core::address::split_address;
///
/// let street = split_address("17405 US-441, High Springs, FL 32643, USA", "High Springs");
/// assert_eq!(street, Some("17405 US-441"));
/// ```
pub fn split_address<'a>(address: &'a str, region: &str) -> Option<&'a str> {
    address
        .char_indices()
        .rev()
        .filter(|(_, ch)| ch.is_whitespace())
        .find(|(index, ch)| address[index + ch.len_utf8()..].starts_with(region))
        .map(|(index, _)| address[..index].trim_end_matches([',', ' ']))
}

/// Escape `fragment` and join its tokens with non-breaking spaces.
///
/// Spaces and hyphens both become `&nbsp;` so a street address is never
/// wrapped across lines.
pub fn non_breaking(fragment: &str) -> String {
    escape(fragment).replace([' ', '-'], NBSP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_before_region() {
        assert_eq!(
            split_address("17405 US-441, High Springs, FL 32643, USA", "High Springs"),
            Some("17405 US-441")
        );
    }

    #[test]
    fn rightmost_occurrence_wins() {
        let address = "1 Gainesville Plaza, Suite 2, Gainesville, FL 32601, USA";
        assert_eq!(
            split_address(address, "Gainesville"),
            Some("1 Gainesville Plaza, Suite 2")
        );
    }

    #[test]
    fn region_must_follow_whitespace() {
        assert_eq!(split_address("High Springs, FL", "High Springs"), None);
        assert_eq!(split_address("12 Main St, Alachua, FL", "Newberry"), None);
    }

    #[test]
    fn region_at_start_after_whitespace_yields_empty_street() {
        assert_eq!(split_address(" Alachua, FL", "Alachua"), Some(""));
    }

    #[test]
    fn trims_mixed_trailing_commas_and_spaces() {
        assert_eq!(
            split_address("Unit 4 , ,  Micanopy, FL", "Micanopy"),
            Some("Unit 4")
        );
    }

    #[test]
    fn non_breaking_replaces_spaces_and_hyphens() {
        assert_eq!(non_breaking("17405 US-441"), "17405&nbsp;US&nbsp;441");
        assert_eq!(non_breaking("A & B"), "A&nbsp;&amp;&nbsp;B");
    }
}
