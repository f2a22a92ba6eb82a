//! Standard Type 1 fonts: family resolution, glyph widths, WinAnsi encoding.
//!
//! Only the base-14 faces are used, so nothing is embedded. Widths are the
//! Adobe AFM advance widths for printable ASCII in 1/1000 em.

/// A font family with a regular and a bold face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

/// One concrete standard font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
    CourierBold,
}

impl FontFamily {
    /// Resolve a configured font name. Unknown names fall back to Helvetica.
    pub fn resolve(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.starts_with("times") {
            FontFamily::Times
        } else if lower.starts_with("courier") {
            FontFamily::Courier
        } else {
            FontFamily::Helvetica
        }
    }

    /// Whether `name` names one of the supported families.
    pub fn is_known(name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        ["helvetica", "times", "courier"]
            .iter()
            .any(|family| lower.starts_with(family))
    }

    pub fn face(self, bold: bool) -> StandardFont {
        match (self, bold) {
            (FontFamily::Helvetica, false) => StandardFont::Helvetica,
            (FontFamily::Helvetica, true) => StandardFont::HelveticaBold,
            (FontFamily::Times, false) => StandardFont::TimesRoman,
            (FontFamily::Times, true) => StandardFont::TimesBold,
            (FontFamily::Courier, false) => StandardFont::Courier,
            (FontFamily::Courier, true) => StandardFont::CourierBold,
        }
    }
}

impl StandardFont {
    /// PostScript name used as the PDF `/BaseFont`.
    pub fn base_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    fn widths(self) -> Option<&'static [u16; 95]> {
        match self {
            StandardFont::Helvetica => Some(&HELVETICA),
            StandardFont::HelveticaBold => Some(&HELVETICA_BOLD),
            StandardFont::TimesRoman => Some(&TIMES_ROMAN),
            StandardFont::TimesBold => Some(&TIMES_BOLD),
            StandardFont::Courier | StandardFont::CourierBold => None,
        }
    }

    /// Advance width of `ch` in 1/1000 em.
    pub fn advance(self, ch: char) -> u16 {
        let Some(table) = self.widths() else {
            return 600;
        };
        let ascii = |c: char| table[c as usize - 0x20];
        match ch {
            ' '..='~' => ascii(ch),
            '\u{a0}' => ascii(' '),
            '\u{2018}' | '\u{2019}' | '\u{201a}' => ascii('\''),
            '\u{201c}' | '\u{201d}' | '\u{201e}' => ascii('"'),
            '\u{2013}' => ascii('0'),
            '\u{2014}' | '\u{2026}' | '\u{2030}' => 2 * ascii('0'),
            _ => ascii('o'),
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.advance(ch))).sum();
        units as f32 * size / 1000.0
    }
}

/// Encode text for a WinAnsi-encoded simple font; unmappable characters
/// become `?`.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars().map(winansi_byte).collect()
}

fn winansi_byte(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => b'?',
    }
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_families() {
        assert_eq!(FontFamily::resolve("Helvetica"), FontFamily::Helvetica);
        assert_eq!(FontFamily::resolve("Times-Roman"), FontFamily::Times);
        assert_eq!(FontFamily::resolve("courier"), FontFamily::Courier);
        assert_eq!(FontFamily::resolve("Comic Sans"), FontFamily::Helvetica);
        assert!(!FontFamily::is_known("Comic Sans"));
    }

    #[test]
    fn measures_text() {
        let width = StandardFont::Helvetica.text_width("Hi", 10.0);
        assert!((width - (7.22 + 2.22)).abs() < 1e-4);
        let width = StandardFont::Courier.text_width("abc", 10.0);
        assert!((width - 18.0).abs() < 1e-4);
    }

    #[test]
    fn bold_is_wider() {
        let regular = StandardFont::Helvetica.text_width("Sunrise Group", 8.0);
        let bold = StandardFont::HelveticaBold.text_width("Sunrise Group", 8.0);
        assert!(bold > regular);
    }

    #[test]
    fn encodes_winansi() {
        assert_eq!(encode_winansi("A\u{a0}é’€"), vec![b'A', 0xa0, 0xe9, 0x92, 0x80]);
        assert_eq!(encode_winansi("日"), vec![b'?']);
    }
}
