//! Run configuration.
//!
//! Keys keep the `m` prefix used by existing `events2pdf_conf.json` files.
//! Every key is optional; missing keys take the defaults below.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::document::{Alignment, ParagraphStyle, TableStyle};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "events2pdf_conf.json";

/// Paper size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    Letter,
    #[default]
    Legal,
}

impl PageSize {
    /// Portrait width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Letter => f.write_str("letter"),
            PageSize::Legal => f.write_str("legal"),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("portrait"),
            Orientation::Landscape => f.write_str("landscape"),
        }
    }
}

/// Ordered mapping from category code to the abbreviation shown after a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignationMap(Vec<(String, String)>);

impl DesignationMap {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// The standard meeting-list designations.
    pub fn reference() -> Self {
        const PAIRS: [(&str, &str); 11] = [
            ("O", "O"),
            ("C", "C"),
            ("D", "D"),
            ("MED", "M"),
            ("SP", "S"),
            ("B", "BB"),
            ("LIT", "LIT"),
            ("ST", "SS"),
            ("BE", "BG"),
            ("CF", "CF"),
            ("X", "WC"),
        ];
        Self(
            PAIRS
                .iter()
                .map(|(code, abbrev)| ((*code).to_string(), (*abbrev).to_string()))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(code, abbrev)| (code.as_str(), abbrev.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for DesignationMap {
    fn default() -> Self {
        Self::reference()
    }
}

/// Full run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input source: file path, `-` for stdin, or an http(s) URL.
    #[serde(rename = "minput")]
    pub input: String,
    /// Output sink: file path or `-` for stdout.
    #[serde(rename = "moutput")]
    pub output: String,
    /// Accepted `attendance_option` values.
    #[serde(rename = "mtypes")]
    pub types: BTreeSet<String>,
    #[serde(rename = "mpage_size")]
    pub page_size: PageSize,
    #[serde(rename = "mpage_orientation")]
    pub page_orientation: Orientation,
    /// Column widths as percentages of a frame.
    #[serde(rename = "mcol_widths", deserialize_with = "percentages")]
    pub col_widths: Vec<f32>,
    #[serde(rename = "mframe_count")]
    pub frame_count: usize,
    #[serde(rename = "mfont")]
    pub font: String,
    #[serde(rename = "mfont_size")]
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    #[serde(rename = "mleading")]
    pub leading: f32,
    /// Uniform page margin in inches.
    #[serde(rename = "mpage_margin")]
    pub page_margin: f32,
    /// Cover image or text file.
    #[serde(rename = "mcover_page")]
    pub cover_page: Option<PathBuf>,
    /// Cover image width as a fraction of the frame width.
    #[serde(rename = "mcover_page_size", alias = "mcover_scale")]
    pub cover_scale: f32,
    /// Section labels, indexed by event `day`.
    #[serde(rename = "msections")]
    pub sections: Vec<String>,
    #[serde(rename = "mdesignations")]
    pub designations: DesignationMap,
    /// Language hint written into the document.
    #[serde(rename = "mlanguage")]
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: "-".to_string(),
            output: "events.pdf".to_string(),
            types: ["in_person", "hybrid"]
                .into_iter()
                .map(String::from)
                .collect(),
            page_size: PageSize::default(),
            page_orientation: Orientation::default(),
            col_widths: vec![15.0, 70.0, 15.0],
            frame_count: 4,
            font: "Helvetica".to_string(),
            font_size: 8.0,
            leading: 1.2,
            page_margin: 0.5,
            cover_page: None,
            cover_scale: 1.0,
            sections: [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            designations: DesignationMap::reference(),
            language: "en".to_string(),
        }
    }
}

impl Config {
    /// Page template inputs for the layout engine.
    pub fn page_config(&self) -> PageConfig {
        PageConfig {
            size: self.page_size,
            orientation: self.page_orientation,
            margin_inches: self.page_margin,
            frame_count: self.frame_count,
            column_percentages: self.col_widths.clone(),
        }
    }

    /// Paragraph and table styles derived from the font settings.
    pub fn style_sheet(&self) -> StyleSheet {
        StyleSheet::new(&self.font, self.font_size, self.leading)
    }
}

/// Inputs to the page geometry computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub size: PageSize,
    pub orientation: Orientation,
    pub margin_inches: f32,
    pub frame_count: usize,
    pub column_percentages: Vec<f32>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Config::default().page_config()
    }
}

/// The three paragraph styles used by a schedule plus the table style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    /// Table cell text.
    pub body: ParagraphStyle,
    /// Section headings.
    pub heading: ParagraphStyle,
    /// Cover page text and date stamp.
    pub cover: ParagraphStyle,
    pub table: TableStyle,
}

impl StyleSheet {
    pub fn new(font: &str, font_size: f32, leading: f32) -> Self {
        let body = ParagraphStyle {
            name: "events".to_string(),
            font: font.to_string(),
            font_size,
            leading: font_size * leading,
            alignment: Alignment::Left,
            keep_with_next: false,
        };
        let heading_size = font_size + 3.0;
        let heading = ParagraphStyle {
            name: "headings".to_string(),
            font: font.to_string(),
            font_size: heading_size,
            leading: heading_size * 1.2,
            alignment: Alignment::Center,
            keep_with_next: true,
        };
        let cover = ParagraphStyle {
            name: "cover_page".to_string(),
            font: font.to_string(),
            font_size,
            leading: font_size * 1.2,
            alignment: Alignment::Center,
            keep_with_next: false,
        };
        let table = TableStyle {
            padding: Default::default(),
            cell: body.clone(),
        };
        Self {
            body,
            heading,
            cover,
            table,
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Config::default().style_sheet()
    }
}

/// Accept percentages written either as numbers or as numeric strings.
fn percentages<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Percentage {
        Number(f32),
        Text(String),
    }

    let values = Vec::<Percentage>::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|value| match value {
            Percentage::Number(number) => Ok(number),
            Percentage::Text(text) => text.trim().parse::<f32>().map_err(|_| {
                serde::de::Error::custom(format!("invalid column width percentage '{text}'"))
            }),
        })
        .collect()
}
