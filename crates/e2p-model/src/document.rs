//! Document model handed from the layout engine to a renderer.
//!
//! All lengths are PDF points (1/72 inch). Frame rectangles use the PDF
//! convention of a bottom-left origin.

use crate::markup::Markup;

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Horizontal alignment of paragraph lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// Paragraph style.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    /// Style name, used only in logs.
    pub name: String,
    /// Font family, e.g. `Helvetica`.
    pub font: String,
    pub font_size: f32,
    /// Baseline-to-baseline distance.
    pub leading: f32,
    pub alignment: Alignment,
    /// Keep this paragraph in the same frame as the start of the next element.
    pub keep_with_next: bool,
}

/// Inner padding applied to every table cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPadding {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for CellPadding {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: 2.0,
            left: 0.0,
            right: 3.0,
        }
    }
}

/// Table style: cell padding plus the paragraph style for cell text.
///
/// Cells are always top-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub padding: CellPadding,
    pub cell: ParagraphStyle,
}

/// Whether a cell fragment is rendered in the body or bold face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Emphasis {
    #[default]
    Body,
    Bold,
}

/// One cell of a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub markup: Markup,
    pub emphasis: Emphasis,
}

impl Fragment {
    pub fn body(markup: Markup) -> Self {
        Self {
            markup,
            emphasis: Emphasis::Body,
        }
    }

    pub fn bold(markup: Markup) -> Self {
        Self {
            markup,
            emphasis: Emphasis::Bold,
        }
    }
}

/// The three cells of one schedule row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
    pub time: Fragment,
    pub details: Fragment,
    pub region: Fragment,
}

impl FormattedRow {
    /// Cells in column order.
    pub fn cells(&self) -> [&Fragment; 3] {
        [&self.time, &self.details, &self.region]
    }
}

/// A section label with its formatted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedSection {
    pub label: String,
    pub rows: Vec<FormattedRow>,
}

/// A paragraph of inline markup.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub markup: Markup,
    pub style: ParagraphStyle,
}

/// A raster image scaled to a display size.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    /// Encoded image bytes as read from disk.
    pub data: Vec<u8>,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Display width in points.
    pub width: f32,
    /// Display height in points.
    pub height: f32,
}

/// A table of schedule rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<FormattedRow>,
    pub column_widths: Vec<f32>,
    pub style: TableStyle,
}

/// One flowable element of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Paragraph(Paragraph),
    Image(ImageElement),
    Table(Table),
}

impl Element {
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Element::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Element::Table(table) => Some(table),
            _ => None,
        }
    }

    /// True for paragraphs that must stay with the following element.
    pub fn keeps_with_next(&self) -> bool {
        self.as_paragraph()
            .is_some_and(|paragraph| paragraph.style.keep_with_next)
    }
}

/// A frame rectangle, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FrameRect {
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Resolved page template.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub content_width: f32,
    pub content_height: f32,
    /// Frames in flow order, left to right.
    pub frames: Vec<FrameRect>,
    /// Table column widths within one frame.
    pub column_widths: Vec<f32>,
}

impl PageGeometry {
    pub fn frame_width(&self) -> f32 {
        self.frames.first().map_or(0.0, |frame| frame.width)
    }

    pub fn frame_height(&self) -> f32 {
        self.frames.first().map_or(0.0, |frame| frame.height)
    }
}

/// The finished document: elements in flow order plus the page template.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentModel {
    pub elements: Vec<Element>,
    pub geometry: PageGeometry,
    /// Language hint, e.g. `en`.
    pub language: String,
}
