//! Flowing document elements through page frames.
//!
//! Every element is cut into blocks: one per paragraph line, one per table
//! row, one per image. Blocks are placed top to bottom in the current frame;
//! a block that does not fit moves to the next frame, and past the last frame
//! to a new page. Table rows never split.

use tracing::{debug, warn};

use e2p_model::{
    Alignment, DocumentModel, Element, Emphasis, FrameRect, ImageElement, Paragraph,
    ParagraphStyle, RenderError, Table,
};

use crate::fonts::{FontFamily, StandardFont};
use crate::markup::parse;
use crate::text::{Line, break_lines};

/// Descent below the baseline as a fraction of the font size.
const DESCENT: f32 = 0.2;
/// Narrowest text width a cell is given after padding.
const MIN_CELL_WIDTH: f32 = 1.0;
const EPSILON: f32 = 0.01;

/// Something drawn at an absolute page position.
#[derive(Debug, Clone, PartialEq)]
pub enum Placed {
    Text {
        x: f32,
        /// Baseline.
        y: f32,
        font: StandardFont,
        size: f32,
        text: String,
    },
    Image {
        /// Index of the image element in the document.
        element: usize,
        x: f32,
        /// Bottom edge.
        y: f32,
        width: f32,
        height: f32,
    },
}

/// One laid-out page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Placed>,
}

/// Drawing relative to a block's top-left corner, y measured downward.
#[derive(Debug, Clone)]
enum Mark {
    Text {
        dx: f32,
        dy: f32,
        font: StandardFont,
        size: f32,
        text: String,
    },
    Image {
        element: usize,
        dx: f32,
        dy: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default)]
struct Block {
    height: f32,
    marks: Vec<Mark>,
}

/// Lay out every element of `document` into pages.
///
/// # Errors
///
/// Returns [`RenderError::NoFrames`] when the page template has no frames.
pub fn paginate(document: &DocumentModel) -> Result<Vec<Page>, RenderError> {
    let frames = &document.geometry.frames;
    if frames.is_empty() {
        return Err(RenderError::NoFrames);
    }
    let frame_width = document.geometry.frame_width();
    let frame_height = document.geometry.frame_height();

    let blocks: Vec<Vec<Block>> = document
        .elements
        .iter()
        .enumerate()
        .map(|(index, element)| element_blocks(index, element, frame_width, frame_height))
        .collect();

    let mut cursor = Cursor::new(frames);
    for (index, element) in document.elements.iter().enumerate() {
        if element.keeps_with_next() {
            let own: f32 = blocks[index].iter().map(|block| block.height).sum();
            let next = blocks[index + 1..]
                .iter()
                .find_map(|following| following.first())
                .map_or(0.0, |block| block.height);
            cursor.reserve(own + next);
        }
        for block in &blocks[index] {
            cursor.place(block);
        }
    }

    let pages = cursor.finish();
    debug!(pages = pages.len(), "document paginated");
    Ok(pages)
}

struct Cursor<'a> {
    frames: &'a [FrameRect],
    pages: Vec<Page>,
    frame: usize,
    used: f32,
}

impl<'a> Cursor<'a> {
    fn new(frames: &'a [FrameRect]) -> Self {
        Self {
            frames,
            pages: vec![Page::default()],
            frame: 0,
            used: 0.0,
        }
    }

    fn current(&self) -> &FrameRect {
        &self.frames[self.frame]
    }

    fn remaining(&self) -> f32 {
        self.current().height - self.used
    }

    fn advance(&mut self) {
        self.frame += 1;
        self.used = 0.0;
        if self.frame == self.frames.len() {
            self.frame = 0;
            self.pages.push(Page::default());
        }
    }

    /// Move on unless `height` fits in this frame. An empty frame is never
    /// left, since the next one would not have more room.
    fn reserve(&mut self, height: f32) {
        if height > self.remaining() + EPSILON && self.used > 0.0 {
            self.advance();
        }
    }

    fn place(&mut self, block: &Block) {
        self.reserve(block.height);
        if block.height > self.remaining() + EPSILON {
            warn!(
                height = block.height,
                frame_height = self.current().height,
                "block taller than a frame, content will overflow"
            );
        }
        let frame = *self.current();
        let top = frame.top() - self.used;
        let page = self.pages.len() - 1;
        let items = &mut self.pages[page].items;
        for mark in &block.marks {
            items.push(match mark {
                Mark::Text {
                    dx,
                    dy,
                    font,
                    size,
                    text,
                } => Placed::Text {
                    x: frame.x + dx,
                    y: top - dy,
                    font: *font,
                    size: *size,
                    text: text.clone(),
                },
                Mark::Image {
                    element,
                    dx,
                    dy,
                    width,
                    height,
                } => Placed::Image {
                    element: *element,
                    x: frame.x + dx,
                    y: top - dy,
                    width: *width,
                    height: *height,
                },
            });
        }
        self.used += block.height;
    }

    fn finish(mut self) -> Vec<Page> {
        if self.pages.len() > 1 && self.pages.last().is_some_and(|page| page.items.is_empty()) {
            self.pages.pop();
        }
        self.pages
    }
}

fn element_blocks(index: usize, element: &Element, frame_width: f32, frame_height: f32) -> Vec<Block> {
    match element {
        Element::Paragraph(paragraph) => paragraph_blocks(paragraph, frame_width),
        Element::Table(table) => table_blocks(table, frame_width),
        Element::Image(image) => vec![image_block(index, image, frame_width, frame_height)],
    }
}

fn line_marks(line: &Line, dx: f32, dy: f32, size: f32, marks: &mut Vec<Mark>) {
    let mut x = dx;
    for span in &line.spans {
        marks.push(Mark::Text {
            dx: x,
            dy,
            font: span.font,
            size,
            text: span.text.clone(),
        });
        x += span.font.text_width(&span.text, size);
    }
}

fn baseline(style: &ParagraphStyle) -> f32 {
    style.leading - style.font_size * DESCENT
}

fn paragraph_blocks(paragraph: &Paragraph, frame_width: f32) -> Vec<Block> {
    let style = &paragraph.style;
    let family = FontFamily::resolve(&style.font);
    let tokens = parse(paragraph.markup.as_str(), false);
    break_lines(&tokens, family, style.font_size, frame_width)
        .iter()
        .map(|line| {
            let dx = match style.alignment {
                Alignment::Left => 0.0,
                Alignment::Center => ((frame_width - line.width) / 2.0).max(0.0),
            };
            let mut marks = Vec::new();
            line_marks(line, dx, baseline(style), style.font_size, &mut marks);
            Block {
                height: style.leading,
                marks,
            }
        })
        .collect()
}

/// Column widths for the three row cells. Missing widths share what the
/// given ones leave of the frame.
fn resolve_columns(widths: &[f32], frame_width: f32) -> [f32; 3] {
    let given: Vec<f32> = widths.iter().take(3).copied().collect();
    let missing = 3 - given.len();
    let fill = if missing == 0 {
        0.0
    } else {
        ((frame_width - given.iter().sum::<f32>()) / missing as f32).max(0.0)
    };
    let mut columns = [fill; 3];
    columns[..given.len()].copy_from_slice(&given);
    columns
}

fn table_blocks(table: &Table, frame_width: f32) -> Vec<Block> {
    let columns = resolve_columns(&table.column_widths, frame_width);
    let padding = table.style.padding;
    let style = &table.style.cell;
    let family = FontFamily::resolve(&style.font);

    table
        .rows
        .iter()
        .map(|row| {
            let mut marks = Vec::new();
            let mut x = 0.0;
            let mut tallest = 1;
            for (fragment, column) in row.cells().into_iter().zip(columns) {
                let bold = fragment.emphasis == Emphasis::Bold;
                let width = (column - padding.left - padding.right).max(MIN_CELL_WIDTH);
                let lines = break_lines(
                    &parse(fragment.markup.as_str(), bold),
                    family,
                    style.font_size,
                    width,
                );
                tallest = tallest.max(lines.len());
                for (number, line) in lines.iter().enumerate() {
                    let dy = padding.top + number as f32 * style.leading + baseline(style);
                    line_marks(line, x + padding.left, dy, style.font_size, &mut marks);
                }
                x += column;
            }
            Block {
                height: padding.top + padding.bottom + tallest as f32 * style.leading,
                marks,
            }
        })
        .collect()
}

fn image_block(index: usize, image: &ImageElement, frame_width: f32, frame_height: f32) -> Block {
    let (mut width, mut height) = (image.width, image.height);
    if width > frame_width || height > frame_height {
        let scale = (frame_width / width).min(frame_height / height);
        width *= scale;
        height *= scale;
    }
    Block {
        height,
        marks: vec![Mark::Image {
            element: index,
            dx: ((frame_width - width) / 2.0).max(0.0),
            dy: height,
            width,
            height,
        }],
    }
}
