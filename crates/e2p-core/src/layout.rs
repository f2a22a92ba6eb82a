//! Page geometry and document assembly.
//!
//! Geometry is a pure function of the page configuration. Assembly places
//! the cover elements first, then each non-empty section as a heading, a
//! one-row table holding the section's first row, and a table holding the
//! rest. The heading keeps with the next element, so binding it to a
//! single-row table keeps it in the same frame as its first event.

use tracing::{debug, warn};

use e2p_model::{
    DocumentModel, Element, FormattedRow, FormattedSection, FrameRect, LayoutError, Markup,
    Orientation, POINTS_PER_INCH, PageConfig, PageGeometry, Paragraph, StyleSheet, Table,
};

/// Tolerance when checking that column percentages add up to 100.
const PERCENT_TOLERANCE: f32 = 0.01;

/// Inputs to [`layout`] besides the sections and cover.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub page: &'a PageConfig,
    pub styles: &'a StyleSheet,
    /// Language hint carried into the document.
    pub language: &'a str,
}

/// Resolve the page template: page size, content area, frames and columns.
///
/// # Errors
///
/// Returns [`LayoutError::NoFrames`] for a frame count of zero and
/// [`LayoutError::NoContentArea`] when the margins consume the page.
pub fn compute_geometry(config: &PageConfig) -> Result<PageGeometry, LayoutError> {
    let (width, height) = config.size.dimensions();
    let (page_width, page_height) = match config.orientation {
        Orientation::Portrait => (width, height),
        Orientation::Landscape => (height, width),
    };

    let margin = config.margin_inches * POINTS_PER_INCH;
    let content_width = page_width - 2.0 * margin;
    let content_height = page_height - 2.0 * margin;
    if !margin.is_finite() || margin < 0.0 || content_width <= 0.0 || content_height <= 0.0 {
        return Err(LayoutError::NoContentArea {
            margin,
            width: page_width,
            height: page_height,
        });
    }
    if config.frame_count == 0 {
        return Err(LayoutError::NoFrames);
    }

    let frame_width = content_width / config.frame_count as f32;
    let frames = (0..config.frame_count)
        .map(|index| FrameRect {
            x: margin + index as f32 * frame_width,
            y: margin,
            width: frame_width,
            height: content_height,
        })
        .collect();

    let total: f32 = config.column_percentages.iter().sum();
    if (total - 100.0).abs() > PERCENT_TOLERANCE {
        warn!(total, "column width percentages do not add up to 100");
    }
    let column_widths = config
        .column_percentages
        .iter()
        .map(|pct| pct / 100.0 * frame_width)
        .collect();

    debug!(
        page_width,
        page_height,
        frame_count = config.frame_count,
        frame_width,
        frame_height = content_height,
        "page geometry"
    );

    Ok(PageGeometry {
        page_width,
        page_height,
        margin,
        content_width,
        content_height,
        frames,
        column_widths,
    })
}

/// Assemble the document model from formatted sections and cover elements.
///
/// # Errors
///
/// Propagates geometry errors and reports [`LayoutError::RowExtraction`] if
/// a non-empty section yields no first row.
pub fn layout(
    sections: Vec<FormattedSection>,
    cover: Vec<Element>,
    input: LayoutInput<'_>,
) -> Result<DocumentModel, LayoutError> {
    let geometry = compute_geometry(input.page)?;
    let mut elements = cover;

    for FormattedSection { label, rows } in sections {
        if rows.is_empty() {
            debug!(section = %label, "skipping empty section");
            continue;
        }
        let count = rows.len();
        let mut rows = rows.into_iter();
        let first = rows
            .next()
            .ok_or_else(|| LayoutError::RowExtraction {
                section: label.clone(),
            })?;

        elements.push(Element::Paragraph(Paragraph {
            markup: Markup::bold(&label),
            style: input.styles.heading.clone(),
        }));
        elements.push(table(vec![first], &geometry, input.styles));
        elements.push(table(rows.collect(), &geometry, input.styles));
        debug!(section = %label, rows = count, "section laid out");
    }

    Ok(DocumentModel {
        elements,
        geometry,
        language: input.language.to_string(),
    })
}

fn table(rows: Vec<FormattedRow>, geometry: &PageGeometry, styles: &StyleSheet) -> Element {
    Element::Table(Table {
        rows,
        column_widths: geometry.column_widths.clone(),
        style: styles.table.clone(),
    })
}
