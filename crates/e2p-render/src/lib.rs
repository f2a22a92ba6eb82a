//! Paginating PDF renderer for schedule documents.
//!
//! Elements flow through the frames of each page in order. Text uses the
//! standard PDF fonts with WinAnsi encoding; images are embedded as
//! compressed RGB XObjects.

pub mod flow;
pub mod fonts;
pub mod markup;
pub mod pdf;
pub mod text;

use std::collections::BTreeSet;

use tracing::{info, warn};

use e2p_model::{DocumentModel, DocumentRenderer, Element, RenderError};

pub use flow::{Page, Placed, paginate};
pub use fonts::{FontFamily, StandardFont};

/// Renders a [`DocumentModel`] to PDF bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, document: &DocumentModel) -> Result<Vec<u8>, RenderError> {
        for font in unknown_fonts(document) {
            warn!(font = %font, "unsupported font, using Helvetica");
        }
        let pages = paginate(document)?;
        let bytes = pdf::write_pdf(document, &pages)?;
        info!(pages = pages.len(), bytes = bytes.len(), "rendered pdf");
        Ok(bytes)
    }
}

fn unknown_fonts(document: &DocumentModel) -> BTreeSet<&str> {
    document
        .elements
        .iter()
        .filter_map(|element| match element {
            Element::Paragraph(paragraph) => Some(paragraph.style.font.as_str()),
            Element::Table(table) => Some(table.style.cell.font.as_str()),
            Element::Image(_) => None,
        })
        .filter(|font| !FontFamily::is_known(font))
        .collect()
}
