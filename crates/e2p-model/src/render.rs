//! Seam between the layout engine and a concrete output format.

use crate::document::DocumentModel;
use crate::error::RenderError;

/// Lays out a finished document and produces the output byte stream.
///
/// Implementations own line wrapping, frame and page breaking, and
/// serialization. They never write to the output sink.
pub trait DocumentRenderer {
    fn render(&self, document: &DocumentModel) -> Result<Vec<u8>, RenderError>;
}
