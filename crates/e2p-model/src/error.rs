//! Error types for the rendering pipeline stages.

use thiserror::Error;

/// Pipeline stage identifiers, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    InputLoad,
    FilterGroup,
    Format,
    Layout,
    Render,
    Output,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::InputLoad => "load",
            Stage::FilterGroup => "group",
            Stage::Format => "format",
            Stage::Layout => "layout",
            Stage::Render => "render",
            Stage::Output => "write",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while filtering and grouping events into sections.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    /// A record lacks a field grouping depends on.
    #[error("event {index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// A record's day does not name a configured section.
    #[error("event {index} has day {day}, expected 0..{sections}")]
    DayOutOfRange {
        index: usize,
        day: i64,
        sections: usize,
    },
}

/// Errors raised while formatting one event into a table row.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A display field is absent or empty.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// The region does not occur after whitespace in the address.
    #[error("region '{region}' not found in address '{address}'")]
    RegionNotFound { region: String, address: String },

    /// Batch formatting failed on a specific row.
    #[error("section '{section}' row {row}: {source}")]
    Row {
        section: String,
        row: usize,
        #[source]
        source: Box<FormatError>,
    },
}

/// Errors raised while computing geometry or assembling the document.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// Frame count of zero.
    #[error("frame count must be at least 1")]
    NoFrames,

    /// Margins leave no room for content.
    #[error("margin of {margin}pt leaves no content area on a {width}x{height}pt page")]
    NoContentArea { margin: f32, width: f32, height: f32 },

    /// A non-empty section produced no first row.
    #[error("section '{section}' has rows but no first row could be extracted")]
    RowExtraction { section: String },
}

/// Errors raised by a document renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// An image element could not be decoded for embedding.
    #[error("failed to decode image: {0}")]
    Image(String),

    /// The document has no frames to flow into.
    #[error("page template has no frames")]
    NoFrames,

    #[error("render failed: {0}")]
    Message(String),
}

/// Non-fatal problems building the cover page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverWarning {
    #[error("no cover page configured, using default")]
    NotConfigured,

    #[error("cover page not found: {path}, using default")]
    NotFound { path: String },

    #[error("cover page unreadable: {path}: {message}, using default")]
    Unreadable { path: String, message: String },

    #[error("cover image could not be decoded: {path}: {message}, skipping image")]
    ImageDecode { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels_match_span_names() {
        let labels: Vec<_> = [
            Stage::Config,
            Stage::InputLoad,
            Stage::FilterGroup,
            Stage::Format,
            Stage::Layout,
            Stage::Render,
            Stage::Output,
        ]
        .into_iter()
        .map(Stage::as_str)
        .collect();
        assert_eq!(
            labels,
            ["config", "load", "group", "format", "layout", "render", "write"]
        );
    }
}
