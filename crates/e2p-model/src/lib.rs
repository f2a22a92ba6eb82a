pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod markup;
pub mod render;

pub use config::{
    Config, DEFAULT_CONFIG_FILE, DesignationMap, Orientation, PageConfig, PageSize, StyleSheet,
};
pub use document::{
    Alignment, CellPadding, DocumentModel, Element, Emphasis, FormattedRow, FormattedSection,
    Fragment, FrameRect, ImageElement, POINTS_PER_INCH, PageGeometry, Paragraph, ParagraphStyle,
    Table, TableStyle,
};
pub use error::{CoverWarning, FormatError, GroupError, LayoutError, RenderError, Stage};
pub use event::{EventRecord, Section};
pub use markup::{BR, Markup, NBSP, escape};
pub use render::DocumentRenderer;
