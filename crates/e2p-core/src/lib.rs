//! Schedule rendering core: grouping, cell formatting, cover page and layout.
//!
//! The stages run in order and each returns an explicit result:
//! 1. [`group`] filters events by attendance option and partitions them by day
//! 2. [`format_sections`] turns each event into a three-cell row
//! 3. [`build_cover`] produces the leading cover page elements
//! 4. [`layout`] computes page geometry and assembles the document model

pub mod address;
pub mod cover;
pub mod format;
pub mod group;
pub mod layout;

pub use address::{non_breaking, split_address};
pub use cover::{CoverPage, DEFAULT_COVER_PAGE, build_cover, format_datestamp, today_datestamp};
pub use format::{designations, display_name, format_row, format_sections};
pub use group::group;
pub use layout::{LayoutInput, compute_geometry, layout};
