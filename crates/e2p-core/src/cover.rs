//! Cover page: date stamp followed by an image, a text file, or a default.
//!
//! The cover page is decorative, so nothing here fails the run. Problems
//! are collected as [`CoverWarning`]s and logged.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use e2p_model::{CoverWarning, Element, ImageElement, Markup, Paragraph, ParagraphStyle};

/// Cover text used when no cover file is available.
pub const DEFAULT_COVER_PAGE: &str = "<b>Weekly Meeting Schedule</b><br/><br/>\
Meetings are listed by day, then by start time.<br/>\
Check with the meeting contact before attending for the first time.";

/// Leading elements of the document and any problems met building them.
#[derive(Debug, Clone, Default)]
pub struct CoverPage {
    pub elements: Vec<Element>,
    pub warnings: Vec<CoverWarning>,
}

/// Date stamp in `MM/DD/YYYY` form.
pub fn format_datestamp(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Today's local date stamp.
pub fn today_datestamp() -> String {
    format_datestamp(Local::now().date_naive())
}

/// Build the cover page elements.
///
/// The bold date stamp always comes first. An image file (detected by its
/// content) is scaled to `frame_width * cover_scale` keeping its aspect
/// ratio; a text file is emitted as one paragraph; anything else falls back
/// to [`DEFAULT_COVER_PAGE`].
pub fn build_cover(
    datestamp: &str,
    cover_page: Option<&Path>,
    frame_width: f32,
    cover_scale: f32,
    style: &ParagraphStyle,
) -> CoverPage {
    let mut cover = CoverPage::default();
    cover.elements.push(paragraph(Markup::bold(datestamp), style));

    let Some(path) = cover_page else {
        cover.fall_back(CoverWarning::NotConfigured, style);
        return cover;
    };
    let shown = path.display().to_string();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            cover.fall_back(CoverWarning::NotFound { path: shown }, style);
            return cover;
        }
        Err(error) => {
            cover.fall_back(
                CoverWarning::Unreadable {
                    path: shown,
                    message: error.to_string(),
                },
                style,
            );
            return cover;
        }
    };

    if image::guess_format(&bytes).is_ok() {
        match image_element(bytes, frame_width * cover_scale) {
            Ok(element) => {
                debug!(path = %shown, width = element.width, height = element.height, "cover image");
                cover.elements.push(Element::Image(element));
            }
            Err(message) => {
                let warning = CoverWarning::ImageDecode {
                    path: shown,
                    message,
                };
                warn!("{warning}");
                cover.warnings.push(warning);
            }
        }
        return cover;
    }

    match String::from_utf8(bytes) {
        Ok(text) => {
            debug!(path = %shown, chars = text.len(), "cover text");
            cover.elements.push(paragraph(Markup::raw(text), style));
        }
        Err(error) => cover.fall_back(
            CoverWarning::Unreadable {
                path: shown,
                message: error.to_string(),
            },
            style,
        ),
    }
    cover
}

impl CoverPage {
    fn fall_back(&mut self, warning: CoverWarning, style: &ParagraphStyle) {
        warn!("{warning}");
        self.warnings.push(warning);
        self.elements
            .push(paragraph(Markup::raw(DEFAULT_COVER_PAGE), style));
    }
}

fn paragraph(markup: Markup, style: &ParagraphStyle) -> Element {
    Element::Paragraph(Paragraph {
        markup,
        style: style.clone(),
    })
}

fn image_element(data: Vec<u8>, width: f32) -> Result<ImageElement, String> {
    let decoded = image::load_from_memory(&data).map_err(|error| error.to_string())?;
    let (pixel_width, pixel_height) = (decoded.width(), decoded.height());
    if pixel_width == 0 || pixel_height == 0 {
        return Err("image has no pixels".to_string());
    }
    let aspect = pixel_height as f32 / pixel_width as f32;
    Ok(ImageElement {
        data,
        pixel_width,
        pixel_height,
        width,
        height: width * aspect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use e2p_model::StyleSheet;

    #[test]
    fn datestamp_is_month_day_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date");
        assert_eq!(format_datestamp(date), "03/07/2024");
    }

    #[test]
    fn unconfigured_cover_uses_default() {
        let style = StyleSheet::default().cover;
        let cover = build_cover("01/02/2024", None, 200.0, 1.0, &style);
        assert_eq!(cover.elements.len(), 2);
        assert_eq!(cover.warnings, vec![CoverWarning::NotConfigured]);
        let default = cover.elements[1].as_paragraph().expect("paragraph");
        assert_eq!(default.markup.as_str(), DEFAULT_COVER_PAGE);
    }
}
