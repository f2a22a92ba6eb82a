//! Pagination and PDF output tests.

use std::io::Cursor;

use e2p_core::{LayoutInput, format_sections, group, layout};
use e2p_model::{
    Config, DocumentModel, DocumentRenderer, Element, EventRecord, FormattedRow, Fragment,
    FrameRect, ImageElement, Markup, PageGeometry, Paragraph, RenderError, StyleSheet, Table,
};
use e2p_render::{Page, PdfRenderer, Placed, paginate};
use proptest::prelude::*;

fn geometry(frames: usize, frame_height: f32) -> PageGeometry {
    let margin = 10.0;
    let frame_width = 200.0;
    PageGeometry {
        page_width: 2.0 * margin + frames as f32 * frame_width,
        page_height: 2.0 * margin + frame_height,
        margin,
        content_width: frames as f32 * frame_width,
        content_height: frame_height,
        frames: (0..frames)
            .map(|index| FrameRect {
                x: margin + index as f32 * frame_width,
                y: margin,
                width: frame_width,
                height: frame_height,
            })
            .collect(),
        column_widths: vec![30.0, 140.0, 30.0],
    }
}

fn document(elements: Vec<Element>, geometry: PageGeometry) -> DocumentModel {
    DocumentModel {
        elements,
        geometry,
        language: "en".to_string(),
    }
}

fn row(details: &str) -> FormattedRow {
    FormattedRow {
        time: Fragment::bold(Markup::raw("")),
        details: Fragment::body(Markup::raw(details)),
        region: Fragment::bold(Markup::raw("")),
    }
}

fn table(rows: Vec<FormattedRow>) -> Element {
    Element::Table(Table {
        rows,
        column_widths: vec![30.0, 140.0, 30.0],
        style: StyleSheet::default().table,
    })
}

fn texts(page: &Page) -> Vec<(&str, f32, f32)> {
    page.items
        .iter()
        .filter_map(|item| match item {
            Placed::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            Placed::Image { .. } => None,
        })
        .collect()
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}

#[test]
fn heading_moves_with_its_first_row() {
    let styles = StyleSheet::default();
    // Eight body lines use 76.8pt of a 100pt frame, leaving room for the
    // 13.2pt heading but not for the heading plus an 11.6pt row.
    let filler = Element::Paragraph(Paragraph {
        markup: Markup::raw("a<br/>".repeat(8)),
        style: styles.body.clone(),
    });
    let heading = Element::Paragraph(Paragraph {
        markup: Markup::bold("Monday"),
        style: styles.heading.clone(),
    });
    let doc = document(
        vec![filler, heading, table(vec![row("first")])],
        geometry(2, 100.0),
    );

    let pages = paginate(&doc).expect("paginate");
    assert_eq!(pages.len(), 1);
    let placed = texts(&pages[0]);
    let (_, heading_x, heading_y) = placed
        .iter()
        .copied()
        .find(|(text, ..)| *text == "Monday")
        .expect("heading placed");
    let (_, row_x, row_y) = placed
        .iter()
        .copied()
        .find(|(text, ..)| *text == "first")
        .expect("row placed");
    assert!(heading_x >= 210.0, "heading should start the second frame");
    assert!(row_x >= 210.0);
    assert!(row_y < heading_y);
}

#[test]
fn heading_stays_when_it_fits_with_its_row() {
    let styles = StyleSheet::default();
    let heading = Element::Paragraph(Paragraph {
        markup: Markup::bold("Tuesday"),
        style: styles.heading.clone(),
    });
    let doc = document(vec![heading, table(vec![row("first")])], geometry(2, 100.0));
    let pages = paginate(&doc).expect("paginate");
    assert!(texts(&pages[0]).iter().all(|(_, x, _)| *x < 210.0));
}

#[test]
fn long_tables_flow_across_pages() {
    // Each row is 11.6pt, so eight rows fill a 100pt frame.
    let rows = (0..20).map(|n| row(&format!("row {n}"))).collect();
    let doc = document(vec![table(rows)], geometry(1, 100.0));

    let pages = paginate(&doc).expect("paginate");
    assert_eq!(pages.len(), 3);
    assert_eq!(texts(&pages[0]).len(), 8);
    assert_eq!(texts(&pages[2]).len(), 4);
    for page in &pages {
        for (_, _, y) in texts(page) {
            assert!((10.0..=110.0).contains(&y));
        }
    }
}

#[test]
fn empty_template_is_an_error() {
    let doc = document(vec![table(vec![row("x")])], geometry(0, 100.0));
    assert!(matches!(paginate(&doc), Err(RenderError::NoFrames)));
}

#[test]
fn renders_a_schedule_to_pdf() {
    let config = Config::default();
    let events = vec![
        EventRecord {
            time_formatted: Some("7:00 AM".to_string()),
            name: Some("Sunrise".to_string()),
            types: ["O".to_string()].into_iter().collect(),
            attendance_option: Some("in_person".to_string()),
            day: Some(1),
            location: Some("Library".to_string()),
            formatted_address: Some("12 Main St, Gainesville, FL 32601".to_string()),
            region: Some("Gainesville".to_string()),
            notes: None,
        },
        EventRecord {
            attendance_option: Some("online".to_string()),
            ..Default::default()
        },
    ];
    let sections = group(events, &config.types, &config.sections).expect("group");
    let formatted = format_sections(&sections, &config.designations).expect("format");
    let styles = config.style_sheet();
    let page = config.page_config();
    let doc = layout(
        formatted,
        Vec::new(),
        LayoutInput {
            page: &page,
            styles: &styles,
            language: &config.language,
        },
    )
    .expect("layout");

    let bytes = PdfRenderer::new().render(&doc).expect("render");
    assert!(bytes.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/BaseFont /Helvetica-Bold"));
    assert!(text.contains("/WinAnsiEncoding"));
    assert!(text.contains("/Lang (en)"));
}

#[test]
fn embeds_cover_images_with_soft_mask() {
    let cover = Element::Image(ImageElement {
        data: png(4, 2),
        pixel_width: 4,
        pixel_height: 2,
        width: 100.0,
        height: 50.0,
    });
    let doc = document(vec![cover], geometry(1, 100.0));

    let pages = paginate(&doc).expect("paginate");
    let Some(Placed::Image { x, width, .. }) = pages[0].items.first() else {
        panic!("expected a placed image");
    };
    assert!((x - 60.0).abs() < 1e-3, "image should be centered");
    assert!((width - 100.0).abs() < 1e-3);

    let bytes = PdfRenderer::new().render(&doc).expect("render");
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Subtype /Image"));
    assert!(text.contains("/SMask"));
}

#[test]
fn undecodable_image_fails_rendering() {
    let cover = Element::Image(ImageElement {
        data: b"\x89PNG\r\n\x1a\nnot really".to_vec(),
        pixel_width: 1,
        pixel_height: 1,
        width: 10.0,
        height: 10.0,
    });
    let doc = document(vec![cover], geometry(1, 100.0));
    let err = PdfRenderer::new().render(&doc).unwrap_err();
    assert!(matches!(err, RenderError::Image(_)));
}

proptest! {
    #[test]
    fn rows_are_never_split(rows in 0usize..60, frames in 1usize..4) {
        let rows = (0..rows).map(|n| row(&format!("R{n}<br/>second"))).collect();
        let doc = document(vec![table(rows)], geometry(frames, 100.0));
        let pages = paginate(&doc).expect("paginate");
        for page in &pages {
            let placed = texts(page);
            for pair in placed.windows(2) {
                if pair[0].0.starts_with('R') {
                    prop_assert_eq!(pair[1].0, "second");
                    prop_assert!((pair[1].1 - pair[0].1).abs() < 1e-3);
                    prop_assert!((pair[0].2 - pair[1].2 - 9.6).abs() < 1e-3);
                }
            }
            prop_assert!(placed.first().is_none_or(|first| first.0.starts_with('R')));
        }
    }
}
