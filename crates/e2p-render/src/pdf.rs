//! PDF serialization of paginated content.

use std::collections::{BTreeMap, BTreeSet};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

use e2p_model::{DocumentModel, Element, ImageElement, RenderError};

use crate::flow::{Page, Placed};
use crate::fonts::{StandardFont, encode_winansi};

const PRODUCER: &str = concat!("events2pdf ", env!("CARGO_PKG_VERSION"));
const COMPRESSION_LEVEL: u8 = 6;

struct Images {
    /// Resource name and object per image element index.
    objects: BTreeMap<usize, (String, Ref)>,
}

/// Serialize `pages` of `document` into PDF bytes.
///
/// # Errors
///
/// Returns [`RenderError::Image`] if a placed image cannot be decoded.
pub fn write_pdf(document: &DocumentModel, pages: &[Page]) -> Result<Vec<u8>, RenderError> {
    let mut pdf = Pdf::new();
    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let fonts: BTreeMap<StandardFont, (String, Ref)> = used_fonts(pages)
        .into_iter()
        .enumerate()
        .map(|(number, font)| (font, (format!("F{}", number + 1), alloc())))
        .collect();
    for (font, (_, id)) in &fonts {
        pdf.type1_font(*id)
            .base_font(Name(font.base_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let images = embed_images(document, pages, &mut pdf, &mut alloc)?;

    let page_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();

    for (page, content_id) in pages.iter().zip(&content_ids) {
        let raw = page_content(page, &fonts, &images).finish();
        let compressed =
            miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), COMPRESSION_LEVEL);
        pdf.stream(*content_id, &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id)
        .pages(pages_id)
        .lang(TextStr(&document.language));
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(pages.len() as i32);
    pdf.document_info(info_id).producer(TextStr(PRODUCER));

    let geometry = &document.geometry;
    for (page_id, content_id) in page_ids.iter().zip(&content_ids) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, geometry.page_width, geometry.page_height))
            .parent(pages_id)
            .contents(*content_id);
        let mut resources = page.resources();
        {
            let mut entries = resources.fonts();
            for (name, id) in fonts.values() {
                entries.pair(Name(name.as_bytes()), *id);
            }
        }
        if !images.objects.is_empty() {
            let mut entries = resources.x_objects();
            for (name, id) in images.objects.values() {
                entries.pair(Name(name.as_bytes()), *id);
            }
        }
    }

    debug!(
        pages = pages.len(),
        fonts = fonts.len(),
        images = images.objects.len(),
        "pdf assembled"
    );
    Ok(pdf.finish())
}

fn used_fonts(pages: &[Page]) -> BTreeSet<StandardFont> {
    pages
        .iter()
        .flat_map(|page| &page.items)
        .filter_map(|item| match item {
            Placed::Text { font, .. } => Some(*font),
            Placed::Image { .. } => None,
        })
        .collect()
}

fn embed_images(
    document: &DocumentModel,
    pages: &[Page],
    pdf: &mut Pdf,
    alloc: &mut dyn FnMut() -> Ref,
) -> Result<Images, RenderError> {
    let mut objects = BTreeMap::new();
    let placed = pages.iter().flat_map(|page| &page.items).filter_map(|item| match item {
        Placed::Image { element, .. } => Some(*element),
        Placed::Text { .. } => None,
    });
    for element in placed {
        if objects.contains_key(&element) {
            continue;
        }
        let Some(Element::Image(image)) = document.elements.get(element) else {
            return Err(RenderError::Message(format!(
                "element {element} is not an image"
            )));
        };
        let id = embed_image(image, pdf, alloc)?;
        let name = format!("Im{}", objects.len() + 1);
        objects.insert(element, (name, id));
    }
    Ok(Images { objects })
}

/// Embed an image as a Flate-compressed RGB XObject with an alpha soft mask
/// when any pixel is translucent.
fn embed_image(
    image: &ImageElement,
    pdf: &mut Pdf,
    alloc: &mut dyn FnMut() -> Ref,
) -> Result<Ref, RenderError> {
    let decoded = image::load_from_memory(&image.data)
        .map_err(|error| RenderError::Image(error.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = (rgba.width() as i32, rgba.height() as i32);
    let has_alpha = rgba.pixels().any(|pixel| pixel.0[3] < u8::MAX);

    let rgb: Vec<u8> = rgba
        .pixels()
        .flat_map(|pixel| [pixel.0[0], pixel.0[1], pixel.0[2]])
        .collect();
    let rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb, COMPRESSION_LEVEL);

    let mask_id = if has_alpha {
        let alpha: Vec<u8> = rgba.pixels().map(|pixel| pixel.0[3]).collect();
        let alpha = miniz_oxide::deflate::compress_to_vec_zlib(&alpha, COMPRESSION_LEVEL);
        let mask_id = alloc();
        let mut mask = pdf.image_xobject(mask_id, &alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(width);
        mask.height(height);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        Some(mask_id)
    } else {
        None
    };

    let id = alloc();
    let mut xobject = pdf.image_xobject(id, &rgb);
    xobject.filter(Filter::FlateDecode);
    xobject.width(width);
    xobject.height(height);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    if let Some(mask_id) = mask_id {
        xobject.s_mask(mask_id);
    }
    Ok(id)
}

fn page_content(
    page: &Page,
    fonts: &BTreeMap<StandardFont, (String, Ref)>,
    images: &Images,
) -> Content {
    let mut content = Content::new();
    for item in &page.items {
        match item {
            Placed::Text {
                x,
                y,
                font,
                size,
                text,
            } => {
                let Some((name, _)) = fonts.get(font) else {
                    continue;
                };
                let bytes = encode_winansi(text);
                content
                    .begin_text()
                    .set_font(Name(name.as_bytes()), *size)
                    .next_line(*x, *y)
                    .show(Str(&bytes))
                    .end_text();
            }
            Placed::Image {
                element,
                x,
                y,
                width,
                height,
            } => {
                let Some((name, _)) = images.objects.get(element) else {
                    continue;
                };
                content.save_state();
                content.transform([*width, 0.0, 0.0, *height, *x, *y]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
        }
    }
    content
}
