//! Page numbering for a fully merged document.
//!
//! Stamping happens once, after every merge: the label must reflect
//! the true final page count, which is unknown until certificate
//! attachments are in. Callers that need a fallback to the unstamped
//! document should stamp a clone.

use crate::{ComposerError, overlay_page};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

/// Font resource key injected into each stamped page.
const LABEL_FONT_KEY: &str = "Fvpn";
const LABEL_FONT_SIZE: f64 = 9.0;
/// Baseline distance from the bottom edge, in points.
const LABEL_BASELINE: f64 = 30.0;
/// Average Helvetica glyph advance as a fraction of the font size,
/// close enough for centering a short label.
const GLYPH_ADVANCE: f64 = 0.5;

/// Overlays a centered `Page i of N` label near the bottom margin of
/// every page, where `N` is the document's current page count.
///
/// Original page content and size are preserved. Calling this twice
/// would double-stamp; it is the caller's job to stamp exactly once,
/// at the end of assembly.
pub fn stamp_page_numbers(doc: &mut Document) -> Result<(), ComposerError> {
    let pages = doc.get_pages();
    let total = pages.len();
    if total == 0 {
        return Ok(());
    }

    // Resolve widths and build the overlays up front; failures here
    // leave the document untouched.
    let mut overlays: Vec<(ObjectId, Vec<u8>)> = Vec::with_capacity(total);
    for (&number, &page_id) in &pages {
        let width = page_width(doc, page_id);
        let label = format!("Page {} of {}", number, total);
        overlays.push((page_id, label_stream(&label, width)?));
    }

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    for (page_id, content) in overlays {
        ensure_label_font(doc, page_id, font_id)?;
        overlay_page(doc, page_id, content)?;
    }

    log::debug!("stamped page numbers on {} pages", total);
    Ok(())
}

fn label_stream(label: &str, page_width: f64) -> Result<Vec<u8>, ComposerError> {
    let text_width = label.chars().count() as f64 * LABEL_FONT_SIZE * GLYPH_ADVANCE;
    let x = ((page_width - text_width) / 2.0).max(0.0);

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![LABEL_FONT_KEY.into(), LABEL_FONT_SIZE.into()]),
            Operation::new("Td", vec![x.into(), LABEL_BASELINE.into()]),
            Operation::new("Tj", vec![Object::string_literal(label)]),
            Operation::new("ET", vec![]),
        ],
    };
    Ok(content.encode()?)
}

/// Width of the page's MediaBox, following the Parent chain for
/// inherited boxes. Falls back to US Letter width when unresolvable,
/// which only shifts the label slightly off-center.
fn page_width(doc: &Document, page_id: ObjectId) -> f64 {
    let mut current = page_id;
    for _ in 0..16 {
        let Ok(dict) = doc.get_dictionary(current) else {
            break;
        };
        if let Ok(media_box) = dict.get(b"MediaBox")
            && let Some(width) = media_box_width(doc, media_box)
        {
            return width;
        }
        match dict.get(b"Parent").and_then(|p| p.as_reference()) {
            Ok(parent) => current = parent,
            Err(_) => break,
        }
    }
    612.0
}

fn media_box_width(doc: &Document, media_box: &Object) -> Option<f64> {
    let resolved = match media_box {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let coords = resolved.as_array().ok()?;
    let x0 = coords.first()?.as_float().ok()? as f64;
    let x1 = coords.get(2)?.as_float().ok()? as f64;
    (x1 > x0).then_some(x1 - x0)
}

/// Makes the label font reachable from the page's resource dictionary.
///
/// Handles inline, referenced, and missing `/Resources`, and a `/Font`
/// entry that is itself a reference. Pages sharing one resources
/// dictionary get the entry set repeatedly, which is harmless.
fn ensure_label_font(
    doc: &mut Document,
    page_id: ObjectId,
    font_id: ObjectId,
) -> Result<(), ComposerError> {
    enum Resources {
        Inline,
        Referenced(ObjectId),
        Missing,
    }

    let location = {
        let page = doc.get_dictionary(page_id)?;
        match page.get(b"Resources") {
            Ok(Object::Reference(id)) => Resources::Referenced(*id),
            Ok(_) => Resources::Inline,
            Err(_) => Resources::Missing,
        }
    };

    let deferred_font_dict = match location {
        Resources::Missing => {
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            page.set(
                "Resources",
                dictionary! {
                    "Font" => dictionary! { LABEL_FONT_KEY => Object::Reference(font_id) },
                },
            );
            None
        }
        Resources::Inline => {
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            let resources = page
                .get_mut(b"Resources")
                .map_err(ComposerError::from)?
                .as_dict_mut()?;
            set_font_entry(resources, font_id)
        }
        Resources::Referenced(resources_id) => {
            let resources = doc.get_object_mut(resources_id)?.as_dict_mut()?;
            set_font_entry(resources, font_id)
        }
    };

    // A /Font entry that is a reference must be patched separately to
    // keep the borrow checker happy.
    if let Some(font_dict_id) = deferred_font_dict {
        let fonts = doc.get_object_mut(font_dict_id)?.as_dict_mut()?;
        fonts.set(LABEL_FONT_KEY, Object::Reference(font_id));
    }

    Ok(())
}

/// Sets the label font in `resources`, returning the id of a
/// referenced `/Font` dictionary when it cannot be mutated in place.
fn set_font_entry(resources: &mut Dictionary, font_id: ObjectId) -> Option<ObjectId> {
    match resources.get_mut(b"Font") {
        Ok(Object::Dictionary(fonts)) => {
            fonts.set(LABEL_FONT_KEY, Object::Reference(font_id));
            None
        }
        Ok(Object::Reference(id)) => Some(*id),
        _ => {
            resources.set(
                "Font",
                dictionary! { LABEL_FONT_KEY => Object::Reference(font_id) },
            );
            None
        }
    }
}
