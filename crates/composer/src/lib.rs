//! PDF composition utilities for assembling a CV document.
//!
//! Built on lopdf:
//! - Deep object import with cycle detection, for appending the pages
//!   of one document to another.
//! - Content-stream overlay, for stamping labels onto existing pages.
//! - Page numbering over a fully merged document (see [`numbering`]).
//! - Parsing of externally fetched PDF bytes ([`load_document`]).

mod error;
pub mod numbering;

pub use error::ComposerError;
pub use lopdf;

use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::collections::HashMap;

/// Tracks the state of one import of objects from a source document
/// into a target document.
struct ObjectImporter<'a> {
    source: &'a Document,
    target: &'a mut Document,
    imported: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectImporter<'a> {
    fn new(source: &'a Document, target: &'a mut Document) -> Self {
        Self {
            source,
            target,
            imported: HashMap::new(),
        }
    }

    /// Deep-copies `source_id` and everything it references into the
    /// target document, returning the new id.
    ///
    /// Each source object is imported at most once. The new id is
    /// registered *before* recursing, holding a `Null` placeholder, so
    /// that reference cycles (Page -> Parent -> Kids -> Page) terminate.
    fn import(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(existing) = self.imported.get(&source_id) {
            return Ok(*existing);
        }

        let placeholder = self.target.add_object(Object::Null);
        self.imported.insert(source_id, placeholder);

        let source_obj = self.source.get_object(source_id)?.clone();
        let rewritten = self.rewrite(source_obj)?;

        match self.target.objects.get_mut(&placeholder) {
            Some(slot) => *slot = rewritten,
            None => return Err(lopdf::Error::ObjectNotFound(placeholder)),
        }

        Ok(placeholder)
    }

    /// Rewrites every `Object::Reference` inside `obj` to point at the
    /// imported copy, importing referenced objects on demand.
    fn rewrite(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.import(id)?)),
            Object::Array(items) => {
                let items = items
                    .into_iter()
                    .map(|item| self.rewrite(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Object::Array(items))
            }
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.rewrite(value.clone())?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.rewrite(value.clone())?;
                }
                Ok(Object::Stream(stream))
            }
            primitive => Ok(primitive),
        }
    }
}

/// Appends every page of `source`, in page order, to the end of
/// `target`. Returns the number of pages appended.
///
/// Page objects are imported together with everything they reference
/// (content streams, resources, fonts), receiving fresh object ids in
/// the target. The imported pages are then re-parented onto the
/// target's page tree.
pub fn append_pages(target: &mut Document, source: &Document) -> Result<usize, ComposerError> {
    let mut source_pages: Vec<_> = source.get_pages().into_iter().collect();
    if source_pages.is_empty() {
        return Ok(0);
    }
    source_pages.sort_by_key(|(number, _)| *number);
    let appended = source_pages.len();

    let mut importer = ObjectImporter::new(source, target);
    let mut imported_ids = Vec::with_capacity(appended);
    for (_, page_id) in source_pages {
        imported_ids.push(importer.import(page_id)?);
    }

    let root_id = target.trailer.get(b"Root")?.as_reference()?;
    let pages_id = target
        .get_object(root_id)?
        .as_dict()?
        .get(b"Pages")?
        .as_reference()?;

    let pages_dict = target.get_object_mut(pages_id)?.as_dict_mut()?;
    let mut kids = pages_dict.get(b"Kids")?.as_array()?.clone();
    let count = pages_dict.get(b"Count")?.as_i64()?;
    kids.extend(imported_ids.iter().map(|id| Object::Reference(*id)));
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set("Count", count + appended as i64);

    // The imported pages still carry their old parent reference.
    for id in imported_ids {
        if let Ok(Object::Dictionary(page)) = target.get_object_mut(id) {
            page.set("Parent", Object::Reference(pages_id));
        }
    }

    Ok(appended)
}

/// Draws `content_stream` on top of an existing page by appending it
/// to the page's content array.
pub fn overlay_page(
    doc: &mut Document,
    page_id: ObjectId,
    content_stream: Vec<u8>,
) -> Result<(), ComposerError> {
    let overlay_id = doc.add_object(Object::Stream(Stream::new(dictionary! {}, content_stream)));

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    let contents = page.get_mut(b"Contents").map_err(|_| {
        ComposerError::Other(format!("page {:?} has no /Contents entry", page_id))
    })?;

    // Contents is either a single stream reference or already an array.
    let mut streams = match contents.as_array() {
        Ok(existing) => existing.clone(),
        Err(_) => vec![contents.clone()],
    };
    streams.push(Object::Reference(overlay_id));
    page.set("Contents", Object::Array(streams));

    Ok(())
}

/// Parses raw PDF bytes, e.g. a fetched certificate file.
pub fn load_document(bytes: &[u8]) -> Result<Document, ComposerError> {
    Ok(Document::load_mem(bytes)?)
}

/// The number of pages in the document's page tree.
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}


#[cfg(test)]
mod tests {
    use super::test_support::make_test_pdf;
    use super::*;

    #[test]
    fn test_append_pages_preserves_order() {
        let mut target = make_test_pdf(2, "Target");
        let source = make_test_pdf(3, "Source");

        let appended = append_pages(&mut target, &source).unwrap();
        assert_eq!(appended, 3);
        assert_eq!(page_count(&target), 5);

        let pages = target.get_pages();
        let page_3 = target.get_page_content(*pages.get(&3).unwrap()).unwrap();
        assert!(String::from_utf8_lossy(&page_3).contains("Source 1"));
        let page_5 = target.get_page_content(*pages.get(&5).unwrap()).unwrap();
        assert!(String::from_utf8_lossy(&page_5).contains("Source 3"));
    }

    #[test]
    fn test_append_pages_empty_source_is_noop() {
        let mut target = make_test_pdf(1, "Target");
        let source = make_test_pdf(0, "Source");

        let appended = append_pages(&mut target, &source).unwrap();
        assert_eq!(appended, 0);
        assert_eq!(page_count(&target), 1);
    }

    #[test]
    fn test_append_pages_repeatedly() {
        let mut target = make_test_pdf(1, "Target");
        for _ in 0..3 {
            let source = make_test_pdf(2, "Cert");
            append_pages(&mut target, &source).unwrap();
        }
        assert_eq!(page_count(&target), 7);
    }

    #[test]
    fn test_overlay_page_keeps_original_content() {
        let mut doc = make_test_pdf(1, "Original");
        let page_id = *doc.get_pages().get(&1).unwrap();

        let overlay = lopdf::content::Content {
            operations: vec![
                lopdf::content::Operation::new("BT", vec![]),
                lopdf::content::Operation::new("Tf", vec!["F1".into(), 9.into()]),
                lopdf::content::Operation::new("Td", vec![100.into(), 40.into()]),
                lopdf::content::Operation::new("Tj", vec![Object::string_literal("Stamp")]),
                lopdf::content::Operation::new("ET", vec![]),
            ],
        }
        .encode()
        .unwrap();

        overlay_page(&mut doc, page_id, overlay).unwrap();

        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let contents = page.get(b"Contents").unwrap().as_array().unwrap();
        assert_eq!(contents.len(), 2);

        let merged = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8_lossy(&merged);
        assert!(text.contains("Original 1"));
        assert!(text.contains("Stamp"));
    }

    #[test]
    fn test_load_document_round_trip() {
        let mut doc = make_test_pdf(2, "Saved");
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();

        let loaded = load_document(&buffer).unwrap();
        assert_eq!(page_count(&loaded), 2);
    }

    #[test]
    fn test_load_document_rejects_garbage() {
        assert!(load_document(b"this is not a pdf").is_err());
    }
}
