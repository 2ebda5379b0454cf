//! HTML→PDF conversion behind a trait seam.
//!
//! The assembler only depends on the [`HtmlConverter`] contract:
//! convert one HTML string to one PDF document, asking the resolver
//! about every non-absolute resource URI on the way, and fail per
//! invocation rather than per document.

use crate::error::ConversionError;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use vitae_resource::UriResolver;

/// Converts a rendered HTML fragment into a standalone PDF document.
pub trait HtmlConverter: Send + Sync {
    /// Produces a document with at least one page, or a
    /// [`ConversionError`] for this invocation only.
    ///
    /// Every resource reference in the HTML that does not carry an
    /// absolute scheme must be passed through `resolver`.
    fn convert(&self, html: &str, resolver: &dyn UriResolver)
    -> Result<Document, ConversionError>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// A plain text-flow converter: strips markup, wraps the text and lays
/// it onto A4 pages in Helvetica. Resource references are resolved and
/// checked for readability; an unresolvable resource is skipped, never
/// fatal.
pub struct TextFlowConverter {
    page_width: f64,
    page_height: f64,
    margin: f64,
    font_size: f64,
    leading: f64,
}

impl Default for TextFlowConverter {
    fn default() -> Self {
        // A4 in points.
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 54.0,
            font_size: 10.0,
            leading: 14.0,
        }
    }
}

impl TextFlowConverter {
    pub fn new() -> Self {
        Self::default()
    }

    fn max_chars_per_line(&self) -> usize {
        // Average Helvetica advance of half the font size.
        ((self.page_width - 2.0 * self.margin) / (self.font_size * 0.5)) as usize
    }

    fn lines_per_page(&self) -> usize {
        (((self.page_height - 2.0 * self.margin) / self.leading) as usize).max(1)
    }

    fn build_document(&self, lines: &[String]) -> Result<Document, ConversionError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        // Always emit at least one page, even for text-free input: the
        // mandatory top block must yield a page 1.
        let chunks: Vec<&[String]> = if lines.is_empty() {
            vec![&[]]
        } else {
            lines.chunks(self.lines_per_page()).collect()
        };

        let mut kids = Vec::with_capacity(chunks.len());
        for page_lines in chunks {
            let mut operations = Vec::with_capacity(page_lines.len() * 5 + 2);
            let mut y = self.page_height - self.margin;
            for line in page_lines {
                if !line.is_empty() {
                    operations.push(Operation::new("BT", vec![]));
                    operations.push(Operation::new(
                        "Tf",
                        vec!["F1".into(), self.font_size.into()],
                    ));
                    operations.push(Operation::new("Td", vec![self.margin.into(), y.into()]));
                    operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
                    operations.push(Operation::new("ET", vec![]));
                }
                y -= self.leading;
            }

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    self.page_width.into(),
                    self.page_height.into(),
                ],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }
            .into(),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }
}

impl HtmlConverter for TextFlowConverter {
    fn convert(
        &self,
        html: &str,
        resolver: &dyn UriResolver,
    ) -> Result<Document, ConversionError> {
        if html.trim().is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        for uri in resource_refs(html) {
            if has_absolute_scheme(&uri) {
                continue;
            }
            let resolved = resolver.resolve(&uri);
            if resolved == uri || !std::path::Path::new(&resolved).is_file() {
                // Best effort: the resource is simply not embedded.
                log::debug!("resource '{}' not readable, skipping embed", uri);
            }
        }

        let text = extract_text(html);
        let lines = wrap_lines(&text, self.max_chars_per_line());
        self.build_document(&lines)
    }

    fn name(&self) -> &'static str {
        "TextFlowConverter"
    }
}

fn has_absolute_scheme(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://") || uri.starts_with("data:")
}

/// Collects the values of `src` and `href` attributes.
fn resource_refs(html: &str) -> Vec<String> {
    let mut refs = Vec::new();
    for attr in ["src=\"", "href=\""] {
        let mut rest = html;
        while let Some(start) = rest.find(attr) {
            let value_start = &rest[start + attr.len()..];
            match value_start.find('"') {
                Some(end) => {
                    let value = &value_start[..end];
                    if !value.is_empty() {
                        refs.push(value.to_string());
                    }
                    rest = &value_start[end + 1..];
                }
                None => break,
            }
        }
    }
    refs
}

/// Tags that end a line of flowed text.
const BLOCK_CLOSERS: [&str; 12] = [
    "br", "/p", "/div", "/h1", "/h2", "/h3", "/h4", "/h5", "/h6", "/li", "/tr", "hr",
];

/// Strips tags, decodes common entities and marks block boundaries
/// with newlines.
fn extract_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len() / 2);
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) => {
                let tag = after[..close]
                    .trim_end_matches('/')
                    .split_whitespace()
                    .next()
                    .unwrap_or("")
                    .to_ascii_lowercase();
                if BLOCK_CLOSERS.contains(&tag.as_str()) {
                    text.push('\n');
                }
                rest = &after[close + 1..];
            }
            None => {
                // Unclosed tag: drop the remainder.
                rest = "";
            }
        }
    }
    text.push_str(rest);

    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapses whitespace per line and wraps long lines at word
/// boundaries.
fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(8);
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            // Keep at most one blank line between blocks.
            if !matches!(lines.last(), Some(last) if last.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }
        let mut current = String::new();
        for word in collapsed.split(' ') {
            if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    while matches!(lines.last(), Some(last) if last.is_empty()) {
        lines.pop();
    }
    while matches!(lines.first(), Some(first) if first.is_empty()) {
        lines.remove(0);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use vitae_resource::PassthroughResolver;

    /// Records every URI it is asked to resolve.
    #[derive(Debug, Default)]
    struct RecordingResolver {
        seen: Mutex<Vec<String>>,
    }

    impl UriResolver for RecordingResolver {
        fn resolve(&self, uri: &str) -> String {
            self.seen.lock().unwrap().push(uri.to_string());
            uri.to_string()
        }

        fn name(&self) -> &'static str {
            "RecordingResolver"
        }
    }

    #[test]
    fn test_convert_produces_at_least_one_page() {
        let converter = TextFlowConverter::new();
        let doc = converter
            .convert("<html><body><p>Hello</p></body></html>", &PassthroughResolver)
            .unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let page_id = *doc.get_pages().get(&1).unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        assert!(String::from_utf8_lossy(&content).contains("Hello"));
    }

    #[test]
    fn test_convert_empty_input_fails() {
        let converter = TextFlowConverter::new();
        let result = converter.convert("   \n  ", &PassthroughResolver);
        assert!(matches!(result, Err(ConversionError::EmptyInput)));
    }

    #[test]
    fn test_convert_markup_without_text_still_yields_a_page() {
        let converter = TextFlowConverter::new();
        let doc = converter
            .convert("<html><body></body></html>", &PassthroughResolver)
            .unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_convert_long_text_paginates() {
        let converter = TextFlowConverter::new();
        let body: String = (0..400)
            .map(|i| format!("<p>Paragraph number {} with some filler text.</p>", i))
            .collect();
        let doc = converter
            .convert(&format!("<html><body>{}</body></html>", body), &PassthroughResolver)
            .unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn test_relative_resources_go_through_resolver() {
        let converter = TextFlowConverter::new();
        let resolver = RecordingResolver::default();
        let html = r#"<html><body>
            <img src="/media/perfil/photo.jpg"/>
            <img src="https://cdn.example.com/remote.png"/>
            <link href="/static/cv.css"/>
            <p>text</p>
        </body></html>"#;

        converter.convert(html, &resolver).unwrap();

        let seen = resolver.seen.lock().unwrap();
        assert!(seen.contains(&"/media/perfil/photo.jpg".to_string()));
        assert!(seen.contains(&"/static/cv.css".to_string()));
        // Absolute URIs are the transport layer's problem.
        assert!(!seen.iter().any(|u| u.contains("cdn.example.com")));
    }

    #[test]
    fn test_extract_text_strips_tags_and_entities() {
        let text = extract_text("<p>Fish &amp; Chips</p><p>Second</p>");
        assert!(text.contains("Fish & Chips"));
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_wrap_lines_respects_word_boundaries() {
        let lines = wrap_lines("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }
}
