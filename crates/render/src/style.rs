//! Per-request presentation options for the generated CV.
//!
//! One immutable value is constructed per request from query
//! parameters and threaded through the render context. Nothing here is
//! shared or mutated across requests.

use serde::{Serialize, Serializer};

/// The selectable font families, mapped to CSS stacks the converter
/// understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    /// Parses the query-parameter key; unknown keys get the default.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "helvetica" => Some(FontFamily::Helvetica),
            "times" => Some(FontFamily::Times),
            "courier" => Some(FontFamily::Courier),
            _ => None,
        }
    }

    pub fn css(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica, Arial, sans-serif",
            FontFamily::Times => "Times-Roman, Times New Roman, serif",
            FontFamily::Courier => "Courier, monospace",
        }
    }
}

impl Serialize for FontFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.css())
    }
}

/// Colors, font and photo switch for one generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleOptions {
    /// Color for the first-name part of the heading.
    pub name_color: String,
    /// Color for the surname part of the heading.
    pub surname_color: String,
    /// Section title color.
    pub header_color: String,
    /// Subtitles and details.
    pub accent_color: String,
    /// Divider lines.
    pub line_color: String,
    pub font_family: FontFamily,
    pub show_photo: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            name_color: "#1a1a1a".to_string(),
            surname_color: "#5A7D84".to_string(),
            header_color: "#1a1a1a".to_string(),
            accent_color: "#5A7D84".to_string(),
            line_color: "#BBD2D6".to_string(),
            font_family: FontFamily::Helvetica,
            show_photo: true,
        }
    }
}
