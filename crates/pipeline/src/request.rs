//! Query parameters of one generation request.

use serde::Deserialize;
use vitae_render::{FontFamily, StyleOptions};

/// Value a toggle must carry to count as set.
pub(crate) const TOGGLE_ON: &str = "on";
/// `origen` value that switches to per-section filtering.
pub(crate) const ORIGIN_CUSTOM: &str = "personalizado";

/// Raw request parameters, named after the public query interface.
/// Everything is optional; absent toggles are excluded in custom mode
/// and irrelevant otherwise.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CvRequest {
    pub origen: Option<String>,
    pub experiencia: Option<String>,
    pub educacion: Option<String>,
    pub reconocimientos: Option<String>,
    pub proyectos: Option<String>,
    pub venta: Option<String>,
    pub productos_academicos: Option<String>,

    // Presentation options, honored only in custom mode.
    pub name_color: Option<String>,
    pub surname_color: Option<String>,
    pub header_color: Option<String>,
    pub accent_color: Option<String>,
    pub line_color: Option<String>,
    pub font_family: Option<String>,
    pub show_photo: Option<String>,
}

impl CvRequest {
    pub fn is_custom(&self) -> bool {
        self.origen.as_deref() == Some(ORIGIN_CUSTOM)
    }

    /// The immutable per-request style value. Default styles outside
    /// custom mode; in custom mode each option falls back to its
    /// documented default when absent.
    pub fn style_options(&self) -> StyleOptions {
        let defaults = StyleOptions::default();
        if !self.is_custom() {
            return defaults;
        }

        let pick = |value: &Option<String>, fallback: String| {
            value.clone().filter(|v| !v.is_empty()).unwrap_or(fallback)
        };

        StyleOptions {
            name_color: pick(&self.name_color, defaults.name_color),
            surname_color: pick(&self.surname_color, defaults.surname_color),
            header_color: pick(&self.header_color, defaults.header_color),
            accent_color: pick(&self.accent_color, defaults.accent_color),
            line_color: pick(&self.line_color, defaults.line_color),
            font_family: self
                .font_family
                .as_deref()
                .and_then(FontFamily::from_key)
                .unwrap_or(defaults.font_family),
            show_photo: self.show_photo.as_deref() == Some(TOGGLE_ON),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_uses_default_styles() {
        let request = CvRequest {
            header_color: Some("#ff0000".into()),
            ..CvRequest::default()
        };
        // Not custom: the style parameters are ignored.
        assert_eq!(request.style_options(), StyleOptions::default());
    }

    #[test]
    fn test_custom_mode_overrides_with_fallbacks() {
        let request = CvRequest {
            origen: Some("personalizado".into()),
            header_color: Some("#ff0000".into()),
            font_family: Some("times".into()),
            ..CvRequest::default()
        };
        let styles = request.style_options();
        assert_eq!(styles.header_color, "#ff0000");
        assert_eq!(styles.font_family, FontFamily::Times);
        // Unset options keep their defaults.
        assert_eq!(styles.line_color, StyleOptions::default().line_color);
        // show_photo is a toggle: absent means off in custom mode.
        assert!(!styles.show_photo);
    }

    #[test]
    fn test_unknown_font_key_falls_back() {
        let request = CvRequest {
            origen: Some("personalizado".into()),
            font_family: Some("comic-sans".into()),
            ..CvRequest::default()
        };
        assert_eq!(request.style_options().font_family, FontFamily::Helvetica);
    }
}
