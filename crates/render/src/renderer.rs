//! Section fragment rendering over embedded handlebars templates.

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::templates;
use handlebars::Handlebars;

/// Selects which content block a render invocation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionMode {
    /// Profile + experience + education. Mandatory.
    Top,
    /// All courses, batched.
    Courses,
    /// Recognitions, projects, sales, academic products.
    Bottom,
    /// Index of the attached certificates.
    CertificateIndex,
}

impl SectionMode {
    pub const ALL: [SectionMode; 4] = [
        SectionMode::Top,
        SectionMode::Courses,
        SectionMode::Bottom,
        SectionMode::CertificateIndex,
    ];

    fn template_name(&self) -> &'static str {
        match self {
            SectionMode::Top => "cv_top",
            SectionMode::Courses => "cv_courses",
            SectionMode::Bottom => "cv_bottom",
            SectionMode::CertificateIndex => "cv_certificate_index",
        }
    }

    fn template_source(&self) -> &'static str {
        match self {
            SectionMode::Top => templates::TOP,
            SectionMode::Courses => templates::COURSES,
            SectionMode::Bottom => templates::BOTTOM,
            SectionMode::CertificateIndex => templates::CERTIFICATE_INDEX,
        }
    }
}

/// Renders one HTML string per section mode. Pure: no I/O, and empty
/// collections produce a minimal section rather than an error.
#[derive(Debug)]
pub struct FragmentRenderer {
    engine: Handlebars<'static>,
}

impl FragmentRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut engine = Handlebars::new();
        // Non-strict: missing optional fields render as empty.
        engine.set_strict_mode(false);
        for mode in SectionMode::ALL {
            engine.register_template_string(mode.template_name(), mode.template_source())?;
        }
        Ok(Self { engine })
    }

    pub fn render(&self, mode: SectionMode, context: &RenderContext) -> Result<String, RenderError> {
        Ok(self.engine.render(mode.template_name(), context)?)
    }
}
