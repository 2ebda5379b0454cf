use crate::style::StyleOptions;
use serde::Serialize;
use vitae_model::{
    AcademicProduct, CourseEntry, EducationEntry, ExperienceEntry, Profile, ProjectEntry,
    RecognitionEntry, SaleItem,
};

/// One line of the certificate index block.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateIndexEntry {
    /// The section the certificate belongs to ("Experience",
    /// "Courses", "Recognitions").
    pub section: String,
    pub title: String,
}

/// Everything a section template can see. Collections a section does
/// not use are simply left empty; templates never fail on empty
/// collections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderContext {
    pub profile: Option<Profile>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub courses: Vec<CourseEntry>,
    pub recognitions: Vec<RecognitionEntry>,
    pub projects: Vec<ProjectEntry>,
    pub sale_items: Vec<SaleItem>,
    pub academic_products: Vec<AcademicProduct>,
    pub certificate_index: Vec<CertificateIndexEntry>,
    pub styles: StyleOptions,
}

impl RenderContext {
    pub fn with_profile(profile: Option<Profile>, styles: StyleOptions) -> Self {
        Self {
            profile,
            styles,
            ..Self::default()
        }
    }
}
