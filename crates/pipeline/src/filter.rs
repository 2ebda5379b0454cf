//! Section inclusion decisions, computed once per request.

use crate::request::{CvRequest, ORIGIN_CUSTOM, TOGGLE_ON};

/// One inclusion flag per content category. Transient: derived from
/// the request, never persisted.
///
/// Custom mode is fail-closed: a toggle that is unset, empty, or
/// anything other than `"on"` excludes its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionInclusionSet {
    pub experience: bool,
    pub education: bool,
    pub recognitions: bool,
    pub projects: bool,
    pub sales: bool,
    pub academic_products: bool,
}

impl SectionInclusionSet {
    pub fn all() -> Self {
        Self {
            experience: true,
            education: true,
            recognitions: true,
            projects: true,
            sales: true,
            academic_products: true,
        }
    }

    pub fn from_request(request: &CvRequest) -> Self {
        if request.origen.as_deref() != Some(ORIGIN_CUSTOM) {
            return Self::all();
        }
        let on = |toggle: &Option<String>| toggle.as_deref() == Some(TOGGLE_ON);
        Self {
            experience: on(&request.experiencia),
            education: on(&request.educacion),
            recognitions: on(&request.reconocimientos),
            projects: on(&request.proyectos),
            sales: on(&request.venta),
            academic_products: on(&request.productos_academicos),
        }
    }

    /// The course category has no toggle of its own; it rides the
    /// education toggle.
    pub fn courses(&self) -> bool {
        self.education
    }
}
